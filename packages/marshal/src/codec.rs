//! Typed read/write of single attribute values.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::{QtiError, Result};
use crate::model::Value;
use crate::xml::Node;

/// Identifier pattern (NCName subset used by the vocabulary).
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static IDENTIFIER_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_.\-]*$").expect("valid regex"));

/// Declared type of an attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttrKind {
    String,
    Identifier,
    Integer,
    Float,
    Boolean,
    /// One of a fixed set of keywords.
    Token(&'static [&'static str]),
    /// Whitespace-separated list.
    List,
    Uri,
}

impl fmt::Display for AttrKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String => f.write_str("string"),
            Self::Identifier => f.write_str("identifier"),
            Self::Integer => f.write_str("integer"),
            Self::Float => f.write_str("float"),
            Self::Boolean => f.write_str("boolean"),
            Self::Token(values) => write!(f, "one of [{}]", values.join(", ")),
            Self::List => f.write_str("list"),
            Self::Uri => f.write_str("uri"),
        }
    }
}

/// Read an attribute of `node` as `kind`.
///
/// Returns `Ok(None)` when the attribute is absent.
///
/// # Errors
/// `QtiError::Unmarshal` naming the attribute when the raw value does not
/// parse as `kind`.
pub fn read_attr(node: &Node, name: &str, kind: AttrKind) -> Result<Option<Value>> {
    node.attribute(name)
        .map(|raw| parse_value(raw, kind).map_err(|message| QtiError::unmarshal_attribute(node.tag(), name, message)))
        .transpose()
}

/// Parse a raw attribute string as `kind`.
///
/// The error is a human-readable reason; callers attach tag and attribute.
pub fn parse_value(raw: &str, kind: AttrKind) -> std::result::Result<Value, String> {
    match kind {
        AttrKind::String => Ok(Value::String(raw.to_string())),
        AttrKind::Uri => Ok(Value::Uri(raw.to_string())),
        AttrKind::Identifier => {
            let trimmed = raw.trim();
            if IDENTIFIER_PATTERN.is_match(trimmed) {
                Ok(Value::Identifier(trimmed.to_string()))
            } else {
                Err(format!("'{raw}' is not a valid identifier"))
            }
        }
        AttrKind::Integer => raw
            .trim()
            .parse()
            .map(Value::Integer)
            .map_err(|_| format!("'{raw}' is not a valid integer")),
        AttrKind::Float => raw
            .trim()
            .parse()
            .map(Value::Float)
            .map_err(|_| format!("'{raw}' is not a valid float")),
        AttrKind::Boolean => match raw.trim() {
            "true" | "1" => Ok(Value::Boolean(true)),
            "false" | "0" => Ok(Value::Boolean(false)),
            _ => Err(format!("'{raw}' is not a valid boolean")),
        },
        AttrKind::Token(allowed) => {
            let trimmed = raw.trim();
            if allowed.contains(&trimmed) {
                Ok(Value::Token(trimmed.to_string()))
            } else {
                Err(format!("'{raw}' is not {kind}"))
            }
        }
        AttrKind::List => Ok(Value::List(
            raw.split_whitespace().map(str::to_string).collect(),
        )),
    }
}

/// Write a typed value as attribute `name` of `node`.
pub fn write_attr(node: &mut Node, name: &str, value: &Value) {
    node.set_attribute(name, format_value(value));
}

/// Render a value in its attribute text form.
#[must_use]
pub fn format_value(value: &Value) -> String {
    match value {
        Value::String(s) | Value::Identifier(s) | Value::Token(s) | Value::Uri(s) => s.clone(),
        Value::Integer(i) => i.to_string(),
        Value::Float(f) => f.to_string(),
        Value::Boolean(b) => b.to_string(),
        Value::List(items) => items.join(" "),
    }
}

/// Check that `value` is a well-formed value of `kind`.
///
/// # Errors
/// A reason string when the variant or its content does not fit.
pub fn check_value(value: &Value, kind: AttrKind) -> std::result::Result<(), String> {
    let variant_fits = matches!(
        (value, kind),
        (Value::String(_), AttrKind::String)
            | (Value::Identifier(_), AttrKind::Identifier)
            | (Value::Integer(_), AttrKind::Integer)
            | (Value::Float(_), AttrKind::Float)
            | (Value::Boolean(_), AttrKind::Boolean)
            | (Value::Token(_), AttrKind::Token(_))
            | (Value::List(_), AttrKind::List)
            | (Value::Uri(_), AttrKind::Uri)
    );
    if !variant_fits {
        return Err(format!("expected {kind}, got {}", value.type_name()));
    }

    match (value, kind) {
        (Value::Identifier(_) | Value::Token(_), _) => {
            let parsed = parse_value(&format_value(value), kind)?;
            if parsed == *value {
                Ok(())
            } else {
                Err(format!("'{}' has surrounding whitespace", format_value(value)))
            }
        }
        (Value::List(items), _) if items.iter().any(|i| i.is_empty() || i.contains(char::is_whitespace)) => {
            Err("list items must be non-empty and contain no whitespace".to_string())
        }
        (Value::Float(f), _) if f.is_nan() => Err("NaN cannot be written".to_string()),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::xml::QualifiedName;

    const CARDINALITY: AttrKind = AttrKind::Token(&["single", "multiple", "ordered", "record"]);

    fn node_with(name: &str, value: &str) -> Node {
        let mut node = Node::new(QualifiedName::local("test"));
        node.set_attribute(name, value);
        node
    }

    #[test]
    fn test_read_absent() {
        let node = Node::new(QualifiedName::local("test"));
        assert_eq!(read_attr(&node, "missing", AttrKind::String).unwrap(), None);
    }

    #[test]
    fn test_read_typed_values() {
        assert_eq!(
            read_attr(&node_with("n", " 42 "), "n", AttrKind::Integer).unwrap(),
            Some(Value::Integer(42))
        );
        assert_eq!(
            read_attr(&node_with("f", "0.5"), "f", AttrKind::Float).unwrap(),
            Some(Value::Float(0.5))
        );
        assert_eq!(
            read_attr(&node_with("b", "1"), "b", AttrKind::Boolean).unwrap(),
            Some(Value::Boolean(true))
        );
        assert_eq!(
            read_attr(&node_with("c", "multiple"), "c", CARDINALITY).unwrap(),
            Some(Value::token("multiple"))
        );
        assert_eq!(
            read_attr(&node_with("l", " a  b\tc "), "l", AttrKind::List).unwrap(),
            Some(Value::List(vec!["a".into(), "b".into(), "c".into()]))
        );
    }

    #[test]
    fn test_read_invalid_names_attribute() {
        let err = read_attr(&node_with("maxChoices", "many"), "maxChoices", AttrKind::Integer)
            .unwrap_err();
        match err {
            QtiError::Unmarshal { tag, attribute, .. } => {
                assert_eq!(tag, "test");
                assert_eq!(attribute.as_deref(), Some("maxChoices"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_invalid_token_and_identifier() {
        assert!(parse_value("sometimes", CARDINALITY).is_err());
        assert!(parse_value("1abc", AttrKind::Identifier).is_err());
        assert!(parse_value("RESPONSE_1", AttrKind::Identifier).is_ok());
        assert!(parse_value("yes", AttrKind::Boolean).is_err());
    }

    #[test]
    fn test_format_value() {
        assert_eq!(format_value(&Value::Float(1.0)), "1");
        assert_eq!(format_value(&Value::Float(0.25)), "0.25");
        assert_eq!(format_value(&Value::Boolean(false)), "false");
        assert_eq!(format_value(&Value::List(vec!["a".into(), "b".into()])), "a b");
    }

    #[test]
    fn test_write_attr() {
        let mut node = Node::new(QualifiedName::local("test"));
        write_attr(&mut node, "maxChoices", &Value::Integer(3));
        assert_eq!(node.attribute("maxChoices"), Some("3"));
    }

    #[test]
    fn test_check_value() {
        assert!(check_value(&Value::Integer(1), AttrKind::Integer).is_ok());
        assert!(check_value(&Value::string("1"), AttrKind::Integer).is_err());
        assert!(check_value(&Value::token("sometimes"), CARDINALITY).is_err());
        assert!(check_value(&Value::identifier("bad id"), AttrKind::Identifier).is_err());
        assert!(check_value(&Value::List(vec!["a b".into()]), AttrKind::List).is_err());
        assert!(check_value(&Value::Float(f64::NAN), AttrKind::Float).is_err());
    }
}
