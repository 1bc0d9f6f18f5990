//! In-memory document model.
//!
//! A [`Component`] is one element of the vocabulary: its tag, the typed
//! fields read from its attributes, and its owned children. Children are
//! either nested components or text runs (mixed content).

use std::collections::BTreeMap;

use serde::Serialize;

use crate::xml::QualifiedName;

/// A typed attribute value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Value {
    /// Free text.
    String(String),
    /// An identifier (NCName-like token referring to a declaration).
    Identifier(String),
    Integer(i64),
    Float(f64),
    Boolean(bool),
    /// One keyword out of an enumerated set.
    Token(String),
    /// Whitespace-separated list of tokens.
    List(Vec<String>),
    Uri(String),
}

impl Value {
    /// Name of the value's type, for error messages.
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::String(_) => "string",
            Self::Identifier(_) => "identifier",
            Self::Integer(_) => "integer",
            Self::Float(_) => "float",
            Self::Boolean(_) => "boolean",
            Self::Token(_) => "token",
            Self::List(_) => "list",
            Self::Uri(_) => "uri",
        }
    }

    pub fn string(value: impl Into<String>) -> Self {
        Self::String(value.into())
    }

    pub fn identifier(value: impl Into<String>) -> Self {
        Self::Identifier(value.into())
    }

    pub fn token(value: impl Into<String>) -> Self {
        Self::Token(value.into())
    }

    pub fn uri(value: impl Into<String>) -> Self {
        Self::Uri(value.into())
    }
}

/// A child of a component.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Content {
    Component(Component),
    Text(String),
}

/// A node of the in-memory document tree.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Component {
    /// Local name of the vocabulary element.
    pub tag: String,

    /// Namespace of a sub-vocabulary; `None` for the base vocabulary.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,

    /// Typed fields keyed by attribute name.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub fields: BTreeMap<String, Value>,

    /// Owned children in document order.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Content>,
}

impl Component {
    /// Create a base-vocabulary component.
    #[must_use]
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            namespace: None,
            fields: BTreeMap::new(),
            children: Vec::new(),
        }
    }

    /// Create a component from a namespaced sub-vocabulary.
    #[must_use]
    pub fn namespaced(namespace: impl Into<String>, tag: impl Into<String>) -> Self {
        Self {
            namespace: Some(namespace.into()),
            ..Self::new(tag)
        }
    }

    /// Set a field.
    #[must_use]
    pub fn with_field(mut self, name: impl Into<String>, value: Value) -> Self {
        self.fields.insert(name.into(), value);
        self
    }

    /// Append a child component.
    #[must_use]
    pub fn with_child(mut self, child: Component) -> Self {
        self.children.push(Content::Component(child));
        self
    }

    /// Append a text run.
    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.push_text(text);
        self
    }

    /// Append a text run, merging it into a directly preceding run.
    ///
    /// Adjacent runs cannot survive a trip through text, so they are
    /// never stored separately.
    pub fn push_text(&mut self, text: impl Into<String>) {
        let text = text.into();
        if text.is_empty() {
            return;
        }
        match self.children.last_mut() {
            Some(Content::Text(previous)) => previous.push_str(&text),
            _ => self.children.push(Content::Text(text)),
        }
    }

    /// Qualified name used for handler lookup.
    #[must_use]
    pub fn qualified_name(&self) -> QualifiedName {
        QualifiedName::new(self.namespace.as_deref(), &self.tag)
    }

    /// Get a field by name.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    /// Iterate over child components, skipping text runs.
    pub fn child_components(&self) -> impl Iterator<Item = &Component> {
        self.children.iter().filter_map(|c| match c {
            Content::Component(component) => Some(component),
            Content::Text(_) => None,
        })
    }

    /// Concatenated text of the direct text runs.
    #[must_use]
    pub fn text(&self) -> String {
        self.children
            .iter()
            .filter_map(|c| match c {
                Content::Text(text) => Some(text.as_str()),
                Content::Component(_) => None,
            })
            .collect()
    }

    /// Number of components in this subtree, including `self`.
    #[must_use]
    pub fn count(&self) -> usize {
        1 + self.child_components().map(Component::count).sum::<usize>()
    }
}
