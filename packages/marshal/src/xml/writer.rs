//! Write a [`Node`] tree as XML text.

use std::borrow::Cow;
use std::io::Cursor;

use quick_xml::escape::escape;
use quick_xml::events::attributes::Attribute;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::name::QName;
use quick_xml::Writer;

use super::node::{Node, NodeContent};
use crate::config::{MEDIA_NAMESPACE, MEDIA_PREFIX, XSI_NAMESPACE};
use crate::error::{QtiError, Result};

/// Namespace-prefix allocator for one output document.
///
/// The root element's namespace becomes the default namespace; every
/// other namespace used by an element gets a prefix declared on the root.
/// Well-known namespaces keep their conventional prefix, the rest are
/// numbered `ns1`, `ns2`, ... in order of first appearance.
#[derive(Debug, Default)]
struct PrefixAllocator {
    default: Option<String>,
    prefixes: Vec<(String, String)>,
}

impl PrefixAllocator {
    fn for_tree(root: &Node) -> Self {
        let mut allocator = Self {
            default: root.name.namespace.clone(),
            prefixes: Vec::new(),
        };
        allocator.collect(root);
        allocator
    }

    fn collect(&mut self, node: &Node) {
        if let Some(ns) = &node.name.namespace {
            if self.default.as_deref() != Some(ns.as_str()) && self.prefix_for(ns).is_none() {
                let prefix = self.next_prefix(ns);
                self.prefixes.push((ns.clone(), prefix));
            }
        }
        if node.attributes.keys().any(|k| k.starts_with("xsi:")) && self.prefix_for(XSI_NAMESPACE).is_none() {
            self.prefixes.push((XSI_NAMESPACE.to_string(), "xsi".to_string()));
        }
        for child in node.element_children() {
            self.collect(child);
        }
    }

    fn next_prefix(&self, ns: &str) -> String {
        match ns {
            MEDIA_NAMESPACE => MEDIA_PREFIX.to_string(),
            XSI_NAMESPACE => "xsi".to_string(),
            _ => format!("ns{}", self.prefixes.len() + 1),
        }
    }

    fn prefix_for(&self, ns: &str) -> Option<&str> {
        self.prefixes
            .iter()
            .find(|(uri, _)| uri == ns)
            .map(|(_, prefix)| prefix.as_str())
    }
}

/// Serialize a node tree to XML text, with an XML declaration.
///
/// Output is compact (no indentation is inserted) so that mixed content
/// reads back exactly as written.
///
/// # Examples
/// ```
/// use qtibind_marshal::xml::{parse, write};
///
/// let node = parse(r#"<p xmlns="urn:a">a &amp; <em>b</em></p>"#).unwrap();
/// let text = write(&node).unwrap();
/// assert!(text.ends_with(r#"<p xmlns="urn:a">a &amp; <em>b</em></p>"#));
/// assert_eq!(parse(&text).unwrap(), node);
/// ```
pub fn write(node: &Node) -> Result<String> {
    let allocator = PrefixAllocator::for_tree(node);
    let mut writer = Writer::new(Cursor::new(Vec::new()));

    writer
        .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))
        .map_err(write_error)?;
    write_node(&mut writer, node, &allocator, None, true)?;

    String::from_utf8(writer.into_inner().into_inner())
        .map_err(|e| QtiError::XmlWrite(e.to_string()))
}

fn write_node(
    writer: &mut Writer<Cursor<Vec<u8>>>,
    node: &Node,
    allocator: &PrefixAllocator,
    in_scope_default: Option<&str>,
    is_root: bool,
) -> Result<()> {
    let ns = node.name.namespace.as_deref();
    let mut default = in_scope_default;
    let mut declare_default = None;

    let name = match ns.and_then(|ns| allocator.prefix_for(ns)) {
        Some(prefix) => format!("{prefix}:{}", node.name.local),
        None => {
            if is_root || ns != in_scope_default {
                declare_default = Some(ns.unwrap_or(""));
                default = ns;
            }
            node.name.local.clone()
        }
    };

    let mut start = BytesStart::new(name.as_str());
    match declare_default {
        // An empty default on the root is the same as no declaration.
        Some("") if is_root => {}
        Some(uri) => start.push_attribute(("xmlns", uri)),
        None => {}
    }
    if is_root {
        for (uri, prefix) in &allocator.prefixes {
            let attr = format!("xmlns:{prefix}");
            start.push_attribute((attr.as_str(), uri.as_str()));
        }
    }
    for (key, value) in &node.attributes {
        start.push_attribute(Attribute {
            key: QName(key.as_bytes()),
            value: Cow::Owned(escape_attribute(value).into_bytes()),
        });
    }

    if node.children.is_empty() {
        writer.write_event(Event::Empty(start)).map_err(write_error)?;
        return Ok(());
    }

    writer.write_event(Event::Start(start)).map_err(write_error)?;
    for child in &node.children {
        match child {
            NodeContent::Element(element) => write_node(writer, element, allocator, default, false)?,
            NodeContent::Text(text) => writer
                .write_event(Event::Text(BytesText::from_escaped(escape_text(text))))
                .map_err(write_error)?,
        }
    }
    writer
        .write_event(Event::End(BytesEnd::new(name.as_str())))
        .map_err(write_error)?;

    Ok(())
}

/// Escape an attribute value so that a parser's attribute-value
/// normalization leaves `\n`, `\t` and `\r` intact.
fn escape_attribute(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in escape(value).chars() {
        match c {
            '\n' => out.push_str("&#10;"),
            '\t' => out.push_str("&#9;"),
            '\r' => out.push_str("&#13;"),
            _ => out.push(c),
        }
    }
    out
}

/// Escape a text run; a raw `\r` would be read back as a line feed.
fn escape_text(text: &str) -> String {
    escape(text).replace('\r', "&#13;")
}

fn write_error(err: impl std::fmt::Display) -> QtiError {
    QtiError::XmlWrite(err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::xml::{parse, QualifiedName};

    fn body(text: &str) -> &str {
        text.strip_prefix(r#"<?xml version="1.0" encoding="UTF-8"?>"#)
            .unwrap_or(text)
    }

    #[test]
    fn test_write_default_namespace() {
        let mut root = Node::new(QualifiedName::new(Some("urn:a"), "div"));
        root.push_element(Node::new(QualifiedName::new(Some("urn:a"), "br")));

        let text = write(&root).unwrap();
        assert_eq!(body(&text), r#"<div xmlns="urn:a"><br/></div>"#);
    }

    #[test]
    fn test_write_allocates_media_prefix() {
        let mut root = Node::new(QualifiedName::new(Some("urn:a"), "div"));
        let mut audio = Node::new(QualifiedName::new(Some(MEDIA_NAMESPACE), "audio"));
        audio.set_attribute("src", "a.mp3");
        root.push_element(audio);

        let text = write(&root).unwrap();
        assert_eq!(
            body(&text),
            format!(r#"<div xmlns="urn:a" xmlns:qh5="{MEDIA_NAMESPACE}"><qh5:audio src="a.mp3"/></div>"#)
        );
        assert_eq!(parse(&text).unwrap(), root);
    }

    #[test]
    fn test_write_numbers_unknown_namespaces() {
        let mut root = Node::new(QualifiedName::local("root"));
        root.push_element(Node::new(QualifiedName::new(Some("urn:x"), "a")));
        root.push_element(Node::new(QualifiedName::new(Some("urn:y"), "b")));

        let text = write(&root).unwrap();
        assert_eq!(
            body(&text),
            r#"<root xmlns:ns1="urn:x" xmlns:ns2="urn:y"><ns1:a/><ns2:b/></root>"#
        );
        assert_eq!(parse(&text).unwrap(), root);
    }

    #[test]
    fn test_write_resets_default_for_unqualified_child() {
        let mut root = Node::new(QualifiedName::new(Some("urn:a"), "div"));
        root.push_element(Node::new(QualifiedName::local("plain")));

        let text = write(&root).unwrap();
        assert_eq!(body(&text), r#"<div xmlns="urn:a"><plain xmlns=""/></div>"#);
        assert_eq!(parse(&text).unwrap(), root);
    }

    #[test]
    fn test_write_escapes_text_and_attributes() {
        let mut root = Node::new(QualifiedName::local("value"));
        root.set_attribute("title", r#"a "quoted" <b>"#);
        root.push_text("x < y & z");

        let text = write(&root).unwrap();
        assert_eq!(parse(&text).unwrap(), root);
    }

    #[test]
    fn test_write_preserves_whitespace_characters() {
        let mut root = Node::new(QualifiedName::local("p"));
        root.set_attribute("label", "line1\nline2\tx\ry");
        root.push_text("a\rb\r\nc\td");

        let text = write(&root).unwrap();
        assert!(body(&text).starts_with(r#"<p label="line1&#10;line2&#9;x&#13;y">a&#13;b&#13;"#));
        assert_eq!(parse(&text).unwrap(), root);
    }

    #[test]
    fn test_write_declares_xsi() {
        let mut root = Node::new(QualifiedName::new(Some("urn:a"), "assessmentItem"));
        root.set_attribute("xsi:schemaLocation", "urn:a a.xsd");

        let text = write(&root).unwrap();
        assert!(text.contains(r#"xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance""#));
        assert_eq!(parse(&text).unwrap(), root);
    }

    #[test]
    fn test_write_is_deterministic() {
        let node = parse(r#"<a xmlns="urn:a" z="1" b="2"><b>t</b></a>"#).unwrap();
        assert_eq!(write(&node).unwrap(), write(&node).unwrap());
    }
}
