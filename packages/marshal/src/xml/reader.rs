//! Read XML text into a [`Node`] tree.

use roxmltree::Document;

use super::node::{Node, QualifiedName};
use crate::config::{XML_NAMESPACE, XSI_NAMESPACE};
use crate::error::Result;

/// Parse XML text into an owned element tree rooted at the document element.
///
/// Comments and processing instructions are dropped. Attributes in the
/// `xml:` and `xsi:` namespaces keep their conventional prefix; attributes
/// in any other namespace are not part of the vocabulary and are skipped.
///
/// # Examples
/// ```
/// use qtibind_marshal::xml::parse;
///
/// let node = parse(r#"<p xml:lang="en">Hi <em>there</em></p>"#).unwrap();
/// assert_eq!(node.tag(), "p");
/// assert_eq!(node.attribute("xml:lang"), Some("en"));
/// assert_eq!(node.children.len(), 2);
/// ```
pub fn parse(text: &str) -> Result<Node> {
    let doc = Document::parse(text)?;
    Ok(convert(doc.root_element()))
}

fn convert(source: roxmltree::Node<'_, '_>) -> Node {
    let tag = source.tag_name();
    let mut node = Node::new(QualifiedName::new(tag.namespace(), tag.name()));

    for attr in source.attributes() {
        let name = match attr.namespace() {
            None => attr.name().to_string(),
            Some(XML_NAMESPACE) => format!("xml:{}", attr.name()),
            Some(XSI_NAMESPACE) => format!("xsi:{}", attr.name()),
            Some(ns) => {
                tracing::debug!(
                    namespace = ns,
                    attribute = attr.name(),
                    element = tag.name(),
                    "Skipping attribute from foreign namespace"
                );
                continue;
            }
        };
        node.set_attribute(name, attr.value());
    }

    for child in source.children() {
        if child.is_element() {
            node.push_element(convert(child));
        } else if child.is_text() {
            if let Some(text) = child.text() {
                node.push_text(text);
            }
        }
    }

    node
}
