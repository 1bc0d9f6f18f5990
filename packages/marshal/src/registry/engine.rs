//! Tree codec that drives conversion in both directions using the registry.

use super::core::Registry;
use super::handler::ElementHandler;
use super::resolver::ChildTypeResolver;
use super::types::{ContentModel, Family};
use crate::error::{QtiError, Result};
use crate::model::{Component, Content};
use crate::xml::{Node, NodeContent, QualifiedName};

/// Engine that walks a tree and dispatches every element to its handler.
///
/// Conversion is all-or-nothing: the first failing element aborts the
/// walk and no partial tree is returned. Child order is preserved in
/// both directions.
pub struct TreeCodec<'r> {
    registry: &'r Registry,
}

impl<'r> TreeCodec<'r> {
    /// Create a codec over the given registry.
    #[must_use]
    pub fn new(registry: &'r Registry) -> Self {
        Self { registry }
    }

    /// Get a reference to the underlying registry.
    #[must_use]
    pub fn registry(&self) -> &Registry {
        self.registry
    }

    /// Marshal a component tree into a node tree.
    ///
    /// Children are marshalled first, in order, and handed to the
    /// component's handler.
    ///
    /// # Errors
    /// `HandlerNotFound` for a component with no applicable handler, or the
    /// first `Marshal` error raised by a handler.
    pub fn marshal(&self, component: &Component) -> Result<Node> {
        self.marshal_with(component, &[], None)
    }

    /// Unmarshal a node tree into a component tree.
    ///
    /// # Arguments
    /// * `node` - Root element of the tree to read
    ///
    /// # Returns
    /// The component tree, with text runs kept only where the element's
    /// content model allows mixed or text content
    ///
    /// # Errors
    /// `HandlerNotFound` for an unknown or inapplicable element, or the
    /// first `Unmarshal` error raised while reading.
    pub fn unmarshal(&self, node: &Node) -> Result<Component> {
        self.unmarshal_with(node, &[], None)
    }

    fn marshal_with(&self, component: &Component, families: &[Family], parent: Option<&str>) -> Result<Node> {
        let name = component.qualified_name();
        let handler = self.handler_for(&name, families, parent)?;
        let child_families = handler.content_model().families();

        let children = component
            .children
            .iter()
            .map(|child| match child {
                Content::Component(c) => self
                    .marshal_with(c, child_families, Some(&component.tag))
                    .map(NodeContent::Element),
                Content::Text(text) => Ok(NodeContent::Text(text.clone())),
            })
            .collect::<Result<Vec<_>>>()?;

        tracing::trace!(element = %name, children = children.len(), "Marshalling element");
        handler.marshal(component, children)
    }

    fn unmarshal_with(&self, node: &Node, families: &[Family], parent: Option<&str>) -> Result<Component> {
        let handler = self.handler_for(&node.name, families, parent)?;
        let children = self.unmarshal_children(node, handler.content_model())?;

        tracing::trace!(element = %node.name, children = children.len(), "Unmarshalling element");
        handler.unmarshal(node, children)
    }

    /// Read a node's children according to its content model.
    fn unmarshal_children(&self, node: &Node, model: ContentModel) -> Result<Vec<Content>> {
        let mut children: Vec<Content> = Vec::with_capacity(node.children.len());

        for child in &node.children {
            match (child, model) {
                (NodeContent::Text(text), ContentModel::Text | ContentModel::Mixed(_)) => {
                    push_text(&mut children, text);
                }
                (NodeContent::Text(text), _) if text.trim().is_empty() => {}
                (NodeContent::Text(text), _) => {
                    return Err(QtiError::unmarshal(
                        node.tag(),
                        format!("unexpected text content '{}'", text.trim()),
                    ));
                }
                (NodeContent::Element(element), ContentModel::Empty | ContentModel::Text) => {
                    return Err(QtiError::unmarshal(
                        node.tag(),
                        format!("unexpected child element <{}>", element.tag()),
                    ));
                }
                (NodeContent::Element(element), _) => {
                    let component = self.unmarshal_with(element, model.families(), Some(node.tag()))?;
                    children.push(Content::Component(component));
                }
            }
        }

        Ok(children)
    }

    /// Find the handler for `name`: the registry first, then the
    /// candidate families of the enclosing element.
    fn handler_for(
        &self,
        name: &QualifiedName,
        families: &[Family],
        parent: Option<&str>,
    ) -> Result<Box<dyn ElementHandler>> {
        let found = match self.registry.handler(name) {
            Err(QtiError::HandlerNotFound { .. }) if !families.is_empty() => {
                ChildTypeResolver::new(self.registry).resolve(name, families)
            }
            other => other,
        };

        match parent {
            Some(parent) => found.map_err(|err| err.within(parent)),
            None => found,
        }
    }
}

/// Append a text run, merging it into a directly preceding one.
fn push_text(children: &mut Vec<Content>, text: &str) {
    if text.is_empty() {
        return;
    }
    match children.last_mut() {
        Some(Content::Text(previous)) => previous.push_str(text),
        _ => children.push(Content::Text(text.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{MEDIA_NAMESPACE, QTI_V2P1_NAMESPACE, QTI_V2P2_NAMESPACE};
    use crate::model::Value;
    use crate::registry::create_registry;
    use crate::xml;
    use pretty_assertions::assert_eq;

    fn unmarshal(text: &str, version: &str) -> Result<Component> {
        let registry = create_registry(version)?;
        let node = xml::parse(text)?;
        TreeCodec::new(&registry).unmarshal(&node)
    }

    #[test]
    fn test_unmarshal_mixed_content_keeps_text() {
        let component = unmarshal(
            &format!(r#"<p xmlns="{QTI_V2P1_NAMESPACE}">Pick <em>one</em> answer.</p>"#),
            "2.1.0",
        )
        .unwrap();

        assert_eq!(
            component,
            Component::new("p")
                .with_text("Pick ")
                .with_child(Component::new("em").with_text("one"))
                .with_text(" answer.")
        );
    }

    #[test]
    fn test_unmarshal_element_content_drops_whitespace() {
        let component = unmarshal(
            &format!("<ul xmlns=\"{QTI_V2P1_NAMESPACE}\">\n  <li>a</li>\n  <li>b</li>\n</ul>"),
            "2.1.0",
        )
        .unwrap();

        assert_eq!(component.children.len(), 2);
        assert!(component.children.iter().all(|c| matches!(c, Content::Component(_))));
    }

    #[test]
    fn test_unmarshal_rejects_stray_text() {
        let err = unmarshal(&format!(r#"<ul xmlns="{QTI_V2P1_NAMESPACE}">oops<li>a</li></ul>"#), "2.1.0").unwrap_err();
        assert!(matches!(err, QtiError::Unmarshal { ref tag, .. } if tag == "ul"));
    }

    #[test]
    fn test_unmarshal_rejects_children_of_empty_element() {
        let err = unmarshal(&format!(r#"<br xmlns="{QTI_V2P1_NAMESPACE}"><em/></br>"#), "2.1.0").unwrap_err();
        assert!(err.to_string().contains("unexpected child element <em>"));
    }

    #[test]
    fn test_unknown_child_reports_parent() {
        let err = unmarshal(&format!(r#"<div xmlns="{QTI_V2P1_NAMESPACE}"><blink/></div>"#), "2.1.0").unwrap_err();
        match err {
            QtiError::HandlerNotFound { tag, context, .. } => {
                assert_eq!(tag, "blink");
                assert_eq!(context.as_deref(), Some("<div>"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_family_member_outside_container_is_unknown() {
        let err = unmarshal(&format!(r#"<div xmlns="{QTI_V2P1_NAMESPACE}"><li>x</li></div>"#), "2.1.0").unwrap_err();
        assert!(matches!(err, QtiError::HandlerNotFound { .. }));
    }

    #[test]
    fn test_table_resolves_through_families() {
        let text = format!(
            r#"<table xmlns="{QTI_V2P1_NAMESPACE}"><tbody><tr><th scope="row">A</th><td colspan="2">1</td></tr></tbody></table>"#
        );
        let component = unmarshal(&text, "2.1.0").unwrap();

        let tbody = component.child_components().next().unwrap();
        let tr = tbody.child_components().next().unwrap();
        let cells: Vec<_> = tr.child_components().map(|c| c.tag.as_str()).collect();
        assert_eq!(cells, ["th", "td"]);
        assert_eq!(
            tr.child_components().nth(1).unwrap().field("colspan"),
            Some(&Value::Integer(2))
        );
    }

    #[test]
    fn test_marshal_post_order_preserves_children() {
        let registry = create_registry("2.2.2").unwrap();
        let component = Component::new("ol")
            .with_child(Component::new("li").with_text("first"))
            .with_child(Component::new("li").with_text("second"))
            .with_child(Component::new("li").with_text("third"));

        let node = TreeCodec::new(&registry).marshal(&component).unwrap();
        assert_eq!(node.name, QualifiedName::new(Some(QTI_V2P2_NAMESPACE), "ol"));
        let texts: Vec<_> = node.element_children().map(Node::text).collect();
        assert_eq!(texts, ["first", "second", "third"]);
    }

    #[test]
    fn test_marshal_failure_is_all_or_nothing() {
        let registry = create_registry("2.1.0").unwrap();
        let component = Component::new("div")
            .with_child(Component::new("p").with_text("fine"))
            .with_child(Component::new("img").with_field("src", Value::uri("a.png")));

        let err = TreeCodec::new(&registry).marshal(&component).unwrap_err();
        assert!(matches!(err, QtiError::Marshal { ref tag, .. } if tag == "img"));
    }

    #[test]
    fn test_media_children_resolve_in_namespace() {
        let text = format!(
            r#"<div xmlns="{QTI_V2P2_NAMESPACE}" xmlns:qh5="{MEDIA_NAMESPACE}"><qh5:video controls="true"><qh5:source src="clip.mp4" type="video/mp4"/></qh5:video></div>"#
        );
        let component = unmarshal(&text, "2.2.0").unwrap();
        let video = component.child_components().next().unwrap();
        assert_eq!(video.namespace.as_deref(), Some(MEDIA_NAMESPACE));
        assert_eq!(video.child_components().next().unwrap().tag, "source");

        let text = text.replace(QTI_V2P2_NAMESPACE, QTI_V2P1_NAMESPACE);
        let err = unmarshal(&text, "2.1.1").unwrap_err();
        assert!(matches!(err, QtiError::HandlerNotFound { ref tag, .. } if tag == "video"));
    }

    #[test]
    fn test_base_vocabulary_requires_version_namespace() {
        let err = unmarshal(r#"<p xmlns="urn:example:other">x</p>"#, "2.2.2").unwrap_err();
        assert!(matches!(err, QtiError::HandlerNotFound { ref tag, .. } if tag == "p"));

        let text = format!(r#"<p xmlns="{QTI_V2P2_NAMESPACE}">x</p>"#);
        let err = unmarshal(&text, "2.1.0").unwrap_err();
        match err {
            QtiError::HandlerNotFound { namespace, tag, .. } => {
                assert_eq!(tag, "p");
                assert_eq!(namespace.as_deref(), Some(QTI_V2P2_NAMESPACE));
            }
            other => panic!("unexpected error: {other}"),
        }

        assert_eq!(unmarshal("<p>x</p>", "2.1.0").unwrap(), Component::new("p").with_text("x"));
    }

    #[test]
    fn test_push_text_merges_runs() {
        let mut children = vec![Content::Text("a".into())];
        push_text(&mut children, "b");
        push_text(&mut children, "");
        assert_eq!(children, vec![Content::Text("ab".into())]);
    }
}
