//! Generic handler driven by a declarative [`ElementSpec`].

use crate::codec;
use crate::config::qti_namespace;
use crate::error::{QtiError, Result};
use crate::model::{Component, Content};
use crate::registry::handler::{ElementHandler, HandlerTag};
use crate::registry::types::{ContentModel, ElementSpec};
use crate::version::Version;
use crate::xml::{Node, NodeContent, QualifiedName};

/// Handler interpreting one [`ElementSpec`] for a bound version.
///
/// Attributes are written in declaration order. Attributes whose `since`
/// is later than the bound version are rejected on input; on output they
/// are dropped when equal to their default and rejected otherwise.
pub struct SpecHandler {
    spec: &'static ElementSpec,
    version: Version,
}

impl SpecHandler {
    #[must_use]
    pub fn new(spec: &'static ElementSpec, version: Version) -> Self {
        Self { spec, version }
    }

    fn element_name(&self) -> QualifiedName {
        let namespace = self.spec.namespace.unwrap_or_else(|| qti_namespace(self.version));
        QualifiedName::new(Some(namespace), self.spec.local)
    }

    fn marshal_error(&self, message: impl Into<String>) -> QtiError {
        QtiError::marshal(self.spec.local, message)
    }

    fn version_gate_message(&self, since: Option<Version>) -> String {
        format!(
            "requires version {} or later (active version {})",
            since.map(|v| v.to_string()).unwrap_or_default(),
            self.version
        )
    }

    fn write_attributes(&self, component: &Component, node: &mut Node) -> Result<()> {
        if let Some(unknown) = component
            .fields
            .keys()
            .find(|name| self.spec.attribute(name).is_none())
        {
            return Err(self.marshal_error(format!("unknown attribute '{unknown}'")));
        }

        for attr in self.spec.attribute_specs() {
            let value = component.field(attr.name);

            if !attr.is_available(self.version) {
                let Some(value) = value else { continue };
                let is_default = attr
                    .default
                    .is_some_and(|default| codec::format_value(value) == default);
                if is_default {
                    tracing::debug!(
                        element = self.spec.local,
                        attribute = attr.name,
                        version = %self.version,
                        "Omitting default-valued attribute not available in this version"
                    );
                    continue;
                }
                return Err(self.marshal_error(format!(
                    "attribute '{}' {}",
                    attr.name,
                    self.version_gate_message(attr.since)
                )));
            }

            match value {
                Some(value) => {
                    codec::check_value(value, attr.kind).map_err(|reason| {
                        self.marshal_error(format!("attribute '{}': {reason}", attr.name))
                    })?;
                    codec::write_attr(node, attr.name, value);
                }
                None if attr.required => {
                    return Err(self.marshal_error(format!("missing required attribute '{}'", attr.name)));
                }
                None => {}
            }
        }

        Ok(())
    }

    fn check_content(&self, children: &mut Vec<NodeContent>) -> Result<()> {
        let has_text = children
            .iter()
            .any(|c| matches!(c, NodeContent::Text(t) if !t.trim().is_empty()));
        let elements = children
            .iter()
            .filter(|c| matches!(c, NodeContent::Element(_)))
            .count();

        match self.spec.content {
            ContentModel::Empty if !children.is_empty() => {
                return Err(self.marshal_error("element does not accept content"));
            }
            ContentModel::Text if elements > 0 => {
                return Err(self.marshal_error("element accepts text only"));
            }
            ContentModel::Elements(_) if has_text => {
                return Err(self.marshal_error("element does not accept text content"));
            }
            ContentModel::Elements(_) => {
                children.retain(|c| matches!(c, NodeContent::Element(_)));
            }
            _ => {}
        }

        let min = self.spec.content.min_children();
        if elements < min {
            return Err(self.marshal_error(format!(
                "expected at least {min} child element(s), found {elements}"
            )));
        }
        Ok(())
    }

    fn missing_one_of(&self, present: impl Fn(&str) -> bool) -> Option<String> {
        let one_of = self.spec.one_of;
        if one_of.is_empty() || one_of.iter().any(|name| present(*name)) {
            None
        } else {
            Some(format!("requires at least one of the attributes [{}]", one_of.join(", ")))
        }
    }
}

impl ElementHandler for SpecHandler {
    fn tag(&self) -> HandlerTag {
        if self.spec.is_available(self.version) {
            HandlerTag::Bound(QualifiedName::new(self.spec.namespace, self.spec.local))
        } else {
            HandlerTag::NotApplicable
        }
    }

    fn content_model(&self) -> ContentModel {
        self.spec.content
    }

    fn marshal(&self, component: &Component, mut children: Vec<NodeContent>) -> Result<Node> {
        let mut node = Node::new(self.element_name());
        self.write_attributes(component, &mut node)?;

        if let Some(message) = self.missing_one_of(|name| component.fields.contains_key(name)) {
            return Err(self.marshal_error(message));
        }

        self.check_content(&mut children)?;
        node.children = children;
        Ok(node)
    }

    fn unmarshal(&self, node: &Node, children: Vec<Content>) -> Result<Component> {
        let mut component = Component::new(self.spec.local);
        component.namespace = self.spec.namespace.map(str::to_string);

        for attr in self.spec.attribute_specs() {
            if !attr.is_available(self.version) {
                if node.attribute(attr.name).is_some() {
                    return Err(QtiError::unmarshal_attribute(
                        self.spec.local,
                        attr.name,
                        self.version_gate_message(attr.since),
                    ));
                }
                continue;
            }

            match codec::read_attr(node, attr.name, attr.kind)? {
                Some(value) => {
                    component.fields.insert(attr.name.to_string(), value);
                }
                None if attr.required => {
                    return Err(QtiError::unmarshal_attribute(
                        self.spec.local,
                        attr.name,
                        "missing required attribute",
                    ));
                }
                None => {}
            }
        }

        if let Some(message) = self.missing_one_of(|name| component.fields.contains_key(name)) {
            return Err(QtiError::unmarshal(self.spec.local, message));
        }

        let min = self.spec.content.min_children();
        let found = children
            .iter()
            .filter(|c| matches!(c, Content::Component(_)))
            .count();
        if found < min {
            return Err(QtiError::unmarshal(
                self.spec.local,
                format!("expected at least {min} child element(s), found {found}"),
            ));
        }

        component.children = children;
        Ok(component)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::AttrKind;
    use crate::config::{MEDIA_NAMESPACE, QTI_V2P1_NAMESPACE, QTI_V2P2_NAMESPACE};
    use crate::model::Value;
    use crate::registry::{AttributeSpec, ChildRule};

    const DIR: &[AttributeSpec] = &[AttributeSpec::optional("dir", AttrKind::Token(&["ltr", "rtl", "auto"]))
        .since(Version::V2_2_0)
        .with_default("auto")];
    const DEFAULT_ATTRS: &[AttributeSpec] = &[AttributeSpec::required("identifier", AttrKind::Identifier)];
    const OPERATOR_ATTRS: &[AttributeSpec] = &[
        AttributeSpec::optional("class", AttrKind::String),
        AttributeSpec::optional("definition", AttrKind::Uri),
    ];

    static DEFAULT: ElementSpec = ElementSpec::new("default", &[DEFAULT_ATTRS], ContentModel::Empty);
    static P: ElementSpec = ElementSpec::new("p", &[DIR], ContentModel::Mixed(ChildRule::any()));
    static UL: ElementSpec = ElementSpec::new("ul", &[], ContentModel::Elements(ChildRule::at_least(1)));
    static VALUE: ElementSpec = ElementSpec::new("value", &[], ContentModel::Text);
    static OPERATOR: ElementSpec = ElementSpec::new("customOperator", &[OPERATOR_ATTRS], ContentModel::Elements(ChildRule::any()))
        .requiring_one_of(&["class", "definition"]);
    static AUDIO: ElementSpec = ElementSpec::new("audio", &[], ContentModel::Empty)
        .in_namespace(MEDIA_NAMESPACE)
        .since(Version::V2_2_0);

    fn handler(spec: &'static ElementSpec, version: Version) -> SpecHandler {
        SpecHandler::new(spec, version)
    }

    fn li() -> NodeContent {
        NodeContent::Element(Node::new(QualifiedName::local("li")))
    }

    #[test]
    fn test_tag_sentinel_below_activation() {
        assert_eq!(handler(&AUDIO, Version::V2_1_1).tag(), HandlerTag::NotApplicable);
        assert_eq!(
            handler(&AUDIO, Version::V2_2_0).tag(),
            HandlerTag::Bound(QualifiedName::new(Some(MEDIA_NAMESPACE), "audio"))
        );
    }

    #[test]
    fn test_marshal_uses_version_namespace() {
        let component = Component::new("default").with_field("identifier", Value::identifier("SCORE"));

        let v21 = handler(&DEFAULT, Version::V2_1_0).marshal(&component, Vec::new()).unwrap();
        assert_eq!(v21.name.namespace.as_deref(), Some(QTI_V2P1_NAMESPACE));
        assert_eq!(v21.attribute("identifier"), Some("SCORE"));

        let v22 = handler(&DEFAULT, Version::V2_2_1).marshal(&component, Vec::new()).unwrap();
        assert_eq!(v22.name.namespace.as_deref(), Some(QTI_V2P2_NAMESPACE));
    }

    #[test]
    fn test_marshal_missing_required() {
        let err = handler(&DEFAULT, Version::V2_1_0)
            .marshal(&Component::new("default"), Vec::new())
            .unwrap_err();
        assert!(err.to_string().contains("missing required attribute 'identifier'"));
    }

    #[test]
    fn test_marshal_unknown_field() {
        let component = Component::new("default")
            .with_field("identifier", Value::identifier("A"))
            .with_field("colour", Value::string("red"));
        let err = handler(&DEFAULT, Version::V2_1_0).marshal(&component, Vec::new()).unwrap_err();
        assert!(err.to_string().contains("unknown attribute 'colour'"));
    }

    #[test]
    fn test_marshal_wrong_type() {
        let component = Component::new("default").with_field("identifier", Value::Integer(3));
        let err = handler(&DEFAULT, Version::V2_1_0).marshal(&component, Vec::new()).unwrap_err();
        assert!(matches!(err, QtiError::Marshal { .. }));
    }

    #[test]
    fn test_marshal_version_gated_attribute() {
        let auto = Component::new("p").with_field("dir", Value::token("auto"));
        let rtl = Component::new("p").with_field("dir", Value::token("rtl"));

        let node = handler(&P, Version::V2_1_0).marshal(&auto, Vec::new()).unwrap();
        assert_eq!(node.attribute("dir"), None);

        let err = handler(&P, Version::V2_1_0).marshal(&rtl, Vec::new()).unwrap_err();
        assert!(err.to_string().contains("requires version 2.2.0"));

        let node = handler(&P, Version::V2_2_0).marshal(&rtl, Vec::new()).unwrap();
        assert_eq!(node.attribute("dir"), Some("rtl"));
    }

    #[test]
    fn test_unmarshal_rejects_gated_attribute() {
        let mut node = Node::new(QualifiedName::local("p"));
        node.set_attribute("dir", "rtl");

        let err = handler(&P, Version::V2_1_1).unmarshal(&node, Vec::new()).unwrap_err();
        match err {
            QtiError::Unmarshal { tag, attribute, message } => {
                assert_eq!(tag, "p");
                assert_eq!(attribute.as_deref(), Some("dir"));
                assert_eq!(message, "requires version 2.2.0 or later (active version 2.1.1)");
            }
            other => panic!("unexpected error: {other}"),
        }

        let new = handler(&P, Version::V2_2_0).unmarshal(&node, Vec::new()).unwrap();
        assert_eq!(new.field("dir"), Some(&Value::token("rtl")));
    }

    #[test]
    fn test_unmarshal_missing_required_names_attribute() {
        let node = Node::new(QualifiedName::local("default"));
        let err = handler(&DEFAULT, Version::V2_1_0).unmarshal(&node, Vec::new()).unwrap_err();
        match err {
            QtiError::Unmarshal { tag, attribute, .. } => {
                assert_eq!(tag, "default");
                assert_eq!(attribute.as_deref(), Some("identifier"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_min_children() {
        let h = handler(&UL, Version::V2_1_0);
        assert!(h.marshal(&Component::new("ul"), Vec::new()).is_err());
        assert!(h.unmarshal(&Node::new(QualifiedName::local("ul")), Vec::new()).is_err());

        let node = h.marshal(&Component::new("ul"), vec![li()]).unwrap();
        assert_eq!(node.children.len(), 1);
    }

    #[test]
    fn test_elements_content_drops_whitespace_rejects_text() {
        let h = handler(&UL, Version::V2_1_0);
        let node = h
            .marshal(&Component::new("ul"), vec![NodeContent::Text("\n ".into()), li()])
            .unwrap();
        assert_eq!(node.children, vec![li()]);

        assert!(h
            .marshal(&Component::new("ul"), vec![NodeContent::Text("words".into()), li()])
            .is_err());
    }

    #[test]
    fn test_text_and_empty_content() {
        let value = handler(&VALUE, Version::V2_1_0);
        assert!(value.marshal(&Component::new("value"), vec![li()]).is_err());
        let node = value
            .marshal(&Component::new("value"), vec![NodeContent::Text("ChoiceA".into())])
            .unwrap();
        assert_eq!(node.text(), "ChoiceA");

        let component = Component::new("default").with_field("identifier", Value::identifier("A"));
        assert!(handler(&DEFAULT, Version::V2_1_0)
            .marshal(&component, vec![NodeContent::Text("x".into())])
            .is_err());
    }

    #[test]
    fn test_one_of_attributes() {
        let h = handler(&OPERATOR, Version::V2_1_0);
        let err = h
            .unmarshal(&Node::new(QualifiedName::local("customOperator")), Vec::new())
            .unwrap_err();
        assert!(err.to_string().contains("requires at least one of the attributes [class, definition]"));

        let mut node = Node::new(QualifiedName::local("customOperator"));
        node.set_attribute("definition", "urn:op");
        let component = h.unmarshal(&node, Vec::new()).unwrap();
        assert_eq!(component.field("definition"), Some(&Value::uri("urn:op")));

        assert!(h.marshal(&Component::new("customOperator"), Vec::new()).is_err());
    }

    #[test]
    fn test_unmarshal_sets_namespace() {
        let node = Node::new(QualifiedName::new(Some(MEDIA_NAMESPACE), "audio"));
        let component = handler(&AUDIO, Version::V2_2_0).unmarshal(&node, Vec::new()).unwrap();
        assert_eq!(component.namespace.as_deref(), Some(MEDIA_NAMESPACE));
    }
}
