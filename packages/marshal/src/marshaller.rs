//! Top-level conversion functions tying the registry, the tree codec and
//! the XML layer together.

use crate::config::version_for_namespace;
use crate::error::Result;
use crate::model::Component;
use crate::registry::{HandlerCtor, Registry, RegistryCache, TreeCodec};
use crate::xml::{self, Node};

/// Marshal a component tree into a node tree for a schema revision.
///
/// # Arguments
/// * `component` - Root of the component tree
/// * `version` - Target revision (e.g. "2.1.0")
///
/// # Returns
/// The node tree, with base-vocabulary elements in the revision's QTI
/// namespace
///
/// # Errors
/// `UnknownVersion`, `HandlerNotFound` or the first `Marshal` error. No
/// partial tree is returned.
pub fn marshal(component: &Component, version: &str) -> Result<Node> {
    let registry = RegistryCache::global().get(version)?;
    TreeCodec::new(&registry).marshal(component)
}

/// Unmarshal a node tree into a component tree for a schema revision.
///
/// # Errors
/// `UnknownVersion`, `HandlerNotFound` or the first `Unmarshal` error.
pub fn unmarshal(node: &Node, version: &str) -> Result<Component> {
    let registry = RegistryCache::global().get(version)?;
    TreeCodec::new(&registry).unmarshal(node)
}

/// Marshal a component tree and write it as an XML document.
///
/// # Examples
/// ```
/// use qtibind_marshal::{marshal_to_string, Component, Value};
///
/// let component = Component::new("default").with_field("identifier", Value::identifier("SCORE"));
/// let xml = marshal_to_string(&component, "2.1.0").unwrap();
/// assert!(xml.contains(r#"<default xmlns="http://www.imsglobal.org/xsd/imsqti_v2p1" identifier="SCORE"/>"#));
/// ```
pub fn marshal_to_string(component: &Component, version: &str) -> Result<String> {
    xml::write(&marshal(component, version)?)
}

/// Parse an XML document and unmarshal its root element.
pub fn unmarshal_str(text: &str, version: &str) -> Result<Component> {
    unmarshal(&xml::parse(text)?, version)
}

/// Read a document under one revision and write it under another.
///
/// Fails when the document uses a capability the target revision lacks.
pub fn convert(text: &str, from: &str, to: &str) -> Result<String> {
    marshal_to_string(&unmarshal_str(text, from)?, to)
}

/// Register a handler constructor on a caller-owned registry.
///
/// Replaces any existing entry for `(namespace, tag)`. Registries shared
/// through [`RegistryCache`] are immutable; build one with
/// [`create_registry`](crate::registry::create_registry) to customise it.
///
/// # Errors
/// `InvalidRegistration` when the key is malformed.
pub fn register_handler(registry: &mut Registry, namespace: Option<&str>, tag: &str, ctor: HandlerCtor) -> Result<()> {
    registry.register(namespace, tag, ctor)
}

/// Guess the revision of a document from its root element's namespace.
#[must_use]
pub fn detect_version(node: &Node) -> Option<&'static str> {
    node.name.namespace.as_deref().and_then(version_for_namespace)
}
