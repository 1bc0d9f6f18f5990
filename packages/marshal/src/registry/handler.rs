//! Element handler trait definition.

use std::fmt;
use std::sync::Arc;

use super::types::{ContentModel, ElementSpec};
use crate::config::qti_namespace;
use crate::error::Result;
use crate::model::{Component, Content};
use crate::version::Version;
use crate::xml::{Node, NodeContent, QualifiedName};

/// The element a handler owns in its bound version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HandlerTag {
    Bound(QualifiedName),
    /// The element does not exist in the bound version.
    NotApplicable,
}

impl HandlerTag {
    /// Check whether an element name found in a document belongs to this
    /// handler.
    ///
    /// Local names compare case-insensitively. A handler without a
    /// namespace (base vocabulary) accepts unqualified names and names in
    /// the QTI namespace of `version`; a namespaced handler requires an
    /// exact match.
    #[must_use]
    pub fn accepts(&self, name: &QualifiedName, version: Version) -> bool {
        let Self::Bound(own) = self else {
            return false;
        };
        if !own.local.eq_ignore_ascii_case(&name.local) {
            return false;
        }
        match (own.namespace.as_deref(), name.namespace.as_deref()) {
            (Some(own_ns), found) => found == Some(own_ns),
            (None, None) => true,
            (None, Some(found)) => found == qti_namespace(version),
        }
    }
}

/// Trait for element handlers.
///
/// A handler converts one element type in both directions. It is bound to
/// a schema version at construction and holds no per-document state, so
/// one instance can serve any number of conversions.
pub trait ElementHandler: Send + Sync {
    /// The element this handler owns, or `NotApplicable` below the
    /// element's activation version.
    fn tag(&self) -> HandlerTag;

    /// How the tree codec should treat this element's children.
    fn content_model(&self) -> ContentModel;

    /// Build the node for `component`.
    ///
    /// # Arguments
    /// * `component` - The component to write
    /// * `children` - The component's children, already marshalled, in order
    fn marshal(&self, component: &Component, children: Vec<NodeContent>) -> Result<Node>;

    /// Build the component for `node`.
    ///
    /// # Arguments
    /// * `node` - The element to read
    /// * `children` - The node's children, already unmarshalled, in order
    fn unmarshal(&self, node: &Node, children: Vec<Content>) -> Result<Component>;
}

type CtorFn = dyn Fn(Version) -> Box<dyn ElementHandler> + Send + Sync;

/// Constructor producing a handler bound to a version.
///
/// This is what a registry stores; handlers are instantiated on lookup.
#[derive(Clone)]
pub struct HandlerCtor(Arc<CtorFn>);

impl HandlerCtor {
    pub fn new(ctor: impl Fn(Version) -> Box<dyn ElementHandler> + Send + Sync + 'static) -> Self {
        Self(Arc::new(ctor))
    }

    /// Constructor for the generic handler interpreting `spec`.
    #[must_use]
    pub fn from_spec(spec: &'static ElementSpec) -> Self {
        Self::new(move |version| Box::new(super::handlers::SpecHandler::new(spec, version)))
    }

    /// Instantiate a handler bound to `version`.
    #[must_use]
    pub fn construct(&self, version: Version) -> Box<dyn ElementHandler> {
        (self.0)(version)
    }
}

impl fmt::Debug for HandlerCtor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("HandlerCtor(..)")
    }
}
