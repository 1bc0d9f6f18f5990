//! Resolution of child elements the registry does not bind directly.

use super::core::Registry;
use super::handler::ElementHandler;
use super::types::Family;
use crate::error::{QtiError, Result};
use crate::xml::QualifiedName;

/// Finds a concrete handler for a child whose tag has no registry entry,
/// by searching the candidate families its container declares.
pub struct ChildTypeResolver<'r> {
    registry: &'r Registry,
}

impl<'r> ChildTypeResolver<'r> {
    #[must_use]
    pub fn new(registry: &'r Registry) -> Self {
        Self { registry }
    }

    /// Resolve `name` against `families`, in order. First match wins.
    ///
    /// # Errors
    /// `HandlerNotFound` when no family has an applicable member named
    /// after the (case-normalized) tag.
    pub fn resolve(&self, name: &QualifiedName, families: &[Family]) -> Result<Box<dyn ElementHandler>> {
        for family in families {
            let Some(ctor) = self.registry.family_member(*family, &name.local) else {
                continue;
            };
            let handler = ctor.construct(self.registry.version());
            if handler.tag().accepts(name, self.registry.version()) {
                tracing::trace!(element = %name, %family, "Resolved child through family");
                return Ok(handler);
            }
        }

        Err(QtiError::handler_not_found(name.namespace.as_deref(), &name.local))
    }
}
