//! Element registry for mapping qualified names to handlers.

use std::collections::HashMap;
use std::fmt;

use super::handler::{ElementHandler, HandlerCtor};
use super::types::{ElementSpec, Family};
use crate::error::{QtiError, Result};
use crate::version::Version;
use crate::xml::QualifiedName;

/// Entries registered under one local name.
#[derive(Default)]
struct TagEntry {
    /// Base-vocabulary handler (no namespace).
    default: Option<HandlerCtor>,
    /// Handlers bound to a specific namespace.
    namespaced: HashMap<String, HandlerCtor>,
}

/// Registry mapping `(namespace, tag)` to handler constructors for one
/// schema version.
///
/// Later registrations for the same key replace earlier ones, which is
/// how version overlays override base entries. Lookups first try the
/// exact namespace and then fall back to the base vocabulary.
pub struct Registry {
    version: Version,
    entries: HashMap<String, TagEntry>,
    families: HashMap<Family, HashMap<String, HandlerCtor>>,
}

impl Registry {
    /// Create an empty registry bound to `version`.
    #[must_use]
    pub fn new(version: Version) -> Self {
        Self {
            version,
            entries: HashMap::new(),
            families: HashMap::new(),
        }
    }

    /// Version handlers are constructed with.
    #[must_use]
    pub fn version(&self) -> Version {
        self.version
    }

    /// Rebind to a later version while layering overlays.
    pub(crate) fn bind_version(&mut self, version: Version) {
        self.version = version;
    }

    /// Register a handler constructor for `(namespace, tag)`.
    ///
    /// Replaces any existing entry for the same key.
    ///
    /// # Errors
    /// `InvalidRegistration` when the tag is empty or contains whitespace or
    /// a colon, or the namespace is empty.
    pub fn register(&mut self, namespace: Option<&str>, tag: &str, ctor: HandlerCtor) -> Result<()> {
        validate_key(namespace, tag)?;

        let entry = self.entries.entry(tag.to_string()).or_default();
        let replaced = match namespace {
            Some(ns) => entry.namespaced.insert(ns.to_string(), ctor).is_some(),
            None => entry.default.replace(ctor).is_some(),
        };

        if replaced {
            tracing::debug!(tag, namespace = ?namespace, version = %self.version, "Replacing registered handler");
        }
        Ok(())
    }

    /// Register the generic handler for a vocabulary element under its own
    /// namespace and local name.
    pub fn register_spec(&mut self, spec: &'static ElementSpec) -> Result<()> {
        self.register(spec.namespace, spec.local, HandlerCtor::from_spec(spec))
    }

    /// Add an element to a family consulted by the child-type resolver.
    ///
    /// Family keys are case-normalized; a later member with the same
    /// normalized name replaces the earlier one.
    pub fn register_family_member(&mut self, family: Family, tag: &str, ctor: HandlerCtor) -> Result<()> {
        validate_key(None, tag)?;
        self.families
            .entry(family)
            .or_default()
            .insert(tag.to_ascii_lowercase(), ctor);
        Ok(())
    }

    /// Add a vocabulary element to a family.
    pub fn register_family_spec(&mut self, family: Family, spec: &'static ElementSpec) -> Result<()> {
        self.register_family_member(family, spec.local, HandlerCtor::from_spec(spec))
    }

    /// Resolve the constructor for `(namespace, tag)`.
    ///
    /// Tries the exact namespace first, then the no-namespace entry.
    ///
    /// # Errors
    /// `HandlerNotFound` when neither exists.
    pub fn resolve(&self, namespace: Option<&str>, tag: &str) -> Result<&HandlerCtor> {
        let entry = self.entries.get(tag);
        entry
            .and_then(|e| namespace.and_then(|ns| e.namespaced.get(ns)))
            .or_else(|| entry.and_then(|e| e.default.as_ref()))
            .ok_or_else(|| QtiError::handler_not_found(namespace, tag))
    }

    /// Resolve and instantiate the handler for `name`.
    ///
    /// A handler that reports `NotApplicable` for the bound version counts
    /// as not found.
    pub fn handler(&self, name: &QualifiedName) -> Result<Box<dyn ElementHandler>> {
        let handler = self
            .resolve(name.namespace.as_deref(), &name.local)?
            .construct(self.version);

        if handler.tag().accepts(name, self.version) {
            Ok(handler)
        } else {
            tracing::trace!(element = %name, version = %self.version, "Handler not applicable in this version");
            Err(QtiError::handler_not_found(name.namespace.as_deref(), &name.local))
        }
    }

    /// Get a family member by (case-normalized) tag.
    #[must_use]
    pub fn family_member(&self, family: Family, tag: &str) -> Option<&HandlerCtor> {
        self.families
            .get(&family)
            .and_then(|members| members.get(&tag.to_ascii_lowercase()))
    }

    /// Check whether an entry exists for exactly `(namespace, tag)`.
    #[must_use]
    pub fn contains(&self, namespace: Option<&str>, tag: &str) -> bool {
        self.entries.get(tag).is_some_and(|e| match namespace {
            Some(ns) => e.namespaced.contains_key(ns),
            None => e.default.is_some(),
        })
    }

    /// All registered keys, sorted.
    #[must_use]
    pub fn registered_keys(&self) -> Vec<(Option<&str>, &str)> {
        let mut keys: Vec<_> = self
            .entries
            .iter()
            .flat_map(|(tag, entry)| {
                let default = entry.default.as_ref().map(|_| (None, tag.as_str()));
                let namespaced = entry
                    .namespaced
                    .keys()
                    .map(move |ns| (Some(ns.as_str()), tag.as_str()));
                default.into_iter().chain(namespaced)
            })
            .collect();
        keys.sort_unstable();
        keys
    }

    /// Number of active `(namespace, tag)` entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries
            .values()
            .map(|e| usize::from(e.default.is_some()) + e.namespaced.len())
            .sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn validate_key(namespace: Option<&str>, tag: &str) -> Result<()> {
    let invalid = |message: &str| QtiError::InvalidRegistration {
        namespace: namespace.map(str::to_string),
        tag: tag.to_string(),
        message: message.to_string(),
    };

    if tag.is_empty() {
        return Err(invalid("tag is empty"));
    }
    if tag.contains(|c: char| c.is_whitespace() || c == ':') {
        return Err(invalid("tag must be a local name"));
    }
    if namespace.is_some_and(str::is_empty) {
        return Err(invalid("namespace is empty; use None for the base vocabulary"));
    }
    Ok(())
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("version", &self.version)
            .field("entries", &self.len())
            .field("families", &self.families.len())
            .finish()
    }
}
