//! Process-wide cache of built registries.

use std::collections::HashMap;
use std::sync::{Arc, LazyLock, PoisonError, RwLock};

use super::config::{create_registry_for, parse_known_version};
use super::core::Registry;
use crate::error::Result;
use crate::version::Version;

static GLOBAL: LazyLock<RegistryCache> = LazyLock::new(RegistryCache::new);

/// Builds each version's registry once and shares it.
///
/// Registries are immutable after construction, so one instance can back
/// any number of concurrent conversions.
#[derive(Debug, Default)]
pub struct RegistryCache {
    registries: RwLock<HashMap<Version, Arc<Registry>>>,
}

impl RegistryCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The cache used by the top-level `marshal`/`unmarshal` functions.
    #[must_use]
    pub fn global() -> &'static RegistryCache {
        &GLOBAL
    }

    /// Get the registry for `version`, building it on first use.
    ///
    /// # Errors
    /// `UnknownVersion` when `version` is not a supported revision.
    pub fn get(&self, version: &str) -> Result<Arc<Registry>> {
        let version = parse_known_version(version)?;

        if let Some(registry) = self
            .registries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&version)
        {
            return Ok(Arc::clone(registry));
        }

        let mut registries = self.registries.write().unwrap_or_else(PoisonError::into_inner);
        if let Some(registry) = registries.get(&version) {
            return Ok(Arc::clone(registry));
        }

        tracing::debug!(version = %version, "Building registry");
        let registry = Arc::new(create_registry_for(version)?);
        registries.insert(version, Arc::clone(&registry));
        Ok(registry)
    }

    /// Number of versions built so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.registries.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::QtiError;

    #[test]
    fn test_cache_builds_once() {
        let cache = RegistryCache::new();
        assert!(cache.is_empty());

        let first = cache.get("2.2.0").unwrap();
        let second = cache.get("v2.2").unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(cache.len(), 1);

        cache.get("2.1.0").unwrap();
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn test_cache_unknown_version() {
        let cache = RegistryCache::new();
        assert!(matches!(cache.get("1.2"), Err(QtiError::UnknownVersion(_))));
        assert!(cache.is_empty());
    }

    #[test]
    fn test_cache_shared_across_threads() {
        let cache = Arc::new(RegistryCache::new());
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let cache = Arc::clone(&cache);
                std::thread::spawn(move || cache.get("2.2.2").map(|r| r.version()))
            })
            .collect();

        for handle in handles {
            assert_eq!(handle.join().unwrap().unwrap(), Version::V2_2_2);
        }
        assert_eq!(cache.len(), 1);
    }
}
