//! Registry configuration: the version chain and its overlays.

use super::core::Registry;
use super::handlers::{interaction, item, media, processing, xhtml};
use crate::error::{QtiError, Result};
use crate::version::Version;

/// One link of the version chain.
struct VersionLink {
    version: Version,
    parent: Option<Version>,
    /// Changes this revision makes on top of its parent's registry.
    overlay: fn(&mut Registry) -> Result<()>,
}

/// Supported revisions, oldest first. Each registry is its parent's
/// registry with the link's overlay applied.
const VERSION_CHAIN: &[VersionLink] = &[
    VersionLink {
        version: Version::V2_1_0,
        parent: None,
        overlay: base_vocabulary,
    },
    VersionLink {
        version: Version::V2_1_1,
        parent: Some(Version::V2_1_0),
        overlay: no_changes,
    },
    VersionLink {
        version: Version::V2_2_0,
        parent: Some(Version::V2_1_1),
        overlay: media_vocabulary,
    },
    // 2.2.1 adds the aria-* attributes; the handlers gate those themselves.
    VersionLink {
        version: Version::V2_2_1,
        parent: Some(Version::V2_2_0),
        overlay: no_changes,
    },
    VersionLink {
        version: Version::V2_2_2,
        parent: Some(Version::V2_2_1),
        overlay: no_changes,
    },
];

/// Create the registry for a schema revision.
///
/// # Arguments
/// * `version` - Revision string such as `"2.1.0"`, `"2.2"` or `"v2.2.2"`
///
/// # Returns
/// A registry with the base vocabulary and every overlay up to and
/// including `version` applied, bound to `version`
///
/// # Errors
/// `UnknownVersion` when the string does not name a supported revision.
/// There is no fallback to a nearby revision.
///
/// # Examples
/// ```
/// use qtibind_marshal::registry::create_registry;
///
/// let registry = create_registry("2.2.0").unwrap();
/// assert!(registry.contains(None, "choiceInteraction"));
/// assert!(create_registry("9.9.9").is_err());
/// ```
pub fn create_registry(version: &str) -> Result<Registry> {
    create_registry_for(parse_known_version(version)?)
}

/// Parse a revision string, reporting any failure as `UnknownVersion`.
pub(crate) fn parse_known_version(version: &str) -> Result<Version> {
    let parsed = Version::parse(version).map_err(|_| QtiError::UnknownVersion(version.to_string()))?;
    if VERSION_CHAIN.iter().any(|link| link.version == parsed) {
        Ok(parsed)
    } else {
        Err(QtiError::UnknownVersion(version.to_string()))
    }
}

/// Create the registry for an already parsed revision.
pub(crate) fn create_registry_for(version: Version) -> Result<Registry> {
    let link = VERSION_CHAIN
        .iter()
        .find(|link| link.version == version)
        .ok_or_else(|| QtiError::UnknownVersion(version.to_string()))?;

    let mut registry = match link.parent {
        Some(parent) => create_registry_for(parent)?,
        None => Registry::new(version),
    };
    registry.bind_version(version);
    (link.overlay)(&mut registry)?;

    tracing::debug!(version = %version, entries = registry.len(), "Applied registry overlay");
    Ok(registry)
}

/// 2.1.0: item structure, processing, interactions and the XHTML subset.
fn base_vocabulary(registry: &mut Registry) -> Result<()> {
    let elements = item::ELEMENTS
        .iter()
        .chain(processing::ELEMENTS)
        .chain(interaction::ELEMENTS)
        .chain(xhtml::ELEMENTS);
    for spec in elements {
        registry.register_spec(spec)?;
    }

    for (family, spec) in xhtml::FAMILY_MEMBERS.iter().chain(interaction::FAMILY_MEMBERS) {
        registry.register_family_spec(*family, spec)?;
    }
    Ok(())
}

/// 2.2.0: the HTML5 media sub-vocabulary under its own namespace, and an
/// `img` whose `alt` is optional.
fn media_vocabulary(registry: &mut Registry) -> Result<()> {
    for spec in media::ELEMENTS {
        registry.register_spec(spec)?;
    }
    for (family, spec) in media::FAMILY_MEMBERS {
        registry.register_family_spec(*family, spec)?;
    }
    registry.register_spec(&xhtml::IMG_V2P2)
}

fn no_changes(_registry: &mut Registry) -> Result<()> {
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{is_supported, MEDIA_NAMESPACE, SUPPORTED_VERSIONS};
    use crate::registry::{Family, HandlerTag};
    use crate::xml::QualifiedName;

    #[test]
    fn test_chain_matches_supported_versions() {
        let chain: Vec<String> = VERSION_CHAIN.iter().map(|link| link.version.to_string()).collect();
        assert_eq!(chain, SUPPORTED_VERSIONS);
        assert!(VERSION_CHAIN.iter().all(|link| is_supported(link.version)));
    }

    #[test]
    fn test_chain_parents_precede_children() {
        for link in VERSION_CHAIN {
            if let Some(parent) = link.parent {
                assert!(parent < link.version);
            }
        }
    }

    #[test]
    fn test_create_registry_binds_version() {
        for version in SUPPORTED_VERSIONS {
            let registry = create_registry(version).unwrap();
            assert_eq!(registry.version().to_string(), *version);
        }
        assert_eq!(create_registry("v2.2").unwrap().version(), Version::V2_2_0);
    }

    #[test]
    fn test_unknown_version() {
        for version in ["2.0.0", "2.3.0", "3.0", "latest", ""] {
            let err = create_registry(version).unwrap_err();
            assert!(matches!(err, QtiError::UnknownVersion(_)), "{version}: {err}");
        }
    }

    #[test]
    fn test_base_registry_contents() {
        let registry = create_registry("2.1.0").unwrap();
        for tag in ["assessmentItem", "default", "customOperator", "choiceInteraction", "p", "bdo"] {
            assert!(registry.contains(None, tag), "{tag} missing");
        }
        assert!(!registry.contains(None, "li"));
        assert!(registry.family_member(Family::ListItems, "li").is_some());
        assert!(!registry.contains(Some(MEDIA_NAMESPACE), "audio"));
    }

    #[test]
    fn test_media_overlay() {
        let old = create_registry("2.1.1").unwrap();
        let new = create_registry("2.2.0").unwrap();

        assert_eq!(new.len(), old.len() + 2);
        assert!(new.contains(Some(MEDIA_NAMESPACE), "video"));
        assert!(new.family_member(Family::MediaSources, "track").is_some());
    }

    #[test]
    fn test_gated_tag_not_applicable_before_activation() {
        let name = QualifiedName::local("bdo");

        let old = create_registry("2.1.1").unwrap();
        let ctor = old.resolve(None, "bdo").unwrap();
        assert_eq!(ctor.construct(old.version()).tag(), HandlerTag::NotApplicable);
        assert!(old.handler(&name).is_err());

        let new = create_registry("2.2.0").unwrap();
        assert!(new.handler(&name).is_ok());
    }

    #[test]
    fn test_later_overlays_keep_entries() {
        let v220 = create_registry("2.2.0").unwrap();
        let v222 = create_registry("2.2.2").unwrap();
        assert_eq!(v220.registered_keys(), v222.registered_keys());
    }
}
