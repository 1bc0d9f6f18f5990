//! Configuration constants and validation functions for the engine.

use regex::Regex;
use std::sync::LazyLock;

use crate::error::{QtiError, Result};
use crate::version::Version;

/// Namespace of the QTI 2.1 vocabulary.
pub const QTI_V2P1_NAMESPACE: &str = "http://www.imsglobal.org/xsd/imsqti_v2p1";

/// Namespace of the QTI 2.2 vocabulary.
pub const QTI_V2P2_NAMESPACE: &str = "http://www.imsglobal.org/xsd/imsqti_v2p2";

/// Namespace of the HTML5 media sub-vocabulary (QTI 2.2 and later).
pub const MEDIA_NAMESPACE: &str = "http://www.imsglobal.org/xsd/imsqtiv2p2_html5_v1p0";

/// Preferred prefix for [`MEDIA_NAMESPACE`] when writing.
pub const MEDIA_PREFIX: &str = "qh5";

/// The `xml:` namespace, bound implicitly in every document.
pub const XML_NAMESPACE: &str = "http://www.w3.org/XML/1998/namespace";

/// The XML Schema instance namespace (`xsi:schemaLocation` and friends).
pub const XSI_NAMESPACE: &str = "http://www.w3.org/2001/XMLSchema-instance";

/// Schema revisions the registry factory can build, oldest first.
pub const SUPPORTED_VERSIONS: &[&str] = &["2.1.0", "2.1.1", "2.2.0", "2.2.1", "2.2.2"];

/// Version used by the CLI when neither a flag nor the document namespace
/// decides.
pub const DEFAULT_VERSION: &str = "2.2.2";

/// Version string pattern: optional `v`, then MAJOR.MINOR with an optional PATCH.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
pub(crate) static VERSION_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[vV]?(\d{1,4})\.(\d{1,4})(?:\.(\d{1,4}))?$").expect("valid regex")
});

/// Validate a version string.
///
/// # Returns
/// * `Ok(())` if the string is well formed and names a supported revision
/// * `Err(QtiError::InvalidVersion)` if the string is malformed
/// * `Err(QtiError::UnknownVersion)` if it is well formed but unsupported
///
/// # Examples
/// ```
/// use qtibind_marshal::config::validate_version;
///
/// assert!(validate_version("2.2.0").is_ok());
/// assert!(validate_version("2.1").is_ok());
/// assert!(validate_version("3.0.0").is_err());
/// assert!(validate_version("two").is_err());
/// ```
pub fn validate_version(version: &str) -> Result<()> {
    let parsed: Version = version.parse()?;
    if is_supported(parsed) {
        Ok(())
    } else {
        Err(QtiError::UnknownVersion(version.to_string()))
    }
}

/// Check whether a parsed version is one of [`SUPPORTED_VERSIONS`].
#[must_use]
pub fn is_supported(version: Version) -> bool {
    SUPPORTED_VERSIONS
        .iter()
        .filter_map(|v| v.parse::<Version>().ok())
        .any(|v| v == version)
}

/// Namespace of the base vocabulary for a schema revision.
///
/// # Examples
/// ```
/// use qtibind_marshal::config::{qti_namespace, QTI_V2P1_NAMESPACE};
/// use qtibind_marshal::Version;
///
/// assert_eq!(qti_namespace(Version::V2_1_1), QTI_V2P1_NAMESPACE);
/// ```
#[must_use]
pub fn qti_namespace(version: Version) -> &'static str {
    if version >= Version::V2_2_0 {
        QTI_V2P2_NAMESPACE
    } else {
        QTI_V2P1_NAMESPACE
    }
}

/// Pick the newest supported revision whose base namespace is `namespace`.
///
/// Used to guess a version from a document's root element.
#[must_use]
pub fn version_for_namespace(namespace: &str) -> Option<&'static str> {
    match namespace {
        QTI_V2P1_NAMESPACE => Some("2.1.1"),
        QTI_V2P2_NAMESPACE => Some("2.2.2"),
        _ => None,
    }
}
