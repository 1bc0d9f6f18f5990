//! Error types for the marshalling engine.
//!
//! Every failure aborts the whole-tree operation that raised it; variants
//! carry the offending tag (and attribute, where one is involved) so the
//! caller can locate the problem in the document.

use thiserror::Error;

use crate::config::SUPPORTED_VERSIONS;

/// Main error type for the marshalling library.
#[derive(Debug, Error)]
pub enum QtiError {
    /// Version string that is not one of the supported schema revisions.
    #[error("Unknown QTI version '{0}'. Supported versions: {versions}", versions = SUPPORTED_VERSIONS.join(", "))]
    UnknownVersion(String),

    /// Version string that does not have the MAJOR.MINOR[.PATCH] shape.
    #[error("Invalid version format: '{0}'. Expected MAJOR.MINOR[.PATCH] (e.g., 2.1.0)")]
    InvalidVersion(String),

    /// No handler registered for an element, and no candidate family matched.
    #[error(
        "No handler for element <{tag}>{}{}",
        .namespace.as_ref().map(|ns| format!(" in namespace {ns}")).unwrap_or_default(),
        .context.as_ref().map(|c| format!(" in {c}")).unwrap_or_default()
    )]
    HandlerNotFound {
        namespace: Option<String>,
        tag: String,
        context: Option<String>,
    },

    /// A component cannot be written under the active version.
    #[error("Cannot marshal <{tag}>: {message}")]
    Marshal { tag: String, message: String },

    /// A node cannot be read into a component.
    #[error(
        "Cannot unmarshal <{tag}>{}: {message}",
        .attribute.as_ref().map(|a| format!(" (attribute '{a}')")).unwrap_or_default()
    )]
    Unmarshal {
        tag: String,
        attribute: Option<String>,
        message: String,
    },

    /// Registration key that cannot be stored in a registry.
    #[error("Invalid registry key {namespace:?}/'{tag}': {message}")]
    InvalidRegistration {
        namespace: Option<String>,
        tag: String,
        message: String,
    },

    /// XML parsing failed.
    #[error("XML parsing failed: {0}")]
    XmlParse(#[from] roxmltree::Error),

    /// XML writing failed.
    #[error("XML writing failed: {0}")]
    XmlWrite(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML serialization error.
    #[error("YAML serialization failed: {0}")]
    YamlSerialization(#[from] serde_yaml_ng::Error),
}

impl QtiError {
    pub(crate) fn marshal(tag: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Marshal {
            tag: tag.into(),
            message: message.into(),
        }
    }

    pub(crate) fn unmarshal(tag: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Unmarshal {
            tag: tag.into(),
            attribute: None,
            message: message.into(),
        }
    }

    pub(crate) fn unmarshal_attribute(
        tag: impl Into<String>,
        attribute: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::Unmarshal {
            tag: tag.into(),
            attribute: Some(attribute.into()),
            message: message.into(),
        }
    }

    pub(crate) fn handler_not_found(namespace: Option<&str>, tag: impl Into<String>) -> Self {
        Self::HandlerNotFound {
            namespace: namespace.map(str::to_string),
            tag: tag.into(),
            context: None,
        }
    }

    /// Attach the enclosing element to a `HandlerNotFound` error.
    ///
    /// Other variants, and errors that already carry a context, pass through.
    #[must_use]
    pub(crate) fn within(self, parent: &str) -> Self {
        match self {
            Self::HandlerNotFound {
                namespace,
                tag,
                context: None,
            } => Self::HandlerNotFound {
                namespace,
                tag,
                context: Some(format!("<{parent}>")),
            },
            other => other,
        }
    }
}

/// Result type alias for marshalling operations.
pub type Result<T> = std::result::Result<T, QtiError>;
