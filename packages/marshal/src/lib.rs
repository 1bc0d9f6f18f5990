//! qtibind - Versioned marshalling between QTI component trees and XML.
//!
//! This crate converts an in-memory tree of typed components into an XML
//! element tree and back, for several revisions of the QTI vocabulary.
//! Each revision has its own registry of element handlers, built as an
//! overlay on its predecessor.
//!
//! # Example
//!
//! ```
//! use qtibind_marshal::{marshal_to_string, unmarshal_str, Component};
//!
//! let component = Component::new("p")
//!     .with_text("Choose ")
//!     .with_child(Component::new("em").with_text("one"));
//!
//! let xml = marshal_to_string(&component, "2.2.2").unwrap();
//! assert_eq!(unmarshal_str(&xml, "2.2.2").unwrap(), component);
//!
//! let missing = Component::new("default");
//! assert!(marshal_to_string(&missing, "2.1.0").is_err());
//! ```
//!
//! # Architecture
//!
//! - [`config`]: Namespaces, supported revisions and version validation
//! - [`version`]: Ordered schema revision numbers
//! - [`error`]: Error types and Result alias
//! - [`model`]: Component tree (the in-memory document)
//! - [`xml`]: Node tree, reader and writer
//! - [`codec`]: Typed attribute values
//! - [`registry`]: Handlers, version overlays and the tree codec
//! - [`marshaller`]: Top-level conversion functions
//! - [`cli`]: Command-line interface

pub mod cli;
pub mod codec;
pub mod config;
pub mod error;
pub mod marshaller;
pub mod model;
pub mod registry;
pub mod version;
pub mod xml;

// Re-export main functions
pub use marshaller::{
    convert, detect_version, marshal, marshal_to_string, register_handler, unmarshal, unmarshal_str,
};
pub use registry::create_registry;

// Re-export commonly used items
pub use error::{QtiError, Result};
pub use model::{Component, Content, Value};
pub use version::Version;
