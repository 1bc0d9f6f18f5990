//! Element registry system for versioned marshalling.
//!
//! This module maps an element's qualified name and the active schema
//! version to the handler responsible for it, and drives the recursive
//! conversion between component trees and node trees. Later schema
//! revisions are expressed as overlays on their predecessor's registry.

mod cache;
mod config;
mod core;
mod engine;
mod handler;
pub mod handlers;
mod resolver;
mod types;

pub use cache::RegistryCache;
pub use config::create_registry;
pub use self::core::Registry;
pub use engine::TreeCodec;
pub use handler::{ElementHandler, HandlerCtor, HandlerTag};
pub use handlers::SpecHandler;
pub use resolver::ChildTypeResolver;
pub use types::{AttributeSpec, ChildRule, ContentModel, ElementSpec, Family};
