//! XML tree model, reader and writer.
//!
//! The engine converts between components and the [`Node`] tree defined
//! here; [`parse`] and [`write`] move that tree to and from text.

mod node;
mod reader;
mod writer;

pub use node::{Node, NodeContent, QualifiedName};
pub use reader::parse;
pub use writer::write;
