//! Element handlers for the QTI vocabulary.
//!
//! Every element is described by a static [`ElementSpec`](super::ElementSpec)
//! table entry and served by the generic [`SpecHandler`].

pub(crate) mod interaction;
pub(crate) mod item;
pub(crate) mod media;
pub(crate) mod processing;
mod spec;
pub(crate) mod xhtml;

pub use spec::SpecHandler;
