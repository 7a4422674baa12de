//! Arena-backed document model.
//!
//! The framework keeps its own document: a slab of element and text nodes
//! addressed by generational [`NodeId`]s, with parent links held as ids
//! rather than owned references. Views render into this arena; on wasm
//! targets the [`browser`](crate::browser) glue mirrors it into the real
//! DOM, and in native tests it is driven directly.
//!
//! Freeing a subtree bumps each slot's generation, so a stale [`NodeId`]
//! held across a re-render resolves to nothing instead of aliasing whatever
//! reused the slot.

mod document;

pub use document::{Document, DomError, Node, NodeId, NodeKind};
