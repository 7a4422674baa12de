//! The framework core: document arena, view tree, pages, router, and app
//! composition.
//!
//! See [`mojo_pages`] for the full module documentation.

// Re-export all mojo-pages functionality
pub use mojo_pages::*;
