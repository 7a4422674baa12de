//! Compiled HTML-plus-mustache templates.
//!
//! See [`mojo_templates`] for syntax and rendering semantics.

// Re-export all mojo-templates functionality
pub use mojo_templates::*;
