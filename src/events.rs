//! Per-instance publish/subscribe.
//!
//! See [`mojo_events`] for semantics (`on`/`once`/`off`/`emit`).

// Re-export all mojo-events functionality
pub use mojo_events::*;
