//! # MOJO Events
//!
//! Per-instance publish/subscribe for the MOJO frontend framework.
//!
//! Every stateful framework object (views, pages, the application itself)
//! composes an [`EventEmitter`] rather than inheriting from one. Emitters are
//! single-threaded by design — the framework runs on the browser event loop —
//! so handlers are plain `Rc`-backed closures without `Send`/`Sync` bounds.
//!
//! ## Example
//!
//! ```
//! use mojo_events::EventEmitter;
//! use serde_json::json;
//!
//! let emitter = EventEmitter::new();
//! emitter.on("saved", |payload| {
//! 	assert_eq!(payload["id"], 7);
//! 	Ok(())
//! });
//! emitter.emit("saved", &json!({ "id": 7 }));
//! ```

mod emitter;

pub use emitter::{EmitSummary, EventEmitter, ListenerId};

use thiserror::Error;

/// Error returned by an event handler.
///
/// A failing handler is logged by [`EventEmitter::emit`] and never prevents
/// the remaining handlers from running.
#[derive(Debug, Clone, Error)]
pub enum EventError {
	/// The handler reported a failure.
	#[error("{0}")]
	Handler(String),
}

impl EventError {
	/// Convenience constructor for handler failures.
	pub fn handler(message: impl Into<String>) -> Self {
		Self::Handler(message.into())
	}
}
