//! Declarative action dispatch types.

use std::collections::HashMap;

use serde_json::Value;
use thiserror::Error;

use crate::dom::NodeId;
use crate::view::ViewCtx;

/// Error returned by an action handler.
///
/// Handler failures are caught and logged per invocation; they never tear
/// down the view or block other dispatches.
#[derive(Debug, Clone, Error)]
pub enum ActionError {
	/// The handler reported a failure.
	#[error("{0}")]
	Failed(String),
	/// The element's `data-params` payload did not fit what the handler
	/// expected.
	#[error("invalid action params: {0}")]
	BadParams(String),
}

impl ActionError {
	/// Convenience constructor for handler failures.
	pub fn failed(message: impl Into<String>) -> Self {
		Self::Failed(message.into())
	}
}

/// A dispatched `data-action` click.
#[derive(Debug, Clone, PartialEq)]
pub struct ActionEvent {
	/// The `data-action` attribute value, e.g. `save-user`.
	pub action: String,
	/// Parsed `data-params` JSON (`Null` when absent or malformed).
	pub params: Value,
	/// The element carrying the `data-action` attribute.
	pub target: NodeId,
}

/// Signature of an action handler.
pub type ActionFn<V> = fn(&mut V, &ActionEvent, &mut ViewCtx<'_>) -> Result<(), ActionError>;

/// Per-view-type table mapping action names to handlers.
///
/// Built once in [`View::actions`](crate::view::View::actions) when the
/// view is mounted; dispatch is a plain lookup, with no name mangling at
/// runtime.
pub struct ActionTable<V> {
	entries: HashMap<&'static str, ActionFn<V>>,
}

impl<V> ActionTable<V> {
	/// Creates an empty table.
	pub fn new() -> Self {
		Self {
			entries: HashMap::new(),
		}
	}

	/// Builder-style registration.
	pub fn with(mut self, name: &'static str, handler: ActionFn<V>) -> Self {
		self.entries.insert(name, handler);
		self
	}

	/// Registers a handler.
	pub fn insert(&mut self, name: &'static str, handler: ActionFn<V>) {
		self.entries.insert(name, handler);
	}

	/// Whether a handler is registered for `name`.
	pub fn contains(&self, name: &str) -> bool {
		self.entries.contains_key(name)
	}

	/// Number of registered handlers.
	pub fn len(&self) -> usize {
		self.entries.len()
	}

	/// Whether the table is empty.
	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	pub(crate) fn get(&self, name: &str) -> Option<ActionFn<V>> {
		self.entries.get(name).copied()
	}
}

impl<V> Default for ActionTable<V> {
	fn default() -> Self {
		Self::new()
	}
}

impl<V> std::fmt::Debug for ActionTable<V> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		let mut names: Vec<_> = self.entries.keys().collect();
		names.sort();
		f.debug_struct("ActionTable").field("actions", &names).finish()
	}
}
