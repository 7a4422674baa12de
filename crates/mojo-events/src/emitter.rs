//! The [`EventEmitter`] itself.
//!
//! Listeners are stored per event name in registration order and invoked in
//! that order. `emit` works on a snapshot: handlers registered or removed
//! while an emit is running take effect from the next emit. `once` listeners
//! are removed from the table *before* their handler runs, so a handler may
//! re-register itself without being dropped again.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use serde_json::Value;
use tracing::warn;

use crate::EventError;

type Handler = Rc<dyn Fn(&Value) -> Result<(), EventError>>;

/// Identifies a registered listener so it can be removed later.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

struct Listener {
	id: ListenerId,
	once: bool,
	handler: Handler,
}

#[derive(Default)]
struct Inner {
	listeners: HashMap<String, Vec<Listener>>,
	next_id: u64,
}

/// Per-instance publish/subscribe.
///
/// Cloning an `EventEmitter` yields a handle to the same listener table, so
/// a component can hand out clones to collaborators that need to emit into
/// it.
#[derive(Clone, Default)]
pub struct EventEmitter {
	inner: Rc<RefCell<Inner>>,
}

/// What an [`EventEmitter::emit`] call did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EmitSummary {
	/// Number of handlers invoked.
	pub invoked: usize,
	/// Number of handlers that returned an error.
	pub failed: usize,
}

impl EventEmitter {
	/// Creates an emitter with no listeners.
	pub fn new() -> Self {
		Self::default()
	}

	/// Registers `handler` for `event`. Returns an id usable with [`off`].
	///
	/// [`off`]: EventEmitter::off
	pub fn on<F>(&self, event: &str, handler: F) -> ListenerId
	where
		F: Fn(&Value) -> Result<(), EventError> + 'static,
	{
		self.register(event, false, Rc::new(handler))
	}

	/// Registers `handler` to run at most once.
	///
	/// The listener is unregistered before the handler body runs, so the
	/// handler may call [`on`] or [`once`] for the same event again.
	///
	/// [`on`]: EventEmitter::on
	/// [`once`]: EventEmitter::once
	pub fn once<F>(&self, event: &str, handler: F) -> ListenerId
	where
		F: Fn(&Value) -> Result<(), EventError> + 'static,
	{
		self.register(event, true, Rc::new(handler))
	}

	fn register(&self, event: &str, once: bool, handler: Handler) -> ListenerId {
		let mut inner = self.inner.borrow_mut();
		inner.next_id += 1;
		let id = ListenerId(inner.next_id);
		inner
			.listeners
			.entry(event.to_string())
			.or_default()
			.push(Listener { id, once, handler });
		id
	}

	/// Removes one listener, or every listener for `event` when `id` is
	/// `None`. Returns the number of listeners removed.
	pub fn off(&self, event: &str, id: Option<ListenerId>) -> usize {
		let mut inner = self.inner.borrow_mut();
		match (inner.listeners.get_mut(event), id) {
			(Some(list), Some(id)) => {
				let before = list.len();
				list.retain(|l| l.id != id);
				before - list.len()
			}
			(Some(_), None) => inner
				.listeners
				.remove(event)
				.map(|list| list.len())
				.unwrap_or(0),
			(None, _) => 0,
		}
	}

	/// Invokes every listener registered for `event`, in registration order.
	///
	/// A handler error is logged and counted in the returned summary; it
	/// does not stop the remaining handlers.
	pub fn emit(&self, event: &str, payload: &Value) -> EmitSummary {
		let snapshot: Vec<(ListenerId, Handler)> = {
			let mut inner = self.inner.borrow_mut();
			let Some(list) = inner.listeners.get_mut(event) else {
				return EmitSummary::default();
			};
			let snapshot = list
				.iter()
				.map(|l| (l.id, Rc::clone(&l.handler)))
				.collect();
			// once listeners self-remove before invocation
			list.retain(|l| !l.once);
			snapshot
		};

		let mut summary = EmitSummary::default();
		for (id, handler) in snapshot {
			summary.invoked += 1;
			if let Err(err) = handler(payload) {
				summary.failed += 1;
				warn!(event, listener = id.0, %err, "event handler failed");
			}
		}
		summary
	}

	/// Number of listeners currently registered for `event`.
	pub fn listener_count(&self, event: &str) -> usize {
		self.inner
			.borrow()
			.listeners
			.get(event)
			.map(|l| l.len())
			.unwrap_or(0)
	}

	/// Whether at least one listener is registered for `event`.
	pub fn has_listeners(&self, event: &str) -> bool {
		self.listener_count(event) > 0
	}
}

impl std::fmt::Debug for EventEmitter {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		let inner = self.inner.borrow();
		f.debug_struct("EventEmitter")
			.field("events", &inner.listeners.keys().collect::<Vec<_>>())
			.finish()
	}
}
