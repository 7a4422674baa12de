//! Toast notification seam.
//!
//! The framework never renders toasts itself; render and action failures go
//! through a [`Notifier`] so the host application can plug in its own
//! presentation. [`LogNotifier`] (the default) writes to the log, and
//! [`BufferNotifier`] records messages for inspection in tests.

use std::cell::RefCell;

use crate::{error_log, info_log};

/// Severity of a toast message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
	/// Neutral information.
	Info,
	/// A completed operation.
	Success,
	/// A failure the user should see.
	Error,
}

/// Receives user-facing notifications from the framework.
pub trait Notifier {
	/// Presents one message.
	fn notify(&self, level: ToastLevel, message: &str);

	/// Presents an info message.
	fn info(&self, message: &str) {
		self.notify(ToastLevel::Info, message);
	}

	/// Presents a success message.
	fn success(&self, message: &str) {
		self.notify(ToastLevel::Success, message);
	}

	/// Presents an error message.
	fn error(&self, message: &str) {
		self.notify(ToastLevel::Error, message);
	}
}

/// Default notifier: forwards everything to the log.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
	fn notify(&self, level: ToastLevel, message: &str) {
		match level {
			ToastLevel::Info | ToastLevel::Success => info_log!("toast: {message}"),
			ToastLevel::Error => error_log!("toast: {message}"),
		}
	}
}

/// Test notifier that records every message.
#[derive(Debug, Default)]
pub struct BufferNotifier {
	entries: RefCell<Vec<(ToastLevel, String)>>,
}

impl BufferNotifier {
	/// Creates an empty buffer.
	pub fn new() -> Self {
		Self::default()
	}

	/// A copy of the recorded messages.
	pub fn messages(&self) -> Vec<(ToastLevel, String)> {
		self.entries.borrow().clone()
	}

	/// Drains and returns the recorded messages.
	pub fn take(&self) -> Vec<(ToastLevel, String)> {
		self.entries.take()
	}

	/// Number of recorded error-level messages.
	pub fn error_count(&self) -> usize {
		self.entries
			.borrow()
			.iter()
			.filter(|(level, _)| *level == ToastLevel::Error)
			.count()
	}
}

impl Notifier for BufferNotifier {
	fn notify(&self, level: ToastLevel, message: &str) {
		self.entries.borrow_mut().push((level, message.to_string()));
	}
}
