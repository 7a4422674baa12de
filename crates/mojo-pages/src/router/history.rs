//! History drivers and URL modes.
//!
//! The router never touches `window.history` directly; it writes through a
//! [`HistoryDriver`]. On wasm the [`browser`](crate::browser) module
//! provides a History-API driver; everywhere else [`MemoryHistory`] backs
//! tests and server-side use.

/// How routes are encoded in the browser URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
	/// Clean paths via the History API (`/users/7`). Needs server rewrite
	/// rules so deep links resolve.
	#[default]
	History,
	/// The whole route carried in one query parameter (`?route=%2Fusers%2F7`),
	/// for static hosting without rewrite rules.
	Param,
}

/// Abstract browser history.
pub trait HistoryDriver {
	/// Pushes a new entry.
	fn push(&mut self, url: &str);
	/// Replaces the current entry.
	fn replace(&mut self, url: &str);
	/// The current location (path plus query string).
	fn current(&self) -> String;
}

/// In-memory history for native targets and tests.
///
/// Tracks a cursor over an entry list so tests can simulate back/forward
/// buttons and feed the result through
/// [`App::handle_location_change`](crate::app::App::handle_location_change).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryHistory {
	entries: Vec<String>,
	position: usize,
}

impl MemoryHistory {
	/// Creates a history positioned at `initial`.
	pub fn new(initial: impl Into<String>) -> Self {
		Self {
			entries: vec![initial.into()],
			position: 0,
		}
	}

	/// Moves one entry back, returning the new current location.
	pub fn back(&mut self) -> Option<String> {
		if self.position == 0 {
			return None;
		}
		self.position -= 1;
		Some(self.current())
	}

	/// Moves one entry forward, returning the new current location.
	pub fn forward(&mut self) -> Option<String> {
		if self.position + 1 >= self.entries.len() {
			return None;
		}
		self.position += 1;
		Some(self.current())
	}

	/// All entries, oldest first.
	pub fn entries(&self) -> &[String] {
		&self.entries
	}

	/// Index of the current entry.
	pub fn position(&self) -> usize {
		self.position
	}
}

impl Default for MemoryHistory {
	fn default() -> Self {
		Self::new("/")
	}
}

impl HistoryDriver for MemoryHistory {
	fn push(&mut self, url: &str) {
		self.entries.truncate(self.position + 1);
		self.entries.push(url.to_string());
		self.position = self.entries.len() - 1;
	}

	fn replace(&mut self, url: &str) {
		self.entries[self.position] = url.to_string();
	}

	fn current(&self) -> String {
		self.entries[self.position].clone()
	}
}

/// Shared handle over a [`MemoryHistory`], so a test can keep driving
/// back/forward while the app owns the driver.
impl HistoryDriver for std::rc::Rc<std::cell::RefCell<MemoryHistory>> {
	fn push(&mut self, url: &str) {
		self.borrow_mut().push(url);
	}

	fn replace(&mut self, url: &str) {
		self.borrow_mut().replace(url);
	}

	fn current(&self) -> String {
		self.borrow().current()
	}
}

/// Extracts the route target from a raw location, per mode.
pub(crate) fn location_to_target(mode: Mode, param_key: &str, location: &str) -> String {
	match mode {
		Mode::History => {
			if location.is_empty() {
				"/".to_string()
			} else {
				location.to_string()
			}
		}
		Mode::Param => {
			let query = location.split_once('?').map(|(_, q)| q).unwrap_or("");
			serde_urlencoded::from_str::<Vec<(String, String)>>(query)
				.ok()
				.and_then(|pairs| {
					pairs
						.into_iter()
						.find(|(key, _)| key == param_key)
						.map(|(_, value)| value)
				})
				.unwrap_or_else(|| "/".to_string())
		}
	}
}

/// Renders the URL to write into history for a route target, per mode.
pub(crate) fn target_to_url(mode: Mode, param_key: &str, target: &str) -> String {
	match mode {
		Mode::History => target.to_string(),
		Mode::Param => match serde_urlencoded::to_string([(param_key, target)]) {
			Ok(query) => format!("?{query}"),
			Err(_) => format!("?{param_key}={}", urlencoding::encode(target)),
		},
	}
}
