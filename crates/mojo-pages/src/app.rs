//! Application composition.
//!
//! [`App`] wires the document arena, view tree, router, emitter, and
//! notifier together through explicit construction — there is no global
//! application object. Everything a view or page needs arrives through its
//! [`ViewCtx`](crate::view::ViewCtx) or through handles taken from the
//! `App` before start.

use std::rc::Rc;

use mojo_events::EventEmitter;
use serde_json::Value;

use crate::dom::{Document, NodeId};
use crate::notify::{LogNotifier, Notifier};
use crate::router::{
	ActiveRoute, HistoryDriver, MemoryHistory, Mode, NAVIGATE_ACTION, NavOutcome, NavigateOptions,
	Router, RouterEnv, RouterError,
};
use crate::view::{DispatchOutcome, ViewTree};
use crate::{debug_log, warn_log};

/// Builds an [`App`].
pub struct AppBuilder {
	mode: Mode,
	param_key: Option<String>,
	outlet_id: String,
	history: Option<Box<dyn HistoryDriver>>,
	notifier: Option<Rc<dyn Notifier>>,
}

impl AppBuilder {
	/// Starts a builder with history-mode routing, an in-memory history,
	/// and a logging notifier.
	pub fn new() -> Self {
		Self {
			mode: Mode::History,
			param_key: None,
			outlet_id: "app".to_string(),
			history: None,
			notifier: None,
		}
	}

	/// Sets the router URL mode.
	pub fn mode(mut self, mode: Mode) -> Self {
		self.mode = mode;
		self
	}

	/// Sets the query parameter used in [`Mode::Param`].
	pub fn param_key(mut self, key: impl Into<String>) -> Self {
		self.param_key = Some(key.into());
		self
	}

	/// Sets the `id` attribute of the outlet element pages mount into.
	pub fn outlet_id(mut self, id: impl Into<String>) -> Self {
		self.outlet_id = id.into();
		self
	}

	/// Supplies the history driver (a browser driver on wasm, or a
	/// preloaded [`MemoryHistory`] in tests).
	pub fn history(mut self, history: impl HistoryDriver + 'static) -> Self {
		self.history = Some(Box::new(history));
		self
	}

	/// Supplies the toast notifier.
	pub fn notifier(mut self, notifier: Rc<dyn Notifier>) -> Self {
		self.notifier = Some(notifier);
		self
	}

	/// Assembles the app. The document starts with a `<body>` root
	/// containing the outlet element.
	pub fn build(self) -> App {
		let mut doc = Document::new();
		let root = doc.create_element("body");
		let outlet = doc.create_element("div");
		let _ = doc.set_attribute(outlet, "id", self.outlet_id.clone());
		let _ = doc.append_child(root, outlet);

		let emitter = EventEmitter::new();
		let notifier = self
			.notifier
			.unwrap_or_else(|| Rc::new(LogNotifier) as Rc<dyn Notifier>);
		let tree = ViewTree::new(emitter.clone(), Rc::clone(&notifier));
		let mut router = Router::new(self.mode);
		if let Some(key) = self.param_key {
			router = router.with_param_key(key);
		}
		let history = self
			.history
			.unwrap_or_else(|| Box::new(MemoryHistory::default()));

		App {
			doc,
			tree,
			router,
			history,
			emitter,
			notifier,
			root,
			outlet,
		}
	}
}

impl Default for AppBuilder {
	fn default() -> Self {
		Self::new()
	}
}

/// A running MOJO application.
pub struct App {
	doc: Document,
	tree: ViewTree,
	router: Router,
	history: Box<dyn HistoryDriver>,
	emitter: EventEmitter,
	notifier: Rc<dyn Notifier>,
	root: NodeId,
	outlet: NodeId,
}

impl App {
	/// Starts a builder.
	pub fn builder() -> AppBuilder {
		AppBuilder::new()
	}

	/// The router, for registering routes and guards.
	pub fn router_mut(&mut self) -> &mut Router {
		&mut self.router
	}

	/// The router, read-only.
	pub fn router(&self) -> &Router {
		&self.router
	}

	/// The document arena.
	pub fn doc(&self) -> &Document {
		&self.doc
	}

	/// The document arena, mutable (tests and integrations).
	pub fn doc_mut(&mut self) -> &mut Document {
		&mut self.doc
	}

	/// The view tree.
	pub fn tree(&self) -> &ViewTree {
		&self.tree
	}

	/// The view tree and document together, for mounting free-standing
	/// views (a sidebar, a top bar) outside the routed outlet.
	pub fn tree_and_doc(&mut self) -> (&mut ViewTree, &mut Document) {
		(&mut self.tree, &mut self.doc)
	}

	/// The application event emitter.
	pub fn emitter(&self) -> &EventEmitter {
		&self.emitter
	}

	/// The application notifier.
	pub fn notifier(&self) -> &Rc<dyn Notifier> {
		&self.notifier
	}

	/// The document root (`<body>`).
	pub fn root(&self) -> NodeId {
		self.root
	}

	/// The outlet element pages mount into.
	pub fn outlet(&self) -> NodeId {
		self.outlet
	}

	/// The committed route, if any.
	pub fn active_route(&self) -> Option<&ActiveRoute> {
		self.router.active()
	}

	/// Begins routing: matches the current location and mounts the result.
	pub fn start(&mut self) -> Result<NavOutcome, RouterError> {
		let mut env = RouterEnv {
			doc: &mut self.doc,
			tree: &mut self.tree,
			history: self.history.as_mut(),
			outlet: self.outlet,
		};
		self.router.start(&mut env)
	}

	/// Navigates programmatically.
	pub fn navigate_to(
		&mut self,
		target: &str,
		options: NavigateOptions,
	) -> Result<NavOutcome, RouterError> {
		let mut env = RouterEnv {
			doc: &mut self.doc,
			tree: &mut self.tree,
			history: self.history.as_mut(),
			outlet: self.outlet,
		};
		self.router.navigate_to(&mut env, target, options)
	}

	/// Re-matches after an external location change (browser back/forward).
	pub fn handle_location_change(&mut self) -> Result<NavOutcome, RouterError> {
		let mut env = RouterEnv {
			doc: &mut self.doc,
			tree: &mut self.tree,
			history: self.history.as_mut(),
			outlet: self.outlet,
		};
		self.router.sync_from_history(&mut env)
	}

	/// The history driver (tests use this to simulate back/forward).
	pub fn history_mut(&mut self) -> &mut dyn HistoryDriver {
		self.history.as_mut()
	}

	/// Dispatches a click on a document node through the view tree, then
	/// handles framework-level actions (`navigate`) and any navigation
	/// requested by action handlers.
	pub fn click(&mut self, node: NodeId) -> Result<DispatchOutcome, RouterError> {
		let outcome = self.tree.dispatch_click(&mut self.doc, node);

		let requests = self.tree.take_nav_requests();
		for request in requests {
			self.navigate_to(
				&request.path,
				NavigateOptions {
					replace: request.replace,
				},
			)?;
		}

		if let DispatchOutcome::Unhandled(event) = &outcome {
			if event.action == NAVIGATE_ACTION {
				match event.params.get("to").and_then(Value::as_str) {
					Some(to) => {
						let to = to.to_string();
						let replace = event
							.params
							.get("replace")
							.and_then(Value::as_bool)
							.unwrap_or(false);
						self.navigate_to(&to, NavigateOptions { replace })?;
						return Ok(DispatchOutcome::Handled);
					}
					None => warn_log!("navigate action without a `to` parameter"),
				}
			} else {
				debug_log!("unhandled action `{}`", event.action);
			}
		}
		Ok(outcome)
	}

	/// Serializes the outlet subtree — what the routed UI currently looks
	/// like.
	pub fn render_html(&self) -> String {
		self.doc.render_to_string(self.outlet)
	}

	/// Serializes the whole document root with `data-mojo` node stamps,
	/// for mirroring into a real DOM.
	pub fn render_annotated_html(&self) -> String {
		self.doc.render_annotated(self.root)
	}
}

impl std::fmt::Debug for App {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("App")
			.field("router", &self.router)
			.field("tree", &self.tree)
			.field("doc", &self.doc)
			.finish()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::page::Page;
	use crate::view::View;
	use mojo_templates::{Template, TemplateError};

	struct Home;

	impl View for Home {
		fn template(&self) -> Result<Template, TemplateError> {
			Template::compile("<h1>home</h1>")
		}
	}

	impl Page for Home {
		fn name(&self) -> &str {
			"home"
		}
	}

	#[test]
	fn test_builder_defaults() {
		let app = AppBuilder::new().build();
		assert_eq!(app.doc().attribute(app.outlet(), "id"), Some("app"));
		assert!(app.active_route().is_none());
	}

	#[test]
	fn test_start_mounts_initial_route() {
		let mut app = AppBuilder::new().build();
		app.router_mut().add_route("/", || Home).unwrap();

		let outcome = app.start().unwrap();
		assert_eq!(outcome, NavOutcome::Committed);
		assert!(app.render_html().contains("<h1>home</h1>"));
	}

	#[test]
	fn test_start_respects_preloaded_history() {
		let mut app = AppBuilder::new()
			.history(MemoryHistory::new("/users/3"))
			.build();

		struct Users;
		impl View for Users {
			fn template(&self) -> Result<Template, TemplateError> {
				Template::compile("<h1>user {{id}}</h1>")
			}
		}
		impl Page for Users {
			fn name(&self) -> &str {
				"users"
			}
		}

		app.router_mut().add_route("/users/:id", || Users).unwrap();
		app.start().unwrap();

		let active = app.active_route().expect("mounted");
		assert_eq!(active.params.get("id"), Some("3"));
	}

	#[test]
	fn test_render_annotated_wraps_document() {
		let mut app = AppBuilder::new().build();
		app.router_mut().add_route("/", || Home).unwrap();
		app.start().unwrap();

		let html = app.render_annotated_html();
		assert!(html.starts_with("<body"));
		assert!(html.contains("data-mojo=\""));
	}
}
