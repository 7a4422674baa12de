//! The router: route table, guards, and the navigation state machine.

use std::collections::HashMap;

use crate::dom::{Document, NodeId};
use crate::page::Page;
use crate::router::history::{HistoryDriver, Mode, location_to_target, target_to_url};
use crate::router::pattern::{Params, PatternError, Query, RoutePattern};
use crate::view::tree::{AnyView, ErasedPage};
use crate::view::{ViewError, ViewId, ViewTree};
use crate::{debug_log, warn_log};

use thiserror::Error;

/// Redirect chains longer than this abort with [`RouterError::RedirectLoop`].
const MAX_REDIRECTS: usize = 8;

/// Identifies a registered route by registration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RouteId(pub(crate) usize);

/// Monotonic navigation token.
///
/// Every navigation attempt bumps the router's epoch. Asynchronous work
/// started under an older token must check [`Router::is_current`] before
/// touching shared state — a slow fetch from a superseded navigation is
/// ignored rather than raced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NavToken(u64);

impl NavToken {
	pub(crate) fn initial() -> Self {
		Self(0)
	}
}

/// Router failure.
#[derive(Debug, Error)]
pub enum RouterError {
	/// A route pattern failed to parse at registration, or a reverse
	/// lookup was missing a parameter.
	#[error(transparent)]
	Pattern(#[from] PatternError),
	/// Reverse lookup for an unregistered route name.
	#[error("no route named `{0}`")]
	UnknownName(String),
	/// Guard redirects exceeded [`MAX_REDIRECTS`].
	#[error("redirect limit exceeded while navigating to `{0}`")]
	RedirectLoop(String),
	/// Mounting the matched page failed.
	#[error(transparent)]
	View(#[from] ViewError),
}

/// A matched route, handed to guards and recorded in [`ActiveRoute`].
#[derive(Debug, Clone)]
pub struct RouteMatch {
	/// Which route matched.
	pub route: RouteId,
	/// The route's registered name, if any.
	pub name: Option<String>,
	/// The matched path, without the query string.
	pub path: String,
	/// The full navigation target, query string included.
	pub target: String,
	/// Captured path parameters.
	pub params: Params,
	/// Parsed query pairs.
	pub query: Query,
}

/// The single currently-committed route.
///
/// Mutated only by the router's commit step; everything else reads it.
#[derive(Debug, Clone)]
pub struct ActiveRoute {
	/// Which route is mounted.
	pub route: RouteId,
	/// The mounted page's view id.
	pub view: ViewId,
	/// The committed path.
	pub path: String,
	/// Captured parameters.
	pub params: Params,
	/// Parsed query pairs.
	pub query: Query,
	/// The route's registered name, if any.
	pub name: Option<String>,
}

/// What a `beforeEach` guard decided.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardVerdict {
	/// Continue the navigation.
	Allow,
	/// Abort; URL and mounted page stay unchanged.
	Cancel,
	/// Abandon this navigation and go elsewhere.
	Redirect(String),
}

/// A guard hooked into the navigation pipeline.
pub enum Guard {
	/// Runs before anything is unmounted; may cancel or redirect.
	BeforeEach(Box<dyn Fn(&RouteMatch) -> GuardVerdict>),
	/// Runs after the new page is mounted; side effects only.
	AfterEach(Box<dyn Fn(&RouteMatch)>),
}

/// Navigation state machine position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NavState {
	/// No navigation in flight.
	#[default]
	Idle,
	/// Matching the target against the route table.
	Matching,
	/// Running `beforeEach` guards.
	GuardsRunning,
	/// Tearing down the previous page.
	Unmounting,
	/// Mounting and rendering the next page.
	Mounting,
}

/// What a navigation attempt did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavOutcome {
	/// The page swap committed.
	Committed,
	/// A guard cancelled; nothing changed.
	Cancelled,
	/// No pattern matched (and no catch-all was registered); nothing
	/// changed.
	NoMatch,
	/// A navigation was already in flight; this one was queued and will
	/// supersede any previously queued target.
	Queued,
}

/// Options for [`Router::navigate_to`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NavigateOptions {
	/// Replace the current history entry instead of pushing.
	pub replace: bool,
}

/// Collaborators the router drives during a navigation.
///
/// Borrowed per call so the router itself owns no document, tree, or
/// history — the [`App`](crate::app::App) wires them together.
pub struct RouterEnv<'a> {
	/// The document arena pages render into.
	pub doc: &'a mut Document,
	/// The view tree pages are mounted in.
	pub tree: &'a mut ViewTree,
	/// History sink for URL updates.
	pub history: &'a mut dyn HistoryDriver,
	/// The element pages are mounted under.
	pub outlet: NodeId,
}

pub(crate) type PageFactory = Box<dyn Fn() -> Box<dyn AnyView>>;

struct RouteEntry {
	pattern: RoutePattern,
	name: Option<String>,
	factory: PageFactory,
}

/// Owns the route table and navigation state; dispatches matched pages.
pub struct Router {
	routes: Vec<RouteEntry>,
	named: HashMap<String, usize>,
	before: Vec<Box<dyn Fn(&RouteMatch) -> GuardVerdict>>,
	after: Vec<Box<dyn Fn(&RouteMatch)>>,
	mode: Mode,
	param_key: String,
	state: NavState,
	epoch: u64,
	active: Option<ActiveRoute>,
	queued: Option<(String, NavigateOptions)>,
}

impl Router {
	/// Creates a router in the given URL mode.
	pub fn new(mode: Mode) -> Self {
		Self {
			routes: Vec::new(),
			named: HashMap::new(),
			before: Vec::new(),
			after: Vec::new(),
			mode,
			param_key: "route".to_string(),
			state: NavState::Idle,
			epoch: 0,
			active: None,
			queued: None,
		}
	}

	/// Overrides the query parameter carrying the route in [`Mode::Param`].
	pub fn with_param_key(mut self, key: impl Into<String>) -> Self {
		self.param_key = key.into();
		self
	}

	/// Registers a route. Registration order is match priority; register
	/// the catch-all `*` route last.
	pub fn add_route<P, F>(&mut self, pattern: &str, factory: F) -> Result<RouteId, PatternError>
	where
		P: Page,
		F: Fn() -> P + 'static,
	{
		self.add_entry(pattern, None, factory)
	}

	/// Registers a named route; the name can be used with
	/// [`reverse`](Router::reverse).
	pub fn add_named_route<P, F>(
		&mut self,
		name: &str,
		pattern: &str,
		factory: F,
	) -> Result<RouteId, PatternError>
	where
		P: Page,
		F: Fn() -> P + 'static,
	{
		self.add_entry(pattern, Some(name.to_string()), factory)
	}

	fn add_entry<P, F>(
		&mut self,
		pattern: &str,
		name: Option<String>,
		factory: F,
	) -> Result<RouteId, PatternError>
	where
		P: Page,
		F: Fn() -> P + 'static,
	{
		let pattern = RoutePattern::parse(pattern)?;
		let id = RouteId(self.routes.len());
		if let Some(name) = &name {
			self.named.insert(name.clone(), id.0);
		}
		self.routes.push(RouteEntry {
			pattern,
			name,
			factory: Box::new(move || Box::new(ErasedPage::new(factory()))),
		});
		Ok(id)
	}

	/// Hooks a guard into the navigation pipeline. Guards of each kind run
	/// in registration order.
	pub fn add_guard(&mut self, guard: Guard) {
		match guard {
			Guard::BeforeEach(f) => self.before.push(f),
			Guard::AfterEach(f) => self.after.push(f),
		}
	}

	/// Convenience for [`add_guard`](Router::add_guard) with
	/// [`Guard::BeforeEach`].
	pub fn before_each(&mut self, guard: impl Fn(&RouteMatch) -> GuardVerdict + 'static) {
		self.add_guard(Guard::BeforeEach(Box::new(guard)));
	}

	/// Convenience for [`add_guard`](Router::add_guard) with
	/// [`Guard::AfterEach`].
	pub fn after_each(&mut self, guard: impl Fn(&RouteMatch) + 'static) {
		self.add_guard(Guard::AfterEach(Box::new(guard)));
	}

	/// The router's URL mode.
	pub fn mode(&self) -> Mode {
		self.mode
	}

	/// Current state machine position.
	pub fn state(&self) -> NavState {
		self.state
	}

	/// The committed route, if any navigation has succeeded yet.
	pub fn active(&self) -> Option<&ActiveRoute> {
		self.active.as_ref()
	}

	/// The token of the most recent navigation attempt.
	pub fn token(&self) -> NavToken {
		NavToken(self.epoch)
	}

	/// Whether `token` still belongs to the latest navigation attempt.
	pub fn is_current(&self, token: NavToken) -> bool {
		token.0 == self.epoch
	}

	/// Number of registered routes.
	pub fn route_count(&self) -> usize {
		self.routes.len()
	}

	/// Whether a route was registered under `name`.
	pub fn has_route(&self, name: &str) -> bool {
		self.named.contains_key(name)
	}

	/// Builds a URL for a named route.
	pub fn reverse(&self, name: &str, params: &Params) -> Result<String, RouterError> {
		let index = self
			.named
			.get(name)
			.ok_or_else(|| RouterError::UnknownName(name.to_string()))?;
		Ok(self.routes[*index].pattern.reverse(params)?)
	}

	/// Matches a target (path plus optional query) against the route
	/// table. First registered match wins; guards are not consulted.
	pub fn match_target(&self, target: &str) -> Option<RouteMatch> {
		let (path, query) = split_target(target);
		let query = Query::parse(query);
		for (index, entry) in self.routes.iter().enumerate() {
			if let Some(params) = entry.pattern.matches(path) {
				return Some(RouteMatch {
					route: RouteId(index),
					name: entry.name.clone(),
					path: path.to_string(),
					target: target.to_string(),
					params,
					query,
				});
			}
		}
		None
	}

	/// Performs the initial match against the current location, replacing
	/// the history entry rather than pushing.
	pub fn start(&mut self, env: &mut RouterEnv<'_>) -> Result<NavOutcome, RouterError> {
		let location = env.history.current();
		let target = location_to_target(self.mode, &self.param_key, &location);
		self.navigate_to(env, &target, NavigateOptions { replace: true })
	}

	/// Navigates programmatically.
	///
	/// Runs guards, swaps pages, writes history, and then drains any
	/// navigations that hooks requested while this one was committing
	/// (newest first supersedes older queued targets).
	pub fn navigate_to(
		&mut self,
		env: &mut RouterEnv<'_>,
		target: &str,
		options: NavigateOptions,
	) -> Result<NavOutcome, RouterError> {
		if self.state != NavState::Idle {
			debug_log!("navigation to `{target}` queued; superseding any earlier queued target");
			self.queued = Some((target.to_string(), options));
			return Ok(NavOutcome::Queued);
		}
		let mut outcome = self.navigate_once(env, target.to_string(), options, true)?;
		outcome = self.drain_pending(env, outcome)?;
		Ok(outcome)
	}

	/// Re-synchronizes with the current location after a browser
	/// back/forward event; matches and mounts without writing history.
	pub fn sync_from_history(&mut self, env: &mut RouterEnv<'_>) -> Result<NavOutcome, RouterError> {
		let location = env.history.current();
		let target = location_to_target(self.mode, &self.param_key, &location);
		if self.state != NavState::Idle {
			self.queued = Some((target, NavigateOptions { replace: true }));
			return Ok(NavOutcome::Queued);
		}
		let mut outcome = self.navigate_once(env, target, NavigateOptions { replace: true }, false)?;
		outcome = self.drain_pending(env, outcome)?;
		Ok(outcome)
	}

	fn drain_pending(
		&mut self,
		env: &mut RouterEnv<'_>,
		mut outcome: NavOutcome,
	) -> Result<NavOutcome, RouterError> {
		let mut hops = 0usize;
		loop {
			if hops > MAX_REDIRECTS {
				warn_log!("navigation chain did not settle; stopping");
				env.tree.take_nav_requests();
				return Ok(outcome);
			}
			if let Some((target, options)) = self.queued.take() {
				hops += 1;
				outcome = self.navigate_once(env, target, options, true)?;
				continue;
			}
			let requests = env.tree.take_nav_requests();
			if requests.is_empty() {
				return Ok(outcome);
			}
			for request in requests {
				hops += 1;
				outcome = self.navigate_once(
					env,
					request.path,
					NavigateOptions {
						replace: request.replace,
					},
					true,
				)?;
			}
		}
	}

	fn navigate_once(
		&mut self,
		env: &mut RouterEnv<'_>,
		target: String,
		options: NavigateOptions,
		write_history: bool,
	) -> Result<NavOutcome, RouterError> {
		let mut target = target;
		let mut redirects = 0usize;

		loop {
			self.state = NavState::Matching;
			let Some(matched) = self.match_target(&target) else {
				self.state = NavState::Idle;
				warn_log!("no route matches `{target}`; navigation ignored");
				return Ok(NavOutcome::NoMatch);
			};

			self.epoch += 1;
			self.state = NavState::GuardsRunning;
			let mut verdict = GuardVerdict::Allow;
			for guard in &self.before {
				match guard(&matched) {
					GuardVerdict::Allow => {}
					other => {
						verdict = other;
						break;
					}
				}
			}
			match verdict {
				GuardVerdict::Allow => {}
				GuardVerdict::Cancel => {
					self.state = NavState::Idle;
					debug_log!("navigation to `{target}` cancelled by guard");
					return Ok(NavOutcome::Cancelled);
				}
				GuardVerdict::Redirect(to) => {
					redirects += 1;
					if redirects > MAX_REDIRECTS {
						self.state = NavState::Idle;
						return Err(RouterError::RedirectLoop(to));
					}
					debug_log!("guard redirected `{target}` to `{to}`");
					target = to;
					continue;
				}
			}

			// The previous page fully exits before the next one mounts, so
			// two pages never race for the outlet.
			let reused_view = match self.active.take() {
				Some(prev) if prev.route == matched.route && env.tree.contains(prev.view) => {
					Some(prev.view)
				}
				Some(prev) => {
					self.state = NavState::Unmounting;
					env.tree.page_exit(env.doc, prev.view);
					if let Err(err) = env.tree.destroy(env.doc, prev.view) {
						warn_log!("failed to destroy previous page: {err}");
					}
					None
				}
				None => None,
			};

			self.state = NavState::Mounting;
			env.tree.set_token(NavToken(self.epoch));
			let was_reused = reused_view.is_some();
			let view = match reused_view {
				Some(view) => view,
				None => {
					let page = (self.routes[matched.route.0].factory)();
					env.doc
						.clear_children(env.outlet)
						.map_err(ViewError::from)?;
					env.tree.mount_boxed(env.doc, page, env.outlet)?
				}
			};

			env.tree.page_params(env.doc, view, &matched.params, &matched.query);
			if !was_reused {
				env.tree.page_enter(env.doc, view);
			}
			if let Err(err) = env.tree.render(env.doc, view) {
				warn_log!("page render failed: {err}");
			}

			if write_history {
				let url = target_to_url(self.mode, &self.param_key, &matched.target);
				if options.replace {
					env.history.replace(&url);
				} else {
					env.history.push(&url);
				}
			}

			self.active = Some(ActiveRoute {
				route: matched.route,
				view,
				path: matched.path.clone(),
				params: matched.params.clone(),
				query: matched.query.clone(),
				name: matched.name.clone(),
			});
			self.state = NavState::Idle;

			for guard in &self.after {
				guard(&matched);
			}
			let title = env.tree.page_title(view).unwrap_or_default();
			env.tree.emitter().emit(
				"route:changed",
				&serde_json::json!({
					"path": matched.path,
					"target": matched.target,
					"name": matched.name,
					"title": title,
				}),
			);
			return Ok(NavOutcome::Committed);
		}
	}
}

impl std::fmt::Debug for Router {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Router")
			.field("routes", &self.routes.len())
			.field("named", &self.named.keys().collect::<Vec<_>>())
			.field("state", &self.state)
			.field("epoch", &self.epoch)
			.finish()
	}
}

fn split_target(target: &str) -> (&str, &str) {
	match target.split_once('?') {
		Some((path, query)) => (path, query),
		None => (target, ""),
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::notify::LogNotifier;
	use crate::view::View;
	use mojo_events::EventEmitter;
	use mojo_templates::{Template, TemplateError};
	use std::rc::Rc;

	struct Stub(&'static str);

	impl View for Stub {
		fn template(&self) -> Result<Template, TemplateError> {
			Template::compile(self.0)
		}
	}

	impl Page for Stub {
		fn name(&self) -> &str {
			"stub"
		}
	}

	fn harness() -> (Document, ViewTree, crate::router::MemoryHistory, NodeId) {
		let mut doc = Document::new();
		let outlet = doc.create_element("div");
		let tree = ViewTree::new(EventEmitter::new(), Rc::new(LogNotifier));
		(doc, tree, crate::router::MemoryHistory::default(), outlet)
	}

	#[test]
	fn test_first_registered_route_wins() {
		let mut router = Router::new(Mode::History);
		router.add_route("/users/:id", || Stub("<p>param</p>")).unwrap();
		router.add_route("/users/new", || Stub("<p>literal</p>")).unwrap();

		let matched = router.match_target("/users/new").unwrap();
		assert_eq!(matched.route, RouteId(0));
		assert_eq!(matched.params.get("id"), Some("new"));
	}

	#[test]
	fn test_match_target_splits_query() {
		let mut router = Router::new(Mode::History);
		router.add_route("/users/:id", || Stub("<p>u</p>")).unwrap();

		let matched = router.match_target("/users/7?tab=info&x=1").unwrap();
		assert_eq!(matched.path, "/users/7");
		assert_eq!(matched.params.get("id"), Some("7"));
		assert_eq!(matched.query.get("tab"), Some("info"));
		assert_eq!(matched.query.get("x"), Some("1"));
	}

	#[test]
	fn test_invalid_pattern_rejected_at_registration() {
		let mut router = Router::new(Mode::History);
		let result = router.add_route("/a/*/b", || Stub("<p>x</p>"));
		assert!(result.is_err());
		assert_eq!(router.route_count(), 0);
	}

	#[test]
	fn test_reverse_by_name() {
		let mut router = Router::new(Mode::History);
		router
			.add_named_route("user-detail", "/users/:id", || Stub("<p>u</p>"))
			.unwrap();

		assert!(router.has_route("user-detail"));
		let url = router
			.reverse("user-detail", &Params::from_pairs([("id", "42")]))
			.unwrap();
		assert_eq!(url, "/users/42");
		assert!(matches!(
			router.reverse("nope", &Params::new()),
			Err(RouterError::UnknownName(_))
		));
	}

	#[test]
	fn test_navigate_mounts_and_records_active() {
		let (mut doc, mut tree, mut history, outlet) = harness();
		let mut router = Router::new(Mode::History);
		router.add_route("/", || Stub("<h1>home</h1>")).unwrap();

		let outcome = {
			let mut env = RouterEnv {
				doc: &mut doc,
				tree: &mut tree,
				history: &mut history,
				outlet,
			};
			router.navigate_to(&mut env, "/", NavigateOptions::default())
		}
		.unwrap();

		assert_eq!(outcome, NavOutcome::Committed);
		let active = router.active().expect("active route");
		assert_eq!(active.path, "/");
		assert!(doc.render_to_string(outlet).contains("<h1>home</h1>"));
		assert_eq!(router.state(), NavState::Idle);
	}

	#[test]
	fn test_no_match_without_catch_all_is_noop() {
		let (mut doc, mut tree, mut history, outlet) = harness();
		let mut router = Router::new(Mode::History);
		router.add_route("/", || Stub("<h1>home</h1>")).unwrap();

		let mut env = RouterEnv {
			doc: &mut doc,
			tree: &mut tree,
			history: &mut history,
			outlet,
		};
		let outcome = router
			.navigate_to(&mut env, "/missing", NavigateOptions::default())
			.unwrap();

		assert_eq!(outcome, NavOutcome::NoMatch);
		assert!(router.active().is_none());
	}

	#[test]
	fn test_guard_cancel_keeps_everything() {
		let (mut doc, mut tree, mut history, outlet) = harness();
		let mut router = Router::new(Mode::History);
		router.add_route("/", || Stub("<h1>home</h1>")).unwrap();
		router.add_route("/admin", || Stub("<h1>admin</h1>")).unwrap();

		{
			let mut env = RouterEnv {
				doc: &mut doc,
				tree: &mut tree,
				history: &mut history,
				outlet,
			};
			router.navigate_to(&mut env, "/", NavigateOptions::default()).unwrap();
		}

		router.before_each(|matched| {
			if matched.path.starts_with("/admin") {
				GuardVerdict::Cancel
			} else {
				GuardVerdict::Allow
			}
		});

		let outcome = {
			let mut env = RouterEnv {
				doc: &mut doc,
				tree: &mut tree,
				history: &mut history,
				outlet,
			};
			router.navigate_to(&mut env, "/admin", NavigateOptions::default())
		}
		.unwrap();

		assert_eq!(outcome, NavOutcome::Cancelled);
		let active = router.active().expect("still on home");
		assert_eq!(active.path, "/");
		assert!(doc.render_to_string(outlet).contains("<h1>home</h1>"));
		assert_eq!(history.current(), "/");
	}

	#[test]
	fn test_guard_redirect() {
		let (mut doc, mut tree, mut history, outlet) = harness();
		let mut router = Router::new(Mode::History);
		router.add_route("/login", || Stub("<h1>login</h1>")).unwrap();
		router.add_route("/admin", || Stub("<h1>admin</h1>")).unwrap();

		router.before_each(|matched| {
			if matched.path.starts_with("/admin") {
				GuardVerdict::Redirect("/login".to_string())
			} else {
				GuardVerdict::Allow
			}
		});

		let outcome = {
			let mut env = RouterEnv {
				doc: &mut doc,
				tree: &mut tree,
				history: &mut history,
				outlet,
			};
			router.navigate_to(&mut env, "/admin", NavigateOptions::default())
		}
		.unwrap();

		assert_eq!(outcome, NavOutcome::Committed);
		assert_eq!(router.active().map(|a| a.path.clone()), Some("/login".to_string()));
	}

	#[test]
	fn test_redirect_loop_detected() {
		let (mut doc, mut tree, mut history, outlet) = harness();
		let mut router = Router::new(Mode::History);
		router.add_route("/a", || Stub("<p>a</p>")).unwrap();

		router.before_each(|_| GuardVerdict::Redirect("/a".to_string()));

		let mut env = RouterEnv {
			doc: &mut doc,
			tree: &mut tree,
			history: &mut history,
			outlet,
		};
		let result = router.navigate_to(&mut env, "/a", NavigateOptions::default());
		assert!(matches!(result, Err(RouterError::RedirectLoop(_))));
		assert_eq!(router.state(), NavState::Idle);
	}

	#[test]
	fn test_epoch_bumps_per_attempt() {
		let (mut doc, mut tree, mut history, outlet) = harness();
		let mut router = Router::new(Mode::History);
		router.add_route("/", || Stub("<p>home</p>")).unwrap();

		let before = router.token();
		{
			let mut env = RouterEnv {
				doc: &mut doc,
				tree: &mut tree,
				history: &mut history,
				outlet,
			};
			router.navigate_to(&mut env, "/", NavigateOptions::default()).unwrap();
		}
		assert!(!router.is_current(before));
		assert!(router.is_current(router.token()));
	}

	#[test]
	fn test_param_mode_writes_query_urls() {
		let (mut doc, mut tree, mut history, outlet) = harness();
		let mut router = Router::new(Mode::Param);
		router.add_route("/users/:id", || Stub("<p>u</p>")).unwrap();

		{
			let mut env = RouterEnv {
				doc: &mut doc,
				tree: &mut tree,
				history: &mut history,
				outlet,
			};
			router
				.navigate_to(&mut env, "/users/7", NavigateOptions::default())
				.unwrap();
		}
		assert_eq!(history.current(), "?route=%2Fusers%2F7");
	}

	#[test]
	fn test_replace_does_not_grow_history() {
		let (mut doc, mut tree, mut history, outlet) = harness();
		let mut router = Router::new(Mode::History);
		router.add_route("/a", || Stub("<p>a</p>")).unwrap();
		router.add_route("/b", || Stub("<p>b</p>")).unwrap();

		{
			let mut env = RouterEnv {
				doc: &mut doc,
				tree: &mut tree,
				history: &mut history,
				outlet,
			};
			router.navigate_to(&mut env, "/a", NavigateOptions::default()).unwrap();
			router
				.navigate_to(&mut env, "/b", NavigateOptions { replace: true })
				.unwrap();
		}
		// the replace rewrote "/a" in place instead of pushing
		assert_eq!(history.entries(), &["/", "/b"]);
		assert_eq!(history.current(), "/b");
	}
}
