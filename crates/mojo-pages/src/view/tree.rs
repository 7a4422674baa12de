//! The view tree: exclusive owner of every mounted view.
//!
//! Views live in a generational slab. Parent→child edges carry ownership
//! semantics (destroying a parent destroys its children first); child→parent
//! edges are ids used only for action bubbling and lookup. The tree never
//! hands out references to a mounted view — hooks run with the view
//! temporarily taken out of its slot, and anything a hook wants to change
//! about the tree goes through [`ViewCtx`] as a queued command applied when
//! the hook returns.

use std::rc::Rc;

use mojo_events::EventEmitter;
use mojo_templates::TemplateError;
use serde_json::Value;
use thiserror::Error;

use crate::dom::{Document, NodeId};
use crate::notify::Notifier;
use crate::page::Page;
use crate::router::{NavToken, Params, Query};
use crate::view::{ActionError, ActionEvent, ActionTable, View};
use crate::{debug_log, error_log, warn_log};

/// Generational handle to a mounted view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ViewId {
	index: u32,
	generation: u32,
}

/// View-layer failure.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ViewError {
	/// The view's template failed to compile.
	#[error(transparent)]
	Template(#[from] TemplateError),
	/// The id refers to a view that is no longer mounted.
	#[error("view is no longer mounted")]
	Gone,
	/// A child view's named container is missing from the parent's markup.
	#[error("container `{0}` not found in parent markup")]
	MissingContainer(String),
	/// An arena document operation failed.
	#[error(transparent)]
	Dom(#[from] crate::dom::DomError),
}

/// A navigation requested from inside a hook or action handler.
///
/// The tree cannot navigate by itself; requests are collected and drained
/// by the router/app layer after the current operation settles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavRequest {
	/// Target path (may include a query string).
	pub path: String,
	/// Replace the current history entry instead of pushing.
	pub replace: bool,
}

/// Result of dispatching a click into the view tree.
#[derive(Debug, Clone, PartialEq)]
pub enum DispatchOutcome {
	/// Neither the target nor any ancestor carries `data-action`.
	NoAction,
	/// A view's handler ran.
	Handled,
	/// No mounted view declared a handler; the event is handed back for
	/// framework-level actions such as `navigate`.
	Unhandled(ActionEvent),
}

// -- type erasure ---------------------------------------------------------

/// Object-safe facade over `View` (and `Page`) implementations.
pub(crate) trait AnyView {
	fn type_label(&self) -> &'static str;
	fn root_tag(&self) -> &'static str;
	fn template(&self) -> Result<mojo_templates::Template, TemplateError>;
	fn view_data(&self) -> Value;
	fn has_action(&self, name: &str) -> bool;
	fn dispatch(&mut self, event: &ActionEvent, ctx: &mut ViewCtx<'_>) -> Result<(), ActionError>;
	fn on_init(&mut self, ctx: &mut ViewCtx<'_>);
	fn on_before_render(&mut self, ctx: &mut ViewCtx<'_>);
	fn on_after_render(&mut self, ctx: &mut ViewCtx<'_>);
	fn on_before_destroy(&mut self, ctx: &mut ViewCtx<'_>);

	fn is_page(&self) -> bool {
		false
	}
	fn page_name(&self) -> &str {
		""
	}
	fn page_title(&self) -> String {
		String::new()
	}
	fn on_params(&mut self, _params: &Params, _query: &Query, _ctx: &mut ViewCtx<'_>) {}
	fn on_enter(&mut self, _ctx: &mut ViewCtx<'_>) {}
	fn on_exit(&mut self, _ctx: &mut ViewCtx<'_>) {}
}

pub(crate) struct ErasedView<V: View> {
	view: V,
	actions: ActionTable<V>,
}

impl<V: View> ErasedView<V> {
	pub(crate) fn new(view: V) -> Self {
		Self {
			view,
			actions: V::actions(),
		}
	}
}

impl<V: View> AnyView for ErasedView<V> {
	fn type_label(&self) -> &'static str {
		std::any::type_name::<V>()
	}

	fn root_tag(&self) -> &'static str {
		self.view.root_tag()
	}

	fn template(&self) -> Result<mojo_templates::Template, TemplateError> {
		self.view.template()
	}

	fn view_data(&self) -> Value {
		self.view.view_data()
	}

	fn has_action(&self, name: &str) -> bool {
		self.actions.contains(name)
	}

	fn dispatch(&mut self, event: &ActionEvent, ctx: &mut ViewCtx<'_>) -> Result<(), ActionError> {
		match self.actions.get(&event.action) {
			Some(handler) => handler(&mut self.view, event, ctx),
			None => Ok(()),
		}
	}

	fn on_init(&mut self, ctx: &mut ViewCtx<'_>) {
		self.view.on_init(ctx);
	}

	fn on_before_render(&mut self, ctx: &mut ViewCtx<'_>) {
		self.view.on_before_render(ctx);
	}

	fn on_after_render(&mut self, ctx: &mut ViewCtx<'_>) {
		self.view.on_after_render(ctx);
	}

	fn on_before_destroy(&mut self, ctx: &mut ViewCtx<'_>) {
		self.view.on_before_destroy(ctx);
	}
}

pub(crate) struct ErasedPage<P: Page> {
	page: P,
	actions: ActionTable<P>,
}

impl<P: Page> ErasedPage<P> {
	pub(crate) fn new(page: P) -> Self {
		Self {
			page,
			actions: P::actions(),
		}
	}
}

impl<P: Page> AnyView for ErasedPage<P> {
	fn type_label(&self) -> &'static str {
		std::any::type_name::<P>()
	}

	fn root_tag(&self) -> &'static str {
		self.page.root_tag()
	}

	fn template(&self) -> Result<mojo_templates::Template, TemplateError> {
		self.page.template()
	}

	fn view_data(&self) -> Value {
		self.page.view_data()
	}

	fn has_action(&self, name: &str) -> bool {
		self.actions.contains(name)
	}

	fn dispatch(&mut self, event: &ActionEvent, ctx: &mut ViewCtx<'_>) -> Result<(), ActionError> {
		match self.actions.get(&event.action) {
			Some(handler) => handler(&mut self.page, event, ctx),
			None => Ok(()),
		}
	}

	fn on_init(&mut self, ctx: &mut ViewCtx<'_>) {
		self.page.on_init(ctx);
	}

	fn on_before_render(&mut self, ctx: &mut ViewCtx<'_>) {
		self.page.on_before_render(ctx);
	}

	fn on_after_render(&mut self, ctx: &mut ViewCtx<'_>) {
		self.page.on_after_render(ctx);
	}

	fn on_before_destroy(&mut self, ctx: &mut ViewCtx<'_>) {
		self.page.on_before_destroy(ctx);
	}

	fn is_page(&self) -> bool {
		true
	}

	fn page_name(&self) -> &str {
		self.page.name()
	}

	fn page_title(&self) -> String {
		self.page.title()
	}

	fn on_params(&mut self, params: &Params, query: &Query, ctx: &mut ViewCtx<'_>) {
		self.page.on_params(params, query, ctx);
	}

	fn on_enter(&mut self, ctx: &mut ViewCtx<'_>) {
		self.page.on_enter(ctx);
	}

	fn on_exit(&mut self, ctx: &mut ViewCtx<'_>) {
		self.page.on_exit(ctx);
	}
}

// -- context and commands -------------------------------------------------

pub(crate) enum Command {
	AddChild {
		parent: ViewId,
		child: Box<dyn AnyView>,
		container: String,
	},
	Render(ViewId),
	Destroy(ViewId),
}

/// Handle given to view hooks and action handlers.
///
/// Tree mutations requested here are queued and applied after the hook
/// returns; emitting events and toasting happen immediately.
pub struct ViewCtx<'a> {
	view: ViewId,
	token: NavToken,
	commands: &'a mut Vec<Command>,
	nav: &'a mut Vec<NavRequest>,
	emitter: &'a EventEmitter,
	notifier: &'a Rc<dyn Notifier>,
}

impl ViewCtx<'_> {
	/// Id of the view the hook is running on.
	pub fn view_id(&self) -> ViewId {
		self.view
	}

	/// Navigation token current when this hook started.
	///
	/// Async work must re-check this against the router before touching
	/// shared state; see [`Router::is_current`](crate::router::Router::is_current).
	pub fn token(&self) -> NavToken {
		self.token
	}

	/// Queues a child view to be attached under this view's element with
	/// `id="container_id"`.
	pub fn add_child(&mut self, view: impl View, container_id: impl Into<String>) {
		self.commands.push(Command::AddChild {
			parent: self.view,
			child: Box::new(ErasedView::new(view)),
			container: container_id.into(),
		});
	}

	/// Queues a re-render of this view.
	pub fn rerender(&mut self) {
		self.commands.push(Command::Render(self.view));
	}

	/// Queues a re-render of another view.
	pub fn rerender_view(&mut self, id: ViewId) {
		self.commands.push(Command::Render(id));
	}

	/// Queues destruction of a view (normally one of this view's children).
	pub fn destroy_view(&mut self, id: ViewId) {
		self.commands.push(Command::Destroy(id));
	}

	/// Requests navigation; the router picks this up once the current
	/// operation settles.
	pub fn navigate_to(&mut self, path: impl Into<String>) {
		self.nav.push(NavRequest {
			path: path.into(),
			replace: false,
		});
	}

	/// Like [`navigate_to`](ViewCtx::navigate_to), replacing the current
	/// history entry.
	pub fn navigate_replace(&mut self, path: impl Into<String>) {
		self.nav.push(NavRequest {
			path: path.into(),
			replace: true,
		});
	}

	/// Emits an application event immediately.
	pub fn emit(&self, event: &str, payload: &Value) {
		self.emitter.emit(event, payload);
	}

	/// The application event emitter.
	pub fn emitter(&self) -> &EventEmitter {
		self.emitter
	}

	/// The application notifier.
	pub fn notifier(&self) -> &Rc<dyn Notifier> {
		self.notifier
	}
}

// -- the tree -------------------------------------------------------------

struct ViewSlot {
	view: Option<Box<dyn AnyView>>,
	parent: Option<ViewId>,
	children: Vec<ViewId>,
	container: Option<String>,
	root: Option<NodeId>,
	rendered: bool,
}

struct Entry {
	generation: u32,
	slot: Option<ViewSlot>,
}

/// Arena of mounted views.
pub struct ViewTree {
	entries: Vec<Entry>,
	free: Vec<u32>,
	queue: Vec<Command>,
	nav: Vec<NavRequest>,
	emitter: EventEmitter,
	notifier: Rc<dyn Notifier>,
	token: NavToken,
}

const FLUSH_BUDGET: usize = 256;

impl ViewTree {
	/// Creates an empty tree sharing the given emitter and notifier.
	pub fn new(emitter: EventEmitter, notifier: Rc<dyn Notifier>) -> Self {
		Self {
			entries: Vec::new(),
			free: Vec::new(),
			queue: Vec::new(),
			nav: Vec::new(),
			emitter,
			notifier,
			token: NavToken::initial(),
		}
	}

	/// The shared application emitter.
	pub fn emitter(&self) -> &EventEmitter {
		&self.emitter
	}

	/// Whether the id resolves to a mounted view.
	pub fn contains(&self, id: ViewId) -> bool {
		self.index_of(id).is_some()
	}

	/// Number of mounted views.
	pub fn len(&self) -> usize {
		self.entries.iter().filter(|e| e.slot.is_some()).count()
	}

	/// Whether no views are mounted.
	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}

	/// The view's wrapper element in the document.
	pub fn root_node(&self, id: ViewId) -> Option<NodeId> {
		self.slot(id).and_then(|s| s.root)
	}

	/// Parent view id.
	pub fn parent_of(&self, id: ViewId) -> Option<ViewId> {
		self.slot(id).and_then(|s| s.parent)
	}

	/// Child view ids in mount order.
	pub fn children_of(&self, id: ViewId) -> Vec<ViewId> {
		self.slot(id).map(|s| s.children.clone()).unwrap_or_default()
	}

	/// Drains navigation requests queued by hooks and handlers.
	pub fn take_nav_requests(&mut self) -> Vec<NavRequest> {
		std::mem::take(&mut self.nav)
	}

	pub(crate) fn set_token(&mut self, token: NavToken) {
		self.token = token;
	}

	/// Mounts a view under `dom_parent` and renders it.
	pub fn mount<V: View>(
		&mut self,
		doc: &mut Document,
		view: V,
		dom_parent: NodeId,
	) -> Result<ViewId, ViewError> {
		let id = self.mount_boxed(doc, Box::new(ErasedView::new(view)), dom_parent)?;
		self.render(doc, id)?;
		Ok(id)
	}

	/// Inserts a view and runs `on_init`, without rendering. The router
	/// uses this to run page lifecycle hooks between insertion and the
	/// first render.
	pub(crate) fn mount_boxed(
		&mut self,
		doc: &mut Document,
		view: Box<dyn AnyView>,
		dom_parent: NodeId,
	) -> Result<ViewId, ViewError> {
		let root = doc.create_element(view.root_tag());
		doc.append_child(dom_parent, root)?;
		let id = self.insert(ViewSlot {
			view: Some(view),
			parent: None,
			children: Vec::new(),
			container: None,
			root: Some(root),
			rendered: false,
		});
		let _ = self.with_view(id, |view, ctx| view.on_init(ctx));
		self.flush(doc);
		Ok(id)
	}

	/// Attaches `view` as a child of `parent`, rendered into the element
	/// with `id="container_id"` inside the parent's markup.
	pub fn add_child<V: View>(
		&mut self,
		doc: &mut Document,
		parent: ViewId,
		view: V,
		container_id: &str,
	) -> Result<ViewId, ViewError> {
		let id = self.attach_child(
			doc,
			parent,
			Box::new(ErasedView::new(view)),
			container_id.to_string(),
		)?;
		self.flush(doc);
		Ok(id)
	}

	/// Re-renders a view in place. Idempotent; replacement is confined to
	/// the view's own root element, and child views are re-rendered into
	/// their named containers afterwards.
	pub fn render(&mut self, doc: &mut Document, id: ViewId) -> Result<(), ViewError> {
		let result = self.render_view(doc, id);
		self.flush(doc);
		result
	}

	/// Destroys a view: children first (depth-first), then the view's own
	/// teardown hook, then its DOM subtree. Afterwards no handler of the
	/// destroyed subtree can fire.
	pub fn destroy(&mut self, doc: &mut Document, id: ViewId) -> Result<(), ViewError> {
		let result = self.destroy_view(doc, id);
		self.flush(doc);
		result
	}

	/// Routes a click on `target` to the owning view's action table,
	/// bubbling up the view tree until a handler is found.
	pub fn dispatch_click(&mut self, doc: &mut Document, target: NodeId) -> DispatchOutcome {
		let Some(actionable) = doc.closest(target, |n| n.attr("data-action").is_some()) else {
			return DispatchOutcome::NoAction;
		};
		let action = doc
			.attribute(actionable, "data-action")
			.unwrap_or_default()
			.to_string();
		if action.is_empty() {
			return DispatchOutcome::NoAction;
		}
		let params = match doc.attribute(actionable, "data-params") {
			Some(raw) => match serde_json::from_str(raw) {
				Ok(value) => value,
				Err(err) => {
					warn_log!("invalid data-params JSON for action `{action}`: {err}");
					Value::Null
				}
			},
			None => Value::Null,
		};
		let event = ActionEvent {
			action,
			params,
			target: actionable,
		};

		// deepest view whose root contains the actionable element
		let mut owner = None;
		let mut cursor = Some(actionable);
		while let Some(node) = cursor {
			if let Some(view) = self.view_by_root(node) {
				owner = Some(view);
				break;
			}
			cursor = doc.parent(node);
		}
		let Some(mut current) = owner else {
			return DispatchOutcome::Unhandled(event);
		};

		loop {
			let handles = self
				.slot(current)
				.and_then(|s| s.view.as_ref())
				.is_some_and(|v| v.has_action(&event.action));
			if handles {
				match self.with_view(current, |view, ctx| view.dispatch(&event, ctx)) {
					Ok(Ok(())) => {}
					Ok(Err(err)) => error_log!("action `{}` failed: {err}", event.action),
					Err(_) => {}
				}
				self.flush(doc);
				return DispatchOutcome::Handled;
			}
			match self.parent_of(current) {
				Some(parent) => current = parent,
				None => break,
			}
		}
		DispatchOutcome::Unhandled(event)
	}

	// -- page lifecycle, driven by the router -----------------------------

	pub(crate) fn page_params(
		&mut self,
		doc: &mut Document,
		id: ViewId,
		params: &Params,
		query: &Query,
	) {
		let _ = self.with_view(id, |view, ctx| view.on_params(params, query, ctx));
		self.flush(doc);
	}

	pub(crate) fn page_enter(&mut self, doc: &mut Document, id: ViewId) {
		let _ = self.with_view(id, |view, ctx| view.on_enter(ctx));
		self.flush(doc);
	}

	pub(crate) fn page_exit(&mut self, doc: &mut Document, id: ViewId) {
		let _ = self.with_view(id, |view, ctx| view.on_exit(ctx));
		self.flush(doc);
	}

	pub(crate) fn page_title(&self, id: ViewId) -> Option<String> {
		self.slot(id)
			.and_then(|s| s.view.as_ref())
			.filter(|v| v.is_page())
			.map(|v| v.page_title())
	}

	// -- internals --------------------------------------------------------

	fn insert(&mut self, slot: ViewSlot) -> ViewId {
		if let Some(index) = self.free.pop() {
			let entry = &mut self.entries[index as usize];
			entry.slot = Some(slot);
			ViewId {
				index,
				generation: entry.generation,
			}
		} else {
			self.entries.push(Entry {
				generation: 0,
				slot: Some(slot),
			});
			ViewId {
				index: (self.entries.len() - 1) as u32,
				generation: 0,
			}
		}
	}

	fn index_of(&self, id: ViewId) -> Option<usize> {
		let index = id.index as usize;
		let entry = self.entries.get(index)?;
		(entry.generation == id.generation && entry.slot.is_some()).then_some(index)
	}

	fn slot(&self, id: ViewId) -> Option<&ViewSlot> {
		self.index_of(id).and_then(|i| self.entries[i].slot.as_ref())
	}

	fn slot_mut(&mut self, id: ViewId) -> Option<&mut ViewSlot> {
		let index = self.index_of(id)?;
		self.entries[index].slot.as_mut()
	}

	fn view_by_root(&self, node: NodeId) -> Option<ViewId> {
		self.entries.iter().enumerate().find_map(|(index, entry)| {
			let slot = entry.slot.as_ref()?;
			(slot.root == Some(node)).then_some(ViewId {
				index: index as u32,
				generation: entry.generation,
			})
		})
	}

	/// Runs `f` with the view taken out of its slot, so the hook can hold
	/// `&mut` to the view while the context holds the queues.
	fn with_view<R>(
		&mut self,
		id: ViewId,
		f: impl FnOnce(&mut Box<dyn AnyView>, &mut ViewCtx<'_>) -> R,
	) -> Result<R, ViewError> {
		let index = self.index_of(id).ok_or(ViewError::Gone)?;
		let mut view = self.entries[index]
			.slot
			.as_mut()
			.and_then(|s| s.view.take())
			.ok_or(ViewError::Gone)?;

		let mut ctx = ViewCtx {
			view: id,
			token: self.token,
			commands: &mut self.queue,
			nav: &mut self.nav,
			emitter: &self.emitter,
			notifier: &self.notifier,
		};
		let result = f(&mut view, &mut ctx);

		if let Some(slot) = self.entries[index].slot.as_mut() {
			slot.view = Some(view);
		}
		Ok(result)
	}

	fn attach_child(
		&mut self,
		doc: &mut Document,
		parent: ViewId,
		view: Box<dyn AnyView>,
		container: String,
	) -> Result<ViewId, ViewError> {
		let (parent_root, parent_rendered) = self
			.slot(parent)
			.map(|s| (s.root, s.rendered))
			.ok_or(ViewError::Gone)?;
		let parent_root = parent_root.ok_or(ViewError::Gone)?;

		if !parent_rendered {
			// the parent's first render re-homes and renders this child
			let id = self.insert(ViewSlot {
				view: Some(view),
				parent: Some(parent),
				children: Vec::new(),
				container: Some(container),
				root: None,
				rendered: false,
			});
			if let Some(slot) = self.slot_mut(parent) {
				slot.children.push(id);
			}
			let _ = self.with_view(id, |view, ctx| view.on_init(ctx));
			return Ok(id);
		}

		let target = match doc.find_by_id(parent_root, &container) {
			Some(target) => target,
			None => {
				self.notifier.error(&format!(
					"cannot attach child view: container `{container}` not found"
				));
				return Err(ViewError::MissingContainer(container));
			}
		};

		let root = doc.create_element(view.root_tag());
		doc.append_child(target, root)?;
		let id = self.insert(ViewSlot {
			view: Some(view),
			parent: Some(parent),
			children: Vec::new(),
			container: Some(container),
			root: Some(root),
			rendered: false,
		});
		if let Some(slot) = self.slot_mut(parent) {
			slot.children.push(id);
		}
		let _ = self.with_view(id, |view, ctx| view.on_init(ctx));
		self.render_view(doc, id)?;
		Ok(id)
	}

	fn render_view(&mut self, doc: &mut Document, id: ViewId) -> Result<(), ViewError> {
		let root = self.slot(id).and_then(|s| s.root).ok_or(ViewError::Gone)?;

		let _ = self.with_view(id, |view, ctx| view.on_before_render(ctx));

		let rendered = self.with_view(id, |view, _ctx| {
			view.template().map(|t| t.render_fragment(&view.view_data()))
		})?;
		let fragment = match rendered {
			Ok(fragment) => fragment,
			Err(err) => {
				let label = self
					.slot(id)
					.and_then(|s| s.view.as_ref())
					.map(|v| v.type_label())
					.unwrap_or("<view>");
				self.notifier.error(&format!("render failed: {err}"));
				error_log!("{label} render failed: {err}");
				return Err(ViewError::Template(err));
			}
		};

		let child_ids = self.children_of(id);

		doc.clear_children(root)?;
		doc.instantiate(&fragment, root)?;
		if let Some(slot) = self.slot_mut(id) {
			slot.rendered = true;
		}

		// child views persist across parent re-renders; give each a fresh
		// root inside its named container
		for child in child_ids {
			let container = self.slot(child).and_then(|s| s.container.clone());
			let Some(container) = container else {
				continue;
			};
			match doc.find_by_id(root, &container) {
				Some(target) => {
					let tag = self
						.slot(child)
						.and_then(|s| s.view.as_ref())
						.map(|v| v.root_tag())
						.unwrap_or("div");
					let new_root = doc.create_element(tag);
					if let Err(err) = doc.append_child(target, new_root) {
						warn_log!("failed to re-home child view: {err}");
						continue;
					}
					if let Some(slot) = self.slot_mut(child) {
						slot.root = Some(new_root);
					}
					if let Err(err) = self.render_view(doc, child) {
						debug_log!("child view render failed: {err}");
					}
				}
				None => {
					self.notifier.error(&format!(
						"container `{container}` disappeared during re-render"
					));
					if let Some(slot) = self.slot_mut(child) {
						slot.root = None;
					}
				}
			}
		}

		let _ = self.with_view(id, |view, ctx| view.on_after_render(ctx));
		Ok(())
	}

	fn destroy_view(&mut self, doc: &mut Document, id: ViewId) -> Result<(), ViewError> {
		let index = self.index_of(id).ok_or(ViewError::Gone)?;

		for child in self.children_of(id) {
			let _ = self.destroy_view(doc, child);
		}

		let _ = self.with_view(id, |view, ctx| view.on_before_destroy(ctx));

		let (parent, root) = self
			.entries[index]
			.slot
			.as_ref()
			.map(|s| (s.parent, s.root))
			.unwrap_or((None, None));

		if let Some(parent) = parent {
			if let Some(slot) = self.slot_mut(parent) {
				slot.children.retain(|c| *c != id);
			}
		}

		let entry = &mut self.entries[index];
		entry.slot = None;
		entry.generation += 1;
		self.free.push(id.index);

		if let Some(root) = root {
			// the root may already be gone if the parent re-rendered
			let _ = doc.remove(root);
		}
		Ok(())
	}

	fn flush(&mut self, doc: &mut Document) {
		let mut budget = FLUSH_BUDGET;
		while !self.queue.is_empty() && budget > 0 {
			let commands = std::mem::take(&mut self.queue);
			for command in commands {
				budget = budget.saturating_sub(1);
				match command {
					Command::AddChild {
						parent,
						child,
						container,
					} => {
						if let Err(err) = self.attach_child(doc, parent, child, container) {
							warn_log!("deferred add_child failed: {err}");
						}
					}
					Command::Render(id) => {
						if self.contains(id) {
							if let Err(err) = self.render_view(doc, id) {
								warn_log!("deferred re-render failed: {err}");
							}
						}
					}
					Command::Destroy(id) => {
						if self.contains(id) {
							let _ = self.destroy_view(doc, id);
						}
					}
				}
			}
		}
		if !self.queue.is_empty() {
			warn_log!(
				"view command queue did not settle; dropping {} commands",
				self.queue.len()
			);
			self.queue.clear();
		}
	}
}

impl std::fmt::Debug for ViewTree {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("ViewTree")
			.field("mounted", &self.len())
			.field("queued_commands", &self.queue.len())
			.field("pending_nav", &self.nav.len())
			.finish()
	}
}
