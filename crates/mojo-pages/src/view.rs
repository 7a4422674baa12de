//! Views: renderable, composable UI units.
//!
//! A [`View`] renders a compiled template against its own data into a
//! subtree of the document arena. Mounted views live in a [`ViewTree`],
//! which is the exclusive owner of every view instance; parent/child
//! relations are held as [`ViewId`]s in both directions, so there are no
//! reference cycles to leak.
//!
//! Declarative actions: elements carry `data-action="kebab-name"` (plus an
//! optional `data-params` JSON object), and each view type declares a
//! compile-time table of handlers in [`View::actions`]. A click dispatches
//! to the deepest view owning the element and bubbles up the view tree
//! until some ancestor's table has the handler.

pub(crate) mod tree;

mod action;

pub use action::{ActionError, ActionEvent, ActionTable};
pub use tree::{DispatchOutcome, NavRequest, ViewCtx, ViewError, ViewId, ViewTree};

use mojo_templates::{Template, TemplateError};
use serde_json::Value;

/// A renderable UI unit.
///
/// Implementations are plain structs holding whatever state the view needs;
/// the framework owns instances once they are mounted into a
/// [`ViewTree`].
pub trait View: 'static {
	/// The template to render. Invoked on every render, so a view may
	/// switch templates; most implementations compile once and clone the
	/// handle. A compile error here is this view's render error — it is
	/// caught, toasted, and does not unmount siblings.
	fn template(&self) -> Result<Template, TemplateError>;

	/// The data the template renders against.
	fn view_data(&self) -> Value {
		Value::Null
	}

	/// Tag of the wrapper element the view renders into.
	fn root_tag(&self) -> &'static str {
		"div"
	}

	/// The view's action handler table, resolved once when the view is
	/// mounted.
	fn actions() -> ActionTable<Self>
	where
		Self: Sized,
	{
		ActionTable::new()
	}

	/// Runs once, right after the view is inserted into the tree.
	fn on_init(&mut self, _ctx: &mut ViewCtx<'_>) {}

	/// Runs before each render.
	fn on_before_render(&mut self, _ctx: &mut ViewCtx<'_>) {}

	/// Runs after each successful render.
	fn on_after_render(&mut self, _ctx: &mut ViewCtx<'_>) {}

	/// Runs once, before the view (and its children) are torn down.
	fn on_before_destroy(&mut self, _ctx: &mut ViewCtx<'_>) {}
}
