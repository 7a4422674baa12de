//! Routable pages.

use crate::router::{Params, Query};
use crate::view::{View, ViewCtx};

/// A view bound to a route pattern: the top-level unit the router mounts
/// into the outlet.
///
/// The router constructs page instances from the factory registered with
/// the route — a fresh instance per navigation, except when a navigation
/// re-enters the route that is already mounted, in which case the mounted
/// instance is reused and only [`on_params`](Page::on_params) re-runs.
pub trait Page: View {
	/// Stable machine name, used for logging and the `route:changed` event.
	fn name(&self) -> &str;

	/// Human-readable title.
	fn title(&self) -> String {
		self.name().to_string()
	}

	/// Runs on every (re)entry with the match result, including re-entries
	/// that reuse the mounted instance. Must be idempotent for repeated
	/// calls with identical params.
	fn on_params(&mut self, _params: &Params, _query: &Query, _ctx: &mut ViewCtx<'_>) {}

	/// Runs exactly once per mount, after `on_params` and before the first
	/// render.
	fn on_enter(&mut self, _ctx: &mut ViewCtx<'_>) {}

	/// Runs exactly once per unmount, before the view tree tears the page
	/// down. Release here whatever `on_enter` acquired.
	fn on_exit(&mut self, _ctx: &mut ViewCtx<'_>) {}
}
