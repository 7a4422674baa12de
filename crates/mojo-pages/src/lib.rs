//! # MOJO Pages
//!
//! The client-side core of the MOJO frontend framework: a document arena, a
//! view tree with lifecycle and declarative action dispatch, routable pages,
//! and a history-aware router.
//!
//! ## Architecture
//!
//! - [`dom`]: an arena [`Document`](dom::Document) of element/text nodes
//!   addressed by generational ids — the framework's own DOM representation,
//!   mirrored into the browser by the [`browser`] glue on wasm targets and
//!   fully driveable in native tests.
//! - [`view`]: the [`View`](view::View) trait and the [`ViewTree`](view::ViewTree)
//!   arena that owns every mounted view, renders templates into the
//!   document, and routes `data-action` clicks to handler tables.
//! - [`page`]: [`Page`](page::Page), a routable view with
//!   `on_params`/`on_enter`/`on_exit` lifecycle.
//! - [`router`]: route patterns (`:name`, `:name?`, `*`), guards, history
//!   and query-parameter URL modes, and the navigation state machine.
//! - [`data`]: the success/status/error envelope contract for external REST
//!   collaborators.
//! - [`notify`]: the toast seam render failures are surfaced through.
//! - [`app`]: explicit composition of all of the above — no globals.
//!
//! ## Example
//!
//! ```
//! use mojo_pages::app::AppBuilder;
//! use mojo_pages::page::Page;
//! use mojo_pages::view::View;
//! use mojo_templates::{Template, TemplateError};
//!
//! struct Home;
//!
//! impl View for Home {
//! 	fn template(&self) -> Result<Template, TemplateError> {
//! 		Template::compile("<h1>Home</h1>")
//! 	}
//! }
//!
//! impl Page for Home {
//! 	fn name(&self) -> &str {
//! 		"home"
//! 	}
//! }
//!
//! let mut app = AppBuilder::new().build();
//! app.router_mut().add_route("/", || Home).unwrap();
//! app.start().unwrap();
//! assert!(app.render_html().contains("<h1>Home</h1>"));
//! ```

#![warn(missing_docs)]

pub mod app;
pub mod data;
pub mod dom;
pub mod logging;
pub mod notify;
pub mod page;
pub mod router;
pub mod view;

#[cfg(target_arch = "wasm32")]
pub mod browser;

pub use app::{App, AppBuilder};
pub use data::{DataError, DataSource, Envelope, EnvelopeBody, MemorySource};
pub use dom::{Document, DomError, NodeId};
pub use notify::{BufferNotifier, LogNotifier, Notifier, ToastLevel};
pub use page::Page;
pub use router::{
	ActiveRoute, Guard, GuardVerdict, HistoryDriver, Link, MemoryHistory, Mode, NavOutcome,
	NavState, NavToken, NavigateOptions, Params, PatternError, Query, RouteId, RouteMatch,
	RoutePattern, Router, RouterError,
};
pub use view::{
	ActionError, ActionEvent, ActionTable, DispatchOutcome, View, ViewCtx, ViewError, ViewId,
	ViewTree,
};

// Re-exported for the logging macros; not part of the public API.
#[cfg(not(target_arch = "wasm32"))]
#[doc(hidden)]
pub use tracing;
#[cfg(target_arch = "wasm32")]
#[doc(hidden)]
pub use web_sys;
