//! # MOJO
//!
//! A client-side single-page-application framework for admin portals and
//! data-driven web UIs, written in Rust.
//!
//! MOJO is the glue layer admin UIs are built from: a component/view system
//! with lifecycle and ownership, a compiled declarative templating layer, a
//! client router with guards and two URL modes, and the seams (data
//! envelope, toast notifier) the surrounding application plugs into.
//!
//! ## Crates
//!
//! - [`pages`]: the core — document arena, view tree, pages, router, app
//!   composition
//! - [`templates`]: HTML-plus-mustache templates compiled to an AST
//! - [`events`]: per-instance publish/subscribe
//!
//! ## Example
//!
//! ```
//! use mojo::prelude::*;
//!
//! struct Home;
//!
//! impl View for Home {
//! 	fn template(&self) -> Result<Template, TemplateError> {
//! 		Template::compile("<h1>Welcome</h1>")
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
//! assert!(app.render_html().contains("Welcome"));
//! ```

pub mod events;
pub mod pages;
pub mod prelude;
pub mod templates;
