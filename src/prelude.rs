//! Everything a typical page module needs, in one import.
//!
//! ```
//! use mojo::prelude::*;
//! ```

pub use mojo_events::{EventEmitter, EventError};
pub use mojo_pages::app::{App, AppBuilder};
pub use mojo_pages::data::{DataError, DataSource, Envelope};
pub use mojo_pages::notify::{Notifier, ToastLevel};
pub use mojo_pages::page::Page;
pub use mojo_pages::router::{
	GuardVerdict, Link, Mode, NavigateOptions, Params, Query, RouteMatch, Router,
};
pub use mojo_pages::view::{ActionError, ActionEvent, ActionTable, View, ViewCtx, ViewId};
pub use mojo_templates::{Template, TemplateError};
