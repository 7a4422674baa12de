//! Client-side routing.
//!
//! Route patterns support literal segments, named parameters (`:id`), a
//! terminal optional parameter (`:id?`), and a terminal wildcard (`*`).
//! Registration order is match priority: the first registered pattern that
//! fully matches wins, so a catch-all `*` route is registered last by
//! convention.
//!
//! Navigation runs a state machine (`Idle → Matching → GuardsRunning →
//! Unmounting → Mounting → Idle`): guards may cancel or redirect before
//! anything is unmounted; the previous page's `on_exit` and teardown fully
//! complete before the next page mounts; and the browser URL is written in
//! either `History` mode (clean paths) or `Param` mode (the route carried
//! in a query parameter, for static hosting).

mod core;
mod history;
mod link;
mod pattern;

pub use self::core::{
	ActiveRoute, Guard, GuardVerdict, NavOutcome, NavState, NavToken, NavigateOptions, RouteId,
	RouteMatch, Router, RouterEnv, RouterError,
};
pub use history::{HistoryDriver, MemoryHistory, Mode};
pub use link::Link;
pub use pattern::{Params, PatternError, Query, RoutePattern, WILDCARD_KEY};

pub(crate) use link::NAVIGATE_ACTION;
