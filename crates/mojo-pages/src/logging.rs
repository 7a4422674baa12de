//! Logging macros that work on both WASM and native targets.
//!
//! On `wasm32` the macros write to the browser console through
//! `web_sys::console`; everywhere else they emit `tracing` events, so test
//! runs and server-side rendering integrate with the host's subscriber.
//!
//! | Macro        | WASM            | Non-WASM          |
//! |--------------|-----------------|-------------------|
//! | `debug_log!` | `console.debug` | `tracing::debug!` |
//! | `info_log!`  | `console.info`  | `tracing::info!`  |
//! | `warn_log!`  | `console.warn`  | `tracing::warn!`  |
//! | `error_log!` | `console.error` | `tracing::error!` |

/// Logs a debug-level message.
#[macro_export]
#[cfg(target_arch = "wasm32")]
macro_rules! debug_log {
	($($arg:tt)*) => {{
		$crate::web_sys::console::debug_1(&format!($($arg)*).into());
	}};
}

/// Logs a debug-level message.
#[macro_export]
#[cfg(not(target_arch = "wasm32"))]
macro_rules! debug_log {
	($($arg:tt)*) => {{
		$crate::tracing::debug!($($arg)*);
	}};
}

/// Logs an info-level message.
#[macro_export]
#[cfg(target_arch = "wasm32")]
macro_rules! info_log {
	($($arg:tt)*) => {{
		$crate::web_sys::console::info_1(&format!($($arg)*).into());
	}};
}

/// Logs an info-level message.
#[macro_export]
#[cfg(not(target_arch = "wasm32"))]
macro_rules! info_log {
	($($arg:tt)*) => {{
		$crate::tracing::info!($($arg)*);
	}};
}

/// Logs a warning.
#[macro_export]
#[cfg(target_arch = "wasm32")]
macro_rules! warn_log {
	($($arg:tt)*) => {{
		$crate::web_sys::console::warn_1(&format!($($arg)*).into());
	}};
}

/// Logs a warning.
#[macro_export]
#[cfg(not(target_arch = "wasm32"))]
macro_rules! warn_log {
	($($arg:tt)*) => {{
		$crate::tracing::warn!($($arg)*);
	}};
}

/// Logs an error.
#[macro_export]
#[cfg(target_arch = "wasm32")]
macro_rules! error_log {
	($($arg:tt)*) => {{
		$crate::web_sys::console::error_1(&format!($($arg)*).into());
	}};
}

/// Logs an error.
#[macro_export]
#[cfg(not(target_arch = "wasm32"))]
macro_rules! error_log {
	($($arg:tt)*) => {{
		$crate::tracing::error!($($arg)*);
	}};
}
