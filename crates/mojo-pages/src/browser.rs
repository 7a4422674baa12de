//! Browser integration (wasm32 only).
//!
//! The arena document stays the source of truth; after every interaction
//! the outlet subtree is re-serialized (with `data-mojo` node stamps) into
//! the real container element. Delegated click and submit listeners and one
//! popstate listener feed browser events back into the [`App`].

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::JsValue;
use wasm_bindgen::closure::Closure;

use crate::app::App;
use crate::dom::NodeId;
use crate::router::HistoryDriver;
use crate::warn_log;

/// History driver backed by the browser History API.
#[derive(Debug, Default, Clone, Copy)]
pub struct BrowserHistory;

impl BrowserHistory {
	/// Creates the driver.
	pub fn new() -> Self {
		Self
	}
}

impl HistoryDriver for BrowserHistory {
	fn push(&mut self, url: &str) {
		if let Some(window) = web_sys::window() {
			if let Ok(history) = window.history() {
				if let Err(err) = history.push_state_with_url(&JsValue::NULL, "", Some(url)) {
					warn_log!("history.pushState failed: {err:?}");
				}
			}
		}
	}

	fn replace(&mut self, url: &str) {
		if let Some(window) = web_sys::window() {
			if let Ok(history) = window.history() {
				if let Err(err) = history.replace_state_with_url(&JsValue::NULL, "", Some(url)) {
					warn_log!("history.replaceState failed: {err:?}");
				}
			}
		}
	}

	fn current(&self) -> String {
		let Some(window) = web_sys::window() else {
			return "/".to_string();
		};
		let location = window.location();
		let pathname = location.pathname().unwrap_or_else(|_| "/".to_string());
		let search = location.search().unwrap_or_default();
		format!("{pathname}{search}")
	}
}

/// Mirrors the app into the real DOM container and wires browser events.
///
/// The returned closures are intentionally leaked (`forget`): they live as
/// long as the page does.
pub fn attach(app: Rc<RefCell<App>>, container_id: &str) -> Result<(), JsValue> {
	let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
	let document = window
		.document()
		.ok_or_else(|| JsValue::from_str("no document"))?;
	let container = document
		.get_element_by_id(container_id)
		.ok_or_else(|| JsValue::from_str("container element not found"))?;

	flush(&app.borrow(), &container);

	// click and submit share one dispatch path; a form carrying
	// `data-action` submits through the same table its buttons click through
	for event_name in ["click", "submit"] {
		let app = Rc::clone(&app);
		let container = container.clone();
		let handler = Closure::<dyn FnMut(web_sys::Event)>::new(move |event: web_sys::Event| {
			let Some(target) = event
				.target()
				.and_then(|t| t.dyn_into::<web_sys::Element>().ok())
			else {
				return;
			};
			let Ok(Some(stamped)) = target.closest("[data-mojo]") else {
				return;
			};
			let Some(node) = stamped
				.get_attribute("data-mojo")
				.and_then(|token| NodeId::from_token(&token))
			else {
				return;
			};

			event.prevent_default();
			let mut app_mut = app.borrow_mut();
			if let Err(err) = app_mut.click(node) {
				warn_log!("event dispatch failed: {err}");
			}
			flush(&app_mut, &container);
		});
		container.add_event_listener_with_callback(event_name, handler.as_ref().unchecked_ref())?;
		handler.forget();
	}

	{
		let app = Rc::clone(&app);
		let container = container.clone();
		let on_popstate = Closure::<dyn FnMut(web_sys::PopStateEvent)>::new(
			move |_event: web_sys::PopStateEvent| {
				let mut app_mut = app.borrow_mut();
				if let Err(err) = app_mut.handle_location_change() {
					warn_log!("popstate navigation failed: {err}");
				}
				flush(&app_mut, &container);
			},
		);
		window
			.add_event_listener_with_callback("popstate", on_popstate.as_ref().unchecked_ref())?;
		on_popstate.forget();
	}

	Ok(())
}

fn flush(app: &App, container: &web_sys::Element) {
	container.set_inner_html(&app.render_annotated_html());
}
