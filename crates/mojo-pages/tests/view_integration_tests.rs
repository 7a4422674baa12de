//! Integration tests for views composed inside a running app:
//! action handlers with re-render, free-standing views outside the routed
//! outlet, and active-route tracking via the `route:changed` event.

use std::cell::RefCell;
use std::rc::Rc;

use mojo_pages::app::AppBuilder;
use mojo_pages::data::{DataSource, MemorySource};
use mojo_pages::notify::BufferNotifier;
use mojo_pages::page::Page;
use mojo_pages::router::{NavigateOptions, Params, Query};
use mojo_pages::view::{ActionTable, DispatchOutcome, View, ViewCtx};
use mojo_templates::{Template, TemplateError};
use serde_json::{Value, json};

struct CounterPage {
	count: u32,
}

impl View for CounterPage {
	fn template(&self) -> Result<Template, TemplateError> {
		Template::compile(concat!(
			"<p>count: {{count}}</p>",
			"<button data-action=\"bump\" data-params='{\"by\": 3}'>+3</button>",
		))
	}

	fn view_data(&self) -> Value {
		json!({ "count": self.count })
	}

	fn actions() -> ActionTable<Self> {
		ActionTable::new().with("bump", |page, event, ctx| {
			let by = event.params.get("by").and_then(Value::as_u64).unwrap_or(1);
			page.count += by as u32;
			ctx.rerender();
			Ok(())
		})
	}
}

impl Page for CounterPage {
	fn name(&self) -> &str {
		"counter"
	}
}

#[test]
fn test_action_params_and_rerender_through_app() {
	let mut app = AppBuilder::new().build();
	app.router_mut()
		.add_route("/", || CounterPage { count: 0 })
		.unwrap();
	app.start().unwrap();

	let button = app
		.doc()
		.find_by_attr(app.outlet(), "data-action", "bump")
		.expect("button rendered");
	let outcome = app.click(button).unwrap();

	assert_eq!(outcome, DispatchOutcome::Handled);
	assert!(app.render_html().contains("count: 3"));

	// the re-render replaced the button node; stale clicks do nothing
	assert_eq!(app.click(button).unwrap(), DispatchOutcome::NoAction);

	let button = app
		.doc()
		.find_by_attr(app.outlet(), "data-action", "bump")
		.expect("fresh button rendered");
	app.click(button).unwrap();
	assert!(app.render_html().contains("count: 6"));
}

/// A sidebar-style view mounted outside the routed outlet, highlighting
/// the active route from `route:changed` events.
struct Sidebar {
	active: Rc<RefCell<String>>,
}

impl View for Sidebar {
	fn template(&self) -> Result<Template, TemplateError> {
		Template::compile("<nav><p>current: {{active}}</p></nav>")
	}

	fn view_data(&self) -> Value {
		json!({ "active": self.active.borrow().clone() })
	}

	fn root_tag(&self) -> &'static str {
		"aside"
	}
}

#[test]
fn test_sidebar_outside_outlet_tracks_active_route() {
	struct Empty(&'static str);
	impl View for Empty {
		fn template(&self) -> Result<Template, TemplateError> {
			Template::compile(self.0)
		}
	}
	impl Page for Empty {
		fn name(&self) -> &str {
			"empty"
		}
	}

	let mut app = AppBuilder::new().build();
	app.router_mut().add_route("/", || Empty("<h1>home</h1>")).unwrap();
	app.router_mut()
		.add_route("/reports", || Empty("<h1>reports</h1>"))
		.unwrap();

	let active = Rc::new(RefCell::new(String::from("-")));
	{
		let active = Rc::clone(&active);
		app.emitter().on("route:changed", move |payload| {
			*active.borrow_mut() = payload["path"].as_str().unwrap_or("?").to_string();
			Ok(())
		});
	}

	let root = app.root();
	let (tree, doc) = app.tree_and_doc();
	let sidebar = tree
		.mount(
			doc,
			Sidebar {
				active: Rc::clone(&active),
			},
			root,
		)
		.unwrap();

	app.start().unwrap();
	app.navigate_to("/reports", NavigateOptions::default()).unwrap();

	// the event listener saw the committed path; re-render the sidebar to
	// reflect it
	assert_eq!(active.borrow().as_str(), "/reports");
	let (tree, doc) = app.tree_and_doc();
	tree.render(doc, sidebar).unwrap();

	let sidebar_root = app.tree().root_node(sidebar).unwrap();
	assert!(
		app.doc()
			.render_to_string(sidebar_root)
			.contains("current: /reports")
	);
	// routed navigation never touched the sidebar's subtree ownership
	assert!(app.tree().contains(sidebar));
}

/// A detail page backed by a data source: `on_params` fetches the record
/// for the routed id and the template renders whatever the envelope
/// carried. A failed envelope becomes a toast, not a crash.
struct UserDetail {
	source: Rc<RefCell<MemorySource>>,
	user: Value,
}

impl View for UserDetail {
	fn template(&self) -> Result<Template, TemplateError> {
		Template::compile(concat!(
			"{{#user}}<h1>{{name}}</h1><p>{{role}}</p>{{/user}}",
			"{{^user}}<h1>unknown user</h1>{{/user}}",
		))
	}

	fn view_data(&self) -> Value {
		json!({ "user": self.user })
	}
}

impl Page for UserDetail {
	fn name(&self) -> &str {
		"user-detail"
	}

	fn on_params(&mut self, params: &Params, _query: &Query, ctx: &mut ViewCtx<'_>) {
		let Some(id) = params.get("id") else {
			return;
		};
		match self.source.borrow_mut().fetch(&format!("user:{id}")) {
			Ok(envelope) => match envelope.payload() {
				Some(payload) => self.user = payload.clone(),
				None => {
					let reason = envelope.error_message().unwrap_or("unknown error");
					ctx.notifier().error(&format!("failed to load user {id}: {reason}"));
					self.user = Value::Null;
				}
			},
			Err(err) => {
				ctx.notifier().error(&format!("failed to load user {id}: {err}"));
				self.user = Value::Null;
			}
		}
	}
}

#[test]
fn test_page_renders_fetched_envelope_payload() {
	let source = Rc::new(RefCell::new(MemorySource::new()));
	source
		.borrow_mut()
		.save("user:7", &json!({ "name": "ada", "role": "admin" }))
		.unwrap();

	let notifier = Rc::new(BufferNotifier::new());
	let mut app = AppBuilder::new()
		.notifier(Rc::clone(&notifier) as Rc<dyn mojo_pages::notify::Notifier>)
		.build();
	{
		let source = Rc::clone(&source);
		app.router_mut()
			.add_route("/users/:id", move || UserDetail {
				source: Rc::clone(&source),
				user: Value::Null,
			})
			.unwrap();
	}
	app.start().unwrap();

	app.navigate_to("/users/7", NavigateOptions::default()).unwrap();
	assert!(app.render_html().contains("<h1>ada</h1>"));
	assert!(app.render_html().contains("<p>admin</p>"));
	assert_eq!(notifier.error_count(), 0);

	// a missing record degrades to the inverted section plus a toast
	app.navigate_to("/users/404", NavigateOptions::default()).unwrap();
	assert!(app.render_html().contains("unknown user"));
	assert_eq!(notifier.error_count(), 1);
}
