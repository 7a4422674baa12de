//! Router-aware anchor markup.
//!
//! A [`Link`] renders an `<a>` carrying the framework's declarative
//! navigation contract: `data-action="navigate"` plus a `data-params` JSON
//! object with the destination. The view layer's delegated click handling
//! hands unclaimed `navigate` actions to the [`App`](crate::app::App),
//! which routes them — no per-link listeners.

use mojo_templates::{FragElement, FragNode};
use serde_json::json;

/// Action name the app intercepts for SPA navigation.
pub(crate) const NAVIGATE_ACTION: &str = "navigate";

/// Builder for a navigation anchor.
#[derive(Debug, Clone)]
pub struct Link {
	to: String,
	label: String,
	replace: bool,
	class: Option<String>,
	attrs: Vec<(String, String)>,
}

impl Link {
	/// Creates a link to `to` with the given text.
	pub fn new(to: impl Into<String>, label: impl Into<String>) -> Self {
		Self {
			to: to.into(),
			label: label.into(),
			replace: false,
			class: None,
			attrs: Vec::new(),
		}
	}

	/// Navigate by replacing the current history entry.
	pub fn replace(mut self, replace: bool) -> Self {
		self.replace = replace;
		self
	}

	/// Sets the CSS class.
	pub fn class(mut self, class: impl Into<String>) -> Self {
		self.class = Some(class.into());
		self
	}

	/// Adds an extra attribute.
	pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
		self.attrs.push((name.into(), value.into()));
		self
	}

	/// The destination path.
	pub fn to(&self) -> &str {
		&self.to
	}

	/// Renders to a fragment node for DOM instantiation.
	pub fn fragment(&self) -> FragNode {
		let params = json!({ "to": self.to, "replace": self.replace });
		let mut attrs = vec![
			("href".to_string(), self.to.clone()),
			("data-action".to_string(), NAVIGATE_ACTION.to_string()),
			("data-params".to_string(), params.to_string()),
		];
		if let Some(class) = &self.class {
			attrs.push(("class".to_string(), class.clone()));
		}
		attrs.extend(self.attrs.iter().cloned());

		FragNode::Element(FragElement {
			tag: "a".to_string(),
			attrs,
			children: vec![FragNode::Text(self.label.clone())],
			void: false,
		})
	}

	/// Renders to an HTML string, for embedding in string templates via a
	/// raw (`{{{…}}}`) marker.
	pub fn markup(&self) -> String {
		use mojo_templates::Fragment;

		Fragment {
			nodes: vec![self.fragment()],
		}
		.to_html()
	}
}
