//! # MOJO Templates
//!
//! A compiled template engine for the MOJO frontend framework.
//!
//! Templates are HTML fragments with mustache-style markers. Compilation
//! parses both layers — the HTML structure and the markers — into one
//! immutable AST; rendering walks that AST against a [`serde_json::Value`]
//! context. There is no runtime string replacement: a template is parsed
//! exactly once, and a parse error is reported with line and column before
//! anything renders.
//!
//! ## Syntax
//!
//! - `{{path.to.field}}` — variable, HTML-escaped on output
//! - `{{{path}}}` (or `{{& path}}`) — variable, inserted verbatim in string
//!   output; DOM output always produces a text node
//! - `{{#name}}…{{/name}}` — section: renders once with the value pushed as
//!   a scope when the value is truthy, or once per item for arrays (`{{.}}`
//!   is the current item)
//! - `{{^name}}…{{/name}}` — inverted section: renders when the value is
//!   falsy or missing
//! - `{{! anything }}` — comment, dropped at compile time
//!
//! Truthiness is JavaScript-like: `null`, `false`, `0`, `""` and `[]` are
//! falsy; everything else (including `{}`) is truthy.
//!
//! ## Example
//!
//! ```
//! use mojo_templates::Template;
//! use serde_json::json;
//!
//! let tpl = Template::compile(
//! 	"<ul>{{#users}}<li data-action=\"open\">{{name}}</li>{{/users}}</ul>",
//! )
//! .unwrap();
//! let html = tpl.render_to_string(&json!({
//! 	"users": [{ "name": "ada" }, { "name": "grace" }]
//! }));
//! assert_eq!(
//! 	html,
//! 	"<ul><li data-action=\"open\">ada</li><li data-action=\"open\">grace</li></ul>"
//! );
//! ```

pub mod ast;
pub mod escape;
mod parser;
mod render;

pub use ast::{Attr, AttrPart, AttrValue, Element, Node, Path, is_void_element};
pub use escape::{escape_html, unescape_html};
pub use render::{FragElement, FragNode, Fragment};

use std::sync::Arc;

use serde_json::Value;
use thiserror::Error;

/// Compile-time template failure, with the source position that caused it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TemplateError {
	/// A `{{` marker was never closed.
	#[error("unclosed marker at line {line}, column {column}")]
	UnclosedMarker {
		/// 1-based source line of the opening `{{`.
		line: u32,
		/// 1-based source column of the opening `{{`.
		column: u32,
	},
	/// A marker was empty or syntactically invalid.
	#[error("malformed marker at line {line}, column {column}")]
	MalformedMarker {
		/// 1-based source line.
		line: u32,
		/// 1-based source column.
		column: u32,
	},
	/// A section close did not match the innermost open section.
	#[error(
		"mismatched section close `{found}` (expected `{expected}`) at line {line}, column {column}"
	)]
	MismatchedSection {
		/// Name the close marker carried.
		found: String,
		/// Name of the innermost open section.
		expected: String,
		/// 1-based source line.
		line: u32,
		/// 1-based source column.
		column: u32,
	},
	/// A section close appeared with no section open.
	#[error("unexpected section close `{name}` at line {line}, column {column}")]
	UnexpectedSectionClose {
		/// Name the close marker carried.
		name: String,
		/// 1-based source line.
		line: u32,
		/// 1-based source column.
		column: u32,
	},
	/// An element close tag did not match the innermost open element.
	#[error("mismatched close tag `</{found}>` (expected `</{expected}>`) at line {line}, column {column}")]
	MismatchedCloseTag {
		/// Tag name of the close tag found.
		found: String,
		/// Tag name of the innermost open element.
		expected: String,
		/// 1-based source line.
		line: u32,
		/// 1-based source column.
		column: u32,
	},
	/// An element close tag appeared with no element open.
	#[error("unexpected close tag `</{tag}>` at line {line}, column {column}")]
	UnexpectedCloseTag {
		/// Tag name of the close tag found.
		tag: String,
		/// 1-based source line.
		line: u32,
		/// 1-based source column.
		column: u32,
	},
	/// An element or comment was still open at the end of the source.
	#[error("unexpected end of template (unclosed `{context}`)")]
	UnexpectedEof {
		/// What was left open: a tag name, a section name, or `comment`.
		context: String,
	},
}

/// A compiled template.
///
/// Cheap to clone — the node list is shared — so a view can hand out a
/// fresh handle on every render.
#[derive(Debug, Clone)]
pub struct Template {
	nodes: Arc<Vec<Node>>,
}

impl Template {
	/// Parses `source` into a template.
	pub fn compile(source: &str) -> Result<Self, TemplateError> {
		let nodes = parser::parse(source)?;
		Ok(Self {
			nodes: Arc::new(nodes),
		})
	}

	/// Renders to an HTML string. Variables are escaped unless marked raw.
	///
	/// Missing variables render as the empty string; rendering itself
	/// cannot fail.
	pub fn render_to_string(&self, ctx: &Value) -> String {
		render::render_string(&self.nodes, ctx)
	}

	/// Renders to a [`Fragment`] node tree for DOM instantiation.
	pub fn render_fragment(&self, ctx: &Value) -> Fragment {
		render::render_fragment(&self.nodes, ctx)
	}

	/// The compiled nodes.
	pub fn nodes(&self) -> &[Node] {
		&self.nodes
	}
}
