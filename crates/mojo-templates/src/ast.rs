//! Compiled template AST.
//!
//! The parser produces exactly these nodes; rendering never re-inspects the
//! source text. Everything here is immutable after compilation.

use crate::TemplateError;

/// A dotted lookup path, e.g. `user.address.city`.
///
/// The empty path (written `{{.}}`) resolves to the innermost scope value —
/// the current item inside an array section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Path {
	parts: Vec<String>,
}

impl Path {
	pub(crate) fn this() -> Self {
		Self { parts: Vec::new() }
	}

	pub(crate) fn parse(raw: &str, line: u32, column: u32) -> Result<Self, TemplateError> {
		let raw = raw.trim();
		if raw.is_empty() {
			return Err(TemplateError::MalformedMarker { line, column });
		}
		if raw == "." {
			return Ok(Self::this());
		}
		let parts: Vec<String> = raw.split('.').map(str::to_string).collect();
		if parts.iter().any(|p| p.is_empty()) {
			return Err(TemplateError::MalformedMarker { line, column });
		}
		Ok(Self { parts })
	}

	/// The path segments; empty for `{{.}}`.
	pub fn parts(&self) -> &[String] {
		&self.parts
	}
}

impl std::fmt::Display for Path {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		if self.parts.is_empty() {
			write!(f, ".")
		} else {
			write!(f, "{}", self.parts.join("."))
		}
	}
}

/// One compiled node.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
	/// Literal text (entity-decoded; escaped again on output).
	Text(String),
	/// An HTML element.
	Element(Element),
	/// A variable substitution.
	Variable {
		/// Lookup path.
		path: Path,
		/// Skip escaping in string output.
		raw: bool,
	},
	/// A `{{#…}}` or `{{^…}}` block.
	Section {
		/// Lookup path for the section value.
		path: Path,
		/// `true` for `{{^…}}`.
		inverted: bool,
		/// Nodes rendered when the section applies.
		children: Vec<Node>,
	},
}

/// An HTML element in the AST.
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
	/// Tag name as written.
	pub tag: String,
	/// Attributes in source order.
	pub attrs: Vec<Attr>,
	/// Child nodes; always empty for void elements.
	pub children: Vec<Node>,
	/// Void element (`<br>`, `<input>`, …) or self-closed in the source.
	pub void: bool,
}

/// One attribute.
#[derive(Debug, Clone, PartialEq)]
pub struct Attr {
	/// Attribute name as written.
	pub name: String,
	/// Attribute value.
	pub value: AttrValue,
}

/// An attribute value.
#[derive(Debug, Clone, PartialEq)]
pub enum AttrValue {
	/// Attribute written without a value (`<input disabled>`).
	Empty,
	/// Fixed value with no markers.
	Static(String),
	/// Value interleaving text and `{{…}}` variables.
	Dynamic(Vec<AttrPart>),
}

/// One piece of a dynamic attribute value.
#[derive(Debug, Clone, PartialEq)]
pub enum AttrPart {
	/// Literal text.
	Text(String),
	/// Variable substitution (always escaped on string output).
	Variable(Path),
}

/// Whether `tag` is an HTML void element (no closing tag, no children).
pub fn is_void_element(tag: &str) -> bool {
	matches!(
		tag,
		"area"
			| "base" | "br"
			| "col" | "embed"
			| "hr" | "img"
			| "input" | "link"
			| "meta" | "source"
			| "track" | "wbr"
	)
}
