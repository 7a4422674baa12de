//! Rendering compiled templates against a JSON context.
//!
//! Two output forms share one scope-resolution core:
//!
//! - a string renderer for SSR and debugging, escaping on the way out;
//! - a [`Fragment`] renderer producing a plain node tree that the view
//!   layer instantiates into its document arena.
//!
//! Lookup follows mustache scoping: the first scope (innermost outward)
//! that defines the leading path segment wins, and the rest of the path is
//! resolved inside it. Missing values render as nothing.

use serde_json::Value;

use crate::ast::{AttrPart, AttrValue, Element, Node, Path};
use crate::escape::escape_html;

/// A rendered node tree, ready for DOM instantiation.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Fragment {
	/// Top-level nodes in document order.
	pub nodes: Vec<FragNode>,
}

/// One rendered node.
#[derive(Debug, Clone, PartialEq)]
pub enum FragNode {
	/// An element with fully evaluated attributes.
	Element(FragElement),
	/// A text node (unescaped; escaping happens at serialization).
	Text(String),
}

/// A rendered element.
#[derive(Debug, Clone, PartialEq)]
pub struct FragElement {
	/// Tag name.
	pub tag: String,
	/// Evaluated attributes in source order.
	pub attrs: Vec<(String, String)>,
	/// Child nodes.
	pub children: Vec<FragNode>,
	/// Void element: serialized without a closing tag.
	pub void: bool,
}

impl Fragment {
	/// Whether the fragment contains no nodes.
	pub fn is_empty(&self) -> bool {
		self.nodes.is_empty()
	}

	/// Serializes the fragment to escaped HTML.
	pub fn to_html(&self) -> String {
		let mut out = String::new();
		for node in &self.nodes {
			write_frag_node(node, &mut out);
		}
		out
	}
}

fn write_frag_node(node: &FragNode, out: &mut String) {
	match node {
		FragNode::Text(text) => out.push_str(&escape_html(text)),
		FragNode::Element(el) => {
			out.push('<');
			out.push_str(&el.tag);
			for (name, value) in &el.attrs {
				out.push(' ');
				out.push_str(name);
				out.push_str("=\"");
				out.push_str(&escape_html(value));
				out.push('"');
			}
			if el.void {
				out.push_str(" />");
			} else {
				out.push('>');
				for child in &el.children {
					write_frag_node(child, out);
				}
				out.push_str("</");
				out.push_str(&el.tag);
				out.push('>');
			}
		}
	}
}

struct Scope<'a> {
	stack: Vec<&'a Value>,
}

impl<'a> Scope<'a> {
	fn root(ctx: &'a Value) -> Self {
		Self { stack: vec![ctx] }
	}

	fn push(&mut self, value: &'a Value) {
		self.stack.push(value);
	}

	fn pop(&mut self) {
		self.stack.pop();
	}

	fn lookup(&self, path: &Path) -> Option<&'a Value> {
		let parts = path.parts();
		if parts.is_empty() {
			return self.stack.last().copied();
		}
		for scope in self.stack.iter().rev() {
			if let Some(mut value) = index(scope, &parts[0]) {
				for part in &parts[1..] {
					match index(value, part) {
						Some(next) => value = next,
						None => return None,
					}
				}
				return Some(value);
			}
		}
		None
	}
}

fn index<'a>(value: &'a Value, key: &str) -> Option<&'a Value> {
	match value {
		Value::Object(map) => map.get(key),
		Value::Array(items) => key.parse::<usize>().ok().and_then(|i| items.get(i)),
		_ => None,
	}
}

/// JavaScript-like truthiness.
pub(crate) fn truthy(value: &Value) -> bool {
	match value {
		Value::Null => false,
		Value::Bool(b) => *b,
		Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(true),
		Value::String(s) => !s.is_empty(),
		Value::Array(items) => !items.is_empty(),
		Value::Object(_) => true,
	}
}

fn value_text(value: &Value) -> String {
	match value {
		Value::Null => String::new(),
		Value::String(s) => s.clone(),
		Value::Bool(b) => b.to_string(),
		Value::Number(n) => n.to_string(),
		other => serde_json::to_string(other).unwrap_or_default(),
	}
}

fn attr_text<'a>(value: &AttrValue, scope: &Scope<'a>) -> String {
	match value {
		AttrValue::Empty => String::new(),
		AttrValue::Static(s) => s.clone(),
		AttrValue::Dynamic(parts) => parts
			.iter()
			.map(|part| match part {
				AttrPart::Text(t) => t.clone(),
				AttrPart::Variable(path) => {
					scope.lookup(path).map(value_text).unwrap_or_default()
				}
			})
			.collect(),
	}
}

pub(crate) fn render_string(nodes: &[Node], ctx: &Value) -> String {
	let mut out = String::new();
	let mut scope = Scope::root(ctx);
	write_nodes(nodes, &mut scope, &mut out);
	out
}

fn write_nodes<'a>(nodes: &[Node], scope: &mut Scope<'a>, out: &mut String) {
	for node in nodes {
		match node {
			Node::Text(text) => out.push_str(&escape_html(text)),
			Node::Variable { path, raw } => {
				let text = scope.lookup(path).map(value_text).unwrap_or_default();
				if *raw {
					out.push_str(&text);
				} else {
					out.push_str(&escape_html(&text));
				}
			}
			Node::Element(el) => write_element(el, scope, out),
			Node::Section {
				path,
				inverted,
				children,
			} => {
				let value = scope.lookup(path);
				if *inverted {
					if !value.map(truthy).unwrap_or(false) {
						write_nodes(children, scope, out);
					}
				} else {
					match value {
						Some(Value::Array(items)) => {
							for item in items {
								scope.push(item);
								write_nodes(children, scope, out);
								scope.pop();
							}
						}
						Some(v) if truthy(v) => {
							scope.push(v);
							write_nodes(children, scope, out);
							scope.pop();
						}
						_ => {}
					}
				}
			}
		}
	}
}

fn write_element<'a>(el: &Element, scope: &mut Scope<'a>, out: &mut String) {
	out.push('<');
	out.push_str(&el.tag);
	for attr in &el.attrs {
		out.push(' ');
		out.push_str(&attr.name);
		if !matches!(attr.value, AttrValue::Empty) {
			out.push_str("=\"");
			out.push_str(&escape_html(&attr_text(&attr.value, scope)));
			out.push('"');
		}
	}
	if el.void {
		out.push_str(" />");
	} else {
		out.push('>');
		write_nodes(&el.children, scope, out);
		out.push_str("</");
		out.push_str(&el.tag);
		out.push('>');
	}
}

pub(crate) fn render_fragment(nodes: &[Node], ctx: &Value) -> Fragment {
	let mut scope = Scope::root(ctx);
	Fragment {
		nodes: build_nodes(nodes, &mut scope),
	}
}

fn build_nodes<'a>(nodes: &[Node], scope: &mut Scope<'a>) -> Vec<FragNode> {
	let mut out = Vec::new();
	for node in nodes {
		match node {
			Node::Text(text) => out.push(FragNode::Text(text.clone())),
			Node::Variable { path, .. } => {
				let text = scope.lookup(path).map(value_text).unwrap_or_default();
				if !text.is_empty() {
					out.push(FragNode::Text(text));
				}
			}
			Node::Element(el) => {
				let attrs = el
					.attrs
					.iter()
					.map(|attr| (attr.name.clone(), attr_text(&attr.value, scope)))
					.collect();
				let children = build_nodes(&el.children, scope);
				out.push(FragNode::Element(FragElement {
					tag: el.tag.clone(),
					attrs,
					children,
					void: el.void,
				}));
			}
			Node::Section {
				path,
				inverted,
				children,
			} => {
				let value = scope.lookup(path);
				if *inverted {
					if !value.map(truthy).unwrap_or(false) {
						out.extend(build_nodes(children, scope));
					}
				} else {
					match value {
						Some(Value::Array(items)) => {
							for item in items {
								scope.push(item);
								out.extend(build_nodes(children, scope));
								scope.pop();
							}
						}
						Some(v) if truthy(v) => {
							scope.push(v);
							out.extend(build_nodes(children, scope));
							scope.pop();
						}
						_ => {}
					}
				}
			}
		}
	}
	out
}
