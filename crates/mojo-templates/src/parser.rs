//! Template parser.
//!
//! A single recursive-descent pass over the source handles both layers at
//! once: HTML structure (elements, attributes, comments) and mustache
//! markers. Nesting must be proper across the two layers — a section cannot
//! close an element opened inside it — which is what lets rendering build a
//! well-formed node tree without a second pass.
//!
//! The parser is permissive about stray `<` in text: `<` only starts markup
//! when followed by a letter, `/`, or `!`.

use crate::TemplateError;
use crate::ast::{Attr, AttrPart, AttrValue, Element, Node, Path, is_void_element};
use crate::escape::unescape_html;

pub(crate) fn parse(source: &str) -> Result<Vec<Node>, TemplateError> {
	let mut cur = Cursor::new(source);
	parse_nodes(&mut cur, None)
}

/// What the current `parse_nodes` call is waiting for.
enum Terminator {
	Element(String),
	Section(String),
}

struct Cursor<'a> {
	src: &'a str,
	pos: usize,
	line: u32,
	column: u32,
}

impl<'a> Cursor<'a> {
	fn new(src: &'a str) -> Self {
		Self {
			src,
			pos: 0,
			line: 1,
			column: 1,
		}
	}

	fn rest(&self) -> &'a str {
		&self.src[self.pos..]
	}

	fn at_end(&self) -> bool {
		self.pos >= self.src.len()
	}

	fn starts_with(&self, pat: &str) -> bool {
		self.rest().starts_with(pat)
	}

	fn peek(&self) -> Option<char> {
		self.rest().chars().next()
	}

	fn peek_second(&self) -> Option<char> {
		let mut chars = self.rest().chars();
		chars.next();
		chars.next()
	}

	fn bump(&mut self) -> Option<char> {
		let c = self.peek()?;
		self.pos += c.len_utf8();
		if c == '\n' {
			self.line += 1;
			self.column = 1;
		} else {
			self.column += 1;
		}
		Some(c)
	}

	fn eat(&mut self, pat: &str) -> bool {
		if !self.starts_with(pat) {
			return false;
		}
		for _ in pat.chars() {
			self.bump();
		}
		true
	}

	/// Consumes text up to `pat`, then consumes `pat` itself.
	fn take_until(&mut self, pat: &str) -> Option<String> {
		let idx = self.rest().find(pat)?;
		let target = self.pos + idx;
		let mut out = String::with_capacity(idx);
		while self.pos < target {
			match self.bump() {
				Some(c) => out.push(c),
				None => break,
			}
		}
		self.eat(pat);
		Some(out)
	}

	fn skip_ws(&mut self) {
		while self.peek().is_some_and(|c| c.is_whitespace()) {
			self.bump();
		}
	}

	fn mark(&self) -> (u32, u32) {
		(self.line, self.column)
	}
}

fn parse_nodes(
	cur: &mut Cursor<'_>,
	terminator: Option<&Terminator>,
) -> Result<Vec<Node>, TemplateError> {
	let mut nodes = Vec::new();

	loop {
		if cur.at_end() {
			return match terminator {
				None => Ok(nodes),
				Some(Terminator::Element(tag)) => Err(TemplateError::UnexpectedEof {
					context: format!("<{tag}>"),
				}),
				Some(Terminator::Section(name)) => Err(TemplateError::UnexpectedEof {
					context: format!("#{name}"),
				}),
			};
		}

		if cur.starts_with("{{") {
			let (line, column) = cur.mark();

			if cur.eat("{{/") {
				let body = cur
					.take_until("}}")
					.ok_or(TemplateError::UnclosedMarker { line, column })?;
				let name = body.trim().to_string();
				return match terminator {
					Some(Terminator::Section(expected)) if *expected == name => Ok(nodes),
					Some(Terminator::Section(expected)) => {
						Err(TemplateError::MismatchedSection {
							found: name,
							expected: expected.clone(),
							line,
							column,
						})
					}
					_ => Err(TemplateError::UnexpectedSectionClose { name, line, column }),
				};
			}

			if let Some(node) = parse_marker(cur, line, column)? {
				nodes.push(node);
			}
			continue;
		}

		if cur.starts_with("</") {
			let (line, column) = cur.mark();
			cur.eat("</");
			let body = cur.take_until(">").ok_or(TemplateError::UnexpectedEof {
				context: "close tag".to_string(),
			})?;
			let name = body.trim().to_string();
			return match terminator {
				Some(Terminator::Element(expected)) if *expected == name => Ok(nodes),
				Some(Terminator::Element(expected)) => Err(TemplateError::MismatchedCloseTag {
					found: name,
					expected: expected.clone(),
					line,
					column,
				}),
				_ => Err(TemplateError::UnexpectedCloseTag {
					tag: name,
					line,
					column,
				}),
			};
		}

		if cur.starts_with("<!--") {
			cur.eat("<!--");
			if cur.take_until("-->").is_none() {
				return Err(TemplateError::UnexpectedEof {
					context: "comment".to_string(),
				});
			}
			continue;
		}

		if cur.peek() == Some('<') && cur.peek_second().is_some_and(|c| c.is_ascii_alphabetic()) {
			nodes.push(parse_element(cur)?);
			continue;
		}

		let mut text = String::new();
		while !cur.at_end() && !cur.starts_with("{{") {
			if cur.peek() == Some('<')
				&& cur
					.peek_second()
					.is_some_and(|c| c.is_ascii_alphabetic() || c == '/' || c == '!')
			{
				break;
			}
			match cur.bump() {
				Some(c) => text.push(c),
				None => break,
			}
		}
		if !text.is_empty() {
			nodes.push(Node::Text(unescape_html(&text)));
		}
	}
}

/// Parses one non-closing marker. The cursor sits on `{{`. Comments yield
/// `None`.
fn parse_marker(
	cur: &mut Cursor<'_>,
	line: u32,
	column: u32,
) -> Result<Option<Node>, TemplateError> {
	if cur.eat("{{{") {
		let body = cur
			.take_until("}}}")
			.ok_or(TemplateError::UnclosedMarker { line, column })?;
		let path = Path::parse(&body, line, column)?;
		return Ok(Some(Node::Variable { path, raw: true }));
	}

	cur.eat("{{");

	if cur.eat("!") {
		cur.take_until("}}")
			.ok_or(TemplateError::UnclosedMarker { line, column })?;
		return Ok(None);
	}

	if cur.eat("&") {
		let body = cur
			.take_until("}}")
			.ok_or(TemplateError::UnclosedMarker { line, column })?;
		let path = Path::parse(&body, line, column)?;
		return Ok(Some(Node::Variable { path, raw: true }));
	}

	let inverted = if cur.eat("#") {
		false
	} else if cur.eat("^") {
		true
	} else {
		let body = cur
			.take_until("}}")
			.ok_or(TemplateError::UnclosedMarker { line, column })?;
		let path = Path::parse(&body, line, column)?;
		return Ok(Some(Node::Variable { path, raw: false }));
	};

	let body = cur
		.take_until("}}")
		.ok_or(TemplateError::UnclosedMarker { line, column })?;
	let path = Path::parse(&body, line, column)?;
	let name = body.trim().to_string();
	let children = parse_nodes(cur, Some(&Terminator::Section(name)))?;
	Ok(Some(Node::Section {
		path,
		inverted,
		children,
	}))
}

fn parse_element(cur: &mut Cursor<'_>) -> Result<Node, TemplateError> {
	let (line, column) = cur.mark();
	cur.eat("<");

	let mut tag = String::new();
	while cur
		.peek()
		.is_some_and(|c| c.is_ascii_alphanumeric() || c == '-')
	{
		match cur.bump() {
			Some(c) => tag.push(c),
			None => break,
		}
	}
	if tag.is_empty() {
		return Err(TemplateError::MalformedMarker { line, column });
	}

	let mut attrs = Vec::new();
	let mut self_closing = false;
	loop {
		cur.skip_ws();
		if cur.eat("/>") {
			self_closing = true;
			break;
		}
		if cur.eat(">") {
			break;
		}
		if cur.at_end() {
			return Err(TemplateError::UnexpectedEof {
				context: format!("<{tag}>"),
			});
		}
		attrs.push(parse_attr(cur)?);
	}

	let void = self_closing || is_void_element(&tag);
	let children = if void {
		Vec::new()
	} else {
		parse_nodes(cur, Some(&Terminator::Element(tag.clone())))?
	};

	Ok(Node::Element(Element {
		tag,
		attrs,
		children,
		void,
	}))
}

fn parse_attr(cur: &mut Cursor<'_>) -> Result<Attr, TemplateError> {
	let (line, column) = cur.mark();

	let mut name = String::new();
	while cur
		.peek()
		.is_some_and(|c| !c.is_whitespace() && c != '=' && c != '>' && c != '/')
	{
		match cur.bump() {
			Some(c) => name.push(c),
			None => break,
		}
	}
	if name.is_empty() {
		return Err(TemplateError::MalformedMarker { line, column });
	}

	cur.skip_ws();
	if !cur.eat("=") {
		return Ok(Attr {
			name,
			value: AttrValue::Empty,
		});
	}
	cur.skip_ws();

	let raw = if cur.eat("\"") {
		cur.take_until("\"").ok_or(TemplateError::UnexpectedEof {
			context: format!("attribute `{name}`"),
		})?
	} else if cur.eat("'") {
		cur.take_until("'").ok_or(TemplateError::UnexpectedEof {
			context: format!("attribute `{name}`"),
		})?
	} else {
		let mut value = String::new();
		while cur.peek().is_some_and(|c| !c.is_whitespace() && c != '>') {
			match cur.bump() {
				Some(c) => value.push(c),
				None => break,
			}
		}
		value
	};

	let value = parse_attr_value(&raw, line, column)?;
	Ok(Attr { name, value })
}

fn parse_attr_value(raw: &str, line: u32, column: u32) -> Result<AttrValue, TemplateError> {
	if !raw.contains("{{") {
		return Ok(AttrValue::Static(unescape_html(raw)));
	}

	let mut parts = Vec::new();
	let mut rest = raw;
	while let Some(start) = rest.find("{{") {
		if start > 0 {
			parts.push(AttrPart::Text(unescape_html(&rest[..start])));
		}
		rest = &rest[start + 2..];
		let Some(end) = rest.find("}}") else {
			return Err(TemplateError::UnclosedMarker { line, column });
		};
		let path = Path::parse(&rest[..end], line, column)?;
		parts.push(AttrPart::Variable(path));
		rest = &rest[end + 2..];
	}
	if !rest.is_empty() {
		parts.push(AttrPart::Text(unescape_html(rest)));
	}
	Ok(AttrValue::Dynamic(parts))
}

#[cfg(test)]
mod tests {
	use super::*;

	fn compile(src: &str) -> Vec<Node> {
		parse(src).unwrap()
	}

	#[test]
	fn test_text_only() {
		let nodes = compile("just text");
		assert_eq!(nodes, vec![Node::Text("just text".to_string())]);
	}

	#[test]
	fn test_stray_angle_bracket_is_text() {
		let nodes = compile("a < b");
		assert_eq!(nodes, vec![Node::Text("a < b".to_string())]);
	}

	#[test]
	fn test_entities_decoded_in_text() {
		let nodes = compile("a &amp; b");
		assert_eq!(nodes, vec![Node::Text("a & b".to_string())]);
	}

	#[test]
	fn test_variable_marker() {
		let nodes = compile("{{user.name}}");
		match &nodes[0] {
			Node::Variable { path, raw } => {
				assert_eq!(path.parts(), ["user", "name"]);
				assert!(!raw);
			}
			other => panic!("expected variable, got {other:?}"),
		}
	}

	#[test]
	fn test_raw_variable_markers() {
		for src in ["{{{body}}}", "{{& body}}"] {
			let nodes = compile(src);
			match &nodes[0] {
				Node::Variable { raw, .. } => assert!(*raw, "{src} should be raw"),
				other => panic!("expected variable, got {other:?}"),
			}
		}
	}

	#[test]
	fn test_comment_dropped() {
		let nodes = compile("a{{! ignore me }}b");
		assert_eq!(
			nodes,
			vec![Node::Text("a".to_string()), Node::Text("b".to_string())]
		);
	}

	#[test]
	fn test_html_comment_dropped() {
		let nodes = compile("a<!-- note -->b");
		assert_eq!(
			nodes,
			vec![Node::Text("a".to_string()), Node::Text("b".to_string())]
		);
	}

	#[test]
	fn test_section_nesting() {
		let nodes = compile("{{#outer}}x{{#inner}}y{{/inner}}{{/outer}}");
		match &nodes[0] {
			Node::Section {
				inverted, children, ..
			} => {
				assert!(!inverted);
				assert_eq!(children.len(), 2);
				assert!(matches!(children[1], Node::Section { .. }));
			}
			other => panic!("expected section, got {other:?}"),
		}
	}

	#[test]
	fn test_inverted_section() {
		let nodes = compile("{{^missing}}fallback{{/missing}}");
		assert!(matches!(nodes[0], Node::Section { inverted: true, .. }));
	}

	#[test]
	fn test_mismatched_section_close() {
		let err = parse("{{#a}}x{{/b}}").unwrap_err();
		assert!(matches!(
			err,
			TemplateError::MismatchedSection { ref found, ref expected, .. }
				if found == "b" && expected == "a"
		));
	}

	#[test]
	fn test_unexpected_section_close() {
		let err = parse("x{{/a}}").unwrap_err();
		assert!(matches!(err, TemplateError::UnexpectedSectionClose { .. }));
	}

	#[test]
	fn test_element_with_attrs() {
		let nodes = compile("<a class=\"btn\" href='/users' disabled>go</a>");
		match &nodes[0] {
			Node::Element(el) => {
				assert_eq!(el.tag, "a");
				assert_eq!(el.attrs.len(), 3);
				assert_eq!(
					el.attrs[0].value,
					AttrValue::Static("btn".to_string())
				);
				assert_eq!(el.attrs[2].value, AttrValue::Empty);
				assert_eq!(el.children, vec![Node::Text("go".to_string())]);
			}
			other => panic!("expected element, got {other:?}"),
		}
	}

	#[test]
	fn test_dynamic_attr_value() {
		let nodes = compile("<a href=\"/users/{{id}}\">x</a>");
		match &nodes[0] {
			Node::Element(el) => match &el.attrs[0].value {
				AttrValue::Dynamic(parts) => {
					assert_eq!(parts.len(), 2);
					assert_eq!(parts[0], AttrPart::Text("/users/".to_string()));
					assert!(matches!(parts[1], AttrPart::Variable(_)));
				}
				other => panic!("expected dynamic value, got {other:?}"),
			},
			other => panic!("expected element, got {other:?}"),
		}
	}

	#[test]
	fn test_json_attr_value_stays_static() {
		let nodes = compile(r#"<button data-params='{"id": 7}'>x</button>"#);
		match &nodes[0] {
			Node::Element(el) => {
				assert_eq!(
					el.attrs[0].value,
					AttrValue::Static(r#"{"id": 7}"#.to_string())
				);
			}
			other => panic!("expected element, got {other:?}"),
		}
	}

	#[test]
	fn test_void_elements_take_no_children() {
		let nodes = compile("<input name=\"q\"><span>after</span>");
		assert_eq!(nodes.len(), 2);
		match &nodes[0] {
			Node::Element(el) => {
				assert!(el.void);
				assert!(el.children.is_empty());
			}
			other => panic!("expected element, got {other:?}"),
		}
	}

	#[test]
	fn test_self_closing_element() {
		let nodes = compile("<widget-slot />");
		match &nodes[0] {
			Node::Element(el) => {
				assert_eq!(el.tag, "widget-slot");
				assert!(el.void);
			}
			other => panic!("expected element, got {other:?}"),
		}
	}

	#[test]
	fn test_mismatched_close_tag() {
		let err = parse("<div><span></div></span>").unwrap_err();
		assert!(matches!(
			err,
			TemplateError::MismatchedCloseTag { ref found, ref expected, .. }
				if found == "div" && expected == "span"
		));
	}

	#[test]
	fn test_unclosed_element_reports_tag() {
		let err = parse("<div>never closed").unwrap_err();
		assert_eq!(
			err,
			TemplateError::UnexpectedEof {
				context: "<div>".to_string()
			}
		);
	}

	#[test]
	fn test_section_cannot_close_across_element() {
		let err = parse("<div>{{#s}}</div>{{/s}}").unwrap_err();
		assert!(matches!(err, TemplateError::UnexpectedCloseTag { .. }));
	}

	#[test]
	fn test_marker_position_tracks_lines() {
		let err = parse("ok\nok\n   {{nope").unwrap_err();
		assert_eq!(
			err,
			TemplateError::UnclosedMarker { line: 3, column: 4 }
		);
	}
}
