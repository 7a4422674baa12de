//! HTML escaping.
//!
//! Template text and attribute values are stored decoded in the AST and
//! escaped on every output path, so interpolated data can never break out
//! of its text or attribute position.
//!
//! Escaped characters:
//! - `&` → `&amp;`
//! - `<` → `&lt;`
//! - `>` → `&gt;`
//! - `"` → `&quot;`
//! - `'` → `&#x27;`

use std::borrow::Cow;

/// Escapes HTML special characters.
///
/// Returns the input unchanged (borrowed) when nothing needs escaping.
///
/// # Examples
///
/// ```
/// use mojo_templates::escape_html;
///
/// assert_eq!(escape_html("a < b"), "a &lt; b");
/// assert_eq!(escape_html("plain"), "plain");
/// ```
pub fn escape_html(s: &str) -> Cow<'_, str> {
	let needs_escape = s.contains(['&', '<', '>', '"', '\'']);
	if !needs_escape {
		return Cow::Borrowed(s);
	}

	let mut out = String::with_capacity(s.len() + 8);
	for c in s.chars() {
		match c {
			'&' => out.push_str("&amp;"),
			'<' => out.push_str("&lt;"),
			'>' => out.push_str("&gt;"),
			'"' => out.push_str("&quot;"),
			'\'' => out.push_str("&#x27;"),
			_ => out.push(c),
		}
	}
	Cow::Owned(out)
}

/// Decodes the entities produced by [`escape_html`] (plus `&#39;`).
///
/// Used by the template parser so literal source text round-trips through
/// the escape-on-output model instead of being escaped twice.
pub fn unescape_html(s: &str) -> String {
	if !s.contains('&') {
		return s.to_string();
	}
	s.replace("&lt;", "<")
		.replace("&gt;", ">")
		.replace("&quot;", "\"")
		.replace("&#x27;", "'")
		.replace("&#39;", "'")
		.replace("&amp;", "&")
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_escape_all_specials() {
		assert_eq!(
			escape_html("<a href=\"x\">it's & more</a>"),
			"&lt;a href=&quot;x&quot;&gt;it&#x27;s &amp; more&lt;/a&gt;"
		);
	}

	#[test]
	fn test_escape_borrows_clean_input() {
		assert!(matches!(escape_html("nothing special"), Cow::Borrowed(_)));
	}

	#[test]
	fn test_unescape_round_trip() {
		let original = "<b>\"quoted\" & 'single'</b>";
		assert_eq!(unescape_html(&escape_html(original)), original);
	}

	#[test]
	fn test_unescape_numeric_apostrophe() {
		assert_eq!(unescape_html("it&#39;s"), "it's");
	}
}
