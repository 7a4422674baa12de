//! Route patterns and match captures.

use std::collections::HashMap;

use thiserror::Error;

use crate::warn_log;

/// Key under which a wildcard segment's capture is stored in [`Params`].
pub const WILDCARD_KEY: &str = "*";

/// Route pattern parse failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PatternError {
	/// A `*` segment was followed by more segments.
	#[error("wildcard must be the final segment in `{0}`")]
	WildcardNotTerminal(String),
	/// A `:name?` segment was followed by more segments.
	#[error("optional parameter must be the final segment in `{0}`")]
	OptionalNotTerminal(String),
	/// A `:` or `:?` segment without a name.
	#[error("empty parameter name in `{0}`")]
	EmptyParamName(String),
	/// The same parameter name appeared twice.
	#[error("duplicate parameter `{name}` in `{pattern}`")]
	DuplicateParam {
		/// The offending pattern.
		pattern: String,
		/// The repeated name.
		name: String,
	},
	/// A named parameter was missing when reversing a pattern to a URL.
	#[error("missing parameter `{name}` to reverse `{pattern}`")]
	MissingParameter {
		/// The pattern being reversed.
		pattern: String,
		/// The absent parameter.
		name: String,
	},
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
	Literal(String),
	Param(String),
	OptionalParam(String),
	Wildcard,
}

/// A parsed, immutable route pattern.
///
/// Created once at route registration; matching never re-parses the
/// pattern text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutePattern {
	raw: String,
	segments: Vec<Segment>,
}

impl RoutePattern {
	/// Parses a pattern such as `/users/:id`, `/users/:id?`, or `/files/*`.
	pub fn parse(pattern: &str) -> Result<Self, PatternError> {
		let raw = pattern.to_string();
		let mut segments = Vec::new();
		let mut names: Vec<String> = Vec::new();

		let parts: Vec<&str> = pattern
			.trim_matches('/')
			.split('/')
			.filter(|p| !p.is_empty())
			.collect();

		for (i, part) in parts.iter().enumerate() {
			let terminal = i == parts.len() - 1;
			let segment = if *part == "*" {
				if !terminal {
					return Err(PatternError::WildcardNotTerminal(raw));
				}
				Segment::Wildcard
			} else if let Some(name) = part.strip_prefix(':') {
				let (name, optional) = match name.strip_suffix('?') {
					Some(name) => (name, true),
					None => (name, false),
				};
				if name.is_empty() {
					return Err(PatternError::EmptyParamName(raw));
				}
				if optional && !terminal {
					return Err(PatternError::OptionalNotTerminal(raw));
				}
				if names.iter().any(|n| n == name) {
					return Err(PatternError::DuplicateParam {
						pattern: raw,
						name: name.to_string(),
					});
				}
				names.push(name.to_string());
				if optional {
					Segment::OptionalParam(name.to_string())
				} else {
					Segment::Param(name.to_string())
				}
			} else {
				Segment::Literal((*part).to_string())
			};
			segments.push(segment);
		}

		Ok(Self { raw, segments })
	}

	/// The pattern text as registered.
	pub fn pattern(&self) -> &str {
		&self.raw
	}

	/// Whether this pattern is the bare wildcard `*` that matches any path.
	pub fn is_catch_all(&self) -> bool {
		matches!(self.segments.as_slice(), [Segment::Wildcard])
	}

	/// Names of the parameters this pattern captures, in order.
	pub fn param_names(&self) -> Vec<&str> {
		self.segments
			.iter()
			.filter_map(|s| match s {
				Segment::Param(name) | Segment::OptionalParam(name) => Some(name.as_str()),
				Segment::Wildcard => Some(WILDCARD_KEY),
				Segment::Literal(_) => None,
			})
			.collect()
	}

	/// Matches a path (no query string) against this pattern.
	///
	/// Named captures are percent-decoded; a wildcard consumes every
	/// remaining segment as one value under [`WILDCARD_KEY`]. An absent
	/// optional parameter simply has no entry in the result.
	pub fn matches(&self, path: &str) -> Option<Params> {
		let parts: Vec<&str> = path
			.trim_matches('/')
			.split('/')
			.filter(|p| !p.is_empty())
			.collect();

		let mut params = Params::new();
		let mut i = 0;
		for segment in &self.segments {
			match segment {
				Segment::Literal(literal) => {
					let part = parts.get(i)?;
					if decode(part) != *literal {
						return None;
					}
					i += 1;
				}
				Segment::Param(name) => {
					let part = parts.get(i)?;
					params.insert(name, decode(part));
					i += 1;
				}
				Segment::OptionalParam(name) => {
					if let Some(part) = parts.get(i) {
						params.insert(name, decode(part));
						i += 1;
					}
				}
				Segment::Wildcard => {
					let rest: Vec<String> = parts[i..].iter().map(|p| decode(p)).collect();
					params.insert(WILDCARD_KEY, rest.join("/"));
					i = parts.len();
				}
			}
		}

		(i == parts.len()).then_some(params)
	}

	/// Builds a concrete path from this pattern and parameter values.
	///
	/// Optional parameters are omitted when absent; named values are
	/// percent-encoded; a wildcard value is inserted verbatim.
	pub fn reverse(&self, params: &Params) -> Result<String, PatternError> {
		let mut parts: Vec<String> = Vec::with_capacity(self.segments.len());
		for segment in &self.segments {
			match segment {
				Segment::Literal(literal) => parts.push(literal.clone()),
				Segment::Param(name) => {
					let value = params.get(name).ok_or_else(|| PatternError::MissingParameter {
						pattern: self.raw.clone(),
						name: name.clone(),
					})?;
					parts.push(urlencoding::encode(value).into_owned());
				}
				Segment::OptionalParam(name) => {
					if let Some(value) = params.get(name) {
						parts.push(urlencoding::encode(value).into_owned());
					}
				}
				Segment::Wildcard => {
					if let Some(value) = params.get(WILDCARD_KEY) {
						parts.push(value.to_string());
					}
				}
			}
		}
		Ok(format!("/{}", parts.join("/")))
	}
}

fn decode(part: &str) -> String {
	match urlencoding::decode(part) {
		Ok(decoded) => decoded.into_owned(),
		Err(_) => part.to_string(),
	}
}

/// Captured path parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params {
	map: HashMap<String, String>,
}

impl Params {
	/// Creates an empty parameter set.
	pub fn new() -> Self {
		Self::default()
	}

	/// Builds a parameter set from name/value pairs.
	pub fn from_pairs<'a>(pairs: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
		let mut params = Self::new();
		for (name, value) in pairs {
			params.insert(name, value);
		}
		params
	}

	/// Inserts a capture.
	pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
		self.map.insert(name.into(), value.into());
	}

	/// Looks up a capture; `None` for absent optional parameters.
	pub fn get(&self, name: &str) -> Option<&str> {
		self.map.get(name).map(String::as_str)
	}

	/// Whether a capture is present.
	pub fn contains(&self, name: &str) -> bool {
		self.map.contains_key(name)
	}

	/// The wildcard capture, if the pattern had one.
	pub fn wildcard(&self) -> Option<&str> {
		self.get(WILDCARD_KEY)
	}

	/// Number of captures.
	pub fn len(&self) -> usize {
		self.map.len()
	}

	/// Whether there are no captures.
	pub fn is_empty(&self) -> bool {
		self.map.is_empty()
	}

	/// Iterates over name/value pairs (unordered).
	pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
		self.map.iter().map(|(k, v)| (k.as_str(), v.as_str()))
	}
}

/// Parsed query-string pairs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
	map: HashMap<String, String>,
}

impl Query {
	/// Creates an empty query set.
	pub fn new() -> Self {
		Self::default()
	}

	/// Parses a raw query string (`a=1&b=two`). Malformed input is logged
	/// and yields an empty set; later duplicates of a key win.
	pub fn parse(raw: &str) -> Self {
		if raw.is_empty() {
			return Self::new();
		}
		match serde_urlencoded::from_str::<Vec<(String, String)>>(raw) {
			Ok(pairs) => {
				let mut query = Self::new();
				for (key, value) in pairs {
					query.map.insert(key, value);
				}
				query
			}
			Err(err) => {
				warn_log!("malformed query string `{raw}`: {err}");
				Self::new()
			}
		}
	}

	/// Looks up a query value.
	pub fn get(&self, name: &str) -> Option<&str> {
		self.map.get(name).map(String::as_str)
	}

	/// Whether a key is present.
	pub fn contains(&self, name: &str) -> bool {
		self.map.contains_key(name)
	}

	/// Number of pairs.
	pub fn len(&self) -> usize {
		self.map.len()
	}

	/// Whether there are no pairs.
	pub fn is_empty(&self) -> bool {
		self.map.is_empty()
	}

	/// Iterates over key/value pairs (unordered).
	pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
		self.map.iter().map(|(k, v)| (k.as_str(), v.as_str()))
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[test]
	fn test_literal_only_pattern_empty_params() {
		let pattern = RoutePattern::parse("/admin/users").unwrap();
		let params = pattern.matches("/admin/users").unwrap();
		assert!(params.is_empty());
	}

	#[test]
	fn test_root_pattern() {
		let pattern = RoutePattern::parse("/").unwrap();
		assert!(pattern.matches("/").is_some());
		assert!(pattern.matches("").is_some());
		assert!(pattern.matches("/x").is_none());
	}

	#[test]
	fn test_named_param_capture() {
		let pattern = RoutePattern::parse("/users/:id").unwrap();
		let params = pattern.matches("/users/42").unwrap();
		assert_eq!(params.get("id"), Some("42"));
	}

	#[test]
	fn test_named_param_percent_decoded() {
		let pattern = RoutePattern::parse("/tags/:name").unwrap();
		let params = pattern.matches("/tags/caf%C3%A9%20bar").unwrap();
		assert_eq!(params.get("name"), Some("café bar"));
	}

	#[test]
	fn test_optional_param_present_and_absent() {
		let pattern = RoutePattern::parse("/users/:id?").unwrap();

		let params = pattern.matches("/users/42").unwrap();
		assert_eq!(params.get("id"), Some("42"));

		let params = pattern.matches("/users").unwrap();
		assert_eq!(params.get("id"), None);

		assert!(pattern.matches("/users/42/extra").is_none());
	}

	#[test]
	fn test_wildcard_captures_remainder() {
		let pattern = RoutePattern::parse("/files/*").unwrap();
		let params = pattern.matches("/files/a/b/c").unwrap();
		assert_eq!(params.wildcard(), Some("a/b/c"));
	}

	#[test]
	fn test_wildcard_matches_empty_remainder() {
		let pattern = RoutePattern::parse("/files/*").unwrap();
		let params = pattern.matches("/files").unwrap();
		assert_eq!(params.wildcard(), Some(""));
	}

	#[test]
	fn test_catch_all() {
		let pattern = RoutePattern::parse("*").unwrap();
		assert!(pattern.is_catch_all());
		assert!(pattern.matches("/anything/at/all").is_some());
		assert!(pattern.matches("/").is_some());
	}

	#[rstest]
	#[case("/users/:id", "/users")]
	#[case("/users/:id", "/users/1/2")]
	#[case("/a/b", "/a/x")]
	#[case("/a", "/a/b")]
	fn test_non_matches(#[case] pattern: &str, #[case] path: &str) {
		let pattern = RoutePattern::parse(pattern).unwrap();
		assert!(pattern.matches(path).is_none());
	}

	#[test]
	fn test_trailing_slash_insensitive() {
		let pattern = RoutePattern::parse("/users/:id").unwrap();
		assert!(pattern.matches("/users/42/").is_some());
		assert!(pattern.matches("users/42").is_some());
	}

	#[test]
	fn test_wildcard_must_be_terminal() {
		assert_eq!(
			RoutePattern::parse("/files/*/meta"),
			Err(PatternError::WildcardNotTerminal("/files/*/meta".to_string()))
		);
	}

	#[test]
	fn test_optional_must_be_terminal() {
		assert_eq!(
			RoutePattern::parse("/a/:b?/c"),
			Err(PatternError::OptionalNotTerminal("/a/:b?/c".to_string()))
		);
	}

	#[test]
	fn test_empty_param_name_rejected() {
		assert!(RoutePattern::parse("/a/:").is_err());
		assert!(RoutePattern::parse("/a/:?").is_err());
	}

	#[test]
	fn test_duplicate_param_rejected() {
		assert!(matches!(
			RoutePattern::parse("/a/:x/b/:x"),
			Err(PatternError::DuplicateParam { .. })
		));
	}

	#[test]
	fn test_reverse_with_params() {
		let pattern = RoutePattern::parse("/users/:id/posts/:post").unwrap();
		let params = Params::from_pairs([("id", "7"), ("post", "99")]);
		assert_eq!(pattern.reverse(&params).unwrap(), "/users/7/posts/99");
	}

	#[test]
	fn test_reverse_missing_param() {
		let pattern = RoutePattern::parse("/users/:id").unwrap();
		assert!(matches!(
			pattern.reverse(&Params::new()),
			Err(PatternError::MissingParameter { ref name, .. }) if name == "id"
		));
	}

	#[test]
	fn test_reverse_optional_omitted() {
		let pattern = RoutePattern::parse("/users/:id?").unwrap();
		assert_eq!(pattern.reverse(&Params::new()).unwrap(), "/users");
		let params = Params::from_pairs([("id", "3")]);
		assert_eq!(pattern.reverse(&params).unwrap(), "/users/3");
	}

	#[test]
	fn test_reverse_encodes_values() {
		let pattern = RoutePattern::parse("/tags/:name").unwrap();
		let params = Params::from_pairs([("name", "café bar")]);
		assert_eq!(
			pattern.reverse(&params).unwrap(),
			"/tags/caf%C3%A9%20bar"
		);
	}

	#[test]
	fn test_query_parse() {
		let query = Query::parse("a=1&b=two%20words");
		assert_eq!(query.get("a"), Some("1"));
		assert_eq!(query.get("b"), Some("two words"));
		assert_eq!(query.len(), 2);
	}

	#[test]
	fn test_query_parse_empty() {
		assert!(Query::parse("").is_empty());
	}
}
