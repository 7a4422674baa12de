//! Property tests for route pattern matching.

use mojo_pages::router::{Params, RoutePattern};
use proptest::prelude::*;

proptest! {
	/// A literal-only pattern matches its own path with no captures.
	#[test]
	fn literal_pattern_matches_itself_with_empty_params(
		segments in prop::collection::vec("[a-z][a-z0-9]{0,6}", 1..5)
	) {
		let pattern_text = format!("/{}", segments.join("/"));
		let pattern = RoutePattern::parse(&pattern_text).unwrap();
		let params = pattern.matches(&pattern_text).unwrap();
		prop_assert!(params.is_empty());
	}

	/// A named parameter captures whatever single segment appears there.
	#[test]
	fn named_param_captures_segment(value in "[a-zA-Z0-9_-]{1,12}") {
		let pattern = RoutePattern::parse("/users/:id").unwrap();
		let params = pattern.matches(&format!("/users/{value}")).unwrap();
		prop_assert_eq!(params.get("id"), Some(value.as_str()));
	}

	/// A wildcard captures the joined remainder, however many segments.
	#[test]
	fn wildcard_captures_remainder(
		segments in prop::collection::vec("[a-z0-9]{1,6}", 0..5)
	) {
		let pattern = RoutePattern::parse("/files/*").unwrap();
		let path = format!("/files/{}", segments.join("/"));
		let params = pattern.matches(&path).unwrap();
		let joined = segments.join("/");
		prop_assert_eq!(params.wildcard(), Some(joined.as_str()));
	}

	/// Reversing a pattern and matching the result restores the value,
	/// including characters that need percent-encoding.
	#[test]
	fn reverse_then_match_round_trips(value in "[a-z0-9 ]{1,12}") {
		let pattern = RoutePattern::parse("/tags/:name").unwrap();
		let url = pattern
			.reverse(&Params::from_pairs([("name", value.as_str())]))
			.unwrap();
		let params = pattern.matches(&url).unwrap();
		prop_assert_eq!(params.get("name"), Some(value.as_str()));
	}

	/// Extra segments beyond a non-wildcard pattern never match.
	#[test]
	fn extra_segments_do_not_match(
		extra in prop::collection::vec("[a-z0-9]{1,6}", 1..4)
	) {
		let pattern = RoutePattern::parse("/users/:id").unwrap();
		let path = format!("/users/7/{}", extra.join("/"));
		prop_assert!(pattern.matches(&path).is_none());
	}
}
