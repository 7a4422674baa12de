//! The [`Document`] arena and its nodes.

use mojo_templates::{FragNode, Fragment, escape_html, is_void_element};
use thiserror::Error;

/// Generational handle to a node in a [`Document`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId {
	index: u32,
	generation: u32,
}

impl NodeId {
	/// Serializes the id for embedding in markup (`data-mojo` stamps).
	pub fn to_token(self) -> String {
		format!("{}.{}", self.index, self.generation)
	}

	/// Parses a token produced by [`to_token`](NodeId::to_token).
	pub fn from_token(token: &str) -> Option<Self> {
		let (index, generation) = token.split_once('.')?;
		Some(Self {
			index: index.parse().ok()?,
			generation: generation.parse().ok()?,
		})
	}
}

/// Element or text payload of a node.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
	/// An element with a tag and attributes in insertion order.
	Element {
		/// Tag name.
		tag: String,
		/// Attributes in insertion order; names unique.
		attrs: Vec<(String, String)>,
	},
	/// A text node.
	Text(String),
}

/// One live node.
#[derive(Debug)]
pub struct Node {
	kind: NodeKind,
	parent: Option<NodeId>,
	children: Vec<NodeId>,
}

impl Node {
	/// The node payload.
	pub fn kind(&self) -> &NodeKind {
		&self.kind
	}

	/// Parent node, if attached.
	pub fn parent(&self) -> Option<NodeId> {
		self.parent
	}

	/// Child ids in document order.
	pub fn children(&self) -> &[NodeId] {
		&self.children
	}

	/// Tag name, for element nodes.
	pub fn tag(&self) -> Option<&str> {
		match &self.kind {
			NodeKind::Element { tag, .. } => Some(tag),
			NodeKind::Text(_) => None,
		}
	}

	/// Attribute value, for element nodes.
	pub fn attr(&self, name: &str) -> Option<&str> {
		match &self.kind {
			NodeKind::Element { attrs, .. } => attrs
				.iter()
				.find(|(n, _)| n == name)
				.map(|(_, v)| v.as_str()),
			NodeKind::Text(_) => None,
		}
	}

	/// Text content, for text nodes.
	pub fn text(&self) -> Option<&str> {
		match &self.kind {
			NodeKind::Text(text) => Some(text),
			NodeKind::Element { .. } => None,
		}
	}

	/// Whether this is an element node.
	pub fn is_element(&self) -> bool {
		matches!(self.kind, NodeKind::Element { .. })
	}
}

/// Arena document failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DomError {
	/// The id refers to a freed or never-allocated node.
	#[error("stale node id")]
	Stale,
	/// The operation requires an element node.
	#[error("node is not an element")]
	NotAnElement,
	/// Appending would make a node its own ancestor.
	#[error("append would create a cycle")]
	WouldCycle,
}

struct Slot {
	generation: u32,
	node: Option<Node>,
}

/// The node arena.
#[derive(Default)]
pub struct Document {
	slots: Vec<Slot>,
	free: Vec<u32>,
}

impl Document {
	/// Creates an empty document.
	pub fn new() -> Self {
		Self::default()
	}

	fn alloc(&mut self, node: Node) -> NodeId {
		if let Some(index) = self.free.pop() {
			let slot = &mut self.slots[index as usize];
			slot.node = Some(node);
			NodeId {
				index,
				generation: slot.generation,
			}
		} else {
			self.slots.push(Slot {
				generation: 0,
				node: Some(node),
			});
			NodeId {
				index: (self.slots.len() - 1) as u32,
				generation: 0,
			}
		}
	}

	/// Creates a detached element node.
	pub fn create_element(&mut self, tag: impl Into<String>) -> NodeId {
		self.alloc(Node {
			kind: NodeKind::Element {
				tag: tag.into(),
				attrs: Vec::new(),
			},
			parent: None,
			children: Vec::new(),
		})
	}

	/// Creates a detached text node.
	pub fn create_text(&mut self, text: impl Into<String>) -> NodeId {
		self.alloc(Node {
			kind: NodeKind::Text(text.into()),
			parent: None,
			children: Vec::new(),
		})
	}

	/// Resolves an id, rejecting stale generations.
	pub fn get(&self, id: NodeId) -> Option<&Node> {
		let slot = self.slots.get(id.index as usize)?;
		if slot.generation != id.generation {
			return None;
		}
		slot.node.as_ref()
	}

	fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
		let slot = self.slots.get_mut(id.index as usize)?;
		if slot.generation != id.generation {
			return None;
		}
		slot.node.as_mut()
	}

	/// Whether the id resolves to a live node.
	pub fn contains(&self, id: NodeId) -> bool {
		self.get(id).is_some()
	}

	/// Number of live nodes.
	pub fn len(&self) -> usize {
		self.slots.iter().filter(|s| s.node.is_some()).count()
	}

	/// Whether the document holds no live nodes.
	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}

	/// Appends `child` under `parent`, detaching it from any previous
	/// parent first.
	pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), DomError> {
		let parent_node = self.get(parent).ok_or(DomError::Stale)?;
		if !parent_node.is_element() {
			return Err(DomError::NotAnElement);
		}
		if !self.contains(child) {
			return Err(DomError::Stale);
		}

		let mut cursor = Some(parent);
		while let Some(node) = cursor {
			if node == child {
				return Err(DomError::WouldCycle);
			}
			cursor = self.get(node).and_then(Node::parent);
		}

		self.detach(child)?;
		if let Some(node) = self.get_mut(parent) {
			node.children.push(child);
		}
		if let Some(node) = self.get_mut(child) {
			node.parent = Some(parent);
		}
		Ok(())
	}

	/// Unlinks a node from its parent without freeing it.
	pub fn detach(&mut self, id: NodeId) -> Result<(), DomError> {
		let parent = self.get(id).ok_or(DomError::Stale)?.parent;
		if let Some(parent) = parent {
			if let Some(node) = self.get_mut(parent) {
				node.children.retain(|c| *c != id);
			}
		}
		if let Some(node) = self.get_mut(id) {
			node.parent = None;
		}
		Ok(())
	}

	/// Detaches a node and frees its whole subtree.
	pub fn remove(&mut self, id: NodeId) -> Result<(), DomError> {
		self.detach(id)?;
		self.free_subtree(id);
		Ok(())
	}

	/// Frees every child of `id`, leaving the node itself in place.
	pub fn clear_children(&mut self, id: NodeId) -> Result<(), DomError> {
		let children = self.get(id).ok_or(DomError::Stale)?.children.clone();
		for child in children {
			self.free_subtree(child);
		}
		if let Some(node) = self.get_mut(id) {
			node.children.clear();
		}
		Ok(())
	}

	fn free_subtree(&mut self, id: NodeId) {
		let Some(node) = self.get(id) else {
			return;
		};
		let children = node.children.clone();
		for child in children {
			self.free_subtree(child);
		}
		if let Some(slot) = self.slots.get_mut(id.index as usize) {
			if slot.generation == id.generation && slot.node.is_some() {
				slot.node = None;
				slot.generation += 1;
				self.free.push(id.index);
			}
		}
	}

	/// Sets (or replaces) an attribute on an element node.
	pub fn set_attribute(
		&mut self,
		id: NodeId,
		name: impl Into<String>,
		value: impl Into<String>,
	) -> Result<(), DomError> {
		let node = self.get_mut(id).ok_or(DomError::Stale)?;
		match &mut node.kind {
			NodeKind::Element { attrs, .. } => {
				let name = name.into();
				let value = value.into();
				match attrs.iter_mut().find(|(n, _)| *n == name) {
					Some(entry) => entry.1 = value,
					None => attrs.push((name, value)),
				}
				Ok(())
			}
			NodeKind::Text(_) => Err(DomError::NotAnElement),
		}
	}

	/// Reads an attribute from an element node.
	pub fn attribute(&self, id: NodeId, name: &str) -> Option<&str> {
		self.get(id).and_then(|node| node.attr(name))
	}

	/// Replaces the content of a text node.
	pub fn set_text(&mut self, id: NodeId, text: impl Into<String>) -> Result<(), DomError> {
		let node = self.get_mut(id).ok_or(DomError::Stale)?;
		match &mut node.kind {
			NodeKind::Text(current) => {
				*current = text.into();
				Ok(())
			}
			NodeKind::Element { .. } => Err(DomError::NotAnElement),
		}
	}

	/// Parent of a node.
	pub fn parent(&self, id: NodeId) -> Option<NodeId> {
		self.get(id).and_then(Node::parent)
	}

	/// Children of a node, empty when the id is stale.
	pub fn children(&self, id: NodeId) -> &[NodeId] {
		self.get(id).map(Node::children).unwrap_or(&[])
	}

	/// Walks from `from` towards the root and returns the first node
	/// (including `from` itself) satisfying `pred`.
	pub fn closest(&self, from: NodeId, pred: impl Fn(&Node) -> bool) -> Option<NodeId> {
		let mut cursor = Some(from);
		while let Some(id) = cursor {
			let node = self.get(id)?;
			if pred(node) {
				return Some(id);
			}
			cursor = node.parent();
		}
		None
	}

	/// Depth-first search below `root` (inclusive) for an element with the
	/// given `id` attribute.
	pub fn find_by_id(&self, root: NodeId, id_value: &str) -> Option<NodeId> {
		self.find_by_attr(root, "id", id_value)
	}

	/// Depth-first search below `root` (inclusive) for an element carrying
	/// `name="value"`.
	pub fn find_by_attr(&self, root: NodeId, name: &str, value: &str) -> Option<NodeId> {
		let node = self.get(root)?;
		if node.attr(name) == Some(value) {
			return Some(root);
		}
		for child in node.children() {
			if let Some(found) = self.find_by_attr(*child, name, value) {
				return Some(found);
			}
		}
		None
	}

	/// Builds arena nodes from a rendered template fragment, appending the
	/// top-level nodes under `parent`. Returns the created top-level ids.
	pub fn instantiate(
		&mut self,
		fragment: &Fragment,
		parent: NodeId,
	) -> Result<Vec<NodeId>, DomError> {
		let mut created = Vec::with_capacity(fragment.nodes.len());
		for node in &fragment.nodes {
			created.push(self.instantiate_node(node, parent)?);
		}
		Ok(created)
	}

	fn instantiate_node(&mut self, node: &FragNode, parent: NodeId) -> Result<NodeId, DomError> {
		match node {
			FragNode::Text(text) => {
				let id = self.create_text(text.clone());
				self.append_child(parent, id)?;
				Ok(id)
			}
			FragNode::Element(el) => {
				let id = self.alloc(Node {
					kind: NodeKind::Element {
						tag: el.tag.clone(),
						attrs: el.attrs.clone(),
					},
					parent: None,
					children: Vec::new(),
				});
				self.append_child(parent, id)?;
				for child in &el.children {
					self.instantiate_node(child, id)?;
				}
				Ok(id)
			}
		}
	}

	/// Serializes the subtree rooted at `id` to escaped HTML.
	pub fn render_to_string(&self, id: NodeId) -> String {
		let mut out = String::new();
		self.write_node(id, false, &mut out);
		out
	}

	/// Serializes like [`render_to_string`](Document::render_to_string),
	/// stamping each element with a `data-mojo` token so browser events can
	/// be mapped back to arena nodes.
	pub fn render_annotated(&self, id: NodeId) -> String {
		let mut out = String::new();
		self.write_node(id, true, &mut out);
		out
	}

	fn write_node(&self, id: NodeId, annotate: bool, out: &mut String) {
		let Some(node) = self.get(id) else {
			return;
		};
		match &node.kind {
			NodeKind::Text(text) => out.push_str(&escape_html(text)),
			NodeKind::Element { tag, attrs } => {
				out.push('<');
				out.push_str(tag);
				for (name, value) in attrs {
					out.push(' ');
					out.push_str(name);
					out.push_str("=\"");
					out.push_str(&escape_html(value));
					out.push('"');
				}
				if annotate {
					out.push_str(" data-mojo=\"");
					out.push_str(&id.to_token());
					out.push('"');
				}
				if is_void_element(tag) && node.children.is_empty() {
					out.push_str(" />");
				} else {
					out.push('>');
					for child in &node.children {
						self.write_node(*child, annotate, out);
					}
					out.push_str("</");
					out.push_str(tag);
					out.push('>');
				}
			}
		}
	}
}

impl std::fmt::Debug for Document {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Document")
			.field("live_nodes", &self.len())
			.field("free_slots", &self.free.len())
			.finish()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use mojo_templates::Template;
	use serde_json::json;

	#[test]
	fn test_create_and_append() {
		let mut doc = Document::new();
		let root = doc.create_element("div");
		let text = doc.create_text("hi");
		doc.append_child(root, text).unwrap();

		assert_eq!(doc.children(root), &[text]);
		assert_eq!(doc.parent(text), Some(root));
		assert_eq!(doc.render_to_string(root), "<div>hi</div>");
	}

	#[test]
	fn test_append_to_text_node_fails() {
		let mut doc = Document::new();
		let text = doc.create_text("hi");
		let child = doc.create_text("nope");
		assert_eq!(doc.append_child(text, child), Err(DomError::NotAnElement));
	}

	#[test]
	fn test_append_reparents() {
		let mut doc = Document::new();
		let a = doc.create_element("div");
		let b = doc.create_element("div");
		let child = doc.create_text("x");

		doc.append_child(a, child).unwrap();
		doc.append_child(b, child).unwrap();

		assert!(doc.children(a).is_empty());
		assert_eq!(doc.children(b), &[child]);
	}

	#[test]
	fn test_append_rejects_cycle() {
		let mut doc = Document::new();
		let outer = doc.create_element("div");
		let inner = doc.create_element("span");
		doc.append_child(outer, inner).unwrap();

		assert_eq!(doc.append_child(inner, outer), Err(DomError::WouldCycle));
	}

	#[test]
	fn test_remove_frees_subtree_and_invalidates_ids() {
		let mut doc = Document::new();
		let root = doc.create_element("div");
		let child = doc.create_element("span");
		let grandchild = doc.create_text("x");
		doc.append_child(root, child).unwrap();
		doc.append_child(child, grandchild).unwrap();

		doc.remove(child).unwrap();

		assert!(doc.contains(root));
		assert!(!doc.contains(child));
		assert!(!doc.contains(grandchild));
		assert!(doc.children(root).is_empty());
	}

	#[test]
	fn test_freed_slot_reuse_does_not_resurrect_old_id() {
		let mut doc = Document::new();
		let stale = doc.create_text("old");
		doc.remove(stale).unwrap();

		let fresh = doc.create_text("new");
		assert!(!doc.contains(stale));
		assert!(doc.contains(fresh));
		assert_eq!(doc.get(fresh).and_then(Node::text), Some("new"));
	}

	#[test]
	fn test_clear_children_keeps_node() {
		let mut doc = Document::new();
		let root = doc.create_element("div");
		let a = doc.create_text("a");
		let b = doc.create_text("b");
		doc.append_child(root, a).unwrap();
		doc.append_child(root, b).unwrap();

		doc.clear_children(root).unwrap();

		assert!(doc.contains(root));
		assert!(!doc.contains(a));
		assert!(!doc.contains(b));
		assert_eq!(doc.render_to_string(root), "<div></div>");
	}

	#[test]
	fn test_set_attribute_upserts() {
		let mut doc = Document::new();
		let el = doc.create_element("a");
		doc.set_attribute(el, "href", "/old").unwrap();
		doc.set_attribute(el, "href", "/new").unwrap();
		doc.set_attribute(el, "class", "link").unwrap();

		assert_eq!(doc.attribute(el, "href"), Some("/new"));
		assert_eq!(
			doc.render_to_string(el),
			"<a href=\"/new\" class=\"link\"></a>"
		);
	}

	#[test]
	fn test_closest_walks_ancestors() {
		let mut doc = Document::new();
		let root = doc.create_element("div");
		doc.set_attribute(root, "data-action", "save").unwrap();
		let middle = doc.create_element("span");
		let leaf = doc.create_text("x");
		doc.append_child(root, middle).unwrap();
		doc.append_child(middle, leaf).unwrap();

		let found = doc.closest(leaf, |n| n.attr("data-action").is_some());
		assert_eq!(found, Some(root));
	}

	#[test]
	fn test_find_by_id_depth_first() {
		let mut doc = Document::new();
		let root = doc.create_element("div");
		let inner = doc.create_element("section");
		doc.set_attribute(inner, "id", "sidebar").unwrap();
		doc.append_child(root, inner).unwrap();

		assert_eq!(doc.find_by_id(root, "sidebar"), Some(inner));
		assert_eq!(doc.find_by_id(root, "missing"), None);
	}

	#[test]
	fn test_instantiate_fragment() {
		let mut doc = Document::new();
		let root = doc.create_element("div");

		let tpl = Template::compile("<ul>{{#xs}}<li>{{.}}</li>{{/xs}}</ul>").unwrap();
		let frag = tpl.render_fragment(&json!({ "xs": ["a", "b"] }));
		let created = doc.instantiate(&frag, root).unwrap();

		assert_eq!(created.len(), 1);
		assert_eq!(
			doc.render_to_string(root),
			"<div><ul><li>a</li><li>b</li></ul></div>"
		);
	}

	#[test]
	fn test_serialization_escapes_text_and_attrs() {
		let mut doc = Document::new();
		let el = doc.create_element("p");
		doc.set_attribute(el, "title", "a \"b\"").unwrap();
		let text = doc.create_text("1 < 2");
		doc.append_child(el, text).unwrap();

		assert_eq!(
			doc.render_to_string(el),
			"<p title=\"a &quot;b&quot;\">1 &lt; 2</p>"
		);
	}

	#[test]
	fn test_render_annotated_stamps_tokens() {
		let mut doc = Document::new();
		let el = doc.create_element("div");
		let html = doc.render_annotated(el);
		assert!(html.contains(&format!("data-mojo=\"{}\"", el.to_token())));
	}

	#[test]
	fn test_node_token_round_trip() {
		let mut doc = Document::new();
		let el = doc.create_element("div");
		let token = el.to_token();
		assert_eq!(NodeId::from_token(&token), Some(el));
		assert_eq!(NodeId::from_token("garbage"), None);
	}
}
