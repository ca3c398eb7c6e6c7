//! Serializable snapshots of element trees.
//!
//! A snapshot is a plain value copy of an element tree at one point in time,
//! suitable for debugging output or for comparing tree structure in tests.

use indexmap::IndexMap;
use serde::Serialize;

use crate::element::Element;
use crate::node::{AttrValue, Node};

/// A value copy of an element and its subtree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ElementSnapshot {
	/// Lower-cased tag name.
	pub tag: String,
	/// Whether the element is void.
	pub is_void: bool,
	/// Attributes in rendering order.
	pub attributes: IndexMap<String, AttrValue>,
	/// Child nodes, placeholders included.
	pub children: Vec<NodeSnapshot>,
}

/// A value copy of one child node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum NodeSnapshot {
	/// A nested element.
	Element(ElementSnapshot),
	/// Raw text.
	Text(String),
	/// A boolean placeholder.
	Bool(bool),
	/// The absent marker.
	Absent,
}

impl Element {
	/// Takes a snapshot of this element and its subtree.
	///
	/// Building and dropping a snapshot work at any depth. Serializing one
	/// recurses once per level.
	pub fn snapshot(&self) -> ElementSnapshot {
		let mut root = SnapshotFrame::new(self);
		let mut stack: Vec<SnapshotFrame> = Vec::new();

		loop {
			let top = stack.last_mut().unwrap_or(&mut root);
			if let Some(child) = top.advance() {
				stack.push(SnapshotFrame::new(&child));
				continue;
			}
			match stack.pop() {
				Some(done) => {
					let parent = stack.last_mut().unwrap_or(&mut root);
					parent
						.snapshot
						.children
						.push(NodeSnapshot::Element(done.snapshot));
				}
				None => return root.snapshot,
			}
		}
	}
}

/// An element whose snapshot is being filled in.
struct SnapshotFrame {
	element: Element,
	snapshot: ElementSnapshot,
	next: usize,
}

impl SnapshotFrame {
	fn new(element: &Element) -> Self {
		let data = element.data();
		Self {
			element: element.clone(),
			snapshot: ElementSnapshot {
				tag: data.tag.clone(),
				is_void: data.is_void,
				attributes: data.attributes.clone(),
				children: Vec::with_capacity(data.children.len()),
			},
			next: 0,
		}
	}

	/// Copies leaf children up to the next element child and returns it.
	fn advance(&mut self) -> Option<Element> {
		let data = self.element.data();
		while let Some(node) = data.children.get(self.next) {
			self.next += 1;
			match node {
				Node::Element(element) => return Some(element.clone()),
				Node::Text(text) => self.snapshot.children.push(NodeSnapshot::Text(text.clone())),
				Node::Bool(flag) => self.snapshot.children.push(NodeSnapshot::Bool(*flag)),
				Node::Absent => self.snapshot.children.push(NodeSnapshot::Absent),
			}
		}
		None
	}
}

impl Drop for ElementSnapshot {
	fn drop(&mut self) {
		let mut pending = std::mem::take(&mut self.children);
		while let Some(node) = pending.pop() {
			if let NodeSnapshot::Element(mut element) = node {
				pending.append(&mut element.children);
			}
		}
	}
}

impl From<&Node> for NodeSnapshot {
	fn from(node: &Node) -> Self {
		match node {
			Node::Element(element) => NodeSnapshot::Element(element.snapshot()),
			Node::Text(text) => NodeSnapshot::Text(text.clone()),
			Node::Bool(flag) => NodeSnapshot::Bool(*flag),
			Node::Absent => NodeSnapshot::Absent,
		}
	}
}
