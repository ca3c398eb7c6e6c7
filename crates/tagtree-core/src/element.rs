//! The element object model.
//!
//! An [`Element`] is a shared handle to one mutable node of the markup tree.
//! Cloning the handle does not copy the node: every clone sees (and makes)
//! the same changes. This is what lets a partially built element act as a
//! reusable component:
//!
//! ```
//! use tagtree_core::create;
//!
//! let list = create("ul").attr("class", "myul")?;
//! list.child(create("li").child("Hello")?)?;
//!
//! // Extending later is visible through every handle.
//! let styled = list.attr("style", "color: red")?;
//! styled.child(create("li").child("Goodbye")?)?;
//!
//! assert_eq!(
//!     list.render()?,
//!     r#"<ul class="myul" style="color: red"><li>Hello</li><li>Goodbye</li></ul>"#
//! );
//! # Ok::<(), tagtree_core::BuildError>(())
//! ```
//!
//! Use [`Element::deep_clone`] when an independent copy is needed instead.

use std::cell::{Ref, RefCell};
use std::fmt;
use std::rc::Rc;

use indexmap::IndexMap;

use crate::children::{Children, IntoChildren, flatten};
use crate::error::{BuildError, Result};
use crate::node::{AttrValue, Node};

/// Prefix that routes accessor keys to internal fields instead of attributes.
pub const INTERNAL_PREFIX: char = '_';

/// Internal fields reachable through [`Element::get`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum InternalField {
	Tag,
	IsVoid,
}

impl InternalField {
	fn parse(key: &str) -> Option<Self> {
		match key {
			"_tag" => Some(InternalField::Tag),
			"_is_void" => Some(InternalField::IsVoid),
			_ => None,
		}
	}
}

/// The state behind an [`Element`] handle.
#[derive(Debug)]
pub(crate) struct ElementData {
	/// Lower-cased tag name as supplied at creation.
	pub(crate) tag: String,
	/// Attributes in first-insertion order.
	pub(crate) attributes: IndexMap<String, AttrValue>,
	/// Flattened child sequence, placeholders included.
	pub(crate) children: Vec<Node>,
	/// Whether this is a void element (no closing tag, no children).
	pub(crate) is_void: bool,
}

// The default drop would recurse once per nesting level. Children whose
// last handle is going away are unlinked onto a local stack instead.
impl Drop for ElementData {
	fn drop(&mut self) {
		let mut pending = std::mem::take(&mut self.children);
		while let Some(node) = pending.pop() {
			if let Node::Element(element) = node {
				if let Ok(cell) = Rc::try_unwrap(element.inner) {
					let mut data = cell.into_inner();
					pending.append(&mut data.children);
				}
			}
		}
	}
}

/// Arguments of a single [`Element::extend`] call.
///
/// One call may carry children or attributes, not both.
#[derive(Debug, Clone, Default)]
pub struct Extend {
	children: Vec<Children>,
	attributes: Vec<(String, AttrValue)>,
}

impl Extend {
	/// Creates an empty argument list.
	pub fn new() -> Self {
		Self::default()
	}

	/// Appends one positional child argument.
	pub fn child(mut self, child: impl IntoChildren) -> Self {
		self.children.push(child.into_children());
		self
	}

	/// Appends one attribute entry.
	pub fn attr(mut self, key: impl Into<String>, value: impl Into<AttrValue>) -> Self {
		self.attributes.push((key.into(), value.into()));
		self
	}

	/// Appends several attribute entries.
	pub fn attrs<K, V>(mut self, attrs: impl IntoIterator<Item = (K, V)>) -> Self
	where
		K: Into<String>,
		V: Into<AttrValue>,
	{
		self.attributes
			.extend(attrs.into_iter().map(|(k, v)| (k.into(), v.into())));
		self
	}

	/// Returns `true` if neither children nor attributes were supplied.
	pub fn is_empty(&self) -> bool {
		self.children.is_empty() && self.attributes.is_empty()
	}
}

/// A shared, mutable markup element.
///
/// Created by [`create`](crate::create). Equality is identity: two handles
/// are equal when they point at the same instance.
///
/// `Element` is neither `Send` nor `Sync`; a tree is built and rendered on
/// one thread.
#[derive(Clone)]
pub struct Element {
	inner: Rc<RefCell<ElementData>>,
}

// Only the child count is shown; printing the subtree would recurse once
// per level. Use `render` or `snapshot` to inspect a whole tree.
impl fmt::Debug for Element {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let data = self.inner.borrow();
		f.debug_struct("Element")
			.field("tag", &data.tag)
			.field("attributes", &data.attributes)
			.field("children", &data.children.len())
			.field("is_void", &data.is_void)
			.finish()
	}
}

impl PartialEq for Element {
	fn eq(&self, other: &Self) -> bool {
		self.same_instance(other)
	}
}

impl Eq for Element {}

impl Element {
	pub(crate) fn new(tag: String, is_void: bool) -> Self {
		Self {
			inner: Rc::new(RefCell::new(ElementData {
				tag,
				attributes: IndexMap::new(),
				children: Vec::new(),
				is_void,
			})),
		}
	}

	pub(crate) fn data(&self) -> Ref<'_, ElementData> {
		self.inner.borrow()
	}

	/// Merges children or attributes into this element and returns it.
	///
	/// - children and attributes together fail with [`BuildError::InvalidUsage`]
	/// - children on a void element fail with [`BuildError::VoidElementChildren`]
	/// - attribute keys starting with `_` fail with [`BuildError::InvalidName`]
	/// - a child that contains this element fails with [`BuildError::Cycle`]
	///
	/// All checks run before anything is written, so a failed call leaves the
	/// element untouched. The returned handle is the same instance as `self`.
	///
	/// # Cost
	///
	/// The cycle check walks the whole subtree of every element child being
	/// appended. Wrapping an existing tree of `n` elements costs `O(n)`, so
	/// building a chain `N` levels deep from the inside out
	/// (`current = create("div").child(current)?`) costs `O(N²)` in total.
	/// Appending fresh, still-empty children from the outside in costs
	/// `O(1)` per level.
	pub fn extend(&self, args: Extend) -> Result<Self> {
		let Extend {
			children,
			attributes,
		} = args;

		if !children.is_empty() && !attributes.is_empty() {
			return Err(BuildError::InvalidUsage);
		}

		if !children.is_empty() {
			self.append_children(flatten(children))?;
		}

		if !attributes.is_empty() {
			self.merge_attributes(attributes)?;
		}

		Ok(self.clone())
	}

	/// Appends children (one extend call).
	///
	/// Accepts anything [`IntoChildren`]: a node, a tuple of nodes, nested
	/// collections, ranges, `Option`s.
	pub fn children(&self, children: impl IntoChildren) -> Result<Self> {
		self.extend(Extend::new().child(children))
	}

	/// Appends a single child (one extend call).
	pub fn child(&self, child: impl IntoChildren) -> Result<Self> {
		self.children(child)
	}

	/// Merges attributes (one extend call).
	pub fn attrs<K, V>(&self, attrs: impl IntoIterator<Item = (K, V)>) -> Result<Self>
	where
		K: Into<String>,
		V: Into<AttrValue>,
	{
		self.extend(Extend::new().attrs(attrs))
	}

	/// Merges a single attribute (one extend call).
	pub fn attr(&self, key: impl Into<String>, value: impl Into<AttrValue>) -> Result<Self> {
		self.extend(Extend::new().attr(key, value))
	}

	fn append_children(&self, nodes: Vec<Node>) -> Result<()> {
		{
			let data = self.inner.borrow();
			if data.is_void {
				return Err(BuildError::VoidElementChildren {
					tag: data.tag.clone(),
				});
			}
		}

		if nodes
			.iter()
			.filter_map(Node::as_element)
			.any(|child| child.contains(self))
		{
			return Err(BuildError::Cycle { tag: self.tag() });
		}

		let mut data = self.inner.borrow_mut();
		let added = nodes.len();
		data.children.extend(nodes);
		tracing::trace!(tag = %data.tag, children = added, "extended element");
		Ok(())
	}

	fn merge_attributes(&self, attributes: Vec<(String, AttrValue)>) -> Result<()> {
		if let Some((key, _)) = attributes
			.iter()
			.find(|(key, _)| key.starts_with(INTERNAL_PREFIX))
		{
			return Err(BuildError::InvalidName { name: key.clone() });
		}

		let mut data = self.inner.borrow_mut();
		let written = attributes.len();
		data.attributes.extend(attributes);
		tracing::trace!(tag = %data.tag, attributes = written, "extended element");
		Ok(())
	}

	/// Returns `true` if `target` is this element or one of its descendants.
	fn contains(&self, target: &Element) -> bool {
		let mut stack = vec![self.clone()];
		while let Some(element) = stack.pop() {
			if element.same_instance(target) {
				return true;
			}
			stack.extend(
				element
					.inner
					.borrow()
					.children
					.iter()
					.filter_map(Node::as_element)
					.cloned(),
			);
		}
		false
	}

	/// Returns an attribute value.
	///
	/// Keys starting with `_` read internal fields instead: `_tag` yields the
	/// tag name and `_is_void` the void flag.
	pub fn get(&self, key: &str) -> Result<AttrValue> {
		let data = self.inner.borrow();

		if key.starts_with(INTERNAL_PREFIX) {
			return match InternalField::parse(key) {
				Some(InternalField::Tag) => Ok(AttrValue::Text(data.tag.clone())),
				Some(InternalField::IsVoid) => Ok(AttrValue::Bool(data.is_void)),
				None => Err(BuildError::AttributeNotFound {
					key: key.to_owned(),
				}),
			};
		}

		data.attributes
			.get(key)
			.cloned()
			.ok_or_else(|| BuildError::AttributeNotFound {
				key: key.to_owned(),
			})
	}

	/// Inserts or overwrites a single attribute.
	///
	/// Internal fields are read-only; `_`-prefixed keys fail with
	/// [`BuildError::ReadOnlyField`].
	pub fn set(&self, key: impl Into<String>, value: impl Into<AttrValue>) -> Result<()> {
		let key = key.into();
		if key.starts_with(INTERNAL_PREFIX) {
			return Err(BuildError::ReadOnlyField { field: key });
		}
		self.inner.borrow_mut().attributes.insert(key, value.into());
		Ok(())
	}

	/// Removes an attribute and returns its previous value.
	///
	/// The remaining attributes keep their relative order.
	pub fn remove(&self, key: &str) -> Result<AttrValue> {
		if key.starts_with(INTERNAL_PREFIX) {
			return Err(match InternalField::parse(key) {
				Some(_) => BuildError::ReadOnlyField {
					field: key.to_owned(),
				},
				None => BuildError::AttributeNotFound {
					key: key.to_owned(),
				},
			});
		}

		self.inner
			.borrow_mut()
			.attributes
			.shift_remove(key)
			.ok_or_else(|| BuildError::AttributeNotFound {
				key: key.to_owned(),
			})
	}

	/// Returns `true` if the attribute map holds `key`.
	pub fn has_attr(&self, key: &str) -> bool {
		self.inner.borrow().attributes.contains_key(key)
	}

	/// Returns the tag name (lower-cased, not yet canonicalized).
	pub fn tag(&self) -> String {
		self.inner.borrow().tag.clone()
	}

	/// Returns whether this is a void element.
	pub fn is_void(&self) -> bool {
		self.inner.borrow().is_void
	}

	/// Returns the attributes in rendering order.
	pub fn attributes(&self) -> Vec<(String, AttrValue)> {
		self.inner
			.borrow()
			.attributes
			.iter()
			.map(|(k, v)| (k.clone(), v.clone()))
			.collect()
	}

	/// Returns the child sequence, placeholders included.
	pub fn child_nodes(&self) -> Vec<Node> {
		self.inner.borrow().children.clone()
	}

	/// Returns `true` if both handles point at the same instance.
	pub fn same_instance(&self, other: &Element) -> bool {
		Rc::ptr_eq(&self.inner, &other.inner)
	}

	/// Returns an independent copy of this element and its whole subtree.
	///
	/// Extending the copy never affects the original, and vice versa.
	pub fn deep_clone(&self) -> Self {
		let root = self.shallow_copy();
		let mut pending = vec![(self.clone(), root.clone())];

		while let Some((source, target)) = pending.pop() {
			let source_data = source.inner.borrow();
			let mut target_data = target.inner.borrow_mut();
			for node in &source_data.children {
				let copied = match node {
					Node::Element(child) => {
						let copy = child.shallow_copy();
						pending.push((child.clone(), copy.clone()));
						Node::Element(copy)
					}
					other => other.clone(),
				};
				target_data.children.push(copied);
			}
		}
		root
	}

	/// Copies tag, void flag and attributes, leaving the children empty.
	fn shallow_copy(&self) -> Self {
		let data = self.inner.borrow();
		let copy = Element::new(data.tag.clone(), data.is_void);
		copy.inner.borrow_mut().attributes = data.attributes.clone();
		copy
	}

	/// Renders this element to a markup string.
	///
	/// See [`render`](crate::render) for the rules.
	pub fn render(&self) -> Result<String> {
		crate::render::render(self)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::create;
	use rstest::{fixture, rstest};

	#[fixture]
	fn div() -> Element {
		create("div")
	}

	#[rstest]
	fn test_element_creation(div: Element) {
		assert_eq!(div.tag(), "div");
		assert!(!div.is_void());
		assert!(div.attributes().is_empty());
		assert!(div.child_nodes().is_empty());
	}

	#[rstest]
	fn test_extend_returns_same_instance(div: Element) {
		let extended = div.child("hello").unwrap();
		assert!(extended.same_instance(&div));
		assert_eq!(div.child_nodes(), vec![Node::Text("hello".to_string())]);
	}

	#[rstest]
	fn test_extend_empty_is_noop(div: Element) {
		let same = div.extend(Extend::new()).unwrap();
		assert!(same.same_instance(&div));
		assert!(div.child_nodes().is_empty());
		assert!(div.attributes().is_empty());
	}

	#[rstest]
	fn test_extend_rejects_children_and_attributes(div: Element) {
		let result = div.extend(Extend::new().child("x").attr("id", "c"));
		assert_eq!(result.unwrap_err(), BuildError::InvalidUsage);
		assert!(div.child_nodes().is_empty());
		assert!(div.attributes().is_empty());
	}

	#[rstest]
	fn test_children_accumulate_in_order(div: Element) {
		div.children(("a", "b")).unwrap();
		div.attr("id", "c").unwrap();
		div.children(["c", "d"]).unwrap();
		let text: Vec<Node> = ["a", "b", "c", "d"].into_iter().map(Node::from).collect();
		assert_eq!(div.child_nodes(), text);
	}

	#[rstest]
	fn test_attributes_overwrite_in_place(div: Element) {
		div.attrs([("a", "1"), ("b", "2")]).unwrap();
		div.attrs([("a", "3"), ("c", "4")]).unwrap();
		assert_eq!(
			div.attributes(),
			vec![
				("a".to_string(), AttrValue::from("3")),
				("b".to_string(), AttrValue::from("2")),
				("c".to_string(), AttrValue::from("4")),
			]
		);
	}

	#[rstest]
	#[case("img")]
	#[case("br")]
	#[case("input")]
	#[case("path")]
	fn test_void_element_rejects_children(#[case] tag: &str) {
		let el = create(tag);
		let err = el.child("x").unwrap_err();
		assert_eq!(
			err,
			BuildError::VoidElementChildren {
				tag: tag.to_string()
			}
		);
		assert!(el.child_nodes().is_empty());
	}

	#[rstest]
	fn test_void_element_accepts_attributes() {
		let img = create("img").attr("src", "a.png").unwrap();
		assert_eq!(img.get("src").unwrap(), AttrValue::from("a.png"));
	}

	#[rstest]
	fn test_extend_rejects_underscore_prefixed_key(div: Element) {
		let err = div.attrs([("id", "ok"), ("_class", "bad")]).unwrap_err();
		assert_eq!(
			err,
			BuildError::InvalidName {
				name: "_class".to_string()
			}
		);
		// Nothing from the failed call was committed.
		assert!(!div.has_attr("id"));
	}

	#[rstest]
	fn test_extend_rejects_self_as_child(div: Element) {
		let err = div.child(&div).unwrap_err();
		assert_eq!(
			err,
			BuildError::Cycle {
				tag: "div".to_string()
			}
		);
		assert!(div.child_nodes().is_empty());
	}

	#[rstest]
	fn test_extend_rejects_ancestor_as_child(div: Element) {
		let inner = create("span");
		div.child(&inner).unwrap();
		let err = inner.children(("ok", &div)).unwrap_err();
		assert_eq!(
			err,
			BuildError::Cycle {
				tag: "span".to_string()
			}
		);
		assert!(inner.child_nodes().is_empty());
	}

	#[rstest]
	fn test_same_child_twice_is_allowed(div: Element) {
		let li = create("li").child("x").unwrap();
		div.children((&li, &li)).unwrap();
		assert_eq!(div.render().unwrap(), "<div><li>x</li><li>x</li></div>");
	}

	#[rstest]
	fn test_get_set_remove(div: Element) {
		div.attrs([("foo", "bar"), ("boz", "boink")]).unwrap();
		assert_eq!(div.get("foo").unwrap(), AttrValue::from("bar"));

		div.set("foo", "bar2").unwrap();
		assert_eq!(div.get("foo").unwrap(), AttrValue::from("bar2"));
		assert_eq!(div.get("boz").unwrap(), AttrValue::from("boink"));

		assert_eq!(div.remove("boz").unwrap(), AttrValue::from("boink"));
		assert_eq!(
			div.get("boz").unwrap_err(),
			BuildError::AttributeNotFound {
				key: "boz".to_string()
			}
		);
		assert_eq!(
			div.remove("boz").unwrap_err(),
			BuildError::AttributeNotFound {
				key: "boz".to_string()
			}
		);
	}

	#[rstest]
	fn test_get_absent_value_is_present(div: Element) {
		div.attr("foo", AttrValue::Absent).unwrap();
		assert!(div.has_attr("foo"));
		assert_eq!(div.get("foo").unwrap(), AttrValue::Absent);
	}

	#[rstest]
	fn test_remove_keeps_order(div: Element) {
		div.attrs([("a", "1"), ("b", "2"), ("c", "3")]).unwrap();
		div.remove("a").unwrap();
		let keys: Vec<String> = div.attributes().into_iter().map(|(k, _)| k).collect();
		assert_eq!(keys, vec!["b", "c"]);
	}

	#[rstest]
	fn test_internal_fields() {
		let img = create("IMG");
		assert_eq!(img.get("_tag").unwrap(), AttrValue::from("img"));
		assert_eq!(img.get("_is_void").unwrap(), AttrValue::Bool(true));
		assert_eq!(
			img.get("_children").unwrap_err(),
			BuildError::AttributeNotFound {
				key: "_children".to_string()
			}
		);
		assert_eq!(
			img.set("_tag", "div").unwrap_err(),
			BuildError::ReadOnlyField {
				field: "_tag".to_string()
			}
		);
		assert_eq!(
			img.remove("_is_void").unwrap_err(),
			BuildError::ReadOnlyField {
				field: "_is_void".to_string()
			}
		);
		assert_eq!(img.tag(), "img");
		assert!(img.attributes().is_empty());
	}

	#[rstest]
	fn test_deep_clone_is_independent(div: Element) {
		let li = create("li").child("x").unwrap();
		div.attr("id", "c").unwrap();
		div.child(&li).unwrap();

		let copy = div.deep_clone();
		assert!(!copy.same_instance(&div));
		li.child("y").unwrap();
		copy.attr("id", "d").unwrap();

		assert_eq!(div.render().unwrap(), r#"<div id="c"><li>xy</li></div>"#);
		assert_eq!(copy.render().unwrap(), r#"<div id="d"><li>x</li></div>"#);
	}

	/// Builds `<i>` elements nested `depth` levels deep, appending each new
	/// level to the previous one.
	fn nested_chain(depth: usize) -> Element {
		let root = create("i");
		let mut cursor = root.clone();
		for _ in 1..depth {
			let next = create("i");
			cursor.child(&next).unwrap();
			cursor = next;
		}
		root
	}

	#[rstest]
	fn test_deep_chain_clone_and_drop() {
		let root = nested_chain(20_000);
		let copy = root.deep_clone();
		assert!(!copy.same_instance(&root));
		assert_eq!(copy.render().unwrap(), root.render().unwrap());
		drop(root);
		drop(copy);
	}

	#[rstest]
	fn test_deep_chain_debug_is_shallow() {
		let root = nested_chain(20_000);
		let debug = format!("{root:?}");
		assert!(debug.contains("children: 1"));
	}

	#[rstest]
	fn test_drop_keeps_shared_children_alive() {
		let shared = create("li").child("x").unwrap();
		{
			let list = create("ul").children((&shared, &shared)).unwrap();
			assert_eq!(list.child_nodes().len(), 2);
		}
		assert_eq!(shared.render().unwrap(), "<li>x</li>");
	}

	#[rstest]
	fn test_equality_is_identity() {
		let a = create("div");
		let b = create("div");
		assert_eq!(a, a.clone());
		assert_ne!(a, b);
	}
}
