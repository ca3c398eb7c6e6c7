//! Node and attribute value types.
//!
//! A [`Node`] is one entry of an element's child sequence. Text and elements
//! render; booleans and [`Node::Absent`] are voided placeholders that stay in
//! the sequence but render as nothing, which is what makes conditional
//! composition (`show.then(|| badge)`) work.

use std::borrow::Cow;

use crate::element::Element;

/// A value stored in an element's attribute map.
///
/// Rendering rules:
/// - `Text(v)` renders as `key="v"` (verbatim, never escaped)
/// - `Bool(true)` renders as the bare key
/// - `Bool(false)` and `Absent` omit the attribute entirely
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize), serde(untagged))]
pub enum AttrValue {
	/// A string value.
	Text(String),
	/// A boolean flag.
	Bool(bool),
	/// No value; the attribute is skipped at render time.
	Absent,
}

impl AttrValue {
	/// Returns the text value, if this is a [`AttrValue::Text`].
	pub fn as_text(&self) -> Option<&str> {
		match self {
			AttrValue::Text(text) => Some(text),
			_ => None,
		}
	}

	/// Returns `true` if this value renders nothing.
	pub fn is_omitted(&self) -> bool {
		matches!(self, AttrValue::Absent | AttrValue::Bool(false))
	}
}

/// One entry of an element's child sequence.
///
/// Equality compares elements by identity (see [`Element`]) and everything
/// else by value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
	/// A nested element.
	Element(Element),
	/// Raw text, emitted verbatim.
	Text(String),
	/// A boolean placeholder (renders nothing).
	Bool(bool),
	/// The absent marker (renders nothing).
	Absent,
}

impl Node {
	/// Returns `true` for the voided placeholders (`Bool` and `Absent`).
	pub fn is_placeholder(&self) -> bool {
		matches!(self, Node::Bool(_) | Node::Absent)
	}

	/// Returns the element, if this node is one.
	pub fn as_element(&self) -> Option<&Element> {
		match self {
			Node::Element(element) => Some(element),
			_ => None,
		}
	}
}

impl From<Element> for Node {
	fn from(element: Element) -> Self {
		Node::Element(element)
	}
}

impl From<&Element> for Node {
	fn from(element: &Element) -> Self {
		Node::Element(element.clone())
	}
}

impl From<String> for Node {
	fn from(text: String) -> Self {
		Node::Text(text)
	}
}

impl From<&String> for Node {
	fn from(text: &String) -> Self {
		Node::Text(text.clone())
	}
}

impl From<&str> for Node {
	fn from(text: &str) -> Self {
		Node::Text(text.to_owned())
	}
}

impl From<Cow<'_, str>> for Node {
	fn from(text: Cow<'_, str>) -> Self {
		Node::Text(text.into_owned())
	}
}

impl From<bool> for Node {
	fn from(flag: bool) -> Self {
		Node::Bool(flag)
	}
}

impl From<String> for AttrValue {
	fn from(text: String) -> Self {
		AttrValue::Text(text)
	}
}

impl From<&String> for AttrValue {
	fn from(text: &String) -> Self {
		AttrValue::Text(text.clone())
	}
}

impl From<&str> for AttrValue {
	fn from(text: &str) -> Self {
		AttrValue::Text(text.to_owned())
	}
}

impl From<Cow<'_, str>> for AttrValue {
	fn from(text: Cow<'_, str>) -> Self {
		AttrValue::Text(text.into_owned())
	}
}

impl From<bool> for AttrValue {
	fn from(flag: bool) -> Self {
		AttrValue::Bool(flag)
	}
}

impl<T: Into<AttrValue>> From<Option<T>> for AttrValue {
	fn from(value: Option<T>) -> Self {
		match value {
			Some(v) => v.into(),
			None => AttrValue::Absent,
		}
	}
}

// Numbers and chars are stringified, so `0..5` renders as "01234".
macro_rules! impl_from_display {
	($($ty:ty),* $(,)?) => {
		$(
			impl From<$ty> for Node {
				fn from(value: $ty) -> Self {
					Node::Text(value.to_string())
				}
			}

			impl From<$ty> for AttrValue {
				fn from(value: $ty) -> Self {
					AttrValue::Text(value.to_string())
				}
			}
		)*
	};
}

impl_from_display!(
	char, i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64,
);
