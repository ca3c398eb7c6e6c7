//! Child argument flattening.
//!
//! Extend calls accept children in any shape: a single node, a tuple of
//! nodes, a `Vec` of arrays of ranges, an `Option`, an iterator... Every
//! argument is converted into the [`Children`] tagged union and then
//! [`flatten`]ed into one linear, depth-first, left-to-right node sequence.
//!
//! Text and elements are always leaves. A string is never iterated into
//! characters, and an element is never iterated into its own children.
//!
//! ## Example
//!
//! ```
//! use tagtree_core::{IntoChildren, Node, flatten};
//!
//! let nested = vec![(0..2).into_children(), [0, 1, 2].into_children()];
//! let nodes = flatten(nested);
//! let text: String = nodes
//!     .iter()
//!     .filter_map(|node| match node {
//!         Node::Text(text) => Some(text.as_str()),
//!         _ => None,
//!     })
//!     .collect();
//! assert_eq!(text, "01012");
//! ```

use std::borrow::Cow;
use std::ops::{Range, RangeInclusive};

use crate::element::Element;
use crate::node::Node;

/// A child argument: either a single node or an ordered nested sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Children {
	/// An atomic node.
	Leaf(Node),
	/// An ordered collection of further child arguments.
	Sequence(Vec<Children>),
}

impl Children {
	/// An empty sequence.
	pub fn empty() -> Self {
		Children::Sequence(Vec::new())
	}

	/// Flattens this argument into a linear node sequence.
	pub fn flatten(self) -> Vec<Node> {
		flatten([self])
	}
}

impl<T: IntoChildren> FromIterator<T> for Children {
	fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
		Children::Sequence(iter.into_iter().map(IntoChildren::into_children).collect())
	}
}

/// Conversion into a child argument.
///
/// Implemented for text, numbers, booleans, elements and nodes (leaves), and
/// for `Vec`, arrays, slices, tuples, integer ranges and `()` (sequences).
/// `Option<T>` maps `None` to [`Node::Absent`]. Arbitrary iterators can be
/// collected into [`Children`] directly.
pub trait IntoChildren {
	/// Converts self into a child argument.
	fn into_children(self) -> Children;
}

impl IntoChildren for Children {
	fn into_children(self) -> Children {
		self
	}
}

impl IntoChildren for Node {
	fn into_children(self) -> Children {
		Children::Leaf(self)
	}
}

impl<T: IntoChildren> IntoChildren for Option<T> {
	fn into_children(self) -> Children {
		match self {
			Some(v) => v.into_children(),
			None => Children::Leaf(Node::Absent),
		}
	}
}

impl<T: IntoChildren> IntoChildren for Vec<T> {
	fn into_children(self) -> Children {
		self.into_iter().collect()
	}
}

impl<T: IntoChildren, const N: usize> IntoChildren for [T; N] {
	fn into_children(self) -> Children {
		self.into_iter().collect()
	}
}

impl<T: IntoChildren + Clone> IntoChildren for &[T] {
	fn into_children(self) -> Children {
		self.iter().cloned().collect()
	}
}

impl IntoChildren for () {
	fn into_children(self) -> Children {
		Children::empty()
	}
}

macro_rules! impl_leaf {
	($($ty:ty),* $(,)?) => {
		$(
			impl IntoChildren for $ty {
				fn into_children(self) -> Children {
					Children::Leaf(Node::from(self))
				}
			}
		)*
	};
}

impl_leaf!(
	Element,
	&Element,
	String,
	&String,
	&str,
	Cow<'_, str>,
	bool,
	char,
	i8,
	i16,
	i32,
	i64,
	i128,
	isize,
	u8,
	u16,
	u32,
	u64,
	u128,
	usize,
	f32,
	f64,
);

macro_rules! impl_ranges {
	($($ty:ty),* $(,)?) => {
		$(
			impl IntoChildren for Range<$ty> {
				fn into_children(self) -> Children {
					self.collect()
				}
			}

			impl IntoChildren for RangeInclusive<$ty> {
				fn into_children(self) -> Children {
					self.collect()
				}
			}
		)*
	};
}

impl_ranges!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

// Tuples act as positional argument lists: `(h1, ul, footer)`.
macro_rules! impl_tuple {
	($($name:ident),+) => {
		impl<$($name: IntoChildren),+> IntoChildren for ($($name,)+) {
			#[allow(non_snake_case)]
			fn into_children(self) -> Children {
				let ($($name,)+) = self;
				Children::Sequence(vec![$($name.into_children()),+])
			}
		}
	};
}

impl_tuple!(A);
impl_tuple!(A, B);
impl_tuple!(A, B, C);
impl_tuple!(A, B, C, D);
impl_tuple!(A, B, C, D, E);
impl_tuple!(A, B, C, D, E, F);
impl_tuple!(A, B, C, D, E, F, G);
impl_tuple!(A, B, C, D, E, F, G, H);
impl_tuple!(A, B, C, D, E, F, G, H, I);
impl_tuple!(A, B, C, D, E, F, G, H, I, J);
impl_tuple!(A, B, C, D, E, F, G, H, I, J, K);
impl_tuple!(A, B, C, D, E, F, G, H, I, J, K, L);

/// Flattens child arguments into one linear node sequence.
///
/// Sequences are descended depth-first, left to right. Leaves (including
/// the `Bool` and `Absent` placeholders) are emitted unchanged. Nesting depth
/// is bounded by heap memory only: the walk keeps its own stack of pending
/// sequences instead of recursing.
pub fn flatten<I>(args: I) -> Vec<Node>
where
	I: IntoIterator<Item = Children>,
{
	let mut nodes = Vec::new();
	let mut stack = vec![args.into_iter().collect::<Vec<_>>().into_iter()];

	while let Some(pending) = stack.last_mut() {
		match pending.next() {
			Some(Children::Leaf(node)) => nodes.push(node),
			Some(Children::Sequence(items)) => stack.push(items.into_iter()),
			None => {
				stack.pop();
			}
		}
	}

	nodes
}
