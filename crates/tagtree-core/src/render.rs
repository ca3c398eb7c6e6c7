//! Markup serialization.
//!
//! Rendering reads the current state of a tree and never mutates it, so the
//! same unmodified element always renders to the same string.
//!
//! ## Rules
//!
//! - Tag names and attribute keys are canonicalized: trailing underscores are
//!   stripped (`class_` -> `class`) and the remaining underscores become dashes
//!   (`my_element` -> `my-element`). A leading underscore is an error.
//! - `Bool(true)` attributes render as the bare key; `Bool(false)` and
//!   `Absent` attributes are dropped; text values render as `key="value"`.
//! - `Bool` and `Absent` children render as nothing.
//! - Void elements render as `<tag attrs/>`, everything else as
//!   `<tag attrs>children</tag>`.
//! - An `html` element is prefixed with `<!DOCTYPE html>`.
//!
//! Nothing is escaped. Text and attribute values are written verbatim; run
//! untrusted input through [`escape_html`](crate::escape_html) first.

use indexmap::IndexMap;

use crate::children::{IntoChildren, flatten};
use crate::element::{Element, INTERNAL_PREFIX};
use crate::error::{BuildError, Result};
use crate::node::{AttrValue, Node};

/// Document type declaration emitted before an `html` element.
pub const DOCTYPE: &str = "<!DOCTYPE html>";

/// Canonicalizes a tag name or attribute key.
///
/// # Example
///
/// ```
/// use tagtree_core::canonicalize_name;
///
/// assert_eq!(canonicalize_name("class_")?, "class");
/// assert_eq!(canonicalize_name("data_user_id")?, "data-user-id");
/// assert!(canonicalize_name("_class").is_err());
/// # Ok::<(), tagtree_core::BuildError>(())
/// ```
pub fn canonicalize_name(name: &str) -> Result<String> {
	if name.starts_with(INTERNAL_PREFIX) {
		return Err(BuildError::InvalidName {
			name: name.to_owned(),
		});
	}
	Ok(name.trim_end_matches('_').replace('_', "-"))
}

/// Renders an element and its subtree to a markup string.
pub fn render(element: &Element) -> Result<String> {
	let mut output = String::new();
	render_element(element, &mut output)?;
	tracing::trace!(tag = %element.tag(), len = output.len(), "rendered element");
	Ok(output)
}

/// Renders sibling nodes with no enclosing tag.
///
/// The argument is flattened like extend-call children; placeholders are
/// skipped and no doctype is added.
///
/// # Example
///
/// ```
/// use tagtree_core::{create, render_fragment};
///
/// let html = render_fragment((create("h1").child("hello")?, create("div").child("world")?))?;
/// assert_eq!(html, "<h1>hello</h1><div>world</div>");
///
/// let text = render_fragment(("hello", None::<&str>, " ", false, "world", true, "!"))?;
/// assert_eq!(text, "hello world!");
/// # Ok::<(), tagtree_core::BuildError>(())
/// ```
pub fn render_fragment(nodes: impl IntoChildren) -> Result<String> {
	let nodes = flatten([nodes.into_children()]);
	let mut output = String::new();
	render_nodes(&nodes, &mut output)?;
	Ok(output)
}

/// An element whose open tag is written and whose children are in progress.
struct OpenElement {
	element: Element,
	tag: String,
	next: usize,
}

// Walks the subtree with its own stack of open elements, so nesting depth is
// bounded by heap memory rather than the call stack.
fn render_element(root: &Element, output: &mut String) -> Result<()> {
	let mut open = Vec::new();
	write_open_tag(root, output, &mut open)?;

	while let Some(top) = open.last_mut() {
		let next = {
			let data = top.element.data();
			let mut next = None;
			while let Some(node) = data.children.get(top.next) {
				top.next += 1;
				if let Some(element) = write_leaf(node, output) {
					next = Some(element);
					break;
				}
			}
			next
		};

		match next {
			Some(child) => write_open_tag(&child, output, &mut open)?,
			None => {
				if let Some(done) = open.pop() {
					output.push_str("</");
					output.push_str(&done.tag);
					output.push('>');
				}
			}
		}
	}
	Ok(())
}

/// Writes the open tag (or the whole void element) and, for non-void
/// elements, pushes the element onto `open` to have its children written.
fn write_open_tag(
	element: &Element,
	output: &mut String,
	open: &mut Vec<OpenElement>,
) -> Result<()> {
	let data = element.data();
	let tag = canonicalize_name(&data.tag)?;
	let attrs = render_attributes(&data.attributes)?;

	if tag == "html" {
		output.push_str(DOCTYPE);
	}

	output.push('<');
	output.push_str(&tag);
	if !attrs.is_empty() {
		output.push(' ');
		output.push_str(&attrs);
	}

	if data.is_void {
		output.push_str("/>");
		return Ok(());
	}

	output.push('>');
	open.push(OpenElement {
		element: element.clone(),
		tag,
		next: 0,
	});
	Ok(())
}

/// Writes text and skips placeholders; hands elements back to the caller.
fn write_leaf(node: &Node, output: &mut String) -> Option<Element> {
	match node {
		Node::Element(element) => Some(element.clone()),
		Node::Text(text) => {
			output.push_str(text);
			None
		}
		Node::Bool(_) | Node::Absent => None,
	}
}

fn render_attributes(attributes: &IndexMap<String, AttrValue>) -> Result<String> {
	let mut tokens = Vec::with_capacity(attributes.len());
	for (key, value) in attributes {
		match value {
			AttrValue::Absent | AttrValue::Bool(false) => continue,
			AttrValue::Bool(true) => tokens.push(canonicalize_name(key)?),
			AttrValue::Text(text) => {
				tokens.push(format!("{}=\"{text}\"", canonicalize_name(key)?));
			}
		}
	}
	Ok(tokens.join(" "))
}

fn render_nodes(nodes: &[Node], output: &mut String) -> Result<()> {
	for node in nodes {
		if let Some(element) = write_leaf(node, output) {
			render_element(&element, output)?;
		}
	}
	Ok(())
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::create;
	use rstest::rstest;

	#[rstest]
	#[case("div", "div")]
	#[case("class_", "class")]
	#[case("my_custom_element", "my-custom-element")]
	#[case("my_custom_element_", "my-custom-element")]
	#[case("foo_bar__", "foo-bar")]
	#[case("data-id", "data-id")]
	fn test_canonicalize_name(#[case] raw: &str, #[case] expected: &str) {
		assert_eq!(canonicalize_name(raw).unwrap(), expected);
	}

	#[rstest]
	#[case("_class")]
	#[case("_")]
	#[case("__init__")]
	fn test_canonicalize_name_leading_underscore(#[case] raw: &str) {
		assert_eq!(
			canonicalize_name(raw).unwrap_err(),
			BuildError::InvalidName {
				name: raw.to_string()
			}
		);
	}

	#[rstest]
	fn test_render_empty_element() {
		assert_eq!(create("div").render().unwrap(), "<div></div>");
	}

	#[rstest]
	fn test_render_void_element() {
		assert_eq!(create("br").render().unwrap(), "<br/>");
		assert_eq!(
			create("img").attr("src", "a.png").unwrap().render().unwrap(),
			r#"<img src="a.png"/>"#
		);
	}

	#[rstest]
	fn test_render_boolean_and_absent_attributes() {
		let div = create("div")
			.attrs([
				("foo", AttrValue::Bool(true)),
				("bar", AttrValue::Bool(false)),
				("baz", AttrValue::Absent),
				("qux", AttrValue::from("v")),
			])
			.unwrap();
		assert_eq!(div.render().unwrap(), r#"<div foo qux="v"></div>"#);
	}

	#[rstest]
	fn test_render_only_omitted_attributes_drops_segment() {
		let div = create("div")
			.attrs([("bar", false), ("baz", false)])
			.unwrap();
		assert_eq!(div.render().unwrap(), "<div></div>");
		let img = create("img").attr("alt", AttrValue::Absent).unwrap();
		assert_eq!(img.render().unwrap(), "<img/>");
	}

	#[rstest]
	fn test_render_empty_string_attribute() {
		let div = create("div").attr("foo", "").unwrap();
		assert_eq!(div.render().unwrap(), r#"<div foo=""></div>"#);
	}

	#[rstest]
	fn test_render_does_not_escape() {
		let div = create("div")
			.attr("title", "a \"quoted\" <b>")
			.unwrap()
			.child("<script>alert('x')</script>")
			.unwrap();
		assert_eq!(
			div.render().unwrap(),
			r#"<div title="a "quoted" <b>"><script>alert('x')</script></div>"#
		);
	}

	#[rstest]
	fn test_render_skips_placeholder_children() {
		let div = create("div")
			.children(("hello", None::<&str>, " ", false, "world", true, "!"))
			.unwrap();
		assert_eq!(div.render().unwrap(), "<div>hello world!</div>");
	}

	#[rstest]
	fn test_render_doctype_only_on_html() {
		let doc = create("html")
			.child(create("body").child("hi").unwrap())
			.unwrap();
		assert_eq!(
			doc.render().unwrap(),
			"<!DOCTYPE html><html><body>hi</body></html>"
		);
		assert_eq!(
			create("HTML").render().unwrap(),
			"<!DOCTYPE html><html></html>"
		);
		assert_eq!(
			create("html_").render().unwrap(),
			"<!DOCTYPE html><html></html>"
		);
		assert_eq!(create("htmlx").render().unwrap(), "<htmlx></htmlx>");
	}

	#[rstest]
	fn test_render_nested_html_gets_its_own_doctype() {
		let outer = create("div").child(create("html")).unwrap();
		assert_eq!(
			outer.render().unwrap(),
			"<div><!DOCTYPE html><html></html></div>"
		);
	}

	#[rstest]
	fn test_render_invalid_tag_name() {
		let el = create("_private");
		assert_eq!(
			el.render().unwrap_err(),
			BuildError::InvalidName {
				name: "_private".to_string()
			}
		);
	}

	#[rstest]
	fn test_render_invalid_nested_tag_name() {
		let div = create("div").child(create("_bad")).unwrap();
		assert!(matches!(
			div.render(),
			Err(BuildError::InvalidName { .. })
		));
	}

	#[rstest]
	fn test_render_is_idempotent() {
		let div = create("div")
			.attr("id", "c")
			.unwrap()
			.child(create("span").child("x").unwrap())
			.unwrap();
		assert_eq!(div.render().unwrap(), div.render().unwrap());
	}

	#[rstest]
	fn test_render_deep_chain_does_not_overflow() {
		let depth = 20_000;
		let root = create("i");
		let mut cursor = root.clone();
		for _ in 1..depth {
			let next = create("i");
			cursor.child(&next).unwrap();
			cursor = next;
		}
		cursor.child(create("b").child("x").unwrap()).unwrap();
		drop(cursor);

		let html = root.render().unwrap();
		let expected = format!(
			"{}<b>x</b>{}",
			"<i>".repeat(depth),
			"</i>".repeat(depth)
		);
		assert_eq!(html, expected);
	}

	#[rstest]
	fn test_render_siblings_after_nested_subtree() {
		let div = create("div")
			.children((
				create("ul").children((create("li").child("a").unwrap(), create("br"))).unwrap(),
				"tail",
				create("p"),
			))
			.unwrap();
		assert_eq!(
			div.render().unwrap(),
			"<div><ul><li>a</li><br/></ul>tail<p></p></div>"
		);
	}

	#[rstest]
	fn test_render_fragment_empty() {
		assert_eq!(render_fragment(()).unwrap(), "");
	}

	#[rstest]
	fn test_render_fragment_has_no_doctype_logic() {
		let html = render_fragment(("a", create("b"))).unwrap();
		assert_eq!(html, "a<b></b>");
	}
}
