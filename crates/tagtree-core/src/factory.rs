//! Element construction.

use crate::element::Element;

/// Tags that never have children and always render self-closing.
///
/// HTML void elements followed by the SVG primitives that are written
/// self-closing.
pub const VOID_TAGS: &[&str] = &[
	// https://developer.mozilla.org/en-US/docs/Glossary/Void_element
	"area", "base", "br", "col", "embed", "hr", "img", "input", "keygen", "link", "meta", "param",
	"source", "track", "wbr",
	// SVG
	"circle", "line", "path", "polygon", "polyline", "rect",
];

/// Returns `true` if `tag` (already lower-cased) is a void tag.
pub fn is_void_tag(tag: &str) -> bool {
	VOID_TAGS.contains(&tag)
}

/// Creates a new, empty element.
///
/// The name is lower-cased and stored as is; underscores are only turned
/// into dashes at render time. Unknown names are accepted as custom
/// elements.
///
/// # Example
///
/// ```
/// use tagtree_core::create;
///
/// assert_eq!(create("DIV").render()?, "<div></div>");
/// assert_eq!(create("img").attr("src", "a.png")?.render()?, r#"<img src="a.png"/>"#);
/// # Ok::<(), tagtree_core::BuildError>(())
/// ```
pub fn create(tag_name: impl AsRef<str>) -> Element {
	let tag = tag_name.as_ref().to_lowercase();
	let is_void = is_void_tag(&tag);
	tracing::trace!(tag = %tag, is_void, "created element");
	Element::new(tag, is_void)
}
