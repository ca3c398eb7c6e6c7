//! Caller-side helpers.
//!
//! Rendering never escapes anything. These helpers are for callers who put
//! untrusted text into a tree.

use std::borrow::Cow;

/// Makes untrusted text safe to put in a tree.
///
/// Rendering writes text children and attribute values verbatim, so callers
/// escape anything they did not write themselves before building with it.
/// The output is safe in both positions: as a text child and inside a
/// double- or single-quoted attribute value. `&`, `<`, `>`, `"` and `'` are
/// replaced with entities; the input is borrowed back untouched when none of
/// them occur.
///
/// # Example
///
/// ```
/// use tagtree_core::{create, escape_html};
///
/// let comment = "<script>alert('hi')</script>";
/// let title = r#"say "hi" & leave"#;
/// let p = create("p").attr("title", escape_html(title))?;
/// p.child(escape_html(comment))?;
/// assert_eq!(
///     p.render()?,
///     concat!(
///         r#"<p title="say &quot;hi&quot; &amp; leave">"#,
///         "&lt;script&gt;alert(&#x27;hi&#x27;)&lt;/script&gt;</p>",
///     )
/// );
/// # Ok::<(), tagtree_core::BuildError>(())
/// ```
pub fn escape_html(text: &str) -> Cow<'_, str> {
	let Some(first) = text.find(|c: char| entity(c).is_some()) else {
		return Cow::Borrowed(text);
	};

	let mut escaped = String::with_capacity(text.len() + 16);
	escaped.push_str(&text[..first]);
	for c in text[first..].chars() {
		match entity(c) {
			Some(replacement) => escaped.push_str(replacement),
			None => escaped.push(c),
		}
	}
	Cow::Owned(escaped)
}

fn entity(c: char) -> Option<&'static str> {
	match c {
		'&' => Some("&amp;"),
		'<' => Some("&lt;"),
		'>' => Some("&gt;"),
		'"' => Some("&quot;"),
		'\'' => Some("&#x27;"),
		_ => None,
	}
}
