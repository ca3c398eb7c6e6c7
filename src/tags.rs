//! Named element constructors.
//!
//! One function per standard HTML element and common SVG element. Each is a
//! shorthand for [`create`] with the function's own name, so `div()` and
//! `create("div")` build identical elements.
//!
//! ## Example
//!
//! ```
//! use tagtree::tags::{div, li, ul};
//!
//! let list = ul().attr("class_", "menu")?.children((
//!     li().child("Home")?,
//!     li().child("About")?,
//! ))?;
//! let nav = div().child(list)?;
//!
//! assert_eq!(
//!     nav.render()?,
//!     r#"<div><ul class="menu"><li>Home</li><li>About</li></ul></div>"#
//! );
//! # Ok::<(), tagtree::BuildError>(())
//! ```
//!
//! Names that are Rust keywords carry a trailing underscore, which rendering
//! strips: [`use_`] renders as `<use>`.

use tagtree_core::{Element, create};

macro_rules! tag_constructors {
	($($name:ident),* $(,)?) => {
		$(
			#[doc = concat!("Creates a `<", stringify!($name), ">` element.")]
			pub fn $name() -> Element {
				create(stringify!($name))
			}
		)*
	};
}

// Document structure and metadata
tag_constructors! {
	html, head, body, title, base, link, meta, style, script, noscript, template, slot,
}

// Sectioning and text content
tag_constructors! {
	header, footer, main, nav, section, article, aside, address, h1, h2, h3, h4, h5, h6, hgroup,
	div, p, hr, pre, blockquote, ol, ul, li, menu, dl, dt, dd, figure, figcaption, search,
}

// Inline text semantics
tag_constructors! {
	a, abbr, b, bdi, bdo, br, cite, code, data, dfn, em, i, kbd, mark, q, rp, rt, ruby, s, samp,
	small, span, strong, sub, sup, time, u, var, wbr, del, ins,
}

// Embedded content and media
tag_constructors! {
	img, picture, source, iframe, embed, object, param, video, audio, track, map, area, canvas,
}

// Tables
tag_constructors! {
	table, caption, colgroup, col, thead, tbody, tfoot, tr, th, td,
}

// Forms and interactive elements
tag_constructors! {
	form, fieldset, legend, label, input, button, select, datalist, optgroup, option, textarea,
	output, progress, meter, details, summary, dialog,
}

// SVG
tag_constructors! {
	svg, g, defs, symbol, circle, ellipse, line, path, polygon, polyline, rect, text, tspan,
	marker, mask, pattern, image, filter, stop,
}

/// Creates an SVG `<use>` element.
///
/// The trailing underscore keeps the name clear of the `use` keyword and is
/// stripped when rendered.
pub fn use_() -> Element {
	create("use_")
}
