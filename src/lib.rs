//! # tagtree
//!
//! A functional builder for HTML and SVG markup trees.
//!
//! Elements are created empty and then extended any number of times with
//! children or attributes. Each extend call mutates the element in place and
//! hands back the same instance, so a tree reads like nested function calls
//! and a half-built element can be captured and extended again later.
//!
//! ## Example
//!
//! ```
//! use tagtree::tags::{body, h1, html, img, p};
//!
//! let logo = img().attrs([("src", "logo.png"), ("alt", "")])?;
//! let page = html().child(body().children((
//!     h1().attr("class_", "title")?.child("Welcome")?,
//!     logo,
//!     p().child("Made with tagtree.")?,
//! ))?)?;
//!
//! assert_eq!(
//!     page.render()?,
//!     concat!(
//!         "<!DOCTYPE html><html><body>",
//!         r#"<h1 class="title">Welcome</h1>"#,
//!         r#"<img src="logo.png" alt=""/>"#,
//!         "<p>Made with tagtree.</p>",
//!         "</body></html>",
//!     )
//! );
//! # Ok::<(), tagtree::BuildError>(())
//! ```
//!
//! ## Feature Flags
//!
//! - `tags` (default) - named constructors such as [`tags::div`]
//! - `serde` - serializable tree snapshots (`Element::snapshot`)

pub use tagtree_core::*;

pub mod prelude;
#[cfg(feature = "tags")]
pub mod tags;
