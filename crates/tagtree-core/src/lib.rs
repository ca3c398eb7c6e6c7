//! # tagtree core
//!
//! Element object model and markup serialization for tagtree.
//!
//! ## Overview
//!
//! - [`create`] builds an empty [`Element`] for any tag name
//! - [`Element::extend`] (and its `children`/`child`/`attrs`/`attr` forms)
//!   merges children or attributes into the same instance
//! - child arguments of any shape are [`flatten`]ed into a linear sequence
//! - [`Element::render`] and [`render_fragment`] serialize to a string
//!
//! Elements are shared handles: extending a clone extends the original.
//! Content is never escaped; see [`escape_html`].
//!
//! ## Example
//!
//! ```
//! use tagtree_core::create;
//!
//! let list = create("ul").children((
//!     create("li").child("x")?,
//!     create("li").child("y")?,
//! ))?;
//! let page = create("div").attr("id", "c")?.child(list)?;
//!
//! assert_eq!(
//!     page.render()?,
//!     r#"<div id="c"><ul><li>x</li><li>y</li></ul></div>"#
//! );
//! # Ok::<(), tagtree_core::BuildError>(())
//! ```
//!
//! ## Feature Flags
//!
//! - `serde` - `Serialize` for [`AttrValue`] and tree snapshots
//!   (`Element::snapshot`)

mod children;
mod element;
mod error;
mod factory;
mod node;
mod render;
#[cfg(feature = "serde")]
mod snapshot;
mod util;

pub use children::{Children, IntoChildren, flatten};
pub use element::{Element, Extend, INTERNAL_PREFIX};
pub use error::{BuildError, Result};
pub use factory::{VOID_TAGS, create, is_void_tag};
pub use node::{AttrValue, Node};
pub use render::{DOCTYPE, canonicalize_name, render, render_fragment};
#[cfg(feature = "serde")]
pub use snapshot::{ElementSnapshot, NodeSnapshot};
pub use util::escape_html;
