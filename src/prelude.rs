//! Common imports.
//!
//! ```
//! use tagtree::prelude::*;
//!
//! let el: Element = create("span").child("ok")?;
//! assert_eq!(render(&el)?, "<span>ok</span>");
//! # Ok::<(), BuildError>(())
//! ```

pub use tagtree_core::{
	AttrValue, BuildError, Children, Element, Extend, IntoChildren, Node, create, escape_html,
	render, render_fragment,
};
