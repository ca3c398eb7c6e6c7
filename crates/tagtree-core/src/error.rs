//! Error types for building and rendering element trees.

/// Result type for element operations.
pub type Result<T> = std::result::Result<T, BuildError>;

/// Errors raised while extending, inspecting or rendering elements.
///
/// Every error is returned at the violating call. A failing extend leaves
/// the element exactly as it was before the call.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BuildError {
	/// Children and attributes were supplied in the same extend call.
	#[error("Accept children or attributes in an extend call, but not both")]
	InvalidUsage,

	/// Children were supplied to a void element.
	#[error("<{tag}> cannot have children")]
	VoidElementChildren {
		/// Tag name of the void element.
		tag: String,
	},

	/// A tag name or attribute key starts with an underscore.
	#[error("Underscore prefix for reserved words not supported, use suffix instead: '{name}'")]
	InvalidName {
		/// The offending name.
		name: String,
	},

	/// The requested attribute is not set.
	#[error("No such attribute: '{key}'")]
	AttributeNotFound {
		/// The requested key.
		key: String,
	},

	/// An internal field was targeted by `set` or `remove`.
	#[error("Internal field is read-only: '{field}'")]
	ReadOnlyField {
		/// The internal field key, including its prefix.
		field: String,
	},

	/// The extend call would make an element its own descendant.
	#[error("<{tag}> cannot contain itself")]
	Cycle {
		/// Tag name of the element being extended.
		tag: String,
	},
}
