//! Error taxonomy for registration, inspection, and upgrade failures.

/// A local name that fails the custom element name syntax check.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("'{0}' is not a valid custom element name")]
pub struct InvalidName(pub Box<str>);

impl InvalidName {
	/// Creates an error for the given local name.
	pub fn new(local_name: impl Into<Box<str>>) -> Self {
		Self(local_name.into())
	}

	/// Returns the offending local name.
	pub fn local_name(&self) -> &str {
		&self.0
	}
}

/// Validation failures surfaced synchronously by [`define`].
///
/// These are the only errors visible to the immediate caller; inspection
/// and upgrade failures are isolated (see [`ClassError`]).
///
/// [`define`]: crate::CustomElementRegistry::define
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DefineError {
	/// The supplied class handle reported itself as not constructible.
	#[error("custom element classes must be constructible")]
	NotConstructible,

	/// The local name fails the custom name syntax check (default
	/// namespace only).
	#[error(transparent)]
	Name(#[from] InvalidName),

	/// The (namespace, local name) pair already has a definition.
	#[error("a custom element with name '{0}' has already been defined")]
	AlreadyDefined(Box<str>),

	/// Another `define` call is already in its validation phase.
	#[error("a custom element is already being defined")]
	DefinitionInProgress,
}

/// Error raised by an [`ElementClass`] during lifecycle discovery or
/// element construction.
///
/// Discovery errors are swallowed by `define` (the definition is silently
/// dropped); construction errors mark the element as failed without
/// aborting the surrounding upgrade batch.
///
/// [`ElementClass`]: crate::ElementClass
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct ClassError {
	message: Box<str>,
}

impl ClassError {
	/// Creates an error with the given message.
	pub fn new(message: impl Into<Box<str>>) -> Self {
		Self {
			message: message.into(),
		}
	}

	/// Returns the error message.
	pub fn message(&self) -> &str {
		&self.message
	}
}
