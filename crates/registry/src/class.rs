//! The class seam between the registry and user-supplied element behavior.

use crate::definition::LifecycleCallbacks;
use crate::error::ClassError;
use crate::host::Element;

/// A custom element class: the typed stand-in for the constructor value
/// handed to [`define`].
///
/// [`construct`] is invoked by the host's upgrade protocol once per
/// upgraded element. [`callbacks`] and [`observed_attributes`] are the
/// discovery step `define` runs during its validation phase; either may
/// fail, in which case `define` drops the definition without surfacing
/// the error (see [`define`] for the contract).
///
/// [`define`]: crate::CustomElementRegistry::define
/// [`construct`]: ElementClass::construct
/// [`callbacks`]: ElementClass::callbacks
/// [`observed_attributes`]: ElementClass::observed_attributes
pub trait ElementClass {
	/// Runs the class constructor against an element being upgraded.
	///
	/// An error marks the element as failed; it does not abort the
	/// surrounding upgrade batch.
	fn construct(&self, element: &dyn Element) -> Result<(), ClassError>;

	/// Discovers the optional lifecycle behaviors this class supplies.
	fn callbacks(&self) -> Result<LifecycleCallbacks, ClassError> {
		Ok(LifecycleCallbacks::default())
	}

	/// Discovers the attribute names this class observes.
	fn observed_attributes(&self) -> Result<Vec<Box<str>>, ClassError> {
		Ok(Vec::new())
	}

	/// Whether this handle can actually be constructed.
	///
	/// Hosts bridging dynamic runtimes may hand the registry values that
	/// turn out not to be classes at all; those report false here and
	/// `define` rejects them up front.
	fn is_constructible(&self) -> bool {
		true
	}
}
