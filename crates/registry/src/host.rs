//! Collaborator traits for the external document tree.
//!
//! The registry never walks or mutates a tree itself; the host implements
//! these seams. Everything here is object-safe so hosts can hand out
//! heterogeneous element handles.

use std::sync::Arc;

use crate::definition::{Definition, Namespace};

/// Terminal result of one upgrade attempt on one element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpgradeState {
	/// The construction protocol completed.
	Custom,
	/// The construction protocol raised; the element is never retried.
	Failed,
}

/// A host element handle.
///
/// The registry reads the identity fields and the upgrade tag; only the
/// host's upgrade protocol writes the tag.
pub trait Element {
	/// Local element name.
	fn local_name(&self) -> &str;

	/// Element namespace.
	fn namespace(&self) -> Namespace;

	/// Upgrade tag; `None` means an upgrade has never been attempted.
	fn state(&self) -> Option<UpgradeState>;

	/// Records the result of an upgrade attempt.
	fn set_state(&self, state: UpgradeState);
}

/// Shared handle to a host element.
pub type ElementRef = Arc<dyn Element>;

/// The document tree walker and upgrade applier.
pub trait UpgradeHost {
	/// Walks the whole document in document order, invoking `visit`
	/// exactly once per element.
	fn walk_tree(&self, visit: &mut dyn FnMut(ElementRef));

	/// Runs the host construction protocol for one (element, definition)
	/// pair and sets the element's upgrade tag: [`UpgradeState::Custom`]
	/// on success, [`UpgradeState::Failed`] on any error. Errors never
	/// propagate to the caller.
	fn upgrade_element(&self, element: &ElementRef, definition: &Arc<Definition>);
}

/// Handle to the automatic flush-triggering document observation.
///
/// Disconnected when external code takes over flush scheduling via
/// [`wrap_flush_callback`].
///
/// [`wrap_flush_callback`]: crate::CustomElementRegistry::wrap_flush_callback
pub trait ConstructionObserver {
	/// Stops the observation. Called at most once.
	fn disconnect(&self);
}
