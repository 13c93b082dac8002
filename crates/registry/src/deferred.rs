//! One-shot settlement primitive backing [`when_defined`].
//!
//! [`when_defined`]: crate::CustomElementRegistry::when_defined

use tokio_util::sync::CancellationToken;

/// A settle-once signal with any number of observers.
///
/// Starts unsettled; [`resolve`] transitions it exactly once, and further
/// calls are silent no-ops. Observers may [`wait`] before or after
/// settlement and all see the same completion. There is no rejection or
/// cancellation path.
///
/// [`resolve`]: Deferred::resolve
/// [`wait`]: Deferred::wait
#[derive(Debug, Clone, Default)]
pub struct Deferred {
	settled: CancellationToken,
}

impl Deferred {
	/// Creates an unsettled deferred.
	pub fn new() -> Self {
		Self::default()
	}

	/// Settles the deferred, waking all current and future observers.
	pub fn resolve(&self) {
		self.settled.cancel();
	}

	/// Returns true once [`resolve`] has been called.
	///
	/// [`resolve`]: Deferred::resolve
	pub fn is_resolved(&self) -> bool {
		self.settled.is_cancelled()
	}

	/// Completes when the deferred settles; immediately if it already has.
	pub async fn wait(&self) {
		self.settled.cancelled().await;
	}
}
