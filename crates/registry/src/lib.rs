//! Custom element definition registry and batched upgrade scheduler.
//!
//! Reimplements, in library code, the algorithm by which a host runtime
//! associates elements already present in a document tree with classes
//! registered after the fact, and invokes their lifecycle protocol in a
//! well-defined order.
//!
//! # Mental model
//!
//! 1. **Registration:** [`CustomElementRegistry::define`] validates a
//!    name/class pair, records a [`Definition`], and queues it as
//!    pending.
//! 2. **Scheduling:** the first pending definition of a batch asks the
//!    flush scheduler to run a flush (synchronously by default;
//!    [`CustomElementRegistry::wrap_flush_callback`] overrides when).
//! 3. **Flush:** one document-order walk partitions unupgraded elements
//!    into those matching *stable* definitions (registered before this
//!    batch) and those matching *pending* ones. Stable elements upgrade
//!    first in document order, then each pending definition's elements
//!    in registration order.
//! 4. **Notification:** [`CustomElementRegistry::when_defined`] futures
//!    settle as each pending definition's first batch completes.
//!
//! The document tree is an external collaborator: hosts implement
//! [`UpgradeHost`] (walk + upgrade protocol) and hand out [`Element`]
//! handles carrying a three-valued upgrade tag. The registry never holds
//! a lock across a host call, so lifecycle callbacks may re-enter it;
//! definitions registered mid-flush wait for the next flush.
//!
//! # Concurrency
//!
//! Single-threaded cooperative. The `flush_pending` and `defining` flags
//! are the sole mutual-exclusion devices: they prevent overlapping flush
//! passes and overlapping `define` validation phases respectively.

mod class;
mod deferred;
mod definition;
mod error;
mod host;
pub mod names;
mod registry;
mod scheduler;
mod store;

pub use class::ElementClass;
pub use deferred::Deferred;
pub use definition::{
	AttributeChange, AttributeChangedCallback, Definition, HTML_NAMESPACE_URI, LifecycleCallback,
	LifecycleCallbacks, Namespace,
};
pub use error::{ClassError, DefineError, InvalidName};
pub use host::{ConstructionObserver, Element, ElementRef, UpgradeHost, UpgradeState};
pub use registry::{CustomElementRegistry, DefineOptions};
pub use scheduler::{Flush, FlushScheduler};

#[cfg(test)]
mod tests;
