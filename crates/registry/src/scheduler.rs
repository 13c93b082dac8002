//! Flush scheduling indirection.
//!
//! `define` batches upgrade work and asks the scheduler to run a flush;
//! the scheduler decides *when* the flush body actually executes. The
//! default runs it synchronously, and [`wrap_flush_callback`] lets
//! external code defer it (e.g. to a rendering frame boundary).
//!
//! [`wrap_flush_callback`]: crate::CustomElementRegistry::wrap_flush_callback

use std::sync::Arc;

/// A pending flush body. Runs the document walk and upgrade batch when
/// invoked. Schedulers may hold onto it and invoke it more than once;
/// every invocation past the first is a no-op (the flush re-checks its
/// own guard).
pub type Flush = Arc<dyn Fn()>;

/// Decides when a pending flush runs.
pub type FlushScheduler = Arc<dyn Fn(Flush)>;

/// The default scheduler: run the flush on the spot.
pub(crate) fn synchronous() -> FlushScheduler {
	Arc::new(|flush: Flush| flush())
}

/// Composes `outer` around `inner`: the returned scheduler hands `outer`
/// a thunk that runs `inner` with the pending flush body.
///
/// Wraps stack; the most recently installed wrapper runs outermost.
pub(crate) fn wrap(inner: FlushScheduler, outer: impl Fn(Flush) + 'static) -> FlushScheduler {
	Arc::new(move |flush: Flush| {
		let inner = inner.clone();
		outer(Arc::new(move || inner(flush.clone())));
	})
}
