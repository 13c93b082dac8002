//! The registry orchestrator: definition intake, flush batching, and
//! `when_defined` notification.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use parking_lot::Mutex;
use rustc_hash::FxHashMap as HashMap;

use crate::class::ElementClass;
use crate::deferred::Deferred;
use crate::definition::{Definition, LifecycleCallbacks, Namespace};
use crate::error::{ClassError, DefineError, InvalidName};
use crate::host::{ConstructionObserver, ElementRef, UpgradeHost};
use crate::names::is_valid_custom_element_name;
use crate::scheduler::{self, Flush, FlushScheduler};
use crate::store::DefinitionStore;

/// Options recognized by [`CustomElementRegistry::define`].
#[derive(Debug, Clone, Default)]
pub struct DefineOptions {
	/// Namespace to register under; `None` means the default (HTML)
	/// namespace.
	pub namespace: Option<Namespace>,
}

impl DefineOptions {
	/// Options targeting the given namespace.
	pub fn in_namespace(namespace: Namespace) -> Self {
		Self {
			namespace: Some(namespace),
		}
	}
}

/// One registry of custom element definitions for one document.
///
/// Cheap to clone; clones share state. The registry is single-threaded
/// cooperative: host callbacks run synchronously and may re-enter the
/// registry (a lifecycle callback may call [`define`], which is why no
/// lock is held across any host call).
///
/// [`define`]: CustomElementRegistry::define
#[derive(Clone)]
pub struct CustomElementRegistry {
	inner: Arc<RegistryInner>,
}

struct RegistryInner {
	host: Arc<dyn UpgradeHost>,
	store: Mutex<DefinitionStore>,
	/// Definitions awaiting their first upgrade pass, in registration
	/// order.
	pending: Mutex<Vec<Arc<Definition>>>,
	when_defined: Mutex<HashMap<Namespace, HashMap<Box<str>, Deferred>>>,
	flush_callback: Mutex<FlushScheduler>,
	/// Set from the moment a flush is scheduled until its body begins;
	/// guards against double-scheduling.
	flush_pending: AtomicBool,
	/// Set for the synchronous duration of one `define` call's
	/// validation phase; re-entrant `define` calls fail while held.
	defining: AtomicBool,
	observer: Mutex<Option<Arc<dyn ConstructionObserver>>>,
}

impl CustomElementRegistry {
	/// Creates a registry over the given document host.
	pub fn new(host: Arc<dyn UpgradeHost>) -> Self {
		Self::build(host, None)
	}

	/// Creates a registry whose automatic flush triggering is backed by
	/// `observer`; [`wrap_flush_callback`] disconnects it.
	///
	/// [`wrap_flush_callback`]: CustomElementRegistry::wrap_flush_callback
	pub fn with_observer(host: Arc<dyn UpgradeHost>, observer: Arc<dyn ConstructionObserver>) -> Self {
		Self::build(host, Some(observer))
	}

	fn build(host: Arc<dyn UpgradeHost>, observer: Option<Arc<dyn ConstructionObserver>>) -> Self {
		Self {
			inner: Arc::new(RegistryInner {
				host,
				store: Mutex::new(DefinitionStore::default()),
				pending: Mutex::new(Vec::new()),
				when_defined: Mutex::new(HashMap::default()),
				flush_callback: Mutex::new(scheduler::synchronous()),
				flush_pending: AtomicBool::new(false),
				defining: AtomicBool::new(false),
				observer: Mutex::new(observer),
			}),
		}
	}

	/// Registers `class` under `local_name` and queues the first upgrade
	/// pass for it.
	///
	/// Validation failures surface as [`DefineError`]; see the variants
	/// for the four cases and their order. Errors raised by the class
	/// during lifecycle discovery do *not* surface: `define` returns
	/// `Ok(())` and stores nothing. Callers relying on a non-throwing
	/// `define` under malformed classes depend on this, so it is part of
	/// the contract rather than a bug to fix; the drop is logged at
	/// debug level.
	pub fn define(
		&self,
		local_name: &str,
		class: Arc<dyn ElementClass>,
		options: DefineOptions,
	) -> Result<(), DefineError> {
		if !class.is_constructible() {
			return Err(DefineError::NotConstructible);
		}

		let namespace = options.namespace.unwrap_or_default();
		// Only the default namespace restricts local names.
		if namespace.is_html() && !is_valid_custom_element_name(local_name) {
			return Err(InvalidName::new(local_name).into());
		}

		if self.inner.store.lock().get(local_name, &namespace).is_some() {
			return Err(DefineError::AlreadyDefined(local_name.into()));
		}

		if self.inner.defining.swap(true, Ordering::AcqRel) {
			return Err(DefineError::DefinitionInProgress);
		}
		let inspected = Self::inspect_class(&*class);
		self.inner.defining.store(false, Ordering::Release);

		let (callbacks, observed_attributes) = match inspected {
			Ok(parts) => parts,
			Err(err) => {
				tracing::debug!(
					local_name,
					namespace = %namespace,
					error = %err,
					"class inspection failed; definition dropped",
				);
				return Ok(());
			}
		};

		let definition = Arc::new(Definition::new(
			local_name,
			namespace.clone(),
			class,
			callbacks,
			observed_attributes,
		));
		self.inner.store.lock().insert(definition.clone());
		self.inner.pending.lock().push(definition);
		tracing::debug!(local_name, namespace = %namespace, "custom element defined");

		// If a flush has been scheduled and has not started yet, the
		// new definition rides along with it.
		if !self.inner.flush_pending.swap(true, Ordering::AcqRel) {
			let registry = self.clone();
			let scheduler = self.inner.flush_callback.lock().clone();
			scheduler(Arc::new(move || registry.flush()));
		}

		Ok(())
	}

	/// The discovery span of `define`, fenced by the `defining` flag.
	fn inspect_class(
		class: &dyn ElementClass,
	) -> Result<(LifecycleCallbacks, Vec<Box<str>>), ClassError> {
		let callbacks = class.callbacks()?;
		let observed_attributes = class.observed_attributes()?;
		Ok((callbacks, observed_attributes))
	}

	/// Returns the class registered for a name, if any.
	///
	/// `None` for `namespace` means the default (HTML) namespace.
	pub fn get(&self, local_name: &str, namespace: Option<Namespace>) -> Option<Arc<dyn ElementClass>> {
		let namespace = namespace.unwrap_or_default();
		let definition = self.inner.store.lock().get(local_name, &namespace)?;
		Some(definition.class.clone())
	}

	/// Returns a future settling once `local_name`'s first upgrade batch
	/// completes; immediately if that batch already ran.
	///
	/// `None` for `namespace` means the default (HTML) namespace. An
	/// invalid custom name in the default namespace yields an
	/// `Err(InvalidName)` from the future; nothing else can fail.
	pub fn when_defined(
		&self,
		local_name: &str,
		namespace: Option<Namespace>,
	) -> impl Future<Output = Result<(), InvalidName>> + use<> {
		let namespace = namespace.unwrap_or_default();
		let outcome = if namespace.is_html() && !is_valid_custom_element_name(local_name) {
			Err(InvalidName::new(local_name))
		} else {
			Ok(self.when_defined_deferred(local_name, namespace))
		};

		async move {
			let deferred = outcome?;
			deferred.wait().await;
			Ok(())
		}
	}

	/// Finds or creates the deferred for a (namespace, local name) pair.
	fn when_defined_deferred(&self, local_name: &str, namespace: Namespace) -> Deferred {
		let (deferred, created) = {
			let mut table = self.inner.when_defined.lock();
			let names = table.entry(namespace.clone()).or_default();
			match names.get(local_name) {
				Some(prior) => (prior.clone(), false),
				None => {
					let deferred = Deferred::new();
					names.insert(local_name.into(), deferred.clone());
					(deferred, true)
				}
			}
		};

		// Resolve immediately only if the name already has a definition
		// *and* the document walk for that definition has already run.
		if created {
			let defined = self.inner.store.lock().get(local_name, &namespace).is_some();
			let awaiting_first_flush = self
				.inner
				.pending
				.lock()
				.iter()
				.any(|d| d.namespace == namespace && &*d.local_name == local_name);
			if defined && !awaiting_first_flush {
				deferred.resolve();
			}
		}

		deferred
	}

	/// Takes control of flush timing: `outer` receives a thunk that runs
	/// the previously installed scheduler with the pending flush body.
	///
	/// Also disconnects the automatic flush-triggering observation, if
	/// the registry was built with one. Wraps compose; the most recently
	/// installed wrapper runs outermost.
	pub fn wrap_flush_callback(&self, outer: impl Fn(Flush) + 'static) {
		if let Some(observer) = self.inner.observer.lock().take() {
			observer.disconnect();
		}
		let mut slot = self.inner.flush_callback.lock();
		*slot = scheduler::wrap(slot.clone(), outer);
	}

	/// One batch-processing pass: walks the document once and upgrades
	/// every eligible element.
	fn flush(&self) {
		// The scheduler may invoke its thunk more than once, or after a
		// synchronous nested flush already ran; only one pass per
		// scheduling is allowed.
		if !self.inner.flush_pending.swap(false, Ordering::AcqRel) {
			return;
		}

		// Snapshot: definitions registered re-entrantly by upgrade
		// callbacks below wait for the next flush.
		let pending: Vec<Arc<Definition>> = std::mem::take(&mut *self.inner.pending.lock());

		// Pre-register buckets for exactly the names defined this round.
		let mut pending_elements: HashMap<Namespace, HashMap<Box<str>, Vec<ElementRef>>> =
			HashMap::default();
		for definition in &pending {
			pending_elements
				.entry(definition.namespace.clone())
				.or_default()
				.insert(definition.local_name.clone(), Vec::new());
		}

		// Unupgraded elements matching definitions that predate this
		// batch, in document order.
		let mut stable_elements: Vec<ElementRef> = Vec::new();

		self.inner.host.walk_tree(&mut |element| {
			// Skip elements that already upgraded or failed to upgrade.
			if element.state().is_some() {
				return;
			}

			let namespace = element.namespace();
			let bucket = pending_elements
				.get_mut(&namespace)
				.and_then(|names| names.get_mut(element.local_name()));
			if let Some(bucket) = bucket {
				bucket.push(element);
			} else if self
				.inner
				.store
				.lock()
				.get(element.local_name(), &namespace)
				.is_some()
			{
				stable_elements.push(element);
			}
		});

		tracing::trace!(
			pending_definitions = pending.len(),
			stable_elements = stable_elements.len(),
			"flushing upgrade batch",
		);

		// Stable definitions upgrade first, strictly in document order.
		for element in &stable_elements {
			let definition = self
				.inner
				.store
				.lock()
				.get(element.local_name(), &element.namespace());
			if let Some(definition) = definition {
				self.inner.host.upgrade_element(element, &definition);
			}
		}

		// Then this batch's definitions, in registration order; each
		// bucket already holds its elements in document order.
		for definition in pending {
			let elements = pending_elements
				.get_mut(&definition.namespace)
				.and_then(|names| names.remove(&definition.local_name))
				.unwrap_or_default();
			for element in &elements {
				self.inner.host.upgrade_element(element, &definition);
			}

			let deferred = self
				.inner
				.when_defined
				.lock()
				.get(&definition.namespace)
				.and_then(|names| names.get(&definition.local_name))
				.cloned();
			if let Some(deferred) = deferred {
				deferred.resolve();
			}
		}
	}
}

impl std::fmt::Debug for CustomElementRegistry {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("CustomElementRegistry")
			.field("pending", &self.inner.pending.lock().len())
			.field("flush_pending", &self.inner.flush_pending.load(Ordering::Acquire))
			.finish_non_exhaustive()
	}
}
