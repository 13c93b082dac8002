//! Definition records and the namespaces they are registered under.

use std::fmt;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::class::ElementClass;
use crate::host::ElementRef;

/// URI of the default (HTML) namespace.
pub const HTML_NAMESPACE_URI: &str = "http://www.w3.org/1999/xhtml";

/// Element namespace: the distinguished HTML default plus arbitrary
/// custom namespaces.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum Namespace {
	/// The default namespace; the only one whose local names are subject
	/// to the custom name syntax check.
	#[default]
	Html,
	/// Any other namespace, identified by URI.
	Custom(Arc<str>),
}

impl Namespace {
	/// Maps a namespace URI to a [`Namespace`], folding the HTML URI into
	/// [`Namespace::Html`].
	pub fn from_uri(uri: &str) -> Self {
		if uri == HTML_NAMESPACE_URI {
			Self::Html
		} else {
			Self::Custom(Arc::from(uri))
		}
	}

	/// Returns the namespace URI.
	pub fn uri(&self) -> &str {
		match self {
			Self::Html => HTML_NAMESPACE_URI,
			Self::Custom(uri) => uri,
		}
	}

	/// Returns true for the default namespace.
	pub fn is_html(&self) -> bool {
		matches!(self, Self::Html)
	}
}

impl fmt::Display for Namespace {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.uri())
	}
}

/// Callback invoked when an element is connected, disconnected, or
/// adopted into another document.
pub type LifecycleCallback = Arc<dyn Fn(&dyn crate::host::Element)>;

/// Callback invoked when an observed attribute changes.
pub type AttributeChangedCallback = Arc<dyn Fn(&dyn crate::host::Element, &AttributeChange)>;

/// One observed-attribute mutation, as reported to
/// [`LifecycleCallbacks::attribute_changed`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeChange {
	/// Attribute local name.
	pub name: Box<str>,
	/// Previous value, if any.
	pub old: Option<Box<str>>,
	/// New value; `None` when the attribute was removed.
	pub new: Option<Box<str>>,
	/// Attribute namespace URI, if any.
	pub namespace: Option<Box<str>>,
}

/// The up-to-four optional lifecycle behaviors a class may supply.
///
/// Discovered once during [`define`] and stored on the [`Definition`];
/// absent fields mean the host skips that notification entirely.
///
/// [`define`]: crate::CustomElementRegistry::define
#[derive(Clone, Default)]
pub struct LifecycleCallbacks {
	/// Element inserted into the document.
	pub connected: Option<LifecycleCallback>,
	/// Element removed from the document.
	pub disconnected: Option<LifecycleCallback>,
	/// Element adopted into another document.
	pub adopted: Option<LifecycleCallback>,
	/// Observed attribute added, changed, or removed.
	pub attribute_changed: Option<AttributeChangedCallback>,
}

impl fmt::Debug for LifecycleCallbacks {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("LifecycleCallbacks")
			.field("connected", &self.connected.is_some())
			.field("disconnected", &self.disconnected.is_some())
			.field("adopted", &self.adopted.is_some())
			.field("attribute_changed", &self.attribute_changed.is_some())
			.finish()
	}
}

/// A registered custom element definition.
///
/// Created once inside [`define`], stored permanently, never mutated
/// (the construction stack is interior state owned by the host's upgrade
/// protocol, not part of the definition's identity).
///
/// [`define`]: crate::CustomElementRegistry::define
pub struct Definition {
	/// Local element name, unique per namespace.
	pub local_name: Box<str>,
	/// Namespace the name was registered under.
	pub namespace: Namespace,
	/// The class handle supplied to `define`; returned by `get` and
	/// invoked by the host during upgrade.
	pub class: Arc<dyn ElementClass>,
	/// Lifecycle behaviors discovered from the class.
	pub callbacks: LifecycleCallbacks,
	/// Attribute names the class observes.
	pub observed_attributes: Box<[Box<str>]>,
	construction_stack: Mutex<Vec<ElementRef>>,
}

impl Definition {
	/// Builds a definition with an empty construction stack.
	pub fn new(
		local_name: impl Into<Box<str>>,
		namespace: Namespace,
		class: Arc<dyn ElementClass>,
		callbacks: LifecycleCallbacks,
		observed_attributes: Vec<Box<str>>,
	) -> Self {
		Self {
			local_name: local_name.into(),
			namespace,
			class,
			callbacks,
			observed_attributes: observed_attributes.into_boxed_slice(),
			construction_stack: Mutex::new(Vec::new()),
		}
	}

	/// Returns true when `name` is one of the observed attributes.
	pub fn observes_attribute(&self, name: &str) -> bool {
		self.observed_attributes.iter().any(|a| &**a == name)
	}

	/// Pushes an element onto the construction stack.
	///
	/// Used by the host's upgrade protocol to track re-entrant
	/// construction of the same definition.
	pub fn push_constructing(&self, element: ElementRef) {
		self.construction_stack.lock().push(element);
	}

	/// Pops the most recently pushed element, if any.
	pub fn pop_constructing(&self) -> Option<ElementRef> {
		self.construction_stack.lock().pop()
	}

	/// Returns true while `element` is on the construction stack.
	///
	/// A document pass that runs inside a constructor (re-entrant
	/// definition, tree mutation) uses this to avoid upgrading the same
	/// element twice.
	pub fn is_constructing(&self, element: &ElementRef) -> bool {
		self.construction_stack
			.lock()
			.iter()
			.any(|e| Arc::ptr_eq(e, element))
	}

	/// Returns the construction stack depth.
	pub fn construction_depth(&self) -> usize {
		self.construction_stack.lock().len()
	}
}

impl fmt::Debug for Definition {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Definition")
			.field("local_name", &self.local_name)
			.field("namespace", &self.namespace)
			.field("callbacks", &self.callbacks)
			.field("observed_attributes", &self.observed_attributes)
			.finish_non_exhaustive()
	}
}
