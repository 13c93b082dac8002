//! Insert-only definition storage keyed by (namespace, local name).

use std::sync::Arc;

use rustc_hash::FxHashMap as HashMap;

use crate::definition::{Definition, Namespace};

/// Mapping from (namespace, local name) to the registered definition.
///
/// A pair, once set, is never overwritten or removed; the registry checks
/// for existence before inserting.
#[derive(Debug, Default)]
pub(crate) struct DefinitionStore {
	by_namespace: HashMap<Namespace, HashMap<Box<str>, Arc<Definition>>>,
}

impl DefinitionStore {
	/// Looks up the definition for a (namespace, local name) pair.
	pub fn get(&self, local_name: &str, namespace: &Namespace) -> Option<Arc<Definition>> {
		self.by_namespace.get(namespace)?.get(local_name).cloned()
	}

	/// Inserts a definition under its own (namespace, local name) pair.
	///
	/// The pair must not already be present.
	pub fn insert(&mut self, definition: Arc<Definition>) {
		let names = self.by_namespace.entry(definition.namespace.clone()).or_default();
		let prior = names.insert(definition.local_name.clone(), definition);
		debug_assert!(prior.is_none(), "definition pair inserted twice");
	}

	/// Number of registered definitions across all namespaces.
	#[cfg(test)]
	pub fn len(&self) -> usize {
		self.by_namespace.values().map(|names| names.len()).sum()
	}
}
