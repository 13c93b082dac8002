//! `when_defined` settlement timing.

use std::task::Poll;

use crate::definition::Namespace;
use crate::registry::{CustomElementRegistry, DefineOptions};

use super::fixtures::{FakeDocument, ManualScheduler, TestClass, poll_once};

#[tokio::test]
async fn settles_after_the_first_flush_for_the_name() {
	let doc = FakeDocument::new();
	let registry = CustomElementRegistry::new(doc);

	let mut waiting = Box::pin(registry.when_defined("x-widget", None));
	assert!(poll_once(waiting.as_mut()).is_pending(), "not defined yet");

	registry
		.define("x-widget", TestClass::class(), DefineOptions::default())
		.expect("define should succeed");

	waiting.await.expect("future must settle successfully");
}

#[tokio::test]
async fn settles_immediately_for_an_already_flushed_name() {
	let doc = FakeDocument::new();
	let registry = CustomElementRegistry::new(doc);

	registry
		.define("x-widget", TestClass::class(), DefineOptions::default())
		.expect("define should succeed");

	// Definition exists and its first flush already ran: same turn.
	let mut fut = Box::pin(registry.when_defined("x-widget", None));
	assert_eq!(poll_once(fut.as_mut()), Poll::Ready(Ok(())));
}

#[tokio::test]
async fn stays_pending_while_the_definition_awaits_its_first_flush() {
	let doc = FakeDocument::new();
	let registry = CustomElementRegistry::new(doc);
	let scheduler = ManualScheduler::install(&registry);

	registry
		.define("x-widget", TestClass::class(), DefineOptions::default())
		.expect("define should succeed");

	// Defined, but the upgrade batch has not run.
	let mut fut = Box::pin(registry.when_defined("x-widget", None));
	assert!(poll_once(fut.as_mut()).is_pending(), "first flush has not run");

	scheduler.run_all();
	assert_eq!(poll_once(fut.as_mut()), Poll::Ready(Ok(())));
}

#[tokio::test]
async fn rejects_invalid_names_asynchronously() {
	let doc = FakeDocument::new();
	let registry = CustomElementRegistry::new(doc);

	let err = registry
		.when_defined("widget", None)
		.await
		.expect_err("hyphen-less name must reject");
	assert_eq!(err.local_name(), "widget");
}

#[tokio::test]
async fn invalid_names_are_fine_outside_the_default_namespace() {
	let doc = FakeDocument::new();
	let registry = CustomElementRegistry::new(doc);
	let ns = Namespace::from_uri("urn:example:widgets");

	let mut fut = Box::pin(registry.when_defined("widget", Some(ns.clone())));
	assert!(poll_once(fut.as_mut()).is_pending());

	registry
		.define("widget", TestClass::class(), DefineOptions::in_namespace(ns))
		.expect("define should succeed");
	fut.await.expect("future must settle successfully");
}

#[tokio::test]
async fn all_observers_of_a_name_settle() {
	let doc = FakeDocument::new();
	let registry = CustomElementRegistry::new(doc);

	let first = registry.when_defined("x-widget", None);
	let second = registry.when_defined("x-widget", None);

	registry
		.define("x-widget", TestClass::class(), DefineOptions::default())
		.expect("define should succeed");

	first.await.expect("first observer settles");
	second.await.expect("second observer settles");
}

#[tokio::test]
async fn a_flush_resolves_each_name_exactly_once() {
	let doc = FakeDocument::new();
	let registry = CustomElementRegistry::new(doc.clone());
	let scheduler = ManualScheduler::install(&registry);

	let mut x = Box::pin(registry.when_defined("x-widget", None));
	let mut y = Box::pin(registry.when_defined("y-widget", None));

	registry
		.define("x-widget", TestClass::class(), DefineOptions::default())
		.expect("define x");
	registry
		.define("y-widget", TestClass::class(), DefineOptions::default())
		.expect("define y");

	assert!(poll_once(x.as_mut()).is_pending());
	assert!(poll_once(y.as_mut()).is_pending());

	scheduler.run_all();
	assert_eq!(poll_once(x.as_mut()), Poll::Ready(Ok(())));
	assert_eq!(poll_once(y.as_mut()), Poll::Ready(Ok(())));

	// An empty re-run settles nothing new and performs no work.
	scheduler.run_all();
	assert_eq!(doc.walk_count(), 1);
}

#[tokio::test]
async fn namespaces_keep_separate_tables() {
	let doc = FakeDocument::new();
	let registry = CustomElementRegistry::new(doc);
	let ns = Namespace::from_uri("urn:example:widgets");

	let mut in_ns = Box::pin(registry.when_defined("x-widget", Some(ns)));
	registry
		.define("x-widget", TestClass::class(), DefineOptions::default())
		.expect("define in html namespace");

	assert!(
		poll_once(in_ns.as_mut()).is_pending(),
		"the html definition must not settle the custom-namespace waiter"
	);
}
