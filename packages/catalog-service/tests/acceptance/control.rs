use std::time::Duration;

use catalog_domain::{IndexPage, ProductSearchCriteria};
use catalog_service::{
	BoxFuture, CancelHandle, Error, Reconciler, Result, SearchControl, SearchIndex, Termination,
	cancellation,
};

use super::{
	MemoryStore, RankedIndex, SlowIndex, harness, ids, keyword_criteria, numbered_ids,
	product_criteria, product_ids, test_config,
};

/// Pulls the cancel handle after its first answer, the way a disconnecting caller would.
struct CancellingIndex {
	inner: RankedIndex,
	handle: CancelHandle,
}
impl SearchIndex for CancellingIndex {
	fn query<'a>(&'a self, criteria: &'a ProductSearchCriteria) -> BoxFuture<'a, Result<IndexPage>> {
		Box::pin(async move {
			let page = self.inner.query(criteria).await;

			self.handle.cancel();

			page
		})
	}
}

fn even_ids(count: usize) -> Vec<String> {
	numbered_ids("p", count).into_iter().step_by(2).collect()
}

#[tokio::test]
async fn cancelled_before_start_queries_nothing() {
	let (handle, signal) = cancellation();
	let index = RankedIndex::new(ids(&["a"]));
	let store = MemoryStore::with_ids(&ids(&["a"]));

	handle.cancel();

	let err = Reconciler::new(&index, &store)
		.run(product_criteria(0, 1), &SearchControl::default().with_cancel(signal))
		.await
		.expect_err("Expected cancellation.");

	assert!(matches!(err, Error::Cancelled), "Unexpected error: {err:?}");
	assert_eq!(index.query_count(), 0);
	assert_eq!(store.lookup_count(), 0);
}

#[tokio::test]
async fn cancellation_between_rounds_discards_partial_results() {
	let (handle, signal) = cancellation();
	let index = CancellingIndex { inner: RankedIndex::new(numbered_ids("p", 20)), handle };
	let store = MemoryStore::with_ids(&even_ids(20));
	let err = Reconciler::new(&index, &store)
		.run(product_criteria(0, 4), &SearchControl::default().with_cancel(signal))
		.await
		.expect_err("Expected cancellation.");

	assert!(matches!(err, Error::Cancelled), "Unexpected error: {err:?}");
	assert_eq!(index.inner.query_count(), 1);
	assert_eq!(store.lookup_count(), 1);
}

#[tokio::test]
async fn cancellation_through_the_service_is_an_error() {
	let (handle, signal) = cancellation();
	let h = harness(test_config(), RankedIndex::new(ids(&["a"])), MemoryStore::empty(), Some(true));

	handle.cancel();

	let err = h
		.service
		.search_with_control(keyword_criteria("lamp", 0, 1), &SearchControl::default().with_cancel(signal))
		.await
		.expect_err("Expected cancellation.");

	assert!(matches!(err, Error::Cancelled), "Unexpected error: {err:?}");
}

#[tokio::test(start_paused = true)]
async fn elapsed_deadline_returns_the_partial_result() {
	let index =
		SlowIndex { inner: RankedIndex::new(numbered_ids("p", 40)), delay: Duration::from_millis(100) };
	let store = MemoryStore::with_ids(&even_ids(40));
	let control = SearchControl::default().with_timeout(Duration::from_millis(250));
	let reconciled = Reconciler::new(&index, &store)
		.run(product_criteria(0, 4), &control)
		.await
		.expect("An elapsed deadline is not an error.");

	assert_eq!(reconciled.termination, Termination::DeadlineExceeded);
	assert_eq!(reconciled.index_queries, 2);
	assert_eq!(product_ids(&reconciled.products), ids(&["p000", "p002", "p004"]));
	assert_eq!(reconciled.total_count, Some(40));
}

#[tokio::test(start_paused = true)]
async fn configured_deadline_applies_when_the_caller_sets_none() {
	let mut cfg = test_config();

	cfg.search.deadline_ms = Some(250);

	let index =
		SlowIndex { inner: RankedIndex::new(numbered_ids("p", 40)), delay: Duration::from_millis(100) };
	let h = harness(cfg, index, MemoryStore::with_ids(&even_ids(40)), Some(true));
	let result = h.service.search(keyword_criteria("lamp", 0, 4)).await.expect("Search failed.");

	assert_eq!(product_ids(&result.products), ids(&["p000", "p002", "p004"]));
	assert_eq!(result.products_total_count, 40);
	assert_eq!(h.index.inner.query_count(), 2);
}

#[tokio::test(start_paused = true)]
async fn caller_deadline_wins_over_the_configured_one() {
	let mut cfg = test_config();

	cfg.search.deadline_ms = Some(10_000);

	let index =
		SlowIndex { inner: RankedIndex::new(numbered_ids("p", 40)), delay: Duration::from_millis(100) };
	let h = harness(cfg, index, MemoryStore::with_ids(&even_ids(40)), Some(true));
	let control = SearchControl::default().with_timeout(Duration::from_millis(50));
	let result = h
		.service
		.search_with_control(keyword_criteria("lamp", 0, 4), &control)
		.await
		.expect("Search failed.");

	assert!(result.products.is_empty());
	assert_eq!(result.products_total_count, 0);
}
