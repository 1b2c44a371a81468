use catalog_domain::{Category, SearchCriteria, SearchResponseFlag, SearchResult};
use catalog_service::Error;

use super::{
	MemoryStore, RankedIndex, SpyLegacy, harness, harness_with_legacy, ids, keyword_criteria,
	product, product_ids, test_config,
};

fn legacy_answer() -> SearchResult {
	SearchResult {
		categories: vec![Category {
			id: "lighting".to_string(),
			catalog_id: "main".to_string(),
			parent_id: None,
			code: "LGT".to_string(),
			name: "Lighting".to_string(),
			is_active: true,
		}],
		products: vec![product("legacy-1")],
		products_total_count: 17,
		aggregations: Vec::new(),
	}
}

async fn assert_served_by_legacy(criteria: SearchCriteria, toggle: Option<bool>) {
	let h = harness_with_legacy(
		test_config(),
		RankedIndex::new(ids(&["a"])),
		MemoryStore::with_ids(&ids(&["a"])),
		toggle,
		SpyLegacy::returning(legacy_answer()),
	);
	let result = h.service.search(criteria.clone()).await.expect("Legacy search failed.");

	assert_eq!(result, legacy_answer());
	assert_eq!(h.index.query_count(), 0);
	assert_eq!(h.store.lookup_count(), 0);
	assert_eq!(*h.legacy.calls.lock().expect("calls lock"), vec![criteria]);
}

#[tokio::test]
async fn disabled_toggle_falls_back_to_legacy() {
	assert_served_by_legacy(keyword_criteria("lamp", 0, 10), Some(false)).await;
}

#[tokio::test]
async fn empty_keyword_falls_back_to_legacy() {
	assert_served_by_legacy(keyword_criteria("", 0, 10), Some(true)).await;
}

#[tokio::test]
async fn missing_products_flag_falls_back_to_legacy() {
	let mut criteria = keyword_criteria("lamp", 0, 10);

	criteria.response_group = [SearchResponseFlag::Categories].into_iter().collect();

	assert_served_by_legacy(criteria, Some(true)).await;
}

#[tokio::test]
async fn legacy_errors_propagate_unchanged() {
	let h = harness_with_legacy(
		test_config(),
		RankedIndex::new(Vec::new()),
		MemoryStore::empty(),
		Some(false),
		SpyLegacy::failing("catalog database unavailable"),
	);
	let err = h.service.search(keyword_criteria("lamp", 0, 10)).await.expect_err("Expected error.");

	assert!(
		matches!(err, Error::Storage { ref message } if message == "catalog database unavailable"),
		"Unexpected error: {err:?}"
	);
}

#[tokio::test]
async fn unset_toggle_defaults_to_hybrid() {
	let h = harness(
		test_config(),
		RankedIndex::new(ids(&["a", "b"])),
		MemoryStore::with_ids(&ids(&["a", "b"])),
		None,
	);
	let result = h.service.search(keyword_criteria("lamp", 0, 2)).await.expect("Search failed.");

	assert_eq!(product_ids(&result.products), ids(&["a", "b"]));
	assert_eq!(result.products_total_count, 2);
	assert_eq!(h.legacy.call_count(), 0);
	assert_eq!(
		*h.toggles.asked.lock().expect("asked lock"),
		vec![("catalog.search.use_indexed_search".to_string(), true)]
	);
}

#[tokio::test]
async fn toggle_is_read_by_the_configured_name() {
	let mut cfg = test_config();

	cfg.search.indexed_search_setting = "storefront.hybrid".to_string();

	let h = harness(cfg, RankedIndex::new(Vec::new()), MemoryStore::empty(), Some(true));

	h.service.search(keyword_criteria("lamp", 0, 2)).await.expect("Search failed.");

	assert_eq!(
		*h.toggles.asked.lock().expect("asked lock"),
		vec![("storefront.hybrid".to_string(), true)]
	);
}

#[tokio::test]
async fn hybrid_query_translates_the_criteria() {
	let h = harness(test_config(), RankedIndex::new(ids(&["a"])), MemoryStore::with_ids(&ids(&["a"])), Some(true));
	let mut criteria = keyword_criteria("desk lamp", 3, 7);

	criteria.category_id = Some("lighting".to_string());
	criteria.with_hidden = true;

	h.service.search(criteria).await.expect("Search failed.");

	let queries = h.index.queries.lock().expect("queries lock");
	let query = &queries[0];

	assert_eq!(query.search_phrase, "desk lamp");
	assert_eq!(query.catalog.as_deref(), Some("main"));
	assert_eq!(query.outline.as_deref(), Some("lighting"));
	assert!(query.with_hidden);
	assert_eq!((query.skip, query.take), (3, 7));
	assert_eq!(query.response_group, catalog_domain::ItemResponseGroup::info_with_outlines());
}

#[tokio::test]
async fn negative_paging_is_rejected_before_any_lookup() {
	for (skip, take) in [(-1, 10), (0, -5)] {
		let h = harness(test_config(), RankedIndex::new(ids(&["a"])), MemoryStore::empty(), Some(true));
		let err = h
			.service
			.search(keyword_criteria("lamp", skip, take))
			.await
			.expect_err("Expected invalid criteria.");

		assert!(matches!(err, Error::InvalidCriteria { .. }), "Unexpected error: {err:?}");
		assert_eq!(h.index.query_count(), 0);
		assert_eq!(h.legacy.call_count(), 0);
		assert!(h.toggles.asked.lock().expect("asked lock").is_empty());
	}
}
