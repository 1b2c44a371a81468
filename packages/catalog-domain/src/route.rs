use crate::criteria::{ProductSearchCriteria, SearchCriteria, SearchResponseFlag};

/// Which search implementation serves a request. Resolved once per call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchRoute {
	/// Index-backed product search with record-store reconciliation.
	Hybrid(ProductSearchCriteria),
	/// Direct-store search; receives the caller's criteria untouched.
	Legacy,
}

pub fn select_route(criteria: &SearchCriteria, indexed_search_enabled: bool) -> SearchRoute {
	if indexed_search_enabled
		&& criteria.wants(SearchResponseFlag::Products)
		&& criteria.has_keyword()
	{
		return SearchRoute::Hybrid(ProductSearchCriteria::from(criteria));
	}

	SearchRoute::Legacy
}
