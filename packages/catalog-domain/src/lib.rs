pub mod criteria;
pub mod ledger;
pub mod model;
pub mod route;
pub mod time_serde;

pub use criteria::{
	CriteriaViolation, ItemResponseFlag, ItemResponseGroup, ProductSearchCriteria, SearchCriteria,
	SearchResponseFlag, validate_criteria,
};
pub use ledger::OrderedIdLedger;
pub use model::{
	Aggregation, AggregationItem, CatalogProduct, Category, IndexPage, SearchResult,
	clamp_total_count,
};
pub use route::{SearchRoute, select_route};
