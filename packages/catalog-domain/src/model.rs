use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogProduct {
	pub id: String,
	pub code: String,
	pub name: String,
	pub catalog_id: String,
	pub category_id: Option<String>,
	pub is_active: bool,
	/// Stored outline path. Only filled when outlines were requested.
	pub outline: Option<String>,
	#[serde(with = "crate::time_serde")]
	pub updated_at: OffsetDateTime,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
	pub id: String,
	pub catalog_id: String,
	pub parent_id: Option<String>,
	pub code: String,
	pub name: String,
	pub is_active: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregationItem {
	pub value: String,
	pub count: i64,
}

/// Facet counts reported by the search index alongside a page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Aggregation {
	pub field: String,
	pub items: Vec<AggregationItem>,
}

/// One page of index hits. `total_count` is the index's own estimate and may be stale.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexPage {
	pub ids: Vec<String>,
	pub total_count: i64,
	#[serde(default)]
	pub aggregations: Vec<Aggregation>,
}
impl IndexPage {
	pub fn new(ids: impl IntoIterator<Item = impl Into<String>>, total_count: i64) -> Self {
		Self {
			ids: ids.into_iter().map(Into::into).collect(),
			total_count,
			aggregations: Vec::new(),
		}
	}
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
	pub categories: Vec<Category>,
	pub products: Vec<CatalogProduct>,
	pub products_total_count: i32,
	#[serde(default)]
	pub aggregations: Vec<Aggregation>,
}

/// Narrows an index total into the result's count range, saturating at the bounds.
pub fn clamp_total_count(total: i64) -> i32 {
	i32::try_from(total).unwrap_or(if total.is_negative() { i32::MIN } else { i32::MAX })
}
