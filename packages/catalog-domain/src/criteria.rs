use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Parts of the catalog a caller wants back from a search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchResponseFlag {
	Catalogs,
	Categories,
	Products,
	Outlines,
	Properties,
}

/// Record fields requested from the record store for each product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemResponseFlag {
	Info,
	Outlines,
	Properties,
	Assets,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemResponseGroup(BTreeSet<ItemResponseFlag>);
impl ItemResponseGroup {
	pub fn new(flags: impl IntoIterator<Item = ItemResponseFlag>) -> Self {
		Self(flags.into_iter().collect())
	}

	/// The field set the hybrid path asks the record store for.
	pub fn info_with_outlines() -> Self {
		Self::new([ItemResponseFlag::Info, ItemResponseFlag::Outlines])
	}

	pub fn contains(&self, flag: ItemResponseFlag) -> bool {
		self.0.contains(&flag)
	}

	pub fn iter(&self) -> impl Iterator<Item = ItemResponseFlag> + '_ {
		self.0.iter().copied()
	}
}

/// Caller-facing catalog search request. Never mutated once handed to the service.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchCriteria {
	pub keyword: String,
	pub catalog_id: Option<String>,
	pub category_id: Option<String>,
	#[serde(default)]
	pub with_hidden: bool,
	pub skip: i64,
	pub take: i64,
	#[serde(default)]
	pub response_group: BTreeSet<SearchResponseFlag>,
}
impl SearchCriteria {
	pub fn wants(&self, flag: SearchResponseFlag) -> bool {
		self.response_group.contains(&flag)
	}

	pub fn has_keyword(&self) -> bool {
		!self.keyword.is_empty()
	}
}

/// Index-query form of a product search. The reconciliation loop owns a copy and grows `take`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductSearchCriteria {
	pub search_phrase: String,
	pub catalog: Option<String>,
	pub outline: Option<String>,
	pub with_hidden: bool,
	pub skip: i64,
	pub take: i64,
	pub response_group: ItemResponseGroup,
}
impl ProductSearchCriteria {
	/// End of the requested window, saturating rather than wrapping.
	pub fn window_end(&self) -> i64 {
		self.take.saturating_add(self.skip)
	}
}
impl From<&SearchCriteria> for ProductSearchCriteria {
	fn from(criteria: &SearchCriteria) -> Self {
		Self {
			search_phrase: criteria.keyword.clone(),
			catalog: criteria.catalog_id.clone(),
			outline: criteria.category_id.clone(),
			with_hidden: criteria.with_hidden,
			skip: criteria.skip,
			take: criteria.take,
			response_group: ItemResponseGroup::info_with_outlines(),
		}
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CriteriaViolation {
	NegativeSkip,
	NegativeTake,
}
impl CriteriaViolation {
	pub fn message(self) -> &'static str {
		match self {
			Self::NegativeSkip => "skip must be zero or greater.",
			Self::NegativeTake => "take must be zero or greater.",
		}
	}
}

pub fn validate_criteria(criteria: &SearchCriteria) -> Result<(), CriteriaViolation> {
	if criteria.skip < 0 {
		return Err(CriteriaViolation::NegativeSkip);
	}
	if criteria.take < 0 {
		return Err(CriteriaViolation::NegativeTake);
	}

	Ok(())
}
