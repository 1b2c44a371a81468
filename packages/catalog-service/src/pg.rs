use catalog_domain::{
	CatalogProduct, Category, ItemResponseFlag, ItemResponseGroup, SearchCriteria,
	SearchResponseFlag, SearchResult, clamp_total_count,
};
use catalog_storage::{
	db::Db,
	models::{CatalogItemRow, CategoryRow, CategorySearch, ItemSearch},
	queries,
};

use crate::{BoxFuture, LegacySearch, RecordStore, Result};

/// Postgres catalog serving both the by-ID record lookups and the direct-store search.
#[derive(Clone)]
pub struct PgCatalog {
	db: Db,
}
impl PgCatalog {
	pub fn new(db: Db) -> Self {
		Self { db }
	}

	async fn fetch(
		&self,
		ids: &[String],
		response_group: &ItemResponseGroup,
		catalog_id: Option<&str>,
	) -> Result<Vec<CatalogProduct>> {
		let rows = queries::fetch_items_by_ids(&self.db, ids).await?;
		let with_outlines = response_group.contains(ItemResponseFlag::Outlines);

		Ok(rows.into_iter().map(|row| product_from_row(row, with_outlines, catalog_id)).collect())
	}

	async fn direct_search(&self, criteria: &SearchCriteria) -> Result<SearchResult> {
		let keyword = Some(criteria.keyword.as_str()).filter(|keyword| !keyword.is_empty());
		let mut result = SearchResult::default();

		if criteria.wants(SearchResponseFlag::Categories) {
			let search = CategorySearch {
				keyword,
				catalog_id: criteria.catalog_id.as_deref(),
				parent_id: criteria.category_id.as_deref(),
				with_hidden: criteria.with_hidden,
			};

			result.categories = queries::search_categories(&self.db, &search)
				.await?
				.into_iter()
				.map(category_from_row)
				.collect();
		}
		if criteria.wants(SearchResponseFlag::Products) {
			let search = ItemSearch {
				keyword,
				catalog_id: criteria.catalog_id.as_deref(),
				category_id: criteria.category_id.as_deref(),
				with_hidden: criteria.with_hidden,
				skip: criteria.skip,
				take: criteria.take,
			};
			let page = queries::search_items(&self.db, &search).await?;
			let with_outlines = criteria.wants(SearchResponseFlag::Outlines);

			result.products = page
				.items
				.into_iter()
				.map(|row| product_from_row(row, with_outlines, criteria.catalog_id.as_deref()))
				.collect();
			result.products_total_count = clamp_total_count(page.total_count);
		}

		Ok(result)
	}
}

impl RecordStore for PgCatalog {
	fn fetch_by_ids<'a>(
		&'a self,
		ids: &'a [String],
		response_group: &'a ItemResponseGroup,
		catalog_id: Option<&'a str>,
	) -> BoxFuture<'a, Result<Vec<CatalogProduct>>> {
		Box::pin(self.fetch(ids, response_group, catalog_id))
	}
}

impl LegacySearch for PgCatalog {
	fn search<'a>(&'a self, criteria: &'a SearchCriteria) -> BoxFuture<'a, Result<SearchResult>> {
		Box::pin(self.direct_search(criteria))
	}
}

/// Outlines are stored per item for its own catalog, so a hint naming another catalog drops
/// them.
fn product_from_row(
	row: CatalogItemRow,
	with_outlines: bool,
	catalog_id: Option<&str>,
) -> CatalogProduct {
	let outline_visible =
		with_outlines && catalog_id.map(|catalog| catalog == row.catalog_id).unwrap_or(true);

	CatalogProduct {
		id: row.item_id,
		code: row.code,
		name: row.name,
		catalog_id: row.catalog_id,
		category_id: row.category_id,
		is_active: row.is_active,
		outline: if outline_visible { row.outline } else { None },
		updated_at: row.updated_at,
	}
}

fn category_from_row(row: CategoryRow) -> Category {
	Category {
		id: row.category_id,
		catalog_id: row.catalog_id,
		parent_id: row.parent_id,
		code: row.code,
		name: row.name,
		is_active: row.is_active,
	}
}
