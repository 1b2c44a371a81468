use time::OffsetDateTime;

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct CatalogItemRow {
	pub item_id: String,
	pub catalog_id: String,
	pub category_id: Option<String>,
	pub code: String,
	pub name: String,
	pub is_active: bool,
	pub outline: Option<String>,
	pub updated_at: OffsetDateTime,
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct CategoryRow {
	pub category_id: String,
	pub catalog_id: String,
	pub parent_id: Option<String>,
	pub code: String,
	pub name: String,
	pub is_active: bool,
}

/// Filters for the direct-store item search.
#[derive(Debug, Clone, Copy)]
pub struct ItemSearch<'a> {
	pub keyword: Option<&'a str>,
	pub catalog_id: Option<&'a str>,
	pub category_id: Option<&'a str>,
	pub with_hidden: bool,
	pub skip: i64,
	pub take: i64,
}

#[derive(Debug, Clone, Copy)]
pub struct CategorySearch<'a> {
	pub keyword: Option<&'a str>,
	pub catalog_id: Option<&'a str>,
	pub parent_id: Option<&'a str>,
	pub with_hidden: bool,
}

#[derive(Debug)]
pub struct ItemPage {
	pub items: Vec<CatalogItemRow>,
	pub total_count: i64,
}
