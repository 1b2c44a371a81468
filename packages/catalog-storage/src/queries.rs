use crate::{
	Error, Result,
	db::Db,
	models::{CatalogItemRow, CategoryRow, CategorySearch, ItemPage, ItemSearch},
};

/// Loads the items that still exist for `ids`. Unknown IDs are skipped; row order is unspecified.
pub async fn fetch_items_by_ids(db: &Db, ids: &[String]) -> Result<Vec<CatalogItemRow>> {
	if ids.is_empty() {
		return Ok(Vec::new());
	}

	let rows = sqlx::query_as::<_, CatalogItemRow>(
		"\
SELECT
	item_id,
	catalog_id,
	category_id,
	code,
	name,
	is_active,
	outline,
	updated_at
FROM catalog_items
WHERE item_id = ANY($1)",
	)
	.bind(ids)
	.fetch_all(&db.pool)
	.await?;

	Ok(rows)
}

pub async fn search_items(db: &Db, search: &ItemSearch<'_>) -> Result<ItemPage> {
	if search.skip < 0 || search.take < 0 {
		return Err(Error::InvalidArgument("skip and take must be zero or greater.".to_string()));
	}

	let pattern = search.keyword.filter(|keyword| !keyword.trim().is_empty()).map(like_pattern);
	let total_count: i64 = sqlx::query_scalar(
		"\
SELECT count(*)
FROM catalog_items
WHERE ($1::text IS NULL OR name ILIKE $1 OR code ILIKE $1)
	AND ($2::text IS NULL OR catalog_id = $2)
	AND ($3::text IS NULL OR category_id = $3)
	AND ($4 OR is_active)",
	)
	.bind(pattern.as_deref())
	.bind(search.catalog_id)
	.bind(search.category_id)
	.bind(search.with_hidden)
	.fetch_one(&db.pool)
	.await?;

	if search.take == 0 {
		return Ok(ItemPage { items: Vec::new(), total_count });
	}

	let items = sqlx::query_as::<_, CatalogItemRow>(
		"\
SELECT
	item_id,
	catalog_id,
	category_id,
	code,
	name,
	is_active,
	outline,
	updated_at
FROM catalog_items
WHERE ($1::text IS NULL OR name ILIKE $1 OR code ILIKE $1)
	AND ($2::text IS NULL OR catalog_id = $2)
	AND ($3::text IS NULL OR category_id = $3)
	AND ($4 OR is_active)
ORDER BY name ASC, item_id ASC
OFFSET $5
LIMIT $6",
	)
	.bind(pattern.as_deref())
	.bind(search.catalog_id)
	.bind(search.category_id)
	.bind(search.with_hidden)
	.bind(search.skip)
	.bind(search.take)
	.fetch_all(&db.pool)
	.await?;

	Ok(ItemPage { items, total_count })
}

pub async fn search_categories(db: &Db, search: &CategorySearch<'_>) -> Result<Vec<CategoryRow>> {
	let pattern = search.keyword.filter(|keyword| !keyword.trim().is_empty()).map(like_pattern);
	let rows = sqlx::query_as::<_, CategoryRow>(
		"\
SELECT
	category_id,
	catalog_id,
	parent_id,
	code,
	name,
	is_active
FROM categories
WHERE ($1::text IS NULL OR name ILIKE $1 OR code ILIKE $1)
	AND ($2::text IS NULL OR catalog_id = $2)
	AND ($3::text IS NULL OR parent_id = $3)
	AND ($4 OR is_active)
ORDER BY name ASC, category_id ASC",
	)
	.bind(pattern.as_deref())
	.bind(search.catalog_id)
	.bind(search.parent_id)
	.bind(search.with_hidden)
	.fetch_all(&db.pool)
	.await?;

	Ok(rows)
}

/// Wraps a keyword for a substring `ILIKE`, escaping the pattern metacharacters.
pub fn like_pattern(keyword: &str) -> String {
	let mut out = String::with_capacity(keyword.len() + 2);

	out.push('%');

	for ch in keyword.trim().chars() {
		if matches!(ch, '%' | '_' | '\\') {
			out.push('\\');
		}

		out.push(ch);
	}

	out.push('%');

	out
}
