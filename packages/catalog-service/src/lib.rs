pub mod control;
pub mod pg;
pub mod reconcile;
pub mod search;
pub mod toggles;

mod error;

pub use control::{CancelHandle, CancelSignal, SearchControl, cancellation};
pub use error::{Error, Result};
pub use pg::PgCatalog;
pub use reconcile::{MAX_SEARCH_RETRIES, Reconciled, Reconciler, Termination};
pub use toggles::ConfigToggles;

use std::{future::Future, pin::Pin, sync::Arc};

use catalog_config::Config;
use catalog_domain::{
	CatalogProduct, IndexPage, ItemResponseGroup, ProductSearchCriteria, SearchCriteria,
	SearchResult,
};
use catalog_storage::db::Db;

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Eventually consistent product index. Returns ranked IDs, never records.
pub trait SearchIndex
where
	Self: Send + Sync,
{
	fn query<'a>(&'a self, criteria: &'a ProductSearchCriteria) -> BoxFuture<'a, Result<IndexPage>>;
}

/// Authoritative product records. IDs it no longer holds are omitted from the answer.
pub trait RecordStore
where
	Self: Send + Sync,
{
	fn fetch_by_ids<'a>(
		&'a self,
		ids: &'a [String],
		response_group: &'a ItemResponseGroup,
		catalog_id: Option<&'a str>,
	) -> BoxFuture<'a, Result<Vec<CatalogProduct>>>;
}

/// Direct-store search used whenever the hybrid path does not apply.
pub trait LegacySearch
where
	Self: Send + Sync,
{
	fn search<'a>(&'a self, criteria: &'a SearchCriteria) -> BoxFuture<'a, Result<SearchResult>>;
}

pub trait FeatureToggles
where
	Self: Send + Sync,
{
	fn get_bool(&self, name: &str, default: bool) -> bool;
}

#[derive(Clone)]
pub struct Collaborators {
	pub index: Arc<dyn SearchIndex>,
	pub records: Arc<dyn RecordStore>,
	pub legacy: Arc<dyn LegacySearch>,
	pub toggles: Arc<dyn FeatureToggles>,
}
impl Collaborators {
	pub fn new(
		index: Arc<dyn SearchIndex>,
		records: Arc<dyn RecordStore>,
		legacy: Arc<dyn LegacySearch>,
		toggles: Arc<dyn FeatureToggles>,
	) -> Self {
		Self { index, records, legacy, toggles }
	}
}

pub struct CatalogSearchService {
	pub cfg: Config,
	pub collaborators: Collaborators,
}
impl CatalogSearchService {
	/// Wires the Postgres catalog as record store and legacy search, with toggles read from
	/// `cfg.settings`.
	pub fn new(cfg: Config, db: Db, index: Arc<dyn SearchIndex>) -> Self {
		let catalog = Arc::new(PgCatalog::new(db));
		let toggles = Arc::new(ConfigToggles::from_config(&cfg));
		let collaborators = Collaborators::new(index, catalog.clone(), catalog, toggles);

		Self { cfg, collaborators }
	}

	pub fn with_collaborators(cfg: Config, collaborators: Collaborators) -> Self {
		Self { cfg, collaborators }
	}
}
