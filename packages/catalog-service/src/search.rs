use std::time::Duration;

use tokio::time::Instant;

use catalog_domain::{SearchCriteria, SearchResult, SearchRoute, select_route, validate_criteria};

use crate::{CatalogSearchService, Reconciler, Result, SearchControl};

impl CatalogSearchService {
	pub async fn search(&self, criteria: SearchCriteria) -> Result<SearchResult> {
		self.search_with_control(criteria, &SearchControl::default()).await
	}

	/// Validates the criteria, picks a route and serves it. A caller deadline wins over the
	/// configured one.
	pub async fn search_with_control(
		&self,
		criteria: SearchCriteria,
		control: &SearchControl,
	) -> Result<SearchResult> {
		validate_criteria(&criteria)?;

		let indexed_search_enabled = self
			.collaborators
			.toggles
			.get_bool(self.cfg.search.indexed_search_setting.as_str(), true);

		match select_route(&criteria, indexed_search_enabled) {
			SearchRoute::Legacy => {
				tracing::debug!(
					indexed_search_enabled,
					has_keyword = criteria.has_keyword(),
					"Serving catalog search from the record store."
				);

				self.collaborators.legacy.search(&criteria).await
			},
			SearchRoute::Hybrid(product_criteria) => {
				let control = self.effective_control(control);
				let reconciler = Reconciler::new(
					self.collaborators.index.as_ref(),
					self.collaborators.records.as_ref(),
				);
				let reconciled = reconciler.run(product_criteria, &control).await?;

				Ok(reconciled.into_result())
			},
		}
	}

	fn effective_control(&self, control: &SearchControl) -> SearchControl {
		let mut control = control.clone();

		if control.deadline.is_none()
			&& let Some(deadline_ms) = self.cfg.search.deadline_ms
		{
			control.deadline = Some(Instant::now() + Duration::from_millis(deadline_ms));
		}

		control
	}
}
