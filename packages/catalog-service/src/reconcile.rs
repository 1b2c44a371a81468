//! Index/record-store reconciliation for the hybrid product search.
//!
//! The index is queried for a page of ranked IDs, the unseen IDs are resolved against the record
//! store, and whenever the store comes back short the next index query asks for that many more
//! hits. Rounds are strictly sequential and bounded by [`MAX_SEARCH_RETRIES`] and by the index's
//! own total count.

use std::{collections::HashSet, future::Future};

use tokio::time::{self, Instant};

use catalog_domain::{
	Aggregation, CatalogProduct, IndexPage, OrderedIdLedger, ProductSearchCriteria, SearchResult,
	clamp_total_count,
};

use crate::{Error, RecordStore, Result, SearchControl, SearchIndex};

/// Rounds allowed after the first index query.
pub const MAX_SEARCH_RETRIES: u32 = 3;

/// Why a reconciliation stopped. None of these are failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
	/// The last round resolved every new ID it saw.
	DriftResolved,
	/// The index failed, returned no IDs, or returned only IDs already seen.
	IndexExhausted,
	RetryCeiling,
	/// The requested window already covers the index's claimed total.
	TotalCeiling,
	DeadlineExceeded,
}
impl Termination {
	pub fn as_str(self) -> &'static str {
		match self {
			Self::DriftResolved => "drift_resolved",
			Self::IndexExhausted => "index_exhausted",
			Self::RetryCeiling => "retry_ceiling",
			Self::TotalCeiling => "total_ceiling",
			Self::DeadlineExceeded => "deadline_exceeded",
		}
	}
}

#[derive(Debug)]
pub struct Reconciled {
	/// Records in ledger order. May be shorter than `take`.
	pub products: Vec<CatalogProduct>,
	/// Total from the most recent successful index response.
	pub total_count: Option<i64>,
	pub aggregations: Vec<Aggregation>,
	pub index_queries: u32,
	pub store_lookups: u32,
	pub final_take: i64,
	pub termination: Termination,
}
impl Reconciled {
	pub fn into_result(self) -> SearchResult {
		SearchResult {
			categories: Vec::new(),
			products: self.products,
			products_total_count: clamp_total_count(self.total_count.unwrap_or(0)),
			aggregations: self.aggregations,
		}
	}
}

struct WorkingState {
	criteria: ProductSearchCriteria,
	ledger: OrderedIdLedger,
	products: Vec<CatalogProduct>,
	retry: u32,
	store_lookups: u32,
	found: usize,
	stored: usize,
	last_page: Option<IndexPage>,
	last_total: Option<i64>,
	aggregations: Vec<Aggregation>,
}
impl WorkingState {
	fn new(criteria: ProductSearchCriteria) -> Self {
		Self {
			criteria,
			ledger: OrderedIdLedger::new(),
			products: Vec::new(),
			retry: 0,
			store_lookups: 0,
			found: 0,
			stored: 0,
			last_page: None,
			last_total: None,
			aggregations: Vec::new(),
		}
	}

	fn record_page(&mut self, page: &IndexPage) {
		self.last_total = Some(page.total_count);
		self.aggregations = page.aggregations.clone();
	}

	/// Keeps the first copy of each record whose ID was requested this round, then re-sorts the
	/// accumulated products by ledger rank.
	fn merge(&mut self, requested: &[String], fetched: Vec<CatalogProduct>) -> usize {
		let wanted = requested.iter().map(String::as_str).collect::<HashSet<_>>();
		let mut taken = HashSet::new();
		let mut accepted = 0;

		for product in fetched {
			if !wanted.contains(product.id.as_str()) || !taken.insert(product.id.clone()) {
				tracing::debug!(item_id = %product.id, "Dropping record that was not requested.");

				continue;
			}

			self.products.push(product);

			accepted += 1;
		}

		let ledger = &self.ledger;

		self.products.sort_by_key(|product| ledger.rank(&product.id).unwrap_or(usize::MAX));

		accepted
	}

	fn compensate(&mut self) {
		if self.found > self.stored {
			let shortfall = i64::try_from(self.found - self.stored).unwrap_or(i64::MAX);

			self.criteria.take = self.criteria.take.saturating_add(shortfall);
		}
	}

	/// Evaluates the continuation predicate, naming the clause that ends the loop.
	fn stop_reason(&self) -> Option<Termination> {
		let Some(page) = self.last_page.as_ref().filter(|page| !page.ids.is_empty()) else {
			return Some(Termination::IndexExhausted);
		};

		if self.found == 0 {
			return Some(Termination::IndexExhausted);
		}
		if self.found <= self.stored {
			return Some(Termination::DriftResolved);
		}
		if self.retry > MAX_SEARCH_RETRIES {
			return Some(Termination::RetryCeiling);
		}
		if self.criteria.window_end() >= page.total_count {
			return Some(Termination::TotalCeiling);
		}

		None
	}

	fn finish(self, termination: Termination) -> Reconciled {
		Reconciled {
			products: self.products,
			total_count: self.last_total,
			aggregations: self.aggregations,
			index_queries: self.retry,
			store_lookups: self.store_lookups,
			final_take: self.criteria.take,
			termination,
		}
	}
}

pub struct Reconciler<'a> {
	index: &'a dyn SearchIndex,
	records: &'a dyn RecordStore,
}
impl<'a> Reconciler<'a> {
	pub fn new(index: &'a dyn SearchIndex, records: &'a dyn RecordStore) -> Self {
		Self { index, records }
	}

	/// Runs the bounded reconciliation loop. Only cancellation is surfaced as an error;
	/// collaborator failures and an elapsed deadline end the loop with what was gathered.
	pub async fn run(
		&self,
		criteria: ProductSearchCriteria,
		control: &SearchControl,
	) -> Result<Reconciled> {
		let mut state = WorkingState::new(criteria);
		let termination = loop {
			if control.is_cancelled() {
				tracing::debug!(rounds = state.retry, "Hybrid search cancelled.");

				return Err(Error::Cancelled);
			}
			if control.deadline_passed() {
				break Termination::DeadlineExceeded;
			}

			let Some(outcome) = within(control.deadline, self.index.query(&state.criteria)).await
			else {
				break Termination::DeadlineExceeded;
			};

			state.retry += 1;

			match outcome {
				Ok(page) => {
					state.record_page(&page);

					if let Some(termination) = self.absorb(&mut state, &page, control).await {
						break termination;
					}

					state.last_page = Some(page);
				},
				Err(err) => {
					tracing::warn!(
						error = %err,
						round = state.retry,
						"Search index query failed; treating the round as empty."
					);

					state.last_page = None;
				},
			}

			tracing::debug!(
				round = state.retry,
				found = state.found,
				stored = state.stored,
				take = state.criteria.take,
				total = state.last_total,
				"Reconciliation round finished."
			);

			if let Some(termination) = state.stop_reason() {
				break termination;
			}
		};

		tracing::debug!(
			termination = termination.as_str(),
			index_queries = state.retry,
			store_lookups = state.store_lookups,
			products = state.products.len(),
			ledger = state.ledger.len(),
			"Hybrid search finished."
		);

		Ok(state.finish(termination))
	}

	/// Admits the page's new IDs and resolves them. Returns early only when the deadline elapses
	/// during the store lookup.
	async fn absorb(
		&self,
		state: &mut WorkingState,
		page: &IndexPage,
		control: &SearchControl,
	) -> Option<Termination> {
		let new_ids = state.ledger.admit(&page.ids);

		state.found = new_ids.len();
		state.stored = 0;

		if new_ids.is_empty() {
			return None;
		}

		let lookup = self.records.fetch_by_ids(
			&new_ids,
			&state.criteria.response_group,
			state.criteria.catalog.as_deref(),
		);
		let Some(outcome) = within(control.deadline, lookup).await else {
			return Some(Termination::DeadlineExceeded);
		};

		state.store_lookups += 1;

		let fetched = match outcome {
			Ok(fetched) => fetched,
			Err(err) => {
				tracing::warn!(
					error = %err,
					round = state.retry,
					ids = new_ids.len(),
					"Record store lookup failed; the batch counts as missing."
				);

				Vec::new()
			},
		};

		state.stored = state.merge(&new_ids, fetched);

		state.compensate();

		None
	}
}

async fn within<F>(deadline: Option<Instant>, fut: F) -> Option<F::Output>
where
	F: Future,
{
	match deadline {
		Some(deadline) => time::timeout_at(deadline, fut).await.ok(),
		None => Some(fut.await),
	}
}
