use std::collections::HashMap;

/// Every ID seen across reconciliation rounds, in first-seen order.
///
/// An ID's rank never changes once admitted, so ordering records by rank reproduces the
/// index's relevance order no matter which round fetched them.
#[derive(Debug, Default)]
pub struct OrderedIdLedger {
	ids: Vec<String>,
	ranks: HashMap<String, usize>,
}
impl OrderedIdLedger {
	pub fn new() -> Self {
		Self::default()
	}

	/// Appends the IDs of `page` not seen before and returns them in page order.
	pub fn admit<'a, I>(&mut self, page: I) -> Vec<String>
	where
		I: IntoIterator<Item = &'a String>,
	{
		let mut admitted = Vec::new();

		for id in page {
			if self.ranks.contains_key(id) {
				continue;
			}

			self.ranks.insert(id.clone(), self.ids.len());
			self.ids.push(id.clone());
			admitted.push(id.clone());
		}

		admitted
	}

	pub fn rank(&self, id: &str) -> Option<usize> {
		self.ranks.get(id).copied()
	}

	pub fn contains(&self, id: &str) -> bool {
		self.ranks.contains_key(id)
	}

	pub fn len(&self) -> usize {
		self.ids.len()
	}

	pub fn is_empty(&self) -> bool {
		self.ids.is_empty()
	}

	pub fn ids(&self) -> &[String] {
		&self.ids
	}
}
