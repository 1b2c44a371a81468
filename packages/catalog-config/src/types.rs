use std::collections::HashMap;

use serde::Deserialize;

pub const DEFAULT_INDEXED_SEARCH_SETTING: &str = "catalog.search.use_indexed_search";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
	pub storage: Storage,
	#[serde(default)]
	pub search: Search,
	/// Named boolean settings consulted as feature toggles. Unset names fall back to the
	/// caller's default.
	#[serde(default)]
	pub settings: HashMap<String, bool>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Storage {
	pub postgres: Postgres,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Postgres {
	pub dsn: String,
	pub pool_max_conns: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Search {
	/// Setting name gating the index-backed product search.
	#[serde(default = "default_indexed_search_setting")]
	pub indexed_search_setting: String,
	/// Overall budget for one hybrid search. When it elapses the partial result is returned.
	pub deadline_ms: Option<u64>,
}
impl Default for Search {
	fn default() -> Self {
		Self { indexed_search_setting: default_indexed_search_setting(), deadline_ms: None }
	}
}

fn default_indexed_search_setting() -> String {
	DEFAULT_INDEXED_SEARCH_SETTING.to_string()
}
