mod error;
mod types;

pub use error::{Error, Result};
pub use types::{Config, DEFAULT_INDEXED_SEARCH_SETTING, Postgres, Search, Storage};

use std::{fs, path::Path};

pub fn load(path: &Path) -> Result<Config> {
	let raw = fs::read_to_string(path)
		.map_err(|err| Error::ReadConfig { path: path.to_path_buf(), source: err })?;

	let mut cfg: Config = toml::from_str(&raw)
		.map_err(|err| Error::ParseConfig { path: path.to_path_buf(), source: err })?;

	normalize(&mut cfg);

	validate(&cfg)?;

	Ok(cfg)
}

pub fn validate(cfg: &Config) -> Result<()> {
	if cfg.storage.postgres.dsn.trim().is_empty() {
		return Err(Error::Validation {
			message: "storage.postgres.dsn must be non-empty.".to_string(),
		});
	}
	if cfg.storage.postgres.pool_max_conns == 0 {
		return Err(Error::Validation {
			message: "storage.postgres.pool_max_conns must be greater than zero.".to_string(),
		});
	}
	if cfg.search.indexed_search_setting.trim().is_empty() {
		return Err(Error::Validation {
			message: "search.indexed_search_setting must be non-empty.".to_string(),
		});
	}

	if let Some(deadline_ms) = cfg.search.deadline_ms
		&& deadline_ms == 0
	{
		return Err(Error::Validation {
			message: "search.deadline_ms must be greater than zero.".to_string(),
		});
	}

	for name in cfg.settings.keys() {
		if name.trim().is_empty() {
			return Err(Error::Validation { message: "settings keys must be non-empty.".to_string() });
		}
	}

	Ok(())
}

fn normalize(cfg: &mut Config) {
	let trimmed = cfg.search.indexed_search_setting.trim();

	if trimmed.len() != cfg.search.indexed_search_setting.len() {
		cfg.search.indexed_search_setting = trimmed.to_string();
	}
	// A zero budget in the file means "no deadline".
	if cfg.search.deadline_ms == Some(0) {
		cfg.search.deadline_ms = None;
	}
}
