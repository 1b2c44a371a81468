use std::collections::HashMap;

use catalog_config::Config;

use crate::FeatureToggles;

/// Feature toggles backed by the `[settings]` table of the config file.
#[derive(Debug, Clone, Default)]
pub struct ConfigToggles {
	values: HashMap<String, bool>,
}
impl ConfigToggles {
	pub fn new(values: HashMap<String, bool>) -> Self {
		Self { values }
	}

	pub fn from_config(cfg: &Config) -> Self {
		Self::new(cfg.settings.clone())
	}
}

impl FeatureToggles for ConfigToggles {
	fn get_bool(&self, name: &str, default: bool) -> bool {
		self.values.get(name).copied().unwrap_or(default)
	}
}
