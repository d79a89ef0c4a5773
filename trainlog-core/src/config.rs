use std::env;

use log::debug;

pub const WGER_DEFAULT_URL: &str = "https://wger.de/api/v2/exercise/";
pub const API_KEY_VAR: &str = "WGER_API_KEY";
pub const API_URL_VAR: &str = "WGER_API_URL";

/// Where the exercise catalog lives and how to authenticate against it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogConfig {
    pub base_url: String,
    pub api_key: Option<String>,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            base_url: WGER_DEFAULT_URL.to_string(),
            api_key: None,
        }
    }
}

impl CatalogConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from any key lookup; blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_blank = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let config = Self {
            base_url: non_blank(API_URL_VAR).unwrap_or_else(|| WGER_DEFAULT_URL.to_string()),
            api_key: non_blank(API_KEY_VAR),
        };
        debug!(
            "Catalog config: url={} api_key_set={}",
            config.base_url,
            config.api_key.is_some()
        );
        config
    }
}
