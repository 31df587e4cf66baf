use std::fs;
use std::path::Path;
use std::time::Duration;

use jester_core::{DEFAULT_JOKES_PER_FETCH, DEFAULT_SLOT_KEY};
use jester_engine::{FetchSettings, DEFAULT_ENDPOINT, DEFAULT_MAX_ATTEMPTS_PER_ITEM};
use jester_logging::{jester_info, jester_warn};
use serde::{Deserialize, Serialize};

pub const CONFIG_FILENAME: &str = "jester.ron";

/// User settings read from `jester.ron`; every field is optional in the file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub endpoint: String,
    pub user_agent: Option<String>,
    pub jokes_per_fetch: usize,
    /// Provider calls allowed per requested joke; 0 disables the bound.
    pub max_attempts_per_joke: usize,
    pub connect_timeout_secs: u64,
    pub request_timeout_secs: u64,
    pub max_response_bytes: u64,
    pub storage_key: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        let fetch = FetchSettings::default();
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            user_agent: None,
            jokes_per_fetch: DEFAULT_JOKES_PER_FETCH,
            max_attempts_per_joke: DEFAULT_MAX_ATTEMPTS_PER_ITEM,
            connect_timeout_secs: fetch.connect_timeout.as_secs(),
            request_timeout_secs: fetch.request_timeout.as_secs(),
            max_response_bytes: fetch.max_bytes,
            storage_key: DEFAULT_SLOT_KEY.to_string(),
        }
    }
}

impl AppConfig {
    pub fn fetch_settings(&self) -> FetchSettings {
        let defaults = FetchSettings::default();
        FetchSettings {
            endpoint: self.endpoint.clone(),
            user_agent: self.user_agent.clone().unwrap_or(defaults.user_agent),
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
            request_timeout: Duration::from_secs(self.request_timeout_secs),
            max_bytes: self.max_response_bytes,
            ..defaults
        }
    }
}

/// Reads the config file, falling back to defaults when it is missing or broken.
pub fn load_config(path: &Path) -> AppConfig {
    let content = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            return AppConfig::default();
        }
        Err(err) => {
            jester_warn!("Failed to read config from {:?}: {}", path, err);
            return AppConfig::default();
        }
    };

    match ron::from_str(&content) {
        Ok(config) => {
            jester_info!("Loaded config from {:?}", path);
            config
        }
        Err(err) => {
            jester_warn!("Failed to parse config from {:?}: {}", path, err);
            AppConfig::default()
        }
    }
}
