use std::fs;
use std::path::Path;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

pub const DEFAULT_CONFIG_PATH: &str = "config/motd.json";
pub const DEFAULT_BASE_URL: &str = "http://localhost:3000";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
pub const BASE_URL_ENV: &str = "MOTD_API_BASE_URL";

/// View hiển thị khi mở cửa sổ.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ViewKind {
    /// Auto-fetching message of the day.
    Motd,
    /// Interactive demo of all three endpoints.
    #[default]
    Demo,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub base_url: String,
    /// `0` disables the timeout.
    pub request_timeout_secs: u64,
    pub start_view: ViewKind,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            start_view: ViewKind::default(),
        }
    }
}

impl AppConfig {
    /// Env wins over the file. Empty values are ignored.
    pub fn apply_env_overrides(&mut self) {
        if let Ok(base_url) = std::env::var(BASE_URL_ENV) {
            self.override_base_url(&base_url, BASE_URL_ENV);
        }
    }

    pub fn override_base_url(&mut self, base_url: &str, source: &str) {
        let base_url = base_url.trim();
        if base_url.is_empty() {
            return;
        }
        log::info!("Using base URL {base_url} from {source}");
        self.base_url = base_url.to_string();
    }
}

pub fn load_config(path: &str) -> AppConfig {
    let path = Path::new(path);
    match fs::read_to_string(path) {
        Ok(content) => match serde_json::from_str::<AppConfig>(&content) {
            Ok(config) => config,
            Err(err) => {
                log::warn!("Failed to parse config file {}: {err}", path.display());
                AppConfig::default()
            }
        },
        Err(err) => {
            log::info!(
                "Config file {} not found ({err}); using defaults",
                path.display()
            );
            AppConfig::default()
        }
    }
}
