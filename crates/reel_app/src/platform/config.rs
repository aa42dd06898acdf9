use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use log::LevelFilter;
use reel_engine::{CatalogSettings, SplashSettings, DEFAULT_BASE_URL};
use serde::Deserialize;

use super::logging::LogDestination;

const DEFAULT_CONFIG_FILE: &str = "reel.ron";
pub const API_KEY_ENV: &str = "TMDB_API_KEY";

/// Contents of `reel.ron`. Every field is optional in the file.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub base_url: String,
    pub api_key: String,
    pub language: Option<String>,
    pub connect_timeout_secs: u64,
    pub request_timeout_secs: u64,
    pub max_response_bytes: u64,
    pub splash_delay_ms: u64,
    pub playlist_file: PathBuf,
    pub log_level: String,
    pub log_destination: LogDestination,
    /// Pages of upcoming movies printed after the splash.
    pub upcoming_pages: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        let catalog = CatalogSettings::default();
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: String::new(),
            language: catalog.language,
            connect_timeout_secs: catalog.connect_timeout.as_secs(),
            request_timeout_secs: catalog.request_timeout.as_secs(),
            max_response_bytes: catalog.max_bytes,
            splash_delay_ms: 1000,
            playlist_file: PathBuf::from("playlists.ron"),
            log_level: "info".to_string(),
            log_destination: LogDestination::File,
            upcoming_pages: 1,
        }
    }
}

impl AppConfig {
    pub fn with_api_key_override(mut self, key: Option<String>) -> Self {
        if let Some(key) = key.filter(|key| !key.trim().is_empty()) {
            self.api_key = key;
        }
        self
    }

    /// Falls back to `info` for unknown names.
    pub fn level(&self) -> LevelFilter {
        reel_logging::parse_level(&self.log_level).unwrap_or(LevelFilter::Info)
    }

    pub fn catalog_settings(&self) -> CatalogSettings {
        CatalogSettings {
            base_url: self.base_url.clone(),
            api_key: self.api_key.clone(),
            language: self.language.clone(),
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
            request_timeout: Duration::from_secs(self.request_timeout_secs),
            max_bytes: self.max_response_bytes,
        }
    }

    pub fn splash_settings(&self) -> SplashSettings {
        SplashSettings {
            splash_delay: Duration::from_millis(self.splash_delay_ms),
        }
    }
}

/// Configuration plus the reason defaults were used, if any. Logging is not
/// up yet while loading, so the problem is reported by the caller.
#[derive(Debug)]
pub struct LoadedConfig {
    pub config: AppConfig,
    pub problem: Option<String>,
}

/// Path given as first argument, else `reel.ron`.
pub fn config_path(mut args: impl Iterator<Item = String>) -> PathBuf {
    args.nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE))
}

pub fn load(path: &Path) -> LoadedConfig {
    let content = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            return LoadedConfig {
                config: AppConfig::default(),
                problem: None,
            };
        }
        Err(err) => {
            return LoadedConfig {
                config: AppConfig::default(),
                problem: Some(format!("Failed to read {:?}: {}", path, err)),
            };
        }
    };

    match ron::from_str(&content) {
        Ok(config) => LoadedConfig {
            config,
            problem: None,
        },
        Err(err) => LoadedConfig {
            config: AppConfig::default(),
            problem: Some(format!("Failed to parse {:?}: {}", path, err)),
        },
    }
}
