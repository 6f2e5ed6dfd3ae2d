//! Centralized store settings.
//! Static defaults live here as constants; `StoreConfig` carries the values a
//! `VersionsManager` is built with.

use std::path::{Path, PathBuf};
use std::time::Duration;

pub const REQUEST_TIMEOUT_SECS: u64 = 30;

pub const VERSIONS_DIR_NAME: &str = "versions";
pub const ASSETS_DIR_NAME: &str = "assets";
pub const LIBRARIES_DIR_NAME: &str = "libraries";
pub const PREFIXES_INDEX_FILENAME: &str = "prefixes.json";
pub const DATA_INDEX_FILENAME: &str = "data.json";

// Environment overrides
pub const STORE_URL_ENV: &str = "DEPOT_STORE_URL";
pub const REQUEST_TIMEOUT_ENV: &str = "DEPOT_REQUEST_TIMEOUT_SECS";

pub fn current_timeout() -> Duration {
    Duration::from_secs(REQUEST_TIMEOUT_SECS)
}

/// Where the store lives remotely and where it is mirrored locally
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Remote base URL, without a trailing slash
    pub store_url: String,

    /// Root data directory; versions, assets and libraries live below it
    pub data_dir: PathBuf,

    /// Per-request timeout enforced by the transport
    pub request_timeout: Duration,
}

impl StoreConfig {
    pub fn new(store_url: impl Into<String>, data_dir: impl Into<PathBuf>) -> Self {
        let store_url = store_url.into().trim_end_matches('/').to_string();

        Self {
            store_url,
            data_dir: data_dir.into(),
            request_timeout: current_timeout(),
        }
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Build a config from `DEPOT_STORE_URL` / `DEPOT_REQUEST_TIMEOUT_SECS`.
    /// Returns `None` when no store URL is configured.
    pub fn from_env(data_dir: impl Into<PathBuf>) -> Option<Self> {
        let store_url = std::env::var(STORE_URL_ENV).ok()?;
        let timeout = parse_timeout(std::env::var(REQUEST_TIMEOUT_ENV).ok().as_deref());

        Some(Self::new(store_url, data_dir).with_request_timeout(timeout))
    }

    /// Get the root data directory
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Get the path to the versions directory
    pub fn versions_dir(&self) -> PathBuf {
        self.data_dir.join(VERSIONS_DIR_NAME)
    }

    /// Get the path to the assets directory
    pub fn assets_dir(&self) -> PathBuf {
        self.data_dir.join(ASSETS_DIR_NAME)
    }

    /// Get the path to the libraries directory
    pub fn libraries_dir(&self) -> PathBuf {
        self.data_dir.join(LIBRARIES_DIR_NAME)
    }

    /// Get the path to the locally persisted prefixes index
    pub fn prefixes_index_path(&self) -> PathBuf {
        self.versions_dir().join(PREFIXES_INDEX_FILENAME)
    }
}

fn parse_timeout(raw: Option<&str>) -> Duration {
    match raw {
        None => current_timeout(),
        Some(value) => match value.trim().parse::<u64>() {
            Ok(secs) if secs > 0 => Duration::from_secs(secs),
            _ => {
                log::warn!(
                    "Ignoring invalid {} value '{}', using {}s",
                    REQUEST_TIMEOUT_ENV,
                    value,
                    REQUEST_TIMEOUT_SECS
                );
                current_timeout()
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_trailing_slash_from_store_url() {
        let config = StoreConfig::new("https://store.example.org/", "/tmp/depot");
        assert_eq!(config.store_url, "https://store.example.org");
    }

    #[test]
    fn derives_local_directories() {
        let config = StoreConfig::new("https://store.example.org", "/tmp/depot");
        assert_eq!(config.versions_dir(), PathBuf::from("/tmp/depot/versions"));
        assert_eq!(config.assets_dir(), PathBuf::from("/tmp/depot/assets"));
        assert_eq!(config.libraries_dir(), PathBuf::from("/tmp/depot/libraries"));
        assert_eq!(
            config.prefixes_index_path(),
            PathBuf::from("/tmp/depot/versions/prefixes.json")
        );
    }

    #[test]
    fn default_timeout_is_applied() {
        let config = StoreConfig::new("https://store.example.org", "/tmp/depot");
        assert_eq!(config.request_timeout, Duration::from_secs(REQUEST_TIMEOUT_SECS));

        let config = config.with_request_timeout(Duration::from_secs(5));
        assert_eq!(config.request_timeout, Duration::from_secs(5));
    }

    #[test]
    fn parse_timeout_falls_back_on_garbage() {
        assert_eq!(parse_timeout(None), current_timeout());
        assert_eq!(parse_timeout(Some("12")), Duration::from_secs(12));
        assert_eq!(parse_timeout(Some("0")), current_timeout());
        assert_eq!(parse_timeout(Some("soon")), current_timeout());
    }
}
