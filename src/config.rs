//! Runtime configuration from environment variables, with compiled-in defaults.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use tracing::warn;

pub const DEFAULT_EXPORT_DIR: &str = "data/swex/exports/profile saves";
pub const DEFAULT_CATALOG_CACHE_PATH: &str = "data/swex/cache/swarfarm_monsters.json";
pub const DEFAULT_CATALOG_URL: &str = "https://swarfarm.com/api/v2/monsters/";
pub const DEFAULT_CATALOG_TIMEOUT_MS: u64 = 15_000;
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8081";

pub const ENV_EXPORT_DIR: &str = "RUNEVIEW_EXPORT_DIR";
pub const ENV_CATALOG_CACHE: &str = "RUNEVIEW_CATALOG_CACHE";
pub const ENV_CATALOG_URL: &str = "RUNEVIEW_CATALOG_URL";
pub const ENV_CATALOG_TIMEOUT_MS: &str = "RUNEVIEW_CATALOG_TIMEOUT_MS";
pub const ENV_BIND: &str = "RUNEVIEW_BIND";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Directory scanned by `profiles` when no directory is given.
    pub export_dir: PathBuf,
    /// Persisted catalog cache (one JSON mapping, rewritten on flush).
    pub catalog_cache_path: PathBuf,
    /// Base URL of the monster catalog API (list endpoint, trailing slash).
    pub catalog_url: String,
    /// Per-request timeout for catalog lookups.
    pub catalog_timeout: Duration,
    pub bind_addr: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            export_dir: PathBuf::from(DEFAULT_EXPORT_DIR),
            catalog_cache_path: PathBuf::from(DEFAULT_CATALOG_CACHE_PATH),
            catalog_url: DEFAULT_CATALOG_URL.to_string(),
            catalog_timeout: Duration::from_millis(DEFAULT_CATALOG_TIMEOUT_MS),
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from an arbitrary key lookup. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let defaults = Self::default();

        let catalog_timeout = match get(ENV_CATALOG_TIMEOUT_MS) {
            Some(raw) => match raw.parse::<u64>() {
                Ok(ms) if ms > 0 => Duration::from_millis(ms),
                _ => {
                    warn!(
                        value = %raw,
                        "invalid {ENV_CATALOG_TIMEOUT_MS}, defaulting to {DEFAULT_CATALOG_TIMEOUT_MS}ms"
                    );
                    defaults.catalog_timeout
                }
            },
            None => defaults.catalog_timeout,
        };

        Self {
            export_dir: get(ENV_EXPORT_DIR).map(PathBuf::from).unwrap_or(defaults.export_dir),
            catalog_cache_path: get(ENV_CATALOG_CACHE)
                .map(PathBuf::from)
                .unwrap_or(defaults.catalog_cache_path),
            catalog_url: get(ENV_CATALOG_URL).unwrap_or(defaults.catalog_url),
            catalog_timeout,
            bind_addr: get(ENV_BIND).unwrap_or(defaults.bind_addr),
        }
    }
}
