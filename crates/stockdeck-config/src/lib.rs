//! Configuration for the stockdeck CLI.
//!
//! TOML file under the XDG config dir, merged with `STOCKDECK_*` env
//! vars, translated into `stockdeck_core::CatalogConfig`. The CLI layers
//! flag overrides on top.

use std::path::PathBuf;
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use stockdeck_core::{CatalogConfig, DEFAULT_PAGE_LIMIT};

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level TOML configuration.
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub catalog: CatalogSection,

    #[serde(default)]
    pub storage: StorageSection,
}

/// Remote catalog settings.
#[derive(Debug, Deserialize, Serialize)]
pub struct CatalogSection {
    /// Catalog API root.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Upper bound on the single page fetched by a refresh.
    #[serde(default = "default_page_limit")]
    pub page_limit: u32,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

impl Default for CatalogSection {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            page_limit: default_page_limit(),
            timeout: default_timeout(),
        }
    }
}

fn default_base_url() -> String {
    "https://dummyjson.com".into()
}
fn default_page_limit() -> u32 {
    DEFAULT_PAGE_LIMIT
}
fn default_timeout() -> u64 {
    30
}

/// Local persistence settings.
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct StorageSection {
    /// Snapshot file path; defaults into the XDG data dir when unset.
    pub snapshot_path: Option<PathBuf>,
}

// ── Paths ───────────────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("com", "stockdeck", "stockdeck").map_or_else(
        || dirs_fallback().join("config.toml"),
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

/// Default snapshot location in the platform data dir.
pub fn default_snapshot_path() -> PathBuf {
    ProjectDirs::from("com", "stockdeck", "stockdeck").map_or_else(
        || dirs_fallback().join("snapshot.json"),
        |dirs| dirs.data_dir().join("snapshot.json"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("stockdeck");
    p
}

// ── Config loading ──────────────────────────────────────────────────

/// Load the full Config from file + environment.
pub fn load_config() -> Result<Config, ConfigError> {
    let path = config_path();

    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(&path))
        .merge(Env::prefixed("STOCKDECK_").split("__"));

    let config: Config = figment.extract()?;
    Ok(config)
}

/// Load config, returning defaults if the file doesn't exist or is broken.
pub fn load_config_or_default() -> Config {
    load_config().unwrap_or_default()
}

// ── Config saving ───────────────────────────────────────────────────

/// Serialize config to TOML and write to the canonical config path.
pub fn save_config(cfg: &Config) -> Result<(), ConfigError> {
    let path = config_path();
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(&path, toml_str)?;
    Ok(())
}

// ── Translation ─────────────────────────────────────────────────────

/// Build a `CatalogConfig` from loaded configuration.
pub fn to_catalog_config(cfg: &Config) -> Result<CatalogConfig, ConfigError> {
    let base_url: url::Url =
        cfg.catalog
            .base_url
            .parse()
            .map_err(|_| ConfigError::Validation {
                field: "catalog.base_url".into(),
                reason: format!("invalid URL: {}", cfg.catalog.base_url),
            })?;

    let snapshot_path = cfg
        .storage
        .snapshot_path
        .clone()
        .unwrap_or_else(default_snapshot_path);

    Ok(CatalogConfig {
        base_url,
        page_limit: cfg.catalog.page_limit,
        timeout: Duration::from_secs(cfg.catalog.timeout),
        snapshot_path,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn defaults_resolve_to_catalog_config() {
        let cfg = Config::default();
        let catalog = to_catalog_config(&cfg).unwrap();
        assert_eq!(catalog.base_url.as_str(), "https://dummyjson.com/");
        assert_eq!(catalog.page_limit, DEFAULT_PAGE_LIMIT);
        assert_eq!(catalog.timeout, Duration::from_secs(30));
    }

    #[test]
    fn invalid_base_url_is_rejected() {
        let cfg = Config {
            catalog: CatalogSection {
                base_url: "not a url".into(),
                ..CatalogSection::default()
            },
            storage: StorageSection::default(),
        };
        assert!(matches!(
            to_catalog_config(&cfg),
            Err(ConfigError::Validation { .. })
        ));
    }

    #[test]
    fn explicit_snapshot_path_wins() {
        let cfg = Config {
            catalog: CatalogSection::default(),
            storage: StorageSection {
                snapshot_path: Some(PathBuf::from("/tmp/custom.json")),
            },
        };
        let catalog = to_catalog_config(&cfg).unwrap();
        assert_eq!(catalog.snapshot_path, PathBuf::from("/tmp/custom.json"));
    }

    #[test]
    fn config_round_trips_through_toml() {
        let cfg = Config::default();
        let text = toml::to_string_pretty(&cfg).unwrap();
        let back: Config = toml::from_str(&text).unwrap();
        assert_eq!(back.catalog.base_url, cfg.catalog.base_url);
        assert_eq!(back.catalog.page_limit, cfg.catalog.page_limit);
    }
}
