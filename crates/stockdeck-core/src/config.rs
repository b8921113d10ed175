// ── Runtime catalog configuration ──
//
// Describes *where* the remote catalog lives and where the local snapshot
// is kept. Built by consumers (CLI, tests) and handed in; core never
// reads config files.

use std::path::PathBuf;
use std::time::Duration;

use url::Url;

/// The page size requested when no override is configured.
pub const DEFAULT_PAGE_LIMIT: u32 = 100;

/// Configuration for one catalog connection plus local persistence.
#[derive(Debug, Clone)]
pub struct CatalogConfig {
    /// Catalog API root (e.g., `https://dummyjson.com`).
    pub base_url: Url,
    /// Upper bound on the single catalog page fetched by `fetch_all`.
    pub page_limit: u32,
    /// Request timeout.
    pub timeout: Duration,
    /// Where the `{items, categories}` snapshot lives on disk.
    pub snapshot_path: PathBuf,
}

impl CatalogConfig {
    pub fn new(base_url: Url, snapshot_path: PathBuf) -> Self {
        Self {
            base_url,
            page_limit: DEFAULT_PAGE_LIMIT,
            timeout: Duration::from_secs(30),
            snapshot_path,
        }
    }
}
