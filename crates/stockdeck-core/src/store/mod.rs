// ── Canonical product store ──
//
// Owns the canonical collection, filter criteria, and load-status state
// machine. All mutations flow through async remote calls (ops.rs); the
// filtered/sorted view is computed on demand and memoized (visible.rs).

mod ops;
mod visible;

use std::sync::atomic::AtomicU64;
use std::sync::{Mutex, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::debug;

use stockdeck_api::{CatalogClient, TransportConfig};

use crate::config::CatalogConfig;
use crate::error::CoreError;
use crate::model::{CategoryFilter, FilterState, Product, SortBy, SortDir};
use crate::snapshot::{Snapshot, SnapshotStore};

// ── LoadStatus ──────────────────────────────────────────────────────

/// Fetch lifecycle state observable by consumers.
///
/// Exactly one status is active at a time and only `fetch_all`
/// transitions it; create/update/delete operate independently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, strum::Display)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum LoadStatus {
    Idle,
    Loading,
    Succeeded,
    Failed,
}

// ── Store state ─────────────────────────────────────────────────────

struct StoreState {
    /// Canonical collection, most-recent-first for created records.
    items: Vec<Product>,
    /// Distinct categories, lexicographically sorted. Extended on
    /// create/update, replaced on fetch, never pruned on delete.
    categories: Vec<String>,
    status: LoadStatus,
    error: Option<String>,
    filters: FilterState,
    /// Bumped on every collection mutation; keys the visible-view memo.
    version: u64,
    last_synced: Option<DateTime<Utc>>,
}

/// The canonical in-memory product store.
///
/// Explicitly constructed and passed by reference to consumers -- there
/// is no global instance. Methods take `&self`; operations interleave
/// freely (a filter setter may run while a fetch is in flight) with no
/// mutation-level locking across in-flight remote calls.
pub struct ProductStore {
    client: CatalogClient,
    snapshots: SnapshotStore,
    page_limit: u32,
    state: RwLock<StoreState>,
    visible_cache: Mutex<Option<visible::VisibleCache>>,
    /// Monotonic fetch sequence; stale completions are discarded.
    fetch_seq: AtomicU64,
}

impl ProductStore {
    /// Build a store from configuration, seeding the collection from the
    /// persisted snapshot when one exists.
    pub fn new(config: CatalogConfig) -> Result<Self, CoreError> {
        let transport = TransportConfig::default().with_timeout(config.timeout);
        let client = CatalogClient::new(config.base_url, &transport)?;
        let snapshots = SnapshotStore::new(config.snapshot_path);
        Ok(Self::with_client(client, snapshots, config.page_limit))
    }

    /// Build a store with a pre-built client -- used by tests pointing at
    /// a mock server.
    pub fn with_client(client: CatalogClient, snapshots: SnapshotStore, page_limit: u32) -> Self {
        let seeded = snapshots.load().unwrap_or_default();
        if !seeded.items.is_empty() {
            debug!(count = seeded.items.len(), "seeded collection from snapshot");
        }

        Self {
            client,
            snapshots,
            page_limit,
            state: RwLock::new(StoreState {
                items: seeded.items,
                categories: seeded.categories,
                status: LoadStatus::Idle,
                error: None,
                filters: FilterState::default(),
                version: 0,
                last_synced: None,
            }),
            visible_cache: Mutex::new(None),
            fetch_seq: AtomicU64::new(0),
        }
    }

    // ── Read accessors ───────────────────────────────────────────────

    /// The canonical collection, unfiltered.
    pub fn products(&self) -> Vec<Product> {
        self.state().items.clone()
    }

    /// Distinct categories, lexicographically sorted.
    pub fn categories(&self) -> Vec<String> {
        self.state().categories.clone()
    }

    pub fn status(&self) -> LoadStatus {
        self.state().status
    }

    /// Message from the most recent failed fetch, if any.
    pub fn error(&self) -> Option<String> {
        self.state().error.clone()
    }

    pub fn filters(&self) -> FilterState {
        self.state().filters.clone()
    }

    /// When the collection was last replaced by a successful fetch.
    pub fn last_synced(&self) -> Option<DateTime<Utc>> {
        self.state().last_synced
    }

    pub fn product_count(&self) -> usize {
        self.state().items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state().items.is_empty()
    }

    // ── Filter setters ───────────────────────────────────────────────
    //
    // Synchronous and infallible. They never touch load status or
    // persistence, and they leave the collection version alone -- the
    // visible-view memo keys on (version, filters).

    pub fn set_query(&self, query: impl Into<String>) {
        self.state_mut().filters.query = query.into();
    }

    pub fn set_category(&self, category: CategoryFilter) {
        self.state_mut().filters.category = category;
    }

    pub fn set_sort_by(&self, sort_by: SortBy) {
        self.state_mut().filters.sort_by = sort_by;
    }

    pub fn set_sort_dir(&self, sort_dir: SortDir) {
        self.state_mut().filters.sort_dir = sort_dir;
    }

    // ── Lock helpers ─────────────────────────────────────────────────

    fn state(&self) -> RwLockReadGuard<'_, StoreState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn state_mut(&self) -> RwLockWriteGuard<'_, StoreState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    fn snapshot_of(state: &StoreState) -> Snapshot {
        Snapshot {
            items: state.items.clone(),
            categories: state.categories.clone(),
        }
    }
}

// ── Category set maintenance ────────────────────────────────────────

/// Recompute the full category set from a collection: distinct non-empty
/// categories in lexicographic order.
fn derive_categories(items: &[Product]) -> Vec<String> {
    let mut categories: Vec<String> = items
        .iter()
        .map(|p| p.category.clone())
        .filter(|c| !c.is_empty())
        .collect();
    categories.sort();
    categories.dedup();
    categories
}

/// Insert a category into an already-sorted set, keeping it sorted.
fn insert_category(categories: &mut Vec<String>, category: &str) {
    if category.is_empty() {
        return;
    }
    if let Err(pos) = categories.binary_search_by(|c| c.as_str().cmp(category)) {
        categories.insert(pos, category.to_owned());
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::model::ProductId;

    fn product(id: u64, category: &str) -> Product {
        Product {
            id: ProductId::Number(id),
            title: format!("p{id}"),
            price: 1.0,
            stock: 1,
            category: category.into(),
            thumbnail: String::new(),
        }
    }

    #[test]
    fn derive_categories_dedups_and_sorts() {
        let items = vec![
            product(1, "tools"),
            product(2, "fruit"),
            product(3, "tools"),
            product(4, "dairy"),
        ];
        assert_eq!(derive_categories(&items), vec!["dairy", "fruit", "tools"]);
    }

    #[test]
    fn derive_categories_skips_empty() {
        let items = vec![product(1, ""), product(2, "fruit")];
        assert_eq!(derive_categories(&items), vec!["fruit"]);
    }

    #[test]
    fn insert_category_keeps_sorted_order() {
        let mut cats = vec!["dairy".to_owned(), "tools".to_owned()];
        insert_category(&mut cats, "fruit");
        assert_eq!(cats, vec!["dairy", "fruit", "tools"]);
    }

    #[test]
    fn insert_category_is_idempotent() {
        let mut cats = vec!["fruit".to_owned()];
        insert_category(&mut cats, "fruit");
        assert_eq!(cats, vec!["fruit"]);
    }
}
