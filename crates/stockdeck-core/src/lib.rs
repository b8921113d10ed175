// stockdeck-core: canonical product store between stockdeck-api and consumers.

pub mod config;
pub mod convert;
pub mod error;
pub mod model;
pub mod snapshot;
pub mod store;

// ── Primary re-exports ──────────────────────────────────────────────
pub use config::{CatalogConfig, DEFAULT_PAGE_LIMIT};
pub use error::CoreError;
pub use snapshot::{Snapshot, SnapshotStore};
pub use store::{LoadStatus, ProductStore};

// Re-export model types at the crate root for ergonomics.
pub use model::{
    CategoryFilter, DEFAULT_CATEGORY, FilterState, NewProduct, Product, ProductChanges, ProductId,
    SortBy, SortDir,
};
