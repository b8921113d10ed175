// ── Domain model ──

pub mod filters;
pub mod product;

pub use filters::{CategoryFilter, FilterState, SortBy, SortDir};
pub use product::{DEFAULT_CATEGORY, NewProduct, Product, ProductChanges, ProductId};
