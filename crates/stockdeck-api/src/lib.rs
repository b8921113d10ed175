//! Async client for the remote product catalog API.
//!
//! Exposes the four CRUD operations as raw wire calls. Responses come back
//! as loose [`models::RawProduct`] shapes; normalization into canonical
//! domain records lives in `stockdeck-core`, never here.

pub mod client;
pub mod error;
pub mod models;
pub mod transport;

pub use client::CatalogClient;
pub use error::Error;
pub use models::{ProductBody, ProductPage, ProductPatch, RawProduct};
pub use transport::TransportConfig;
