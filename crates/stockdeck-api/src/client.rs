// Catalog API HTTP client
//
// Wraps `reqwest::Client` with catalog-specific URL construction and
// status checking. Error messages name the operation that failed rather
// than echoing server bodies -- the remote's error payloads are not part
// of its contract.

use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::error::Error;
use crate::models::{ProductBody, ProductPage, ProductPatch, RawProduct};
use crate::transport::TransportConfig;

/// Raw HTTP client for the remote product catalog.
///
/// Stateless per call: each method issues one request and maps the
/// response. Callers own retry policy.
pub struct CatalogClient {
    http: reqwest::Client,
    base_url: Url,
}

impl CatalogClient {
    /// Create a new catalog client from a `TransportConfig`.
    ///
    /// `base_url` is the API root (e.g. `https://dummyjson.com`).
    pub fn new(base_url: Url, transport: &TransportConfig) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Ok(Self { http, base_url })
    }

    /// Create a catalog client with a pre-built `reqwest::Client`.
    ///
    /// Used by tests that point at a mock server.
    pub fn from_reqwest(base_url: &str, http: reqwest::Client) -> Result<Self, Error> {
        let base_url = Url::parse(base_url)?;
        Ok(Self { http, base_url })
    }

    /// The API base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    // ── URL builders ─────────────────────────────────────────────────

    /// Build a full URL under `/products`: `products_url("add")` →
    /// `{base}/products/add`, `products_url("")` → `{base}/products`.
    fn products_url(&self, path: &str) -> Result<Url, Error> {
        let full = if path.is_empty() {
            format!("{}/products", trim_base(&self.base_url))
        } else {
            format!("{}/products/{path}", trim_base(&self.base_url))
        };
        Ok(Url::parse(&full)?)
    }

    // ── Operations ───────────────────────────────────────────────────

    /// Fetch the full catalog as one bounded page.
    ///
    /// `GET /products?limit={limit}`
    pub async fn list_products(&self, limit: u32) -> Result<Vec<RawProduct>, Error> {
        let mut url = self.products_url("")?;
        url.query_pairs_mut().append_pair("limit", &limit.to_string());
        debug!(%url, "fetching product catalog");

        let resp = self.http.get(url).send().await?;
        let page: ProductPage = parse_response(resp, "failed to fetch product catalog").await?;
        Ok(page.products)
    }

    /// Create a product.
    ///
    /// `POST /products/add`
    pub async fn create_product(&self, body: &ProductBody) -> Result<RawProduct, Error> {
        let url = self.products_url("add")?;
        debug!(title = %body.title, "creating product");

        let resp = self.http.post(url).json(body).send().await?;
        parse_response(resp, "failed to create product").await
    }

    /// Update a product with a partial body.
    ///
    /// `PUT /products/{id}`
    pub async fn update_product(&self, id: &str, patch: &ProductPatch) -> Result<RawProduct, Error> {
        let url = self.products_url(id)?;
        debug!(id, "updating product");

        let resp = self.http.put(url).json(patch).send().await?;
        parse_response(resp, "failed to update product").await
    }

    /// Delete a product. The response body is an acknowledgement and is
    /// not interpreted beyond the status code.
    ///
    /// `DELETE /products/{id}`
    pub async fn delete_product(&self, id: &str) -> Result<(), Error> {
        let url = self.products_url(id)?;
        debug!(id, "deleting product");

        let resp = self.http.delete(url).send().await?;
        check_status(&resp, "failed to delete product")?;
        Ok(())
    }
}

// ── Response handling ────────────────────────────────────────────────

/// Check the status, then deserialize the body, keeping the raw text
/// around for debugging on parse failure.
async fn parse_response<T: DeserializeOwned>(
    resp: reqwest::Response,
    context: &str,
) -> Result<T, Error> {
    check_status(&resp, context)?;

    let body = resp.text().await?;
    serde_json::from_str(&body).map_err(|e| Error::Deserialization {
        message: e.to_string(),
        body,
    })
}

/// Map a non-2xx status to `Error::Api` with a context-derived message.
fn check_status(resp: &reqwest::Response, context: &str) -> Result<(), Error> {
    let status = resp.status();
    if status.is_success() {
        Ok(())
    } else {
        Err(Error::Api {
            status: status.as_u16(),
            message: context.to_owned(),
        })
    }
}

/// Base URL with any trailing slash removed, so path joins stay clean.
fn trim_base(base: &Url) -> String {
    base.as_str().trim_end_matches('/').to_owned()
}
