// ── Remote-backed store operations ──
//
// The async CRUD orchestration: each operation calls the catalog client,
// then applies the result to canonical state and persists a snapshot.
// Failures never partially mutate state.
//
// Concurrency contract: completions apply in arrival order
// (last-writer-wins), except fetches -- a fetch superseded by a newer
// one is discarded wholesale, so a slow stale fetch cannot overwrite
// newer data.

use std::sync::atomic::Ordering;

use chrono::Utc;
use tracing::debug;

use super::{LoadStatus, ProductStore, derive_categories, insert_category};
use crate::convert;
use crate::error::CoreError;
use crate::model::{NewProduct, Product, ProductChanges, ProductId};

impl ProductStore {
    /// Fetch the full catalog and replace the canonical collection.
    ///
    /// On failure the collection is left untouched; the error is both
    /// recorded in store state (for view rendering) and returned. No
    /// automatic retry -- callers re-invoke.
    pub async fn fetch_all(&self) -> Result<(), CoreError> {
        let seq = self.fetch_seq.fetch_add(1, Ordering::SeqCst) + 1;
        {
            let mut st = self.state_mut();
            st.status = LoadStatus::Loading;
            st.error = None;
        }

        let result = self.client.list_products(self.page_limit).await;

        if self.fetch_seq.load(Ordering::SeqCst) != seq {
            debug!(seq, "discarding superseded fetch completion");
            return Ok(());
        }

        match result {
            Ok(raw) => {
                let items: Vec<Product> =
                    raw.into_iter().map(convert::normalize_product).collect();
                debug!(count = items.len(), "catalog fetched");

                let snapshot = {
                    let mut st = self.state_mut();
                    st.categories = derive_categories(&items);
                    st.items = items;
                    st.status = LoadStatus::Succeeded;
                    st.error = None;
                    st.last_synced = Some(Utc::now());
                    st.version += 1;
                    Self::snapshot_of(&st)
                };
                self.snapshots.save(&snapshot);
                Ok(())
            }
            Err(e) => {
                let err = CoreError::from(e);
                let mut st = self.state_mut();
                st.status = LoadStatus::Failed;
                st.error = Some(err.to_string());
                Err(err)
            }
        }
    }

    /// Create a product remotely, then insert the normalized record at
    /// the front of the collection (most-recent-first).
    pub async fn create(&self, candidate: NewProduct) -> Result<Product, CoreError> {
        let body = convert::normalize_candidate(candidate);
        let response = self.client.create_product(&body).await?;
        let product = convert::created_product(&body, &response);
        debug!(id = %product.id, title = %product.title, "product created");

        let snapshot = {
            let mut st = self.state_mut();
            st.items.insert(0, product.clone());
            insert_category(&mut st.categories, &product.category);
            st.version += 1;
            Self::snapshot_of(&st)
        };
        self.snapshots.save(&snapshot);
        Ok(product)
    }

    /// Send only the provided fields, then merge the response into the
    /// record at `id` by shallow overwrite.
    ///
    /// A remote success against an id with no local record is a silent
    /// no-op: `Ok(None)`, state untouched.
    pub async fn update(
        &self,
        id: &ProductId,
        changes: ProductChanges,
    ) -> Result<Option<Product>, CoreError> {
        let patch = convert::changes_to_patch(changes);
        let response = self.client.update_product(&id.to_string(), &patch).await?;

        let (updated, snapshot) = {
            let mut st = self.state_mut();
            let Some(pos) = st.items.iter().position(|p| &p.id == id) else {
                debug!(%id, "update acknowledged for id not present locally; skipping merge");
                return Ok(None);
            };
            convert::merge_response(&mut st.items[pos], &response);
            let updated = st.items[pos].clone();
            insert_category(&mut st.categories, &updated.category);
            st.version += 1;
            (updated, Self::snapshot_of(&st))
        };
        self.snapshots.save(&snapshot);
        debug!(%id, "product updated");
        Ok(Some(updated))
    }

    /// Delete remotely, then remove every matching record locally.
    ///
    /// The category set is intentionally left alone: a category may keep
    /// its entry with zero remaining members.
    pub async fn delete(&self, id: &ProductId) -> Result<(), CoreError> {
        self.client.delete_product(&id.to_string()).await?;

        let snapshot = {
            let mut st = self.state_mut();
            let before = st.items.len();
            st.items.retain(|p| &p.id != id);
            if st.items.len() == before {
                debug!(%id, "delete acknowledged for id not present locally");
                return Ok(());
            }
            st.version += 1;
            Self::snapshot_of(&st)
        };
        self.snapshots.save(&snapshot);
        debug!(%id, "product deleted");
        Ok(())
    }
}
