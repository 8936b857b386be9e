//! CRUD over the `sites` collection. Owns the canonical site list.

use std::sync::Arc;

use crate::client::{DocumentClient, SITES_COLLECTION};
use crate::error::StoreError;
use crate::types::{Site, SiteDraft, SiteUpdate};

#[derive(Debug, Clone)]
pub struct SiteStore {
    client: Arc<DocumentClient>,
}

impl SiteStore {
    pub fn new(client: Arc<DocumentClient>) -> Self {
        Self { client }
    }

    /// All monitored sites, each tagged with its store-assigned id.
    ///
    /// # Errors
    /// `StoreError::Unavailable` when the backing service cannot be
    /// reached.
    pub async fn list(&self) -> Result<Vec<Site>, StoreError> {
        self.client.list(SITES_COLLECTION).await
    }

    /// Persist a new site and return it with its assigned id.
    ///
    /// The draft is validated and normalized here as well as in the
    /// service layer; an invalid draft never reaches the store.
    ///
    /// # Errors
    /// `StoreError::InvalidSite` on a bad draft, otherwise store errors.
    pub async fn add(&self, draft: SiteDraft) -> Result<Site, StoreError> {
        let draft = draft.validated()?;
        self.client.add(SITES_COLLECTION, &draft).await
    }

    /// Persist only the fields present in the patch.
    ///
    /// # Errors
    /// `StoreError::InvalidSite` on a bad patch, otherwise store errors.
    pub async fn update(&self, id: &str, patch: SiteUpdate) -> Result<(), StoreError> {
        let patch = patch.validated()?;
        if patch.is_empty() {
            return Ok(());
        }
        self.client.update(SITES_COLLECTION, id, &patch).await
    }

    /// Remove a site. Already-deleted sites count as success.
    ///
    /// Historical observations for the site are left untouched.
    ///
    /// # Errors
    /// `StoreError::Unavailable` when the backing service cannot be
    /// reached.
    pub async fn delete(&self, id: &str) -> Result<(), StoreError> {
        self.client.delete(SITES_COLLECTION, id).await
    }
}
