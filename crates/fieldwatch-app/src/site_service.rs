//! The mutable site list as the views see it.
//!
//! Wraps `SiteStore` with loading/error state and publishes every list
//! change on a watch channel so the sync loop re-runs against the
//! current list. Store failures become a persistent banner message;
//! the previous list stays visible until a reload succeeds.

use parking_lot::RwLock;
use tokio::sync::watch;

use fieldwatch_store::{Site, SiteDraft, SiteStore, SiteUpdate, StoreError};

#[derive(Debug, Default)]
struct SiteState {
    sites: Vec<Site>,
    loading: bool,
    error: Option<String>,
}

#[derive(Debug)]
pub struct SiteService {
    store: SiteStore,
    state: RwLock<SiteState>,
    sites_tx: watch::Sender<Vec<Site>>,
}

impl SiteService {
    /// Create the service and the receiver the sync loop listens on.
    pub fn new(store: SiteStore) -> (Self, watch::Receiver<Vec<Site>>) {
        let (sites_tx, sites_rx) = watch::channel(Vec::new());
        let service = Self {
            store,
            state: RwLock::new(SiteState::default()),
            sites_tx,
        };
        (service, sites_rx)
    }

    /// Current site list snapshot.
    pub fn sites(&self) -> Vec<Site> {
        self.state.read().sites.clone()
    }

    pub fn is_loading(&self) -> bool {
        self.state.read().loading
    }

    /// The banner message, if the last store operation failed.
    pub fn error(&self) -> Option<String> {
        self.state.read().error.clone()
    }

    /// Re-fetch the full list from the store.
    ///
    /// On failure the previous list is kept and the banner is set; a
    /// later successful reload clears it.
    pub async fn reload(&self) {
        self.state.write().loading = true;

        let result = self.store.list().await;

        let mut state = self.state.write();
        state.loading = false;
        match result {
            Ok(sites) => {
                state.sites = sites;
                state.error = None;
                drop(state);
                self.publish();
            }
            Err(e) => {
                tracing::error!("Failed to load sites: {}", e);
                state.error = Some(e.user_message());
            }
        }
    }

    /// Persist a new site and append it to the list.
    ///
    /// # Errors
    /// `StoreError::InvalidSite` on a bad draft (form-level, no banner),
    /// otherwise store errors (banner set).
    pub async fn add(&self, draft: SiteDraft) -> Result<Site, StoreError> {
        // Reject bad input before it leaves the form.
        let draft = draft.validated()?;

        match self.store.add(draft).await {
            Ok(site) => {
                let mut state = self.state.write();
                state.sites.push(site.clone());
                state.error = None;
                drop(state);
                self.publish();
                Ok(site)
            }
            Err(e) => {
                self.set_banner(&e);
                Err(e)
            }
        }
    }

    /// Persist a partial edit and apply it to the in-memory list.
    ///
    /// # Errors
    /// `StoreError::InvalidSite` on a bad patch, otherwise store errors.
    pub async fn update(&self, id: &str, patch: SiteUpdate) -> Result<(), StoreError> {
        let patch = patch.validated()?;
        if patch.is_empty() {
            return Ok(());
        }

        match self.store.update(id, patch.clone()).await {
            Ok(()) => {
                let mut state = self.state.write();
                if let Some(site) = state.sites.iter_mut().find(|s| s.id == id) {
                    apply_patch(site, patch);
                }
                state.error = None;
                drop(state);
                self.publish();
                Ok(())
            }
            Err(e) => {
                self.set_banner(&e);
                Err(e)
            }
        }
    }

    /// Delete a site and drop it from the list. Historical observations
    /// for the site are not touched.
    ///
    /// # Errors
    /// `StoreError::Unavailable` when the backing service cannot be
    /// reached.
    pub async fn remove(&self, id: &str) -> Result<(), StoreError> {
        match self.store.delete(id).await {
            Ok(()) => {
                let mut state = self.state.write();
                state.sites.retain(|s| s.id != id);
                state.error = None;
                drop(state);
                self.publish();
                Ok(())
            }
            Err(e) => {
                self.set_banner(&e);
                Err(e)
            }
        }
    }

    fn set_banner(&self, error: &StoreError) {
        tracing::error!("Site operation failed: {}", error);
        self.state.write().error = Some(error.user_message());
    }

    fn publish(&self) {
        let sites = self.state.read().sites.clone();
        // Send only fails when the sync loop has shut down.
        let _ = self.sites_tx.send(sites);
    }
}

fn apply_patch(site: &mut Site, patch: SiteUpdate) {
    if let Some(name) = patch.name {
        site.name = name;
    }
    if let Some(state) = patch.state {
        site.state = state;
    }
    if let Some(latitude) = patch.latitude {
        site.latitude = latitude;
    }
    if let Some(longitude) = patch.longitude {
        site.longitude = longitude;
    }
}
