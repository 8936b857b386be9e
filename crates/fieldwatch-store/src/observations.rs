//! Best-effort observation history.
//!
//! Every successful weather fetch is appended to the `observations`
//! collection. Logging is strictly best-effort: a failure is logged
//! locally and never reaches the sync loop.

use std::sync::Arc;

use fieldwatch_weather::WeatherRecord;

use crate::client::{DocumentClient, OBSERVATIONS_COLLECTION};
use crate::error::StoreError;
use crate::types::{Observation, ObservationDraft};

#[derive(Debug, Clone)]
pub struct ObservationLogger {
    client: Arc<DocumentClient>,
}

impl ObservationLogger {
    pub fn new(client: Arc<DocumentClient>) -> Self {
        Self { client }
    }

    /// Append one observation; the store assigns the capture timestamp.
    ///
    /// # Errors
    /// `StoreError::Unavailable` when the backing service cannot be
    /// reached.
    pub async fn log(&self, site_id: &str, record: &WeatherRecord) -> Result<Observation, StoreError> {
        let draft = ObservationDraft {
            site_id: site_id.to_string(),
            record: record.clone(),
        };
        self.client.add(OBSERVATIONS_COLLECTION, &draft).await
    }

    /// Fire-and-forget append. The spawned task owns the write; failure
    /// is logged at warn level and discarded, so the caller never waits
    /// on the history collection.
    pub fn log_detached(&self, site_id: String, record: WeatherRecord) {
        let logger = self.clone();
        tokio::spawn(async move {
            if let Err(e) = logger.log(&site_id, &record).await {
                tracing::warn!(site_id = %site_id, "Failed to record observation: {}", e);
            }
        });
    }
}
