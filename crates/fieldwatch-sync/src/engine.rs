//! The weather sync loop.
//!
//! One cycle fetches every monitored site strictly in list order, one
//! request at a time with a fixed delay between consecutive sites. A
//! site failure is recorded as an explicit null and never aborts the
//! rest of the pass. Results merge into the shared cache only at the
//! end of the cycle.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use tokio::sync::watch;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::instrument;

use fieldwatch_store::{ObservationLogger, Site};
use fieldwatch_weather::{WeatherClient, WeatherRecord};

use crate::cache::WeatherCache;

const DEFAULT_INTERVAL_SECS: u64 = 3600;
const DEFAULT_REQUEST_SPACING_MS: u64 = 1000;

#[derive(Debug, Clone)]
pub struct SyncConfig {
    /// How often a full pass runs while the site list is monitored.
    pub interval: Duration,
    /// Client-side spacing between consecutive site fetches within one
    /// pass. Not a server-imposed backoff.
    pub request_spacing: Duration,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(DEFAULT_INTERVAL_SECS),
            request_spacing: Duration::from_millis(DEFAULT_REQUEST_SPACING_MS),
        }
    }
}

pub struct SyncEngine {
    weather: WeatherClient,
    logger: ObservationLogger,
    cache: RwLock<WeatherCache>,
    fetching: AtomicBool,
    last_updated: RwLock<Option<DateTime<Utc>>>,
    config: SyncConfig,
}

impl SyncEngine {
    pub fn new(weather: WeatherClient, logger: ObservationLogger, config: SyncConfig) -> Self {
        Self {
            weather,
            logger,
            cache: RwLock::new(WeatherCache::new()),
            fetching: AtomicBool::new(false),
            last_updated: RwLock::new(None),
            config,
        }
    }

    /// Point-in-time copy of the cache for readers.
    pub fn snapshot(&self) -> WeatherCache {
        self.cache.read().clone()
    }

    /// Whether a sync cycle is currently in flight.
    pub fn is_fetching(&self) -> bool {
        self.fetching.load(Ordering::SeqCst)
    }

    /// Completion time of the most recent cycle.
    pub fn last_updated(&self) -> Option<DateTime<Utc>> {
        *self.last_updated.read()
    }

    /// One complete pass over `sites`, strictly sequential.
    ///
    /// An empty list is a no-op. If a cycle is already in flight (the
    /// hourly timer and a manual refresh can race) this call is skipped
    /// rather than interleaved.
    #[instrument(skip_all, fields(sites = sites.len()))]
    pub async fn sync(&self, sites: &[Site]) {
        if sites.is_empty() {
            return;
        }

        if self
            .fetching
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            tracing::debug!("Sync already in flight, skipping this trigger");
            return;
        }

        let mut results: HashMap<String, Option<WeatherRecord>> = HashMap::new();

        for (index, site) in sites.iter().enumerate() {
            // Space requests out, but not after the last site.
            if index > 0 {
                tokio::time::sleep(self.config.request_spacing).await;
            }

            match self.weather.fetch(site.latitude, site.longitude).await {
                Ok(record) => {
                    self.logger.log_detached(site.id.clone(), record.clone());
                    results.insert(site.id.clone(), Some(record));
                }
                Err(e) => {
                    tracing::warn!(site = %site.name, "Weather fetch failed: {}", e);
                    results.insert(site.id.clone(), None);
                }
            }
        }

        let fetched = results.values().filter(|r| r.is_some()).count();
        tracing::info!("Sync cycle complete: {} of {} sites fetched", fetched, sites.len());

        self.cache.write().merge(results);
        *self.last_updated.write() = Some(Utc::now());
        self.fetching.store(false, Ordering::SeqCst);
    }

    /// Run until cancelled: sync once at startup, again on every
    /// site-list change, and on the configured interval in between.
    ///
    /// Cancellation stops scheduling; an in-flight fetch completes or
    /// fails naturally.
    pub async fn run(
        self: Arc<Self>,
        mut sites_rx: watch::Receiver<Vec<Site>>,
        cancel: CancellationToken,
    ) {
        let mut interval = tokio::time::interval(self.config.interval);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = cancel.cancelled() => {
                    tracing::info!("Weather sync stopped");
                    return;
                }
                // First tick fires immediately: the initial sync.
                _ = interval.tick() => {}
                changed = sites_rx.changed() => {
                    if changed.is_err() {
                        tracing::info!("Site list closed, stopping weather sync");
                        return;
                    }
                }
            }

            let sites = sites_rx.borrow_and_update().clone();
            self.sync(&sites).await;
        }
    }
}
