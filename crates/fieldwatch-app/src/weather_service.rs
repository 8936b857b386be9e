//! Read-only weather view over the sync engine.
//!
//! Exposes exactly what the views need: a cache snapshot, the fetching
//! flag, the last cycle's completion time, and a manual refresh that
//! never blocks the caller.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::watch;

use fieldwatch_store::Site;
use fieldwatch_sync::{SiteWeather, SyncEngine, WeatherCache};

#[derive(Clone)]
pub struct WeatherService {
    engine: Arc<SyncEngine>,
    sites_rx: watch::Receiver<Vec<Site>>,
}

impl WeatherService {
    pub fn new(engine: Arc<SyncEngine>, sites_rx: watch::Receiver<Vec<Site>>) -> Self {
        Self { engine, sites_rx }
    }

    /// Point-in-time copy of the weather cache.
    pub fn snapshot(&self) -> WeatherCache {
        self.engine.snapshot()
    }

    /// Fetch state for one site.
    pub fn site_weather(&self, site_id: &str) -> SiteWeather {
        self.engine.snapshot().status(site_id)
    }

    pub fn is_fetching(&self) -> bool {
        self.engine.is_fetching()
    }

    pub fn last_updated(&self) -> Option<DateTime<Utc>> {
        self.engine.last_updated()
    }

    /// User-initiated refresh against the current site list.
    ///
    /// Spawned so the view never waits on a full cycle; the engine
    /// skips the trigger if a cycle is already in flight.
    pub fn refresh(&self) {
        let engine = self.engine.clone();
        let sites = self.sites_rx.borrow().clone();
        tokio::spawn(async move {
            engine.sync(&sites).await;
        });
    }
}
