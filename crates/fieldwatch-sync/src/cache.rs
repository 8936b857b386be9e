//! Current best-known weather per site.
//!
//! A missing key means no fetch has been attempted for that site yet;
//! an explicit `None` means the most recent attempt failed. The UI
//! renders the two differently, and both differently from a measured
//! zero.

use std::collections::HashMap;

use fieldwatch_weather::WeatherRecord;

/// Three-way fetch state for one site.
#[derive(Debug, Clone, PartialEq)]
pub enum SiteWeather {
    /// No fetch attempted yet.
    Pending,
    /// The most recent attempt failed.
    Failed,
    /// The most recent attempt succeeded.
    Current(WeatherRecord),
}

#[derive(Debug, Clone, Default)]
pub struct WeatherCache {
    entries: HashMap<String, Option<WeatherRecord>>,
}

impl WeatherCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetch state for a site.
    pub fn status(&self, site_id: &str) -> SiteWeather {
        match self.entries.get(site_id) {
            None => SiteWeather::Pending,
            Some(None) => SiteWeather::Failed,
            Some(Some(record)) => SiteWeather::Current(record.clone()),
        }
    }

    /// The last successful record for a site, if any.
    pub fn record(&self, site_id: &str) -> Option<&WeatherRecord> {
        self.entries.get(site_id).and_then(|e| e.as_ref())
    }

    /// Merge one cycle's results. Only the keys this cycle fetched are
    /// overwritten; entries from prior cycles are left untouched.
    pub fn merge(&mut self, results: HashMap<String, Option<WeatherRecord>>) {
        self.entries.extend(results);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
