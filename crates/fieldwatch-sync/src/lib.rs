//! Weather synchronization for Fieldwatch
//!
//! Keeps an in-memory weather cache consistent with the mutable site
//! list: one strictly sequential fetch pass per cycle, per-site failure
//! tolerance, re-run on a fixed interval and on site-list changes.

pub mod cache;
pub mod engine;

pub use cache::{SiteWeather, WeatherCache};
pub use engine::{SyncConfig, SyncEngine};
