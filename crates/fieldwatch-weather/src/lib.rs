//! Weather fetching for Fieldwatch
//!
//! Fetches 24-hour precipitation and current conditions per site from
//! the Open-Meteo forecast API and normalizes them into display units.

pub mod client;
pub mod types;
pub mod units;

pub use client::WeatherClient;
pub use types::{WeatherError, WeatherRecord};
