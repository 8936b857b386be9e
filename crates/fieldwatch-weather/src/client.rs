//! Open-Meteo forecast client.
//!
//! One GET per site: the past 24 hours of hourly precipitation plus
//! current-condition parameters, zero forward-looking hours. No API key
//! required.

use std::time::Duration;

use serde::Deserialize;
use tracing::instrument;

use crate::types::{WeatherError, WeatherRecord};
use crate::units::{celsius_to_fahrenheit, kmh_to_mph, mm_to_inches};

const OPEN_METEO_URL: &str = "https://api.open-meteo.com/v1/forecast";
const HOURLY_PARAMS: &str = "precipitation,temperature_2m,relative_humidity_2m,dew_point_2m,wind_speed_10m,wind_direction_10m";
const TIMEZONE: &str = "America/Chicago";
const REQUEST_TIMEOUT_SECS: u64 = 10;

/// Parallel hourly arrays as returned by the forecast API.
///
/// Individual entries can be JSON null; a parameter the API did not
/// return at all deserializes as an empty series.
#[derive(Debug, Default, Deserialize)]
struct HourlySeries {
    #[serde(default)]
    precipitation: Vec<Option<f64>>,
    #[serde(default)]
    temperature_2m: Vec<Option<f64>>,
    #[serde(default)]
    relative_humidity_2m: Vec<Option<f64>>,
    #[serde(default)]
    dew_point_2m: Vec<Option<f64>>,
    #[serde(default)]
    wind_speed_10m: Vec<Option<f64>>,
    #[serde(default)]
    wind_direction_10m: Vec<Option<f64>>,
}

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    #[serde(default)]
    hourly: Option<HourlySeries>,
}

fn last_value(series: &[Option<f64>]) -> Option<f64> {
    series.last().copied().flatten()
}

impl HourlySeries {
    /// Collapse the hourly arrays into one display-unit record.
    ///
    /// Precipitation sums the whole window with null entries as 0; the
    /// instantaneous fields take the most recent value of each series.
    fn into_record(self) -> WeatherRecord {
        let precip_mm: f64 = self.precipitation.iter().copied().flatten().sum();

        WeatherRecord {
            precip_24h_in: mm_to_inches(precip_mm),
            temperature_f: last_value(&self.temperature_2m).map(celsius_to_fahrenheit),
            humidity_pct: last_value(&self.relative_humidity_2m),
            dew_point_f: last_value(&self.dew_point_2m).map(celsius_to_fahrenheit),
            wind_speed_mph: last_value(&self.wind_speed_10m).map(kmh_to_mph),
            wind_direction_deg: last_value(&self.wind_direction_10m),
        }
    }
}

#[derive(Debug, Clone)]
pub struct WeatherClient {
    client: reqwest::Client,
    base_url: String,
}

impl WeatherClient {
    /// Create a client against the public Open-Meteo endpoint.
    ///
    /// # Errors
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn new() -> Result<Self, WeatherError> {
        Self::with_base_url(OPEN_METEO_URL)
    }

    /// Create a client against a custom endpoint (tests, self-hosted API).
    ///
    /// # Errors
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn with_base_url(base_url: &str) -> Result<Self, WeatherError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Fetch the past 24 hours for one coordinate pair.
    ///
    /// # Errors
    /// `WeatherError::Fetch` on a non-success HTTP status, `Network` on
    /// transport failure, `Parse` on a malformed body.
    #[instrument(skip(self), level = "info")]
    pub async fn fetch(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<WeatherRecord, WeatherError> {
        let url = format!(
            "{}?latitude={}&longitude={}&hourly={}&timezone={}&past_hours=24&forecast_hours=0",
            self.base_url, latitude, longitude, HOURLY_PARAMS, TIMEZONE
        );

        let response = self.client.get(&url).send().await?;
        let status = response.status();

        if !status.is_success() {
            return Err(WeatherError::Fetch {
                status: status.as_u16(),
            });
        }

        let body: ForecastResponse = response
            .json()
            .await
            .map_err(|e| WeatherError::Parse(e.to_string()))?;

        Ok(body.hourly.unwrap_or_default().into_record())
    }
}
