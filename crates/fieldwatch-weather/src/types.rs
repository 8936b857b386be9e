use serde::{Deserialize, Serialize};

/// Current conditions for one site, derived from the hourly series.
///
/// Precipitation is the 24-hour cumulative total in inches. The
/// instantaneous fields are the most recent hourly values, or `None`
/// when the API returned an empty series for that parameter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherRecord {
    /// Cumulative precipitation over the past 24 hours, inches (2 dp).
    pub precip_24h_in: f64,
    /// Temperature, degrees Fahrenheit (1 dp).
    pub temperature_f: Option<f64>,
    /// Relative humidity, percent.
    pub humidity_pct: Option<f64>,
    /// Dew point, degrees Fahrenheit (1 dp).
    pub dew_point_f: Option<f64>,
    /// Wind speed, miles per hour (1 dp).
    pub wind_speed_mph: Option<f64>,
    /// Wind direction, degrees 0-360.
    pub wind_direction_deg: Option<f64>,
}

/// Weather client errors
#[derive(Debug, thiserror::Error)]
pub enum WeatherError {
    #[error("Weather API returned status {status}")]
    Fetch { status: u16 },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Parse error: {0}")]
    Parse(String),
}

impl WeatherError {
    /// User-friendly message for UI display.
    pub fn user_message(&self) -> String {
        match self {
            Self::Fetch { status } if *status >= 500 => {
                "The weather service is experiencing issues. Data will refresh later.".to_string()
            }
            Self::Fetch { .. } => "Weather data could not be fetched for this site.".to_string(),
            Self::Network(_) => "Network error reaching the weather service.".to_string(),
            Self::Parse(_) => {
                "Received an unexpected response from the weather service.".to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
    use super::*;

    #[test]
    fn test_fetch_error_carries_status() {
        let err = WeatherError::Fetch { status: 503 };
        assert!(err.to_string().contains("503"));
    }

    #[test]
    fn test_user_messages_distinguish_server_errors() {
        let server = WeatherError::Fetch { status: 500 };
        let client = WeatherError::Fetch { status: 404 };
        assert_ne!(server.user_message(), client.user_message());
    }

    #[test]
    fn test_record_serialization_keeps_null_fields() {
        let record = WeatherRecord {
            precip_24h_in: 0.06,
            temperature_f: Some(68.0),
            humidity_pct: None,
            dew_point_f: None,
            wind_speed_mph: Some(6.2),
            wind_direction_deg: Some(180.0),
        };

        let json = serde_json::to_string(&record).unwrap();
        assert!(json.contains("\"precip_24h_in\":0.06"));
        assert!(json.contains("\"humidity_pct\":null"));
    }
}
