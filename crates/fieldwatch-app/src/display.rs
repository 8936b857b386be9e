//! Display formatting for weather values.
//!
//! The three cache states render distinctly: a site never fetched shows
//! a placeholder dash, a failed fetch shows "n/a", and a measured zero
//! shows "0.00 in". Conflating any two of these misleads the user.

use chrono::{DateTime, Utc};

use fieldwatch_sync::SiteWeather;

const PENDING: &str = "\u{2014}";
const FAILED: &str = "n/a";

/// 24-hour precipitation, two decimals.
pub fn precipitation(weather: &SiteWeather) -> String {
    match weather {
        SiteWeather::Pending => PENDING.to_string(),
        SiteWeather::Failed => FAILED.to_string(),
        SiteWeather::Current(record) => format!("{:.2} in", record.precip_24h_in),
    }
}

/// Current temperature, one decimal.
pub fn temperature(weather: &SiteWeather) -> String {
    optional_value(weather, |r| r.temperature_f.map(|t| format!("{t:.1} \u{b0}F")))
}

/// Current humidity, whole percent.
pub fn humidity(weather: &SiteWeather) -> String {
    optional_value(weather, |r| r.humidity_pct.map(|h| format!("{h:.0}%")))
}

/// Current dew point, one decimal.
pub fn dew_point(weather: &SiteWeather) -> String {
    optional_value(weather, |r| r.dew_point_f.map(|d| format!("{d:.1} \u{b0}F")))
}

/// Wind speed and direction together; either half may be missing.
pub fn wind(weather: &SiteWeather) -> String {
    optional_value(weather, |r| match (r.wind_speed_mph, r.wind_direction_deg) {
        (Some(speed), Some(dir)) => Some(format!("{speed:.1} mph at {dir:.0}\u{b0}")),
        (Some(speed), None) => Some(format!("{speed:.1} mph")),
        _ => None,
    })
}

/// Last sync completion time, or the pending placeholder before the
/// first cycle lands.
pub fn last_updated(at: Option<DateTime<Utc>>) -> String {
    match at {
        Some(at) => at.format("%Y-%m-%d %H:%M UTC").to_string(),
        None => PENDING.to_string(),
    }
}

fn optional_value<F>(weather: &SiteWeather, format: F) -> String
where
    F: Fn(&fieldwatch_weather::WeatherRecord) -> Option<String>,
{
    match weather {
        SiteWeather::Pending => PENDING.to_string(),
        SiteWeather::Failed => FAILED.to_string(),
        // A successful fetch can still miss individual series.
        SiteWeather::Current(record) => format(record).unwrap_or_else(|| FAILED.to_string()),
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
    use super::*;
    use chrono::TimeZone;

    use fieldwatch_weather::WeatherRecord;

    fn current(precip: f64) -> SiteWeather {
        SiteWeather::Current(WeatherRecord {
            precip_24h_in: precip,
            temperature_f: Some(68.0),
            humidity_pct: Some(75.0),
            dew_point_f: Some(53.6),
            wind_speed_mph: Some(6.2),
            wind_direction_deg: Some(180.0),
        })
    }

    #[test]
    fn test_three_cache_states_render_distinctly() {
        let pending = precipitation(&SiteWeather::Pending);
        let failed = precipitation(&SiteWeather::Failed);
        let zero = precipitation(&current(0.0));

        assert_eq!(zero, "0.00 in");
        assert_ne!(pending, failed);
        assert_ne!(pending, zero);
        assert_ne!(failed, zero);
    }

    #[test]
    fn test_precipitation_rounds_to_two_decimals() {
        assert_eq!(precipitation(&current(0.06)), "0.06 in");
        assert_eq!(precipitation(&current(1.5)), "1.50 in");
    }

    #[test]
    fn test_current_conditions_format() {
        let weather = current(0.06);
        assert_eq!(temperature(&weather), "68.0 \u{b0}F");
        assert_eq!(humidity(&weather), "75%");
        assert_eq!(dew_point(&weather), "53.6 \u{b0}F");
        assert_eq!(wind(&weather), "6.2 mph at 180\u{b0}");
    }

    #[test]
    fn test_missing_series_in_a_successful_fetch_shows_na() {
        let weather = SiteWeather::Current(WeatherRecord {
            precip_24h_in: 0.0,
            temperature_f: None,
            humidity_pct: None,
            dew_point_f: None,
            wind_speed_mph: None,
            wind_direction_deg: None,
        });

        assert_eq!(temperature(&weather), "n/a");
        assert_eq!(wind(&weather), "n/a");
        // Precipitation is always present on a successful fetch.
        assert_eq!(precipitation(&weather), "0.00 in");
    }

    #[test]
    fn test_wind_without_direction_shows_speed_only() {
        let weather = SiteWeather::Current(WeatherRecord {
            precip_24h_in: 0.0,
            temperature_f: None,
            humidity_pct: None,
            dew_point_f: None,
            wind_speed_mph: Some(6.2),
            wind_direction_deg: None,
        });
        assert_eq!(wind(&weather), "6.2 mph");
    }

    #[test]
    fn test_last_updated_formats_or_placeholders() {
        assert_eq!(last_updated(None), "\u{2014}");

        let at = Utc.with_ymd_and_hms(2026, 8, 27, 14, 30, 0).unwrap();
        assert_eq!(last_updated(Some(at)), "2026-08-27 14:30 UTC");
    }
}
