//! Metric-to-display unit conversions.
//!
//! The forecast API reports millimeters, Celsius and km/h; everything
//! downstream displays inches, Fahrenheit and mph.

const MM_TO_INCHES: f64 = 0.039_370_1;
const KMH_TO_MPH: f64 = 0.621_371;

/// Round to `decimals` decimal places.
pub fn round_dp(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}

/// Millimeters to inches, rounded to 2 decimal places.
pub fn mm_to_inches(mm: f64) -> f64 {
    round_dp(mm * MM_TO_INCHES, 2)
}

/// Celsius to Fahrenheit, rounded to 1 decimal place.
pub fn celsius_to_fahrenheit(c: f64) -> f64 {
    round_dp(c * 9.0 / 5.0 + 32.0, 1)
}

/// Kilometers per hour to miles per hour, rounded to 1 decimal place.
pub fn kmh_to_mph(kmh: f64) -> f64 {
    round_dp(kmh * KMH_TO_MPH, 1)
}
