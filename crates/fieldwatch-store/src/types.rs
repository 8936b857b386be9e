use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use fieldwatch_weather::WeatherRecord;

/// A named, geolocated monitoring point. The id is assigned by the
/// document store on creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Site {
    pub id: String,
    pub name: String,
    /// State/region code, uppercase.
    pub state: String,
    pub latitude: f64,
    pub longitude: f64,
}

/// Site fields as entered by the user, before an id is assigned.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteDraft {
    pub name: String,
    pub state: String,
    pub latitude: f64,
    pub longitude: f64,
}

/// Draft rejection reasons. Validation happens before submission; a
/// draft that fails here never reaches the store.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SiteValidationError {
    #[error("Site name must not be empty")]
    EmptyName,

    #[error("State code must not be empty")]
    EmptyState,

    #[error("Latitude {0} is outside [-90, 90]")]
    LatitudeOutOfRange(f64),

    #[error("Longitude {0} is outside [-180, 180]")]
    LongitudeOutOfRange(f64),
}

fn validate_coordinates(latitude: f64, longitude: f64) -> Result<(), SiteValidationError> {
    if !latitude.is_finite() || !(-90.0..=90.0).contains(&latitude) {
        return Err(SiteValidationError::LatitudeOutOfRange(latitude));
    }
    if !longitude.is_finite() || !(-180.0..=180.0).contains(&longitude) {
        return Err(SiteValidationError::LongitudeOutOfRange(longitude));
    }
    Ok(())
}

impl SiteDraft {
    /// Validate the draft and normalize it for persistence (trimmed
    /// fields, uppercase state code).
    ///
    /// # Errors
    /// Returns the first field that fails validation.
    pub fn validated(mut self) -> Result<Self, SiteValidationError> {
        self.name = self.name.trim().to_string();
        self.state = self.state.trim().to_uppercase();

        if self.name.is_empty() {
            return Err(SiteValidationError::EmptyName);
        }
        if self.state.is_empty() {
            return Err(SiteValidationError::EmptyState);
        }
        validate_coordinates(self.latitude, self.longitude)?;

        Ok(self)
    }
}

/// Partial site update; only the present fields are persisted.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SiteUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
}

impl SiteUpdate {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.state.is_none()
            && self.latitude.is_none()
            && self.longitude.is_none()
    }

    /// Validate and normalize whichever fields the patch carries.
    ///
    /// # Errors
    /// Returns the first carried field that fails validation.
    pub fn validated(mut self) -> Result<Self, SiteValidationError> {
        if let Some(name) = self.name.take() {
            let name = name.trim().to_string();
            if name.is_empty() {
                return Err(SiteValidationError::EmptyName);
            }
            self.name = Some(name);
        }
        if let Some(state) = self.state.take() {
            let state = state.trim().to_uppercase();
            if state.is_empty() {
                return Err(SiteValidationError::EmptyState);
            }
            self.state = Some(state);
        }
        if let Some(lat) = self.latitude {
            if !lat.is_finite() || !(-90.0..=90.0).contains(&lat) {
                return Err(SiteValidationError::LatitudeOutOfRange(lat));
            }
        }
        if let Some(lon) = self.longitude {
            if !lon.is_finite() || !(-180.0..=180.0).contains(&lon) {
                return Err(SiteValidationError::LongitudeOutOfRange(lon));
            }
        }
        Ok(self)
    }
}

/// An immutable historical weather snapshot tied to a site. Written
/// once per successful fetch; never mutated or deleted by this system.
#[derive(Debug, Clone, Deserialize)]
pub struct Observation {
    pub id: String,
    pub site_id: String,
    #[serde(flatten)]
    pub record: WeatherRecord,
    /// Capture time, assigned by the store on insert.
    pub captured_at: DateTime<Utc>,
}

/// Observation as posted to the store. The store assigns id and
/// `captured_at`; the client never sends its own clock.
#[derive(Debug, Clone, Serialize)]
pub struct ObservationDraft {
    pub site_id: String,
    #[serde(flatten)]
    pub record: WeatherRecord,
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
    use super::*;

    fn draft() -> SiteDraft {
        SiteDraft {
            name: "North Field".to_string(),
            state: "nd".to_string(),
            latitude: 46.877,
            longitude: -96.789,
        }
    }

    #[test]
    fn test_draft_normalizes_state_to_uppercase() {
        let valid = draft().validated().unwrap();
        assert_eq!(valid.state, "ND");
        assert_eq!(valid.name, "North Field");
    }

    #[test]
    fn test_draft_trims_whitespace() {
        let mut d = draft();
        d.name = "  North Field  ".to_string();
        d.state = " nd ".to_string();
        let valid = d.validated().unwrap();
        assert_eq!(valid.name, "North Field");
        assert_eq!(valid.state, "ND");
    }

    #[test]
    fn test_draft_rejects_empty_name() {
        let mut d = draft();
        d.name = "   ".to_string();
        assert_eq!(d.validated().unwrap_err(), SiteValidationError::EmptyName);
    }

    #[test]
    fn test_draft_rejects_empty_state() {
        let mut d = draft();
        d.state = String::new();
        assert_eq!(d.validated().unwrap_err(), SiteValidationError::EmptyState);
    }

    #[test]
    fn test_draft_rejects_out_of_range_coordinates() {
        let mut d = draft();
        d.latitude = 91.0;
        assert!(matches!(
            d.validated(),
            Err(SiteValidationError::LatitudeOutOfRange(_))
        ));

        let mut d = draft();
        d.longitude = -180.5;
        assert!(matches!(
            d.validated(),
            Err(SiteValidationError::LongitudeOutOfRange(_))
        ));
    }

    #[test]
    fn test_draft_rejects_non_finite_coordinates() {
        let mut d = draft();
        d.latitude = f64::NAN;
        assert!(d.validated().is_err());
    }

    #[test]
    fn test_draft_accepts_boundary_coordinates() {
        let mut d = draft();
        d.latitude = -90.0;
        d.longitude = 180.0;
        assert!(d.validated().is_ok());
    }

    #[test]
    fn test_update_serializes_only_present_fields() {
        let update = SiteUpdate {
            state: Some("MN".to_string()),
            ..Default::default()
        };
        let json = serde_json::to_string(&update).unwrap();
        assert_eq!(json, r#"{"state":"MN"}"#);
    }

    #[test]
    fn test_update_validates_carried_fields_only() {
        let update = SiteUpdate {
            latitude: Some(200.0),
            ..Default::default()
        };
        assert!(update.validated().is_err());

        let update = SiteUpdate {
            name: Some("South Field".to_string()),
            ..Default::default()
        };
        assert!(update.validated().is_ok());
    }

    #[test]
    fn test_update_normalizes_state() {
        let update = SiteUpdate {
            state: Some("mn".to_string()),
            ..Default::default()
        };
        assert_eq!(update.validated().unwrap().state.as_deref(), Some("MN"));
    }

    #[test]
    fn test_observation_draft_flattens_record_without_timestamp() {
        let draft = ObservationDraft {
            site_id: "site-1".to_string(),
            record: WeatherRecord {
                precip_24h_in: 0.06,
                temperature_f: Some(68.0),
                humidity_pct: Some(75.0),
                dew_point_f: Some(53.6),
                wind_speed_mph: Some(6.2),
                wind_direction_deg: Some(180.0),
            },
        };
        let json = serde_json::to_value(&draft).unwrap();
        assert_eq!(json["site_id"], "site-1");
        assert_eq!(json["precip_24h_in"], 0.06);
        assert!(json.get("captured_at").is_none());
    }
}
