//! Store-specific error types.

use thiserror::Error;

use crate::types::SiteValidationError;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Document store unreachable: {0}")]
    Unavailable(String),

    #[error("Store API error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("Invalid response from store: {0}")]
    InvalidResponse(String),

    #[error("Invalid site: {0}")]
    InvalidSite(#[from] SiteValidationError),
}

impl StoreError {
    /// User-friendly error message for UI display.
    pub fn user_message(&self) -> String {
        match self {
            Self::Unavailable(_) => {
                "Unable to reach the site database. Check your internet connection and service configuration."
                    .to_string()
            }
            Self::Api { status, .. } if *status >= 500 => {
                "The site database is experiencing issues. Please try again later.".to_string()
            }
            Self::Api { .. } => "The request failed. Please try again.".to_string(),
            Self::InvalidResponse(_) => {
                "Received an unexpected response. Please try again.".to_string()
            }
            Self::InvalidSite(e) => e.to_string(),
        }
    }
}

impl From<reqwest::Error> for StoreError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_connect() || e.is_timeout() {
            StoreError::Unavailable(e.to_string())
        } else if let Some(status) = e.status() {
            StoreError::Api {
                status: status.as_u16(),
                message: e.to_string(),
            }
        } else {
            StoreError::Unavailable(e.to_string())
        }
    }
}
