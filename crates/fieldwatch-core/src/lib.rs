//! Application core for Fieldwatch
//!
//! Configuration loading and validation, plus tracing setup for the
//! binary.

pub mod config;

pub use config::{Config, StoreConfig, ValidationResult, WeatherConfig};

use anyhow::Result;

/// Initialize logging for the application
pub fn init() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    tracing::info!("Fieldwatch core initialized");
    Ok(())
}
