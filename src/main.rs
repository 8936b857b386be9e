use std::sync::Arc;

use anyhow::{Context, Result};
use tokio_util::sync::CancellationToken;

use fieldwatch_app::{SiteService, WeatherService};
use fieldwatch_core::Config;
use fieldwatch_store::{DocumentClient, ObservationLogger, SiteStore};
use fieldwatch_sync::{SyncConfig, SyncEngine};
use fieldwatch_weather::WeatherClient;

#[tokio::main]
async fn main() -> Result<()> {
    fieldwatch_core::init()?;

    let (config, _validation) = Config::load_validated().context("Loading configuration")?;
    let api_key = config
        .store
        .effective_api_key()
        .context("No API key configured")?;

    let client = Arc::new(DocumentClient::new(&config.store.api_url, &api_key)?);
    let site_store = SiteStore::new(client.clone());
    let logger = ObservationLogger::new(client);
    let weather_client = WeatherClient::with_base_url(&config.weather.api_url)?;

    let engine = Arc::new(SyncEngine::new(
        weather_client,
        logger,
        SyncConfig {
            interval: config.weather.refresh_interval(),
            request_spacing: config.weather.request_spacing(),
        },
    ));

    let (sites, sites_rx) = SiteService::new(site_store);
    let sites = Arc::new(sites);
    let weather = WeatherService::new(engine.clone(), sites_rx.clone());

    let cancel = CancellationToken::new();
    let sync_task = tokio::spawn(engine.run(sites_rx, cancel.clone()));

    // Initial load; the sync loop picks the list up off the watch channel.
    sites.reload().await;
    match sites.error() {
        Some(message) => tracing::error!("{}", message),
        None => tracing::info!("Monitoring {} sites", sites.sites().len()),
    }

    tokio::signal::ctrl_c()
        .await
        .context("Waiting for shutdown signal")?;

    tracing::info!("Shutting down");
    cancel.cancel();
    sync_task.await.context("Joining sync loop")?;

    let cache = weather.snapshot();
    tracing::info!(
        "Final state: weather for {} of {} sites, last updated {}",
        cache.len(),
        sites.sites().len(),
        fieldwatch_app::display::last_updated(weather.last_updated())
    );

    Ok(())
}
