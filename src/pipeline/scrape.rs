// src/pipeline/scrape.rs

//! Status page scraping run.

use chrono::Utc;

use crate::error::Result;
use crate::models::{Config, ScrapedSnapshot};
use crate::services::scrapers::{adapters, scrape_all};
use crate::storage::local::write_atomic;
use crate::utils::http::create_async_client;

/// Scrape every supported site and write the status file.
///
/// Site failures are recorded in the snapshot; only client construction and
/// the file write can fail the run.
pub async fn run_scrape(config: &Config) -> Result<ScrapedSnapshot> {
    let client = create_async_client(&config.scraper.user_agent, config.scraper.timeout_secs)?;
    let sites = adapters();
    log::info!("Scraping {} resort sites", sites.len());

    let snapshot = scrape_all(&client, &sites, Utc::now()).await;

    let failed = snapshot
        .resorts
        .values()
        .filter(|s| s.error.is_some())
        .count();
    if failed > 0 {
        log::warn!("{} of {} sites failed", failed, snapshot.resorts.len());
    }

    let bytes = serde_json::to_vec_pretty(&snapshot)?;
    write_atomic(&config.paths.status_file, &bytes).await?;
    log::info!("Status written to {:?}", config.paths.status_file);

    Ok(snapshot)
}
