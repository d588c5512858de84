// src/pipeline/recommend.rs

//! End-to-end recommendation run.

use crate::error::Result;
use crate::models::{Config, Preferences, RecommendationResult, ResortState};
use crate::scoring::recommend;
use crate::services::{WeatherCache, load_snapshot};
use crate::storage::KeyValueStore;
use crate::storage::records::{load_manual, load_overrides, load_visits};

use super::assemble::assemble_states;

/// Load every source and assemble the per-resort states.
///
/// Weather fetches and the scraped status file load run concurrently.
/// Per-resort weather failures leave that resort without a forecast.
pub async fn load_states(
    config: &Config,
    store: &dyn KeyValueStore,
    weather: &WeatherCache,
    refresh: bool,
) -> Result<Vec<ResortState>> {
    let (snapshot, forecasts) = tokio::join!(
        load_snapshot(&config.paths.status_file),
        weather.get_all(&config.resorts, refresh),
    );
    let overrides = load_overrides(store).await?;
    let manual = load_manual(store).await?;

    log::info!(
        "Assembled sources: {} scraped, {} manual, {} overrides, {}/{} forecasts",
        snapshot.resorts.len(),
        manual.len(),
        overrides.len(),
        forecasts.len(),
        config.resorts.len()
    );

    Ok(assemble_states(
        &config.resorts,
        &overrides,
        &manual,
        &snapshot,
        &forecasts,
        config.weather.forecast_day_offset,
    ))
}

/// Score and rank every resort against `prefs`.
pub async fn run_recommend(
    config: &Config,
    store: &dyn KeyValueStore,
    weather: &WeatherCache,
    prefs: &Preferences,
    refresh: bool,
) -> Result<Vec<RecommendationResult>> {
    prefs.validate()?;
    let states = load_states(config, store, weather, refresh).await?;
    let visits = load_visits(store).await?;
    Ok(recommend(&states, prefs, &visits, config.scoring.options()))
}
