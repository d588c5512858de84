// src/pipeline/assemble.rs

//! Builds one [`ResortState`] per catalog entry from the separate sources.

use std::collections::BTreeMap;

use crate::models::{ManualStatus, ResortConfig, ResortState, ScrapedSnapshot, WeatherForecast};
use crate::storage::records::{ManualMap, OverrideMap};

use super::{fusion::fuse, overlay::merge};

/// Forecast used for scoring: the entry at `day_offset`, else the last one.
pub fn select_forecast(forecasts: &[WeatherForecast], day_offset: usize) -> Option<WeatherForecast> {
    forecasts.get(day_offset).or(forecasts.last()).cloned()
}

/// Overlay, fuse and attach weather for every catalog entry, in catalog order.
///
/// Resorts missing from any source get that source's default.
pub fn assemble_states(
    catalog: &[ResortConfig],
    overrides: &OverrideMap,
    manual: &ManualMap,
    snapshot: &ScrapedSnapshot,
    weather: &BTreeMap<String, Vec<WeatherForecast>>,
    day_offset: usize,
) -> Vec<ResortState> {
    let unset = ManualStatus::default();
    catalog
        .iter()
        .map(|base| {
            let id = base.id.as_str();
            ResortState {
                config: merge(base, overrides.get(id)),
                weather: weather
                    .get(id)
                    .and_then(|days| select_forecast(days, day_offset)),
                status: fuse(snapshot.get(id), manual.get(id).unwrap_or(&unset)),
            }
        })
        .collect()
}
