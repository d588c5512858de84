// src/services/weather.rs

//! Per-resort forecast cache backed by the key-value store.
//!
//! Entries are valid while younger than the TTL. A forced refresh deletes the
//! entry and fetches regardless of age. Entries that fail to decode are
//! deleted and treated as a miss.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use futures::future::join_all;
use serde::{Deserialize, Serialize, de::DeserializeOwned};

use crate::error::{AppError, Result};
use crate::models::{Coordinates, DayForecast, ResortConfig, WeatherConfig, WeatherForecast};
use crate::services::forecast::{ForecastProvider, daily_to_forecasts, hourly_to_days};
use crate::storage::{HOURLY_CACHE_KEY, KeyValueStore, read_json, weather_cache_key, write_json};
use crate::utils::{Clock, SystemClock};

/// Stored cache entry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CachedWeather<T> {
    pub data: T,
    pub fetched_at: DateTime<Utc>,
}

pub struct WeatherCache {
    provider: Arc<dyn ForecastProvider>,
    store: Arc<dyn KeyValueStore>,
    clock: Arc<dyn Clock>,
    ttl: Duration,
    forecast_days: u32,
    hourly_days: u32,
}

impl WeatherCache {
    pub fn new(
        provider: Arc<dyn ForecastProvider>,
        store: Arc<dyn KeyValueStore>,
        config: &WeatherConfig,
    ) -> Self {
        Self {
            provider,
            store,
            clock: Arc::new(SystemClock),
            ttl: i64::try_from(config.cache_ttl_secs)
                .ok()
                .and_then(Duration::try_seconds)
                .unwrap_or(Duration::MAX),
            forecast_days: config.forecast_days,
            hourly_days: config.hourly_forecast_days,
        }
    }

    /// Replace the time source.
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Daily forecast for a resort, today first.
    pub async fn get(&self, resort_id: &str, at: Coordinates) -> Result<Vec<WeatherForecast>> {
        let key = weather_cache_key(resort_id);
        if let Some(hit) = self.cached::<Vec<WeatherForecast>>(&key).await {
            log::debug!("Weather cache hit for {}", resort_id);
            return Ok(hit);
        }
        log::debug!("Weather cache miss for {}", resort_id);
        self.fetch_daily(resort_id, &key, at).await
    }

    /// Daily forecast for a resort, bypassing and replacing the cache.
    pub async fn refresh(&self, resort_id: &str, at: Coordinates) -> Result<Vec<WeatherForecast>> {
        let key = weather_cache_key(resort_id);
        self.invalidate(&key).await;
        self.fetch_daily(resort_id, &key, at).await
    }

    /// Sub-day forecast for the reference location.
    pub async fn get_hourly(&self, at: Coordinates) -> Result<Vec<DayForecast>> {
        if let Some(hit) = self.cached::<Vec<DayForecast>>(HOURLY_CACHE_KEY).await {
            log::debug!("Hourly weather cache hit");
            return Ok(hit);
        }
        self.fetch_hourly(at).await
    }

    pub async fn refresh_hourly(&self, at: Coordinates) -> Result<Vec<DayForecast>> {
        self.invalidate(HOURLY_CACHE_KEY).await;
        self.fetch_hourly(at).await
    }

    /// Forecasts for every resort, fetched concurrently.
    ///
    /// Failures are logged and leave the resort out of the map.
    pub async fn get_all(
        &self,
        resorts: &[ResortConfig],
        force: bool,
    ) -> BTreeMap<String, Vec<WeatherForecast>> {
        let tasks = resorts.iter().map(|resort| async move {
            let result = if force {
                self.refresh(&resort.id, resort.coordinates()).await
            } else {
                self.get(&resort.id, resort.coordinates()).await
            };
            (resort.id.clone(), result)
        });

        let mut out = BTreeMap::new();
        for (id, result) in join_all(tasks).await {
            match result {
                Ok(forecasts) => {
                    out.insert(id, forecasts);
                }
                Err(e) => log::warn!("{}", e),
            }
        }
        out
    }

    async fn fetch_daily(
        &self,
        resort_id: &str,
        key: &str,
        at: Coordinates,
    ) -> Result<Vec<WeatherForecast>> {
        let columns = self
            .provider
            .daily(at, self.forecast_days)
            .await
            .map_err(|e| AppError::weather(resort_id, e))?;
        let now = self.clock.now();
        let forecasts = daily_to_forecasts(&columns, now);
        self.store_entry(key, &forecasts, now).await;
        log::info!("Fetched {} forecast days for {}", forecasts.len(), resort_id);
        Ok(forecasts)
    }

    async fn fetch_hourly(&self, at: Coordinates) -> Result<Vec<DayForecast>> {
        let columns = self
            .provider
            .hourly(at, self.hourly_days)
            .await
            .map_err(|e| AppError::weather("reference location", e))?;
        let now = self.clock.now();
        let days = hourly_to_days(&columns, now);
        self.store_entry(HOURLY_CACHE_KEY, &days, now).await;
        Ok(days)
    }

    /// Fresh cached data, or `None` on miss, expiry or corruption.
    async fn cached<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        match read_json::<CachedWeather<T>>(self.store.as_ref(), key).await {
            Ok(Some(entry)) => {
                let age = self.clock.now() - entry.fetched_at;
                (age < self.ttl).then_some(entry.data)
            }
            Ok(None) => None,
            Err(AppError::Json(e)) => {
                log::debug!("Discarding corrupt cache entry '{}': {}", key, e);
                self.invalidate(key).await;
                None
            }
            Err(e) => {
                log::warn!("Cache read failed for '{}': {}", key, e);
                None
            }
        }
    }

    async fn invalidate(&self, key: &str) {
        if let Err(e) = self.store.delete(key).await {
            log::warn!("Cache delete failed for '{}': {}", key, e);
        }
    }

    /// Cache write failures only cost a refetch later.
    async fn store_entry<T: Serialize>(&self, key: &str, data: &T, fetched_at: DateTime<Utc>) {
        let entry = CachedWeather { data, fetched_at };
        if let Err(e) = write_json(self.store.as_ref(), key, &entry).await {
            log::warn!("Cache write failed for '{}': {}", key, e);
        }
    }
}
