//! Persisted key-value storage.
//!
//! Everything the planner keeps between runs goes through [`KeyValueStore`]:
//! string keys, JSON string values. Two backends exist:
//!
//! - [`LocalStore`]: one file per key under a directory
//! - [`MemoryStore`]: a map behind a lock, used in tests
//!
//! ## Keys
//!
//! ```text
//! resort-manual-data        # { resortId: ManualStatus }
//! resort-config-overrides   # { resortId: ConfigOverride }
//! resort-visit-counts       # { resortId: u32 }
//! weather-cache-{resortId}  # CachedWeather<Vec<WeatherForecast>>
//! hourly-weather-cache      # CachedWeather<Vec<DayForecast>>
//! ```

pub mod local;
pub mod memory;
pub mod records;

use async_trait::async_trait;
use serde::{Serialize, de::DeserializeOwned};

use crate::error::Result;

pub use local::LocalStore;
pub use memory::MemoryStore;

pub const MANUAL_STATUS_KEY: &str = "resort-manual-data";
pub const CONFIG_OVERRIDES_KEY: &str = "resort-config-overrides";
pub const VISIT_COUNTS_KEY: &str = "resort-visit-counts";
pub const HOURLY_CACHE_KEY: &str = "hourly-weather-cache";

/// Cache key for one resort's daily forecast.
pub fn weather_cache_key(resort_id: &str) -> String {
    format!("weather-cache-{resort_id}")
}

/// Get/set/delete by string key.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Stored value, or `None` when the key is absent.
    async fn get(&self, key: &str) -> Result<Option<String>>;

    async fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Removing an absent key is not an error.
    async fn delete(&self, key: &str) -> Result<()>;
}

/// Read and decode a JSON value.
pub async fn read_json<T: DeserializeOwned>(
    store: &dyn KeyValueStore,
    key: &str,
) -> Result<Option<T>> {
    match store.get(key).await? {
        Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
        None => Ok(None),
    }
}

/// Encode and write a JSON value.
pub async fn write_json<T: Serialize + ?Sized>(
    store: &dyn KeyValueStore,
    key: &str,
    value: &T,
) -> Result<()> {
    let raw = serde_json::to_string(value)?;
    store.set(key, &raw).await
}
