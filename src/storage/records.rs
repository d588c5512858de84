//! Typed access to the persisted per-resort maps.
//!
//! A record that fails to decode is logged and treated as empty, so a
//! hand-edited file never blocks the planner. The next write replaces it.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;

use crate::error::{AppError, Result};
use crate::models::{ConfigOverride, ManualPatch, ManualStatus, VisitCounts};
use crate::storage::{
    CONFIG_OVERRIDES_KEY, KeyValueStore, MANUAL_STATUS_KEY, VISIT_COUNTS_KEY, read_json,
    write_json,
};

pub type ManualMap = BTreeMap<String, ManualStatus>;
pub type OverrideMap = BTreeMap<String, ConfigOverride>;

/// Upper bound on the slope count of a terrain override.
pub const MAX_OVERRIDE_SLOPES: u64 = 1_000;

async fn load_map<T: DeserializeOwned + Default>(store: &dyn KeyValueStore, key: &str) -> Result<T> {
    match read_json::<T>(store, key).await {
        Ok(value) => Ok(value.unwrap_or_default()),
        Err(AppError::Json(e)) => {
            log::warn!("Discarding unreadable record '{}': {}", key, e);
            Ok(T::default())
        }
        Err(e) => Err(e),
    }
}

// ---- manual status ----

pub async fn load_manual(store: &dyn KeyValueStore) -> Result<ManualMap> {
    load_map(store, MANUAL_STATUS_KEY).await
}

pub async fn save_manual(store: &dyn KeyValueStore, map: &ManualMap) -> Result<()> {
    write_json(store, MANUAL_STATUS_KEY, map).await
}

/// Merge a patch onto a resort's entry, creating the default entry first.
pub fn update_manual(
    map: &mut ManualMap,
    resort_id: &str,
    patch: ManualPatch,
    now: DateTime<Utc>,
) -> ManualStatus {
    let entry = map.entry(resort_id.to_string()).or_default();
    entry.apply(patch, now);
    entry.clone()
}

/// Load, patch and persist a resort's manual entry.
pub async fn edit_manual(
    store: &dyn KeyValueStore,
    resort_id: &str,
    patch: ManualPatch,
    now: DateTime<Utc>,
) -> Result<ManualStatus> {
    let mut map = load_manual(store).await?;
    let updated = update_manual(&mut map, resort_id, patch, now);
    save_manual(store, &map).await?;
    log::info!("Manual status for {} set to {}", resort_id, updated.status);
    Ok(updated)
}

/// Restore a resort's manual entry to the default (all unset).
pub async fn reset_manual(store: &dyn KeyValueStore, resort_id: &str) -> Result<()> {
    let mut map = load_manual(store).await?;
    if map.remove(resort_id).is_some() {
        save_manual(store, &map).await?;
        log::info!("Manual status for {} reset", resort_id);
    }
    Ok(())
}

// ---- config overrides ----

pub async fn load_overrides(store: &dyn KeyValueStore) -> Result<OverrideMap> {
    load_map(store, CONFIG_OVERRIDES_KEY).await
}

/// Replace a resort's override. An empty override removes the entry.
pub async fn set_override(
    store: &dyn KeyValueStore,
    resort_id: &str,
    value: ConfigOverride,
) -> Result<()> {
    if value.drive_minutes == Some(0) {
        return Err(AppError::validation("drive time override must be positive"));
    }
    if let Some(terrain) = &value.terrain {
        if terrain.total() > MAX_OVERRIDE_SLOPES {
            return Err(AppError::validation(format!(
                "terrain override has {} slopes, at most {} allowed",
                terrain.total(),
                MAX_OVERRIDE_SLOPES
            )));
        }
    }

    let mut map = load_overrides(store).await?;
    if value.is_empty() {
        map.remove(resort_id);
    } else {
        map.insert(resort_id.to_string(), value);
    }
    write_json(store, CONFIG_OVERRIDES_KEY, &map).await
}

pub async fn clear_override(store: &dyn KeyValueStore, resort_id: &str) -> Result<()> {
    let mut map = load_overrides(store).await?;
    if map.remove(resort_id).is_some() {
        write_json(store, CONFIG_OVERRIDES_KEY, &map).await?;
    }
    Ok(())
}

// ---- visits ----

pub async fn load_visits(store: &dyn KeyValueStore) -> Result<VisitCounts> {
    load_map(store, VISIT_COUNTS_KEY).await
}

/// Increment a resort's visit count and return the new value.
pub async fn record_visit(store: &dyn KeyValueStore, resort_id: &str) -> Result<u32> {
    let mut visits = load_visits(store).await?;
    let count = visits.entry(resort_id.to_string()).or_insert(0);
    *count = count.saturating_add(1);
    let count = *count;
    write_json(store, VISIT_COUNTS_KEY, &visits).await?;
    Ok(count)
}
