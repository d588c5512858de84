// src/pipeline/overlay.rs

//! Applies user config overrides on top of the static catalog.

use crate::models::{ConfigOverride, EffectiveConfig, ResortConfig};

/// Overlay `override_` onto `base`. Each overridable field is taken from the
/// override when present, otherwise from the base.
pub fn merge(base: &ResortConfig, override_: Option<&ConfigOverride>) -> EffectiveConfig {
    let mut effective = base.clone();
    let Some(ov) = override_ else {
        return effective;
    };

    if let Some(terrain) = ov.terrain {
        effective.terrain = terrain;
    }
    if let Some(drive) = ov.drive_minutes {
        effective.drive_minutes = drive;
    }
    if let Some(notes) = &ov.notes {
        effective.notes = notes.clone();
    }
    effective
}
