// src/pipeline/fusion.rs

//! Status fusion.
//!
//! Manual entries win field by field, but only where the user actually
//! entered something: a status other than `Unknown`, or a numeric that is not
//! `None`. Everything else falls through to the scraped record.

use crate::models::{FusedStatus, ManualStatus, ScrapedStatus};

/// Merge a scraped record with the manual entry for the same resort.
pub fn fuse(scraped: Option<&ScrapedStatus>, manual: &ManualStatus) -> FusedStatus {
    let status = if manual.status.is_set() {
        manual.status
    } else {
        scraped.map(|s| s.status).unwrap_or_default()
    };

    let pick = |manual_value: Option<u32>, scraped_value: fn(&ScrapedStatus) -> Option<u32>| {
        manual_value.or_else(|| scraped.and_then(scraped_value))
    };

    FusedStatus {
        status,
        base_depth_cm: pick(manual.base_depth_cm, |s| s.base_depth_cm),
        lifts_open: pick(manual.lifts_open, |s| s.lifts_open),
        slopes_open: pick(manual.slopes_open, |s| s.slopes_open),
        notes: manual.notes.clone(),
        updated_at: manual
            .updated_at
            .or_else(|| scraped.and_then(|s| s.scraped_at)),
    }
}
