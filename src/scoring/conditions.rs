//! Conditions criterion: operating status, fresh snow, lift availability.

use crate::models::{ResortState, ResortStatus};

use super::Contribution;

pub const CONDITIONS_CAP: f64 = 22.0;

/// Snowfall tiers as (minimum cm, points), highest first.
const SNOW_TIERS: [(f64, f64); 3] = [(30.0, 13.0), (15.0, 9.0), (5.0, 4.0)];

fn status_points(status: ResortStatus) -> f64 {
    match status {
        ResortStatus::Open => 9.0,
        ResortStatus::Partial => 4.0,
        ResortStatus::Unknown => 3.0,
        ResortStatus::Closed => 0.0,
    }
}

pub(super) fn score(resort: &ResortState) -> Contribution {
    let mut out = Contribution {
        score: status_points(resort.status.status),
        ..Contribution::default()
    };

    match resort.status.status {
        ResortStatus::Open => out.explanations.push("Resort fully open".to_string()),
        ResortStatus::Partial => out.warnings.push("Resort partially open".to_string()),
        ResortStatus::Closed => out.warnings.push("Resort currently closed".to_string()),
        ResortStatus::Unknown => out.warnings.push("Operating status unknown".to_string()),
    }

    let snowfall = resort
        .weather
        .as_ref()
        .map(|w| w.snowfall_24h)
        .unwrap_or(0.0);
    if let Some(&(_, points)) = SNOW_TIERS.iter().find(|(min, _)| snowfall >= *min) {
        out.score += points;
        let cm = snowfall.round() as i64;
        let message = if snowfall >= 30.0 {
            format!("{cm}cm fresh snow forecast")
        } else if snowfall >= 15.0 {
            format!("{cm}cm fresh snow expected")
        } else {
            format!("Light snow forecast ({cm}cm)")
        };
        out.explanations.push(message);
    }

    let lifts_total = resort.config.lifts_total;
    if let Some(open) = resort.status.lifts_open {
        if lifts_total > 0 && (open as f64) / (lifts_total as f64) < 0.5 {
            out.warnings
                .push(format!("Only {open}/{lifts_total} lifts operating"));
        }
    }

    out.capped(CONDITIONS_CAP)
}
