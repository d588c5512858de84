//! Convenience criterion: drive time against the user's limit.

use super::Contribution;

pub const CONVENIENCE_CAP: f64 = 18.0;

/// Points for a drive exactly at the limit.
const FLOOR: f64 = 9.0;

/// Fraction by which `drive` exceeds `max`, or zero when within budget.
fn overage_ratio(drive: u32, max: u32) -> f64 {
    let max = max.max(1);
    if drive <= max {
        return 0.0;
    }
    (drive - max) as f64 / max as f64
}

/// Multiplier applied to the summed total for over-budget drives.
pub fn drive_multiplier(drive: u32, max: u32) -> f64 {
    1.0 / (1.0 + overage_ratio(drive, max))
}

pub(super) fn score(drive: u32, max: u32) -> Contribution {
    let mut out = Contribution::default();
    let limit = max.max(1);

    if drive > limit {
        let penalty = (overage_ratio(drive, limit) * CONVENIENCE_CAP).min(CONVENIENCE_CAP);
        out.score = CONVENIENCE_CAP - penalty;
        out.warnings.push(format!(
            "{drive} min drive exceeds your {max} min preference"
        ));
        return out.capped(CONVENIENCE_CAP);
    }

    let efficiency = 1.0 - drive as f64 / limit as f64;
    out.score = FLOOR + efficiency * (CONVENIENCE_CAP - FLOOR);

    if drive <= 10 {
        out.explanations.push(format!("Only {drive} min drive"));
    } else if drive <= 30 {
        out.explanations.push(format!("Short {drive} min drive"));
    }
    out.capped(CONVENIENCE_CAP)
}
