// src/scoring/mod.rs

//! Multi-criterion suitability scoring.
//!
//! Each criterion lives in its own module and returns a [`Contribution`]
//! already clamped to its cap. [`score`] sums them, applies the drive-time
//! multiplier and collects the messages; [`rank`] orders the results.
//!
//! | Criterion   | Cap |
//! |-------------|-----|
//! | terrain     | 35  |
//! | conditions  | 22  |
//! | convenience | 18  |
//! | features    | 13  |
//! | novelty     | 12  |

mod conditions;
mod convenience;
mod features;
mod novelty;
mod rank;
mod terrain;

use serde::{Deserialize, Serialize};

use crate::models::{Preferences, RecommendationResult, ResortState, ResortStatus, ScoreBreakdown, VisitCounts};

pub use conditions::CONDITIONS_CAP;
pub use convenience::{CONVENIENCE_CAP, drive_multiplier};
pub use features::{FEATURES_CAP, ResortFeatures};
pub use novelty::NOVELTY_CAP;
pub use rank::rank;
pub use terrain::TERRAIN_CAP;

/// How a resort whose fused status is `Closed` is scored.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum ClosedPolicy {
    /// Total of zero with a single "closed" warning; nothing else is computed
    #[default]
    ShortCircuit,
    /// Score normally; the conditions criterion contributes zero for status
    ConditionsOnly,
}

/// Scoring mode switches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoringOptions {
    pub closed_policy: ClosedPolicy,
    /// Include the novelty criterion
    pub novelty: bool,
}

impl ScoringOptions {
    /// Four criteria, closed resorts short-circuit to zero.
    pub fn baseline() -> Self {
        Self {
            closed_policy: ClosedPolicy::ShortCircuit,
            novelty: false,
        }
    }

    /// Baseline plus the novelty criterion.
    pub fn extended() -> Self {
        Self {
            closed_policy: ClosedPolicy::ShortCircuit,
            novelty: true,
        }
    }
}

impl Default for ScoringOptions {
    fn default() -> Self {
        Self::extended()
    }
}

/// Points and messages produced by one criterion.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Contribution {
    pub score: f64,
    pub explanations: Vec<String>,
    pub highlights: Vec<String>,
    pub warnings: Vec<String>,
}

impl Contribution {
    fn capped(mut self, cap: f64) -> Self {
        self.score = if self.score.is_finite() {
            self.score.clamp(0.0, cap)
        } else {
            0.0
        };
        self
    }
}

/// Score one resort. Pure; the returned result has rank 0.
pub fn score(
    resort: &ResortState,
    prefs: &Preferences,
    visits: &VisitCounts,
    options: ScoringOptions,
) -> RecommendationResult {
    let resort_id = resort.config.id.clone();

    if resort.status.status == ResortStatus::Closed
        && options.closed_policy == ClosedPolicy::ShortCircuit
    {
        return RecommendationResult {
            resort_id,
            score: ScoreBreakdown::default(),
            rank: 0,
            explanations: Vec::new(),
            highlights: Vec::new(),
            warnings: vec!["Resort is currently closed".to_string()],
        };
    }

    let features = ResortFeatures::from_notes(&resort.config.notes);

    let terrain = terrain::score(&resort.config, prefs, &features);
    let conditions = conditions::score(resort);
    let convenience = convenience::score(resort.config.drive_minutes, prefs.max_drive_minutes);
    let feature_points = features::score(&resort.config, prefs, &features);
    let novelty = if options.novelty {
        novelty::score(&resort.config, visits)
    } else {
        Contribution::default()
    };

    let sum = terrain.score
        + conditions.score
        + convenience.score
        + feature_points.score
        + novelty.score;
    let total = sum * drive_multiplier(resort.config.drive_minutes, prefs.max_drive_minutes);

    let breakdown = ScoreBreakdown {
        terrain: terrain.score,
        conditions: conditions.score,
        convenience: convenience.score,
        features: feature_points.score,
        novelty: novelty.score,
        total,
    };

    let parts = [terrain, conditions, convenience, feature_points, novelty];
    let mut result = RecommendationResult {
        resort_id,
        score: breakdown,
        rank: 0,
        explanations: Vec::new(),
        highlights: Vec::new(),
        warnings: Vec::new(),
    };
    for part in parts {
        result.explanations.extend(part.explanations);
        result.highlights.extend(part.highlights);
        result.warnings.extend(part.warnings);
    }
    result
}

/// Score every resort and rank the results.
pub fn recommend(
    resorts: &[ResortState],
    prefs: &Preferences,
    visits: &VisitCounts,
    options: ScoringOptions,
) -> Vec<RecommendationResult> {
    let scored = resorts
        .iter()
        .map(|resort| score(resort, prefs, visits, options))
        .collect();
    rank(scored)
}

#[cfg(test)]
pub(crate) mod test_support {
    use crate::models::{FusedStatus, ResortConfig, ResortState, ResortStatus, Terrain};

    pub fn resort(id: &str) -> ResortConfig {
        ResortConfig {
            id: id.to_string(),
            name: id.to_string(),
            name_jp: String::new(),
            drive_minutes: 30,
            base_elevation: 800,
            summit_elevation: 1500,
            latitude: 36.9,
            longitude: 138.2,
            lifts_total: 10,
            slopes_total: 20,
            terrain: Terrain::new(8, 8, 4),
            notes: String::new(),
            website_url: String::new(),
            lift_status_url: None,
        }
    }

    pub fn state(config: ResortConfig, status: ResortStatus) -> ResortState {
        ResortState {
            config,
            weather: None,
            status: FusedStatus {
                status,
                ..FusedStatus::default()
            },
        }
    }
}
