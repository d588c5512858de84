//! Scoring inputs and outputs.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::models::{EffectiveConfig, FusedStatus, WeatherForecast};

/// Everything the scoring engine knows about one resort.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ResortState {
    pub config: EffectiveConfig,
    /// Forecast for the planned day; `None` when the fetch failed
    pub weather: Option<WeatherForecast>,
    pub status: FusedStatus,
}

/// Per-criterion points and their total.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct ScoreBreakdown {
    pub terrain: f64,
    pub conditions: f64,
    pub convenience: f64,
    pub features: f64,
    pub novelty: f64,
    pub total: f64,
}

/// One ranked resort.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationResult {
    pub resort_id: String,
    pub score: ScoreBreakdown,
    /// 1-based; 0 until ranked
    pub rank: usize,
    pub explanations: Vec<String>,
    pub highlights: Vec<String>,
    pub warnings: Vec<String>,
}

/// Visits per resort id. Missing ids count as zero.
pub type VisitCounts = BTreeMap<String, u32>;
