//! Features criterion and the keyword scan over resort notes.

use crate::models::{Preferences, ResortConfig};

use super::Contribution;

pub const FEATURES_CAP: f64 = 13.0;

const FAMILY_POINTS: f64 = 8.0;
const BEGINNER_SLOPES_POINTS: f64 = 4.0;
const MIN_BEGINNER_SLOPES: u32 = 4;
const LONG_RUN_POINTS: f64 = 2.0;
const INTERCONNECTED_POINTS: f64 = 2.0;
const LARGE_RESORT_POINTS: f64 = 1.0;
const LARGE_RESORT_SLOPES: u32 = 30;

/// Feature flags derived from free-text notes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResortFeatures {
    pub has_freeride: bool,
    pub has_tree_runs: bool,
    pub has_long_runs: bool,
    pub is_family_friendly: bool,
    pub is_interconnected: bool,
}

impl ResortFeatures {
    /// Case-insensitive keyword scan.
    pub fn from_notes(notes: &str) -> Self {
        let n = notes.to_lowercase();
        Self {
            has_freeride: n.contains("freeride") || n.contains("powder"),
            has_tree_runs: n.contains("tree run"),
            has_long_runs: n.contains("long run") || n.contains("longest run"),
            is_family_friendly: n.contains("kids") || n.contains("family"),
            is_interconnected: n.contains("interconnected") || n.contains("connected"),
        }
    }
}

pub(super) fn score(
    config: &ResortConfig,
    prefs: &Preferences,
    features: &ResortFeatures,
) -> Contribution {
    let mut out = Contribution::default();

    if prefs.family_friendly {
        if features.is_family_friendly {
            out.score += FAMILY_POINTS;
            out.explanations.push("Family-friendly amenities".to_string());
            out.highlights.push("Great for families".to_string());
        } else if config.terrain.beginner >= MIN_BEGINNER_SLOPES {
            out.score += BEGINNER_SLOPES_POINTS;
            out.explanations
                .push("Multiple beginner slopes for children".to_string());
        }
    }

    if features.has_long_runs {
        out.score += LONG_RUN_POINTS;
        out.highlights.push("Long runs".to_string());
    }
    if features.is_interconnected {
        out.score += INTERCONNECTED_POINTS;
        out.highlights.push("Interconnected ski area".to_string());
    }
    if config.slopes_total >= LARGE_RESORT_SLOPES {
        out.score += LARGE_RESORT_POINTS;
        out.highlights.push(format!("{} slopes", config.slopes_total));
    }

    out.capped(FEATURES_CAP)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Terrain;
    use crate::scoring::test_support::resort;

    fn family() -> Preferences {
        Preferences {
            family_friendly: true,
            ..Preferences::default()
        }
    }

    #[test]
    fn test_keyword_scan() {
        let f = ResortFeatures::from_notes("Deep POWDER and Tree Runs, kids park");
        assert!(f.has_freeride);
        assert!(f.has_tree_runs);
        assert!(f.is_family_friendly);
        assert!(!f.has_long_runs);
        assert!(!f.is_interconnected);
    }

    #[test]
    fn test_family_keywords_only_count_when_requested() {
        let mut config = resort("a");
        config.notes = "family base area".into();
        let features = ResortFeatures::from_notes(&config.notes);

        let out = score(&config, &family(), &features);
        assert_eq!(out.score, FAMILY_POINTS);
        assert_eq!(out.highlights, vec!["Great for families".to_string()]);

        let out = score(&config, &Preferences::default(), &features);
        assert_eq!(out.score, 0.0);
    }

    #[test]
    fn test_beginner_slopes_fallback() {
        let mut config = resort("a");
        config.terrain = Terrain::new(4, 4, 4);
        let out = score(&config, &family(), &ResortFeatures::default());
        assert_eq!(out.score, BEGINNER_SLOPES_POINTS);

        config.terrain = Terrain::new(3, 4, 4);
        let out = score(&config, &family(), &ResortFeatures::default());
        assert_eq!(out.score, 0.0);
    }

    #[test]
    fn test_bonuses_surface_as_highlights() {
        let mut config = resort("a");
        config.slopes_total = 44;
        config.notes = "longest run in the area, interconnected lifts".into();
        let features = ResortFeatures::from_notes(&config.notes);
        let out = score(&config, &Preferences::default(), &features);
        assert_eq!(out.score, 5.0);
        assert_eq!(
            out.highlights,
            vec![
                "Long runs".to_string(),
                "Interconnected ski area".to_string(),
                "44 slopes".to_string()
            ]
        );
    }

    #[test]
    fn test_everything_stays_under_cap() {
        let mut config = resort("a");
        config.slopes_total = 100;
        config.notes = "family long run interconnected".into();
        let features = ResortFeatures::from_notes(&config.notes);
        let out = score(&config, &family(), &features);
        assert_eq!(out.score, FEATURES_CAP);
    }
}
