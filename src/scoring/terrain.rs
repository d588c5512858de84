//! Terrain criterion: skill match plus terrain-style preferences.

use crate::models::{Preferences, ResortConfig, SkillLevel, Terrain, TerrainPreference};

use super::{Contribution, ResortFeatures};

pub const TERRAIN_CAP: f64 = 35.0;

const SKILL_POINTS: f64 = 22.0;
const PREFERENCE_BUDGET: f64 = 13.0;

/// Slope count of the largest resort in the region; groomed scoring scales to it.
const REFERENCE_SLOPES: f64 = 84.0;

/// Fraction of a tag's share kept when the resort lacks the feature.
const POWDER_FALLBACK: f64 = 0.3;
const TREE_RUN_FALLBACK: f64 = 0.2;

pub(super) fn score(
    config: &ResortConfig,
    prefs: &Preferences,
    features: &ResortFeatures,
) -> Contribution {
    let skill = skill_match(&config.terrain, prefs.skill_level);
    let style = preference_match(&prefs.terrain_preferences, features, config.slopes_total);

    Contribution {
        score: skill.score + style.score,
        explanations: skill
            .explanations
            .into_iter()
            .chain(style.explanations)
            .collect(),
        ..Contribution::default()
    }
    .capped(TERRAIN_CAP)
}

fn percent(ratio: f64) -> u32 {
    (ratio * 100.0).round() as u32
}

fn skill_match(terrain: &Terrain, skill: SkillLevel) -> Contribution {
    let total = terrain.total() as f64;
    if total == 0.0 {
        return Contribution::default();
    }

    let mut out = Contribution::default();
    match skill {
        SkillLevel::Beginner => {
            let ratio = terrain.beginner as f64 / total;
            out.score = ratio * SKILL_POINTS;
            if ratio >= 0.4 {
                out.explanations
                    .push(format!("{}% beginner terrain", percent(ratio)));
            } else if ratio >= 0.25 {
                out.explanations
                    .push(format!("{} beginner slopes available", terrain.beginner));
            }
        }
        SkillLevel::Intermediate => {
            let ratio = terrain.intermediate as f64 / total;
            out.score = ratio * SKILL_POINTS;
            if ratio >= 0.4 {
                out.explanations
                    .push(format!("{}% intermediate terrain", percent(ratio)));
            }
        }
        SkillLevel::Advanced => {
            let ratio = terrain.advanced as f64 / total;
            out.score = ratio * SKILL_POINTS;
            if ratio >= 0.3 {
                out.explanations
                    .push(format!("{}% advanced terrain", percent(ratio)));
            }
        }
        SkillLevel::Mixed => {
            let b = terrain.beginner as f64;
            let i = terrain.intermediate as f64;
            let a = terrain.advanced as f64;
            // Spread is at most 2 * total, so balance stays in [0, 1].
            let spread = (b - i).abs() + (i - a).abs();
            let balance = 1.0 - spread / (total * 2.0);
            out.score = balance * SKILL_POINTS;
            if balance >= 0.6 {
                out.explanations
                    .push("Well-balanced terrain for all skill levels".to_string());
            }
        }
    }
    out
}

fn preference_match(
    wanted: &[TerrainPreference],
    features: &ResortFeatures,
    slopes_total: u32,
) -> Contribution {
    let share = PREFERENCE_BUDGET / wanted.len().max(1) as f64;
    let mut out = Contribution::default();

    for pref in wanted {
        match pref {
            TerrainPreference::Groomed => {
                let size = (slopes_total as f64 / REFERENCE_SLOPES).min(1.0);
                out.score += size * share;
                if slopes_total >= 20 {
                    out.explanations
                        .push(format!("{slopes_total} slopes with groomed runs"));
                }
            }
            TerrainPreference::Powder => {
                if features.has_freeride {
                    out.score += share;
                    out.explanations
                        .push("Known for powder and freeride terrain".to_string());
                } else {
                    out.score += share * POWDER_FALLBACK;
                }
            }
            TerrainPreference::TreeRuns => {
                if features.has_tree_runs {
                    out.score += share;
                    out.explanations
                        .push("Excellent tree run terrain".to_string());
                } else {
                    out.score += share * TREE_RUN_FALLBACK;
                }
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::test_support::resort;
    use approx::assert_relative_eq;

    #[test]
    fn test_beginner_ratio_explained_as_percent() {
        let out = skill_match(&Terrain::new(10, 5, 5), SkillLevel::Beginner);
        assert_relative_eq!(out.score, 11.0);
        assert_eq!(out.explanations, vec!["50% beginner terrain".to_string()]);
    }

    #[test]
    fn test_beginner_mid_ratio_names_count() {
        let out = skill_match(&Terrain::new(3, 6, 1), SkillLevel::Beginner);
        assert_eq!(out.explanations, vec!["3 beginner slopes available".to_string()]);
    }

    #[test]
    fn test_mixed_rewards_balance() {
        let even = skill_match(&Terrain::new(5, 5, 5), SkillLevel::Mixed);
        assert_relative_eq!(even.score, SKILL_POINTS);
        assert!(even.explanations[0].contains("Well-balanced"));

        let lopsided = skill_match(&Terrain::new(15, 0, 0), SkillLevel::Mixed);
        assert!(lopsided.score < even.score);
        assert!(lopsided.score >= 0.0);
    }

    #[test]
    fn test_empty_terrain_scores_zero() {
        let out = skill_match(&Terrain::default(), SkillLevel::Advanced);
        assert_eq!(out.score, 0.0);
    }

    #[test]
    fn test_missing_feature_keeps_baseline() {
        let plain = ResortFeatures::default();
        let out = preference_match(&[TerrainPreference::Powder], &plain, 10);
        assert_relative_eq!(out.score, PREFERENCE_BUDGET * POWDER_FALLBACK);
        assert!(out.explanations.is_empty());

        let powdery = ResortFeatures {
            has_freeride: true,
            ..ResortFeatures::default()
        };
        let out = preference_match(&[TerrainPreference::Powder], &powdery, 10);
        assert_relative_eq!(out.score, PREFERENCE_BUDGET);
    }

    #[test]
    fn test_budget_split_across_tags() {
        let features = ResortFeatures {
            has_freeride: true,
            has_tree_runs: true,
            ..ResortFeatures::default()
        };
        let out = preference_match(
            &[TerrainPreference::Powder, TerrainPreference::TreeRuns],
            &features,
            10,
        );
        assert_relative_eq!(out.score, PREFERENCE_BUDGET);
        assert_eq!(out.explanations.len(), 2);
    }

    #[test]
    fn test_score_is_capped() {
        let mut config = resort("big");
        config.terrain = Terrain::new(0, 84, 0);
        config.slopes_total = 84;
        let prefs = Preferences {
            terrain_preferences: vec![TerrainPreference::Groomed],
            ..Preferences::default()
        };
        let out = score(&config, &prefs, &ResortFeatures::default());
        assert_relative_eq!(out.score, TERRAIN_CAP);
    }
}
