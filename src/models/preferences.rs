//! User request parameters for a recommendation run.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

/// Skill tier of the skiing party.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum SkillLevel {
    Beginner,
    #[default]
    Intermediate,
    Advanced,
    /// Mixed-ability group
    Mixed,
}

impl FromStr for SkillLevel {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "beginner" => Ok(SkillLevel::Beginner),
            "intermediate" => Ok(SkillLevel::Intermediate),
            "advanced" => Ok(SkillLevel::Advanced),
            "mixed" => Ok(SkillLevel::Mixed),
            other => Err(AppError::validation(format!("unknown skill level '{other}'"))),
        }
    }
}

impl fmt::Display for SkillLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SkillLevel::Beginner => "beginner",
            SkillLevel::Intermediate => "intermediate",
            SkillLevel::Advanced => "advanced",
            SkillLevel::Mixed => "mixed",
        };
        f.write_str(s)
    }
}

/// Terrain style tag.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum TerrainPreference {
    Groomed,
    Powder,
    TreeRuns,
}

impl FromStr for TerrainPreference {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "groomed" => Ok(TerrainPreference::Groomed),
            "powder" => Ok(TerrainPreference::Powder),
            "tree-runs" | "trees" => Ok(TerrainPreference::TreeRuns),
            other => Err(AppError::validation(format!(
                "unknown terrain preference '{other}'"
            ))),
        }
    }
}

/// Parameters supplied with each scoring call.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Preferences {
    pub skill_level: SkillLevel,
    /// Requested tags, without duplicates
    pub terrain_preferences: Vec<TerrainPreference>,
    pub max_drive_minutes: u32,
    pub family_friendly: bool,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            skill_level: SkillLevel::Intermediate,
            terrain_preferences: vec![TerrainPreference::Groomed],
            max_drive_minutes: 60,
            family_friendly: false,
        }
    }
}

impl Preferences {
    /// Reject values the scoring formulas cannot use.
    pub fn validate(&self) -> Result<()> {
        if self.max_drive_minutes == 0 {
            return Err(AppError::validation("max drive minutes must be > 0"));
        }
        Ok(())
    }

    /// Drop repeated terrain tags, keeping first occurrences.
    pub fn dedup_terrain(mut self) -> Self {
        let mut seen = Vec::with_capacity(self.terrain_preferences.len());
        self.terrain_preferences.retain(|p| {
            if seen.contains(p) {
                false
            } else {
                seen.push(*p);
                true
            }
        });
        self
    }
}
