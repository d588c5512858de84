//! Resort catalog entries and their user-editable overrides.

use serde::{Deserialize, Serialize};

/// Slope counts per difficulty tier.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Terrain {
    pub beginner: u32,
    pub intermediate: u32,
    pub advanced: u32,
}

impl Terrain {
    pub fn new(beginner: u32, intermediate: u32, advanced: u32) -> Self {
        Self {
            beginner,
            intermediate,
            advanced,
        }
    }

    /// Sum of all three tiers.
    pub fn total(&self) -> u64 {
        u64::from(self.beginner) + u64::from(self.intermediate) + u64::from(self.advanced)
    }
}

/// WGS84 position used for forecast requests.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

/// Static resort definition from the catalog.
///
/// Never mutated after load; user edits live in [`ConfigOverride`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ResortConfig {
    /// Stable identifier used as the key in every persisted map
    pub id: String,

    /// Display name
    pub name: String,

    /// Japanese display name
    #[serde(default)]
    pub name_jp: String,

    /// Drive time from the base town, in minutes
    pub drive_minutes: u32,

    /// Base elevation in metres
    #[serde(default)]
    pub base_elevation: u32,

    /// Summit elevation in metres
    #[serde(default)]
    pub summit_elevation: u32,

    pub latitude: f64,
    pub longitude: f64,

    pub lifts_total: u32,
    pub slopes_total: u32,

    pub terrain: Terrain,

    /// Free-text notes; feature keywords are matched against these
    #[serde(default)]
    pub notes: String,

    pub website_url: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lift_status_url: Option<String>,
}

impl ResortConfig {
    pub fn coordinates(&self) -> Coordinates {
        Coordinates {
            latitude: self.latitude,
            longitude: self.longitude,
        }
    }
}

/// User-supplied replacement for the mutable facts of a resort.
///
/// Each field is independent; `None` keeps the catalog value.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ConfigOverride {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub terrain: Option<Terrain>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub drive_minutes: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl ConfigOverride {
    /// True when no field is overridden.
    pub fn is_empty(&self) -> bool {
        self.terrain.is_none() && self.drive_minutes.is_none() && self.notes.is_none()
    }
}

/// Catalog entry with the user's override applied.
///
/// Has the same shape as [`ResortConfig`]; produced by
/// [`crate::pipeline::overlay::merge`].
pub type EffectiveConfig = ResortConfig;

/// Built-in catalog of the Myoko and northern Nagano resorts.
pub fn default_catalog() -> Vec<ResortConfig> {
    vec![
        ResortConfig {
            id: "akakura-kanko".into(),
            name: "Akakura Kanko".into(),
            name_jp: "赤倉観光リゾートスキー場".into(),
            drive_minutes: 5,
            base_elevation: 750,
            summit_elevation: 1500,
            latitude: 36.8912,
            longitude: 138.1696,
            lifts_total: 8,
            slopes_total: 14,
            terrain: Terrain::new(5, 6, 3),
            notes: "Wide groomed cruisers, kids park and ski school, family friendly base area"
                .into(),
            website_url: "https://www.akr-ski.com".into(),
            lift_status_url: None,
        },
        ResortConfig {
            id: "akakura-onsen".into(),
            name: "Akakura Onsen".into(),
            name_jp: "赤倉温泉スキー場".into(),
            drive_minutes: 5,
            base_elevation: 750,
            summit_elevation: 1300,
            latitude: 36.8896,
            longitude: 138.1778,
            lifts_total: 11,
            slopes_total: 20,
            terrain: Terrain::new(7, 8, 5),
            notes: "Connected on-piste to Akakura Kanko, night skiing, onsen village".into(),
            website_url: "https://www.akakura-ski.com".into(),
            lift_status_url: None,
        },
        ResortConfig {
            id: "ikenotaira".into(),
            name: "Ikenotaira Onsen".into(),
            name_jp: "池の平温泉スキー場".into(),
            drive_minutes: 10,
            base_elevation: 740,
            summit_elevation: 1200,
            latitude: 36.8775,
            longitude: 138.1845,
            lifts_total: 5,
            slopes_total: 9,
            terrain: Terrain::new(4, 3, 2),
            notes: "Gentle slopes and a kids snow park, popular with families".into(),
            website_url: "https://www.ikenotaira-resort.co.jp".into(),
            lift_status_url: None,
        },
        ResortConfig {
            id: "suginohara".into(),
            name: "Suginohara".into(),
            name_jp: "杉ノ原スキー場".into(),
            drive_minutes: 20,
            base_elevation: 731,
            summit_elevation: 1855,
            latitude: 36.8581,
            longitude: 138.1535,
            lifts_total: 5,
            slopes_total: 16,
            terrain: Terrain::new(6, 6, 4),
            notes: "Home of the longest run in Japan at 8.5km, big vertical".into(),
            website_url: "https://www.princehotels.co.jp/ski/myoko".into(),
            lift_status_url: None,
        },
        ResortConfig {
            id: "seki-onsen".into(),
            name: "Seki Onsen".into(),
            name_jp: "関温泉スキー場".into(),
            drive_minutes: 25,
            base_elevation: 900,
            summit_elevation: 1350,
            latitude: 36.8823,
            longitude: 138.1379,
            lifts_total: 3,
            slopes_total: 6,
            terrain: Terrain::new(1, 2, 3),
            notes: "Deep powder, freeride and tree run terrain, old single chairs".into(),
            website_url: "https://www.sekionsen.com".into(),
            lift_status_url: None,
        },
        ResortConfig {
            id: "lotte-arai".into(),
            name: "Lotte Arai".into(),
            name_jp: "ロッテアライリゾート".into(),
            drive_minutes: 35,
            base_elevation: 330,
            summit_elevation: 1280,
            latitude: 36.9900,
            longitude: 138.1790,
            lifts_total: 5,
            slopes_total: 14,
            terrain: Terrain::new(3, 5, 6),
            notes: "Legendary powder, sanctioned freeride zones and tree run gates".into(),
            website_url: "https://www.lottehotel.com/arai-resort/en".into(),
            lift_status_url: Some("https://www.lottehotel.com/arai-resort/en/snow-season".into()),
        },
        ResortConfig {
            id: "madarao".into(),
            name: "Madarao Mountain".into(),
            name_jp: "斑尾高原スキー場".into(),
            drive_minutes: 40,
            base_elevation: 900,
            summit_elevation: 1382,
            latitude: 36.8620,
            longitude: 138.2630,
            lifts_total: 10,
            slopes_total: 30,
            terrain: Terrain::new(9, 12, 9),
            notes: "Tree run courses, powder bowls and a family kids park".into(),
            website_url: "https://www.madarao.jp/ski".into(),
            lift_status_url: Some("https://www.madarao.jp/ski".into()),
        },
        ResortConfig {
            id: "nozawa-onsen".into(),
            name: "Nozawa Onsen".into(),
            name_jp: "野沢温泉スキー場".into(),
            drive_minutes: 75,
            base_elevation: 565,
            summit_elevation: 1650,
            latitude: 36.9226,
            longitude: 138.4466,
            lifts_total: 20,
            slopes_total: 44,
            terrain: Terrain::new(18, 17, 9),
            notes: "Large resort with long runs, powder days and traditional onsen town".into(),
            website_url: "https://en.nozawaski.com".into(),
            lift_status_url: None,
        },
        ResortConfig {
            id: "hakuba-valley".into(),
            name: "Hakuba Valley".into(),
            name_jp: "白馬バレー".into(),
            drive_minutes: 120,
            base_elevation: 760,
            summit_elevation: 1831,
            latitude: 36.6983,
            longitude: 137.8619,
            lifts_total: 100,
            slopes_total: 84,
            terrain: Terrain::new(30, 33, 21),
            notes: "Interconnected valley of ten resorts, freeride and powder, family areas"
                .into(),
            website_url: "https://www.hakubavalley.com".into(),
            lift_status_url: None,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terrain_total() {
        assert_eq!(Terrain::new(10, 5, 5).total(), 20);
        assert_eq!(Terrain::default().total(), 0);
        assert_eq!(
            Terrain::new(u32::MAX, 1, 0).total(),
            u64::from(u32::MAX) + 1
        );
    }

    #[test]
    fn test_default_catalog_ids_unique() {
        let catalog = default_catalog();
        let mut ids: Vec<_> = catalog.iter().map(|r| r.id.as_str()).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), catalog.len());
    }

    #[test]
    fn test_override_json_uses_camel_case() {
        let ov = ConfigOverride {
            drive_minutes: Some(45),
            ..ConfigOverride::default()
        };
        let json = serde_json::to_string(&ov).unwrap();
        assert_eq!(json, r#"{"driveMinutes":45}"#);
        assert!(!ov.is_empty());
        assert!(ConfigOverride::default().is_empty());
    }
}
