//! Operational status records: scraped, manual, and fused.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Operating state of a resort.
///
/// `Unknown` doubles as the "not entered" marker for manual data.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ResortStatus {
    Open,
    Partial,
    Closed,
    #[default]
    #[serde(other)]
    Unknown,
}

impl ResortStatus {
    /// True for every state except `Unknown`.
    pub fn is_set(self) -> bool {
        self != ResortStatus::Unknown
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ResortStatus::Open => "OPEN",
            ResortStatus::Partial => "PARTIAL",
            ResortStatus::Closed => "CLOSED",
            ResortStatus::Unknown => "UNKNOWN",
        }
    }

    /// Parse a status name case-insensitively.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "OPEN" => Some(ResortStatus::Open),
            "PARTIAL" => Some(ResortStatus::Partial),
            "CLOSED" => Some(ResortStatus::Closed),
            "UNKNOWN" => Some(ResortStatus::Unknown),
            _ => None,
        }
    }
}

impl fmt::Display for ResortStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Best-effort record produced by a site scraper.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ScrapedStatus {
    #[serde(default)]
    pub status: ResortStatus,

    #[serde(default)]
    pub base_depth_cm: Option<u32>,

    #[serde(default)]
    pub lifts_open: Option<u32>,

    #[serde(default)]
    pub slopes_open: Option<u32>,

    #[serde(default)]
    pub temperature: Option<f64>,

    /// Weather description as printed on the resort page
    #[serde(default)]
    pub weather: Option<String>,

    #[serde(default, with = "timestamp")]
    pub scraped_at: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ScrapedStatus {
    /// Record for a scrape that failed outright.
    pub fn failed(error: impl Into<String>, scraped_at: DateTime<Utc>) -> Self {
        Self {
            scraped_at: Some(scraped_at),
            error: Some(error.into()),
            ..Self::default()
        }
    }
}

/// Contents of the scraped status file.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ScrapedSnapshot {
    #[serde(default, with = "timestamp")]
    pub scraped_at: Option<DateTime<Utc>>,

    #[serde(default)]
    pub resorts: BTreeMap<String, ScrapedStatus>,
}

impl ScrapedSnapshot {
    /// Snapshot used when the status file is missing or unreadable.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn get(&self, resort_id: &str) -> Option<&ScrapedStatus> {
        self.resorts.get(resort_id)
    }
}

/// User-entered status for a resort. Always present, possibly all-default.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ManualStatus {
    #[serde(default)]
    pub status: ResortStatus,

    #[serde(default)]
    pub base_depth_cm: Option<u32>,

    #[serde(default)]
    pub lifts_open: Option<u32>,

    #[serde(default)]
    pub slopes_open: Option<u32>,

    #[serde(default)]
    pub notes: String,

    #[serde(default, with = "timestamp")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Partial edit of a [`ManualStatus`].
///
/// Outer `None` leaves a field untouched; `Some(None)` clears a numeric back
/// to "not entered".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ManualPatch {
    pub status: Option<ResortStatus>,
    pub base_depth_cm: Option<Option<u32>>,
    pub lifts_open: Option<Option<u32>>,
    pub slopes_open: Option<Option<u32>>,
    pub notes: Option<String>,
}

impl ManualStatus {
    /// Apply a patch and stamp the edit time.
    pub fn apply(&mut self, patch: ManualPatch, now: DateTime<Utc>) {
        if let Some(status) = patch.status {
            self.status = status;
        }
        if let Some(depth) = patch.base_depth_cm {
            self.base_depth_cm = depth;
        }
        if let Some(lifts) = patch.lifts_open {
            self.lifts_open = lifts;
        }
        if let Some(slopes) = patch.slopes_open {
            self.slopes_open = slopes;
        }
        if let Some(notes) = patch.notes {
            self.notes = notes;
        }
        self.updated_at = Some(now);
    }
}

/// The single status consumed by scoring.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FusedStatus {
    pub status: ResortStatus,
    pub base_depth_cm: Option<u32>,
    pub lifts_open: Option<u32>,
    pub slopes_open: Option<u32>,
    pub notes: String,
    #[serde(with = "timestamp")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<FusedStatus> for ManualStatus {
    fn from(fused: FusedStatus) -> Self {
        Self {
            status: fused.status,
            base_depth_cm: fused.base_depth_cm,
            lifts_open: fused.lifts_open,
            slopes_open: fused.slopes_open,
            notes: fused.notes,
            updated_at: fused.updated_at,
        }
    }
}

/// Optional RFC 3339 timestamps; an empty string reads as unset.
mod timestamp {
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &Option<DateTime<Utc>>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(dt) => serializer.serialize_str(&dt.to_rfc3339()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw: Option<String> = Option::deserialize(deserializer)?;
        match raw.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(s) => DateTime::parse_from_rfc3339(s)
                .map(|dt| Some(dt.with_timezone(&Utc)))
                .map_err(serde::de::Error::custom),
        }
    }
}
