//! Application configuration structures.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};
use crate::models::{Coordinates, ResortConfig, default_catalog};
use crate::scoring::{ClosedPolicy, ScoringOptions};

/// Root application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Forecast provider and cache settings
    #[serde(default)]
    pub weather: WeatherConfig,

    /// Location used for the hourly forecast
    #[serde(default)]
    pub reference: ReferenceLocation,

    /// HTTP settings for status page scraping
    #[serde(default)]
    pub scraper: ScraperConfig,

    /// File locations
    #[serde(default)]
    pub paths: PathsConfig,

    /// Scoring policy
    #[serde(default)]
    pub scoring: ScoringConfig,

    /// Static resort catalog
    #[serde(default = "default_catalog")]
    pub resorts: Vec<ResortConfig>,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .map_err(|e| AppError::config(format!("cannot read {}: {}", path.display(), e)))?;
        Ok(toml::from_str(&content)?)
    }

    /// Load configuration or return default if loading fails.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(&path).unwrap_or_else(|e| {
            log::warn!(
                "Config load failed from {:?}: {}. Using defaults.",
                path.as_ref(),
                e
            );
            Self::default()
        })
    }

    /// Validate configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        if self.weather.base_url.trim().is_empty() {
            return Err(AppError::validation("weather.base_url is empty"));
        }
        url::Url::parse(&self.weather.base_url)?;
        if self.weather.timezone.trim().is_empty() {
            return Err(AppError::validation("weather.timezone is empty"));
        }
        if !(1..=16).contains(&self.weather.forecast_days) {
            return Err(AppError::validation(
                "weather.forecast_days must be within 1..=16",
            ));
        }
        if !(1..=16).contains(&self.weather.hourly_forecast_days) {
            return Err(AppError::validation(
                "weather.hourly_forecast_days must be within 1..=16",
            ));
        }
        if self.weather.cache_ttl_secs == 0 {
            return Err(AppError::validation("weather.cache_ttl_secs must be > 0"));
        }
        if self.weather.timeout_secs == 0 {
            return Err(AppError::validation("weather.timeout_secs must be > 0"));
        }
        if self.scraper.user_agent.trim().is_empty() {
            return Err(AppError::validation("scraper.user_agent is empty"));
        }
        if self.scraper.timeout_secs == 0 {
            return Err(AppError::validation("scraper.timeout_secs must be > 0"));
        }
        validate_coordinates("reference", self.reference.coordinates())?;

        if self.resorts.is_empty() {
            return Err(AppError::validation("No resorts defined"));
        }
        let mut seen = HashSet::new();
        for resort in &self.resorts {
            if resort.id.trim().is_empty() {
                return Err(AppError::validation("resort with empty id"));
            }
            if !seen.insert(resort.id.as_str()) {
                return Err(AppError::validation(format!(
                    "duplicate resort id '{}'",
                    resort.id
                )));
            }
            validate_coordinates(&resort.id, resort.coordinates())?;
        }
        Ok(())
    }

    /// Look up a catalog entry by id.
    pub fn resort(&self, id: &str) -> Result<&ResortConfig> {
        self.resorts
            .iter()
            .find(|r| r.id == id)
            .ok_or_else(|| AppError::UnknownResort(id.to_string()))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            weather: WeatherConfig::default(),
            reference: ReferenceLocation::default(),
            scraper: ScraperConfig::default(),
            paths: PathsConfig::default(),
            scoring: ScoringConfig::default(),
            resorts: default_catalog(),
        }
    }
}

fn validate_coordinates(context: &str, c: Coordinates) -> Result<()> {
    if !(-90.0..=90.0).contains(&c.latitude) || !(-180.0..=180.0).contains(&c.longitude) {
        return Err(AppError::validation(format!(
            "{context}: coordinates out of range ({}, {})",
            c.latitude, c.longitude
        )));
    }
    Ok(())
}

/// Forecast provider and cache settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherConfig {
    /// Forecast endpoint
    #[serde(default = "defaults::weather_base_url")]
    pub base_url: String,

    /// IANA timezone the provider aligns days and hours to
    #[serde(default = "defaults::timezone")]
    pub timezone: String,

    /// Days requested in daily mode
    #[serde(default = "defaults::forecast_days")]
    pub forecast_days: u32,

    /// Days requested in hourly mode
    #[serde(default = "defaults::hourly_forecast_days")]
    pub hourly_forecast_days: u32,

    /// Cache entry lifetime in seconds
    #[serde(default = "defaults::cache_ttl")]
    pub cache_ttl_secs: u64,

    /// Which forecast day feeds scoring (0 = today, 1 = tomorrow)
    #[serde(default = "defaults::forecast_day_offset")]
    pub forecast_day_offset: usize,

    /// Request timeout in seconds
    #[serde(default = "defaults::timeout")]
    pub timeout_secs: u64,
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            base_url: defaults::weather_base_url(),
            timezone: defaults::timezone(),
            forecast_days: defaults::forecast_days(),
            hourly_forecast_days: defaults::hourly_forecast_days(),
            cache_ttl_secs: defaults::cache_ttl(),
            forecast_day_offset: defaults::forecast_day_offset(),
            timeout_secs: defaults::timeout(),
        }
    }
}

/// Single location used for the sub-day forecast.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReferenceLocation {
    #[serde(default = "defaults::reference_name")]
    pub name: String,
    #[serde(default = "defaults::reference_latitude")]
    pub latitude: f64,
    #[serde(default = "defaults::reference_longitude")]
    pub longitude: f64,
}

impl ReferenceLocation {
    pub fn coordinates(&self) -> Coordinates {
        Coordinates {
            latitude: self.latitude,
            longitude: self.longitude,
        }
    }
}

impl Default for ReferenceLocation {
    fn default() -> Self {
        Self {
            name: defaults::reference_name(),
            latitude: defaults::reference_latitude(),
            longitude: defaults::reference_longitude(),
        }
    }
}

/// HTTP settings for the status page scrapers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScraperConfig {
    /// User-Agent header for HTTP requests
    #[serde(default = "defaults::user_agent")]
    pub user_agent: String,

    /// Request timeout in seconds
    #[serde(default = "defaults::timeout")]
    pub timeout_secs: u64,
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            user_agent: defaults::user_agent(),
            timeout_secs: defaults::timeout(),
        }
    }
}

/// File locations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathsConfig {
    /// Directory backing the key-value store
    #[serde(default = "defaults::store_dir")]
    pub store_dir: PathBuf,

    /// Scraped status JSON written by `scrape` and read by `recommend`
    #[serde(default = "defaults::status_file")]
    pub status_file: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            store_dir: defaults::store_dir(),
            status_file: defaults::status_file(),
        }
    }
}

/// Scoring policy knobs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoringConfig {
    #[serde(default)]
    pub closed_policy: ClosedPolicy,

    /// Include the novelty criterion
    #[serde(default = "defaults::novelty")]
    pub novelty: bool,
}

impl ScoringConfig {
    pub fn options(&self) -> ScoringOptions {
        ScoringOptions {
            closed_policy: self.closed_policy,
            novelty: self.novelty,
        }
    }
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            closed_policy: ClosedPolicy::default(),
            novelty: defaults::novelty(),
        }
    }
}

mod defaults {
    use std::path::PathBuf;

    // Weather defaults
    pub fn weather_base_url() -> String {
        "https://api.open-meteo.com/v1/forecast".into()
    }
    pub fn timezone() -> String {
        "Asia/Tokyo".into()
    }
    pub fn forecast_days() -> u32 {
        3
    }
    pub fn hourly_forecast_days() -> u32 {
        7
    }
    pub fn cache_ttl() -> u64 {
        60 * 60
    }
    pub fn forecast_day_offset() -> usize {
        1
    }
    pub fn timeout() -> u64 {
        30
    }

    // Reference location: Akakura Onsen village
    pub fn reference_name() -> String {
        "Akakura Onsen".into()
    }
    pub fn reference_latitude() -> f64 {
        36.8905
    }
    pub fn reference_longitude() -> f64 {
        138.1745
    }

    // Scraper defaults
    pub fn user_agent() -> String {
        "Mozilla/5.0 (compatible; skiday/0.1)".into()
    }

    // Path defaults
    pub fn store_dir() -> PathBuf {
        PathBuf::from("storage")
    }
    pub fn status_file() -> PathBuf {
        PathBuf::from("storage/resort-status.json")
    }

    // Scoring defaults
    pub fn novelty() -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_missing_file_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = Config::load(dir.path().join("absent.toml")).unwrap_err();
        assert!(matches!(err, AppError::Config(_)));
        assert!(err.to_string().contains("absent.toml"));
    }

    #[test]
    fn load_reads_partial_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("skiday.toml");
        fs::write(&path, "[weather]\nforecast_days = 5\n").unwrap();
        let config = Config::load(&path).unwrap();
        assert_eq!(config.weather.forecast_days, 5);
        assert!(!config.resorts.is_empty());
    }

    #[test]
    fn validate_default_config_ok() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn validate_rejects_empty_user_agent() {
        let mut config = Config::default();
        config.scraper.user_agent = "  ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_zero_ttl() {
        let mut config = Config::default();
        config.weather.cache_ttl_secs = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_duplicate_resort_ids() {
        let mut config = Config::default();
        let dup = config.resorts[0].clone();
        config.resorts.push(dup);
        assert!(matches!(config.validate(), Err(AppError::Validation(_))));
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let config: Config = toml::from_str(
            r#"
            [weather]
            forecast_days = 5

            [scoring]
            closed_policy = "conditions-only"
            "#,
        )
        .unwrap();
        assert_eq!(config.weather.forecast_days, 5);
        assert_eq!(config.weather.cache_ttl_secs, 3600);
        assert_eq!(config.scoring.closed_policy, ClosedPolicy::ConditionsOnly);
        assert!(config.scoring.novelty);
        assert!(!config.resorts.is_empty());
    }

    #[test]
    fn resort_lookup_reports_unknown_id() {
        let config = Config::default();
        assert!(config.resort("madarao").is_ok());
        assert!(matches!(
            config.resort("zermatt"),
            Err(AppError::UnknownResort(_))
        ));
    }
}
