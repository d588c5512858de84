// src/models/mod.rs

//! Domain models for the planner.
//!
//! This module contains all data structures used throughout the application,
//! organized by their primary purpose.

mod config;
mod preferences;
mod recommendation;
mod resort;
mod status;
mod weather;

// Re-export all public types
pub use config::{
    Config, PathsConfig, ReferenceLocation, ScoringConfig, ScraperConfig, WeatherConfig,
};
pub use preferences::{Preferences, SkillLevel, TerrainPreference};
pub use recommendation::{RecommendationResult, ResortState, ScoreBreakdown, VisitCounts};
pub use resort::{ConfigOverride, Coordinates, EffectiveConfig, ResortConfig, Terrain, default_catalog};
pub use status::{
    FusedStatus, ManualPatch, ManualStatus, ResortStatus, ScrapedSnapshot, ScrapedStatus,
};
pub use weather::{
    DayForecast, Period, PeriodForecast, WeatherForecast, describe_weather_code,
};
