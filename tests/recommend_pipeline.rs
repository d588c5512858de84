//! Full recommend run against an in-memory store and a canned forecast.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use tempfile::TempDir;

use skiday::error::{AppError, Result};
use skiday::models::{
    Config, ConfigOverride, Coordinates, ManualPatch, Preferences, ResortStatus, SkillLevel,
    TerrainPreference,
};
use skiday::pipeline::{load_states, run_recommend};
use skiday::services::{DailyColumns, ForecastProvider, HourlyColumns, WeatherCache};
use skiday::storage::{MemoryStore, records};
use skiday::utils::ManualClock;

/// Heavy snow tomorrow north of 36.85°, none further south.
/// Requests for `fail_latitude` always fail.
struct CannedForecast {
    calls: AtomicUsize,
    fail_latitude: f64,
}

#[async_trait]
impl ForecastProvider for CannedForecast {
    async fn daily(&self, at: Coordinates, _days: u32) -> Result<DailyColumns> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if (at.latitude - self.fail_latitude).abs() < 1e-9 {
            return Err(AppError::validation("upstream timeout"));
        }
        let tomorrow = if at.latitude > 36.85 { 40.0 } else { 0.0 };
        Ok(DailyColumns {
            time: vec!["2025-01-15".into(), "2025-01-16".into(), "2025-01-17".into()],
            snowfall_sum: vec![Some(0.0), Some(tomorrow), Some(2.0)],
            weather_code: vec![Some(3.0), Some(75.0), Some(71.0)],
            ..DailyColumns::default()
        })
    }

    async fn hourly(&self, _at: Coordinates, _days: u32) -> Result<HourlyColumns> {
        Ok(HourlyColumns::default())
    }
}

struct Fixture {
    _tmp: TempDir,
    config: Config,
    store: Arc<MemoryStore>,
    weather: WeatherCache,
    provider: Arc<CannedForecast>,
}

fn fixture(status_json: &str) -> Fixture {
    let tmp = TempDir::new().unwrap();
    let mut config = Config::default();
    config.paths.status_file = tmp.path().join("resort-status.json");
    std::fs::write(&config.paths.status_file, status_json).unwrap();

    let lotte = config.resort("lotte-arai").unwrap().latitude;
    let provider = Arc::new(CannedForecast {
        calls: AtomicUsize::new(0),
        fail_latitude: lotte,
    });
    let store = Arc::new(MemoryStore::new());
    let clock = Arc::new(ManualClock::new(
        Utc.with_ymd_and_hms(2025, 1, 15, 6, 0, 0).unwrap(),
    ));
    let weather = WeatherCache::new(provider.clone(), store.clone(), &config.weather)
        .with_clock(clock);

    Fixture {
        _tmp: tmp,
        config,
        store,
        weather,
        provider,
    }
}

const STATUS: &str = r#"{
    "scrapedAt": "2025-01-15T05:00:00.000Z",
    "resorts": {
        "madarao": {"status": "PARTIAL", "baseDepthCm": 150, "liftsOpen": 3,
                    "slopesOpen": 12, "temperature": -4, "weather": "雪",
                    "scrapedAt": "2025-01-15T05:00:00.000Z"},
        "lotte-arai": {"status": "UNKNOWN", "baseDepthCm": null, "liftsOpen": null,
                       "slopesOpen": null, "temperature": null, "weather": null,
                       "scrapedAt": "2025-01-15T05:00:00.000Z", "error": "timeout"}
    }
}"#;

#[tokio::test]
async fn test_states_fuse_all_sources() {
    let f = fixture(STATUS);
    records::edit_manual(
        &*f.store,
        "seki-onsen",
        ManualPatch {
            status: Some(ResortStatus::Closed),
            ..ManualPatch::default()
        },
        Utc::now(),
    )
    .await
    .unwrap();

    let states = load_states(&f.config, &*f.store, &f.weather, false)
        .await
        .unwrap();
    assert_eq!(states.len(), f.config.resorts.len());

    let madarao = states.iter().find(|s| s.config.id == "madarao").unwrap();
    assert_eq!(madarao.status.status, ResortStatus::Partial);
    assert_eq!(madarao.status.lifts_open, Some(3));
    assert!(madarao.weather.is_some());

    let seki = states.iter().find(|s| s.config.id == "seki-onsen").unwrap();
    assert_eq!(seki.status.status, ResortStatus::Closed);

    let lotte = states.iter().find(|s| s.config.id == "lotte-arai").unwrap();
    assert!(lotte.weather.is_none());
    assert_eq!(lotte.status.status, ResortStatus::Unknown);
}

#[tokio::test]
async fn test_recommend_ranks_and_penalizes() {
    let f = fixture(STATUS);
    records::edit_manual(
        &*f.store,
        "seki-onsen",
        ManualPatch {
            status: Some(ResortStatus::Closed),
            ..ManualPatch::default()
        },
        Utc::now(),
    )
    .await
    .unwrap();
    records::set_override(
        &*f.store,
        "ikenotaira",
        ConfigOverride {
            drive_minutes: Some(90),
            ..ConfigOverride::default()
        },
    )
    .await
    .unwrap();

    let prefs = Preferences {
        skill_level: SkillLevel::Intermediate,
        terrain_preferences: vec![TerrainPreference::Powder],
        max_drive_minutes: 60,
        family_friendly: false,
    };
    let results = run_recommend(&f.config, &*f.store, &f.weather, &prefs, false)
        .await
        .unwrap();

    assert_eq!(results.len(), f.config.resorts.len());
    let ranks: Vec<usize> = results.iter().map(|r| r.rank).collect();
    assert_eq!(ranks, (1..=results.len()).collect::<Vec<_>>());
    assert!(results.windows(2).all(|w| w[0].score.total >= w[1].score.total));

    let seki = results.iter().find(|r| r.resort_id == "seki-onsen").unwrap();
    assert_eq!(seki.score.total, 0.0);
    assert_eq!(seki.warnings.len(), 1);
    assert_eq!(seki.rank, results.len());

    let ike = results.iter().find(|r| r.resort_id == "ikenotaira").unwrap();
    assert!(ike.warnings.iter().any(|w| w.contains("90") && w.contains("60")));

    let madarao = results.iter().find(|r| r.resort_id == "madarao").unwrap();
    assert!(madarao.warnings.iter().any(|w| w.contains("3/10")));
}

#[tokio::test]
async fn test_second_run_uses_cache() {
    let f = fixture(STATUS);
    let prefs = Preferences::default();

    run_recommend(&f.config, &*f.store, &f.weather, &prefs, false)
        .await
        .unwrap();
    let first = f.provider.calls.load(Ordering::SeqCst);
    assert_eq!(first, f.config.resorts.len());

    run_recommend(&f.config, &*f.store, &f.weather, &prefs, false)
        .await
        .unwrap();
    // Only the failing resort is fetched again.
    assert_eq!(f.provider.calls.load(Ordering::SeqCst), first + 1);

    run_recommend(&f.config, &*f.store, &f.weather, &prefs, true)
        .await
        .unwrap();
    assert_eq!(
        f.provider.calls.load(Ordering::SeqCst),
        first + 1 + f.config.resorts.len()
    );
}

#[tokio::test]
async fn test_broken_status_file_falls_back_to_manual() {
    let f = fixture("not json at all");
    let states = load_states(&f.config, &*f.store, &f.weather, false)
        .await
        .unwrap();
    assert!(
        states
            .iter()
            .all(|s| s.status.status == ResortStatus::Unknown)
    );
}

#[tokio::test]
async fn test_invalid_preferences_rejected() {
    let f = fixture(STATUS);
    let prefs = Preferences {
        max_drive_minutes: 0,
        ..Preferences::default()
    };
    let err = run_recommend(&f.config, &*f.store, &f.weather, &prefs, false).await;
    assert!(matches!(err, Err(AppError::Validation(_))));
}
