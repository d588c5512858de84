//! skiday CLI
//!
//! Local entry point: recommendations, status editing, forecasts, scraping.

use std::path::PathBuf;
use std::sync::Arc;

use chrono::Utc;
use clap::{Args, Parser, Subcommand, ValueEnum};
use skiday::{
    error::{AppError, Result},
    models::{
        Config, ConfigOverride, ManualPatch, Preferences, RecommendationResult, ResortState,
        ResortStatus, SkillLevel, Terrain, TerrainPreference,
    },
    pipeline,
    services::{OpenMeteoClient, WeatherCache},
    storage::{LocalStore, records},
    utils::console,
};

/// skiday - pick tomorrow's ski resort
#[derive(Parser, Debug)]
#[command(
    name = "skiday",
    version,
    about = "Fuses resort status sources and ranks resorts for the next ski day"
)]
struct Cli {
    /// Path to the TOML configuration file
    #[arg(short, long, default_value = "skiday.toml")]
    config: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Score and rank all resorts
    Recommend {
        #[command(flatten)]
        prefs: PrefArgs,

        /// Ignore cached forecasts
        #[arg(long)]
        refresh: bool,

        /// Print results as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the fused status of every resort
    Status {
        /// Print results as JSON
        #[arg(long)]
        json: bool,
    },

    /// Record a manual status for a resort
    SetStatus {
        resort: String,

        /// OPEN, PARTIAL, CLOSED or UNKNOWN
        #[arg(long, value_parser = parse_status)]
        status: Option<ResortStatus>,

        /// Base snow depth in cm
        #[arg(long)]
        depth: Option<u32>,

        #[arg(long)]
        lifts: Option<u32>,

        #[arg(long)]
        slopes: Option<u32>,

        #[arg(long)]
        notes: Option<String>,

        /// Reset entered values to "not entered" (comma separated)
        #[arg(long, value_enum, value_delimiter = ',')]
        clear: Vec<ManualField>,
    },

    /// Clear the manual status of a resort
    ResetStatus { resort: String },

    /// Override catalog facts for a resort
    Override {
        resort: String,

        /// Terrain split as beginner,intermediate,advanced slope counts
        #[arg(long, value_parser = parse_terrain)]
        terrain: Option<Terrain>,

        /// Drive time in minutes
        #[arg(long)]
        drive: Option<u32>,

        #[arg(long)]
        notes: Option<String>,
    },

    /// Remove the override for a resort
    ClearOverride { resort: String },

    /// Count a visit to a resort
    Visit { resort: String },

    /// Show the weather forecast
    Forecast {
        /// Morning/afternoon/night forecast for the reference location
        #[arg(long)]
        hourly: bool,

        /// Ignore cached forecasts
        #[arg(long)]
        refresh: bool,
    },

    /// Scrape resort status pages into the status file
    Scrape,

    /// Validate configuration
    Validate,
}

/// Numeric manual fields that `set-status --clear` can unset.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
enum ManualField {
    Depth,
    Lifts,
    Slopes,
}

/// Build a manual patch. A cleared field becomes `Some(None)`.
fn manual_patch(
    status: Option<ResortStatus>,
    depth: Option<u32>,
    lifts: Option<u32>,
    slopes: Option<u32>,
    notes: Option<String>,
    clear: &[ManualField],
) -> Result<ManualPatch> {
    let field = |value: Option<u32>, which: ManualField| -> Result<Option<Option<u32>>> {
        match (value, clear.contains(&which)) {
            (Some(_), true) => Err(AppError::validation(format!(
                "{which:?} is both set and cleared"
            ))),
            (_, true) => Ok(Some(None)),
            (value, false) => Ok(value.map(Some)),
        }
    };
    Ok(ManualPatch {
        status,
        base_depth_cm: field(depth, ManualField::Depth)?,
        lifts_open: field(lifts, ManualField::Lifts)?,
        slopes_open: field(slopes, ManualField::Slopes)?,
        notes,
    })
}

#[derive(Args, Debug)]
struct PrefArgs {
    /// beginner, intermediate, advanced or mixed
    #[arg(long, default_value = "intermediate")]
    skill: SkillLevel,

    /// Comma separated: groomed, powder, tree-runs
    #[arg(long, value_delimiter = ',', default_value = "groomed")]
    terrain: Vec<TerrainPreference>,

    /// Longest acceptable drive in minutes
    #[arg(long, default_value_t = 60)]
    max_drive: u32,

    /// Weight family amenities
    #[arg(long)]
    family: bool,
}

impl From<PrefArgs> for Preferences {
    fn from(args: PrefArgs) -> Self {
        Preferences {
            skill_level: args.skill,
            terrain_preferences: args.terrain,
            max_drive_minutes: args.max_drive,
            family_friendly: args.family,
        }
        .dedup_terrain()
    }
}

fn parse_status(s: &str) -> std::result::Result<ResortStatus, String> {
    ResortStatus::parse(s).ok_or_else(|| format!("unknown status '{s}'"))
}

fn parse_terrain(s: &str) -> std::result::Result<Terrain, String> {
    let parts = s
        .split(',')
        .map(|p| p.trim().parse::<u32>())
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(|e| e.to_string())?;
    match parts.as_slice() {
        [b, i, a] => Ok(Terrain::new(*b, *i, *a)),
        _ => Err("expected three counts: beginner,intermediate,advanced".to_string()),
    }
}

/// Initialize logging based on verbosity flag.
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

fn weather_cache(config: &Config, store: Arc<LocalStore>) -> Result<WeatherCache> {
    let provider = OpenMeteoClient::new(&config.weather, &config.scraper.user_agent)?;
    Ok(WeatherCache::new(Arc::new(provider), store, &config.weather))
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn report_recommendations(config: &Config, results: &[RecommendationResult]) {
    console::header("Recommendations");
    for result in results {
        let name = config
            .resort(&result.resort_id)
            .map(|r| r.name.as_str())
            .unwrap_or(result.resort_id.as_str());
        let s = &result.score;
        log::info!("#{} {} ({:.1})", result.rank, name, s.total);
        console::sub_item(&format!(
            "terrain {:.1} | conditions {:.1} | convenience {:.1} | features {:.1} | novelty {:.1}",
            s.terrain, s.conditions, s.convenience, s.features, s.novelty
        ));
        for line in &result.explanations {
            console::sub_item(&format!("+ {line}"));
        }
        for line in &result.highlights {
            console::sub_item(&format!("* {line}"));
        }
        for line in &result.warnings {
            console::sub_item(&format!("! {line}"));
        }
        console::separator();
    }
}

fn report_states(states: &[ResortState]) {
    console::header("Resort status");
    for state in states {
        let status = &state.status;
        let show = |v: Option<u32>| v.map_or_else(|| "-".to_string(), |n| n.to_string());
        log::info!("{} [{}]", state.config.name, status.status);
        console::sub_item(&format!(
            "base {} cm | lifts {}/{} | slopes {}/{}",
            show(status.base_depth_cm),
            show(status.lifts_open),
            state.config.lifts_total,
            show(status.slopes_open),
            state.config.slopes_total
        ));
        if let Some(weather) = &state.weather {
            console::sub_item(&format!(
                "{}: {} | {:.0}cm snow | {:.0}..{:.0}°C",
                weather.date,
                weather.description(),
                weather.snowfall_24h,
                weather.temperature_min,
                weather.temperature_max
            ));
        }
        if !status.notes.is_empty() {
            console::sub_item(&status.notes);
        }
    }
}

/// Main entry point for the CLI application.
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = Config::load_or_default(&cli.config);
    let store = Arc::new(LocalStore::new(&config.paths.store_dir));
    log::debug!("Key-value store at {}", store.root().display());

    match cli.command {
        Command::Recommend {
            prefs,
            refresh,
            json,
        } => {
            let prefs = Preferences::from(prefs);
            let weather = weather_cache(&config, store.clone())?;
            let results =
                pipeline::run_recommend(&config, &*store, &weather, &prefs, refresh)
                    .await?;
            if json {
                print_json(&results)?;
            } else {
                report_recommendations(&config, &results);
            }
        }

        Command::Status { json } => {
            let weather = weather_cache(&config, store.clone())?;
            let states = pipeline::load_states(&config, &*store, &weather, false).await?;
            if json {
                print_json(&states)?;
            } else {
                report_states(&states);
            }
        }

        Command::SetStatus {
            resort,
            status,
            depth,
            lifts,
            slopes,
            notes,
            clear,
        } => {
            config.resort(&resort)?;
            let patch = manual_patch(status, depth, lifts, slopes, notes, &clear)?;
            records::edit_manual(&*store, &resort, patch, Utc::now()).await?;
        }

        Command::ResetStatus { resort } => {
            config.resort(&resort)?;
            records::reset_manual(&*store, &resort).await?;
        }

        Command::Override {
            resort,
            terrain,
            drive,
            notes,
        } => {
            config.resort(&resort)?;
            let value = ConfigOverride {
                terrain,
                drive_minutes: drive,
                notes,
            };
            records::set_override(&*store, &resort, value).await?;
            log::info!("Override saved for {}", resort);
        }

        Command::ClearOverride { resort } => {
            config.resort(&resort)?;
            records::clear_override(&*store, &resort).await?;
            log::info!("Override cleared for {}", resort);
        }

        Command::Visit { resort } => {
            config.resort(&resort)?;
            let count = records::record_visit(&*store, &resort).await?;
            log::info!("{} visited {} time(s)", resort, count);
        }

        Command::Forecast { hourly, refresh } => {
            let weather = weather_cache(&config, store.clone())?;
            if hourly {
                let at = config.reference.coordinates();
                let days = if refresh {
                    weather.refresh_hourly(at).await?
                } else {
                    weather.get_hourly(at).await?
                };
                console::header(&format!("Forecast for {}", config.reference.name));
                for day in &days {
                    log::info!("{} {}", day.day_name, day.date);
                    for p in &day.periods {
                        console::sub_item(&format!(
                            "{:>5}: {} | {:.1}°C | {:.1}cm",
                            p.period.label(),
                            skiday::models::describe_weather_code(p.weather_code),
                            p.temperature,
                            p.snowfall
                        ));
                    }
                }
            } else {
                let all = weather.get_all(&config.resorts, refresh).await;
                console::header("Forecast");
                for resort in &config.resorts {
                    let Some(days) = all.get(&resort.id) else {
                        log::warn!("{}: no forecast", resort.name);
                        continue;
                    };
                    log::info!("{}", resort.name);
                    for day in days {
                        console::sub_item(&format!(
                            "{}: {} | {:.0}cm | {:.0}..{:.0}°C | {:.0}% | wind {:.0} km/h",
                            day.date,
                            day.description(),
                            day.snowfall_24h,
                            day.temperature_min,
                            day.temperature_max,
                            day.precipitation_probability,
                            day.wind_speed
                        ));
                    }
                }
            }
        }

        Command::Scrape => {
            let snapshot = pipeline::run_scrape(&config).await?;
            let items: Vec<(&str, String)> = snapshot
                .resorts
                .iter()
                .map(|(id, s)| {
                    let value = match &s.error {
                        Some(e) => format!("{} ({})", s.status, e),
                        None => s.status.to_string(),
                    };
                    (id.as_str(), value)
                })
                .collect();
            console::summary("Scrape", &items);
        }

        Command::Validate => {
            log::info!("Validating configuration...");
            let config = Config::load(&cli.config)?;
            if let Err(e) = config.validate() {
                log::error!("Config validation failed: {}", e);
                return Err(e);
            }
            log::info!("✓ Config OK ({} resorts)", config.resorts.len());
        }
    }

    Ok(())
}
