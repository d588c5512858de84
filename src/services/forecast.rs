// src/services/forecast.rs

//! Forecast provider client and the columnar-to-record transforms.
//!
//! The provider answers with parallel arrays aligned to a `time` array.
//! Missing or null values are read as zero.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, Timelike, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::models::{Coordinates, DayForecast, Period, PeriodForecast, WeatherConfig, WeatherForecast};
use crate::utils::http::create_async_client;

pub const DAILY_FIELDS: &str = "snowfall_sum,temperature_2m_max,temperature_2m_min,precipitation_probability_max,weather_code,wind_speed_10m_max";
pub const HOURLY_FIELDS: &str = "temperature_2m,snowfall,weather_code";

/// Daily columns as returned by the provider.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct DailyColumns {
    #[serde(default)]
    pub time: Vec<String>,
    #[serde(default)]
    pub snowfall_sum: Vec<Option<f64>>,
    #[serde(default)]
    pub temperature_2m_max: Vec<Option<f64>>,
    #[serde(default)]
    pub temperature_2m_min: Vec<Option<f64>>,
    #[serde(default)]
    pub precipitation_probability_max: Vec<Option<f64>>,
    #[serde(default)]
    pub weather_code: Vec<Option<f64>>,
    #[serde(default)]
    pub wind_speed_10m_max: Vec<Option<f64>>,
}

/// Hourly columns as returned by the provider.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct HourlyColumns {
    #[serde(default)]
    pub time: Vec<String>,
    #[serde(default)]
    pub temperature_2m: Vec<Option<f64>>,
    #[serde(default)]
    pub snowfall: Vec<Option<f64>>,
    #[serde(default)]
    pub weather_code: Vec<Option<f64>>,
}

#[derive(Deserialize)]
struct DailyResponse {
    daily: DailyColumns,
}

#[derive(Deserialize)]
struct HourlyResponse {
    hourly: HourlyColumns,
}

/// Source of raw forecast columns.
#[async_trait]
pub trait ForecastProvider: Send + Sync {
    async fn daily(&self, at: Coordinates, days: u32) -> Result<DailyColumns>;

    async fn hourly(&self, at: Coordinates, days: u32) -> Result<HourlyColumns>;
}

/// Open-Meteo forecast API.
#[derive(Debug, Clone)]
pub struct OpenMeteoClient {
    client: reqwest::Client,
    base_url: String,
    timezone: String,
}

impl OpenMeteoClient {
    pub fn new(config: &WeatherConfig, user_agent: &str) -> Result<Self> {
        Ok(Self {
            client: create_async_client(user_agent, config.timeout_secs)?,
            base_url: config.base_url.clone(),
            timezone: config.timezone.clone(),
        })
    }

    async fn request<T: serde::de::DeserializeOwned>(
        &self,
        at: Coordinates,
        mode: &str,
        fields: &str,
        days: u32,
    ) -> Result<T> {
        let latitude = at.latitude.to_string();
        let longitude = at.longitude.to_string();
        let days = days.to_string();
        let query = [
            ("latitude", latitude.as_str()),
            ("longitude", longitude.as_str()),
            (mode, fields),
            ("timezone", self.timezone.as_str()),
            ("forecast_days", days.as_str()),
        ];
        let response = self
            .client
            .get(&self.base_url)
            .query(&query)
            .send()
            .await?
            .error_for_status()?;
        Ok(response.json().await?)
    }
}

#[async_trait]
impl ForecastProvider for OpenMeteoClient {
    async fn daily(&self, at: Coordinates, days: u32) -> Result<DailyColumns> {
        let body: DailyResponse = self.request(at, "daily", DAILY_FIELDS, days).await?;
        Ok(body.daily)
    }

    async fn hourly(&self, at: Coordinates, days: u32) -> Result<HourlyColumns> {
        let body: HourlyResponse = self.request(at, "hourly", HOURLY_FIELDS, days).await?;
        Ok(body.hourly)
    }
}

fn value_at(column: &[Option<f64>], i: usize) -> f64 {
    column.get(i).copied().flatten().unwrap_or(0.0)
}

fn code_at(column: &[Option<f64>], i: usize) -> u8 {
    value_at(column, i).round().clamp(0.0, u8::MAX as f64) as u8
}

/// One forecast record per day, in provider order.
pub fn daily_to_forecasts(columns: &DailyColumns, fetched_at: DateTime<Utc>) -> Vec<WeatherForecast> {
    columns
        .time
        .iter()
        .enumerate()
        .filter_map(|(i, raw)| {
            let date = match NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
                Ok(date) => date,
                Err(e) => {
                    log::warn!("Skipping forecast day with bad date '{}': {}", raw, e);
                    return None;
                }
            };
            Some(WeatherForecast {
                date,
                snowfall_24h: value_at(&columns.snowfall_sum, i),
                temperature_min: value_at(&columns.temperature_2m_min, i),
                temperature_max: value_at(&columns.temperature_2m_max, i),
                precipitation_probability: value_at(&columns.precipitation_probability_max, i),
                weather_code: code_at(&columns.weather_code, i),
                wind_speed: value_at(&columns.wind_speed_10m_max, i),
                fetched_at,
            })
        })
        .collect()
}

#[derive(Default)]
struct PeriodSamples {
    temperatures: Vec<f64>,
    snowfall: f64,
    codes: Vec<u8>,
}

impl PeriodSamples {
    fn aggregate(&self, period: Period) -> PeriodForecast {
        let temperature = if self.temperatures.is_empty() {
            0.0
        } else {
            self.temperatures.iter().sum::<f64>() / self.temperatures.len() as f64
        };
        PeriodForecast {
            period,
            temperature,
            snowfall: self.snowfall,
            weather_code: most_frequent(&self.codes),
        }
    }
}

/// Most frequent code; ties go to the code seen first.
fn most_frequent(codes: &[u8]) -> u8 {
    let mut counts: Vec<(u8, usize)> = Vec::new();
    for &code in codes {
        match counts.iter_mut().find(|(c, _)| *c == code) {
            Some((_, n)) => *n += 1,
            None => counts.push((code, 1)),
        }
    }
    let mut best: Option<(u8, usize)> = None;
    for (code, n) in counts {
        if best.is_none_or(|(_, top)| n > top) {
            best = Some((code, n));
        }
    }
    best.map(|(code, _)| code).unwrap_or(0)
}

fn parse_hour(raw: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M")
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S"))
        .ok()
}

/// Group hourly samples into morning, afternoon and night per day.
///
/// Hours before 06:00 belong to the previous day's night. Early hours on the
/// first day of the window have no previous day and are dropped.
pub fn hourly_to_days(columns: &HourlyColumns, fetched_at: DateTime<Utc>) -> Vec<DayForecast> {
    let mut days: BTreeMap<NaiveDate, BTreeMap<Period, PeriodSamples>> = BTreeMap::new();
    let mut first_date: Option<NaiveDate> = None;

    for (i, raw) in columns.time.iter().enumerate() {
        let Some(at) = parse_hour(raw) else {
            log::warn!("Skipping hourly sample with bad time '{}'", raw);
            continue;
        };
        let first = *first_date.get_or_insert(at.date());

        let hour = at.hour();
        let day = if hour < 6 {
            at.date() - Duration::days(1)
        } else {
            at.date()
        };
        if day < first {
            continue;
        }

        let samples = days
            .entry(day)
            .or_default()
            .entry(Period::of_hour(hour))
            .or_default();
        samples.temperatures.push(value_at(&columns.temperature_2m, i));
        samples.snowfall += value_at(&columns.snowfall, i);
        samples.codes.push(code_at(&columns.weather_code, i));
    }

    days.into_iter()
        .map(|(date, periods)| DayForecast {
            date,
            day_name: date.format("%a").to_string(),
            periods: periods
                .iter()
                .map(|(period, samples)| samples.aggregate(*period))
                .collect(),
            fetched_at,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use chrono::TimeZone;

    fn fetched() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, 15, 0, 0, 0).unwrap()
    }

    #[test]
    fn test_daily_response_decodes_with_nulls() {
        let body = r#"{"latitude":36.9,"daily":{"time":["2025-01-15","2025-01-16"],
            "snowfall_sum":[12.6,null],"temperature_2m_max":[-1.0,0.5],
            "temperature_2m_min":[-7.0,-5.0],"weather_code":[73,3]}}"#;
        let parsed: DailyResponse = serde_json::from_str(body).unwrap();
        let days = daily_to_forecasts(&parsed.daily, fetched());

        assert_eq!(days.len(), 2);
        assert_relative_eq!(days[0].snowfall_24h, 12.6);
        assert_eq!(days[0].weather_code, 73);
        assert_eq!(days[1].snowfall_24h, 0.0);
        assert_eq!(days[1].precipitation_probability, 0.0);
        assert_eq!(days[1].wind_speed, 0.0);
        assert_eq!(days[1].date, NaiveDate::from_ymd_opt(2025, 1, 16).unwrap());
    }

    #[test]
    fn test_daily_skips_bad_dates() {
        let columns = DailyColumns {
            time: vec!["nope".into(), "2025-01-16".into()],
            ..DailyColumns::default()
        };
        assert_eq!(daily_to_forecasts(&columns, fetched()).len(), 1);
    }

    fn hours(samples: &[(&str, f64, f64, f64)]) -> HourlyColumns {
        HourlyColumns {
            time: samples.iter().map(|s| s.0.to_string()).collect(),
            temperature_2m: samples.iter().map(|s| Some(s.1)).collect(),
            snowfall: samples.iter().map(|s| Some(s.2)).collect(),
            weather_code: samples.iter().map(|s| Some(s.3)).collect(),
        }
    }

    #[test]
    fn test_hourly_grouping() {
        let columns = hours(&[
            ("2025-01-15T03:00", -9.0, 1.0, 71.0),
            ("2025-01-15T07:00", -4.0, 0.5, 71.0),
            ("2025-01-15T08:00", -2.0, 1.5, 73.0),
            ("2025-01-15T13:00", 0.0, 0.0, 3.0),
            ("2025-01-15T19:00", -5.0, 2.0, 73.0),
            ("2025-01-16T02:00", -7.0, 3.0, 75.0),
            ("2025-01-16T09:00", -3.0, 0.0, 1.0),
        ]);
        let days = hourly_to_days(&columns, fetched());

        assert_eq!(days.len(), 2);
        let first = &days[0];
        assert_eq!(first.day_name, "Wed");

        let morning = first.period(Period::Morning).unwrap();
        assert_relative_eq!(morning.temperature, -3.0);
        assert_relative_eq!(morning.snowfall, 2.0);
        assert_eq!(morning.weather_code, 71);

        let night = first.period(Period::Night).unwrap();
        assert_relative_eq!(night.temperature, -6.0);
        assert_relative_eq!(night.snowfall, 5.0);
        assert_eq!(night.weather_code, 73);

        let order: Vec<_> = first.periods.iter().map(|p| p.period).collect();
        assert_eq!(order, vec![Period::Morning, Period::Afternoon, Period::Night]);

        // Only the morning sample lands on the second day.
        assert_eq!(days[1].periods.len(), 1);
        assert_eq!(days[1].periods[0].period, Period::Morning);
    }

    #[test]
    fn test_most_frequent_ties_go_to_first() {
        assert_eq!(most_frequent(&[3, 71, 71, 3]), 3);
        assert_eq!(most_frequent(&[2, 73, 73]), 73);
        assert_eq!(most_frequent(&[]), 0);
    }

    #[test]
    fn test_hourly_missing_values_are_zero() {
        let columns = HourlyColumns {
            time: vec!["2025-01-15T12:00".into()],
            ..HourlyColumns::default()
        };
        let days = hourly_to_days(&columns, fetched());
        let pm = days[0].period(Period::Afternoon).unwrap();
        assert_eq!(pm.temperature, 0.0);
        assert_eq!(pm.snowfall, 0.0);
        assert_eq!(pm.weather_code, 0);
    }
}
