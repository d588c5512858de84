//! Forecast records produced by the weather service.

use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// One day of forecast for a resort.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WeatherForecast {
    pub date: NaiveDate,
    /// Snowfall over the day, in centimetres
    pub snowfall_24h: f64,
    pub temperature_min: f64,
    pub temperature_max: f64,
    /// Maximum precipitation probability, in percent
    pub precipitation_probability: f64,
    /// WMO weather interpretation code
    pub weather_code: u8,
    /// Maximum wind speed at 10 m, km/h
    pub wind_speed: f64,
    pub fetched_at: DateTime<Utc>,
}

impl WeatherForecast {
    pub fn description(&self) -> &'static str {
        describe_weather_code(self.weather_code)
    }
}

/// Part of a calendar day used by the hourly forecast.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    /// 06:00–11:59
    Morning,
    /// 12:00–17:59
    Afternoon,
    /// 18:00–05:59, wrapping into the next calendar day
    Night,
}

impl Period {
    /// Period an hour of the day falls into.
    pub fn of_hour(hour: u32) -> Self {
        match hour {
            6..=11 => Period::Morning,
            12..=17 => Period::Afternoon,
            _ => Period::Night,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Period::Morning => "AM",
            Period::Afternoon => "PM",
            Period::Night => "night",
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Aggregated hourly samples for one period.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PeriodForecast {
    pub period: Period,
    /// Mean of the hourly temperatures
    pub temperature: f64,
    /// Sum of the hourly snowfall, centimetres
    pub snowfall: f64,
    /// Most frequent code in the period
    pub weather_code: u8,
}

/// Sub-day forecast for one calendar day.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DayForecast {
    pub date: NaiveDate,
    /// Short weekday name, e.g. "Mon"
    pub day_name: String,
    pub periods: Vec<PeriodForecast>,
    pub fetched_at: DateTime<Utc>,
}

impl DayForecast {
    pub fn period(&self, period: Period) -> Option<&PeriodForecast> {
        self.periods.iter().find(|p| p.period == period)
    }
}

/// Text for a WMO weather interpretation code.
pub fn describe_weather_code(code: u8) -> &'static str {
    match code {
        0 => "Clear",
        1 => "Mostly Clear",
        2 => "Partly Cloudy",
        3 => "Overcast",
        45 => "Fog",
        48 => "Rime Fog",
        51 => "Light Drizzle",
        53 => "Drizzle",
        55 => "Heavy Drizzle",
        56 => "Freezing Drizzle",
        57 => "Heavy Freezing Drizzle",
        61 => "Light Rain",
        63 => "Rain",
        65 => "Heavy Rain",
        66 => "Freezing Rain",
        67 => "Heavy Freezing Rain",
        71 => "Light Snow",
        73 => "Snow",
        75 => "Heavy Snow",
        77 => "Snow Grains",
        80 => "Light Showers",
        81 => "Showers",
        82 => "Heavy Showers",
        85 => "Light Snow Showers",
        86 => "Heavy Snow Showers",
        95 => "Thunderstorm",
        96 => "Thunderstorm with Hail",
        99 => "Severe Thunderstorm",
        _ => "Unknown",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_period_boundaries() {
        assert_eq!(Period::of_hour(5), Period::Night);
        assert_eq!(Period::of_hour(6), Period::Morning);
        assert_eq!(Period::of_hour(11), Period::Morning);
        assert_eq!(Period::of_hour(12), Period::Afternoon);
        assert_eq!(Period::of_hour(17), Period::Afternoon);
        assert_eq!(Period::of_hour(18), Period::Night);
        assert_eq!(Period::of_hour(0), Period::Night);
    }

    #[test]
    fn test_describe_weather_code() {
        assert_eq!(describe_weather_code(75), "Heavy Snow");
        assert_eq!(describe_weather_code(42), "Unknown");
    }
}
