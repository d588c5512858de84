//! Service layer: everything that talks to the outside world.
//!
//! - Forecast provider client (`OpenMeteoClient`) and its transforms
//! - Forecast cache (`WeatherCache`)
//! - Scraped status file loading (`load_snapshot`)
//! - Status page scrapers (`scrapers`)

pub mod forecast;
pub mod scrapers;
pub mod status;
pub mod weather;

pub use forecast::{DailyColumns, ForecastProvider, HourlyColumns, OpenMeteoClient};
pub use status::load_snapshot;
pub use weather::{CachedWeather, WeatherCache};
