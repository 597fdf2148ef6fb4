//! Core library for the `weather` dashboard.
//!
//! This crate defines:
//! - Location sources (automatic lookup, manual entry)
//! - The Open-Meteo forecast fetcher and response normalization
//! - The dashboard session state machine and its async driver
//! - Configuration handling
//!
//! It is used by `weather-cli`, but can also be reused by other front-ends.

pub mod config;
pub mod dashboard;
pub mod error;
pub mod fetcher;
pub mod location;
pub mod model;
pub mod normalize;
pub mod session;
pub mod weather_code;

pub use config::Config;
pub use dashboard::Dashboard;
pub use error::WeatherError;
pub use fetcher::{ForecastFetcher, OpenMeteoFetcher};
pub use location::{LocationProvider, ManualLocation};
pub use model::{Coordinates, CurrentConditions, DailyForecast, Forecast, RawForecastResponse, Timezone};
pub use normalize::normalize;
pub use session::{DisplayMode, Event, Session, UiState};
