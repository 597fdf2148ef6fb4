use async_trait::async_trait;
use std::fmt::Debug;

use crate::{
    error::Result,
    model::{Coordinates, RawForecastResponse, Timezone},
};

pub mod open_meteo;

pub use open_meteo::OpenMeteoFetcher;

/// Daily variables requested from the forecast endpoint, in query order.
pub const DAILY_VARIABLES: &str =
    "temperature_2m_max,temperature_2m_min,precipitation_sum,weathercode,windspeed_10m_max";

/// One-shot access to the forecast endpoint.
///
/// Implementations make a single attempt per call. Every failure is reported
/// as [`WeatherError::FetchFailed`](crate::WeatherError::FetchFailed).
#[async_trait]
pub trait ForecastFetcher: Send + Sync + Debug {
    async fn fetch_forecast(
        &self,
        coordinates: Coordinates,
        timezone: &Timezone,
    ) -> Result<RawForecastResponse>;
}
