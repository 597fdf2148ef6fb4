use thiserror::Error;

pub type Result<T, E = WeatherError> = std::result::Result<T, E>;

pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors surfaced by the forecast pipeline.
///
/// Network, status and decode failures all collapse into `FetchFailed`; the
/// underlying cause is only reachable through `source()`.
#[derive(Debug, Error)]
pub enum WeatherError {
    #[error("Location access denied.")]
    LocationDenied,

    #[error("Failed to fetch weather data.")]
    FetchFailed(#[source] BoxError),

    #[error("Invalid coordinates: {0}")]
    InvalidCoordinates(String),

    #[error("Unknown timezone '{0}'. Supported: auto, UTC, America/New_York, Europe/London, Asia/Tokyo, Australia/Sydney.")]
    UnknownTimezone(String),

    #[error("Daily forecast arrays are misaligned: {0}")]
    MisalignedDaily(String),
}

impl WeatherError {
    pub fn fetch_failed(cause: impl Into<BoxError>) -> Self {
        WeatherError::FetchFailed(cause.into())
    }
}
