use async_trait::async_trait;
use std::fmt::Debug;

use crate::{
    config::Config,
    error::{Result, WeatherError},
    model::Coordinates,
};

pub mod ip_api;

pub use ip_api::IpLocator;

/// One-shot source of the user's position.
#[async_trait]
pub trait LocationProvider: Send + Sync + Debug {
    /// Read the current position once. Fails with
    /// [`WeatherError::LocationDenied`] when the position can't be obtained.
    async fn acquire(&self) -> Result<Coordinates>;
}

/// Always answers with the same coordinates, e.g. a location from config.
#[derive(Debug, Clone, Copy)]
pub struct FixedLocation(pub Coordinates);

#[async_trait]
impl LocationProvider for FixedLocation {
    async fn acquire(&self) -> Result<Coordinates> {
        Ok(self.0)
    }
}

/// Automatic lookup switched off by the user.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoLocation;

#[async_trait]
impl LocationProvider for NoLocation {
    async fn acquire(&self) -> Result<Coordinates> {
        Err(WeatherError::LocationDenied)
    }
}

/// Pick the automatic provider described by the configuration.
///
/// A configured home location wins; otherwise IP lookup is used when
/// `auto_locate` is enabled.
pub fn provider_from_config(config: &Config) -> anyhow::Result<Box<dyn LocationProvider>> {
    if let Some(coords) = config.home_coordinates()? {
        return Ok(Box::new(FixedLocation(coords)));
    }

    if config.api.auto_locate {
        let locator =
            IpLocator::with_base_url(&config.api.geolocation_base_url, config.api.timeout())?;
        Ok(Box::new(locator))
    } else {
        Ok(Box::new(NoLocation))
    }
}

/// Free-text latitude/longitude as typed by the user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ManualLocation {
    pub lat: String,
    pub lon: String,
}

impl ManualLocation {
    pub fn new(lat: impl Into<String>, lon: impl Into<String>) -> Self {
        Self {
            lat: lat.into(),
            lon: lon.into(),
        }
    }

    pub fn is_complete(&self) -> bool {
        !self.lat.trim().is_empty() && !self.lon.trim().is_empty()
    }

    /// Convert the input into coordinates.
    ///
    /// Returns `Ok(None)` while either field is empty. Text that is not a
    /// number or falls outside the valid ranges is rejected here, before any
    /// request is made.
    pub fn accept(&self) -> Result<Option<Coordinates>> {
        if !self.is_complete() {
            return Ok(None);
        }

        let latitude = parse_degrees("latitude", &self.lat)?;
        let longitude = parse_degrees("longitude", &self.lon)?;

        Coordinates::checked(latitude, longitude).map(Some)
    }
}

fn parse_degrees(field: &str, text: &str) -> Result<f64> {
    text.trim().parse::<f64>().map_err(|_| {
        WeatherError::InvalidCoordinates(format!("{field} '{}' is not a number", text.trim()))
    })
}
