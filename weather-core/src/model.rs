use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

use crate::error::WeatherError;

/// A point on the globe in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }

    /// Build coordinates, rejecting values outside the valid degree ranges.
    pub fn checked(latitude: f64, longitude: f64) -> Result<Self, WeatherError> {
        if !latitude.is_finite() || !(-90.0..=90.0).contains(&latitude) {
            return Err(WeatherError::InvalidCoordinates(format!(
                "latitude {latitude} is outside -90..=90"
            )));
        }
        if !longitude.is_finite() || !(-180.0..=180.0).contains(&longitude) {
            return Err(WeatherError::InvalidCoordinates(format!(
                "longitude {longitude} is outside -180..=180"
            )));
        }
        Ok(Self::new(latitude, longitude))
    }
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.4}, {:.4}", self.latitude, self.longitude)
    }
}

/// Timezone the forecast is requested in.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum Timezone {
    /// Let the API resolve the zone from the coordinates.
    #[default]
    Auto,
    Utc,
    /// One of the named IANA zones offered by the selector.
    Named(&'static str),
}

impl Timezone {
    pub const NAMED: &'static [&'static str] = &[
        "America/New_York",
        "Europe/London",
        "Asia/Tokyo",
        "Australia/Sydney",
    ];

    /// Every selectable timezone, in selector order.
    pub fn all() -> Vec<Timezone> {
        let mut zones = vec![Timezone::Auto, Timezone::Utc];
        zones.extend(Self::NAMED.iter().copied().map(Timezone::Named));
        zones
    }

    /// Value sent as the `timezone` query parameter.
    pub fn as_query(&self) -> &'static str {
        match self {
            Timezone::Auto => "auto",
            Timezone::Utc => "UTC",
            Timezone::Named(name) => *name,
        }
    }

    /// Short human label, as shown in the selector.
    pub fn label(&self) -> &'static str {
        match self {
            Timezone::Auto => "Auto",
            Timezone::Utc => "UTC",
            Timezone::Named("America/New_York") => "New York",
            Timezone::Named("Europe/London") => "London",
            Timezone::Named("Asia/Tokyo") => "Tokyo",
            Timezone::Named("Australia/Sydney") => "Sydney",
            Timezone::Named(name) => *name,
        }
    }
}

impl fmt::Display for Timezone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_query())
    }
}

impl FromStr for Timezone {
    type Err = WeatherError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        if trimmed.eq_ignore_ascii_case("auto") {
            return Ok(Timezone::Auto);
        }
        if trimmed.eq_ignore_ascii_case("utc") {
            return Ok(Timezone::Utc);
        }
        Self::NAMED
            .iter()
            .copied()
            .find(|name| *name == trimmed)
            .map(Timezone::Named)
            .ok_or_else(|| WeatherError::UnknownTimezone(value.to_string()))
    }
}

impl Serialize for Timezone {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_query())
    }
}

impl<'de> Deserialize<'de> for Timezone {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Forecast endpoint payload. Daily fields are parallel arrays indexed by day.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RawForecastResponse {
    #[serde(default)]
    pub timezone: Option<String>,
    pub daily: RawDaily,
    pub current_weather: RawCurrentWeather,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RawDaily {
    pub time: Vec<NaiveDate>,
    pub temperature_2m_max: Vec<Option<f64>>,
    pub temperature_2m_min: Vec<Option<f64>>,
    pub precipitation_sum: Vec<Option<f64>>,
    pub weathercode: Vec<Option<i32>>,
    pub windspeed_10m_max: Vec<Option<f64>>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RawCurrentWeather {
    pub temperature: f64,
    pub windspeed: f64,
    pub weathercode: i32,
}

/// One day of the normalized forecast. Missing values stay `None`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyForecast {
    pub date: NaiveDate,
    pub temp_max: Option<f64>,
    pub temp_min: Option<f64>,
    pub precipitation: Option<f64>,
    pub weather: &'static str,
    pub wind: Option<f64>,
}

/// Conditions right now.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CurrentConditions {
    pub temperature: f64,
    pub wind: f64,
    pub weather: &'static str,
}

/// Display-ready result of one successful fetch.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Forecast {
    pub today: CurrentConditions,
    pub daily: Vec<DailyForecast>,
}
