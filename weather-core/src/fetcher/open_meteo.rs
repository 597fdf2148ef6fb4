use anyhow::{Context, anyhow};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

use crate::{
    config::Config,
    error::{Result, WeatherError},
    model::{Coordinates, RawForecastResponse, Timezone},
};

use super::{DAILY_VARIABLES, ForecastFetcher};

pub const DEFAULT_BASE_URL: &str = "https://api.open-meteo.com";

const USER_AGENT: &str = concat!("weather-dashboard/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Clone)]
pub struct OpenMeteoFetcher {
    base_url: String,
    http: Client,
}

impl OpenMeteoFetcher {
    /// Point the fetcher at another host, e.g. a mock server in tests.
    pub fn with_base_url(base_url: &str, timeout: Option<Duration>) -> anyhow::Result<Self> {
        let mut builder = Client::builder().user_agent(USER_AGENT);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().context("Failed to build HTTP client")?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http,
        })
    }

    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        Self::with_base_url(&config.api.forecast_base_url, config.api.timeout())
    }

    fn endpoint(&self) -> String {
        format!("{}/v1/forecast", self.base_url)
    }

    async fn request(
        &self,
        coordinates: Coordinates,
        timezone: &Timezone,
    ) -> anyhow::Result<RawForecastResponse> {
        let latitude = coordinates.latitude.to_string();
        let longitude = coordinates.longitude.to_string();

        let res = self
            .http
            .get(self.endpoint())
            .query(&[
                ("latitude", latitude.as_str()),
                ("longitude", longitude.as_str()),
                ("daily", DAILY_VARIABLES),
                ("current_weather", "true"),
                ("timezone", timezone.as_query()),
            ])
            .send()
            .await
            .context("Failed to send request to Open-Meteo")?;

        let status = res.status();
        let body = res
            .text()
            .await
            .context("Failed to read Open-Meteo response body")?;

        if !status.is_success() {
            return Err(anyhow!(
                "Open-Meteo request failed with status {}: {}",
                status,
                truncate_body(&body),
            ));
        }

        serde_json::from_str(&body).context("Failed to parse Open-Meteo forecast JSON")
    }
}

#[async_trait]
impl ForecastFetcher for OpenMeteoFetcher {
    async fn fetch_forecast(
        &self,
        coordinates: Coordinates,
        timezone: &Timezone,
    ) -> Result<RawForecastResponse> {
        tracing::debug!(%coordinates, %timezone, "requesting forecast");

        self.request(coordinates, timezone).await.map_err(|e| {
            tracing::debug!("forecast fetch failed: {e:#}");
            WeatherError::fetch_failed(e)
        })
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_strips_trailing_slash() {
        let fetcher = OpenMeteoFetcher::with_base_url("http://localhost:8080/", None)
            .expect("client should build");
        assert_eq!(fetcher.endpoint(), "http://localhost:8080/v1/forecast");
    }

    #[test]
    fn truncate_body_respects_char_boundaries() {
        let long = "°".repeat(300);
        let out = truncate_body(&long);
        assert!(out.ends_with("..."));
        assert_eq!(out.chars().count(), 203);
        assert_eq!(truncate_body("short"), "short");
    }
}
