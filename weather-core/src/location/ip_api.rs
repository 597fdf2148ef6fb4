use anyhow::{Context, anyhow};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

use crate::{
    error::{Result, WeatherError},
    model::Coordinates,
};

use super::LocationProvider;

pub const DEFAULT_BASE_URL: &str = "http://ip-api.com";

/// Approximate position from the public IP address (ip-api.com).
#[derive(Debug, Clone)]
pub struct IpLocator {
    base_url: String,
    http: Client,
}

#[derive(Debug, Deserialize)]
struct IpApiResponse {
    status: String,
    #[serde(default)]
    message: Option<String>,
    lat: Option<f64>,
    lon: Option<f64>,
}

impl IpLocator {
    pub fn with_base_url(base_url: &str, timeout: Option<Duration>) -> anyhow::Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().context("Failed to build HTTP client")?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http,
        })
    }

    async fn lookup(&self) -> anyhow::Result<Coordinates> {
        let res = self
            .http
            .get(format!("{}/json", self.base_url))
            .query(&[("fields", "status,message,lat,lon")])
            .send()
            .await
            .context("Failed to send IP geolocation request")?;

        let status = res.status();
        if !status.is_success() {
            return Err(anyhow!("IP geolocation failed with status {status}"));
        }

        let parsed: IpApiResponse = res
            .json()
            .await
            .context("Failed to parse IP geolocation response")?;

        if parsed.status != "success" {
            return Err(anyhow!(
                "IP geolocation refused: {}",
                parsed.message.as_deref().unwrap_or("no reason given")
            ));
        }

        match (parsed.lat, parsed.lon) {
            (Some(lat), Some(lon)) => Ok(Coordinates::checked(lat, lon)?),
            _ => Err(anyhow!("IP geolocation response had no coordinates")),
        }
    }
}

#[async_trait]
impl LocationProvider for IpLocator {
    async fn acquire(&self) -> Result<Coordinates> {
        match self.lookup().await {
            Ok(coords) => {
                tracing::info!(%coords, "location acquired from IP lookup");
                Ok(coords)
            }
            Err(e) => {
                tracing::warn!("location lookup failed: {e:#}");
                Err(WeatherError::LocationDenied)
            }
        }
    }
}
