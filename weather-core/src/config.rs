use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use crate::{fetcher::open_meteo, location::ip_api, model::{Coordinates, Timezone}};

/// A fixed location the dashboard opens with instead of an automatic lookup.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HomeLocation {
    pub latitude: f64,
    pub longitude: f64,
}

/// Endpoints and network behaviour.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub forecast_base_url: String,
    pub geolocation_base_url: String,

    /// Look the location up from the public IP when no home location is set.
    pub auto_locate: bool,

    /// Request timeout. Absent means requests may wait indefinitely.
    pub timeout_secs: Option<u64>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            forecast_base_url: open_meteo::DEFAULT_BASE_URL.to_string(),
            geolocation_base_url: ip_api::DEFAULT_BASE_URL.to_string(),
            auto_locate: true,
            timeout_secs: None,
        }
    }
}

impl ApiConfig {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

/// Top-level configuration stored on disk.
///
/// Example TOML:
/// ```toml
/// default_timezone = "Europe/London"
///
/// [location]
/// latitude = 51.5
/// longitude = -0.12
///
/// [api]
/// auto_locate = false
/// timeout_secs = 10
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub default_timezone: Timezone,

    #[serde(default)]
    pub location: Option<HomeLocation>,

    #[serde(default)]
    pub api: ApiConfig,
}

impl Config {
    /// The configured home location, validated.
    pub fn home_coordinates(&self) -> Result<Option<Coordinates>> {
        self.location
            .map(|home| {
                Coordinates::checked(home.latitude, home.longitude)
                    .context("Invalid [location] in config file")
            })
            .transpose()
    }

    pub fn set_home(&mut self, coords: Coordinates) {
        self.location = Some(HomeLocation {
            latitude: coords.latitude,
            longitude: coords.longitude,
        });
    }

    pub fn clear_home(&mut self) {
        self.location = None;
    }

    /// Load config from disk, or return an empty default if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_file_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            // First run: no config file, return empty.
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<PathBuf> {
        let path = Self::config_file_path()?;
        self.save_to(&path)?;
        Ok(path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "weather-dashboard", "weather")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }
}
