use anyhow::Context;
use clap::{Parser, Subcommand};
use weather_core::{
    Config, Dashboard, DisplayMode, ManualLocation, OpenMeteoFetcher, Timezone, location,
};

use crate::{interactive, render};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather", version, about = "Current and multi-day weather in your terminal")]
pub struct Cli {
    /// Log debug output to stderr.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Defaults to the interactive dashboard.
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Open the interactive dashboard.
    Dashboard {
        /// Timezone: auto, UTC, America/New_York, Europe/London, Asia/Tokyo or Australia/Sydney.
        #[arg(long)]
        timezone: Option<Timezone>,
    },

    /// Print the forecast once and exit.
    Show {
        /// Latitude in decimal degrees; requires --lon.
        #[arg(long, requires = "lon", allow_hyphen_values = true)]
        lat: Option<String>,

        /// Longitude in decimal degrees; requires --lat.
        #[arg(long, requires = "lat", allow_hyphen_values = true)]
        lon: Option<String>,

        /// Timezone: auto, UTC, America/New_York, Europe/London, Asia/Tokyo or Australia/Sydney.
        #[arg(long)]
        timezone: Option<Timezone>,

        /// Print the dashboard state as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Set the default timezone, home location and lookup behaviour.
    Configure,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command.unwrap_or(Command::Dashboard { timezone: None }) {
            Command::Dashboard { timezone } => {
                let config = Config::load()?;
                let timezone = timezone.unwrap_or_else(|| config.default_timezone.clone());
                let mut dashboard = build_dashboard(&config, timezone)?;
                interactive::run(&mut dashboard).await
            }
            Command::Show {
                lat,
                lon,
                timezone,
                json,
            } => {
                let config = Config::load()?;
                let timezone = timezone.unwrap_or_else(|| config.default_timezone.clone());
                let mut dashboard = build_dashboard(&config, timezone)?;

                tracing::debug!(manual = lat.is_some(), json, "showing forecast once");
                match (lat, lon) {
                    (Some(lat), Some(lon)) => {
                        dashboard.submit_manual(ManualLocation::new(lat, lon)).await;
                    }
                    _ => {
                        dashboard.mount().await;
                    }
                }

                let state = dashboard.state();
                if state.mode() == DisplayMode::Loading {
                    anyhow::bail!("Both --lat and --lon must be non-empty.");
                }

                if json {
                    let out = serde_json::to_string_pretty(state)
                        .context("Failed to serialize dashboard state")?;
                    println!("{out}");
                } else if !matches!(state.mode(), DisplayMode::Errored(_)) {
                    print!("{}", render::render(dashboard.session()));
                }

                // Error states exit non-zero; anyhow prints the message.
                if let DisplayMode::Errored(message) = state.mode() {
                    anyhow::bail!("{message}");
                }
                Ok(())
            }
            Command::Configure => interactive::configure(),
        }
    }
}

fn build_dashboard(config: &Config, timezone: Timezone) -> anyhow::Result<Dashboard> {
    let locator = location::provider_from_config(config)?;
    let fetcher = OpenMeteoFetcher::from_config(config)?;

    Ok(Dashboard::new(locator, Box::new(fetcher), timezone))
}
