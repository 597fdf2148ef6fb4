//! Binary crate for the `weather` terminal dashboard.
//!
//! This crate focuses on:
//! - Parsing CLI arguments
//! - Interactive configuration and dashboard controls
//! - Human-friendly output formatting

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod cli;
mod interactive;
mod render;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cmd = cli::Cli::parse();
    init_tracing(cmd.verbose);
    cmd.run().await
}

/// `weather` also matches the `weather_core` target.
fn default_filter(verbose: bool) -> &'static str {
    if verbose { "weather=debug" } else { "weather=warn" }
}

fn init_tracing(verbose: bool) {
    let default = default_filter(verbose);

    // Logs go to stderr; stdout carries the dashboard itself.
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing_subscriber::EnvFilter;

    #[test]
    fn default_filter_parses_for_both_levels() {
        for verbose in [false, true] {
            assert!(EnvFilter::try_new(default_filter(verbose)).is_ok());
            assert!(!default_filter(verbose).contains(','));
        }
    }
}
