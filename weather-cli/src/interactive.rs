use anyhow::Context;
use inquire::{Confirm, InquireError, Select, Text};
use std::fmt;
use weather_core::{Config, Dashboard, ManualLocation, Timezone};

use crate::render;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    Timezone,
    Location,
    Quit,
}

impl Action {
    const ALL: [Action; 3] = [Action::Timezone, Action::Location, Action::Quit];
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Action::Timezone => "Change timezone",
            Action::Location => "Enter coordinates",
            Action::Quit => "Quit",
        })
    }
}

/// Selector entry for a timezone.
#[derive(Debug, Clone, PartialEq)]
struct TimezoneChoice(Timezone);

impl fmt::Display for TimezoneChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            Timezone::Named(name) => write!(f, "{} ({})", self.0.label(), name),
            other => f.write_str(other.label()),
        }
    }
}

fn timezone_choices(current: &Timezone) -> (Vec<TimezoneChoice>, usize) {
    let zones = Timezone::all();
    let cursor = zones.iter().position(|tz| tz == current).unwrap_or(0);
    (zones.into_iter().map(TimezoneChoice).collect(), cursor)
}

/// Treat Esc and Ctrl-C as "no answer".
fn answered<T>(result: Result<T, InquireError>) -> anyhow::Result<Option<T>> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => Ok(None),
        Err(e) => Err(e).context("Failed to read input"),
    }
}

fn ask_timezone(message: &str, current: &Timezone) -> anyhow::Result<Option<Timezone>> {
    let (choices, cursor) = timezone_choices(current);
    let picked = answered(
        Select::new(message, choices)
            .with_starting_cursor(cursor)
            .prompt(),
    )?;
    Ok(picked.map(|choice| choice.0))
}

fn ask_coordinates() -> anyhow::Result<Option<ManualLocation>> {
    let Some(lat) = answered(Text::new("Latitude:").with_placeholder("40.71").prompt())? else {
        return Ok(None);
    };
    let Some(lon) = answered(Text::new("Longitude:").with_placeholder("-74.01").prompt())? else {
        return Ok(None);
    };
    Ok(Some(ManualLocation::new(lat, lon)))
}

/// Interactive dashboard: render, then let the user change timezone or
/// location until they quit.
pub async fn run(dashboard: &mut Dashboard) -> anyhow::Result<()> {
    println!("{}", render::render(dashboard.session()));
    dashboard.mount().await;

    loop {
        println!("{}", render::render(dashboard.session()));

        let Some(action) = answered(Select::new("What next?", Action::ALL.to_vec()).prompt())?
        else {
            return Ok(());
        };

        tracing::debug!(%action, "dashboard action");
        match action {
            Action::Timezone => {
                let current = dashboard.session().timezone().clone();
                if let Some(timezone) = ask_timezone("Timezone:", &current)? {
                    if timezone != current {
                        println!("Loading weather...");
                    }
                    tracing::debug!(timezone = timezone.as_query(), "timezone selected");
                    dashboard.change_timezone(timezone).await;
                }
            }
            Action::Location => {
                if let Some(input) = ask_coordinates()? {
                    if input.is_complete() {
                        println!("Loading weather...");
                    }
                    dashboard.submit_manual(input).await;
                }
            }
            Action::Quit => return Ok(()),
        }
    }
}

/// `weather configure`: edit and save the config file.
pub fn configure() -> anyhow::Result<()> {
    let mut config = Config::load()?;

    let Some(timezone) = ask_timezone("Default timezone:", &config.default_timezone)? else {
        println!("Configuration unchanged.");
        return Ok(());
    };
    config.default_timezone = timezone;

    let wants_home = answered(
        Confirm::new("Use a fixed home location instead of automatic lookup?")
            .with_default(config.location.is_some())
            .prompt(),
    )?
    .unwrap_or(false);

    if wants_home {
        loop {
            let Some(input) = ask_coordinates()? else {
                break;
            };
            match input.accept() {
                Ok(Some(coords)) => {
                    config.set_home(coords);
                    break;
                }
                Ok(None) => println!("Both latitude and longitude are required."),
                Err(e) => println!("{e}"),
            }
        }
    } else {
        config.clear_home();
    }

    config.api.auto_locate = answered(
        Confirm::new("Look up your location from your IP address when no home location is set?")
            .with_default(config.api.auto_locate)
            .prompt(),
    )?
    .unwrap_or(config.api.auto_locate);

    let path = config.save()?;
    tracing::debug!(path = %path.display(), "configuration saved");
    println!("Saved configuration to {}", path.display());
    Ok(())
}
