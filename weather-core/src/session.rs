//! Dashboard state machine.
//!
//! All state changes go through [`Session::apply`], which takes one typed
//! [`Event`] and may hand back a [`Command`] for the caller to run. Each fetch
//! is tagged with a generation and each location lookup with a request id;
//! only the answer to the newest outstanding request is allowed to touch the
//! state, so a slow response can't overwrite a newer one.

use serde::Serialize;

use crate::{
    location::ManualLocation,
    model::{Coordinates, CurrentConditions, DailyForecast, Forecast, Timezone},
};

pub const LOCATION_DENIED: &str = "Location access denied.";
pub const FETCH_FAILED: &str = "Failed to fetch weather data.";
pub const INVALID_COORDINATES: &str = "Invalid coordinates.";

/// What the presentation layer renders.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct UiState {
    pub forecast: Vec<DailyForecast>,
    pub today: Option<CurrentConditions>,
    pub loading: bool,
    pub error: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayMode<'a> {
    Loading,
    Errored(&'a str),
    Ready,
}

impl UiState {
    fn loading() -> Self {
        Self {
            loading: true,
            ..Self::default()
        }
    }

    pub fn mode(&self) -> DisplayMode<'_> {
        if self.loading {
            DisplayMode::Loading
        } else if let Some(error) = &self.error {
            DisplayMode::Errored(error)
        } else {
            DisplayMode::Ready
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// The dashboard was opened.
    Mounted,
    LocationAcquired { request: u64, coordinates: Coordinates },
    LocationDenied { request: u64 },
    FetchSucceeded { generation: u64, forecast: Forecast },
    FetchFailed { generation: u64 },
    TimezoneChanged(Timezone),
    ManualSubmitted(ManualLocation),
}

#[derive(Debug, Clone, PartialEq)]
pub struct FetchRequest {
    pub generation: u64,
    pub coordinates: Coordinates,
    pub timezone: Timezone,
}

/// Side effect requested by the reducer.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    AcquireLocation { request: u64 },
    Fetch(FetchRequest),
}

#[derive(Debug, Clone)]
pub struct Session {
    state: UiState,
    coordinates: Option<Coordinates>,
    timezone: Timezone,
    generation: u64,
    in_flight: Option<u64>,
    lookups: u64,
    locating: Option<u64>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(Timezone::default())
    }
}

impl Session {
    pub fn new(timezone: Timezone) -> Self {
        Self {
            state: UiState::loading(),
            coordinates: None,
            timezone,
            generation: 0,
            in_flight: None,
            lookups: 0,
            locating: None,
        }
    }

    pub fn state(&self) -> &UiState {
        &self.state
    }

    pub fn coordinates(&self) -> Option<Coordinates> {
        self.coordinates
    }

    pub fn timezone(&self) -> &Timezone {
        &self.timezone
    }

    /// Generation of the fetch whose result is still awaited, if any.
    pub fn in_flight(&self) -> Option<u64> {
        self.in_flight
    }

    /// Id of the location lookup whose answer is still awaited, if any.
    pub fn locating(&self) -> Option<u64> {
        self.locating
    }

    pub fn apply(&mut self, event: Event) -> Option<Command> {
        match event {
            Event::Mounted => {
                self.state = UiState::loading();
                self.in_flight = None;
                Some(self.begin_lookup())
            }
            Event::LocationAcquired {
                request,
                coordinates,
            } => {
                if !self.is_current_lookup(request) {
                    return None;
                }
                self.locating = None;
                self.coordinates = Some(coordinates);
                Some(self.begin_fetch(coordinates))
            }
            Event::LocationDenied { request } => {
                if self.is_current_lookup(request) {
                    self.fail(LOCATION_DENIED);
                }
                None
            }
            Event::FetchSucceeded {
                generation,
                forecast,
            } => {
                if self.is_current(generation) {
                    self.in_flight = None;
                    self.state = UiState {
                        forecast: forecast.daily,
                        today: Some(forecast.today),
                        loading: false,
                        error: None,
                    };
                }
                None
            }
            Event::FetchFailed { generation } => {
                if self.is_current(generation) {
                    self.fail(FETCH_FAILED);
                }
                None
            }
            Event::TimezoneChanged(timezone) => {
                if timezone == self.timezone {
                    return None;
                }
                self.timezone = timezone;
                match self.coordinates {
                    Some(coords) => Some(self.begin_fetch(coords)),
                    None => {
                        self.state = UiState::loading();
                        Some(self.begin_lookup())
                    }
                }
            }
            Event::ManualSubmitted(input) => match input.accept() {
                Ok(None) => None,
                Ok(Some(coords)) => {
                    self.locating = None;
                    self.coordinates = Some(coords);
                    Some(self.begin_fetch(coords))
                }
                Err(e) => {
                    tracing::info!(error = %e, "manual location rejected");
                    self.fail(INVALID_COORDINATES);
                    None
                }
            },
        }
    }

    fn begin_lookup(&mut self) -> Command {
        self.lookups += 1;
        self.locating = Some(self.lookups);
        Command::AcquireLocation {
            request: self.lookups,
        }
    }

    fn begin_fetch(&mut self, coordinates: Coordinates) -> Command {
        self.generation += 1;
        self.in_flight = Some(self.generation);
        self.state.loading = true;
        self.state.error = None;

        Command::Fetch(FetchRequest {
            generation: self.generation,
            coordinates,
            timezone: self.timezone.clone(),
        })
    }

    fn is_current(&self, generation: u64) -> bool {
        let current = self.in_flight == Some(generation);
        if !current {
            tracing::debug!(generation, latest = self.generation, "discarding stale fetch result");
        }
        current
    }

    fn is_current_lookup(&self, request: u64) -> bool {
        let current = self.locating == Some(request);
        if !current {
            tracing::debug!(request, latest = self.lookups, "discarding stale location answer");
        }
        current
    }

    fn fail(&mut self, message: &str) {
        self.in_flight = None;
        self.locating = None;
        self.state = UiState {
            error: Some(message.to_string()),
            ..UiState::default()
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn forecast(temperature: f64) -> Forecast {
        Forecast {
            today: CurrentConditions {
                temperature,
                wind: 10.0,
                weather: "Clear sky",
            },
            daily: vec![],
        }
    }

    fn expect_fetch(cmd: Option<Command>) -> FetchRequest {
        match cmd {
            Some(Command::Fetch(req)) => req,
            other => panic!("expected a fetch, got {other:?}"),
        }
    }

    fn expect_lookup(cmd: Option<Command>) -> u64 {
        match cmd {
            Some(Command::AcquireLocation { request }) => request,
            other => panic!("expected a location lookup, got {other:?}"),
        }
    }

    /// Mount and answer the lookup with `coordinates`.
    fn located(coordinates: Coordinates) -> (Session, FetchRequest) {
        let mut session = Session::new(Timezone::Auto);
        let request = expect_lookup(session.apply(Event::Mounted));
        let req = expect_fetch(session.apply(Event::LocationAcquired {
            request,
            coordinates,
        }));
        (session, req)
    }

    /// Mount and deny the lookup.
    fn denied() -> Session {
        let mut session = Session::new(Timezone::Auto);
        let request = expect_lookup(session.apply(Event::Mounted));
        session.apply(Event::LocationDenied { request });
        session
    }

    #[test]
    fn starts_loading() {
        let session = Session::new(Timezone::Auto);
        assert_eq!(session.state().mode(), DisplayMode::Loading);
    }

    #[test]
    fn default_session_starts_loading_in_auto() {
        let session = Session::default();
        assert_eq!(session.state().mode(), DisplayMode::Loading);
        assert_eq!(session.timezone(), &Timezone::Auto);
    }

    #[test]
    fn mount_acquires_location_then_fetches() {
        let mut session = Session::new(Timezone::Auto);

        let request = expect_lookup(session.apply(Event::Mounted));
        assert_eq!(session.locating(), Some(request));

        let coords = Coordinates::new(40.0, -74.0);
        let req = expect_fetch(session.apply(Event::LocationAcquired {
            request,
            coordinates: coords,
        }));
        assert_eq!(req.coordinates, coords);
        assert_eq!(req.timezone, Timezone::Auto);
        assert_eq!(session.state().mode(), DisplayMode::Loading);
        assert_eq!(session.locating(), None);
        assert_eq!(session.in_flight(), Some(req.generation));

        let cmd = session.apply(Event::FetchSucceeded {
            generation: req.generation,
            forecast: forecast(21.0),
        });
        assert_eq!(cmd, None);
        assert_eq!(session.state().mode(), DisplayMode::Ready);
        assert_eq!(session.state().today.as_ref().map(|t| t.temperature), Some(21.0));
        assert_eq!(session.in_flight(), None);
    }

    #[test]
    fn denial_is_an_error_without_fetch() {
        let mut session = Session::new(Timezone::Auto);
        let request = expect_lookup(session.apply(Event::Mounted));

        assert_eq!(session.apply(Event::LocationDenied { request }), None);
        assert_eq!(session.state().mode(), DisplayMode::Errored(LOCATION_DENIED));
        assert!(!session.state().loading);
    }

    #[test]
    fn fetch_failure_shows_generic_message() {
        let (mut session, req) = located(Coordinates::new(1.0, 2.0));

        session.apply(Event::FetchFailed {
            generation: req.generation,
        });
        assert_eq!(session.state().mode(), DisplayMode::Errored(FETCH_FAILED));
        assert!(session.state().forecast.is_empty());
        assert!(session.state().today.is_none());
    }

    #[test]
    fn stale_result_is_discarded() {
        let (mut session, first) = located(Coordinates::new(1.0, 2.0));
        let second = expect_fetch(session.apply(Event::ManualSubmitted(ManualLocation::new("3", "4"))));
        assert!(second.generation > first.generation);

        session.apply(Event::FetchSucceeded {
            generation: second.generation,
            forecast: forecast(5.0),
        });
        // The superseded request resolves last; it must not win.
        session.apply(Event::FetchSucceeded {
            generation: first.generation,
            forecast: forecast(99.0),
        });
        session.apply(Event::FetchFailed {
            generation: first.generation,
        });

        assert_eq!(session.state().mode(), DisplayMode::Ready);
        assert_eq!(session.state().today.as_ref().map(|t| t.temperature), Some(5.0));
    }

    #[test]
    fn late_denial_after_manual_entry_is_ignored() {
        let mut session = Session::new(Timezone::Auto);
        let request = expect_lookup(session.apply(Event::Mounted));

        let req = expect_fetch(session.apply(Event::ManualSubmitted(ManualLocation::new("51.5", "-0.12"))));
        assert_eq!(session.locating(), None);
        session.apply(Event::FetchSucceeded {
            generation: req.generation,
            forecast: forecast(11.0),
        });

        assert_eq!(session.apply(Event::LocationDenied { request }), None);
        assert_eq!(session.state().mode(), DisplayMode::Ready);
        assert_eq!(session.state().today.as_ref().map(|t| t.temperature), Some(11.0));
    }

    #[test]
    fn late_location_does_not_replace_manual_entry() {
        let mut session = Session::new(Timezone::Auto);
        let request = expect_lookup(session.apply(Event::Mounted));
        let req = expect_fetch(session.apply(Event::ManualSubmitted(ManualLocation::new("51.5", "-0.12"))));

        let cmd = session.apply(Event::LocationAcquired {
            request,
            coordinates: Coordinates::new(40.0, -74.0),
        });

        assert_eq!(cmd, None);
        assert_eq!(session.coordinates(), Some(Coordinates::new(51.5, -0.12)));
        assert_eq!(session.in_flight(), Some(req.generation));
    }

    #[test]
    fn only_the_newest_lookup_counts() {
        let mut session = Session::new(Timezone::Auto);
        let first = expect_lookup(session.apply(Event::Mounted));
        let second = expect_lookup(session.apply(Event::Mounted));
        assert!(second > first);

        session.apply(Event::LocationDenied { request: first });
        assert_eq!(session.state().mode(), DisplayMode::Loading);

        let req = expect_fetch(session.apply(Event::LocationAcquired {
            request: second,
            coordinates: Coordinates::new(1.0, 1.0),
        }));
        assert_eq!(req.coordinates, Coordinates::new(1.0, 1.0));
    }

    #[test]
    fn empty_manual_field_is_a_no_op() {
        let (mut session, req) = located(Coordinates::new(1.0, 2.0));
        session.apply(Event::FetchSucceeded {
            generation: req.generation,
            forecast: forecast(12.0),
        });
        let before = session.state().clone();

        let cmd = session.apply(Event::ManualSubmitted(ManualLocation::new("51.5", "")));
        assert_eq!(cmd, None);
        assert_eq!(session.state(), &before);
        assert_eq!(session.coordinates(), Some(Coordinates::new(1.0, 2.0)));
    }

    #[test]
    fn invalid_manual_text_never_fetches() {
        let mut session = Session::new(Timezone::Auto);

        let cmd = session.apply(Event::ManualSubmitted(ManualLocation::new("abc", "-74")));
        assert_eq!(cmd, None);
        assert_eq!(session.state().mode(), DisplayMode::Errored(INVALID_COORDINATES));
        assert_eq!(session.coordinates(), None);
        assert_eq!(session.in_flight(), None);
    }

    #[test]
    fn timezone_change_refetches_with_known_coordinates() {
        let coords = Coordinates::new(40.0, -74.0);
        let (mut session, req) = located(coords);
        session.apply(Event::FetchSucceeded {
            generation: req.generation,
            forecast: forecast(12.0),
        });

        let next = expect_fetch(session.apply(Event::TimezoneChanged(Timezone::Named("Europe/London"))));
        assert_eq!(next.coordinates, coords);
        assert_eq!(next.timezone.as_query(), "Europe/London");
        assert_eq!(session.state().mode(), DisplayMode::Loading);
    }

    #[test]
    fn timezone_change_without_coordinates_retries_location() {
        let mut session = denied();

        let request = expect_lookup(session.apply(Event::TimezoneChanged(Timezone::Utc)));
        assert_eq!(session.locating(), Some(request));
        assert_eq!(session.state().mode(), DisplayMode::Loading);
    }

    #[test]
    fn same_timezone_is_ignored() {
        let mut session = Session::new(Timezone::Utc);
        assert_eq!(session.apply(Event::TimezoneChanged(Timezone::Utc)), None);
    }

    #[test]
    fn errored_recovers_on_manual_submission() {
        let mut session = denied();

        let req = expect_fetch(session.apply(Event::ManualSubmitted(ManualLocation::new("48.85", "2.35"))));
        assert_eq!(session.state().mode(), DisplayMode::Loading);
        assert_eq!(session.state().error, None);

        session.apply(Event::FetchSucceeded {
            generation: req.generation,
            forecast: forecast(15.0),
        });
        assert_eq!(session.state().mode(), DisplayMode::Ready);
    }

    #[test]
    fn loading_and_error_never_coexist() {
        let mut session = denied();
        session.apply(Event::ManualSubmitted(ManualLocation::new("1", "1")));

        let state = session.state();
        assert!(!(state.loading && state.error.is_some()));
    }
}
