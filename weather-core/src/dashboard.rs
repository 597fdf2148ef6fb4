use crate::{
    fetcher::ForecastFetcher,
    location::{LocationProvider, ManualLocation},
    model::Timezone,
    normalize::normalize,
    session::{Command, Event, FetchRequest, Session, UiState},
};

/// Runs a [`Session`] against real collaborators.
///
/// Each trigger feeds its event to the reducer and then executes the
/// commands it returns until the session settles.
#[derive(Debug)]
pub struct Dashboard {
    session: Session,
    locator: Box<dyn LocationProvider>,
    fetcher: Box<dyn ForecastFetcher>,
}

impl Dashboard {
    pub fn new(
        locator: Box<dyn LocationProvider>,
        fetcher: Box<dyn ForecastFetcher>,
        timezone: Timezone,
    ) -> Self {
        Self {
            session: Session::new(timezone),
            locator,
            fetcher,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn state(&self) -> &UiState {
        self.session.state()
    }

    /// Initial load: automatic location, then fetch.
    pub async fn mount(&mut self) -> &UiState {
        self.dispatch(Event::Mounted).await
    }

    pub async fn change_timezone(&mut self, timezone: Timezone) -> &UiState {
        self.dispatch(Event::TimezoneChanged(timezone)).await
    }

    pub async fn submit_manual(&mut self, input: ManualLocation) -> &UiState {
        self.dispatch(Event::ManualSubmitted(input)).await
    }

    pub async fn dispatch(&mut self, event: Event) -> &UiState {
        let mut next = self.session.apply(event);
        while let Some(command) = next {
            let outcome = self.run(command).await;
            next = self.session.apply(outcome);
        }
        self.session.state()
    }

    async fn run(&self, command: Command) -> Event {
        match command {
            Command::AcquireLocation { request } => match self.locator.acquire().await {
                Ok(coordinates) => Event::LocationAcquired {
                    request,
                    coordinates,
                },
                Err(e) => {
                    tracing::info!(error = %e, "automatic location unavailable");
                    Event::LocationDenied { request }
                }
            },
            Command::Fetch(request) => self.fetch(request).await,
        }
    }

    async fn fetch(&self, request: FetchRequest) -> Event {
        let FetchRequest {
            generation,
            coordinates,
            timezone,
        } = request;

        let result = self
            .fetcher
            .fetch_forecast(coordinates, &timezone)
            .await
            .and_then(|raw| normalize(&raw));

        match result {
            Ok(forecast) => {
                tracing::info!(
                    generation,
                    %coordinates,
                    %timezone,
                    days = forecast.daily.len(),
                    "forecast ready"
                );
                Event::FetchSucceeded {
                    generation,
                    forecast,
                }
            }
            Err(e) => {
                tracing::warn!(generation, error = %e, "forecast unavailable");
                Event::FetchFailed { generation }
            }
        }
    }
}
