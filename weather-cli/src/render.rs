use weather_core::{DailyForecast, DisplayMode, Session};

/// Render the current dashboard state as plain text.
pub fn render(session: &Session) -> String {
    let state = session.state();
    match state.mode() {
        DisplayMode::Loading => "Loading weather...\n".to_string(),
        DisplayMode::Errored(message) => format!("{message}\n"),
        DisplayMode::Ready => {
            let mut output = String::from("Weather Dashboard\n");

            let location = session
                .coordinates()
                .map(|c| c.to_string())
                .unwrap_or_else(|| "-".to_string());
            output.push_str(&format!(
                "Location: {} | Timezone: {}\n\n",
                location,
                session.timezone().label()
            ));

            if let Some(today) = &state.today {
                output.push_str(&format!(
                    "Today:\n  {}\u{00b0}C\n  {}\n  Wind: {} km/h\n\n",
                    today.temperature, today.weather, today.wind
                ));
            }

            if !state.forecast.is_empty() {
                output.push_str("Forecast:\n\n");
                for day in &state.forecast {
                    output.push_str(&format_day(day));
                }
            }
            output
        }
    }
}

fn format_day(day: &DailyForecast) -> String {
    format!(
        "{}:\n  High: {}\u{00b0}C  Low: {}\u{00b0}C\n  Conditions: {}\n  Precip: {} mm\n  Wind: {} km/h\n\n",
        day.date.format("%a %b %d %Y"),
        value(day.temp_max),
        value(day.temp_min),
        day.weather,
        value(day.precipitation),
        value(day.wind),
    )
}

fn value(v: Option<f64>) -> String {
    v.map_or_else(|| "-".to_string(), |v| v.to_string())
}
