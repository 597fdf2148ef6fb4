use crate::{
    error::{Result, WeatherError},
    model::{CurrentConditions, DailyForecast, Forecast, RawForecastResponse},
    weather_code,
};

/// Turn the raw endpoint payload into the display model.
///
/// Day `i` of the output is built from index `i` of every daily array, in
/// source order. Fails if the arrays disagree in length.
pub fn normalize(raw: &RawForecastResponse) -> Result<Forecast> {
    let daily = &raw.daily;
    let len = daily.time.len();

    let lengths = [
        ("temperature_2m_max", daily.temperature_2m_max.len()),
        ("temperature_2m_min", daily.temperature_2m_min.len()),
        ("precipitation_sum", daily.precipitation_sum.len()),
        ("weathercode", daily.weathercode.len()),
        ("windspeed_10m_max", daily.windspeed_10m_max.len()),
    ];
    if let Some((name, other)) = lengths.iter().find(|(_, l)| *l != len) {
        return Err(WeatherError::MisalignedDaily(format!(
            "time has {len} entries but {name} has {other}"
        )));
    }

    let days = (0..len)
        .map(|i| DailyForecast {
            date: daily.time[i],
            temp_max: daily.temperature_2m_max[i],
            temp_min: daily.temperature_2m_min[i],
            precipitation: daily.precipitation_sum[i],
            weather: weather_code::describe_opt(daily.weathercode[i]),
            wind: daily.windspeed_10m_max[i],
        })
        .collect();

    let current = &raw.current_weather;
    let today = CurrentConditions {
        temperature: current.temperature,
        wind: current.windspeed,
        weather: weather_code::describe(current.weathercode),
    };

    Ok(Forecast { today, daily: days })
}
