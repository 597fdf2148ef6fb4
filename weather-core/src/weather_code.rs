//! WMO weather interpretation codes as used by Open-Meteo.
//!
//! See: https://open-meteo.com/en/docs#weathervariables

/// Text shown for any code missing from [`WEATHER_CODES`].
pub const UNKNOWN: &str = "Unknown";

/// Known codes and their display text, sorted by code.
pub const WEATHER_CODES: &[(i32, &str)] = &[
    (0, "Clear sky"),
    (1, "Mainly clear"),
    (2, "Partly cloudy"),
    (3, "Overcast"),
    (45, "Foggy"),
    (48, "Rime fog"),
    (51, "Light drizzle"),
    (53, "Moderate drizzle"),
    (55, "Dense drizzle"),
    (61, "Slight rain"),
    (63, "Moderate rain"),
    (65, "Heavy rain"),
    (71, "Light snow"),
    (73, "Moderate snow"),
    (75, "Heavy snow"),
    (80, "Rain showers"),
    (81, "Moderate showers"),
    (82, "Violent showers"),
    (95, "Thunderstorm"),
    (96, "Thunderstorm w/ hail"),
    (99, "Severe thunderstorm"),
];

/// Look up the display text for a weather code.
pub fn describe(code: i32) -> &'static str {
    WEATHER_CODES
        .binary_search_by_key(&code, |(c, _)| *c)
        .map(|idx| WEATHER_CODES[idx].1)
        .unwrap_or(UNKNOWN)
}

/// Like [`describe`], for values the API reported as null.
pub fn describe_opt(code: Option<i32>) -> &'static str {
    code.map_or(UNKNOWN, describe)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_is_sorted_and_unique() {
        assert!(WEATHER_CODES.windows(2).all(|w| w[0].0 < w[1].0));
    }

    #[test]
    fn clear_sky() {
        assert_eq!(describe(0), "Clear sky");
    }

    #[test]
    fn slight_rain() {
        assert_eq!(describe(61), "Slight rain");
    }

    #[test]
    fn unrecognized_code_is_unknown() {
        assert_eq!(describe(999), "Unknown");
        assert_eq!(describe(-1), "Unknown");
        // Valid WMO code the table does not carry.
        assert_eq!(describe(77), "Unknown");
    }

    #[test]
    fn tiers() {
        assert_eq!(describe(48), "Rime fog");
        assert_eq!(describe(55), "Dense drizzle");
        assert_eq!(describe(75), "Heavy snow");
        assert_eq!(describe(82), "Violent showers");
        assert_eq!(describe(96), "Thunderstorm w/ hail");
    }

    #[test]
    fn null_code_is_unknown() {
        assert_eq!(describe_opt(None), "Unknown");
        assert_eq!(describe_opt(Some(3)), "Overcast");
    }
}
