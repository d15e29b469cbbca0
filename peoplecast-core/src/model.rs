use serde::{Deserialize, Serialize};

use crate::conditions::{Condition, classify};
use crate::error::WeatherError;

/// Geographic point a user lives at.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

/// The slice of a user's address the app keeps. Everything besides the
/// coordinates is display-only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub city: String,
    pub country: String,
    pub coordinates: Coordinates,
}

/// Avatar URLs in the three sizes the picture CDN serves.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Picture {
    #[serde(default)]
    pub large: String,
    #[serde(default)]
    pub medium: String,
    #[serde(default)]
    pub thumbnail: String,
}

/// Weather snapshot attached to a user once enrichment succeeds.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Weather {
    pub weather_code: i32,
    pub condition: Condition,
    pub current_temperature: f64,
    pub max_temperature: f64,
    pub min_temperature: f64,
}

impl Weather {
    /// Derive a snapshot from raw weather-service readings.
    ///
    /// Max/min temperatures are taken over the whole hourly series, which
    /// must be non-empty.
    pub fn from_readings(
        weather_code: i32,
        current_temperature: f64,
        hourly: &[f64],
    ) -> Result<Self, WeatherError> {
        if hourly.is_empty() {
            return Err(WeatherError::Malformed("hourly temperature series is empty"));
        }

        let max_temperature = hourly.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let min_temperature = hourly.iter().copied().fold(f64::INFINITY, f64::min);

        Ok(Self {
            weather_code,
            condition: classify(weather_code),
            current_temperature,
            max_temperature,
            min_temperature,
        })
    }
}

/// A person in the working set.
///
/// `id` is the zero-based position within the batch that produced the user
/// and restarts from 0 on every reload; it is not globally unique across
/// fetches. `weather` stays `None` until enrichment succeeds.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct User {
    pub id: usize,
    pub name: String,
    pub gender: String,
    pub email: String,
    pub picture: Picture,
    pub location: Location,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weather: Option<Weather>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn readings_derive_min_and_max_over_the_hourly_series() {
        let weather = Weather::from_readings(0, 11.0, &[10.0, 15.5, 9.25]).unwrap();

        assert_eq!(weather.min_temperature, 9.25);
        assert_eq!(weather.max_temperature, 15.5);
        assert_eq!(weather.current_temperature, 11.0);
    }

    #[test]
    fn readings_classify_the_current_code() {
        let weather = Weather::from_readings(61, 8.0, &[8.0]).unwrap();

        assert_eq!(weather.weather_code, 61);
        assert_eq!(weather.condition.description, "Rain");
        assert_eq!(weather.condition.icon, "fa-cloud-showers-heavy");
    }

    #[test]
    fn empty_hourly_series_is_rejected() {
        let error = Weather::from_readings(0, 11.0, &[]).unwrap_err();

        assert!(matches!(error, WeatherError::Malformed(_)));
    }

    #[test]
    fn single_reading_is_both_min_and_max() {
        let weather = Weather::from_readings(3, -2.5, &[-2.5]).unwrap();

        assert_eq!(weather.min_temperature, -2.5);
        assert_eq!(weather.max_temperature, -2.5);
    }
}
