use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use crate::error::{FetchError, WeatherError};
use crate::model::{Coordinates, Weather};
use crate::source::{WeatherSource, truncate_body};

/// Client for the Open-Meteo forecast endpoint.
#[derive(Debug, Clone)]
pub struct OpenMeteoSource {
    base_url: String,
    http: Client,
}

impl OpenMeteoSource {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self { base_url: base_url.into(), http: Client::new() }
    }

    async fn fetch_forecast(&self, coordinates: Coordinates) -> Result<OmForecast, FetchError> {
        debug!(
            latitude = coordinates.latitude,
            longitude = coordinates.longitude,
            "requesting weather"
        );

        let res = self
            .http
            .get(&self.base_url)
            .query(&[
                ("latitude", coordinates.latitude.to_string()),
                ("longitude", coordinates.longitude.to_string()),
                ("current_weather", "true".to_string()),
                ("hourly", "temperature_2m".to_string()),
            ])
            .send()
            .await?;

        let status = res.status();
        let body = res.text().await?;

        if !status.is_success() {
            return Err(FetchError::Status { status, body: truncate_body(&body) });
        }

        Ok(serde_json::from_str(&body)?)
    }
}

#[async_trait]
impl WeatherSource for OpenMeteoSource {
    async fn observe(&self, coordinates: Coordinates) -> Result<Weather, WeatherError> {
        let parsed = self.fetch_forecast(coordinates).await?;

        Weather::from_readings(
            parsed.current_weather.weathercode,
            parsed.current_weather.temperature,
            &parsed.hourly.temperature_2m,
        )
    }
}

#[derive(Debug, Deserialize)]
struct OmCurrentWeather {
    weathercode: i32,
    temperature: f64,
}

#[derive(Debug, Deserialize)]
struct OmHourly {
    temperature_2m: Vec<f64>,
}

#[derive(Debug, Deserialize)]
struct OmForecast {
    current_weather: OmCurrentWeather,
    hourly: OmHourly,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn forecast_payload_parses() {
        let body = r#"{
            "latitude": 51.5,
            "longitude": -0.12,
            "current_weather": { "temperature": 12.5, "weathercode": 61, "windspeed": 7.2 },
            "hourly": { "temperature_2m": [10.0, 15.5, 9.25] }
        }"#;

        let parsed: OmForecast = serde_json::from_str(body).unwrap();

        assert_eq!(parsed.current_weather.weathercode, 61);
        assert_eq!(parsed.current_weather.temperature, 12.5);
        assert_eq!(parsed.hourly.temperature_2m, vec![10.0, 15.5, 9.25]);
    }

    #[test]
    fn payload_without_current_weather_is_an_error() {
        let body = r#"{ "hourly": { "temperature_2m": [1.0] } }"#;

        assert!(serde_json::from_str::<OmForecast>(body).is_err());
    }
}
