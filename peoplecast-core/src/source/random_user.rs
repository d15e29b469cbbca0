use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Deserializer};
use tracing::debug;

use crate::error::FetchError;
use crate::model::{Coordinates, Location, Picture, User};
use crate::source::{RejectedRecord, UserBatch, UserSource, truncate_body};

/// Client for the random-user generator service.
#[derive(Debug, Clone)]
pub struct RandomUserSource {
    base_url: String,
    http: Client,
}

impl RandomUserSource {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self { base_url: base_url.into(), http: Client::new() }
    }

    async fn fetch_page(&self, count: usize) -> Result<RuResponse, FetchError> {
        debug!(count, "requesting user batch");

        let res = self
            .http
            .get(&self.base_url)
            .query(&[("results", count.to_string())])
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
impl UserSource for RandomUserSource {
    async fn fetch_batch(&self, count: usize) -> Result<UserBatch, FetchError> {
        let page = self.fetch_page(count).await?;

        let mut batch = UserBatch::default();
        for (index, record) in page.results.into_iter().enumerate() {
            match transform(record, index) {
                Ok(user) => batch.users.push(user),
                Err(error) => batch.rejected.push(RejectedRecord { index, error }),
            }
        }

        Ok(batch)
    }
}

/// Decode one raw record into a `User`.
///
/// `id` is the supplied batch index. The full name is the title, first and
/// last name joined by single spaces, skipping parts the record does not
/// carry. Cosmetic fields fall back to empty values; only a record missing
/// its coordinates is rejected.
pub fn transform(record: serde_json::Value, index: usize) -> Result<User, serde_json::Error> {
    let record: RuUser = serde_json::from_value(record)?;

    Ok(User {
        id: index,
        name: record.name.full(),
        gender: record.gender,
        email: record.email,
        picture: record.picture,
        location: Location {
            city: record.location.city,
            country: record.location.country,
            coordinates: Coordinates {
                latitude: record.location.coordinates.latitude,
                longitude: record.location.coordinates.longitude,
            },
        },
        weather: None,
    })
}

#[derive(Debug, Deserialize)]
struct RuResponse {
    /// Decoded per record so one broken entry doesn't sink the batch.
    results: Vec<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct RuUser {
    #[serde(default)]
    name: RuName,
    #[serde(default)]
    gender: String,
    #[serde(default)]
    email: String,
    #[serde(default)]
    picture: Picture,
    location: RuLocation,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RuName {
    title: String,
    first: String,
    last: String,
}

impl RuName {
    fn full(&self) -> String {
        [&self.title, &self.first, &self.last]
            .into_iter()
            .filter(|part| !part.is_empty())
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(" ")
    }
}

#[derive(Debug, Deserialize)]
struct RuLocation {
    #[serde(default)]
    city: String,
    #[serde(default)]
    country: String,
    coordinates: RuCoordinates,
}

#[derive(Debug, Deserialize)]
struct RuCoordinates {
    #[serde(deserialize_with = "coordinate")]
    latitude: f64,
    #[serde(deserialize_with = "coordinate")]
    longitude: f64,
}

/// The service serves coordinates as decimal strings; accept numbers too.
fn coordinate<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(f64),
        Text(String),
    }

    match Raw::deserialize(deserializer)? {
        Raw::Number(value) => Ok(value),
        Raw::Text(text) => text.trim().parse().map_err(serde::de::Error::custom),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record() -> serde_json::Value {
        json!({
            "gender": "female",
            "name": { "title": "Ms", "first": "Ada", "last": "Lovelace" },
            "email": "ada.lovelace@example.com",
            "picture": {
                "large": "https://example.com/large.jpg",
                "medium": "https://example.com/medium.jpg",
                "thumbnail": "https://example.com/thumb.jpg"
            },
            "location": {
                "city": "London",
                "country": "United Kingdom",
                "coordinates": { "latitude": "51.5074", "longitude": "-0.1278" }
            }
        })
    }

    #[test]
    fn transform_builds_the_full_name_with_title() {
        let user = transform(record(), 0).unwrap();

        assert_eq!(user.name, "Ms Ada Lovelace");
        assert_eq!(user.gender, "female");
        assert_eq!(user.email, "ada.lovelace@example.com");
        assert_eq!(user.picture.thumbnail, "https://example.com/thumb.jpg");
        assert!(user.weather.is_none());
    }

    #[test]
    fn transform_id_always_equals_the_supplied_index() {
        assert_eq!(transform(record(), 0).unwrap().id, 0);
        assert_eq!(transform(record(), 9).unwrap().id, 9);
    }

    #[test]
    fn transform_is_deterministic() {
        let first = transform(record(), 4).unwrap();
        let second = transform(record(), 4).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn string_coordinates_are_parsed() {
        let user = transform(record(), 0).unwrap();

        assert_eq!(user.location.coordinates.latitude, 51.5074);
        assert_eq!(user.location.coordinates.longitude, -0.1278);
    }

    #[test]
    fn numeric_coordinates_are_accepted_too() {
        let mut raw = record();
        raw["location"]["coordinates"] = json!({ "latitude": 51.5074, "longitude": -0.1278 });

        let user = transform(raw, 0).unwrap();
        assert_eq!(user.location.coordinates.latitude, 51.5074);
    }

    #[test]
    fn missing_name_parts_are_skipped() {
        let mut raw = record();
        raw["name"] = json!({ "first": "Ada", "last": "Lovelace" });

        assert_eq!(transform(raw, 0).unwrap().name, "Ada Lovelace");
    }

    #[test]
    fn missing_cosmetic_fields_become_empty() {
        let raw = json!({
            "location": {
                "coordinates": { "latitude": "0.0", "longitude": "0.0" }
            }
        });

        let user = transform(raw, 0).unwrap();
        assert_eq!(user.name, "");
        assert_eq!(user.email, "");
        assert_eq!(user.picture, Picture::default());
    }

    #[test]
    fn missing_coordinates_reject_the_record() {
        let mut raw = record();
        raw["location"] = json!({ "city": "London" });

        assert!(transform(raw, 0).is_err());
    }

    #[test]
    fn unparsable_coordinates_reject_the_record() {
        let mut raw = record();
        raw["location"]["coordinates"]["latitude"] = json!("not-a-number");

        assert!(transform(raw, 0).is_err());
    }
}
