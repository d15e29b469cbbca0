//! Async seams over the two upstream services.
//!
//! The loader only sees these traits; the reqwest-backed clients live in
//! the submodules and can be swapped out for fakes in tests.

use async_trait::async_trait;
use std::fmt::Debug;

use crate::error::{FetchError, WeatherError};
use crate::model::{Coordinates, User, Weather};

pub mod open_meteo;
pub mod random_user;

pub use open_meteo::OpenMeteoSource;
pub use random_user::RandomUserSource;

/// One page of users as returned by an acquisition call.
///
/// Records that decode are already transformed into `User`s; records that
/// don't are kept as rejections so the caller can report them per index.
#[derive(Debug, Default)]
pub struct UserBatch {
    pub users: Vec<User>,
    pub rejected: Vec<RejectedRecord>,
}

/// A record the user service returned but the transformation refused.
#[derive(Debug)]
pub struct RejectedRecord {
    /// Position of the record in the service response.
    pub index: usize,
    pub error: serde_json::Error,
}

#[async_trait]
pub trait UserSource: Send + Sync + Debug {
    /// Fetch one batch of `count` users.
    async fn fetch_batch(&self, count: usize) -> Result<UserBatch, FetchError>;
}

#[async_trait]
pub trait WeatherSource: Send + Sync + Debug {
    /// Look up the current weather snapshot at a point.
    async fn observe(&self, coordinates: Coordinates) -> Result<Weather, WeatherError>;
}

pub(crate) fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() > MAX {
        format!("{}...", &body[..MAX])
    } else {
        body.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn long_bodies_are_truncated_for_error_messages() {
        let body = "x".repeat(500);
        let truncated = truncate_body(&body);

        assert_eq!(truncated.len(), 203);
        assert!(truncated.ends_with("..."));
    }

    #[test]
    fn short_bodies_pass_through() {
        assert_eq!(truncate_body("not found"), "not found");
    }
}
