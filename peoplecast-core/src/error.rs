//! Failure taxonomy for user acquisition and weather enrichment.

use reqwest::StatusCode;
use thiserror::Error;

/// A single HTTP call that did not produce a usable body.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("unexpected status {status}: {body}")]
    Status { status: StatusCode, body: String },

    #[error("malformed response body: {0}")]
    Body(#[from] serde_json::Error),
}

/// A weather lookup that did not yield a snapshot.
#[derive(Debug, Error)]
pub enum WeatherError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// The call succeeded at the transport level but the payload is unusable.
    #[error("unusable weather payload: {0}")]
    Malformed(&'static str),
}

/// Caller-visible failure events emitted while loading the working set.
///
/// Batch-level failure empties the set and is surfaced once; per-user
/// failures are isolated and never abort sibling work.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to fetch user batch: {0}")]
    UserFetchFailed(#[source] FetchError),

    #[error("user record {index} could not be decoded: {source}")]
    MalformedRecord {
        index: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("weather lookup failed for user {user_id}: {source}")]
    WeatherFetchFailed {
        user_id: usize,
        #[source]
        source: WeatherError,
    },
}

impl LoadError {
    /// Short tag for sinks that group failures by kind.
    pub fn kind(&self) -> &'static str {
        match self {
            LoadError::UserFetchFailed(_) => "user_fetch_failed",
            LoadError::MalformedRecord { .. } => "malformed_record",
            LoadError::WeatherFetchFailed { .. } => "weather_fetch_failed",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weather_fetch_failed_names_the_user() {
        let error = LoadError::WeatherFetchFailed {
            user_id: 7,
            source: WeatherError::Malformed("hourly temperature series is empty"),
        };

        assert_eq!(error.kind(), "weather_fetch_failed");
        assert!(error.to_string().contains("user 7"));
    }

    #[test]
    fn malformed_record_names_the_index() {
        let source = serde_json::from_str::<String>("{").unwrap_err();
        let error = LoadError::MalformedRecord { index: 3, source };

        assert_eq!(error.kind(), "malformed_record");
        assert!(error.to_string().contains("record 3"));
    }
}
