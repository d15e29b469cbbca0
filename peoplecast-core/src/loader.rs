//! Batch acquisition and weather fan-out.

use std::fmt::Debug;
use std::sync::Arc;

use tokio::task::JoinSet;
use tracing::{debug, warn};

use crate::config::Config;
use crate::error::{LoadError, WeatherError};
use crate::model::{User, Weather};
use crate::source::{OpenMeteoSource, RandomUserSource, UserSource, WeatherSource};

/// Receives failure events as they happen.
///
/// The loader never formats or displays failures itself; implementations
/// decide whether an event becomes a log line, a toast or anything else.
pub trait Notify: Send + Sync + Debug {
    fn failure(&self, error: &LoadError);
}

/// Sink that drops every event.
#[derive(Debug, Default)]
pub struct SilentNotify;

impl Notify for SilentNotify {
    fn failure(&self, _error: &LoadError) {}
}

/// Owns the working set of users and keeps it in sync with the two
/// upstream services.
#[derive(Debug)]
pub struct UserLoader {
    users: Arc<dyn UserSource>,
    weather: Arc<dyn WeatherSource>,
    notify: Arc<dyn Notify>,
    batch_size: usize,
    roster: Vec<User>,
}

impl UserLoader {
    pub fn new(
        users: Arc<dyn UserSource>,
        weather: Arc<dyn WeatherSource>,
        notify: Arc<dyn Notify>,
        batch_size: usize,
    ) -> Self {
        Self { users, weather, notify, batch_size, roster: Vec::new() }
    }

    /// Build a loader backed by the live HTTP services from `config`.
    pub fn from_config(config: &Config, notify: Arc<dyn Notify>) -> Self {
        Self::new(
            Arc::new(RandomUserSource::new(config.endpoints.users.clone())),
            Arc::new(OpenMeteoSource::new(config.endpoints.weather.clone())),
            notify,
            config.batch_size,
        )
    }

    /// Current working set, in batch order.
    pub fn users(&self) -> &[User] {
        &self.roster
    }

    /// Fetch a fresh batch and give every user a weather snapshot.
    ///
    /// The previous working set is discarded wholesale: on a successful
    /// batch call the roster is rebuilt from the new records, on a failed
    /// one it is left empty and a single batch failure is reported. Weather
    /// lookups then fan out, one task per user, and the call returns only
    /// once every lookup has settled. Each failure goes to the notification
    /// sink as it happens and is also collected into the returned list;
    /// none of them aborts the rest of the load.
    pub async fn load_users(&mut self) -> Vec<LoadError> {
        let mut failures = Vec::new();
        self.roster.clear();

        let batch = match self.users.fetch_batch(self.batch_size).await {
            Ok(batch) => batch,
            Err(error) => {
                self.report(LoadError::UserFetchFailed(error), &mut failures);
                return failures;
            }
        };

        for rejected in batch.rejected {
            self.report(
                LoadError::MalformedRecord { index: rejected.index, source: rejected.error },
                &mut failures,
            );
        }

        self.roster = batch.users;
        debug!(count = self.roster.len(), "user batch loaded");

        for failure in self.attach_weather().await {
            self.report(failure, &mut failures);
        }

        failures
    }

    /// Re-run weather enrichment over the current working set without
    /// re-fetching users.
    ///
    /// Snapshots are replaced on success; a user whose lookup fails keeps
    /// whatever snapshot it already had.
    pub async fn refresh_weather(&mut self) -> Vec<LoadError> {
        let mut failures = Vec::new();

        for failure in self.attach_weather().await {
            self.report(failure, &mut failures);
        }

        failures
    }

    /// Fan out one weather lookup per user and wait for all of them to
    /// settle. Lookups are independent; each user's weather slot is only
    /// written by its own lookup.
    async fn attach_weather(&mut self) -> Vec<LoadError> {
        let mut lookups: JoinSet<(usize, Result<Weather, WeatherError>)> = JoinSet::new();

        for user in &self.roster {
            let source = Arc::clone(&self.weather);
            let user_id = user.id;
            let coordinates = user.location.coordinates;
            lookups.spawn(async move { (user_id, source.observe(coordinates).await) });
        }

        let mut failures = Vec::new();
        while let Some(joined) = lookups.join_next().await {
            let Ok((user_id, outcome)) = joined else {
                // A lookup task only goes missing if it panicked; there is
                // nothing to attach and nothing to report for it.
                continue;
            };

            match outcome {
                Ok(weather) => {
                    if let Some(user) = self.roster.iter_mut().find(|user| user.id == user_id) {
                        user.weather = Some(weather);
                    }
                }
                Err(source) => {
                    failures.push(LoadError::WeatherFetchFailed { user_id, source });
                }
            }
        }

        failures
    }

    fn report(&self, error: LoadError, failures: &mut Vec<LoadError>) {
        warn!(kind = error.kind(), "{error}");
        self.notify.failure(&error);
        failures.push(error);
    }
}
