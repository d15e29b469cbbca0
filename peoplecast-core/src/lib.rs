//! Core library for the `peoplecast` CLI.
//!
//! This crate defines:
//! - Configuration handling
//! - Clients for the user and weather services
//! - The loader that joins both into one working set of users
//!
//! It is used by `peoplecast-cli`, but can also be reused by other binaries or services.

pub mod conditions;
pub mod config;
pub mod error;
pub mod loader;
pub mod model;
pub mod source;

pub use conditions::{Condition, classify};
pub use config::{Config, Endpoints};
pub use error::{FetchError, LoadError, WeatherError};
pub use loader::{Notify, SilentNotify, UserLoader};
pub use model::{Coordinates, Location, Picture, User, Weather};
pub use source::{OpenMeteoSource, RandomUserSource, UserSource, WeatherSource};
