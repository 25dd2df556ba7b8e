//! Core library for the `weather-lookup` CLI.
//!
//! This crate defines:
//! - The weather record model returned by the record service
//! - Configuration of the service base URL
//! - Abstraction over record sources, with an HTTP implementation
//! - The lookup form state and its plain-text rendering
//!
//! It is used by `weather-lookup`, but can also be reused by other front ends.

pub mod config;
pub mod error;
pub mod lookup;
pub mod model;
pub mod render;
pub mod source;

pub use config::Config;
pub use error::LookupError;
pub use lookup::{LookupForm, Outcome, PendingLookup};
pub use model::{WeatherInfo, WeatherRecord};
pub use source::{HttpRecordSource, RecordSource};
