use crate::{LookupError, WeatherRecord};
use async_trait::async_trait;
use std::fmt::Debug;

pub mod http;

pub use http::HttpRecordSource;

/// Anything that can resolve an identifier to a stored weather record.
#[async_trait]
pub trait RecordSource: Send + Sync + Debug {
    /// Fetch the record stored under `identifier`. The caller trims it first.
    async fn fetch(&self, identifier: &str) -> Result<WeatherRecord, LookupError>;
}
