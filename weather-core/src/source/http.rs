use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url, header::CONTENT_TYPE};
use serde::Deserialize;

use crate::{LookupError, WeatherRecord};

use super::RecordSource;

/// Reads records from `GET <base>/weather/{identifier}`.
#[derive(Debug, Clone)]
pub struct HttpRecordSource {
    base_url: Url,
    http: Client,
}

impl HttpRecordSource {
    pub fn new(base_url: Url) -> Self {
        Self::with_client(base_url, Client::new())
    }

    pub fn with_client(base_url: Url, http: Client) -> Self {
        Self { base_url, http }
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// URL of the record stored under `identifier`.
    pub fn record_url(&self, identifier: &str) -> Result<Url, LookupError> {
        record_url(&self.base_url, identifier)
    }
}

/// Append `weather/{identifier}` to `base`, keeping any path prefix it already has.
///
/// The identifier becomes exactly one path segment; reserved characters are
/// percent-encoded.
pub fn record_url(base: &Url, identifier: &str) -> Result<Url, LookupError> {
    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|()| LookupError::InvalidUrl(format!("base URL '{base}' cannot carry a path")))?
        .pop_if_empty()
        .push("weather")
        .push(identifier);

    Ok(url)
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    detail: Option<String>,
}

/// Turn a status and raw body into a record or a lookup error.
pub(crate) fn interpret_response(status: StatusCode, body: &str) -> Result<WeatherRecord, LookupError> {
    if status.is_success() {
        return Ok(serde_json::from_str(body)?);
    }

    let detail = serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.detail)
        .filter(|d| !d.is_empty());

    Err(LookupError::Rejected { status: status.as_u16(), detail })
}

#[async_trait]
impl RecordSource for HttpRecordSource {
    async fn fetch(&self, identifier: &str) -> Result<WeatherRecord, LookupError> {
        let url = self.record_url(identifier)?;

        tracing::debug!(url = %url, "requesting weather record");

        let res = self
            .http
            .get(url.clone())
            .header(CONTENT_TYPE, "application/json")
            .send()
            .await
            .inspect_err(|err| tracing::warn!(url = %url, error = %err, "weather service unreachable"))?;

        let status = res.status();
        let body = res.text().await?;

        match interpret_response(status, &body) {
            Ok(record) => {
                tracing::info!(identifier, status = status.as_u16(), "weather record found");
                Ok(record)
            }
            Err(err) => {
                tracing::warn!(identifier, status = status.as_u16(), error = %err, "weather lookup failed");
                Err(err)
            }
        }
    }
}
