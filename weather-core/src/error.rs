use thiserror::Error;

/// Shown when the service rejects a lookup without saying why.
pub const FETCH_FAILED_MESSAGE: &str = "Failed to fetch weather data";

/// Shown when no usable response arrived at all.
pub const NETWORK_ERROR_MESSAGE: &str = "Network error: Could not connect to the server";

/// Why a single lookup attempt failed.
#[derive(Debug, Error)]
pub enum LookupError {
    /// The service answered with a non-success status.
    #[error("weather service rejected the lookup with status {status}")]
    Rejected { status: u16, detail: Option<String> },

    #[error("request to weather service failed")]
    Transport(#[from] reqwest::Error),

    #[error("weather service returned a malformed record")]
    Decode(#[from] serde_json::Error),

    #[error("cannot build record URL: {0}")]
    InvalidUrl(String),
}

impl LookupError {
    /// Message for the error panel.
    ///
    /// A server-supplied detail is shown verbatim. Transport and decode
    /// failures all collapse into the same generic notice.
    pub fn user_message(&self) -> String {
        match self {
            LookupError::Rejected { detail: Some(detail), .. } => detail.clone(),
            LookupError::Rejected { detail: None, .. } => FETCH_FAILED_MESSAGE.to_string(),
            LookupError::Transport(_) | LookupError::Decode(_) | LookupError::InvalidUrl(_) => {
                NETWORK_ERROR_MESSAGE.to_string()
            }
        }
    }
}
