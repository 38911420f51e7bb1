//! Error type for ClickUp API calls, kept typed so the retry layer can classify it.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    /// Curl reported an error (timeout, connection, etc.).
    #[error("transport error: {0}")]
    Transport(#[from] curl::Error),
    /// Response had a status other than 200.
    #[error("request to {url} returned status code {code}")]
    Status { code: u32, url: String, body: String },
    #[error("could not decode response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid url {url:?}")]
    InvalidUrl { url: String },
    /// The abort token was set while the request was pending.
    #[error("aborted by user")]
    Aborted,
}

impl ApiError {
    pub fn status_code(&self) -> Option<u32> {
        match self {
            ApiError::Status { code, .. } => Some(*code),
            _ => None,
        }
    }

    /// ClickUp internal error; callers skip the item instead of failing the run.
    pub fn is_server_error(&self) -> bool {
        self.status_code() == Some(500)
    }
}
