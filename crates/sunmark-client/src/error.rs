use thiserror::Error;

/// Errors from the enrichment and persistence backend.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    /// The reply envelope or the JSON embedded in it could not be parsed.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid base URL \"{base_url}\": {reason}")]
    InvalidBaseUrl { base_url: String, reason: String },
}

impl ClientError {
    /// `true` for transport failures and non-2xx replies, `false` for
    /// malformed payloads and configuration mistakes.
    #[must_use]
    pub fn is_network(&self) -> bool {
        matches!(self, Self::Http(_) | Self::UnexpectedStatus { .. })
    }
}

/// The location provider could not produce a position.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LocateError {
    #[error("location unavailable: {0}")]
    Unavailable(String),

    #[error("location permission denied")]
    PermissionDenied,
}
