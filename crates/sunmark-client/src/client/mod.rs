//! HTTP client for the enrichment (`/generate`) and persistence
//! (`/insertData`) backend.

mod generate;
mod insert;

use std::time::Duration;

use reqwest::{Client, Url};
use serde::Serialize;

use crate::error::ClientError;

pub use generate::build_request_text;

const GENERATE_PATH: &str = "generate";
const INSERT_PATH: &str = "insertData";

/// Client for the enrichment and persistence backend.
///
/// Use [`BackendClient::new`] with the values from `AppConfig`, or
/// [`BackendClient::with_base_url`] to point at a mock server in tests.
#[derive(Debug, Clone)]
pub struct BackendClient {
    client: Client,
    generate_url: Url,
    insert_url: Url,
}

impl BackendClient {
    /// Creates a client for `base_url`.
    ///
    /// `timeout_secs = None` leaves requests without a deadline.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`ClientError::InvalidBaseUrl`] if
    /// `base_url` is not an absolute http(s) URL.
    pub fn new(
        base_url: &str,
        timeout_secs: Option<u64>,
        user_agent: &str,
    ) -> Result<Self, ClientError> {
        let mut builder = Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent);
        if let Some(secs) = timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder.build()?;

        // Normalise to exactly one trailing slash so `join` appends the
        // endpoint instead of replacing the last path segment.
        let normalised = format!("{}/", base_url.trim().trim_end_matches('/'));
        let base = Url::parse(&normalised).map_err(|e| ClientError::InvalidBaseUrl {
            base_url: base_url.to_string(),
            reason: e.to_string(),
        })?;
        if !matches!(base.scheme(), "http" | "https") {
            return Err(ClientError::InvalidBaseUrl {
                base_url: base_url.to_string(),
                reason: format!("unsupported scheme \"{}\"", base.scheme()),
            });
        }

        let join = |path: &str| {
            base.join(path).map_err(|e| ClientError::InvalidBaseUrl {
                base_url: base_url.to_string(),
                reason: e.to_string(),
            })
        };

        Ok(Self {
            generate_url: join(GENERATE_PATH)?,
            insert_url: join(INSERT_PATH)?,
            client,
        })
    }

    /// Creates a client with the default user agent and no timeout.
    ///
    /// # Errors
    ///
    /// Same as [`BackendClient::new`].
    pub fn with_base_url(base_url: &str) -> Result<Self, ClientError> {
        Self::new(base_url, None, "sunmark/0.1 (sunrise-compare)")
    }

    #[must_use]
    pub fn generate_url(&self) -> &Url {
        &self.generate_url
    }

    #[must_use]
    pub fn insert_url(&self) -> &Url {
        &self.insert_url
    }

    /// POSTs `body` as JSON and asserts a 2xx status.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Http`] on network failure and
    /// [`ClientError::UnexpectedStatus`] on a non-2xx status.
    async fn post_json<B: Serialize + ?Sized>(
        &self,
        url: &Url,
        body: &B,
    ) -> Result<reqwest::Response, ClientError> {
        let response = self.client.post(url.clone()).json(body).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }
        Ok(response)
    }
}

#[cfg(test)]
#[path = "../client_test.rs"]
mod tests;
