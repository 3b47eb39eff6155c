use sunmark_core::{format_timestamp, Coordinate, EnrichmentRecord, SunTimes};

use super::BackendClient;
use crate::error::ClientError;
use crate::fence::parse_comparison;
use crate::types::{GenerateRequest, GenerateResponse};

/// Free-text prompt sent as the `request` field of `/generate`.
#[must_use]
pub fn build_request_text(position: Coordinate, sun: SunTimes) -> String {
    format!(
        "latitude: {},\nlongitude: {},\nsunrise: {},\nsunset: {},",
        position.latitude,
        position.longitude,
        format_timestamp(sun.sunrise),
        format_timestamp(sun.sunset),
    )
}

impl BackendClient {
    /// Asks the enrichment backend for a comparable location.
    ///
    /// # Errors
    ///
    /// - [`ClientError::Http`] / [`ClientError::UnexpectedStatus`] when the
    ///   request fails or the backend answers non-2xx.
    /// - [`ClientError::Deserialize`] when the envelope or the fenced JSON in
    ///   `responseMessage` is malformed.
    pub async fn generate(
        &self,
        position: Coordinate,
        sun: SunTimes,
    ) -> Result<EnrichmentRecord, ClientError> {
        let text = build_request_text(position, sun);
        let response = self
            .post_json(&self.generate_url, &GenerateRequest { request: &text })
            .await?;
        let body = response.text().await?;

        let envelope: GenerateResponse =
            serde_json::from_str(&body).map_err(|e| ClientError::Deserialize {
                context: self.generate_url.to_string(),
                source: e,
            })?;

        let comparison = parse_comparison(&envelope.response_message)?;
        tracing::debug!(
            given = %comparison.given_location,
            found = %comparison.found_location,
            "enrichment parsed"
        );
        Ok(comparison.into_record(sun))
    }
}
