//! Two-stage enrichment pipeline: enrich, then persist.
//!
//! Failures never escape as errors. Each stage logs what went wrong and the
//! caller receives a [`FlowOutcome`] describing where the flow stopped.

use sunmark_core::{Coordinate, CoreError, EnrichmentRecord, SunTimes};

use crate::client::BackendClient;
use crate::error::{ClientError, LocateError};

/// How one click flow ended.
#[derive(Debug)]
pub enum FlowOutcome {
    /// Enrichment succeeded. `persisted` reports whether `/insertData` accepted it.
    Enriched {
        record: EnrichmentRecord,
        persisted: bool,
    },
    /// `/generate` was unreachable or answered non-2xx.
    NetworkFailure(ClientError),
    /// `/generate` answered with a payload that could not be parsed.
    ParseFailure(ClientError),
    /// The device position could not be resolved; nothing was shown or sent.
    LocationUnavailable(LocateError),
    /// The sun does not rise or set at the position today; nothing was sent.
    NoSunEvents(CoreError),
}

impl FlowOutcome {
    #[must_use]
    pub fn record(&self) -> Option<&EnrichmentRecord> {
        match self {
            Self::Enriched { record, .. } => Some(record),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_enriched(&self) -> bool {
        matches!(self, Self::Enriched { .. })
    }

    pub(crate) fn from_enrichment_error(err: ClientError) -> Self {
        if err.is_network() {
            Self::NetworkFailure(err)
        } else {
            Self::ParseFailure(err)
        }
    }
}

/// Stage one: ask the backend for a comparison record.
///
/// # Errors
///
/// Propagates the [`ClientError`] from [`BackendClient::generate`] after
/// logging it.
pub async fn enrich(
    client: &BackendClient,
    position: Coordinate,
    sun: SunTimes,
) -> Result<EnrichmentRecord, ClientError> {
    client.generate(position, sun).await.inspect_err(|e| {
        tracing::warn!(
            latitude = position.latitude,
            longitude = position.longitude,
            network = e.is_network(),
            error = %e,
            "error generating response"
        );
    })
}

/// Stage two: store the record. Failures are logged and reported as `false`.
pub async fn persist(client: &BackendClient, record: &EnrichmentRecord) -> bool {
    match client.insert_data(record).await {
        Ok(()) => {
            tracing::info!(
                found = %record.found_location,
                "enrichment record stored"
            );
            true
        }
        Err(e) => {
            tracing::warn!(error = %e, "error inserting data into database");
            false
        }
    }
}

/// Runs enrich then persist. Persistence is attempted only after a successful
/// enrichment.
///
/// This is the headless entry point. `MarkerSession` drives [`enrich`] and
/// [`persist`] separately so it can publish the record before persisting.
pub async fn run(client: &BackendClient, position: Coordinate, sun: SunTimes) -> FlowOutcome {
    match enrich(client, position, sun).await {
        Ok(record) => {
            let persisted = persist(client, &record).await;
            FlowOutcome::Enriched { record, persisted }
        }
        Err(e) => FlowOutcome::from_enrichment_error(e),
    }
}
