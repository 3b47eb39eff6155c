//! Click handling and marker display state.
//!
//! A [`MarkerSession`] owns the map, the single marker and the enrichment
//! record currently shown. Clicks are not debounced: overlapping calls to
//! [`MarkerSession::handle_click`] each run their own flow, and the record
//! on display is whichever enrichment resolved last.

use chrono::{DateTime, Utc};
use sunmark_core::{sun_times_now, Coordinate, EnrichmentRecord, MapView, SunTimes};
use tokio::sync::Mutex;

use crate::client::BackendClient;
use crate::location::LocationProvider;
use crate::pipeline::{self, FlowOutcome};
use crate::popup::render_popup;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowPhase {
    Idle,
    /// Marker placed; no enrichment started (sun never rises or sets there today).
    Located,
    Enriching,
    Enriched,
    EnrichmentFailed,
}

/// Everything the map surface renders.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayState {
    pub map: MapView,
    pub sun: Option<SunTimes>,
    pub record: Option<EnrichmentRecord>,
    pub phase: FlowPhase,
}

impl DisplayState {
    #[must_use]
    pub fn new(map: MapView) -> Self {
        Self {
            map,
            sun: None,
            record: None,
            phase: FlowPhase::Idle,
        }
    }

    #[must_use]
    pub fn marker(&self) -> Option<Coordinate> {
        self.map.marker()
    }
}

pub struct MarkerSession<P> {
    provider: P,
    client: BackendClient,
    state: Mutex<DisplayState>,
}

impl<P: LocationProvider> MarkerSession<P> {
    pub fn new(provider: P, client: BackendClient, map: MapView) -> Self {
        Self {
            provider,
            client,
            state: Mutex::new(DisplayState::new(map)),
        }
    }

    /// Copy of the current display state.
    pub async fn snapshot(&self) -> DisplayState {
        self.state.lock().await.clone()
    }

    /// Current popup text, if a marker is placed.
    pub async fn popup(&self) -> Option<String> {
        render_popup(&*self.state.lock().await)
    }

    /// Handles a map click using the current time.
    pub async fn handle_click(&self) -> FlowOutcome {
        self.handle_click_at(Utc::now()).await
    }

    /// Handles a map click, computing sun times for the UTC date of `now`.
    ///
    /// Locate, then place the marker and fly to it, then enrich and persist.
    /// The lock on the display state is released while requests are in flight.
    pub async fn handle_click_at(&self, now: DateTime<Utc>) -> FlowOutcome {
        let position = match self.provider.locate().await {
            Ok(position) => position,
            Err(e) => {
                tracing::warn!(error = %e, "location not found; click ignored");
                return FlowOutcome::LocationUnavailable(e);
            }
        };

        let sun = sun_times_now(position, now);
        {
            let mut state = self.state.lock().await;
            state.map.place_marker(position);
            state.map.fly_to(position);
            state.record = None;
            state.sun = sun.as_ref().ok().copied();
            state.phase = if sun.is_ok() {
                FlowPhase::Enriching
            } else {
                FlowPhase::Located
            };
        }

        let sun = match sun {
            Ok(sun) => sun,
            Err(e) => {
                tracing::info!(%position, error = %e, "no sunrise/sunset; skipping enrichment");
                return FlowOutcome::NoSunEvents(e);
            }
        };

        match pipeline::enrich(&self.client, position, sun).await {
            Ok(record) => {
                {
                    let mut state = self.state.lock().await;
                    state.record = Some(record.clone());
                    state.phase = FlowPhase::Enriched;
                }
                let persisted = pipeline::persist(&self.client, &record).await;
                FlowOutcome::Enriched { record, persisted }
            }
            Err(e) => {
                self.state.lock().await.phase = FlowPhase::EnrichmentFailed;
                FlowOutcome::from_enrichment_error(e)
            }
        }
    }
}
