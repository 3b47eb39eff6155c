//! Device location seam.
//!
//! A click resolves the *device* position through a [`LocationProvider`],
//! not the clicked point. Hosts plug in their platform geolocation; the
//! providers here cover fixed positions and scripted sequences.

use std::collections::VecDeque;
use std::future::Future;

use sunmark_core::Coordinate;
use tokio::sync::Mutex;

use crate::error::LocateError;

pub trait LocationProvider: Send + Sync {
    /// Resolves the current device position.
    fn locate(&self) -> impl Future<Output = Result<Coordinate, LocateError>> + Send;
}

/// Always reports the same position.
#[derive(Debug, Clone, Copy)]
pub struct FixedLocation(pub Coordinate);

impl LocationProvider for FixedLocation {
    async fn locate(&self) -> Result<Coordinate, LocateError> {
        Ok(self.0)
    }
}

/// A device without geolocation support.
#[derive(Debug, Clone, Default)]
pub struct NoLocation;

impl LocationProvider for NoLocation {
    async fn locate(&self) -> Result<Coordinate, LocateError> {
        Err(LocateError::Unavailable(
            "geolocation not supported".to_string(),
        ))
    }
}

/// Replays queued results in order, then reports the location as unavailable.
#[derive(Debug, Default)]
pub struct ScriptedLocations {
    queue: Mutex<VecDeque<Result<Coordinate, LocateError>>>,
}

impl ScriptedLocations {
    pub fn new(results: impl IntoIterator<Item = Result<Coordinate, LocateError>>) -> Self {
        Self {
            queue: Mutex::new(results.into_iter().collect()),
        }
    }

    /// Scripted provider yielding each coordinate once.
    pub fn from_coordinates(coords: impl IntoIterator<Item = Coordinate>) -> Self {
        Self::new(coords.into_iter().map(Ok))
    }
}

impl LocationProvider for ScriptedLocations {
    async fn locate(&self) -> Result<Coordinate, LocateError> {
        self.queue
            .lock()
            .await
            .pop_front()
            .unwrap_or_else(|| Err(LocateError::Unavailable("script exhausted".to_string())))
    }
}
