//! Enrichment flow for sunmark.
//!
//! Resolves the device position, asks the backend (`/generate`) for a
//! comparable location with similar sunrise/sunset, stores the result
//! (`/insertData`) and keeps the marker popup state.

pub mod client;
pub mod error;
pub mod fence;
pub mod location;
pub mod pipeline;
pub mod popup;
pub mod session;
pub mod types;

pub use client::BackendClient;
pub use error::{ClientError, LocateError};
pub use location::{FixedLocation, LocationProvider, NoLocation, ScriptedLocations};
pub use pipeline::FlowOutcome;
pub use popup::render_popup;
pub use session::{DisplayState, FlowPhase, MarkerSession};
