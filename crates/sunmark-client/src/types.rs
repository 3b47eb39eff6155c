//! Wire types for the enrichment backend.

use serde::{Deserialize, Serialize};
use sunmark_core::types::lenient_f64;
use sunmark_core::{format_time_of_day, EnrichmentRecord, SunTimes};

/// Body of `POST /generate`.
#[derive(Debug, Serialize)]
pub struct GenerateRequest<'a> {
    pub request: &'a str,
}

/// Envelope returned by `POST /generate`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateResponse {
    /// Model output: a JSON object, usually wrapped in a markdown code fence.
    pub response_message: String,
}

/// The JSON object embedded in [`GenerateResponse::response_message`].
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedComparison {
    #[serde(deserialize_with = "lenient_f64")]
    pub latitude: f64,
    #[serde(deserialize_with = "lenient_f64")]
    pub longitude: f64,
    pub given_location: String,
    pub found_location: String,
    pub sunrise: String,
    pub sunset: String,
    #[serde(deserialize_with = "lenient_f64")]
    pub found_location_lat: f64,
    #[serde(deserialize_with = "lenient_f64")]
    pub found_location_long: f64,
}

impl GeneratedComparison {
    /// Combines the generated comparison with the locally computed times.
    #[must_use]
    pub fn into_record(self, given: SunTimes) -> EnrichmentRecord {
        EnrichmentRecord {
            latitude: self.latitude,
            longitude: self.longitude,
            given_location: self.given_location,
            found_location: self.found_location,
            given_sunrise: format_time_of_day(given.sunrise),
            given_sunset: format_time_of_day(given.sunset),
            found_sunrise: self.sunrise,
            found_sunset: self.sunset,
            found_long: self.found_location_long,
            found_lat: self.found_location_lat,
        }
    }
}
