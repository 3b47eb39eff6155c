//! Domain types shared by the client and the CLI.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::CoreError;

/// A WGS84 position in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    /// Creates a coordinate after range-checking both axes.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidCoordinate`] if either value is not finite,
    /// latitude is outside `[-90, 90]` or longitude is outside `[-180, 180]`.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, CoreError> {
        let valid = latitude.is_finite()
            && longitude.is_finite()
            && (-90.0..=90.0).contains(&latitude)
            && (-180.0..=180.0).contains(&longitude);
        if !valid {
            return Err(CoreError::InvalidCoordinate {
                latitude,
                longitude,
            });
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }
}

impl std::fmt::Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.5}, {:.5}", self.latitude, self.longitude)
    }
}

/// Sunrise and sunset for one coordinate on one calendar date (UTC).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SunTimes {
    pub sunrise: DateTime<Utc>,
    pub sunset: DateTime<Utc>,
}

/// Result of the enrichment backend, as shown in the popup and persisted.
///
/// Field names on the wire are exactly the camelCase keys the persistence
/// endpoint stores.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrichmentRecord {
    #[serde(deserialize_with = "lenient_f64")]
    pub latitude: f64,
    #[serde(deserialize_with = "lenient_f64")]
    pub longitude: f64,
    pub given_location: String,
    pub found_location: String,
    pub given_sunrise: String,
    pub given_sunset: String,
    pub found_sunrise: String,
    pub found_sunset: String,
    #[serde(deserialize_with = "lenient_f64")]
    pub found_long: f64,
    #[serde(deserialize_with = "lenient_f64")]
    pub found_lat: f64,
}

/// Accepts a JSON number or a string holding one.
///
/// Generated payloads are not consistent about quoting coordinates.
///
/// # Errors
///
/// Fails when the value is neither a number nor a numeric string, or when
/// it is not finite.
pub fn lenient_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum NumberOrString {
        Number(f64),
        String(String),
    }

    let value = match NumberOrString::deserialize(deserializer)? {
        NumberOrString::Number(n) => n,
        NumberOrString::String(s) => s
            .trim()
            .parse::<f64>()
            .map_err(|e| serde::de::Error::custom(format!("invalid number \"{s}\": {e}")))?,
    };
    // JSON has no representation for NaN or infinity.
    if !value.is_finite() {
        return Err(serde::de::Error::custom(format!(
            "number must be finite, got {value}"
        )));
    }
    Ok(value)
}
