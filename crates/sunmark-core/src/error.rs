use thiserror::Error;

/// Errors raised by the domain types and the sunrise/sunset computation.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum CoreError {
    /// Latitude/longitude outside the WGS84 range, or not finite.
    #[error("invalid coordinate ({latitude}, {longitude})")]
    InvalidCoordinate { latitude: f64, longitude: f64 },

    /// The solar position algorithm rejected its inputs.
    #[error("sun calculation failed: {0}")]
    SunCalculation(String),

    /// The sun stays above the horizon for the whole day.
    #[error("no sunset on {date}: polar day")]
    PolarDay { date: chrono::NaiveDate },

    /// The sun stays below the horizon for the whole day.
    #[error("no sunrise on {date}: polar night")]
    PolarNight { date: chrono::NaiveDate },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
