use crate::app_config::AppConfig;
use crate::map::{DEFAULT_TILE_ATTRIBUTION, DEFAULT_TILE_URL, MAX_ZOOM};
use crate::types::Coordinate;
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let backend_url = or_default("SUNMARK_BACKEND_URL", "http://localhost:5000");
    if backend_url.trim().is_empty() {
        return Err(invalid("SUNMARK_BACKEND_URL", "must not be empty".to_string()));
    }

    let log_level = or_default("SUNMARK_LOG_LEVEL", "info");

    let request_timeout_secs = match lookup("SUNMARK_REQUEST_TIMEOUT_SECS") {
        Ok(raw) => Some(
            raw.parse::<u64>()
                .map_err(|e| invalid("SUNMARK_REQUEST_TIMEOUT_SECS", e.to_string()))?,
        ),
        Err(_) => None,
    };

    let user_agent = or_default("SUNMARK_USER_AGENT", "sunmark/0.1 (sunrise-compare)");
    let tile_url = or_default("SUNMARK_TILE_URL", DEFAULT_TILE_URL);
    let tile_attribution = or_default("SUNMARK_TILE_ATTRIBUTION", DEFAULT_TILE_ATTRIBUTION);

    let map_center = parse_center(&or_default("SUNMARK_MAP_CENTER", "42.355,-71.056"))
        .map_err(|reason| invalid("SUNMARK_MAP_CENTER", reason))?;

    let map_zoom = or_default("SUNMARK_MAP_ZOOM", "13")
        .parse::<u8>()
        .map_err(|e| invalid("SUNMARK_MAP_ZOOM", e.to_string()))?;
    if map_zoom > MAX_ZOOM {
        return Err(invalid(
            "SUNMARK_MAP_ZOOM",
            format!("must be at most {MAX_ZOOM}"),
        ));
    }

    Ok(AppConfig {
        backend_url,
        log_level,
        request_timeout_secs,
        user_agent,
        tile_url,
        tile_attribution,
        map_center,
        map_zoom,
    })
}

/// Parse `"lat,lon"` into a validated coordinate.
fn parse_center(raw: &str) -> Result<Coordinate, String> {
    let (lat, lon) = raw
        .split_once(',')
        .ok_or_else(|| format!("expected \"lat,lon\", got \"{raw}\""))?;
    let lat = lat
        .trim()
        .parse::<f64>()
        .map_err(|e| format!("latitude: {e}"))?;
    let lon = lon
        .trim()
        .parse::<f64>()
        .map_err(|e| format!("longitude: {e}"))?;
    Coordinate::new(lat, lon).map_err(|e| e.to_string())
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
