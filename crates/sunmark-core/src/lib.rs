//! Domain model for sunmark: coordinates, sunrise/sunset computation, the map
//! viewport and environment-driven configuration.

pub mod app_config;
pub mod config;
pub mod error;
pub mod map;
pub mod solar;
pub mod types;

pub use app_config::AppConfig;
pub use config::{load_app_config, load_app_config_from_env};
pub use error::{ConfigError, CoreError};
pub use map::{tile_for, MapView, TileIndex, TileSource};
pub use solar::{format_time_of_day, format_timestamp, sun_times, sun_times_now};
pub use types::{Coordinate, EnrichmentRecord, SunTimes};
