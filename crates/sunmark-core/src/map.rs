//! Map viewport state and raster tile addressing.
//!
//! The viewport hosts at most one marker. Tiles follow the Web-Mercator
//! slippy-map scheme (`{z}/{x}/{y}`) used by OpenStreetMap-compatible servers.

use std::f64::consts::PI;

use crate::types::Coordinate;

pub const DEFAULT_TILE_URL: &str = "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png";
pub const DEFAULT_TILE_ATTRIBUTION: &str = "© OpenStreetMap contributors";

/// Highest zoom level served by the default tile provider.
pub const MAX_ZOOM: u8 = 19;

/// Web-Mercator cannot represent the poles; tiles stop at this latitude.
const MAX_MERCATOR_LATITUDE: f64 = 85.051_128_78;

const SUBDOMAINS: [&str; 3] = ["a", "b", "c"];

/// A raster tile template plus the attribution its terms require.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileSource {
    pub url_template: String,
    pub attribution: String,
}

impl Default for TileSource {
    fn default() -> Self {
        Self {
            url_template: DEFAULT_TILE_URL.to_string(),
            attribution: DEFAULT_TILE_ATTRIBUTION.to_string(),
        }
    }
}

impl TileSource {
    /// Fills the `{s}`, `{z}`, `{x}` and `{y}` placeholders for one tile.
    ///
    /// The subdomain rotates over `a`/`b`/`c` by `(x + y) % 3`.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn tile_url(&self, tile: TileIndex) -> String {
        let subdomain = SUBDOMAINS[((u64::from(tile.x) + u64::from(tile.y)) % 3) as usize];
        self.url_template
            .replace("{s}", subdomain)
            .replace("{z}", &tile.zoom.to_string())
            .replace("{x}", &tile.x.to_string())
            .replace("{y}", &tile.y.to_string())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileIndex {
    pub zoom: u8,
    pub x: u32,
    pub y: u32,
}

/// Returns the tile covering `coord` at `zoom` (clamped to [`MAX_ZOOM`]).
#[must_use]
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
pub fn tile_for(coord: Coordinate, zoom: u8) -> TileIndex {
    let zoom = zoom.min(MAX_ZOOM);
    let n = 1u32 << zoom;
    let max_index = f64::from(n - 1);

    let lat = coord
        .latitude
        .clamp(-MAX_MERCATOR_LATITUDE, MAX_MERCATOR_LATITUDE)
        .to_radians();
    let x = (coord.longitude + 180.0) / 360.0 * f64::from(n);
    let y = (1.0 - (lat.tan() + 1.0 / lat.cos()).ln() / PI) / 2.0 * f64::from(n);

    TileIndex {
        zoom,
        x: x.floor().clamp(0.0, max_index) as u32,
        y: y.floor().clamp(0.0, max_index) as u32,
    }
}

/// The map surface: tile source, viewport and the single marker.
#[derive(Debug, Clone, PartialEq)]
pub struct MapView {
    tiles: TileSource,
    center: Coordinate,
    zoom: u8,
    marker: Option<Coordinate>,
}

impl MapView {
    #[must_use]
    pub fn new(tiles: TileSource, center: Coordinate, zoom: u8) -> Self {
        Self {
            tiles,
            center,
            zoom: zoom.min(MAX_ZOOM),
            marker: None,
        }
    }

    #[must_use]
    pub fn center(&self) -> Coordinate {
        self.center
    }

    #[must_use]
    pub fn zoom(&self) -> u8 {
        self.zoom
    }

    #[must_use]
    pub fn marker(&self) -> Option<Coordinate> {
        self.marker
    }

    #[must_use]
    pub fn tiles(&self) -> &TileSource {
        &self.tiles
    }

    /// Places the marker, replacing any previous one.
    pub fn place_marker(&mut self, position: Coordinate) {
        self.marker = Some(position);
    }

    /// Moves the viewport center to `position` at the current zoom.
    pub fn fly_to(&mut self, position: Coordinate) {
        self.center = position;
    }

    pub fn set_zoom(&mut self, zoom: u8) {
        self.zoom = zoom.min(MAX_ZOOM);
    }

    /// URL of the tile under the viewport center.
    #[must_use]
    pub fn center_tile_url(&self) -> String {
        self.tiles.tile_url(tile_for(self.center, self.zoom))
    }
}
