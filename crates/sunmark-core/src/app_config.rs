use crate::map::{MapView, TileSource};
use crate::types::Coordinate;

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// Base URL hosting `/generate` and `/insertData`.
    pub backend_url: String,
    pub log_level: String,
    /// `None` leaves backend requests without a deadline.
    pub request_timeout_secs: Option<u64>,
    pub user_agent: String,
    pub tile_url: String,
    pub tile_attribution: String,
    pub map_center: Coordinate,
    pub map_zoom: u8,
}

impl AppConfig {
    #[must_use]
    pub fn tile_source(&self) -> TileSource {
        TileSource {
            url_template: self.tile_url.clone(),
            attribution: self.tile_attribution.clone(),
        }
    }

    /// Initial map viewport: configured center and zoom, no marker.
    #[must_use]
    pub fn map_view(&self) -> MapView {
        MapView::new(self.tile_source(), self.map_center, self.map_zoom)
    }
}
