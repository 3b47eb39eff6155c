//! Marker popup text.

use sunmark_core::format_timestamp;

use crate::session::DisplayState;

const NO_RECORD_HEADING: &str = "Ye Found Yer Booty!";

/// Renders the popup attached to the marker, or `None` when no marker is placed.
///
/// With an enrichment record the popup compares the given and found
/// locations; otherwise it lists the raw sunrise and sunset.
#[must_use]
pub fn render_popup(state: &DisplayState) -> Option<String> {
    state.map.marker()?;

    if let Some(record) = &state.record {
        return Some(format!(
            "{}\nRise: {} | Set: {}\n\nSimilar Location:\n{}",
            record.given_location, record.given_sunrise, record.given_sunset, record.found_location
        ));
    }

    let (sunrise, sunset) = state.sun.map_or_else(
        || (String::new(), String::new()),
        |sun| (format_timestamp(sun.sunrise), format_timestamp(sun.sunset)),
    );
    Some(format!(
        "{NO_RECORD_HEADING}\nSunrise {sunrise}\nSunset {sunset}"
    ))
}
