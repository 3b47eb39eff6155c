//! Extraction of JSON from markdown-fenced model output.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::ClientError;
use crate::types::GeneratedComparison;

/// A triple-backtick fence with an optional info string such as `json`.
static FENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"```[A-Za-z0-9_+.-]*").expect("valid fence regex"));

/// Removes every code fence marker (with or without a language tag) and trims.
///
/// Text without fences is returned trimmed and otherwise unchanged.
#[must_use]
pub fn strip_fences(message: &str) -> String {
    FENCE.replace_all(message, "").trim().to_string()
}

/// Parses the comparison object embedded in a `responseMessage`.
///
/// # Errors
///
/// Returns [`ClientError::Deserialize`] when the unfenced text is not a JSON
/// object with the expected fields.
pub fn parse_comparison(message: &str) -> Result<GeneratedComparison, ClientError> {
    let unfenced = strip_fences(message);
    serde_json::from_str(&unfenced).map_err(|e| ClientError::Deserialize {
        context: "generate responseMessage".to_string(),
        source: e,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const INNER: &str = r#"{"latitude":1,"longitude":2,"givenLocation":"Gulf of Guinea","foundLocation":"Singapore","sunrise":"6:01 AM","sunset":"6:09 PM","foundLocationLat":1.29,"foundLocationLong":103.85}"#;

    fn expected() -> GeneratedComparison {
        GeneratedComparison {
            latitude: 1.0,
            longitude: 2.0,
            given_location: "Gulf of Guinea".to_string(),
            found_location: "Singapore".to_string(),
            sunrise: "6:01 AM".to_string(),
            sunset: "6:09 PM".to_string(),
            found_location_lat: 1.29,
            found_location_long: 103.85,
        }
    }

    #[test]
    fn strips_json_tagged_fence() {
        let message = format!("```json\n{INNER}\n```");
        assert_eq!(strip_fences(&message), INNER);
    }

    #[test]
    fn strips_untagged_fence() {
        let message = format!("```\n{INNER}\n```\n");
        assert_eq!(strip_fences(&message), INNER);
    }

    #[test]
    fn strips_other_language_tag() {
        let message = format!("```javascript\n{INNER}\n```");
        assert_eq!(strip_fences(&message), INNER);
    }

    #[test]
    fn leaves_unfenced_text_alone() {
        assert_eq!(strip_fences(&format!("  {INNER}\n")), INNER);
    }

    #[test]
    fn parses_fenced_object() {
        let message = format!("```json\n{INNER}\n```");
        assert_eq!(parse_comparison(&message).unwrap(), expected());
    }

    #[test]
    fn parses_unfenced_object() {
        assert_eq!(parse_comparison(INNER).unwrap(), expected());
    }

    #[test]
    fn malformed_inner_json_is_deserialize_error() {
        let err = parse_comparison("```json\n{\"latitude\": 1, \"longitude\": \n```").unwrap_err();
        assert!(matches!(err, ClientError::Deserialize { .. }), "got {err:?}");
        assert!(!err.is_network());
    }

    #[test]
    fn missing_field_is_deserialize_error() {
        let err = parse_comparison(r#"```json
{"latitude": 1, "longitude": 2}
```"#)
        .unwrap_err();
        assert!(matches!(err, ClientError::Deserialize { .. }));
    }

    #[test]
    fn non_finite_coordinates_are_deserialize_error() {
        let message = INNER
            .replace("\"latitude\":1", "\"latitude\":\"NaN\"")
            .replace("\"foundLocationLat\":1.29", "\"foundLocationLat\":\"inf\"");
        assert!(message.contains("\"NaN\"") && message.contains("\"inf\""));
        let err = parse_comparison(&format!("```json\n{message}\n```")).unwrap_err();
        assert!(matches!(err, ClientError::Deserialize { .. }), "got {err:?}");
    }

    #[test]
    fn prose_reply_is_deserialize_error() {
        let err = parse_comparison("Sorry, I can't help with that.").unwrap_err();
        assert!(matches!(err, ClientError::Deserialize { .. }));
    }
}
