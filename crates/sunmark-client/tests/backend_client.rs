//! Integration tests for `BackendClient` and the enrich/persist pipeline
//! using wiremock HTTP mocks.

use chrono::{TimeZone, Utc};
use sunmark_client::{pipeline, BackendClient, ClientError, FlowOutcome};
use sunmark_core::{Coordinate, SunTimes};
use wiremock::matchers::{body_json, body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn boston() -> Coordinate {
    Coordinate::new(42.355, -71.056).unwrap()
}

fn sun() -> SunTimes {
    SunTimes {
        sunrise: Utc.with_ymd_and_hms(2024, 6, 21, 9, 7, 30).unwrap(),
        sunset: Utc.with_ymd_and_hms(2024, 6, 22, 0, 25, 2).unwrap(),
    }
}

fn fenced_reply(tag: &str) -> serde_json::Value {
    let inner = serde_json::json!({
        "latitude": 42.355,
        "longitude": -71.056,
        "givenLocation": "Boston, Massachusetts",
        "foundLocation": "Rome, Italy",
        "sunrise": "5:36 AM",
        "sunset": "8:48 PM",
        "foundLocationLat": 41.9028,
        "foundLocationLong": 12.4964
    });
    serde_json::json!({
        "responseMessage": format!("```{tag}\n{inner}\n```")
    })
}

fn test_client(server: &MockServer) -> BackendClient {
    BackendClient::with_base_url(&server.uri()).expect("client construction should not fail")
}

#[tokio::test]
async fn generate_posts_request_text_and_parses_fenced_reply() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/generate"))
        .and(header("content-type", "application/json"))
        .and(body_json(serde_json::json!({
            "request": "latitude: 42.355,\nlongitude: -71.056,\nsunrise: 2024-06-21 09:07:30 UTC,\nsunset: 2024-06-22 00:25:02 UTC,"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(fenced_reply("json")))
        .expect(1)
        .mount(&server)
        .await;

    let record = test_client(&server)
        .generate(boston(), sun())
        .await
        .expect("should parse record");

    assert_eq!(record.latitude, 42.355);
    assert_eq!(record.longitude, -71.056);
    assert_eq!(record.given_location, "Boston, Massachusetts");
    assert_eq!(record.found_location, "Rome, Italy");
    assert_eq!(record.given_sunrise, "9:07:30 AM");
    assert_eq!(record.given_sunset, "12:25:02 AM");
    assert_eq!(record.found_sunrise, "5:36 AM");
    assert_eq!(record.found_sunset, "8:48 PM");
    assert_eq!(record.found_lat, 41.9028);
    assert_eq!(record.found_long, 12.4964);
}

#[tokio::test]
async fn generate_accepts_untagged_fence() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/generate"))
        .respond_with(ResponseTemplate::new(200).set_body_json(fenced_reply("")))
        .mount(&server)
        .await;

    let record = test_client(&server).generate(boston(), sun()).await.unwrap();
    assert_eq!(record.found_location, "Rome, Italy");
}

#[tokio::test]
async fn generate_server_error_is_network_class() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/generate"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let err = test_client(&server)
        .generate(boston(), sun())
        .await
        .unwrap_err();
    assert!(
        matches!(err, ClientError::UnexpectedStatus { status: 500, .. }),
        "expected UnexpectedStatus(500), got: {err:?}"
    );
    assert!(err.is_network());
}

#[tokio::test]
async fn generate_with_bad_envelope_is_parse_class() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/generate"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let err = test_client(&server)
        .generate(boston(), sun())
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::Deserialize { .. }), "got {err:?}");
    assert!(!err.is_network());
}

#[tokio::test]
async fn unreachable_backend_is_network_class() {
    // Nothing listens on port 9 (discard) in the test environment.
    let client = BackendClient::with_base_url("http://127.0.0.1:9").unwrap();
    let err = client.generate(boston(), sun()).await.unwrap_err();
    assert!(matches!(err, ClientError::Http(_)), "got {err:?}");
    assert!(err.is_network());
}

#[tokio::test]
async fn insert_data_posts_record_json() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/generate"))
        .respond_with(ResponseTemplate::new(200).set_body_json(fenced_reply("json")))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/insertData"))
        .and(body_json(serde_json::json!({
            "latitude": 42.355,
            "longitude": -71.056,
            "givenLocation": "Boston, Massachusetts",
            "foundLocation": "Rome, Italy",
            "givenSunrise": "9:07:30 AM",
            "givenSunset": "12:25:02 AM",
            "foundSunrise": "5:36 AM",
            "foundSunset": "8:48 PM",
            "foundLong": 12.4964,
            "foundLat": 41.9028
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({"ok": true})))
        .expect(1)
        .mount(&server)
        .await;

    let outcome = pipeline::run(&test_client(&server), boston(), sun()).await;
    assert!(
        matches!(outcome, FlowOutcome::Enriched { persisted: true, .. }),
        "got {outcome:?}"
    );
}

#[tokio::test]
async fn enrichment_500_skips_persistence() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/generate"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/insertData"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let outcome = pipeline::run(&test_client(&server), boston(), sun()).await;
    assert!(matches!(outcome, FlowOutcome::NetworkFailure(_)), "got {outcome:?}");
    server.verify().await;
}

#[tokio::test]
async fn malformed_fenced_json_skips_persistence() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/generate"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "responseMessage": "```json\n{\"latitude\": 42.355, \"longitude\": \n```"
        })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/insertData"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let outcome = pipeline::run(&test_client(&server), boston(), sun()).await;
    assert!(matches!(outcome, FlowOutcome::ParseFailure(_)), "got {outcome:?}");
    assert!(outcome.record().is_none());
    server.verify().await;
}

#[tokio::test]
async fn persistence_failure_keeps_record() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/generate"))
        .respond_with(ResponseTemplate::new(200).set_body_json(fenced_reply("json")))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/insertData"))
        .and(body_string_contains("Rome, Italy"))
        .respond_with(ResponseTemplate::new(503))
        .expect(1)
        .mount(&server)
        .await;

    let outcome = pipeline::run(&test_client(&server), boston(), sun()).await;
    match outcome {
        FlowOutcome::Enriched { record, persisted } => {
            assert!(!persisted);
            assert_eq!(record.found_location, "Rome, Italy");
        }
        other => panic!("expected Enriched, got {other:?}"),
    }
}
