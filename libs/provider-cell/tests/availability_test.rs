use chrono::NaiveDate;
use serde_json::json;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use provider_cell::{DayAvailabilityService, HourSlot};
use shared_utils::test_utils::{TestConfig, TestSession};

#[tokio::test]
async fn day_availability_sends_calendar_components_as_query() {
    let mock_server = MockServer::start().await;
    let session = TestSession::default().to_session();

    Mock::given(method("GET"))
        .and(path("/providers/prov-1/day-availability"))
        .and(query_param("year", "2024"))
        .and(query_param("month", "3"))
        .and(query_param("day", "10"))
        .and(header("Authorization", "Bearer test-bearer-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "hour": 8, "available": false },
            { "hour": 9, "available": true },
            { "hour": 14, "available": true }
        ])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = TestConfig::with_base_url(&mock_server.uri()).to_app_config();
    let service = DayAvailabilityService::new(&config);
    let date = NaiveDate::from_ymd_opt(2024, 3, 10).unwrap();

    let slots = service
        .day_availability("prov-1", date, &session)
        .await
        .expect("availability fetch should succeed");

    assert_eq!(
        slots,
        vec![
            HourSlot {
                hour: 8,
                available: false
            },
            HourSlot {
                hour: 9,
                available: true
            },
            HourSlot {
                hour: 14,
                available: true
            },
        ]
    );
}

#[tokio::test]
async fn day_availability_surfaces_not_found() {
    let mock_server = MockServer::start().await;
    let session = TestSession::default().to_session();

    Mock::given(method("GET"))
        .and(path("/providers/unknown/day-availability"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"error": "no such provider"})))
        .mount(&mock_server)
        .await;

    let config = TestConfig::with_base_url(&mock_server.uri()).to_app_config();
    let service = DayAvailabilityService::new(&config);
    let date = NaiveDate::from_ymd_opt(2024, 3, 10).unwrap();

    let err = service
        .day_availability("unknown", date, &session)
        .await
        .expect_err("availability fetch should fail");

    assert!(err.to_string().contains("Not Found"));
}
