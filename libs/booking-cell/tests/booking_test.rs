use chrono::{TimeZone, Utc};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use booking_cell::BookingService;
use shared_utils::test_utils::{TestConfig, TestSession};

#[tokio::test]
async fn create_appointment_posts_provider_and_timestamp() {
    let mock_server = MockServer::start().await;
    let session = TestSession::default().to_session();
    let starts_at = Utc.with_ymd_and_hms(2024, 3, 10, 14, 0, 0).unwrap();

    Mock::given(method("POST"))
        .and(path("/appointments"))
        .and(header("Authorization", "Bearer test-bearer-token"))
        .and(body_json(json!({
            "provider_id": "prov-1",
            "date": "2024-03-10T14:00:00+00:00"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": "7f9c24e5-52f3-477c-9266-d2a4e2fe2b5a",
            "provider_id": "prov-1",
            "user_id": session.user.id,
            "date": "2024-03-10T14:00:00Z"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = TestConfig::with_base_url(&mock_server.uri()).to_app_config();
    let service = BookingService::new(&config);

    let appointment = service
        .create_appointment("prov-1", starts_at, &session)
        .await
        .expect("booking should succeed");

    assert_eq!(appointment.provider_id, "prov-1");
    assert_eq!(appointment.date, starts_at);
}

#[tokio::test]
async fn create_appointment_surfaces_rejection() {
    let mock_server = MockServer::start().await;
    let session = TestSession::default().to_session();
    let starts_at = Utc.with_ymd_and_hms(2024, 3, 10, 8, 0, 0).unwrap();

    Mock::given(method("POST"))
        .and(path("/appointments"))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(json!({"error": "slot already booked"})),
        )
        .mount(&mock_server)
        .await;

    let config = TestConfig::with_base_url(&mock_server.uri()).to_app_config();
    let service = BookingService::new(&config);

    let err = service
        .create_appointment("prov-1", starts_at, &session)
        .await
        .expect_err("booking should fail");

    assert!(err.to_string().contains("Bad Request"));
}
