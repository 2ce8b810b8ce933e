use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use auth_cell::models::Credentials;
use auth_cell::SessionService;
use shared_utils::test_utils::TestConfig;
use shared_utils::validation::ValidationFailure;

#[tokio::test]
async fn sign_in_returns_session_on_success() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/sessions"))
        .and(body_json(json!({
            "email": "user@example.com",
            "password": "123456"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "user": {
                "id": "user-1",
                "name": "User One",
                "email": "user@example.com",
                "avatar_url": "https://cdn.example.com/u1.png",
                "created_at": "2024-03-01T10:00:00Z"
            },
            "token": "jwt-token"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = TestConfig::with_base_url(&mock_server.uri()).to_app_config();
    let service = SessionService::new(&config);

    let session = service
        .sign_in(&Credentials::new("user@example.com", "123456"))
        .await
        .expect("sign in should succeed");

    assert_eq!(session.user.id, "user-1");
    assert_eq!(session.token, "jwt-token");
}

#[tokio::test]
async fn sign_in_propagates_authentication_failure() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/sessions"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({"error": "invalid credentials"})),
        )
        .mount(&mock_server)
        .await;

    let config = TestConfig::with_base_url(&mock_server.uri()).to_app_config();
    let service = SessionService::new(&config);

    let err = service
        .sign_in(&Credentials::new("user@example.com", "wrong"))
        .await
        .expect_err("sign in should fail");

    assert!(err.to_string().contains("Authentication error"));
}

#[tokio::test]
async fn sign_in_rejects_invalid_form_without_network_call() {
    // No mocks mounted: a request would fail loudly if one were issued.
    let mock_server = MockServer::start().await;

    let config = TestConfig::with_base_url(&mock_server.uri()).to_app_config();
    let service = SessionService::new(&config);

    let err = service
        .sign_in(&Credentials::new("", ""))
        .await
        .expect_err("validation should fail");

    let failure = err
        .downcast_ref::<ValidationFailure>()
        .expect("error should be a validation failure");
    let messages = failure.field_messages();
    assert_eq!(messages["email"], "E-mail is required");
    assert_eq!(messages["password"], "Password is required");

    assert!(mock_server.received_requests().await.unwrap().is_empty());
}
