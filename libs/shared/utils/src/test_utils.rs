use uuid::Uuid;

use shared_config::AppConfig;
use shared_models::auth::{Session, User};

pub struct TestConfig {
    pub api_base_url: String,
    pub debounce_ms: u64,
    pub request_timeout_secs: u64,
}

impl Default for TestConfig {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:3333".to_string(),
            debounce_ms: 1000,
            request_timeout_secs: 5,
        }
    }
}

impl TestConfig {
    pub fn with_base_url(base_url: &str) -> Self {
        Self {
            api_base_url: base_url.to_string(),
            ..Self::default()
        }
    }

    pub fn to_app_config(&self) -> AppConfig {
        AppConfig {
            api_base_url: self.api_base_url.clone(),
            debounce_ms: self.debounce_ms,
            request_timeout_secs: self.request_timeout_secs,
        }
    }
}

pub struct TestSession {
    pub user_id: String,
    pub name: String,
    pub token: String,
}

impl Default for TestSession {
    fn default() -> Self {
        Self {
            user_id: Uuid::new_v4().to_string(),
            name: "Test User".to_string(),
            token: "test-bearer-token".to_string(),
        }
    }
}

impl TestSession {
    pub fn named(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Self::default()
        }
    }

    pub fn to_session(&self) -> Session {
        Session {
            user: User {
                id: self.user_id.clone(),
                name: self.name.clone(),
                email: Some("test@example.com".to_string()),
                avatar_url: None,
                created_at: Some(chrono::Utc::now()),
            },
            token: self.token.clone(),
        }
    }
}
