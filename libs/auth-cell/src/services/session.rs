use anyhow::Result;
use reqwest::Method;
use serde_json::json;
use tracing::{debug, info};

use shared_api_client::ApiClient;
use shared_config::AppConfig;
use shared_models::auth::{Session, SignInResponse};

use crate::models::Credentials;

pub struct SessionService {
    api: ApiClient,
}

impl SessionService {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            api: ApiClient::new(config),
        }
    }

    /// Exchange credentials for an authenticated session.
    /// Form checks run first so a malformed submission never reaches the API.
    pub async fn sign_in(&self, credentials: &Credentials) -> Result<Session> {
        credentials.validate()?;

        debug!("Signing in {}", credentials.email);

        let sign_in_data = json!({
            "email": credentials.email.trim(),
            "password": credentials.password,
        });

        let response: SignInResponse = self
            .api
            .request(Method::POST, "/sessions", None, Some(sign_in_data))
            .await?;

        info!("Signed in as user {}", response.user.id);
        Ok(response.into())
    }
}
