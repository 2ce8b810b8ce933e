use anyhow::Result;
use reqwest::Method;
use tracing::debug;

use shared_api_client::ApiClient;
use shared_config::AppConfig;
use shared_models::auth::Session;

use crate::models::Provider;

pub struct ProviderCatalogService {
    api: ApiClient,
}

impl ProviderCatalogService {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            api: ApiClient::new(config),
        }
    }

    /// Fetch the provider list. The catalog is immutable once fetched;
    /// callers load it once per screen mount.
    pub async fn list_providers(&self, session: &Session) -> Result<Vec<Provider>> {
        debug!("Fetching provider catalog");

        let providers: Vec<Provider> = self
            .api
            .request(
                Method::GET,
                "/providers",
                Some(session.bearer_token()),
                None,
            )
            .await?;

        debug!("Fetched {} providers", providers.len());
        Ok(providers)
    }
}
