use anyhow::Result;
use chrono::{DateTime, Utc};
use reqwest::Method;
use serde_json::json;
use tracing::{debug, info};

use shared_api_client::ApiClient;
use shared_config::AppConfig;
use shared_models::auth::Session;

use crate::models::Appointment;

pub struct BookingService {
    api: ApiClient,
}

impl BookingService {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            api: ApiClient::new(config),
        }
    }

    /// Submit an appointment for the signed-in user. No local state is
    /// mutated optimistically; a failure leaves nothing to roll back.
    pub async fn create_appointment(
        &self,
        provider_id: &str,
        starts_at: DateTime<Utc>,
        session: &Session,
    ) -> Result<Appointment> {
        debug!(
            "Booking appointment with provider {} at {}",
            provider_id, starts_at
        );

        let appointment_data = json!({
            "provider_id": provider_id,
            "date": starts_at.to_rfc3339(),
        });

        let appointment: Appointment = self
            .api
            .request(
                Method::POST,
                "/appointments",
                Some(session.bearer_token()),
                Some(appointment_data),
            )
            .await?;

        info!("Appointment {} confirmed", appointment.id);
        Ok(appointment)
    }
}
