use anyhow::Result;
use chrono::{Datelike, NaiveDate};
use reqwest::Method;
use tracing::debug;

use shared_api_client::ApiClient;
use shared_config::AppConfig;
use shared_models::auth::Session;

use crate::models::HourSlot;

pub struct DayAvailabilityService {
    api: ApiClient,
}

impl DayAvailabilityService {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            api: ApiClient::new(config),
        }
    }

    /// Fetch the hourly slots for one provider on one calendar date.
    /// Only the calendar components of `date` are sent; any time of day
    /// the caller is carrying is ignored.
    pub async fn day_availability(
        &self,
        provider_id: &str,
        date: NaiveDate,
        session: &Session,
    ) -> Result<Vec<HourSlot>> {
        debug!(
            "Fetching day availability for provider {} on {}",
            provider_id, date
        );

        let path = format!("/providers/{}/day-availability", provider_id);
        let query = [
            ("year", date.year().to_string()),
            ("month", date.month().to_string()),
            ("day", date.day().to_string()),
        ];

        let slots: Vec<HourSlot> = self
            .api
            .request_with_query(
                Method::GET,
                &path,
                Some(session.bearer_token()),
                &query,
                None,
            )
            .await?;

        debug!("Fetched {} hourly slots", slots.len());
        Ok(slots)
    }
}
