use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};

use booking_cell::BookingService;
use provider_cell::models::HourSlot;
use provider_cell::DayAvailabilityService;
use shared_config::AppConfig;
use shared_models::auth::Session;

/// Seam between the controller and the network. The session travels with
/// every call; nothing is read from ambient context.
#[async_trait]
pub trait SchedulingBackend: Send + Sync + 'static {
    async fn day_availability(
        &self,
        provider_id: &str,
        date: NaiveDate,
        session: &Session,
    ) -> Result<Vec<HourSlot>>;

    async fn book(
        &self,
        provider_id: &str,
        starts_at: DateTime<Utc>,
        session: &Session,
    ) -> Result<()>;
}

/// Production backend: the provider availability endpoint plus the booking
/// endpoint, both over the shared API client.
pub struct RemoteBackend {
    availability: DayAvailabilityService,
    booking: BookingService,
}

impl RemoteBackend {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            availability: DayAvailabilityService::new(config),
            booking: BookingService::new(config),
        }
    }
}

#[async_trait]
impl SchedulingBackend for RemoteBackend {
    async fn day_availability(
        &self,
        provider_id: &str,
        date: NaiveDate,
        session: &Session,
    ) -> Result<Vec<HourSlot>> {
        self.availability
            .day_availability(provider_id, date, session)
            .await
    }

    async fn book(
        &self,
        provider_id: &str,
        starts_at: DateTime<Utc>,
        session: &Session,
    ) -> Result<()> {
        self.booking
            .create_appointment(provider_id, starts_at, session)
            .await
            .map(|_| ())
    }
}
