use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A confirmed appointment as returned by the API. The client core only
/// needs success or failure of creation; the fields are carried for display.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Appointment {
    pub id: Uuid,
    pub provider_id: String,
    pub user_id: String,
    pub date: DateTime<Utc>,
}
