use serde::{Deserialize, Serialize};

/// A service professional offering bookable time slots.
/// Identifiers are opaque strings minted by the API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Provider {
    pub id: String,
    pub name: String,
    pub avatar_url: String,
}

/// One bookable slot for a provider on a calendar date.
/// `hour` is the 0-23 hour of day; `available` is false once booked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HourSlot {
    pub hour: u32,
    pub available: bool,
}
