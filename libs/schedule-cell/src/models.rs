use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::Serialize;

use provider_cell::models::HourSlot;

use crate::error::ScheduleError;

/// Sentinel for "no hour selected".
pub const UNSELECTED_HOUR: u32 = 0;

/// What the user has currently picked: a provider, a calendar date and
/// optionally an hour. Mutated only by the controller's event handlers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DaySelection {
    pub provider_id: String,
    pub date: NaiveDate,
    pub hour: u32,
}

impl DaySelection {
    pub fn new(provider_id: impl Into<String>, date: NaiveDate) -> Self {
        Self {
            provider_id: provider_id.into(),
            date,
            hour: UNSELECTED_HOUR,
        }
    }

    pub fn has_hour(&self) -> bool {
        self.hour != UNSELECTED_HOUR
    }

    /// Combine the selected date and hour into the timestamp submitted to
    /// the booking endpoint: hour set, minutes and seconds zeroed.
    pub fn booking_timestamp(&self) -> Result<DateTime<Utc>, ScheduleError> {
        if !self.has_hour() {
            return Err(ScheduleError::NoHourSelected);
        }

        let time = NaiveTime::from_hms_opt(self.hour, 0, 0)
            .ok_or(ScheduleError::InvalidHour(self.hour))?;

        Ok(self.date.and_time(time).and_utc())
    }
}

/// One rendered slot: the hour, whether it can still be booked, and the
/// "HH:00" label shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SlotView {
    pub hour: u32,
    pub available: bool,
    pub label: String,
}

impl SlotView {
    fn from_slot(slot: &HourSlot) -> Self {
        Self {
            hour: slot.hour,
            available: slot.available,
            label: format!("{:02}:00", slot.hour),
        }
    }
}

/// The availability list partitioned for rendering. Hours before noon go to
/// `morning`, hours after noon to `afternoon`; noon itself is dropped from
/// both halves (kept as-is from the product behavior, see DESIGN.md).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DaySchedule {
    pub morning: Vec<SlotView>,
    pub afternoon: Vec<SlotView>,
}

impl DaySchedule {
    pub fn derive(slots: &[HourSlot]) -> Self {
        let mut schedule = Self::default();

        for slot in slots {
            if slot.hour < 12 {
                schedule.morning.push(SlotView::from_slot(slot));
            } else if slot.hour > 12 {
                schedule.afternoon.push(SlotView::from_slot(slot));
            }
        }

        schedule
    }

    pub fn is_empty(&self) -> bool {
        self.morning.is_empty() && self.afternoon.is_empty()
    }
}

/// Published view state: the current selection plus the derived schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScheduleSnapshot {
    pub selection: DaySelection,
    pub schedule: DaySchedule,
}
