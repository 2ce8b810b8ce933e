use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScheduleError {
    #[error("No hour selected")]
    NoHourSelected,

    #[error("Hour {0} is not a valid hour of day")]
    InvalidHour(u32),

    #[error("Schedule controller has stopped")]
    ControllerStopped,
}
