pub mod error;
pub mod models;
pub mod services;

pub use error::ScheduleError;
pub use models::*;
pub use services::backend::{RemoteBackend, SchedulingBackend};
pub use services::controller::{
    ScheduleController, ScheduleHandle, ScheduleSignal, SelectionEvent,
};
