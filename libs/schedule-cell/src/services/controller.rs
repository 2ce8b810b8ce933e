use std::sync::Arc;

use anyhow::Result;
use chrono::{DateTime, NaiveDate, Utc};
use tokio::sync::{mpsc, watch};
use tokio::time::{sleep_until, Duration, Instant};
use tracing::{debug, error, warn};

use provider_cell::models::HourSlot;
use shared_config::AppConfig;
use shared_models::auth::Session;

use crate::error::ScheduleError;
use crate::models::{DaySchedule, DaySelection, ScheduleSnapshot, UNSELECTED_HOUR};
use crate::services::backend::SchedulingBackend;

/// Message shown when an appointment could not be created, mirroring the
/// blocking notification in the product flow.
pub const BOOKING_ERROR_MESSAGE: &str =
    "There was an error creating the appointment, please try again";

/// Selection changes emitted by the view layer.
#[derive(Debug, Clone)]
pub enum SelectionEvent {
    ProviderChanged(String),
    DateChanged(NaiveDate),
    HourChanged(u32),
    BookRequested,
}

/// One-shot outcomes the view layer must react to.
#[derive(Debug, Clone)]
pub enum ScheduleSignal {
    BookingConfirmed(DateTime<Utc>),
    BookingFailed(String),
}

/// Debounced-refresh state. Provider/date changes (re)arm `Pending`; the
/// deadline firing moves to `Fetching` until the tagged response lands.
#[derive(Debug, Clone, Copy)]
enum RefreshState {
    Idle,
    Pending { deadline: Instant },
    Fetching,
}

/// Owns the selection state and keeps it consistent with server-reported
/// availability. Single logical thread: one select loop owns all mutation;
/// fetches run detached and report back over a generation-tagged channel.
pub struct ScheduleController<B: SchedulingBackend> {
    backend: Arc<B>,
    session: Session,
    selection: DaySelection,
    availability: Vec<HourSlot>,
    refresh: RefreshState,
    generation: u64,
    debounce: Duration,
    events: mpsc::UnboundedReceiver<SelectionEvent>,
    signals: mpsc::UnboundedSender<ScheduleSignal>,
    snapshot: watch::Sender<ScheduleSnapshot>,
    completions_tx: mpsc::UnboundedSender<(u64, Result<Vec<HourSlot>>)>,
    completions_rx: mpsc::UnboundedReceiver<(u64, Result<Vec<HourSlot>>)>,
}

/// Cheap clonable handle the view layer drives the controller with.
#[derive(Clone)]
pub struct ScheduleHandle {
    events: mpsc::UnboundedSender<SelectionEvent>,
    snapshot: watch::Receiver<ScheduleSnapshot>,
}

impl ScheduleHandle {
    pub fn set_provider(&self, provider_id: impl Into<String>) -> Result<(), ScheduleError> {
        self.send(SelectionEvent::ProviderChanged(provider_id.into()))
    }

    pub fn set_date(&self, date: NaiveDate) -> Result<(), ScheduleError> {
        self.send(SelectionEvent::DateChanged(date))
    }

    pub fn set_hour(&self, hour: u32) -> Result<(), ScheduleError> {
        self.send(SelectionEvent::HourChanged(hour))
    }

    pub fn book(&self) -> Result<(), ScheduleError> {
        self.send(SelectionEvent::BookRequested)
    }

    pub fn snapshot(&self) -> ScheduleSnapshot {
        self.snapshot.borrow().clone()
    }

    /// Wait for the next published snapshot.
    pub async fn changed(&mut self) -> Result<ScheduleSnapshot, ScheduleError> {
        self.snapshot
            .changed()
            .await
            .map_err(|_| ScheduleError::ControllerStopped)?;
        Ok(self.snapshot.borrow().clone())
    }

    fn send(&self, event: SelectionEvent) -> Result<(), ScheduleError> {
        self.events
            .send(event)
            .map_err(|_| ScheduleError::ControllerStopped)
    }
}

impl<B: SchedulingBackend> ScheduleController<B> {
    /// Build a controller for one booking screen. The initial selection is
    /// treated as freshly changed, so the first availability fetch fires one
    /// debounce window after startup.
    pub fn new(
        backend: Arc<B>,
        session: Session,
        initial: DaySelection,
        config: &AppConfig,
    ) -> (
        Self,
        ScheduleHandle,
        mpsc::UnboundedReceiver<ScheduleSignal>,
    ) {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        let (signals_tx, signals_rx) = mpsc::unbounded_channel();
        let (completions_tx, completions_rx) = mpsc::unbounded_channel();

        let debounce = Duration::from_millis(config.debounce_ms);
        let (snapshot_tx, snapshot_rx) = watch::channel(ScheduleSnapshot {
            selection: initial.clone(),
            schedule: DaySchedule::default(),
        });

        let controller = Self {
            backend,
            session,
            selection: initial,
            availability: Vec::new(),
            refresh: RefreshState::Pending {
                deadline: Instant::now() + debounce,
            },
            generation: 0,
            debounce,
            events: events_rx,
            signals: signals_tx,
            snapshot: snapshot_tx,
            completions_tx,
            completions_rx,
        };

        let handle = ScheduleHandle {
            events: events_tx,
            snapshot: snapshot_rx,
        };

        (controller, handle, signals_rx)
    }

    /// Event loop. Runs until every handle is dropped (screen unmounted).
    pub async fn run(mut self) {
        loop {
            let deadline = match self.refresh {
                RefreshState::Pending { deadline } => Some(deadline),
                _ => None,
            };

            tokio::select! {
                event = self.events.recv() => {
                    match event {
                        Some(event) => self.handle_event(event).await,
                        None => {
                            debug!("All schedule handles dropped, stopping controller");
                            break;
                        }
                    }
                }
                _ = sleep_until(deadline.unwrap_or_else(Instant::now)), if deadline.is_some() => {
                    self.begin_refresh();
                }
                Some((generation, result)) = self.completions_rx.recv() => {
                    self.finish_refresh(generation, result);
                }
            }
        }
    }

    async fn handle_event(&mut self, event: SelectionEvent) {
        match event {
            SelectionEvent::ProviderChanged(provider_id) => {
                self.selection.provider_id = provider_id;
                self.schedule_refresh();
            }
            SelectionEvent::DateChanged(date) => {
                self.selection.date = date;
                self.schedule_refresh();
            }
            SelectionEvent::HourChanged(hour) => {
                // No check against availability here: the rendered list was
                // already filtered to bookable slots.
                self.selection.hour = hour;
                self.publish();
            }
            SelectionEvent::BookRequested => {
                self.submit_booking().await;
            }
        }
    }

    /// (Re)arm the debounce window. Any pending deadline is replaced, and
    /// the generation bump invalidates whatever fetch may already be in
    /// flight for the previous selection.
    fn schedule_refresh(&mut self) {
        self.generation = self.generation.wrapping_add(1);
        self.refresh = RefreshState::Pending {
            deadline: Instant::now() + self.debounce,
        };
    }

    fn begin_refresh(&mut self) {
        self.refresh = RefreshState::Fetching;

        let generation = self.generation;
        let backend = Arc::clone(&self.backend);
        let session = self.session.clone();
        let provider_id = self.selection.provider_id.clone();
        let date = self.selection.date;
        let completions = self.completions_tx.clone();

        debug!(
            "Refreshing availability for provider {} on {} (generation {})",
            provider_id, date, generation
        );

        tokio::spawn(async move {
            let result = backend.day_availability(&provider_id, date, &session).await;
            let _ = completions.send((generation, result));
        });
    }

    fn finish_refresh(&mut self, generation: u64, result: Result<Vec<HourSlot>>) {
        if generation != self.generation {
            debug!(
                "Discarding stale availability response (generation {}, current {})",
                generation, self.generation
            );
            return;
        }

        self.refresh = RefreshState::Idle;

        match result {
            Ok(slots) => {
                if self.selection.has_hour() {
                    let still_available = slots
                        .iter()
                        .any(|slot| slot.hour == self.selection.hour && slot.available);
                    if !still_available {
                        debug!(
                            "Selected hour {} no longer available, clearing selection",
                            self.selection.hour
                        );
                        self.selection.hour = UNSELECTED_HOUR;
                    }
                }

                self.availability = slots;
                self.publish();
            }
            Err(err) => {
                // Keep the previous availability and selection; the next
                // provider/date change triggers another attempt.
                warn!("Availability refresh failed: {:#}", err);
            }
        }
    }

    async fn submit_booking(&mut self) {
        let starts_at = match self.selection.booking_timestamp() {
            Ok(starts_at) => starts_at,
            Err(err) => {
                warn!("Booking rejected before submission: {}", err);
                self.signal(ScheduleSignal::BookingFailed(
                    BOOKING_ERROR_MESSAGE.to_string(),
                ));
                return;
            }
        };

        match self
            .backend
            .book(&self.selection.provider_id, starts_at, &self.session)
            .await
        {
            Ok(()) => {
                self.signal(ScheduleSignal::BookingConfirmed(starts_at));
            }
            Err(err) => {
                error!("Failed to create appointment: {:#}", err);
                self.signal(ScheduleSignal::BookingFailed(
                    BOOKING_ERROR_MESSAGE.to_string(),
                ));
            }
        }
    }

    fn signal(&self, signal: ScheduleSignal) {
        let _ = self.signals.send(signal);
    }

    fn publish(&self) {
        self.snapshot.send_replace(ScheduleSnapshot {
            selection: self.selection.clone(),
            schedule: DaySchedule::derive(&self.availability),
        });
    }
}
