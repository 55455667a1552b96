//! Main application state management

use std::{
    sync::{Arc, Mutex, MutexGuard},
    time::{Duration, Instant},
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::{broadcast, watch};
use tracing::{debug, error, info};

use super::{
    events::SessionEvent,
    session::{ActionResult, CookingSession},
    timer_state::{TickOutcome, TimerSnapshot},
};
use crate::{
    error::SessionError,
    presenter::StepView,
    tasks::Ticker,
    utils::format_uptime,
};

/// Where the session stands, without per-step detail
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionSummary {
    pub title: String,
    /// 1-based number of the active step, `None` once finished
    pub step_number: Option<usize>,
    pub total_steps: usize,
    pub completed_steps: usize,
    pub finished: bool,
    pub timer: TimerSnapshot,
}

/// Main application state shared by the API, the terminal and tick tasks
#[derive(Debug)]
pub struct AppState {
    /// The cooking session and the card of its active step
    pub session: Arc<Mutex<CookingSession>>,
    /// Interval between countdown ticks
    pub tick_period: Duration,
    /// Server metadata
    pub start_time: Instant,
    pub port: u16,
    pub host: String,
    /// Last action tracking
    pub last_action: Arc<Mutex<Option<String>>>,
    pub last_action_time: Arc<Mutex<Option<DateTime<Utc>>>>,
    /// Channel for session change notifications
    pub event_tx: broadcast::Sender<SessionEvent>,
    /// Channel for timer updates
    pub timer_update_tx: watch::Sender<TimerSnapshot>,
    /// Keep the receiver alive to prevent channel closure
    pub _timer_update_rx: watch::Receiver<TimerSnapshot>,
}

impl AppState {
    /// Create a new AppState around a freshly started session
    pub fn new(session: CookingSession, host: String, port: u16, tick_period: Duration) -> Self {
        let (event_tx, _) = broadcast::channel(100);
        let (timer_update_tx, timer_update_rx) = watch::channel(session.timer_snapshot());

        Self {
            session: Arc::new(Mutex::new(session)),
            tick_period,
            start_time: Instant::now(),
            port,
            host,
            last_action: Arc::new(Mutex::new(None)),
            last_action_time: Arc::new(Mutex::new(None)),
            event_tx,
            timer_update_tx,
            _timer_update_rx: timer_update_rx,
        }
    }

    fn lock_session(&self) -> Result<MutexGuard<'_, CookingSession>, SessionError> {
        self.session
            .lock()
            .map_err(|e| SessionError::Poisoned(e.to_string()))
    }

    /// Subscribe to session change notifications
    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.event_tx.subscribe()
    }

    /// Watch the active step's countdown
    pub fn watch_timer(&self) -> watch::Receiver<TimerSnapshot> {
        self.timer_update_tx.subscribe()
    }

    /// Press the primary action of the active step
    ///
    /// Entering `Running` schedules a fresh tick source; the card has
    /// already cancelled the previous one.
    pub fn primary_action(self: &Arc<Self>) -> Result<ActionResult, SessionError> {
        let mut session = self.lock_session()?;
        let result = session.primary_action()?;

        if let ActionResult::Timer { step_id, action } = &result {
            if action.starts_ticking() {
                let generation = session.tick_generation();
                let ticker = self.spawn_ticker(step_id.clone(), generation);
                session.attach_ticker(step_id, generation, ticker);
            }
        }

        let snapshot = session.timer_snapshot();
        let active_id = session.active_step().map(|step| step.id.clone());
        drop(session); // Release the lock early

        info!("Primary action: {:?}", result);
        if let Some(event) = SessionEvent::from_action(&result, active_id.as_deref()) {
            self.record_action(event.name());
            self.publish_event(event);
        }
        self.publish_timer(snapshot);

        Ok(result)
    }

    fn spawn_ticker(self: &Arc<Self>, step_id: String, generation: u64) -> Ticker {
        let state = Arc::downgrade(self);
        debug!(
            "Scheduling ticks for step '{}' every {:?} (generation {})",
            step_id, self.tick_period, generation
        );

        Ticker::spawn(self.tick_period, move || match state.upgrade() {
            Some(state) => state.tick(&step_id, generation),
            None => false,
        })
    }

    /// Advance the countdown of `step_id` by one tick from tick source `generation`
    ///
    /// Returns whether further ticks are wanted.
    pub fn tick(&self, step_id: &str, generation: u64) -> bool {
        let (outcome, snapshot) = match self.lock_session() {
            Ok(mut session) => {
                let outcome = session.tick(step_id, generation);
                (outcome, session.timer_snapshot())
            }
            Err(e) => {
                error!("Dropping tick for step '{}': {}", step_id, e);
                return false;
            }
        };

        match outcome {
            TickOutcome::Ignored => {
                debug!("Stale tick for step '{}' ignored", step_id);
            }
            TickOutcome::Counted(_) => self.publish_timer(snapshot),
            TickOutcome::Completed => {
                self.publish_timer(snapshot);
                let event = SessionEvent::TimerCompleted {
                    step_id: step_id.to_string(),
                };
                self.record_action(event.name());
                self.publish_event(event);
            }
        }

        outcome.keeps_running()
    }

    /// Make step `index` (0-based) the active one
    pub fn go_to(&self, index: usize) -> Result<(), SessionError> {
        let mut session = self.lock_session()?;
        session.go_to(index)?;
        let snapshot = session.timer_snapshot();
        let step_id = session.active_step().map(|step| step.id.clone()).unwrap_or_default();
        drop(session);

        let event = SessionEvent::StepActivated { index, step_id };
        self.record_action(event.name());
        self.publish_event(event);
        self.publish_timer(snapshot);
        Ok(())
    }

    /// Start the recipe over from the first step
    pub fn restart(&self) -> Result<(), SessionError> {
        let mut session = self.lock_session()?;
        session.restart();
        let snapshot = session.timer_snapshot();
        let step_id = session.active_step().map(|step| step.id.clone()).unwrap_or_default();
        drop(session);

        self.record_action("restart");
        self.publish_event(SessionEvent::StepActivated { index: 0, step_id });
        self.publish_timer(snapshot);
        Ok(())
    }

    /// Presenter output for every step
    pub fn views(&self) -> Result<Vec<StepView>, SessionError> {
        Ok(self.lock_session()?.views())
    }

    /// Presenter output for the active step, `None` once finished
    pub fn active_view(&self) -> Result<Option<StepView>, SessionError> {
        Ok(self.lock_session()?.active_view())
    }

    /// Get current session summary
    pub fn summary(&self) -> Result<SessionSummary, SessionError> {
        let session = self.lock_session()?;
        Ok(SessionSummary {
            title: session.recipe().title.clone(),
            step_number: session.active_index().map(|index| index + 1),
            total_steps: session.total_steps(),
            completed_steps: session.completed_count(),
            finished: session.is_finished(),
            timer: session.timer_snapshot(),
        })
    }

    /// Recipe title and rendered steps in one lock
    pub fn title_and_views(&self) -> Result<(String, Vec<StepView>), SessionError> {
        let session = self.lock_session()?;
        Ok((session.recipe().title.clone(), session.views()))
    }

    pub fn is_finished(&self) -> Result<bool, SessionError> {
        Ok(self.lock_session()?.is_finished())
    }

    fn record_action(&self, action: &str) {
        if let Ok(mut last_action) = self.last_action.lock() {
            *last_action = Some(action.to_string());
        }
        if let Ok(mut last_time) = self.last_action_time.lock() {
            *last_time = Some(Utc::now());
        }
    }

    fn publish_event(&self, event: SessionEvent) {
        // Sending fails only when nobody is subscribed
        if let Err(e) = self.event_tx.send(event) {
            debug!("No listeners for session event: {}", e);
        }
    }

    fn publish_timer(&self, snapshot: TimerSnapshot) {
        self.timer_update_tx.send_replace(snapshot);
    }

    /// Calculate server uptime as a formatted string
    pub fn get_uptime(&self) -> String {
        format_uptime(self.start_time.elapsed())
    }

    /// Get last action information
    pub fn get_last_action(&self) -> (Option<String>, Option<DateTime<Utc>>) {
        let last_action = self.last_action.lock().ok().and_then(|a| a.clone());
        let last_action_time = self.last_action_time.lock().ok().and_then(|t| *t);
        (last_action, last_action_time)
    }
}
