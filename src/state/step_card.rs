//! The card for the step currently being cooked
//!
//! A card owns the countdown of exactly one step instance together with the
//! tick source driving it. The controller only tells it which step to show;
//! whether that step is active or completed never feeds into the countdown's
//! own transitions.

use std::sync::Arc;

use tracing::{debug, info};

use super::timer_state::{PrimaryAction, StepTimer, TickOutcome, TimerSnapshot};
use crate::{
    presenter::{present, StepView},
    recipe::RecipeStep,
    services::AlarmNotifier,
    tasks::Ticker,
};

#[derive(Debug)]
pub struct StepCard {
    step: RecipeStep,
    timer: StepTimer,
    ticker: Option<Ticker>,
    alarm: Arc<dyn AlarmNotifier>,
}

impl StepCard {
    /// Create a card with a fresh countdown for `step`
    pub fn new(step: RecipeStep, alarm: Arc<dyn AlarmNotifier>) -> Self {
        let timer = StepTimer::new(step.duration);
        debug!("Created card for step '{}'", step.id);
        Self {
            step,
            timer,
            ticker: None,
            alarm,
        }
    }

    pub fn step(&self) -> &RecipeStep {
        &self.step
    }

    pub fn step_id(&self) -> &str {
        &self.step.id
    }

    pub fn timer(&self) -> &StepTimer {
        &self.timer
    }

    pub fn snapshot(&self) -> TimerSnapshot {
        self.timer.snapshot()
    }

    /// Whether a tick source is currently attached
    pub fn is_ticking(&self) -> bool {
        self.ticker.is_some()
    }

    /// Display `step`, resetting the countdown only if its identity changed
    ///
    /// Returns `true` when a reset happened.
    pub fn show(&mut self, step: &RecipeStep) -> bool {
        if step.id == self.step.id {
            self.step = step.clone();
            return false;
        }

        info!("Active step changed from '{}' to '{}', resetting timer", self.step.id, step.id);
        self.ticker = None;
        self.step = step.clone();
        self.timer.reset(step.duration);
        true
    }

    /// Apply the primary action to the countdown
    ///
    /// Any pending tick source is cancelled first, so a caller seeing
    /// [`PrimaryAction::starts_ticking`] can attach a new one without ever
    /// having two alive.
    pub fn primary_action(&mut self) -> PrimaryAction {
        self.ticker = None;
        let action = self.timer.primary_action();
        debug!(
            "Primary action on step '{}': {:?} ({}s left)",
            self.step.id,
            action,
            self.timer.remaining_seconds()
        );
        action
    }

    /// Install the tick source for a running countdown
    ///
    /// The previous ticker, if any, is dropped. A ticker handed to a card
    /// whose countdown is not running is cancelled straight away.
    pub fn attach_ticker(&mut self, ticker: Ticker) {
        if self.timer.is_running() {
            self.ticker = Some(ticker);
        } else {
            debug!("Discarding ticker for step '{}': timer not running", self.step.id);
            ticker.cancel();
        }
    }

    /// Count down one second, sounding the alarm if that finished the timer
    pub fn tick(&mut self) -> TickOutcome {
        let outcome = self.timer.tick();
        match outcome {
            TickOutcome::Counted(remaining) => {
                debug!("Step '{}': {}s remaining", self.step.id, remaining);
            }
            TickOutcome::Completed => {
                self.ticker = None;
                info!("Timer for step '{}' finished", self.step.id);
                self.alarm.play();
            }
            TickOutcome::Ignored => {
                self.ticker = None;
            }
        }
        outcome
    }

    /// Render this card with the controller's flags
    pub fn present(
        &self,
        is_active: bool,
        is_completed: bool,
        step_number: usize,
        total_steps: usize,
    ) -> StepView {
        present(
            &self.step,
            is_active,
            is_completed,
            step_number,
            total_steps,
            &self.timer.snapshot(),
        )
    }
}
