//! Notifications published when the session changes

use serde::Serialize;

use super::{session::ActionResult, timer_state::PrimaryAction};

/// Something a front end may want to redraw for
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum SessionEvent {
    TimerStarted { step_id: String },
    TimerPaused { step_id: String },
    TimerResumed { step_id: String },
    /// Countdown reached zero and the alarm was sounded
    TimerCompleted { step_id: String },
    /// A different step became active; its timer starts fresh
    StepActivated { index: usize, step_id: String },
    RecipeFinished,
}

impl SessionEvent {
    /// Event describing a primary action, given the step active afterwards
    pub fn from_action(result: &ActionResult, active_step_id: Option<&str>) -> Option<Self> {
        let event = match result {
            ActionResult::Timer { step_id, action } => {
                let step_id = step_id.clone();
                match action {
                    PrimaryAction::Started => SessionEvent::TimerStarted { step_id },
                    PrimaryAction::Paused => SessionEvent::TimerPaused { step_id },
                    PrimaryAction::Resumed => SessionEvent::TimerResumed { step_id },
                    PrimaryAction::Advance => return None,
                }
            }
            ActionResult::Advanced { active, .. } => SessionEvent::StepActivated {
                index: *active,
                step_id: active_step_id?.to_string(),
            },
            ActionResult::Finished { .. } => SessionEvent::RecipeFinished,
        };
        Some(event)
    }

    /// Short name used for last-action tracking
    pub fn name(&self) -> &'static str {
        match self {
            SessionEvent::TimerStarted { .. } => "timer-started",
            SessionEvent::TimerPaused { .. } => "timer-paused",
            SessionEvent::TimerResumed { .. } => "timer-resumed",
            SessionEvent::TimerCompleted { .. } => "timer-completed",
            SessionEvent::StepActivated { .. } => "step-activated",
            SessionEvent::RecipeFinished => "recipe-finished",
        }
    }
}
