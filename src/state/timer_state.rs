//! Per-step countdown state machine

use serde::{Deserialize, Serialize};

/// Where a step's countdown currently stands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimerPhase {
    /// The step has no countdown; the primary action just acknowledges it
    NoTimer,
    /// Countdown not started yet
    Idle,
    Running,
    Paused,
    /// Countdown reached zero; terminal for this step
    Completed,
}

/// What a primary action did to the countdown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PrimaryAction {
    /// Step acknowledged; the controller should move on
    Advance,
    Started,
    Paused,
    Resumed,
}

impl PrimaryAction {
    /// Whether the countdown just entered `Running` and needs a tick source
    pub fn starts_ticking(self) -> bool {
        matches!(self, PrimaryAction::Started | PrimaryAction::Resumed)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PrimaryAction::Advance => "advanced",
            PrimaryAction::Started => "started",
            PrimaryAction::Paused => "paused",
            PrimaryAction::Resumed => "resumed",
        }
    }
}

/// Result of a single one-second tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// The countdown was not running; nothing changed
    Ignored,
    /// One second elapsed, this many remain
    Counted(u64),
    /// The countdown just hit zero
    Completed,
}

impl TickOutcome {
    /// Whether further ticks are wanted after this one
    pub fn keeps_running(self) -> bool {
        matches!(self, TickOutcome::Counted(_))
    }
}

/// Countdown state for the step currently on screen
///
/// `running`, `started` and `completed` are all derived from the phase, so
/// `completed` always implies zero remaining time and no ticking, and
/// `running` always implies a started, unfinished countdown with time left.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepTimer {
    duration: Option<u64>,
    remaining_seconds: u64,
    phase: TimerPhase,
}

impl StepTimer {
    /// Create a fresh timer for a step with the given duration
    pub fn new(duration: Option<u64>) -> Self {
        let mut timer = Self {
            duration: None,
            remaining_seconds: 0,
            phase: TimerPhase::NoTimer,
        };
        timer.reset(duration);
        timer
    }

    /// Discard all countdown progress and start over for `duration`
    pub fn reset(&mut self, duration: Option<u64>) {
        self.duration = duration;
        self.remaining_seconds = duration.unwrap_or(0);
        self.phase = match duration {
            Some(seconds) if seconds > 0 => TimerPhase::Idle,
            _ => TimerPhase::NoTimer,
        };
    }

    /// Apply the single user-facing action for the current phase
    pub fn primary_action(&mut self) -> PrimaryAction {
        match self.phase {
            TimerPhase::NoTimer | TimerPhase::Completed => PrimaryAction::Advance,
            TimerPhase::Idle => {
                self.phase = TimerPhase::Running;
                PrimaryAction::Started
            }
            TimerPhase::Running => {
                self.phase = TimerPhase::Paused;
                PrimaryAction::Paused
            }
            TimerPhase::Paused => {
                self.phase = TimerPhase::Running;
                PrimaryAction::Resumed
            }
        }
    }

    /// Advance the countdown by one second
    pub fn tick(&mut self) -> TickOutcome {
        if self.phase != TimerPhase::Running {
            return TickOutcome::Ignored;
        }

        self.remaining_seconds = self.remaining_seconds.saturating_sub(1);
        if self.remaining_seconds == 0 {
            self.phase = TimerPhase::Completed;
            TickOutcome::Completed
        } else {
            TickOutcome::Counted(self.remaining_seconds)
        }
    }

    pub fn phase(&self) -> TimerPhase {
        self.phase
    }

    pub fn duration(&self) -> Option<u64> {
        self.duration
    }

    pub fn remaining_seconds(&self) -> u64 {
        self.remaining_seconds
    }

    pub fn is_running(&self) -> bool {
        self.phase == TimerPhase::Running
    }

    pub fn is_started(&self) -> bool {
        matches!(
            self.phase,
            TimerPhase::Running | TimerPhase::Paused | TimerPhase::Completed
        )
    }

    pub fn is_completed(&self) -> bool {
        self.phase == TimerPhase::Completed
    }

    /// Elapsed share of the countdown in percent, 0 for untimed steps
    pub fn progress(&self) -> f64 {
        match self.duration {
            Some(total) if total > 0 => {
                (total - self.remaining_seconds) as f64 * 100.0 / total as f64
            }
            _ => 0.0,
        }
    }

    /// Capture the current state for rendering and reporting
    pub fn snapshot(&self) -> TimerSnapshot {
        TimerSnapshot {
            phase: self.phase,
            duration: self.duration,
            remaining_seconds: self.remaining_seconds,
            running: self.is_running(),
            started: self.is_started(),
            completed: self.is_completed(),
            progress: self.progress(),
        }
    }
}

/// Point-in-time copy of a [`StepTimer`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimerSnapshot {
    pub phase: TimerPhase,
    pub duration: Option<u64>,
    pub remaining_seconds: u64,
    pub running: bool,
    pub started: bool,
    pub completed: bool,
    pub progress: f64,
}

impl TimerSnapshot {
    /// Snapshot of a timer nobody has touched yet
    pub fn fresh(duration: Option<u64>) -> Self {
        StepTimer::new(duration).snapshot()
    }
}

impl Default for TimerSnapshot {
    fn default() -> Self {
        Self::fresh(None)
    }
}
