//! State management module
//! 
//! This module contains the countdown state machine, the step card that owns
//! it, the session controller sequencing the steps, and the shared host state.

pub mod app_state;
pub mod events;
pub mod session;
pub mod step_card;
pub mod timer_state;

// Re-export main types
pub use app_state::{AppState, SessionSummary};
pub use events::SessionEvent;
pub use session::{ActionResult, CookingSession};
pub use step_card::StepCard;
pub use timer_state::{PrimaryAction, StepTimer, TickOutcome, TimerPhase, TimerSnapshot};
