//! Step presentation module
//! 
//! Maps a step, the controller's flags and the countdown state to a
//! description of what to draw, plus a plain-text renderer for terminals.

pub mod text;
pub mod view;

// Re-export main types and functions
pub use text::{render_session, render_view};
pub use view::{present, ActiveCard, PrimaryControl, ProgressDot, StepView, TimerPanel};
