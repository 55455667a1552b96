//! Background tasks module
//! 
//! This module contains the tick source that drives running countdowns and
//! the interactive terminal front end.

pub mod terminal;
pub mod ticker;

// Re-export main types and functions
pub use terminal::run_terminal;
pub use ticker::Ticker;
