//! Cooking Assistant - guided recipe steps with per-step countdown timers
//! 
//! This library walks a user through a recipe one step at a time. Each step
//! may carry a countdown with start/pause/resume controls and an audible
//! alarm; the rest of the crate loads recipes, sequences steps, and exposes
//! the active card over HTTP or in the terminal.

pub mod config;
pub mod error;
pub mod recipe;
pub mod state;
pub mod presenter;
pub mod api;
pub mod services;
pub mod tasks;
pub mod utils;

// Re-export commonly used types
pub use config::Config;
pub use error::{RecipeError, SessionError};
pub use recipe::{Recipe, RecipeStep};
pub use state::{AppState, CookingSession, StepTimer};
pub use api::create_router;
pub use utils::signals::shutdown_signal;
