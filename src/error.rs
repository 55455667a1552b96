//! Error types shared across the application

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading a recipe
#[derive(Error, Debug)]
pub enum RecipeError {
    /// The recipe file could not be read
    #[error("Cannot open recipe file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A JSON recipe could not be decoded
    #[error("Invalid JSON recipe: {0}")]
    Json(#[from] serde_json::Error),

    /// Parsing finished without a single usable step
    #[error("No valid steps found in recipe")]
    NoSteps,
}

/// Errors raised by the cooking session controller
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// A session needs at least one step
    #[error("Recipe has no steps")]
    EmptyRecipe,

    /// Requested step does not exist; `index` is 0-based
    #[error("Step {} is out of range (recipe has {total} steps)", .index + 1)]
    StepOutOfRange { index: usize, total: usize },

    /// Two steps share an id, so a step change could go unnoticed
    #[error("Duplicate step id '{0}'")]
    DuplicateStepId(String),

    /// Every step is already done
    #[error("Recipe is already finished")]
    Finished,

    /// The session mutex was poisoned by a panicking holder
    #[error("Failed to lock session state: {0}")]
    Poisoned(String),
}
