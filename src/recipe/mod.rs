//! Recipe data module
//!
//! Step records and the loaders that read them from disk.

pub mod loader;
pub mod step;

pub use loader::{load_recipe, parse_recipe_text};
pub use step::{Recipe, RecipeStep};
