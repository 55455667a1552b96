//! Recipe file loading
//!
//! Plain-text recipes hold one step per line as `seconds|description`.
//! Blank lines and `#` comments are ignored; malformed lines are skipped
//! with a warning. Files ending in `.json` are decoded as a [`Recipe`] whose
//! step ids may be omitted.

use std::{collections::HashSet, path::Path};

use serde::Deserialize;
use tracing::{debug, info, warn};

use super::step::{Recipe, RecipeStep};
use crate::{error::RecipeError, utils::format_time};

const DELIMITER: char = '|';

#[derive(Debug, Deserialize)]
struct RecipeFile {
    title: Option<String>,
    steps: Vec<StepEntry>,
}

#[derive(Debug, Deserialize)]
struct StepEntry {
    id: Option<String>,
    instruction: String,
    duration: Option<u64>,
}

fn step_id(position: usize) -> String {
    format!("step-{}", position + 1)
}

/// Load a recipe from disk, picking the format from the file extension
pub async fn load_recipe(path: &Path) -> Result<Recipe, RecipeError> {
    let text = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| RecipeError::Io {
            path: path.to_path_buf(),
            source,
        })?;

    let title = path
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| "Recipe".to_string());

    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

    let recipe = if is_json {
        parse_recipe_json(&title, &text)?
    } else {
        parse_recipe_text(&title, &text)?
    };

    info!(
        "Loaded recipe '{}' with {} steps ({} timed)",
        recipe.title,
        recipe.len(),
        format_time(recipe.total_duration())
    );
    Ok(recipe)
}

/// Parse the `seconds|description` line format
pub fn parse_recipe_text(title: &str, text: &str) -> Result<Recipe, RecipeError> {
    let mut steps = Vec::new();

    for (index, raw_line) in text.lines().enumerate() {
        let line_number = index + 1;

        if raw_line.trim().is_empty() || raw_line.starts_with('#') {
            continue;
        }

        let Some((seconds, description)) = raw_line.split_once(DELIMITER) else {
            warn!("Missing '{}' at line {}, skipping", DELIMITER, line_number);
            continue;
        };

        let seconds = seconds.trim();
        let description = description.trim();

        if seconds.is_empty() || description.is_empty() {
            warn!("Empty duration or description at line {}, skipping", line_number);
            continue;
        }

        let duration = match seconds.parse::<i64>() {
            Ok(value) if value < 0 => {
                warn!("Negative duration at line {}, skipping", line_number);
                continue;
            }
            Ok(value) => value as u64,
            Err(_) => {
                warn!("Invalid duration '{}' at line {}, skipping", seconds, line_number);
                continue;
            }
        };

        debug!("Parsed step at line {}: {}s '{}'", line_number, duration, description);
        steps.push(RecipeStep::new(step_id(steps.len()), description, Some(duration)));
    }

    if steps.is_empty() {
        return Err(RecipeError::NoSteps);
    }

    Ok(Recipe::new(title, steps))
}

/// Parse a JSON recipe, filling in missing or duplicate step ids
///
/// Generated ids never collide with an id spelled out anywhere in the file.
pub fn parse_recipe_json(default_title: &str, text: &str) -> Result<Recipe, RecipeError> {
    let file: RecipeFile = serde_json::from_str(text)?;
    let explicit: HashSet<String> = file.steps.iter().filter_map(|entry| entry.id.clone()).collect();
    let mut used = HashSet::new();

    let mut steps = Vec::with_capacity(file.steps.len());
    for (position, entry) in file.steps.into_iter().enumerate() {
        let id = match entry.id {
            Some(id) if !used.contains(&id) => id,
            original => {
                let mut candidate = position;
                while explicit.contains(&step_id(candidate)) || used.contains(&step_id(candidate)) {
                    candidate += 1;
                }
                let id = step_id(candidate);
                if let Some(original) = original {
                    warn!("Duplicate step id '{}', replacing with {}", original, id);
                }
                id
            }
        };
        used.insert(id.clone());
        steps.push(RecipeStep::new(id, entry.instruction.trim(), entry.duration));
    }

    if steps.is_empty() {
        return Err(RecipeError::NoSteps);
    }

    let title = file.title.unwrap_or_else(|| default_title.to_string());
    Ok(Recipe::new(title, steps))
}
