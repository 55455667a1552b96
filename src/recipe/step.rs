//! Recipe step records

use serde::{Deserialize, Serialize};

/// One instruction unit in a recipe, optionally timed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipeStep {
    /// Unique within a recipe; timer state is keyed on it
    pub id: String,
    pub instruction: String,
    /// Countdown length in seconds, `None` for an untimed step
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<u64>,
}

impl RecipeStep {
    pub fn new(id: impl Into<String>, instruction: impl Into<String>, duration: Option<u64>) -> Self {
        Self {
            id: id.into(),
            instruction: instruction.into(),
            duration,
        }
    }

    /// Effective countdown length; a zero duration counts as no timer
    pub fn timer_seconds(&self) -> Option<u64> {
        self.duration.filter(|&seconds| seconds > 0)
    }

    /// Whether this step carries a countdown at all
    pub fn has_timer(&self) -> bool {
        self.timer_seconds().is_some()
    }
}

/// A titled, ordered list of steps
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recipe {
    pub title: String,
    pub steps: Vec<RecipeStep>,
}

impl Recipe {
    pub fn new(title: impl Into<String>, steps: Vec<RecipeStep>) -> Self {
        Self {
            title: title.into(),
            steps,
        }
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Total timed seconds across all steps
    pub fn total_duration(&self) -> u64 {
        self.steps.iter().filter_map(RecipeStep::timer_seconds).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_duration_is_untimed() {
        let step = RecipeStep::new("a", "Serve", Some(0));
        assert_eq!(step.timer_seconds(), None);
        assert!(!step.has_timer());
    }

    #[test]
    fn total_duration_skips_untimed_steps() {
        let recipe = Recipe::new(
            "toast",
            vec![
                RecipeStep::new("a", "Slice bread", None),
                RecipeStep::new("b", "Toast", Some(120)),
                RecipeStep::new("c", "Butter", Some(30)),
            ],
        );
        assert_eq!(recipe.total_duration(), 150);
    }
}
