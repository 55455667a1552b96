//! Step sequencing for one pass through a recipe

use std::{collections::HashSet, sync::Arc};

use serde::Serialize;
use tracing::info;

use super::{
    step_card::StepCard,
    timer_state::{PrimaryAction, TickOutcome, TimerSnapshot},
};
use crate::{
    error::SessionError,
    presenter::{present, StepView},
    recipe::{Recipe, RecipeStep},
    services::AlarmNotifier,
    tasks::Ticker,
};

/// What a primary action on the session led to
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum ActionResult {
    /// The countdown changed state on the active step
    Timer { step_id: String, action: PrimaryAction },
    /// The active step was completed and the next one activated
    Advanced { completed: usize, active: usize },
    /// The last step was completed
    Finished { completed: usize },
}

/// Drives a recipe step by step and owns the card of the active step
#[derive(Debug)]
pub struct CookingSession {
    recipe: Recipe,
    /// Index of the active step, `None` once every step is done
    active: Option<usize>,
    completed: Vec<bool>,
    card: Option<StepCard>,
    alarm: Arc<dyn AlarmNotifier>,
    /// Bumped whenever the tick source of the active card is replaced;
    /// ticks carrying an older value are stale
    tick_generation: u64,
}

impl CookingSession {
    /// Start a session with the first step active
    pub fn new(recipe: Recipe, alarm: Arc<dyn AlarmNotifier>) -> Result<Self, SessionError> {
        if recipe.is_empty() {
            return Err(SessionError::EmptyRecipe);
        }

        let mut ids = HashSet::new();
        if let Some(step) = recipe.steps.iter().find(|step| !ids.insert(step.id.as_str())) {
            return Err(SessionError::DuplicateStepId(step.id.clone()));
        }

        let completed = vec![false; recipe.len()];
        let card = StepCard::new(recipe.steps[0].clone(), Arc::clone(&alarm));
        info!("Starting recipe '{}' ({} steps)", recipe.title, recipe.len());

        Ok(Self {
            recipe,
            active: Some(0),
            completed,
            card: Some(card),
            alarm,
            tick_generation: 0,
        })
    }

    pub fn recipe(&self) -> &Recipe {
        &self.recipe
    }

    pub fn total_steps(&self) -> usize {
        self.recipe.len()
    }

    /// 0-based index of the active step
    pub fn active_index(&self) -> Option<usize> {
        self.active
    }

    pub fn active_step(&self) -> Option<&RecipeStep> {
        self.active.map(|index| &self.recipe.steps[index])
    }

    pub fn is_finished(&self) -> bool {
        self.active.is_none()
    }

    pub fn completed_count(&self) -> usize {
        self.completed.iter().filter(|&&done| done).count()
    }

    /// Generation a tick source scheduled right now must carry
    pub fn tick_generation(&self) -> u64 {
        self.tick_generation
    }

    /// Countdown state of the active step, a blank one once finished
    pub fn timer_snapshot(&self) -> TimerSnapshot {
        self.card
            .as_ref()
            .map(StepCard::snapshot)
            .unwrap_or_default()
    }

    /// Press the primary action of the active step
    pub fn primary_action(&mut self) -> Result<ActionResult, SessionError> {
        let (Some(index), Some(card)) = (self.active, self.card.as_mut()) else {
            return Err(SessionError::Finished);
        };

        // The card drops its tick source on every press
        self.tick_generation += 1;
        match card.primary_action() {
            PrimaryAction::Advance => Ok(self.complete_active(index)),
            action => Ok(ActionResult::Timer {
                step_id: card.step_id().to_string(),
                action,
            }),
        }
    }

    /// Step-complete notification: mark `index` done and move on
    fn complete_active(&mut self, index: usize) -> ActionResult {
        self.completed[index] = true;
        info!("Step {} of {} completed", index + 1, self.total_steps());

        let next = index + 1;
        if next < self.total_steps() {
            self.activate(next);
            ActionResult::Advanced {
                completed: index,
                active: next,
            }
        } else {
            self.active = None;
            self.card = None;
            info!("Recipe '{}' finished", self.recipe.title);
            ActionResult::Finished { completed: index }
        }
    }

    fn activate(&mut self, index: usize) {
        let step = &self.recipe.steps[index];
        match self.card.as_mut() {
            Some(card) => {
                if card.show(step) {
                    self.tick_generation += 1;
                }
            }
            None => {
                self.tick_generation += 1;
                self.card = Some(StepCard::new(step.clone(), Arc::clone(&self.alarm)));
            }
        }
        self.active = Some(index);
    }

    /// Jump to any step; earlier steps count as done, later ones as upcoming
    pub fn go_to(&mut self, index: usize) -> Result<(), SessionError> {
        let total = self.total_steps();
        if index >= total {
            return Err(SessionError::StepOutOfRange { index, total });
        }

        for (position, done) in self.completed.iter_mut().enumerate() {
            *done = position < index;
        }
        self.activate(index);
        info!("Jumped to step {} of {}", index + 1, total);
        Ok(())
    }

    /// Throw away all progress and start again from the first step
    pub fn restart(&mut self) {
        self.card = None;
        self.completed.iter_mut().for_each(|done| *done = false);
        self.activate(0);
        info!("Restarted recipe '{}'", self.recipe.title);
    }

    /// Tick the active card if it still shows `step_id` and `generation` is current
    ///
    /// A tick already waiting on the session lock when its ticker was
    /// cancelled arrives with an old generation and is ignored.
    pub fn tick(&mut self, step_id: &str, generation: u64) -> TickOutcome {
        if generation != self.tick_generation {
            return TickOutcome::Ignored;
        }
        match self.card.as_mut() {
            Some(card) if card.step_id() == step_id => card.tick(),
            _ => TickOutcome::Ignored,
        }
    }

    /// Hand a tick source to the active card if it is still the current one
    pub fn attach_ticker(&mut self, step_id: &str, generation: u64, ticker: Ticker) {
        match self.card.as_mut() {
            Some(card) if card.step_id() == step_id && generation == self.tick_generation => {
                card.attach_ticker(ticker)
            }
            _ => ticker.cancel(),
        }
    }

    /// Presenter output for every step, in order
    pub fn views(&self) -> Vec<StepView> {
        let total = self.total_steps();
        self.recipe
            .steps
            .iter()
            .enumerate()
            .map(|(index, step)| {
                let is_active = self.active == Some(index);
                let is_completed = self.completed[index];
                match (&self.card, is_active) {
                    (Some(card), true) => card.present(is_active, is_completed, index + 1, total),
                    _ => present(
                        step,
                        is_active,
                        is_completed,
                        index + 1,
                        total,
                        &TimerSnapshot::fresh(step.duration),
                    ),
                }
            })
            .collect()
    }

    /// Presenter output for the active step only
    pub fn active_view(&self) -> Option<StepView> {
        let index = self.active?;
        self.views().into_iter().nth(index)
    }
}
