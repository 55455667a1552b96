//! Display-state selection for a single step

use serde::{Deserialize, Serialize};

use crate::{
    recipe::RecipeStep,
    state::timer_state::{TimerPhase, TimerSnapshot},
    utils::format_time,
};

/// Upcoming rows show at most this many characters of the instruction
pub const SUMMARY_WIDTH: usize = 60;

/// How one step is drawn
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum StepView {
    /// Compact row for a step not reached yet
    Upcoming {
        number: usize,
        instruction: String,
        duration_label: Option<String>,
    },
    /// Row with a check mark and struck-through text
    Completed { number: usize, instruction: String },
    /// Full card for the step being cooked
    Active(ActiveCard),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActiveCard {
    pub number: usize,
    pub total_steps: usize,
    pub heading: String,
    pub progress: Vec<ProgressDot>,
    pub instruction: String,
    /// Present while a started countdown has not finished
    pub timer_panel: Option<TimerPanel>,
    pub timer_complete: bool,
    pub primary: PrimaryControl,
}

/// One marker in the across-all-steps progress strip
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProgressDot {
    Done,
    Current,
    Future,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimerPanel {
    pub running: bool,
    pub label: String,
    /// Elapsed share of the countdown, 0 to 100
    pub progress: f64,
}

/// Content of the single primary action control
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PrimaryControl {
    StartTimer { duration: String },
    Pause { remaining: String },
    Resume { remaining: String },
    Done,
}

impl PrimaryControl {
    pub fn icon(&self) -> &'static str {
        match self {
            PrimaryControl::StartTimer { .. } | PrimaryControl::Resume { .. } => "▶",
            PrimaryControl::Pause { .. } => "⏸",
            PrimaryControl::Done => "✓",
        }
    }

    /// Button text without the icon
    pub fn text(&self) -> String {
        match self {
            PrimaryControl::StartTimer { duration } => format!("Start Timer {}", duration),
            PrimaryControl::Pause { remaining } => format!("{}  Tap to pause", remaining),
            PrimaryControl::Resume { remaining } => format!("{}  Tap to resume", remaining),
            PrimaryControl::Done => "Done with this step ›".to_string(),
        }
    }
}

/// Cut `text` down to its first line and at most `width` characters
pub fn summarize(text: &str, width: usize) -> String {
    let first_line = text.lines().next().unwrap_or("").trim_end();
    let multi_line = text.trim_end().contains('\n');

    if first_line.chars().count() > width {
        let kept: String = first_line.chars().take(width.saturating_sub(1)).collect();
        format!("{}…", kept.trim_end())
    } else if multi_line {
        format!("{}…", first_line)
    } else {
        first_line.to_string()
    }
}

fn primary_control(timer: &TimerSnapshot) -> PrimaryControl {
    match timer.phase {
        TimerPhase::NoTimer | TimerPhase::Completed => PrimaryControl::Done,
        TimerPhase::Idle => PrimaryControl::StartTimer {
            duration: format_time(timer.duration.unwrap_or(0)),
        },
        TimerPhase::Running => PrimaryControl::Pause {
            remaining: format_time(timer.remaining_seconds),
        },
        TimerPhase::Paused => PrimaryControl::Resume {
            remaining: format_time(timer.remaining_seconds),
        },
    }
}

fn progress_dots(step_number: usize, total_steps: usize) -> Vec<ProgressDot> {
    (1..=total_steps)
        .map(|n| match n.cmp(&step_number) {
            std::cmp::Ordering::Less => ProgressDot::Done,
            std::cmp::Ordering::Equal => ProgressDot::Current,
            std::cmp::Ordering::Greater => ProgressDot::Future,
        })
        .collect()
}

/// Select how `step` is drawn right now
///
/// `step_number` is 1-based. The result depends on nothing but the
/// arguments, so it can be recomputed at any moment.
pub fn present(
    step: &RecipeStep,
    is_active: bool,
    is_completed: bool,
    step_number: usize,
    total_steps: usize,
    timer: &TimerSnapshot,
) -> StepView {
    if is_completed {
        return StepView::Completed {
            number: step_number,
            instruction: step.instruction.clone(),
        };
    }

    if !is_active {
        return StepView::Upcoming {
            number: step_number,
            instruction: summarize(&step.instruction, SUMMARY_WIDTH),
            duration_label: step.timer_seconds().map(format_time),
        };
    }

    let timer_panel = (timer.started && !timer.completed).then(|| TimerPanel {
        running: timer.running,
        label: if timer.running { "Timer running" } else { "Timer paused" }.to_string(),
        progress: timer.progress,
    });

    StepView::Active(ActiveCard {
        number: step_number,
        total_steps,
        heading: format!("Step {} of {}", step_number, total_steps),
        progress: progress_dots(step_number, total_steps),
        instruction: step.instruction.clone(),
        timer_panel,
        timer_complete: timer.completed,
        primary: primary_control(timer),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::timer_state::StepTimer;

    fn active(step: &RecipeStep, timer: &StepTimer) -> ActiveCard {
        match present(step, true, false, 2, 4, &timer.snapshot()) {
            StepView::Active(card) => card,
            other => panic!("expected active card, got {other:?}"),
        }
    }

    #[test]
    fn upcoming_row_is_compact() {
        let step = RecipeStep::new("a", "Chop the onions\nthen the garlic", Some(300));
        let view = present(&step, false, false, 3, 5, &TimerSnapshot::fresh(Some(300)));
        assert_eq!(
            view,
            StepView::Upcoming {
                number: 3,
                instruction: "Chop the onions…".to_string(),
                duration_label: Some("05:00".to_string()),
            }
        );

        let untimed = RecipeStep::new("b", "Serve", Some(0));
        let view = present(&untimed, false, false, 4, 5, &TimerSnapshot::fresh(Some(0)));
        assert!(matches!(view, StepView::Upcoming { duration_label: None, .. }));
    }

    #[test]
    fn completed_flag_wins_over_active() {
        let step = RecipeStep::new("a", "Whisk", None);
        let view = present(&step, true, true, 1, 2, &TimerSnapshot::default());
        assert_eq!(
            view,
            StepView::Completed {
                number: 1,
                instruction: "Whisk".to_string()
            }
        );
    }

    #[test]
    fn idle_card_offers_to_start_timer() {
        let step = RecipeStep::new("a", "Simmer", Some(90));
        let card = active(&step, &StepTimer::new(step.duration));

        assert_eq!(card.heading, "Step 2 of 4");
        assert_eq!(
            card.progress,
            [ProgressDot::Done, ProgressDot::Current, ProgressDot::Future, ProgressDot::Future]
        );
        assert_eq!(card.timer_panel, None);
        assert!(!card.timer_complete);
        assert_eq!(card.primary, PrimaryControl::StartTimer { duration: "01:30".to_string() });
        assert_eq!(card.primary.text(), "Start Timer 01:30");
    }

    #[test]
    fn running_and_paused_cards_show_live_countdown() {
        let step = RecipeStep::new("a", "Simmer", Some(10));
        let mut timer = StepTimer::new(step.duration);
        timer.primary_action();
        timer.tick();

        let card = active(&step, &timer);
        let panel = card.timer_panel.expect("panel while running");
        assert!(panel.running);
        assert_eq!(panel.label, "Timer running");
        assert_eq!(panel.progress, 10.0);
        assert_eq!(card.primary, PrimaryControl::Pause { remaining: "00:09".to_string() });
        assert_eq!(card.primary.icon(), "⏸");

        timer.primary_action();
        let card = active(&step, &timer);
        assert_eq!(card.timer_panel.map(|p| p.label), Some("Timer paused".to_string()));
        assert_eq!(card.primary.text(), "00:09  Tap to resume");
    }

    #[test]
    fn finished_or_untimed_cards_offer_done() {
        let step = RecipeStep::new("a", "Rest", Some(1));
        let mut timer = StepTimer::new(step.duration);
        timer.primary_action();
        timer.tick();

        let card = active(&step, &timer);
        assert_eq!(card.timer_panel, None);
        assert!(card.timer_complete);
        assert_eq!(card.primary, PrimaryControl::Done);

        let untimed = RecipeStep::new("b", "Plate up", None);
        let card = active(&untimed, &StepTimer::new(None));
        assert_eq!(card.timer_panel, None);
        assert!(!card.timer_complete);
        assert_eq!(card.primary, PrimaryControl::Done);
    }

    #[test]
    fn summarize_truncates_long_lines() {
        let long = "a".repeat(80);
        let summary = summarize(&long, 10);
        assert_eq!(summary.chars().count(), 10);
        assert!(summary.ends_with('…'));
        assert_eq!(summarize("short", 10), "short");
    }
}
