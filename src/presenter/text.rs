//! Plain-text rendering for the terminal front end

use super::view::{ActiveCard, ProgressDot, StepView};

const STRIKE: &str = "\x1b[9m";
const DIM: &str = "\x1b[2m";
const RESET: &str = "\x1b[0m";
const BAR_WIDTH: usize = 30;

fn progress_strip(dots: &[ProgressDot]) -> String {
    dots.iter()
        .map(|dot| match dot {
            ProgressDot::Done => "━━",
            ProgressDot::Current => "━━━",
            ProgressDot::Future => "·",
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn progress_bar(percent: f64) -> String {
    let filled = ((percent.clamp(0.0, 100.0) / 100.0) * BAR_WIDTH as f64).round() as usize;
    format!("[{}{}]", "#".repeat(filled), "-".repeat(BAR_WIDTH - filled))
}

fn render_card(card: &ActiveCard) -> String {
    let mut lines = vec![
        format!("({}) {}", card.number, card.heading),
        format!("    {}", progress_strip(&card.progress)),
        String::new(),
    ];
    lines.extend(card.instruction.lines().map(|line| format!("  {}", line)));
    lines.push(String::new());

    if let Some(panel) = &card.timer_panel {
        lines.push(format!(
            "  ⏲ {}  {} {:>3.0}%",
            panel.label,
            progress_bar(panel.progress),
            panel.progress
        ));
    }
    if card.timer_complete {
        lines.push("  ✓ Timer complete!".to_string());
    }

    lines.push(format!("  [ {} {} ]", card.primary.icon(), card.primary.text()));
    lines.join("\n")
}

/// Render one step the way the terminal shows it
pub fn render_view(view: &StepView) -> String {
    match view {
        StepView::Upcoming {
            number,
            instruction,
            duration_label,
        } => match duration_label {
            Some(label) => format!("{DIM}  {:>2}. {}  ⏱ {}{RESET}", number, instruction, label),
            None => format!("{DIM}  {:>2}. {}{RESET}", number, instruction),
        },
        StepView::Completed {
            number: _,
            instruction,
        } => format!("   ✓ {STRIKE}{}{RESET}", instruction.lines().next().unwrap_or("")),
        StepView::Active(card) => render_card(card),
    }
}

/// Render the whole recipe, one block per step
pub fn render_session(title: &str, views: &[StepView]) -> String {
    let mut out = format!("=== {} ===\n\n", title);
    for view in views {
        let block = render_view(view);
        if matches!(view, StepView::Active(_)) {
            out.push_str(&format!("\n{}\n\n", block));
        } else {
            out.push_str(&block);
            out.push('\n');
        }
    }
    out
}
