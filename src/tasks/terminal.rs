//! Interactive terminal front end
//!
//! ENTER presses the primary action, a number jumps to that step, `r`
//! restarts and `q` quits. The screen is redrawn on every input, timer
//! update and session event.

use std::sync::Arc;

use tokio::{
    io::{self, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader},
    sync::broadcast::error::RecvError,
};
use tracing::{info, warn};

use crate::{presenter::render_session, state::AppState};

const CLEAR_SCREEN: &str = "\x1b[2J\x1b[H";
const HELP: &str = "ENTER: start / pause / resume / done   <n>: go to step   r: restart   q: quit";
const FINISHED: &str = "All steps completed! Enjoy your meal!";

/// One line of user input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TerminalCommand {
    Primary,
    /// 1-based step number
    GoTo(usize),
    Restart,
    Quit,
    Unknown(String),
}

impl TerminalCommand {
    pub fn parse(input: &str) -> Self {
        let input = input.trim();
        match input.to_ascii_lowercase().as_str() {
            "" => TerminalCommand::Primary,
            "q" | "quit" | "exit" => TerminalCommand::Quit,
            "r" | "restart" => TerminalCommand::Restart,
            other => match other.parse::<usize>() {
                Ok(number) if number > 0 => TerminalCommand::GoTo(number),
                _ => TerminalCommand::Unknown(input.to_string()),
            },
        }
    }
}

async fn redraw<W>(state: &AppState, out: &mut W, notice: Option<&str>) -> io::Result<()>
where
    W: AsyncWrite + Unpin,
{
    let (title, views) = match state.title_and_views() {
        Ok(rendered) => rendered,
        Err(e) => {
            warn!("Cannot render session: {}", e);
            return Ok(());
        }
    };

    let mut screen = String::from(CLEAR_SCREEN);
    screen.push_str(&render_session(&title, &views));
    screen.push('\n');
    if let Some(notice) = notice {
        screen.push_str(notice);
        screen.push('\n');
    }
    screen.push_str(HELP);
    screen.push('\n');

    out.write_all(screen.as_bytes()).await?;
    out.flush().await
}

/// Apply one command; returns a message to show, or `None` to quit
fn apply(state: &Arc<AppState>, command: TerminalCommand) -> Option<String> {
    let outcome = match command {
        TerminalCommand::Quit => return None,
        TerminalCommand::Primary => state.primary_action().map(|_| ()),
        TerminalCommand::GoTo(number) => state.go_to(number - 1),
        TerminalCommand::Restart => state.restart(),
        TerminalCommand::Unknown(input) => {
            return Some(format!("Unknown command '{}'", input));
        }
    };

    Some(match outcome {
        Ok(()) => String::new(),
        Err(e) => {
            warn!("Command failed: {}", e);
            e.to_string()
        }
    })
}

/// Run the guided flow on stdin/stdout until the recipe is done or the user quits
pub async fn run_terminal(state: Arc<AppState>) -> io::Result<()> {
    info!("Starting interactive terminal");

    let mut lines = BufReader::new(io::stdin()).lines();
    let mut stdout = io::stdout();
    let mut timer_rx = state.watch_timer();
    let mut events = state.subscribe();
    let mut notice = String::new();

    redraw(&state, &mut stdout, None).await?;

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(input) = line? else {
                    info!("Input closed, leaving interactive mode");
                    break;
                };
                match apply(&state, TerminalCommand::parse(&input)) {
                    Some(message) => notice = message,
                    None => break,
                }
            }
            changed = timer_rx.changed() => {
                if changed.is_err() {
                    break;
                }
            }
            event = events.recv() => {
                match event {
                    Ok(_) | Err(RecvError::Lagged(_)) => {}
                    Err(RecvError::Closed) => break,
                }
            }
        }

        if state.is_finished().unwrap_or(false) {
            redraw(&state, &mut stdout, Some(FINISHED)).await?;
            break;
        }

        let shown = (!notice.is_empty()).then_some(notice.as_str());
        redraw(&state, &mut stdout, shown).await?;
    }

    Ok(())
}
