//! Configuration and CLI argument handling

use std::{path::PathBuf, time::Duration};

use clap::{Parser, ValueEnum};

/// Default raw-PCM player; must match the synthesized sample format
pub const DEFAULT_PLAYER: &str = "aplay -q -t raw -f S16_LE -r 22050 -c 1";

/// How the countdown-finished alarm is sounded
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum AlarmKind {
    /// Synthesized three-tone chime through an external player
    Tone,
    /// Terminal bell
    Bell,
    /// Log only
    Silent,
}

/// CLI argument parsing structure
#[derive(Debug, Parser)]
#[command(name = "cooking-assistant")]
#[command(about = "A guided cooking assistant with per-step countdown timers")]
#[command(version)]
pub struct Config {
    /// Recipe file: `seconds|description` lines, or a .json recipe
    pub recipe: PathBuf,

    /// Port to bind the server to
    #[arg(short, long, default_value = "20554")]
    pub port: u16,

    /// Host address to bind to
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,

    /// Alarm output when a step timer finishes
    #[arg(short, long, value_enum, default_value_t = AlarmKind::Tone)]
    pub alarm: AlarmKind,

    /// Player command fed raw 16-bit mono PCM at 22050 Hz on stdin
    #[arg(long, default_value = DEFAULT_PLAYER)]
    pub player: String,

    /// Guide through the recipe in this terminal instead of serving HTTP
    #[arg(short, long)]
    pub interactive: bool,

    /// Countdown tick period in milliseconds
    #[arg(long, default_value = "1000", hide = true)]
    pub tick_ms: u64,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Config {
    /// Parse configuration from command line arguments
    pub fn parse() -> Self {
        Parser::parse()
    }

    /// Get the server address as a formatted string
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Interval between countdown ticks, never zero
    pub fn tick_period(&self) -> Duration {
        Duration::from_millis(self.tick_ms.max(1))
    }

    /// Get the appropriate log level based on flags
    ///
    /// Interactive mode shares the terminal with the rendered card, so
    /// only warnings get through unless verbose output was requested.
    pub fn log_level(&self) -> &'static str {
        match (self.verbose, self.interactive) {
            (true, _) => "debug",
            (false, true) => "warn",
            (false, false) => "info",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = Config::try_parse_from(["cooking-assistant", "omelette.txt"]).unwrap();
        assert_eq!(config.recipe, PathBuf::from("omelette.txt"));
        assert_eq!(config.address(), "127.0.0.1:20554");
        assert_eq!(config.alarm, AlarmKind::Tone);
        assert_eq!(config.player, DEFAULT_PLAYER);
        assert_eq!(config.tick_period(), Duration::from_secs(1));
        assert_eq!(config.log_level(), "info");
    }

    #[test]
    fn interactive_quiets_logging_unless_verbose() {
        let config = Config::try_parse_from(["cooking-assistant", "-i", "r.txt"]).unwrap();
        assert_eq!(config.log_level(), "warn");

        let config = Config::try_parse_from(["cooking-assistant", "-i", "-v", "r.txt"]).unwrap();
        assert_eq!(config.log_level(), "debug");
    }

    #[test]
    fn parses_alarm_kind_and_clamps_tick() {
        let config = Config::try_parse_from([
            "cooking-assistant",
            "--alarm",
            "bell",
            "--tick-ms",
            "0",
            "r.txt",
        ])
        .unwrap();
        assert_eq!(config.alarm, AlarmKind::Bell);
        assert_eq!(config.tick_period(), Duration::from_millis(1));
    }
}
