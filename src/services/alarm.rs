//! Audible alarm played when a countdown finishes
//!
//! Every notifier is fire-and-forget: `play` returns immediately and any
//! playback failure is logged and dropped, never surfaced to the timer.

use std::{process::Stdio, sync::Arc, time::Duration};

use thiserror::Error;
use tokio::{
    io::AsyncWriteExt,
    process::Command,
    runtime::Handle,
    time::sleep,
};
use tracing::{debug, info, warn};

use super::tones::{render_pattern, to_le_bytes, ALARM_PATTERN, SAMPLE_RATE};
use crate::config::{AlarmKind, Config};

/// Gaps between the three beeps of the bell pattern
const BELL_OFFSETS_MS: [u64; 3] = [0, 300, 600];

/// Errors that can occur while producing the alarm sound
#[derive(Error, Debug)]
pub enum AlarmError {
    /// The configured player command could not be split into arguments
    #[error("Invalid player command: {0:?}")]
    InvalidPlayer(String),

    /// The player process could not be started or fed
    #[error("Failed to run player: {0}")]
    Io(#[from] std::io::Error),

    /// The player exited unsuccessfully
    #[error("Player exited with {0}")]
    PlayerFailed(std::process::ExitStatus),
}

/// Capability to sound the countdown-finished alarm
pub trait AlarmNotifier: Send + Sync + std::fmt::Debug {
    /// Start the alarm and return without waiting for it
    fn play(&self);
}

/// Pick the notifier selected on the command line
pub fn build_alarm(config: &Config) -> Result<Arc<dyn AlarmNotifier>, AlarmError> {
    let alarm: Arc<dyn AlarmNotifier> = match config.alarm {
        AlarmKind::Tone => Arc::new(ToneAlarm::from_command_line(&config.player)?),
        AlarmKind::Bell => Arc::new(BellAlarm),
        AlarmKind::Silent => Arc::new(SilentAlarm),
    };
    info!("Alarm output: {:?}", config.alarm);
    Ok(alarm)
}

fn spawn_detached<F>(task: F)
where
    F: std::future::Future<Output = ()> + Send + 'static,
{
    match Handle::try_current() {
        Ok(handle) => {
            handle.spawn(task);
        }
        Err(e) => warn!("No async runtime for alarm playback: {}", e),
    }
}

/// Synthesizes the three-tone pattern and pipes it to an external player
#[derive(Debug, Clone)]
pub struct ToneAlarm {
    command: Vec<String>,
    pcm: Arc<[u8]>,
}

impl ToneAlarm {
    /// Build from an argv; the player must read raw S16LE mono PCM on stdin
    pub fn new(command: Vec<String>) -> Result<Self, AlarmError> {
        if command.is_empty() {
            return Err(AlarmError::InvalidPlayer(String::new()));
        }

        let pcm = to_le_bytes(&render_pattern(&ALARM_PATTERN, SAMPLE_RATE));
        Ok(Self {
            command,
            pcm: pcm.into(),
        })
    }

    /// Build from a shell-style command line such as `aplay -q -t raw ...`
    pub fn from_command_line(line: &str) -> Result<Self, AlarmError> {
        let command = shlex::split(line).ok_or_else(|| AlarmError::InvalidPlayer(line.to_string()))?;
        Self::new(command).map_err(|_| AlarmError::InvalidPlayer(line.to_string()))
    }

    pub fn command(&self) -> &[String] {
        &self.command
    }

    async fn run_player(command: &[String], pcm: &[u8]) -> Result<(), AlarmError> {
        let (program, args) = command
            .split_first()
            .ok_or_else(|| AlarmError::InvalidPlayer(String::new()))?;

        let mut child = Command::new(program)
            .args(args)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin.write_all(pcm).await?;
            // Closing stdin lets the player drain and exit
            drop(stdin);
        }

        let status = child.wait().await?;
        if !status.success() {
            return Err(AlarmError::PlayerFailed(status));
        }

        debug!("Alarm playback finished");
        Ok(())
    }
}

impl AlarmNotifier for ToneAlarm {
    fn play(&self) {
        info!("Timer complete, playing alarm via {}", self.command[0]);
        let command = self.command.clone();
        let pcm = Arc::clone(&self.pcm);

        spawn_detached(async move {
            if let Err(e) = Self::run_player(&command, &pcm).await {
                warn!("Alarm playback failed: {}", e);
            }
        });
    }
}

/// Rings the terminal bell three times
#[derive(Debug, Clone, Copy, Default)]
pub struct BellAlarm;

impl AlarmNotifier for BellAlarm {
    fn play(&self) {
        info!("Timer complete, ringing terminal bell");

        spawn_detached(async {
            let mut stdout = tokio::io::stdout();
            let mut elapsed = 0;
            for offset in BELL_OFFSETS_MS {
                sleep(Duration::from_millis(offset - elapsed)).await;
                elapsed = offset;
                if let Err(e) = stdout.write_all(b"\x07").await {
                    warn!("Failed to ring terminal bell: {}", e);
                    return;
                }
                let _ = stdout.flush().await;
            }
        });
    }
}

/// Logs the alarm without making a sound
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentAlarm;

impl AlarmNotifier for SilentAlarm {
    fn play(&self) {
        info!("Timer complete (alarm muted)");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_player_command_line() {
        let alarm = ToneAlarm::from_command_line("aplay -q -t raw -f 'S16_LE'").unwrap();
        assert_eq!(alarm.command(), ["aplay", "-q", "-t", "raw", "-f", "S16_LE"]);
    }

    #[test]
    fn rejects_empty_or_unbalanced_player() {
        assert!(matches!(
            ToneAlarm::from_command_line("   "),
            Err(AlarmError::InvalidPlayer(_))
        ));
        assert!(matches!(
            ToneAlarm::from_command_line("aplay 'unterminated"),
            Err(AlarmError::InvalidPlayer(_))
        ));
    }

    #[test]
    fn play_without_runtime_does_not_panic() {
        ToneAlarm::new(vec!["true".to_string()]).unwrap().play();
        BellAlarm.play();
        SilentAlarm.play();
    }

    #[tokio::test]
    async fn missing_player_is_reported_not_raised() {
        let command = vec!["/nonexistent/alarm-player".to_string()];
        let err = ToneAlarm::run_player(&command, b"\0\0").await.unwrap_err();
        assert!(matches!(err, AlarmError::Io(_)));

        // The public entry point swallows the same failure
        ToneAlarm::new(command).unwrap().play();
    }
}
