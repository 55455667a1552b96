//! Side-effecting services module
//! 
//! This module contains the alarm notifiers and the tone synthesis they use.

pub mod alarm;
pub mod tones;

// Re-export main types
pub use alarm::{build_alarm, AlarmError, AlarmNotifier, BellAlarm, SilentAlarm, ToneAlarm};
