//! Alarm tone synthesis

use std::f32::consts::PI;

/// Output sample rate for synthesized tones
pub const SAMPLE_RATE: u32 = 22_050;

const PEAK_GAIN: f32 = 0.3;
const FLOOR_GAIN: f32 = 0.01;

/// A single sine beep placed on the pattern's timeline
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tone {
    pub frequency_hz: f32,
    pub start_secs: f32,
    pub duration_secs: f32,
}

impl Tone {
    const fn new(frequency_hz: f32, start_secs: f32, duration_secs: f32) -> Self {
        Self {
            frequency_hz,
            start_secs,
            duration_secs,
        }
    }

    fn end_secs(&self) -> f32 {
        self.start_secs + self.duration_secs
    }
}

/// Two short A5 beeps followed by a longer C6
pub const ALARM_PATTERN: [Tone; 3] = [
    Tone::new(880.0, 0.0, 0.2),
    Tone::new(880.0, 0.3, 0.2),
    Tone::new(1046.0, 0.6, 0.4),
];

/// Render a tone pattern as mono 16-bit samples
///
/// Each tone fades exponentially from the peak gain down to the floor
/// gain over its own duration. Overlapping tones are summed.
pub fn render_pattern(pattern: &[Tone], sample_rate: u32) -> Vec<i16> {
    let rate = sample_rate as f32;
    let total_secs = pattern.iter().map(Tone::end_secs).fold(0.0, f32::max);
    let mut mix = vec![0.0f32; (total_secs * rate).ceil() as usize];

    for tone in pattern {
        let first = (tone.start_secs * rate) as usize;
        let length = (tone.duration_secs * rate) as usize;

        for n in 0..length {
            let Some(slot) = mix.get_mut(first + n) else {
                break;
            };
            let t = n as f32 / rate;
            let gain = PEAK_GAIN * (FLOOR_GAIN / PEAK_GAIN).powf(t / tone.duration_secs);
            *slot += gain * (2.0 * PI * tone.frequency_hz * t).sin();
        }
    }

    mix.into_iter()
        .map(|sample| (sample.clamp(-1.0, 1.0) * i16::MAX as f32) as i16)
        .collect()
}

/// Little-endian PCM bytes, as raw-stream players expect them
pub fn to_le_bytes(samples: &[i16]) -> Vec<u8> {
    samples.iter().flat_map(|sample| sample.to_le_bytes()).collect()
}
