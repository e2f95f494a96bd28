//! Alarm sound catalog and tone event definitions

use std::{fmt, str::FromStr, time::Duration};

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Oscillator waveform of a single tone event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WaveShape {
    Sine,
    Square,
    Sawtooth,
    Triangle,
}

/// One scheduled waveform segment within an alarm sound
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ToneEvent {
    pub frequency_hz: f32,
    pub shape: WaveShape,
    /// Delay between the play call and the tone onset
    pub start_offset: Duration,
    pub duration: Duration,
    /// Starting amplitude, decays exponentially over `duration`
    pub peak: f32,
}

impl ToneEvent {
    pub const fn new(
        frequency_hz: f32,
        shape: WaveShape,
        start_ms: u64,
        duration_ms: u64,
        peak: f32,
    ) -> Self {
        Self {
            frequency_hz,
            shape,
            start_offset: Duration::from_millis(start_ms),
            duration: Duration::from_millis(duration_ms),
            peak,
        }
    }

    /// Offset at which this tone falls silent
    pub fn end(&self) -> Duration {
        self.start_offset + self.duration
    }
}

/// Identifier of a catalog sound
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SoundId {
    #[default]
    Beep,
    Bell,
    Alarm,
    Chime,
}

impl SoundId {
    pub const ALL: [SoundId; 4] = [SoundId::Beep, SoundId::Bell, SoundId::Alarm, SoundId::Chime];

    /// Look up the catalog entry for this id
    pub fn sound(self) -> &'static AlarmSound {
        &CATALOG[self as usize]
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SoundId::Beep => "beep",
            SoundId::Bell => "bell",
            SoundId::Alarm => "alarm",
            SoundId::Chime => "chime",
        }
    }
}

impl fmt::Display for SoundId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown sound '{0}' (expected beep, bell, alarm or chime)")]
pub struct UnknownSound(pub String);

impl FromStr for SoundId {
    type Err = UnknownSound;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SoundId::ALL
            .into_iter()
            .find(|id| id.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownSound(s.to_string()))
    }
}

/// Immutable catalog entry describing how an alarm sounds
#[derive(Debug)]
pub struct AlarmSound {
    pub id: SoundId,
    pub label: &'static str,
    pub tones: &'static [ToneEvent],
    /// Time between successive full plays while the alarm is unacknowledged
    pub repeat_interval: Duration,
}

impl AlarmSound {
    /// Offset at which the last tone of one play falls silent
    pub fn span(&self) -> Duration {
        span(self.tones)
    }
}

/// Latest tone end across a list of tone events
pub fn span(tones: &[ToneEvent]) -> Duration {
    tones.iter().map(ToneEvent::end).max().unwrap_or_default()
}

use WaveShape::{Sawtooth, Sine, Square};

const BEEP_TONES: [ToneEvent; 3] = [
    ToneEvent::new(880.0, Square, 0, 180, 0.3),
    ToneEvent::new(880.0, Square, 250, 180, 0.3),
    ToneEvent::new(880.0, Square, 500, 180, 0.3),
];

// Fundamental plus a quiet octave overtone
const BELL_TONES: [ToneEvent; 2] = [
    ToneEvent::new(523.25, Sine, 0, 2500, 0.5),
    ToneEvent::new(1046.5, Sine, 0, 1200, 0.12),
];

const ALARM_TONES: [ToneEvent; 8] = [
    ToneEvent::new(880.0, Sawtooth, 0, 130, 0.2),
    ToneEvent::new(1100.0, Sawtooth, 150, 130, 0.2),
    ToneEvent::new(880.0, Sawtooth, 300, 130, 0.2),
    ToneEvent::new(1100.0, Sawtooth, 450, 130, 0.2),
    ToneEvent::new(880.0, Sawtooth, 600, 130, 0.2),
    ToneEvent::new(1100.0, Sawtooth, 750, 130, 0.2),
    ToneEvent::new(880.0, Sawtooth, 900, 130, 0.2),
    ToneEvent::new(1100.0, Sawtooth, 1050, 130, 0.2),
];

// C5 D5 E5 G5 C6
const CHIME_TONES: [ToneEvent; 5] = [
    ToneEvent::new(523.25, Sine, 0, 600, 0.35),
    ToneEvent::new(587.33, Sine, 200, 600, 0.35),
    ToneEvent::new(659.25, Sine, 400, 600, 0.35),
    ToneEvent::new(783.99, Sine, 600, 600, 0.35),
    ToneEvent::new(1046.5, Sine, 800, 600, 0.35),
];

/// Indexed by `SoundId as usize`
static CATALOG: [AlarmSound; 4] = [
    AlarmSound {
        id: SoundId::Beep,
        label: "Beep",
        tones: &BEEP_TONES,
        repeat_interval: Duration::from_millis(1500),
    },
    AlarmSound {
        id: SoundId::Bell,
        label: "Bell",
        tones: &BELL_TONES,
        repeat_interval: Duration::from_millis(3500),
    },
    AlarmSound {
        id: SoundId::Alarm,
        label: "Alarm",
        tones: &ALARM_TONES,
        repeat_interval: Duration::from_millis(2000),
    },
    AlarmSound {
        id: SoundId::Chime,
        label: "Chime",
        tones: &CHIME_TONES,
        repeat_interval: Duration::from_millis(3200),
    },
];

/// All alarm sounds in picker order
pub fn catalog() -> &'static [AlarmSound] {
    &CATALOG
}
