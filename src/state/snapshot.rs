//! Serializable view of the session for display

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Phase;
use crate::audio::SoundId;

/// Everything the display needs, captured after each state change
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub phase: Phase,
    pub configured_seconds: u32,
    pub remaining_seconds: Option<u32>,
    /// Remaining (or configured) time as `MM:SS`
    pub display: String,
    /// Elapsed share of the configured duration
    pub progress: f64,
    pub ringing: bool,
    /// Sound of the current ringing cycle
    pub ringing_sound: Option<SoundId>,
    pub selected_sound: SoundId,
    /// Alarm plays in the current ringing cycle
    pub plays: u32,
    pub finished_at: Option<DateTime<Utc>>,
    pub last_command: Option<String>,
    pub last_command_time: Option<DateTime<Utc>>,
}

impl Snapshot {
    /// Check if the countdown has run out
    pub fn is_finished(&self) -> bool {
        self.phase == Phase::Finished
    }

    /// Check if the countdown is ticking
    pub fn is_running(&self) -> bool {
        self.phase == Phase::Running
    }
}
