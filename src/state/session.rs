//! Session state: one countdown engine wired to one alarm controller

use chrono::{DateTime, Utc};
use tokio::time::Instant;
use tracing::{debug, info};

use super::{
    alarm::AlarmController,
    countdown::{CountdownEngine, Phase, TickOutcome, MAX_DURATION_SECS},
    Snapshot,
};
use crate::{audio::SoundId, utils::format_clock};

/// Owns the engine and the alarm and applies user actions to them.
///
/// Duration changes always go through a full reset when a countdown is in
/// progress, and a reset always silences the alarm.
#[derive(Debug)]
pub struct Session {
    engine: CountdownEngine,
    alarm: AlarmController,
    finished_at: Option<DateTime<Utc>>,
    /// Last command tracking
    last_command: Option<String>,
    last_command_time: Option<DateTime<Utc>>,
}

impl Session {
    pub fn new(engine: CountdownEngine, alarm: AlarmController) -> Self {
        Self {
            engine,
            alarm,
            finished_at: None,
            last_command: None,
            last_command_time: None,
        }
    }

    pub fn engine(&self) -> &CountdownEngine {
        &self.engine
    }

    pub fn alarm(&self) -> &AlarmController {
        &self.alarm
    }

    pub fn phase(&self) -> Phase {
        self.engine.phase()
    }

    pub fn is_ringing(&self) -> bool {
        self.alarm.is_ringing()
    }

    /// Record the command being applied
    pub fn note_command(&mut self, command: &str) {
        self.last_command = Some(command.to_string());
        self.last_command_time = Some(Utc::now());
    }

    pub fn start(&mut self, now: Instant) -> bool {
        self.engine.start(now)
    }

    pub fn pause(&mut self, now: Instant) -> bool {
        self.engine.pause(now)
    }

    /// Pause when running, start otherwise
    pub fn toggle(&mut self, now: Instant) -> bool {
        if self.engine.phase() == Phase::Running {
            self.pause(now)
        } else {
            self.start(now)
        }
    }

    /// Back to idle with the alarm silenced; the configured duration stays
    pub fn reset(&mut self) {
        self.engine.reset();
        self.alarm.acknowledge();
        self.finished_at = None;
    }

    /// Replace the duration, resetting first if a countdown was started
    pub fn set_duration(&mut self, seconds: u32) -> bool {
        if self.engine.phase() != Phase::Idle {
            debug!("Duration change forces a reset");
            self.reset();
        }
        self.engine.set_duration(seconds)
    }

    /// Add a preset to the configured duration, capped at the maximum
    pub fn add_preset(&mut self, seconds: u32) -> bool {
        let total = self
            .engine
            .configured_duration()
            .saturating_add(seconds)
            .min(MAX_DURATION_SECS);
        self.set_duration(total)
    }

    /// Set the duration back to zero
    pub fn clear(&mut self) -> bool {
        self.set_duration(0)
    }

    pub fn select_sound(&mut self, id: SoundId) {
        self.alarm.select_sound(id);
    }

    /// Silence the alarm without leaving the finished phase
    pub fn acknowledge(&mut self) -> bool {
        self.alarm.acknowledge()
    }

    /// Earliest armed deadline of the tick and the alarm repeat
    pub fn next_deadline(&self) -> Option<Instant> {
        match (self.engine.tick_deadline(), self.alarm.repeat_deadline()) {
            (Some(tick), Some(repeat)) => Some(tick.min(repeat)),
            (tick, repeat) => tick.or(repeat),
        }
    }

    /// Handle every tick and alarm repeat that is due at `now`
    pub fn advance(&mut self, now: Instant) {
        while let Some(outcome) = self.engine.poll_tick(now) {
            if outcome == TickOutcome::Finished {
                self.finished_at = Some(Utc::now());
                self.alarm.on_finished(now);
            }
        }
        self.alarm.poll_repeat(now);
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            phase: self.engine.phase(),
            configured_seconds: self.engine.configured_duration(),
            remaining_seconds: self.engine.remaining(),
            display: format_clock(self.engine.display_seconds()),
            progress: self.engine.progress_fraction(),
            ringing: self.alarm.is_ringing(),
            ringing_sound: self.alarm.ringing_sound(),
            selected_sound: self.alarm.selected_sound(),
            plays: self.alarm.plays(),
            finished_at: self.finished_at,
            last_command: self.last_command.clone(),
            last_command_time: self.last_command_time,
        }
    }

    /// Silence everything and release the audio backend
    pub fn shutdown(&mut self) {
        self.engine.reset();
        self.alarm.acknowledge();
        self.alarm.release();
        info!("Session closed");
    }
}
