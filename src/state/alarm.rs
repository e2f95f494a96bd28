//! Alarm controller: repeats the selected sound until acknowledged

use tokio::time::Instant;
use tracing::{debug, info, warn};

use super::rearm::{Missed, RearmTimer};
use crate::audio::{AlarmSound, SoundId, TonePlayer};

/// One ringing cycle, from the finish until acknowledgment
#[derive(Debug)]
struct RingCycle {
    /// Sound captured when the cycle started
    sound: SoundId,
    repeat: RearmTimer,
    plays: u32,
}

/// Plays the selected alarm sound when the countdown finishes and keeps
/// replaying it at the sound's repeat interval until acknowledged.
///
/// The sound is captured when ringing starts; picking another sound while
/// ringing takes effect on the next cycle.
pub struct AlarmController {
    selected: SoundId,
    ringing: Option<RingCycle>,
    player: Box<dyn TonePlayer>,
}

impl AlarmController {
    pub fn new(player: Box<dyn TonePlayer>, selected: SoundId) -> Self {
        Self {
            selected,
            ringing: None,
            player,
        }
    }

    pub fn selected_sound(&self) -> SoundId {
        self.selected
    }

    pub fn is_ringing(&self) -> bool {
        self.ringing.is_some()
    }

    /// Sound of the current ringing cycle
    pub fn ringing_sound(&self) -> Option<SoundId> {
        self.ringing.as_ref().map(|cycle| cycle.sound)
    }

    /// Plays made in the current ringing cycle, 0 when silent
    pub fn plays(&self) -> u32 {
        self.ringing.as_ref().map_or(0, |cycle| cycle.plays)
    }

    pub fn repeat_deadline(&self) -> Option<Instant> {
        self.ringing.as_ref().and_then(|cycle| cycle.repeat.deadline())
    }

    /// Start ringing: play once now and arm the repeat timer
    pub fn on_finished(&mut self, now: Instant) {
        if self.ringing.is_some() {
            debug!("Alarm already ringing, ignoring finish notification");
            return;
        }

        let sound = self.selected.sound();
        let mut repeat = RearmTimer::new(sound.repeat_interval, Missed::Skip);
        repeat.arm(now);
        info!("Alarm ringing with {} every {:?}", sound.id, sound.repeat_interval);

        Self::sound_out(self.player.as_ref(), sound);
        self.ringing = Some(RingCycle {
            sound: sound.id,
            repeat,
            plays: 1,
        });
    }

    /// Replay the ringing sound if its repeat deadline has passed
    pub fn poll_repeat(&mut self, now: Instant) -> bool {
        let Some(cycle) = self.ringing.as_mut() else {
            return false;
        };
        if !cycle.repeat.fire(now) {
            return false;
        }

        cycle.plays += 1;
        debug!("Alarm repeat #{}", cycle.plays);
        Self::sound_out(self.player.as_ref(), cycle.sound.sound());
        true
    }

    /// Stop ringing. Idempotent.
    pub fn acknowledge(&mut self) -> bool {
        match self.ringing.take() {
            Some(mut cycle) => {
                cycle.repeat.disarm();
                info!("Alarm acknowledged after {} plays", cycle.plays);
                true
            }
            None => false,
        }
    }

    /// Change the selected sound, previewing it when not ringing
    pub fn select_sound(&mut self, id: SoundId) {
        self.selected = id;
        if self.ringing.is_some() {
            debug!("Selected {} for the next alarm", id);
            return;
        }
        info!("Selected {} alarm sound", id);
        Self::sound_out(self.player.as_ref(), id.sound());
    }

    /// Release the playback backend
    pub fn release(&self) {
        self.player.release();
    }

    fn sound_out(player: &dyn TonePlayer, sound: &AlarmSound) {
        if let Err(e) = player.play(sound.tones) {
            warn!("Skipping {} sound: {}", sound.id, e);
        }
    }
}

impl std::fmt::Debug for AlarmController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AlarmController")
            .field("selected", &self.selected)
            .field("ringing", &self.ringing)
            .field("player", &self.player.name())
            .finish()
    }
}
