//! Alarm audio module
//!
//! This module contains the alarm sound catalog, the tone synthesizer and the
//! playback backends the alarm controller can be handed.

pub mod catalog;
pub mod player;
pub mod synth;

#[cfg(feature = "device-audio")]
pub mod device;

// Re-export main types
pub use catalog::{catalog, AlarmSound, SoundId, ToneEvent, UnknownSound, WaveShape};
pub use player::{build_player, AudioBackend, AudioError, BellPlayer, LogPlayer, MutePlayer, TonePlayer};
