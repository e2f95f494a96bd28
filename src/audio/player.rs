//! Tone playback capability and the backends that implement it

use std::{
    io::{Stderr, Write},
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc, Mutex,
    },
    time::Duration,
};
use clap::ValueEnum;
use thiserror::Error;
use tokio::time::{sleep_until, Instant};
use tracing::{debug, info, warn};

use super::catalog::{span, ToneEvent};

/// Resources behind a play call are released this long after the call, or
/// when the last tone ends if that is later
pub const RELEASE_AFTER: Duration = Duration::from_secs(4);

#[derive(Error, Debug)]
pub enum AudioError {
    #[error("audio output unavailable: {0}")]
    Unavailable(String),
    #[error("failed to play tones: {0}")]
    Playback(String),
}

/// Something that can sound a list of tone events.
///
/// `play` is fire-and-forget: it schedules the tones relative to the call and
/// returns without waiting for them. Implementations tear down whatever they
/// allocated on their own.
pub trait TonePlayer: Send {
    fn play(&self, tones: &[ToneEvent]) -> Result<(), AudioError>;

    /// Best-effort release of long-lived resources
    fn release(&self) {}

    fn name(&self) -> &'static str;
}

/// How long the resources of one play call must stay alive
pub fn release_delay(tones: &[ToneEvent]) -> Duration {
    RELEASE_AFTER.max(span(tones))
}

/// Discards every tone
#[derive(Debug, Default)]
pub struct MutePlayer;

impl TonePlayer for MutePlayer {
    fn play(&self, _tones: &[ToneEvent]) -> Result<(), AudioError> {
        Ok(())
    }

    fn name(&self) -> &'static str {
        "mute"
    }
}

/// Logs each play and counts them
#[derive(Debug, Default)]
pub struct LogPlayer {
    plays: Arc<AtomicUsize>,
}

impl LogPlayer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Shared handle to the play counter
    pub fn counter(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.plays)
    }
}

impl TonePlayer for LogPlayer {
    fn play(&self, tones: &[ToneEvent]) -> Result<(), AudioError> {
        let count = self.plays.fetch_add(1, Ordering::SeqCst) + 1;
        info!("Play #{}: {} tone events over {:?}", count, tones.len(), span(tones));
        for tone in tones {
            debug!(
                "  {:>8.2} Hz {:?} at {:?} for {:?}, peak {}",
                tone.frequency_hz, tone.shape, tone.start_offset, tone.duration, tone.peak
            );
        }
        Ok(())
    }

    fn name(&self) -> &'static str {
        "log"
    }
}

/// Rings the terminal bell at every distinct tone onset.
///
/// The BEL bytes go to stderr by default so stdout only ever carries the
/// status display.
#[derive(Debug)]
pub struct BellPlayer<W = Stderr> {
    out: Arc<Mutex<W>>,
}

impl BellPlayer {
    pub fn new() -> Self {
        Self::with_writer(std::io::stderr())
    }
}

impl Default for BellPlayer {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: Write + Send + 'static> BellPlayer<W> {
    pub fn with_writer(out: W) -> Self {
        Self {
            out: Arc::new(Mutex::new(out)),
        }
    }

    fn ring(out: &Mutex<W>) {
        let Ok(mut out) = out.lock() else {
            debug!("Terminal bell writer poisoned");
            return;
        };
        if let Err(e) = out.write_all(b"\x07").and_then(|_| out.flush()) {
            debug!("Failed to ring terminal bell: {}", e);
        }
    }
}

fn onsets(tones: &[ToneEvent]) -> Vec<Duration> {
    let mut onsets: Vec<Duration> = tones.iter().map(|tone| tone.start_offset).collect();
    onsets.sort();
    onsets.dedup();
    onsets
}

impl<W: Write + Send + 'static> TonePlayer for BellPlayer<W> {
    fn play(&self, tones: &[ToneEvent]) -> Result<(), AudioError> {
        let runtime = tokio::runtime::Handle::try_current()
            .map_err(|e| AudioError::Unavailable(e.to_string()))?;
        let onsets = onsets(tones);
        let started = Instant::now();
        let out = Arc::clone(&self.out);

        runtime.spawn(async move {
            for onset in onsets {
                sleep_until(started + onset).await;
                Self::ring(&out);
            }
        });
        Ok(())
    }

    fn name(&self) -> &'static str {
        "bell"
    }
}

/// Playback backend selection
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum AudioBackend {
    /// Sound device when available, terminal bell otherwise
    #[default]
    Auto,
    /// Synthesized tones on the default sound device
    Device,
    /// Terminal bell at each tone onset
    Bell,
    /// Log tone events instead of sounding them
    Log,
    /// No sound at all
    Mute,
}

/// Build the tone player for a backend, falling back to the terminal bell when
/// the sound device cannot be used
pub fn build_player(backend: AudioBackend) -> Box<dyn TonePlayer> {
    let player: Box<dyn TonePlayer> = match backend {
        AudioBackend::Auto | AudioBackend::Device => device_player(backend),
        AudioBackend::Bell => Box::new(BellPlayer::new()),
        AudioBackend::Log => Box::new(LogPlayer::new()),
        AudioBackend::Mute => Box::new(MutePlayer),
    };
    info!("Using {} audio backend", player.name());
    player
}

#[cfg(feature = "device-audio")]
fn device_player(backend: AudioBackend) -> Box<dyn TonePlayer> {
    match super::device::DevicePlayer::new() {
        Ok(player) => Box::new(player),
        Err(e) => {
            if backend == AudioBackend::Device {
                warn!("{}, falling back to terminal bell", e);
            } else {
                debug!("{}, falling back to terminal bell", e);
            }
            Box::new(BellPlayer::new())
        }
    }
}

#[cfg(not(feature = "device-audio"))]
fn device_player(backend: AudioBackend) -> Box<dyn TonePlayer> {
    if backend == AudioBackend::Device {
        warn!("Built without the device-audio feature, falling back to terminal bell");
    }
    Box::new(BellPlayer::new())
}
