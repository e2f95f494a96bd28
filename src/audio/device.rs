//! Sound-device backend built on rodio

use std::thread;

use rodio::{buffer::SamplesBuffer, OutputStream, Sink};
use tracing::{debug, warn};

use super::{
    catalog::ToneEvent,
    player::{release_delay, AudioError, TonePlayer},
    synth::{render, SAMPLE_RATE},
};

/// Plays synthesized tones on the default output device.
///
/// Each play call renders its samples up front and hands them to a detached
/// thread that opens its own output stream, keeps it alive for the release
/// delay and then drops it.
pub struct DevicePlayer {
    sample_rate: u32,
}

impl DevicePlayer {
    /// Probe the default output device
    pub fn new() -> Result<Self, AudioError> {
        OutputStream::try_default().map_err(|e| AudioError::Unavailable(e.to_string()))?;
        Ok(Self {
            sample_rate: SAMPLE_RATE,
        })
    }
}

impl TonePlayer for DevicePlayer {
    fn play(&self, tones: &[ToneEvent]) -> Result<(), AudioError> {
        let samples = render(tones, self.sample_rate);
        let linger = release_delay(tones);
        let sample_rate = self.sample_rate;

        thread::Builder::new()
            .name("alarm-audio".to_string())
            .spawn(move || {
                let (_stream, handle) = match OutputStream::try_default() {
                    Ok(output) => output,
                    Err(e) => {
                        warn!("Skipping alarm sound, no output stream: {}", e);
                        return;
                    }
                };
                let sink = match Sink::try_new(&handle) {
                    Ok(sink) => sink,
                    Err(e) => {
                        warn!("Skipping alarm sound, cannot open sink: {}", e);
                        return;
                    }
                };

                sink.append(SamplesBuffer::new(1, sample_rate, samples));
                thread::sleep(linger);
                debug!("Releasing audio output after {:?}", linger);
            })
            .map_err(|e| AudioError::Playback(e.to_string()))?;

        Ok(())
    }

    fn name(&self) -> &'static str {
        "device"
    }
}
