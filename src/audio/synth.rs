//! Sample synthesizer for alarm tone events
//!
//! Renders a list of tone events into a mono `f32` buffer. Every tone starts at
//! its peak amplitude and decays exponentially to [`ENVELOPE_FLOOR`] by the end
//! of its duration; overlapping tones are summed.

use std::{f32::consts::TAU, time::Duration};

use super::catalog::{span, ToneEvent, WaveShape};

pub const SAMPLE_RATE: u32 = 44_100;

/// Amplitude an envelope reaches at the end of its tone
pub const ENVELOPE_FLOOR: f32 = 0.001;

impl WaveShape {
    /// Oscillator output for a phase in `[0, 1)`
    pub fn sample(self, phase: f32) -> f32 {
        match self {
            WaveShape::Sine => (TAU * phase).sin(),
            WaveShape::Square => {
                if phase < 0.5 {
                    1.0
                } else {
                    -1.0
                }
            }
            WaveShape::Sawtooth => 2.0 * phase - 1.0,
            WaveShape::Triangle => 1.0 - 4.0 * (phase - 0.5).abs(),
        }
    }
}

/// Amplitude of `tone` at `t` seconds after its onset
pub fn envelope(tone: &ToneEvent, t: f32) -> f32 {
    let duration = tone.duration.as_secs_f32();
    if duration <= 0.0 || tone.peak <= 0.0 {
        return 0.0;
    }
    let progress = (t / duration).clamp(0.0, 1.0);
    tone.peak * (ENVELOPE_FLOOR / tone.peak).powf(progress)
}

fn sample_count(duration: Duration, sample_rate: u32) -> usize {
    (duration.as_micros() * u128::from(sample_rate) / 1_000_000) as usize
}

/// Render tone events into a buffer covering the latest tone end
pub fn render(tones: &[ToneEvent], sample_rate: u32) -> Vec<f32> {
    let len = (span(tones).as_micros() * u128::from(sample_rate)).div_ceil(1_000_000) as usize;
    let mut buffer = vec![0.0f32; len];
    let rate = sample_rate as f32;

    for tone in tones {
        let start = sample_count(tone.start_offset, sample_rate);
        let count = sample_count(tone.duration, sample_rate);
        for (i, slot) in buffer.iter_mut().skip(start).take(count).enumerate() {
            let t = i as f32 / rate;
            let phase = (tone.frequency_hz * t).fract();
            *slot += tone.shape.sample(phase) * envelope(tone, t);
        }
    }

    for sample in &mut buffer {
        *sample = sample.clamp(-1.0, 1.0);
    }
    buffer
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::SoundId;

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-4
    }

    #[test]
    fn test_wave_shapes() {
        assert!(close(WaveShape::Sine.sample(0.25), 1.0));
        assert!(close(WaveShape::Sine.sample(0.0), 0.0));
        assert_eq!(WaveShape::Square.sample(0.1), 1.0);
        assert_eq!(WaveShape::Square.sample(0.6), -1.0);
        assert!(close(WaveShape::Sawtooth.sample(0.0), -1.0));
        assert!(close(WaveShape::Sawtooth.sample(0.5), 0.0));
        assert!(close(WaveShape::Triangle.sample(0.5), 1.0));
        assert!(close(WaveShape::Triangle.sample(0.0), -1.0));
    }

    #[test]
    fn test_envelope_decays_from_peak_to_floor() {
        let tone = ToneEvent::new(440.0, WaveShape::Sine, 0, 500, 0.4);
        assert!(close(envelope(&tone, 0.0), 0.4));
        assert!(close(envelope(&tone, 0.5), ENVELOPE_FLOOR));
        assert!(envelope(&tone, 0.25) < 0.4);
        assert!(envelope(&tone, 0.25) > ENVELOPE_FLOOR);
        // Past the end the envelope holds at the floor
        assert!(close(envelope(&tone, 3.0), ENVELOPE_FLOOR));
    }

    #[test]
    fn test_render_length_covers_span() {
        let beep = render(SoundId::Beep.sound().tones, SAMPLE_RATE);
        assert_eq!(beep.len(), 29_988); // 0.68 s
        let bell = render(SoundId::Bell.sound().tones, 8_000);
        assert_eq!(bell.len(), 20_000); // 2.5 s
        assert!(render(&[], SAMPLE_RATE).is_empty());
    }

    #[test]
    fn test_render_stays_in_range() {
        for id in SoundId::ALL {
            let samples = render(id.sound().tones, SAMPLE_RATE);
            assert!(samples.iter().all(|s| (-1.0..=1.0).contains(s)), "{} clipped", id);
            assert!(samples.iter().any(|s| s.abs() > 0.05), "{} is silent", id);
        }
    }

    #[test]
    fn test_render_leaves_gaps_silent() {
        // The first beep ends at 180 ms and the second starts at 250 ms
        let samples = render(SoundId::Beep.sound().tones, SAMPLE_RATE);
        let gap = &samples[sample_count(Duration::from_millis(190), SAMPLE_RATE)
            ..sample_count(Duration::from_millis(240), SAMPLE_RATE)];
        assert!(gap.iter().all(|s| *s == 0.0));
    }
}
