//! Countdown engine: remaining time, lifecycle phase and the one-second tick

use std::{fmt, time::Duration};
use serde::{Deserialize, Serialize};
use tokio::time::Instant;
use tracing::{debug, info};

use super::rearm::{Missed, RearmTimer};

/// Longest duration the timer accepts, 99 min 59 s
pub const MAX_DURATION_SECS: u32 = 99 * 60 + 59;

pub const TICK_PERIOD: Duration = Duration::from_secs(1);

/// Lifecycle phase of the countdown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Idle,
    Running,
    Paused,
    Finished,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Phase::Idle => "idle",
            Phase::Running => "running",
            Phase::Paused => "paused",
            Phase::Finished => "finished",
        })
    }
}

/// Result of handling one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// The engine was not running
    Ignored,
    /// One second consumed, this many remain
    Counting(u32),
    /// The countdown reached zero on this tick
    Finished,
}

/// Countdown state machine over `Idle`, `Running`, `Paused` and `Finished`
#[derive(Debug, Clone)]
pub struct CountdownEngine {
    configured: u32,
    /// `None` until the first start after a reset
    remaining: Option<u32>,
    phase: Phase,
    ticker: RearmTimer,
}

impl CountdownEngine {
    /// Create an idle engine with a zero duration
    pub fn new() -> Self {
        Self {
            configured: 0,
            remaining: None,
            phase: Phase::Idle,
            ticker: RearmTimer::new(TICK_PERIOD, Missed::Burst),
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn configured_duration(&self) -> u32 {
        self.configured
    }

    pub fn remaining(&self) -> Option<u32> {
        self.remaining
    }

    /// Seconds to show: the remaining time once started, the configured
    /// duration before that
    pub fn display_seconds(&self) -> u32 {
        self.remaining.unwrap_or(self.configured)
    }

    /// Elapsed share of the configured duration
    pub fn progress_fraction(&self) -> f64 {
        match self.remaining {
            Some(remaining) if self.configured > 0 => {
                f64::from(self.configured.saturating_sub(remaining)) / f64::from(self.configured)
            }
            _ => 0.0,
        }
    }

    /// Deadline of the next tick while running
    pub fn tick_deadline(&self) -> Option<Instant> {
        self.ticker.deadline()
    }

    /// Set the duration, clamped to [`MAX_DURATION_SECS`]. Only allowed while idle.
    pub fn set_duration(&mut self, seconds: u32) -> bool {
        if self.phase != Phase::Idle {
            debug!("Ignoring duration change while {}", self.phase);
            return false;
        }
        self.configured = seconds.min(MAX_DURATION_SECS);
        true
    }

    /// Start or resume the countdown
    pub fn start(&mut self, now: Instant) -> bool {
        match self.phase {
            Phase::Running => return false,
            Phase::Finished => {
                debug!("Ignoring start after the countdown finished");
                return false;
            }
            Phase::Idle | Phase::Paused => {}
        }

        if self.remaining.is_none() {
            if self.configured == 0 {
                debug!("Ignoring start with a zero duration");
                return false;
            }
            self.remaining = Some(self.configured);
        }

        if self.phase == Phase::Paused {
            info!("Countdown resumed with {}s left", self.display_seconds());
        } else {
            info!("Countdown started for {}s", self.configured);
        }
        self.phase = Phase::Running;
        self.ticker.arm(now);
        true
    }

    /// Pause a running countdown, keeping the unelapsed part of the current
    /// second for the resume
    pub fn pause(&mut self, now: Instant) -> bool {
        if self.phase != Phase::Running {
            debug!("Ignoring pause while {}", self.phase);
            return false;
        }
        self.ticker.suspend(now);
        self.phase = Phase::Paused;
        info!("Countdown paused with {}s left", self.display_seconds());
        true
    }

    /// Return to idle from any phase. The configured duration is kept.
    pub fn reset(&mut self) {
        self.ticker.disarm();
        self.remaining = None;
        if self.phase != Phase::Idle {
            info!("Countdown reset from {}", self.phase);
        }
        self.phase = Phase::Idle;
    }

    /// Handle the tick if its deadline has passed
    pub fn poll_tick(&mut self, now: Instant) -> Option<TickOutcome> {
        if self.phase != Phase::Running || !self.ticker.fire(now) {
            return None;
        }
        Some(self.tick())
    }

    /// Consume one second. Reaching zero disarms the tick and finishes.
    fn tick(&mut self) -> TickOutcome {
        if self.phase != Phase::Running {
            return TickOutcome::Ignored;
        }

        let before = self.remaining.unwrap_or(0);
        if before <= 1 {
            self.remaining = Some(0);
            self.ticker.disarm();
            self.phase = Phase::Finished;
            info!("Countdown finished");
            TickOutcome::Finished
        } else {
            self.remaining = Some(before - 1);
            TickOutcome::Counting(before - 1)
        }
    }
}

impl Default for CountdownEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine_with(seconds: u32) -> CountdownEngine {
        let mut engine = CountdownEngine::new();
        assert!(engine.set_duration(seconds));
        engine
    }

    /// Drive the tick deadline forward one second at a time
    fn run_ticks(engine: &mut CountdownEngine, start: Instant, ticks: u32) -> Vec<TickOutcome> {
        (1..=ticks)
            .filter_map(|i| engine.poll_tick(start + TICK_PERIOD * i))
            .collect()
    }

    #[test]
    fn test_new_engine_is_idle() {
        let engine = CountdownEngine::new();
        assert_eq!(engine.phase(), Phase::Idle);
        assert_eq!(engine.remaining(), None);
        assert_eq!(engine.configured_duration(), 0);
        assert_eq!(engine.tick_deadline(), None);
    }

    #[test]
    fn test_set_duration_clamps() {
        let mut engine = CountdownEngine::new();
        engine.set_duration(10_000);
        assert_eq!(engine.configured_duration(), MAX_DURATION_SECS);
        engine.set_duration(0);
        assert_eq!(engine.configured_duration(), 0);
    }

    #[test]
    fn test_zero_duration_never_starts() {
        let mut engine = CountdownEngine::new();
        assert!(!engine.start(Instant::now()));
        assert_eq!(engine.phase(), Phase::Idle);
        assert_eq!(engine.remaining(), None);
    }

    #[test]
    fn test_finishes_after_exactly_duration_ticks() {
        for duration in [1, 2, 5, 59, 61, 600, MAX_DURATION_SECS] {
            let t0 = Instant::now();
            let mut engine = engine_with(duration);
            assert!(engine.start(t0));

            let outcomes = run_ticks(&mut engine, t0, duration);
            assert_eq!(outcomes.len(), duration as usize);
            let finished = outcomes.iter().filter(|o| **o == TickOutcome::Finished).count();
            assert_eq!(finished, 1);
            assert_eq!(outcomes.last(), Some(&TickOutcome::Finished));
            assert_eq!(engine.phase(), Phase::Finished);
            assert_eq!(engine.remaining(), Some(0));
            assert_eq!(engine.tick_deadline(), None);

            // No further ticks once finished
            assert_eq!(engine.poll_tick(t0 + TICK_PERIOD * (duration + 5)), None);
            assert_eq!(engine.tick(), TickOutcome::Ignored);
        }
    }

    #[test]
    fn test_pause_and_resume_preserve_remaining() {
        let duration = 20;
        let k = 7;
        let t0 = Instant::now();
        let mut engine = engine_with(duration);
        engine.start(t0);

        let first = run_ticks(&mut engine, t0, k);
        assert_eq!(first.len(), k as usize);
        assert_eq!(engine.remaining(), Some(duration - k));

        // Pause 400 ms into the next second
        let paused_at = t0 + TICK_PERIOD * k + Duration::from_millis(400);
        assert!(engine.pause(paused_at));
        assert_eq!(engine.phase(), Phase::Paused);
        assert_eq!(engine.poll_tick(paused_at + Duration::from_secs(30)), None);
        assert_eq!(engine.remaining(), Some(duration - k));

        // The remaining 600 ms of that second carry over
        let resumed_at = paused_at + Duration::from_secs(30);
        assert!(engine.start(resumed_at));
        assert_eq!(engine.tick_deadline(), Some(resumed_at + Duration::from_millis(600)));

        let resume_origin = resumed_at + Duration::from_millis(600) - TICK_PERIOD;
        let rest = run_ticks(&mut engine, resume_origin, duration - k);
        assert_eq!(rest.len(), (duration - k) as usize);
        assert_eq!(engine.phase(), Phase::Finished);
        assert_eq!(engine.remaining(), Some(0));
    }

    #[test]
    fn test_pause_only_from_running() {
        let t0 = Instant::now();
        let mut engine = engine_with(5);
        assert!(!engine.pause(t0));
        assert_eq!(engine.phase(), Phase::Idle);

        engine.start(t0);
        assert!(engine.pause(t0));
        assert!(!engine.pause(t0));
        assert_eq!(engine.phase(), Phase::Paused);
    }

    #[test]
    fn test_start_while_running_keeps_schedule() {
        let t0 = Instant::now();
        let mut engine = engine_with(5);
        engine.start(t0);
        assert!(!engine.start(t0 + Duration::from_millis(700)));
        assert_eq!(engine.tick_deadline(), Some(t0 + TICK_PERIOD));
    }

    #[test]
    fn test_set_duration_rejected_unless_idle() {
        let t0 = Instant::now();
        let mut engine = engine_with(30);
        engine.start(t0);
        assert!(!engine.set_duration(10));
        assert_eq!(engine.configured_duration(), 30);

        engine.pause(t0);
        assert!(!engine.set_duration(10));

        engine.start(t0);
        run_ticks(&mut engine, t0, 30);
        assert_eq!(engine.phase(), Phase::Finished);
        assert!(!engine.set_duration(10));
        assert_eq!(engine.configured_duration(), 30);
    }

    #[test]
    fn test_start_is_noop_once_finished() {
        let t0 = Instant::now();
        let mut engine = engine_with(1);
        engine.start(t0);
        run_ticks(&mut engine, t0, 1);
        assert_eq!(engine.phase(), Phase::Finished);

        assert!(!engine.start(t0 + Duration::from_secs(2)));
        assert_eq!(engine.phase(), Phase::Finished);
        assert_eq!(engine.tick_deadline(), None);

        engine.reset();
        assert!(engine.start(t0 + Duration::from_secs(3)));
        assert_eq!(engine.remaining(), Some(1));
    }

    #[test]
    fn test_reset_from_every_phase() {
        let t0 = Instant::now();
        let mut idle = engine_with(90);
        let mut running = engine_with(90);
        running.start(t0);
        let mut paused = engine_with(90);
        paused.start(t0);
        run_ticks(&mut paused, t0, 30);
        paused.pause(t0 + Duration::from_millis(30_500));
        let mut finished = engine_with(90);
        finished.start(t0);
        run_ticks(&mut finished, t0, 90);

        for engine in [&mut idle, &mut running, &mut paused, &mut finished] {
            engine.reset();
            assert_eq!(engine.phase(), Phase::Idle);
            assert_eq!(engine.remaining(), None);
            assert_eq!(engine.configured_duration(), 90);
            assert_eq!(engine.tick_deadline(), None);
        }
    }

    #[test]
    fn test_progress_fraction() {
        let t0 = Instant::now();
        let mut engine = CountdownEngine::new();
        assert_eq!(engine.progress_fraction(), 0.0);

        engine.set_duration(4);
        assert_eq!(engine.progress_fraction(), 0.0);
        engine.start(t0);
        assert_eq!(engine.progress_fraction(), 0.0);
        run_ticks(&mut engine, t0, 1);
        assert_eq!(engine.progress_fraction(), 0.25);
        run_ticks(&mut engine, t0, 4);
        assert_eq!(engine.progress_fraction(), 1.0);
        assert_eq!(engine.display_seconds(), 0);
    }

    #[test]
    fn test_late_wakeup_counts_each_second_once() {
        let t0 = Instant::now();
        let mut engine = engine_with(10);
        engine.start(t0);

        let late = t0 + Duration::from_millis(3_030);
        let mut ticks = 0;
        while engine.poll_tick(late).is_some() {
            ticks += 1;
        }
        assert_eq!(ticks, 3);
        assert_eq!(engine.remaining(), Some(7));
        assert_eq!(engine.tick_deadline(), Some(t0 + Duration::from_secs(4)));
    }

    #[test]
    fn test_each_second_is_consumed_with_its_deadline() {
        let t0 = Instant::now();
        let mut engine = engine_with(5);
        engine.start(t0);

        let now = t0 + Duration::from_millis(1_200);
        assert_eq!(engine.poll_tick(now), Some(TickOutcome::Counting(4)));
        assert_eq!(engine.poll_tick(now), None);
        assert_eq!(engine.remaining(), Some(4));
        assert_eq!(engine.tick_deadline(), Some(t0 + Duration::from_secs(2)));
    }
}
