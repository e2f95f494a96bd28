//! State management module
//! 
//! This module contains the countdown and alarm state machines and the session
//! that ties them together.

pub mod alarm;
pub mod countdown;
pub mod presets;
pub mod rearm;
pub mod session;
pub mod snapshot;

// Re-export main types
pub use alarm::AlarmController;
pub use countdown::{CountdownEngine, Phase, TickOutcome, MAX_DURATION_SECS};
pub use presets::{Preset, PRESETS};
pub use rearm::{Missed, RearmTimer};
pub use session::Session;
pub use snapshot::Snapshot;
