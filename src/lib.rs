//! Alarm Timer - A terminal countdown timer with a repeating alarm
//! 
//! This library provides the countdown and alarm state machines, the alarm
//! sound catalog and synthesizer, and the tasks that drive them from a
//! terminal.

pub mod audio;
pub mod cli;
pub mod config;
pub mod state;
pub mod tasks;
pub mod utils;

// Re-export commonly used types
pub use config::Config;
pub use state::{AlarmController, CountdownEngine, Phase, Session, Snapshot};
pub use utils::signals::shutdown_signal;
