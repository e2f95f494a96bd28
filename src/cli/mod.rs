//! Terminal interface module
//! 
//! This module contains command parsing, the command handlers that drive the
//! session, and status rendering.

pub mod command;
pub mod handlers;
pub mod render;

// Re-export main types
pub use command::{parse_duration, Command, CommandError};
pub use handlers::{handle_command, Reply};
pub use render::{render, OutputFormat};
