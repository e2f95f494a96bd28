//! Background tasks module
//! 
//! This module contains the session event loop and the tasks that feed it
//! input and print its status.

pub mod display;
pub mod input;
pub mod session_loop;

// Re-export main functions
pub use display::display_task;
pub use input::spawn_input_thread;
pub use session_loop::session_task;
