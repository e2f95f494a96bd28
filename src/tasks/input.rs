//! Terminal input reader

use std::{
    io::{self, BufRead},
    thread,
};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::cli::Command;

/// Read commands line by line and forward them to the session loop.
///
/// Returns when the input ends or the session loop stops listening.
pub fn read_commands<R: BufRead>(reader: R, commands: &mpsc::Sender<Command>) {
    for line in reader.lines() {
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                warn!("Failed to read input: {}", e);
                break;
            }
        };

        match line.parse::<Command>() {
            Ok(command) => {
                if commands.blocking_send(command).is_err() {
                    debug!("Session loop stopped, no longer reading input");
                    return;
                }
            }
            Err(e) => warn!("{}", e),
        }
    }
    info!("Input closed");
}

/// Spawn the stdin reader on a dedicated thread.
///
/// Blocking reads live on their own thread so they never hold up runtime
/// shutdown.
pub fn spawn_input_thread(commands: mpsc::Sender<Command>) -> io::Result<thread::JoinHandle<()>> {
    thread::Builder::new()
        .name("stdin-commands".to_string())
        .spawn(move || read_commands(io::stdin().lock(), &commands))
}
