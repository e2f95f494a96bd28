//! Session event loop task

use std::time::Duration;
use tokio::{
    sync::{mpsc, watch},
    time::{sleep_until, Instant},
};
use tracing::{debug, info};

use crate::{
    cli::{handle_command, Command, Reply},
    state::{Session, Snapshot},
};

/// Stand-in deadline for the disabled timer branch
fn far_future() -> Instant {
    Instant::now() + Duration::from_secs(86_400 * 365)
}

fn publish(updates: &watch::Sender<Snapshot>, snapshot: Snapshot) {
    updates.send_if_modified(|current| {
        if *current == snapshot {
            false
        } else {
            *current = snapshot;
            true
        }
    });
}

/// Single cooperative loop that owns the session.
///
/// Each pass waits for whichever comes first, the earliest armed deadline or
/// the next command, handles it to completion and publishes a fresh snapshot.
pub async fn session_task(
    mut session: Session,
    mut commands: mpsc::Receiver<Command>,
    updates: watch::Sender<Snapshot>,
) {
    info!("Starting session loop");

    loop {
        let deadline = session.next_deadline();

        tokio::select! {
            _ = sleep_until(deadline.unwrap_or_else(far_future)), if deadline.is_some() => {
                session.advance(Instant::now());
            }

            command = commands.recv() => {
                let Some(command) = command else {
                    debug!("Command channel closed");
                    break;
                };
                match handle_command(&mut session, command, Instant::now()) {
                    Reply::Silent => {}
                    // stdout belongs to the status display
                    Reply::Message(text) => eprintln!("{}", text),
                    Reply::Quit => {
                        info!("Quit requested");
                        break;
                    }
                }
            }
        }

        publish(&updates, session.snapshot());
    }

    session.shutdown();
    publish(&updates, session.snapshot());
}
