//! Command handlers

use tokio::time::Instant;
use tracing::{debug, info};

use super::{
    command::Command,
    render::{presets_listing, sounds_listing, HELP},
};
use crate::{state::Session, utils::format_clock};

/// What the session loop should do after a command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// Nothing beyond the status update
    Silent,
    /// Print this text
    Message(String),
    /// Stop the session loop
    Quit,
}

/// Apply one command to the session.
///
/// Any command silences a ringing alarm before it runs, the way any key or
/// click does in a graphical timer. Rejected transitions leave the session
/// unchanged and are only logged.
pub fn handle_command(session: &mut Session, command: Command, now: Instant) -> Reply {
    if session.acknowledge() {
        info!("Alarm silenced by '{}'", command.name());
    }
    session.note_command(command.name());

    match command {
        Command::Start => {
            if !session.start(now) {
                debug!("Start ignored while {}", session.phase());
            }
        }
        Command::Pause => {
            session.pause(now);
        }
        Command::Toggle => {
            if !session.toggle(now) {
                debug!("Toggle ignored while {}", session.phase());
            }
        }
        Command::Reset => session.reset(),
        Command::Clear => {
            session.clear();
        }
        Command::SetDuration(seconds) => {
            session.set_duration(seconds);
            info!(
                "Duration set to {}",
                format_clock(session.engine().configured_duration())
            );
        }
        Command::AddPreset(seconds) => {
            session.add_preset(seconds);
            info!(
                "Duration set to {}",
                format_clock(session.engine().configured_duration())
            );
        }
        Command::SelectSound(id) => session.select_sound(id),
        // Already handled above
        Command::Acknowledge => {}
        Command::Status => {}
        Command::ListSounds => return Reply::Message(sounds_listing()),
        Command::ListPresets => return Reply::Message(presets_listing()),
        Command::Help => return Reply::Message(HELP.to_string()),
        Command::Quit => return Reply::Quit,
    }
    Reply::Silent
}
