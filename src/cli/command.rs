//! Terminal command parsing

use std::str::FromStr;
use thiserror::Error;

use crate::{
    audio::{SoundId, UnknownSound},
    state::Preset,
};

/// A user action read from the terminal
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Start,
    Pause,
    Toggle,
    Reset,
    /// Set the duration back to 00:00
    Clear,
    SetDuration(u32),
    AddPreset(u32),
    SelectSound(SoundId),
    Acknowledge,
    Status,
    ListSounds,
    ListPresets,
    Help,
    Quit,
}

impl Command {
    /// Short name used for last-command tracking
    pub fn name(&self) -> &'static str {
        match self {
            Command::Start => "start",
            Command::Pause => "pause",
            Command::Toggle => "toggle",
            Command::Reset => "reset",
            Command::Clear => "clear",
            Command::SetDuration(_) => "set",
            Command::AddPreset(_) => "add",
            Command::SelectSound(_) => "sound",
            Command::Acknowledge => "ack",
            Command::Status => "status",
            Command::ListSounds => "sounds",
            Command::ListPresets => "presets",
            Command::Help => "help",
            Command::Quit => "quit",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("unknown command '{0}' (type 'help' for a list)")]
    Unknown(String),
    #[error("'{0}' needs an argument")]
    MissingArgument(&'static str),
    #[error("invalid duration '{0}' (try 90, 1:30, 5m or 1m30s)")]
    InvalidDuration(String),
    #[error(transparent)]
    UnknownSound(#[from] UnknownSound),
}

/// Parse a duration in seconds from `90`, `1:30`, `5m`, `1h` or `1m30s`
pub fn parse_duration(input: &str) -> Result<u32, CommandError> {
    let text = input.trim().to_ascii_lowercase();
    let invalid = || CommandError::InvalidDuration(input.trim().to_string());
    if text.is_empty() {
        return Err(invalid());
    }

    if let Some(preset) = Preset::find(&text) {
        return Ok(preset.seconds);
    }

    if let Some((minutes, seconds)) = text.split_once(':') {
        let minutes: u64 = minutes.parse().map_err(|_| invalid())?;
        let seconds: u64 = seconds.parse().map_err(|_| invalid())?;
        return Ok(saturate(minutes.saturating_mul(60).saturating_add(seconds)));
    }

    if let Ok(seconds) = text.parse::<u64>() {
        return Ok(saturate(seconds));
    }

    let mut total: u64 = 0;
    let mut digits = String::new();
    for c in text.chars() {
        if c.is_ascii_digit() {
            digits.push(c);
            continue;
        }
        let unit = match c {
            'h' => 3600,
            'm' => 60,
            's' => 1,
            _ => return Err(invalid()),
        };
        let value: u64 = digits.parse().map_err(|_| invalid())?;
        total = total.saturating_add(value.saturating_mul(unit));
        digits.clear();
    }
    if !digits.is_empty() {
        return Err(invalid());
    }
    Ok(saturate(total))
}

fn saturate(seconds: u64) -> u32 {
    u32::try_from(seconds).unwrap_or(u32::MAX)
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(Command::Acknowledge);
        }
        if let Some(amount) = line.strip_prefix('+') {
            return parse_duration(amount).map(Command::AddPreset);
        }

        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };
        let argument = |name: &'static str| {
            if rest.is_empty() {
                Err(CommandError::MissingArgument(name))
            } else {
                Ok(rest)
            }
        };

        match word.to_ascii_lowercase().as_str() {
            "start" | "resume" | "s" => Ok(Command::Start),
            "pause" | "stop" | "p" => Ok(Command::Pause),
            "toggle" | "t" => Ok(Command::Toggle),
            "reset" | "r" => Ok(Command::Reset),
            "clear" | "00:00" => Ok(Command::Clear),
            "set" => parse_duration(argument("set")?).map(Command::SetDuration),
            "add" => parse_duration(argument("add")?).map(Command::AddPreset),
            "sound" => Ok(Command::SelectSound(argument("sound")?.parse()?)),
            "ack" | "ok" => Ok(Command::Acknowledge),
            "status" => Ok(Command::Status),
            "sounds" => Ok(Command::ListSounds),
            "presets" => Ok(Command::ListPresets),
            "help" | "?" => Ok(Command::Help),
            "quit" | "exit" | "q" => Ok(Command::Quit),
            other => Err(CommandError::Unknown(other.to_string())),
        }
    }
}
