//! Configuration and CLI argument handling

use clap::Parser;

use crate::{
    audio::{AudioBackend, SoundId},
    cli::OutputFormat,
};

/// CLI argument parsing structure
#[derive(Parser)]
#[command(name = "alarm-timer")]
#[command(about = "A terminal countdown timer with a repeating alarm")]
#[command(version = "1.0.0")]
pub struct Config {
    /// Initial minutes
    #[arg(short, long, default_value = "0")]
    pub minutes: u32,

    /// Initial seconds, added to the minutes
    #[arg(short, long, default_value = "0")]
    pub seconds: u32,

    /// Alarm sound
    #[arg(long, value_enum, default_value_t = SoundId::Beep)]
    pub sound: SoundId,

    /// Where alarm tones are played
    #[arg(short, long, value_enum, default_value_t = AudioBackend::Auto)]
    pub audio: AudioBackend,

    /// Start counting down immediately
    #[arg(long)]
    pub start: bool,

    /// Print status updates as JSON lines
    #[arg(long)]
    pub json: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Config {
    /// Parse configuration from command line arguments
    pub fn parse() -> Self {
        Parser::parse()
    }

    /// Initial duration in seconds, before clamping
    pub fn initial_duration(&self) -> u32 {
        self.minutes.saturating_mul(60).saturating_add(self.seconds)
    }

    pub fn output_format(&self) -> OutputFormat {
        if self.json { OutputFormat::Json } else { OutputFormat::Text }
    }

    /// Get the appropriate log level based on verbose flag
    pub fn log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::try_parse_from(["alarm-timer"]).unwrap();
        assert_eq!(config.initial_duration(), 0);
        assert_eq!(config.sound, SoundId::Beep);
        assert_eq!(config.audio, AudioBackend::Auto);
        assert_eq!(config.output_format(), OutputFormat::Text);
        assert_eq!(config.log_level(), "info");
    }

    #[test]
    fn test_flags() {
        let config = Config::try_parse_from([
            "alarm-timer", "-m", "5", "-s", "30", "--sound", "chime", "--audio", "mute",
            "--start", "--json", "-v",
        ])
        .unwrap();
        assert_eq!(config.initial_duration(), 330);
        assert_eq!(config.sound, SoundId::Chime);
        assert_eq!(config.audio, AudioBackend::Mute);
        assert!(config.start);
        assert_eq!(config.output_format(), OutputFormat::Json);
        assert_eq!(config.log_level(), "debug");
    }

    #[test]
    fn test_rejects_unknown_sound() {
        assert!(Config::try_parse_from(["alarm-timer", "--sound", "gong"]).is_err());
    }
}
