//! Status line rendering

use crate::{
    audio::catalog,
    state::{Snapshot, PRESETS},
    utils::format_percent,
};

const BAR_WIDTH: usize = 20;

/// Output format of the status display
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    /// One JSON object per line
    Json,
}

/// Render a snapshot in the requested format
pub fn render(snapshot: &Snapshot, format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => render_text(snapshot),
        OutputFormat::Json => render_json(snapshot),
    }
}

pub fn render_text(snapshot: &Snapshot) -> String {
    let mut line = if snapshot.is_finished() {
        format!("{}  finished  TIME'S UP", snapshot.display)
    } else {
        format!(
            "{}  {:<8}  [{}] {}",
            snapshot.display,
            snapshot.phase.to_string(),
            progress_bar(snapshot.progress, BAR_WIDTH),
            format_percent(snapshot.progress)
        )
    };

    if let Some(sound) = snapshot.ringing_sound {
        line.push_str(&format!("  ** ALARM ({}) - press Enter to stop **", sound));
    }
    line
}

pub fn render_json(snapshot: &Snapshot) -> String {
    serde_json::to_string(snapshot).unwrap_or_else(|e| format!(r#"{{"error":"{}"}}"#, e))
}

fn progress_bar(fraction: f64, width: usize) -> String {
    let filled = ((fraction.clamp(0.0, 1.0) * width as f64).round() as usize).min(width);
    format!("{}{}", "#".repeat(filled), "-".repeat(width - filled))
}

pub fn sounds_listing() -> String {
    catalog()
        .iter()
        .map(|sound| {
            format!(
                "  {:<6} {:<6} {} tones over {} ms, repeats every {} ms",
                sound.id,
                sound.label,
                sound.tones.len(),
                sound.span().as_millis(),
                sound.repeat_interval.as_millis()
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn presets_listing() -> String {
    PRESETS
        .iter()
        .map(|preset| format!("+{}", preset.label))
        .collect::<Vec<_>>()
        .join(" ")
}

pub const HELP: &str = "\
Commands:
  start | s          start or resume the countdown
  pause | p          pause the countdown
  toggle | t         pause when running, start otherwise
  reset | r          stop, silence the alarm and return to the set duration
  clear | 00:00      set the duration to 00:00
  set <duration>     set the duration (90, 1:30, 5m, 1m30s)
  +<duration>        add to the duration (+5m, +30s)
  sound <name>       pick the alarm sound (beep, bell, alarm, chime)
  <Enter> | ack      silence a ringing alarm
  status | sounds | presets | help | quit
Durations are capped at 99:59 and any change resets a started countdown.";
