//! Clock formatting helpers

/// Format whole seconds as "MM:SS"; minutes are not wrapped into hours
pub fn format_clock(seconds: u32) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

/// Format a fraction in `[0, 1]` as a whole percentage
pub fn format_percent(fraction: f64) -> String {
    format!("{:>3}%", (fraction.clamp(0.0, 1.0) * 100.0).round() as u32)
}
