//! Duration presets that add to the configured duration

/// A quick-add duration shortcut
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Preset {
    pub label: &'static str,
    pub seconds: u32,
}

impl Preset {
    const fn new(label: &'static str, seconds: u32) -> Self {
        Self { label, seconds }
    }

    /// Look up a preset by its label, e.g. `5m`
    pub fn find(label: &str) -> Option<Preset> {
        PRESETS
            .iter()
            .copied()
            .find(|preset| preset.label.eq_ignore_ascii_case(label.trim()))
    }
}

/// Presets in display order, longest first
pub const PRESETS: [Preset; 12] = [
    Preset::new("3h", 3 * 3600),
    Preset::new("2h", 2 * 3600),
    Preset::new("1h", 3600),
    Preset::new("30m", 30 * 60),
    Preset::new("15m", 15 * 60),
    Preset::new("10m", 10 * 60),
    Preset::new("5m", 5 * 60),
    Preset::new("3m", 3 * 60),
    Preset::new("1m", 60),
    Preset::new("30s", 30),
    Preset::new("10s", 10),
    Preset::new("1s", 1),
];
