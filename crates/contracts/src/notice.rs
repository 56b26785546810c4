//! Notices - human-readable status messages emitted by the engine.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Status notice
///
/// Offsets are signed seconds, positive meaning the simulation is ahead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Notice {
    /// Warm-up finished without a base time
    NotConfigured,
    /// Simulation ran ahead of real time beyond tolerance
    Ahead { offset_s: f64 },
    /// Simulation fell behind real time beyond tolerance
    Behind { offset_s: f64 },
    /// Catch-up reached real time
    CaughtUp,
    /// Warp table has no rate above 1x
    DegenerateWarpTable,
}

impl Notice {
    /// Stable short name (metrics label)
    pub fn kind(&self) -> &'static str {
        match self {
            Notice::NotConfigured => "not_configured",
            Notice::Ahead { .. } => "ahead",
            Notice::Behind { .. } => "behind",
            Notice::CaughtUp => "caught_up",
            Notice::DegenerateWarpTable => "degenerate_warp_table",
        }
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notice::NotConfigured => write!(f, "Realtime: No start time configured."),
            Notice::Ahead { offset_s } => write!(
                f,
                "Your simulation time is ahead of real time by {}!",
                format_delta(*offset_s)
            ),
            Notice::Behind { offset_s } => write!(
                f,
                "Your simulation time is behind real time by {}, warping ahead!",
                format_delta(*offset_s)
            ),
            Notice::CaughtUp => write!(f, "Caught up with real time!"),
            Notice::DegenerateWarpTable => write!(
                f,
                "Realtime: No warp rate above 1x available, cannot catch up."
            ),
        }
    }
}

/// Notice sink
pub trait Notifier {
    fn notify(&mut self, notice: &Notice);
}

/// Collects notices in order (handy for inspection)
impl Notifier for Vec<Notice> {
    fn notify(&mut self, notice: &Notice) {
        self.push(notice.clone());
    }
}

/// Format a duration in seconds as `1d 2h 3m 4s`, absolute value, Earth units
///
/// Zero leading units are omitted; seconds are always printed.
pub fn format_delta(seconds: f64) -> String {
    let total = seconds.abs().round() as u64;
    let days = total / 86_400;
    let hours = (total % 86_400) / 3_600;
    let minutes = (total % 3_600) / 60;
    let secs = total % 60;

    let mut parts = Vec::with_capacity(4);
    if days > 0 {
        parts.push(format!("{days}d"));
    }
    if days > 0 || hours > 0 {
        parts.push(format!("{hours}h"));
    }
    if days > 0 || hours > 0 || minutes > 0 {
        parts.push(format!("{minutes}m"));
    }
    parts.push(format!("{secs}s"));
    parts.join(" ")
}
