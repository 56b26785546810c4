//! LogNotifier - reports notices via tracing

use contracts::{Notice, Notifier};
use tracing::{info, warn};

/// Notifier that writes notices to the log
///
/// Stands in for on-screen messages when the host has no display.
#[derive(Debug, Clone)]
pub struct LogNotifier {
    name: String,
}

impl LogNotifier {
    /// Create a new LogNotifier with the given name
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl Notifier for LogNotifier {
    fn notify(&mut self, notice: &Notice) {
        match notice {
            Notice::Ahead { .. } | Notice::DegenerateWarpTable => {
                warn!(notifier = %self.name, kind = notice.kind(), "{notice}")
            }
            _ => info!(notifier = %self.name, kind = notice.kind(), "{notice}"),
        }
    }
}
