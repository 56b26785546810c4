//! Public synchronization state, as shown to user interfaces.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Synchronization state of the engine
///
/// Data-less view of the engine's phase; exactly one is current at any time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SyncState {
    /// Before the first tick since construction or reset
    Uninitialized,
    /// Not synchronizing until the next reset
    Inactive,
    /// Waiting for the load grace interval to pass
    WarmingUp,
    /// Within tolerance of real time, warp held at 1x
    Synchronized,
    /// Behind real time, warping ahead
    CatchingUp,
}

impl SyncState {
    pub fn as_str(&self) -> &'static str {
        match self {
            SyncState::Uninitialized => "uninitialized",
            SyncState::Inactive => "inactive",
            SyncState::WarmingUp => "warming_up",
            SyncState::Synchronized => "synchronized",
            SyncState::CatchingUp => "catching_up",
        }
    }
}

impl fmt::Display for SyncState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}
