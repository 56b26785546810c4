//! Host session - drives the sync engine over a simulated host.

mod driver;
mod report;

pub use driver::{SessionOptions, SyncSession};
pub use report::RunReport;
