//! # Contracts
//!
//! Frozen interface contracts shared by every crate in the workspace: the
//! collaborator traits the sync engine consumes, its configuration, and the
//! notices it emits. Business crates depend on this crate only, never on each
//! other's internals.
//!
//! ## Time Model
//! - Simulation time is seconds (f64) since the simulation epoch
//! - Real time is an absolute `DateTime<Utc>`
//! - Host time is monotonic seconds (f64) of the host frame clock, used for
//!   grace intervals only

mod clock;
mod error;
mod gate;
mod notice;
mod state;
mod sync_engine_config;
mod warp;

pub use clock::*;
pub use error::*;
pub use gate::*;
pub use notice::*;
pub use state::*;
pub use sync_engine_config::*;
pub use warp::*;
