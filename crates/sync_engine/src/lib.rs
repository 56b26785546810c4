//! # Sync Engine
//!
//! Keeps a simulation clock aligned with the wall clock by driving the host's
//! discrete time-warp control.
//!
//! 负责：
//! - 同步状态机（预热、同步、追赶、停用）
//! - 与真实时间的偏移计算
//! - 自适应加速档位选择
//!
//! ## 使用示例
//!
//! ```ignore
//! use sync_engine::{SyncEngine, SyncEngineConfig, TickContext};
//!
//! let mut engine = SyncEngine::new(SyncEngineConfig::default());
//!
//! // Once per host frame
//! engine.tick(TickContext {
//!     clock: &host.clock,
//!     gate: &host.gate,
//!     base_time: &config,
//!     warp: &mut host.warp,
//!     notifier: &mut notifier,
//! });
//!
//! // Base time set, changed or cleared
//! engine.reset(&mut host.warp);
//! ```

mod engine;
mod notify;
mod offset;
mod rate;
mod transition;

pub use engine::{SyncEngine, TickContext};
pub use notify::LogNotifier;
pub use offset::{offset_seconds, seconds_between};
pub use rate::select_warp_index;
pub use transition::{transition, Command, Phase, Step, TickInputs};

// Re-export contracts types
pub use contracts::{Notice, SyncEngineConfig, SyncState};
