//! # Sim Host
//!
//! 进程内模拟宿主，供 CLI 与集成测试驱动同步引擎。
//!
//! 提供：
//! - 按当前加速倍率推进的模拟时钟
//! - 系统或虚拟墙钟
//! - 基于档位表的加速控制器
//! - 可暂停的激活闸门

mod clock;
mod gate;
mod host;
mod warp;

pub use clock::{SimClock, WallClockMode};
pub use gate::SimGate;
pub use host::{HostSnapshot, SimHostConfig, SimulatedHost};
pub use warp::SimWarpController;
