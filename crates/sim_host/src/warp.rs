//! 模拟加速控制器

use contracts::{WarpController, WarpMode, WarpRateTable};
use tracing::trace;

/// Warp controller over a validated rate table
///
/// Records how often it was commanded so tests can check idempotence.
#[derive(Debug, Clone)]
pub struct SimWarpController {
    table: WarpRateTable,
    index: usize,
    mode: WarpMode,
    /// 自动加速进行中（宿主的 "warp to" 功能）
    auto_warp: bool,
    set_calls: u64,
    cancel_calls: u64,
}

impl SimWarpController {
    pub fn new(table: WarpRateTable) -> Self {
        Self {
            table,
            index: 0,
            mode: WarpMode::High,
            auto_warp: false,
            set_calls: 0,
            cancel_calls: 0,
        }
    }

    pub fn table(&self) -> &WarpRateTable {
        &self.table
    }

    /// Multiplier currently applied to simulation time
    pub fn active_rate(&self) -> f64 {
        self.table.rate(self.index).unwrap_or(1.0)
    }

    pub fn set_mode(&mut self, mode: WarpMode) {
        self.mode = mode;
    }

    /// Start an automatic warp, as the host's warp-to-time feature would
    pub fn begin_auto_warp(&mut self, index: usize) {
        self.auto_warp = true;
        self.index = index.min(self.table.len().saturating_sub(1));
    }

    pub fn auto_warp_active(&self) -> bool {
        self.auto_warp
    }

    pub fn set_calls(&self) -> u64 {
        self.set_calls
    }

    pub fn cancel_calls(&self) -> u64 {
        self.cancel_calls
    }
}

impl Default for SimWarpController {
    fn default() -> Self {
        Self::new(WarpRateTable::default())
    }
}

impl WarpController for SimWarpController {
    fn rates(&self) -> &[f64] {
        self.table.rates()
    }

    fn current_rate_index(&self) -> usize {
        self.index
    }

    fn mode(&self) -> WarpMode {
        self.mode
    }

    fn set_rate_index(&mut self, index: usize) {
        self.set_calls += 1;
        // 越界请求截断到最高档
        self.index = index.min(self.table.len().saturating_sub(1));
        trace!(index = self.index, rate = self.active_rate(), "Warp rate applied");
    }

    fn cancel_auto_warp(&mut self) {
        self.cancel_calls += 1;
        self.auto_warp = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_rate_index() {
        let mut warp = SimWarpController::default();
        warp.set_rate_index(3);
        assert_eq!(warp.current_rate_index(), 3);
        assert_eq!(warp.active_rate(), 50.0);
        assert_eq!(warp.set_calls(), 1);
    }

    #[test]
    fn test_out_of_range_index_clamps() {
        let table = WarpRateTable::new(vec![1.0, 5.0]).unwrap();
        let mut warp = SimWarpController::new(table);
        warp.set_rate_index(9);
        assert_eq!(warp.current_rate_index(), 1);
    }

    #[test]
    fn test_cancel_stops_auto_warp() {
        let mut warp = SimWarpController::default();
        warp.begin_auto_warp(2);
        assert!(warp.auto_warp_active());
        warp.cancel_auto_warp();
        assert!(!warp.auto_warp_active());
        assert_eq!(warp.cancel_calls(), 1);
        // cancel 不改变档位
        assert_eq!(warp.current_rate_index(), 2);
    }
}
