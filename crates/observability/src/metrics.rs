//! Sync Engine 指标收集模块
//!
//! 记录状态迁移、时间偏移、时间加速档位等运行指标。

use std::collections::BTreeMap;

use contracts::{Notice, SyncState};
use metrics::{counter, gauge, histogram};

/// 记录状态迁移
///
/// 仅在状态真正变化时调用（自环不记录）。
pub fn record_transition(from: SyncState, to: SyncState) {
    counter!(
        "realtime_sync_transitions_total",
        "from" => from.as_str(),
        "to" => to.as_str()
    )
    .increment(1);
}

/// 记录与真实时间的偏移（秒，正数表示模拟时间超前）
pub fn record_offset(offset_s: f64) {
    gauge!("realtime_sync_offset_seconds").set(offset_s);
    histogram!("realtime_sync_offset_abs_seconds").record(offset_s.abs());
}

/// 记录时间加速档位切换
pub fn record_warp_index(index: usize, multiplier: f64) {
    counter!("realtime_sync_warp_changes_total").increment(1);
    gauge!("realtime_sync_warp_index").set(index as f64);
    gauge!("realtime_sync_warp_multiplier").set(multiplier);
}

/// 记录通知
pub fn record_notice(notice: &Notice) {
    counter!("realtime_sync_notices_total", "kind" => notice.kind()).increment(1);
}

/// 记录 tick（暂停时跳过的 tick 单独计数）
pub fn record_tick(skipped: bool) {
    let status = if skipped { "skipped" } else { "run" };
    counter!("realtime_sync_ticks_total", "status" => status).increment(1);
}

/// 同步指标聚合器
///
/// 在内存中聚合指标，便于统计和输出摘要。
#[derive(Debug, Clone, Default)]
pub struct SyncStatsAggregator {
    /// 总 tick 数
    pub total_ticks: u64,

    /// 因暂停跳过的 tick 数
    pub skipped_ticks: u64,

    /// 状态迁移计数 ("from -> to" -> 次数)
    pub transitions: BTreeMap<String, u64>,

    /// 通知计数 (kind -> 次数)
    pub notices: BTreeMap<String, u64>,

    /// 加速档位切换次数
    pub warp_changes: u64,

    /// 最高加速倍率
    pub max_multiplier: f64,

    /// 偏移统计 (秒)
    pub offset_stats: RunningStats,

    /// 最后一次观测到的偏移
    pub last_offset: Option<f64>,
}

impl SyncStatsAggregator {
    /// 创建新的聚合器
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_tick(&mut self, skipped: bool) {
        self.total_ticks += 1;
        if skipped {
            self.skipped_ticks += 1;
        }
    }

    pub fn on_transition(&mut self, from: SyncState, to: SyncState) {
        *self
            .transitions
            .entry(format!("{from} -> {to}"))
            .or_insert(0) += 1;
    }

    pub fn on_notice(&mut self, notice: &Notice) {
        *self.notices.entry(notice.kind().to_string()).or_insert(0) += 1;
    }

    pub fn on_warp_change(&mut self, multiplier: f64) {
        self.warp_changes += 1;
        self.max_multiplier = self.max_multiplier.max(multiplier);
    }

    pub fn on_offset(&mut self, offset_s: f64) {
        self.offset_stats.push(offset_s);
        self.last_offset = Some(offset_s);
    }

    /// 生成摘要报告
    pub fn summary(&self) -> SyncSummary {
        SyncSummary {
            total_ticks: self.total_ticks,
            skipped_ticks: self.skipped_ticks,
            transitions: self.transitions.clone(),
            notices: self.notices.clone(),
            warp_changes: self.warp_changes,
            max_multiplier: self.max_multiplier,
            offset_s: StatsSummary::from(&self.offset_stats),
            last_offset: self.last_offset,
        }
    }

    /// 重置统计
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// 同步摘要
#[derive(Debug, Clone, Default)]
pub struct SyncSummary {
    pub total_ticks: u64,
    pub skipped_ticks: u64,
    pub transitions: BTreeMap<String, u64>,
    pub notices: BTreeMap<String, u64>,
    pub warp_changes: u64,
    pub max_multiplier: f64,
    pub offset_s: StatsSummary,
    pub last_offset: Option<f64>,
}

impl std::fmt::Display for SyncSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "=== Sync Summary ===")?;
        writeln!(
            f,
            "Ticks: {} ({} skipped while paused)",
            self.total_ticks, self.skipped_ticks
        )?;
        writeln!(f, "Warp changes: {}", self.warp_changes)?;
        writeln!(f, "Max multiplier: {:.0}x", self.max_multiplier.max(1.0))?;
        writeln!(f, "Offset (s): {}", self.offset_s)?;
        match self.last_offset {
            Some(offset) => writeln!(f, "Last offset: {offset:.3}s")?,
            None => writeln!(f, "Last offset: N/A")?,
        }

        if !self.transitions.is_empty() {
            writeln!(f, "Transitions:")?;
            for (edge, count) in &self.transitions {
                writeln!(f, "  {edge}: {count}")?;
            }
        }

        if !self.notices.is_empty() {
            writeln!(f, "Notices:")?;
            for (kind, count) in &self.notices {
                writeln!(f, "  {kind}: {count}")?;
            }
        }

        Ok(())
    }
}

/// 统计摘要
#[derive(Debug, Clone, Default)]
pub struct StatsSummary {
    pub count: u64,
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub std_dev: f64,
}

impl From<&RunningStats> for StatsSummary {
    fn from(stats: &RunningStats) -> Self {
        Self {
            count: stats.count,
            min: stats.min,
            max: stats.max,
            mean: stats.mean(),
            std_dev: stats.std_dev(),
        }
    }
}

impl std::fmt::Display for StatsSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.count == 0 {
            write!(f, "N/A")
        } else {
            write!(
                f,
                "min={:.3}, max={:.3}, mean={:.3}, std={:.3} (n={})",
                self.min, self.max, self.mean, self.std_dev, self.count
            )
        }
    }
}

/// 在线统计计算器 (Welford's algorithm)
#[derive(Debug, Clone, Default)]
pub struct RunningStats {
    count: u64,
    mean: f64,
    m2: f64,
    min: f64,
    max: f64,
}

impl RunningStats {
    /// 添加新值
    pub fn push(&mut self, value: f64) {
        self.count += 1;

        if self.count == 1 {
            self.min = value;
            self.max = value;
            self.mean = value;
            self.m2 = 0.0;
        } else {
            self.min = self.min.min(value);
            self.max = self.max.max(value);

            let delta = value - self.mean;
            self.mean += delta / self.count as f64;
            let delta2 = value - self.mean;
            self.m2 += delta * delta2;
        }
    }

    /// 样本数量
    pub fn count(&self) -> u64 {
        self.count
    }

    /// 均值
    pub fn mean(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            self.mean
        }
    }

    /// 方差
    pub fn variance(&self) -> f64 {
        if self.count < 2 {
            0.0
        } else {
            self.m2 / (self.count - 1) as f64
        }
    }

    /// 标准差
    pub fn std_dev(&self) -> f64 {
        self.variance().sqrt()
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_running_stats() {
        let mut stats = RunningStats::default();
        for value in [-100.0, -50.0, 0.0, 50.0, 100.0] {
            stats.push(value);
        }

        assert_eq!(stats.count(), 5);
        assert!(stats.mean().abs() < 1e-10);
        assert!((stats.min() + 100.0).abs() < 1e-10);
        assert!((stats.max() - 100.0).abs() < 1e-10);
        assert!((stats.variance() - 6250.0).abs() < 1e-6);
    }

    #[test]
    fn test_aggregator_counts() {
        let mut aggregator = SyncStatsAggregator::new();

        aggregator.on_tick(false);
        aggregator.on_tick(true);
        aggregator.on_transition(SyncState::Synchronized, SyncState::CatchingUp);
        aggregator.on_notice(&Notice::Behind { offset_s: -60.0 });
        aggregator.on_warp_change(50.0);
        aggregator.on_warp_change(10.0);
        aggregator.on_offset(-60.0);

        assert_eq!(aggregator.total_ticks, 2);
        assert_eq!(aggregator.skipped_ticks, 1);
        assert_eq!(
            aggregator.transitions.get("synchronized -> catching_up"),
            Some(&1)
        );
        assert_eq!(aggregator.notices.get("behind"), Some(&1));
        assert_eq!(aggregator.warp_changes, 2);
        assert_eq!(aggregator.max_multiplier, 50.0);
        assert_eq!(aggregator.last_offset, Some(-60.0));
    }

    #[test]
    fn test_summary_display() {
        let mut aggregator = SyncStatsAggregator::new();
        aggregator.on_tick(false);
        aggregator.on_transition(SyncState::CatchingUp, SyncState::Synchronized);
        aggregator.on_notice(&Notice::CaughtUp);

        let output = aggregator.summary().to_string();
        assert!(output.contains("Ticks: 1 (0 skipped"));
        assert!(output.contains("catching_up -> synchronized: 1"));
        assert!(output.contains("caught_up: 1"));
        assert!(output.contains("Last offset: N/A"));
    }
}
