//! # Integration Tests
//!
//! 集成测试与端到端测试。
//!
//! 负责：
//! - 合约快照测试
//! - 模拟宿主上的端到端同步（虚拟墙钟，无需真实时间流逝）
//! - 配置编辑与引擎重置的联动

#[cfg(test)]
mod contract_tests {
    use contracts::{SyncEngineConfig, SyncState, WarpRateTable};

    #[test]
    fn test_contract_defaults() {
        let config = SyncEngineConfig::default();
        assert_eq!(config.tolerance_s, 10.0);
        assert_eq!(config.grace_period_s, 3.0);
        assert_eq!(config.min_catch_up_s, 0.2);
        assert_eq!(WarpRateTable::default().len(), 8);
        assert_eq!(SyncState::CatchingUp.as_str(), "catching_up");
    }
}

#[cfg(test)]
mod e2e_tests {
    use chrono::{DateTime, TimeDelta, TimeZone, Utc};
    use clock_format::{DateTimeFormatter, RealtimeFormatter};
    use config_loader::{BaseTimeSetting, ConfigStore, RealtimeConfig};
    use contracts::{
        ClockSource, Notice, SyncEngineConfig, SyncState, WarpController, WarpMode, WarpRateTable,
    };
    use sim_host::{SimHostConfig, SimulatedHost, WallClockMode};
    use sync_engine::{offset_seconds, SyncEngine, TickContext};

    const DT: f64 = 0.1;

    fn start() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()
    }

    /// Engine, host and settings wired together the way a host plugin would
    struct Rig {
        engine: SyncEngine,
        host: SimulatedHost,
        config: RealtimeConfig,
        notices: Vec<Notice>,
    }

    impl Rig {
        /// Simulation starts `offset_s` away from real time
        fn new(offset_s: f64, rates: Vec<f64>) -> Self {
            let simulation_seconds = 86_400.0;
            let base = start()
                - TimeDelta::seconds(simulation_seconds as i64)
                + TimeDelta::milliseconds((offset_s * 1_000.0) as i64);
            let config = RealtimeConfig {
                base_time: BaseTimeSetting::At(base),
                ..RealtimeConfig::default()
            };
            Self::with_config(config, simulation_seconds, rates)
        }

        fn with_config(config: RealtimeConfig, simulation_seconds: f64, rates: Vec<f64>) -> Self {
            let host = SimulatedHost::new(SimHostConfig {
                simulation_seconds,
                wall_clock: WallClockMode::Virtual(start()),
                rates: WarpRateTable::new(rates).unwrap(),
            });
            Self {
                engine: SyncEngine::new(config.engine.clone()),
                host,
                config,
                notices: Vec::new(),
            }
        }

        fn step(&mut self) -> SyncState {
            let state = self.engine.tick(TickContext {
                clock: &self.host.clock,
                gate: &self.host.gate,
                base_time: &self.config,
                warp: &mut self.host.warp,
                notifier: &mut self.notices,
            });
            self.host.advance(DT);
            state
        }

        fn run(&mut self, ticks: usize) -> Vec<SyncState> {
            (0..ticks).map(|_| self.step()).collect()
        }

        fn offset(&self) -> f64 {
            let base = self.config.binding().unwrap();
            offset_seconds(
                base,
                self.host.clock.simulation_seconds(),
                self.host.clock.now_real(),
            )
        }

        fn count(&self, kind: &str) -> usize {
            self.notices.iter().filter(|n| n.kind() == kind).count()
        }
    }

    #[test]
    fn test_day_behind_converges() {
        let mut rig = Rig::new(-86_400.0, contracts::DEFAULT_WARP_RATES.to_vec());
        let states = rig.run(2_000);

        assert!(states.contains(&SyncState::CatchingUp));
        assert!(!states.contains(&SyncState::Inactive));
        assert_eq!(rig.engine.state(), SyncState::Synchronized);
        assert_eq!(rig.host.warp.current_rate_index(), 0);
        assert!(rig.offset().abs() <= rig.engine.config().tolerance_s);
        assert_eq!(rig.count("behind"), 1);
        assert_eq!(rig.count("caught_up"), 1);
    }

    #[test]
    fn test_never_skips_synchronized_on_the_way_to_catching_up() {
        let mut rig = Rig::new(-3_600.0, vec![1.0, 5.0, 10.0, 50.0]);
        let states = rig.run(100);
        let first_catch_up = states
            .iter()
            .position(|s| *s == SyncState::CatchingUp)
            .unwrap();
        assert_eq!(states[first_catch_up - 1], SyncState::Synchronized);
    }

    #[test]
    fn test_ahead_deactivates_once() {
        let mut rig = Rig::new(60.0, contracts::DEFAULT_WARP_RATES.to_vec());
        rig.run(200);

        assert_eq!(rig.engine.state(), SyncState::Inactive);
        assert_eq!(rig.count("ahead"), 1);
        assert_eq!(rig.notices.len(), 1);
        assert_eq!(rig.host.warp.current_rate_index(), 0);
    }

    #[test]
    fn test_within_tolerance_stays_synchronized() {
        let mut rig = Rig::new(-5.0, contracts::DEFAULT_WARP_RATES.to_vec());
        rig.run(500);
        assert_eq!(rig.engine.state(), SyncState::Synchronized);
        assert!(rig.notices.is_empty());
        assert_eq!(rig.host.warp.set_calls(), 0);
    }

    #[test]
    fn test_loading_a_later_save_deactivates() {
        let mut rig = Rig::new(0.0, contracts::DEFAULT_WARP_RATES.to_vec());
        rig.run(50);
        assert_eq!(rig.engine.state(), SyncState::Synchronized);

        // 读档跳到一小时之后
        let later = rig.host.clock.simulation_seconds() + 3_600.0;
        rig.host.clock.set_simulation_seconds(later);
        rig.step();

        assert_eq!(rig.engine.state(), SyncState::Inactive);
        assert_eq!(rig.count("ahead"), 1);
    }

    #[test]
    fn test_residual_auto_warp_is_cancelled() {
        let mut rig = Rig::new(0.0, contracts::DEFAULT_WARP_RATES.to_vec());
        rig.run(50);
        rig.host.warp.begin_auto_warp(3);

        rig.step();
        assert!(!rig.host.warp.auto_warp_active());
        assert_eq!(rig.host.warp.current_rate_index(), 0);
        assert_eq!(rig.engine.state(), SyncState::Synchronized);
    }

    #[test]
    fn test_reset_while_catching_up() {
        let mut rig = Rig::new(-86_400.0, contracts::DEFAULT_WARP_RATES.to_vec());
        while rig.step() != SyncState::CatchingUp {}
        rig.step();
        assert!(rig.host.warp.current_rate_index() > 0);

        rig.engine.reset(&mut rig.host.warp);
        assert_eq!(rig.engine.state(), SyncState::Uninitialized);
        assert_eq!(rig.host.warp.current_rate_index(), 0);
    }

    #[test]
    fn test_physics_warp_left_alone() {
        let mut rig = Rig::new(-3_600.0, contracts::DEFAULT_WARP_RATES.to_vec());
        rig.host.warp.set_mode(WarpMode::Physics);
        let states = rig.run(200);

        assert!(states.contains(&SyncState::CatchingUp));
        assert_eq!(rig.engine.state(), SyncState::CatchingUp);
        assert_eq!(rig.host.warp.current_rate_index(), 0);
        assert_eq!(rig.host.warp.set_calls(), 0);
    }

    #[test]
    fn test_degenerate_table_reported_once() {
        let mut rig = Rig::new(-3_600.0, vec![1.0]);
        rig.run(300);

        assert_eq!(rig.engine.state(), SyncState::CatchingUp);
        assert_eq!(rig.count("degenerate_warp_table"), 1);
        assert_eq!(rig.host.warp.current_rate_index(), 0);
    }

    #[test]
    fn test_paused_host_makes_no_progress() {
        let mut rig = Rig::new(-3_600.0, contracts::DEFAULT_WARP_RATES.to_vec());
        rig.host.gate.paused = true;
        rig.run(100);
        assert_eq!(rig.engine.state(), SyncState::Uninitialized);
        assert!(rig.notices.is_empty());
    }

    #[test]
    fn test_disallowed_context_goes_inactive() {
        let mut rig = Rig::new(-3_600.0, contracts::DEFAULT_WARP_RATES.to_vec());
        rig.host.gate.allowed = false;
        rig.run(100);
        assert_eq!(rig.engine.state(), SyncState::Inactive);
        assert!(rig.notices.is_empty());
    }

    #[test]
    fn test_ui_open_freezes_synchronized() {
        let mut rig = Rig::new(-3_600.0, contracts::DEFAULT_WARP_RATES.to_vec());
        rig.engine.set_user_interface_open(true);
        rig.run(200);
        assert_eq!(rig.engine.state(), SyncState::Synchronized);

        rig.engine.set_user_interface_open(false);
        rig.step();
        assert_eq!(rig.engine.state(), SyncState::CatchingUp);
    }

    #[test]
    fn test_config_store_edits_drive_resets() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("realtime.toml");
        let mut store = ConfigStore::open_or_default(&path).unwrap();
        store.config_mut().engine = SyncEngineConfig {
            min_catch_up_s: 1.0,
            ..SyncEngineConfig::default()
        };
        store.save().unwrap();

        // 未配置：预热后停用
        let mut rig = Rig::with_config(
            store.config().clone(),
            1_000.0,
            contracts::DEFAULT_WARP_RATES.to_vec(),
        );
        rig.run(100);
        assert_eq!(rig.engine.state(), SyncState::Inactive);
        assert_eq!(rig.count("not_configured"), 1);

        // 绑定到落后 10 分钟的时刻
        let now = rig.host.clock.now_real();
        let sim = rig.host.clock.simulation_seconds();
        let base = now - TimeDelta::seconds(sim as i64 + 600);
        assert!(store.set_base_time(base));
        store.save().unwrap();

        rig.config = ConfigStore::open(&path).unwrap().config().clone();
        rig.engine.reset(&mut rig.host.warp);
        let states = rig.run(1_000);
        assert!(states.contains(&SyncState::CatchingUp));
        assert_eq!(rig.engine.state(), SyncState::Synchronized);

        // 清除绑定
        assert!(store.unset_base_time());
        rig.config = store.config().clone();
        rig.engine.reset(&mut rig.host.warp);
        rig.run(100);
        assert_eq!(rig.engine.state(), SyncState::Inactive);
        assert_eq!(rig.count("not_configured"), 2);
    }

    #[test]
    fn test_formatter_shows_real_date_once_synchronized() {
        let mut rig = Rig::new(-86_400.0, contracts::DEFAULT_WARP_RATES.to_vec());
        rig.run(2_000);
        assert_eq!(rig.engine.state(), SyncState::Synchronized);

        let formatter = RealtimeFormatter::new(&rig.config);
        let shown = formatter.print_date(rig.host.clock.simulation_seconds(), false, false);
        let today = rig.host.clock.now_real().format("%Y-%m-%d").to_string();
        assert_eq!(shown, today);
        assert!(formatter.seen_invocations().is_empty());
    }
}
