//! Main sync engine implementation.

use contracts::{
    ActivationGate, BaseTimeSource, ClockSource, Notice, Notifier, SyncEngineConfig, SyncState,
    WarpController,
};
use tracing::{debug, info, instrument, warn};

use crate::offset::offset_seconds;
use crate::transition::{transition, Command, Phase, Step, TickInputs};

/// Collaborators borrowed for the duration of one tick
pub struct TickContext<'a> {
    pub clock: &'a dyn ClockSource,
    pub gate: &'a dyn ActivationGate,
    pub base_time: &'a dyn BaseTimeSource,
    pub warp: &'a mut dyn WarpController,
    pub notifier: &'a mut dyn Notifier,
}

/// Realtime synchronization engine
///
/// Created once per host context and handed by reference to whoever needs to
/// tick it, reset it, or display its state.
#[derive(Debug)]
pub struct SyncEngine {
    /// Configuration
    config: SyncEngineConfig,
    /// Current phase
    phase: Phase,
    /// User-facing status window is open
    ui_open: bool,
    /// Degenerate warp table already reported since the last reset
    degenerate_reported: bool,
    /// Offset observed on the most recent tick that computed one
    last_offset: Option<f64>,
}

impl SyncEngine {
    /// Create a new sync engine with the given configuration
    pub fn new(config: SyncEngineConfig) -> Self {
        Self {
            config,
            phase: Phase::Uninitialized,
            ui_open: false,
            degenerate_reported: false,
            last_offset: None,
        }
    }

    pub fn config(&self) -> &SyncEngineConfig {
        &self.config
    }

    /// Current state (for UI display)
    pub fn state(&self) -> SyncState {
        self.phase.state()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn last_offset(&self) -> Option<f64> {
        self.last_offset
    }

    /// While open, `Synchronized` will not leave for `Inactive` or `CatchingUp`
    pub fn set_user_interface_open(&mut self, open: bool) {
        self.ui_open = open;
    }

    pub fn user_interface_open(&self) -> bool {
        self.ui_open
    }

    /// Advance the state machine by one tick
    ///
    /// Skipped entirely while the gate reports the host paused. Returns the
    /// state after the tick.
    #[instrument(
        level = "trace",
        name = "sync_engine_tick",
        skip(self, ctx),
        fields(state = %self.phase.state())
    )]
    pub fn tick(&mut self, ctx: TickContext<'_>) -> SyncState {
        if ctx.gate.is_paused() {
            observability::record_tick(true);
            return self.state();
        }
        observability::record_tick(false);

        let base_time = ctx.base_time.base_time();
        let offset_s = match base_time {
            Some(base) if self.phase.needs_offset() => {
                let offset =
                    offset_seconds(base, ctx.clock.simulation_seconds(), ctx.clock.now_real());
                debug!(offset_s = offset, "Offset to real time");
                observability::record_offset(offset);
                self.last_offset = Some(offset);
                Some(offset)
            }
            _ => None,
        };

        let step = {
            let inputs = TickInputs {
                host_seconds: ctx.clock.host_seconds(),
                context_allowed: self.phase == Phase::Uninitialized && ctx.gate.context_allowed(),
                binding_present: base_time.is_some(),
                offset_s,
                rates: ctx.warp.rates(),
                warp_index: ctx.warp.current_rate_index(),
                warp_mode: ctx.warp.mode(),
                ui_open: self.ui_open,
            };
            transition(&self.phase, &inputs, &self.config)
        };

        self.apply(step, ctx.warp, ctx.notifier);
        self.state()
    }

    /// Return to `Uninitialized`, stopping any warp in progress
    ///
    /// Called whenever the base-time binding is created, changed, or cleared.
    #[instrument(name = "sync_engine_reset", skip_all, fields(state = %self.phase.state()))]
    pub fn reset(&mut self, warp: &mut dyn WarpController) {
        info!("Resetting sync engine");
        if self.phase != Phase::Uninitialized {
            stop_warp(warp);
            self.enter(Phase::Uninitialized);
        }
        self.degenerate_reported = false;
        self.last_offset = None;
    }

    fn apply(&mut self, step: Step, warp: &mut dyn WarpController, notifier: &mut dyn Notifier) {
        for command in step.commands {
            match command {
                Command::StopWarp => stop_warp(warp),
                Command::SetWarpIndex(index) => {
                    let multiplier = warp.rates().get(index).copied().unwrap_or(1.0);
                    debug!(index, multiplier, "Setting warp rate");
                    warp.set_rate_index(index);
                    observability::record_warp_index(index, multiplier);
                }
                Command::Notify(notice) => emit(notifier, &notice),
                Command::ReportDegenerateTable => {
                    if !self.degenerate_reported {
                        self.degenerate_reported = true;
                        warn!(rates = ?warp.rates(), "Warp rate table has no rate above 1x");
                        emit(notifier, &Notice::DegenerateWarpTable);
                    }
                }
                Command::BindingLost => {
                    warn!("Base time binding disappeared without a reset, deactivating");
                }
            }
        }
        self.enter(step.next);
    }

    /// Switch phase, logging the transition once per actual change
    fn enter(&mut self, next: Phase) {
        let from = self.phase.state();
        let to = next.state();
        self.phase = next;
        if from != to {
            info!(from = %from, to = %to, "State transition");
            observability::record_transition(from, to);
        }
    }
}

fn stop_warp(warp: &mut dyn WarpController) {
    warp.cancel_auto_warp();
    warp.set_rate_index(0);
}

/// Presentation (log line, on-screen message) is left to the notifier
fn emit(notifier: &mut dyn Notifier, notice: &Notice) {
    debug!(kind = notice.kind(), "Emitting notice");
    observability::record_notice(notice);
    notifier.notify(notice);
}
