//! Pure transition table of the synchronization state machine.
//!
//! `transition` maps the current phase and one tick's observations to the next
//! phase plus the commands the driver must apply. It performs no I/O, so every
//! row of the table is testable without clocks or controllers.

use contracts::{Notice, SyncEngineConfig, SyncState, WarpMode};

use crate::rate::select_warp_index;

/// Engine phase
///
/// Tagged counterpart of [`SyncState`]; each variant carries only the data it
/// needs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Phase {
    Uninitialized,
    Inactive,
    /// Entered at host time `since` (seconds)
    WarmingUp { since: f64 },
    Synchronized,
    CatchingUp,
}

impl Phase {
    /// Public view of this phase
    pub fn state(&self) -> SyncState {
        match self {
            Phase::Uninitialized => SyncState::Uninitialized,
            Phase::Inactive => SyncState::Inactive,
            Phase::WarmingUp { .. } => SyncState::WarmingUp,
            Phase::Synchronized => SyncState::Synchronized,
            Phase::CatchingUp => SyncState::CatchingUp,
        }
    }

    /// Whether a tick in this phase reads the clocks to compute an offset
    pub fn needs_offset(&self) -> bool {
        matches!(self, Phase::Synchronized | Phase::CatchingUp)
    }
}

/// Observations gathered for one tick
#[derive(Debug, Clone, Copy)]
pub struct TickInputs<'a> {
    /// Host frame time (seconds)
    pub host_seconds: f64,
    /// Activation gate verdict on the execution context
    pub context_allowed: bool,
    /// A base time is currently bound
    pub binding_present: bool,
    /// Offset to real time; `None` when not computed this tick
    pub offset_s: Option<f64>,
    /// Warp multiplier table
    pub rates: &'a [f64],
    /// Active warp index
    pub warp_index: usize,
    /// Active warp mode
    pub warp_mode: WarpMode,
    /// User-facing status window is open (freezes `Synchronized`)
    pub ui_open: bool,
}

/// Side effect requested by a transition
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Cancel automatic acceleration and return to 1x
    StopWarp,
    /// Activate the warp rate at this index
    SetWarpIndex(usize),
    /// Emit a notice
    Notify(Notice),
    /// Warp table has nothing beyond 1x
    ReportDegenerateTable,
    /// Binding vanished while synchronizing without a reset
    BindingLost,
}

/// Outcome of one transition
#[derive(Debug, Clone, PartialEq)]
pub struct Step {
    pub next: Phase,
    pub commands: Vec<Command>,
}

impl Step {
    fn to(next: Phase) -> Self {
        Self {
            next,
            commands: Vec::new(),
        }
    }

    fn with(mut self, command: Command) -> Self {
        self.commands.push(command);
        self
    }
}

/// Advance the state machine by one tick
pub fn transition(phase: &Phase, inputs: &TickInputs<'_>, config: &SyncEngineConfig) -> Step {
    match *phase {
        Phase::Uninitialized => {
            if inputs.context_allowed {
                Step::to(Phase::WarmingUp {
                    since: inputs.host_seconds,
                })
            } else {
                Step::to(Phase::Inactive)
            }
        }
        Phase::WarmingUp { since } => {
            if inputs.host_seconds - since <= config.grace_period_s {
                Step::to(*phase)
            } else if inputs.binding_present {
                Step::to(Phase::Synchronized)
            } else {
                Step::to(Phase::Inactive).with(Command::Notify(Notice::NotConfigured))
            }
        }
        Phase::Inactive => Step::to(Phase::Inactive),
        Phase::Synchronized => synchronized(inputs, config),
        Phase::CatchingUp => catching_up(inputs, config),
    }
}

fn synchronized(inputs: &TickInputs<'_>, config: &SyncEngineConfig) -> Step {
    let Some(offset_s) = inputs.offset_s else {
        return binding_lost();
    };

    let mut step = Step::to(Phase::Synchronized);
    if inputs.warp_index != 0 {
        step = step.with(Command::StopWarp);
    }

    if inputs.ui_open {
        return step;
    }

    if offset_s > config.tolerance_s {
        step.next = Phase::Inactive;
        step.with(Command::Notify(Notice::Ahead { offset_s }))
    } else if offset_s < -config.tolerance_s {
        step.next = Phase::CatchingUp;
        step.with(Command::Notify(Notice::Behind { offset_s }))
    } else {
        step
    }
}

fn catching_up(inputs: &TickInputs<'_>, config: &SyncEngineConfig) -> Step {
    let Some(offset_s) = inputs.offset_s else {
        return binding_lost();
    };

    if offset_s > 0.0 {
        return Step::to(Phase::Synchronized)
            .with(Command::Notify(Notice::CaughtUp))
            .with(Command::StopWarp);
    }

    let step = Step::to(Phase::CatchingUp);
    if inputs.warp_mode != WarpMode::High {
        return step;
    }

    match select_warp_index(inputs.rates, offset_s, config.min_catch_up_s) {
        None => step.with(Command::ReportDegenerateTable),
        Some(index) if index != inputs.warp_index => step.with(Command::SetWarpIndex(index)),
        Some(_) => step,
    }
}

fn binding_lost() -> Step {
    Step::to(Phase::Inactive)
        .with(Command::StopWarp)
        .with(Command::BindingLost)
}
