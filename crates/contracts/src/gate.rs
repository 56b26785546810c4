//! Activation gate - decides whether synchronization may run.

/// Activation gate trait
///
/// Consulted by the engine on every tick.
pub trait ActivationGate {
    /// Host is paused; the whole tick is skipped
    fn is_paused(&self) -> bool;

    /// Current execution context permits synchronization
    ///
    /// Checked once when leaving `Uninitialized`.
    fn context_allowed(&self) -> bool;
}

/// Gate that always allows synchronization
#[derive(Debug, Clone, Copy, Default)]
pub struct OpenGate;

impl ActivationGate for OpenGate {
    fn is_paused(&self) -> bool {
        false
    }

    fn context_allowed(&self) -> bool {
        true
    }
}
