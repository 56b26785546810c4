use contracts::ActivationGate;

/// Activation gate with plain flags
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimGate {
    pub paused: bool,
    pub allowed: bool,
}

impl Default for SimGate {
    fn default() -> Self {
        Self {
            paused: false,
            allowed: true,
        }
    }
}

impl ActivationGate for SimGate {
    fn is_paused(&self) -> bool {
        self.paused
    }

    fn context_allowed(&self) -> bool {
        self.allowed
    }
}
