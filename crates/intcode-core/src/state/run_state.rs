use crate::FaultCode;

/// Execution-state machine for host-observable control flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub enum RunState {
    /// Loaded but never executed.
    #[default]
    Idle,
    /// Ready to execute the next instruction.
    Running,
    /// Stopped cleanly by the halt operation.
    Halted,
    /// Stopped by a fault; no further progress is possible.
    Faulted(FaultCode),
}

impl RunState {
    /// Returns the latched fault, if this state is faulted.
    #[must_use]
    pub const fn latched_fault(self) -> Option<FaultCode> {
        match self {
            Self::Faulted(cause) => Some(cause),
            Self::Idle | Self::Running | Self::Halted => None,
        }
    }

    /// Returns true once the machine can no longer execute instructions.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Halted | Self::Faulted(_))
    }
}

#[cfg(test)]
mod tests {
    use super::RunState;
    use crate::FaultCode;

    #[test]
    fn run_state_default_is_idle() {
        assert_eq!(RunState::default(), RunState::Idle);
    }

    #[test]
    fn latched_fault_accessor_reports_only_faulted_variant() {
        assert_eq!(RunState::Idle.latched_fault(), None);
        assert_eq!(RunState::Running.latched_fault(), None);
        assert_eq!(RunState::Halted.latched_fault(), None);
        assert_eq!(
            RunState::Faulted(FaultCode::InvalidOpcode).latched_fault(),
            Some(FaultCode::InvalidOpcode)
        );
    }

    #[test]
    fn halt_and_fault_are_distinct_terminal_states() {
        assert!(RunState::Halted.is_terminal());
        assert!(RunState::Faulted(FaultCode::InputExhausted).is_terminal());
        assert_ne!(
            RunState::Halted,
            RunState::Faulted(FaultCode::InputExhausted)
        );
        assert!(!RunState::Running.is_terminal());
        assert!(!RunState::Idle.is_terminal());
    }
}
