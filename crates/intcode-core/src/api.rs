//! Public host-facing API contracts for embedding the machine.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::{Address, DecodedInstruction, Fault, Memory, Opcode, RunState, Word};

/// Top-level immutable configuration for a machine instance.
///
/// The default places no limits on execution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct MachineConfig {
    /// Maximum instructions retired per run; `None` for unbounded.
    pub step_limit: Option<u64>,
    /// Exclusive upper bound on addresses the program may touch.
    pub address_limit: Option<usize>,
}

impl MachineConfig {
    /// Returns a copy with the given step limit.
    #[must_use]
    pub const fn with_step_limit(mut self, limit: u64) -> Self {
        self.step_limit = Some(limit);
        self
    }

    /// Returns a copy with the given exclusive address limit.
    #[must_use]
    pub const fn with_address_limit(mut self, limit: usize) -> Self {
        self.address_limit = Some(limit);
        self
    }
}

/// Output status from one instruction retirement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StepOutcome {
    /// Instruction retired and the machine keeps running.
    Retired {
        /// Operation that was executed.
        opcode: Opcode,
        /// Program counter after the advance or jump.
        next_pc: Address,
    },
    /// Halt retired; the machine is stopped.
    Halted,
}

/// Aggregated outcome of a run that ended in a clean halt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RunOutcome {
    /// Instructions retired by the machine, halt included.
    pub steps: u64,
    /// Address of the halt instruction.
    pub final_pc: Address,
}

/// Full host-visible machine state, for diagnostics and fixtures.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct MachineSnapshot {
    /// Program counter.
    pub pc: Address,
    /// Current execution state.
    pub run_state: RunState,
    /// Instructions retired so far.
    pub steps: u64,
    /// Memory image.
    pub memory: Memory,
}

/// Cooperative cancellation flag checked once per dispatch cycle.
///
/// Clones share the flag, so one clone can be handed to another thread.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    /// Creates an untriggered token.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests cancellation of every machine observing this token.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Release);
    }

    /// Returns true once [`CancellationToken::cancel`] has been called.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }
}

/// Trace events emitted in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TraceEvent {
    /// Instruction decoded and about to execute.
    InstructionStart {
        /// Decoded instruction, including its pc and raw word.
        instruction: DecodedInstruction,
    },
    /// Memory write committed by an operation.
    MemoryWrite {
        /// Target address.
        address: Address,
        /// Value written.
        value: Word,
    },
    /// Input operation consumed a value.
    InputConsumed {
        /// Value read from the input port.
        value: Word,
    },
    /// Output operation emitted a value.
    OutputEmitted {
        /// Value accepted by the output port.
        value: Word,
    },
    /// Conditional jump was taken.
    Jump {
        /// Address of the jump instruction.
        from: Address,
        /// Jump destination.
        to: Address,
    },
    /// Halt retired.
    Halted {
        /// Address of the halt instruction.
        pc: Address,
        /// Instructions retired, halt included.
        steps: u64,
    },
    /// Run ended with a fault.
    FaultRaised {
        /// The fault returned to the caller.
        fault: Fault,
    },
}

/// Sink trait for trace hooks.
pub trait TraceSink {
    /// Records an event in execution order.
    fn on_event(&mut self, event: TraceEvent);

    /// Called once after halt with the final memory image.
    fn on_halt(&mut self, _memory: &Memory) {}
}

impl<T: TraceSink + ?Sized> TraceSink for &mut T {
    fn on_event(&mut self, event: TraceEvent) {
        (**self).on_event(event);
    }

    fn on_halt(&mut self, memory: &Memory) {
        (**self).on_halt(memory);
    }
}

impl TraceSink for Vec<TraceEvent> {
    fn on_event(&mut self, event: TraceEvent) {
        self.push(event);
    }
}

/// Trace sink that ignores everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopTrace;

impl TraceSink for NoopTrace {
    fn on_event(&mut self, _event: TraceEvent) {}
}

#[cfg(test)]
mod tests {
    use super::{CancellationToken, MachineConfig, TraceEvent, TraceSink};

    #[test]
    fn default_config_is_unbounded() {
        let config = MachineConfig::default();
        assert_eq!(config.step_limit, None);
        assert_eq!(config.address_limit, None);
    }

    #[test]
    fn builder_helpers_set_limits() {
        let config = MachineConfig::default()
            .with_step_limit(10)
            .with_address_limit(4096);
        assert_eq!(config.step_limit, Some(10));
        assert_eq!(config.address_limit, Some(4096));
    }

    #[test]
    fn cancellation_is_shared_between_clones() {
        let token = CancellationToken::new();
        let observer = token.clone();
        assert!(!observer.is_cancelled());
        token.cancel();
        assert!(observer.is_cancelled());
    }

    #[test]
    fn vec_sink_records_in_order() {
        let mut events: Vec<TraceEvent> = Vec::new();
        events.on_event(TraceEvent::OutputEmitted { value: 1 });
        events.on_event(TraceEvent::InputConsumed { value: 2 });
        assert_eq!(
            events,
            vec![
                TraceEvent::OutputEmitted { value: 1 },
                TraceEvent::InputConsumed { value: 2 },
            ]
        );
    }
}
