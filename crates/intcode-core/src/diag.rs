//! Execution statistics gathered through the trace hook.

use std::collections::HashMap;
use std::fmt;

use crate::api::{TraceEvent, TraceSink};
use crate::{Address, Fault, FaultClass, Opcode, OPCODE_TABLE};

/// Counters collected from trace events.
///
/// One collector can observe several runs; counters saturate instead of
/// wrapping.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ExecutionStats {
    /// Instructions decoded and dispatched.
    pub instruction_count: u64,
    /// Values consumed from input ports.
    pub input_count: u64,
    /// Values emitted to output ports.
    pub output_count: u64,
    /// Memory writes committed by operations.
    pub write_count: u64,
    /// Conditional jumps that were taken.
    pub jumps_taken: u64,
    /// Highest address written, if any write happened.
    pub highest_write: Option<Address>,
    /// Clean halts observed.
    pub halt_count: u64,
    /// Most recent fault observed.
    pub last_fault: Option<Fault>,
    /// Decode-class fault counter.
    pub fault_count_decode: u64,
    /// Dispatch-class fault counter.
    pub fault_count_dispatch: u64,
    /// Memory-class fault counter.
    pub fault_count_memory: u64,
    /// I/O-class fault counter.
    pub fault_count_io: u64,
    /// Budget-class fault counter.
    pub fault_count_budget: u64,
    per_opcode: HashMap<Opcode, u64>,
}

impl ExecutionStats {
    /// Creates an empty collector.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of dispatched instructions with the given opcode.
    #[must_use]
    pub fn opcode_count(&self, opcode: Opcode) -> u64 {
        self.per_opcode.get(&opcode).copied().unwrap_or(0)
    }

    /// Records a fault, updating the last fault and its class counter.
    pub fn record_fault(&mut self, fault: Fault) {
        self.last_fault = Some(fault);
        let counter = match fault.class() {
            FaultClass::Decode => &mut self.fault_count_decode,
            FaultClass::Dispatch => &mut self.fault_count_dispatch,
            FaultClass::Memory => &mut self.fault_count_memory,
            FaultClass::Io => &mut self.fault_count_io,
            FaultClass::Budget => &mut self.fault_count_budget,
        };
        *counter = counter.saturating_add(1);
    }

    /// Resets every counter.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

impl TraceSink for ExecutionStats {
    fn on_event(&mut self, event: TraceEvent) {
        match event {
            TraceEvent::InstructionStart { instruction } => {
                self.instruction_count = self.instruction_count.saturating_add(1);
                let count = self.per_opcode.entry(instruction.opcode).or_default();
                *count = count.saturating_add(1);
            }
            TraceEvent::MemoryWrite { address, .. } => {
                self.write_count = self.write_count.saturating_add(1);
                self.highest_write = self.highest_write.max(Some(address));
            }
            TraceEvent::InputConsumed { .. } => {
                self.input_count = self.input_count.saturating_add(1);
            }
            TraceEvent::OutputEmitted { .. } => {
                self.output_count = self.output_count.saturating_add(1);
            }
            TraceEvent::Jump { .. } => {
                self.jumps_taken = self.jumps_taken.saturating_add(1);
            }
            TraceEvent::Halted { .. } => {
                self.halt_count = self.halt_count.saturating_add(1);
            }
            TraceEvent::FaultRaised { fault } => self.record_fault(fault),
        }
    }
}

impl fmt::Display for ExecutionStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "instructions: {}", self.instruction_count)?;
        for (_, opcode) in OPCODE_TABLE {
            let count = self.opcode_count(*opcode);
            if count > 0 {
                writeln!(f, "  {:<4} {count}", opcode.mnemonic())?;
            }
        }
        writeln!(f, "inputs: {}", self.input_count)?;
        writeln!(f, "outputs: {}", self.output_count)?;
        writeln!(f, "writes: {}", self.write_count)?;
        writeln!(f, "jumps taken: {}", self.jumps_taken)?;
        match self.highest_write {
            Some(address) => writeln!(f, "highest write: {address}")?,
            None => writeln!(f, "highest write: none")?,
        }
        match self.last_fault {
            Some(fault) => write!(f, "fault: {fault}"),
            None => write!(f, "halts: {}", self.halt_count),
        }
    }
}
