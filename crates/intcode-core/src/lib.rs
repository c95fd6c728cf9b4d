//! Core crate for the intcode machine: a word-addressed interpreter for
//! comma-separated integer programs.

/// Sparse word-addressed memory store and address policy helpers.
pub mod memory;
pub use memory::{resolve_address, validate_address, Address, Memory, Word};

/// Program text loader.
pub mod loader;
pub use loader::{load_program, load_program_file, parse_program, LoadError};

/// Opcode table and instruction-word field extraction.
pub mod encoding;
pub use encoding::{
    encode_instruction, mode_digit, opcode_value, Opcode, ParameterMode, OPCODE_TABLE,
    PARAMETER_SLOTS,
};

/// Instruction decode with parameter-mode resolution.
pub mod decoder;
pub use decoder::{DecodedInstruction, Decoder};

/// Fault taxonomy for everything that ends a run early.
pub mod fault;
pub use fault::{Fault, FaultClass, FaultCode};

/// Public host-facing API contract and integration types.
pub mod api;
pub use api::{
    CancellationToken, MachineConfig, MachineSnapshot, NoopTrace, RunOutcome, StepOutcome,
    TraceEvent, TraceSink,
};

/// Machine execution-state primitives.
pub mod state;
pub use state::RunState;

/// Input and output ports.
pub mod ports;
pub use ports::{
    ChannelInput, ChannelOutput, DiscardOutput, InputPort, LineInput, LineOutput, NoInput,
    OutputPort, PortError,
};

/// Operation set and per-instruction dispatch.
pub mod execute;
pub use execute::{execute_instruction, ExecuteContext, ExecuteOutcome};

/// Execution loop and machine instance.
pub mod machine;
pub use machine::Machine;

/// Execution statistics collected through the trace hook.
pub mod diag;
pub use diag::ExecutionStats;

/// Linear-sweep disassembler.
pub mod disasm;
pub use disasm::{describe, disassemble, disassemble_one, DisassemblyRow};

#[cfg(test)]
use proptest as _;
#[cfg(test)]
use rstest as _;
