//! Machine execution-state primitives.

/// Run-state machine observed by hosts between instructions.
pub mod run_state;

pub use run_state::RunState;
