//! Operand access helpers shared by the operation implementations.

use crate::api::{TraceEvent, TraceSink};
use crate::fault::Fault;
use crate::memory::resolve_address;
use crate::{Address, Memory, Word};

/// Reads the operand behind an effective address.
///
/// Mode differences were absorbed at decode time, so this is a single read
/// in both position and immediate mode.
#[must_use]
pub fn read_operand(memory: &Memory, effective_address: Address) -> Word {
    memory.get(effective_address)
}

/// Stores an operation result at the destination's effective address.
pub fn write_result(
    memory: &mut Memory,
    trace: &mut dyn TraceSink,
    address: Address,
    value: Word,
) {
    memory.set(address, value);
    trace.on_event(TraceEvent::MemoryWrite { address, value });
}

/// Dereferences a jump-target operand into a program counter.
///
/// # Errors
///
/// Returns a memory fault carrying the target word when it is negative or
/// beyond `limit`.
pub fn jump_target(
    memory: &Memory,
    pc: Address,
    effective_address: Address,
    limit: Option<usize>,
) -> Result<Address, Fault> {
    let target = read_operand(memory, effective_address);
    resolve_address(target, limit).map_err(|code| Fault::new(code, pc, target))
}

/// Encodes a comparison result as the machine's boolean word.
#[must_use]
pub const fn flag_word(condition: bool) -> Word {
    if condition {
        1
    } else {
        0
    }
}
