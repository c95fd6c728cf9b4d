//! Operation set and the per-instruction dispatch step.
//!
//! Every operation receives the effective addresses computed by the decoder.
//! Sources are dereferenced with one memory read; destinations are written
//! at their effective address directly. Jump targets are the exception: they
//! are resolved here, and only for a taken jump. Operations report how the program
//! counter moves and leave the update itself to the execution loop.

mod helpers;

pub use helpers::{flag_word, jump_target, read_operand, write_result};

use crate::api::{TraceEvent, TraceSink};
use crate::decoder::{address_word, DecodedInstruction, Decoder};
use crate::fault::{Fault, FaultCode};
use crate::ports::{InputPort, OutputPort};
use crate::{Address, Memory, Opcode};

/// Program-counter effect of one executed instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExecuteOutcome {
    /// Advance by the instruction width.
    Advance,
    /// Overwrite the program counter.
    Jump(Address),
    /// Stop the machine.
    Halt,
}

/// Mutable machine resources lent to an executing instruction.
pub struct ExecuteContext<'a> {
    /// Memory image, including the instruction stream.
    pub memory: &'a mut Memory,
    /// Source for the input operation.
    pub input: &'a mut dyn InputPort,
    /// Sink for the output operation.
    pub output: &'a mut dyn OutputPort,
    /// Observer for writes, I/O, and jumps.
    pub trace: &'a mut dyn TraceSink,
    /// Exclusive bound applied to jump targets.
    pub address_limit: Option<usize>,
}

/// Executes one decoded instruction against the lent resources.
///
/// # Errors
///
/// Returns the fault raised by the operation: [`FaultCode::InputExhausted`],
/// [`FaultCode::OutputRejected`], or a memory fault for an unusable jump
/// target. Memory is left untouched by a faulting operation.
pub fn execute_instruction(
    instr: &DecodedInstruction,
    ctx: &mut ExecuteContext<'_>,
) -> Result<ExecuteOutcome, Fault> {
    match instr.opcode {
        Opcode::Add => Ok(execute_arith(instr, ctx, ArithOp::Add)),
        Opcode::Multiply => Ok(execute_arith(instr, ctx, ArithOp::Mul)),
        Opcode::Input => execute_input(instr, ctx),
        Opcode::Output => execute_output(instr, ctx),
        Opcode::JumpIfTrue => execute_jump(instr, ctx, JumpCondition::NonZero),
        Opcode::JumpIfFalse => execute_jump(instr, ctx, JumpCondition::Zero),
        Opcode::LessThan => Ok(execute_compare(instr, ctx, CompareOp::LessThan)),
        Opcode::Equals => Ok(execute_compare(instr, ctx, CompareOp::Equals)),
        Opcode::Halt => Ok(ExecuteOutcome::Halt),
    }
}

#[derive(Clone, Copy)]
enum ArithOp {
    Add,
    Mul,
}

fn execute_arith(
    instr: &DecodedInstruction,
    ctx: &mut ExecuteContext<'_>,
    op: ArithOp,
) -> ExecuteOutcome {
    let [lhs, rhs, dst] = instr.params;
    let lhs = read_operand(ctx.memory, lhs);
    let rhs = read_operand(ctx.memory, rhs);

    // Two's complement wrap, same as a native machine word.
    let result = match op {
        ArithOp::Add => lhs.wrapping_add(rhs),
        ArithOp::Mul => lhs.wrapping_mul(rhs),
    };

    write_result(ctx.memory, ctx.trace, dst, result);
    ExecuteOutcome::Advance
}

#[derive(Clone, Copy)]
enum CompareOp {
    LessThan,
    Equals,
}

fn execute_compare(
    instr: &DecodedInstruction,
    ctx: &mut ExecuteContext<'_>,
    op: CompareOp,
) -> ExecuteOutcome {
    let [lhs, rhs, dst] = instr.params;
    let lhs = read_operand(ctx.memory, lhs);
    let rhs = read_operand(ctx.memory, rhs);

    let holds = match op {
        CompareOp::LessThan => lhs < rhs,
        CompareOp::Equals => lhs == rhs,
    };

    write_result(ctx.memory, ctx.trace, dst, flag_word(holds));
    ExecuteOutcome::Advance
}

fn execute_input(
    instr: &DecodedInstruction,
    ctx: &mut ExecuteContext<'_>,
) -> Result<ExecuteOutcome, Fault> {
    let dst = instr.params[0];
    let value = ctx
        .input
        .read_value()
        .map_err(|_| Fault::new(FaultCode::InputExhausted, instr.pc, address_word(dst)))?;

    ctx.trace.on_event(TraceEvent::InputConsumed { value });
    write_result(ctx.memory, ctx.trace, dst, value);
    Ok(ExecuteOutcome::Advance)
}

fn execute_output(
    instr: &DecodedInstruction,
    ctx: &mut ExecuteContext<'_>,
) -> Result<ExecuteOutcome, Fault> {
    let value = read_operand(ctx.memory, instr.params[0]);
    ctx.output
        .write_value(value)
        .map_err(|_| Fault::new(FaultCode::OutputRejected, instr.pc, value))?;

    ctx.trace.on_event(TraceEvent::OutputEmitted { value });
    Ok(ExecuteOutcome::Advance)
}

/// Parameter slot holding a jump destination.
const JUMP_TARGET_SLOT: usize = 1;

#[derive(Clone, Copy)]
enum JumpCondition {
    NonZero,
    Zero,
}

fn execute_jump(
    instr: &DecodedInstruction,
    ctx: &mut ExecuteContext<'_>,
    condition: JumpCondition,
) -> Result<ExecuteOutcome, Fault> {
    let cond = read_operand(ctx.memory, instr.params[0]);

    let taken = match condition {
        JumpCondition::NonZero => cond != 0,
        JumpCondition::Zero => cond == 0,
    };
    if !taken {
        return Ok(ExecuteOutcome::Advance);
    }

    let target = Decoder::effective_address(
        ctx.memory,
        instr.pc,
        JUMP_TARGET_SLOT,
        instr.modes[JUMP_TARGET_SLOT],
        ctx.address_limit,
    )?;
    let to = jump_target(ctx.memory, instr.pc, target, ctx.address_limit)?;
    ctx.trace.on_event(TraceEvent::Jump { from: instr.pc, to });
    Ok(ExecuteOutcome::Jump(to))
}
