//! Linear-sweep disassembler over a memory image.
//!
//! Words that do not decode are rendered as data and consume one cell, so a
//! sweep always makes progress.

use std::fmt;

use crate::decoder::{DecodedInstruction, Decoder};
use crate::encoding::{opcode_value, Opcode, ParameterMode};
use crate::{Address, Memory, Word};

/// One disassembled instruction or data word.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisassemblyRow {
    /// Address of the first word.
    pub address: Address,
    /// Raw word at `address`.
    pub word: Word,
    /// Decoded operation, or `None` for a data word.
    pub opcode: Option<Opcode>,
    /// Raw parameter words paired with their modes.
    pub operands: Vec<(ParameterMode, Word)>,
}

impl DisassemblyRow {
    /// Words covered by this row.
    #[must_use]
    pub fn len(&self) -> usize {
        self.opcode.map_or(1, Opcode::width)
    }

    /// Rows always cover at least one word.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        false
    }
}

impl fmt::Display for DisassemblyRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some(opcode) = self.opcode else {
            return write!(f, "{:>5}: .word {}", self.address, self.word);
        };
        write!(f, "{:>5}: {:<4}", self.address, opcode.mnemonic())?;
        let rendered = self
            .operands
            .iter()
            .map(|(mode, raw)| match mode {
                ParameterMode::Position => format!("[{raw}]"),
                ParameterMode::Immediate => format!("#{raw}"),
            })
            .collect();
        let text = operand_list(opcode, rendered);
        if !text.is_empty() {
            write!(f, " {text}")?;
        }
        Ok(())
    }
}

/// Joins rendered operands, marking the write target with `->`.
fn operand_list(opcode: Opcode, mut rendered: Vec<String>) -> String {
    let dest = if opcode.writes_memory() {
        rendered.pop()
    } else {
        None
    };
    let mut text = rendered.join(", ");
    if let Some(dest) = dest {
        if !text.is_empty() {
            text.push(' ');
        }
        text.push_str("-> ");
        text.push_str(&dest);
    }
    text
}

/// Disassembles the word at `address`.
///
/// Parameter words are shown raw; no address is dereferenced, so negative
/// parameters render without faulting.
#[must_use]
pub fn disassemble_one(memory: &Memory, address: Address) -> DisassemblyRow {
    let word = memory.get(address);
    let decoded = Decoder::decode_modes(word)
        .ok()
        .and_then(|modes| Opcode::from_value(opcode_value(word)).map(|op| (op, modes)));

    let Some((opcode, modes)) = decoded else {
        return DisassemblyRow {
            address,
            word,
            opcode: None,
            operands: Vec::new(),
        };
    };

    let operands = modes
        .iter()
        .take(opcode.arity())
        .enumerate()
        .map(|(slot, mode)| (*mode, memory.get(address.saturating_add(1 + slot))))
        .collect();

    DisassemblyRow {
        address,
        word,
        opcode: Some(opcode),
        operands,
    }
}

/// Disassembles `[start, end)` in one linear sweep.
///
/// The final row may extend past `end` when an instruction straddles it.
#[must_use]
pub fn disassemble(memory: &Memory, start: Address, end: Address) -> Vec<DisassemblyRow> {
    let mut rows = Vec::new();
    let mut address = start;
    while address < end {
        let row = disassemble_one(memory, address);
        address = address.saturating_add(row.len());
        rows.push(row);
    }
    rows
}

/// Renders a decoded instruction with its effective addresses, as traced.
#[must_use]
pub fn describe(instruction: &DecodedInstruction) -> String {
    let operands = instruction
        .operands()
        .iter()
        .map(|address| format!("@{address}"))
        .collect();
    format!(
        "{:>5}: {:<4} {}  ({})",
        instruction.pc,
        instruction.opcode.mnemonic(),
        operand_list(instruction.opcode, operands),
        instruction.word
    )
}
