//! Opcode table and decimal instruction-word field extraction.

use crate::Word;

/// Number of parameter slots carried by every instruction word.
pub const PARAMETER_SLOTS: usize = 3;

/// Decimal divisor separating the opcode from the parameter-mode digits.
const OPCODE_RADIX: Word = 100;

/// Operations assigned an opcode value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[allow(missing_docs)]
pub enum Opcode {
    Add,
    Multiply,
    Input,
    Output,
    JumpIfTrue,
    JumpIfFalse,
    LessThan,
    Equals,
    Halt,
}

/// Single source-of-truth opcode table.
///
/// Any opcode value not present here is invalid by definition.
pub const OPCODE_TABLE: &[(Word, Opcode)] = &[
    (1, Opcode::Add),
    (2, Opcode::Multiply),
    (3, Opcode::Input),
    (4, Opcode::Output),
    (5, Opcode::JumpIfTrue),
    (6, Opcode::JumpIfFalse),
    (7, Opcode::LessThan),
    (8, Opcode::Equals),
    (99, Opcode::Halt),
];

impl Opcode {
    /// Looks up the operation assigned to an opcode value.
    ///
    /// `None` means the value is unassigned.
    #[must_use]
    pub fn from_value(value: Word) -> Option<Self> {
        OPCODE_TABLE
            .iter()
            .find_map(|(entry, opcode)| (*entry == value).then_some(*opcode))
    }

    /// Returns the opcode value stored in the low two digits of a word.
    #[must_use]
    pub const fn value(self) -> Word {
        match self {
            Self::Add => 1,
            Self::Multiply => 2,
            Self::Input => 3,
            Self::Output => 4,
            Self::JumpIfTrue => 5,
            Self::JumpIfFalse => 6,
            Self::LessThan => 7,
            Self::Equals => 8,
            Self::Halt => 99,
        }
    }

    /// Number of parameters the operation consumes.
    #[must_use]
    pub const fn arity(self) -> usize {
        match self {
            Self::Add | Self::Multiply | Self::LessThan | Self::Equals => 3,
            Self::JumpIfTrue | Self::JumpIfFalse => 2,
            Self::Input | Self::Output => 1,
            Self::Halt => 0,
        }
    }

    /// Leading parameters the decoder resolves to effective addresses.
    ///
    /// A jump target is resolved only once the jump is taken.
    #[must_use]
    pub const fn resolved_arity(self) -> usize {
        match self {
            Self::JumpIfTrue | Self::JumpIfFalse => 1,
            _ => self.arity(),
        }
    }

    /// Words occupied by the instruction, which is also its fall-through pc advance.
    #[must_use]
    pub const fn width(self) -> usize {
        self.arity() + 1
    }

    /// Upper-case mnemonic used by traces and disassembly.
    #[must_use]
    pub const fn mnemonic(self) -> &'static str {
        match self {
            Self::Add => "ADD",
            Self::Multiply => "MUL",
            Self::Input => "IN",
            Self::Output => "OUT",
            Self::JumpIfTrue => "JNZ",
            Self::JumpIfFalse => "JZ",
            Self::LessThan => "LT",
            Self::Equals => "EQ",
            Self::Halt => "HALT",
        }
    }

    /// Returns true for operations whose last parameter is a write target.
    #[must_use]
    pub const fn writes_memory(self) -> bool {
        matches!(
            self,
            Self::Add | Self::Multiply | Self::Input | Self::LessThan | Self::Equals
        )
    }
}

/// Per-parameter addressing mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ParameterMode {
    /// Parameter holds the address of the operand.
    #[default]
    Position = 0,
    /// Parameter is the operand itself.
    Immediate = 1,
}

impl ParameterMode {
    /// Converts a decimal mode digit into a mode.
    #[must_use]
    pub const fn from_digit(digit: Word) -> Option<Self> {
        match digit {
            0 => Some(Self::Position),
            1 => Some(Self::Immediate),
            _ => None,
        }
    }

    /// Returns the decimal digit encoding this mode.
    #[must_use]
    pub const fn digit(self) -> Word {
        self as Word
    }
}

/// Extracts the opcode value (`word mod 100`).
#[must_use]
pub const fn opcode_value(word: Word) -> Word {
    word % OPCODE_RADIX
}

/// Extracts the raw mode digit for parameter `slot` (0-based).
///
/// Digits are read least-significant first above the two opcode digits.
#[must_use]
pub const fn mode_digit(word: Word, slot: usize) -> Word {
    let mut modes = word / OPCODE_RADIX;
    let mut remaining = slot;
    while remaining > 0 {
        modes /= 10;
        remaining -= 1;
    }
    modes % 10
}

/// Builds an instruction word from an opcode and leading parameter modes.
///
/// Slots without an entry in `modes` are encoded as position mode.
#[must_use]
pub fn encode_instruction(opcode: Opcode, modes: &[ParameterMode]) -> Word {
    modes
        .iter()
        .take(PARAMETER_SLOTS)
        .rev()
        .fold(0, |acc, mode| acc * 10 + mode.digit())
        * OPCODE_RADIX
        + opcode.value()
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::{
        encode_instruction, mode_digit, opcode_value, Opcode, ParameterMode, OPCODE_TABLE,
    };

    #[test]
    fn table_contains_unique_opcode_values() {
        let values: HashSet<_> = OPCODE_TABLE.iter().map(|(value, _)| *value).collect();
        assert_eq!(values.len(), OPCODE_TABLE.len());
    }

    #[test]
    fn every_table_entry_resolves_via_lookup() {
        for (value, opcode) in OPCODE_TABLE {
            assert_eq!(Opcode::from_value(*value), Some(*opcode));
            assert_eq!(opcode.value(), *value);
        }
    }

    #[test]
    fn unassigned_values_are_invalid() {
        for value in [0, 9, 10, 50, 98, 100, -1] {
            assert_eq!(Opcode::from_value(value), None, "value {value}");
        }
    }

    #[test]
    fn widths_match_fall_through_advance() {
        assert_eq!(Opcode::Add.width(), 4);
        assert_eq!(Opcode::Input.width(), 2);
        assert_eq!(Opcode::JumpIfFalse.width(), 3);
        assert_eq!(Opcode::Halt.width(), 1);
    }

    #[test]
    fn only_storing_operations_write_memory() {
        let writers: Vec<_> = OPCODE_TABLE
            .iter()
            .filter(|(_, opcode)| opcode.writes_memory())
            .map(|(value, _)| *value)
            .collect();
        assert_eq!(writers, vec![1, 2, 3, 7, 8]);
        assert!(!Opcode::Output.writes_memory());
        assert!(!Opcode::JumpIfFalse.writes_memory());
        assert!(!Opcode::Halt.writes_memory());
    }

    #[test]
    fn field_extraction_reads_digits_least_significant_first() {
        let word = 10_102;
        assert_eq!(opcode_value(word), 2);
        assert_eq!(mode_digit(word, 0), 1);
        assert_eq!(mode_digit(word, 1), 0);
        assert_eq!(mode_digit(word, 2), 1);
    }

    #[test]
    fn mode_digits_beyond_the_word_are_position() {
        assert_eq!(mode_digit(99, 0), 0);
        assert_eq!(mode_digit(3, 2), 0);
    }

    #[test]
    fn encode_instruction_places_modes_above_opcode() {
        let word = encode_instruction(
            Opcode::Multiply,
            &[ParameterMode::Position, ParameterMode::Immediate],
        );
        assert_eq!(word, 1002);
        assert_eq!(encode_instruction(Opcode::Halt, &[]), 99);
        assert_eq!(
            encode_instruction(Opcode::Equals, &[ParameterMode::Immediate; 3]),
            11_108
        );
    }
}
