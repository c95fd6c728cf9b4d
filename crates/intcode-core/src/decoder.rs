//! Instruction decoder.
//!
//! Decoding is a pure function of the memory image and the program counter.
//! Nothing is cached between cycles, so a program that rewrites an upcoming
//! instruction word executes the rewritten instruction.

use crate::encoding::{mode_digit, opcode_value, Opcode, ParameterMode, PARAMETER_SLOTS};
use crate::fault::{Fault, FaultCode};
use crate::memory::{resolve_address, validate_address};
use crate::{Address, Memory, Word};

/// Decoded instruction with every parameter resolved to an effective address.
///
/// Reading memory once at an effective address yields the operand value in
/// either mode; for write targets the effective address is the destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodedInstruction {
    /// Address the instruction word was fetched from.
    pub pc: Address,
    /// Raw instruction word.
    pub word: Word,
    /// Operation selected by the low two digits.
    pub opcode: Opcode,
    /// Mode of each parameter slot.
    pub modes: [ParameterMode; PARAMETER_SLOTS],
    /// Effective addresses; slots not resolved at decode time stay `0`.
    pub params: [Address; PARAMETER_SLOTS],
}

impl DecodedInstruction {
    /// Effective addresses resolved at decode time.
    ///
    /// For jumps this is only the condition; the target is resolved when
    /// the jump is taken.
    #[must_use]
    pub fn operands(&self) -> &[Address] {
        &self.params[..self.opcode.resolved_arity()]
    }

    /// Fall-through program counter after this instruction.
    #[must_use]
    pub const fn next_pc(&self) -> Address {
        self.pc.saturating_add(self.opcode.width())
    }
}

/// Stateless instruction decoder.
pub struct Decoder;

impl Decoder {
    /// Decodes the instruction at `pc` with no address limit.
    ///
    /// # Errors
    ///
    /// See [`Decoder::decode_bounded`].
    pub fn decode(memory: &Memory, pc: Address) -> Result<DecodedInstruction, Fault> {
        Self::decode_bounded(memory, pc, None)
    }

    /// Decodes the instruction at `pc`, enforcing an optional address limit.
    ///
    /// All three mode digits are validated before the opcode is looked up.
    /// Effective addresses are then resolved only for the slots the opcode
    /// reads unconditionally, see [`Opcode::resolved_arity`].
    ///
    /// # Errors
    ///
    /// - [`FaultCode::InvalidParameterMode`] when any mode digit is not 0 or 1
    ///   (value: the instruction word).
    /// - [`FaultCode::InvalidOpcode`] when the opcode value is unassigned
    ///   (value: the opcode value).
    /// - [`FaultCode::NegativeAddress`] or [`FaultCode::AddressOutOfBounds`]
    ///   when a position-mode parameter cannot be used as an address
    ///   (value: the parameter word).
    pub fn decode_bounded(
        memory: &Memory,
        pc: Address,
        limit: Option<usize>,
    ) -> Result<DecodedInstruction, Fault> {
        validate_address(pc, limit).map_err(|code| Fault::new(code, pc, address_word(pc)))?;

        let word = memory.get(pc);
        let modes = Self::decode_modes(word).map_err(|code| Fault::new(code, pc, word))?;

        let value = opcode_value(word);
        let opcode = Opcode::from_value(value)
            .ok_or_else(|| Fault::new(FaultCode::InvalidOpcode, pc, value))?;

        let mut params = [0; PARAMETER_SLOTS];
        for (slot, param) in params.iter_mut().enumerate().take(opcode.resolved_arity()) {
            *param = Self::effective_address(memory, pc, slot, modes[slot], limit)?;
        }

        Ok(DecodedInstruction {
            pc,
            word,
            opcode,
            modes,
            params,
        })
    }

    /// Extracts and validates the three parameter modes of a word.
    ///
    /// # Errors
    ///
    /// Returns [`FaultCode::InvalidParameterMode`] for any digit other than 0 or 1.
    pub fn decode_modes(word: Word) -> Result<[ParameterMode; PARAMETER_SLOTS], FaultCode> {
        let mut modes = [ParameterMode::Position; PARAMETER_SLOTS];
        for (slot, mode) in modes.iter_mut().enumerate() {
            *mode = ParameterMode::from_digit(mode_digit(word, slot))
                .ok_or(FaultCode::InvalidParameterMode)?;
        }
        Ok(modes)
    }

    /// Resolves parameter `slot` of the instruction at `pc`.
    ///
    /// # Errors
    ///
    /// Returns a memory fault when the resolved address is negative or
    /// violates `limit`.
    pub fn effective_address(
        memory: &Memory,
        pc: Address,
        slot: usize,
        mode: ParameterMode,
        limit: Option<usize>,
    ) -> Result<Address, Fault> {
        let param_addr = pc.saturating_add(1 + slot);
        match mode {
            ParameterMode::Position => {
                let raw = memory.get(param_addr);
                resolve_address(raw, limit).map_err(|code| Fault::new(code, pc, raw))
            }
            ParameterMode::Immediate => {
                validate_address(param_addr, limit)
                    .map_err(|code| Fault::new(code, pc, address_word(param_addr)))?;
                Ok(param_addr)
            }
        }
    }
}

/// Widens an address into a word for fault payloads.
pub(crate) fn address_word(address: Address) -> Word {
    Word::try_from(address).unwrap_or(Word::MAX)
}
