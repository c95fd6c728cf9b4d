use thiserror::Error;

use crate::{Address, Word};

/// Fault classes used for statistics aggregation and policy decisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub enum FaultClass {
    /// Instruction word carried an unusable parameter mode.
    Decode,
    /// Opcode value has no operation assigned.
    Dispatch,
    /// Address conversion or bounds policy violation.
    Memory,
    /// Input or output port could not complete a transfer.
    Io,
    /// Host-imposed run limit or cancellation.
    Budget,
}

/// Stable fault taxonomy for everything that can end a run early.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[repr(u8)]
pub enum FaultCode {
    /// Low two digits of the instruction word name no operation.
    #[error("invalid opcode")]
    InvalidOpcode = 0x01,
    /// A parameter mode digit is neither position (0) nor immediate (1).
    #[error("invalid parameter mode")]
    InvalidParameterMode = 0x02,
    /// Input operation found no further value on the input port.
    #[error("input exhausted")]
    InputExhausted = 0x03,
    /// Output port refused the emitted value.
    #[error("output rejected")]
    OutputRejected = 0x04,
    /// A negative word was used as an address or jump target.
    #[error("negative address")]
    NegativeAddress = 0x05,
    /// Address crossed the configured memory limit.
    #[error("address out of bounds")]
    AddressOutOfBounds = 0x06,
    /// Run retired more instructions than the configured step limit.
    #[error("step limit exceeded")]
    StepLimitExceeded = 0x07,
    /// Run was cancelled through its cancellation token.
    #[error("execution cancelled")]
    Cancelled = 0x08,
}

impl FaultCode {
    /// Converts a fault code to its stable byte value.
    #[must_use]
    pub const fn as_u8(self) -> u8 {
        self as u8
    }

    /// Converts a stable byte value back into a fault code.
    #[must_use]
    pub const fn from_u8(code: u8) -> Option<Self> {
        match code {
            0x01 => Some(Self::InvalidOpcode),
            0x02 => Some(Self::InvalidParameterMode),
            0x03 => Some(Self::InputExhausted),
            0x04 => Some(Self::OutputRejected),
            0x05 => Some(Self::NegativeAddress),
            0x06 => Some(Self::AddressOutOfBounds),
            0x07 => Some(Self::StepLimitExceeded),
            0x08 => Some(Self::Cancelled),
            _ => None,
        }
    }

    /// Returns the statistics class for this fault code.
    #[must_use]
    pub const fn class(self) -> FaultClass {
        match self {
            Self::InvalidParameterMode => FaultClass::Decode,
            Self::InvalidOpcode => FaultClass::Dispatch,
            Self::NegativeAddress | Self::AddressOutOfBounds => FaultClass::Memory,
            Self::InputExhausted | Self::OutputRejected => FaultClass::Io,
            Self::StepLimitExceeded | Self::Cancelled => FaultClass::Budget,
        }
    }
}

/// Terminal error of a run: what went wrong, where, and the offending word.
///
/// `value` is the opcode value for [`FaultCode::InvalidOpcode`], the raw
/// instruction word for [`FaultCode::InvalidParameterMode`], the address word
/// for memory faults, the destination address for
/// [`FaultCode::InputExhausted`], the value refused by the output port, and
/// the retired step count for budget faults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[error("{code}: {value} @{pc}")]
pub struct Fault {
    /// Fault category.
    pub code: FaultCode,
    /// Program counter of the instruction that faulted.
    pub pc: Address,
    /// Offending word, interpreted per `code`.
    pub value: Word,
}

impl Fault {
    /// Creates a fault record.
    #[must_use]
    pub const fn new(code: FaultCode, pc: Address, value: Word) -> Self {
        Self { code, pc, value }
    }

    /// Shorthand for the class of the carried code.
    #[must_use]
    pub const fn class(&self) -> FaultClass {
        self.code.class()
    }
}

#[cfg(test)]
mod tests {
    use super::{Fault, FaultClass, FaultCode};

    #[test]
    fn stable_code_roundtrip_is_bijective_for_defined_values() {
        for code in 0x01u8..=0x08 {
            let fault = FaultCode::from_u8(code).expect("defined taxonomy code");
            assert_eq!(fault.as_u8(), code);
        }
    }

    #[test]
    fn unknown_code_is_rejected() {
        assert!(FaultCode::from_u8(0x00).is_none());
        assert!(FaultCode::from_u8(0xFF).is_none());
    }

    #[test]
    fn class_mapping_matches_fault_taxonomy() {
        assert_eq!(FaultCode::InvalidParameterMode.class(), FaultClass::Decode);
        assert_eq!(FaultCode::InvalidOpcode.class(), FaultClass::Dispatch);
        assert_eq!(FaultCode::NegativeAddress.class(), FaultClass::Memory);
        assert_eq!(FaultCode::OutputRejected.class(), FaultClass::Io);
        assert_eq!(FaultCode::Cancelled.class(), FaultClass::Budget);
    }

    #[test]
    fn fault_display_names_code_value_and_pc() {
        let fault = Fault::new(FaultCode::InvalidOpcode, 4, 50);
        assert_eq!(fault.to_string(), "invalid opcode: 50 @4");
        assert_eq!(fault.class(), FaultClass::Dispatch);
    }
}
