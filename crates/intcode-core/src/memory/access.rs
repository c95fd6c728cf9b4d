//! Address conversion and optional bounds policy.

use crate::{Address, FaultCode, Word};

/// Validates `address` against an optional exclusive upper limit.
///
/// # Errors
///
/// Returns [`FaultCode::AddressOutOfBounds`] when `limit` is set and
/// `address >= limit`.
pub const fn validate_address(address: Address, limit: Option<usize>) -> Result<(), FaultCode> {
    match limit {
        Some(limit) if address >= limit => Err(FaultCode::AddressOutOfBounds),
        _ => Ok(()),
    }
}

/// Converts a word used as an address into an [`Address`].
///
/// # Errors
///
/// Returns [`FaultCode::NegativeAddress`] for negative words and
/// [`FaultCode::AddressOutOfBounds`] when the address violates `limit`.
pub fn resolve_address(word: Word, limit: Option<usize>) -> Result<Address, FaultCode> {
    if word < 0 {
        return Err(FaultCode::NegativeAddress);
    }
    let address = Address::try_from(word).map_err(|_| FaultCode::AddressOutOfBounds)?;
    validate_address(address, limit)?;
    Ok(address)
}

#[cfg(test)]
mod tests {
    use super::{resolve_address, validate_address};
    use crate::FaultCode;

    #[test]
    fn unbounded_policy_accepts_any_address() {
        assert_eq!(validate_address(usize::MAX, None), Ok(()));
    }

    #[test]
    fn limit_is_exclusive() {
        assert_eq!(validate_address(99, Some(100)), Ok(()));
        assert_eq!(
            validate_address(100, Some(100)),
            Err(FaultCode::AddressOutOfBounds)
        );
    }

    #[test]
    fn negative_words_never_resolve() {
        assert_eq!(resolve_address(-1, None), Err(FaultCode::NegativeAddress));
        assert_eq!(
            resolve_address(i64::MIN, Some(10)),
            Err(FaultCode::NegativeAddress)
        );
        assert_eq!(resolve_address(7, None), Ok(7));
        assert_eq!(
            resolve_address(10, Some(10)),
            Err(FaultCode::AddressOutOfBounds)
        );
    }
}
