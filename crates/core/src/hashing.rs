//! Hashing utilities for function selectors.
//!
//! Selectors are derived the same way the EVM ABI derives them: the first four bytes of
//! `keccak256` over the canonical function signature.

use alloy_primitives::{keccak256 as alloy_keccak256, Selector, B256};

use crate::constants::SELECTOR_LEN;
use crate::error::{OracleError, Result};

/// Compute keccak256 hash of input data.
///
/// This is a re-export of Alloy's keccak256 for convenience.
pub fn keccak256(data: &[u8]) -> B256 {
    alloy_keccak256(data)
}

/// Compute the 4-byte selector of a canonical function signature.
///
/// The signature must already be canonical (`name(type1,type2)` with no spaces or argument
/// names); no normalization is applied.
///
/// # Example
///
/// ```
/// use secoracle_core::hashing::selector_from_signature;
///
/// let selector = selector_from_signature("transfer(address,uint256)");
/// assert_eq!(selector.to_string(), "0xa9059cbb");
/// ```
pub fn selector_from_signature(signature: &str) -> Selector {
    let hash = keccak256(signature.as_bytes());
    Selector::from_slice(&hash[..SELECTOR_LEN])
}

/// Parse selector text: either 4-byte hex (`0x`-prefixed or bare) or a function signature.
///
/// The zero selector parses successfully; rejecting it is the oracle's job, so that callers
/// observe `InvalidSelector` rather than a format error.
pub fn parse_selector(input: &str) -> Result<Selector> {
    let trimmed = input.trim();

    if let Some(open) = trimmed.find('(') {
        if open == 0 || !trimmed.ends_with(')') || trimmed.contains(char::is_whitespace) {
            return Err(OracleError::InvalidSelectorFormat(input.to_string()));
        }
        return Ok(selector_from_signature(trimmed));
    }

    let digits = trimmed.strip_prefix("0x").unwrap_or(trimmed);
    if digits.len() != SELECTOR_LEN * 2 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(OracleError::InvalidSelectorFormat(input.to_string()));
    }

    digits
        .parse::<Selector>()
        .map_err(|_| OracleError::InvalidSelectorFormat(input.to_string()))
}
