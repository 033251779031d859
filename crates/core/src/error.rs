//! Error types for the core crate.

use alloy_primitives::Address;
use thiserror::Error;

use crate::types::Role;

/// Oracle error type.
///
/// Every variant aborts the current invocation; no state is changed when one is returned.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OracleError {
    /// Target identity is the zero address.
    #[error("Invalid target: the zero address cannot be scored")]
    InvalidTarget,

    /// Explicit function selector is the zero selector.
    #[error("Invalid selector: 0x00000000 is reserved for address-level entries")]
    InvalidSelector,

    /// Caller lacks the role required by the operation.
    #[error("Unauthorized: {caller} does not hold the {required} role")]
    Unauthorized {
        /// The rejected caller.
        caller: Address,
        /// The role the operation requires.
        required: Role,
    },

    /// Administrator identity is the zero address.
    #[error("Invalid administrator: the zero address cannot administer the oracle")]
    InvalidAdministrator,

    /// Role target is the zero address.
    #[error("Invalid identity: the zero address cannot hold a role")]
    InvalidIdentity,

    /// Selector text is neither 4-byte hex nor a function signature.
    #[error("Invalid selector format: {0}")]
    InvalidSelectorFormat(String),

    /// Serialized state was written by an incompatible version.
    #[error("Unsupported state format version: {0}")]
    UnsupportedStateVersion(u32),
}

/// Result type alias for OracleError.
pub type Result<T> = std::result::Result<T, OracleError>;
