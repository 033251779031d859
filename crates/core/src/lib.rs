//! # Security Oracle Core
//!
//! Core types, errors and selector hashing for the security-scoring oracle.
//!
//! This crate provides the building blocks shared by the oracle engine and its hosts:
//!
//! - **Ethereum Types**: Alloy primitives for `Address` and 4-byte `Selector`
//! - **Domain Types**: `Target`, `FunctionSelector`, `ScoreKey`, `ScoreEntry`, `Role`
//! - **Errors**: the `OracleError` taxonomy every oracle operation reports
//! - **Hashing**: keccak256 selector derivation from function signatures

#![warn(missing_docs)]

pub mod constants;
pub mod error;
pub mod hashing;
pub mod types;

// Re-export commonly used items
pub use constants::*;
pub use error::{OracleError, Result};
pub use hashing::{parse_selector, selector_from_signature};
pub use types::*;

// Re-export Alloy primitives for convenience
pub use alloy_primitives::{Address, Selector};
