//! Security oracle engine.
//!
//! This crate implements the oracle state machine:
//! - `AccessControlRegistry`: fixed administrator + revocable editor set
//! - `ScoreStore`: default score + `(target, selector)` entries with strict fallback
//!   (exact selector entry → address-level entry → default)
//! - `SecurityOracle`: validates inputs, authorizes callers, and drives the two components
//!
//! Invocations are assumed to be serialized by the host; every operation runs to completion
//! synchronously and either commits its whole mutation or none of it.

#![warn(missing_docs)]

pub mod access;
pub mod events;
pub mod oracle;
pub mod state;
pub mod store;

pub use access::AccessControlRegistry;
pub use events::OracleEvent;
pub use oracle::SecurityOracle;
pub use state::OracleState;
pub use store::ScoreStore;

// Re-export core types used throughout the engine API
pub use secoracle_core::{
    Address, Confidence, OracleError, ResolutionSource, Result, Role, Score, ScoreEntry,
    ScoreResolution, ScoreUpdate, Selector,
};
