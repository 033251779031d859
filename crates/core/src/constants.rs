//! Canonical constants for the security oracle.

use crate::types::Score;

/// Default score installed at construction when the deployer supplies none.
pub const DEFAULT_INITIAL_SCORE: Score = 0;

/// Width of a function selector in bytes.
pub const SELECTOR_LEN: usize = 4;

/// Version tag written into serialized oracle state.
pub const STATE_FORMAT_VERSION: u32 = 1;
