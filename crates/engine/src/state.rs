//! Serializable oracle state.
//!
//! Storage durability belongs to the host. `OracleState` is the hand-off format: a
//! deterministic, sorted image of the registry and store that `SecurityOracle::from_state`
//! re-validates on the way back in.

use alloy_primitives::Address;
use serde::{Deserialize, Serialize};

use secoracle_core::{Score, ScoreUpdate, STATE_FORMAT_VERSION};

/// Full image of an oracle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OracleState {
    /// Format version (see `STATE_FORMAT_VERSION`).
    pub version: u32,
    /// The fixed administrator.
    pub admin: Address,
    /// The oracle-wide default score.
    pub default_score: Score,
    /// Editors in ascending address order.
    #[serde(default)]
    pub editors: Vec<Address>,
    /// Stored entries in ascending key order.
    #[serde(default)]
    pub entries: Vec<ScoreUpdate>,
}

impl OracleState {
    /// State of a freshly constructed oracle.
    pub fn empty(admin: Address, default_score: Score) -> Self {
        Self {
            version: STATE_FORMAT_VERSION,
            admin,
            default_score,
            editors: Vec::new(),
            entries: Vec::new(),
        }
    }
}
