//! Events recorded for committed oracle mutations.

use alloy_primitives::{Address, Selector};
use serde::{Deserialize, Serialize};

use secoracle_core::{Confidence, Score};

/// A committed state change.
///
/// Only mutations that change observable state are recorded; an idempotent grant or revoke
/// records nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "camelCase")]
pub enum OracleEvent {
    /// An identity joined the editor set.
    EditorGranted {
        /// The new editor.
        identity: Address,
        /// The administrator that granted the role.
        by: Address,
    },

    /// An identity left the editor set.
    EditorRevoked {
        /// The former editor.
        identity: Address,
        /// The administrator that revoked the role.
        by: Address,
    },

    /// The default score changed.
    DefaultScoreUpdated {
        /// Default before the update.
        previous: Score,
        /// Default after the update.
        score: Score,
        /// The administrator that made the update.
        by: Address,
    },

    /// A score entry was stored or overwritten.
    ResultPushed {
        /// The scored target.
        target: Address,
        /// The scored function; absent for address-level entries.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        selector: Option<Selector>,
        /// The published score.
        score: Score,
        /// The published confidence.
        confidence: Confidence,
        /// The editor or administrator that published it.
        by: Address,
    },
}

impl OracleEvent {
    /// Canonical event name.
    pub const fn name(&self) -> &'static str {
        match self {
            OracleEvent::EditorGranted { .. } => "editorGranted",
            OracleEvent::EditorRevoked { .. } => "editorRevoked",
            OracleEvent::DefaultScoreUpdated { .. } => "defaultScoreUpdated",
            OracleEvent::ResultPushed { .. } => "resultPushed",
        }
    }

    /// The caller whose invocation produced the event.
    pub const fn caller(&self) -> Address {
        match self {
            OracleEvent::EditorGranted { by, .. }
            | OracleEvent::EditorRevoked { by, .. }
            | OracleEvent::DefaultScoreUpdated { by, .. }
            | OracleEvent::ResultPushed { by, .. } => *by,
        }
    }
}
