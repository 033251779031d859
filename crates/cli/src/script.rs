//! Call scripts: an ordered list of oracle invocations replayed against one oracle.
//!
//! Each call runs to completion before the next starts, matching the serialized invocation
//! model the oracle assumes. A failing call is reported and the replay continues.

use alloy_primitives::{Address, Selector};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use secoracle_core::{parse_selector, Confidence, OracleError, Score, ScoreUpdate};
use secoracle_engine::SecurityOracle;

/// One oracle invocation.
///
/// Selectors are given as text: 4-byte hex (`"0xa9059cbb"`) or a function signature
/// (`"transfer(address,uint256)"`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "call", rename_all = "camelCase")]
pub enum Call {
    /// Address-level score lookup.
    GetSecurityScore { target: Address },
    /// Function-level score lookup.
    GetSecurityScoreBytes4 { target: Address, selector: String },
    /// Address-level lookup for many targets.
    GetSecurityScores { targets: Vec<Address> },
    /// Lookup reporting which fallback level answered.
    ResolveSecurityScore {
        target: Address,
        #[serde(default)]
        selector: Option<String>,
    },
    /// Exact stored entry, without fallback.
    ScoreEntry {
        target: Address,
        #[serde(default)]
        selector: Option<String>,
    },
    /// Editor membership query.
    IsEditor { identity: Address },
    /// Administrator query.
    IsAdmin { identity: Address },
    /// Replace the default score.
    UpdateDefaultScore { caller: Address, score: Score },
    /// Publish one score; omit `selector` for the address-level entry.
    PushResult {
        caller: Address,
        target: Address,
        #[serde(default)]
        selector: Option<String>,
        score: Score,
        confidence: Confidence,
    },
    /// Publish many scores atomically.
    PushResults {
        caller: Address,
        updates: Vec<ScoreUpdate>,
    },
    /// Grant the editor role.
    GrantEditor { caller: Address, identity: Address },
    /// Revoke the editor role.
    RevokeEditor { caller: Address, identity: Address },
}

impl Call {
    /// Canonical call name, as written in scripts.
    pub const fn name(&self) -> &'static str {
        match self {
            Call::GetSecurityScore { .. } => "getSecurityScore",
            Call::GetSecurityScoreBytes4 { .. } => "getSecurityScoreBytes4",
            Call::GetSecurityScores { .. } => "getSecurityScores",
            Call::ResolveSecurityScore { .. } => "resolveSecurityScore",
            Call::ScoreEntry { .. } => "scoreEntry",
            Call::IsEditor { .. } => "isEditor",
            Call::IsAdmin { .. } => "isAdmin",
            Call::UpdateDefaultScore { .. } => "updateDefaultScore",
            Call::PushResult { .. } => "pushResult",
            Call::PushResults { .. } => "pushResults",
            Call::GrantEditor { .. } => "grantEditor",
            Call::RevokeEditor { .. } => "revokeEditor",
        }
    }
}

/// Result of one replayed call.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Outcome {
    /// Position of the call in the script.
    pub index: usize,
    /// Call name.
    pub call: &'static str,
    /// Whether the call succeeded.
    pub ok: bool,
    /// Return value of a successful call.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    /// Rejection reason of a failed call.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Replay `calls` in order against `oracle`.
pub fn run_script(oracle: &mut SecurityOracle, calls: &[Call]) -> Vec<Outcome> {
    calls
        .iter()
        .enumerate()
        .map(|(index, call)| match apply(oracle, call) {
            Ok(result) => Outcome {
                index,
                call: call.name(),
                ok: true,
                result: Some(result),
                error: None,
            },
            Err(err) => {
                tracing::debug!(index, call = call.name(), error = %err, "call rejected");
                Outcome {
                    index,
                    call: call.name(),
                    ok: false,
                    result: None,
                    error: Some(err.to_string()),
                }
            }
        })
        .collect()
}

/// Execute a single call.
pub fn apply(oracle: &mut SecurityOracle, call: &Call) -> Result<Value, OracleError> {
    let value = match call {
        Call::GetSecurityScore { target } => json!(oracle.get_security_score(*target)?),
        Call::GetSecurityScoreBytes4 { target, selector } => {
            json!(oracle.get_security_score_bytes4(*target, parse_selector(selector)?)?)
        }
        Call::GetSecurityScores { targets } => json!(oracle.get_security_scores(targets)?),
        Call::ResolveSecurityScore { target, selector } => {
            let selector = parse_optional_selector(selector.as_deref())?;
            json!(oracle.resolve_security_score(*target, selector)?)
        }
        Call::ScoreEntry { target, selector } => {
            let selector = parse_optional_selector(selector.as_deref())?;
            json!(oracle.score_entry(*target, selector)?)
        }
        Call::IsEditor { identity } => json!(oracle.is_editor(*identity)),
        Call::IsAdmin { identity } => json!(oracle.is_admin(*identity)),
        Call::UpdateDefaultScore { caller, score } => {
            oracle.update_default_score(*caller, *score)?;
            Value::Null
        }
        Call::PushResult {
            caller,
            target,
            selector,
            score,
            confidence,
        } => {
            let selector = parse_optional_selector(selector.as_deref())?;
            oracle.push_result(*caller, *target, selector, *score, *confidence)?;
            Value::Null
        }
        Call::PushResults { caller, updates } => json!(oracle.push_results(*caller, updates)?),
        Call::GrantEditor { caller, identity } => {
            oracle.grant_editor(*caller, *identity)?;
            Value::Null
        }
        Call::RevokeEditor { caller, identity } => {
            oracle.revoke_editor(*caller, *identity)?;
            Value::Null
        }
    };
    Ok(value)
}

fn parse_optional_selector(input: Option<&str>) -> Result<Option<Selector>, OracleError> {
    input.map(parse_selector).transpose()
}
