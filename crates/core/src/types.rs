//! Core types for the security oracle.

use alloy_primitives::{Address, Selector};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{OracleError, Result};
use crate::hashing::selector_from_signature;

/// Security score served by the oracle.
///
/// Opaque to the oracle: it is stored and returned, never interpreted.
pub type Score = u8;

/// Confidence attached to a published score. Stored with the score, never interpreted.
pub type Confidence = u8;

/// Role a caller must hold for a mutating operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// The fixed administrator.
    Admin,
    /// A current editor, or the administrator.
    Editor,
}

impl Role {
    /// Canonical lowercase string form.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Editor => "editor",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A scored target: a non-zero address.
///
/// Validation runs during both construction and deserialization, so a `Target` can never hold
/// the zero address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Target(Address);

impl Target {
    /// Create a new Target, rejecting the zero address.
    pub fn new(address: Address) -> Result<Self> {
        if address.is_zero() {
            return Err(OracleError::InvalidTarget);
        }
        Ok(Target(address))
    }

    /// Get the underlying address.
    pub const fn address(&self) -> Address {
        self.0
    }
}

impl TryFrom<Address> for Target {
    type Error = OracleError;

    fn try_from(address: Address) -> Result<Self> {
        Target::new(address)
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Serialize for Target {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.0.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Target {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let address = Address::deserialize(deserializer)?;
        Target::new(address).map_err(serde::de::Error::custom)
    }
}

/// An explicit, non-zero function selector.
///
/// The zero selector is reserved for "no selector"; that case is modelled as
/// `Option::<FunctionSelector>::None` instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FunctionSelector(Selector);

impl FunctionSelector {
    /// Create a new FunctionSelector, rejecting the zero selector.
    pub fn new(selector: Selector) -> Result<Self> {
        if selector.is_zero() {
            return Err(OracleError::InvalidSelector);
        }
        Ok(FunctionSelector(selector))
    }

    /// Derive the selector of a canonical function signature.
    ///
    /// Fails only in the astronomically unlikely case that the hash prefix is zero.
    pub fn from_signature(signature: &str) -> Result<Self> {
        FunctionSelector::new(selector_from_signature(signature))
    }

    /// Get the underlying selector.
    pub const fn selector(&self) -> Selector {
        self.0
    }

    /// Convert to bytes.
    pub fn as_bytes(&self) -> &[u8; 4] {
        &self.0 .0
    }
}

impl TryFrom<Selector> for FunctionSelector {
    type Error = OracleError;

    fn try_from(selector: Selector) -> Result<Self> {
        FunctionSelector::new(selector)
    }
}

impl fmt::Display for FunctionSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Serialize for FunctionSelector {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.0.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for FunctionSelector {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let selector = Selector::deserialize(deserializer)?;
        FunctionSelector::new(selector).map_err(serde::de::Error::custom)
    }
}

/// Storage key for a score entry.
///
/// `selector == None` addresses the target's address-level entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ScoreKey {
    /// The scored target.
    pub target: Target,
    /// The scored function, if any.
    pub selector: Option<FunctionSelector>,
}

impl ScoreKey {
    /// Key of the address-level entry for `target`.
    pub const fn address_level(target: Target) -> Self {
        ScoreKey {
            target,
            selector: None,
        }
    }

    /// Key of the entry for `selector` on `target`.
    pub const fn function_level(target: Target, selector: FunctionSelector) -> Self {
        ScoreKey {
            target,
            selector: Some(selector),
        }
    }

    /// Validate raw inputs into a key.
    ///
    /// The selector is checked before the target, so a zero selector reports
    /// `InvalidSelector` whatever the target is.
    pub fn validate(target: Address, selector: Option<Selector>) -> Result<Self> {
        let selector = selector.map(FunctionSelector::new).transpose()?;
        let target = Target::new(target)?;
        Ok(ScoreKey { target, selector })
    }

    /// The address-level key for the same target.
    pub const fn without_selector(&self) -> Self {
        ScoreKey::address_level(self.target)
    }

    /// Whether this key addresses an address-level entry.
    pub const fn is_address_level(&self) -> bool {
        self.selector.is_none()
    }
}

impl fmt::Display for ScoreKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.selector {
            Some(selector) => write!(f, "{}:{}", self.target, selector),
            None => write!(f, "{}", self.target),
        }
    }
}

/// A stored score with its confidence. Both are always written together.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ScoreEntry {
    /// The published score.
    pub score: Score,
    /// Publisher-supplied confidence in the score.
    pub confidence: Confidence,
}

impl ScoreEntry {
    /// Create a new entry.
    pub const fn new(score: Score, confidence: Confidence) -> Self {
        ScoreEntry { score, confidence }
    }
}

/// Unvalidated score publication, as submitted by a caller.
///
/// Also the serialized form of a stored entry in oracle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreUpdate {
    /// The scored target.
    pub target: Address,
    /// The scored function; `None` publishes the address-level entry.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selector: Option<Selector>,
    /// The published score.
    pub score: Score,
    /// Publisher-supplied confidence.
    pub confidence: Confidence,
}

impl ScoreUpdate {
    /// Validate the update into a storage key and entry.
    pub fn validate(&self) -> Result<(ScoreKey, ScoreEntry)> {
        let key = ScoreKey::validate(self.target, self.selector)?;
        Ok((key, ScoreEntry::new(self.score, self.confidence)))
    }

    /// Build the update describing a stored entry.
    pub fn from_entry(key: &ScoreKey, entry: &ScoreEntry) -> Self {
        ScoreUpdate {
            target: key.target.address(),
            selector: key.selector.map(|s| s.selector()),
            score: entry.score,
            confidence: entry.confidence,
        }
    }
}

/// Which level of the fallback chain answered a lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResolutionSource {
    /// Exact `(target, selector)` entry.
    Selector,
    /// Address-level `(target, none)` entry.
    Address,
    /// The oracle-wide default score.
    Default,
}

impl ResolutionSource {
    /// Canonical lowercase string form.
    pub const fn as_str(&self) -> &'static str {
        match self {
            ResolutionSource::Selector => "selector",
            ResolutionSource::Address => "address",
            ResolutionSource::Default => "default",
        }
    }
}

impl fmt::Display for ResolutionSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Resolved score with explainability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreResolution {
    /// The resolved score.
    pub score: Score,
    /// The fallback level that produced it.
    pub source: ResolutionSource,
}
