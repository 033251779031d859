//! Score storage with three-level fallback resolution.

use std::collections::HashMap;
use tracing::debug;

use secoracle_core::{ResolutionSource, Score, ScoreEntry, ScoreKey, ScoreResolution};

/// Default score plus the `(target, selector)` → entry mapping.
///
/// The store performs no authorization; callers gate every mutation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScoreStore {
    default_score: Score,
    entries: HashMap<ScoreKey, ScoreEntry>,
}

impl ScoreStore {
    /// Create an empty store with the given default score.
    pub fn new(default_score: Score) -> Self {
        Self {
            default_score,
            entries: HashMap::new(),
        }
    }

    /// The oracle-wide default score.
    pub const fn get_default(&self) -> Score {
        self.default_score
    }

    /// Replace the default score, returning the previous one.
    pub fn set_default(&mut self, score: Score) -> Score {
        std::mem::replace(&mut self.default_score, score)
    }

    /// Store `entry` under `key`, overwriting any existing entry for the exact key.
    ///
    /// Returns the previous entry, if any.
    pub fn put(&mut self, key: ScoreKey, entry: ScoreEntry) -> Option<ScoreEntry> {
        self.entries.insert(key, entry)
    }

    /// Exact lookup without fallback.
    pub fn get(&self, key: &ScoreKey) -> Option<&ScoreEntry> {
        self.entries.get(key)
    }

    /// Resolve a score: exact `(target, selector)` → `(target, none)` → default.
    ///
    /// Address-level keys skip the first step, so selector-scoped entries never answer an
    /// address-only lookup.
    pub fn resolve(&self, key: &ScoreKey) -> ScoreResolution {
        let resolution = if let Some(entry) = key.selector.and(self.entries.get(key)) {
            ScoreResolution {
                score: entry.score,
                source: ResolutionSource::Selector,
            }
        } else if let Some(entry) = self.entries.get(&key.without_selector()) {
            ScoreResolution {
                score: entry.score,
                source: ResolutionSource::Address,
            }
        } else {
            ScoreResolution {
                score: self.default_score,
                source: ResolutionSource::Default,
            }
        };

        debug!(%key, score = resolution.score, source = %resolution.source, "resolved score");
        resolution
    }

    /// Number of stored entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no entries are stored.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All entries in ascending key order.
    pub fn sorted_entries(&self) -> Vec<(ScoreKey, ScoreEntry)> {
        let mut entries: Vec<_> = self.entries.iter().map(|(k, v)| (*k, *v)).collect();
        entries.sort_by(|a, b| a.0.cmp(&b.0));
        entries
    }
}
