//! The security oracle service.
//!
//! `SecurityOracle` composes the role registry and the score store. Every operation validates
//! its arguments, authorizes the caller (for writes), and only then touches state, so a failed
//! call never leaves a partial mutation behind.

use alloy_primitives::{Address, Selector};
use tracing::info;

use secoracle_core::{
    Confidence, OracleError, Result, Score, ScoreEntry, ScoreKey, ScoreResolution, ScoreUpdate,
    DEFAULT_INITIAL_SCORE, STATE_FORMAT_VERSION,
};

use crate::access::AccessControlRegistry;
use crate::events::OracleEvent;
use crate::state::OracleState;
use crate::store::ScoreStore;

/// Security-scoring oracle: role-gated writes, public fallback reads.
#[derive(Debug, Clone)]
pub struct SecurityOracle {
    access: AccessControlRegistry,
    store: ScoreStore,
    events: Vec<OracleEvent>,
}

impl SecurityOracle {
    /// Construct an oracle administered by `deployer`.
    ///
    /// The default score starts at `initial_default`, or `DEFAULT_INITIAL_SCORE` when absent.
    ///
    /// # Errors
    ///
    /// Returns `OracleError::InvalidAdministrator` if `deployer` is the zero address.
    pub fn new(deployer: Address, initial_default: Option<Score>) -> Result<Self> {
        let access = AccessControlRegistry::new(deployer)?;
        let default_score = initial_default.unwrap_or(DEFAULT_INITIAL_SCORE);

        info!(admin = %deployer, default_score, "security oracle constructed");

        Ok(Self {
            access,
            store: ScoreStore::new(default_score),
            events: Vec::new(),
        })
    }

    /// Rebuild an oracle from serialized state, re-validating every invariant.
    pub fn from_state(state: OracleState) -> Result<Self> {
        if state.version != STATE_FORMAT_VERSION {
            return Err(OracleError::UnsupportedStateVersion(state.version));
        }

        let mut access = AccessControlRegistry::new(state.admin)?;
        for editor in &state.editors {
            access.grant_editor(state.admin, *editor)?;
        }

        let mut store = ScoreStore::new(state.default_score);
        for update in &state.entries {
            let (key, entry) = update.validate()?;
            store.put(key, entry);
        }

        info!(
            admin = %state.admin,
            editors = state.editors.len(),
            entries = store.len(),
            "security oracle restored"
        );

        Ok(Self {
            access,
            store,
            events: Vec::new(),
        })
    }

    /// Deterministic image of the current state.
    pub fn snapshot(&self) -> OracleState {
        OracleState {
            version: STATE_FORMAT_VERSION,
            admin: self.access.admin(),
            default_score: self.store.get_default(),
            editors: self.access.editors().collect(),
            entries: self
                .store
                .sorted_entries()
                .iter()
                .map(|(key, entry)| ScoreUpdate::from_entry(key, entry))
                .collect(),
        }
    }

    /// The role registry.
    pub fn access(&self) -> &AccessControlRegistry {
        &self.access
    }

    /// The score store.
    pub fn store(&self) -> &ScoreStore {
        &self.store
    }

    /// The fixed administrator.
    pub fn admin(&self) -> Address {
        self.access.admin()
    }

    /// Whether `identity` is the administrator.
    pub fn is_admin(&self, identity: Address) -> bool {
        self.access.is_admin(identity)
    }

    /// Whether `identity` is an editor. The administrator is not implicitly reported.
    pub fn is_editor(&self, identity: Address) -> bool {
        self.access.is_editor(identity)
    }

    /// Current editors in ascending address order.
    pub fn editors(&self) -> Vec<Address> {
        self.access.editors().collect()
    }

    /// The oracle-wide default score.
    pub fn default_score(&self) -> Score {
        self.store.get_default()
    }

    /// Address-level score for `target`: `(target, none)` entry, else the default.
    ///
    /// # Errors
    ///
    /// Returns `OracleError::InvalidTarget` for the zero address.
    pub fn get_security_score(&self, target: Address) -> Result<Score> {
        Ok(self.resolve_security_score(target, None)?.score)
    }

    /// Function-level score: `(target, selector)`, else `(target, none)`, else the default.
    ///
    /// # Errors
    ///
    /// Returns `OracleError::InvalidSelector` for the zero selector (checked first), then
    /// `OracleError::InvalidTarget` for the zero address.
    pub fn get_security_score_bytes4(&self, target: Address, selector: Selector) -> Result<Score> {
        Ok(self.resolve_security_score(target, Some(selector))?.score)
    }

    /// Resolve a score and report which fallback level produced it.
    pub fn resolve_security_score(
        &self,
        target: Address,
        selector: Option<Selector>,
    ) -> Result<ScoreResolution> {
        let key = ScoreKey::validate(target, selector)?;
        Ok(self.store.resolve(&key))
    }

    /// Address-level scores for many targets. Any invalid target fails the whole call.
    pub fn get_security_scores(&self, targets: &[Address]) -> Result<Vec<Score>> {
        targets
            .iter()
            .map(|target| self.get_security_score(*target))
            .collect()
    }

    /// Function-level scores for many lookups. Any invalid pair fails the whole call.
    pub fn get_security_scores_bytes4(&self, lookups: &[(Address, Selector)]) -> Result<Vec<Score>> {
        lookups
            .iter()
            .map(|(target, selector)| self.get_security_score_bytes4(*target, *selector))
            .collect()
    }

    /// Exact stored entry for `(target, selector)`, without fallback.
    pub fn score_entry(
        &self,
        target: Address,
        selector: Option<Selector>,
    ) -> Result<Option<ScoreEntry>> {
        let key = ScoreKey::validate(target, selector)?;
        Ok(self.store.get(&key).copied())
    }

    /// Replace the default score. Administrator only.
    pub fn update_default_score(&mut self, caller: Address, score: Score) -> Result<()> {
        self.access.authorize_admin_only(caller)?;

        let previous = self.store.set_default(score);
        info!(%caller, previous, score, "default score updated");
        self.events.push(OracleEvent::DefaultScoreUpdated {
            previous,
            score,
            by: caller,
        });
        Ok(())
    }

    /// Publish a score. Editor or administrator.
    ///
    /// `selector == None` publishes the target's address-level entry; an explicit zero selector
    /// is rejected with `OracleError::InvalidSelector`.
    pub fn push_result(
        &mut self,
        caller: Address,
        target: Address,
        selector: Option<Selector>,
        score: Score,
        confidence: Confidence,
    ) -> Result<()> {
        let key = ScoreKey::validate(target, selector)?;
        self.access.authorize_editor_or_admin(caller)?;

        self.commit_entry(caller, key, ScoreEntry::new(score, confidence));
        Ok(())
    }

    /// Publish many scores atomically. Editor or administrator.
    ///
    /// Every update is validated before any is written; one invalid update rejects the batch.
    /// Returns the number of entries written.
    pub fn push_results(&mut self, caller: Address, updates: &[ScoreUpdate]) -> Result<usize> {
        let validated = updates
            .iter()
            .map(ScoreUpdate::validate)
            .collect::<Result<Vec<_>>>()?;
        self.access.authorize_editor_or_admin(caller)?;

        for (key, entry) in &validated {
            self.commit_entry(caller, *key, *entry);
        }
        Ok(validated.len())
    }

    /// Add `identity` to the editor set. Administrator only; idempotent.
    pub fn grant_editor(&mut self, caller: Address, identity: Address) -> Result<()> {
        if self.access.grant_editor(caller, identity)? {
            info!(%caller, %identity, "editor granted");
            self.events.push(OracleEvent::EditorGranted {
                identity,
                by: caller,
            });
        }
        Ok(())
    }

    /// Remove `identity` from the editor set. Administrator only; idempotent.
    pub fn revoke_editor(&mut self, caller: Address, identity: Address) -> Result<()> {
        if self.access.revoke_editor(caller, identity)? {
            info!(%caller, %identity, "editor revoked");
            self.events.push(OracleEvent::EditorRevoked {
                identity,
                by: caller,
            });
        }
        Ok(())
    }

    /// Events recorded since construction or the last `take_events`.
    pub fn events(&self) -> &[OracleEvent] {
        &self.events
    }

    /// Drain the recorded events.
    pub fn take_events(&mut self) -> Vec<OracleEvent> {
        std::mem::take(&mut self.events)
    }

    fn commit_entry(&mut self, caller: Address, key: ScoreKey, entry: ScoreEntry) {
        self.store.put(key, entry);
        info!(%caller, %key, score = entry.score, confidence = entry.confidence, "result pushed");
        self.events.push(OracleEvent::ResultPushed {
            target: key.target.address(),
            selector: key.selector.map(|s| s.selector()),
            score: entry.score,
            confidence: entry.confidence,
            by: caller,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secoracle_core::{ResolutionSource, Role};

    const ADMIN: Address = Address::new([0xaa; 20]);
    const EDITOR: Address = Address::new([0xee; 20]);
    const READER: Address = Address::new([0x55; 20]);
    const TARGET: Address = Address::new([0x11; 20]);

    fn sel(last: u8) -> Selector {
        Selector::from([0, 0, 0, last])
    }

    fn oracle() -> SecurityOracle {
        SecurityOracle::new(ADMIN, None).unwrap()
    }

    #[test]
    fn construction_defaults() {
        let oracle = oracle();
        assert_eq!(oracle.admin(), ADMIN);
        assert_eq!(oracle.default_score(), DEFAULT_INITIAL_SCORE);
        assert!(oracle.editors().is_empty());
        assert!(oracle.events().is_empty());

        let oracle = SecurityOracle::new(ADMIN, Some(75)).unwrap();
        assert_eq!(oracle.default_score(), 75);

        assert_eq!(
            SecurityOracle::new(Address::ZERO, None).unwrap_err(),
            OracleError::InvalidAdministrator
        );
    }

    #[test]
    fn rejected_push_leaves_state_untouched() {
        let mut oracle = oracle();
        let err = oracle
            .push_result(READER, TARGET, Some(sel(1)), 10, 10)
            .unwrap_err();
        assert_eq!(
            err,
            OracleError::Unauthorized {
                caller: READER,
                required: Role::Editor
            }
        );
        assert_eq!(oracle.score_entry(TARGET, Some(sel(1))).unwrap(), None);
        assert!(oracle.events().is_empty());
    }

    #[test]
    fn push_validates_before_authorizing() {
        let mut oracle = oracle();
        assert_eq!(
            oracle.push_result(READER, Address::ZERO, Some(sel(1)), 1, 1),
            Err(OracleError::InvalidTarget)
        );
        assert_eq!(
            oracle.push_result(ADMIN, TARGET, Some(Selector::ZERO), 1, 1),
            Err(OracleError::InvalidSelector)
        );
    }

    #[test]
    fn address_level_push_uses_none_selector() {
        let mut oracle = oracle();
        oracle.push_result(ADMIN, TARGET, None, 33, 4).unwrap();

        assert_eq!(oracle.get_security_score(TARGET).unwrap(), 33);
        assert_eq!(
            oracle.resolve_security_score(TARGET, Some(sel(5))).unwrap(),
            ScoreResolution {
                score: 33,
                source: ResolutionSource::Address
            }
        );
        assert_eq!(
            oracle.score_entry(TARGET, None).unwrap(),
            Some(ScoreEntry::new(33, 4))
        );
    }

    #[test]
    fn batch_push_is_all_or_nothing() {
        let mut oracle = oracle();
        oracle.grant_editor(ADMIN, EDITOR).unwrap();
        oracle.take_events();

        let good = ScoreUpdate {
            target: TARGET,
            selector: Some(sel(1)),
            score: 10,
            confidence: 1,
        };
        let bad = ScoreUpdate {
            target: Address::ZERO,
            selector: None,
            score: 20,
            confidence: 2,
        };

        assert_eq!(
            oracle.push_results(EDITOR, &[good, bad]),
            Err(OracleError::InvalidTarget)
        );
        assert_eq!(oracle.score_entry(TARGET, Some(sel(1))).unwrap(), None);
        assert!(oracle.events().is_empty());

        let second = ScoreUpdate {
            selector: None,
            score: 20,
            ..good
        };
        assert_eq!(oracle.push_results(EDITOR, &[good, second]).unwrap(), 2);
        assert_eq!(oracle.get_security_score_bytes4(TARGET, sel(1)).unwrap(), 10);
        assert_eq!(oracle.get_security_score(TARGET).unwrap(), 20);
        assert_eq!(oracle.events().len(), 2);
    }

    #[test]
    fn batch_reads_fail_on_any_invalid_element() {
        let oracle = SecurityOracle::new(ADMIN, Some(5)).unwrap();
        assert_eq!(
            oracle.get_security_scores(&[TARGET, READER]).unwrap(),
            vec![5, 5]
        );
        assert_eq!(
            oracle.get_security_scores(&[TARGET, Address::ZERO]),
            Err(OracleError::InvalidTarget)
        );
        assert_eq!(
            oracle.get_security_scores_bytes4(&[(TARGET, sel(1)), (TARGET, Selector::ZERO)]),
            Err(OracleError::InvalidSelector)
        );
    }

    #[test]
    fn events_record_only_effective_changes() {
        let mut oracle = oracle();
        oracle.grant_editor(ADMIN, EDITOR).unwrap();
        oracle.grant_editor(ADMIN, EDITOR).unwrap();
        oracle.revoke_editor(ADMIN, EDITOR).unwrap();
        oracle.revoke_editor(ADMIN, EDITOR).unwrap();
        oracle.update_default_score(ADMIN, 60).unwrap();

        let events = oracle.take_events();
        assert_eq!(
            events,
            vec![
                OracleEvent::EditorGranted {
                    identity: EDITOR,
                    by: ADMIN
                },
                OracleEvent::EditorRevoked {
                    identity: EDITOR,
                    by: ADMIN
                },
                OracleEvent::DefaultScoreUpdated {
                    previous: 0,
                    score: 60,
                    by: ADMIN
                },
            ]
        );
        assert!(oracle.events().is_empty());
    }

    #[test]
    fn snapshot_restores_equivalent_oracle() {
        let mut oracle = SecurityOracle::new(ADMIN, Some(40)).unwrap();
        oracle.grant_editor(ADMIN, EDITOR).unwrap();
        oracle.push_result(EDITOR, TARGET, Some(sel(1)), 90, 80).unwrap();
        oracle.push_result(ADMIN, TARGET, None, 70, 60).unwrap();

        let state = oracle.snapshot();
        assert_eq!(state.editors, vec![EDITOR]);
        assert_eq!(state.entries.len(), 2);
        assert_eq!(state.entries[0].selector, None);

        let restored = SecurityOracle::from_state(state.clone()).unwrap();
        assert_eq!(restored.snapshot(), state);
        assert!(restored.is_editor(EDITOR));
        assert_eq!(restored.get_security_score_bytes4(TARGET, sel(1)).unwrap(), 90);
        assert_eq!(restored.get_security_score(TARGET).unwrap(), 70);
        assert!(restored.events().is_empty());
    }

    #[test]
    fn from_state_revalidates_invariants() {
        let mut state = OracleState::empty(ADMIN, 0);
        state.version = STATE_FORMAT_VERSION + 1;
        assert_eq!(
            SecurityOracle::from_state(state).unwrap_err(),
            OracleError::UnsupportedStateVersion(STATE_FORMAT_VERSION + 1)
        );

        let state = OracleState::empty(Address::ZERO, 0);
        assert_eq!(
            SecurityOracle::from_state(state).unwrap_err(),
            OracleError::InvalidAdministrator
        );

        let mut state = OracleState::empty(ADMIN, 0);
        state.editors.push(Address::ZERO);
        assert_eq!(
            SecurityOracle::from_state(state).unwrap_err(),
            OracleError::InvalidIdentity
        );

        let mut state = OracleState::empty(ADMIN, 0);
        state.entries.push(ScoreUpdate {
            target: TARGET,
            selector: Some(Selector::ZERO),
            score: 1,
            confidence: 1,
        });
        assert_eq!(
            SecurityOracle::from_state(state).unwrap_err(),
            OracleError::InvalidSelector
        );
    }
}
