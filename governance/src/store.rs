//! The authoritative governance state.
//!
//! `GovernanceStore` is pure data: proposals, per-proposal ballots,
//! delegations, token-holder records, the treasury and the tunable
//! configuration. Only the [`crate::processor`] (and the managers built
//! on it) mutate it, always through an exclusive borrow. Collections are
//! ordered maps so queries and snapshots are reproducible across runs.

use agora_transactions::SignerSignature;
use agora_types::{
    ContentHash, Credential, ProposalStatus, ProposalType, Timestamp, VoteChoice, VotingType,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A governance proposal.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Proposal {
    /// Host-assigned id (the creating transaction's id).
    pub id: ContentHash,
    pub creator: Credential,
    pub title: String,
    pub description: String,
    pub proposal_type: ProposalType,
    pub voting_type: VotingType,
    pub start_time: Timestamp,
    pub end_time: Timestamp,
    pub status: ProposalStatus,
    /// Pass threshold in basis points, in (0, 10000].
    pub threshold_bps: u64,
    pub results: VoteResults,
    /// Reference to off-chain metadata; never dereferenced by the core.
    pub metadata: Option<ContentHash>,
}

/// Aggregated tallies for a proposal.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct VoteResults {
    pub yes: u64,
    pub no: u64,
    pub abstain: u64,
    pub total_voters: u64,
    /// Total participation recorded when the proposal is resolved.
    pub quorum: u64,
    pub passed: bool,
}

impl VoteResults {
    /// Total participation weight (yes + no + abstain).
    pub fn participation(&self) -> u64 {
        self.yes
            .saturating_add(self.no)
            .saturating_add(self.abstain)
    }
}

/// An immutable ballot. Exactly one exists per (proposal, voter).
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Vote {
    pub voter: Credential,
    pub choice: VoteChoice,
    /// Effective weight added to the tally (after the voting mechanism).
    pub weight: u64,
    pub cast_at: Timestamp,
    pub reason: Option<String>,
}

/// A time-bounded transfer of voting power.
///
/// Revocation deactivates the record in place and freezes its end time,
/// preserving history; records are never deleted.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Delegation {
    pub delegator: Credential,
    pub delegate: Credential,
    pub start_time: Timestamp,
    pub end_time: Timestamp,
    pub active: bool,
}

impl Delegation {
    /// Whether this delegation transfers power at `now`.
    pub fn is_live(&self, now: Timestamp) -> bool {
        self.active && now >= self.start_time && now <= self.end_time
    }
}

/// A governance token holder.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TokenHolder {
    pub address: Credential,
    /// Mirror of the ledger balance, refreshed on activity.
    pub balance: u64,
    /// Maintained by the external tokenomics collaborator.
    pub staked: u64,
    pub reputation: u64,
    pub joined_at: Timestamp,
    pub last_active: Timestamp,
}

/// The DAO treasury.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TreasuryState {
    pub balance: u64,
    /// Authorized signer credentials, in registration order.
    pub signers: Vec<Credential>,
    pub required_sigs: u8,
    pub transactions: BTreeMap<ContentHash, PendingTx>,
}

impl TreasuryState {
    pub fn new() -> Self {
        Self {
            balance: 0,
            signers: Vec::new(),
            required_sigs: 1,
            transactions: BTreeMap::new(),
        }
    }

    pub fn is_signer(&self, credential: &Credential) -> bool {
        self.signers.contains(credential)
    }
}

impl Default for TreasuryState {
    fn default() -> Self {
        Self::new()
    }
}

/// A treasury payout awaiting signatures.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PendingTx {
    pub id: ContentHash,
    pub recipient: Credential,
    pub amount: u64,
    pub purpose: String,
    /// Collected approvals; at most one per signer credential.
    pub signatures: Vec<SignerSignature>,
    pub created_at: Timestamp,
    pub expires_at: Timestamp,
    pub executed: bool,
}

impl PendingTx {
    pub fn is_expired(&self, now: Timestamp) -> bool {
        now > self.expires_at
    }

    pub fn has_signed(&self, signer: &Credential) -> bool {
        self.signatures.iter().any(|sig| sig.signer == *signer)
    }
}

/// Tunable governance configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GovernanceConfig {
    /// Minimum balance required to create a proposal.
    pub min_proposal_threshold: u64,
    /// Minimum length of a voting window, in seconds.
    pub voting_period_secs: u64,
    /// Minimum total participation weight for a vote to be decided.
    pub quorum_threshold: u64,
    /// Default passing threshold in basis points.
    pub passing_threshold_bps: u64,
    /// Minimum balance required to create a treasury proposal.
    pub treasury_threshold: u64,
}

impl Default for GovernanceConfig {
    fn default() -> Self {
        Self {
            min_proposal_threshold: 1000,
            voting_period_secs: 86_400,
            quorum_threshold: 2000,
            passing_threshold_bps: 5100,
            treasury_threshold: 5000,
        }
    }
}

/// The aggregate governance state.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GovernanceStore {
    pub proposals: BTreeMap<ContentHash, Proposal>,
    /// Ballots per proposal, keyed by voter credential.
    pub votes: BTreeMap<ContentHash, BTreeMap<Credential, Vote>>,
    /// Latest delegation per delegator (revoked records kept for history).
    pub delegations: BTreeMap<Credential, Delegation>,
    pub holders: BTreeMap<Credential, TokenHolder>,
    pub treasury: TreasuryState,
    pub config: GovernanceConfig,
}

impl GovernanceStore {
    pub fn new() -> Self {
        Self {
            proposals: BTreeMap::new(),
            votes: BTreeMap::new(),
            delegations: BTreeMap::new(),
            holders: BTreeMap::new(),
            treasury: TreasuryState::new(),
            config: GovernanceConfig::default(),
        }
    }

    /// Serialize the full state for host-side snapshotting.
    pub fn snapshot(&self) -> Vec<u8> {
        bincode::serialize(self).unwrap_or_default()
    }

    /// Restore state from a snapshot produced by [`GovernanceStore::snapshot`].
    pub fn restore(data: &[u8]) -> Option<Self> {
        bincode::deserialize(data).ok()
    }
}

impl Default for GovernanceStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cred(n: u8) -> Credential {
        Credential::new([n; 32])
    }

    #[test]
    fn test_delegation_liveness_window() {
        let delegation = Delegation {
            delegator: cred(1),
            delegate: cred(2),
            start_time: Timestamp::new(100),
            end_time: Timestamp::new(200),
            active: true,
        };
        assert!(!delegation.is_live(Timestamp::new(99)));
        assert!(delegation.is_live(Timestamp::new(100)));
        assert!(delegation.is_live(Timestamp::new(200)));
        assert!(!delegation.is_live(Timestamp::new(201)));

        let revoked = Delegation {
            active: false,
            ..delegation
        };
        assert!(!revoked.is_live(Timestamp::new(150)));
    }

    #[test]
    fn test_pending_tx_signer_lookup() {
        let tx = PendingTx {
            id: ContentHash::new([1; 32]),
            recipient: cred(9),
            amount: 100,
            purpose: "grants".into(),
            signatures: vec![SignerSignature {
                signer: cred(1),
                signature: agora_types::Signature([1; 64]),
            }],
            created_at: Timestamp::new(0),
            expires_at: Timestamp::new(1000),
            executed: false,
        };
        assert!(tx.has_signed(&cred(1)));
        assert!(!tx.has_signed(&cred(2)));
        assert!(!tx.is_expired(Timestamp::new(1000)));
        assert!(tx.is_expired(Timestamp::new(1001)));
    }

    #[test]
    fn test_snapshot_round_trip() {
        let mut store = GovernanceStore::new();
        store.treasury.balance = 42;
        store.holders.insert(
            cred(1),
            TokenHolder {
                address: cred(1),
                balance: 100,
                staked: 0,
                reputation: 10,
                joined_at: Timestamp::new(0),
                last_active: Timestamp::new(5),
            },
        );

        let bytes = store.snapshot();
        let restored = GovernanceStore::restore(&bytes).unwrap();
        assert_eq!(restored.treasury.balance, 42);
        assert_eq!(restored.holders.get(&cred(1)).unwrap().balance, 100);
    }

    #[test]
    fn test_default_config_values() {
        let config = GovernanceConfig::default();
        assert_eq!(config.min_proposal_threshold, 1000);
        assert_eq!(config.voting_period_secs, 86_400);
        assert_eq!(config.quorum_threshold, 2000);
        assert_eq!(config.passing_threshold_bps, 5100);
        assert_eq!(config.treasury_threshold, 5000);
    }
}
