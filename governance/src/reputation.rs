//! Reputation provider boundary.
//!
//! Reputation scoring is an external collaborator: the core only needs to
//! read a member's current score (for reputation-gated voting) and to
//! notify the provider after proposal creation, voting, and proposal
//! resolution. [`StandardReputation`] is the default in-store provider,
//! carrying the documented scoring constants; hosts with their own scoring
//! subsystem plug in a different [`ReputationOracle`].

use crate::store::GovernanceStore;
use agora_types::{ContentHash, Credential, ProposalStatus, Timestamp};

/// Read and event-hook interface for the reputation collaborator.
pub trait ReputationOracle: Send + Sync {
    /// The member's current reputation score (0 if unknown).
    fn reputation_of(&self, store: &GovernanceStore, user: &Credential) -> u64;

    /// Score assigned to a holder record created with `balance` tokens.
    fn initial_reputation(&self, balance: u64) -> u64;

    /// Called after a proposal is created.
    fn on_proposal_created(&self, store: &mut GovernanceStore, creator: &Credential, now: Timestamp);

    /// Called after a vote is applied.
    fn on_vote_cast(
        &self,
        store: &mut GovernanceStore,
        voter: &Credential,
        proposal_id: &ContentHash,
        now: Timestamp,
    );

    /// Called after the lifecycle sweep resolves a proposal to
    /// `Passed` or `Rejected`.
    fn on_proposal_resolved(&self, store: &mut GovernanceStore, proposal_id: &ContentHash);
}

/// Scoring constants for [`StandardReputation`].
#[derive(Clone, Copy, Debug)]
pub struct ReputationParams {
    /// Gained for creating a proposal.
    pub proposal_creation_bonus: u64,
    /// Gained per vote cast.
    pub voting_participation: u64,
    /// Gained by the creator when a proposal passes.
    pub proposal_passed_bonus: u64,
    /// Lost by the creator when a proposal is rejected.
    pub proposal_rejected_penalty: u64,
    pub max_reputation: u64,
    pub min_reputation: u64,
    /// Initial reputation is `balance / initial_divisor`.
    pub initial_divisor: u64,
}

impl Default for ReputationParams {
    fn default() -> Self {
        Self {
            proposal_creation_bonus: 50,
            voting_participation: 10,
            proposal_passed_bonus: 100,
            proposal_rejected_penalty: 25,
            max_reputation: 10_000,
            min_reputation: 10,
            initial_divisor: 10,
        }
    }
}

/// Default reputation provider: scores live in the store's holder records.
#[derive(Clone, Copy, Debug, Default)]
pub struct StandardReputation {
    pub params: ReputationParams,
}

impl StandardReputation {
    pub fn new(params: ReputationParams) -> Self {
        Self { params }
    }

    fn add_capped(&self, store: &mut GovernanceStore, user: &Credential, bonus: u64, now: Timestamp) {
        if let Some(holder) = store.holders.get_mut(user) {
            holder.reputation = holder
                .reputation
                .saturating_add(bonus)
                .min(self.params.max_reputation);
            holder.last_active = now;
        }
    }
}

impl ReputationOracle for StandardReputation {
    fn reputation_of(&self, store: &GovernanceStore, user: &Credential) -> u64 {
        store
            .holders
            .get(user)
            .map(|holder| holder.reputation)
            .unwrap_or(0)
    }

    fn initial_reputation(&self, balance: u64) -> u64 {
        (balance / self.params.initial_divisor).min(self.params.max_reputation)
    }

    fn on_proposal_created(
        &self,
        store: &mut GovernanceStore,
        creator: &Credential,
        now: Timestamp,
    ) {
        self.add_capped(store, creator, self.params.proposal_creation_bonus, now);
    }

    fn on_vote_cast(
        &self,
        store: &mut GovernanceStore,
        voter: &Credential,
        _proposal_id: &ContentHash,
        now: Timestamp,
    ) {
        self.add_capped(store, voter, self.params.voting_participation, now);
    }

    fn on_proposal_resolved(&self, store: &mut GovernanceStore, proposal_id: &ContentHash) {
        let Some(proposal) = store.proposals.get(proposal_id) else {
            return;
        };
        let creator = proposal.creator;
        let status = proposal.status;
        let Some(holder) = store.holders.get_mut(&creator) else {
            return;
        };

        match status {
            ProposalStatus::Passed => {
                holder.reputation = holder
                    .reputation
                    .saturating_add(self.params.proposal_passed_bonus)
                    .min(self.params.max_reputation);
            }
            ProposalStatus::Rejected => {
                // Penalty only applies to scores above it, and never drops
                // a holder below the floor.
                if holder.reputation > self.params.proposal_rejected_penalty {
                    holder.reputation = (holder.reputation
                        - self.params.proposal_rejected_penalty)
                        .max(self.params.min_reputation);
                }
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::TokenHolder;

    fn cred(n: u8) -> Credential {
        Credential::new([n; 32])
    }

    fn store_with_holder(reputation: u64) -> GovernanceStore {
        let mut store = GovernanceStore::new();
        store.holders.insert(
            cred(1),
            TokenHolder {
                address: cred(1),
                balance: 1000,
                staked: 0,
                reputation,
                joined_at: Timestamp::EPOCH,
                last_active: Timestamp::EPOCH,
            },
        );
        store
    }

    #[test]
    fn test_initial_reputation_is_tenth_of_balance() {
        let oracle = StandardReputation::default();
        assert_eq!(oracle.initial_reputation(1000), 100);
        assert_eq!(oracle.initial_reputation(5), 0);
        // Capped at the maximum.
        assert_eq!(oracle.initial_reputation(u64::MAX), 10_000);
    }

    #[test]
    fn test_creation_bonus_capped_at_max() {
        let oracle = StandardReputation::default();
        let mut store = store_with_holder(9_990);
        oracle.on_proposal_created(&mut store, &cred(1), Timestamp::new(7));
        let holder = store.holders.get(&cred(1)).unwrap();
        assert_eq!(holder.reputation, 10_000);
        assert_eq!(holder.last_active, Timestamp::new(7));
    }

    #[test]
    fn test_vote_participation_bonus() {
        let oracle = StandardReputation::default();
        let mut store = store_with_holder(100);
        oracle.on_vote_cast(
            &mut store,
            &cred(1),
            &ContentHash::new([9; 32]),
            Timestamp::new(1),
        );
        assert_eq!(oracle.reputation_of(&store, &cred(1)), 110);
    }

    #[test]
    fn test_unknown_member_has_zero_reputation() {
        let oracle = StandardReputation::default();
        let store = GovernanceStore::new();
        assert_eq!(oracle.reputation_of(&store, &cred(3)), 0);
    }

    #[test]
    fn test_rejection_penalty_floors_at_min() {
        let oracle = StandardReputation::default();
        let mut store = store_with_holder(30);
        let proposal_id = ContentHash::new([4; 32]);
        store.proposals.insert(
            proposal_id,
            crate::store::Proposal {
                id: proposal_id,
                creator: cred(1),
                title: "t".into(),
                description: "d".into(),
                proposal_type: agora_types::ProposalType::General,
                voting_type: agora_types::VotingType::Simple,
                start_time: Timestamp::EPOCH,
                end_time: Timestamp::new(10),
                status: ProposalStatus::Rejected,
                threshold_bps: 5100,
                results: Default::default(),
                metadata: None,
            },
        );

        oracle.on_proposal_resolved(&mut store, &proposal_id);
        // 30 − 25 = 5, floored at the minimum of 10.
        assert_eq!(oracle.reputation_of(&store, &cred(1)), 10);
    }
}
