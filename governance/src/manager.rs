//! Proposal orchestration: creation policy, cancellation, execution
//! dispatch, filtering and statistics.
//!
//! Execution side effects for Treasury/Technical/Parameter proposals are
//! delegated to the host through [`ExecutionHooks`]; General proposals
//! have none. The manager never bypasses the processor for state that
//! the processor owns.

use crate::error::GovernanceError;
use crate::processor::Processor;
use crate::reputation::ReputationOracle;
use crate::store::{GovernanceStore, Proposal, Vote};
use agora_ledger::TokenLedger;
use agora_transactions::ProposalTx;
use agora_types::{
    ContentHash, Credential, ProposalStatus, ProposalType, Timestamp, VoteChoice,
};
use std::collections::BTreeMap;

/// The longest voting window, as a multiple of the configured period.
const MAX_VOTING_PERIOD_MULTIPLE: u64 = 30;

/// Host-side effects of executing a passed proposal.
///
/// Every method defaults to a no-op; a host wires in parameter
/// application, upgrade scheduling or treasury follow-through as needed.
/// A hook error aborts execution before the status changes.
pub trait ExecutionHooks: Send + Sync {
    fn on_treasury_executed(&mut self, _proposal: &Proposal) -> Result<(), GovernanceError> {
        Ok(())
    }

    fn on_technical_executed(&mut self, _proposal: &Proposal) -> Result<(), GovernanceError> {
        Ok(())
    }

    fn on_parameter_executed(&mut self, _proposal: &Proposal) -> Result<(), GovernanceError> {
        Ok(())
    }
}

/// Default hooks: execution only flips the status.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopHooks;

impl ExecutionHooks for NoopHooks {}

/// Detailed voting progress for one proposal.
#[derive(Clone, Debug)]
pub struct VotingProgress {
    pub proposal_id: ContentHash,
    pub total_votes: u64,
    pub yes: u64,
    pub no: u64,
    pub abstain: u64,
    pub quorum_reached: bool,
    pub time_remaining_secs: u64,
    pub voters: Vec<VoterInfo>,
}

/// One voter's ballot, as reported in progress queries.
#[derive(Clone, Debug)]
pub struct VoterInfo {
    pub voter: Credential,
    pub choice: VoteChoice,
    pub weight: u64,
    pub cast_at: Timestamp,
    pub reason: Option<String>,
}

/// Aggregate counts across all proposals.
#[derive(Clone, Debug, Default)]
pub struct ProposalStatistics {
    pub total: u64,
    pub passed: u64,
    pub status_counts: BTreeMap<ProposalStatus, u64>,
    pub type_counts: BTreeMap<ProposalType, u64>,
}

/// Orchestration and query layer over proposals.
pub struct ProposalManager<'a> {
    store: &'a mut GovernanceStore,
    ledger: &'a mut TokenLedger,
    reputation: &'a dyn ReputationOracle,
    hooks: &'a mut dyn ExecutionHooks,
}

impl<'a> ProposalManager<'a> {
    pub fn new(
        store: &'a mut GovernanceStore,
        ledger: &'a mut TokenLedger,
        reputation: &'a dyn ReputationOracle,
        hooks: &'a mut dyn ExecutionHooks,
    ) -> Self {
        Self {
            store,
            ledger,
            reputation,
            hooks,
        }
    }

    /// Create a proposal with the manager's extra policy checks, then
    /// run it through the processor.
    pub fn create(
        &mut self,
        tx: &ProposalTx,
        creator: &Credential,
        tx_id: ContentHash,
        now: Timestamp,
    ) -> Result<(), GovernanceError> {
        if let Some(metadata) = tx.metadata {
            if metadata.is_zero() {
                return Err(GovernanceError::InvalidProposal(
                    "metadata reference must not be zero".into(),
                ));
            }
        }

        let max_window = self
            .store
            .config
            .voting_period_secs
            .saturating_mul(MAX_VOTING_PERIOD_MULTIPLE);
        if tx.start_time.until(tx.end_time) > max_window {
            return Err(GovernanceError::InvalidTimeframe(
                "voting period too long".into(),
            ));
        }

        Processor::new(self.store, self.ledger, self.reputation)
            .process_proposal(tx, creator, tx_id, now)
    }

    /// Execute a passed proposal, dispatched by proposal type behind the
    /// type's authorization rule.
    pub fn execute(
        &mut self,
        proposal_id: &ContentHash,
        executor: &Credential,
        _now: Timestamp,
    ) -> Result<(), GovernanceError> {
        let proposal = self
            .store
            .proposals
            .get(proposal_id)
            .ok_or(GovernanceError::ProposalNotFound(*proposal_id))?;

        if proposal.status != ProposalStatus::Passed {
            return Err(GovernanceError::InvalidProposal(
                "proposal must be in passed status to execute".into(),
            ));
        }
        if !self.is_authorized_executor(proposal, executor) {
            return Err(GovernanceError::Unauthorized(
                "executor not authorized for this proposal type".into(),
            ));
        }

        let snapshot = proposal.clone();
        match snapshot.proposal_type {
            ProposalType::General => {}
            ProposalType::Treasury => self.hooks.on_treasury_executed(&snapshot)?,
            ProposalType::Technical => self.hooks.on_technical_executed(&snapshot)?,
            ProposalType::Parameter => self.hooks.on_parameter_executed(&snapshot)?,
        }

        if let Some(proposal) = self.store.proposals.get_mut(proposal_id) {
            proposal.status = ProposalStatus::Executed;
        }
        tracing::info!(proposal = %proposal_id, executor = %executor, "proposal executed");
        Ok(())
    }

    /// Cancel a proposal. Creator-only, and only while still Pending.
    pub fn cancel(
        &mut self,
        proposal_id: &ContentHash,
        canceller: &Credential,
    ) -> Result<(), GovernanceError> {
        let proposal = self
            .store
            .proposals
            .get_mut(proposal_id)
            .ok_or(GovernanceError::ProposalNotFound(*proposal_id))?;

        if proposal.creator != *canceller {
            return Err(GovernanceError::Unauthorized(
                "only the proposal creator can cancel".into(),
            ));
        }
        if proposal.status != ProposalStatus::Pending {
            return Err(GovernanceError::InvalidProposal(
                "only pending proposals can be cancelled".into(),
            ));
        }

        proposal.status = ProposalStatus::Cancelled;
        tracing::info!(proposal = %proposal_id, "proposal cancelled");
        Ok(())
    }

    /// Sweep every proposal through the lifecycle.
    pub fn update_all_statuses(&mut self, now: Timestamp) -> Result<(), GovernanceError> {
        Processor::new(self.store, self.ledger, self.reputation).update_all_statuses(now)
    }

    fn is_authorized_executor(&self, proposal: &Proposal, executor: &Credential) -> bool {
        match proposal.proposal_type {
            ProposalType::General => true,
            ProposalType::Treasury => self.store.treasury.is_signer(executor),
            ProposalType::Technical | ProposalType::Parameter => {
                self.ledger.balance_of(executor) >= self.store.config.min_proposal_threshold
            }
        }
    }

    pub fn by_status(&self, status: ProposalStatus) -> Vec<&Proposal> {
        self.store
            .proposals
            .values()
            .filter(|proposal| proposal.status == status)
            .collect()
    }

    pub fn by_type(&self, proposal_type: ProposalType) -> Vec<&Proposal> {
        self.store
            .proposals
            .values()
            .filter(|proposal| proposal.proposal_type == proposal_type)
            .collect()
    }

    pub fn by_creator(&self, creator: &Credential) -> Vec<&Proposal> {
        self.store
            .proposals
            .values()
            .filter(|proposal| proposal.creator == *creator)
            .collect()
    }

    /// Detailed voting progress for one proposal.
    pub fn voting_progress(
        &self,
        proposal_id: &ContentHash,
        now: Timestamp,
    ) -> Result<VotingProgress, GovernanceError> {
        let proposal = self
            .store
            .proposals
            .get(proposal_id)
            .ok_or(GovernanceError::ProposalNotFound(*proposal_id))?;
        let ballots = self
            .store
            .votes
            .get(proposal_id)
            .ok_or(GovernanceError::ProposalNotFound(*proposal_id))?;

        let results = &proposal.results;
        Ok(VotingProgress {
            proposal_id: *proposal_id,
            total_votes: ballots.len() as u64,
            yes: results.yes,
            no: results.no,
            abstain: results.abstain,
            quorum_reached: results.participation() >= self.store.config.quorum_threshold,
            time_remaining_secs: now.until(proposal.end_time),
            voters: ballots.values().map(VoterInfo::from).collect(),
        })
    }

    /// Aggregate statistics across all proposals.
    pub fn statistics(&self) -> ProposalStatistics {
        let mut stats = ProposalStatistics::default();
        for proposal in self.store.proposals.values() {
            stats.total += 1;
            *stats.status_counts.entry(proposal.status).or_insert(0) += 1;
            *stats.type_counts.entry(proposal.proposal_type).or_insert(0) += 1;
            if proposal.results.passed {
                stats.passed += 1;
            }
        }
        stats
    }
}

impl From<&Vote> for VoterInfo {
    fn from(vote: &Vote) -> Self {
        Self {
            voter: vote.voter,
            choice: vote.choice,
            weight: vote.weight,
            cast_at: vote.cast_at,
            reason: vote.reason.clone(),
        }
    }
}
