//! The DAO facade.
//!
//! Owns the governance store, the token ledger, the injected clock and
//! the collaborator boundaries, and exposes the operations the host
//! ledger drives: a single [`Dao::apply`] dispatch point for
//! transactions, explicit lifecycle sweeps, treasury workflow wrappers,
//! and the query surface. Wall-clock time enters only through the clock;
//! every inner call receives an explicit timestamp.

use crate::access::{AccessGate, AllowAll, Permission};
use crate::delegation;
use crate::error::GovernanceError;
use crate::manager::{
    ExecutionHooks, NoopHooks, ProposalManager, ProposalStatistics, VotingProgress,
};
use crate::processor::Processor;
use crate::reputation::{ReputationOracle, StandardReputation};
use crate::store::{
    Delegation, GovernanceConfig, GovernanceStore, PendingTx, Proposal, TokenHolder, Vote,
};
use crate::treasury::TreasuryManager;
use agora_ledger::TokenLedger;
use agora_transactions::DaoTransaction;
use agora_types::{Clock, ContentHash, Credential, ProposalStatus, Signature, SystemClock};
use std::collections::BTreeMap;

/// The assembled DAO: state, ledger, clock and collaborators.
pub struct Dao {
    store: GovernanceStore,
    ledger: TokenLedger,
    clock: Box<dyn Clock>,
    reputation: Box<dyn ReputationOracle>,
    gate: Box<dyn AccessGate>,
    hooks: Box<dyn ExecutionHooks>,
}

impl Dao {
    /// A DAO with the default collaborators: system clock, in-store
    /// reputation, allow-all gate, no-op execution hooks.
    pub fn new(symbol: impl Into<String>, name: impl Into<String>, decimals: u8) -> Self {
        Self {
            store: GovernanceStore::new(),
            ledger: TokenLedger::new(symbol, name, decimals),
            clock: Box::new(SystemClock),
            reputation: Box::new(StandardReputation::default()),
            gate: Box::new(AllowAll),
            hooks: Box::new(NoopHooks),
        }
    }

    pub fn with_clock(mut self, clock: Box<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn with_reputation_oracle(mut self, oracle: Box<dyn ReputationOracle>) -> Self {
        self.reputation = oracle;
        self
    }

    pub fn with_access_gate(mut self, gate: Box<dyn AccessGate>) -> Self {
        self.gate = gate;
        self
    }

    pub fn with_execution_hooks(mut self, hooks: Box<dyn ExecutionHooks>) -> Self {
        self.hooks = hooks;
        self
    }

    // ---- genesis -------------------------------------------------------

    /// Mint the founding allocation and register holder records.
    pub fn distribute(&mut self, allocations: &[(Credential, u64)]) -> Result<(), GovernanceError> {
        let now = self.clock.now();
        for (recipient, amount) in allocations {
            self.ledger.mint(recipient, *amount)?;
            let reputation = self.reputation.initial_reputation(*amount);
            self.store.holders.insert(
                *recipient,
                TokenHolder {
                    address: *recipient,
                    balance: self.ledger.balance_of(recipient),
                    staked: 0,
                    reputation,
                    joined_at: now,
                    last_active: now,
                },
            );
        }
        Ok(())
    }

    /// Set up the treasury signer set.
    pub fn init_treasury(
        &mut self,
        signers: Vec<Credential>,
        required_sigs: u8,
    ) -> Result<(), GovernanceError> {
        TreasuryManager::new(&mut self.store, &mut self.ledger).update_signers(signers, required_sigs)
    }

    /// Move tokens from a holder into the treasury.
    pub fn deposit_treasury(
        &mut self,
        from: &Credential,
        amount: u64,
    ) -> Result<(), GovernanceError> {
        TreasuryManager::new(&mut self.store, &mut self.ledger).deposit(from, amount)
    }

    /// Replace the configuration after validating it.
    pub fn update_config(&mut self, config: GovernanceConfig) -> Result<(), GovernanceError> {
        if config.min_proposal_threshold == 0 {
            return Err(GovernanceError::InvalidProposal(
                "minimum proposal threshold must be greater than zero".into(),
            ));
        }
        if config.voting_period_secs == 0 {
            return Err(GovernanceError::InvalidProposal(
                "voting period must be positive".into(),
            ));
        }
        if config.quorum_threshold == 0 {
            return Err(GovernanceError::InvalidProposal(
                "quorum threshold must be greater than zero".into(),
            ));
        }
        if config.passing_threshold_bps == 0 || config.passing_threshold_bps > 10_000 {
            return Err(GovernanceError::InvalidProposal(
                "passing threshold must be between 1 and 10000 basis points".into(),
            ));
        }
        self.store.config = config;
        Ok(())
    }

    // ---- transaction dispatch ------------------------------------------

    /// Apply one transaction. The single dispatch point: the access gate
    /// is consulted first, then the matching processor path validates and
    /// applies atomically.
    pub fn apply(
        &mut self,
        tx: &DaoTransaction,
        signer: &Credential,
        tx_id: ContentHash,
    ) -> Result<(), GovernanceError> {
        let permission = Permission::for_kind(tx.kind());
        if !self.gate.allows(signer, permission) {
            return Err(GovernanceError::Unauthorized(format!(
                "{:?} denied for {} transaction",
                permission,
                tx.kind()
            )));
        }

        let now = self.clock.now();
        let mut processor =
            Processor::new(&mut self.store, &mut self.ledger, self.reputation.as_ref());
        match tx {
            DaoTransaction::Proposal(tx) => processor.process_proposal(tx, signer, tx_id, now),
            DaoTransaction::Vote(tx) => processor.process_vote(tx, signer, now),
            DaoTransaction::Delegation(tx) => processor.process_delegation(tx, signer, now),
            DaoTransaction::Treasury(tx) => processor.process_treasury(tx, signer, tx_id, now),
            DaoTransaction::Mint(tx) => processor.process_mint(tx, signer, now),
            DaoTransaction::Burn(tx) => processor.process_burn(tx, signer, now),
            DaoTransaction::Transfer(tx) => processor.process_transfer(tx, signer, now),
            DaoTransaction::Approve(tx) => processor.process_approve(tx, signer, now),
            DaoTransaction::TransferFrom(tx) => processor.process_transfer_from(tx, signer, now),
        }
    }

    // ---- lifecycle -----------------------------------------------------

    /// Sweep one proposal through the lifecycle.
    pub fn update_proposal_status(
        &mut self,
        proposal_id: &ContentHash,
    ) -> Result<ProposalStatus, GovernanceError> {
        let now = self.clock.now();
        Processor::new(&mut self.store, &mut self.ledger, self.reputation.as_ref())
            .update_status(proposal_id, now)
    }

    /// Sweep every proposal through the lifecycle.
    pub fn update_all_proposal_statuses(&mut self) -> Result<(), GovernanceError> {
        let now = self.clock.now();
        Processor::new(&mut self.store, &mut self.ledger, self.reputation.as_ref())
            .update_all_statuses(now)
    }

    // ---- proposal orchestration ----------------------------------------

    /// Create a proposal through the manager's policy checks.
    pub fn create_proposal(
        &mut self,
        tx: &agora_transactions::ProposalTx,
        creator: &Credential,
        tx_id: ContentHash,
    ) -> Result<(), GovernanceError> {
        let now = self.clock.now();
        self.proposal_manager().create(tx, creator, tx_id, now)
    }

    /// Execute a passed proposal.
    pub fn execute_proposal(
        &mut self,
        proposal_id: &ContentHash,
        executor: &Credential,
    ) -> Result<(), GovernanceError> {
        let now = self.clock.now();
        self.proposal_manager().execute(proposal_id, executor, now)
    }

    /// Cancel a pending proposal (creator only).
    pub fn cancel_proposal(
        &mut self,
        proposal_id: &ContentHash,
        canceller: &Credential,
    ) -> Result<(), GovernanceError> {
        self.proposal_manager().cancel(proposal_id, canceller)
    }

    /// Voting progress for one proposal.
    pub fn voting_progress(
        &mut self,
        proposal_id: &ContentHash,
    ) -> Result<VotingProgress, GovernanceError> {
        let now = self.clock.now();
        self.proposal_manager().voting_progress(proposal_id, now)
    }

    /// Aggregate proposal statistics.
    pub fn proposal_statistics(&mut self) -> ProposalStatistics {
        self.proposal_manager().statistics()
    }

    fn proposal_manager(&mut self) -> ProposalManager<'_> {
        ProposalManager::new(
            &mut self.store,
            &mut self.ledger,
            self.reputation.as_ref(),
            self.hooks.as_mut(),
        )
    }

    // ---- treasury workflow ---------------------------------------------

    /// Add one signer's approval to a pending treasury payout.
    pub fn sign_treasury(
        &mut self,
        tx_id: &ContentHash,
        signer: &Credential,
        signature: Signature,
    ) -> Result<(), GovernanceError> {
        let now = self.clock.now();
        TreasuryManager::new(&mut self.store, &mut self.ledger).sign(tx_id, signer, signature, now)
    }

    /// Execute a pending payout that already has enough signatures.
    pub fn execute_treasury(&mut self, tx_id: &ContentHash) -> Result<(), GovernanceError> {
        let now = self.clock.now();
        TreasuryManager::new(&mut self.store, &mut self.ledger).execute(tx_id, now)
    }

    /// Sweep expired unexecuted payouts; returns how many were removed.
    pub fn cleanup_expired_treasury(&mut self) -> usize {
        let now = self.clock.now();
        TreasuryManager::new(&mut self.store, &mut self.ledger).cleanup_expired(now)
    }

    /// Replace the treasury signer set.
    pub fn update_treasury_signers(
        &mut self,
        signers: Vec<Credential>,
        required_sigs: u8,
    ) -> Result<(), GovernanceError> {
        TreasuryManager::new(&mut self.store, &mut self.ledger).update_signers(signers, required_sigs)
    }

    /// Pending treasury payouts still collecting signatures.
    pub fn pending_treasury(&self) -> Vec<&PendingTx> {
        let now = self.clock.now();
        self.store
            .treasury
            .transactions
            .values()
            .filter(|tx| !tx.executed && !tx.is_expired(now))
            .collect()
    }

    pub fn treasury_transaction(&self, tx_id: &ContentHash) -> Option<&PendingTx> {
        self.store.treasury.transactions.get(tx_id)
    }

    pub fn treasury_balance(&self) -> u64 {
        self.store.treasury.balance
    }

    pub fn treasury_signers(&self) -> &[Credential] {
        &self.store.treasury.signers
    }

    // ---- delegation power ----------------------------------------------

    /// Effective voting power: zero while delegated away, otherwise own
    /// balance plus inbound delegations (live balances).
    pub fn effective_voting_power(&self, user: &Credential) -> u64 {
        let now = self.clock.now();
        delegation::effective_voting_power(&self.store, &self.ledger, user, now)
    }

    pub fn own_voting_power(&self, user: &Credential) -> u64 {
        let now = self.clock.now();
        delegation::own_voting_power(&self.store, &self.ledger, user, now)
    }

    pub fn delegated_power(&self, delegate: &Credential) -> u64 {
        let now = self.clock.now();
        delegation::delegated_power(&self.store, &self.ledger, delegate, now)
    }

    /// All delegations live right now.
    pub fn active_delegations(&self) -> Vec<&Delegation> {
        delegation::active_delegations(&self.store, self.clock.now())
    }

    /// Live delegations naming `delegate`.
    pub fn delegations_to(&self, delegate: &Credential) -> Vec<&Delegation> {
        delegation::delegations_to(&self.store, delegate, self.clock.now())
    }

    // ---- queries -------------------------------------------------------

    pub fn proposal(&self, proposal_id: &ContentHash) -> Option<&Proposal> {
        self.store.proposals.get(proposal_id)
    }

    /// All ballots for a proposal, keyed by voter.
    pub fn votes(&self, proposal_id: &ContentHash) -> Option<&BTreeMap<Credential, Vote>> {
        self.store.votes.get(proposal_id)
    }

    pub fn delegation(&self, delegator: &Credential) -> Option<&Delegation> {
        self.store.delegations.get(delegator)
    }

    pub fn token_holder(&self, address: &Credential) -> Option<&TokenHolder> {
        self.store.holders.get(address)
    }

    pub fn balance_of(&self, address: &Credential) -> u64 {
        self.ledger.balance_of(address)
    }

    pub fn allowance_of(&self, owner: &Credential, spender: &Credential) -> u64 {
        self.ledger.allowance_of(owner, spender)
    }

    pub fn total_supply(&self) -> u64 {
        self.ledger.total_supply()
    }

    pub fn active_proposals(&self) -> Vec<&Proposal> {
        self.store
            .proposals
            .values()
            .filter(|proposal| proposal.status == ProposalStatus::Active)
            .collect()
    }

    pub fn all_proposals(&self) -> Vec<&Proposal> {
        self.store.proposals.values().collect()
    }

    /// Read-only snapshot of the governance state, for the analytics and
    /// metadata collaborators.
    pub fn store(&self) -> &GovernanceStore {
        &self.store
    }

    /// Read-only view of the token ledger.
    pub fn ledger(&self) -> &TokenLedger {
        &self.ledger
    }
}
