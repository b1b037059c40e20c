//! The transaction processor — the only component that mutates state.
//!
//! Every `process_*` method runs the matching validator predicate to
//! completion, derives every output value (weight, cost, new balances,
//! new status), and only then writes. A transaction either fully applies
//! or is rejected with the state untouched; there is no rollback path
//! because none is ever needed.
//!
//! Collected fees and voting costs are credited to the treasury, so the
//! conservation invariant
//! `Σ balances + treasury balance = minted − burned`
//! holds after every applied transaction.

use crate::error::GovernanceError;
use crate::reputation::ReputationOracle;
use crate::store::{GovernanceStore, Proposal, TokenHolder, Vote, VoteResults};
use crate::treasury;
use crate::validator;
use crate::voting;
use agora_ledger::TokenLedger;
use agora_transactions::{
    ApproveTx, BurnTx, DelegationTx, MintTx, ProposalTx, TransferFromTx, TransferTx, TreasuryTx,
    VoteTx,
};
use agora_types::{ContentHash, Credential, ProposalStatus, Timestamp, VoteChoice};

/// Applies validated transactions to the governance store and ledger.
///
/// Borrows the state exclusively for the duration of one operation; the
/// facade constructs a fresh `Processor` per call.
pub struct Processor<'a> {
    store: &'a mut GovernanceStore,
    ledger: &'a mut TokenLedger,
    reputation: &'a dyn ReputationOracle,
}

impl<'a> Processor<'a> {
    pub fn new(
        store: &'a mut GovernanceStore,
        ledger: &'a mut TokenLedger,
        reputation: &'a dyn ReputationOracle,
    ) -> Self {
        Self {
            store,
            ledger,
            reputation,
        }
    }

    /// Apply a proposal-creation transaction.
    pub fn process_proposal(
        &mut self,
        tx: &ProposalTx,
        creator: &Credential,
        tx_id: ContentHash,
        now: Timestamp,
    ) -> Result<(), GovernanceError> {
        validator::validate_proposal(self.store, self.ledger, tx, creator)?;
        if self.store.proposals.contains_key(&tx_id) {
            return Err(GovernanceError::InvalidProposal(
                "proposal id already exists".into(),
            ));
        }

        self.collect_into_treasury(creator, tx.fee)?;

        self.store.proposals.insert(
            tx_id,
            Proposal {
                id: tx_id,
                creator: *creator,
                title: tx.title.clone(),
                description: tx.description.clone(),
                proposal_type: tx.proposal_type,
                voting_type: tx.voting_type,
                start_time: tx.start_time,
                end_time: tx.end_time,
                status: ProposalStatus::Pending,
                threshold_bps: tx.threshold_bps,
                results: VoteResults::default(),
                metadata: tx.metadata,
            },
        );
        self.store.votes.insert(tx_id, Default::default());

        self.reputation.on_proposal_created(self.store, creator, now);
        self.touch_holder(creator, now);

        tracing::debug!(proposal = %tx_id, creator = %creator, "proposal created");
        Ok(())
    }

    /// Apply a vote.
    pub fn process_vote(
        &mut self,
        tx: &VoteTx,
        voter: &Credential,
        now: Timestamp,
    ) -> Result<(), GovernanceError> {
        let reputation = self.reputation.reputation_of(self.store, voter);
        validator::validate_vote(self.store, self.ledger, tx, voter, reputation, now)?;

        let voting_type = self
            .store
            .proposals
            .get(&tx.proposal_id)
            .ok_or(GovernanceError::ProposalNotFound(tx.proposal_id))?
            .voting_type;

        let balance = self.ledger.balance_of(voter);
        let (weight, cost) =
            voting::weight_and_cost(voting_type, tx.weight, tx.fee, balance, reputation)?;
        let total = cost.checked_add(tx.fee).ok_or(GovernanceError::Overflow)?;

        self.collect_into_treasury(voter, total)?;

        self.store.votes.entry(tx.proposal_id).or_default().insert(
            *voter,
            Vote {
                voter: *voter,
                choice: tx.choice,
                weight,
                cast_at: now,
                reason: tx.reason.clone(),
            },
        );

        if let Some(proposal) = self.store.proposals.get_mut(&tx.proposal_id) {
            let results = &mut proposal.results;
            match tx.choice {
                VoteChoice::Yes => results.yes = results.yes.saturating_add(weight),
                VoteChoice::No => results.no = results.no.saturating_add(weight),
                VoteChoice::Abstain => results.abstain = results.abstain.saturating_add(weight),
            }
            results.total_voters += 1;
        }

        self.reputation
            .on_vote_cast(self.store, voter, &tx.proposal_id, now);
        self.touch_holder(voter, now);

        tracing::debug!(
            proposal = %tx.proposal_id,
            voter = %voter,
            choice = ?tx.choice,
            weight,
            cost,
            "vote recorded"
        );
        Ok(())
    }

    /// Apply a delegation or revocation.
    pub fn process_delegation(
        &mut self,
        tx: &DelegationTx,
        delegator: &Credential,
        now: Timestamp,
    ) -> Result<(), GovernanceError> {
        validator::validate_delegation(self.store, self.ledger, tx, delegator, now)?;

        self.collect_into_treasury(delegator, tx.fee)?;

        if tx.revoke {
            // Deactivate in place and freeze the end time; the record
            // stays for history.
            if let Some(delegation) = self.store.delegations.get_mut(delegator) {
                delegation.active = false;
                delegation.end_time = now;
            }
            tracing::debug!(delegator = %delegator, "delegation revoked");
        } else {
            self.store.delegations.insert(
                *delegator,
                crate::store::Delegation {
                    delegator: *delegator,
                    delegate: tx.delegate,
                    start_time: now,
                    end_time: now.plus(tx.duration_secs),
                    active: true,
                },
            );
            tracing::debug!(
                delegator = %delegator,
                delegate = %tx.delegate,
                duration_secs = tx.duration_secs,
                "delegation created"
            );
        }

        Ok(())
    }

    /// Apply a treasury payout request.
    ///
    /// Attached signatures were fully vetted by the validator; if they
    /// already meet the treasury's threshold the payout executes
    /// immediately.
    pub fn process_treasury(
        &mut self,
        tx: &TreasuryTx,
        submitter: &Credential,
        tx_id: ContentHash,
        now: Timestamp,
    ) -> Result<(), GovernanceError> {
        validator::validate_treasury(self.store, self.ledger, tx, submitter)?;
        if self.store.treasury.transactions.contains_key(&tx_id) {
            return Err(GovernanceError::InvalidTransaction(
                "treasury transaction id already exists".into(),
            ));
        }

        self.collect_into_treasury(submitter, tx.fee)?;

        treasury::create_pending(self.store, tx, tx_id, now);

        if let Some(pending) = self.store.treasury.transactions.get_mut(&tx_id) {
            pending.signatures = tx.signatures.clone();
        }
        if tx.signatures.len() >= self.store.treasury.required_sigs as usize {
            treasury::execute_pending(self.store, self.ledger, &tx_id, now)?;
        }

        Ok(())
    }

    /// Apply a mint.
    pub fn process_mint(
        &mut self,
        tx: &MintTx,
        minter: &Credential,
        now: Timestamp,
    ) -> Result<(), GovernanceError> {
        validator::validate_mint(self.ledger, tx, minter)?;

        self.ledger.mint(&tx.recipient, tx.amount)?;
        self.collect_into_treasury(minter, tx.fee)?;
        self.touch_holder(&tx.recipient, now);
        self.touch_holder(minter, now);

        tracing::debug!(recipient = %tx.recipient, amount = tx.amount, "tokens minted");
        Ok(())
    }

    /// Apply a burn.
    pub fn process_burn(
        &mut self,
        tx: &BurnTx,
        burner: &Credential,
        now: Timestamp,
    ) -> Result<(), GovernanceError> {
        validator::validate_burn(self.ledger, tx, burner)?;

        self.ledger.burn(burner, tx.amount)?;
        self.collect_into_treasury(burner, tx.fee)?;
        self.touch_holder(burner, now);

        tracing::debug!(burner = %burner, amount = tx.amount, "tokens burned");
        Ok(())
    }

    /// Apply a transfer.
    pub fn process_transfer(
        &mut self,
        tx: &TransferTx,
        sender: &Credential,
        now: Timestamp,
    ) -> Result<(), GovernanceError> {
        validator::validate_transfer(self.ledger, tx, sender)?;

        self.ledger.transfer(sender, &tx.recipient, tx.amount)?;
        self.collect_into_treasury(sender, tx.fee)?;
        self.touch_holder(sender, now);
        self.touch_holder(&tx.recipient, now);

        Ok(())
    }

    /// Apply an approval.
    pub fn process_approve(
        &mut self,
        tx: &ApproveTx,
        owner: &Credential,
        now: Timestamp,
    ) -> Result<(), GovernanceError> {
        validator::validate_approve(self.ledger, tx, owner)?;

        self.ledger.approve(owner, &tx.spender, tx.amount);
        self.collect_into_treasury(owner, tx.fee)?;
        self.touch_holder(owner, now);

        Ok(())
    }

    /// Apply an allowance-backed transfer.
    pub fn process_transfer_from(
        &mut self,
        tx: &TransferFromTx,
        spender: &Credential,
        now: Timestamp,
    ) -> Result<(), GovernanceError> {
        validator::validate_transfer_from(self.ledger, tx, spender)?;

        self.ledger
            .transfer_from(spender, &tx.from, &tx.recipient, tx.amount)?;
        self.collect_into_treasury(spender, tx.fee)?;
        self.touch_holder(&tx.from, now);
        self.touch_holder(&tx.recipient, now);
        self.touch_holder(spender, now);

        Ok(())
    }

    /// Advance one proposal through the lifecycle lattice.
    ///
    /// `Pending → Active` once the window opens; `Active → Passed |
    /// Rejected` once it closes, per the quorum and pass-threshold rules.
    /// Terminal states never move. Transitions happen only through this
    /// explicit sweep, never implicitly on read.
    pub fn update_status(
        &mut self,
        proposal_id: &ContentHash,
        now: Timestamp,
    ) -> Result<ProposalStatus, GovernanceError> {
        let proposal = self
            .store
            .proposals
            .get(proposal_id)
            .ok_or(GovernanceError::ProposalNotFound(*proposal_id))?;

        let mut status = proposal.status;
        if status.is_terminal() {
            return Ok(status);
        }

        if status == ProposalStatus::Pending && now >= proposal.start_time {
            status = ProposalStatus::Active;
        }

        let mut resolved = false;
        let mut quorum = 0;
        let mut passed = false;
        if status == ProposalStatus::Active && now > proposal.end_time {
            let results = &proposal.results;
            quorum = results.participation();
            if quorum >= self.store.config.quorum_threshold {
                let active_votes = results.yes.saturating_add(results.no);
                if active_votes > 0 {
                    let pass_bps = (results.yes as u128 * 10_000) / active_votes as u128;
                    passed = pass_bps >= proposal.threshold_bps as u128;
                }
            }
            status = if passed {
                ProposalStatus::Passed
            } else {
                ProposalStatus::Rejected
            };
            resolved = true;
        }

        let proposal = self
            .store
            .proposals
            .get_mut(proposal_id)
            .ok_or(GovernanceError::ProposalNotFound(*proposal_id))?;
        let changed = proposal.status != status;
        proposal.status = status;
        if resolved {
            proposal.results.quorum = quorum;
            proposal.results.passed = passed;
        }

        if changed {
            tracing::info!(proposal = %proposal_id, status = ?status, "proposal status updated");
        }
        if resolved {
            self.reputation.on_proposal_resolved(self.store, proposal_id);
        }

        Ok(status)
    }

    /// Sweep every proposal through [`Processor::update_status`].
    pub fn update_all_statuses(&mut self, now: Timestamp) -> Result<(), GovernanceError> {
        let ids: Vec<ContentHash> = self.store.proposals.keys().copied().collect();
        for id in ids {
            self.update_status(&id, now)?;
        }
        Ok(())
    }

    /// Debit `amount` from `payer` and credit it to the treasury.
    fn collect_into_treasury(
        &mut self,
        payer: &Credential,
        amount: u64,
    ) -> Result<(), GovernanceError> {
        if amount == 0 {
            return Ok(());
        }
        self.ledger.debit(payer, amount)?;
        self.store.treasury.balance = self.store.treasury.balance.saturating_add(amount);
        Ok(())
    }

    /// Refresh (or create) the holder record for an address.
    fn touch_holder(&mut self, address: &Credential, now: Timestamp) {
        let balance = self.ledger.balance_of(address);
        if let Some(holder) = self.store.holders.get_mut(address) {
            holder.balance = balance;
            holder.last_active = now;
        } else if balance > 0 {
            let reputation = self.reputation.initial_reputation(balance);
            self.store.holders.insert(
                *address,
                TokenHolder {
                    address: *address,
                    balance,
                    staked: 0,
                    reputation,
                    joined_at: now,
                    last_active: now,
                },
            );
        }
    }
}
