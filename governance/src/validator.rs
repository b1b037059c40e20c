//! Stateless admissibility predicates.
//!
//! One function per transaction kind. Each reads the store and ledger,
//! never mutates, and returns the first violated rule. The processor runs
//! the matching predicate to completion before its first write, so a
//! rejected transaction leaves no trace.

use crate::error::GovernanceError;
use crate::store::GovernanceStore;
use crate::voting;
use agora_ledger::{LedgerError, TokenLedger};
use agora_transactions::{
    ApproveTx, BurnTx, DelegationTx, MintTx, ProposalTx, TransferFromTx, TransferTx, TreasuryTx,
    VoteTx,
};
use agora_types::{Credential, ProposalStatus, ProposalType, Timestamp};

/// Longest allowed delegation window: one year.
pub const MAX_DELEGATION_SECS: u64 = 365 * 24 * 3600;

const MAX_TITLE_LEN: usize = 200;
const MAX_DESCRIPTION_LEN: usize = 10_000;
const MAX_PURPOSE_LEN: usize = 500;
const MAX_REASON_LEN: usize = 200;

/// Admissibility of a proposal-creation transaction.
pub fn validate_proposal(
    store: &GovernanceStore,
    ledger: &TokenLedger,
    tx: &ProposalTx,
    creator: &Credential,
) -> Result<(), GovernanceError> {
    let balance = ledger.balance_of(creator);
    if balance < store.config.min_proposal_threshold {
        return Err(GovernanceError::InsufficientTokens {
            needed: store.config.min_proposal_threshold,
            available: balance,
        });
    }

    if tx.title.is_empty() || tx.title.len() > MAX_TITLE_LEN {
        return Err(GovernanceError::InvalidProposal(
            "title must be between 1 and 200 characters".into(),
        ));
    }
    if tx.description.is_empty() || tx.description.len() > MAX_DESCRIPTION_LEN {
        return Err(GovernanceError::InvalidProposal(
            "description must be between 1 and 10000 characters".into(),
        ));
    }

    if tx.end_time <= tx.start_time {
        return Err(GovernanceError::InvalidTimeframe(
            "end time must be after start time".into(),
        ));
    }
    if tx.start_time.until(tx.end_time) < store.config.voting_period_secs {
        return Err(GovernanceError::InvalidTimeframe(
            "voting period too short".into(),
        ));
    }

    if tx.threshold_bps == 0 || tx.threshold_bps > 10_000 {
        return Err(GovernanceError::InvalidProposal(
            "pass threshold must be within (0, 10000] basis points".into(),
        ));
    }

    if tx.proposal_type == ProposalType::Treasury && balance < store.config.treasury_threshold {
        return Err(GovernanceError::InsufficientTokens {
            needed: store.config.treasury_threshold,
            available: balance,
        });
    }

    if balance < tx.fee {
        return Err(GovernanceError::InsufficientTokens {
            needed: tx.fee,
            available: balance,
        });
    }

    Ok(())
}

/// Admissibility of a vote.
///
/// `reputation` is the voter's current score as resolved by the host's
/// reputation provider; it only matters for reputation-gated proposals.
pub fn validate_vote(
    store: &GovernanceStore,
    ledger: &TokenLedger,
    tx: &VoteTx,
    voter: &Credential,
    reputation: u64,
    now: Timestamp,
) -> Result<(), GovernanceError> {
    let proposal = store
        .proposals
        .get(&tx.proposal_id)
        .ok_or(GovernanceError::ProposalNotFound(tx.proposal_id))?;

    if now < proposal.start_time {
        return Err(GovernanceError::VotingNotStarted);
    }
    if now > proposal.end_time {
        return Err(GovernanceError::VotingClosed("voting period has ended"));
    }
    if proposal.status != ProposalStatus::Active {
        return Err(GovernanceError::VotingClosed(
            "proposal is not in active status",
        ));
    }

    if let Some(prior) = store
        .votes
        .get(&tx.proposal_id)
        .and_then(|ballots| ballots.get(voter))
    {
        return Err(GovernanceError::DuplicateVote {
            prior: prior.choice,
        });
    }

    let balance = ledger.balance_of(voter);
    if balance == 0 {
        return Err(GovernanceError::InsufficientTokens {
            needed: 1,
            available: 0,
        });
    }

    if tx.weight == 0 {
        return Err(GovernanceError::InvalidTransaction(
            "vote weight must be greater than zero".into(),
        ));
    }

    if proposal.voting_type == agora_types::VotingType::Reputation
        && !store.holders.contains_key(voter)
    {
        return Err(GovernanceError::Unauthorized(
            "voter not in token holder registry".into(),
        ));
    }

    // The weight/cost table covers cost + fee affordability.
    voting::weight_and_cost(proposal.voting_type, tx.weight, tx.fee, balance, reputation)?;

    if balance < tx.fee {
        return Err(GovernanceError::InsufficientTokens {
            needed: tx.fee,
            available: balance,
        });
    }

    Ok(())
}

/// Admissibility of a delegation (or revocation).
pub fn validate_delegation(
    store: &GovernanceStore,
    ledger: &TokenLedger,
    tx: &DelegationTx,
    delegator: &Credential,
    now: Timestamp,
) -> Result<(), GovernanceError> {
    let balance = ledger.balance_of(delegator);
    if balance == 0 {
        return Err(GovernanceError::InsufficientTokens {
            needed: 1,
            available: 0,
        });
    }
    if balance < tx.fee {
        return Err(GovernanceError::InsufficientTokens {
            needed: tx.fee,
            available: balance,
        });
    }

    if tx.revoke {
        let active = store
            .delegations
            .get(delegator)
            .map(|delegation| delegation.active)
            .unwrap_or(false);
        if !active {
            return Err(GovernanceError::InvalidDelegation(
                "no active delegation to revoke".into(),
            ));
        }
        return Ok(());
    }

    if tx.delegate == *delegator {
        return Err(GovernanceError::InvalidDelegation(
            "cannot delegate to self".into(),
        ));
    }
    if tx.duration_secs == 0 {
        return Err(GovernanceError::InvalidDelegation(
            "delegation duration must be positive".into(),
        ));
    }
    if tx.duration_secs > MAX_DELEGATION_SECS {
        return Err(GovernanceError::InvalidDelegation(
            "delegation duration exceeds maximum allowed".into(),
        ));
    }
    if !ledger.is_known(&tx.delegate) {
        return Err(GovernanceError::InvalidDelegation(
            "delegate address not found".into(),
        ));
    }
    if let Some(existing) = store.delegations.get(delegator) {
        if existing.is_live(now) {
            return Err(GovernanceError::InvalidDelegation(
                "delegator already has an active delegation".into(),
            ));
        }
    }

    Ok(())
}

/// Admissibility of a treasury payout request.
///
/// Attached signatures are fully vetted here — structural validity,
/// signer authorization and de-duplication — so the processor can apply
/// them without a fallible step between its first and last write.
pub fn validate_treasury(
    store: &GovernanceStore,
    ledger: &TokenLedger,
    tx: &TreasuryTx,
    submitter: &Credential,
) -> Result<(), GovernanceError> {
    if tx.amount == 0 {
        return Err(GovernanceError::InvalidTransaction(
            "treasury amount must be greater than zero".into(),
        ));
    }
    if tx.amount > store.treasury.balance {
        return Err(GovernanceError::TreasuryInsufficientFunds {
            needed: tx.amount,
            available: store.treasury.balance,
        });
    }

    if tx.purpose.is_empty() || tx.purpose.len() > MAX_PURPOSE_LEN {
        return Err(GovernanceError::InvalidTransaction(
            "treasury purpose must be between 1 and 500 characters".into(),
        ));
    }

    if tx.required_sigs == 0 {
        return Err(GovernanceError::InvalidSignature(
            "at least one signature must be required".into(),
        ));
    }
    if tx.required_sigs as usize > store.treasury.signers.len() {
        return Err(GovernanceError::InvalidSignature(
            "required signatures exceeds available signers".into(),
        ));
    }
    if tx.signatures.len() > store.treasury.signers.len() {
        return Err(GovernanceError::InvalidSignature(
            "too many signatures provided".into(),
        ));
    }

    for (i, sig) in tx.signatures.iter().enumerate() {
        if !sig.signature.is_structurally_valid() {
            return Err(GovernanceError::InvalidSignature(format!(
                "invalid signature from signer {}",
                i
            )));
        }
        if !store.treasury.is_signer(&sig.signer) {
            return Err(GovernanceError::Unauthorized(format!(
                "{} is not an authorized treasury signer",
                sig.signer
            )));
        }
        if tx.signatures[..i].iter().any(|prev| prev.signer == sig.signer) {
            return Err(GovernanceError::DuplicateSignature(sig.signer));
        }
    }

    let balance = ledger.balance_of(submitter);
    if balance < tx.fee {
        return Err(GovernanceError::InsufficientTokens {
            needed: tx.fee,
            available: balance,
        });
    }

    Ok(())
}

/// Admissibility of a mint.
pub fn validate_mint(
    ledger: &TokenLedger,
    tx: &MintTx,
    minter: &Credential,
) -> Result<(), GovernanceError> {
    let balance = ledger.balance_of(minter);
    if balance == 0 {
        return Err(GovernanceError::Unauthorized(
            "minter holds no governance tokens".into(),
        ));
    }

    if tx.amount == 0 {
        return Err(GovernanceError::InvalidTransaction(
            "mint amount must be greater than zero".into(),
        ));
    }
    if tx.reason.is_empty() || tx.reason.len() > MAX_REASON_LEN {
        return Err(GovernanceError::InvalidTransaction(
            "mint reason must be between 1 and 200 characters".into(),
        ));
    }

    if ledger.total_supply().checked_add(tx.amount).is_none() {
        return Err(GovernanceError::Ledger(LedgerError::SupplyOverflow));
    }

    if balance < tx.fee {
        return Err(GovernanceError::InsufficientTokens {
            needed: tx.fee,
            available: balance,
        });
    }

    Ok(())
}

/// Admissibility of a burn.
pub fn validate_burn(
    ledger: &TokenLedger,
    tx: &BurnTx,
    burner: &Credential,
) -> Result<(), GovernanceError> {
    if tx.amount == 0 {
        return Err(GovernanceError::InvalidTransaction(
            "burn amount must be greater than zero".into(),
        ));
    }
    if tx.reason.is_empty() || tx.reason.len() > MAX_REASON_LEN {
        return Err(GovernanceError::InvalidTransaction(
            "burn reason must be between 1 and 200 characters".into(),
        ));
    }

    let balance = ledger.balance_of(burner);
    let needed = tx.amount.checked_add(tx.fee).ok_or(GovernanceError::Overflow)?;
    if balance < needed {
        return Err(GovernanceError::InsufficientTokens {
            needed,
            available: balance,
        });
    }

    Ok(())
}

/// Admissibility of a transfer.
pub fn validate_transfer(
    ledger: &TokenLedger,
    tx: &TransferTx,
    sender: &Credential,
) -> Result<(), GovernanceError> {
    if tx.amount == 0 {
        return Err(GovernanceError::InvalidTransaction(
            "transfer amount must be greater than zero".into(),
        ));
    }
    if tx.recipient == *sender {
        return Err(GovernanceError::InvalidTransaction(
            "cannot transfer to self".into(),
        ));
    }

    let balance = ledger.balance_of(sender);
    let needed = tx.amount.checked_add(tx.fee).ok_or(GovernanceError::Overflow)?;
    if balance < needed {
        return Err(GovernanceError::InsufficientTokens {
            needed,
            available: balance,
        });
    }

    Ok(())
}

/// Admissibility of an approval. A zero amount revokes.
pub fn validate_approve(
    ledger: &TokenLedger,
    tx: &ApproveTx,
    owner: &Credential,
) -> Result<(), GovernanceError> {
    if tx.spender == *owner {
        return Err(GovernanceError::InvalidTransaction(
            "cannot approve self".into(),
        ));
    }

    let balance = ledger.balance_of(owner);
    if balance < tx.fee {
        return Err(GovernanceError::InsufficientTokens {
            needed: tx.fee,
            available: balance,
        });
    }

    Ok(())
}

/// Admissibility of an allowance-backed transfer.
pub fn validate_transfer_from(
    ledger: &TokenLedger,
    tx: &TransferFromTx,
    spender: &Credential,
) -> Result<(), GovernanceError> {
    if tx.amount == 0 {
        return Err(GovernanceError::InvalidTransaction(
            "transfer amount must be greater than zero".into(),
        ));
    }
    if tx.from == tx.recipient {
        return Err(GovernanceError::InvalidTransaction(
            "cannot transfer to the same address".into(),
        ));
    }

    let spender_balance = ledger.balance_of(spender);
    if spender_balance < tx.fee {
        return Err(GovernanceError::InsufficientTokens {
            needed: tx.fee,
            available: spender_balance,
        });
    }

    let from_balance = ledger.balance_of(&tx.from);
    if from_balance < tx.amount {
        return Err(GovernanceError::InsufficientTokens {
            needed: tx.amount,
            available: from_balance,
        });
    }

    let allowance = ledger.allowance_of(&tx.from, spender);
    if allowance < tx.amount {
        return Err(GovernanceError::Ledger(LedgerError::InsufficientAllowance {
            needed: tx.amount,
            available: allowance,
        }));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{Proposal, Vote, VoteResults};
    use agora_types::{ContentHash, VoteChoice, VotingType};

    fn cred(n: u8) -> Credential {
        Credential::new([n; 32])
    }

    fn content_hash(n: u8) -> ContentHash {
        ContentHash::new([n; 32])
    }

    fn ledger_with(entries: &[(u8, u64)]) -> TokenLedger {
        let mut ledger = TokenLedger::new("AGR", "Agora Governance Token", 6);
        for (n, amount) in entries {
            ledger.mint(&cred(*n), *amount).unwrap();
        }
        ledger
    }

    fn proposal_tx() -> ProposalTx {
        ProposalTx {
            fee: 10,
            title: "Fund the integration test suite".into(),
            description: "Allocate budget for continuous integration".into(),
            proposal_type: ProposalType::General,
            voting_type: VotingType::Simple,
            start_time: Timestamp::new(1000),
            end_time: Timestamp::new(1000 + 86_400),
            threshold_bps: 5100,
            metadata: None,
        }
    }

    fn store_with_active_proposal(id: ContentHash, voting_type: VotingType) -> GovernanceStore {
        let mut store = GovernanceStore::new();
        store.proposals.insert(
            id,
            Proposal {
                id,
                creator: cred(9),
                title: "t".into(),
                description: "d".into(),
                proposal_type: ProposalType::General,
                voting_type,
                start_time: Timestamp::new(1000),
                end_time: Timestamp::new(2000),
                status: ProposalStatus::Active,
                threshold_bps: 5100,
                results: VoteResults::default(),
                metadata: None,
            },
        );
        store.votes.insert(id, Default::default());
        store
    }

    #[test]
    fn test_proposal_requires_minimum_balance() {
        let store = GovernanceStore::new();
        let ledger = ledger_with(&[(1, 999)]);
        let result = validate_proposal(&store, &ledger, &proposal_tx(), &cred(1));
        assert_eq!(
            result,
            Err(GovernanceError::InsufficientTokens {
                needed: 1000,
                available: 999
            })
        );
    }

    #[test]
    fn test_proposal_title_bounds() {
        let store = GovernanceStore::new();
        let ledger = ledger_with(&[(1, 10_000)]);

        let mut tx = proposal_tx();
        tx.title = String::new();
        assert!(matches!(
            validate_proposal(&store, &ledger, &tx, &cred(1)),
            Err(GovernanceError::InvalidProposal(_))
        ));

        tx.title = "x".repeat(201);
        assert!(matches!(
            validate_proposal(&store, &ledger, &tx, &cred(1)),
            Err(GovernanceError::InvalidProposal(_))
        ));
    }

    #[test]
    fn test_proposal_timeframe_rules() {
        let store = GovernanceStore::new();
        let ledger = ledger_with(&[(1, 10_000)]);

        let mut tx = proposal_tx();
        tx.end_time = tx.start_time;
        assert!(matches!(
            validate_proposal(&store, &ledger, &tx, &cred(1)),
            Err(GovernanceError::InvalidTimeframe(_))
        ));

        let mut tx = proposal_tx();
        tx.end_time = tx.start_time.plus(86_399);
        assert!(matches!(
            validate_proposal(&store, &ledger, &tx, &cred(1)),
            Err(GovernanceError::InvalidTimeframe(_))
        ));
    }

    #[test]
    fn test_proposal_threshold_bounds() {
        let store = GovernanceStore::new();
        let ledger = ledger_with(&[(1, 10_000)]);

        for bad in [0, 10_001] {
            let mut tx = proposal_tx();
            tx.threshold_bps = bad;
            assert!(matches!(
                validate_proposal(&store, &ledger, &tx, &cred(1)),
                Err(GovernanceError::InvalidProposal(_))
            ));
        }
    }

    #[test]
    fn test_treasury_proposal_needs_higher_threshold() {
        let store = GovernanceStore::new();
        let ledger = ledger_with(&[(1, 3000)]);
        let mut tx = proposal_tx();
        tx.proposal_type = ProposalType::Treasury;
        assert_eq!(
            validate_proposal(&store, &ledger, &tx, &cred(1)),
            Err(GovernanceError::InsufficientTokens {
                needed: 5000,
                available: 3000
            })
        );
    }

    #[test]
    fn test_valid_proposal_passes() {
        let store = GovernanceStore::new();
        let ledger = ledger_with(&[(1, 10_000)]);
        assert!(validate_proposal(&store, &ledger, &proposal_tx(), &cred(1)).is_ok());
    }

    #[test]
    fn test_vote_on_missing_proposal() {
        let store = GovernanceStore::new();
        let ledger = ledger_with(&[(1, 1000)]);
        let tx = VoteTx {
            fee: 0,
            proposal_id: content_hash(7),
            choice: VoteChoice::Yes,
            weight: 10,
            reason: None,
        };
        assert_eq!(
            validate_vote(&store, &ledger, &tx, &cred(1), 0, Timestamp::new(1500)),
            Err(GovernanceError::ProposalNotFound(content_hash(7)))
        );
    }

    #[test]
    fn test_vote_time_window() {
        let id = content_hash(1);
        let store = store_with_active_proposal(id, VotingType::Simple);
        let ledger = ledger_with(&[(1, 1000)]);
        let tx = VoteTx {
            fee: 0,
            proposal_id: id,
            choice: VoteChoice::Yes,
            weight: 10,
            reason: None,
        };

        assert_eq!(
            validate_vote(&store, &ledger, &tx, &cred(1), 0, Timestamp::new(999)),
            Err(GovernanceError::VotingNotStarted)
        );
        assert!(matches!(
            validate_vote(&store, &ledger, &tx, &cred(1), 0, Timestamp::new(2001)),
            Err(GovernanceError::VotingClosed(_))
        ));
        assert!(validate_vote(&store, &ledger, &tx, &cred(1), 0, Timestamp::new(1500)).is_ok());
    }

    #[test]
    fn test_vote_requires_active_status() {
        let id = content_hash(1);
        let mut store = store_with_active_proposal(id, VotingType::Simple);
        store.proposals.get_mut(&id).unwrap().status = ProposalStatus::Pending;
        let ledger = ledger_with(&[(1, 1000)]);
        let tx = VoteTx {
            fee: 0,
            proposal_id: id,
            choice: VoteChoice::Yes,
            weight: 10,
            reason: None,
        };
        assert!(matches!(
            validate_vote(&store, &ledger, &tx, &cred(1), 0, Timestamp::new(1500)),
            Err(GovernanceError::VotingClosed(_))
        ));
    }

    #[test]
    fn test_duplicate_vote_names_prior_choice() {
        let id = content_hash(1);
        let mut store = store_with_active_proposal(id, VotingType::Simple);
        store.votes.get_mut(&id).unwrap().insert(
            cred(1),
            Vote {
                voter: cred(1),
                choice: VoteChoice::No,
                weight: 5,
                cast_at: Timestamp::new(1200),
                reason: None,
            },
        );
        let ledger = ledger_with(&[(1, 1000)]);
        let tx = VoteTx {
            fee: 0,
            proposal_id: id,
            choice: VoteChoice::Yes,
            weight: 10,
            reason: None,
        };

        let err =
            validate_vote(&store, &ledger, &tx, &cred(1), 0, Timestamp::new(1500)).unwrap_err();
        assert_eq!(
            err,
            GovernanceError::DuplicateVote {
                prior: VoteChoice::No
            }
        );
        assert!(err.to_string().contains("NO"));
    }

    #[test]
    fn test_vote_zero_weight_rejected() {
        let id = content_hash(1);
        let store = store_with_active_proposal(id, VotingType::Simple);
        let ledger = ledger_with(&[(1, 1000)]);
        let tx = VoteTx {
            fee: 0,
            proposal_id: id,
            choice: VoteChoice::Yes,
            weight: 0,
            reason: None,
        };
        assert!(matches!(
            validate_vote(&store, &ledger, &tx, &cred(1), 0, Timestamp::new(1500)),
            Err(GovernanceError::InvalidTransaction(_))
        ));
    }

    #[test]
    fn test_vote_with_no_tokens_rejected() {
        let id = content_hash(1);
        let store = store_with_active_proposal(id, VotingType::Simple);
        let ledger = ledger_with(&[]);
        let tx = VoteTx {
            fee: 0,
            proposal_id: id,
            choice: VoteChoice::Yes,
            weight: 10,
            reason: None,
        };
        assert_eq!(
            validate_vote(&store, &ledger, &tx, &cred(1), 0, Timestamp::new(1500)),
            Err(GovernanceError::InsufficientTokens {
                needed: 1,
                available: 0
            })
        );
    }

    #[test]
    fn test_delegation_revoke_requires_active() {
        let store = GovernanceStore::new();
        let ledger = ledger_with(&[(1, 1000)]);
        let tx = DelegationTx {
            fee: 0,
            delegate: cred(2),
            duration_secs: 0,
            revoke: true,
        };
        assert!(matches!(
            validate_delegation(&store, &ledger, &tx, &cred(1), Timestamp::new(100)),
            Err(GovernanceError::InvalidDelegation(_))
        ));
    }

    #[test]
    fn test_delegation_self_and_duration_rules() {
        let store = GovernanceStore::new();
        let ledger = ledger_with(&[(1, 1000), (2, 1000)]);

        let tx = DelegationTx {
            fee: 0,
            delegate: cred(1),
            duration_secs: 3600,
            revoke: false,
        };
        assert!(matches!(
            validate_delegation(&store, &ledger, &tx, &cred(1), Timestamp::new(100)),
            Err(GovernanceError::InvalidDelegation(_))
        ));

        let tx = DelegationTx {
            fee: 0,
            delegate: cred(2),
            duration_secs: MAX_DELEGATION_SECS + 1,
            revoke: false,
        };
        assert!(matches!(
            validate_delegation(&store, &ledger, &tx, &cred(1), Timestamp::new(100)),
            Err(GovernanceError::InvalidDelegation(_))
        ));

        let tx = DelegationTx {
            fee: 0,
            delegate: cred(2),
            duration_secs: 3600,
            revoke: false,
        };
        assert!(validate_delegation(&store, &ledger, &tx, &cred(1), Timestamp::new(100)).is_ok());
    }

    #[test]
    fn test_delegation_unknown_delegate() {
        let store = GovernanceStore::new();
        let ledger = ledger_with(&[(1, 1000)]);
        let tx = DelegationTx {
            fee: 0,
            delegate: cred(5),
            duration_secs: 3600,
            revoke: false,
        };
        assert!(matches!(
            validate_delegation(&store, &ledger, &tx, &cred(1), Timestamp::new(100)),
            Err(GovernanceError::InvalidDelegation(_))
        ));
    }

    #[test]
    fn test_delegation_rejects_second_active() {
        let mut store = GovernanceStore::new();
        store.delegations.insert(
            cred(1),
            crate::store::Delegation {
                delegator: cred(1),
                delegate: cred(2),
                start_time: Timestamp::new(0),
                end_time: Timestamp::new(10_000),
                active: true,
            },
        );
        let ledger = ledger_with(&[(1, 1000), (2, 1000), (3, 1000)]);
        let tx = DelegationTx {
            fee: 0,
            delegate: cred(3),
            duration_secs: 3600,
            revoke: false,
        };
        assert!(matches!(
            validate_delegation(&store, &ledger, &tx, &cred(1), Timestamp::new(100)),
            Err(GovernanceError::InvalidDelegation(_))
        ));
    }

    fn treasury_store(signers: &[u8], balance: u64) -> GovernanceStore {
        let mut store = GovernanceStore::new();
        store.treasury.signers = signers.iter().map(|n| cred(*n)).collect();
        store.treasury.required_sigs = signers.len().min(2) as u8;
        store.treasury.balance = balance;
        store
    }

    #[test]
    fn test_treasury_amount_rules() {
        let store = treasury_store(&[10, 11], 1000);
        let ledger = ledger_with(&[(1, 100)]);

        let tx = TreasuryTx {
            fee: 0,
            recipient: cred(9),
            amount: 0,
            purpose: "grants".into(),
            signatures: vec![],
            required_sigs: 2,
        };
        assert!(matches!(
            validate_treasury(&store, &ledger, &tx, &cred(1)),
            Err(GovernanceError::InvalidTransaction(_))
        ));

        let tx = TreasuryTx {
            amount: 2000,
            ..tx
        };
        assert_eq!(
            validate_treasury(&store, &ledger, &tx, &cred(1)),
            Err(GovernanceError::TreasuryInsufficientFunds {
                needed: 2000,
                available: 1000
            })
        );
    }

    #[test]
    fn test_treasury_required_sigs_bounds() {
        let store = treasury_store(&[10, 11], 1000);
        let ledger = ledger_with(&[(1, 100)]);

        let tx = TreasuryTx {
            fee: 0,
            recipient: cred(9),
            amount: 500,
            purpose: "grants".into(),
            signatures: vec![],
            required_sigs: 3,
        };
        assert!(matches!(
            validate_treasury(&store, &ledger, &tx, &cred(1)),
            Err(GovernanceError::InvalidSignature(_))
        ));

        let tx = TreasuryTx {
            required_sigs: 0,
            ..tx
        };
        assert!(matches!(
            validate_treasury(&store, &ledger, &tx, &cred(1)),
            Err(GovernanceError::InvalidSignature(_))
        ));
    }

    #[test]
    fn test_treasury_attached_signature_vetting() {
        let store = treasury_store(&[10, 11], 1000);
        let ledger = ledger_with(&[(1, 100)]);
        let base = TreasuryTx {
            fee: 0,
            recipient: cred(9),
            amount: 500,
            purpose: "grants".into(),
            signatures: vec![],
            required_sigs: 2,
        };

        // All-zero signature bytes are structurally invalid.
        let tx = TreasuryTx {
            signatures: vec![agora_transactions::SignerSignature {
                signer: cred(10),
                signature: agora_types::Signature::ZERO,
            }],
            ..base.clone()
        };
        assert!(matches!(
            validate_treasury(&store, &ledger, &tx, &cred(1)),
            Err(GovernanceError::InvalidSignature(_))
        ));

        // Unauthorized signer.
        let tx = TreasuryTx {
            signatures: vec![agora_transactions::SignerSignature {
                signer: cred(42),
                signature: agora_types::Signature([1; 64]),
            }],
            ..base.clone()
        };
        assert!(matches!(
            validate_treasury(&store, &ledger, &tx, &cred(1)),
            Err(GovernanceError::Unauthorized(_))
        ));

        // Same signer twice.
        let tx = TreasuryTx {
            signatures: vec![
                agora_transactions::SignerSignature {
                    signer: cred(10),
                    signature: agora_types::Signature([1; 64]),
                },
                agora_transactions::SignerSignature {
                    signer: cred(10),
                    signature: agora_types::Signature([2; 64]),
                },
            ],
            ..base
        };
        assert_eq!(
            validate_treasury(&store, &ledger, &tx, &cred(1)),
            Err(GovernanceError::DuplicateSignature(cred(10)))
        );
    }

    #[test]
    fn test_transfer_rules() {
        let ledger = ledger_with(&[(1, 100)]);

        let tx = TransferTx {
            fee: 1,
            recipient: cred(1),
            amount: 10,
        };
        assert!(matches!(
            validate_transfer(&ledger, &tx, &cred(1)),
            Err(GovernanceError::InvalidTransaction(_))
        ));

        let tx = TransferTx {
            fee: 1,
            recipient: cred(2),
            amount: 100,
        };
        assert_eq!(
            validate_transfer(&ledger, &tx, &cred(1)),
            Err(GovernanceError::InsufficientTokens {
                needed: 101,
                available: 100
            })
        );
    }

    #[test]
    fn test_mint_rules() {
        let ledger = ledger_with(&[(1, 100)]);

        // Unknown minter is unauthorized.
        let tx = MintTx {
            fee: 0,
            recipient: cred(2),
            amount: 10,
            reason: "rewards".into(),
        };
        assert!(matches!(
            validate_mint(&ledger, &tx, &cred(5)),
            Err(GovernanceError::Unauthorized(_))
        ));

        // Supply overflow.
        let ledger_full = ledger_with(&[(1, u64::MAX)]);
        let tx = MintTx {
            fee: 0,
            recipient: cred(2),
            amount: 1,
            reason: "rewards".into(),
        };
        assert_eq!(
            validate_mint(&ledger_full, &tx, &cred(1)),
            Err(GovernanceError::Ledger(LedgerError::SupplyOverflow))
        );
    }

    #[test]
    fn test_transfer_from_checks_allowance() {
        let mut ledger = ledger_with(&[(1, 1000), (2, 50)]);
        ledger.approve(&cred(1), &cred(2), 100);

        let tx = TransferFromTx {
            fee: 0,
            from: cred(1),
            recipient: cred(3),
            amount: 200,
        };
        assert_eq!(
            validate_transfer_from(&ledger, &tx, &cred(2)),
            Err(GovernanceError::Ledger(LedgerError::InsufficientAllowance {
                needed: 200,
                available: 100
            }))
        );

        let tx = TransferFromTx { amount: 100, ..tx };
        assert!(validate_transfer_from(&ledger, &tx, &cred(2)).is_ok());
    }
}
