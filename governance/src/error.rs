use agora_ledger::LedgerError;
use agora_types::{ContentHash, Credential, VoteChoice};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GovernanceError {
    #[error("insufficient tokens: need {needed}, have {available}")]
    InsufficientTokens { needed: u64, available: u64 },

    #[error("vote weight {needed} exceeds reputation {available}")]
    InsufficientReputation { needed: u64, available: u64 },

    #[error("proposal {0} not found")]
    ProposalNotFound(ContentHash),

    #[error("voting period has not started")]
    VotingNotStarted,

    #[error("voting is closed: {0}")]
    VotingClosed(&'static str),

    #[error("unauthorized: {0}")]
    Unauthorized(String),

    #[error("invalid signature: {0}")]
    InvalidSignature(String),

    #[error("duplicate signature from treasury signer {0}")]
    DuplicateSignature(Credential),

    #[error("insufficient treasury funds: need {needed}, have {available}")]
    TreasuryInsufficientFunds { needed: u64, available: u64 },

    #[error("invalid proposal: {0}")]
    InvalidProposal(String),

    #[error("voter has already cast a {} vote on this proposal", .prior.label())]
    DuplicateVote { prior: VoteChoice },

    #[error("invalid delegation: {0}")]
    InvalidDelegation(String),

    #[error("invalid timeframe: {0}")]
    InvalidTimeframe(String),

    #[error("invalid transaction: {0}")]
    InvalidTransaction(String),

    #[error("treasury transaction {0} not found")]
    TreasuryTxNotFound(ContentHash),

    #[error("treasury transaction has expired")]
    TreasuryTxExpired,

    #[error("treasury transaction already executed")]
    TreasuryTxExecuted,

    #[error("arithmetic overflow")]
    Overflow,

    #[error(transparent)]
    Ledger(#[from] LedgerError),
}
