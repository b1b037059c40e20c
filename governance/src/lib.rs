//! DAO governance core for the agora protocol.
//!
//! Turns signed governance transactions into deterministic updates to
//! proposals, votes, delegated voting power and a multi-signature
//! treasury. Designed for sequential, single-writer transaction replay:
//! every operation is validated against the current state before the
//! first mutation, so a rejected transaction leaves no trace.
//!
//! Layering, leaves first:
//! - [`store`] — the authoritative in-memory state (pure data)
//! - [`validator`] — stateless admissibility predicates
//! - [`voting`] — the four voting weight/cost mechanisms
//! - [`processor`] — the only mutation path
//! - [`delegation`] — delegated voting-power queries
//! - [`treasury`] — multi-signature payout workflow
//! - [`manager`] — proposal orchestration, queries and statistics
//! - [`dao`] — the facade tying it together with the injected clock and
//!   collaborator boundaries ([`reputation`], [`access`])

pub mod access;
pub mod dao;
pub mod delegation;
pub mod error;
pub mod manager;
pub mod processor;
pub mod reputation;
pub mod store;
pub mod treasury;
pub mod validator;
pub mod voting;

pub use access::{AccessGate, AllowAll, Permission};
pub use dao::Dao;
pub use error::GovernanceError;
pub use manager::{
    ExecutionHooks, NoopHooks, ProposalManager, ProposalStatistics, VoterInfo, VotingProgress,
};
pub use processor::Processor;
pub use reputation::{ReputationOracle, ReputationParams, StandardReputation};
pub use store::{
    Delegation, GovernanceConfig, GovernanceStore, PendingTx, Proposal, TokenHolder,
    TreasuryState, Vote, VoteResults,
};
pub use treasury::TreasuryManager;
