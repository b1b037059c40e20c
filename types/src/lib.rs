//! Fundamental types for the agora DAO core.
//!
//! This crate defines the types shared across every other crate in the
//! workspace: credentials, content hashes, signatures, timestamps, the
//! injected clock, and the governance enums.

pub mod credential;
pub mod hash;
pub mod signature;
pub mod state;
pub mod time;

pub use credential::{Credential, CredentialError};
pub use hash::ContentHash;
pub use signature::Signature;
pub use state::{ProposalStatus, ProposalType, VoteChoice, VotingType};
pub use time::{Clock, ManualClock, SystemClock, Timestamp};
