//! Proposal creation transactions.

use agora_types::{ContentHash, ProposalType, Timestamp, VotingType};
use serde::{Deserialize, Serialize};

/// A governance proposal transaction.
///
/// The proposal id is the host-assigned transaction id, not a payload
/// field. Title and description live on-chain; anything larger belongs in
/// the off-chain document referenced by `metadata`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ProposalTx {
    pub fee: u64,
    /// Short on-chain title, 1–200 characters.
    pub title: String,
    /// On-chain description, 1–10000 characters.
    pub description: String,
    pub proposal_type: ProposalType,
    pub voting_type: VotingType,
    /// When voting opens.
    pub start_time: Timestamp,
    /// When voting closes. Must leave at least the configured voting period
    /// after `start_time`.
    pub end_time: Timestamp,
    /// Pass threshold in basis points, in (0, 10000].
    pub threshold_bps: u64,
    /// Reference to off-chain metadata in the content-addressed document
    /// store. The core never inspects the content.
    pub metadata: Option<ContentHash>,
}
