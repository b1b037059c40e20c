//! Vote transactions.

use agora_types::{ContentHash, VoteChoice};
use serde::{Deserialize, Serialize};

/// A ballot cast on an active proposal.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct VoteTx {
    pub fee: u64,
    pub proposal_id: ContentHash,
    pub choice: VoteChoice,
    /// Requested vote weight. How much this counts for — and what it
    /// costs — depends on the proposal's voting mechanism.
    pub weight: u64,
    /// Optional free-text justification, recorded verbatim on the ballot.
    pub reason: Option<String>,
}
