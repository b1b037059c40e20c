//! Delegation transactions.

use agora_types::Credential;
use serde::{Deserialize, Serialize};

/// Delegate voting power to another member, or revoke an active
/// delegation.
///
/// When `revoke` is true, `delegate` and `duration_secs` are ignored; the
/// delegator's currently active delegation is deactivated in place,
/// preserving the record for history.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DelegationTx {
    pub fee: u64,
    pub delegate: Credential,
    /// Delegation window in seconds, at most one year.
    pub duration_secs: u64,
    pub revoke: bool,
}
