//! Treasury payout transactions.

use agora_types::{Credential, Signature};
use serde::{Deserialize, Serialize};

/// A signer's approval of a treasury payout.
///
/// The credential identifies which authorized signer produced the
/// signature; signatures are de-duplicated by credential when counted
/// toward the execution threshold.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct SignerSignature {
    pub signer: Credential,
    pub signature: Signature,
}

/// Queue a multi-signature treasury payout.
///
/// The payout executes automatically once `required_sigs` distinct
/// authorized signers have signed, and expires if the threshold is not
/// reached in time.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TreasuryTx {
    pub fee: u64,
    pub recipient: Credential,
    pub amount: u64,
    /// Human-readable purpose, 1–500 characters.
    pub purpose: String,
    /// Approvals already collected at submission time (may be empty).
    pub signatures: Vec<SignerSignature>,
    pub required_sigs: u8,
}
