//! Governance-token ledger transactions.

use agora_types::Credential;
use serde::{Deserialize, Serialize};

/// Mint new governance tokens to a recipient.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MintTx {
    pub fee: u64,
    pub recipient: Credential,
    pub amount: u64,
    /// Why the mint happened, 1–200 characters.
    pub reason: String,
}

/// Burn governance tokens from the signer's own balance.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BurnTx {
    pub fee: u64,
    pub amount: u64,
    /// Why the burn happened, 1–200 characters.
    pub reason: String,
}

/// Transfer governance tokens from the signer to a recipient.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TransferTx {
    pub fee: u64,
    pub recipient: Credential,
    pub amount: u64,
}

/// Approve a spender to spend tokens on the signer's behalf.
///
/// An amount of zero revokes the approval.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ApproveTx {
    pub fee: u64,
    pub spender: Credential,
    pub amount: u64,
}

/// Transfer tokens out of `from`'s balance using the signer's allowance.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TransferFromTx {
    pub fee: u64,
    pub from: Credential,
    pub recipient: Credential,
    pub amount: u64,
}
