//! All agora DAO transaction payloads.
//!
//! Transaction kinds:
//! - **Proposal**: Create a governance proposal
//! - **Vote**: Cast a ballot on an active proposal
//! - **Delegation**: Delegate voting power to another member, or revoke
//! - **Treasury**: Queue a multi-signature treasury payout
//! - **Mint / Burn / Transfer / Approve / TransferFrom**: Governance-token
//!   ledger operations
//!
//! Payloads carry only what the submitter asserts. The signer credential
//! and the transaction id are supplied by the host ledger alongside the
//! payload — they are authenticated by the outer transaction envelope and
//! never duplicated inside it.

pub mod delegation;
pub mod proposal;
pub mod token;
pub mod treasury;
pub mod vote;

use serde::{Deserialize, Serialize};
use std::fmt;

pub use delegation::DelegationTx;
pub use proposal::ProposalTx;
pub use token::{ApproveTx, BurnTx, MintTx, TransferFromTx, TransferTx};
pub use treasury::{SignerSignature, TreasuryTx};
pub use vote::VoteTx;

/// The unified transaction enum wrapping every DAO transaction kind.
///
/// Dispatched through exactly one exhaustive match in the governance
/// facade.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum DaoTransaction {
    Proposal(ProposalTx),
    Vote(VoteTx),
    Delegation(DelegationTx),
    Treasury(TreasuryTx),
    Mint(MintTx),
    Burn(BurnTx),
    Transfer(TransferTx),
    Approve(ApproveTx),
    TransferFrom(TransferFromTx),
}

/// Discriminant of a [`DaoTransaction`], used for permission checks and
/// log events.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TxKind {
    Proposal,
    Vote,
    Delegation,
    Treasury,
    Mint,
    Burn,
    Transfer,
    Approve,
    TransferFrom,
}

impl DaoTransaction {
    /// The flat transaction fee asserted by the submitter.
    pub fn fee(&self) -> u64 {
        match self {
            Self::Proposal(tx) => tx.fee,
            Self::Vote(tx) => tx.fee,
            Self::Delegation(tx) => tx.fee,
            Self::Treasury(tx) => tx.fee,
            Self::Mint(tx) => tx.fee,
            Self::Burn(tx) => tx.fee,
            Self::Transfer(tx) => tx.fee,
            Self::Approve(tx) => tx.fee,
            Self::TransferFrom(tx) => tx.fee,
        }
    }

    /// The kind discriminant of this transaction.
    pub fn kind(&self) -> TxKind {
        match self {
            Self::Proposal(_) => TxKind::Proposal,
            Self::Vote(_) => TxKind::Vote,
            Self::Delegation(_) => TxKind::Delegation,
            Self::Treasury(_) => TxKind::Treasury,
            Self::Mint(_) => TxKind::Mint,
            Self::Burn(_) => TxKind::Burn,
            Self::Transfer(_) => TxKind::Transfer,
            Self::Approve(_) => TxKind::Approve,
            Self::TransferFrom(_) => TxKind::TransferFrom,
        }
    }
}

impl fmt::Display for TxKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Proposal => "proposal",
            Self::Vote => "vote",
            Self::Delegation => "delegation",
            Self::Treasury => "treasury",
            Self::Mint => "mint",
            Self::Burn => "burn",
            Self::Transfer => "transfer",
            Self::Approve => "approve",
            Self::TransferFrom => "transfer_from",
        };
        write!(f, "{}", name)
    }
}
