//! Authorization gate boundary.
//!
//! The host may interpose a role/permission system in front of every
//! transaction; the core only defines the permission vocabulary and asks
//! the gate before dispatching. Gate denial is independent of — and
//! checked before — the core's own validation. The default gate allows
//! everything.

use agora_transactions::TxKind;
use agora_types::Credential;

/// Permission required for a transaction kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Permission {
    CreateProposal,
    Vote,
    Delegate,
    ManageTreasury,
    MintTokens,
    BurnTokens,
    TransferTokens,
    ApproveTokens,
}

impl Permission {
    /// The permission gating a given transaction kind.
    pub fn for_kind(kind: TxKind) -> Self {
        match kind {
            TxKind::Proposal => Self::CreateProposal,
            TxKind::Vote => Self::Vote,
            TxKind::Delegation => Self::Delegate,
            TxKind::Treasury => Self::ManageTreasury,
            TxKind::Mint => Self::MintTokens,
            TxKind::Burn => Self::BurnTokens,
            TxKind::Transfer | TxKind::TransferFrom => Self::TransferTokens,
            TxKind::Approve => Self::ApproveTokens,
        }
    }
}

/// Host-provided authorization gate.
pub trait AccessGate: Send + Sync {
    fn allows(&self, actor: &Credential, permission: Permission) -> bool;
}

/// Default gate: every actor holds every permission.
#[derive(Clone, Copy, Debug, Default)]
pub struct AllowAll;

impl AccessGate for AllowAll {
    fn allows(&self, _actor: &Credential, _permission: Permission) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_permission_mapping_covers_token_ops() {
        assert_eq!(
            Permission::for_kind(TxKind::Transfer),
            Permission::TransferTokens
        );
        assert_eq!(
            Permission::for_kind(TxKind::TransferFrom),
            Permission::TransferTokens
        );
        assert_eq!(Permission::for_kind(TxKind::Treasury), Permission::ManageTreasury);
    }

    #[test]
    fn test_allow_all_allows() {
        let gate = AllowAll;
        assert!(gate.allows(&Credential::new([1; 32]), Permission::MintTokens));
    }
}
