use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LedgerError {
    #[error("insufficient balance: need {needed}, have {available}")]
    InsufficientBalance { needed: u64, available: u64 },

    #[error("insufficient allowance: need {needed}, have {available}")]
    InsufficientAllowance { needed: u64, available: u64 },

    #[error("mint would overflow total supply")]
    SupplyOverflow,

    #[error("credit would overflow recipient balance")]
    BalanceOverflow,
}
