//! Governance-token ledger for the agora DAO.
//!
//! A balance/allowance store with whole-unit integer arithmetic and
//! explicit mint/burn accounting. The conservation invariant the rest of
//! the system relies on:
//!
//! `Σ balances + treasury balance = minted_total − burned_total`
//!
//! where the treasury balance is tracked by the governance store. Tokens
//! move into such external pools via [`TokenLedger::debit`] and back via
//! [`TokenLedger::credit`]; both sides of every other operation stay
//! inside the balance map.

pub mod error;
pub mod ledger;

pub use error::LedgerError;
pub use ledger::TokenLedger;
