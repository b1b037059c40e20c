//! The token ledger proper.

use crate::error::LedgerError;
use agora_types::Credential;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The governance-token balance and allowance store.
///
/// All amounts are whole units (`u64`); arithmetic is checked so no
/// operation can wrap. Mutations either fully apply or return an error
/// with the ledger untouched.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TokenLedger {
    symbol: String,
    name: String,
    decimals: u8,
    total_supply: u64,
    minted_total: u64,
    burned_total: u64,
    balances: BTreeMap<Credential, u64>,
    allowances: BTreeMap<Credential, BTreeMap<Credential, u64>>,
}

impl TokenLedger {
    pub fn new(symbol: impl Into<String>, name: impl Into<String>, decimals: u8) -> Self {
        Self {
            symbol: symbol.into(),
            name: name.into(),
            decimals,
            total_supply: 0,
            minted_total: 0,
            burned_total: 0,
            balances: BTreeMap::new(),
            allowances: BTreeMap::new(),
        }
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn decimals(&self) -> u8 {
        self.decimals
    }

    pub fn total_supply(&self) -> u64 {
        self.total_supply
    }

    /// Total ever minted (monotonic).
    pub fn minted_total(&self) -> u64 {
        self.minted_total
    }

    /// Total ever burned (monotonic).
    pub fn burned_total(&self) -> u64 {
        self.burned_total
    }

    pub fn balance_of(&self, address: &Credential) -> u64 {
        self.balances.get(address).copied().unwrap_or(0)
    }

    /// Whether this address has ever held a balance entry.
    pub fn is_known(&self, address: &Credential) -> bool {
        self.balances.contains_key(address)
    }

    pub fn allowance_of(&self, owner: &Credential, spender: &Credential) -> u64 {
        self.allowances
            .get(owner)
            .and_then(|per_spender| per_spender.get(spender))
            .copied()
            .unwrap_or(0)
    }

    /// Sum of every balance in the ledger.
    pub fn circulating(&self) -> u64 {
        self.balances.values().sum()
    }

    /// Iterate over all (address, balance) entries in credential order.
    pub fn balances(&self) -> impl Iterator<Item = (&Credential, u64)> {
        self.balances.iter().map(|(addr, bal)| (addr, *bal))
    }

    /// Move `amount` from `from` to `to`.
    pub fn transfer(
        &mut self,
        from: &Credential,
        to: &Credential,
        amount: u64,
    ) -> Result<(), LedgerError> {
        let from_balance = self.balance_of(from);
        if from_balance < amount {
            return Err(LedgerError::InsufficientBalance {
                needed: amount,
                available: from_balance,
            });
        }
        let new_from = from_balance - amount;
        // Read the recipient side after the debit so a self-transfer
        // nets to zero instead of duplicating the amount.
        let to_balance = if to == from {
            new_from
        } else {
            self.balance_of(to)
        };
        let new_to = to_balance
            .checked_add(amount)
            .ok_or(LedgerError::BalanceOverflow)?;
        self.balances.insert(*from, new_from);
        self.balances.insert(*to, new_to);
        Ok(())
    }

    /// Set the allowance of `spender` over `owner`'s balance.
    ///
    /// An amount of zero revokes the approval.
    pub fn approve(&mut self, owner: &Credential, spender: &Credential, amount: u64) {
        self.allowances
            .entry(*owner)
            .or_default()
            .insert(*spender, amount);
    }

    /// Move `amount` from `from` to `to`, spending `spender`'s allowance.
    pub fn transfer_from(
        &mut self,
        spender: &Credential,
        from: &Credential,
        to: &Credential,
        amount: u64,
    ) -> Result<(), LedgerError> {
        let allowance = self.allowance_of(from, spender);
        if allowance < amount {
            return Err(LedgerError::InsufficientAllowance {
                needed: amount,
                available: allowance,
            });
        }
        self.transfer(from, to, amount)?;
        // Transfer succeeded, so the allowance entry exists and covers amount.
        if let Some(per_spender) = self.allowances.get_mut(from) {
            if let Some(remaining) = per_spender.get_mut(spender) {
                *remaining -= amount;
            }
        }
        Ok(())
    }

    /// Create `amount` new tokens in `to`'s balance.
    pub fn mint(&mut self, to: &Credential, amount: u64) -> Result<(), LedgerError> {
        let new_supply = self
            .total_supply
            .checked_add(amount)
            .ok_or(LedgerError::SupplyOverflow)?;
        let new_balance = self
            .balance_of(to)
            .checked_add(amount)
            .ok_or(LedgerError::BalanceOverflow)?;
        let new_minted = self
            .minted_total
            .checked_add(amount)
            .ok_or(LedgerError::SupplyOverflow)?;
        self.total_supply = new_supply;
        self.minted_total = new_minted;
        self.balances.insert(*to, new_balance);
        Ok(())
    }

    /// Destroy `amount` tokens from `from`'s balance.
    pub fn burn(&mut self, from: &Credential, amount: u64) -> Result<(), LedgerError> {
        let balance = self.balance_of(from);
        if balance < amount {
            return Err(LedgerError::InsufficientBalance {
                needed: amount,
                available: balance,
            });
        }
        self.balances.insert(*from, balance - amount);
        self.total_supply -= amount;
        self.burned_total = self.burned_total.saturating_add(amount);
        Ok(())
    }

    /// Remove `amount` from `from`'s balance without touching supply.
    ///
    /// The tokens move into a pool tracked outside the balance map (the
    /// treasury); the caller is responsible for crediting that pool.
    pub fn debit(&mut self, from: &Credential, amount: u64) -> Result<(), LedgerError> {
        let balance = self.balance_of(from);
        if balance < amount {
            return Err(LedgerError::InsufficientBalance {
                needed: amount,
                available: balance,
            });
        }
        self.balances.insert(*from, balance - amount);
        Ok(())
    }

    /// Add `amount` to `to`'s balance without touching supply.
    ///
    /// Counterpart of [`TokenLedger::debit`] — the tokens come out of an
    /// externally tracked pool.
    pub fn credit(&mut self, to: &Credential, amount: u64) -> Result<(), LedgerError> {
        let new_balance = self
            .balance_of(to)
            .checked_add(amount)
            .ok_or(LedgerError::BalanceOverflow)?;
        self.balances.insert(*to, new_balance);
        Ok(())
    }
}
