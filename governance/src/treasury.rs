//! Multi-signature treasury workflow.
//!
//! Payouts are queued as pending transactions, collect approvals from
//! authorized signers — at most one per signer — and execute
//! automatically and atomically the moment the threshold is reached:
//! debit treasury, credit recipient, mark executed. Expired requests
//! that never reached the threshold are swept by [`TreasuryManager::cleanup_expired`].

use crate::error::GovernanceError;
use crate::store::{GovernanceStore, PendingTx};
use crate::validator;
use agora_ledger::TokenLedger;
use agora_transactions::{SignerSignature, TreasuryTx};
use agora_types::{ContentHash, Credential, Signature, Timestamp};

/// How long a pending treasury transaction may collect signatures.
pub const PENDING_TX_EXPIRY_SECS: u64 = 86_400;

/// Insert a fresh pending transaction with no signatures.
pub(crate) fn create_pending(
    store: &mut GovernanceStore,
    tx: &TreasuryTx,
    tx_id: ContentHash,
    now: Timestamp,
) {
    store.treasury.transactions.insert(
        tx_id,
        PendingTx {
            id: tx_id,
            recipient: tx.recipient,
            amount: tx.amount,
            purpose: tx.purpose.clone(),
            signatures: Vec::new(),
            created_at: now,
            expires_at: now.plus(PENDING_TX_EXPIRY_SECS),
            executed: false,
        },
    );
}

/// Execute a pending transaction: debit treasury, credit recipient,
/// flag executed. The recipient credit is the only fallible step and
/// runs before any write takes effect.
pub(crate) fn execute_pending(
    store: &mut GovernanceStore,
    ledger: &mut TokenLedger,
    tx_id: &ContentHash,
    now: Timestamp,
) -> Result<(), GovernanceError> {
    let pending = store
        .treasury
        .transactions
        .get(tx_id)
        .ok_or(GovernanceError::TreasuryTxNotFound(*tx_id))?;

    if pending.executed {
        return Err(GovernanceError::TreasuryTxExecuted);
    }
    if pending.is_expired(now) {
        return Err(GovernanceError::TreasuryTxExpired);
    }

    let recipient = pending.recipient;
    let amount = pending.amount;
    if store.treasury.balance < amount {
        return Err(GovernanceError::TreasuryInsufficientFunds {
            needed: amount,
            available: store.treasury.balance,
        });
    }

    ledger.credit(&recipient, amount)?;
    store.treasury.balance -= amount;
    if let Some(pending) = store.treasury.transactions.get_mut(tx_id) {
        pending.executed = true;
    }

    tracing::info!(tx = %tx_id, recipient = %recipient, amount, "treasury payout executed");
    Ok(())
}

/// Host-facing treasury operations, layered on the shared pending-tx
/// primitives.
pub struct TreasuryManager<'a> {
    store: &'a mut GovernanceStore,
    ledger: &'a mut TokenLedger,
}

impl<'a> TreasuryManager<'a> {
    pub fn new(store: &'a mut GovernanceStore, ledger: &'a mut TokenLedger) -> Self {
        Self { store, ledger }
    }

    /// Queue a payout request. Attached signatures were vetted by the
    /// validator; if they already meet the threshold the payout executes
    /// immediately.
    pub fn create(
        &mut self,
        tx: &TreasuryTx,
        submitter: &Credential,
        tx_id: ContentHash,
        now: Timestamp,
    ) -> Result<(), GovernanceError> {
        validator::validate_treasury(self.store, self.ledger, tx, submitter)?;
        if self.store.treasury.transactions.contains_key(&tx_id) {
            return Err(GovernanceError::InvalidTransaction(
                "treasury transaction id already exists".into(),
            ));
        }

        create_pending(self.store, tx, tx_id, now);
        if let Some(pending) = self.store.treasury.transactions.get_mut(&tx_id) {
            pending.signatures = tx.signatures.clone();
        }
        if tx.signatures.len() >= self.store.treasury.required_sigs as usize {
            execute_pending(self.store, self.ledger, &tx_id, now)?;
        }
        Ok(())
    }

    /// Record one signer's approval; executes the payout when the
    /// threshold is reached.
    ///
    /// A signer appearing twice is rejected — repeat signatures never
    /// count more than once toward the threshold.
    pub fn sign(
        &mut self,
        tx_id: &ContentHash,
        signer: &Credential,
        signature: Signature,
        now: Timestamp,
    ) -> Result<(), GovernanceError> {
        let pending = self
            .store
            .treasury
            .transactions
            .get(tx_id)
            .ok_or(GovernanceError::TreasuryTxNotFound(*tx_id))?;

        if pending.is_expired(now) {
            return Err(GovernanceError::TreasuryTxExpired);
        }
        if pending.executed {
            return Err(GovernanceError::TreasuryTxExecuted);
        }
        if !self.store.treasury.is_signer(signer) {
            return Err(GovernanceError::Unauthorized(format!(
                "{} is not an authorized treasury signer",
                signer
            )));
        }
        if !signature.is_structurally_valid() {
            return Err(GovernanceError::InvalidSignature(
                "signature bytes are empty".into(),
            ));
        }
        if pending.has_signed(signer) {
            return Err(GovernanceError::DuplicateSignature(*signer));
        }

        let required = self.store.treasury.required_sigs as usize;
        let signatures = match self.store.treasury.transactions.get_mut(tx_id) {
            Some(pending) => {
                pending.signatures.push(SignerSignature {
                    signer: *signer,
                    signature,
                });
                pending.signatures.len()
            }
            None => return Err(GovernanceError::TreasuryTxNotFound(*tx_id)),
        };
        tracing::debug!(tx = %tx_id, signer = %signer, signatures, required, "treasury signature added");

        if signatures >= required {
            execute_pending(self.store, self.ledger, tx_id, now)?;
        }
        Ok(())
    }

    /// Execute a payout that already has enough signatures.
    pub fn execute(
        &mut self,
        tx_id: &ContentHash,
        now: Timestamp,
    ) -> Result<(), GovernanceError> {
        let pending = self
            .store
            .treasury
            .transactions
            .get(tx_id)
            .ok_or(GovernanceError::TreasuryTxNotFound(*tx_id))?;

        if pending.signatures.len() < self.store.treasury.required_sigs as usize {
            return Err(GovernanceError::InvalidSignature(
                "insufficient signatures for execution".into(),
            ));
        }
        execute_pending(self.store, self.ledger, tx_id, now)
    }

    /// Remove pending transactions past expiry that never executed.
    /// Returns how many were removed.
    pub fn cleanup_expired(&mut self, now: Timestamp) -> usize {
        let before = self.store.treasury.transactions.len();
        self.store
            .treasury
            .transactions
            .retain(|_, tx| tx.executed || !tx.is_expired(now));
        before - self.store.treasury.transactions.len()
    }

    /// Move tokens from a holder's ledger balance into the treasury.
    pub fn deposit(&mut self, from: &Credential, amount: u64) -> Result<(), GovernanceError> {
        self.ledger.debit(from, amount)?;
        self.store.treasury.balance = self.store.treasury.balance.saturating_add(amount);
        tracing::debug!(from = %from, amount, "treasury deposit");
        Ok(())
    }

    /// Replace the signer set and required-signature count.
    pub fn update_signers(
        &mut self,
        signers: Vec<Credential>,
        required_sigs: u8,
    ) -> Result<(), GovernanceError> {
        if signers.is_empty() {
            return Err(GovernanceError::InvalidTransaction(
                "treasury must have at least one signer".into(),
            ));
        }
        if required_sigs == 0 || required_sigs as usize > signers.len() {
            return Err(GovernanceError::InvalidTransaction(
                "invalid required signatures count".into(),
            ));
        }
        self.store.treasury.signers = signers;
        self.store.treasury.required_sigs = required_sigs;
        Ok(())
    }

    pub fn balance(&self) -> u64 {
        self.store.treasury.balance
    }

    pub fn signers(&self) -> &[Credential] {
        &self.store.treasury.signers
    }

    pub fn required_sigs(&self) -> u8 {
        self.store.treasury.required_sigs
    }

    pub fn get(&self, tx_id: &ContentHash) -> Option<&PendingTx> {
        self.store.treasury.transactions.get(tx_id)
    }

    /// Transactions still collecting signatures.
    pub fn pending(&self, now: Timestamp) -> Vec<&PendingTx> {
        self.store
            .treasury
            .transactions
            .values()
            .filter(|tx| !tx.executed && !tx.is_expired(now))
            .collect()
    }

    /// Transactions that have executed.
    pub fn executed(&self) -> Vec<&PendingTx> {
        self.store
            .treasury
            .transactions
            .values()
            .filter(|tx| tx.executed)
            .collect()
    }

    /// Every recorded transaction, executed or not.
    pub fn history(&self) -> impl Iterator<Item = &PendingTx> {
        self.store.treasury.transactions.values()
    }
}
