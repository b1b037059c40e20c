//! Delegated voting-power queries.
//!
//! A member with a live delegation has transferred all voting power for
//! the window: their own power reads zero and the delegate's aggregate
//! grows by the delegator's balance. Aggregation uses the delegator's
//! *live* ledger balance, not a snapshot taken at delegation time — a
//! delegator who spends tokens after delegating deflates the delegate's
//! power immediately. Queries scan all delegations, which is fine at DAO
//! member-count scale.

use crate::store::{Delegation, GovernanceStore};
use agora_ledger::TokenLedger;
use agora_types::{Credential, Timestamp};

/// Whether `user` has a live delegation transferring their power away.
fn has_delegated_away(store: &GovernanceStore, user: &Credential, now: Timestamp) -> bool {
    store
        .delegations
        .get(user)
        .map(|delegation| delegation.is_live(now))
        .unwrap_or(false)
}

/// The member's own voting power: their balance, or zero while a live
/// delegation is transferring it away.
pub fn own_voting_power(
    store: &GovernanceStore,
    ledger: &TokenLedger,
    user: &Credential,
    now: Timestamp,
) -> u64 {
    if has_delegated_away(store, user, now) {
        return 0;
    }
    ledger.balance_of(user)
}

/// Total power currently delegated *to* `delegate` by others.
pub fn delegated_power(
    store: &GovernanceStore,
    ledger: &TokenLedger,
    delegate: &Credential,
    now: Timestamp,
) -> u64 {
    store
        .delegations
        .values()
        .filter(|delegation| delegation.delegate == *delegate && delegation.is_live(now))
        .map(|delegation| ledger.balance_of(&delegation.delegator))
        .sum()
}

/// Effective voting power: zero while delegated away, otherwise own
/// balance plus everything delegated in.
pub fn effective_voting_power(
    store: &GovernanceStore,
    ledger: &TokenLedger,
    user: &Credential,
    now: Timestamp,
) -> u64 {
    if has_delegated_away(store, user, now) {
        return 0;
    }
    ledger
        .balance_of(user)
        .saturating_add(delegated_power(store, ledger, user, now))
}

/// All delegations live at `now`.
pub fn active_delegations<'a>(store: &'a GovernanceStore, now: Timestamp) -> Vec<&'a Delegation> {
    store
        .delegations
        .values()
        .filter(|delegation| delegation.is_live(now))
        .collect()
}

/// All live delegations naming `delegate`.
pub fn delegations_to<'a>(
    store: &'a GovernanceStore,
    delegate: &Credential,
    now: Timestamp,
) -> Vec<&'a Delegation> {
    store
        .delegations
        .values()
        .filter(|delegation| delegation.delegate == *delegate && delegation.is_live(now))
        .collect()
}
