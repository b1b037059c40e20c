//! The voting weight/cost engine.
//!
//! Voting *influence* and voting *price* are computed separately per
//! mechanism, so quadratic (anti-plutocracy) and reputation-gated
//! (expertise-weighted) governance share one tally path. Given a
//! requested weight, this module answers: how much does the ballot count
//! for, and how many tokens does it cost — or why is it inadmissible.
//!
//! All arithmetic is checked or widened; an overflowing cost is a typed
//! rejection, never a wrap.

use crate::error::GovernanceError;
use agora_types::VotingType;

/// Compute `(effective_weight, cost)` for a vote.
///
/// The flat transaction `fee` is not part of the returned cost but is
/// included in every affordability check, so a vote that validates here
/// can always pay both.
///
/// | mechanism  | effective weight | cost |
/// |------------|------------------|------|
/// | Simple     | weight           | weight |
/// | Quadratic  | weight           | weight² |
/// | Weighted   | weight (≤ balance) | weight |
/// | Reputation | weight (≤ reputation) | balance·weight / (reputation·10), min 1 |
pub fn weight_and_cost(
    voting_type: VotingType,
    weight: u64,
    fee: u64,
    balance: u64,
    reputation: u64,
) -> Result<(u64, u64), GovernanceError> {
    match voting_type {
        VotingType::Simple => {
            let total = weight.checked_add(fee).ok_or(GovernanceError::Overflow)?;
            if total > balance {
                return Err(GovernanceError::InsufficientTokens {
                    needed: total,
                    available: balance,
                });
            }
            Ok((weight, weight))
        }

        VotingType::Quadratic => {
            let cost = weight
                .checked_mul(weight)
                .ok_or(GovernanceError::Overflow)?;
            let total = cost.checked_add(fee).ok_or(GovernanceError::Overflow)?;
            if total > balance {
                return Err(GovernanceError::InsufficientTokens {
                    needed: total,
                    available: balance,
                });
            }
            Ok((weight, cost))
        }

        VotingType::Weighted => {
            if weight > balance {
                return Err(GovernanceError::InsufficientTokens {
                    needed: weight,
                    available: balance,
                });
            }
            let total = weight.checked_add(fee).ok_or(GovernanceError::Overflow)?;
            if total > balance {
                return Err(GovernanceError::InsufficientTokens {
                    needed: total,
                    available: balance,
                });
            }
            Ok((weight, weight))
        }

        VotingType::Reputation => {
            if reputation == 0 {
                return Err(GovernanceError::InsufficientReputation {
                    needed: weight.max(1),
                    available: 0,
                });
            }
            if weight > reputation {
                return Err(GovernanceError::InsufficientReputation {
                    needed: weight,
                    available: reputation,
                });
            }
            // Cost is the fraction of reputation being spent, applied to a
            // tenth of the balance: balance·weight / (reputation·10),
            // computed in u128 so the product cannot overflow. Bounded by
            // balance/10 since weight ≤ reputation.
            let raw = (balance as u128 * weight as u128) / (reputation as u128 * 10);
            let cost = (raw as u64).max(1);
            let total = cost.checked_add(fee).ok_or(GovernanceError::Overflow)?;
            if total > balance {
                return Err(GovernanceError::InsufficientTokens {
                    needed: total,
                    available: balance,
                });
            }
            Ok((weight, cost))
        }
    }
}
