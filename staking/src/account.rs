//! Per-account stake state and the accrual rule.

use crate::error::StakingError;
use crate::terms::StakingTerms;
use serde::{Deserialize, Serialize};
use tidelock_types::Timestamp;

/// Stake bookkeeping for a single account.
///
/// Lightweight: only principal, the accrual checkpoint, the reward already
/// flushed, and when the account first staked (the freeze-period anchor).
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StakeAccount {
    /// Locked stake-asset amount.
    pub principal: u128,
    /// Accrual has been flushed up to this point in time.
    pub checkpoint: Timestamp,
    /// Reward earned by already-flushed full ticks, not yet paid out.
    pub accrued_reward: u128,
    /// Sub-unit accrual carried between flushes, in hundredths of a reward
    /// unit (`principal × percent` raw units). Always `< 100`. Flushing in
    /// two steps credits exactly what one flush would: the division
    /// remainder is carried here, never discarded.
    pub reward_remainder: u128,
    /// When this account first staked. `None` until the first stake and
    /// again after a full unstake, so a later restake opens a fresh freeze
    /// window. Restaking onto a nonzero principal does NOT move it.
    pub first_staked_at: Option<Timestamp>,
}

impl StakeAccount {
    pub fn new(now: Timestamp) -> Self {
        Self {
            principal: 0,
            checkpoint: now,
            accrued_reward: 0,
            reward_remainder: 0,
            first_staked_at: None,
        }
    }

    /// Raw (hundredth-unit) accrual for the full ticks elapsed since the
    /// checkpoint, including the carried remainder.
    fn pending_raw(&self, terms: &StakingTerms, now: Timestamp) -> Result<u128, StakingError> {
        let ticks = self.checkpoint.elapsed_since(now) / terms.tick_secs;
        (ticks as u128)
            .checked_mul(self.principal)
            .and_then(|r| r.checked_mul(terms.reward_percent))
            .and_then(|r| r.checked_add(self.reward_remainder))
            .ok_or(StakingError::Overflow)
    }

    /// Reward units earned since the checkpoint, not yet added to
    /// `accrued_reward`.
    pub fn pending_reward(&self, terms: &StakingTerms, now: Timestamp) -> Result<u128, StakingError> {
        Ok(self.pending_raw(terms, now)? / 100)
    }

    /// Everything a claim at `now` would pay out. Pure read.
    pub fn claimable(&self, terms: &StakingTerms, now: Timestamp) -> Result<u128, StakingError> {
        self.accrued_reward
            .checked_add(self.pending_reward(terms, now)?)
            .ok_or(StakingError::Overflow)
    }

    /// Move the pending reward into `accrued_reward` and advance the
    /// checkpoint by the flushed whole ticks.
    ///
    /// The checkpoint advances by `ticks × tick_secs`, not to `now`, so the
    /// sub-tick remainder keeps counting toward the next tick, and the
    /// sub-unit division remainder is carried in `reward_remainder`.
    /// Flushing is idempotent: a second flush at the same `now` is a no-op.
    pub fn flush(&mut self, terms: &StakingTerms, now: Timestamp) -> Result<(), StakingError> {
        let ticks = self.checkpoint.elapsed_since(now) / terms.tick_secs;
        if ticks == 0 {
            return Ok(());
        }
        let raw = self.pending_raw(terms, now)?;
        self.accrued_reward = self
            .accrued_reward
            .checked_add(raw / 100)
            .ok_or(StakingError::Overflow)?;
        self.reward_remainder = raw % 100;
        self.checkpoint = self
            .checkpoint
            .saturating_add_secs(ticks * terms.tick_secs);
        Ok(())
    }
}
