//! The staking engine's parameter set.

use crate::error::StakingError;
use serde::{Deserialize, Serialize};
use tidelock_types::{AccountId, AssetId};

/// The complete parameter set governing accrual and withdrawal.
///
/// Mutated only through [`StakingEngine::manage`](crate::StakingEngine::manage),
/// by the privileged caller — directly, or by a governance engine executing
/// a passed proposal. A change affects only subsequent accrual; accounts
/// keep their checkpoints and already-flushed rewards.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StakingTerms {
    /// The asset participants lock.
    pub stake_asset: AssetId,
    /// The asset rewards are paid in.
    pub reward_asset: AssetId,
    /// The time quantum over which one reward increment accrues, in seconds.
    pub tick_secs: u64,
    /// Whole percent of principal earned per full tick.
    pub reward_percent: u128,
    /// Minimum time since an account's first stake before principal may be
    /// withdrawn, in seconds.
    pub freeze_secs: u64,
    /// The privileged caller allowed to replace these terms.
    pub admin: AccountId,
}

impl StakingTerms {
    /// Check the terms are internally consistent.
    pub fn validate(&self) -> Result<(), StakingError> {
        if self.tick_secs == 0 {
            return Err(StakingError::InvalidTerms("tick duration must be non-zero"));
        }
        Ok(())
    }
}
