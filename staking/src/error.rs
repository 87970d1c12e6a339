//! Staking-specific errors.

use thiserror::Error;
use tidelock_ledger::LedgerError;

#[derive(Debug, Error)]
pub enum StakingError {
    #[error("amount must be non-zero")]
    ZeroAmount,

    #[error("there is no reward to claim")]
    NothingToClaim,

    #[error("too early to unstake: freeze period has not elapsed")]
    FrozenStake,

    #[error("caller is not authorized to manage staking terms")]
    NotAuthorized,

    #[error("invalid staking terms: {0}")]
    InvalidTerms(&'static str),

    #[error("instruction payload could not be decoded")]
    BadInstruction,

    #[error("arithmetic overflow in reward computation")]
    Overflow,

    #[error("ledger: {0}")]
    Ledger(#[from] LedgerError),
}
