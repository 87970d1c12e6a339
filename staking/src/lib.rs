//! Time-based staking engine.
//!
//! Participants lock a stake asset and earn a reward asset proportional to
//! elapsed time, quantized into ticks: every full `tick_secs` earns
//! `principal × reward_percent / 100` of the reward asset. Sub-tick
//! progress is never lost — the accrual checkpoint only advances by whole
//! ticks, so the remainder keeps counting.
//!
//! This crate handles:
//! - Per-account stake/reward bookkeeping and accrual flushing
//! - stake / claim / unstake with a freeze period gate on principal
//! - Privileged terms management, directly or via a governance proposal
//!   carrying an encoded [`StakingInstruction`]

pub mod account;
pub mod engine;
pub mod error;
pub mod instruction;
pub mod terms;

pub use account::StakeAccount;
pub use engine::{Authority, StakingEngine};
pub use error::StakingError;
pub use instruction::StakingInstruction;
pub use terms::StakingTerms;
