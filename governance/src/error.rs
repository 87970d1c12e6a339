//! Governance-specific errors.

use thiserror::Error;
use tidelock_ledger::LedgerError;

#[derive(Debug, Error)]
pub enum GovernanceError {
    #[error("amount must be non-zero")]
    ZeroAmount,

    #[error("proposal {0} not found")]
    NoSuchProposal(u64),

    #[error("caller has already voted on this proposal")]
    AlreadyVoted,

    #[error("voting window has closed for this proposal")]
    VotingClosed,

    #[error("insufficient deposit: need {needed}, available {available}")]
    InsufficientDeposit { needed: u128, available: u128 },

    #[error("cannot withdraw while votes on open proposals remain")]
    ActiveVotes,

    #[error("debate period has not ended yet")]
    DebateInProgress,

    #[error("proposal has already been finished")]
    AlreadyFinished,

    #[error("arithmetic overflow in vote tally")]
    Overflow,

    #[error("ledger: {0}")]
    Ledger(#[from] LedgerError),
}
