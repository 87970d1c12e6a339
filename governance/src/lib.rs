//! Token-weighted governance engine.
//!
//! Depositors lock a governance asset to obtain voting weight, proposals
//! carry an opaque instruction payload for an arbitrary target, and
//! finalization tallies the weighted ballots and conditionally executes
//! the payload through an injected [`Dispatcher`]. A failing execution is
//! absorbed — finalization itself can never be blocked by a misbehaving
//! target.

pub mod dispatch;
pub mod engine;
pub mod error;
pub mod proposal;

pub use dispatch::{DispatchError, Dispatcher, TargetId};
pub use engine::GovernanceEngine;
pub use error::GovernanceError;
pub use proposal::{Ballot, Depositor, Proposal, ProposalId, ProposalOutcome, VoteChoice};
