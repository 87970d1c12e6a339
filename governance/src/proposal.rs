//! Proposals, ballots, and depositors.

use crate::dispatch::TargetId;
use serde::{Deserialize, Serialize};
use tidelock_types::Timestamp;

/// Monotonically increasing proposal identifier, starting at 0.
pub type ProposalId = u64;

/// A weighted ballot choice.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum VoteChoice {
    /// Against the proposal.
    Against,
    /// In favor of the proposal.
    For,
    /// Abstain (counted for quorum but not for the majority).
    Abstain,
}

impl VoteChoice {
    /// Decode the 0/1/2 wire encoding used by external callers.
    pub fn from_index(index: u8) -> Option<Self> {
        match index {
            0 => Some(Self::Against),
            1 => Some(Self::For),
            2 => Some(Self::Abstain),
            _ => None,
        }
    }
}

/// A governance proposal.
///
/// Immutable fields are fixed at creation; only the tallies and the
/// `finalized` flag change afterwards.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Proposal {
    pub id: ProposalId,
    /// Which privileged component a passed proposal invokes.
    pub target: TargetId,
    /// Opaque, proposer-supplied instruction payload for the target.
    pub payload: Vec<u8>,
    pub description: String,
    pub created_at: Timestamp,
    /// Voting closes and finalization opens at this time.
    pub debate_ends_at: Timestamp,
    /// Weighted tallies.
    pub votes_for: u128,
    pub votes_against: u128,
    pub votes_abstain: u128,
    pub finalized: bool,
}

impl Proposal {
    /// Total weight cast, all choices included.
    pub fn total_cast(&self) -> Option<u128> {
        self.votes_for
            .checked_add(self.votes_against)?
            .checked_add(self.votes_abstain)
    }

    /// Whether the tallies meet quorum and strictly favor "For".
    ///
    /// A tie rejects, even at quorum.
    pub fn passes(&self, minimum_quorum: u128) -> bool {
        match self.total_cast() {
            Some(total) => total >= minimum_quorum && self.votes_for > self.votes_against,
            None => false,
        }
    }
}

/// What `finish_proposal` reports. All three are terminal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProposalOutcome {
    /// Quorum met, For > Against, and the target call succeeded.
    Executed,
    /// Quorum met, For > Against, but the target call failed. The failure
    /// is absorbed; the proposal is finalized regardless.
    ExecutionFailed,
    /// Quorum unmet, or the vote did not strictly favor "For". Not an
    /// error — just a no-op outcome.
    Rejected,
}

/// One voter's ballot on one proposal. Its existence blocks re-voting.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Ballot {
    pub weight: u128,
    pub choice: VoteChoice,
}

/// A governance-asset depositor.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Depositor {
    /// Weight available for voting.
    pub balance: u128,
    /// Ballots on proposals that have not yet finalized. Withdrawal is
    /// blocked while this is nonzero.
    pub open_ballots: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn proposal(votes_for: u128, votes_against: u128, votes_abstain: u128) -> Proposal {
        Proposal {
            id: 0,
            target: TargetId::new("staking"),
            payload: Vec::new(),
            description: String::new(),
            created_at: Timestamp::new(0),
            debate_ends_at: Timestamp::new(2000),
            votes_for,
            votes_against,
            votes_abstain,
            finalized: false,
        }
    }

    #[test]
    fn vote_choice_wire_encoding() {
        assert_eq!(VoteChoice::from_index(0), Some(VoteChoice::Against));
        assert_eq!(VoteChoice::from_index(1), Some(VoteChoice::For));
        assert_eq!(VoteChoice::from_index(2), Some(VoteChoice::Abstain));
        assert_eq!(VoteChoice::from_index(3), None);
    }

    #[test]
    fn passes_needs_quorum_and_strict_majority() {
        // 200 For, 100 Against, quorum 250: total 300 ≥ 250, 200 > 100
        assert!(proposal(200, 100, 0).passes(250));
        // Tie at quorum rejects
        assert!(!proposal(100, 100, 100).passes(250));
        // Majority without quorum rejects
        assert!(!proposal(200, 0, 0).passes(250));
        // Abstain counts toward quorum only
        assert!(proposal(10, 5, 235).passes(250));
    }

    #[test]
    fn total_cast_overflow_rejects() {
        assert!(!proposal(u128::MAX, 1, 0).passes(0));
    }
}
