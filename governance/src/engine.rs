//! The governance engine — deposits, ballots, finalization.

use crate::dispatch::{Dispatcher, TargetId};
use crate::error::GovernanceError;
use crate::proposal::{Ballot, Depositor, Proposal, ProposalId, ProposalOutcome, VoteChoice};
use std::collections::HashMap;
use tidelock_ledger::Ledger;
use tidelock_types::{AccountId, AssetId, Timestamp};

/// The governance engine.
///
/// Owns all proposals, ballots, and depositor records. Deposited
/// governance tokens sit in the engine's own ledger account (`vault`).
/// Like the staking engine, every mutating operation takes the current
/// time and the ledger explicitly.
pub struct GovernanceEngine {
    vault: AccountId,
    asset: AssetId,
    minimum_quorum: u128,
    debate_secs: u64,
    proposals: Vec<Proposal>,
    ballots: HashMap<(ProposalId, AccountId), Ballot>,
    depositors: HashMap<AccountId, Depositor>,
}

impl GovernanceEngine {
    pub fn new(vault: AccountId, asset: AssetId, minimum_quorum: u128, debate_secs: u64) -> Self {
        Self {
            vault,
            asset,
            minimum_quorum,
            debate_secs,
            proposals: Vec::new(),
            ballots: HashMap::new(),
            depositors: HashMap::new(),
        }
    }

    /// The engine's own ledger account.
    pub fn vault(&self) -> &AccountId {
        &self.vault
    }

    /// Voting weight `account` currently has deposited.
    pub fn deposited(&self, account: &AccountId) -> u128 {
        self.depositors.get(account).map(|d| d.balance).unwrap_or(0)
    }

    /// How many of `account`'s ballots sit on not-yet-finalized proposals.
    pub fn open_ballots(&self, account: &AccountId) -> u32 {
        self.depositors
            .get(account)
            .map(|d| d.open_ballots)
            .unwrap_or(0)
    }

    pub fn proposal(&self, id: ProposalId) -> Option<&Proposal> {
        self.proposals.get(id as usize)
    }

    #[cfg(test)]
    fn has_depositor_record(&self, account: &AccountId) -> bool {
        self.depositors.contains_key(account)
    }

    pub fn proposal_count(&self) -> u64 {
        self.proposals.len() as u64
    }

    pub fn ballot(&self, id: ProposalId, voter: &AccountId) -> Option<&Ballot> {
        self.ballots.get(&(id, voter.clone()))
    }

    /// Lock `amount` of the governance asset as voting weight.
    ///
    /// Pulls the tokens caller→vault via the ledger's allowance flow.
    pub fn deposit(
        &mut self,
        caller: &AccountId,
        amount: u128,
        ledger: &mut dyn Ledger,
    ) -> Result<(), GovernanceError> {
        if amount == 0 {
            return Err(GovernanceError::ZeroAmount);
        }
        let balance = self.deposited(caller);
        let new_balance = balance.checked_add(amount).ok_or(GovernanceError::Overflow)?;

        ledger.transfer_from(&self.asset, &self.vault, caller, &self.vault, amount)?;

        self.depositors.entry(caller.clone()).or_default().balance = new_balance;
        tracing::debug!(%caller, amount, balance = new_balance, "deposit");
        Ok(())
    }

    /// Return the caller's full deposited balance.
    ///
    /// Blocked while the caller has a ballot on any open proposal.
    pub fn withdraw(
        &mut self,
        caller: &AccountId,
        ledger: &mut dyn Ledger,
    ) -> Result<u128, GovernanceError> {
        let Some(depositor) = self.depositors.get_mut(caller) else {
            return Ok(0);
        };
        if depositor.open_ballots > 0 {
            return Err(GovernanceError::ActiveVotes);
        }
        let amount = depositor.balance;
        ledger.transfer(&self.asset, &self.vault, caller, amount)?;
        depositor.balance = 0;
        tracing::debug!(%caller, amount, "withdraw");
        Ok(amount)
    }

    /// Register a new proposal. Always succeeds, for any caller — no
    /// deposit is required to propose.
    pub fn create_proposal(
        &mut self,
        target: TargetId,
        payload: Vec<u8>,
        description: impl Into<String>,
        now: Timestamp,
    ) -> ProposalId {
        let id = self.proposals.len() as ProposalId;
        let proposal = Proposal {
            id,
            target,
            payload,
            description: description.into(),
            created_at: now,
            debate_ends_at: now.saturating_add_secs(self.debate_secs),
            votes_for: 0,
            votes_against: 0,
            votes_abstain: 0,
            finalized: false,
        };
        tracing::debug!(id, target = %proposal.target, "proposal created");
        self.proposals.push(proposal);
        id
    }

    /// Cast a weighted ballot.
    ///
    /// The weight stays in the caller's deposit — voting spends nothing,
    /// it only pins the deposit until the proposal finalizes. Ballots cast
    /// at or after the debate deadline are rejected so tallies cannot be
    /// manipulated after the nominal close.
    pub fn vote(
        &mut self,
        caller: &AccountId,
        id: ProposalId,
        amount: u128,
        choice: VoteChoice,
        now: Timestamp,
    ) -> Result<(), GovernanceError> {
        let proposal = self
            .proposals
            .get_mut(id as usize)
            .ok_or(GovernanceError::NoSuchProposal(id))?;
        if proposal.finalized || now >= proposal.debate_ends_at {
            return Err(GovernanceError::VotingClosed);
        }
        if self.ballots.contains_key(&(id, caller.clone())) {
            return Err(GovernanceError::AlreadyVoted);
        }
        let available = self
            .depositors
            .get(caller)
            .map(|d| d.balance)
            .unwrap_or(0);
        if amount > available {
            return Err(GovernanceError::InsufficientDeposit {
                needed: amount,
                available,
            });
        }

        let tally = match choice {
            VoteChoice::For => &mut proposal.votes_for,
            VoteChoice::Against => &mut proposal.votes_against,
            VoteChoice::Abstain => &mut proposal.votes_abstain,
        };
        *tally = tally.checked_add(amount).ok_or(GovernanceError::Overflow)?;

        self.ballots.insert(
            (id, caller.clone()),
            Ballot {
                weight: amount,
                choice,
            },
        );
        let depositor = self.depositors.entry(caller.clone()).or_default();
        depositor.open_ballots += 1;
        tracing::debug!(%caller, id, amount, ?choice, "vote");
        Ok(())
    }

    /// Finalize a proposal once its debate period has ended.
    ///
    /// Releases every voter's pinned deposit, then — iff quorum is met and
    /// For strictly exceeds Against — dispatches the payload to its target
    /// inside a guarded region: a failing call is logged and reported as
    /// [`ProposalOutcome::ExecutionFailed`], never propagated, and the
    /// proposal finalizes regardless. Idempotence-guarded: a second call
    /// fails with `AlreadyFinished`.
    pub fn finish_proposal(
        &mut self,
        id: ProposalId,
        now: Timestamp,
        dispatcher: &mut dyn Dispatcher,
    ) -> Result<ProposalOutcome, GovernanceError> {
        let proposal = self
            .proposals
            .get_mut(id as usize)
            .ok_or(GovernanceError::NoSuchProposal(id))?;
        if now < proposal.debate_ends_at {
            return Err(GovernanceError::DebateInProgress);
        }
        if proposal.finalized {
            return Err(GovernanceError::AlreadyFinished);
        }
        proposal.finalized = true;
        let passed = proposal.passes(self.minimum_quorum);
        let target = proposal.target.clone();
        let payload = proposal.payload.clone();

        for ((ballot_id, voter), _) in self.ballots.iter() {
            if *ballot_id != id {
                continue;
            }
            if let Some(depositor) = self.depositors.get_mut(voter) {
                depositor.open_ballots = depositor.open_ballots.saturating_sub(1);
            }
        }

        if !passed {
            tracing::debug!(id, "proposal rejected");
            return Ok(ProposalOutcome::Rejected);
        }
        match dispatcher.dispatch(&target, &payload) {
            Ok(()) => {
                tracing::info!(id, %target, "proposal executed");
                Ok(ProposalOutcome::Executed)
            }
            Err(err) => {
                // The downstream failure is absorbed: governance state is
                // already final and must not roll back.
                tracing::warn!(id, %target, error = %err, "proposal execution failed");
                Ok(ProposalOutcome::ExecutionFailed)
            }
        }
    }
}
