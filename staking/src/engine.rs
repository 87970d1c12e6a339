//! The staking engine — stake, claim, unstake, manage.

use crate::account::StakeAccount;
use crate::error::StakingError;
use crate::instruction::StakingInstruction;
use crate::terms::StakingTerms;
use std::collections::HashMap;
use tidelock_ledger::{Ledger, LedgerError};
use tidelock_types::{AccountId, Timestamp};

/// External authorization delegate for multi-component deployments where
/// the privileged caller is decided by a registry rather than a single
/// admin account.
pub trait Authority {
    fn is_privileged(&self, who: &AccountId) -> bool;
}

/// The staking engine.
///
/// Owns all [`StakeAccount`]s and the current [`StakingTerms`]. Holds its
/// own ledger account (`vault`): staked principal sits there, and rewards
/// are paid from whatever reward-asset balance the host has funded it with.
/// Every mutating operation takes the current time and the ledger
/// explicitly; the engine never reads a clock or holds balances itself.
pub struct StakingEngine {
    vault: AccountId,
    terms: StakingTerms,
    accounts: HashMap<AccountId, StakeAccount>,
    authority: Option<Box<dyn Authority>>,
}

impl StakingEngine {
    pub fn new(vault: AccountId, terms: StakingTerms) -> Result<Self, StakingError> {
        terms.validate()?;
        Ok(Self {
            vault,
            terms,
            accounts: HashMap::new(),
            authority: None,
        })
    }

    /// Create an engine whose `manage` authorization is delegated to an
    /// external [`Authority`] instead of the terms' admin account.
    pub fn with_authority(
        vault: AccountId,
        terms: StakingTerms,
        authority: Box<dyn Authority>,
    ) -> Result<Self, StakingError> {
        let mut engine = Self::new(vault, terms)?;
        engine.authority = Some(authority);
        Ok(engine)
    }

    /// The engine's own ledger account.
    pub fn vault(&self) -> &AccountId {
        &self.vault
    }

    /// The current terms.
    pub fn terms(&self) -> &StakingTerms {
        &self.terms
    }

    /// Locked principal for `account` (0 if it never staked).
    pub fn staked_amount(&self, account: &AccountId) -> u128 {
        self.accounts.get(account).map(|a| a.principal).unwrap_or(0)
    }

    /// Everything a claim at `now` would pay out. Pure read: repeated calls
    /// with the same `now` return the same value.
    pub fn claimable(&self, account: &AccountId, now: Timestamp) -> Result<u128, StakingError> {
        match self.accounts.get(account) {
            Some(acct) => acct.claimable(&self.terms, now),
            None => Ok(0),
        }
    }

    /// Lock `amount` of the stake asset.
    ///
    /// Pulls the tokens caller→vault via the ledger's allowance flow (the
    /// caller must have approved the vault beforehand), flushes pending
    /// reward, then adds to principal and resets the checkpoint. Nothing is
    /// paid out, even if flushed reward is sitting on the account.
    pub fn stake(
        &mut self,
        caller: &AccountId,
        amount: u128,
        now: Timestamp,
        ledger: &mut dyn Ledger,
    ) -> Result<(), StakingError> {
        if amount == 0 {
            return Err(StakingError::ZeroAmount);
        }
        // Work on a copy and commit only after the pull succeeds, so a
        // ledger failure leaves the account exactly as it was.
        let mut account = self
            .accounts
            .get(caller)
            .cloned()
            .unwrap_or_else(|| StakeAccount::new(now));
        account.flush(&self.terms, now)?;
        account.principal = account
            .principal
            .checked_add(amount)
            .ok_or(StakingError::Overflow)?;
        account.checkpoint = now;
        if account.first_staked_at.is_none() {
            account.first_staked_at = Some(now);
        }

        ledger.transfer_from(&self.terms.stake_asset, &self.vault, caller, &self.vault, amount)?;

        tracing::debug!(%caller, amount, principal = account.principal, "stake");
        self.accounts.insert(caller.clone(), account);
        Ok(())
    }

    /// Pay out the full accrued reward. Principal is untouched.
    pub fn claim(
        &mut self,
        caller: &AccountId,
        now: Timestamp,
        ledger: &mut dyn Ledger,
    ) -> Result<u128, StakingError> {
        // Same copy-then-commit discipline as `stake`: an erroring claim
        // must leave the account exactly as it was.
        let mut account = self
            .accounts
            .get(caller)
            .cloned()
            .ok_or(StakingError::NothingToClaim)?;
        account.flush(&self.terms, now)?;
        let reward = account.accrued_reward;
        if reward == 0 {
            return Err(StakingError::NothingToClaim);
        }
        ledger.transfer(&self.terms.reward_asset, &self.vault, caller, reward)?;
        account.accrued_reward = 0;
        self.accounts.insert(caller.clone(), account);
        tracing::debug!(%caller, reward, "claim");
        Ok(reward)
    }

    /// Return the full principal plus any accrued reward (possibly zero —
    /// not an error here, unlike `claim`).
    ///
    /// Gated on the freeze period measured from the account's first stake.
    /// An account that never staked (or already unstaked) has no freeze
    /// anchor and fails the gate outright, so zero principal never pays out.
    pub fn unstake(
        &mut self,
        caller: &AccountId,
        now: Timestamp,
        ledger: &mut dyn Ledger,
    ) -> Result<(), StakingError> {
        let mut account = self
            .accounts
            .get(caller)
            .cloned()
            .ok_or(StakingError::FrozenStake)?;
        let first_staked_at = account.first_staked_at.ok_or(StakingError::FrozenStake)?;
        if !first_staked_at.has_expired(self.terms.freeze_secs, now) {
            return Err(StakingError::FrozenStake);
        }
        account.flush(&self.terms, now)?;
        let reward = account.accrued_reward;
        let principal = account.principal;

        // The vault covers principal by conservation, but the reward pool is
        // host-funded and may fall short. Check before moving anything so
        // the operation stays all-or-nothing.
        let pool = ledger.balance_of(&self.terms.reward_asset, &self.vault);
        if pool < reward {
            return Err(LedgerError::InsufficientBalance {
                needed: reward,
                available: pool,
            }
            .into());
        }
        ledger.transfer(&self.terms.reward_asset, &self.vault, caller, reward)?;
        ledger.transfer(&self.terms.stake_asset, &self.vault, caller, principal)?;

        account.principal = 0;
        account.accrued_reward = 0;
        account.reward_remainder = 0;
        account.first_staked_at = None;
        self.accounts.insert(caller.clone(), account);
        tracing::debug!(%caller, principal, reward, "unstake");
        Ok(())
    }

    /// Replace the staking terms.
    ///
    /// Privileged: authorized by the injected [`Authority`] when present,
    /// otherwise only the current terms' admin may call. Takes effect for
    /// all subsequent accrual; existing checkpoints and flushed rewards are
    /// unaffected.
    pub fn manage(&mut self, caller: &AccountId, new_terms: StakingTerms) -> Result<(), StakingError> {
        let privileged = match &self.authority {
            Some(authority) => authority.is_privileged(caller),
            None => *caller == self.terms.admin,
        };
        if !privileged {
            return Err(StakingError::NotAuthorized);
        }
        new_terms.validate()?;
        tracing::info!(
            %caller,
            tick_secs = new_terms.tick_secs,
            reward_percent = new_terms.reward_percent,
            freeze_secs = new_terms.freeze_secs,
            "staking terms replaced"
        );
        self.terms = new_terms;
        Ok(())
    }

    /// Execute an encoded privileged instruction — the engine's face as a
    /// proposal-execution target.
    pub fn execute_instruction(
        &mut self,
        caller: &AccountId,
        payload: &[u8],
    ) -> Result<(), StakingError> {
        match StakingInstruction::decode(payload)? {
            StakingInstruction::Manage(new_terms) => self.manage(caller, new_terms),
        }
    }
}
