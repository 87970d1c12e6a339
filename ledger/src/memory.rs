//! In-memory reference ledger.

use crate::error::LedgerError;
use crate::ledger::Ledger;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tidelock_types::{AccountId, AssetId};

/// Per-asset book: balances plus (owner, spender) allowances.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
struct AssetBook {
    balances: HashMap<AccountId, u128>,
    allowances: HashMap<(AccountId, AccountId), u128>,
}

/// HashMap-backed ledger for tests and embedded deployments.
///
/// `mint` is the only operation that changes an asset's total supply; it
/// models the host's genesis/funding step and is not part of the [`Ledger`]
/// trait the engines see.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct InMemoryLedger {
    books: HashMap<AssetId, AssetBook>,
}

impl InMemoryLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create `amount` new units of `asset` in `to`'s balance.
    pub fn mint(&mut self, asset: &AssetId, to: &AccountId, amount: u128) -> Result<(), LedgerError> {
        let book = self.books.entry(asset.clone()).or_default();
        let balance = book.balances.entry(to.clone()).or_insert(0);
        *balance = balance.checked_add(amount).ok_or(LedgerError::Overflow)?;
        Ok(())
    }

    /// Total supply of `asset` across all accounts.
    pub fn total_supply(&self, asset: &AssetId) -> u128 {
        self.books
            .get(asset)
            .map(|book| book.balances.values().sum())
            .unwrap_or(0)
    }
}

impl Ledger for InMemoryLedger {
    fn balance_of(&self, asset: &AssetId, account: &AccountId) -> u128 {
        self.books
            .get(asset)
            .and_then(|book| book.balances.get(account).copied())
            .unwrap_or(0)
    }

    fn transfer(
        &mut self,
        asset: &AssetId,
        from: &AccountId,
        to: &AccountId,
        amount: u128,
    ) -> Result<(), LedgerError> {
        if amount == 0 {
            return Ok(());
        }
        let book = self.books.entry(asset.clone()).or_default();
        let from_balance = book.balances.get(from).copied().unwrap_or(0);
        if from_balance < amount {
            return Err(LedgerError::InsufficientBalance {
                needed: amount,
                available: from_balance,
            });
        }
        let to_balance = book.balances.get(to).copied().unwrap_or(0);
        let to_after = to_balance.checked_add(amount).ok_or(LedgerError::Overflow)?;
        book.balances.insert(from.clone(), from_balance - amount);
        book.balances.insert(to.clone(), to_after);
        tracing::debug!(%asset, %from, %to, amount, "transfer");
        Ok(())
    }

    fn approve(&mut self, asset: &AssetId, owner: &AccountId, spender: &AccountId, amount: u128) {
        let book = self.books.entry(asset.clone()).or_default();
        book.allowances
            .insert((owner.clone(), spender.clone()), amount);
    }

    fn allowance(&self, asset: &AssetId, owner: &AccountId, spender: &AccountId) -> u128 {
        self.books
            .get(asset)
            .and_then(|book| book.allowances.get(&(owner.clone(), spender.clone())))
            .copied()
            .unwrap_or(0)
    }

    fn transfer_from(
        &mut self,
        asset: &AssetId,
        spender: &AccountId,
        from: &AccountId,
        to: &AccountId,
        amount: u128,
    ) -> Result<(), LedgerError> {
        if amount == 0 {
            return Ok(());
        }
        let approved = self.allowance(asset, from, spender);
        if approved < amount {
            return Err(LedgerError::InsufficientAllowance {
                needed: amount,
                approved,
            });
        }
        self.transfer(asset, from, to, amount)?;
        // Only reduce the allowance once the balance move has succeeded.
        let book = self.books.entry(asset.clone()).or_default();
        book.allowances
            .insert((from.clone(), spender.clone()), approved - amount);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn asset() -> AssetId {
        AssetId::new("TOK")
    }

    fn acct(name: &str) -> AccountId {
        AccountId::new(name)
    }

    #[test]
    fn mint_and_balance() {
        let mut ledger = InMemoryLedger::new();
        ledger.mint(&asset(), &acct("a"), 1000).unwrap();
        assert_eq!(ledger.balance_of(&asset(), &acct("a")), 1000);
        assert_eq!(ledger.balance_of(&asset(), &acct("b")), 0);
    }

    #[test]
    fn transfer_moves_exactly_amount() {
        let mut ledger = InMemoryLedger::new();
        ledger.mint(&asset(), &acct("a"), 1000).unwrap();
        ledger.transfer(&asset(), &acct("a"), &acct("b"), 300).unwrap();
        assert_eq!(ledger.balance_of(&asset(), &acct("a")), 700);
        assert_eq!(ledger.balance_of(&asset(), &acct("b")), 300);
        assert_eq!(ledger.total_supply(&asset()), 1000);
    }

    #[test]
    fn transfer_insufficient_balance_changes_nothing() {
        let mut ledger = InMemoryLedger::new();
        ledger.mint(&asset(), &acct("a"), 100).unwrap();
        let err = ledger
            .transfer(&asset(), &acct("a"), &acct("b"), 101)
            .unwrap_err();
        assert!(matches!(
            err,
            LedgerError::InsufficientBalance { needed: 101, available: 100 }
        ));
        assert_eq!(ledger.balance_of(&asset(), &acct("a")), 100);
        assert_eq!(ledger.balance_of(&asset(), &acct("b")), 0);
    }

    #[test]
    fn zero_transfer_is_noop() {
        let mut ledger = InMemoryLedger::new();
        ledger.transfer(&asset(), &acct("a"), &acct("b"), 0).unwrap();
        assert_eq!(ledger.total_supply(&asset()), 0);
    }

    #[test]
    fn transfer_from_consumes_allowance() {
        let mut ledger = InMemoryLedger::new();
        ledger.mint(&asset(), &acct("owner"), 1000).unwrap();
        ledger.approve(&asset(), &acct("owner"), &acct("engine"), 400);

        ledger
            .transfer_from(&asset(), &acct("engine"), &acct("owner"), &acct("vault"), 250)
            .unwrap();
        assert_eq!(ledger.balance_of(&asset(), &acct("vault")), 250);
        assert_eq!(ledger.allowance(&asset(), &acct("owner"), &acct("engine")), 150);
    }

    #[test]
    fn transfer_from_without_allowance_fails() {
        let mut ledger = InMemoryLedger::new();
        ledger.mint(&asset(), &acct("owner"), 1000).unwrap();
        let err = ledger
            .transfer_from(&asset(), &acct("engine"), &acct("owner"), &acct("vault"), 1)
            .unwrap_err();
        assert!(matches!(
            err,
            LedgerError::InsufficientAllowance { needed: 1, approved: 0 }
        ));
        assert_eq!(ledger.balance_of(&asset(), &acct("owner")), 1000);
    }

    #[test]
    fn approve_sets_not_adds() {
        let mut ledger = InMemoryLedger::new();
        ledger.approve(&asset(), &acct("a"), &acct("b"), 100);
        ledger.approve(&asset(), &acct("a"), &acct("b"), 40);
        assert_eq!(ledger.allowance(&asset(), &acct("a"), &acct("b")), 40);
    }

    #[test]
    fn failed_transfer_from_keeps_allowance() {
        let mut ledger = InMemoryLedger::new();
        ledger.mint(&asset(), &acct("owner"), 10).unwrap();
        ledger.approve(&asset(), &acct("owner"), &acct("engine"), 100);
        let err = ledger
            .transfer_from(&asset(), &acct("engine"), &acct("owner"), &acct("vault"), 50)
            .unwrap_err();
        assert!(matches!(err, LedgerError::InsufficientBalance { .. }));
        assert_eq!(ledger.allowance(&asset(), &acct("owner"), &acct("engine")), 100);
    }
}
