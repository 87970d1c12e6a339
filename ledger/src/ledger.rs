//! The `Ledger` trait — the boundary both engines transfer through.

use crate::error::LedgerError;
use tidelock_types::{AccountId, AssetId};

/// Atomic fungible-asset transfer primitive with allowance semantics.
///
/// Every method either fully applies or fails with no state change. No
/// method may create or destroy value: the sum of all balances of an asset
/// is the same before and after any call.
pub trait Ledger {
    /// Current balance of `account` in `asset`.
    fn balance_of(&self, asset: &AssetId, account: &AccountId) -> u128;

    /// Move `amount` of `asset` from `from` to `to`.
    ///
    /// A zero `amount` is a no-op, not an error.
    fn transfer(
        &mut self,
        asset: &AssetId,
        from: &AccountId,
        to: &AccountId,
        amount: u128,
    ) -> Result<(), LedgerError>;

    /// Set (not add to) the allowance `owner` grants `spender`.
    fn approve(&mut self, asset: &AssetId, owner: &AccountId, spender: &AccountId, amount: u128);

    /// Remaining allowance `owner` has granted `spender`.
    fn allowance(&self, asset: &AssetId, owner: &AccountId, spender: &AccountId) -> u128;

    /// Move `amount` of `asset` from `from` to `to` on behalf of `spender`,
    /// consuming `from`'s allowance to `spender`.
    ///
    /// Fails with `InsufficientAllowance` before any balance is touched.
    fn transfer_from(
        &mut self,
        asset: &AssetId,
        spender: &AccountId,
        from: &AccountId,
        to: &AccountId,
        amount: u128,
    ) -> Result<(), LedgerError>;
}
