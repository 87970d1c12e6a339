//! Fungible-asset ledger boundary.
//!
//! Both engines move tokens exclusively through the [`Ledger`] trait and
//! never touch balances directly, so the global conservation invariant
//! (no operation creates or destroys value) lives in exactly one place.
//! Hosts with a real token ledger implement the trait; [`InMemoryLedger`]
//! is the reference implementation used in tests and embedded deployments.

pub mod error;
pub mod ledger;
pub mod memory;

pub use error::LedgerError;
pub use ledger::Ledger;
pub use memory::InMemoryLedger;
