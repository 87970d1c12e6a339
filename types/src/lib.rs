//! Fundamental types for the Tidelock engines.
//!
//! This crate defines the core types shared by every other crate in the
//! workspace: account identifiers, asset identifiers, and timestamps.

pub mod account;
pub mod asset;
pub mod time;

pub use account::AccountId;
pub use asset::AssetId;
pub use time::Timestamp;
