//! Cryptofolio Core - Currency status aggregation for crypto wallets.
//!
//! This crate turns quotes, per-network balances and staking positions into a
//! live status for every currency of a wallet, and derives the portfolio total,
//! its price change and the token list shown to the user. It is storage and
//! network agnostic: data sources are reached through the repository traits
//! each module defines.

pub mod aggregation;
pub mod constants;
pub mod currencies;
pub mod errors;
pub mod networks;
pub mod portfolio;
pub mod quotes;
pub mod settings;
pub mod staking;
pub mod status;

#[cfg(test)]
pub(crate) mod test_fixtures;

// Re-export the types most consumers need
pub use aggregation::*;
pub use portfolio::*;
pub use status::*;

// Re-export error types
pub use errors::Error;
pub use errors::Result;
