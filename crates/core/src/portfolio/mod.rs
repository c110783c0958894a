//! Portfolio-level views over a wallet's currency statuses.
//!
//! - [`balance`] - Total fiat balance and weighted price change
//! - [`token_list`] - Grouped and sorted token list for display

pub mod balance;
pub mod token_list;

pub use balance::*;
pub use token_list::*;
