//! Emission types of the currency statuses aggregation.

use serde::{Deserialize, Serialize};

use crate::errors::TokenListError;
use crate::status::CryptoCurrencyStatus;

/// Statuses of every currency in a wallet at one point in time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusesSnapshot {
    /// One entry per wallet currency, in wallet order.
    pub statuses: Vec<CryptoCurrencyStatus>,
    /// `true` while the one-shot refresh started with this currency set is
    /// still outstanding.
    pub is_updating: bool,
}

/// One emission of the wallet statuses stream.
pub type StatusesUpdate = std::result::Result<StatusesSnapshot, TokenListError>;

/// One emission of a single currency's status stream.
pub type CurrencyStatusUpdate = std::result::Result<CryptoCurrencyStatus, TokenListError>;
