//! Portfolio balance models.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::status::StatusSource;

/// Fiat total of a set of currency statuses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum TotalFiatBalance {
    /// At least one status is still resolving.
    Loading,
    /// The total cannot be computed from the current data.
    Failed,
    Loaded {
        amount: Decimal,
        /// Worst freshness among the contributing statuses.
        source: StatusSource,
    },
}

impl TotalFiatBalance {
    pub fn loaded(amount: Decimal, source: StatusSource) -> Self {
        TotalFiatBalance::Loaded { amount, source }
    }

    pub fn amount(&self) -> Option<Decimal> {
        match self {
            TotalFiatBalance::Loaded { amount, .. } => Some(*amount),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, TotalFiatBalance::Loading)
    }
}

/// Fiat-weighted average price change of a set of currency statuses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum PriceChange {
    Loading,
    Failed,
    Loaded {
        value: Decimal,
        source: StatusSource,
    },
}

impl PriceChange {
    pub fn value(&self) -> Option<Decimal> {
        match self {
            PriceChange::Loaded { value, .. } => Some(*value),
            _ => None,
        }
    }
}
