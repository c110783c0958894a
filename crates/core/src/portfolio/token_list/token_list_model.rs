//! Token list presentation models.

use serde::{Deserialize, Serialize};

use crate::currencies::Network;
use crate::portfolio::balance::TotalFiatBalance;
use crate::status::CryptoCurrencyStatus;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TokensGroupType {
    #[default]
    None,
    Network,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TokensSortType {
    #[default]
    None,
    Balance,
}

/// Currencies of one network, in display order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkGroup {
    pub network: Network,
    pub currencies: Vec<CryptoCurrencyStatus>,
}

/// A wallet's currencies arranged for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum TokenList {
    /// Nothing to show yet.
    NotInitialized,
    #[serde(rename_all = "camelCase")]
    Ungrouped {
        sorted_by: TokensSortType,
        total_fiat_balance: TotalFiatBalance,
        currencies: Vec<CryptoCurrencyStatus>,
    },
    #[serde(rename_all = "camelCase")]
    GroupedByNetwork {
        sorted_by: TokensSortType,
        total_fiat_balance: TotalFiatBalance,
        groups: Vec<NetworkGroup>,
    },
}

impl TokenList {
    /// Every currency status in display order.
    pub fn flatten_currencies(&self) -> Vec<CryptoCurrencyStatus> {
        match self {
            TokenList::NotInitialized => Vec::new(),
            TokenList::Ungrouped { currencies, .. } => currencies.clone(),
            TokenList::GroupedByNetwork { groups, .. } => groups
                .iter()
                .flat_map(|group| group.currencies.iter().cloned())
                .collect(),
        }
    }

    pub fn sorted_by(&self) -> TokensSortType {
        match self {
            TokenList::NotInitialized => TokensSortType::None,
            TokenList::Ungrouped { sorted_by, .. } => *sorted_by,
            TokenList::GroupedByNetwork { sorted_by, .. } => *sorted_by,
        }
    }

    pub fn total_fiat_balance(&self) -> Option<&TotalFiatBalance> {
        match self {
            TokenList::NotInitialized => None,
            TokenList::Ungrouped {
                total_fiat_balance, ..
            } => Some(total_fiat_balance),
            TokenList::GroupedByNetwork {
                total_fiat_balance, ..
            } => Some(total_fiat_balance),
        }
    }
}
