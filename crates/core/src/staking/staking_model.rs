use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::currencies::RawCurrencyId;
use crate::networks::NetworkAddress;
use crate::status::StatusSource;

/// Staking integration plus the address that holds the position.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StakingId {
    pub integration_id: String,
    pub address: NetworkAddress,
}

/// One staking position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YieldBalanceItem {
    pub token: RawCurrencyId,
    pub amount: Decimal,
    pub rewards: Decimal,
}

impl YieldBalanceItem {
    /// Amount plus rewards. `None` on overflow.
    pub fn total(&self) -> Option<Decimal> {
        self.amount.checked_add(self.rewards)
    }
}

/// Staking positions held at one staking address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YieldBalance {
    pub staking_id: StakingId,
    pub items: Vec<YieldBalanceItem>,
    pub source: StatusSource,
}

impl YieldBalance {
    /// Staked amount plus accrued rewards over every item. `None` on overflow.
    pub fn total_with_rewards(&self) -> Option<Decimal> {
        self.items
            .iter()
            .try_fold(Decimal::ZERO, |sum, item| sum.checked_add(item.total()?))
    }

    /// Keeps only the items held at `address` for `token`. Returns `None` when
    /// nothing matches so an empty balance is never attached to a status.
    pub fn matching(&self, address: &NetworkAddress, token: &RawCurrencyId) -> Option<YieldBalance> {
        if &self.staking_id.address != address {
            return None;
        }

        let items: Vec<YieldBalanceItem> = self
            .items
            .iter()
            .filter(|item| &item.token == token)
            .cloned()
            .collect();

        if items.is_empty() {
            return None;
        }

        Some(YieldBalance {
            staking_id: self.staking_id.clone(),
            items,
            source: self.source,
        })
    }
}
