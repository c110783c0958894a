use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};
use std::fmt;

use crate::currencies::{CurrencyId, Network};
use crate::status::StatusSource;

/// Wallet address on a network.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NetworkAddress(pub String);

impl NetworkAddress {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NetworkAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A transaction that has been broadcast but not yet confirmed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PendingTransaction {
    pub hash: String,
    pub amount: Decimal,
    pub is_incoming: bool,
    pub timestamp: Option<DateTime<Utc>>,
}

/// Balance of one currency in a verified network snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "camelCase")]
pub enum NetworkAmount {
    Loaded(Decimal),
    /// The network answered but knows nothing about this currency.
    NotFound,
}

/// State of one network for one wallet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum NetworkStatusValue {
    /// The wallet has no derived key for this network.
    MissedDerivation,
    /// The node or indexer call failed.
    Unreachable { address: Option<NetworkAddress> },
    /// The chain has not created the account yet.
    #[serde(rename_all = "camelCase")]
    NoAccount {
        address: NetworkAddress,
        amount_to_create_account: Decimal,
        source: StatusSource,
    },
    /// A successful snapshot. A currency missing from `amounts` has not been
    /// resolved yet.
    #[serde(rename_all = "camelCase")]
    Verified {
        address: NetworkAddress,
        amounts: HashMap<CurrencyId, NetworkAmount>,
        pending_transactions: HashMap<CurrencyId, BTreeSet<PendingTransaction>>,
        source: StatusSource,
    },
}

/// Network state keyed by network. Exactly one instance exists per
/// `(wallet, network)`; updates replace it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkStatus {
    pub network: Network,
    pub value: NetworkStatusValue,
}

impl NetworkStatus {
    pub fn new(network: Network, value: NetworkStatusValue) -> Self {
        Self { network, value }
    }

    /// Address resolved for the wallet on this network, if any.
    pub fn address(&self) -> Option<&NetworkAddress> {
        match &self.value {
            NetworkStatusValue::MissedDerivation => None,
            NetworkStatusValue::Unreachable { address } => address.as_ref(),
            NetworkStatusValue::NoAccount { address, .. } => Some(address),
            NetworkStatusValue::Verified { address, .. } => Some(address),
        }
    }

    pub fn source(&self) -> StatusSource {
        match &self.value {
            NetworkStatusValue::NoAccount { source, .. } => *source,
            NetworkStatusValue::Verified { source, .. } => *source,
            NetworkStatusValue::MissedDerivation | NetworkStatusValue::Unreachable { .. } => {
                StatusSource::Actual
            }
        }
    }
}
