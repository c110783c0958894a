//! Currency status models.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::currencies::CryptoCurrency;
use crate::networks::{NetworkAddress, PendingTransaction};
use crate::staking::YieldBalance;

// =============================================================================
// Freshness
// =============================================================================

/// Freshness of a value. Ordered from freshest to stalest so that combining
/// sources is a `max`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StatusSource {
    /// Fetched from the network during this session.
    #[default]
    Actual,
    /// Read from cache; a refresh is pending or failed.
    Cache,
    /// Read from cache with no refresh possible.
    OnlyCache,
}

impl StatusSource {
    /// Worst of the two.
    pub fn combine(self, other: StatusSource) -> StatusSource {
        self.max(other)
    }
}

/// Freshness of each source that contributed to a status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sources {
    pub network_source: StatusSource,
    pub quote_source: StatusSource,
    pub yield_balance_source: StatusSource,
}

impl Sources {
    pub fn new(network: StatusSource, quote: StatusSource, yield_balance: StatusSource) -> Self {
        Self {
            network_source: network,
            quote_source: quote,
            yield_balance_source: yield_balance,
        }
    }

    pub fn total(&self) -> StatusSource {
        self.network_source
            .combine(self.quote_source)
            .combine(self.yield_balance_source)
    }
}

// =============================================================================
// Status payloads
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MissedDerivationStatus {
    pub fiat_rate: Option<Decimal>,
    pub price_change: Option<Decimal>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnreachableStatus {
    pub fiat_rate: Option<Decimal>,
    pub price_change: Option<Decimal>,
    pub address: Option<NetworkAddress>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NoAccountStatus {
    pub amount_to_create_account: Decimal,
    /// Always zero: the account holds nothing yet.
    pub fiat_amount: Decimal,
    pub fiat_rate: Option<Decimal>,
    pub price_change: Option<Decimal>,
    pub address: NetworkAddress,
    pub sources: Sources,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NoAmountStatus {
    pub fiat_rate: Option<Decimal>,
    pub price_change: Option<Decimal>,
}

/// Balance is known but pricing is unavailable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NoQuoteStatus {
    pub amount: Decimal,
    pub pending_transactions: BTreeSet<PendingTransaction>,
    pub address: NetworkAddress,
    pub sources: Sources,
}

/// User-added token. Fiat fields are best-effort.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomStatus {
    pub amount: Decimal,
    pub fiat_amount: Option<Decimal>,
    pub fiat_rate: Option<Decimal>,
    pub price_change: Option<Decimal>,
    pub yield_balance: Option<YieldBalance>,
    pub pending_transactions: BTreeSet<PendingTransaction>,
    pub address: NetworkAddress,
    pub sources: Sources,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoadedStatus {
    pub amount: Decimal,
    pub fiat_amount: Decimal,
    pub fiat_rate: Decimal,
    pub price_change: Decimal,
    pub yield_balance: Option<YieldBalance>,
    pub pending_transactions: BTreeSet<PendingTransaction>,
    pub address: NetworkAddress,
    pub sources: Sources,
}

// =============================================================================
// Status
// =============================================================================

/// Resolved state of one currency. Always rebuilt, never mutated in place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum CurrencyStatus {
    Loading,
    MissedDerivation(MissedDerivationStatus),
    Unreachable(UnreachableStatus),
    NoAccount(NoAccountStatus),
    NoAmount(NoAmountStatus),
    NoQuote(NoQuoteStatus),
    Custom(CustomStatus),
    Loaded(LoadedStatus),
}

impl CurrencyStatus {
    pub fn kind(&self) -> &'static str {
        match self {
            CurrencyStatus::Loading => "Loading",
            CurrencyStatus::MissedDerivation(_) => "MissedDerivation",
            CurrencyStatus::Unreachable(_) => "Unreachable",
            CurrencyStatus::NoAccount(_) => "NoAccount",
            CurrencyStatus::NoAmount(_) => "NoAmount",
            CurrencyStatus::NoQuote(_) => "NoQuote",
            CurrencyStatus::Custom(_) => "Custom",
            CurrencyStatus::Loaded(_) => "Loaded",
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, CurrencyStatus::Loading)
    }

    pub fn amount(&self) -> Option<Decimal> {
        match self {
            CurrencyStatus::NoQuote(s) => Some(s.amount),
            CurrencyStatus::Custom(s) => Some(s.amount),
            CurrencyStatus::Loaded(s) => Some(s.amount),
            _ => None,
        }
    }

    pub fn fiat_amount(&self) -> Option<Decimal> {
        match self {
            CurrencyStatus::NoAccount(s) => Some(s.fiat_amount),
            CurrencyStatus::Custom(s) => s.fiat_amount,
            CurrencyStatus::Loaded(s) => Some(s.fiat_amount),
            _ => None,
        }
    }

    pub fn fiat_rate(&self) -> Option<Decimal> {
        match self {
            CurrencyStatus::Loading | CurrencyStatus::NoQuote(_) => None,
            CurrencyStatus::MissedDerivation(s) => s.fiat_rate,
            CurrencyStatus::Unreachable(s) => s.fiat_rate,
            CurrencyStatus::NoAccount(s) => s.fiat_rate,
            CurrencyStatus::NoAmount(s) => s.fiat_rate,
            CurrencyStatus::Custom(s) => s.fiat_rate,
            CurrencyStatus::Loaded(s) => Some(s.fiat_rate),
        }
    }

    pub fn price_change(&self) -> Option<Decimal> {
        match self {
            CurrencyStatus::Loading | CurrencyStatus::NoQuote(_) => None,
            CurrencyStatus::MissedDerivation(s) => s.price_change,
            CurrencyStatus::Unreachable(s) => s.price_change,
            CurrencyStatus::NoAccount(s) => s.price_change,
            CurrencyStatus::NoAmount(s) => s.price_change,
            CurrencyStatus::Custom(s) => s.price_change,
            CurrencyStatus::Loaded(s) => Some(s.price_change),
        }
    }

    pub fn yield_balance(&self) -> Option<&YieldBalance> {
        match self {
            CurrencyStatus::Custom(s) => s.yield_balance.as_ref(),
            CurrencyStatus::Loaded(s) => s.yield_balance.as_ref(),
            _ => None,
        }
    }

    pub fn pending_transactions(&self) -> Option<&BTreeSet<PendingTransaction>> {
        match self {
            CurrencyStatus::NoQuote(s) => Some(&s.pending_transactions),
            CurrencyStatus::Custom(s) => Some(&s.pending_transactions),
            CurrencyStatus::Loaded(s) => Some(&s.pending_transactions),
            _ => None,
        }
    }

    pub fn address(&self) -> Option<&NetworkAddress> {
        match self {
            CurrencyStatus::Unreachable(s) => s.address.as_ref(),
            CurrencyStatus::NoAccount(s) => Some(&s.address),
            CurrencyStatus::NoQuote(s) => Some(&s.address),
            CurrencyStatus::Custom(s) => Some(&s.address),
            CurrencyStatus::Loaded(s) => Some(&s.address),
            _ => None,
        }
    }

    pub fn sources(&self) -> Option<&Sources> {
        match self {
            CurrencyStatus::NoAccount(s) => Some(&s.sources),
            CurrencyStatus::NoQuote(s) => Some(&s.sources),
            CurrencyStatus::Custom(s) => Some(&s.sources),
            CurrencyStatus::Loaded(s) => Some(&s.sources),
            _ => None,
        }
    }

    /// Fiat value of the staked amount including rewards. `None` on overflow.
    pub fn staking_fiat_value(&self) -> Option<Decimal> {
        let staked = match self.yield_balance() {
            Some(balance) => balance.total_with_rewards()?,
            None => return Some(Decimal::ZERO),
        };
        let rate = self.fiat_rate().unwrap_or(Decimal::ZERO);
        rate.checked_mul(staked)
    }

    /// Fiat amount plus staking value, missing amounts counted as zero.
    /// `None` on overflow.
    pub fn total_fiat_value(&self) -> Option<Decimal> {
        self.fiat_amount()
            .unwrap_or(Decimal::ZERO)
            .checked_add(self.staking_fiat_value()?)
    }
}

/// A currency together with its resolved status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CryptoCurrencyStatus {
    pub currency: CryptoCurrency,
    pub value: CurrencyStatus,
}

impl CryptoCurrencyStatus {
    pub fn new(currency: CryptoCurrency, value: CurrencyStatus) -> Self {
        Self { currency, value }
    }

    pub fn loading(currency: CryptoCurrency) -> Self {
        Self::new(currency, CurrencyStatus::Loading)
    }
}
