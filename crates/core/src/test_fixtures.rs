//! Shared builders for unit tests.

use rust_decimal::Decimal;
use std::collections::{BTreeSet, HashMap};

use crate::currencies::{CryptoCurrency, CurrencyId, Network, RawCurrencyId};
use crate::networks::{NetworkAddress, NetworkAmount, NetworkStatus, NetworkStatusValue};
use crate::quotes::Quote;
use crate::staking::{StakingId, YieldBalance, YieldBalanceItem};
use crate::status::*;

pub fn ethereum() -> Network {
    Network::new("ethereum", "Ethereum")
}

pub fn cardano() -> Network {
    Network::new("cardano", "Cardano")
}

pub fn binance() -> Network {
    Network::new("binance", "BNB Beacon Chain")
}

pub fn coin(network: &Network) -> CryptoCurrency {
    let raw = network.id.as_str();
    CryptoCurrency {
        id: CurrencyId::new(format!("coin:{}", raw)),
        raw_id: Some(RawCurrencyId::new(raw)),
        network: network.clone(),
        name: network.name.clone(),
        symbol: raw.to_uppercase(),
        decimals: 18,
        is_custom: false,
    }
}

pub fn token(network: &Network, symbol: &str) -> CryptoCurrency {
    CryptoCurrency {
        id: CurrencyId::new(format!("token:{}:{}", network.id, symbol.to_lowercase())),
        raw_id: Some(RawCurrencyId::new(symbol.to_lowercase())),
        network: network.clone(),
        name: symbol.to_string(),
        symbol: symbol.to_string(),
        decimals: 6,
        is_custom: false,
    }
}

pub fn custom_token(network: &Network, symbol: &str) -> CryptoCurrency {
    CryptoCurrency {
        is_custom: true,
        raw_id: None,
        ..token(network, symbol)
    }
}

pub fn quote_for(currency: &CryptoCurrency, fiat_rate: Decimal, price_change: Decimal) -> Quote {
    let raw = currency
        .raw_id
        .clone()
        .unwrap_or_else(|| RawCurrencyId::new(currency.id.as_str()));
    Quote {
        raw_currency_id: raw,
        fiat_rate,
        price_change,
        source: StatusSource::Actual,
    }
}

pub fn address() -> NetworkAddress {
    NetworkAddress::new("0x123")
}

pub fn verified(network: &Network, amounts: &[(&CryptoCurrency, NetworkAmount)]) -> NetworkStatus {
    NetworkStatus::new(
        network.clone(),
        NetworkStatusValue::Verified {
            address: address(),
            amounts: amounts
                .iter()
                .map(|(currency, amount)| (currency.id.clone(), *amount))
                .collect::<HashMap<_, _>>(),
            pending_transactions: HashMap::new(),
            source: StatusSource::Actual,
        },
    )
}

pub fn loaded(currency: &CryptoCurrency, fiat_amount: Decimal, price_change: Decimal) -> CryptoCurrencyStatus {
    CryptoCurrencyStatus::new(
        currency.clone(),
        CurrencyStatus::Loaded(LoadedStatus {
            amount: Decimal::ONE,
            fiat_amount,
            fiat_rate: fiat_amount,
            price_change,
            yield_balance: None,
            pending_transactions: BTreeSet::new(),
            address: address(),
            sources: Sources::default(),
        }),
    )
}

pub fn loaded_with_source(
    currency: &CryptoCurrency,
    fiat_amount: Decimal,
    source: StatusSource,
) -> CryptoCurrencyStatus {
    let mut status = loaded(currency, fiat_amount, Decimal::ZERO);
    if let CurrencyStatus::Loaded(ref mut inner) = status.value {
        inner.sources = Sources::new(source, source, source);
    }
    status
}

pub fn custom(currency: &CryptoCurrency, fiat_amount: Option<Decimal>) -> CryptoCurrencyStatus {
    CryptoCurrencyStatus::new(
        currency.clone(),
        CurrencyStatus::Custom(CustomStatus {
            amount: Decimal::ONE,
            fiat_amount,
            fiat_rate: fiat_amount,
            price_change: Some(Decimal::ZERO),
            yield_balance: None,
            pending_transactions: BTreeSet::new(),
            address: address(),
            sources: Sources::default(),
        }),
    )
}

pub fn loading(currency: &CryptoCurrency) -> CryptoCurrencyStatus {
    CryptoCurrencyStatus::loading(currency.clone())
}

pub fn no_quote(currency: &CryptoCurrency) -> CryptoCurrencyStatus {
    CryptoCurrencyStatus::new(
        currency.clone(),
        CurrencyStatus::NoQuote(NoQuoteStatus {
            amount: Decimal::ONE,
            pending_transactions: BTreeSet::new(),
            address: address(),
            sources: Sources::default(),
        }),
    )
}

pub fn missed_derivation(currency: &CryptoCurrency) -> CryptoCurrencyStatus {
    CryptoCurrencyStatus::new(
        currency.clone(),
        CurrencyStatus::MissedDerivation(MissedDerivationStatus {
            fiat_rate: None,
            price_change: None,
        }),
    )
}

pub fn unreachable(currency: &CryptoCurrency) -> CryptoCurrencyStatus {
    CryptoCurrencyStatus::new(
        currency.clone(),
        CurrencyStatus::Unreachable(UnreachableStatus {
            fiat_rate: None,
            price_change: None,
            address: None,
        }),
    )
}

pub fn no_amount(currency: &CryptoCurrency) -> CryptoCurrencyStatus {
    CryptoCurrencyStatus::new(
        currency.clone(),
        CurrencyStatus::NoAmount(NoAmountStatus {
            fiat_rate: None,
            price_change: None,
        }),
    )
}

pub fn no_account(currency: &CryptoCurrency) -> CryptoCurrencyStatus {
    CryptoCurrencyStatus::new(
        currency.clone(),
        CurrencyStatus::NoAccount(NoAccountStatus {
            amount_to_create_account: Decimal::ONE,
            fiat_amount: Decimal::ZERO,
            fiat_rate: None,
            price_change: None,
            address: address(),
            sources: Sources::default(),
        }),
    )
}

/// Attaches staking positions `(amount, rewards)` for the currency's raw id to a
/// `Loaded` status.
pub fn with_staked(mut status: CryptoCurrencyStatus, positions: &[(Decimal, Decimal)]) -> CryptoCurrencyStatus {
    let token = status
        .currency
        .raw_id
        .clone()
        .unwrap_or_else(|| RawCurrencyId::new(status.currency.id.as_str()));
    if let CurrencyStatus::Loaded(ref mut inner) = status.value {
        inner.yield_balance = Some(YieldBalance {
            staking_id: StakingId {
                integration_id: "test-staking".to_string(),
                address: address(),
            },
            items: positions
                .iter()
                .map(|(amount, rewards)| YieldBalanceItem {
                    token: token.clone(),
                    amount: *amount,
                    rewards: *rewards,
                })
                .collect(),
            source: StatusSource::Actual,
        });
    }
    status
}
