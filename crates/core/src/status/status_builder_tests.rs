//! Tests for the currency status builder.
//!
//! Resolution order:
//! 1. No network status -> Loading
//! 2. MissedDerivation / Unreachable / NoAccount -> matching variant with quote fields
//! 3. Verified: missing amount -> Loading, NotFound -> NoAmount, then
//!    quote failure -> NoQuote, custom -> Custom, no quote -> Loading, else Loaded

use rust_decimal_macros::dec;
use std::collections::{BTreeSet, HashMap};

use super::*;
use crate::networks::{
    NetworkAddress, NetworkAmount, NetworkStatus, NetworkStatusValue, PendingTransaction,
};
use crate::staking::{StakingId, YieldBalance, YieldBalanceItem};
use crate::test_fixtures::*;

fn eth_quote() -> crate::quotes::Quote {
    quote_for(&coin(&ethereum()), dec!(1800), dec!(-2.5))
}

// =========================================================================
// Non-verified networks
// =========================================================================

#[test]
fn test_no_network_status_is_loading() {
    let currency = coin(&ethereum());
    let quote = eth_quote();

    let status = build_status_value(&currency, Some(&quote), None, None, false);

    assert_eq!(status, CurrencyStatus::Loading);
}

#[test]
fn test_missed_derivation_carries_quote_fields() {
    let currency = coin(&ethereum());
    let quote = eth_quote();
    let network_status = NetworkStatus::new(ethereum(), NetworkStatusValue::MissedDerivation);

    let status = build_status_value(&currency, Some(&quote), Some(&network_status), None, false);

    assert_eq!(
        status,
        CurrencyStatus::MissedDerivation(MissedDerivationStatus {
            fiat_rate: Some(dec!(1800)),
            price_change: Some(dec!(-2.5)),
        })
    );
}

#[test]
fn test_missed_derivation_without_quote() {
    let currency = coin(&ethereum());
    let network_status = NetworkStatus::new(ethereum(), NetworkStatusValue::MissedDerivation);

    let status = build_status_value(&currency, None, Some(&network_status), None, true);

    assert_eq!(
        status,
        CurrencyStatus::MissedDerivation(MissedDerivationStatus {
            fiat_rate: None,
            price_change: None,
        })
    );
}

#[test]
fn test_unreachable_keeps_last_known_address() {
    let currency = coin(&ethereum());
    let quote = eth_quote();
    let network_status = NetworkStatus::new(
        ethereum(),
        NetworkStatusValue::Unreachable {
            address: Some(address()),
        },
    );

    let status = build_status_value(&currency, Some(&quote), Some(&network_status), None, false);

    assert_eq!(
        status,
        CurrencyStatus::Unreachable(UnreachableStatus {
            fiat_rate: Some(dec!(1800)),
            price_change: Some(dec!(-2.5)),
            address: Some(address()),
        })
    );
}

#[test]
fn test_no_account_has_zero_fiat_amount() {
    let currency = coin(&ethereum());
    let quote = eth_quote();
    let network_status = NetworkStatus::new(
        ethereum(),
        NetworkStatusValue::NoAccount {
            address: address(),
            amount_to_create_account: dec!(1),
            source: StatusSource::Cache,
        },
    );

    let status = build_status_value(&currency, Some(&quote), Some(&network_status), None, false);

    assert_eq!(
        status,
        CurrencyStatus::NoAccount(NoAccountStatus {
            amount_to_create_account: dec!(1),
            fiat_amount: dec!(0),
            fiat_rate: Some(dec!(1800)),
            price_change: Some(dec!(-2.5)),
            address: address(),
            sources: Sources::new(StatusSource::Cache, StatusSource::Actual, StatusSource::Actual),
        })
    );
}

// =========================================================================
// Verified networks
// =========================================================================

#[test]
fn test_verified_without_currency_amount_is_loading() {
    let network = ethereum();
    let currency = token(&network, "USDT");
    let other = coin(&network);
    let quote = quote_for(&currency, dec!(1), dec!(0));
    let network_status = verified(&network, &[(&other, NetworkAmount::Loaded(dec!(1)))]);

    let status = build_status_value(&currency, Some(&quote), Some(&network_status), None, false);

    assert_eq!(status, CurrencyStatus::Loading);
}

#[test]
fn test_verified_with_not_found_amount_is_no_amount() {
    let network = ethereum();
    let currency = coin(&network);
    let quote = eth_quote();
    let network_status = verified(&network, &[(&currency, NetworkAmount::NotFound)]);

    let status = build_status_value(&currency, Some(&quote), Some(&network_status), None, false);

    assert_eq!(
        status,
        CurrencyStatus::NoAmount(NoAmountStatus {
            fiat_rate: Some(dec!(1800)),
            price_change: Some(dec!(-2.5)),
        })
    );
}

#[test]
fn test_verified_with_failed_quotes_is_no_quote() {
    let network = ethereum();
    let currency = coin(&network);
    let quote = eth_quote();
    let network_status = verified(&network, &[(&currency, NetworkAmount::Loaded(dec!(2)))]);

    let status = build_status_value(&currency, Some(&quote), Some(&network_status), None, true);

    assert_eq!(
        status,
        CurrencyStatus::NoQuote(NoQuoteStatus {
            amount: dec!(2),
            pending_transactions: BTreeSet::new(),
            address: address(),
            sources: Sources::default(),
        })
    );
}

#[test]
fn test_quote_failure_wins_over_custom() {
    let network = ethereum();
    let currency = custom_token(&network, "MYT");
    let network_status = verified(&network, &[(&currency, NetworkAmount::Loaded(dec!(2)))]);

    let status = build_status_value(&currency, None, Some(&network_status), None, true);

    assert_eq!(status.kind(), "NoQuote");
}

#[test]
fn test_verified_without_quote_is_loading_for_regular_currency() {
    let network = ethereum();
    let currency = coin(&network);
    let network_status = verified(&network, &[(&currency, NetworkAmount::Loaded(dec!(2)))]);

    let status = build_status_value(&currency, None, Some(&network_status), None, false);

    assert_eq!(status, CurrencyStatus::Loading);
}

#[test]
fn test_custom_without_quote_has_no_fiat_amount() {
    let network = ethereum();
    let currency = custom_token(&network, "MYT");
    let network_status = verified(&network, &[(&currency, NetworkAmount::Loaded(dec!(10)))]);

    let status = build_status_value(&currency, None, Some(&network_status), None, false);

    assert_eq!(
        status,
        CurrencyStatus::Custom(CustomStatus {
            amount: dec!(10),
            fiat_amount: None,
            fiat_rate: None,
            price_change: None,
            yield_balance: None,
            pending_transactions: BTreeSet::new(),
            address: address(),
            sources: Sources::default(),
        })
    );
}

#[test]
fn test_custom_with_quote_prices_amount() {
    let network = ethereum();
    let currency = custom_token(&network, "MYT");
    let quote = quote_for(&currency, dec!(0.5), dec!(3)).with_source(StatusSource::Cache);
    let network_status = verified(&network, &[(&currency, NetworkAmount::Loaded(dec!(10)))]);

    let status = build_status_value(&currency, Some(&quote), Some(&network_status), None, false);

    assert_eq!(status.fiat_amount(), Some(dec!(5)));
    assert_eq!(status.price_change(), Some(dec!(3)));
    assert_eq!(status.sources().map(Sources::total), Some(StatusSource::Cache));
}

#[test]
fn test_unpriceable_balance_is_no_quote() {
    let network = ethereum();
    let currency = coin(&network);
    let quote = quote_for(&currency, dec!(10), dec!(1));
    let amount = rust_decimal::Decimal::MAX / dec!(2);
    let network_status = verified(&network, &[(&currency, NetworkAmount::Loaded(amount))]);

    let status = build_status_value(&currency, Some(&quote), Some(&network_status), None, false);

    assert_eq!(status.kind(), "NoQuote");
    assert_eq!(status.amount(), Some(amount));
    assert_eq!(status.fiat_amount(), None);
}

#[test]
fn test_unpriceable_custom_balance_has_no_fiat_amount() {
    let network = ethereum();
    let currency = custom_token(&network, "MYT");
    let quote = quote_for(&currency, dec!(10), dec!(1));
    let amount = rust_decimal::Decimal::MAX / dec!(2);
    let network_status = verified(&network, &[(&currency, NetworkAmount::Loaded(amount))]);

    let status = build_status_value(&currency, Some(&quote), Some(&network_status), None, false);

    assert_eq!(status.kind(), "Custom");
    assert_eq!(status.fiat_amount(), None);
    assert_eq!(status.fiat_rate(), Some(dec!(10)));
}

#[test]
fn test_overflowing_yield_balance_has_no_staking_value() {
    let network = cardano();
    let currency = coin(&network);
    let quote = quote_for(&currency, dec!(0.5), dec!(1));
    let network_status = verified(&network, &[(&currency, NetworkAmount::Loaded(dec!(10)))]);
    let half = rust_decimal::Decimal::MAX / dec!(2);
    let balance = cardano_yield("0x123", &[("cardano", half), ("cardano", half)]);

    let status = build_status_value(
        &currency,
        Some(&quote),
        Some(&network_status),
        Some(&balance),
        false,
    );

    assert_eq!(status.kind(), "Loaded");
    assert_eq!(status.yield_balance().unwrap().total_with_rewards(), None);
    assert_eq!(status.staking_fiat_value(), None);
    assert_eq!(status.total_fiat_value(), None);
}

#[test]
fn test_loaded_multiplies_amount_by_rate() {
    let network = ethereum();
    let currency = coin(&network);
    let quote = eth_quote();
    let pending = PendingTransaction {
        hash: "0xabc".to_string(),
        amount: dec!(0.1),
        is_incoming: true,
        timestamp: None,
    };
    let network_status = NetworkStatus::new(
        network.clone(),
        NetworkStatusValue::Verified {
            address: address(),
            amounts: HashMap::from([(currency.id.clone(), NetworkAmount::Loaded(dec!(2)))]),
            pending_transactions: HashMap::from([(
                currency.id.clone(),
                BTreeSet::from([pending.clone()]),
            )]),
            source: StatusSource::Actual,
        },
    );

    let status = build_status_value(&currency, Some(&quote), Some(&network_status), None, false);

    assert_eq!(
        status,
        CurrencyStatus::Loaded(LoadedStatus {
            amount: dec!(2),
            fiat_amount: dec!(3600),
            fiat_rate: dec!(1800),
            price_change: dec!(-2.5),
            yield_balance: None,
            pending_transactions: BTreeSet::from([pending]),
            address: address(),
            sources: Sources::default(),
        })
    );
}

// =========================================================================
// Yield balances
// =========================================================================

fn cardano_yield(address: &str, tokens: &[(&str, rust_decimal::Decimal)]) -> YieldBalance {
    YieldBalance {
        staking_id: StakingId {
            integration_id: "cardano-ada-native-staking".to_string(),
            address: NetworkAddress::new(address),
        },
        items: tokens
            .iter()
            .map(|(token, amount)| YieldBalanceItem {
                token: crate::currencies::RawCurrencyId::new(*token),
                amount: *amount,
                rewards: dec!(1),
            })
            .collect(),
        source: StatusSource::Cache,
    }
}

#[test]
fn test_yield_balance_attached_to_loaded() {
    let network = cardano();
    let currency = coin(&network);
    let quote = quote_for(&currency, dec!(0.5), dec!(1));
    let network_status = verified(&network, &[(&currency, NetworkAmount::Loaded(dec!(10)))]);
    let balance = cardano_yield("0x123", &[("cardano", dec!(100)), ("other", dec!(5))]);

    let status = build_status_value(
        &currency,
        Some(&quote),
        Some(&network_status),
        Some(&balance),
        false,
    );

    let attached = status.yield_balance().unwrap();
    assert_eq!(attached.items.len(), 1);
    assert_eq!(attached.total_with_rewards(), Some(dec!(101)));
    assert_eq!(status.staking_fiat_value(), Some(dec!(50.5)));
    assert_eq!(
        status.sources().map(|s| s.yield_balance_source),
        Some(StatusSource::Cache)
    );
}

#[test]
fn test_yield_balance_for_other_address_is_not_attached() {
    let network = cardano();
    let currency = coin(&network);
    let quote = quote_for(&currency, dec!(0.5), dec!(1));
    let network_status = verified(&network, &[(&currency, NetworkAmount::Loaded(dec!(10)))]);
    let balance = cardano_yield("addr_other", &[("cardano", dec!(100))]);

    let status = build_status_value(
        &currency,
        Some(&quote),
        Some(&network_status),
        Some(&balance),
        false,
    );

    assert_eq!(status.kind(), "Loaded");
    assert!(status.yield_balance().is_none());
}

#[test]
fn test_yield_balance_without_matching_items_is_absent() {
    let network = cardano();
    let currency = coin(&network);
    let quote = quote_for(&currency, dec!(0.5), dec!(1));
    let network_status = verified(&network, &[(&currency, NetworkAmount::Loaded(dec!(10)))]);
    let balance = cardano_yield("0x123", &[("other", dec!(100))]);

    let status = build_status_value(
        &currency,
        Some(&quote),
        Some(&network_status),
        Some(&balance),
        false,
    );

    assert!(status.yield_balance().is_none());
    assert_eq!(
        status.sources().map(|s| s.yield_balance_source),
        Some(StatusSource::Actual)
    );
}

#[test]
fn test_yield_balance_not_attached_to_no_quote() {
    let network = cardano();
    let currency = coin(&network);
    let network_status = verified(&network, &[(&currency, NetworkAmount::Loaded(dec!(10)))]);
    let balance = cardano_yield("0x123", &[("cardano", dec!(100))]);

    let status = build_status_value(&currency, None, Some(&network_status), Some(&balance), true);

    assert_eq!(status.kind(), "NoQuote");
    assert!(status.yield_balance().is_none());
}

#[test]
fn test_build_is_repeatable() {
    let network = cardano();
    let currency = coin(&network);
    let quote = quote_for(&currency, dec!(0.5), dec!(1));
    let network_status = verified(&network, &[(&currency, NetworkAmount::Loaded(dec!(10)))]);
    let balance = cardano_yield("0x123", &[("cardano", dec!(100))]);

    let first = build_currency_status(
        &currency,
        Some(&quote),
        Some(&network_status),
        Some(&balance),
        false,
    );
    let second = build_currency_status(
        &currency,
        Some(&quote),
        Some(&network_status),
        Some(&balance),
        false,
    );

    assert_eq!(first, second);
    assert_eq!(first.currency, currency);
}
