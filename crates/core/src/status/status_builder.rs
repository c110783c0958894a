//! Resolution of a single currency's status.
//!
//! The builder is a pure function of its inputs. All failure states are
//! returned as status variants, so it can be re-run on every upstream tick.

use rust_decimal::Decimal;
use std::collections::BTreeSet;

use super::status_model::*;
use crate::currencies::CryptoCurrency;
use crate::networks::{NetworkAmount, NetworkStatus, NetworkStatusValue};
use crate::quotes::Quote;
use crate::staking::YieldBalance;

/// Builds the status of `currency` from whatever each source currently knows.
///
/// # Arguments
///
/// * `quote` - Latest quote for the currency's raw id, if one arrived
/// * `network_status` - Latest status of the currency's network; `None` until
///   the network produced anything
/// * `yield_balance` - Candidate staking balance; only items at the network
///   address for the currency's raw id are kept
/// * `quote_fetch_failed` - The quote source is degraded as a whole
pub fn build_currency_status(
    currency: &CryptoCurrency,
    quote: Option<&Quote>,
    network_status: Option<&NetworkStatus>,
    yield_balance: Option<&YieldBalance>,
    quote_fetch_failed: bool,
) -> CryptoCurrencyStatus {
    let value = build_status_value(
        currency,
        quote,
        network_status,
        yield_balance,
        quote_fetch_failed,
    );
    CryptoCurrencyStatus::new(currency.clone(), value)
}

/// See [`build_currency_status`]. First match wins.
///
/// A fiat amount that overflows leaves a custom currency unpriced and turns a
/// regular one into `NoQuote`.
pub fn build_status_value(
    currency: &CryptoCurrency,
    quote: Option<&Quote>,
    network_status: Option<&NetworkStatus>,
    yield_balance: Option<&YieldBalance>,
    quote_fetch_failed: bool,
) -> CurrencyStatus {
    let Some(network_status) = network_status else {
        return CurrencyStatus::Loading;
    };

    let fiat_rate = quote.map(|q| q.fiat_rate);
    let price_change = quote.map(|q| q.price_change);
    let quote_source = quote.map(|q| q.source).unwrap_or_default();

    match &network_status.value {
        NetworkStatusValue::MissedDerivation => {
            CurrencyStatus::MissedDerivation(MissedDerivationStatus {
                fiat_rate,
                price_change,
            })
        }
        NetworkStatusValue::Unreachable { address } => {
            CurrencyStatus::Unreachable(UnreachableStatus {
                fiat_rate,
                price_change,
                address: address.clone(),
            })
        }
        NetworkStatusValue::NoAccount {
            address,
            amount_to_create_account,
            source,
        } => CurrencyStatus::NoAccount(NoAccountStatus {
            amount_to_create_account: *amount_to_create_account,
            fiat_amount: Decimal::ZERO,
            fiat_rate,
            price_change,
            address: address.clone(),
            sources: Sources::new(*source, quote_source, StatusSource::Actual),
        }),
        NetworkStatusValue::Verified {
            address,
            amounts,
            pending_transactions,
            source,
        } => {
            let amount = match amounts.get(&currency.id) {
                // Network answered, this currency is not resolved yet
                None => return CurrencyStatus::Loading,
                Some(NetworkAmount::NotFound) => {
                    return CurrencyStatus::NoAmount(NoAmountStatus {
                        fiat_rate,
                        price_change,
                    })
                }
                Some(NetworkAmount::Loaded(amount)) => *amount,
            };

            let pending_transactions = pending_transactions
                .get(&currency.id)
                .cloned()
                .unwrap_or_else(BTreeSet::new);

            if quote_fetch_failed {
                return CurrencyStatus::NoQuote(NoQuoteStatus {
                    amount,
                    pending_transactions,
                    address: address.clone(),
                    sources: Sources::new(*source, StatusSource::Actual, StatusSource::Actual),
                });
            }

            let yield_balance = currency.raw_id.as_ref().and_then(|raw_id| {
                yield_balance.and_then(|balance| balance.matching(address, raw_id))
            });
            let yield_source = yield_balance
                .as_ref()
                .map(|balance| balance.source)
                .unwrap_or_default();
            let sources = Sources::new(*source, quote_source, yield_source);

            if currency.is_custom {
                return CurrencyStatus::Custom(CustomStatus {
                    amount,
                    fiat_amount: fiat_rate.and_then(|rate| amount.checked_mul(rate)),
                    fiat_rate,
                    price_change,
                    yield_balance,
                    pending_transactions,
                    address: address.clone(),
                    sources,
                });
            }

            let Some(quote) = quote else {
                // Quote still in flight
                return CurrencyStatus::Loading;
            };

            match amount.checked_mul(quote.fiat_rate) {
                // Balance cannot be priced
                None => CurrencyStatus::NoQuote(NoQuoteStatus {
                    amount,
                    pending_transactions,
                    address: address.clone(),
                    sources,
                }),
                Some(fiat_amount) => CurrencyStatus::Loaded(LoadedStatus {
                    amount,
                    fiat_amount,
                    fiat_rate: quote.fiat_rate,
                    price_change: quote.price_change,
                    yield_balance,
                    pending_transactions,
                    address: address.clone(),
                    sources,
                }),
            }
        }
    }
}
