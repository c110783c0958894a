//! Total fiat balance and price change over a wallet's currency statuses.
//!
//! Both calculations are pure and run synchronously against the latest
//! snapshot emitted by the aggregation service.

use log::{debug, warn};
use rust_decimal::{Decimal, RoundingStrategy};

use super::balance_model::{PriceChange, TotalFiatBalance};
use crate::constants::PRICE_CHANGE_WEIGHT_PRECISION;
use crate::settings::BalanceErrorPolicy;
use crate::status::{CryptoCurrencyStatus, CurrencyStatus, StatusSource};

/// Computes the fiat total of `statuses` in a single pass.
///
/// - Any `Loading` status makes the whole total `Loading`.
/// - `NoQuote` and `MissedDerivation` make it `Failed`.
/// - `Unreachable` and `NoAmount` make it `Failed` unless the network is on the
///   policy's include-on-error list, in which case they count as zero.
/// - `NoAccount` counts as zero. `Loaded` and `Custom` count their fiat amount
///   plus the fiat value of their staking balance.
///
/// Callers pass the statuses of a non-empty wallet; an empty wallet has no
/// token list at all (see `TokenList::NotInitialized`). An empty slice yields
/// `Loaded(0, Actual)`.
pub fn calculate_total_balance(
    statuses: &[CryptoCurrencyStatus],
    policy: &BalanceErrorPolicy,
) -> TotalFiatBalance {
    let mut amount = Decimal::ZERO;
    let mut source = StatusSource::Actual;
    let mut failed = false;

    for status in statuses {
        match &status.value {
            CurrencyStatus::Loading => return TotalFiatBalance::Loading,
            CurrencyStatus::NoQuote(_) | CurrencyStatus::MissedDerivation(_) => failed = true,
            CurrencyStatus::Unreachable(_) | CurrencyStatus::NoAmount(_) => {
                if !policy.is_include_to_balance_on_error(&status.currency.network.id) {
                    failed = true;
                }
            }
            CurrencyStatus::NoAccount(no_account) => {
                source = source.combine(no_account.sources.total());
            }
            CurrencyStatus::Loaded(_) | CurrencyStatus::Custom(_) => {
                if failed {
                    continue;
                }
                let contribution = status.value.total_fiat_value();
                match contribution.and_then(|value| amount.checked_add(value)) {
                    Some(sum) => amount = sum,
                    None => {
                        warn!(
                            "Fiat total overflowed at currency {}, marking total as failed",
                            status.currency.id
                        );
                        failed = true;
                    }
                }
                if let Some(sources) = status.value.sources() {
                    source = source.combine(sources.total());
                }
            }
        }
    }

    if failed {
        debug!("Total balance is not computable for {} statuses", statuses.len());
        return TotalFiatBalance::Failed;
    }

    TotalFiatBalance::loaded(amount, source)
}

/// Folds several totals into one. `Loading` wins over `Failed`.
pub fn combine_total_balances(balances: &[TotalFiatBalance]) -> TotalFiatBalance {
    let mut amount = Decimal::ZERO;
    let mut source = StatusSource::Actual;
    let mut failed = false;

    for balance in balances {
        match balance {
            TotalFiatBalance::Loading => return TotalFiatBalance::Loading,
            TotalFiatBalance::Failed => failed = true,
            TotalFiatBalance::Loaded {
                amount: value,
                source: value_source,
            } => {
                source = source.combine(*value_source);
                match amount.checked_add(*value) {
                    Some(sum) => amount = sum,
                    None => failed = true,
                }
            }
        }
    }

    if failed {
        TotalFiatBalance::Failed
    } else {
        TotalFiatBalance::loaded(amount, source)
    }
}

/// Fiat-weighted average of the statuses' price changes.
///
/// Each weight is `fiat_amount / total`, rounded to two decimal places half-up.
/// A zero total yields a zero change. A `Loading` or `Failed` total is
/// propagated as is.
pub fn calculate_price_change(
    statuses: &[CryptoCurrencyStatus],
    policy: &BalanceErrorPolicy,
) -> PriceChange {
    let (total, source) = match calculate_total_balance(statuses, policy) {
        TotalFiatBalance::Loading => return PriceChange::Loading,
        TotalFiatBalance::Failed => return PriceChange::Failed,
        TotalFiatBalance::Loaded { amount, source } => (amount, source),
    };

    if total.is_zero() {
        return PriceChange::Loaded {
            value: Decimal::ZERO,
            source,
        };
    }

    let mut value = Decimal::ZERO;
    for status in statuses {
        let (Some(fiat_amount), Some(change)) =
            (status.value.fiat_amount(), status.value.price_change())
        else {
            continue;
        };

        let weighted = fiat_amount
            .checked_div(total)
            .map(|weight| {
                weight.round_dp_with_strategy(
                    PRICE_CHANGE_WEIGHT_PRECISION,
                    RoundingStrategy::MidpointAwayFromZero,
                )
            })
            .and_then(|weight| weight.checked_mul(change))
            .and_then(|weighted| value.checked_add(weighted));

        match weighted {
            Some(sum) => value = sum,
            None => {
                warn!(
                    "Price change overflowed at currency {}, marking as failed",
                    status.currency.id
                );
                return PriceChange::Failed;
            }
        }
    }

    PriceChange::Loaded { value, source }
}
