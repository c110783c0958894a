//! Latest value held for each source and their recombination into statuses.

use std::collections::HashMap;

use crate::currencies::{CryptoCurrency, CurrencyId, RawCurrencyId};
use crate::errors::TokenListError;
use crate::networks::NetworkStatus;
use crate::quotes::Quote;
use crate::staking::YieldBalance;
use crate::status::{build_currency_status, CryptoCurrencyStatus};

/// A value from a source, or the reason the source is degraded.
pub(crate) type SourceUpdate<T> = std::result::Result<T, TokenListError>;

/// Combine-latest slots. `None` means the source has not produced anything
/// since the scope started.
#[derive(Debug, Default)]
pub(crate) struct LatestValues {
    pub quotes: Option<SourceUpdate<Vec<Quote>>>,
    pub network_statuses: Option<SourceUpdate<Vec<NetworkStatus>>>,
    pub yield_balances: Option<SourceUpdate<Vec<YieldBalance>>>,
}

impl LatestValues {
    /// Builds the status of every currency from the current slots.
    ///
    /// A degraded network source fails the whole emission. A degraded or
    /// empty quote source marks every currency's quote as failed, and so does
    /// a delivered quote set that lacks a currency or a currency that has no
    /// raw id. A degraded staking source counts as no staking.
    pub fn resolve(
        &self,
        currencies: &[CryptoCurrency],
        integrations: &HashMap<CurrencyId, String>,
    ) -> SourceUpdate<Vec<CryptoCurrencyStatus>> {
        let network_statuses: &[NetworkStatus] = match &self.network_statuses {
            Some(Err(e)) => return Err(e.clone()),
            Some(Ok(statuses)) => statuses,
            None => &[],
        };

        let quotes_requested = currencies.iter().any(|c| c.raw_id.is_some());
        let (quotes, quotes_delivered, quote_source_failed) = match &self.quotes {
            None => (HashMap::new(), false, false),
            Some(Err(_)) => (HashMap::new(), false, true),
            Some(Ok(quotes)) => {
                let by_raw_id: HashMap<&RawCurrencyId, &Quote> =
                    quotes.iter().map(|q| (&q.raw_currency_id, q)).collect();
                let failed = by_raw_id.is_empty() && quotes_requested;
                (by_raw_id, true, failed)
            }
        };

        let yield_balances: &[YieldBalance] = match &self.yield_balances {
            Some(Ok(balances)) => balances,
            _ => &[],
        };

        let statuses = currencies
            .iter()
            .map(|currency| {
                let quote = currency
                    .raw_id
                    .as_ref()
                    .and_then(|raw_id| quotes.get(raw_id).copied());
                let network_status = network_statuses
                    .iter()
                    .find(|status| status.network == currency.network);
                let yield_balance =
                    find_yield_balance(currency, network_status, yield_balances, integrations);
                let quote_fetch_failed = quote_source_failed
                    || (quote.is_none() && quote_never_arrives(currency, quotes_delivered));

                build_currency_status(
                    currency,
                    quote,
                    network_status,
                    yield_balance,
                    quote_fetch_failed,
                )
            })
            .collect();

        Ok(statuses)
    }
}

/// A priced currency without a raw id is never quoted, and one missing from a
/// delivered quote set is not priced by that source. Custom currencies price
/// themselves on a best-effort basis.
fn quote_never_arrives(currency: &CryptoCurrency, quotes_delivered: bool) -> bool {
    if currency.is_custom {
        return false;
    }
    currency.raw_id.is_none() || quotes_delivered
}

/// Balance held by the currency's staking integration at the network address.
fn find_yield_balance<'a>(
    currency: &CryptoCurrency,
    network_status: Option<&NetworkStatus>,
    balances: &'a [YieldBalance],
    integrations: &HashMap<CurrencyId, String>,
) -> Option<&'a YieldBalance> {
    let integration_id = integrations.get(&currency.id)?;
    let address = network_status?.address()?;

    balances.iter().find(|balance| {
        &balance.staking_id.integration_id == integration_id
            && &balance.staking_id.address == address
    })
}
