//! Grouping and sorting of currency statuses for display.

use log::warn;
use rust_decimal::Decimal;
use std::collections::HashMap;

use super::token_list_model::*;
use crate::currencies::Network;
use crate::errors::TokenListError;
use crate::portfolio::balance::calculate_total_balance;
use crate::settings::BalanceErrorPolicy;
use crate::status::CryptoCurrencyStatus;

/// Arranges `statuses` for display.
///
/// Never fails: when sorting or grouping cannot be completed the ungrouped,
/// unsorted list is returned instead.
pub fn build_token_list(
    statuses: &[CryptoCurrencyStatus],
    group_by: TokensGroupType,
    sort_by: TokensSortType,
    policy: &BalanceErrorPolicy,
) -> TokenList {
    match try_build_token_list(statuses, group_by, sort_by, policy) {
        Ok(list) => list,
        Err(e) => {
            warn!(
                "Falling back to unsorted token list of {} currencies: {}",
                statuses.len(),
                e
            );
            TokenList::Ungrouped {
                sorted_by: TokensSortType::None,
                total_fiat_balance: calculate_total_balance(statuses, policy),
                currencies: statuses.to_vec(),
            }
        }
    }
}

/// Like [`build_token_list`] but reports why the requested arrangement could
/// not be produced.
pub fn try_build_token_list(
    statuses: &[CryptoCurrencyStatus],
    group_by: TokensGroupType,
    sort_by: TokensSortType,
    policy: &BalanceErrorPolicy,
) -> std::result::Result<TokenList, TokenListError> {
    if statuses.is_empty() {
        return Ok(TokenList::NotInitialized);
    }

    let total_fiat_balance = calculate_total_balance(statuses, policy);

    match group_by {
        TokensGroupType::None => {
            let currencies = match sort_by {
                TokensSortType::None => statuses.to_vec(),
                TokensSortType::Balance => sort_by_balance(statuses.to_vec())?,
            };
            Ok(TokenList::Ungrouped {
                sorted_by: sort_by,
                total_fiat_balance,
                currencies,
            })
        }
        TokensGroupType::Network => {
            let mut groups = group_by_network(statuses);
            if sort_by == TokensSortType::Balance {
                for group in groups.iter_mut() {
                    let currencies = std::mem::take(&mut group.currencies);
                    group.currencies = sort_by_balance(currencies)?;
                }
                if !statuses.iter().any(|status| status.value.is_loading()) {
                    groups = sort_groups_by_balance(groups)?;
                }
            }
            Ok(TokenList::GroupedByNetwork {
                sorted_by: sort_by,
                total_fiat_balance,
                groups,
            })
        }
    }
}

/// Stable descending sort by total fiat value. A scope with a `Loading`
/// member keeps its order.
fn sort_by_balance(
    currencies: Vec<CryptoCurrencyStatus>,
) -> std::result::Result<Vec<CryptoCurrencyStatus>, TokenListError> {
    if currencies.iter().any(|status| status.value.is_loading()) {
        return Ok(currencies);
    }

    let mut keyed = currencies
        .into_iter()
        .map(|status| {
            status
                .value
                .total_fiat_value()
                .map(|balance| (balance, status))
                .ok_or(TokenListError::UnableToSortTokenList)
        })
        .collect::<std::result::Result<Vec<_>, _>>()?;

    keyed.sort_by(|(a, _), (b, _)| b.cmp(a));

    Ok(keyed.into_iter().map(|(_, status)| status).collect())
}

/// Groups by network in order of first appearance.
fn group_by_network(statuses: &[CryptoCurrencyStatus]) -> Vec<NetworkGroup> {
    let mut index: HashMap<&Network, usize> = HashMap::new();
    let mut groups: Vec<NetworkGroup> = Vec::new();

    for status in statuses {
        let network = &status.currency.network;
        match index.get(network) {
            Some(&position) => groups[position].currencies.push(status.clone()),
            None => {
                index.insert(network, groups.len());
                groups.push(NetworkGroup {
                    network: network.clone(),
                    currencies: vec![status.clone()],
                });
            }
        }
    }

    groups
}

fn sort_groups_by_balance(
    groups: Vec<NetworkGroup>,
) -> std::result::Result<Vec<NetworkGroup>, TokenListError> {
    let mut keyed = groups
        .into_iter()
        .map(|group| {
            group
                .currencies
                .iter()
                .try_fold(Decimal::ZERO, |sum, status| {
                    sum.checked_add(status.value.total_fiat_value()?)
                })
                .map(|balance| (balance, group))
                .ok_or(TokenListError::UnableToGroupTokenList)
        })
        .collect::<std::result::Result<Vec<_>, _>>()?;

    keyed.sort_by(|(a, _), (b, _)| b.cmp(a));

    Ok(keyed.into_iter().map(|(_, group)| group).collect())
}
