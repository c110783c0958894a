use async_trait::async_trait;
use futures::stream::BoxStream;
use futures::StreamExt;
use log::{debug, info, warn};
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio_stream::wrappers::ReceiverStream;

use super::latest_values::{LatestValues, SourceUpdate};
use super::statuses_model::{CurrencyStatusUpdate, StatusesUpdate};
use super::statuses_scope::{ScopeEvent, SourceRepositories, StatusesScope};
use crate::currencies::{
    CryptoCurrency, CurrenciesRepositoryTrait, CurrencyId, DataStream, Network, RawCurrencyId,
    UserWalletId,
};
use crate::errors::TokenListError;
use crate::networks::NetworkStatusRepositoryTrait;
use crate::quotes::QuoteRepositoryTrait;
use crate::settings::AggregationSettings;
use crate::staking::StakingRepositoryTrait;
use crate::status::CryptoCurrencyStatus;

/// Live statuses of a wallet's currencies.
#[async_trait]
pub trait CurrencyStatusesServiceTrait: Send + Sync {
    /// Streams the statuses of every currency in the wallet.
    ///
    /// The stream starts with a snapshot in which every currency is `Loading`
    /// and then follows every change of any source. Source failures show up as
    /// degraded statuses or as `Err` items; the stream keeps going either way.
    /// A wallet without currencies yields `Err(EmptyCurrencies)` until its
    /// currency set changes. Consecutive items are never equal.
    ///
    /// Must be called within a Tokio runtime. Dropping the stream stops every
    /// subscription behind it.
    fn observe_statuses(&self, wallet_id: &UserWalletId) -> BoxStream<'static, StatusesUpdate>;

    /// Streams the status of one currency of the wallet.
    fn observe_currency_status(
        &self,
        wallet_id: &UserWalletId,
        currency_id: &CurrencyId,
    ) -> BoxStream<'static, CurrencyStatusUpdate>;

    /// Resolves the statuses once from the first value of every source,
    /// without refreshing and without retries.
    async fn load_statuses(
        &self,
        wallet_id: &UserWalletId,
    ) -> std::result::Result<Vec<CryptoCurrencyStatus>, TokenListError>;
}

pub struct CurrencyStatusesService {
    currencies_repository: Arc<dyn CurrenciesRepositoryTrait>,
    repositories: SourceRepositories,
    settings: AggregationSettings,
}

impl CurrencyStatusesService {
    pub fn new(
        currencies_repository: Arc<dyn CurrenciesRepositoryTrait>,
        quote_repository: Arc<dyn QuoteRepositoryTrait>,
        network_status_repository: Arc<dyn NetworkStatusRepositoryTrait>,
        staking_repository: Arc<dyn StakingRepositoryTrait>,
        settings: AggregationSettings,
    ) -> Self {
        Self {
            currencies_repository,
            repositories: SourceRepositories {
                quotes: quote_repository,
                network_statuses: network_status_repository,
                staking: staking_repository,
            },
            settings,
        }
    }
}

#[async_trait]
impl CurrencyStatusesServiceTrait for CurrencyStatusesService {
    fn observe_statuses(&self, wallet_id: &UserWalletId) -> BoxStream<'static, StatusesUpdate> {
        let capacity = self.settings.channel_capacity.max(1);
        let (tx, rx) = mpsc::channel(capacity);

        let worker = StatusesWorker {
            wallet_id: wallet_id.clone(),
            repositories: self.repositories.clone(),
            backoff: self.settings.retry_backoff(),
            capacity,
            output: tx,
            last_emitted: None,
        };
        let currencies = self.currencies_repository.observe(wallet_id);
        tokio::spawn(worker.run(currencies));

        Box::pin(ReceiverStream::new(rx))
    }

    fn observe_currency_status(
        &self,
        wallet_id: &UserWalletId,
        currency_id: &CurrencyId,
    ) -> BoxStream<'static, CurrencyStatusUpdate> {
        let currency_id = currency_id.clone();
        let updates = self.observe_statuses(wallet_id).map(move |update| {
            let snapshot = update?;
            snapshot
                .statuses
                .into_iter()
                .find(|status| status.currency.id == currency_id)
                .ok_or_else(|| {
                    TokenListError::DataError(format!("Currency {} is not in the wallet", currency_id))
                })
        });

        distinct_until_changed(updates.boxed())
    }

    async fn load_statuses(
        &self,
        wallet_id: &UserWalletId,
    ) -> std::result::Result<Vec<CryptoCurrencyStatus>, TokenListError> {
        let currencies = match self.currencies_repository.observe(wallet_id).next().await {
            Some(Ok(currencies)) => currencies,
            Some(Err(e)) => return Err(TokenListError::data(e)),
            None => {
                return Err(TokenListError::DataError(
                    "Currency source completed without data".to_string(),
                ))
            }
        };

        if currencies.is_empty() {
            warn!("Wallet {} has no currencies", wallet_id);
            return Err(TokenListError::EmptyCurrencies);
        }

        let networks: HashSet<Network> =
            currencies.iter().map(|c| c.network.clone()).collect();
        let raw_ids: HashSet<RawCurrencyId> =
            currencies.iter().filter_map(|c| c.raw_id.clone()).collect();

        let quotes = async {
            if raw_ids.is_empty() {
                Ok(Vec::new())
            } else {
                first_value(
                    self.repositories.quotes.observe(&raw_ids),
                    TokenListError::EmptyQuotes,
                )
                .await
            }
        };
        let (quotes, network_statuses, yield_balances) = tokio::join!(
            quotes,
            first_value(
                self.repositories
                    .network_statuses
                    .observe(wallet_id, &networks),
                TokenListError::EmptyNetworkStatuses,
            ),
            first_value(
                self.repositories.staking.observe(wallet_id, &currencies),
                TokenListError::EmptyYieldBalances,
            ),
        );

        let latest = LatestValues {
            quotes: Some(quotes),
            network_statuses: Some(network_statuses),
            yield_balances: Some(yield_balances),
        };
        latest.resolve(&currencies, &self.repositories.integrations(&currencies))
    }
}

async fn first_value<T>(mut stream: DataStream<T>, on_empty: TokenListError) -> SourceUpdate<T> {
    match stream.next().await {
        Some(Ok(value)) => Ok(value),
        Some(Err(e)) => Err(TokenListError::data(e)),
        None => Err(on_empty),
    }
}

fn distinct_until_changed<T>(stream: BoxStream<'static, T>) -> BoxStream<'static, T>
where
    T: PartialEq + Clone + Send + 'static,
{
    stream
        .scan(None::<T>, |last, item| {
            let changed = last.as_ref() != Some(&item);
            if changed {
                *last = Some(item.clone());
            }
            futures::future::ready(Some(changed.then_some(item)))
        })
        .filter_map(futures::future::ready)
        .boxed()
}

// =============================================================================
// Worker
// =============================================================================

/// Follows the wallet's currency set and runs one scope per set.
struct StatusesWorker {
    wallet_id: UserWalletId,
    repositories: SourceRepositories,
    backoff: Duration,
    capacity: usize,
    output: mpsc::Sender<StatusesUpdate>,
    last_emitted: Option<StatusesUpdate>,
}

enum WorkerStep {
    Currencies(Option<crate::errors::Result<Vec<CryptoCurrency>>>),
    Scope(ScopeEvent),
    ScopeDone,
    Closed,
}

impl StatusesWorker {
    async fn run(mut self, mut currencies: DataStream<Vec<CryptoCurrency>>) {
        let mut scope: Option<StatusesScope> = None;
        let mut current_currencies: Option<Vec<CryptoCurrency>> = None;
        let mut currencies_done = false;

        loop {
            let step = tokio::select! {
                next = currencies.next(), if !currencies_done => WorkerStep::Currencies(next),
                event = next_scope_event(&mut scope) => match event {
                    Some(event) => WorkerStep::Scope(event),
                    None => WorkerStep::ScopeDone,
                },
                _ = self.output.closed() => WorkerStep::Closed,
            };

            match step {
                WorkerStep::Currencies(Some(Ok(list))) => {
                    if current_currencies.as_ref() == Some(&list) {
                        continue;
                    }
                    current_currencies = Some(list.clone());
                    // Old subscriptions must be gone before new ones start
                    scope = None;

                    if list.is_empty() {
                        warn!("Wallet {} has no currencies", self.wallet_id);
                        if !self.publish(Err(TokenListError::EmptyCurrencies)).await {
                            break;
                        }
                        continue;
                    }

                    let started = StatusesScope::start(
                        &self.wallet_id,
                        list,
                        &self.repositories,
                        self.backoff,
                        self.capacity,
                    );
                    let loading = started.snapshot();
                    scope = Some(started);
                    if !self.publish(loading).await {
                        break;
                    }
                }
                WorkerStep::Currencies(Some(Err(e))) => {
                    warn!("Failed to load currencies of wallet {}: {}", self.wallet_id, e);
                    scope = None;
                    current_currencies = None;
                    if !self.publish(Err(TokenListError::data(e))).await {
                        break;
                    }
                }
                WorkerStep::Currencies(None) => {
                    debug!("Currency source of wallet {} completed", self.wallet_id);
                    currencies_done = true;
                    if scope.is_none() {
                        break;
                    }
                }
                WorkerStep::Scope(event) => {
                    let Some(active) = scope.as_mut() else {
                        continue;
                    };
                    let update = active.apply(event);
                    if !self.publish(update).await {
                        break;
                    }
                }
                WorkerStep::ScopeDone => {
                    // Every source completed; the last emission stays current
                    scope = None;
                    if currencies_done {
                        break;
                    }
                }
                WorkerStep::Closed => break,
            }
        }

        info!("Stopped observing statuses of wallet {}", self.wallet_id);
    }

    /// Sends `update` unless it equals the previous emission. Returns `false`
    /// once the consumer is gone.
    async fn publish(&mut self, update: StatusesUpdate) -> bool {
        if self.last_emitted.as_ref() == Some(&update) {
            return true;
        }
        self.last_emitted = Some(update.clone());
        self.output.send(update).await.is_ok()
    }
}

async fn next_scope_event(scope: &mut Option<StatusesScope>) -> Option<ScopeEvent> {
    match scope {
        Some(scope) => scope.next_event().await,
        None => std::future::pending().await,
    }
}
