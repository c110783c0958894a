//! Source subscriptions and refresh for one currency set.

use log::{debug, error};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinSet;

use super::latest_values::{LatestValues, SourceUpdate};
use super::source_subscription::run_source_subscription;
use super::statuses_model::{StatusesSnapshot, StatusesUpdate};
use crate::currencies::{CryptoCurrency, CurrencyId, Network, RawCurrencyId, UserWalletId};
use crate::errors::TokenListError;
use crate::networks::{NetworkStatus, NetworkStatusRepositoryTrait};
use crate::quotes::{Quote, QuoteRepositoryTrait};
use crate::staking::{StakingRepositoryTrait, YieldBalance};

/// Repositories the aggregation reads from.
#[derive(Clone)]
pub(crate) struct SourceRepositories {
    pub quotes: Arc<dyn QuoteRepositoryTrait>,
    pub network_statuses: Arc<dyn NetworkStatusRepositoryTrait>,
    pub staking: Arc<dyn StakingRepositoryTrait>,
}

impl SourceRepositories {
    /// Staking integration per currency, for currencies that have one.
    pub fn integrations(&self, currencies: &[CryptoCurrency]) -> HashMap<CurrencyId, String> {
        currencies
            .iter()
            .filter_map(|currency| {
                self.staking
                    .supported_integration_id(&currency.id)
                    .filter(|id| !id.is_empty())
                    .map(|id| (currency.id.clone(), id))
            })
            .collect()
    }
}

pub(crate) enum ScopeEvent {
    Quotes(SourceUpdate<Vec<Quote>>),
    NetworkStatuses(SourceUpdate<Vec<NetworkStatus>>),
    YieldBalances(SourceUpdate<Vec<YieldBalance>>),
    RefreshFinished,
}

/// Everything running for one currency set.
///
/// Dropping the scope aborts its subscriptions and its refresh, and closes the
/// channel they report on, so nothing from an old currency set can reach a
/// newer one.
pub(crate) struct StatusesScope {
    currencies: Vec<CryptoCurrency>,
    integrations: HashMap<CurrencyId, String>,
    latest: LatestValues,
    is_updating: bool,
    events: mpsc::Receiver<ScopeEvent>,
    _tasks: JoinSet<()>,
}

impl StatusesScope {
    /// Subscribes to every source for `currencies` and starts the one-shot
    /// refresh. Must be called within a Tokio runtime.
    pub fn start(
        wallet_id: &UserWalletId,
        currencies: Vec<CryptoCurrency>,
        repositories: &SourceRepositories,
        backoff: Duration,
        capacity: usize,
    ) -> Self {
        let networks: HashSet<Network> = currencies.iter().map(|c| c.network.clone()).collect();
        let raw_ids: HashSet<RawCurrencyId> =
            currencies.iter().filter_map(|c| c.raw_id.clone()).collect();
        let integrations = repositories.integrations(&currencies);

        debug!(
            "Starting statuses scope for wallet {}: {} currencies on {} networks",
            wallet_id,
            currencies.len(),
            networks.len()
        );

        let (events_tx, events) = mpsc::channel(capacity);
        let mut tasks = JoinSet::new();
        let mut latest = LatestValues::default();

        {
            let repository = repositories.network_statuses.clone();
            let wallet_id = wallet_id.clone();
            let networks = networks.clone();
            tasks.spawn(run_source_subscription(
                "Network statuses",
                move || repository.observe(&wallet_id, &networks),
                TokenListError::EmptyNetworkStatuses,
                backoff,
                events_tx.clone(),
                ScopeEvent::NetworkStatuses,
            ));
        }

        if raw_ids.is_empty() {
            // Nothing to price
            latest.quotes = Some(Ok(Vec::new()));
        } else {
            let repository = repositories.quotes.clone();
            let raw_ids = raw_ids.clone();
            tasks.spawn(run_source_subscription(
                "Quotes",
                move || repository.observe(&raw_ids),
                TokenListError::EmptyQuotes,
                backoff,
                events_tx.clone(),
                ScopeEvent::Quotes,
            ));
        }

        {
            let repository = repositories.staking.clone();
            let wallet_id = wallet_id.clone();
            let currencies = currencies.clone();
            tasks.spawn(run_source_subscription(
                "Yield balances",
                move || repository.observe(&wallet_id, &currencies),
                TokenListError::EmptyYieldBalances,
                backoff,
                events_tx.clone(),
                ScopeEvent::YieldBalances,
            ));
        }

        tasks.spawn(refresh_sources(
            wallet_id.clone(),
            networks,
            raw_ids,
            currencies.clone(),
            repositories.clone(),
            events_tx,
        ));

        Self {
            currencies,
            integrations,
            latest,
            is_updating: true,
            events,
            _tasks: tasks,
        }
    }

    /// Next event from this scope's tasks. `None` once every task is done.
    pub async fn next_event(&mut self) -> Option<ScopeEvent> {
        self.events.recv().await
    }

    /// Records the event and returns the recombined emission.
    pub fn apply(&mut self, event: ScopeEvent) -> StatusesUpdate {
        match event {
            ScopeEvent::Quotes(update) => self.latest.quotes = Some(update),
            ScopeEvent::NetworkStatuses(update) => self.latest.network_statuses = Some(update),
            ScopeEvent::YieldBalances(update) => self.latest.yield_balances = Some(update),
            ScopeEvent::RefreshFinished => self.is_updating = false,
        }
        self.snapshot()
    }

    /// Current emission built from the latest value of every source.
    pub fn snapshot(&self) -> StatusesUpdate {
        let statuses = self.latest.resolve(&self.currencies, &self.integrations)?;
        Ok(StatusesSnapshot {
            statuses,
            is_updating: self.is_updating,
        })
    }
}

/// Fetches all three sources concurrently, then reports completion whatever
/// the outcome.
async fn refresh_sources(
    wallet_id: UserWalletId,
    networks: HashSet<Network>,
    raw_ids: HashSet<RawCurrencyId>,
    currencies: Vec<CryptoCurrency>,
    repositories: SourceRepositories,
    events: mpsc::Sender<ScopeEvent>,
) {
    let fetch_quotes = async {
        if raw_ids.is_empty() {
            Ok(())
        } else {
            repositories.quotes.fetch(&raw_ids).await
        }
    };

    let (networks_result, quotes_result, staking_result) = tokio::join!(
        repositories.network_statuses.fetch(&wallet_id, &networks),
        fetch_quotes,
        repositories.staking.fetch(&wallet_id, &currencies),
    );

    if let Err(e) = networks_result {
        error!("Failed to refresh network statuses for wallet {}: {}", wallet_id, e);
    }
    if let Err(e) = quotes_result {
        error!("Failed to refresh quotes for wallet {}: {}", wallet_id, e);
    }
    if let Err(e) = staking_result {
        error!("Failed to refresh yield balances for wallet {}: {}", wallet_id, e);
    }

    debug!("Refresh finished for wallet {}", wallet_id);
    let _ = events.send(ScopeEvent::RefreshFinished).await;
}
