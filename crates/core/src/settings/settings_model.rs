use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use std::time::Duration;

use crate::constants::{DEFAULT_SOURCE_RETRY_BACKOFF_MS, DEFAULT_STATUSES_CHANNEL_CAPACITY};
use crate::currencies::NetworkId;
use crate::errors::{Error, Result};

/// Tunables for the currency statuses aggregation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AggregationSettings {
    /// Delay before a failed source is resubscribed. Flat, no growth.
    pub retry_backoff_ms: u64,
    /// Raw network ids whose `Unreachable`/`NoAmount` statuses count as zero in
    /// the portfolio total instead of failing it.
    pub include_to_balance_on_error: Vec<String>,
    pub channel_capacity: usize,
}

impl Default for AggregationSettings {
    fn default() -> Self {
        Self {
            retry_backoff_ms: DEFAULT_SOURCE_RETRY_BACKOFF_MS,
            include_to_balance_on_error: Vec::new(),
            channel_capacity: DEFAULT_STATUSES_CHANNEL_CAPACITY,
        }
    }
}

impl AggregationSettings {
    /// Parses settings from a JSON document. Missing keys fall back to defaults.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let settings: AggregationSettings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::ConfigIO(format!("{}: {}", path.display(), e)))?;
        Self::from_json_str(&content)
    }

    pub fn validate(&self) -> Result<()> {
        if self.retry_backoff_ms == 0 {
            return Err(Error::InvalidConfigValue(
                "retryBackoffMs must be greater than zero".to_string(),
            ));
        }
        if self.channel_capacity == 0 {
            return Err(Error::InvalidConfigValue(
                "channelCapacity must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    pub fn retry_backoff(&self) -> Duration {
        Duration::from_millis(self.retry_backoff_ms)
    }

    pub fn balance_error_policy(&self) -> BalanceErrorPolicy {
        BalanceErrorPolicy::new(
            self.include_to_balance_on_error
                .iter()
                .map(|id| NetworkId::new(id.as_str())),
        )
    }
}

/// Networks whose transient failures must not sink the portfolio total.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BalanceErrorPolicy {
    include_on_error: HashSet<NetworkId>,
}

impl BalanceErrorPolicy {
    pub fn new(networks: impl IntoIterator<Item = NetworkId>) -> Self {
        Self {
            include_on_error: networks.into_iter().collect(),
        }
    }

    /// Policy with an empty allow-list: every unreachable network fails the total.
    pub fn strict() -> Self {
        Self::default()
    }

    pub fn is_include_to_balance_on_error(&self, network_id: &NetworkId) -> bool {
        self.include_on_error.contains(network_id)
    }
}
