use async_trait::async_trait;
use std::collections::HashSet;

use super::NetworkStatus;
use crate::currencies::{DataStream, Network, UserWalletId};
use crate::errors::Result;

/// Source of per-network on-chain state.
#[async_trait]
pub trait NetworkStatusRepositoryTrait: Send + Sync {
    /// Emits the latest status of each requested network. Networks that have
    /// not produced a status yet are absent from the emitted list.
    fn observe(
        &self,
        wallet_id: &UserWalletId,
        networks: &HashSet<Network>,
    ) -> DataStream<Vec<NetworkStatus>>;

    async fn fetch(&self, wallet_id: &UserWalletId, networks: &HashSet<Network>) -> Result<()>;
}
