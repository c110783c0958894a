use async_trait::async_trait;

use super::YieldBalance;
use crate::currencies::{CryptoCurrency, CurrencyId, DataStream, UserWalletId};
use crate::errors::Result;

/// Source of staking positions. Most currencies have none.
#[async_trait]
pub trait StakingRepositoryTrait: Send + Sync {
    fn observe(
        &self,
        wallet_id: &UserWalletId,
        currencies: &[CryptoCurrency],
    ) -> DataStream<Vec<YieldBalance>>;

    async fn fetch(&self, wallet_id: &UserWalletId, currencies: &[CryptoCurrency]) -> Result<()>;

    /// Staking integration available for the currency, if any.
    fn supported_integration_id(&self, currency_id: &CurrencyId) -> Option<String>;
}
