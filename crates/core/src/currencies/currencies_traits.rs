use futures::stream::BoxStream;

use super::{CryptoCurrency, UserWalletId};
use crate::errors::Result;

/// Long-lived stream of source values. Each item is either the latest value or
/// the failure that interrupted the subscription.
pub type DataStream<T> = BoxStream<'static, Result<T>>;

/// Source of the currency set configured for a wallet.
pub trait CurrenciesRepositoryTrait: Send + Sync {
    /// Emits the full currency list whenever a token is added or removed.
    fn observe(&self, wallet_id: &UserWalletId) -> DataStream<Vec<CryptoCurrency>>;
}
