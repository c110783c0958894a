//! Quote repository trait.

use async_trait::async_trait;
use std::collections::HashSet;

use super::model::Quote;
use crate::currencies::{DataStream, RawCurrencyId};
use crate::errors::Result;

/// Source of fiat quotes.
///
/// Implementations typically back `observe` with a local cache and `fetch`
/// with a network call that refreshes that cache.
#[async_trait]
pub trait QuoteRepositoryTrait: Send + Sync {
    /// Emits the latest known quotes for the requested ids. An emitted set may
    /// be missing ids the source has no price for.
    fn observe(&self, raw_ids: &HashSet<RawCurrencyId>) -> DataStream<Vec<Quote>>;

    /// Requests a one-shot refresh of the requested ids.
    async fn fetch(&self, raw_ids: &HashSet<RawCurrencyId>) -> Result<()>;
}
