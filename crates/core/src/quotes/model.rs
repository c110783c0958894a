//! Quote domain model.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::currencies::RawCurrencyId;
use crate::status::StatusSource;

/// Fiat price and 24h change for one raw currency id.
///
/// Quotes are replaced wholesale on each refresh, never partially updated.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    pub raw_currency_id: RawCurrencyId,
    pub fiat_rate: Decimal,
    pub price_change: Decimal,
    pub source: StatusSource,
}

impl Quote {
    pub fn new(raw_currency_id: impl Into<String>, fiat_rate: Decimal, price_change: Decimal) -> Self {
        Self {
            raw_currency_id: RawCurrencyId::new(raw_currency_id),
            fiat_rate,
            price_change,
            source: StatusSource::Actual,
        }
    }

    pub fn with_source(mut self, source: StatusSource) -> Self {
        self.source = source;
        self
    }
}
