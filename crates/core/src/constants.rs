/// Fixed delay before a failed source is resubscribed, in milliseconds
pub const DEFAULT_SOURCE_RETRY_BACKOFF_MS: u64 = 2000;

/// Buffer size of the statuses output channel
pub const DEFAULT_STATUSES_CHANNEL_CAPACITY: usize = 64;

/// Decimal places kept for price change weights
pub const PRICE_CHANGE_WEIGHT_PRECISION: u32 = 2;
