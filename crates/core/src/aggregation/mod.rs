//! Aggregation of quotes, network statuses and yield balances into live
//! currency statuses.
//!
//! One worker task per observed wallet follows the wallet's currency set. Each
//! currency set gets its own scope: three retrying source subscriptions and a
//! one-shot refresh, all reporting on one channel. The worker keeps the latest
//! value of each source and rebuilds every status whenever any of them changes.

mod latest_values;
mod source_subscription;
mod statuses_model;
mod statuses_scope;
mod statuses_service;

pub use statuses_model::*;
pub use statuses_service::*;
