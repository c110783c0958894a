//! Quote module.
//!
//! - [`model`] - Fiat quote for a raw currency id
//! - [`store`] - Repository trait the aggregation subscribes to
//!
//! Quotes are best-effort: a quote may be missing, stale (cached) or the whole
//! source may fail. The status builder decides how each case is presented.

pub mod model;
pub mod store;

pub use model::Quote;
pub use store::QuoteRepositoryTrait;
