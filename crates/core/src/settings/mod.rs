//! Aggregation settings.
//!
//! Settings are plain serde models loaded by the host application and injected
//! into the aggregation service and the portfolio calculators.

pub mod settings_model;

pub use settings_model::*;
