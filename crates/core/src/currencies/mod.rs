//! Currencies configured in a wallet and the networks they live on.

mod currencies_model;
mod currencies_traits;

pub use currencies_model::*;
pub use currencies_traits::*;
