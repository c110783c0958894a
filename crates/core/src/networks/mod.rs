//! On-chain state per wallet and network.

mod networks_model;
mod networks_traits;

pub use networks_model::*;
pub use networks_traits::*;
