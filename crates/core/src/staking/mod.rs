//! Staking (yield) positions.

mod staking_model;
mod staking_traits;

pub use staking_model::*;
pub use staking_traits::*;
