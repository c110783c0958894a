//! Total fiat balance and price change.

mod balance_calculator;
mod balance_model;

pub use balance_calculator::*;
pub use balance_model::*;
