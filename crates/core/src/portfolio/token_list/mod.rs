//! Token list presentation: grouping by network and sorting by balance.

mod token_list_builder;
mod token_list_model;

pub use token_list_builder::*;
pub use token_list_model::*;
