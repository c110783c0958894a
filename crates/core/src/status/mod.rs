//! Per-currency status.
//!
//! - [`status_model`] - The tagged status value and its payloads
//! - [`status_builder`] - Pure resolution of one currency's status from its
//!   quote, network status and yield balance

pub mod status_builder;
pub mod status_model;

pub use status_builder::*;
pub use status_model::*;

#[cfg(test)]
mod status_builder_tests;
