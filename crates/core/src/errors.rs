//! Core error types for the currency status engine.
//!
//! Repository implementations (network clients, local caches) convert their own
//! failures into these types before handing them to the core.

use thiserror::Error;

/// Type alias for Result using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Root error type for the core crate.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Repository error: {0}")]
    Repository(String),

    #[error("Input validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("Failed to load configuration: {0}")]
    ConfigIO(String),

    #[error("Invalid configuration value: {0}")]
    InvalidConfigValue(String),

    #[error("Token list error: {0}")]
    TokenList(#[from] TokenListError),

    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

/// Errors surfaced by the status aggregation and token list operations.
///
/// Variants are cloneable and comparable so that emissions carrying them can be
/// deduplicated structurally. Source failures keep only the display text of
/// their cause.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenListError {
    /// The wallet has no currencies configured.
    #[error("Wallet has no currencies")]
    EmptyCurrencies,

    #[error("Quotes source produced no data")]
    EmptyQuotes,

    #[error("Network status source produced no data")]
    EmptyNetworkStatuses,

    #[error("Yield balance source produced no data")]
    EmptyYieldBalances,

    /// A source failed with the given cause.
    #[error("Data source failed: {0}")]
    DataError(String),

    #[error("Unable to sort token list")]
    UnableToSortTokenList,

    #[error("Unable to group token list")]
    UnableToGroupTokenList,
}

impl TokenListError {
    pub fn data(cause: impl ToString) -> Self {
        TokenListError::DataError(cause.to_string())
    }
}

/// Validation errors for user input and configuration.
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Required field '{0}' is missing")]
    MissingField(String),

    #[error("Failed to parse decimal number: {0}")]
    DecimalParse(#[from] rust_decimal::Error),
}

impl From<rust_decimal::Error> for Error {
    fn from(err: rust_decimal::Error) -> Self {
        Error::Validation(ValidationError::DecimalParse(err))
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::InvalidConfigValue(err.to_string())
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::ConfigIO(err.to_string())
    }
}

impl From<Error> for String {
    fn from(err: Error) -> Self {
        err.to_string()
    }
}
