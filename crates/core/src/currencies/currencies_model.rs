//! Currency and network identity models.
//!
//! Currencies are created when a wallet's portfolio is configured and are never
//! mutated afterwards. Adding or removing a token produces a new currency list.

use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub struct $name(pub String);

        impl $name {
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_string())
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s)
            }
        }
    };
}

string_id!(
    /// Identifies a user wallet.
    UserWalletId
);

string_id!(
    /// Stable currency identity, unique within a wallet.
    ///
    /// Examples: "coin:ethereum", "token:ethereum:0xdac17f958d2ee523a2206206994597c13d831ec7"
    CurrencyId
);

string_id!(
    /// Identifier used to look up quotes, e.g. "ethereum" or "tether".
    RawCurrencyId
);

string_id!(
    /// Raw blockchain identifier, e.g. "ethereum" or "binance".
    NetworkId
);

/// A blockchain plus the derivation path the wallet uses on it.
///
/// A coin and its tokens share one `Network`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Network {
    pub id: NetworkId,
    pub name: String,
    pub derivation_path: Option<String>,
}

impl Network {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: NetworkId::new(id),
            name: name.into(),
            derivation_path: None,
        }
    }

    pub fn with_derivation_path(mut self, path: impl Into<String>) -> Self {
        self.derivation_path = Some(path.into());
        self
    }
}

/// A tradable asset held in a wallet.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CryptoCurrency {
    pub id: CurrencyId,
    /// Absent for currencies that have no quote-trackable identity.
    pub raw_id: Option<RawCurrencyId>,
    pub network: Network,
    pub name: String,
    pub symbol: String,
    pub decimals: u8,
    /// User-added token.
    pub is_custom: bool,
}
