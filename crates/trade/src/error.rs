use serde::{Deserialize, Serialize};
use thiserror::Error;

use coffer_currency::{CurrencyKind, Ledger};

/// Kind + soft flag: the two properties that must match for a trade.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CurrencyFamily {
    pub kind: CurrencyKind,
    pub is_soft: bool,
}

impl CurrencyFamily {
    pub fn of(ledger: &Ledger) -> Self {
        Self {
            kind: ledger.kind().clone(),
            is_soft: ledger.is_soft(),
        }
    }
}

impl core::fmt::Display for CurrencyFamily {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let hardness = if self.is_soft { "soft" } else { "hard" };
        write!(f, "{} ({hardness})", self.kind)
    }
}

/// Why a trade did not happen. Balances are untouched in every case.
#[derive(Debug, Error, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TradeRejection {
    #[error("incompatible currencies: buyer holds {buyer}, seller holds {seller}")]
    IncompatibleCurrency {
        buyer: CurrencyFamily,
        seller: CurrencyFamily,
    },

    #[error("insufficient funds: balance {balance}, price {price}")]
    InsufficientFunds { balance: i64, price: i64 },

    /// A shared ledger (or the economy lock) was poisoned by a panicking holder.
    #[error("ledger unavailable: {0}")]
    LedgerPoisoned(String),
}

/// Balances after a successful trade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settlement {
    pub price: i64,
    pub buyer_balance: i64,
    pub seller_balance: i64,
}
