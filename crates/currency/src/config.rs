//! Construction-time ledger configuration.

use serde::{Deserialize, Serialize};

use coffer_core::{DomainError, DomainResult};

use crate::kind::{CurrencyKind, IconId};

/// Default floor for a ledger's balance.
pub const DEFAULT_MINIMUM_BALANCE: i64 = 0;

/// Default ceiling for a ledger's balance.
pub const DEFAULT_MAXIMUM_BALANCE: i64 = 9_999_999;

/// Default display symbol (generic currency sign).
pub const DEFAULT_SYMBOL: char = '¤';

/// Everything a ledger needs at construction.
///
/// Every field has a default, so partial documents are valid:
///
/// ```ignore
/// let gems = LedgerConfig::from_json(r#"{ "kind": "gems", "is_soft": false, "symbol": "♦" }"#)?;
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LedgerConfig {
    pub initial_balance: i64,
    pub minimum_balance: i64,
    pub maximum_balance: i64,
    pub symbol: char,
    pub icon: Option<IconId>,
    /// Earnable through gameplay, without real-money purchase.
    pub is_soft: bool,
    pub kind: CurrencyKind,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            initial_balance: 0,
            minimum_balance: DEFAULT_MINIMUM_BALANCE,
            maximum_balance: DEFAULT_MAXIMUM_BALANCE,
            symbol: DEFAULT_SYMBOL,
            icon: None,
            is_soft: true,
            kind: CurrencyKind::default(),
        }
    }
}

impl LedgerConfig {
    /// Parse a JSON configuration document.
    pub fn from_json(json: &str) -> DomainResult<Self> {
        serde_json::from_str(json)
            .map_err(|e| DomainError::validation(format!("ledger config: {e}")))
    }

    /// Opt-in sanity check for callers that want one.
    ///
    /// Ledger construction does not call this: inverted bounds are the
    /// caller's responsibility and clamp to `maximum_balance`.
    pub fn validate(&self) -> DomainResult<()> {
        if self.minimum_balance > self.maximum_balance {
            return Err(DomainError::invariant(format!(
                "minimum balance {} exceeds maximum balance {}",
                self.minimum_balance, self.maximum_balance
            )));
        }
        Ok(())
    }

    pub fn with_initial_balance(mut self, initial_balance: i64) -> Self {
        self.initial_balance = initial_balance;
        self
    }

    pub fn with_bounds(mut self, minimum_balance: i64, maximum_balance: i64) -> Self {
        self.minimum_balance = minimum_balance;
        self.maximum_balance = maximum_balance;
        self
    }

    pub fn with_kind(mut self, kind: CurrencyKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn with_symbol(mut self, symbol: char) -> Self {
        self.symbol = symbol;
        self
    }

    pub fn with_icon(mut self, icon: IconId) -> Self {
        self.icon = Some(icon);
        self
    }

    pub fn soft(mut self, is_soft: bool) -> Self {
        self.is_soft = is_soft;
        self
    }
}
