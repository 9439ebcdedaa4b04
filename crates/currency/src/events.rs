use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use coffer_core::LedgerId;
use coffer_events::Event;

use crate::kind::CurrencyKind;

/// Event: BalanceChanged.
///
/// Published by [`crate::Ledger::publish_changes_to`] after every mutation,
/// including ones the clamp turned into a no-op.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalanceChanged {
    pub ledger_id: LedgerId,
    pub kind: CurrencyKind,
    pub previous: i64,
    pub balance: i64,
    pub occurred_at: DateTime<Utc>,
}

impl BalanceChanged {
    pub fn delta(&self) -> i64 {
        self.balance.saturating_sub(self.previous)
    }
}

impl Event for BalanceChanged {
    fn event_type(&self) -> &'static str {
        "currency.ledger.balance_changed"
    }

    fn version(&self) -> u32 {
        1
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        self.occurred_at
    }
}
