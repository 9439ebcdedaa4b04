use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use coffer_core::LedgerId;
use coffer_events::Event;

use crate::error::{Settlement, TradeRejection};

/// Event: TradeSettled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TradeSettled {
    pub buyer: LedgerId,
    pub seller: LedgerId,
    pub settlement: Settlement,
    pub occurred_at: DateTime<Utc>,
}

/// Event: TradeRejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TradeRejected {
    pub buyer: LedgerId,
    pub seller: LedgerId,
    pub price: i64,
    pub reason: TradeRejection,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TradeEvent {
    Settled(TradeSettled),
    Rejected(TradeRejected),
}

impl Event for TradeEvent {
    fn event_type(&self) -> &'static str {
        match self {
            TradeEvent::Settled(_) => "trade.settled",
            TradeEvent::Rejected(_) => "trade.rejected",
        }
    }

    fn version(&self) -> u32 {
        1
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        match self {
            TradeEvent::Settled(e) => e.occurred_at,
            TradeEvent::Rejected(e) => e.occurred_at,
        }
    }
}
