//! Trades between ledgers shared across threads.

use std::sync::{Mutex, PoisonError};

use chrono::Utc;
use tracing::warn;

use coffer_currency::{Ledger, SharedLedger};
use coffer_events::{EventBus, InMemoryEventBus, Subscription};

use crate::arbiter;
use crate::error::{Settlement, TradeRejection};
use crate::events::{TradeEvent, TradeRejected, TradeSettled};

/// Global trade coordinator for [`SharedLedger`]s.
///
/// One economy-wide lock serialises every trade, so the check/subtract/add
/// sequence cannot interleave with another trade on either ledger. Every
/// outcome is published on the bus before the lock is released, so events
/// arrive in trade order.
///
/// The economy lock guards no data of its own and shrugs off poisoning; a
/// panic during a trade poisons only the ledgers involved.
#[derive(Debug)]
pub struct Economy<B = InMemoryEventBus<TradeEvent>> {
    lock: Mutex<()>,
    bus: B,
}

impl Economy {
    pub fn new() -> Self {
        Self::with_bus(InMemoryEventBus::new())
    }
}

impl Default for Economy {
    fn default() -> Self {
        Self::new()
    }
}

impl<B> Economy<B>
where
    B: EventBus<TradeEvent>,
{
    pub fn with_bus(bus: B) -> Self {
        Self {
            lock: Mutex::new(()),
            bus,
        }
    }

    pub fn subscribe(&self) -> Subscription<TradeEvent> {
        self.bus.subscribe()
    }

    pub fn settle(
        &self,
        buyer: &SharedLedger,
        seller: &SharedLedger,
        price: i64,
    ) -> Result<Settlement, TradeRejection> {
        let _economy = self.lock.lock().unwrap_or_else(PoisonError::into_inner);

        let outcome = settle_shared(buyer, seller, price);
        self.publish(buyer, seller, price, &outcome);
        outcome
    }

    pub fn attempt_to_buy(&self, buyer: &SharedLedger, seller: &SharedLedger, price: i64) -> bool {
        self.settle(buyer, seller, price).is_ok()
    }

    pub fn attempt_to_sell(&self, seller: &SharedLedger, buyer: &SharedLedger, price: i64) -> bool {
        self.attempt_to_buy(buyer, seller, price)
    }

    fn publish(
        &self,
        buyer: &SharedLedger,
        seller: &SharedLedger,
        price: i64,
        outcome: &Result<Settlement, TradeRejection>,
    ) {
        let occurred_at = Utc::now();
        let event = match outcome {
            Ok(settlement) => TradeEvent::Settled(TradeSettled {
                buyer: buyer.id(),
                seller: seller.id(),
                settlement: *settlement,
                occurred_at,
            }),
            Err(reason) => TradeEvent::Rejected(TradeRejected {
                buyer: buyer.id(),
                seller: seller.id(),
                price,
                reason: reason.clone(),
                occurred_at,
            }),
        };

        if let Err(error) = self.bus.publish(event) {
            warn!(?error, "failed to publish trade event");
        }
    }
}

// Caller holds the economy lock. Ledger guards are released on return.
fn settle_shared(
    buyer: &SharedLedger,
    seller: &SharedLedger,
    price: i64,
) -> Result<Settlement, TradeRejection> {
    let mut buyer_ledger = buyer.lock().map_err(poisoned)?;
    if buyer.ptr_eq(seller) {
        return settle_with_itself(&mut buyer_ledger, price);
    }
    let mut seller_ledger = seller.lock().map_err(poisoned)?;

    arbiter::settle(&mut buyer_ledger, &mut seller_ledger, price)
}

// A ledger trading with itself: always compatible, and the two legs cancel
// out unless one of them clamps.
fn settle_with_itself(ledger: &mut Ledger, price: i64) -> Result<Settlement, TradeRejection> {
    if !ledger.can_afford(price) {
        return Err(TradeRejection::InsufficientFunds {
            balance: ledger.balance(),
            price,
        });
    }

    ledger.subtract_from_balance(price);
    ledger.add_to_balance(price);

    Ok(Settlement {
        price,
        buyer_balance: ledger.balance(),
        seller_balance: ledger.balance(),
    })
}

fn poisoned(error: coffer_core::DomainError) -> TradeRejection {
    TradeRejection::LedgerPoisoned(error.to_string())
}
