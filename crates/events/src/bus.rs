//! Event publishing/subscription abstraction (mechanics only).
//!
//! The bus is a broadcast channel: every subscription receives a copy of every
//! message published after it subscribed. It makes no ordering promises between
//! concurrent publishers and stores nothing; a subscriber that joins late does
//! not see earlier messages.

use std::sync::Arc;
use std::sync::mpsc::Receiver;

/// A subscription to an event stream.
///
/// ```ignore
/// let subscription = bus.subscribe();
///
/// while let Ok(event) = subscription.try_recv() {
///     hud.refresh(event);
/// }
/// ```
///
/// Subscriptions are designed for single-threaded consumption, typically
/// drained once per frame.
#[derive(Debug)]
pub struct Subscription<M> {
    receiver: Receiver<M>,
}

impl<M> Subscription<M> {
    pub fn new(receiver: Receiver<M>) -> Self {
        Self { receiver }
    }

    /// Try to receive a message without blocking.
    pub fn try_recv(&self) -> Result<M, std::sync::mpsc::TryRecvError> {
        self.receiver.try_recv()
    }

    /// Drain everything currently queued without blocking.
    pub fn drain(&self) -> Vec<M> {
        self.receiver.try_iter().collect()
    }
}

/// Domain-agnostic event bus (pub/sub abstraction).
///
/// `publish()` can fail (e.g. the bus is poisoned). Economy code treats a
/// failed publish as a diagnostic only: balances are the source of truth,
/// events are notifications about them.
///
/// The trait requires `Send + Sync` so a bus can be shared with ledgers that
/// live behind a lock.
pub trait EventBus<M>: Send + Sync {
    type Error: core::fmt::Debug + Send + Sync + 'static;

    fn publish(&self, message: M) -> Result<(), Self::Error>;

    fn subscribe(&self) -> Subscription<M>;
}

impl<M, B> EventBus<M> for Arc<B>
where
    B: EventBus<M> + ?Sized,
{
    type Error = B::Error;

    fn publish(&self, message: M) -> Result<(), Self::Error> {
        (**self).publish(message)
    }

    fn subscribe(&self) -> Subscription<M> {
        (**self).subscribe()
    }
}
