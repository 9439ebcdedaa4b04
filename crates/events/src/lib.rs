//! Economy events and the pub/sub plumbing that carries them.
//!
//! Ledgers and the trade arbiter describe what happened as [`Event`] values;
//! an [`EventBus`] fans them out to UI, achievements, audio cues and whatever
//! else the game wires up.

pub mod bus;
pub mod event;
pub mod in_memory_bus;

pub use bus::{EventBus, Subscription};
pub use event::Event;
pub use in_memory_bus::{InMemoryBusError, InMemoryEventBus};
