//! Currency domain module: bounded balance ledgers.
//!
//! Pure in-process logic: no IO, no persistence. A [`Ledger`] clamps every
//! mutation into its bounds and never fails; callers that want refusal on
//! insufficient funds ask [`Ledger::can_afford`] first (or go through the
//! trade arbiter, which does).

pub mod config;
pub mod entity;
pub mod events;
pub mod kind;
pub mod ledger;
pub mod shared;

pub use config::{DEFAULT_MAXIMUM_BALANCE, DEFAULT_MINIMUM_BALANCE, DEFAULT_SYMBOL, LedgerConfig};
pub use entity::EconomyEntity;
pub use events::BalanceChanged;
pub use kind::{CurrencyKind, IconId};
pub use ledger::{BalanceObserver, Ledger, ObserverId};
pub use shared::SharedLedger;
