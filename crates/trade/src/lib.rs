//! Two-party trades between currency ledgers.
//!
//! A trade moves `price` from buyer to seller only when both ledgers hold the
//! same currency family and the buyer can afford it. Refusals are plain
//! `false` returns (or a typed [`TradeRejection`] from [`settle`]); nothing
//! here panics or partially applies.

pub mod arbiter;
pub mod economy;
pub mod error;
pub mod events;

pub use arbiter::{
    Priced, attempt_to_buy, attempt_to_buy_item, attempt_to_sell, attempt_to_sell_item, buy_from,
    sell_to, settle,
};
pub use economy::Economy;
pub use error::{CurrencyFamily, Settlement, TradeRejection};
pub use events::{TradeEvent, TradeRejected, TradeSettled};
