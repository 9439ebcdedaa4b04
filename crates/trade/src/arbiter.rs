//! Trade arbitration between two ledgers.
//!
//! Buying and selling are the same transfer seen from opposite sides, so
//! every entry point funnels into [`settle`].

use tracing::{debug, warn};

use coffer_currency::{EconomyEntity, Ledger};

use crate::error::{CurrencyFamily, Settlement, TradeRejection};

/// Anything with a price tag (inventory items, shop offers, services).
pub trait Priced {
    fn price(&self) -> i64;
}

/// Move `price` from `buyer` to `seller` if the currencies match and the
/// buyer can afford it.
///
/// Negative prices are not rejected: they reverse the flow of funds.
pub fn settle(
    buyer: &mut Ledger,
    seller: &mut Ledger,
    price: i64,
) -> Result<Settlement, TradeRejection> {
    if !buyer.is_compatible_with(seller) {
        let rejection = TradeRejection::IncompatibleCurrency {
            buyer: CurrencyFamily::of(buyer),
            seller: CurrencyFamily::of(seller),
        };
        warn!(
            buyer_ledger = %buyer.id(),
            seller_ledger = %seller.id(),
            price,
            %rejection,
            "trade rejected"
        );
        return Err(rejection);
    }

    if !buyer.can_afford(price) {
        return Err(TradeRejection::InsufficientFunds {
            balance: buyer.balance(),
            price,
        });
    }

    buyer.subtract_from_balance(price);
    seller.add_to_balance(price);

    debug!(
        buyer_ledger = %buyer.id(),
        seller_ledger = %seller.id(),
        kind = %buyer.kind(),
        price,
        "trade settled"
    );

    Ok(Settlement {
        price,
        buyer_balance: buyer.balance(),
        seller_balance: seller.balance(),
    })
}

/// `true` if the trade went through; balances are unchanged otherwise.
pub fn attempt_to_buy(buyer: &mut Ledger, seller: &mut Ledger, price: i64) -> bool {
    settle(buyer, seller, price).is_ok()
}

/// Same transfer as [`attempt_to_buy`], argument order from the seller's side.
pub fn attempt_to_sell(seller: &mut Ledger, buyer: &mut Ledger, price: i64) -> bool {
    attempt_to_buy(buyer, seller, price)
}

pub fn attempt_to_buy_item<I>(buyer: &mut Ledger, seller: &mut Ledger, item: &I) -> bool
where
    I: Priced + ?Sized,
{
    attempt_to_buy(buyer, seller, item.price())
}

pub fn attempt_to_sell_item<I>(seller: &mut Ledger, buyer: &mut Ledger, item: &I) -> bool
where
    I: Priced + ?Sized,
{
    attempt_to_sell(seller, buyer, item.price())
}

/// `buyer` purchases `item` from `seller`.
pub fn buy_from<I>(buyer: &mut EconomyEntity, seller: &mut EconomyEntity, item: &I) -> bool
where
    I: Priced + ?Sized,
{
    attempt_to_buy_item(buyer.ledger_mut(), seller.ledger_mut(), item)
}

/// `seller` sells `item` to `buyer`.
pub fn sell_to<I>(seller: &mut EconomyEntity, buyer: &mut EconomyEntity, item: &I) -> bool
where
    I: Priced + ?Sized,
{
    buy_from(buyer, seller, item)
}
