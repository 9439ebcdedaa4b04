//! A scripted shop session: one player, one shopkeeper, a list of orders.
//!
//! Used by the `coffer-market` binary to exercise ledgers and trades end to
//! end with real logging.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::info;

use coffer_core::DomainResult;
use coffer_currency::{BalanceChanged, EconomyEntity, LedgerConfig};
use coffer_events::{EventBus, InMemoryEventBus, Subscription};
use coffer_trade::{Priced, buy_from, sell_to};

/// Starting float of the shopkeeper's till.
pub const SHOP_FLOAT: i64 = 500;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Offer {
    pub name: String,
    pub price: i64,
}

impl Offer {
    pub fn new(name: impl Into<String>, price: i64) -> Self {
        Self {
            name: name.into(),
            price,
        }
    }
}

impl Priced for Offer {
    fn price(&self) -> i64 {
        self.price
    }
}

/// Direction of an order, from the player's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Buy,
    Sell,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub side: Side,
    pub offer: Offer,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TradeLine {
    pub side: Side,
    pub item: String,
    pub price: i64,
    pub accepted: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionReport {
    pub trades: Vec<TradeLine>,
    pub player_balance: String,
    pub shop_balance: String,
}

#[derive(Debug)]
pub struct Market {
    player: EconomyEntity,
    shopkeeper: EconomyEntity,
    balance_bus: Arc<InMemoryEventBus<BalanceChanged>>,
}

impl Market {
    /// Player starts from `config`; the shopkeeper shares the currency and
    /// starts with [`SHOP_FLOAT`].
    pub fn open(config: LedgerConfig) -> DomainResult<Self> {
        config.validate()?;

        let balance_bus: Arc<InMemoryEventBus<BalanceChanged>> = Arc::new(InMemoryEventBus::new());
        let shop_config = config.clone().with_initial_balance(SHOP_FLOAT);
        let mut player = EconomyEntity::with_config("player", config);
        let mut shopkeeper = EconomyEntity::with_config("shopkeeper", shop_config);
        player.ledger_mut().publish_changes_to(Arc::clone(&balance_bus));
        shopkeeper.ledger_mut().publish_changes_to(Arc::clone(&balance_bus));

        Ok(Self {
            player,
            shopkeeper,
            balance_bus,
        })
    }

    pub fn player(&self) -> &EconomyEntity {
        &self.player
    }

    pub fn shopkeeper(&self) -> &EconomyEntity {
        &self.shopkeeper
    }

    /// Balance changes of both ledgers, from now on.
    pub fn subscribe(&self) -> Subscription<BalanceChanged> {
        self.balance_bus.subscribe()
    }

    pub fn run(&mut self, script: &[Order]) -> SessionReport {
        let trades = script.iter().map(|order| self.execute(order)).collect();

        SessionReport {
            trades,
            player_balance: self.player.ledger().format_balance(true),
            shop_balance: self.shopkeeper.ledger().format_balance(true),
        }
    }

    fn execute(&mut self, order: &Order) -> TradeLine {
        let accepted = match order.side {
            Side::Buy => buy_from(&mut self.player, &mut self.shopkeeper, &order.offer),
            Side::Sell => sell_to(&mut self.player, &mut self.shopkeeper, &order.offer),
        };

        info!(
            side = ?order.side,
            item = %order.offer.name,
            price = order.offer.price,
            accepted,
            player_balance = self.player.balance(),
            "order processed"
        );

        TradeLine {
            side: order.side,
            item: order.offer.name.clone(),
            price: order.offer.price,
            accepted,
        }
    }
}

/// A short session: a couple of purchases, one too expensive, one sale.
pub fn default_script() -> Vec<Order> {
    vec![
        Order {
            side: Side::Buy,
            offer: Offer::new("health potion", 15),
        },
        Order {
            side: Side::Buy,
            offer: Offer::new("iron sword", 60),
        },
        Order {
            side: Side::Buy,
            offer: Offer::new("dragon scale armor", 900),
        },
        Order {
            side: Side::Sell,
            offer: Offer::new("wolf pelt", 8),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use coffer_core::DomainError;

    #[test]
    fn default_session_settles_affordable_orders() {
        let mut market = Market::open(
            LedgerConfig::default()
                .with_initial_balance(100)
                .with_symbol('$'),
        )
        .unwrap();

        let report = market.run(&default_script());

        let accepted: Vec<bool> = report.trades.iter().map(|t| t.accepted).collect();
        assert_eq!(accepted, vec![true, true, false, true]);
        assert_eq!(report.player_balance, "$ 33");
        assert_eq!(report.shop_balance, "$ 567");
    }

    #[test]
    fn every_mutation_reaches_subscribers() {
        let mut market = Market::open(LedgerConfig::default().with_initial_balance(100)).unwrap();
        let changes = market.subscribe();

        market.run(&default_script());

        // Three settled trades, two ledger mutations each.
        let changes = changes.drain();
        assert_eq!(changes.len(), 6);
        let player_id = market.player().ledger().id();
        let last_player = changes.iter().rev().find(|c| c.ledger_id == player_id).unwrap();
        assert_eq!(last_player.balance, 33);
    }

    #[test]
    fn inverted_bounds_are_refused_at_open() {
        let err = Market::open(LedgerConfig::default().with_bounds(10, 0)).unwrap_err();
        assert!(matches!(err, DomainError::InvariantViolation(_)));
    }

    #[test]
    fn report_serializes_sides_in_lowercase() {
        let mut market = Market::open(LedgerConfig::default()).unwrap();
        let report = market.run(&[Order {
            side: Side::Sell,
            offer: Offer::new("twig", 1),
        }]);

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["trades"][0]["side"], "sell");
        assert_eq!(json["trades"][0]["accepted"], true);
    }
}
