//! Entities that own exactly one ledger.

use coffer_core::{Entity, EntityId};

use crate::config::LedgerConfig;
use crate::ledger::Ledger;

/// Anything in the world that holds a currency: a player, a shopkeeper, a
/// vending machine.
///
/// The ledger is created together with the entity and owned by it for its
/// whole lifetime.
#[derive(Debug)]
pub struct EconomyEntity {
    id: EntityId,
    name: String,
    ledger: Ledger,
}

impl EconomyEntity {
    /// Entity with a default ledger starting at `initial_balance`.
    pub fn new(name: impl Into<String>, initial_balance: i64) -> Self {
        Self::with_config(name, LedgerConfig::default().with_initial_balance(initial_balance))
    }

    pub fn with_config(name: impl Into<String>, config: LedgerConfig) -> Self {
        Self {
            id: EntityId::new(),
            name: name.into(),
            ledger: Ledger::from_config(config),
        }
    }

    pub fn id_typed(&self) -> EntityId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn ledger_mut(&mut self) -> &mut Ledger {
        &mut self.ledger
    }

    pub fn balance(&self) -> i64 {
        self.ledger.balance()
    }
}

impl Entity for EconomyEntity {
    type Id = EntityId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}
