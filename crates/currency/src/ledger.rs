use chrono::Utc;
use tracing::{debug, warn};

use coffer_core::LedgerId;
use coffer_events::EventBus;

use crate::config::LedgerConfig;
use crate::events::BalanceChanged;
use crate::kind::{CurrencyKind, IconId};

/// Callback invoked with the new balance after every mutation.
pub type BalanceObserver = Box<dyn FnMut(i64) + Send + 'static>;

/// Handle returned when registering an observer, used to remove it again.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct ObserverId(u64);

/// A bounded integer balance.
///
/// Every mutation clamps into `[minimum_balance, maximum_balance]` and then
/// notifies observers, in registration order, before returning. Nothing here
/// fails: excursions past a bound are silently corrected.
pub struct Ledger {
    id: LedgerId,
    balance: i64,
    minimum_balance: i64,
    maximum_balance: i64,
    kind: CurrencyKind,
    is_soft: bool,
    symbol: char,
    icon: Option<IconId>,
    observers: Vec<(ObserverId, BalanceObserver)>,
    next_observer: u64,
}

impl Ledger {
    /// Ledger with default bounds and presentation, starting at `initial_balance`.
    pub fn new(initial_balance: i64) -> Self {
        Self::from_config(LedgerConfig::default().with_initial_balance(initial_balance))
    }

    pub fn from_config(config: LedgerConfig) -> Self {
        Self::with_id(LedgerId::new(), config)
    }

    /// Build with an explicit id (deterministic tests, rehydrated entities).
    pub fn with_id(id: LedgerId, config: LedgerConfig) -> Self {
        let LedgerConfig {
            initial_balance,
            minimum_balance,
            maximum_balance,
            symbol,
            icon,
            is_soft,
            kind,
        } = config;

        Self {
            id,
            balance: clamp_balance(initial_balance, minimum_balance, maximum_balance),
            minimum_balance,
            maximum_balance,
            kind,
            is_soft,
            symbol,
            icon,
            observers: Vec::new(),
            next_observer: 0,
        }
    }

    pub fn id(&self) -> LedgerId {
        self.id
    }

    pub fn balance(&self) -> i64 {
        self.balance
    }

    pub fn minimum_balance(&self) -> i64 {
        self.minimum_balance
    }

    pub fn maximum_balance(&self) -> i64 {
        self.maximum_balance
    }

    pub fn kind(&self) -> &CurrencyKind {
        &self.kind
    }

    pub fn is_soft(&self) -> bool {
        self.is_soft
    }

    pub fn symbol(&self) -> char {
        self.symbol
    }

    pub fn icon(&self) -> Option<&IconId> {
        self.icon.as_ref()
    }

    /// Snapshot of the current settings, with the current balance as the
    /// initial balance.
    pub fn config(&self) -> LedgerConfig {
        LedgerConfig {
            initial_balance: self.balance,
            minimum_balance: self.minimum_balance,
            maximum_balance: self.maximum_balance,
            symbol: self.symbol,
            icon: self.icon.clone(),
            is_soft: self.is_soft,
            kind: self.kind.clone(),
        }
    }

    /// Add `value` (which may be negative) and clamp.
    pub fn add_to_balance(&mut self, value: i64) {
        self.set_balance(self.balance.saturating_add(value));
    }

    /// Subtract `value` and clamp at the floor.
    ///
    /// Does not check affordability; use [`Ledger::can_afford`] first when
    /// refusal is wanted.
    pub fn subtract_from_balance(&mut self, value: i64) {
        self.set_balance(self.balance.saturating_sub(value));
    }

    /// `true` iff `value <= balance`. A negative cost is always affordable.
    pub fn can_afford(&self, value: i64) -> bool {
        value <= self.balance
    }

    /// Same currency family and same soft/hard flag.
    pub fn is_compatible_with(&self, other: &Ledger) -> bool {
        self.kind == other.kind && self.is_soft == other.is_soft
    }

    /// `"{symbol} {balance}"` when `symbol_first`, otherwise `"{balance} {symbol}"`.
    pub fn format_balance(&self, symbol_first: bool) -> String {
        if symbol_first {
            format!("{} {}", self.symbol, self.balance)
        } else {
            format!("{} {}", self.balance, self.symbol)
        }
    }

    /// Register a callback fired with the new balance after each mutation.
    ///
    /// Observers run on the mutating thread, while any lock around this ledger
    /// is held, and must not touch the ledger themselves.
    pub fn on_balance_change<F>(&mut self, observer: F) -> ObserverId
    where
        F: FnMut(i64) + Send + 'static,
    {
        let id = ObserverId(self.next_observer);
        self.next_observer += 1;
        self.observers.push((id, Box::new(observer)));
        id
    }

    /// Returns `false` if the observer was already removed.
    pub fn remove_observer(&mut self, id: ObserverId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(existing, _)| *existing != id);
        self.observers.len() != before
    }

    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }

    /// Publish a [`BalanceChanged`] event on `bus` after every mutation.
    pub fn publish_changes_to<B>(&mut self, bus: B) -> ObserverId
    where
        B: EventBus<BalanceChanged> + 'static,
    {
        let ledger_id = self.id;
        let kind = self.kind.clone();
        let mut previous = self.balance;

        self.on_balance_change(move |balance| {
            let event = BalanceChanged {
                ledger_id,
                kind: kind.clone(),
                previous,
                balance,
                occurred_at: Utc::now(),
            };
            previous = balance;

            if let Err(error) = bus.publish(event) {
                warn!(%ledger_id, ?error, "failed to publish balance change");
            }
        })
    }

    fn set_balance(&mut self, requested: i64) {
        let balance = clamp_balance(requested, self.minimum_balance, self.maximum_balance);
        if balance != requested {
            debug!(ledger_id = %self.id, requested, balance, "balance clamped");
        }
        self.balance = balance;

        for (_, observer) in &mut self.observers {
            observer(balance);
        }
    }
}

impl Default for Ledger {
    fn default() -> Self {
        Self::new(0)
    }
}

impl core::fmt::Debug for Ledger {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Ledger")
            .field("id", &self.id)
            .field("balance", &self.balance)
            .field("minimum_balance", &self.minimum_balance)
            .field("maximum_balance", &self.maximum_balance)
            .field("kind", &self.kind)
            .field("is_soft", &self.is_soft)
            .field("symbol", &self.symbol)
            .field("icon", &self.icon)
            .field("observers", &self.observers.len())
            .finish()
    }
}

impl core::fmt::Display for Ledger {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.format_balance(false))
    }
}

// Inverted bounds resolve to `maximum`; `i64::clamp` would panic instead.
fn clamp_balance(value: i64, minimum: i64, maximum: i64) -> i64 {
    value.max(minimum).min(maximum)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    use coffer_events::InMemoryEventBus;
    use proptest::prelude::*;

    fn bounded(initial: i64, minimum: i64, maximum: i64) -> Ledger {
        Ledger::from_config(
            LedgerConfig::default()
                .with_initial_balance(initial)
                .with_bounds(minimum, maximum),
        )
    }

    #[test]
    fn default_ledger_starts_empty() {
        let ledger = Ledger::default();
        assert_eq!(ledger.balance(), 0);
        assert_eq!(ledger.minimum_balance(), 0);
        assert_eq!(ledger.maximum_balance(), 9_999_999);
        assert!(ledger.is_soft());
    }

    #[test]
    fn initial_balance_is_clamped_to_bounds() {
        assert_eq!(bounded(500, 0, 100).balance(), 100);
        assert_eq!(bounded(-20, 0, 100).balance(), 0);
        assert_eq!(Ledger::new(-5).balance(), 0);
    }

    #[test]
    fn add_clamps_at_ceiling() {
        let mut ledger = bounded(90, 0, 100);
        ledger.add_to_balance(50);
        assert_eq!(ledger.balance(), 100);
    }

    #[test]
    fn subtract_clamps_at_floor() {
        let mut ledger = bounded(10, 0, 100);
        ledger.subtract_from_balance(50);
        assert_eq!(ledger.balance(), 0);
    }

    #[test]
    fn negative_add_acts_as_subtraction() {
        let mut ledger = Ledger::new(40);
        ledger.add_to_balance(-15);
        assert_eq!(ledger.balance(), 25);
        ledger.subtract_from_balance(-5);
        assert_eq!(ledger.balance(), 30);
    }

    #[test]
    fn extreme_values_saturate_instead_of_overflowing() {
        let mut ledger = bounded(0, i64::MIN, i64::MAX);
        ledger.add_to_balance(i64::MAX);
        ledger.add_to_balance(i64::MAX);
        assert_eq!(ledger.balance(), i64::MAX);
        ledger.subtract_from_balance(i64::MIN);
        assert_eq!(ledger.balance(), i64::MAX);
    }

    #[test]
    fn inverted_bounds_resolve_to_maximum() {
        let mut ledger = bounded(50, 100, 10);
        assert_eq!(ledger.balance(), 10);
        ledger.add_to_balance(1_000);
        assert_eq!(ledger.balance(), 10);
    }

    #[test]
    fn can_afford_compares_against_balance() {
        let ledger = Ledger::new(30);
        assert!(ledger.can_afford(30));
        assert!(ledger.can_afford(0));
        assert!(ledger.can_afford(-10));
        assert!(!ledger.can_afford(31));
        assert_eq!(ledger.balance(), 30);
    }

    #[test]
    fn formats_with_symbol_on_either_side() {
        let ledger = Ledger::from_config(
            LedgerConfig::default()
                .with_initial_balance(50)
                .with_symbol('$'),
        );
        assert_eq!(ledger.format_balance(true), "$ 50");
        assert_eq!(ledger.format_balance(false), "50 $");
        assert_eq!(ledger.to_string(), "50 $");
    }

    #[test]
    fn observers_fire_after_each_mutation_in_order() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let mut ledger = bounded(90, 0, 100);

        let first = Arc::clone(&seen);
        ledger.on_balance_change(move |balance| first.lock().unwrap().push(("first", balance)));
        let second = Arc::clone(&seen);
        ledger.on_balance_change(move |balance| second.lock().unwrap().push(("second", balance)));

        ledger.add_to_balance(50);
        ledger.subtract_from_balance(40);

        assert_eq!(
            *seen.lock().unwrap(),
            vec![("first", 100), ("second", 100), ("first", 60), ("second", 60)]
        );
    }

    #[test]
    fn observer_fires_even_when_clamp_leaves_balance_unchanged() {
        let calls = Arc::new(Mutex::new(0));
        let mut ledger = bounded(100, 0, 100);
        let counter = Arc::clone(&calls);
        ledger.on_balance_change(move |_| *counter.lock().unwrap() += 1);

        ledger.add_to_balance(1);

        assert_eq!(*calls.lock().unwrap(), 1);
        assert_eq!(ledger.balance(), 100);
    }

    #[test]
    fn removed_observer_stops_firing() {
        let calls = Arc::new(Mutex::new(0));
        let mut ledger = Ledger::new(0);
        let counter = Arc::clone(&calls);
        let id = ledger.on_balance_change(move |_| *counter.lock().unwrap() += 1);

        ledger.add_to_balance(1);
        assert!(ledger.remove_observer(id));
        assert!(!ledger.remove_observer(id));
        ledger.add_to_balance(1);

        assert_eq!(*calls.lock().unwrap(), 1);
        assert_eq!(ledger.observer_count(), 0);
    }

    #[test]
    fn publishes_balance_changes_on_bus() {
        let bus: Arc<InMemoryEventBus<BalanceChanged>> = Arc::new(InMemoryEventBus::new());
        let subscription = bus.subscribe();
        let mut ledger = bounded(10, 0, 100);
        ledger.publish_changes_to(Arc::clone(&bus));

        ledger.add_to_balance(25);
        ledger.subtract_from_balance(100);

        let events = subscription.drain();
        assert_eq!(events.len(), 2);
        assert_eq!((events[0].previous, events[0].balance), (10, 35));
        assert_eq!((events[1].previous, events[1].balance), (35, 0));
        assert_eq!(events[1].delta(), -35);
        assert!(events.iter().all(|e| e.ledger_id == ledger.id()));
        assert_eq!(
            coffer_events::Event::event_type(&events[0]),
            "currency.ledger.balance_changed"
        );
    }

    #[test]
    fn config_snapshot_reflects_current_state() {
        let mut ledger = Ledger::from_config(
            LedgerConfig::default()
                .with_kind("gems".parse().unwrap())
                .with_icon(IconId::new("ui/gem"))
                .soft(false),
        );
        ledger.add_to_balance(12);

        let snapshot = ledger.config();
        assert_eq!(snapshot.initial_balance, 12);
        assert_eq!(snapshot.kind.as_str(), "gems");
        assert_eq!(snapshot.icon, Some(IconId::new("ui/gem")));
        assert!(!snapshot.is_soft);
    }

    #[derive(Debug, Clone)]
    enum Op {
        Add(i64),
        Subtract(i64),
    }

    fn op() -> impl Strategy<Value = Op> {
        prop_oneof![
            (-20_000i64..20_000).prop_map(Op::Add),
            (-20_000i64..20_000).prop_map(Op::Subtract),
        ]
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 256,
            ..ProptestConfig::default()
        })]

        /// Property: the balance stays within bounds after any operation sequence.
        #[test]
        fn balance_always_within_bounds(
            initial in -50_000i64..50_000,
            minimum in -1_000i64..1_000,
            span in 0i64..10_000,
            ops in prop::collection::vec(op(), 0..32)
        ) {
            let maximum = minimum + span;
            let mut ledger = bounded(initial, minimum, maximum);
            prop_assert!(ledger.balance() >= minimum && ledger.balance() <= maximum);

            for op in ops {
                match op {
                    Op::Add(v) => ledger.add_to_balance(v),
                    Op::Subtract(v) => ledger.subtract_from_balance(v),
                }
                prop_assert!(ledger.balance() >= minimum && ledger.balance() <= maximum);
            }
        }

        /// Property: add then subtract of the same value is a no-op unless a bound was hit.
        #[test]
        fn add_then_subtract_round_trips_without_clamp(
            initial in 0i64..=9_999_999,
            value in -20_000_000i64..20_000_000
        ) {
            let mut ledger = Ledger::new(initial);
            let after_add_unclamped = initial + value;
            ledger.add_to_balance(value);
            let add_clamped = ledger.balance() != after_add_unclamped;
            let after_sub_unclamped = ledger.balance() - value;
            ledger.subtract_from_balance(value);
            let sub_clamped = ledger.balance() != after_sub_unclamped;

            if !add_clamped && !sub_clamped {
                prop_assert_eq!(ledger.balance(), initial);
            }
        }

        /// Property: can_afford is exactly `value <= balance` and never mutates.
        #[test]
        fn can_afford_matches_comparison(
            initial in 0i64..=9_999_999,
            value in any::<i64>()
        ) {
            let ledger = Ledger::new(initial);
            prop_assert_eq!(ledger.can_afford(value), value <= initial);
            prop_assert_eq!(ledger.balance(), initial);
        }
    }
}
