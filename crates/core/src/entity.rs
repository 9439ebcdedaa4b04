//! Entity trait: identity + continuity across state changes.

/// Entity marker + minimal interface.
///
/// Anything in the game world that owns economy state (a shop, a player, a
/// chest) is an entity: two entities with identical balances are still
/// different entities.
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    /// Returns the entity identifier.
    fn id(&self) -> &Self::Id;
}
