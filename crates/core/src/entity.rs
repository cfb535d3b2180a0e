//! Entity trait: identity + continuity across state changes.

/// Entity marker + minimal interface.
///
/// Entities are compared by identity, not by value: two entities with the
/// same field values but different ids are distinct domain objects. Domain
/// crates implement `PartialEq`/`Eq`/`Hash` over the id alone to keep
/// grouping and map keys consistent with this contract.
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    /// Returns the entity identifier.
    fn id(&self) -> &Self::Id;
}
