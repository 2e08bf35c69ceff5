//! Entity trait: identity + continuity across state changes.

/// Entity marker + minimal interface.
///
/// Stores key entities by this identity; two entities sharing an id are the
/// same entity at different points in time.
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    /// Returns the entity identifier.
    fn id(&self) -> &Self::Id;
}
