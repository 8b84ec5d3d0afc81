//! Entity trait: identity + continuity across state changes.

/// Entity marker + minimal interface.
pub trait Entity {
    /// Natural identifier of the entity.
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    /// Returns the entity identifier.
    ///
    /// Identifiers derived from mutable fields are computed on demand, so this
    /// returns an owned value.
    fn id(&self) -> Self::Id;
}
