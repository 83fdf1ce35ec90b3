//! Entity trait: identity + continuity across state changes.

/// Entity marker + minimal interface.
///
/// A directory user keeps its name while its group memberships change.
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    /// Returns the entity identifier.
    fn id(&self) -> &Self::Id;
}
