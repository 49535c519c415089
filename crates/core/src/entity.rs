//! Entity trait: a stored record with a stable identity.

/// A record that keeps its identity across updates.
///
/// Record stores key their tables by `Entity::id`, so two values with the same
/// id are two versions of the same record.
pub trait Entity {
    /// Strongly-typed record identifier.
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    /// Returns the record identifier.
    fn id(&self) -> &Self::Id;
}
