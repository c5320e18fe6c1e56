//! Entity trait: identity + continuity across state changes.

/// Backend-owned record with a stable identifier.
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Copy + Eq + core::hash::Hash + core::fmt::Debug + core::fmt::Display + Send + Sync + 'static;

    /// Returns the entity identifier.
    fn id(&self) -> Self::Id;

    /// Name an operator recognizes the record by. Delete confirmation asks for
    /// this exact string.
    fn display_name(&self) -> &str;
}
