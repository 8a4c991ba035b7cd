//! Records with identity.

/// A record kept in a module store under its id.
///
/// Two entities with the same id are the same record, whatever their other
/// fields say.
pub trait Entity {
    type Id: Clone + Eq + core::fmt::Display + core::fmt::Debug;

    /// Record kind for logs and error messages (`"brand"`, `"price_set"`).
    const KIND: &'static str;

    fn id(&self) -> &Self::Id;
}
