//! Child entities of the purchase aggregate.

/// Something with its own identity inside an aggregate (a warranty, a return
/// window, a receipt). Two entities with equal ids are the same entity even if
/// their fields differ.
pub trait Entity {
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    fn id(&self) -> &Self::Id;
}
