//! Stable row identity.

use std::fmt::Debug;
use std::hash::Hash;

/// A row with a stable unique identifier.
///
/// The identifier is the only structure the list protocol needs; it is
/// used to de-duplicate rows when pages are accumulated.
pub trait Identified {
    type Id: Eq + Hash + Clone + Debug + Send + Sync;

    fn id(&self) -> Self::Id;
}
