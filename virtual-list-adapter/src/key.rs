#[cfg(not(feature = "std"))]
use alloc::collections::BTreeMap;
#[cfg(feature = "std")]
use std::collections::HashMap;

#[cfg(feature = "std")]
pub(crate) type KeyMap<K, V> = HashMap<K, V>;
#[cfg(not(feature = "std"))]
pub(crate) type KeyMap<K, V> = BTreeMap<K, V>;

/// Bound for cache keys and presence identities.
///
/// `Hash + Eq` with `std`, `Ord` without it (backed by a `BTreeMap`).
#[cfg(feature = "std")]
pub trait MapKey: core::hash::Hash + Eq {}
#[cfg(feature = "std")]
impl<T: core::hash::Hash + Eq> MapKey for T {}

#[cfg(not(feature = "std"))]
pub trait MapKey: Ord {}
#[cfg(not(feature = "std"))]
impl<T: Ord> MapKey for T {}
