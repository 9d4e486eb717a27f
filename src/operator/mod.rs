//! The transformation operators of a [`Dataset`](crate::Dataset).
//!
//! Each operator lives in its own file and contributes one method to
//! `Dataset` through an `impl` block. All of them are lazy: they only
//! extend the plan, nothing runs until
//! [`collect`](crate::Dataset::collect) is called.

use std::hash::Hash;

mod flat_map;
mod join;
mod map;
mod map_values;
mod reduce;

/// A keyed record.
pub type KeyValue<K, V> = (K, V);

/// Marker trait for the types that can flow through an operator.
pub trait Data: Clone + Send + 'static {}
impl<T: Clone + Send + 'static> Data for T {}

/// Marker trait for the types usable as record keys.
pub trait DataKey: Data + Hash + Eq {}
impl<T: Data + Hash + Eq> DataKey for T {}
