//! Keyed map aggregation with a pluggable merge policy.
//!
//! [`MapAggregator`] merges per-key contributions: an absent key is
//! always inserted as-is, a present key is resolved entirely by the
//! [`MergePolicy`]. Useful for fan-out from a coordinating role to many
//! vertices and for per-group statistics (counts, coordinate extrema).

use std::fmt;
use std::hash::Hash;
use std::marker::PhantomData;

use indexmap::IndexMap;

use crate::aggregator::Aggregator;

/// How a contribution is combined with the value already stored under
/// the same key.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MergePolicy {
    /// Keep the incoming value.
    ///
    /// Not commutative. If several independent contributors write the
    /// same key in the same superstep, which write survives is
    /// unspecified. Callers must keep a single writer per key.
    Overwrite,
    /// Add the values.
    Sum,
    /// Keep the smaller value (component-wise for vectors).
    Min,
    /// Keep the larger value (component-wise for vectors).
    Max,
}

/// Values a [`MapAggregator`] can merge.
pub trait MergeValue: Clone + Send + Sync + fmt::Debug {
    /// `self + other`.
    fn merge_sum(&self, other: &Self) -> Self;
    /// `min(self, other)`.
    fn merge_min(&self, other: &Self) -> Self;
    /// `max(self, other)`.
    fn merge_max(&self, other: &Self) -> Self;
}

macro_rules! impl_merge_int {
    ($($t:ty),*) => {$(
        impl MergeValue for $t {
            fn merge_sum(&self, other: &Self) -> Self {
                self.saturating_add(*other)
            }
            fn merge_min(&self, other: &Self) -> Self {
                (*self).min(*other)
            }
            fn merge_max(&self, other: &Self) -> Self {
                (*self).max(*other)
            }
        }
    )*};
}

impl_merge_int!(i32, i64, u32, u64);

impl MergeValue for f32 {
    fn merge_sum(&self, other: &Self) -> Self {
        self + other
    }
    fn merge_min(&self, other: &Self) -> Self {
        self.min(*other)
    }
    fn merge_max(&self, other: &Self) -> Self {
        self.max(*other)
    }
}

impl MergeValue for [f32; 2] {
    fn merge_sum(&self, other: &Self) -> Self {
        [self[0] + other[0], self[1] + other[1]]
    }
    fn merge_min(&self, other: &Self) -> Self {
        [self[0].min(other[0]), self[1].min(other[1])]
    }
    fn merge_max(&self, other: &Self) -> Self {
        [self[0].max(other[0]), self[1].max(other[1])]
    }
}

/// Resolve a key conflict under `policy`.
pub fn merge<V: MergeValue>(policy: MergePolicy, existing: &V, incoming: V) -> V {
    match policy {
        MergePolicy::Overwrite => incoming,
        MergePolicy::Sum => existing.merge_sum(&incoming),
        MergePolicy::Min => existing.merge_min(&incoming),
        MergePolicy::Max => existing.merge_max(&incoming),
    }
}

/// Map-valued aggregator. Identity: the empty map.
///
/// Iteration order of the reduced map is first-insertion order.
pub struct MapAggregator<K, V> {
    policy: MergePolicy,
    _marker: PhantomData<fn() -> (K, V)>,
}

impl<K, V> MapAggregator<K, V> {
    /// An aggregator merging conflicts with `policy`.
    pub fn new(policy: MergePolicy) -> Self {
        Self {
            policy,
            _marker: PhantomData,
        }
    }

    /// The configured merge policy.
    pub fn policy(&self) -> MergePolicy {
        self.policy
    }
}

impl<K, V> Clone for MapAggregator<K, V> {
    fn clone(&self) -> Self {
        Self::new(self.policy)
    }
}

impl<K, V> fmt::Debug for MapAggregator<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MapAggregator")
            .field("policy", &self.policy)
            .finish()
    }
}

impl<K, V> Aggregator for MapAggregator<K, V>
where
    K: Hash + Eq + Clone + Send + Sync + fmt::Debug,
    V: MergeValue,
{
    type Value = IndexMap<K, V>;

    fn identity(&self) -> Self::Value {
        IndexMap::new()
    }

    fn aggregate(&self, acc: &mut Self::Value, contribution: Self::Value) {
        for (key, incoming) in contribution {
            match acc.get_mut(&key) {
                Some(existing) => *existing = merge(self.policy, existing, incoming),
                None => {
                    acc.insert(key, incoming);
                }
            }
        }
    }
}
