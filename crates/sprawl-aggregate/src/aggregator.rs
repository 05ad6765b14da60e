//! The [`Aggregator`] contract and the scalar reducers.

use std::fmt;

/// A stateless, associative and commutative reducer.
///
/// # Contract
///
/// - `aggregate` must be associative and commutative: the engine folds
///   worker-local partials in an unspecified order.
/// - `identity()` must be a neutral element:
///   `aggregate(&mut identity(), x)` leaves `x`.
///
/// Reducers that break commutativity (the overwrite map policy) document
/// the resulting ambiguity on their own type.
pub trait Aggregator: Send + Sync {
    /// The reduced value type.
    type Value: Clone + Send + fmt::Debug;

    /// The value a slot starts from (and resets to).
    fn identity(&self) -> Self::Value;

    /// Fold one contribution into the accumulator.
    fn aggregate(&self, acc: &mut Self::Value, contribution: Self::Value);
}

/// Logical OR. Identity: `false`.
///
/// Used for the activity flag: the run converges only once every vertex
/// reports "no activity" for a full superstep.
#[derive(Clone, Copy, Debug, Default)]
pub struct BooleanOr;

impl Aggregator for BooleanOr {
    type Value = bool;

    fn identity(&self) -> bool {
        false
    }

    fn aggregate(&self, acc: &mut bool, contribution: bool) {
        *acc |= contribution;
    }
}

/// Saturating integer sum. Identity: `0`.
#[derive(Clone, Copy, Debug, Default)]
pub struct IntSum;

impl Aggregator for IntSum {
    type Value = i64;

    fn identity(&self) -> i64 {
        0
    }

    fn aggregate(&self, acc: &mut i64, contribution: i64) {
        *acc = acc.saturating_add(contribution);
    }
}

/// An externally fixed value that ignores contributions.
///
/// Holds run-level scalars such as the ideal edge length, fixed by the
/// run configuration.
#[derive(Clone, Copy, Debug)]
pub struct Constant<T> {
    initial: T,
}

impl<T> Constant<T> {
    /// A constant starting at `initial`.
    pub fn new(initial: T) -> Self {
        Self { initial }
    }
}

impl<T> Aggregator for Constant<T>
where
    T: Clone + Send + Sync + fmt::Debug,
{
    type Value = T;

    fn identity(&self) -> T {
        self.initial.clone()
    }

    fn aggregate(&self, _acc: &mut T, _contribution: T) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn fold<A: Aggregator>(agg: &A, items: impl IntoIterator<Item = A::Value>) -> A::Value {
        let mut acc = agg.identity();
        for item in items {
            agg.aggregate(&mut acc, item);
        }
        acc
    }

    #[test]
    fn boolean_or_reports_any_activity() {
        assert!(!fold(&BooleanOr, [false; 0]));
        assert!(!fold(&BooleanOr, [false, false, false]));
        assert!(fold(&BooleanOr, [false, true, false]));
    }

    #[test]
    fn int_sum_saturates() {
        assert_eq!(fold(&IntSum, [i64::MAX, 1]), i64::MAX);
        assert_eq!(fold(&IntSum, [3, 4]), 7);
    }

    #[test]
    fn constant_ignores_contributions() {
        let k = Constant::new(1.5f32);
        assert_eq!(fold(&k, [9.0, 10.0]), 1.5);
    }

    proptest! {
        #[test]
        fn or_is_order_independent(items in proptest::collection::vec(any::<bool>(), 0..32)) {
            let forward = fold(&BooleanOr, items.iter().copied());
            let backward = fold(&BooleanOr, items.iter().rev().copied());
            prop_assert_eq!(forward, backward);
            prop_assert_eq!(forward, items.iter().any(|b| *b));
        }

        #[test]
        fn int_sum_partials_match_flat_fold(
            items in proptest::collection::vec(-1000i64..1000, 0..64),
            split in 0usize..64,
        ) {
            let split = split.min(items.len());
            let (left, right) = items.split_at(split);
            let mut acc = fold(&IntSum, left.iter().copied());
            IntSum.aggregate(&mut acc, fold(&IntSum, right.iter().copied()));
            prop_assert_eq!(acc, fold(&IntSum, items.iter().copied()));
        }
    }
}
