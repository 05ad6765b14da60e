//! Set-union aggregation over vertex ids.

use indexmap::IndexSet;
use sprawl_core::VertexId;

use crate::aggregator::Aggregator;

/// Union of vertex-id sets. Identity: the empty set.
///
/// Iteration order of the reduced set is first-insertion order.
#[derive(Clone, Copy, Debug, Default)]
pub struct IdSetUnion;

impl Aggregator for IdSetUnion {
    type Value = IndexSet<VertexId>;

    fn identity(&self) -> Self::Value {
        IndexSet::new()
    }

    fn aggregate(&self, acc: &mut Self::Value, contribution: Self::Value) {
        acc.extend(contribution);
    }
}
