//! The [`Slot`] lifecycle object.
//!
//! A slot pairs an [`Aggregator`] with two values: the *visible* value,
//! frozen at the last barrier and read by every vertex, and the
//! *pending* value, which absorbs contributions during the current
//! superstep. Nothing contributed in superstep `N` is visible before
//! [`Slot::barrier`] closes `N`.

use crate::aggregator::Aggregator;

/// What happens to a slot's pending value at a barrier.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Persistence {
    /// Pending restarts from the identity every superstep.
    PerSuperstep,
    /// Pending carries over; contributions accumulate for the whole run.
    Persistent,
}

/// A named reduction slot with an explicit superstep lifecycle.
#[derive(Debug)]
pub struct Slot<A: Aggregator> {
    name: &'static str,
    aggregator: A,
    persistence: Persistence,
    visible: A::Value,
    pending: A::Value,
}

impl<A: Aggregator> Slot<A> {
    /// Create a slot whose visible and pending values start at the
    /// aggregator's identity.
    pub fn new(name: &'static str, aggregator: A, persistence: Persistence) -> Self {
        let visible = aggregator.identity();
        let pending = aggregator.identity();
        Self {
            name,
            aggregator,
            persistence,
            visible,
            pending,
        }
    }

    /// Slot name, for logging.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Value frozen at the last barrier.
    pub fn value(&self) -> &A::Value {
        &self.visible
    }

    /// Fold one contribution into the pending value.
    pub fn contribute(&mut self, contribution: A::Value) {
        self.aggregator.aggregate(&mut self.pending, contribution);
    }

    /// Fold a worker-local partial into the pending value.
    ///
    /// Workers reduce their own vertices' contributions first and hand
    /// the result over at the barrier.
    pub fn absorb(&mut self, partial: A::Value) {
        self.contribute(partial);
    }

    /// Close the superstep: freeze pending into visible.
    ///
    /// Returns the newly visible value.
    pub fn barrier(&mut self) -> &A::Value {
        match self.persistence {
            Persistence::PerSuperstep => {
                self.visible =
                    std::mem::replace(&mut self.pending, self.aggregator.identity());
            }
            Persistence::Persistent => {
                self.visible = self.pending.clone();
            }
        }
        &self.visible
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregator::{Aggregator, BooleanOr, Constant, IntSum};

    #[test]
    fn contributions_invisible_until_barrier() {
        let mut slot = Slot::new("activity", BooleanOr, Persistence::PerSuperstep);
        slot.contribute(true);
        assert!(!*slot.value());
        assert!(*slot.barrier());
        assert!(*slot.value());
    }

    #[test]
    fn per_superstep_restarts_from_identity() {
        let mut slot = Slot::new("activity", BooleanOr, Persistence::PerSuperstep);
        slot.contribute(true);
        slot.barrier();
        // Nothing contributed in the next superstep: quiescent.
        assert!(!*slot.barrier());
    }

    #[test]
    fn persistent_accumulates_across_barriers() {
        let mut slot = Slot::new("moved", IntSum, Persistence::Persistent);
        slot.contribute(2);
        slot.barrier();
        slot.contribute(3);
        assert_eq!(*slot.value(), 2);
        assert_eq!(*slot.barrier(), 5);
    }

    #[test]
    fn partials_absorb_like_contributions() {
        let mut slot = Slot::new("moved", IntSum, Persistence::PerSuperstep);
        let mut a = IntSum.identity();
        let mut b = IntSum.identity();
        IntSum.aggregate(&mut a, 4);
        IntSum.aggregate(&mut b, 6);
        slot.absorb(a);
        slot.absorb(b);
        assert_eq!(*slot.barrier(), 10);
    }

    #[test]
    fn constant_ignores_contributions_across_barriers() {
        let mut slot = Slot::new("k", Constant::new(1.0f32), Persistence::Persistent);
        assert_eq!(slot.name(), "k");
        assert_eq!(*slot.value(), 1.0);
        slot.contribute(42.0);
        assert_eq!(*slot.barrier(), 1.0);
        assert_eq!(*slot.barrier(), 1.0);
    }
}
