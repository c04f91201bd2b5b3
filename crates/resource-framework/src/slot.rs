//! # Slots
//!
//! A [`Slot<T>`] is one named `Resource<T>` cell owned by a view-model. Besides the
//! observable value it keeps a call generation so the owner can decide what to do when
//! results of overlapping calls arrive out of order (see [`RacePolicy`]).

use crate::observable::{Observable, Watcher};
use crate::resource::Resource;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// What a slot does with the result of a call that has since been superseded by a
/// newer call on the same slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RacePolicy {
    /// Every result is applied as it arrives; the last one to arrive wins.
    #[default]
    LastArrival,
    /// Only the result of the most recent call is applied.
    LatestCall,
}

/// Identifies one call issued on a slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Ticket(u64);

impl Ticket {
    pub fn generation(&self) -> u64 {
        self.0
    }
}

/// A named `Resource<T>` cell with call bookkeeping.
///
/// Results from calls issued before the last [`reset`](Slot::reset) are always
/// dropped, whatever the policy: a reset slot stays `Idle` until someone asks again.
#[derive(Debug)]
pub struct Slot<T> {
    name: &'static str,
    cell: Observable<Resource<T>>,
    generation: u64,
    floor: u64,
}

impl<T: Clone> Slot<T> {
    pub fn new(name: &'static str) -> Self {
        Self::with_value(name, Resource::Idle)
    }

    pub fn with_value(name: &'static str, initial: Resource<T>) -> Self {
        Self {
            name,
            cell: Observable::new(initial),
            generation: 0,
            floor: 0,
        }
    }

    /// An `Idle` slot whose tickets all come after `generation`. Results of calls
    /// numbered up to `generation` are dropped as if the slot had just been reset.
    pub fn starting_after(name: &'static str, generation: u64) -> Self {
        Self {
            name,
            cell: Observable::new(Resource::Idle),
            generation,
            floor: generation,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn subscriber_count(&self) -> usize {
        self.cell.subscriber_count()
    }

    pub fn current(&self) -> Resource<T> {
        self.cell.get()
    }

    pub fn subscribe(&self) -> Watcher<Resource<T>> {
        self.cell.subscribe()
    }

    /// Starts a new call: the slot becomes `Loading`.
    pub fn begin(&mut self) -> Ticket {
        self.generation += 1;
        self.cell.set(Resource::Loading);
        debug!(slot = self.name, generation = self.generation, "Loading");
        Ticket(self.generation)
    }

    /// Applies the outcome of the call identified by `ticket`.
    ///
    /// Returns `false` when the outcome was dropped.
    pub fn settle(&mut self, ticket: Ticket, outcome: Resource<T>, policy: RacePolicy) -> bool {
        if ticket.0 <= self.floor {
            debug!(slot = self.name, generation = ticket.0, "Dropped result from before reset");
            return false;
        }
        if policy == RacePolicy::LatestCall && ticket.0 != self.generation {
            debug!(
                slot = self.name,
                generation = ticket.0,
                latest = self.generation,
                "Dropped superseded result"
            );
            return false;
        }
        debug!(slot = self.name, generation = ticket.0, state = outcome.state(), "Settled");
        self.cell.set(outcome);
        true
    }

    /// Overwrites the value directly, outside of any call.
    pub fn set(&mut self, value: Resource<T>) {
        debug!(slot = self.name, state = value.state(), "Set");
        self.cell.set(value);
    }

    /// Puts the slot back to `Idle` and disowns every outstanding call.
    pub fn reset(&mut self) {
        self.generation += 1;
        self.floor = self.generation;
        self.cell.set(Resource::Idle);
        debug!(slot = self.name, "Reset");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_begin_then_settle() {
        let mut slot: Slot<u32> = Slot::new("count");
        assert!(slot.current().is_idle());

        let ticket = slot.begin();
        assert!(slot.current().is_loading());

        assert!(slot.settle(ticket, Resource::success(3), RacePolicy::LastArrival));
        assert_eq!(slot.current(), Resource::success(3));
    }

    #[test]
    fn test_last_arrival_applies_superseded_result() {
        let mut slot: Slot<&str> = Slot::new("list");
        let first = slot.begin();
        let second = slot.begin();

        assert!(slot.settle(second, Resource::success("new"), RacePolicy::LastArrival));
        assert!(slot.settle(first, Resource::success("old"), RacePolicy::LastArrival));
        assert_eq!(slot.current(), Resource::success("old"));
    }

    #[test]
    fn test_latest_call_drops_superseded_result() {
        let mut slot: Slot<&str> = Slot::new("list");
        let first = slot.begin();
        let second = slot.begin();

        assert!(slot.settle(second, Resource::success("new"), RacePolicy::LatestCall));
        assert!(!slot.settle(first, Resource::success("old"), RacePolicy::LatestCall));
        assert_eq!(slot.current(), Resource::success("new"));
    }

    #[test]
    fn test_reset_disowns_in_flight_call() {
        let mut slot: Slot<u32> = Slot::new("created");
        let ticket = slot.begin();
        slot.reset();
        assert!(slot.current().is_idle());

        assert!(!slot.settle(ticket, Resource::success(1), RacePolicy::LastArrival));
        assert!(slot.current().is_idle());

        let next = slot.begin();
        assert!(slot.settle(next, Resource::success(2), RacePolicy::LastArrival));
        assert_eq!(slot.current(), Resource::success(2));
    }

    #[test]
    fn test_starting_after_drops_older_tickets() {
        let mut retired: Slot<bool> = Slot::new("favorite");
        let old = retired.begin();

        let mut slot: Slot<bool> = Slot::starting_after("favorite", retired.generation());
        assert!(slot.current().is_idle());
        assert!(!slot.settle(old, Resource::success(true), RacePolicy::LastArrival));
        assert!(slot.current().is_idle());

        let fresh = slot.begin();
        assert!(fresh > old);
        assert!(slot.settle(fresh, Resource::success(false), RacePolicy::LastArrival));
    }

    #[test]
    fn test_reset_from_any_state() {
        let mut slot: Slot<u32> = Slot::with_value("flag", Resource::failure("boom"));
        slot.reset();
        assert!(slot.current().is_idle());

        slot.set(Resource::success(9));
        slot.reset();
        assert!(slot.current().is_idle());
    }
}
