//! Virtual-time timer queue.
//!
//! Continuations are typed ([`Scheduled`]) and bound to an agent id; the
//! runtime re-validates that the agent is still on the roster when a timer
//! fires. Timers due at the same instant fire in scheduling order, so each
//! agent's own callbacks stay strictly ordered.

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

use agent_core::{AgentEvent, EntityId, Scheduler, Tick};

/// Work item fired by the queue.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Scheduled {
    Agent(EntityId, AgentEvent),
    /// Population check of the spawner.
    Populate,
}

#[derive(Debug)]
struct Timer {
    due: Tick,
    seq: u64,
    task: Scheduled,
}

impl PartialEq for Timer {
    fn eq(&self, other: &Self) -> bool {
        self.due == other.due && self.seq == other.seq
    }
}

impl Eq for Timer {}

impl PartialOrd for Timer {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Timer {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.due, self.seq).cmp(&(other.due, other.seq))
    }
}

/// Min-heap of pending timers plus the current virtual time.
#[derive(Debug, Default)]
pub struct TimerQueue {
    now: Tick,
    seq: u64,
    heap: BinaryHeap<Reverse<Timer>>,
}

impl TimerQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now(&self) -> Tick {
        self.now
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Fires `task` after `delay_ms` of virtual time.
    pub fn schedule_in(&mut self, delay_ms: u64, task: Scheduled) {
        let due = self.now + delay_ms;
        self.seq += 1;
        self.heap.push(Reverse(Timer {
            due,
            seq: self.seq,
            task,
        }));
    }

    /// Due time of the earliest pending timer.
    pub fn next_due(&self) -> Option<Tick> {
        self.heap.peek().map(|Reverse(timer)| timer.due)
    }

    /// Pops the earliest timer due at or before `until`, moving the clock to
    /// its due time.
    pub fn pop_due(&mut self, until: Tick) -> Option<Scheduled> {
        if self.next_due()? > until {
            return None;
        }
        let Reverse(timer) = self.heap.pop()?;
        self.now = self.now.max(timer.due);
        Some(timer.task)
    }

    /// Moves the clock forward; never backward.
    pub fn advance_to(&mut self, time: Tick) {
        self.now = self.now.max(time);
    }

    /// Drops every timer bound to `agent`.
    pub fn cancel_agent(&mut self, agent: EntityId) -> usize {
        let before = self.heap.len();
        self.heap
            .retain(|Reverse(timer)| !matches!(timer.task, Scheduled::Agent(id, _) if id == agent));
        let dropped = before - self.heap.len();
        if dropped > 0 {
            tracing::trace!(target: "runtime::timers", %agent, dropped, "timers cancelled");
        }
        dropped
    }
}

impl Scheduler for TimerQueue {
    fn schedule(&mut self, agent: EntityId, delay_ms: u64, event: AgentEvent) {
        tracing::trace!(target: "runtime::timers", %agent, delay_ms, ?event, "scheduled");
        self.schedule_in(delay_ms, Scheduled::Agent(agent, event));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fires_in_due_order() {
        let mut queue = TimerQueue::new();
        queue.schedule(EntityId(1), 300, AgentEvent::Think);
        queue.schedule(EntityId(1), 100, AgentEvent::CheckVitals);
        queue.schedule_in(200, Scheduled::Populate);

        assert_eq!(
            queue.pop_due(Tick(1_000)),
            Some(Scheduled::Agent(EntityId(1), AgentEvent::CheckVitals))
        );
        assert_eq!(queue.now(), Tick(100));
        assert_eq!(queue.pop_due(Tick(1_000)), Some(Scheduled::Populate));
        assert_eq!(
            queue.pop_due(Tick(1_000)),
            Some(Scheduled::Agent(EntityId(1), AgentEvent::Think))
        );
        assert!(queue.is_empty());
    }

    #[test]
    fn test_same_instant_keeps_scheduling_order() {
        let mut queue = TimerQueue::new();
        queue.schedule(EntityId(1), 50, AgentEvent::Exit { epoch: 1 });
        queue.schedule(EntityId(1), 50, AgentEvent::Execute { epoch: 1 });

        assert_eq!(
            queue.pop_due(Tick(50)),
            Some(Scheduled::Agent(EntityId(1), AgentEvent::Exit { epoch: 1 }))
        );
        assert_eq!(
            queue.pop_due(Tick(50)),
            Some(Scheduled::Agent(EntityId(1), AgentEvent::Execute { epoch: 1 }))
        );
    }

    #[test]
    fn test_not_yet_due_stays_queued() {
        let mut queue = TimerQueue::new();
        queue.schedule(EntityId(1), 500, AgentEvent::Think);
        assert_eq!(queue.pop_due(Tick(499)), None);
        assert_eq!(queue.len(), 1);
        assert_eq!(queue.now(), Tick::ZERO);
    }

    #[test]
    fn test_delay_is_relative_to_clock() {
        let mut queue = TimerQueue::new();
        queue.advance_to(Tick(1_000));
        queue.advance_to(Tick(10));
        queue.schedule(EntityId(1), 5, AgentEvent::Think);
        assert_eq!(queue.next_due(), Some(Tick(1_005)));
    }

    #[test]
    fn test_cancel_agent_keeps_others() {
        let mut queue = TimerQueue::new();
        queue.schedule(EntityId(1), 10, AgentEvent::Think);
        queue.schedule(EntityId(2), 10, AgentEvent::Think);
        queue.schedule_in(10, Scheduled::Populate);

        assert_eq!(queue.cancel_agent(EntityId(1)), 1);
        assert_eq!(queue.len(), 2);
    }
}
