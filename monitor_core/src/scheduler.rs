//! Cooperative timer queue.
//!
//! Time is supplied by the caller as a monotonic [`Duration`] since the
//! session started, so the queue never reads a clock itself. Periodic work is
//! expressed by the fired task scheduling itself again.

use std::collections::BTreeMap;
use std::time::Duration;

/// Registration returned by [`TickScheduler::schedule`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaskHandle {
    deadline: Duration,
    id: u64,
}

impl TaskHandle {
    pub fn deadline(&self) -> Duration {
        self.deadline
    }

    pub fn id(&self) -> u64 {
        self.id
    }
}

#[derive(Debug, Clone)]
pub struct TickScheduler<T> {
    now: Duration,
    next_id: u64,
    pending: BTreeMap<TaskHandle, T>,
}

impl<T> Default for TickScheduler<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> TickScheduler<T> {
    pub fn new() -> Self {
        Self {
            now: Duration::ZERO,
            next_id: 0,
            pending: BTreeMap::new(),
        }
    }

    /// Current time as seen by the queue: the latest `now` passed to
    /// [`TickScheduler::pop_due`].
    pub fn now(&self) -> Duration {
        self.now
    }

    pub fn schedule(&mut self, delay: Duration, task: T) -> TaskHandle {
        let handle = TaskHandle {
            deadline: self.now.saturating_add(delay),
            id: self.next_id,
        };
        self.next_id += 1;
        self.pending.insert(handle, task);
        handle
    }

    /// Drop a pending registration. Returns `false` when the task already
    /// fired or was cancelled before.
    pub fn cancel(&mut self, handle: TaskHandle) -> bool {
        self.pending.remove(&handle).is_some()
    }

    pub fn is_pending(&self, handle: TaskHandle) -> bool {
        self.pending.contains_key(&handle)
    }

    /// Remove and return the earliest task due at `now`.
    ///
    /// Tasks sharing a deadline come out in registration order. The queue
    /// clock moves to `now`, so a task rescheduling itself from inside its
    /// handler measures the delay from when it actually ran and a late pump
    /// drifts instead of bursting.
    pub fn pop_due(&mut self, now: Duration) -> Option<(TaskHandle, T)> {
        self.now = self.now.max(now);
        let due = self
            .pending
            .first_key_value()
            .is_some_and(|(handle, _)| handle.deadline <= self.now);
        if !due {
            return None;
        }
        self.pending.pop_first()
    }

    pub fn next_deadline(&self) -> Option<Duration> {
        self.pending.keys().next().map(|handle| handle.deadline)
    }

    /// Time left until the next deadline, zero when something is overdue.
    pub fn time_until_next(&self, now: Duration) -> Option<Duration> {
        self.next_deadline().map(|deadline| deadline.saturating_sub(now))
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn clear(&mut self) {
        self.pending.clear();
    }
}
