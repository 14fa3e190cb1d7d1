//! Task queue with distributed termination detection
//!
//! Besides the pending tasks, the queue counts how many popped tasks are
//! still being processed. A processing task may push more work, so a worker
//! that finds the queue empty only gives up once that count is zero too. The
//! state "nothing pending, nothing in flight" can never be left again, which
//! makes it a safe global termination signal.

#![allow(dead_code)]

use crate::error::NoMoreTasks;
use std::collections::VecDeque;
use std::ops::Deref;
use std::sync::{Condvar, Mutex, MutexGuard, PoisonError};

struct QueueState<T> {
    pending: VecDeque<T>,
    /// Tasks popped but not yet marked done.
    in_flight: usize,
}

/// FIFO work queue shared by a pool of producer/consumer workers.
pub struct TaskQueue<T> {
    state: Mutex<QueueState<T>>,
    changed: Condvar,
}

impl<T> Default for TaskQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> TaskQueue<T> {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(QueueState {
                pending: VecDeque::new(),
                in_flight: 0,
            }),
            changed: Condvar::new(),
        }
    }

    // A worker that panicked mid-task still has to release its claim, so a
    // poisoned lock is entered anyway. The state is only touched in short
    // critical sections that cannot panic halfway through.
    fn lock(&self) -> MutexGuard<'_, QueueState<T>> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Append a task and wake one waiting consumer.
    pub fn push(&self, task: T) {
        let mut state = self.lock();
        state.pending.push_back(task);
        self.changed.notify_one();
    }

    /// Claim the next task, blocking while other tasks are still in flight.
    ///
    /// Every successful `pop` must be matched by exactly one [`done`](Self::done).
    /// Returns [`NoMoreTasks`] once nothing is pending and nothing is in flight.
    pub fn pop(&self) -> Result<T, NoMoreTasks> {
        let mut state = self.lock();
        while state.pending.is_empty() && state.in_flight != 0 {
            state = self
                .changed
                .wait(state)
                .unwrap_or_else(PoisonError::into_inner);
        }

        match state.pending.pop_front() {
            Some(task) => {
                state.in_flight += 1;
                Ok(task)
            }
            None => Err(NoMoreTasks),
        }
    }

    /// Mark one previously popped task as finished.
    ///
    /// Wakes every waiter when the last in-flight task completes, since the
    /// termination condition may now hold for all of them at once.
    pub fn done(&self) {
        let mut state = self.lock();
        assert!(state.in_flight > 0, "done() called without a matching pop()");
        state.in_flight -= 1;
        if state.in_flight == 0 {
            self.changed.notify_all();
        }
    }

    /// Like [`pop`](Self::pop), but the claim is released when the returned
    /// guard is dropped, on every exit path including unwinding.
    pub fn claim(&self) -> Result<ClaimedTask<'_, T>, NoMoreTasks> {
        let task = self.pop()?;
        Ok(ClaimedTask { queue: self, task })
    }

    /// Number of tasks waiting to be claimed.
    pub fn pending(&self) -> usize {
        self.lock().pending.len()
    }

    /// Number of claimed tasks not yet marked done.
    pub fn in_flight(&self) -> usize {
        self.lock().in_flight
    }

    /// Whether the search has reached quiescence.
    pub fn is_exhausted(&self) -> bool {
        let state = self.lock();
        state.pending.is_empty() && state.in_flight == 0
    }
}

/// A task claimed from a [`TaskQueue`]; calls `done()` when dropped.
pub struct ClaimedTask<'q, T> {
    queue: &'q TaskQueue<T>,
    task: T,
}

impl<T> ClaimedTask<'_, T> {
    /// The queue the task came from, for pushing follow-up work.
    pub fn queue(&self) -> &TaskQueue<T> {
        self.queue
    }
}

impl<T> Deref for ClaimedTask<'_, T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.task
    }
}

impl<T> Drop for ClaimedTask<'_, T> {
    fn drop(&mut self) {
        self.queue.done();
    }
}
