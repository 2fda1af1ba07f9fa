use std::collections::{BTreeMap, HashMap};

use crate::host::element::HostId;

/// Handle of a scheduled task. Cancelling a handle that already fired or was cancelled is a
/// no-op.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaskHandle(u64);

/// What a task means to the renderer that owns it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TaskKind {
    /// Repeating timer tick.
    Tick,
    /// Display-synchronized repaint callback.
    Frame,
    /// Delayed clear after the grace period.
    Clear,
}

/// A task that came due, routed to its owner.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Due {
    /// Handle the task was scheduled under.
    pub handle: TaskHandle,
    /// Host whose controller receives the task.
    pub owner: HostId,
    /// Task meaning.
    pub kind: TaskKind,
    /// Scheduled time, which is also the clock value during dispatch.
    pub at_ms: f64,
}

#[derive(Clone, Copy, Debug)]
struct Task {
    owner: HostId,
    kind: TaskKind,
    due_us: u64,
    seq: u64,
    period_us: Option<u64>,
}

/// Single-threaded virtual-clock task queue.
///
/// Determinism rule: tasks fire in `(due time, scheduling order)` order. Times are kept in whole
/// microseconds so ordering never depends on float comparison.
#[derive(Debug)]
pub struct Scheduler {
    now_us: u64,
    frame_us: u64,
    next_handle: u64,
    next_seq: u64,
    queue: BTreeMap<(u64, u64), TaskHandle>,
    tasks: HashMap<TaskHandle, Task>,
}

fn to_us(ms: f64) -> u64 {
    if !ms.is_finite() || ms <= 0.0 {
        return 0;
    }
    (ms * 1000.0).round() as u64
}

impl Scheduler {
    /// New scheduler at time zero with the given display refresh interval.
    pub fn new(frame_interval_ms: f64) -> Self {
        Self {
            now_us: 0,
            frame_us: to_us(frame_interval_ms).max(1),
            next_handle: 1,
            next_seq: 0,
            queue: BTreeMap::new(),
            tasks: HashMap::new(),
        }
    }

    /// Current clock value.
    pub fn now_ms(&self) -> f64 {
        self.now_us as f64 / 1000.0
    }

    /// Fire once after `delay_ms`.
    pub fn set_timeout(&mut self, owner: HostId, kind: TaskKind, delay_ms: f64) -> TaskHandle {
        let due = self.now_us.saturating_add(to_us(delay_ms));
        self.insert(owner, kind, due, None)
    }

    /// Fire every `period_ms`, first after one period.
    pub fn set_interval(&mut self, owner: HostId, kind: TaskKind, period_ms: f64) -> TaskHandle {
        let period = to_us(period_ms).max(1);
        let due = self.now_us.saturating_add(period);
        self.insert(owner, kind, due, Some(period))
    }

    /// Fire a [`TaskKind::Frame`] at the next display refresh strictly after now.
    pub fn request_frame(&mut self, owner: HostId) -> TaskHandle {
        let due = (self.now_us / self.frame_us + 1) * self.frame_us;
        self.insert(owner, TaskKind::Frame, due, None)
    }

    /// Cancel a task. Returns `true` if it was still pending.
    pub fn cancel(&mut self, handle: TaskHandle) -> bool {
        match self.tasks.remove(&handle) {
            Some(task) => {
                self.queue.remove(&(task.due_us, task.seq));
                true
            }
            None => false,
        }
    }

    /// Cancel every task owned by `owner`. Returns how many were pending.
    pub fn cancel_owner(&mut self, owner: HostId) -> usize {
        let handles: Vec<TaskHandle> = self
            .tasks
            .iter()
            .filter(|(_, t)| t.owner == owner)
            .map(|(h, _)| *h)
            .collect();
        handles.into_iter().filter(|h| self.cancel(*h)).count()
    }

    /// `true` if `handle` has not fired (or, for intervals, has not been cancelled).
    pub fn is_pending(&self, handle: TaskHandle) -> bool {
        self.tasks.contains_key(&handle)
    }

    /// Number of pending tasks owned by `owner`.
    pub fn pending_for(&self, owner: HostId) -> usize {
        self.tasks.values().filter(|t| t.owner == owner).count()
    }

    /// Total pending tasks.
    pub fn pending(&self) -> usize {
        self.tasks.len()
    }

    /// Time of the earliest pending task.
    pub fn next_due_ms(&self) -> Option<f64> {
        self.queue
            .keys()
            .next()
            .map(|&(due, _)| due as f64 / 1000.0)
    }

    /// Pop the earliest task due at or before `until_ms`, moving the clock to its due time.
    ///
    /// Intervals are re-armed before they are returned, so the receiver may cancel them.
    pub fn pop_due(&mut self, until_ms: f64) -> Option<Due> {
        let until = to_us(until_ms);
        let (&(due_us, seq), &handle) = self.queue.iter().next()?;
        if due_us > until {
            return None;
        }
        self.queue.remove(&(due_us, seq));
        self.now_us = self.now_us.max(due_us);

        let task = self.tasks.get(&handle).copied()?;
        match task.period_us {
            Some(period) => {
                let next = Task {
                    due_us: due_us.saturating_add(period),
                    seq: self.bump_seq(),
                    ..task
                };
                self.queue.insert((next.due_us, next.seq), handle);
                self.tasks.insert(handle, next);
            }
            None => {
                self.tasks.remove(&handle);
            }
        }

        Some(Due {
            handle,
            owner: task.owner,
            kind: task.kind,
            at_ms: due_us as f64 / 1000.0,
        })
    }

    /// Move the clock forward to `ms` (never backwards).
    pub fn advance_clock(&mut self, ms: f64) {
        self.now_us = self.now_us.max(to_us(ms));
    }

    fn bump_seq(&mut self) -> u64 {
        let s = self.next_seq;
        self.next_seq += 1;
        s
    }

    fn insert(
        &mut self,
        owner: HostId,
        kind: TaskKind,
        due_us: u64,
        period_us: Option<u64>,
    ) -> TaskHandle {
        let handle = TaskHandle(self.next_handle);
        self.next_handle += 1;
        let seq = self.bump_seq();
        self.queue.insert((due_us, seq), handle);
        self.tasks.insert(
            handle,
            Task {
                owner,
                kind,
                due_us,
                seq,
                period_us,
            },
        );
        handle
    }
}

#[cfg(test)]
#[path = "../../tests/unit/runtime/scheduler.rs"]
mod tests;
