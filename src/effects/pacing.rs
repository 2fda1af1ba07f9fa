use crate::host::element::HostId;
use crate::runtime::scheduler::{Scheduler, TaskHandle, TaskKind};

/// Timestamp gating for display-synchronized loops with a lower frame cap.
#[derive(Clone, Copy, Debug)]
pub(crate) struct FrameGate {
    budget_ms: f64,
    last_ms: Option<f64>,
}

impl FrameGate {
    pub(crate) fn new(max_fps: f64) -> Self {
        Self {
            budget_ms: 1000.0 / max_fps,
            last_ms: None,
        }
    }

    pub(crate) fn reset(&mut self) {
        self.last_ms = None;
    }

    /// Admit a frame at `ts_ms`, returning the time since the previous admitted frame (zero for
    /// the first), or `None` when the frame falls inside the budget and must be skipped.
    pub(crate) fn admit(&mut self, ts_ms: f64) -> Option<f64> {
        match self.last_ms {
            Some(last) if ts_ms - last < self.budget_ms => None,
            Some(last) => {
                self.last_ms = Some(ts_ms);
                Some(ts_ms - last)
            }
            None => {
                self.last_ms = Some(ts_ms);
                Some(0.0)
            }
        }
    }
}

/// The single pending grace-period clear of a renderer.
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct GraceTimer {
    pending: Option<TaskHandle>,
}

impl GraceTimer {
    /// Schedule the clear, replacing any clear already pending.
    pub(crate) fn arm(&mut self, scheduler: &mut Scheduler, owner: HostId, delay_ms: f64) {
        self.cancel(scheduler);
        self.pending = Some(scheduler.set_timeout(owner, TaskKind::Clear, delay_ms));
    }

    /// Drop the pending clear, if any.
    pub(crate) fn cancel(&mut self, scheduler: &mut Scheduler) {
        if let Some(h) = self.pending.take() {
            scheduler.cancel(h);
        }
    }

    /// Accept a fired clear. Returns `false` for a stale handle.
    pub(crate) fn fired(&mut self, handle: TaskHandle) -> bool {
        if self.pending == Some(handle) {
            self.pending = None;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/effects/pacing.rs"]
mod tests;
