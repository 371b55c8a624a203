//! Scheduling seam for deferred work inside hand-written stages.
//!
//! Stage authors must route deferred work through a [`Scheduler`] rather
//! than spawning ad hoc threads, so delivery stays cancellable and
//! deterministic under test.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use crate::config::PipelineConfig;

/// A unit of deferred work accepted by a scheduler.
pub type Task = Box<dyn FnOnce() + Send>;

pub trait Scheduler: Send + Sync {
    fn schedule(&self, task: Task);
}

/// Runs every task immediately on the calling thread.
#[derive(Clone, Copy, Debug, Default)]
pub struct InlineScheduler;

impl Scheduler for InlineScheduler {
    fn schedule(&self, task: Task) {
        task();
    }
}

/// FIFO scheduler that flattens reentrant scheduling.
///
/// A task scheduled while another is running is queued and executed by the
/// drain loop already on the stack, so tasks run in `schedule` order and the
/// stack never nests.
pub struct TrampolineScheduler {
    queue: Mutex<VecDeque<Task>>,
    draining: AtomicBool,
}

impl TrampolineScheduler {
    pub fn new() -> Self {
        Self::with_queue_hint(PipelineConfig::default().trampoline_queue_hint)
    }

    pub fn with_queue_hint(hint: usize) -> Self {
        Self {
            queue: Mutex::new(VecDeque::with_capacity(hint.max(1))),
            draining: AtomicBool::new(false),
        }
    }

    pub fn from_config(cfg: &PipelineConfig) -> Self {
        Self::with_queue_hint(cfg.trampoline_queue_hint)
    }

    fn push(&self, task: Task) {
        if let Ok(mut queue) = self.queue.lock() {
            queue.push_back(task);
        }
    }

    fn pop(&self) -> Option<Task> {
        self.queue.lock().ok().and_then(|mut queue| queue.pop_front())
    }

    fn queue_is_empty(&self) -> bool {
        self.queue.lock().map(|queue| queue.is_empty()).unwrap_or(true)
    }

    fn try_claim_drain(&self) -> bool {
        self.draining
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }
}

impl Default for TrampolineScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl Scheduler for TrampolineScheduler {
    fn schedule(&self, task: Task) {
        self.push(task);
        if !self.try_claim_drain() {
            // Someone further up the stack (or on another thread) is already
            // draining and will pick this task up.
            return;
        }
        loop {
            while let Some(task) = self.pop() {
                task();
            }
            self.draining.store(false, Ordering::Release);
            // A task may have slipped in between the last pop and the reset;
            // reclaim the drain if so, otherwise it is someone else's turn.
            if self.queue_is_empty() || !self.try_claim_drain() {
                break;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn inline_runs_immediately() {
        let ran = Arc::new(AtomicBool::new(false));
        let flag = ran.clone();
        InlineScheduler.schedule(Box::new(move || flag.store(true, Ordering::SeqCst)));
        assert!(ran.load(Ordering::SeqCst));
    }

    #[test]
    fn trampoline_flattens_reentrant_scheduling() {
        let sched = Arc::new(TrampolineScheduler::new());
        let order = Arc::new(Mutex::new(Vec::new()));

        let inner_order = order.clone();
        let inner_sched = sched.clone();
        let outer_order = order.clone();
        sched.schedule(Box::new(move || {
            outer_order.lock().unwrap().push("first");
            inner_sched.schedule(Box::new(move || {
                inner_order.lock().unwrap().push("nested");
            }));
            outer_order.lock().unwrap().push("second");
        }));

        // The nested task must not run in the middle of the outer one.
        assert_eq!(*order.lock().unwrap(), vec!["first", "second", "nested"]);
    }

    #[test]
    fn trampoline_preserves_fifo_order() {
        let sched = TrampolineScheduler::with_queue_hint(2);
        let order = Arc::new(Mutex::new(Vec::new()));
        for i in 0..5 {
            let order = order.clone();
            sched.schedule(Box::new(move || order.lock().unwrap().push(i)));
        }
        assert_eq!(*order.lock().unwrap(), vec![0, 1, 2, 3, 4]);
    }
}
