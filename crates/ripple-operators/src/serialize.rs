//! Sequential guard: enforce the single-pass delivery contract against a
//! misbehaving or concurrently emitting source.
//!
//! The guard is the sole point of mutual exclusion in this workspace. It
//! only filters what reaches downstream; it never unsubscribes the source.
//! Auto-cancel on terminal signals is a property of the safe subscription
//! path in `ripple-core`, which is exactly why the guard matters on the
//! unchecked path.

use std::sync::{Arc, Mutex};

use ripple_core::config::PipelineConfig;
use ripple_core::error::Error;
use ripple_core::receiver::{Receiver, Subscriber};
use ripple_core::sequence::Sequence;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Gate {
    Open,
    Terminated,
}

struct GuardInner<T> {
    downstream: Subscriber<T>,
    gate: Gate,
}

/// Cloneable receiver that serializes all upstream events through one lock
/// and lets at most one terminal signal through.
///
/// Clones share the gate, so a producer may hand one to each of its threads;
/// the lock makes concurrent calls strictly ordered and the terminal
/// check-and-transition atomic.
pub struct SequentialGuard<T> {
    inner: Arc<Mutex<GuardInner<T>>>,
    strict: bool,
}

impl<T> Clone for SequentialGuard<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
            strict: self.strict,
        }
    }
}

impl<T> SequentialGuard<T> {
    pub fn new(downstream: Subscriber<T>) -> Self {
        Self::with_config(downstream, &PipelineConfig::default())
    }

    pub fn with_config(downstream: Subscriber<T>, config: &PipelineConfig) -> Self {
        Self {
            inner: Arc::new(Mutex::new(GuardInner {
                downstream,
                gate: Gate::Open,
            })),
            strict: config.strict_contract_checks,
        }
    }

    #[cfg(feature = "tracing")]
    fn report_drop(&self, event: &'static str) {
        if self.strict {
            tracing::warn!(event, "sequential guard dropped a contract-violating event");
        }
    }

    #[cfg(not(feature = "tracing"))]
    fn report_drop(&self, _event: &'static str) {
        let _ = self.strict;
    }
}

impl<T> Receiver<T> for SequentialGuard<T> {
    fn on_next(&mut self, item: T) {
        // A poisoned lock means a producer panicked mid-delivery; treat the
        // stream as terminated and drop the event.
        let Ok(mut inner) = self.inner.lock() else {
            return;
        };
        if inner.gate != Gate::Open {
            drop(inner);
            self.report_drop("on_next");
            return;
        }
        inner.downstream.on_next(item);
    }

    fn on_error(&mut self, err: Error) {
        let Ok(mut inner) = self.inner.lock() else {
            return;
        };
        if inner.gate != Gate::Open {
            drop(inner);
            self.report_drop("on_error");
            return;
        }
        inner.gate = Gate::Terminated;
        inner.downstream.on_error(err);
    }

    fn on_completed(&mut self) {
        let Ok(mut inner) = self.inner.lock() else {
            return;
        };
        if inner.gate != Gate::Open {
            drop(inner);
            self.report_drop("on_completed");
            return;
        }
        inner.gate = Gate::Terminated;
        inner.downstream.on_completed();
    }
}

/// Lift the guard into a pipeline: the returned sequence delivers a lawful
/// event stream no matter what the source does.
pub fn serialize<T>(source: &Sequence<T>, config: &PipelineConfig) -> Sequence<T>
where
    T: Send + 'static,
{
    let config = config.clone();
    source.lift(move |downstream| {
        let token = downstream.cancellation().clone();
        Subscriber::new(SequentialGuard::with_config(downstream, &config), token)
    })
}
