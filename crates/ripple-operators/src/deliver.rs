//! Delivery stage that routes every downstream call through a scheduler.
//!
//! Stage authors needing deferred work use this seam instead of spawning
//! their own threads, keeping delivery cancellable and deterministic under
//! an inline or trampoline scheduler.

use std::sync::{Arc, Mutex};

use ripple_core::error::Error;
use ripple_core::receiver::{Receiver, Subscriber};
use ripple_core::schedule::Scheduler;
use ripple_core::sequence::Sequence;

struct ScheduledReceiver<T> {
    downstream: Arc<Mutex<Subscriber<T>>>,
    scheduler: Arc<dyn Scheduler>,
}

impl<T: Send + 'static> ScheduledReceiver<T> {
    fn forward(&self, deliver: impl FnOnce(&mut Subscriber<T>) + Send + 'static) {
        let downstream = Arc::clone(&self.downstream);
        self.scheduler.schedule(Box::new(move || {
            let Ok(mut downstream) = downstream.lock() else {
                return;
            };
            // The subscription may have been cancelled between scheduling
            // and execution; re-check at delivery time.
            if !downstream.is_cancelled() {
                deliver(&mut downstream);
            }
        }));
    }
}

impl<T: Send + 'static> Receiver<T> for ScheduledReceiver<T> {
    fn on_next(&mut self, item: T) {
        self.forward(move |downstream| downstream.on_next(item));
    }

    fn on_error(&mut self, err: Error) {
        self.forward(move |downstream| downstream.on_error(err));
    }

    fn on_completed(&mut self) {
        self.forward(|downstream| downstream.on_completed());
    }
}

/// Forward every event as a task on `scheduler` instead of delivering it on
/// the producer's stack.
pub fn deliver_via<T>(source: &Sequence<T>, scheduler: Arc<dyn Scheduler>) -> Sequence<T>
where
    T: Send + 'static,
{
    source.lift(move |downstream| {
        let token = downstream.cancellation().clone();
        Subscriber::new(
            ScheduledReceiver {
                downstream: Arc::new(Mutex::new(downstream)),
                scheduler: Arc::clone(&scheduler),
            },
            token,
        )
    })
}
