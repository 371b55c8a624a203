//! Scan stage: left fold emitting the seed followed by each successor state.
//!
//! The accumulator is an immutable value replaced wholesale on every item,
//! owned by the stage's receiver and discarded at teardown.

use ripple_core::error::Error;
use ripple_core::receiver::{Receiver, Subscriber};
use ripple_core::sequence::Sequence;

struct ScanReceiver<S, F> {
    downstream: Subscriber<S>,
    state: S,
    step: F,
}

impl<T, S, F> Receiver<T> for ScanReceiver<S, F>
where
    S: Clone,
    F: FnMut(&S, &T) -> S,
{
    fn on_next(&mut self, item: T) {
        if self.downstream.is_cancelled() {
            return;
        }
        let next = (self.step)(&self.state, &item);
        self.state = next.clone();
        self.downstream.on_next(next);
    }

    fn on_error(&mut self, err: Error) {
        if self.downstream.is_cancelled() {
            return;
        }
        self.downstream.on_error(err);
    }

    fn on_completed(&mut self) {
        if self.downstream.is_cancelled() {
            return;
        }
        self.downstream.on_completed();
    }
}

/// Fold `step` over the sequence. The seed is emitted as the first output,
/// before any source item arrives; callers that do not want it filter it
/// back out (see the running-average composition).
pub fn scan<T, S, F>(source: &Sequence<T>, seed: S, step: F) -> Sequence<S>
where
    T: Send + 'static,
    S: Clone + Send + Sync + 'static,
    F: Fn(&S, &T) -> S + Clone + Send + Sync + 'static,
{
    source.lift(move |mut downstream| {
        downstream.on_next(seed.clone());
        let token = downstream.cancellation().clone();
        Subscriber::new(
            ScanReceiver {
                downstream,
                state: seed.clone(),
                step: step.clone(),
            },
            token,
        )
    })
}
