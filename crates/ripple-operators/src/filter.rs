//! Filter stage: forward only items satisfying a predicate.

use ripple_core::error::Error;
use ripple_core::receiver::{Receiver, Subscriber};
use ripple_core::sequence::Sequence;

struct FilterReceiver<T, F> {
    downstream: Subscriber<T>,
    predicate: F,
}

impl<T, F> Receiver<T> for FilterReceiver<T, F>
where
    F: FnMut(&T) -> bool,
{
    fn on_next(&mut self, item: T) {
        if self.downstream.is_cancelled() {
            return;
        }
        if (self.predicate)(&item) {
            self.downstream.on_next(item);
        }
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

pub fn filter<T, F>(source: &Sequence<T>, predicate: F) -> Sequence<T>
where
    T: Send + 'static,
    F: Fn(&T) -> bool + Clone + Send + Sync + 'static,
{
    source.lift(move |downstream| {
        let token = downstream.cancellation().clone();
        Subscriber::new(
            FilterReceiver {
                downstream,
                predicate: predicate.clone(),
            },
            token,
        )
    })
}
