//! Push-based sequences: creation, the safe and unchecked subscription
//! paths, and the two operator extension points (`compose` and `lift`).

use std::sync::Arc;

use crate::error::Error;
use crate::receiver::{Cancellation, Receiver, Subscriber};

type ProducerFn<T> = dyn Fn(Subscriber<T>) + Send + Sync;

/// A push-based producer of zero or more items followed by exactly one
/// terminal signal. Nothing runs until a subscription attaches; assembly is
/// front-to-back, subscription wires back-to-front.
pub struct Sequence<T> {
    producer: Arc<ProducerFn<T>>,
}

impl<T> Clone for Sequence<T> {
    fn clone(&self) -> Self {
        Self {
            producer: Arc::clone(&self.producer),
        }
    }
}

impl<T: Send + 'static> Sequence<T> {
    /// Build a sequence from a producer function invoked once per
    /// subscription with a fresh subscriber.
    pub fn new(producer: impl Fn(Subscriber<T>) + Send + Sync + 'static) -> Self {
        Self {
            producer: Arc::new(producer),
        }
    }

    /// Emit every item of a cloneable iterator source, then complete.
    ///
    /// The producer checks the subscription token between items so a
    /// mid-stream cancel also stops the iteration, not just delivery.
    pub fn from_iter<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = T> + Clone + Send + Sync + 'static,
    {
        Self::new(move |mut sub| {
            for item in iter.clone() {
                if sub.is_cancelled() {
                    return;
                }
                sub.on_next(item);
            }
            sub.on_completed();
        })
    }

    /// Complete immediately without emitting anything.
    pub fn empty() -> Self {
        Self::new(|mut sub| sub.on_completed())
    }

    /// Fail immediately with `err`.
    pub fn fail(err: Error) -> Self {
        Self::new(move |mut sub| sub.on_error(err.clone()))
    }

    /// Safe subscription: the first terminal signal also cancels the
    /// subscription token, after which the cancellation check drops anything
    /// a misbehaving source keeps pushing.
    pub fn subscribe(&self, receiver: impl Receiver<T> + Send + 'static) -> Cancellation {
        self.subscribe_with(receiver, Cancellation::new())
    }

    /// Safe subscription with a caller-supplied token, e.g. so the receiver
    /// can hold a clone and cancel itself mid-stream.
    pub fn subscribe_with(
        &self,
        receiver: impl Receiver<T> + Send + 'static,
        cancellation: Cancellation,
    ) -> Cancellation {
        #[cfg(feature = "tracing")]
        tracing::debug!("subscribe (safe path)");

        let auto = AutoCancel {
            inner: receiver,
            cancellation: cancellation.clone(),
        };
        self.attach(Subscriber::new(auto, cancellation.clone()));
        cancellation
    }

    /// Unchecked subscription: events are delivered verbatim, with no
    /// auto-cancel on terminal signals.
    ///
    /// Intended for stage authors performing nested subscriptions. A source
    /// that is not trusted to honor the single-terminal contract should be
    /// wrapped in the sequential guard before reaching this path.
    pub fn subscribe_unchecked(&self, receiver: impl Receiver<T> + Send + 'static) -> Cancellation {
        #[cfg(feature = "tracing")]
        tracing::debug!("subscribe (unchecked path)");

        let cancellation = Cancellation::new();
        self.attach(Subscriber::new(receiver, cancellation.clone()));
        cancellation
    }

    /// Hand an already-built subscriber to the producer. Used by `lift` to
    /// wire a stage's upstream subscriber to the source.
    pub fn attach(&self, subscriber: Subscriber<T>) {
        (self.producer)(subscriber);
    }

    /// Whole-sequence extension point: apply an operator transform at
    /// assembly time. The transform introduces no failure modes of its own;
    /// error behavior is whatever the composed stages dictate.
    pub fn compose<R>(&self, transform: impl FnOnce(Sequence<T>) -> Sequence<R>) -> Sequence<R> {
        transform(self.clone())
    }

    /// Receiver-level extension point. `stage` builds the upstream
    /// subscriber out of the downstream one; the signature is inverted
    /// relative to data flow because subscription requests propagate from
    /// the consumer toward the source.
    pub fn lift<R: Send + 'static>(
        &self,
        stage: impl Fn(Subscriber<R>) -> Subscriber<T> + Send + Sync + 'static,
    ) -> Sequence<R> {
        let source = self.clone();
        Sequence::new(move |downstream| {
            let upstream = stage(downstream);
            source.attach(upstream);
        })
    }
}

impl Sequence<i64> {
    /// Integers `start .. start + count`, then completion.
    pub fn range(start: i64, count: usize) -> Self {
        Sequence::from_iter(start..start + count as i64)
    }
}

/// Safe-path wrapper: forward, then cancel on the first terminal signal.
struct AutoCancel<R> {
    inner: R,
    cancellation: Cancellation,
}

impl<T, R: Receiver<T>> Receiver<T> for AutoCancel<R> {
    fn on_next(&mut self, item: T) {
        self.inner.on_next(item);
    }

    fn on_error(&mut self, err: Error) {
        self.inner.on_error(err);
        #[cfg(feature = "tracing")]
        tracing::debug!("terminal signal (error); auto-cancelling subscription");
        self.cancellation.cancel();
    }

    fn on_completed(&mut self) {
        self.inner.on_completed();
        #[cfg(feature = "tracing")]
        tracing::debug!("terminal signal (completed); auto-cancelling subscription");
        self.cancellation.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct Sink {
        values: Arc<Mutex<Vec<i64>>>,
        completions: Arc<Mutex<usize>>,
    }

    impl Receiver<i64> for Sink {
        fn on_next(&mut self, item: i64) {
            self.values.lock().unwrap().push(item);
        }
        fn on_error(&mut self, _err: Error) {}
        fn on_completed(&mut self) {
            *self.completions.lock().unwrap() += 1;
        }
    }

    #[test]
    fn range_emits_and_completes_once() {
        let sink = Sink::default();
        Sequence::range(0, 4).subscribe(sink.clone());
        assert_eq!(*sink.values.lock().unwrap(), vec![0, 1, 2, 3]);
        assert_eq!(*sink.completions.lock().unwrap(), 1);
    }

    #[test]
    fn empty_completes_without_items() {
        let sink = Sink::default();
        Sequence::empty().subscribe(sink.clone());
        assert!(sink.values.lock().unwrap().is_empty());
        assert_eq!(*sink.completions.lock().unwrap(), 1);
    }

    #[test]
    fn safe_path_drops_events_after_first_terminal() {
        let noisy = Sequence::new(|mut sub| {
            sub.on_next(1);
            sub.on_completed();
            sub.on_next(2);
            sub.on_completed();
        });
        let sink = Sink::default();
        noisy.subscribe(sink.clone());
        assert_eq!(*sink.values.lock().unwrap(), vec![1]);
        assert_eq!(*sink.completions.lock().unwrap(), 1);
    }

    #[test]
    fn each_subscription_gets_a_fresh_run() {
        let seq = Sequence::range(10, 2);
        let a = Sink::default();
        let b = Sink::default();
        seq.subscribe(a.clone());
        seq.subscribe(b.clone());
        assert_eq!(*a.values.lock().unwrap(), vec![10, 11]);
        assert_eq!(*b.values.lock().unwrap(), vec![10, 11]);
    }
}
