//! Map stage, hand-written against the receiver contract.
//!
//! This is the canonical lift example: given the downstream subscriber,
//! build the upstream one. The stage must check downstream cancellation
//! before every forwarded call, never emit more than one terminal signal,
//! and never emit `on_next` after a terminal signal.

use ripple_core::error::{Error, Result};
use ripple_core::receiver::{Receiver, Subscriber};
use ripple_core::sequence::Sequence;

struct MapReceiver<R, F> {
    downstream: Subscriber<R>,
    transform: F,
}

impl<T, R, F> Receiver<T> for MapReceiver<R, F>
where
    F: FnMut(T) -> R,
{
    fn on_next(&mut self, item: T) {
        if self.downstream.is_cancelled() {
            return;
        }
        let mapped = (self.transform)(item);
        self.downstream.on_next(mapped);
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

/// Transform every item with `transform`, forwarding terminals unchanged.
pub fn map<T, R, F>(source: &Sequence<T>, transform: F) -> Sequence<R>
where
    T: Send + 'static,
    R: Send + 'static,
    F: Fn(T) -> R + Clone + Send + Sync + 'static,
{
    source.lift(move |downstream| {
        let token = downstream.cancellation().clone();
        Subscriber::new(
            MapReceiver {
                downstream,
                transform: transform.clone(),
            },
            token,
        )
    })
}

struct TryMapReceiver<R, F> {
    downstream: Subscriber<R>,
    transform: F,
    errored: bool,
}

impl<T, R, F> Receiver<T> for TryMapReceiver<R, F>
where
    F: FnMut(T) -> Result<R>,
{
    fn on_next(&mut self, item: T) {
        if self.errored || self.downstream.is_cancelled() {
            return;
        }
        match (self.transform)(item) {
            Ok(mapped) => self.downstream.on_next(mapped),
            Err(err) => {
                // Surface the failure downstream as the terminal signal and
                // stop forwarding; it is never thrown back into the source.
                self.errored = true;
                self.downstream.on_error(err);
            }
        }
    }

    fn on_error(&mut self, err: Error) {
        if self.errored || self.downstream.is_cancelled() {
            return;
        }
        self.downstream.on_error(err);
    }

    fn on_completed(&mut self) {
        if self.errored || self.downstream.is_cancelled() {
            return;
        }
        self.downstream.on_completed();
    }
}

/// Fallible map: an `Err` from `transform` terminates the downstream
/// sequence with `on_error` and suppresses everything after it.
pub fn try_map<T, R, F>(source: &Sequence<T>, transform: F) -> Sequence<R>
where
    T: Send + 'static,
    R: Send + 'static,
    F: Fn(T) -> Result<R> + Clone + Send + Sync + 'static,
{
    source.lift(move |downstream| {
        let token = downstream.cancellation().clone();
        Subscriber::new(
            TryMapReceiver {
                downstream,
                transform: transform.clone(),
                errored: false,
            },
            token,
        )
    })
}
