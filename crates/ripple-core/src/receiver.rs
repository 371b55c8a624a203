//! Receiver-side event model: the `Receiver` trait, cancellation tokens,
//! and the `Subscriber` wrapper every stage hands upstream.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::error::Error;

/// The capability set a sequence pushes into.
///
/// Contract: zero or more `on_next` calls, then at most one terminal call
/// (`on_error` or `on_completed`), then nothing. Well-behaved sources uphold
/// this themselves; the sequential guard in `ripple-operators` enforces it
/// against sources that do not.
pub trait Receiver<T> {
    fn on_next(&mut self, item: T);
    fn on_error(&mut self, err: Error);
    fn on_completed(&mut self);
}

/// Cloneable cancellation token, one per subscription.
///
/// Every component checks the token before forwarding and stops forwarding
/// (not necessarily computing) once it is set.
#[derive(Clone, Debug, Default)]
pub struct Cancellation {
    flag: Arc<AtomicBool>,
}

impl Cancellation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation. Idempotent.
    pub fn cancel(&self) {
        self.flag.store(true, Ordering::Release);
    }

    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::Acquire)
    }
}

/// A boxed receiver plus the cancellation token of its subscription.
///
/// The `Receiver` impl checks the token before delegating, so events stop
/// flowing the moment the subscription is cancelled. It does *no* terminal
/// bookkeeping; a source emitting past its first terminal signal is the
/// sequential guard's concern.
pub struct Subscriber<T> {
    receiver: Box<dyn Receiver<T> + Send>,
    cancellation: Cancellation,
}

impl<T> Subscriber<T> {
    pub fn new(receiver: impl Receiver<T> + Send + 'static, cancellation: Cancellation) -> Self {
        Self {
            receiver: Box::new(receiver),
            cancellation,
        }
    }

    /// The subscription's token. Stage transforms share it into the upstream
    /// subscriber so a cancel anywhere stops the whole chain.
    pub fn cancellation(&self) -> &Cancellation {
        &self.cancellation
    }

    pub fn cancel(&self) {
        self.cancellation.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancellation.is_cancelled()
    }
}

impl<T> Receiver<T> for Subscriber<T> {
    fn on_next(&mut self, item: T) {
        if self.cancellation.is_cancelled() {
            return;
        }
        self.receiver.on_next(item);
    }

    fn on_error(&mut self, err: Error) {
        if self.cancellation.is_cancelled() {
            return;
        }
        self.receiver.on_error(err);
    }

    fn on_completed(&mut self) {
        if self.cancellation.is_cancelled() {
            return;
        }
        self.receiver.on_completed();
    }
}
