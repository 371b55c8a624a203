//! Cancellation: once the token is set, nothing further reaches downstream,
//! and well-behaved producers also stop iterating.


use collect::{Collector, Event};
use ripple_core::error::Error;
use ripple_core::receiver::{Cancellation, Receiver};
use ripple_core::sequence::Sequence;
use ripple_operators::SequenceExt;

/// Records items and cancels its own subscription after `limit` of them.
struct CancelAfter {
    inner: Collector<i64>,
    token: Cancellation,
    seen: usize,
    limit: usize,
}

impl Receiver<i64> for CancelAfter {
    fn on_next(&mut self, item: i64) {
        self.inner.on_next(item);
        self.seen += 1;
        if self.seen == self.limit {
            self.token.cancel();
        }
    }

    fn on_error(&mut self, err: Error) {
        self.inner.on_error(err);
    }

    fn on_completed(&mut self) {
        self.inner.on_completed();
    }
}

#[test]
fn test_cancel_mid_stream_stops_delivery_and_iteration() {
    let collector = Collector::new();
    let token = Cancellation::new();
    Sequence::range(0, 1_000).subscribe_with(
        CancelAfter {
            inner: collector.clone(),
            token: token.clone(),
            seen: 0,
            limit: 2,
        },
        token.clone(),
    );

    assert!(token.is_cancelled());
    assert_eq!(collector.values(), vec![0, 1]);
    // No terminal signal either; the subscription simply stopped.
    assert_eq!(collector.completions(), 0);
    assert!(collector.errors().is_empty());
}

#[test]
fn test_cancel_propagates_through_lifted_stages() {
    let collector = Collector::new();
    let token = Cancellation::new();
    Sequence::range(0, 1_000).map(|i| i * 2).subscribe_with(
        CancelAfter {
            inner: collector.clone(),
            token: token.clone(),
            seen: 0,
            limit: 3,
        },
        token.clone(),
    );

    // The map stage shares the downstream token, so upstream stopped too.
    assert_eq!(collector.values(), vec![0, 2, 4]);
    assert_eq!(collector.completions(), 0);
}

#[test]
fn test_pre_cancelled_subscription_delivers_nothing() {
    let collector = Collector::new();
    let token = Cancellation::new();
    token.cancel();
    Sequence::range(0, 10).subscribe_with(collector.clone(), token);
    assert!(collector.events().is_empty());
}

#[test]
fn test_returned_token_reports_terminal_auto_cancel() {
    let collector = Collector::new();
    let token = Sequence::range(0, 3).subscribe(collector.clone());
    // The safe path cancels on completion, so the token is already spent.
    assert!(token.is_cancelled());
    assert_eq!(collector.events().last(), Some(&Event::Completed));
}
