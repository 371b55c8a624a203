//! Hand-written stages (lift-style authoring): map, try_map, filter, scan.


use collect::{Collector, Event};
use ripple_core::error::Error;
use ripple_core::sequence::Sequence;
use ripple_operators::SequenceExt;

#[test]
fn test_map_appends_in_order_with_one_completion() {
    let collector = Collector::new();
    Sequence::range(0, 5)
        .map(|i| format!("{i}!"))
        .subscribe(collector.clone());

    assert_eq!(collector.values(), vec!["0!", "1!", "2!", "3!", "4!"]);
    assert_eq!(collector.completions(), 1);
    // Completion is the final event.
    assert_eq!(collector.events().last(), Some(&Event::Completed));
}

#[test]
fn test_map_forwards_source_errors_unchanged() {
    let collector = Collector::new();
    Sequence::<i64>::fail(Error::Source("boom".into()))
        .map(|i| i * 2)
        .subscribe(collector.clone());

    assert!(collector.values().is_empty());
    assert_eq!(collector.errors(), vec!["Source error: boom"]);
    assert_eq!(collector.completions(), 0);
}

#[test]
fn test_try_map_surfaces_transform_failure_as_on_error() {
    let collector = Collector::new();
    Sequence::range(0, 5)
        .try_map(|i| {
            if i == 2 {
                Err(Error::Transform("cannot handle 2".into()))
            } else {
                Ok(i * 10)
            }
        })
        .subscribe(collector.clone());

    assert_eq!(
        collector.events(),
        vec![
            Event::Next(0),
            Event::Next(10),
            Event::Error("Transform error: cannot handle 2".into()),
        ]
    );
}

#[test]
fn test_filter_scan_chain() {
    let collector = Collector::new();
    Sequence::range(1, 6)
        .filter(|i| i % 2 == 1)
        .scan(0i64, |acc, i| acc + i)
        .subscribe(collector.clone());

    // Seed first, then one state per surviving item (1, 3, 5).
    assert_eq!(collector.values(), vec![0, 1, 4, 9]);
    assert_eq!(collector.completions(), 1);
}

#[test]
fn test_stages_can_be_reused_across_subscriptions() {
    let shouted = Sequence::range(0, 2).map(|i| format!("{i}!"));
    let a = Collector::new();
    let b = Collector::new();
    shouted.subscribe(a.clone());
    shouted.subscribe(b.clone());
    assert_eq!(a.values(), b.values());
    assert_eq!(a.completions(), 1);
    assert_eq!(b.completions(), 1);
}
