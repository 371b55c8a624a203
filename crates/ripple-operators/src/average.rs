//! Running-average operator, assembled purely from existing stages.
//!
//! This is the worked compose example: no subscription management, no new
//! failure modes, just filter → scan → filter → map packaged under one name.

use serde::{Deserialize, Serialize};

use ripple_core::sequence::Sequence;

use crate::filter::filter;
use crate::map::map;
use crate::scan::scan;

/// Accumulator for the running average. Replaced wholesale each step, never
/// mutated in place.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct AverageState {
    pub sum: f64,
    pub count: u64,
}

/// Whole-sequence transform: running arithmetic mean of every item strictly
/// below `threshold`. Items at or above the threshold are excluded before
/// accumulation. Pass `f64::MAX` for an effectively unbounded threshold.
///
/// Apply with `Sequence::compose`:
///
/// ```
/// use ripple_core::sequence::Sequence;
/// use ripple_operators::running_average;
///
/// let averages = Sequence::from_iter(vec![3.0, 5.0, 6.0, 4.0, 4.0])
///     .compose(running_average(5.0));
/// ```
pub fn running_average(threshold: f64) -> impl FnOnce(Sequence<f64>) -> Sequence<f64> {
    move |source| {
        let below = filter(&source, move |x| *x < threshold);
        let folded = scan(&below, AverageState::default(), |state, x| AverageState {
            sum: state.sum + x,
            count: state.count + 1,
        });
        // The seed state carries no observation; drop it so nothing is
        // emitted before the first item.
        let observed = filter(&folded, |state| state.count > 0);
        map(&observed, |state| state.sum / state.count as f64)
    }
}
