#![forbid(unsafe_code)]
//! ripple: umbrella crate re-exporting the event model and operators.

pub use ripple_core::config::PipelineConfig;
pub use ripple_core::error::{Error, Result};
pub use ripple_core::receiver::{Cancellation, Receiver, Subscriber};
pub use ripple_core::schedule::{InlineScheduler, Scheduler, TrampolineScheduler};
pub use ripple_core::sequence::Sequence;
pub use ripple_operators::{running_average, AverageExt, AverageState, SequenceExt, SequentialGuard};
