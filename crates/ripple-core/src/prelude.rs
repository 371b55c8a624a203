//! Convenience re-exports for downstream crates.

pub use crate::config::PipelineConfig;
pub use crate::error::{Error, Result};
pub use crate::receiver::{Cancellation, Receiver, Subscriber};
pub use crate::schedule::{InlineScheduler, Scheduler, TrampolineScheduler};
pub use crate::sequence::Sequence;
