#![forbid(unsafe_code)]
//! ripple-operators: stage transforms (map/filter/scan), the composed
//! running-average operator, and the sequential guard.
//!
//! Two ways to author an operator:
//! - compose existing stages into a whole-sequence transform and apply it
//!   with `Sequence::compose` (see [`average`]);
//! - hand-write a receiver-to-receiver stage and `lift` it into the chain
//!   (see [`map`] for the canonical worked example).

pub mod average;
pub mod deliver;
pub mod ext;
pub mod filter;
pub mod map;
pub mod scan;
pub mod serialize;

pub use average::{running_average, AverageState};
pub use ext::{AverageExt, SequenceExt};
pub use serialize::SequentialGuard;
