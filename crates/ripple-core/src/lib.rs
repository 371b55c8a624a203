#![forbid(unsafe_code)]
//! ripple-core: the push-based event model (sequences, receivers,
//! cancellation), the two subscription paths, configuration, and the
//! scheduling seam.
//!
//! Design intent:
//! - Keep this crate synchronous; nothing here blocks, and nothing here
//!   spawns. Deferred work goes through the `Scheduler` seam.
//! - Operators live in `ripple-operators`; this crate only provides the two
//!   extension points (`compose` and `lift`) they are built on.

pub mod config;
pub mod error;
pub mod prelude;
pub mod receiver;
pub mod schedule;
pub mod sequence;

pub use config::PipelineConfig;
pub use error::{Error, Result};
pub use receiver::{Cancellation, Receiver, Subscriber};
pub use sequence::Sequence;
