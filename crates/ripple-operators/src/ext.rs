//! Fluent operator surface over `Sequence`. Thin wrappers around the free
//! functions in this crate, which in turn wrap `lift`/`compose`.

use std::sync::Arc;

use ripple_core::config::PipelineConfig;
use ripple_core::error::Result;
use ripple_core::schedule::Scheduler;
use ripple_core::sequence::Sequence;

/// Operators specific to numeric sequences.
pub trait AverageExt {
    /// Running arithmetic mean of every item strictly below `threshold`;
    /// fluent form of [`crate::average::running_average`].
    fn running_average(&self, threshold: f64) -> Sequence<f64>;
}

impl AverageExt for Sequence<f64> {
    fn running_average(&self, threshold: f64) -> Sequence<f64> {
        self.compose(crate::average::running_average(threshold))
    }
}

pub trait SequenceExt<T: Send + 'static> {
    fn map<R, F>(&self, transform: F) -> Sequence<R>
    where
        R: Send + 'static,
        F: Fn(T) -> R + Clone + Send + Sync + 'static;

    fn try_map<R, F>(&self, transform: F) -> Sequence<R>
    where
        R: Send + 'static,
        F: Fn(T) -> Result<R> + Clone + Send + Sync + 'static;

    fn filter<F>(&self, predicate: F) -> Sequence<T>
    where
        F: Fn(&T) -> bool + Clone + Send + Sync + 'static;

    fn scan<S, F>(&self, seed: S, step: F) -> Sequence<S>
    where
        S: Clone + Send + Sync + 'static,
        F: Fn(&S, &T) -> S + Clone + Send + Sync + 'static;

    fn deliver_via(&self, scheduler: Arc<dyn Scheduler>) -> Sequence<T>;

    /// Wrap the sequence in the sequential guard with default config.
    fn serialize(&self) -> Sequence<T>;

    fn serialize_with(&self, config: &PipelineConfig) -> Sequence<T>;
}

impl<T: Send + 'static> SequenceExt<T> for Sequence<T> {
    fn map<R, F>(&self, transform: F) -> Sequence<R>
    where
        R: Send + 'static,
        F: Fn(T) -> R + Clone + Send + Sync + 'static,
    {
        crate::map::map(self, transform)
    }

    fn try_map<R, F>(&self, transform: F) -> Sequence<R>
    where
        R: Send + 'static,
        F: Fn(T) -> Result<R> + Clone + Send + Sync + 'static,
    {
        crate::map::try_map(self, transform)
    }

    fn filter<F>(&self, predicate: F) -> Sequence<T>
    where
        F: Fn(&T) -> bool + Clone + Send + Sync + 'static,
    {
        crate::filter::filter(self, predicate)
    }

    fn scan<S, F>(&self, seed: S, step: F) -> Sequence<S>
    where
        S: Clone + Send + Sync + 'static,
        F: Fn(&S, &T) -> S + Clone + Send + Sync + 'static,
    {
        crate::scan::scan(self, seed, step)
    }

    fn deliver_via(&self, scheduler: Arc<dyn Scheduler>) -> Sequence<T> {
        crate::deliver::deliver_via(self, scheduler)
    }

    fn serialize(&self) -> Sequence<T> {
        crate::serialize::serialize(self, &PipelineConfig::default())
    }

    fn serialize_with(&self, config: &PipelineConfig) -> Sequence<T> {
        crate::serialize::serialize(self, config)
    }
}
