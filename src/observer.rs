//! Progress hooks for the recursive controller.
//!
//! The controller is a pure computation; anything it wants to say about its
//! progress goes through a [`ClusterObserver`]. Every method has a no-op
//! default, so an observer implements only what it cares about.
//!
//! - [`TracingObserver`] (the default) forwards events to `tracing`.
//! - [`NoopObserver`] discards them.

use crate::cluster::Threshold;

/// Receives progress events from [`crate::RecursiveClusterer`].
///
/// `depth` is 0 for the full entity set and grows by one per recursion.
pub trait ClusterObserver {
    /// A subset of `size` entities is about to be clustered under `ceiling`.
    fn level_started(&self, _depth: usize, _size: usize, _ceiling: f64) {}

    /// One halving step of the bounding phase.
    fn bound_step(&self, _depth: usize, _threshold: Threshold, _ceiling: f64) {}

    /// The primitive was run at `threshold` and produced `clusters` groups.
    fn attempt(&self, _depth: usize, _size: usize, _threshold: Threshold, _clusters: usize) {}

    /// The tightening floor was reached without a split; the subset is kept
    /// as one irreducible group.
    fn non_convergent_split(&self, _depth: usize, _size: usize, _threshold: Threshold) {}

    /// `entity` was claimed by clusters `homes` and kept in `winner`.
    fn overlap_resolved(&self, _depth: usize, _entity: &str, _homes: &[usize], _winner: usize) {}

    /// A group of `size` entities exceeded the cap and is being subdivided.
    fn recursing(&self, _depth: usize, _size: usize, _threshold: Threshold) {}
}

impl<O: ClusterObserver + ?Sized> ClusterObserver for &O {
    fn level_started(&self, depth: usize, size: usize, ceiling: f64) {
        (**self).level_started(depth, size, ceiling)
    }

    fn bound_step(&self, depth: usize, threshold: Threshold, ceiling: f64) {
        (**self).bound_step(depth, threshold, ceiling)
    }

    fn attempt(&self, depth: usize, size: usize, threshold: Threshold, clusters: usize) {
        (**self).attempt(depth, size, threshold, clusters)
    }

    fn non_convergent_split(&self, depth: usize, size: usize, threshold: Threshold) {
        (**self).non_convergent_split(depth, size, threshold)
    }

    fn overlap_resolved(&self, depth: usize, entity: &str, homes: &[usize], winner: usize) {
        (**self).overlap_resolved(depth, entity, homes, winner)
    }

    fn recursing(&self, depth: usize, size: usize, threshold: Threshold) {
        (**self).recursing(depth, size, threshold)
    }
}

/// Discards every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl ClusterObserver for NoopObserver {}

/// Forwards events to `tracing` with structured fields.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl ClusterObserver for TracingObserver {
    fn level_started(&self, depth: usize, size: usize, ceiling: f64) {
        tracing::debug!(depth, size, ceiling, "clustering subset");
    }

    fn bound_step(&self, depth: usize, threshold: Threshold, ceiling: f64) {
        tracing::trace!(
            depth,
            level = threshold.level,
            distance = threshold.distance,
            ceiling,
            "bounding threshold"
        );
    }

    fn attempt(&self, depth: usize, size: usize, threshold: Threshold, clusters: usize) {
        tracing::debug!(
            depth,
            size,
            level = threshold.level,
            distance = threshold.distance,
            clusters,
            "clustering attempt"
        );
    }

    fn non_convergent_split(&self, depth: usize, size: usize, threshold: Threshold) {
        tracing::warn!(
            depth,
            size,
            level = threshold.level,
            distance = threshold.distance,
            "no split at the tightening floor, keeping an irreducible cluster"
        );
    }

    fn overlap_resolved(&self, depth: usize, entity: &str, homes: &[usize], winner: usize) {
        tracing::debug!(depth, entity, ?homes, winner, "entity claimed by several clusters");
    }

    fn recursing(&self, depth: usize, size: usize, threshold: Threshold) {
        tracing::info!(
            depth,
            size,
            distance = threshold.distance,
            "recursing into oversized cluster"
        );
    }
}

/// Events captured by [`RecordingObserver`].
#[cfg(test)]
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Event {
    LevelStarted { depth: usize, size: usize, ceiling: f64 },
    BoundStep { depth: usize, level: f64 },
    Attempt { depth: usize, level: f64, clusters: usize },
    NonConvergent { depth: usize, size: usize },
    Overlap { depth: usize, entity: String, homes: Vec<usize>, winner: usize },
    Recursing { depth: usize, size: usize },
}

/// Keeps every event for assertions.
#[cfg(test)]
#[derive(Debug, Default)]
pub(crate) struct RecordingObserver {
    pub(crate) events: std::cell::RefCell<Vec<Event>>,
}

#[cfg(test)]
impl RecordingObserver {
    pub(crate) fn events(&self) -> Vec<Event> {
        self.events.borrow().clone()
    }

    pub(crate) fn attempts(&self) -> Vec<f64> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                Event::Attempt { level, .. } => Some(level),
                _ => None,
            })
            .collect()
    }
}

#[cfg(test)]
impl ClusterObserver for RecordingObserver {
    fn level_started(&self, depth: usize, size: usize, ceiling: f64) {
        self.events.borrow_mut().push(Event::LevelStarted {
            depth,
            size,
            ceiling,
        });
    }

    fn bound_step(&self, depth: usize, threshold: Threshold, _ceiling: f64) {
        self.events.borrow_mut().push(Event::BoundStep {
            depth,
            level: threshold.level,
        });
    }

    fn attempt(&self, depth: usize, _size: usize, threshold: Threshold, clusters: usize) {
        self.events.borrow_mut().push(Event::Attempt {
            depth,
            level: threshold.level,
            clusters,
        });
    }

    fn non_convergent_split(&self, depth: usize, size: usize, _threshold: Threshold) {
        self.events.borrow_mut().push(Event::NonConvergent { depth, size });
    }

    fn overlap_resolved(&self, depth: usize, entity: &str, homes: &[usize], winner: usize) {
        self.events.borrow_mut().push(Event::Overlap {
            depth,
            entity: entity.to_string(),
            homes: homes.to_vec(),
            winner,
        });
    }

    fn recursing(&self, depth: usize, size: usize, _threshold: Threshold) {
        self.events.borrow_mut().push(Event::Recursing { depth, size });
    }
}
