//! Quantile-driven threshold search.
//!
//! Finds a distance threshold at which the clustering primitive splits a
//! subset into more than one group, without ever clustering more loosely than
//! a ceiling handed down by the controller.
//!
//! ## Two Phases
//!
//! 1. **Bounding**: starting from `start_level`, halve the quantile level
//!    until the subset's quantile value at that level is at or below the
//!    ceiling (or the level reaches the floor). Then double it once, so the
//!    tightening phase's first halving lands on the level that passed.
//! 2. **Tightening**: halve the level, cluster at the matching distance, and
//!    repeat until the partition has more than one group or the level is at
//!    or below `floor_level`.
//!
//! ```text
//! start 0.8 ──bound──▶ 0.4 ok ──x2──▶ 0.8
//!            ──tighten──▶ 0.4 → 0.2 → 0.1 → 0.05 → 0.025 (floor)
//! ```

use crate::error::{Error, Result};
use crate::observer::ClusterObserver;
use crate::stats::Quantiles;
use serde::Serialize;

/// A quantile level and the distance it maps to for a given subset.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Threshold {
    /// Quantile level in (0, 1).
    pub level: f64,
    /// Distance at that level.
    pub distance: f64,
}

/// Result of a search: the last threshold tried and its partition.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchOutcome {
    /// Threshold the partition was produced at.
    pub threshold: Threshold,
    /// Groups from the last clustering attempt (may overlap).
    pub clusters: Vec<Vec<usize>>,
    /// Number of clustering attempts made.
    pub attempts: usize,
}

impl SearchOutcome {
    /// Whether the subset was split into more than one group.
    pub fn is_split(&self) -> bool {
        self.clusters.len() > 1
    }
}

/// Halving search over quantile levels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThresholdSearch {
    start_level: f64,
    floor_level: f64,
}

impl ThresholdSearch {
    /// Create a search starting at 0.8 with a floor of 0.025.
    pub fn new() -> Self {
        Self {
            start_level: 0.8,
            floor_level: 0.025,
        }
    }

    /// Set the bounding phase starting level.
    pub fn with_start_level(mut self, level: f64) -> Self {
        self.start_level = level;
        self
    }

    /// Set the tightening floor.
    pub fn with_floor_level(mut self, level: f64) -> Self {
        self.floor_level = level;
        self
    }

    /// Check that `0 < floor < start <= 1`.
    pub fn validate(&self) -> Result<()> {
        if !(self.start_level > 0.0 && self.start_level <= 1.0) {
            return Err(Error::InvalidParameter {
                name: "start_level",
                message: "must lie in (0, 1]",
            });
        }
        if !(self.floor_level > 0.0 && self.floor_level < self.start_level) {
            return Err(Error::InvalidParameter {
                name: "floor_level",
                message: "must lie in (0, start_level)",
            });
        }
        Ok(())
    }

    /// Bounding phase. Returns the level the tightening phase starts from.
    pub fn bound(
        &self,
        quantiles: &Quantiles,
        ceiling: f64,
        depth: usize,
        observer: &dyn ClusterObserver,
    ) -> Result<f64> {
        let mut level = self.start_level;
        loop {
            level *= 0.5;
            let distance = quantiles.quantile(level)?;
            observer.bound_step(depth, Threshold { level, distance }, ceiling);
            if distance <= ceiling || level <= self.floor_level {
                break;
            }
        }
        Ok(level * 2.0)
    }

    /// Run both phases, calling `cluster_at` once per tightening step.
    ///
    /// Every call is reported to `observer` as an attempt on a subset of
    /// `size` entities.
    pub fn search<F>(
        &self,
        quantiles: &Quantiles,
        ceiling: f64,
        depth: usize,
        size: usize,
        observer: &dyn ClusterObserver,
        mut cluster_at: F,
    ) -> Result<SearchOutcome>
    where
        F: FnMut(Threshold) -> Result<Vec<Vec<usize>>>,
    {
        let mut level = self.bound(quantiles, ceiling, depth, observer)?;
        let mut attempts = 0;
        loop {
            level *= 0.5;
            let threshold = Threshold {
                level,
                distance: quantiles.quantile(level)?,
            };
            let clusters = cluster_at(threshold)?;
            observer.attempt(depth, size, threshold, clusters.len());
            attempts += 1;
            if clusters.len() > 1 || level <= self.floor_level {
                return Ok(SearchOutcome {
                    threshold,
                    clusters,
                    attempts,
                });
            }
        }
    }
}

impl Default for ThresholdSearch {
    fn default() -> Self {
        Self::new()
    }
}
