//! Recursive clustering controller.
//!
//! One level of the controller:
//!
//! 1. Compute the ceiling for the subset.
//! 2. Search for a threshold that splits the subset (see [`ThresholdSearch`]).
//! 3. If nothing split, keep the subset as one irreducible group.
//! 4. Resolve overlapping memberships.
//! 5. Recurse into every resolved group above the size cap, replacing it in
//!    place with its own subdivision.
//!
//! Each recursion works on a strict subset of its parent, and a depth guard
//! turns pathological inputs into [`Error::StuckRecursion`] instead of
//! unbounded work.

use super::config::{CeilingMode, ClusterConfig};
use super::dedup::resolve_memberships;
use super::invoker::ClusterInvoker;
use super::threshold::ThresholdSearch;
use crate::community::GraphClustering;
use crate::distance::DistanceIndex;
use crate::error::{Error, Result};
use crate::hierarchy::{ClusterHierarchy, HierarchyNode};
use crate::observer::{ClusterObserver, TracingObserver};
use crate::stats::Quantiles;

/// Partitions entities into a hierarchy of small similarity groups.
///
/// ```rust
/// use glyphtier::{ConnectedComponents, DistanceIndex, RecursiveClusterer};
///
/// let names = ["a", "b", "c", "d"].map(String::from).to_vec();
/// let index = DistanceIndex::new(names, vec![
///     vec![0.0, 0.1, 0.9, 0.9],
///     vec![0.1, 0.0, 0.9, 0.9],
///     vec![0.9, 0.9, 0.0, 0.1],
///     vec![0.9, 0.9, 0.1, 0.0],
/// ]).unwrap();
///
/// let hierarchy = RecursiveClusterer::new(ConnectedComponents::new())
///     .cluster(&index)
///     .unwrap();
/// assert_eq!(hierarchy.leaf_count(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct RecursiveClusterer<C, O = TracingObserver> {
    algorithm: C,
    config: ClusterConfig,
    observer: O,
}

impl<C: GraphClustering> RecursiveClusterer<C> {
    /// Create a controller with default configuration that reports through
    /// `tracing`.
    pub fn new(algorithm: C) -> Self {
        Self {
            algorithm,
            config: ClusterConfig::default(),
            observer: TracingObserver,
        }
    }
}

impl<C: GraphClustering, O: ClusterObserver> RecursiveClusterer<C, O> {
    /// Replace the configuration.
    pub fn with_config(mut self, config: ClusterConfig) -> Self {
        self.config = config;
        self
    }

    /// Replace the observer.
    pub fn with_observer<P: ClusterObserver>(self, observer: P) -> RecursiveClusterer<C, P> {
        RecursiveClusterer {
            algorithm: self.algorithm,
            config: self.config,
            observer,
        }
    }

    /// Current configuration.
    pub fn config(&self) -> &ClusterConfig {
        &self.config
    }

    /// The clustering primitive.
    pub fn algorithm(&self) -> &C {
        &self.algorithm
    }

    /// Cluster every entity in `index`, in index order.
    pub fn cluster(&self, index: &DistanceIndex) -> Result<ClusterHierarchy<String>> {
        let all: Vec<usize> = (0..index.len()).collect();
        self.named(index, &all)
    }

    /// Cluster the named entities, in the given order.
    ///
    /// Fails with [`Error::UnknownEntity`] for a name not in `index`.
    pub fn cluster_names<S: AsRef<str>>(
        &self,
        index: &DistanceIndex,
        names: &[S],
    ) -> Result<ClusterHierarchy<String>> {
        let subset = index.resolve(names)?;
        self.named(index, &subset)
    }

    /// Cluster entities by index position.
    pub fn cluster_positions(
        &self,
        index: &DistanceIndex,
        subset: &[usize],
    ) -> Result<ClusterHierarchy<usize>> {
        self.config.validate()?;
        if subset.is_empty() {
            return Err(Error::EmptyInput);
        }
        if let Some(&bad) = subset.iter().find(|&&p| p >= index.len()) {
            return Err(Error::UnknownEntity {
                name: format!("#{bad}"),
            });
        }

        let ctx = Level {
            index,
            invoker: ClusterInvoker::new(index, &self.algorithm)
                .with_edge_weight(self.config.edge_weight),
            search: self.config.search(),
            config: &self.config,
            observer: &self.observer,
        };
        let roots = ctx.cluster(subset, None, 0)?;
        Ok(ClusterHierarchy::new(roots))
    }

    fn named(&self, index: &DistanceIndex, subset: &[usize]) -> Result<ClusterHierarchy<String>> {
        let hierarchy = self.cluster_positions(index, subset)?;
        Ok(hierarchy.map(|p| index.name(p).to_string()))
    }
}

/// Everything one level needs, shared down the recursion.
struct Level<'a, C> {
    index: &'a DistanceIndex,
    invoker: ClusterInvoker<'a, C>,
    search: ThresholdSearch,
    config: &'a ClusterConfig,
    observer: &'a dyn ClusterObserver,
}

impl<C: GraphClustering> Level<'_, C> {
    fn cluster(
        &self,
        subset: &[usize],
        inherited: Option<f64>,
        depth: usize,
    ) -> Result<Vec<HierarchyNode<usize>>> {
        let size = subset.len();
        if depth > self.config.max_depth {
            return Err(Error::StuckRecursion { depth, size });
        }
        // No pairwise distances to search over.
        if size <= 1 {
            return Ok(vec![HierarchyNode::Leaf(subset.to_vec())]);
        }

        let quantiles = Quantiles::new(&self.index.pairwise(subset))?;
        let ceiling = match (self.config.ceiling, inherited) {
            (CeilingMode::Inherited, Some(parent)) => parent,
            _ => quantiles.quantile(self.config.ceiling_level)?,
        };
        self.observer.level_started(depth, size, ceiling);

        let outcome = self
            .search
            .search(&quantiles, ceiling, depth, size, self.observer, |threshold| {
                self.invoker.invoke(subset, threshold.distance)
            })?;
        let threshold = outcome.threshold;

        if !outcome.is_split() {
            self.observer.non_convergent_split(depth, size, threshold);
            let irreducible = outcome.clusters.into_iter().flatten().collect();
            return Ok(vec![HierarchyNode::Leaf(irreducible)]);
        }

        let resolution = resolve_memberships(&outcome.clusters);
        for overlap in &resolution.overlaps {
            self.observer.overlap_resolved(
                depth,
                self.index.name(overlap.entity),
                &overlap.homes,
                overlap.winner,
            );
        }

        let mut nodes = Vec::with_capacity(resolution.clusters.len());
        for cluster in resolution.clusters {
            if cluster.is_empty() {
                continue;
            }
            if cluster.len() <= self.config.max_cluster_size {
                nodes.push(HierarchyNode::Leaf(cluster));
                continue;
            }
            if cluster.len() >= size {
                return Err(Error::StuckRecursion {
                    depth: depth + 1,
                    size: cluster.len(),
                });
            }
            self.observer.recursing(depth, cluster.len(), threshold);
            let children = self.cluster(&cluster, Some(threshold.distance), depth + 1)?;
            nodes.push(HierarchyNode::Branch(children));
        }
        Ok(nodes)
    }
}
