//! Graph clustering traits.

use crate::error::Result;
use petgraph::graph::UnGraph;

/// Trait for graph clustering primitives.
pub trait GraphClustering {
    /// Partition a weighted graph into groups of node indices.
    ///
    /// Groups may overlap. Every node appears in at least one group, and a
    /// node without edges comes back as its own singleton group.
    fn cluster<N>(&self, graph: &UnGraph<N, f64>) -> Result<Vec<Vec<usize>>>;

    /// Short name used in logs.
    fn name(&self) -> &'static str;
}
