//! Markov clustering (MCL).
//!
//! Simulates random-walk flow on the graph and sharpens it until the walk
//! settles into "attractor" nodes. Each attractor collects the nodes whose
//! flow ends up on it.
//!
//! ## The Algorithm (van Dongen 2000)
//!
//! 1. Build the adjacency matrix, add self-loops, normalize columns so each
//!    column is a transition distribution.
//! 2. **Expansion**: raise the matrix to the power `e`. Flow spreads along
//!    longer paths.
//! 3. **Inflation**: raise every entry to the power `r` and renormalize.
//!    Strong transitions get stronger, weak ones fade.
//! 4. Prune near-zero entries and repeat until the matrix stops changing.
//!
//! Rows with a positive diagonal at convergence are attractors; the non-zero
//! columns of an attractor row form one group. A node can receive flow from
//! two attractors, so groups may overlap.
//!
//! ```text
//!   0 --- 1       3 --- 4
//!    \   /         \   /
//!      2             5
//!
//!   groups: {0, 1, 2}, {3, 4, 5}
//! ```
//!
//! The matrix is block diagonal over connected components and MCL never moves
//! flow between blocks, so each component is clustered on its own.
//!
//! ## References
//!
//! van Dongen (2000). "Graph Clustering by Flow Simulation." PhD thesis,
//! University of Utrecht.

use super::components::components;
use super::traits::GraphClustering;
use crate::error::{Error, Result};
use ndarray::{Array2, Axis};
use petgraph::graph::{NodeIndex, UnGraph};
use petgraph::visit::EdgeRef;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Weight given to edges whose weight is zero or negative, so they still
/// carry flow.
const MIN_EDGE_WEIGHT: f64 = 1e-12;

/// Entries at or below this are treated as zero when reading clusters.
const ATTRACTOR_EPSILON: f64 = 1e-6;

/// Markov clustering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Mcl {
    /// Matrix power applied in the expansion step.
    expansion: u32,
    /// Hadamard power applied in the inflation step.
    inflation: f64,
    /// Maximum expansion/inflation rounds.
    loop_limit: usize,
    /// Entries below this are zeroed after inflation.
    prune_threshold: f64,
    /// Largest per-entry change that counts as converged.
    tolerance: f64,
}

impl Mcl {
    /// Create an MCL clusterer with the usual defaults (`e = 2`, `r = 2`).
    pub fn new() -> Self {
        Self {
            expansion: 2,
            inflation: 2.0,
            loop_limit: 100,
            prune_threshold: 1e-5,
            tolerance: 1e-9,
        }
    }

    /// Set the expansion power.
    pub fn with_expansion(mut self, expansion: u32) -> Self {
        self.expansion = expansion;
        self
    }

    /// Set the inflation power.
    ///
    /// Higher values produce smaller groups.
    pub fn with_inflation(mut self, inflation: f64) -> Self {
        self.inflation = inflation;
        self
    }

    /// Set the maximum number of rounds.
    pub fn with_loop_limit(mut self, loop_limit: usize) -> Self {
        self.loop_limit = loop_limit;
        self
    }

    /// Set the pruning threshold.
    pub fn with_prune_threshold(mut self, prune_threshold: f64) -> Self {
        self.prune_threshold = prune_threshold;
        self
    }

    /// Check parameter ranges.
    pub fn validate(&self) -> Result<()> {
        if self.expansion < 2 {
            return Err(Error::InvalidParameter {
                name: "expansion",
                message: "must be at least 2",
            });
        }
        if !self.inflation.is_finite() || self.inflation <= 1.0 {
            return Err(Error::InvalidParameter {
                name: "inflation",
                message: "must be a finite value greater than 1",
            });
        }
        if self.loop_limit == 0 {
            return Err(Error::InvalidParameter {
                name: "loop_limit",
                message: "must be positive",
            });
        }
        if !(0.0..1.0).contains(&self.prune_threshold) {
            return Err(Error::InvalidParameter {
                name: "prune_threshold",
                message: "must lie in [0, 1)",
            });
        }
        Ok(())
    }

    /// Cluster one connected component (at least two nodes).
    fn cluster_component<N>(&self, graph: &UnGraph<N, f64>, members: &[usize]) -> Vec<Vec<usize>> {
        let k = members.len();
        let local: HashMap<usize, usize> =
            members.iter().enumerate().map(|(i, &m)| (m, i)).collect();

        let mut flow = Array2::<f64>::zeros((k, k));
        for (i, &node) in members.iter().enumerate() {
            for edge in graph.edges(NodeIndex::new(node)) {
                let (s, t) = (edge.source().index(), edge.target().index());
                let other = if s == node { t } else { s };
                if other == node {
                    continue;
                }
                if let Some(&j) = local.get(&other) {
                    flow[[i, j]] += (*edge.weight()).max(MIN_EDGE_WEIGHT);
                }
            }
        }

        // Self-loop at each node's heaviest incident edge keeps the walk
        // from oscillating on bipartite structure.
        for j in 0..k {
            let heaviest = flow.column(j).iter().copied().fold(0.0, f64::max);
            flow[[j, j]] = heaviest.max(MIN_EDGE_WEIGHT);
        }
        normalize_columns(&mut flow);

        let mut converged = false;
        let mut rounds = 0;
        while rounds < self.loop_limit {
            rounds += 1;
            let next = self.step(&flow);
            let delta = next
                .iter()
                .zip(flow.iter())
                .map(|(a, b)| (a - b).abs())
                .fold(0.0, f64::max);
            flow = next;
            if delta < self.tolerance {
                converged = true;
                break;
            }
        }
        if !converged {
            tracing::debug!(nodes = k, rounds, "mcl hit its loop limit before converging");
        }

        let mut groups: Vec<Vec<usize>> = Vec::new();
        for i in 0..k {
            if flow[[i, i]] <= ATTRACTOR_EPSILON {
                continue;
            }
            let group: Vec<usize> = (0..k)
                .filter(|&j| flow[[i, j]] > ATTRACTOR_EPSILON)
                .map(|j| members[j])
                .collect();
            if !groups.contains(&group) {
                groups.push(group);
            }
        }

        // Flow still in transit on a non-attractor row (possible when the
        // loop limit cut the run short): such nodes stand alone.
        let mut covered = vec![false; k];
        for group in &groups {
            for member in group {
                covered[local[member]] = true;
            }
        }
        for (j, _) in covered.iter().enumerate().filter(|(_, c)| !**c) {
            groups.push(vec![members[j]]);
        }

        groups
    }

    /// One expansion + inflation round.
    fn step(&self, flow: &Array2<f64>) -> Array2<f64> {
        let mut next = flow.clone();
        for _ in 1..self.expansion {
            next = next.dot(flow);
        }

        let inflation = self.inflation;
        next.mapv_inplace(|v| v.powf(inflation));
        normalize_columns(&mut next);

        let prune = self.prune_threshold;
        next.mapv_inplace(|v| if v < prune { 0.0 } else { v });
        normalize_columns(&mut next);
        next
    }
}

impl Default for Mcl {
    fn default() -> Self {
        Self::new()
    }
}

impl GraphClustering for Mcl {
    fn cluster<N>(&self, graph: &UnGraph<N, f64>) -> Result<Vec<Vec<usize>>> {
        self.validate()?;
        if graph.node_count() == 0 {
            return Err(Error::EmptyInput);
        }

        let mut groups = Vec::new();
        for component in components(graph) {
            if component.len() == 1 {
                groups.push(component);
            } else {
                groups.extend(self.cluster_component(graph, &component));
            }
        }
        Ok(groups)
    }

    fn name(&self) -> &'static str {
        "mcl"
    }
}

/// Scale each column to sum to one. All-zero columns are left alone.
fn normalize_columns(m: &mut Array2<f64>) {
    for mut column in m.axis_iter_mut(Axis(1)) {
        let sum: f64 = column.sum();
        if sum > 0.0 {
            column.mapv_inplace(|v| v / sum);
        }
    }
}
