//! Threshold graph construction and the call into a clustering primitive.

use crate::community::GraphClustering;
use crate::distance::DistanceIndex;
use crate::error::{Error, Result};
use petgraph::graph::{NodeIndex, UnGraph};
use serde::{Deserialize, Serialize};

/// How to turn a distance into an edge weight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EdgeWeight {
    /// w = distance
    #[default]
    Distance,
    /// w = 1 / (1 + distance)
    InverseDistance,
    /// w = 1.0 (unweighted)
    Uniform,
}

impl EdgeWeight {
    /// Weight for an edge of the given distance.
    #[inline]
    pub fn weight(self, distance: f64) -> f64 {
        match self {
            EdgeWeight::Distance => distance,
            EdgeWeight::InverseDistance => 1.0 / (1.0 + distance),
            EdgeWeight::Uniform => 1.0,
        }
    }
}

/// Builds the threshold graph for a subset and hands it to a primitive.
///
/// Stateless between calls; one invoker serves a whole run.
#[derive(Debug)]
pub struct ClusterInvoker<'a, C> {
    index: &'a DistanceIndex,
    algorithm: &'a C,
    edge_weight: EdgeWeight,
}

impl<'a, C: GraphClustering> ClusterInvoker<'a, C> {
    /// Create an invoker over `index` using `algorithm`.
    pub fn new(index: &'a DistanceIndex, algorithm: &'a C) -> Self {
        Self {
            index,
            algorithm,
            edge_weight: EdgeWeight::default(),
        }
    }

    /// Set the edge weighting.
    pub fn with_edge_weight(mut self, edge_weight: EdgeWeight) -> Self {
        self.edge_weight = edge_weight;
        self
    }

    /// Cluster `subset` at `threshold`, returning groups of entity positions.
    ///
    /// Groups may overlap. Every entity of `subset` is in at least one group;
    /// an entity the primitive left out comes back as a singleton.
    pub fn invoke(&self, subset: &[usize], threshold: f64) -> Result<Vec<Vec<usize>>> {
        if subset.is_empty() {
            return Err(Error::EmptyInput);
        }

        let graph = self.build(subset, threshold);
        let groups = self.algorithm.cluster(&graph)?;

        let mut covered = vec![false; subset.len()];
        let mut out: Vec<Vec<usize>> = Vec::with_capacity(groups.len());
        for group in groups {
            let members: Vec<usize> = group
                .into_iter()
                .filter_map(|node| {
                    let entity = subset.get(node).copied()?;
                    covered[node] = true;
                    Some(entity)
                })
                .collect();
            if !members.is_empty() {
                out.push(members);
            }
        }
        for (node, _) in covered.iter().enumerate().filter(|(_, c)| !**c) {
            out.push(vec![subset[node]]);
        }
        Ok(out)
    }

    /// Graph over `subset` with an edge for every pair strictly closer than
    /// `threshold`. Node `i` carries `subset[i]`.
    pub fn build(&self, subset: &[usize], threshold: f64) -> UnGraph<usize, f64> {
        let n = subset.len();
        let mut graph = UnGraph::<usize, f64>::with_capacity(n, 0);
        let nodes: Vec<NodeIndex> = subset.iter().map(|&e| graph.add_node(e)).collect();

        for i in 0..n {
            for j in (i + 1)..n {
                let d = self.index.distance_at(subset[i], subset[j]);
                if d < threshold {
                    let _ = graph.add_edge(nodes[i], nodes[j], self.edge_weight.weight(d));
                }
            }
        }
        graph
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::community::ConnectedComponents;
    use proptest::prelude::*;

    fn index() -> DistanceIndex {
        // a-b close, c-d close, everything else far
        let names = ["a", "b", "c", "d"].iter().map(|s| s.to_string()).collect();
        DistanceIndex::new(
            names,
            vec![
                vec![0.0, 0.1, 0.8, 0.9],
                vec![0.1, 0.0, 0.7, 0.8],
                vec![0.8, 0.7, 0.0, 0.2],
                vec![0.9, 0.8, 0.2, 0.0],
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_edges_are_strictly_below_threshold() {
        let index = index();
        let algo = ConnectedComponents::new();
        let invoker = ClusterInvoker::new(&index, &algo);

        let graph = invoker.build(&[0, 1, 2, 3], 0.2);
        assert_eq!(graph.edge_count(), 1);

        let groups = invoker.invoke(&[0, 1, 2, 3], 0.2).unwrap();
        assert_eq!(groups, vec![vec![0, 1], vec![2], vec![3]]);
    }

    #[test]
    fn test_groups_carry_entity_positions() {
        let index = index();
        let algo = ConnectedComponents::new();
        let invoker = ClusterInvoker::new(&index, &algo);

        let groups = invoker.invoke(&[3, 2, 0], 0.5).unwrap();
        assert_eq!(groups, vec![vec![3, 2], vec![0]]);
    }

    #[test]
    fn test_edge_weighting() {
        let index = index();
        let algo = ConnectedComponents::new();
        let invoker = ClusterInvoker::new(&index, &algo).with_edge_weight(EdgeWeight::InverseDistance);
        let graph = invoker.build(&[0, 1], 1.0);
        let w = graph.edge_weights().next().copied().unwrap();
        assert!((w - 1.0 / 1.1).abs() < 1e-12);

        assert_eq!(EdgeWeight::Distance.weight(0.3), 0.3);
        assert_eq!(EdgeWeight::Uniform.weight(0.3), 1.0);
    }

    #[test]
    fn test_uncovered_nodes_become_singletons() {
        struct DropsLast;
        impl GraphClustering for DropsLast {
            fn cluster<N>(&self, graph: &UnGraph<N, f64>) -> Result<Vec<Vec<usize>>> {
                Ok(vec![(0..graph.node_count() - 1).collect()])
            }
            fn name(&self) -> &'static str {
                "drops-last"
            }
        }

        let index = index();
        let invoker = ClusterInvoker::new(&index, &DropsLast);
        let groups = invoker.invoke(&[0, 1, 2], 0.5).unwrap();
        assert_eq!(groups, vec![vec![0, 1], vec![2]]);
    }

    proptest! {
        #[test]
        fn raising_the_threshold_never_adds_components(
            cells in proptest::collection::vec(0.0f64..1.0, 45),
            t1 in 0.0f64..1.0,
            t2 in 0.0f64..1.0,
        ) {
            // 10 entities, upper triangle from `cells`
            let n = 10;
            let mut rows = vec![vec![0.0; n]; n];
            let mut k = 0;
            for i in 0..n {
                for j in (i + 1)..n {
                    rows[i][j] = cells[k];
                    rows[j][i] = cells[k];
                    k += 1;
                }
            }
            let names = (0..n).map(|i| format!("e{i}")).collect();
            let index = DistanceIndex::new(names, rows).unwrap();
            let algo = ConnectedComponents::new();
            let invoker = ClusterInvoker::new(&index, &algo);
            let subset: Vec<usize> = (0..n).collect();

            let (lo, hi) = if t1 <= t2 { (t1, t2) } else { (t2, t1) };
            let loose = invoker.invoke(&subset, hi).unwrap();
            let tight = invoker.invoke(&subset, lo).unwrap();
            prop_assert!(loose.len() <= tight.len());
        }
    }
}
