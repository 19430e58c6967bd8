//! Connected components as a clustering primitive.
//!
//! Every edge joins its endpoints, so the groups are exactly the connected
//! components (single linkage at the threshold used to build the graph).
//! Deterministic and never overlapping.

use super::traits::GraphClustering;
use crate::error::{Error, Result};
use petgraph::graph::UnGraph;
use petgraph::unionfind::UnionFind;
use petgraph::visit::EdgeRef;
use std::collections::HashMap;

/// Connected-component clustering.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConnectedComponents;

impl ConnectedComponents {
    /// Create the primitive.
    pub fn new() -> Self {
        Self
    }
}

impl GraphClustering for ConnectedComponents {
    fn cluster<N>(&self, graph: &UnGraph<N, f64>) -> Result<Vec<Vec<usize>>> {
        if graph.node_count() == 0 {
            return Err(Error::EmptyInput);
        }
        Ok(components(graph))
    }

    fn name(&self) -> &'static str {
        "components"
    }
}

/// Connected components of `graph`, ordered by their lowest node index,
/// members ascending.
pub(crate) fn components<N, E>(graph: &UnGraph<N, E>) -> Vec<Vec<usize>> {
    let n = graph.node_count();
    let mut uf = UnionFind::<usize>::new(n);
    for edge in graph.edge_references() {
        let _ = uf.union(edge.source().index(), edge.target().index());
    }

    let mut groups: Vec<Vec<usize>> = Vec::new();
    let mut slot_of_root: HashMap<usize, usize> = HashMap::new();
    for node in 0..n {
        let root = uf.find(node);
        let slot = *slot_of_root.entry(root).or_insert_with(|| {
            groups.push(Vec::new());
            groups.len() - 1
        });
        groups[slot].push(node);
    }
    groups
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_components_basic() {
        let mut graph = UnGraph::<(), f64>::new_undirected();
        let nodes: Vec<_> = (0..5).map(|_| graph.add_node(())).collect();
        let _ = graph.add_edge(nodes[0], nodes[3], 0.2);
        let _ = graph.add_edge(nodes[3], nodes[4], 0.1);

        let groups = ConnectedComponents::new().cluster(&graph).unwrap();
        assert_eq!(groups, vec![vec![0, 3, 4], vec![1], vec![2]]);
    }

    #[test]
    fn test_components_empty_graph() {
        let graph = UnGraph::<(), f64>::new_undirected();
        assert!(ConnectedComponents::new().cluster(&graph).is_err());
    }
}
