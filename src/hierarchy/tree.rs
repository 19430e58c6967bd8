//! Cluster hierarchy: the nested result of recursive clustering.

use super::node::HierarchyNode;
use core::fmt;
use serde::{Deserialize, Serialize};

/// A sequence of hierarchy nodes.
///
/// Every terminal group is a [`HierarchyNode::Leaf`]; a group that was too
/// large sits in its original position as a [`HierarchyNode::Branch`] holding
/// its subdivision. Serializes as nested arrays:
///
/// ```text
/// [["Futura", "Avenir"], [["Didot", "Bodoni"], ["Baskerville"]]]
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClusterHierarchy<T> {
    roots: Vec<HierarchyNode<T>>,
}

/// Summary statistics of a hierarchy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct HierarchyStats {
    /// Number of terminal groups.
    pub leaves: usize,
    /// Number of entities across all terminal groups.
    pub entities: usize,
    /// Deepest nesting (0 for a flat partition).
    pub depth: usize,
    /// Size of the largest terminal group.
    pub largest_leaf: usize,
    /// Terminal groups above the size cap (irreducible groups).
    pub oversized_leaves: usize,
}

impl<T> ClusterHierarchy<T> {
    /// Wrap top-level nodes.
    pub fn new(roots: Vec<HierarchyNode<T>>) -> Self {
        Self { roots }
    }

    /// Top-level nodes.
    pub fn roots(&self) -> &[HierarchyNode<T>] {
        &self.roots
    }

    /// Take the top-level nodes.
    pub fn into_roots(self) -> Vec<HierarchyNode<T>> {
        self.roots
    }

    /// Whether there are no nodes at all.
    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    /// Terminal groups, depth first, left to right.
    pub fn leaves(&self) -> Leaves<'_, T> {
        Leaves {
            stack: self.roots.iter().rev().collect(),
        }
    }

    /// Number of terminal groups.
    pub fn leaf_count(&self) -> usize {
        self.leaves().count()
    }

    /// Number of entities across all terminal groups.
    pub fn entity_count(&self) -> usize {
        self.roots.iter().map(HierarchyNode::entity_count).sum()
    }

    /// Deepest nesting (0 for a flat partition).
    pub fn depth(&self) -> usize {
        self.roots.iter().map(HierarchyNode::depth).max().unwrap_or(0)
    }

    /// Transform every entity, keeping the shape.
    pub fn map<U, F: FnMut(T) -> U>(self, mut f: F) -> ClusterHierarchy<U> {
        ClusterHierarchy {
            roots: self.roots.into_iter().map(|n| n.map(&mut f)).collect(),
        }
    }

    /// Compute summary statistics against a size cap.
    pub fn stats(&self, max_cluster_size: usize) -> HierarchyStats {
        let mut stats = HierarchyStats {
            depth: self.depth(),
            ..HierarchyStats::default()
        };
        for leaf in self.leaves() {
            stats.leaves += 1;
            stats.entities += leaf.len();
            stats.largest_leaf = stats.largest_leaf.max(leaf.len());
            if leaf.len() > max_cluster_size {
                stats.oversized_leaves += 1;
            }
        }
        stats
    }
}

impl<T: fmt::Display> fmt::Display for ClusterHierarchy<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn write_node<T: fmt::Display>(
            f: &mut fmt::Formatter<'_>,
            node: &HierarchyNode<T>,
            indent: usize,
        ) -> fmt::Result {
            match node {
                HierarchyNode::Leaf(members) => {
                    write!(f, "{:indent$}-", "", indent = indent * 2)?;
                    for (i, member) in members.iter().enumerate() {
                        let sep = if i == 0 { " " } else { ", " };
                        write!(f, "{sep}{member}")?;
                    }
                    writeln!(f)
                }
                HierarchyNode::Branch(children) => {
                    writeln!(f, "{:indent$}+", "", indent = indent * 2)?;
                    for child in children {
                        write_node(f, child, indent + 1)?;
                    }
                    Ok(())
                }
            }
        }

        for node in &self.roots {
            write_node(f, node, 0)?;
        }
        Ok(())
    }
}

/// Depth-first iterator over terminal groups.
#[derive(Debug)]
pub struct Leaves<'a, T> {
    stack: Vec<&'a HierarchyNode<T>>,
}

impl<'a, T> Iterator for Leaves<'a, T> {
    type Item = &'a [T];

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(node) = self.stack.pop() {
            match node {
                HierarchyNode::Leaf(members) => return Some(members.as_slice()),
                HierarchyNode::Branch(children) => self.stack.extend(children.iter().rev()),
            }
        }
        None
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn leaf(names: &[&str]) -> HierarchyNode<String> {
        HierarchyNode::Leaf(names.iter().map(|s| s.to_string()).collect())
    }

    fn sample() -> ClusterHierarchy<String> {
        ClusterHierarchy::new(vec![
            leaf(&["futura", "avenir"]),
            HierarchyNode::Branch(vec![leaf(&["didot", "bodoni"]), leaf(&["baskerville"])]),
            leaf(&["courier"]),
        ])
    }

    #[test]
    fn test_leaves_in_order() {
        let h = sample();
        let leaves: Vec<Vec<&str>> = h
            .leaves()
            .map(|l| l.iter().map(String::as_str).collect())
            .collect();
        assert_eq!(
            leaves,
            vec![
                vec!["futura", "avenir"],
                vec!["didot", "bodoni"],
                vec!["baskerville"],
                vec!["courier"],
            ]
        );
        assert_eq!(h.leaf_count(), 4);
        assert_eq!(h.entity_count(), 6);
        assert_eq!(h.depth(), 1);
    }

    #[test]
    fn test_serializes_as_nested_arrays() {
        let json = serde_json::to_string(&sample()).unwrap();
        assert_eq!(
            json,
            r#"[["futura","avenir"],[["didot","bodoni"],["baskerville"]],["courier"]]"#
        );

        let back: ClusterHierarchy<String> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, sample());
    }

    #[test]
    fn test_stats_counts_oversized_leaves() {
        let h = sample();
        let stats = h.stats(1);
        assert_eq!(stats.leaves, 4);
        assert_eq!(stats.entities, 6);
        assert_eq!(stats.largest_leaf, 2);
        assert_eq!(stats.oversized_leaves, 2);
    }

    #[test]
    fn test_map_keeps_shape() {
        let h = ClusterHierarchy::new(vec![
            HierarchyNode::Leaf(vec![0usize, 2]),
            HierarchyNode::Branch(vec![HierarchyNode::Leaf(vec![1])]),
        ]);
        let names = ["a", "b", "c"];
        let mapped = h.map(|i| names[i]);
        assert_eq!(
            mapped.into_roots(),
            vec![
                HierarchyNode::Leaf(vec!["a", "c"]),
                HierarchyNode::Branch(vec![HierarchyNode::Leaf(vec!["b"])]),
            ]
        );
    }

    #[test]
    fn test_display_indents_branches() {
        let text = sample().to_string();
        assert_eq!(
            text,
            "- futura, avenir\n+\n  - didot, bodoni\n  - baskerville\n- courier\n"
        );
    }
}
