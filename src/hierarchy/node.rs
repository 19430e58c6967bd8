//! Hierarchy node.

use serde::{Deserialize, Serialize};

/// A node in a cluster hierarchy.
///
/// A node is either a terminal group of entities or a nested sequence of
/// nodes that replaced an oversized group. Serializes as a bare JSON array in
/// both cases: a leaf is an array of entities, a branch an array of nodes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum HierarchyNode<T> {
    /// Terminal group.
    Leaf(Vec<T>),
    /// Subdivision of a group that exceeded the size cap.
    Branch(Vec<HierarchyNode<T>>),
}

impl<T> HierarchyNode<T> {
    /// Check if this is a leaf node.
    pub fn is_leaf(&self) -> bool {
        matches!(self, HierarchyNode::Leaf(_))
    }

    /// Get the members if this is a leaf node.
    pub fn as_leaf(&self) -> Option<&[T]> {
        match self {
            HierarchyNode::Leaf(members) => Some(members.as_slice()),
            HierarchyNode::Branch(_) => None,
        }
    }

    /// Get the children if this is a branch node.
    pub fn children(&self) -> Option<&[HierarchyNode<T>]> {
        match self {
            HierarchyNode::Branch(children) => Some(children.as_slice()),
            HierarchyNode::Leaf(_) => None,
        }
    }

    /// Number of entities under this node.
    pub fn entity_count(&self) -> usize {
        match self {
            HierarchyNode::Leaf(members) => members.len(),
            HierarchyNode::Branch(children) => children.iter().map(Self::entity_count).sum(),
        }
    }

    /// Branch levels between this node and its deepest leaf (0 for a leaf).
    pub fn depth(&self) -> usize {
        match self {
            HierarchyNode::Leaf(_) => 0,
            HierarchyNode::Branch(children) => {
                1 + children.iter().map(Self::depth).max().unwrap_or(0)
            }
        }
    }

    /// Transform every entity, keeping the shape.
    pub fn map<U, F: FnMut(T) -> U>(self, f: &mut F) -> HierarchyNode<U> {
        match self {
            HierarchyNode::Leaf(members) => HierarchyNode::Leaf(members.into_iter().map(f).collect()),
            HierarchyNode::Branch(children) => {
                HierarchyNode::Branch(children.into_iter().map(|c| c.map(f)).collect())
            }
        }
    }
}
