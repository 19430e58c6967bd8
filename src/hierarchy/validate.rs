//! Partition checks for cluster hierarchies.
//!
//! A finished hierarchy should put every input entity in exactly one terminal
//! group. [`ClusterHierarchy::validate_partition`] checks that and collects
//! every deviation as a [`PartitionIssue`]:
//!
//! | Issue | Severity |
//! |---|---|
//! | entity missing, repeated, or not in the input | error |
//! | empty terminal group | warning |
//! | terminal group above the size cap | warning (irreducible groups may) |
//!
//! ```rust
//! use glyphtier::hierarchy::{ClusterHierarchy, HierarchyNode};
//!
//! let h = ClusterHierarchy::new(vec![
//!     HierarchyNode::Leaf(vec!["a", "b"]),
//!     HierarchyNode::Leaf(vec!["c"]),
//! ]);
//! let report = h.validate_partition(&["a", "b", "c"], 5);
//! assert!(report.is_healthy());
//! ```

use super::tree::ClusterHierarchy;
use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;

/// How bad an issue is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    /// Legal but worth a look.
    Warning,
    /// Not a partition of the input.
    Error,
}

/// One deviation from a clean partition. Leaf positions count terminal
/// groups depth first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PartitionIssue<T> {
    /// An input entity is in no terminal group.
    Missing(T),
    /// An input entity is in more than one terminal group.
    Repeated {
        /// The entity.
        entity: T,
        /// How many times it appears.
        count: usize,
    },
    /// A terminal group holds something that was not in the input.
    Unexpected {
        /// The stray entity.
        entity: T,
        /// Where it was found.
        leaf: usize,
    },
    /// A terminal group with no members.
    EmptyLeaf {
        /// Position of the group.
        leaf: usize,
    },
    /// A terminal group above the size cap.
    OversizedLeaf {
        /// Position of the group.
        leaf: usize,
        /// Its size.
        size: usize,
        /// The cap it exceeds.
        cap: usize,
    },
}

impl<T> PartitionIssue<T> {
    /// Severity of this issue.
    pub fn severity(&self) -> Severity {
        match self {
            PartitionIssue::EmptyLeaf { .. } | PartitionIssue::OversizedLeaf { .. } => {
                Severity::Warning
            }
            _ => Severity::Error,
        }
    }
}

impl<T: fmt::Debug> fmt::Display for PartitionIssue<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self.severity() {
            Severity::Warning => "warning",
            Severity::Error => "error",
        };
        match self {
            PartitionIssue::Missing(entity) => write!(f, "{tag}: {entity:?} is missing"),
            PartitionIssue::Repeated { entity, count } => {
                write!(f, "{tag}: {entity:?} appears {count} times")
            }
            PartitionIssue::Unexpected { entity, leaf } => {
                write!(f, "{tag}: unexpected {entity:?} in leaf {leaf}")
            }
            PartitionIssue::EmptyLeaf { leaf } => write!(f, "{tag}: leaf {leaf} is empty"),
            PartitionIssue::OversizedLeaf { leaf, size, cap } => {
                write!(f, "{tag}: leaf {leaf} holds {size} entities (cap {cap})")
            }
        }
    }
}

/// Everything [`ClusterHierarchy::validate_partition`] found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationReport<T> {
    issues: Vec<PartitionIssue<T>>,
}

impl<T> ValidationReport<T> {
    /// All issues, leaf-level ones first, then per-entity ones in input order.
    pub fn issues(&self) -> &[PartitionIssue<T>] {
        &self.issues
    }

    /// No errors (warnings allowed).
    pub fn is_healthy(&self) -> bool {
        self.errors().next().is_none()
    }

    /// No issues at all.
    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }

    /// Error-level issues.
    pub fn errors(&self) -> impl Iterator<Item = &PartitionIssue<T>> {
        self.issues.iter().filter(|i| i.severity() == Severity::Error)
    }

    /// Warning-level issues.
    pub fn warnings(&self) -> impl Iterator<Item = &PartitionIssue<T>> {
        self.issues
            .iter()
            .filter(|i| i.severity() == Severity::Warning)
    }
}

impl<T: fmt::Debug> fmt::Display for ValidationReport<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_clean() {
            return write!(f, "partition ok");
        }
        write!(
            f,
            "partition check: {} errors, {} warnings",
            self.errors().count(),
            self.warnings().count()
        )?;
        for issue in &self.issues {
            write!(f, "\n  {issue}")?;
        }
        Ok(())
    }
}

impl<T: Clone + Eq + Hash> ClusterHierarchy<T> {
    /// Check that the terminal groups partition `expected` exactly.
    pub fn validate_partition(
        &self,
        expected: &[T],
        max_cluster_size: usize,
    ) -> ValidationReport<T> {
        let mut issues = Vec::new();
        let mut seen: HashMap<&T, usize> = expected.iter().map(|e| (e, 0)).collect();

        for (leaf, members) in self.leaves().enumerate() {
            if members.is_empty() {
                issues.push(PartitionIssue::EmptyLeaf { leaf });
            } else if members.len() > max_cluster_size {
                issues.push(PartitionIssue::OversizedLeaf {
                    leaf,
                    size: members.len(),
                    cap: max_cluster_size,
                });
            }
            for member in members {
                match seen.get_mut(member) {
                    Some(count) => *count += 1,
                    None => issues.push(PartitionIssue::Unexpected {
                        entity: member.clone(),
                        leaf,
                    }),
                }
            }
        }

        for entity in expected {
            match seen.get(entity).copied().unwrap_or(0) {
                0 => issues.push(PartitionIssue::Missing(entity.clone())),
                1 => {}
                count => issues.push(PartitionIssue::Repeated {
                    entity: entity.clone(),
                    count,
                }),
            }
        }

        ValidationReport { issues }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hierarchy::HierarchyNode;

    #[test]
    fn test_clean_partition() {
        let h = ClusterHierarchy::new(vec![
            HierarchyNode::Leaf(vec![1, 2]),
            HierarchyNode::Branch(vec![HierarchyNode::Leaf(vec![3]), HierarchyNode::Leaf(vec![4])]),
        ]);
        let report = h.validate_partition(&[1, 2, 3, 4], 5);
        assert!(report.is_clean(), "{}", report);
        assert_eq!(report.to_string(), "partition ok");
    }

    #[test]
    fn test_missing_repeated_and_unexpected() {
        let h = ClusterHierarchy::new(vec![
            HierarchyNode::Leaf(vec![1, 2]),
            HierarchyNode::Leaf(vec![2, 9]),
        ]);
        let report = h.validate_partition(&[1, 2, 3], 5);

        assert!(!report.is_healthy());
        assert_eq!(
            report.issues(),
            &[
                PartitionIssue::Unexpected { entity: 9, leaf: 1 },
                PartitionIssue::Repeated { entity: 2, count: 2 },
                PartitionIssue::Missing(3),
            ]
        );
    }

    #[test]
    fn test_oversized_and_empty_leaves_are_warnings() {
        let h = ClusterHierarchy::new(vec![
            HierarchyNode::Leaf(vec![1, 2, 3]),
            HierarchyNode::Leaf(vec![]),
        ]);
        let report = h.validate_partition(&[1, 2, 3], 2);

        assert!(report.is_healthy());
        assert_eq!(report.warnings().count(), 2);
        let text = report.to_string();
        assert!(text.contains("0 errors, 2 warnings"));
        assert!(text.contains("leaf 0 holds 3 entities (cap 2)"));
        assert!(text.contains("leaf 1 is empty"));
    }

    #[test]
    fn test_severity_ordering() {
        assert!(Severity::Warning < Severity::Error);
        assert_eq!(PartitionIssue::Missing("x").severity(), Severity::Error);
    }
}
