//! Nested cluster hierarchies.
//!
//! Recursive clustering produces a sequence of groups where any group that
//! was too large has been replaced, in place, by its own subdivision:
//!
//! ```text
//! [ [A, B, C],                 <- leaf (size <= cap)
//!   [ [D, E], [F, G, H] ],     <- branch: an oversized group, subdivided
//!   [I] ]                      <- leaf
//! ```
//!
//! - [`ClusterHierarchy`]: the top-level sequence, with traversal and stats
//! - [`HierarchyNode`]: a leaf group or a nested branch
//! - [`ValidationReport`]: partition checks (conservation, size cap)
//!
//! Both types serialize as bare nested JSON arrays, which is also the output
//! format of the command-line tool.

mod node;
mod tree;
mod validate;

pub use node::HierarchyNode;
pub use tree::{ClusterHierarchy, HierarchyStats, Leaves};
pub use validate::{PartitionIssue, Severity, ValidationReport};
