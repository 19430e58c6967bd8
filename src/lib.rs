//! # glyphtier
//!
//! Threshold-driven recursive clustering of named entities (fonts) from a
//! pairwise distance matrix.
//!
//! Given `n` entities and their distances, `glyphtier` produces a hierarchy of
//! small groups (at most 5 members by default): a graph clustering primitive
//! is run at a searched distance threshold, overlapping memberships are
//! resolved, and every group that is still too large is subdivided in place.
//!
//! ```rust
//! use glyphtier::{DistanceIndex, Mcl, NoopObserver, RecursiveClusterer};
//!
//! let names = ["A", "B", "C", "D", "E", "F"].map(String::from).to_vec();
//! let rows = (0..6)
//!     .map(|i| (0..6).map(|j| if i == j { 0.0 } else if i / 3 == j / 3 { 0.05 } else { 0.95 }).collect())
//!     .collect();
//! let index = DistanceIndex::new(names, rows).unwrap();
//!
//! let hierarchy = RecursiveClusterer::new(Mcl::new())
//!     .with_observer(NoopObserver)
//!     .cluster(&index)
//!     .unwrap();
//! assert_eq!(serde_json::to_string(&hierarchy).unwrap(), r#"[["A","B","C"],["D","E","F"]]"#);
//! ```
//!
//! ## Modules
//!
//! - [`distance`]: the read-only distance table
//! - [`stats`]: empirical quantiles
//! - [`community`]: graph clustering primitives (Markov clustering, components)
//! - [`cluster`]: threshold search, overlap resolution, the recursive controller
//! - [`hierarchy`]: the nested result, traversal and partition checks
//! - [`observer`]: progress hooks
//! - [`io`]: JSON input and output

pub mod cluster;
pub mod community;
pub mod distance;
/// Error types used across `glyphtier`.
pub mod error;
pub mod hierarchy;
pub mod io;
pub mod observer;
pub mod stats;

#[cfg(test)]
mod clustering_tests;

pub use cluster::{
    resolve_memberships, CeilingMode, ClusterConfig, EdgeWeight, RecursiveClusterer, Threshold,
    ThresholdSearch,
};
pub use community::{ConnectedComponents, GraphClustering, Mcl};
pub use distance::DistanceIndex;
pub use error::{Error, Result};
pub use hierarchy::{ClusterHierarchy, HierarchyNode, HierarchyStats, ValidationReport};
pub use io::{DistanceInformation, FontRecord};
pub use observer::{ClusterObserver, NoopObserver, TracingObserver};
pub use stats::{quantile, Quantiles};
