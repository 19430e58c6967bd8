//! Adaptive recursive clustering.
//!
//! Splits a set of entities into small groups using only their pairwise
//! distances. Nothing here knows the "right" distance threshold up front;
//! each level searches for one.
//!
//! ## Pipeline
//!
//! ```text
//! subset ─▶ ThresholdSearch ─▶ ClusterInvoker ─▶ resolve_memberships ─▶ recurse
//!              (quantiles)       (graph + primitive)   (overlaps)        (> cap)
//! ```
//!
//! - [`ThresholdSearch`]: halves a quantile level of the subset's distances
//!   until the threshold sits under a ceiling, then keeps halving until the
//!   primitive splits the subset or a floor is reached.
//! - [`ClusterInvoker`]: connects every pair strictly closer than the
//!   threshold and runs a [`GraphClustering`](crate::community::GraphClustering)
//!   primitive on that graph.
//! - [`resolve_memberships`]: an entity claimed by several groups stays only
//!   in the smallest one.
//! - [`RecursiveClusterer`]: drives the above and nests the result.
//!
//! ## Usage
//!
//! ```rust
//! use glyphtier::cluster::{ClusterConfig, RecursiveClusterer};
//! use glyphtier::community::Mcl;
//! use glyphtier::{DistanceIndex, NoopObserver};
//!
//! let names = ["A", "B", "C", "D", "E", "F"].map(String::from).to_vec();
//! let rows = (0..6)
//!     .map(|i| (0..6).map(|j| match (i == j, i / 3 == j / 3) {
//!         (true, _) => 0.0,
//!         (false, true) => 0.05,
//!         (false, false) => 0.95,
//!     }).collect())
//!     .collect();
//! let index = DistanceIndex::new(names, rows).unwrap();
//!
//! let hierarchy = RecursiveClusterer::new(Mcl::new())
//!     .with_config(ClusterConfig::default())
//!     .with_observer(NoopObserver)
//!     .cluster(&index)
//!     .unwrap();
//! assert_eq!(hierarchy.leaf_count(), 2);
//! ```

mod config;
mod controller;
mod dedup;
mod invoker;
mod threshold;

pub use config::{CeilingMode, ClusterConfig};
pub use controller::RecursiveClusterer;
pub use dedup::{resolve_memberships, Overlap, Resolution};
pub use invoker::{ClusterInvoker, EdgeWeight};
pub use threshold::{SearchOutcome, Threshold, ThresholdSearch};
