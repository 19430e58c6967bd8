//! Graph clustering primitives.
//!
//! Given an undirected weighted graph, split its nodes into groups. These are
//! the primitives the recursive controller calls once per candidate
//! threshold; they know nothing about distances, quantiles or size caps.
//!
//! ## Algorithms
//!
//! ### Markov Clustering (default)
//!
//! [`Mcl`] alternates expansion (flow spreads along paths) and inflation
//! (strong flow is reinforced) until the random walk settles. Groups are read
//! from attractor rows and may overlap; the controller resolves overlaps
//! afterwards.
//!
//! ### Connected Components
//!
//! [`ConnectedComponents`] returns the connected components of the graph.
//! With edges drawn only below a distance threshold this is single-linkage
//! clustering at that threshold. Never overlaps, fully predictable.
//!
//! ## Usage
//!
//! ```rust
//! use petgraph::graph::UnGraph;
//! use glyphtier::community::{GraphClustering, Mcl};
//!
//! let mut graph = UnGraph::<(), f64>::new_undirected();
//! let a = graph.add_node(());
//! let b = graph.add_node(());
//! let c = graph.add_node(());
//! graph.add_edge(a, b, 0.1);
//!
//! let groups = Mcl::new().cluster(&graph).unwrap();
//! assert_eq!(groups, vec![vec![0, 1], vec![2]]);
//! ```

mod components;
mod mcl;
mod traits;

pub use components::ConnectedComponents;
pub use mcl::Mcl;
pub use traits::GraphClustering;
