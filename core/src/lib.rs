//! bimatch: maximum cardinality matching in bipartite graphs
//!
//! The crate computes the largest set of vertex-disjoint edges of a
//! connected bipartite graph. A breadth-first two-coloring splits the
//! vertices into classes U and V, after which an alternating-tree
//! labeling search applies augmenting paths until none remains.
//!
//! ```
//! use bimatch_core::{maximum_cardinality_matching, Graph};
//!
//! let graph = Graph::from_edges(5, &[(0, 3), (0, 4), (1, 3), (2, 4)]).unwrap();
//! let matching = maximum_cardinality_matching(&graph).unwrap();
//! assert_eq!(matching.size(), 2);
//! ```
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

pub mod algorithm;
pub mod data_structures;
pub mod execution;

pub use crate::algorithm::graph::{
    find_augmenting_path, maximum_cardinality_matching, partition, AugmentingPathMatcher,
    Matching, MatchingStatistics, Partition, SelectionStrategy,
};
pub use crate::algorithm::traits::{
    Algorithm, AlgorithmComplexity, AlgorithmError, AlgorithmResult, Edge, NodeId,
};
pub use crate::data_structures::graph::{BfsEdges, Graph};
pub use crate::execution::tracer::{ExecutionTracer, TraceEvent};
