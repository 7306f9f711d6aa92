//! Graph storage consumed by the algorithm layer

pub mod graph;

pub use self::graph::{BfsEdges, Graph};
