//! Bipartite Partitioning by Breadth-First Two-Coloring
//!
//! This module splits the vertices of a connected graph into two classes
//! (U, V) such that every edge joins one vertex of each class, or reports
//! that no such split exists.
//!
//! # Theoretical Foundation
//!
//! A graph is bipartite iff it contains no odd cycle. During a
//! breadth-first traversal every examined edge `(from, to)` forces `to`
//! into the class opposite to `from`; an edge whose endpoints are forced
//! into the same class closes an odd cycle.
//!
//! ## Connectivity
//!
//! Only the component of the start vertex is traversed, so a disconnected
//! graph cannot be fully colored. It is rejected with the same
//! `NotBipartite` error as an odd cycle, even when every component is
//! bipartite on its own.
//!
//! # Algorithmic Complexity
//!
//! - **Time Complexity**: O(V + E)
//! - **Space Complexity**: O(V)

use std::collections::BTreeSet;

use log::{debug, trace};
use serde::{Deserialize, Serialize};

use crate::algorithm::traits::{AlgorithmError, NodeId};
use crate::data_structures::graph::Graph;

/// Two disjoint vertex classes of a bipartite graph
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Partition {
    /// Class containing the traversal's first vertex
    pub u: BTreeSet<NodeId>,
    /// Opposite class
    pub v: BTreeSet<NodeId>,
}

impl Partition {
    /// Creates a partition from explicit vertex classes
    pub fn new(u: impl IntoIterator<Item = NodeId>, v: impl IntoIterator<Item = NodeId>) -> Self {
        Self {
            u: u.into_iter().collect(),
            v: v.into_iter().collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.u.is_empty() && self.v.is_empty()
    }

    /// Total number of vertices covered
    pub fn len(&self) -> usize {
        self.u.len() + self.v.len()
    }

    /// Upper bound on the size of any matching
    pub fn max_matching_size(&self) -> usize {
        self.u.len().min(self.v.len())
    }

    pub fn is_disjoint(&self) -> bool {
        self.u.is_disjoint(&self.v)
    }
}

/// Splits a connected graph into its two classes.
///
/// The traversal starts at vertex 0, which lands in U. An isolated single
/// vertex forms U on its own; the empty graph yields two empty classes.
pub fn partition(graph: &Graph) -> Result<Partition, AlgorithmError> {
    let mut partition = Partition::default();

    if graph.is_empty() {
        return Ok(partition);
    }

    if !graph.is_connected() {
        return Err(AlgorithmError::NotBipartite(
            "graph is disconnected; only connected graphs can be partitioned".to_string(),
        ));
    }

    for (from, to) in graph.bfs_edges(0) {
        if partition.u.contains(&from) {
            if partition.u.contains(&to) {
                return Err(odd_cycle(from, to));
            }
            if partition.v.insert(to) {
                trace!("{} joins V (neighbor of {})", to, from);
            }
        } else if partition.v.contains(&from) {
            if partition.v.contains(&to) {
                return Err(odd_cycle(from, to));
            }
            if partition.u.insert(to) {
                trace!("{} joins U (neighbor of {})", to, from);
            }
        } else {
            trace!("Seeding classes from edge ({}, {})", from, to);
            partition.u.insert(from);
            partition.v.insert(to);
        }
    }

    if partition.is_empty() {
        partition.u.insert(0);
    }

    if !partition.is_disjoint() {
        return Err(AlgorithmError::InternalConsistency(format!(
            "vertex classes overlap at {:?}",
            partition.u.intersection(&partition.v).collect::<Vec<_>>()
        )));
    }

    debug!(
        "Partitioned {} vertices into |U| = {}, |V| = {}",
        graph.node_count(),
        partition.u.len(),
        partition.v.len()
    );

    Ok(partition)
}

fn odd_cycle(from: NodeId, to: NodeId) -> AlgorithmError {
    AlgorithmError::NotBipartite(format!(
        "odd cycle closed by edge ({}, {})",
        from, to
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_graph_partition() {
        let partition = partition(&Graph::new(0)).unwrap();
        assert!(partition.is_empty());
        assert_eq!(partition.len(), 0);
    }

    #[test]
    fn test_single_vertex_partition() {
        let partition = partition(&Graph::new(1)).unwrap();
        assert_eq!(partition.u, BTreeSet::from([0]));
        assert!(partition.v.is_empty());
    }

    #[test]
    fn test_single_edge_partition() {
        let graph = Graph::from_edges(2, &[(0, 1)]).unwrap();
        assert_eq!(partition(&graph).unwrap(), Partition::new([0], [1]));
    }

    #[test]
    fn test_star_partition() {
        let graph = Graph::from_edges(5, &[(0, 3), (0, 4), (1, 3), (2, 4)]).unwrap();
        let partition = partition(&graph).unwrap();

        assert_eq!(partition, Partition::new([0, 1, 2], [3, 4]));
        assert_eq!(partition.max_matching_size(), 2);
        for (i, j) in graph.edges() {
            assert!(partition.u.contains(&i) != partition.u.contains(&j));
        }
    }

    #[test]
    fn test_even_cycle_partition() {
        let square = Graph::from_edges(4, &[(0, 1), (1, 2), (2, 3), (3, 0)]).unwrap();
        assert_eq!(partition(&square).unwrap(), Partition::new([0, 2], [1, 3]));
    }

    #[test]
    fn test_triangle_is_not_bipartite() {
        let triangle = Graph::from_edges(3, &[(0, 1), (1, 2), (2, 0)]).unwrap();
        assert!(matches!(
            partition(&triangle),
            Err(AlgorithmError::NotBipartite(_))
        ));
    }

    #[test]
    fn test_odd_cycle_with_tail_is_not_bipartite() {
        let graph = Graph::from_edges(5, &[(0, 1), (1, 2), (2, 3), (3, 4), (4, 2)]).unwrap();
        assert!(matches!(partition(&graph), Err(AlgorithmError::NotBipartite(_))));
    }

    #[test]
    fn test_disconnected_graph_is_rejected() {
        let graph = Graph::from_edges(4, &[(0, 1), (2, 3)]).unwrap();
        match partition(&graph) {
            Err(AlgorithmError::NotBipartite(reason)) => assert!(reason.contains("disconnected")),
            other => panic!("expected NotBipartite, got {:?}", other),
        }
    }
}
