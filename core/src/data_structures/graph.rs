//! Undirected simple graph over dense integer vertex identifiers
//!
//! This module provides the adjacency representation consumed by the
//! matching algorithms: neighbor enumeration, a connectivity check and a
//! lazy breadth-first edge traversal.
//!
//! # Representation
//! Vertices are the integers `[0, n)`. Each vertex owns an ordered
//! neighbor set, so every query enumerates neighbors in ascending order
//! and traversal order is reproducible across runs.
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

use std::collections::{BTreeSet, VecDeque};

use serde::{Deserialize, Serialize};

use crate::algorithm::traits::{AlgorithmError, Edge, NodeId};

/// Undirected simple graph with ordered adjacency sets
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Graph {
    /// Neighbor set per vertex
    adjacency: Vec<BTreeSet<NodeId>>,

    /// Number of undirected edges
    edge_count: usize,
}

impl Graph {
    /// Creates a graph with `node_count` isolated vertices
    pub fn new(node_count: usize) -> Self {
        Self {
            adjacency: vec![BTreeSet::new(); node_count],
            edge_count: 0,
        }
    }

    /// Builds a graph from an edge list
    pub fn from_edges(node_count: usize, edges: &[Edge]) -> Result<Self, AlgorithmError> {
        let mut graph = Self::new(node_count);
        for &(source, target) in edges {
            graph.add_edge(source, target)?;
        }
        Ok(graph)
    }

    /// Adds an undirected edge. Parallel edges collapse into one.
    pub fn add_edge(&mut self, source: NodeId, target: NodeId) -> Result<(), AlgorithmError> {
        self.check_node(source)?;
        self.check_node(target)?;

        if source == target {
            return Err(AlgorithmError::InvalidNode(source));
        }

        if self.adjacency[source].insert(target) {
            self.adjacency[target].insert(source);
            self.edge_count += 1;
        }

        Ok(())
    }

    #[inline]
    fn check_node(&self, node: NodeId) -> Result<(), AlgorithmError> {
        if node < self.adjacency.len() {
            Ok(())
        } else {
            Err(AlgorithmError::InvalidNode(node))
        }
    }

    #[inline]
    pub fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    #[inline]
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.adjacency.is_empty()
    }

    /// Iterates vertex identifiers in ascending order
    pub fn nodes(&self) -> impl Iterator<Item = NodeId> {
        0..self.adjacency.len()
    }

    /// Neighbors of `node` in ascending order; empty for unknown vertices
    pub fn neighbors(&self, node: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.adjacency
            .get(node)
            .into_iter()
            .flat_map(|neighbors| neighbors.iter().copied())
    }

    pub fn degree(&self, node: NodeId) -> usize {
        self.adjacency.get(node).map_or(0, BTreeSet::len)
    }

    pub fn has_edge(&self, source: NodeId, target: NodeId) -> bool {
        self.adjacency
            .get(source)
            .map_or(false, |neighbors| neighbors.contains(&target))
    }

    /// Every undirected edge once, as `(min, max)`
    pub fn edges(&self) -> impl Iterator<Item = Edge> + '_ {
        self.adjacency
            .iter()
            .enumerate()
            .flat_map(|(source, neighbors)| {
                neighbors
                    .range(source + 1..)
                    .map(move |&target| (source, target))
            })
    }

    /// True when every vertex is reachable from vertex 0.
    ///
    /// The empty graph counts as connected.
    pub fn is_connected(&self) -> bool {
        if self.is_empty() {
            return true;
        }

        let mut reached = vec![false; self.node_count()];
        let mut queue = VecDeque::with_capacity(self.node_count());
        reached[0] = true;
        queue.push_back(0);
        let mut count = 1;

        while let Some(node) = queue.pop_front() {
            for neighbor in self.neighbors(node) {
                if !reached[neighbor] {
                    reached[neighbor] = true;
                    count += 1;
                    queue.push_back(neighbor);
                }
            }
        }

        count == self.node_count()
    }

    /// Lazy breadth-first traversal yielding every examined edge.
    ///
    /// Each dequeued vertex yields one `(from, to)` pair per neighbor,
    /// including neighbors that were already discovered, so every
    /// undirected edge in the reachable component is examined in both
    /// directions.
    pub fn bfs_edges(&self, start: NodeId) -> BfsEdges<'_> {
        BfsEdges::new(self, start)
    }
}

/// One-shot iterator over edges examined by a breadth-first search
#[derive(Debug, Clone)]
pub struct BfsEdges<'a> {
    graph: &'a Graph,
    queue: VecDeque<NodeId>,
    discovered: Vec<bool>,
    pending: VecDeque<Edge>,
}

impl<'a> BfsEdges<'a> {
    fn new(graph: &'a Graph, start: NodeId) -> Self {
        let mut discovered = vec![false; graph.node_count()];
        let mut queue = VecDeque::new();

        if start < graph.node_count() {
            discovered[start] = true;
            queue.push_back(start);
        }

        Self {
            graph,
            queue,
            discovered,
            pending: VecDeque::new(),
        }
    }
}

impl Iterator for BfsEdges<'_> {
    type Item = Edge;

    fn next(&mut self) -> Option<Edge> {
        loop {
            if let Some((from, to)) = self.pending.pop_front() {
                if !self.discovered[to] {
                    self.discovered[to] = true;
                    self.queue.push_back(to);
                }
                return Some((from, to));
            }

            let node = self.queue.pop_front()?;
            self.pending
                .extend(self.graph.neighbors(node).map(|neighbor| (node, neighbor)));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_graph_creation_and_basic_operations() {
        let graph = Graph::from_edges(4, &[(0, 1), (1, 2), (2, 3), (1, 0)]).unwrap();

        assert_eq!(graph.node_count(), 4);
        assert_eq!(graph.edge_count(), 3);
        assert!(graph.has_edge(0, 1));
        assert!(graph.has_edge(1, 0));
        assert!(!graph.has_edge(0, 2));
        assert_eq!(graph.neighbors(1).collect::<Vec<_>>(), vec![0, 2]);
        assert_eq!(graph.degree(3), 1);
        assert_eq!(graph.edges().collect::<Vec<_>>(), vec![(0, 1), (1, 2), (2, 3)]);
    }

    #[test]
    fn test_invalid_edges_rejected() {
        let mut graph = Graph::new(2);
        assert!(matches!(graph.add_edge(0, 2), Err(AlgorithmError::InvalidNode(2))));
        assert!(matches!(graph.add_edge(1, 1), Err(AlgorithmError::InvalidNode(1))));
        assert_eq!(graph.edge_count(), 0);
    }

    #[test]
    fn test_connectivity() {
        assert!(Graph::new(0).is_connected());
        assert!(Graph::new(1).is_connected());
        assert!(!Graph::new(2).is_connected());

        let path = Graph::from_edges(3, &[(0, 1), (1, 2)]).unwrap();
        assert!(path.is_connected());

        let split = Graph::from_edges(4, &[(0, 1), (2, 3)]).unwrap();
        assert!(!split.is_connected());
    }

    #[test]
    fn test_bfs_edges_examines_both_directions() {
        let triangle = Graph::from_edges(3, &[(0, 1), (1, 2), (2, 0)]).unwrap();
        let edges: Vec<_> = triangle.bfs_edges(0).collect();

        assert_eq!(
            edges,
            vec![(0, 1), (0, 2), (1, 0), (1, 2), (2, 0), (2, 1)]
        );
    }

    #[test]
    fn test_bfs_edges_stays_in_component() {
        let split = Graph::from_edges(4, &[(0, 1), (2, 3)]).unwrap();
        let edges: Vec<_> = split.bfs_edges(0).collect();
        assert_eq!(edges, vec![(0, 1), (1, 0)]);

        assert_eq!(split.bfs_edges(7).count(), 0);
    }

    #[test]
    fn test_graph_serialization() {
        let graph = Graph::from_edges(3, &[(0, 1), (1, 2)]).unwrap();
        let json = serde_json::to_string(&graph).unwrap();
        let restored: Graph = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, graph);
    }
}
