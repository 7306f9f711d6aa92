//! Symmetric Matching Structure
//!
//! A matching is a set of vertex-disjoint edges. This module stores it as
//! a partner map over integer vertex identifiers in which every pair is
//! recorded in both directions. The structure has no knowledge of the
//! graph it was computed on; the matchers in this crate own and mutate it.
//!
//! # Invariants
//! 1. **Symmetry**: if `i` maps to `j` then `j` maps to `i`
//! 2. **Exclusivity**: no vertex is the partner of two different vertices
//! 3. **Size**: `size = mapped vertices / 2`
//!
//! `add` and `delete` do not validate their input, so a caller can break
//! these invariants. `validate` detects it.
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::algorithm::traits::{AlgorithmError, Edge, NodeId};

/// Partner map with symmetric pairs
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "Vec<Edge>", try_from = "Vec<Edge>")]
pub struct Matching {
    mates: BTreeMap<NodeId, NodeId>,
}

impl Matching {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a matching from a mate array with one slot per vertex.
    ///
    /// Both directions of a pair normally appear in the array; each pair
    /// is inserted once.
    pub fn from_mates(mates: &[Option<NodeId>]) -> Self {
        let mut matching = Self::new();
        for (node, mate) in mates.iter().enumerate() {
            if let Some(partner) = *mate {
                if !matching.is_matched((node, partner)) {
                    matching.add((node, partner));
                }
            }
        }
        matching
    }

    /// Inverse of `from_mates` for vertices below `node_count`
    pub fn to_mates(&self, node_count: usize) -> Vec<Option<NodeId>> {
        let mut mates = vec![None; node_count];
        for (&node, &partner) in self.mates.range(..node_count) {
            mates[node] = Some(partner);
        }
        mates
    }

    /// Pairs both endpoints with each other, overwriting prior partners
    pub fn add(&mut self, (i, j): Edge) {
        self.mates.insert(i, j);
        self.mates.insert(j, i);
    }

    /// Clears both endpoints
    pub fn delete(&mut self, (i, j): Edge) {
        self.mates.remove(&i);
        self.mates.remove(&j);
    }

    #[inline]
    pub fn is_matched(&self, (i, j): Edge) -> bool {
        self.mates.get(&i) == Some(&j)
    }

    #[inline]
    pub fn has_vertex(&self, node: NodeId) -> bool {
        self.mates.contains_key(&node)
    }

    #[inline]
    pub fn partner(&self, node: NodeId) -> Option<NodeId> {
        self.mates.get(&node).copied()
    }

    /// Number of matched pairs
    #[inline]
    pub fn size(&self) -> usize {
        self.mates.len() / 2
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.mates.is_empty()
    }

    /// Matched edges, one `(min, max)` entry per pair, sorted
    pub fn to_a(&self) -> Vec<Edge> {
        self.mates
            .iter()
            .filter(|&(&node, &partner)| node < partner)
            .map(|(&node, &partner)| (node, partner))
            .collect()
    }

    /// Currently matched vertices
    pub fn vertexes(&self) -> BTreeSet<NodeId> {
        self.mates.keys().copied().collect()
    }

    /// Flips the matched status of every edge along an augmenting path.
    ///
    /// `path` holds an even number of vertices whose endpoints are both
    /// unmatched and whose edges alternate unmatched, matched, ..., unmatched.
    /// Edges at odd positions leave the matching, edges at even positions
    /// enter it, growing the matching by one pair. The path is trusted.
    pub fn augment(&mut self, path: &[NodeId]) {
        debug_assert!(path.len() % 2 == 0, "augmenting path has odd vertex count");

        if let Some(inner) = path.get(1..) {
            for pair in inner.chunks_exact(2) {
                self.delete((pair[0], pair[1]));
            }
        }

        for pair in path.chunks_exact(2) {
            self.add((pair[0], pair[1]));
        }
    }

    /// Checks symmetry and exclusivity
    pub fn validate(&self) -> Result<(), AlgorithmError> {
        let mut claimed_by: HashMap<NodeId, NodeId> = HashMap::with_capacity(self.mates.len());

        for (&node, &partner) in &self.mates {
            if node == partner {
                return Err(AlgorithmError::InternalConsistency(format!(
                    "vertex {} is matched to itself",
                    node
                )));
            }

            if let Some(previous) = claimed_by.insert(partner, node) {
                return Err(AlgorithmError::InternalConsistency(format!(
                    "vertex {} is the partner of both {} and {}",
                    partner, previous, node
                )));
            }

            if self.mates.get(&partner) != Some(&node) {
                return Err(AlgorithmError::InternalConsistency(format!(
                    "asymmetric pair: {} -> {} but {} -> {:?}",
                    node,
                    partner,
                    partner,
                    self.mates.get(&partner)
                )));
            }
        }

        Ok(())
    }

    /// Panicking form of `validate` for post-condition checks in tests
    pub fn assert_valid(&self) {
        if let Err(err) = self.validate() {
            panic!("{}", err);
        }
    }
}

/// Loads a matching from its edge list.
///
/// A repeated pair is accepted once. An edge that reuses a matched vertex
/// or joins a vertex to itself is rejected.
impl TryFrom<Vec<Edge>> for Matching {
    type Error = AlgorithmError;

    fn try_from(edges: Vec<Edge>) -> Result<Self, Self::Error> {
        let mut matching = Self::new();
        for (i, j) in edges {
            if matching.is_matched((i, j)) {
                continue;
            }
            if i == j {
                return Err(AlgorithmError::InternalConsistency(format!(
                    "vertex {} is matched to itself",
                    i
                )));
            }
            if let Some(&node) = [i, j].iter().find(|&&node| matching.has_vertex(node)) {
                return Err(AlgorithmError::InternalConsistency(format!(
                    "edge ({}, {}) reuses vertex {} already matched to {:?}",
                    i,
                    j,
                    node,
                    matching.partner(node)
                )));
            }
            matching.add((i, j));
        }
        Ok(matching)
    }
}

impl From<Matching> for Vec<Edge> {
    fn from(matching: Matching) -> Self {
        matching.to_a()
    }
}

impl fmt::Display for Matching {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (index, (i, j)) in self.to_a().into_iter().enumerate() {
            if index > 0 {
                write!(f, ", ")?;
            }
            write!(f, "({}, {})", i, j)?;
        }
        write!(f, "}}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_add_and_query() {
        let mut matching = Matching::new();
        assert!(matching.is_empty());

        matching.add((0, 3));
        matching.add((4, 1));

        assert_eq!(matching.size(), 2);
        assert!(matching.is_matched((0, 3)));
        assert!(matching.is_matched((3, 0)));
        assert!(!matching.is_matched((0, 4)));
        assert!(matching.has_vertex(4));
        assert!(!matching.has_vertex(2));
        assert_eq!(matching.partner(1), Some(4));
        assert_eq!(matching.to_a(), vec![(0, 3), (1, 4)]);
        assert_eq!(matching.vertexes(), BTreeSet::from([0, 1, 3, 4]));
        matching.assert_valid();
    }

    #[test]
    fn test_add_is_idempotent() {
        let mut matching = Matching::new();
        matching.add((2, 5));
        let snapshot = matching.clone();

        matching.add((2, 5));
        assert_eq!(matching, snapshot);

        matching.add((5, 2));
        assert_eq!(matching, snapshot);
    }

    #[test]
    fn test_delete_clears_both_endpoints() {
        let mut matching = Matching::try_from(vec![(0, 1), (2, 3)]).unwrap();
        matching.delete((1, 0));

        assert_eq!(matching.size(), 1);
        assert!(!matching.has_vertex(0));
        assert!(!matching.has_vertex(1));
        assert_eq!(matching.to_a(), vec![(2, 3)]);
    }

    #[test]
    fn test_augment_single_edge() {
        let mut matching = Matching::new();
        matching.augment(&[3, 0]);

        assert_eq!(matching.to_a(), vec![(0, 3)]);
    }

    #[test]
    fn test_augment_alternating_path() {
        // 4 - 1 = 3 - 0, with (1, 3) matched
        let mut matching = Matching::try_from(vec![(1, 3)]).unwrap();
        matching.augment(&[4, 1, 3, 0]);

        assert_eq!(matching.size(), 2);
        assert_eq!(matching.to_a(), vec![(0, 3), (1, 4)]);
        assert!(!matching.is_matched((1, 3)));
        matching.assert_valid();
    }

    #[test]
    fn test_from_mates_inserts_each_pair_once() {
        let mates = vec![Some(3), None, Some(4), Some(0), Some(2)];
        let matching = Matching::from_mates(&mates);

        assert_eq!(matching.size(), 2);
        assert_eq!(matching.to_a(), vec![(0, 3), (2, 4)]);
        assert_eq!(matching.to_mates(5), mates);
    }

    #[test]
    fn test_validate_detects_overwrite() {
        let mut matching = Matching::new();
        matching.add((0, 1));
        matching.add((0, 2));

        assert!(matches!(
            matching.validate(),
            Err(AlgorithmError::InternalConsistency(_))
        ));
    }

    #[test]
    #[should_panic(expected = "Internal consistency failure")]
    fn test_assert_valid_panics_on_corruption() {
        let mut matching = Matching::new();
        matching.add((0, 1));
        matching.add((1, 2));
        matching.assert_valid();
    }

    #[test]
    fn test_display_and_serialization() {
        let matching = Matching::try_from(vec![(4, 1), (0, 3)]).unwrap();
        assert_eq!(matching.to_string(), "{(0, 3), (1, 4)}");

        let json = serde_json::to_string(&matching).unwrap();
        assert_eq!(json, "[[0,3],[1,4]]");

        let restored: Matching = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, matching);
    }

    #[test]
    fn test_deserialize_rejects_shared_vertex() {
        let result = serde_json::from_str::<Matching>("[[0,1],[1,2]]");
        assert!(result.is_err());

        assert!(matches!(
            Matching::try_from(vec![(0, 1), (1, 2)]),
            Err(AlgorithmError::InternalConsistency(_))
        ));
        assert!(matches!(
            Matching::try_from(vec![(3, 3)]),
            Err(AlgorithmError::InternalConsistency(_))
        ));
    }

    #[test]
    fn test_deserialize_accepts_repeated_pair() {
        let restored: Matching = serde_json::from_str("[[0,1],[1,0]]").unwrap();
        assert_eq!(restored.to_a(), vec![(0, 1)]);
        restored.assert_valid();
    }

    proptest! {
        #[test]
        fn prop_mate_array_round_trip(pairs in proptest::collection::btree_set((0usize..20, 20usize..40), 0..15)) {
            // keep only vertex-disjoint pairs
            let mut used = BTreeSet::new();
            let mut expected = Vec::new();
            for (i, j) in pairs {
                if !used.contains(&i) && !used.contains(&j) {
                    used.insert(i);
                    used.insert(j);
                    expected.push((i, j));
                }
            }
            expected.sort();

            let mut mates = vec![None; 40];
            for &(i, j) in &expected {
                mates[i] = Some(j);
                mates[j] = Some(i);
            }

            let matching = Matching::from_mates(&mates);
            prop_assert_eq!(matching.to_a(), expected.clone());
            prop_assert_eq!(matching.size(), expected.len());
            prop_assert!(matching.validate().is_ok());
        }
    }
}
