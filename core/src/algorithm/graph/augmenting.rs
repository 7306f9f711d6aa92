//! Maximum Cardinality Bipartite Matching by Augmenting Paths
//!
//! This module implements the alternating-tree labeling search for maximum
//! cardinality matchings in bipartite graphs. Each stage grows a forest of
//! alternating paths rooted at the unmatched vertices of U and stops at
//! the first unmatched vertex of V it reaches; the path back to the root
//! is then used to augment the matching.
//!
//! # Theoretical Foundation
//!
//! Berge's theorem: a matching is maximum iff it admits no augmenting
//! path. Every stage either applies exactly one augmenting path, growing
//! the matching by one pair, or exhausts the forest and thereby proves
//! maximality. In a bipartite graph the forest never needs blossom
//! contraction, since no edge can join two R-labeled vertices.
//!
//! ## Labels
//!
//! - **R-labels** (U side): roots and vertices reached through a matched edge
//! - **T-labels** (V side): vertices reached from an R-vertex through an
//!   unmatched edge
//! - **Marks**: R-vertices whose neighborhood has been expanded
//! - **Predecessors**: the vertex that labeled each vertex; walking them
//!   from a T-vertex reaches the root of its tree
//!
//! # Algorithmic Complexity
//!
//! - **Time Complexity**: O(V * E) - at most min(|U|, |V|) + 1 stages, each O(E)
//! - **Space Complexity**: O(V) per stage for labels and predecessors
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

use std::collections::{BTreeSet, HashMap, HashSet};
use std::fmt;
use std::str::FromStr;
use std::time::Instant;

use log::{debug, trace};
use serde::{Deserialize, Serialize};

use crate::algorithm::graph::bipartite::{partition, Partition};
use crate::algorithm::graph::matching::Matching;
use crate::algorithm::traits::{
    Algorithm, AlgorithmComplexity, AlgorithmError, AlgorithmResult, NodeId,
};
use crate::data_structures::graph::Graph;
use crate::execution::tracer::{ExecutionTracer, TraceEvent};

// ═══════════════════════════════════════════════════════════════════════════════════════
// CONFIGURATION AND STATISTICS
// ═══════════════════════════════════════════════════════════════════════════════════════

/// Order in which unmarked R-labeled vertices are expanded.
///
/// Any order yields a maximum matching; the strategy only decides which
/// one among several of equal size is returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionStrategy {
    /// Smallest vertex identifier first
    #[default]
    LowestId,
    /// Largest vertex identifier first
    HighestId,
}

impl SelectionStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::LowestId => "lowest_id",
            Self::HighestId => "highest_id",
        }
    }
}

impl fmt::Display for SelectionStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SelectionStrategy {
    type Err = AlgorithmError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "lowest_id" => Ok(Self::LowestId),
            "highest_id" => Ok(Self::HighestId),
            _ => Err(AlgorithmError::invalid_parameter(
                "selection_strategy",
                format!("{}. Valid options: lowest_id, highest_id", value),
            )),
        }
    }
}

/// Counters for the most recent run
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MatchingStatistics {
    /// Stages executed, including the final exhausted one
    pub stages: usize,
    pub augmentations: usize,
    pub r_labels: usize,
    pub t_labels: usize,
    pub marks: usize,
    /// Distinct vertices labeled in at least one stage
    pub labeled_vertices: usize,
    pub execution_time_ms: f64,
}

impl MatchingStatistics {
    fn absorb(&mut self, labels: &LabelState) {
        self.r_labels += labels.r_labels.len();
        self.t_labels += labels.t_labels.len();
        self.marks += labels.marked.len();
    }
}

// ═══════════════════════════════════════════════════════════════════════════════════════
// SINGLE-STAGE LABELING SEARCH
// ═══════════════════════════════════════════════════════════════════════════════════════

/// Per-stage label state; rebuilt from scratch every stage
#[derive(Debug, Default)]
struct LabelState {
    r_labels: HashSet<NodeId>,
    t_labels: HashSet<NodeId>,
    marked: HashSet<NodeId>,
    /// R-labeled vertices awaiting expansion
    unmarked: BTreeSet<NodeId>,
    predecessor: HashMap<NodeId, NodeId>,
}

impl LabelState {
    fn next_unmarked(&self, strategy: SelectionStrategy) -> Option<NodeId> {
        match strategy {
            SelectionStrategy::LowestId => self.unmarked.first().copied(),
            SelectionStrategy::HighestId => self.unmarked.last().copied(),
        }
    }
}

struct StageSearch<'a> {
    graph: &'a Graph,
    partition: &'a Partition,
    matching: &'a Matching,
    strategy: SelectionStrategy,
    labels: LabelState,
    tracer: Option<&'a mut ExecutionTracer>,
}

impl<'a> StageSearch<'a> {
    fn new(
        graph: &'a Graph,
        partition: &'a Partition,
        matching: &'a Matching,
        strategy: SelectionStrategy,
        tracer: Option<&'a mut ExecutionTracer>,
    ) -> Self {
        Self {
            graph,
            partition,
            matching,
            strategy,
            labels: LabelState::default(),
            tracer,
        }
    }

    /// Runs one stage; returns an augmenting path if the forest reaches
    /// an unmatched vertex of V.
    fn run(&mut self, stage: usize) -> Option<Vec<NodeId>> {
        let graph = self.graph;
        let matching = self.matching;

        let roots: Vec<NodeId> = self
            .partition
            .u
            .iter()
            .copied()
            .filter(|&node| !matching.has_vertex(node))
            .collect();

        self.emit(TraceEvent::StageStarted {
            stage,
            roots: roots.len(),
        });
        for root in roots {
            self.label_r(root, None);
        }

        while let Some(start) = self.labels.next_unmarked(self.strategy) {
            self.mark(start);

            let candidates: Vec<NodeId> = graph
                .neighbors(start)
                .filter(|&vi| {
                    !matching.is_matched((start, vi)) && !self.labels.t_labels.contains(&vi)
                })
                .collect();

            for vi in candidates {
                self.label_t(vi, start);

                let mut others = graph.neighbors(vi).filter(|&w| w != start).peekable();
                if others.peek().is_none() {
                    trace!("{} is an unmatched leaf below {}", vi, start);
                    return Some(self.backtrack(vi));
                }

                let mut reached_mate = false;
                for w in others {
                    if matching.is_matched((vi, w)) {
                        reached_mate = true;
                        if !self.labels.r_labels.contains(&w) {
                            self.label_r(w, Some(vi));
                        }
                    }
                }

                if !reached_mate {
                    return Some(self.backtrack(vi));
                }
            }
        }

        self.emit(TraceEvent::StageExhausted { stage });
        None
    }

    fn label_r(&mut self, node: NodeId, predecessor: Option<NodeId>) {
        self.labels.r_labels.insert(node);
        self.labels.unmarked.insert(node);
        if let Some(parent) = predecessor {
            self.labels.predecessor.insert(node, parent);
        }
        trace!("R-label {} (predecessor {:?})", node, predecessor);
        self.emit(TraceEvent::RLabel { node, predecessor });
    }

    fn label_t(&mut self, node: NodeId, predecessor: NodeId) {
        self.labels.t_labels.insert(node);
        self.labels.predecessor.insert(node, predecessor);
        trace!("T-label {} (predecessor {})", node, predecessor);
        self.emit(TraceEvent::TLabel { node, predecessor });
    }

    fn mark(&mut self, node: NodeId) {
        self.labels.unmarked.remove(&node);
        self.labels.marked.insert(node);
        trace!("Mark {}", node);
        self.emit(TraceEvent::Mark { node });
    }

    /// Walks predecessors from `end` up to its root
    fn backtrack(&mut self, end: NodeId) -> Vec<NodeId> {
        let mut path = vec![end];
        let mut current = end;
        while let Some(&parent) = self.labels.predecessor.get(&current) {
            path.push(parent);
            current = parent;
        }

        trace!("Backtrack {:?}", path);
        self.emit(TraceEvent::Backtrack { path: path.clone() });
        path
    }

    fn emit(&mut self, event: TraceEvent) {
        if let Some(tracer) = self.tracer.as_deref_mut() {
            tracer.record(event);
        }
    }
}

/// Runs a single labeling stage against `matching` without modifying it.
///
/// Returns `None` exactly when `matching` is maximum.
pub fn find_augmenting_path(
    graph: &Graph,
    partition: &Partition,
    matching: &Matching,
) -> Option<Vec<NodeId>> {
    StageSearch::new(graph, partition, matching, SelectionStrategy::default(), None).run(1)
}

/// Computes a maximum cardinality matching with default settings.
///
/// Fails with `NotBipartite` for graphs with an odd cycle and for
/// disconnected graphs.
pub fn maximum_cardinality_matching(graph: &Graph) -> Result<Matching, AlgorithmError> {
    AugmentingPathMatcher::new().find_maximum_matching(graph)
}

// ═══════════════════════════════════════════════════════════════════════════════════════
// MATCHER
// ═══════════════════════════════════════════════════════════════════════════════════════

/// Configurable augmenting-path matcher
///
/// Parameters:
/// - `selection_strategy`: `lowest_id` (default) or `highest_id`
/// - `verify_result`: `true` (default) runs the post-condition checks on
///   the final matching. `false` skips them and is meant for diagnostics
///   only; a defective result is then returned as is.
#[derive(Debug, Clone)]
pub struct AugmentingPathMatcher {
    parameters: HashMap<String, String>,
    strategy: SelectionStrategy,
    verify_result: bool,
    statistics: MatchingStatistics,
}

impl AugmentingPathMatcher {
    pub fn new() -> Self {
        Self::with_strategy(SelectionStrategy::default())
    }

    pub fn with_strategy(strategy: SelectionStrategy) -> Self {
        let mut parameters = HashMap::new();
        parameters.insert("selection_strategy".to_string(), strategy.as_str().to_string());
        parameters.insert("verify_result".to_string(), "true".to_string());

        Self {
            parameters,
            strategy,
            verify_result: true,
            statistics: MatchingStatistics::default(),
        }
    }

    pub fn strategy(&self) -> SelectionStrategy {
        self.strategy
    }

    /// Statistics of the most recent run
    pub fn statistics(&self) -> &MatchingStatistics {
        &self.statistics
    }

    /// Partitions `graph` and computes a maximum matching
    pub fn find_maximum_matching(&mut self, graph: &Graph) -> Result<Matching, AlgorithmError> {
        self.find_maximum_matching_traced(graph, None)
    }

    pub fn find_maximum_matching_traced(
        &mut self,
        graph: &Graph,
        tracer: Option<&mut ExecutionTracer>,
    ) -> Result<Matching, AlgorithmError> {
        let partition = partition(graph)?;
        self.match_partitioned(graph, &partition, tracer)
    }

    /// Computes a maximum matching using a caller-supplied partition.
    ///
    /// The partition must be valid for `graph`; it is not re-checked.
    pub fn match_partitioned(
        &mut self,
        graph: &Graph,
        partition: &Partition,
        mut tracer: Option<&mut ExecutionTracer>,
    ) -> Result<Matching, AlgorithmError> {
        let start_time = Instant::now();
        self.statistics = MatchingStatistics::default();
        let mut matching = Matching::new();
        let mut labeled: HashSet<NodeId> = HashSet::new();

        loop {
            self.statistics.stages += 1;
            let stage = self.statistics.stages;

            let path = {
                let mut search = StageSearch::new(
                    graph,
                    partition,
                    &matching,
                    self.strategy,
                    tracer.as_deref_mut(),
                );
                let path = search.run(stage);
                self.statistics.absorb(&search.labels);
                labeled.extend(&search.labels.r_labels);
                labeled.extend(&search.labels.t_labels);
                path
            };

            let Some(path) = path else {
                debug!(
                    "Stage {}: no augmenting path, matching of size {} is maximum",
                    stage,
                    matching.size()
                );
                break;
            };

            matching.augment(&path);
            self.statistics.augmentations += 1;
            debug!(
                "Stage {}: augmented along {:?}, size now {}",
                stage,
                path,
                matching.size()
            );

            if let Some(tracer) = tracer.as_deref_mut() {
                tracer.record(TraceEvent::Augment {
                    path,
                    size: matching.size(),
                });
            }
        }

        self.statistics.labeled_vertices = labeled.len();

        if self.verify_result {
            self.verify(graph, partition, &matching)?;
        }

        self.statistics.execution_time_ms = start_time.elapsed().as_secs_f64() * 1000.0;
        Ok(matching)
    }

    /// Post-condition checks; any failure is a defect in the search
    fn verify(
        &self,
        graph: &Graph,
        partition: &Partition,
        matching: &Matching,
    ) -> Result<(), AlgorithmError> {
        matching.validate()?;

        if let Some((i, j)) = matching.to_a().into_iter().find(|&(i, j)| !graph.has_edge(i, j)) {
            return Err(AlgorithmError::InternalConsistency(format!(
                "matched pair ({}, {}) is not an edge of the graph",
                i, j
            )));
        }

        if matching.size() > partition.max_matching_size() {
            return Err(AlgorithmError::InternalConsistency(format!(
                "matching size {} exceeds min(|U|, |V|) = {}",
                matching.size(),
                partition.max_matching_size()
            )));
        }

        Ok(())
    }
}

impl Default for AugmentingPathMatcher {
    fn default() -> Self {
        Self::new()
    }
}

// ═══════════════════════════════════════════════════════════════════════════════════════
// ALGORITHM TRAIT IMPLEMENTATION
// ═══════════════════════════════════════════════════════════════════════════════════════

impl Algorithm for AugmentingPathMatcher {
    fn name(&self) -> &str {
        "Augmenting-Path Maximum Cardinality Bipartite Matching"
    }

    fn category(&self) -> &str {
        "graph_matching"
    }

    fn description(&self) -> &str {
        "Maximum cardinality matching for connected bipartite graphs. \
         Two-colors the graph by breadth-first search, then repeatedly grows an \
         alternating forest from the unmatched vertices of one class and augments \
         along the first path that reaches an unmatched vertex of the other class."
    }

    fn complexity(&self) -> AlgorithmComplexity {
        AlgorithmComplexity {
            time_complexity: "O(V * E)".to_string(),
            space_complexity: "O(V + E)".to_string(),
            best_case: "O(V + E)".to_string(),
            worst_case: "O(V * E)".to_string(),
        }
    }

    fn set_parameter(&mut self, name: &str, value: &str) -> Result<(), AlgorithmError> {
        match name {
            "selection_strategy" => {
                self.strategy = value.parse()?;
            }
            "verify_result" => {
                self.verify_result = value.parse::<bool>().map_err(|_| {
                    AlgorithmError::invalid_parameter(
                        name,
                        format!("{}. Valid options: true, false", value),
                    )
                })?;
            }
            _ => {
                return Err(AlgorithmError::invalid_parameter(
                    name,
                    "Unknown parameter. Valid parameters: selection_strategy, verify_result",
                ))
            }
        }

        self.parameters.insert(name.to_string(), value.to_string());
        Ok(())
    }

    fn get_parameter(&self, name: &str) -> Option<&str> {
        self.parameters.get(name).map(|s| s.as_str())
    }

    fn get_parameters(&self) -> HashMap<String, String> {
        self.parameters.clone()
    }

    fn execute_with_tracing(
        &mut self,
        graph: &Graph,
        tracer: &mut ExecutionTracer,
    ) -> Result<AlgorithmResult, AlgorithmError> {
        let matching = self.find_maximum_matching_traced(graph, Some(&mut *tracer))?;

        tracer.record_statistics("matching_statistics", &self.statistics);
        tracer.record_statistics("matching", &matching);

        let mut data = HashMap::new();
        data.insert("matching_size".to_string(), matching.size().to_string());
        data.insert("matching".to_string(), matching.to_string());
        data.insert("stages".to_string(), self.statistics.stages.to_string());
        data.insert(
            "augmentations".to_string(),
            self.statistics.augmentations.to_string(),
        );

        Ok(AlgorithmResult {
            steps: self.statistics.stages,
            nodes_visited: self.statistics.labeled_vertices,
            execution_time_ms: self.statistics.execution_time_ms,
            data,
        })
    }
}

// ═══════════════════════════════════════════════════════════════════════════════════════
// UNIT TESTS WITH PROPERTY-BASED VERIFICATION
// ═══════════════════════════════════════════════════════════════════════════════════════
