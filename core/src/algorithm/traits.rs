//! Core algorithm trait definitions for the bimatch library
//!
//! This module establishes the shared vocabulary of the algorithm layer:
//! vertex and edge identifiers, the error taxonomy, execution results and
//! the `Algorithm` trait through which configurable solvers expose their
//! parameters and traced execution.
//!
//! # Key Design Principles
//! - String-keyed parameters validated at the point of assignment
//! - Fallible operations return `Result<_, AlgorithmError>`
//! - Optional tracing never changes an algorithm's output

use std::collections::HashMap;
use std::fmt::Debug;

use serde::{Deserialize, Serialize};

use crate::data_structures::graph::Graph;
use crate::execution::tracer::ExecutionTracer;

/// Vertex identifier in `[0, n)`
pub type NodeId = usize;

/// Unordered pair of distinct vertex identifiers
pub type Edge = (NodeId, NodeId);

/// Error types for algorithm operations
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AlgorithmError {
    #[error("Graph is not bipartite: {0}")]
    NotBipartite(String),

    #[error("Internal consistency failure: {0}")]
    InternalConsistency(String),

    #[error("Invalid parameter: {name} - {reason}")]
    InvalidParameter { name: String, reason: String },

    #[error("Invalid node: {0}")]
    InvalidNode(NodeId),
}

impl AlgorithmError {
    pub(crate) fn invalid_parameter(name: &str, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name: name.to_string(),
            reason: reason.into(),
        }
    }
}

/// Algorithm complexity information
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlgorithmComplexity {
    pub time_complexity: String,
    pub space_complexity: String,
    pub best_case: String,
    pub worst_case: String,
}

/// Summary of a traced execution
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlgorithmResult {
    /// Outer-loop iterations performed
    pub steps: usize,
    /// Distinct vertices that received at least one label
    pub nodes_visited: usize,
    pub execution_time_ms: f64,
    /// Algorithm-specific key/value output
    pub data: HashMap<String, String>,
}

/// Main algorithm trait
///
/// # Invariants
/// - State isolation between runs
/// - Tracing is observational only
pub trait Algorithm: Debug + Send + Sync {
    /// Returns the algorithm's descriptive name
    fn name(&self) -> &str;

    /// Returns the algorithm's category (e.g., graph_matching)
    fn category(&self) -> &str;

    /// Returns the algorithm's description
    fn description(&self) -> &str;

    /// Returns the algorithm's asymptotic complexity in Big-O notation
    fn complexity(&self) -> AlgorithmComplexity;

    /// Sets algorithm parameter with validation
    fn set_parameter(&mut self, name: &str, value: &str) -> Result<(), AlgorithmError>;

    /// Gets algorithm parameter value
    fn get_parameter(&self, name: &str) -> Option<&str>;

    /// Returns a copy of every parameter
    fn get_parameters(&self) -> HashMap<String, String>;

    /// Executes the algorithm, recording its steps in `tracer`
    fn execute_with_tracing(
        &mut self,
        graph: &Graph,
        tracer: &mut ExecutionTracer,
    ) -> Result<AlgorithmResult, AlgorithmError>;
}
