//! Execution tracing for algorithm introspection
//!
//! An `ExecutionTracer` is an optional observer attached to an algorithm
//! run. It records one `TraceEvent` per labeling, marking, backtracking
//! and augmentation step, plus named statistics snapshots. Attaching a
//! tracer never changes what an algorithm computes.
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::algorithm::traits::NodeId;

/// A single observable step of the labeling search
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TraceEvent {
    /// Stage `stage` began with `roots` unmatched U-vertices
    StageStarted { stage: usize, roots: usize },
    /// Vertex received an R-label from `predecessor` (None for a root)
    RLabel { node: NodeId, predecessor: Option<NodeId> },
    /// Vertex received a T-label from `predecessor`
    TLabel { node: NodeId, predecessor: NodeId },
    /// R-labeled vertex selected for expansion
    Mark { node: NodeId },
    /// Predecessor chain walked from an unmatched T-vertex
    Backtrack { path: Vec<NodeId> },
    /// Matching grew along `path` to `size`
    Augment { path: Vec<NodeId>, size: usize },
    /// Stage finished without finding an augmenting path
    StageExhausted { stage: usize },
}

/// Collects trace events and statistics for one or more executions
#[derive(Debug, Clone, Default)]
pub struct ExecutionTracer {
    events: Vec<TraceEvent>,
    statistics: HashMap<String, serde_json::Value>,
}

impl ExecutionTracer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, event: TraceEvent) {
        self.events.push(event);
    }

    /// Stores a serialized snapshot of `value` under `name`.
    ///
    /// Values that fail to serialize are logged and skipped.
    pub fn record_statistics<T: Serialize>(&mut self, name: &str, value: &T) {
        match serde_json::to_value(value) {
            Ok(json) => {
                self.statistics.insert(name.to_string(), json);
            }
            Err(err) => log::warn!("Dropping statistics {}: {}", name, err),
        }
    }

    pub fn events(&self) -> &[TraceEvent] {
        &self.events
    }

    pub fn statistics(&self, name: &str) -> Option<&serde_json::Value> {
        self.statistics.get(name)
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn clear(&mut self) {
        self.events.clear();
        self.statistics.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tracer_records_in_order() {
        let mut tracer = ExecutionTracer::new();
        assert!(tracer.is_empty());

        tracer.record(TraceEvent::Mark { node: 0 });
        tracer.record(TraceEvent::TLabel { node: 3, predecessor: 0 });

        assert_eq!(tracer.len(), 2);
        assert_eq!(tracer.events()[0], TraceEvent::Mark { node: 0 });
    }

    #[test]
    fn test_statistics_snapshot() {
        let mut tracer = ExecutionTracer::new();
        tracer.record_statistics("counts", &vec![1, 2, 3]);

        assert_eq!(tracer.statistics("counts"), Some(&serde_json::json!([1, 2, 3])));
        assert!(tracer.statistics("missing").is_none());

        tracer.clear();
        assert!(tracer.statistics("counts").is_none());
    }
}
