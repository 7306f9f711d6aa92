//! Execution observation for algorithm runs

pub mod tracer;

pub use self::tracer::{ExecutionTracer, TraceEvent};
