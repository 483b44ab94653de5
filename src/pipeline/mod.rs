// src/pipeline/mod.rs

//! Save-time boundary: validation and conversion into the persisted form.
//!
//! - [`validation`] accumulates per-node issues.
//! - [`persist`] turns a valid graph into a [`PipelineSpec`].

pub mod persist;
pub mod validation;

pub use persist::{to_pipeline_spec, PipelineSpec, PipelineTask};
pub use validation::{is_valid_task_name, validate_graph, NodeIssue, ValidationReport};
