// src/pipeline/persist.rs

//! Conversion of the editable graph into what gets persisted.
//!
//! Only resolved tasks are persisted: placeholders are excluded, `run_after`
//! entries naming a placeholder are dropped, and parameters still holding
//! just their declared default are trimmed.

use std::collections::BTreeMap;

use tracing::debug;

use crate::config::model::{RawPipelineFile, RawTaskEntry};
use crate::errors::Result;
use crate::model::{ParamValue, TaskGraph, TaskName, TaskRef};
use crate::pipeline::validation::{validate_graph, ValidationReport};

/// A task as persisted to the pipeline resource.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineTask {
    pub name: TaskName,
    pub task_ref: TaskRef,
    pub run_after: Vec<TaskName>,
    pub params: BTreeMap<String, ParamValue>,
    pub resources: BTreeMap<String, String>,
}

/// The persisted pipeline: resolved tasks only.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PipelineSpec {
    pub tasks: Vec<PipelineTask>,
}

impl PipelineSpec {
    pub fn task(&self, name: &str) -> Option<&PipelineTask> {
        self.tasks.iter().find(|t| t.name == name)
    }

    /// Render in the same TOML shape the pipeline loader reads.
    pub fn to_toml(&self) -> Result<String> {
        let raw = RawPipelineFile::from(self);
        Ok(toml::to_string(&raw)?)
    }
}

impl From<&PipelineSpec> for RawPipelineFile {
    fn from(spec: &PipelineSpec) -> Self {
        let task = spec
            .tasks
            .iter()
            .map(|t| {
                let entry = RawTaskEntry {
                    task_ref: t.task_ref.clone(),
                    run_after: t.run_after.clone(),
                    params: t.params.clone(),
                    resources: t.resources.clone(),
                };
                (t.name.clone(), entry)
            })
            .collect();

        RawPipelineFile {
            task,
            list_task: BTreeMap::new(),
        }
    }
}

/// Validate `graph` and convert it for persistence.
///
/// Returns the accumulated per-node issues if anything blocks saving.
pub fn to_pipeline_spec(graph: &TaskGraph) -> std::result::Result<PipelineSpec, ValidationReport> {
    let report = validate_graph(graph);
    if !report.is_valid() {
        return Err(report);
    }

    let tasks = graph
        .tasks
        .iter()
        .map(|task| {
            let run_after = task
                .run_after
                .iter()
                .filter(|dep| graph.task(dep).is_some())
                .cloned()
                .collect();

            let params = task
                .params
                .iter()
                .filter(|p| !p.is_default_only())
                .filter_map(|p| p.value.clone().map(|v| (p.name.clone(), v)))
                .collect();

            let resources = task
                .resources
                .iter()
                .filter_map(|r| r.resource.clone().map(|res| (r.name.clone(), res)))
                .collect();

            PipelineTask {
                name: task.name.clone(),
                task_ref: task.task_ref.clone(),
                run_after,
                params,
                resources,
            }
        })
        .collect::<Vec<_>>();

    debug!(tasks = tasks.len(), "converted graph into pipeline spec");
    Ok(PipelineSpec { tasks })
}
