// src/config/model.rs

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::model::{
    ListTask, ParamValue, Task, TaskGraph, TaskParam, TaskRef, TaskResourceBinding,
};
use crate::session::EditRequest;

/// Pipeline file as read from TOML, before validation.
///
/// ```toml
/// [task.fetch]
/// task_ref = { name = "git-clone", scope = "global" }
///
/// [task.fetch.params]
/// url = "https://example.com/repo.git"
///
/// [task.build]
/// task_ref = { name = "buildah" }
/// run_after = ["fetch"]
///
/// [list_task.placeholder-1]
/// run_after = ["build"]
/// ```
///
/// All sections are optional; an empty file is the empty seed graph.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RawPipelineFile {
    /// Resolved tasks from `[task.<name>]`.
    #[serde(default)]
    pub task: BTreeMap<String, RawTaskEntry>,

    /// Placeholders from `[list_task.<name>]`.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub list_task: BTreeMap<String, RawListTaskEntry>,
}

/// `[task.<name>]` section.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RawTaskEntry {
    pub task_ref: TaskRef,

    /// Dependency list: this task waits for all nodes listed here.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub run_after: Vec<String>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub params: BTreeMap<String, ParamValue>,

    /// Resource slot name -> bound resource name.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub resources: BTreeMap<String, String>,
}

/// `[list_task.<name>]` section.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RawListTaskEntry {
    #[serde(default)]
    pub run_after: Vec<String>,
}

impl RawPipelineFile {
    /// Convert into a graph without checking any invariant.
    ///
    /// Declared parameter defaults are not known from the file alone, so
    /// loaded parameters carry their value only.
    pub fn into_graph_unchecked(self) -> TaskGraph {
        let tasks = self
            .task
            .into_iter()
            .map(|(name, entry)| Task {
                name,
                run_after: entry.run_after,
                task_ref: entry.task_ref,
                params: entry
                    .params
                    .into_iter()
                    .map(|(name, value)| TaskParam {
                        name,
                        value: Some(value),
                        default: None,
                    })
                    .collect(),
                resources: entry
                    .resources
                    .into_iter()
                    .map(|(name, resource)| TaskResourceBinding {
                        name,
                        resource: Some(resource),
                    })
                    .collect(),
            })
            .collect();

        let list_tasks = self
            .list_task
            .into_iter()
            .map(|(name, entry)| ListTask::new(name, entry.run_after))
            .collect();

        TaskGraph::new(tasks, list_tasks)
    }
}

/// Ordered list of edits read from an edit script.
///
/// ```toml
/// [[edit]]
/// op = "insert"
/// direction = "after"
/// related = "build"
///
/// [[edit]]
/// op = "resolve"
/// placeholder = "placeholder-1"
/// task = "kubectl-deploy"
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EditScript {
    #[serde(default)]
    pub edit: Vec<EditRequest>,
}
