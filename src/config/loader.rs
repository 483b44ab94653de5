// src/config/loader.rs

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::config::model::{EditScript, RawPipelineFile};
use crate::errors::Result;
use crate::model::TaskGraph;
use crate::session::EditRequest;

/// Load a pipeline file from a given path and return the raw `RawPipelineFile`.
///
/// This only performs TOML deserialization; it does **not** check graph
/// invariants. Use [`load_and_validate`] for that.
pub fn load_from_path(path: impl AsRef<Path>) -> Result<RawPipelineFile> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)?;

    let pipeline: RawPipelineFile = toml::from_str(&contents)?;

    Ok(pipeline)
}

/// Load a pipeline file and validate it into a [`TaskGraph`].
///
/// Checks for:
/// - names declared both as task and list task,
/// - unknown or self `run_after` references,
/// - cycles.
pub fn load_and_validate(path: impl AsRef<Path>) -> Result<TaskGraph> {
    let raw = load_from_path(&path)?;
    let graph = TaskGraph::try_from(raw)?;
    debug!(
        path = %path.as_ref().display(),
        tasks = graph.tasks.len(),
        list_tasks = graph.list_tasks.len(),
        "pipeline loaded"
    );
    Ok(graph)
}

/// Load an ordered list of edit requests.
pub fn load_edit_script(path: impl AsRef<Path>) -> Result<Vec<EditRequest>> {
    let contents = fs::read_to_string(path.as_ref())?;
    let script: EditScript = toml::from_str(&contents)?;
    Ok(script.edit)
}
