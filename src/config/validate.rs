// src/config/validate.rs

use crate::config::model::RawPipelineFile;
use crate::errors::{BuilderError, Result};
use crate::model::{is_reserved_name, TaskGraph};

impl TryFrom<RawPipelineFile> for TaskGraph {
    type Error = BuilderError;

    fn try_from(raw: RawPipelineFile) -> std::result::Result<Self, Self::Error> {
        validate_raw_pipeline(&raw)?;
        let graph = raw.into_graph_unchecked();
        // Cycles, plus anything the raw checks above let through.
        graph.check_integrity()?;
        Ok(graph)
    }
}

/// Checks that need the file's section structure for a useful message.
pub fn validate_raw_pipeline(cfg: &RawPipelineFile) -> Result<()> {
    validate_section_names(cfg)?;
    validate_run_after(cfg)?;
    Ok(())
}

fn validate_section_names(cfg: &RawPipelineFile) -> Result<()> {
    for name in cfg.task.keys() {
        if cfg.list_task.contains_key(name) {
            return Err(BuilderError::ConfigError(format!(
                "'{}' is declared both as [task.{}] and [list_task.{}]",
                name, name, name
            )));
        }
    }

    for name in cfg.task.keys().chain(cfg.list_task.keys()) {
        if name.trim().is_empty() {
            return Err(BuilderError::ConfigError(
                "node names must not be empty".to_string(),
            ));
        }
        if is_reserved_name(name) {
            return Err(BuilderError::ConfigError(format!(
                "node name '{}' must not contain '~'",
                name
            )));
        }
    }

    Ok(())
}

fn validate_run_after(cfg: &RawPipelineFile) -> Result<()> {
    let declared = |dep: &String| cfg.task.contains_key(dep) || cfg.list_task.contains_key(dep);

    let entries = cfg
        .task
        .iter()
        .map(|(name, t)| (name, &t.run_after))
        .chain(cfg.list_task.iter().map(|(name, lt)| (name, &lt.run_after)));

    for (name, run_after) in entries {
        for (i, dep) in run_after.iter().enumerate() {
            if run_after[..i].contains(dep) {
                return Err(BuilderError::ConfigError(format!(
                    "'{}' lists '{}' more than once in `run_after`",
                    name, dep
                )));
            }
            if dep == name {
                return Err(BuilderError::ConfigError(format!(
                    "'{}' cannot depend on itself in `run_after`",
                    name
                )));
            }
            if !declared(dep) {
                return Err(BuilderError::ConfigError(format!(
                    "'{}' has unknown dependency '{}' in `run_after`",
                    name, dep
                )));
            }
        }
    }

    Ok(())
}
