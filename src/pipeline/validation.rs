// src/pipeline/validation.rs

//! Per-node validation of a task graph.
//!
//! Issues are accumulated per node and never abort editing; they only block
//! persisting the pipeline.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

use crate::model::{TaskGraph, TaskName};

/// Longest name accepted for a task (DNS-1123 label).
pub const MAX_TASK_NAME_LEN: usize = 63;

static TASK_NAME_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-z0-9]([-a-z0-9]*[a-z0-9])?$").expect("task name regex is valid")
});

/// `true` if `name` is a lowercase DNS-1123 label of at most 63 characters.
pub fn is_valid_task_name(name: &str) -> bool {
    name.len() <= MAX_TASK_NAME_LEN && TASK_NAME_RE.is_match(name)
}

/// A problem with one node that blocks saving.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NodeIssue {
    #[error("no task has been selected for this placeholder")]
    UnresolvedPlaceholder,

    #[error("required parameter '{0}' has no value")]
    MissingRequiredParam(String),

    #[error("resource '{0}' is not bound")]
    UnboundResource(String),

    #[error("'{0}' is not a valid task name")]
    InvalidName(String),
}

/// Validation issues keyed by node name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    issues: BTreeMap<TaskName, Vec<NodeIssue>>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.issues.is_empty()
    }

    /// Total number of issues across all nodes.
    pub fn len(&self) -> usize {
        self.issues.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }

    pub fn push(&mut self, node: &str, issue: NodeIssue) {
        self.issues.entry(node.to_string()).or_default().push(issue);
    }

    pub fn issues_for(&self, node: &str) -> &[NodeIssue] {
        self.issues.get(node).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[NodeIssue])> {
        self.issues.iter().map(|(name, issues)| (name.as_str(), issues.as_slice()))
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (node, issues) in self.iter() {
            for issue in issues {
                if !first {
                    f.write_str("; ")?;
                }
                write!(f, "{node}: {issue}")?;
                first = false;
            }
        }
        Ok(())
    }
}

/// Collect every save-blocking issue in `graph`.
pub fn validate_graph(graph: &TaskGraph) -> ValidationReport {
    let mut report = ValidationReport::default();

    for task in &graph.tasks {
        if !is_valid_task_name(&task.name) {
            report.push(&task.name, NodeIssue::InvalidName(task.name.clone()));
        }
        for param in task.params.iter().filter(|p| p.is_missing()) {
            report.push(&task.name, NodeIssue::MissingRequiredParam(param.name.clone()));
        }
        for resource in task.resources.iter().filter(|r| r.resource.is_none()) {
            report.push(&task.name, NodeIssue::UnboundResource(resource.name.clone()));
        }
    }

    for list_task in &graph.list_tasks {
        report.push(&list_task.name, NodeIssue::UnresolvedPlaceholder);
    }

    report
}
