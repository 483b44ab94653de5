// src/model/task.rs

//! Graph node value types: resolved tasks and placeholder list tasks.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Canonical node name type used throughout the crate.
pub type TaskName = String;

/// Where a task definition lives in the catalog.
///
/// - `Local`: a namespaced task definition.
/// - `Global`: a cluster-wide task definition.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum TaskScope {
    #[default]
    Local,
    Global,
}

impl FromStr for TaskScope {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "local" => Ok(TaskScope::Local),
            "global" => Ok(TaskScope::Global),
            other => Err(format!(
                "invalid task scope: {other} (expected \"local\" or \"global\")"
            )),
        }
    }
}

impl fmt::Display for TaskScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TaskScope::Local => f.write_str("local"),
            TaskScope::Global => f.write_str("global"),
        }
    }
}

/// Reference from a task to the definition backing it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TaskRef {
    pub name: String,
    #[serde(default)]
    pub scope: TaskScope,
}

impl TaskRef {
    pub fn new(name: impl Into<String>, scope: TaskScope) -> Self {
        Self {
            name: name.into(),
            scope,
        }
    }
}

/// Value of a task parameter: either a single string or a list of strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    String(String),
    Array(Vec<String>),
}

impl From<&str> for ParamValue {
    fn from(s: &str) -> Self {
        ParamValue::String(s.to_string())
    }
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::String(s) => f.write_str(s),
            ParamValue::Array(items) => write!(f, "[{}]", items.join(", ")),
        }
    }
}

/// A parameter slot on a resolved task.
///
/// `value == None` means "required, not yet supplied".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskParam {
    pub name: String,
    pub value: Option<ParamValue>,
    /// Default declared by the backing definition, if any.
    pub default: Option<ParamValue>,
}

impl TaskParam {
    pub fn is_missing(&self) -> bool {
        self.value.is_none()
    }

    /// `true` when the value is just the declared default and need not be persisted.
    pub fn is_default_only(&self) -> bool {
        self.value.is_some() && self.value == self.default
    }
}

/// A resource slot on a resolved task; `resource == None` means unbound.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskResourceBinding {
    pub name: String,
    pub resource: Option<String>,
}

/// A node that has been resolved to a backing task definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    pub name: TaskName,
    /// Predecessors; empty means the task may run immediately.
    pub run_after: Vec<TaskName>,
    pub task_ref: TaskRef,
    pub params: Vec<TaskParam>,
    pub resources: Vec<TaskResourceBinding>,
}

impl Task {
    pub fn new(name: impl Into<TaskName>, task_ref: TaskRef, run_after: Vec<TaskName>) -> Self {
        Self {
            name: name.into(),
            run_after,
            task_ref,
            params: Vec::new(),
            resources: Vec::new(),
        }
    }

    pub fn param(&self, name: &str) -> Option<&TaskParam> {
        self.params.iter().find(|p| p.name == name)
    }
}

/// A placeholder node waiting to be resolved into a [`Task`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListTask {
    pub name: TaskName,
    pub run_after: Vec<TaskName>,
}

impl ListTask {
    pub fn new(name: impl Into<TaskName>, run_after: Vec<TaskName>) -> Self {
        Self {
            name: name.into(),
            run_after,
        }
    }
}

/// The part of a node the graph engine cares about.
///
/// Both [`Task`] and [`ListTask`] implement this, so reference rewriting can
/// treat the two collections uniformly.
pub trait GraphNode {
    fn name(&self) -> &str;
    fn set_name(&mut self, name: TaskName);
    fn run_after(&self) -> &[TaskName];
    fn run_after_mut(&mut self) -> &mut Vec<TaskName>;
}

impl GraphNode for Task {
    fn name(&self) -> &str {
        &self.name
    }

    fn set_name(&mut self, name: TaskName) {
        self.name = name;
    }

    fn run_after(&self) -> &[TaskName] {
        &self.run_after
    }

    fn run_after_mut(&mut self) -> &mut Vec<TaskName> {
        &mut self.run_after
    }
}

impl GraphNode for ListTask {
    fn name(&self) -> &str {
        &self.name
    }

    fn set_name(&mut self, name: TaskName) {
        self.name = name;
    }

    fn run_after(&self) -> &[TaskName] {
        &self.run_after
    }

    fn run_after_mut(&mut self) -> &mut Vec<TaskName> {
        &mut self.run_after
    }
}
