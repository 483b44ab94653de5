// src/catalog/definition.rs

use serde::Deserialize;

use crate::model::{ParamValue, Task, TaskName, TaskParam, TaskRef, TaskResourceBinding, TaskScope};

/// A parameter declared by a task definition.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ParamSpec {
    pub name: String,
    /// Declared default; `None` means the parameter is required.
    #[serde(default)]
    pub default: Option<ParamValue>,
    #[serde(default)]
    pub description: Option<String>,
}

/// A resource slot declared by a task definition (e.g. a git repo or image).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ResourceSpec {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
}

/// A reusable task definition offered by the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TaskDefinition {
    pub name: String,
    /// Filled in from the catalog section the definition was listed under.
    #[serde(default)]
    pub scope: TaskScope,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub params: Vec<ParamSpec>,
    #[serde(default)]
    pub resources: Vec<ResourceSpec>,
}

impl TaskDefinition {
    pub fn new(name: impl Into<String>, scope: TaskScope) -> Self {
        Self {
            name: name.into(),
            scope,
            description: None,
            params: Vec::new(),
            resources: Vec::new(),
        }
    }

    pub fn task_ref(&self) -> TaskRef {
        TaskRef::new(self.name.clone(), self.scope)
    }

    /// Build a task backed by this definition.
    ///
    /// Parameter values are pre-filled from declared defaults; parameters
    /// without a default stay unset. Resources start unbound.
    pub fn to_task(&self, name: TaskName, run_after: Vec<TaskName>) -> Task {
        let params = self
            .params
            .iter()
            .map(|spec| TaskParam {
                name: spec.name.clone(),
                value: spec.default.clone(),
                default: spec.default.clone(),
            })
            .collect();

        let resources = self
            .resources
            .iter()
            .map(|spec| TaskResourceBinding {
                name: spec.name.clone(),
                resource: None,
            })
            .collect();

        Task {
            name,
            run_after,
            task_ref: self.task_ref(),
            params,
            resources,
        }
    }
}
