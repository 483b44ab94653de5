#![allow(dead_code)]

use pipeline_builder::catalog::{AvailableTasks, ParamSpec, ResourceSpec, TaskDefinition};
use pipeline_builder::model::{
    ListTask, ParamValue, Task, TaskGraph, TaskParam, TaskRef, TaskResourceBinding, TaskScope,
};

fn names(run_after: &[&str]) -> Vec<String> {
    run_after.iter().map(|s| s.to_string()).collect()
}

/// Builder for `TaskGraph` to simplify test setup.
///
/// Nodes are kept in insertion order. `build()` does not check integrity;
/// use `build_checked()` when the graph must be well-formed.
pub struct GraphBuilder {
    graph: TaskGraph,
}

impl GraphBuilder {
    pub fn new() -> Self {
        Self {
            graph: TaskGraph::default(),
        }
    }

    /// Add a fully resolved task with no params or resources.
    pub fn task(mut self, name: &str, run_after: &[&str]) -> Self {
        self.graph
            .tasks
            .push(TaskBuilder::new(name).run_after(run_after).build());
        self
    }

    pub fn with_task(mut self, task: Task) -> Self {
        self.graph.tasks.push(task);
        self
    }

    /// Add a placeholder.
    pub fn list_task(mut self, name: &str, run_after: &[&str]) -> Self {
        self.graph.list_tasks.push(ListTask::new(name, names(run_after)));
        self
    }

    pub fn build(self) -> TaskGraph {
        self.graph
    }

    pub fn build_checked(self) -> TaskGraph {
        self.graph
            .check_integrity()
            .expect("builder produced an invalid graph");
        self.graph
    }
}

impl Default for GraphBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for `Task`.
pub struct TaskBuilder {
    task: Task,
}

impl TaskBuilder {
    /// A local task whose definition shares its name.
    pub fn new(name: &str) -> Self {
        Self {
            task: Task::new(name, TaskRef::new(name, TaskScope::Local), Vec::new()),
        }
    }

    pub fn task_ref(mut self, name: &str, scope: TaskScope) -> Self {
        self.task.task_ref = TaskRef::new(name, scope);
        self
    }

    pub fn run_after(mut self, run_after: &[&str]) -> Self {
        self.task.run_after = names(run_after);
        self
    }

    pub fn param(mut self, name: &str, value: &str) -> Self {
        self.task.params.push(TaskParam {
            name: name.to_string(),
            value: Some(ParamValue::from(value)),
            default: None,
        });
        self
    }

    /// A required parameter that has not been given a value.
    pub fn missing_param(mut self, name: &str) -> Self {
        self.task.params.push(TaskParam {
            name: name.to_string(),
            value: None,
            default: None,
        });
        self
    }

    /// A parameter still holding its declared default.
    pub fn default_param(mut self, name: &str, default: &str) -> Self {
        self.task.params.push(TaskParam {
            name: name.to_string(),
            value: Some(ParamValue::from(default)),
            default: Some(ParamValue::from(default)),
        });
        self
    }

    pub fn resource(mut self, name: &str, resource: Option<&str>) -> Self {
        self.task.resources.push(TaskResourceBinding {
            name: name.to_string(),
            resource: resource.map(str::to_string),
        });
        self
    }

    pub fn build(self) -> Task {
        self.task
    }
}

/// Builder for catalog `TaskDefinition`s.
pub struct DefinitionBuilder {
    def: TaskDefinition,
}

impl DefinitionBuilder {
    pub fn local(name: &str) -> Self {
        Self {
            def: TaskDefinition::new(name, TaskScope::Local),
        }
    }

    pub fn global(name: &str) -> Self {
        Self {
            def: TaskDefinition::new(name, TaskScope::Global),
        }
    }

    pub fn required_param(mut self, name: &str) -> Self {
        self.def.params.push(ParamSpec {
            name: name.to_string(),
            default: None,
            description: None,
        });
        self
    }

    pub fn param_with_default(mut self, name: &str, default: &str) -> Self {
        self.def.params.push(ParamSpec {
            name: name.to_string(),
            default: Some(ParamValue::from(default)),
            description: None,
        });
        self
    }

    pub fn resource(mut self, name: &str, kind: &str) -> Self {
        self.def.resources.push(ResourceSpec {
            name: name.to_string(),
            kind: kind.to_string(),
        });
        self
    }

    pub fn build(self) -> TaskDefinition {
        self.def
    }
}

/// Catalog with the given definitions, split by their scope.
pub fn catalog_of(defs: Vec<TaskDefinition>) -> AvailableTasks {
    let (local, global): (Vec<_>, Vec<_>) = defs
        .into_iter()
        .partition(|d| d.scope == TaskScope::Local);
    AvailableTasks { local, global }
}
