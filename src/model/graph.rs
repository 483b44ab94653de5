// src/model/graph.rs

use std::collections::HashSet;

use petgraph::algo::toposort;
use petgraph::graphmap::DiGraphMap;

use crate::errors::GraphDefect;
use crate::model::naming::is_reserved_name;
use crate::model::task::{GraphNode, ListTask, Task, TaskName};

/// The editable pipeline graph: resolved tasks plus placeholder list tasks.
///
/// Every node of either collection is a vertex; each `run_after` entry `B` on
/// node `A` is an edge `B -> A`. Edges cross the two collections freely.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskGraph {
    pub tasks: Vec<Task>,
    pub list_tasks: Vec<ListTask>,
}

impl TaskGraph {
    pub fn new(tasks: Vec<Task>, list_tasks: Vec<ListTask>) -> Self {
        Self { tasks, list_tasks }
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty() && self.list_tasks.is_empty()
    }

    /// Total number of nodes across both collections.
    pub fn len(&self) -> usize {
        self.tasks.len() + self.list_tasks.len()
    }

    /// All node names, tasks first.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.nodes().map(|n| n.name())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names().any(|n| n == name)
    }

    pub fn task(&self, name: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.name == name)
    }

    pub fn list_task(&self, name: &str) -> Option<&ListTask> {
        self.list_tasks.iter().find(|t| t.name == name)
    }

    /// Immediate predecessors of a node, or `None` if the node is unknown.
    pub fn run_after_of(&self, name: &str) -> Option<&[TaskName]> {
        self.node(name).map(|n| n.run_after())
    }

    /// Names of nodes that list `name` in their `run_after`.
    pub fn dependents_of(&self, name: &str) -> Vec<&str> {
        self.nodes()
            .filter(|n| n.run_after().iter().any(|dep| dep == name))
            .map(|n| n.name())
            .collect()
    }

    pub fn node(&self, name: &str) -> Option<&dyn GraphNode> {
        self.nodes().find(|n| n.name() == name)
    }

    pub fn node_mut(&mut self, name: &str) -> Option<&mut dyn GraphNode> {
        if let Some(task) = self.tasks.iter_mut().find(|t| t.name == name) {
            return Some(task as &mut dyn GraphNode);
        }
        self.list_tasks
            .iter_mut()
            .find(|t| t.name == name)
            .map(|t| t as &mut dyn GraphNode)
    }

    /// Iterate over every node, tasks first.
    pub fn nodes(&self) -> impl Iterator<Item = &dyn GraphNode> {
        self.tasks
            .iter()
            .map(|t| t as &dyn GraphNode)
            .chain(self.list_tasks.iter().map(|t| t as &dyn GraphNode))
    }

    pub fn nodes_mut(&mut self) -> impl Iterator<Item = &mut dyn GraphNode> {
        self.tasks
            .iter_mut()
            .map(|t| t as &mut dyn GraphNode)
            .chain(self.list_tasks.iter_mut().map(|t| t as &mut dyn GraphNode))
    }

    /// Check every structural invariant of the graph:
    ///
    /// - names are unique across tasks and list tasks,
    /// - no name contains the synthetic id separator,
    /// - no node runs after itself,
    /// - no `run_after` entry is repeated,
    /// - every `run_after` entry names an existing node,
    /// - the dependency relation is acyclic.
    pub fn check_integrity(&self) -> Result<(), GraphDefect> {
        let mut seen: HashSet<&str> = HashSet::with_capacity(self.len());
        for name in self.names() {
            if !seen.insert(name) {
                return Err(GraphDefect::DuplicateName(name.to_string()));
            }
            if is_reserved_name(name) {
                return Err(GraphDefect::ReservedName(name.to_string()));
            }
        }

        for node in self.nodes() {
            for (i, dep) in node.run_after().iter().enumerate() {
                if dep == node.name() {
                    return Err(GraphDefect::SelfReference(dep.clone()));
                }
                if node.run_after()[..i].contains(dep) {
                    return Err(GraphDefect::DuplicateDependency {
                        node: node.name().to_string(),
                        dep: dep.clone(),
                    });
                }
                if !seen.contains(dep.as_str()) {
                    return Err(GraphDefect::DanglingReference {
                        node: node.name().to_string(),
                        missing: dep.clone(),
                    });
                }
            }
        }

        self.check_acyclic()
    }

    /// Fail if the `run_after` relation contains a cycle.
    pub fn check_acyclic(&self) -> Result<(), GraphDefect> {
        // Edge direction: dep -> dependent.
        let mut graph: DiGraphMap<&str, ()> = DiGraphMap::new();

        for name in self.names() {
            graph.add_node(name);
        }

        for node in self.nodes() {
            for dep in node.run_after() {
                graph.add_edge(dep.as_str(), node.name(), ());
            }
        }

        match toposort(&graph, None) {
            Ok(_order) => Ok(()),
            Err(cycle) => Err(GraphDefect::Cycle(cycle.node_id().to_string())),
        }
    }
}
