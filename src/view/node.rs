// src/view/node.rs

//! Renderer-neutral node and edge records.

use crate::model::{ListTask, Task, TaskName};

pub const NODE_WIDTH: f64 = 120.0;
pub const NODE_HEIGHT: f64 = 30.0;
/// Spacers are routing points, not boxes.
pub const SPACER_WIDTH: f64 = 1.0;

/// Id of the synthetic node shown for an empty graph.
pub const SEED_NODE_ID: &str = "add-first-task";

/// Separator used in edge ids: `"{source}~to~{target}"`.
pub const EDGE_ID_SEPARATOR: &str = "~to~";

/// What a projected node stands for, with a back-reference to its source data.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    Task(Task),
    ListTask(ListTask),
    /// "Add the first task" placeholder shown for an empty graph.
    Seed,
    /// Layout-only convergence point for a parallel-to-parallel group.
    Spacer { members: Vec<TaskName> },
}

impl NodeKind {
    pub fn is_placeholder(&self) -> bool {
        matches!(self, NodeKind::ListTask(_) | NodeKind::Seed)
    }

    pub fn is_spacer(&self) -> bool {
        matches!(self, NodeKind::Spacer { .. })
    }

    pub fn label(&self) -> &'static str {
        match self {
            NodeKind::Task(_) => "task",
            NodeKind::ListTask(_) => "placeholder",
            NodeKind::Seed => "seed",
            NodeKind::Spacer { .. } => "spacer",
        }
    }
}

/// One node of the projected view.
#[derive(Debug, Clone, PartialEq)]
pub struct BuilderNode {
    pub id: String,
    /// Projected predecessors; may differ from the source node's `run_after`
    /// once parallel groups are routed through a spacer.
    pub run_after: Vec<String>,
    pub width: f64,
    pub height: f64,
    pub kind: NodeKind,
}

impl BuilderNode {
    pub fn from_task(task: &Task) -> Self {
        Self {
            id: task.name.clone(),
            run_after: task.run_after.clone(),
            width: NODE_WIDTH,
            height: NODE_HEIGHT,
            kind: NodeKind::Task(task.clone()),
        }
    }

    pub fn from_list_task(list_task: &ListTask) -> Self {
        Self {
            id: list_task.name.clone(),
            run_after: list_task.run_after.clone(),
            width: NODE_WIDTH,
            height: NODE_HEIGHT,
            kind: NodeKind::ListTask(list_task.clone()),
        }
    }

    pub fn seed() -> Self {
        Self {
            id: SEED_NODE_ID.to_string(),
            run_after: Vec::new(),
            width: NODE_WIDTH,
            height: NODE_HEIGHT,
            kind: NodeKind::Seed,
        }
    }

    pub fn spacer(id: String, run_after: Vec<String>, members: Vec<TaskName>) -> Self {
        Self {
            id,
            run_after,
            width: SPACER_WIDTH,
            height: NODE_HEIGHT,
            kind: NodeKind::Spacer { members },
        }
    }
}

/// Directed edge from a predecessor to a dependent.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BuilderEdge {
    pub id: String,
    pub source: String,
    pub target: String,
}

impl BuilderEdge {
    pub fn new(source: &str, target: &str) -> Self {
        Self {
            id: format!("{source}{EDGE_ID_SEPARATOR}{target}"),
            source: source.to_string(),
            target: target.to_string(),
        }
    }
}
