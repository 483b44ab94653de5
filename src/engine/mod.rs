// src/engine/mod.rs

//! Graph update engine.
//!
//! Applies one structural [`EditOp`] to a [`TaskGraph`] and returns the
//! updated graph. The engine is pure: no IO, no retained state, and the input
//! graph is never mutated.
//!
//! - [`handlers`] holds one function per operation.
//! - [`references`] holds the `run_after` rewriting helpers they share.
//!
//! Every operation is acyclic by construction (insertions only derive edges
//! from one existing node's neighbourhood, removals only contract the graph,
//! renames and resolutions only relabel). [`apply_edit`] still re-checks the
//! full set of graph invariants on the result and rejects the edit if any is
//! violated.

pub mod handlers;
pub mod references;

use serde::Deserialize;
use tracing::warn;

use crate::catalog::TaskDefinition;
use crate::errors::EditError;
use crate::model::{TaskGraph, TaskName};

/// Where a new placeholder goes relative to an existing node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InsertDirection {
    Before,
    After,
    Parallel,
}

/// A single structural edit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditOp {
    /// Add the first placeholder to an empty graph.
    InsertInitial,
    /// Add a placeholder next to `related`.
    InsertAdjacent {
        direction: InsertDirection,
        related: TaskName,
    },
    /// Turn a placeholder into a task backed by `definition`.
    ResolvePlaceholder {
        list_task: TaskName,
        definition: TaskDefinition,
        run_after: Option<Vec<TaskName>>,
    },
    RenameTask {
        old_name: TaskName,
        new_name: TaskName,
    },
    RemoveTask {
        name: TaskName,
    },
    RemovePlaceholder {
        name: TaskName,
    },
    /// Replace a node whose definition disappeared with a freshly resolved task.
    FixInvalidPlaceholder {
        existing: TaskName,
        definition: TaskDefinition,
        run_after: Vec<TaskName>,
    },
}

impl EditOp {
    /// Short operation name for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            EditOp::InsertInitial => "insert-initial",
            EditOp::InsertAdjacent { .. } => "insert",
            EditOp::ResolvePlaceholder { .. } => "resolve",
            EditOp::RenameTask { .. } => "rename",
            EditOp::RemoveTask { .. } => "remove-task",
            EditOp::RemovePlaceholder { .. } => "remove-placeholder",
            EditOp::FixInvalidPlaceholder { .. } => "fix-invalid",
        }
    }
}

/// Apply `op` to `graph`, returning the updated graph.
///
/// On error the caller keeps its current graph; nothing is partially applied.
pub fn apply_edit(graph: &TaskGraph, op: EditOp) -> Result<TaskGraph, EditError> {
    let kind = op.kind();

    let next = match op {
        EditOp::InsertInitial => handlers::insert_initial(graph),
        EditOp::InsertAdjacent { direction, related } => {
            handlers::insert_adjacent(graph, direction, &related)
        }
        EditOp::ResolvePlaceholder {
            list_task,
            definition,
            run_after,
        } => handlers::resolve_placeholder(graph, &list_task, &definition, run_after),
        EditOp::RenameTask { old_name, new_name } => {
            handlers::rename_task(graph, &old_name, &new_name)
        }
        EditOp::RemoveTask { name } => handlers::remove_task(graph, &name),
        EditOp::RemovePlaceholder { name } => handlers::remove_placeholder(graph, &name),
        EditOp::FixInvalidPlaceholder {
            existing,
            definition,
            run_after,
        } => handlers::fix_invalid_placeholder(graph, &existing, &definition, run_after),
    }?;

    if let Err(defect) = next.check_integrity() {
        warn!(op = kind, %defect, "edit would break graph invariants; rejecting");
        return Err(defect.into());
    }

    Ok(next)
}
