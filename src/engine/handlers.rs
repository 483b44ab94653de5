// src/engine/handlers.rs

//! One handler per edit operation.
//!
//! Every handler takes the current graph by reference and returns a new
//! graph; the input is never mutated. Integrity checking of the result is
//! done once, by [`apply_edit`](super::apply_edit).

use tracing::debug;

use crate::catalog::TaskDefinition;
use crate::engine::references::{add_sibling_reference, rename_references, replace_reference};
use crate::engine::InsertDirection;
use crate::errors::{EditError, GraphDefect};
use crate::model::naming::{is_reserved_name, next_placeholder_name, unique_name};
use crate::model::{ListTask, TaskGraph, TaskName};

type EditResult = std::result::Result<TaskGraph, EditError>;

/// Add the first placeholder to an empty graph.
pub fn insert_initial(graph: &TaskGraph) -> EditResult {
    if !graph.is_empty() {
        return Err(EditError::GraphNotEmpty);
    }

    let mut next = graph.clone();
    let name = next_placeholder_name(&next);
    debug!(placeholder = %name, "adding first placeholder");
    next.list_tasks.push(ListTask::new(name, Vec::new()));
    Ok(next)
}

/// Create a placeholder before, after, or parallel to `related`.
///
/// - `Before`: the placeholder takes over `related`'s predecessors and
///   `related` then runs after the placeholder only.
/// - `After`: everything that ran after `related` now runs after the
///   placeholder, which itself runs after `related`.
/// - `Parallel`: the placeholder copies `related`'s predecessors, and every
///   dependent of `related` also waits for the placeholder.
pub fn insert_adjacent(graph: &TaskGraph, direction: InsertDirection, related: &str) -> EditResult {
    let related_run_after = graph
        .run_after_of(related)
        .ok_or_else(|| EditError::UnknownNode(related.to_string()))?
        .to_vec();

    let mut next = graph.clone();
    let name = next_placeholder_name(&next);

    let placeholder = match direction {
        InsertDirection::Before => {
            if let Some(node) = next.node_mut(related) {
                *node.run_after_mut() = vec![name.clone()];
            }
            ListTask::new(name.clone(), related_run_after)
        }
        InsertDirection::After => {
            rename_references(&mut next, related, &name);
            ListTask::new(name.clone(), vec![related.to_string()])
        }
        InsertDirection::Parallel => {
            add_sibling_reference(&mut next, related, &name);
            ListTask::new(name.clone(), related_run_after)
        }
    };

    debug!(
        placeholder = %name,
        related = %related,
        ?direction,
        "inserted placeholder"
    );
    next.list_tasks.push(placeholder);
    Ok(next)
}

/// Turn the placeholder `list_task` into a task backed by `definition`.
///
/// The task is named after the definition (suffixed when taken) and takes
/// over every reference to the placeholder. `run_after`, when given,
/// replaces the placeholder's predecessors.
pub fn resolve_placeholder(
    graph: &TaskGraph,
    list_task: &str,
    definition: &TaskDefinition,
    run_after: Option<Vec<TaskName>>,
) -> EditResult {
    let index = graph
        .list_tasks
        .iter()
        .position(|lt| lt.name == list_task)
        .ok_or_else(|| EditError::UnknownPlaceholder(list_task.to_string()))?;

    let mut next = graph.clone();
    let placeholder = next.list_tasks.remove(index);

    let name = unique_name(&definition.name, |candidate| next.contains(candidate));
    let run_after = run_after.unwrap_or(placeholder.run_after);

    rename_references(&mut next, &placeholder.name, &name);
    next.tasks.push(definition.to_task(name.clone(), run_after));

    debug!(
        placeholder = %placeholder.name,
        task = %name,
        definition = %definition.name,
        scope = %definition.scope,
        "resolved placeholder into task"
    );
    Ok(next)
}

/// Rename a node and every reference to it.
pub fn rename_task(graph: &TaskGraph, old_name: &str, new_name: &str) -> EditResult {
    if !graph.contains(old_name) {
        return Err(EditError::UnknownNode(old_name.to_string()));
    }
    if old_name == new_name {
        return Ok(graph.clone());
    }
    if graph.contains(new_name) {
        return Err(EditError::NameTaken(new_name.to_string()));
    }
    if is_reserved_name(new_name) {
        return Err(GraphDefect::ReservedName(new_name.to_string()).into());
    }

    let mut next = graph.clone();
    if let Some(node) = next.node_mut(old_name) {
        node.set_name(new_name.to_string());
    }
    rename_references(&mut next, old_name, new_name);

    debug!(from = %old_name, to = %new_name, "renamed node");
    Ok(next)
}

/// Remove a resolved task, stitching its dependents to its predecessors.
pub fn remove_task(graph: &TaskGraph, name: &str) -> EditResult {
    let index = graph
        .tasks
        .iter()
        .position(|t| t.name == name)
        .ok_or_else(|| EditError::UnknownTask(name.to_string()))?;

    let mut next = graph.clone();
    let removed = next.tasks.remove(index);
    replace_reference(&mut next, &removed.name, &removed.run_after);

    debug!(task = %name, upstream = ?removed.run_after, "removed task");
    Ok(next)
}

/// Remove a placeholder, stitching its dependents to its predecessors.
pub fn remove_placeholder(graph: &TaskGraph, name: &str) -> EditResult {
    let index = graph
        .list_tasks
        .iter()
        .position(|t| t.name == name)
        .ok_or_else(|| EditError::UnknownPlaceholder(name.to_string()))?;

    let mut next = graph.clone();
    let removed = next.list_tasks.remove(index);
    replace_reference(&mut next, &removed.name, &removed.run_after);

    debug!(placeholder = %name, upstream = ?removed.run_after, "removed placeholder");
    Ok(next)
}

/// Replace `existing` (task or placeholder) with a fresh task backed by
/// `definition`, used when the node's definition vanished from the catalog.
///
/// A replaced task keeps its position in the task list; a replaced
/// placeholder's task is appended.
pub fn fix_invalid_placeholder(
    graph: &TaskGraph,
    existing: &str,
    definition: &TaskDefinition,
    run_after: Vec<TaskName>,
) -> EditResult {
    let mut next = graph.clone();

    let task_index = next.tasks.iter().position(|t| t.name == existing);
    match task_index {
        Some(index) => {
            next.tasks.remove(index);
        }
        None => {
            let index = next
                .list_tasks
                .iter()
                .position(|t| t.name == existing)
                .ok_or_else(|| EditError::UnknownNode(existing.to_string()))?;
            next.list_tasks.remove(index);
        }
    }

    let name = unique_name(&definition.name, |candidate| next.contains(candidate));
    rename_references(&mut next, existing, &name);

    let task = definition.to_task(name.clone(), run_after);
    match task_index {
        Some(index) => next.tasks.insert(index, task),
        None => next.tasks.push(task),
    }

    debug!(
        existing = %existing,
        task = %name,
        definition = %definition.name,
        "replaced invalid node with resolved task"
    );
    Ok(next)
}
