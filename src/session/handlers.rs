// src/session/handlers.rs

//! Event handling logic for the editing session core.

use tracing::{debug, info, warn};

use crate::catalog::{AvailableTasks, TaskDefinition};
use crate::engine::{apply_edit, EditOp};
use crate::errors::EditError;
use crate::model::{TaskGraph, TaskScope};
use crate::pipeline::{to_pipeline_spec, validate_graph, PipelineSpec};
use crate::session::pending::PendingEdits;
use crate::session::{CatalogState, EditRequest, SessionUpdate};
use crate::view::BuilderView;

/// Snapshot of the current graph for the view.
pub fn view_update(graph: &TaskGraph) -> SessionUpdate {
    SessionUpdate::ViewChanged {
        view: BuilderView::from_graph(graph),
        issues: validate_graph(graph),
    }
}

/// Handle an edit request.
///
/// - Structural edits are applied immediately, unless earlier requests are
///   still parked, in which case they queue up behind them.
/// - Resolve / fix requests are parked while the catalog is loading, rejected
///   if it failed to load, and applied against it once loaded.
pub fn handle_edit(
    graph: &mut TaskGraph,
    catalog: &CatalogState,
    pending: &mut PendingEdits,
    request: EditRequest,
) -> Vec<SessionUpdate> {
    if !request.needs_catalog() && pending.is_empty() {
        return vec![apply_request(graph, None, request)];
    }

    match catalog {
        CatalogState::Loading => {
            pending.record(request);
            Vec::new()
        }
        CatalogState::Failed(_) | CatalogState::Loaded(_) if !request.needs_catalog() => {
            vec![apply_request(graph, None, request)]
        }
        CatalogState::Failed(reason) => {
            let error = EditError::CatalogUnavailable(reason.clone());
            warn!(?request, %error, "rejecting edit");
            vec![SessionUpdate::EditRejected { request, error }]
        }
        CatalogState::Loaded(available) => vec![apply_request(graph, Some(available), request)],
    }
}

/// Handle the one-off catalog load result and replay parked requests.
///
/// Returns the new catalog state together with the updates to publish.
pub fn handle_catalog_loaded(
    graph: &mut TaskGraph,
    pending: &mut PendingEdits,
    result: std::result::Result<AvailableTasks, String>,
) -> (CatalogState, Vec<SessionUpdate>) {
    let mut updates = Vec::new();

    match result {
        Ok(available) => {
            info!(definitions = available.len(), "task catalog loaded");
            updates.push(SessionUpdate::CatalogReady {
                available: available.len(),
            });
            for request in pending.drain() {
                updates.push(apply_request(graph, Some(&available), request));
            }
            (CatalogState::Loaded(available), updates)
        }
        Err(reason) => {
            warn!(%reason, "task catalog failed to load");
            updates.push(SessionUpdate::CatalogFailed(reason.clone()));
            for request in pending.drain() {
                if request.needs_catalog() {
                    updates.push(SessionUpdate::EditRejected {
                        request,
                        error: EditError::CatalogUnavailable(reason.clone()),
                    });
                } else {
                    updates.push(apply_request(graph, None, request));
                }
            }
            (CatalogState::Failed(reason), updates)
        }
    }
}

/// Validate and convert the graph for persistence.
pub fn handle_save(graph: &TaskGraph) -> (SessionUpdate, Option<PipelineSpec>) {
    match to_pipeline_spec(graph) {
        Ok(spec) => {
            info!(tasks = spec.tasks.len(), "pipeline saved");
            (SessionUpdate::Saved(spec.clone()), Some(spec))
        }
        Err(report) => {
            warn!(issues = report.len(), "save blocked by validation issues");
            (SessionUpdate::SaveBlocked(report), None)
        }
    }
}

/// Apply one request to `graph`, replacing it only if the engine accepts
/// the edit.
fn apply_request(
    graph: &mut TaskGraph,
    catalog: Option<&AvailableTasks>,
    request: EditRequest,
) -> SessionUpdate {
    let current: &TaskGraph = graph;
    let result = to_edit_op(&request, catalog).and_then(|op| apply_edit(current, op));

    match result {
        Ok(next) => {
            debug!(?request, "edit applied");
            *graph = next;
            view_update(graph)
        }
        Err(error) => {
            warn!(?request, %error, "edit rejected");
            SessionUpdate::EditRejected { request, error }
        }
    }
}

/// Translate a request into an engine operation, resolving catalog names.
pub fn to_edit_op(
    request: &EditRequest,
    catalog: Option<&AvailableTasks>,
) -> std::result::Result<EditOp, EditError> {
    let op = match request {
        EditRequest::AddFirst => EditOp::InsertInitial,
        EditRequest::Insert { direction, related } => EditOp::InsertAdjacent {
            direction: *direction,
            related: related.clone(),
        },
        EditRequest::Resolve {
            placeholder,
            task,
            scope,
            run_after,
        } => EditOp::ResolvePlaceholder {
            list_task: placeholder.clone(),
            definition: lookup_definition(catalog, task, *scope)?,
            run_after: run_after.clone(),
        },
        EditRequest::Rename { from, to } => EditOp::RenameTask {
            old_name: from.clone(),
            new_name: to.clone(),
        },
        EditRequest::RemoveTask { name } => EditOp::RemoveTask { name: name.clone() },
        EditRequest::RemovePlaceholder { name } => EditOp::RemovePlaceholder { name: name.clone() },
        EditRequest::FixInvalid {
            existing,
            task,
            scope,
            run_after,
        } => EditOp::FixInvalidPlaceholder {
            existing: existing.clone(),
            definition: lookup_definition(catalog, task, *scope)?,
            run_after: run_after.clone(),
        },
    };
    Ok(op)
}

fn lookup_definition(
    catalog: Option<&AvailableTasks>,
    name: &str,
    scope: Option<TaskScope>,
) -> std::result::Result<TaskDefinition, EditError> {
    let catalog = catalog
        .ok_or_else(|| EditError::CatalogUnavailable("catalog has not been loaded".to_string()))?;
    catalog
        .resolve(name, scope)
        .cloned()
        .ok_or_else(|| EditError::UnknownDefinition(name.to_string()))
}
