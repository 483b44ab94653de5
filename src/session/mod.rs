// src/session/mod.rs

//! Interactive editing session.
//!
//! An editing session owns the single mutable copy of the task graph for as
//! long as the user is editing. It reacts to:
//! - edit requests from the user
//! - the (one-off, asynchronous) catalog load result
//! - save / close requests
//!
//! The pure state machine lives in [`core`]; the async/IO shell is
//! implemented in [`runtime`], and publishes updates through a
//! [`SessionSink`](sink::SessionSink).

use serde::Deserialize;

use crate::catalog::AvailableTasks;
use crate::engine::InsertDirection;
use crate::errors::EditError;
use crate::model::{TaskGraph, TaskName, TaskScope};
use crate::pipeline::{PipelineSpec, ValidationReport};
use crate::view::BuilderView;

/// A user edit, expressed in terms of catalog names rather than resolved
/// definitions. This is also the shape of `[[edit]]` entries in edit scripts.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "op", rename_all = "kebab-case")]
pub enum EditRequest {
    /// Add the first placeholder to an empty graph.
    AddFirst,
    Insert {
        direction: InsertDirection,
        related: TaskName,
    },
    Resolve {
        placeholder: TaskName,
        /// Catalog definition name.
        task: String,
        #[serde(default)]
        scope: Option<TaskScope>,
        #[serde(default)]
        run_after: Option<Vec<TaskName>>,
    },
    Rename {
        from: TaskName,
        to: TaskName,
    },
    RemoveTask {
        name: TaskName,
    },
    RemovePlaceholder {
        name: TaskName,
    },
    FixInvalid {
        existing: TaskName,
        task: String,
        #[serde(default)]
        scope: Option<TaskScope>,
        #[serde(default)]
        run_after: Vec<TaskName>,
    },
}

impl EditRequest {
    /// Whether this request needs a loaded catalog to be applied.
    pub fn needs_catalog(&self) -> bool {
        matches!(
            self,
            EditRequest::Resolve { .. } | EditRequest::FixInvalid { .. }
        )
    }
}

/// Events flowing into a session.
#[derive(Debug, Clone)]
pub enum SessionEvent {
    Edit(EditRequest),
    /// The one-off catalog load finished.
    CatalogLoaded(std::result::Result<AvailableTasks, String>),
    /// Validate and persist; ends the session on success.
    Save,
    /// The user navigated away; pending requests are discarded.
    Close,
}

/// Catalog load state for the lifetime of a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogState {
    Loading,
    Failed(String),
    Loaded(AvailableTasks),
}

/// What the session reports back to whoever renders it.
#[derive(Debug, Clone)]
pub enum SessionUpdate {
    /// The graph changed (or is shown for the first time).
    ViewChanged {
        view: BuilderView,
        issues: ValidationReport,
    },
    EditRejected {
        request: EditRequest,
        error: EditError,
    },
    CatalogReady {
        available: usize,
    },
    /// Shown once, at the top of the editor; not tied to a node.
    CatalogFailed(String),
    Saved(PipelineSpec),
    SaveBlocked(ValidationReport),
}

/// Result of handling a single [`SessionEvent`].
#[derive(Debug, Clone)]
pub struct SessionStep {
    pub updates: Vec<SessionUpdate>,
    /// Whether the outer loop should keep running.
    pub keep_running: bool,
}

/// Final state of a session.
#[derive(Debug, Clone)]
pub struct SessionSummary {
    pub graph: TaskGraph,
    /// Set if the session ended with a successful save.
    pub saved: Option<PipelineSpec>,
}

pub mod core;
pub mod handlers;
pub mod pending;
pub mod runtime;
pub mod sink;

pub use self::core::EditorSession;
pub use pending::PendingEdits;
pub use runtime::{spawn_catalog_fetch, SessionRuntime};
pub use sink::{ConsoleSink, SessionSink};
