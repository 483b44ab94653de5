// src/session/core.rs

//! Pure editing-session state machine.
//!
//! This module contains a synchronous, deterministic session core that
//! consumes [`SessionEvent`]s and produces:
//! - an updated session state (graph, catalog state, parked requests)
//! - a list of [`SessionUpdate`]s for whoever renders the session
//!
//! The async shell (`session::runtime::SessionRuntime`) is responsible for
//! reading events from a channel and handing updates to a sink. The core is
//! unit tested without Tokio or channels.

use tracing::{debug, info, warn};

use crate::catalog::AvailableTasks;
use crate::model::TaskGraph;
use crate::pipeline::{validate_graph, PipelineSpec, ValidationReport};
use crate::session::handlers::{handle_catalog_loaded, handle_edit, handle_save, view_update};
use crate::session::pending::PendingEdits;
use crate::session::{CatalogState, SessionEvent, SessionStep, SessionSummary, SessionUpdate};
use crate::view::BuilderView;

/// Session core state.
///
/// Owns the single mutable copy of the graph; the graph engine itself never
/// retains anything across calls.
#[derive(Debug)]
pub struct EditorSession {
    graph: TaskGraph,
    catalog: CatalogState,
    pending: PendingEdits,
    saved: Option<PipelineSpec>,
    finished: bool,
}

impl EditorSession {
    /// Start a session from an existing graph (or the empty seed graph).
    /// The catalog starts out loading.
    pub fn new(graph: TaskGraph) -> Self {
        Self {
            graph,
            catalog: CatalogState::Loading,
            pending: PendingEdits::new(),
            saved: None,
            finished: false,
        }
    }

    pub fn graph(&self) -> &TaskGraph {
        &self.graph
    }

    pub fn catalog_state(&self) -> &CatalogState {
        &self.catalog
    }

    /// Number of requests waiting for the catalog.
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn view(&self) -> BuilderView {
        BuilderView::from_graph(&self.graph)
    }

    pub fn issues(&self) -> ValidationReport {
        validate_graph(&self.graph)
    }

    /// Definitions the "choose a task" picker may offer: the loaded catalog
    /// minus names already placed in the graph. `None` until loaded.
    pub fn picker_options(&self) -> Option<AvailableTasks> {
        match &self.catalog {
            CatalogState::Loaded(available) => {
                let placed: Vec<&str> = self.graph.names().collect();
                Some(available.excluding(&placed))
            }
            _ => None,
        }
    }

    /// Update describing the current graph, for the first render.
    pub fn current_view(&self) -> SessionUpdate {
        view_update(&self.graph)
    }

    /// Handle a single event, updating state and returning what to publish.
    pub fn step(&mut self, event: SessionEvent) -> SessionStep {
        if self.finished {
            debug!(?event, "session already ended; ignoring event");
            return SessionStep {
                updates: Vec::new(),
                keep_running: false,
            };
        }

        match event {
            SessionEvent::Edit(request) => SessionStep {
                updates: handle_edit(&mut self.graph, &self.catalog, &mut self.pending, request),
                keep_running: true,
            },
            SessionEvent::CatalogLoaded(result) => {
                if !matches!(self.catalog, CatalogState::Loading) {
                    debug!("catalog already settled; ignoring duplicate load result");
                    return SessionStep {
                        updates: Vec::new(),
                        keep_running: true,
                    };
                }
                let (state, updates) =
                    handle_catalog_loaded(&mut self.graph, &mut self.pending, result);
                self.catalog = state;
                SessionStep {
                    updates,
                    keep_running: true,
                }
            }
            SessionEvent::Save => {
                let (update, saved) = handle_save(&self.graph);
                let keep_running = saved.is_none();
                if saved.is_some() {
                    self.saved = saved;
                    self.finished = true;
                }
                SessionStep {
                    updates: vec![update],
                    keep_running,
                }
            }
            SessionEvent::Close => {
                if !self.pending.is_empty() {
                    warn!(
                        discarded = self.pending.len(),
                        "session closed with edits still waiting for the catalog"
                    );
                    self.pending.drain();
                }
                info!("session closed");
                self.finished = true;
                SessionStep {
                    updates: Vec::new(),
                    keep_running: false,
                }
            }
        }
    }

    pub fn into_summary(self) -> SessionSummary {
        SessionSummary {
            graph: self.graph,
            saved: self.saved,
        }
    }
}
