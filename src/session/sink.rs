// src/session/sink.rs

//! Pluggable output for session updates.
//!
//! The runtime hands every [`SessionUpdate`] to a `SessionSink` instead of
//! printing directly. `ConsoleSink` lays the view out and prints it to
//! stdout; tests provide a sink that records updates.

use std::fmt::Write as _;
use std::future::Future;
use std::pin::Pin;

use tracing::warn;

use crate::errors::{BuilderError, Result};
use crate::pipeline::ValidationReport;
use crate::session::SessionUpdate;
use crate::view::{BuilderView, LayoutEngine, LayoutParams, LongestPathLayout};

/// Trait abstracting where session updates go.
pub trait SessionSink: Send {
    fn publish(
        &mut self,
        update: SessionUpdate,
    ) -> Pin<Box<dyn Future<Output = Result<()>> + Send + '_>>;
}

/// Sink that renders each update as text on stdout.
#[derive(Debug, Clone)]
pub struct ConsoleSink<L: LayoutEngine = LongestPathLayout> {
    params: LayoutParams,
    engine: L,
}

impl ConsoleSink<LongestPathLayout> {
    pub fn new(params: LayoutParams) -> Self {
        Self {
            params,
            engine: LongestPathLayout,
        }
    }
}

impl<L: LayoutEngine + Send + Sync> SessionSink for ConsoleSink<L> {
    fn publish(
        &mut self,
        update: SessionUpdate,
    ) -> Pin<Box<dyn Future<Output = Result<()>> + Send + '_>> {
        Box::pin(async move {
            let text = match render_update(&update, &self.engine, &self.params) {
                Ok(text) => text,
                Err(err) => {
                    warn!(error = %err, "could not render session update");
                    format!("update could not be rendered: {err}\n")
                }
            };
            print!("{text}");
            Ok(())
        })
    }
}

/// Text rendering of a single update.
pub fn render_update<L: LayoutEngine>(
    update: &SessionUpdate,
    engine: &L,
    params: &LayoutParams,
) -> Result<String> {
    let mut out = String::new();
    match update {
        SessionUpdate::ViewChanged { view, issues } => {
            out.push_str(&render_view(view, issues, engine, params)?);
        }
        SessionUpdate::EditRejected { request, error } => {
            writeln!(out, "edit rejected: {error} ({request:?})").map_err(fmt_error)?;
        }
        SessionUpdate::CatalogReady { available } => {
            writeln!(out, "catalog ready: {available} task definitions").map_err(fmt_error)?;
        }
        SessionUpdate::CatalogFailed(reason) => {
            writeln!(out, "catalog unavailable: {reason}").map_err(fmt_error)?;
        }
        SessionUpdate::Saved(spec) => {
            writeln!(out, "saved pipeline with {} tasks", spec.tasks.len()).map_err(fmt_error)?;
        }
        SessionUpdate::SaveBlocked(report) => {
            writeln!(out, "save blocked: {report}").map_err(fmt_error)?;
        }
    }
    Ok(out)
}

/// Lay `view` out and render nodes, edges and issues.
pub fn render_view<L: LayoutEngine>(
    view: &BuilderView,
    issues: &ValidationReport,
    engine: &L,
    params: &LayoutParams,
) -> Result<String> {
    let positioned = view.layout(engine, params)?;
    let mut out = String::new();

    writeln!(out, "nodes ({}):", positioned.len()).map_err(fmt_error)?;
    for placed in &positioned {
        let kind = view
            .node(&placed.id)
            .map(|n| n.kind.label())
            .unwrap_or("?");
        writeln!(
            out,
            "  - {} [{kind}] rank={} at ({:.0}, {:.0})",
            placed.id, placed.rank, placed.x, placed.y
        )
        .map_err(fmt_error)?;
    }

    if !view.edges.is_empty() {
        writeln!(out, "edges ({}):", view.edges.len()).map_err(fmt_error)?;
        for edge in &view.edges {
            writeln!(out, "  - {}", edge.id).map_err(fmt_error)?;
        }
    }

    if !issues.is_empty() {
        writeln!(out, "issues ({}):", issues.len()).map_err(fmt_error)?;
        for (node, node_issues) in issues.iter() {
            for issue in node_issues {
                writeln!(out, "  - {node}: {issue}").map_err(fmt_error)?;
            }
        }
    }

    Ok(out)
}

fn fmt_error(err: std::fmt::Error) -> BuilderError {
    BuilderError::Other(err.into())
}
