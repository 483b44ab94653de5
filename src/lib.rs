// src/lib.rs

pub mod catalog;
pub mod cli;
pub mod config;
pub mod engine;
pub mod errors;
pub mod logging;
pub mod model;
pub mod pipeline;
pub mod session;
pub mod types;
pub mod view;

use std::sync::Arc;

use anyhow::{bail, Result};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::catalog::FileCatalog;
use crate::cli::CliArgs;
use crate::config::{load_and_validate, load_edit_script};
use crate::errors::BuilderError;
use crate::model::TaskGraph;
use crate::pipeline::validate_graph;
use crate::session::sink::render_view;
use crate::session::{
    spawn_catalog_fetch, ConsoleSink, EditorSession, SessionEvent, SessionRuntime,
};
use crate::view::{BuilderView, LayoutParams, LongestPathLayout};

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - pipeline loading (or an empty graph)
/// - the editing session and its console sink
/// - the one-off background catalog fetch
/// - the edit script, then save / close
/// - Ctrl-C handling
pub async fn run(args: CliArgs) -> Result<()> {
    let graph = match &args.pipeline {
        Some(path) => load_and_validate(path)?,
        None => TaskGraph::default(),
    };
    let params = args.layout.params();

    if args.dry_run {
        print_dry_run(&graph, &params)?;
        return Ok(());
    }

    let edits = match &args.edits {
        Some(path) => load_edit_script(path)?,
        None => Vec::new(),
    };
    info!(edits = edits.len(), "starting editing session");

    // Session event channel.
    let (tx, rx) = mpsc::channel::<SessionEvent>(64);

    let runtime = SessionRuntime::new(EditorSession::new(graph), rx, ConsoleSink::new(params));
    let session = tokio::spawn(runtime.run());

    let catalog = Arc::new(FileCatalog::new(&args.catalog));
    let fetch = spawn_catalog_fetch(catalog, tx.clone());

    // Ctrl-C → close the session, discarding anything still pending.
    {
        let tx = tx.clone();
        tokio::spawn(async move {
            if let Err(e) = tokio::signal::ctrl_c().await {
                eprintln!("failed to listen for Ctrl+C: {e}");
                return;
            }
            let _ = tx.send(SessionEvent::Close).await;
        });
    }

    for edit in edits {
        if tx.send(SessionEvent::Edit(edit)).await.is_err() {
            warn!("session ended before every edit was sent");
            break;
        }
    }

    // Saving needs the catalog settled so parked edits are replayed first.
    fetch.await?;

    if args.output.is_some() {
        let _ = tx.send(SessionEvent::Save).await;
    }
    // A successful save already ended the session.
    let _ = tx.send(SessionEvent::Close).await;
    drop(tx);

    let summary = session.await??;

    match (&args.output, summary.saved) {
        (Some(path), Some(spec)) => {
            std::fs::write(path, spec.to_toml()?)?;
            info!(path = %path, tasks = spec.tasks.len(), "pipeline written");
        }
        (Some(path), None) => {
            let report = validate_graph(&summary.graph);
            if report.is_valid() {
                bail!("session closed before the pipeline was saved; {path} not written");
            }
            return Err(BuilderError::Validation(report).into());
        }
        (None, _) => {
            debug!(
                tasks = summary.graph.tasks.len(),
                list_tasks = summary.graph.list_tasks.len(),
                "no --output given; nothing written"
            );
        }
    }

    Ok(())
}

/// Dry-run output: print the loaded graph and its layout.
fn print_dry_run(graph: &TaskGraph, params: &LayoutParams) -> Result<()> {
    println!("pipeline-builder dry-run");
    println!(
        "  layout: node_separation={} rank_separation={} margin=({}, {})",
        params.node_separation, params.rank_separation, params.margin_x, params.margin_y
    );
    println!();

    println!("tasks ({}):", graph.tasks.len());
    for task in &graph.tasks {
        println!("  - {} ({} {})", task.name, task.task_ref.scope, task.task_ref.name);
        if !task.run_after.is_empty() {
            println!("      run_after: {:?}", task.run_after);
        }
    }
    if !graph.list_tasks.is_empty() {
        println!("placeholders ({}):", graph.list_tasks.len());
        for list_task in &graph.list_tasks {
            println!("  - {}", list_task.name);
        }
    }
    println!();

    let view = BuilderView::from_graph(graph);
    let issues = validate_graph(graph);
    print!("{}", render_view(&view, &issues, &LongestPathLayout, params)?);

    debug!("dry-run complete (no edits applied)");
    Ok(())
}
