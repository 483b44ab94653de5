// src/engine/references.rs

//! `run_after` reference rewriting shared by the edit handlers.
//!
//! All helpers walk both collections of the graph, since edges cross freely
//! between tasks and list tasks.

use crate::model::{GraphNode, TaskGraph, TaskName};

/// Rewrite every `run_after` entry equal to `from` into `to`.
pub fn rename_references(graph: &mut TaskGraph, from: &str, to: &str) {
    for node in graph.nodes_mut() {
        if node.run_after().iter().any(|dep| dep == from) {
            let rewritten = node
                .run_after()
                .iter()
                .map(|dep| if dep == from { to.to_string() } else { dep.clone() })
                .collect();
            set_deduped(node, rewritten);
        }
    }
}

/// Replace every `run_after` entry equal to `removed` with `replacement`.
///
/// An empty `replacement` simply drops the entry. Entries already present on
/// the dependent, and the dependent's own name, are not duplicated.
pub fn replace_reference(graph: &mut TaskGraph, removed: &str, replacement: &[TaskName]) {
    for node in graph.nodes_mut() {
        if !node.run_after().iter().any(|dep| dep == removed) {
            continue;
        }

        let own_name = node.name().to_string();
        let mut rewritten = Vec::with_capacity(node.run_after().len() + replacement.len());
        for dep in node.run_after() {
            if dep == removed {
                rewritten.extend(
                    replacement
                        .iter()
                        .filter(|r| **r != own_name)
                        .cloned(),
                );
            } else {
                rewritten.push(dep.clone());
            }
        }
        set_deduped(node, rewritten);
    }
}

/// Every node that runs after `existing` additionally runs after `added`.
///
/// The new entry is placed right after `existing` to keep the list readable.
pub fn add_sibling_reference(graph: &mut TaskGraph, existing: &str, added: &str) {
    for node in graph.nodes_mut() {
        if let Some(pos) = node.run_after().iter().position(|dep| dep == existing) {
            if !node.run_after().iter().any(|dep| dep == added) {
                node.run_after_mut().insert(pos + 1, added.to_string());
            }
        }
    }
}

/// Store `deps` on `node`, keeping only the first occurrence of each name.
fn set_deduped(node: &mut dyn GraphNode, deps: Vec<TaskName>) {
    let mut unique: Vec<TaskName> = Vec::with_capacity(deps.len());
    for dep in deps {
        if !unique.contains(&dep) {
            unique.push(dep);
        }
    }
    *node.run_after_mut() = unique;
}
