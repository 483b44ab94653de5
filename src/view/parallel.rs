// src/view/parallel.rs

//! Parallel-to-parallel resolution.
//!
//! When two or more nodes wait on exactly the same multi-node fan-in, a
//! layered layout would draw every predecessor/dependent pair as its own
//! crossing edge. Routing each such group through one spacer turns the N×M
//! bundle into N+M edges through a single convergence point.

use std::collections::BTreeMap;

use tracing::debug;

use crate::model::ID_SEPARATOR;
use crate::view::node::BuilderNode;

/// Prefix of spacer ids.
pub const SPACER_ID_PREFIX: &str = "parallel";

/// Deterministic spacer id for a group of (sorted) member names.
pub fn spacer_id<S: AsRef<str>>(sorted_members: &[S]) -> String {
    let mut id = SPACER_ID_PREFIX.to_string();
    for member in sorted_members {
        id.push(ID_SEPARATOR);
        id.push_str(member.as_ref());
    }
    id
}

/// Canonical grouping key: sorted, deduplicated predecessors, only for nodes
/// with more than one predecessor.
pub fn parallel_key(run_after: &[String]) -> Option<Vec<String>> {
    let mut key = run_after.to_vec();
    key.sort();
    key.dedup();
    if key.len() > 1 { Some(key) } else { None }
}

/// Inject one spacer per group of nodes sharing an identical multi-element
/// `run_after` set and point each member at its spacer.
///
/// Non-members pass through unchanged and keep their position; spacers are
/// appended in key order. Running this twice on the same input yields the
/// same ids and edges.
pub fn resolve_parallel_nodes(mut nodes: Vec<BuilderNode>) -> Vec<BuilderNode> {
    let mut groups: BTreeMap<Vec<String>, Vec<usize>> = BTreeMap::new();
    for (index, node) in nodes.iter().enumerate() {
        if let Some(key) = parallel_key(&node.run_after) {
            groups.entry(key).or_default().push(index);
        }
    }

    let mut spacers = Vec::new();
    for (shared_run_after, member_indices) in groups {
        if member_indices.len() < 2 {
            continue;
        }

        let mut members: Vec<String> = member_indices
            .iter()
            .map(|&i| nodes[i].id.clone())
            .collect();
        members.sort();
        let id = spacer_id(&members);

        for &i in &member_indices {
            nodes[i].run_after = vec![id.clone()];
        }

        debug!(spacer = %id, upstream = ?shared_run_after, "routing parallel group through spacer");
        spacers.push(BuilderNode::spacer(id, shared_run_after, members));
    }

    nodes.extend(spacers);
    nodes
}
