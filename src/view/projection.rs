// src/view/projection.rs

use crate::model::TaskGraph;
use crate::view::node::{BuilderEdge, BuilderNode};

/// One node per task and list task, tasks first.
///
/// An empty graph projects to a single seed placeholder.
pub fn project_nodes(graph: &TaskGraph) -> Vec<BuilderNode> {
    if graph.is_empty() {
        return vec![BuilderNode::seed()];
    }

    graph
        .tasks
        .iter()
        .map(BuilderNode::from_task)
        .chain(graph.list_tasks.iter().map(BuilderNode::from_list_task))
        .collect()
}

/// One edge per projected `run_after` entry, in node order.
pub fn project_edges(nodes: &[BuilderNode]) -> Vec<BuilderEdge> {
    nodes
        .iter()
        .flat_map(|node| {
            node.run_after
                .iter()
                .map(move |dep| BuilderEdge::new(dep, &node.id))
        })
        .collect()
}
