// src/view/mod.rs

//! Projected node/edge view of a task graph.
//!
//! The view is a one-way, disposable transform of a [`TaskGraph`]: it is
//! rebuilt from scratch on every change and never written back.
//!
//! - [`node`] defines the node and edge records.
//! - [`projection`] maps tasks and list tasks to nodes and edges.
//! - [`parallel`] injects spacer nodes for parallel-to-parallel groups.
//! - [`layout`] defines the layout adapter and a longest-path implementation.

pub mod layout;
pub mod node;
pub mod parallel;
pub mod projection;

pub use layout::{LayoutEngine, LayoutParams, LongestPathLayout, PositionedNode, RankDirection};
pub use node::{BuilderEdge, BuilderNode, NodeKind};
pub use parallel::resolve_parallel_nodes;
pub use projection::{project_edges, project_nodes};

use tracing::trace;

use crate::errors::Result;
use crate::model::TaskGraph;

/// Nodes (spacers included) and edges ready to hand to a layout engine.
#[derive(Debug, Clone, PartialEq)]
pub struct BuilderView {
    pub nodes: Vec<BuilderNode>,
    pub edges: Vec<BuilderEdge>,
}

impl BuilderView {
    /// Project `graph`, resolve parallel groups, and derive edges.
    pub fn from_graph(graph: &TaskGraph) -> Self {
        let nodes = resolve_parallel_nodes(project_nodes(graph));
        let edges = project_edges(&nodes);
        trace!(nodes = nodes.len(), edges = edges.len(), "projected builder view");
        Self { nodes, edges }
    }

    pub fn node(&self, id: &str) -> Option<&BuilderNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    pub fn spacers(&self) -> impl Iterator<Item = &BuilderNode> {
        self.nodes.iter().filter(|n| n.kind.is_spacer())
    }

    /// Run `engine` over this view.
    pub fn layout<L: LayoutEngine>(
        &self,
        engine: &L,
        params: &LayoutParams,
    ) -> Result<Vec<PositionedNode>> {
        engine.layout(&self.nodes, &self.edges, params)
    }
}
