// src/view/layout.rs

//! Layout adapter.
//!
//! Rendering consumes positioned nodes from a [`LayoutEngine`]. The crate
//! ships [`LongestPathLayout`], a small layered layout:
//!
//! 1. Rank assignment: longest path from the sources (topological depth).
//! 2. Ordering within a rank: one barycenter sweep over predecessor slots.
//! 3. Coordinates: ranks left to right, nodes stacked top to bottom.

use std::cmp::Ordering;
use std::collections::HashMap;

use petgraph::Direction;
use petgraph::algo::toposort;
use petgraph::graphmap::DiGraphMap;
use serde::Deserialize;

use crate::errors::{BuilderError, Result};
use crate::view::node::{BuilderEdge, BuilderNode};

/// Direction in which ranks advance. Only left-to-right is used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub enum RankDirection {
    #[default]
    LeftToRight,
}

/// Named layout parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutParams {
    /// Gap between nodes of the same rank.
    pub node_separation: f64,
    /// Gap between consecutive ranks.
    pub rank_separation: f64,
    pub margin_x: f64,
    pub margin_y: f64,
    pub rank_direction: RankDirection,
}

impl LayoutParams {
    /// Parameters for the editable builder canvas (with outer padding).
    pub fn builder() -> Self {
        Self {
            node_separation: 25.0,
            rank_separation: 35.0,
            margin_x: 20.0,
            margin_y: 20.0,
            rank_direction: RankDirection::LeftToRight,
        }
    }

    /// Parameters for the read-only viewer (no margins).
    pub fn viewer() -> Self {
        Self {
            margin_x: 0.0,
            margin_y: 0.0,
            ..Self::builder()
        }
    }
}

impl Default for LayoutParams {
    fn default() -> Self {
        Self::builder()
    }
}

/// A node with its top-left position.
#[derive(Debug, Clone, PartialEq)]
pub struct PositionedNode {
    pub id: String,
    pub rank: usize,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl PositionedNode {
    /// `true` if the two boxes share any area.
    pub fn overlaps(&self, other: &PositionedNode) -> bool {
        self.x < other.x + other.width
            && other.x < self.x + self.width
            && self.y < other.y + other.height
            && other.y < self.y + self.height
    }
}

/// Trait abstracting the graph-drawing algorithm.
pub trait LayoutEngine {
    /// Position every node so that no two overlap and every edge points to a
    /// later rank.
    fn layout(
        &self,
        nodes: &[BuilderNode],
        edges: &[BuilderEdge],
        params: &LayoutParams,
    ) -> Result<Vec<PositionedNode>>;
}

/// Longest-path layered layout.
#[derive(Debug, Clone, Copy, Default)]
pub struct LongestPathLayout;

impl LayoutEngine for LongestPathLayout {
    fn layout(
        &self,
        nodes: &[BuilderNode],
        edges: &[BuilderEdge],
        params: &LayoutParams,
    ) -> Result<Vec<PositionedNode>> {
        if nodes.is_empty() {
            return Ok(Vec::new());
        }

        let mut graph: DiGraphMap<&str, ()> = DiGraphMap::new();
        for node in nodes {
            graph.add_node(node.id.as_str());
        }
        for edge in edges {
            let (source, target) = (edge.source.as_str(), edge.target.as_str());
            if !graph.contains_node(source) || !graph.contains_node(target) {
                return Err(BuilderError::ConfigError(format!(
                    "edge '{}' references a node that is not in the layout",
                    edge.id
                )));
            }
            graph.add_edge(source, target, ());
        }

        let order = toposort(&graph, None).map_err(|cycle| {
            BuilderError::GraphCycle(format!(
                "layout input contains a cycle involving '{}'",
                cycle.node_id()
            ))
        })?;

        let ranks = assign_ranks(&graph, &order);
        let layers = order_layers(nodes, &graph, &ranks);

        Ok(assign_coordinates(&layers, &ranks, params))
    }
}

/// Rank = length of the longest path from any source.
fn assign_ranks<'a>(graph: &DiGraphMap<&'a str, ()>, order: &[&'a str]) -> HashMap<&'a str, usize> {
    let mut ranks: HashMap<&str, usize> = HashMap::with_capacity(order.len());
    for &id in order {
        let rank = graph
            .neighbors_directed(id, Direction::Incoming)
            .filter_map(|pred| ranks.get(pred))
            .map(|r| r + 1)
            .max()
            .unwrap_or(0);
        ranks.insert(id, rank);
    }
    ranks
}

/// Group nodes by rank and order each rank by the mean slot of its
/// predecessors in earlier ranks. Nodes without predecessors keep their
/// input order.
fn order_layers<'a>(
    nodes: &'a [BuilderNode],
    graph: &DiGraphMap<&'a str, ()>,
    ranks: &HashMap<&'a str, usize>,
) -> Vec<Vec<&'a BuilderNode>> {
    let max_rank = ranks.values().copied().max().unwrap_or(0);
    let mut layers: Vec<Vec<&BuilderNode>> = vec![Vec::new(); max_rank + 1];
    for node in nodes {
        let rank = ranks.get(node.id.as_str()).copied().unwrap_or(0);
        layers[rank].push(node);
    }

    let mut slots: HashMap<&str, usize> = HashMap::with_capacity(nodes.len());
    for layer in layers.iter_mut() {
        let mut keyed: Vec<(f64, &BuilderNode)> = layer
            .iter()
            .enumerate()
            .map(|(index, node)| {
                let pred_slots: Vec<usize> = graph
                    .neighbors_directed(node.id.as_str(), Direction::Incoming)
                    .filter_map(|pred| slots.get(pred).copied())
                    .collect();
                let key = if pred_slots.is_empty() {
                    index as f64
                } else {
                    pred_slots.iter().sum::<usize>() as f64 / pred_slots.len() as f64
                };
                (key, *node)
            })
            .collect();

        keyed.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(Ordering::Equal));

        *layer = keyed.into_iter().map(|(_, node)| node).collect();
        for (slot, node) in layer.iter().enumerate() {
            slots.insert(node.id.as_str(), slot);
        }
    }

    layers
}

fn assign_coordinates(
    layers: &[Vec<&BuilderNode>],
    ranks: &HashMap<&str, usize>,
    params: &LayoutParams,
) -> Vec<PositionedNode> {
    let mut positioned = Vec::new();
    let mut x = params.margin_x;

    for layer in layers {
        let rank_width = layer.iter().map(|n| n.width).fold(0.0_f64, f64::max);
        let mut y = params.margin_y;

        for node in layer {
            positioned.push(PositionedNode {
                id: node.id.clone(),
                rank: ranks.get(node.id.as_str()).copied().unwrap_or(0),
                x: x + (rank_width - node.width) / 2.0,
                y,
                width: node.width,
                height: node.height,
            });
            y += node.height + params.node_separation;
        }

        x += rank_width + params.rank_separation;
    }

    positioned
}
