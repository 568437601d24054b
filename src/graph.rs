// src/graph.rs
use std::collections::{HashMap, HashSet};

use chrono::{DateTime, Utc};
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::Direction;
use serde::Serialize;
use tracing::debug;

use crate::layout::{spring_layout, LayoutConfig};
use crate::models::{FilterType, TimeRange, WalletSnapshot};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Transaction,
    Address,
}

/// Edge weight: the output value and the time of the funding transaction.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransferEdge {
    pub value: u64,
    pub timestamp: DateTime<Utc>,
}

/// A node ready for the network chart.
#[derive(Debug, Clone, Serialize)]
pub struct NodeView {
    pub id: String,
    pub kind: NodeKind,
    pub x: f64,
    pub y: f64,
    pub degree: usize,
    pub label: String,
    pub size: usize,
    pub color: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct EdgeView {
    pub source: String,
    pub target: String,
    pub value: u64,
    pub timestamp: DateTime<Utc>,
}

/// Directed transaction graph: transaction hash → destination address.
///
/// Hashes and addresses share one key space; a hash that happens to equal an
/// address maps to the same node.
#[derive(Debug, Clone, Default)]
pub struct TransactionGraph {
    graph: DiGraph<(String, NodeKind), TransferEdge>,
    node_indices: HashMap<String, NodeIndex>,
    positions: Vec<[f64; 2]>,
}

impl TransactionGraph {
    pub fn new() -> Self {
        Self::default()
    }

    fn add_node(&mut self, key: &str, kind: NodeKind) -> NodeIndex {
        if let Some(&idx) = self.node_indices.get(key) {
            return idx;
        }
        let idx = self.graph.add_node((key.to_string(), kind));
        self.node_indices.insert(key.to_string(), idx);
        idx
    }

    /// Adds `tx_hash → address`. A repeated pair keeps one edge carrying the
    /// latest value and timestamp.
    pub fn add_edge(&mut self, tx_hash: &str, address: &str, edge: TransferEdge) {
        let from = self.add_node(tx_hash, NodeKind::Transaction);
        let to = self.add_node(address, NodeKind::Address);
        self.graph.update_edge(from, to, edge);
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn contains_node(&self, key: &str) -> bool {
        self.node_indices.contains_key(key)
    }

    /// Edge weight for `tx_hash → address`, if present.
    pub fn edge(&self, tx_hash: &str, address: &str) -> Option<&TransferEdge> {
        let from = *self.node_indices.get(tx_hash)?;
        let to = *self.node_indices.get(address)?;
        let idx = self.graph.find_edge(from, to)?;
        self.graph.edge_weight(idx)
    }

    /// Number of distinct successors of `key`.
    pub fn degree(&self, key: &str) -> usize {
        self.node_indices
            .get(key)
            .map(|&idx| self.degree_of(idx))
            .unwrap_or(0)
    }

    fn degree_of(&self, idx: NodeIndex) -> usize {
        self.graph
            .neighbors_directed(idx, Direction::Outgoing)
            .collect::<HashSet<_>>()
            .len()
    }

    /// Runs the spring layout over the current structure.
    pub fn apply_layout(&mut self, cfg: &LayoutConfig) {
        let edges: Vec<(usize, usize)> = self
            .graph
            .edge_indices()
            .filter_map(|e| self.graph.edge_endpoints(e))
            .map(|(a, b)| (a.index(), b.index()))
            .collect();
        self.positions = spring_layout(self.graph.node_count(), &edges, cfg);
    }

    pub fn position(&self, key: &str) -> Option<[f64; 2]> {
        let idx = self.node_indices.get(key)?;
        self.positions.get(idx.index()).copied()
    }

    pub fn nodes(&self) -> Vec<NodeView> {
        self.graph
            .node_indices()
            .map(|idx| {
                let (id, kind) = &self.graph[idx];
                let [x, y] = self.positions.get(idx.index()).copied().unwrap_or([0.0, 0.0]);
                let degree = self.degree_of(idx);
                NodeView {
                    id: id.clone(),
                    kind: *kind,
                    x,
                    y,
                    degree,
                    label: format!("Address: {}, Transactions: {}", id, degree),
                    size: 20 + degree * 5,
                    color: degree,
                }
            })
            .collect()
    }

    pub fn edges(&self) -> Vec<EdgeView> {
        self.graph
            .edge_indices()
            .filter_map(|e| {
                let (a, b) = self.graph.edge_endpoints(e)?;
                let weight = self.graph.edge_weight(e)?;
                Some(EdgeView {
                    source: self.graph[a].0.clone(),
                    target: self.graph[b].0.clone(),
                    value: weight.value,
                    timestamp: weight.timestamp,
                })
            })
            .collect()
    }
}

impl Serialize for TransactionGraph {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeStruct;
        let mut s = serializer.serialize_struct("TransactionGraph", 2)?;
        s.serialize_field("nodes", &self.nodes())?;
        s.serialize_field("edges", &self.edges())?;
        s.end()
    }
}

/// Builds the filtered transaction graph and lays it out.
pub fn build_graph(
    snapshot: &WalletSnapshot,
    filter: FilterType,
    min_amount: Option<u64>,
    time_range: Option<TimeRange>,
    layout: &LayoutConfig,
) -> TransactionGraph {
    let mut graph = TransactionGraph::new();

    for tx in &snapshot.txs {
        if time_range.is_some_and(|range| !range.contains(tx.time)) {
            continue;
        }
        if !filter.admits(tx.result) {
            continue;
        }

        for out in &tx.outputs {
            let Some(addr) = out.addr.as_deref() else {
                continue;
            };
            if min_amount.is_some_and(|min| out.value < min) {
                continue;
            }
            graph.add_edge(
                &tx.hash,
                addr,
                TransferEdge {
                    value: out.value,
                    timestamp: tx.time,
                },
            );
        }
    }

    graph.apply_layout(layout);
    debug!(
        "Built transaction graph: {} nodes, {} edges",
        graph.node_count(),
        graph.edge_count()
    );
    graph
}
