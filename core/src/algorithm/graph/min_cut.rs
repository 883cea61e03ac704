//! Minimum cut extraction from a terminated flow network
//!
//! Once no augmenting path remains, the nodes reachable from the source
//! through positive residual capacity form the source side of a minimum cut.
//! Every edge leaving that set is saturated and every edge entering it
//! carries no flow, so the cut capacity equals the maximum flow.
//!
//! Copyright (c) 2026 Tributary contributors

use std::fmt::Debug;

use serde::{Serialize, Deserialize};

use crate::algorithm::graph::max_flow::FlowNetwork;
use crate::data_structures::capacity::FixedCapacity;
use crate::data_structures::graph::NodeIndex;

/// Source/sink partition certifying optimality of a flow
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MinCut<N> {
    /// Nodes reachable from the source in the residual graph
    pub source_side: Vec<N>,

    /// Remaining nodes, including the sink
    pub sink_side: Vec<N>,

    /// Declared edges crossing from the source side to the sink side
    pub cut_edges: Vec<(N, N)>,

    /// Aggregated capacity of the cut edges
    pub capacity: f64,
}

impl<N> Default for MinCut<N> {
    fn default() -> Self {
        Self {
            source_side: Vec::new(),
            sink_side: Vec::new(),
            cut_edges: Vec::new(),
            capacity: 0.0,
        }
    }
}

impl<N: Ord + Clone + Debug> MinCut<N> {
    pub(crate) fn from_network(
        network: &FlowNetwork,
        index: &NodeIndex<N>,
        source: usize,
    ) -> Self {
        let reachable = residual_reachable(network, source);
        let mut source_side = Vec::new();
        let mut sink_side = Vec::new();
        for (position, node) in index.nodes().iter().enumerate() {
            if reachable[position] {
                source_side.push(node.clone());
            } else {
                sink_side.push(node.clone());
            }
        }

        let mut cut_edges = Vec::new();
        let mut capacity = FixedCapacity::ZERO;
        for from in (0..network.node_count()).filter(|&u| reachable[u]) {
            for to in (0..network.node_count()).filter(|&v| !reachable[v]) {
                let edge_capacity = network.capacity(from, to);
                if edge_capacity.is_positive() {
                    cut_edges.push((index.nodes()[from].clone(), index.nodes()[to].clone()));
                    capacity += edge_capacity;
                }
            }
        }

        Self {
            source_side,
            sink_side,
            cut_edges,
            capacity: network.scale().to_f64(capacity),
        }
    }

    pub fn separates(&self, source: &N, sink: &N) -> bool {
        self.source_side.contains(source) && self.sink_side.contains(sink)
    }

    pub fn is_on_source_side(&self, node: &N) -> bool {
        self.source_side.contains(node)
    }
}

/// Nodes reachable from `start` through edges with positive residual capacity
pub(crate) fn residual_reachable(network: &FlowNetwork, start: usize) -> Vec<bool> {
    let node_count = network.node_count();
    let mut reachable = vec![false; node_count];
    if start >= node_count {
        return reachable;
    }

    let mut stack = vec![start];
    reachable[start] = true;
    while let Some(u) = stack.pop() {
        for v in 0..node_count {
            if !reachable[v] && network.residual(u, v).is_positive() {
                reachable[v] = true;
                stack.push(v);
            }
        }
    }
    reachable
}
