//! Flow problem representation
//!
//! A [`FlowProblem`] is the engine's input: a multiset of capacitated directed
//! edges, optionally extra declared nodes, and the source / sink pair. Node
//! identifiers are any ordered type; the [`NodeIndex`] assigns dense matrix
//! indices in the identifiers' natural order so that every traversal over
//! indices is deterministic.
//!
//! Copyright (c) 2026 Tributary contributors

use std::collections::{BTreeMap, BTreeSet};
use std::fmt::Debug;

use log::warn;
use serde::{Serialize, Deserialize};

use crate::algorithm::traits::{Endpoint, FlowError};
use crate::data_structures::capacity::{CapacityScale, FixedCapacity};

/// Declared directed edge with real-valued capacity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeSpec<N> {
    pub from: N,
    pub to: N,
    pub capacity: f64,
}

impl<N> EdgeSpec<N> {
    #[inline]
    pub fn new(from: N, to: N, capacity: f64) -> Self {
        Self { from, to, capacity }
    }
}

impl<N> From<(N, N, f64)> for EdgeSpec<N> {
    fn from((from, to, capacity): (N, N, f64)) -> Self {
        Self::new(from, to, capacity)
    }
}

/// Bijection between node identifiers and dense indices in `[0, N)`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeIndex<N> {
    nodes: Vec<N>,
    positions: BTreeMap<N, usize>,
}

impl<N: Ord + Clone> NodeIndex<N> {
    /// Build the index from any collection of identifiers; duplicates collapse
    pub fn from_nodes<I: IntoIterator<Item = N>>(nodes: I) -> Self {
        let sorted: BTreeSet<N> = nodes.into_iter().collect();
        let nodes: Vec<N> = sorted.into_iter().collect();
        let positions = nodes
            .iter()
            .enumerate()
            .map(|(index, node)| (node.clone(), index))
            .collect();
        Self { nodes, positions }
    }

    #[inline]
    pub fn index_of(&self, node: &N) -> Option<usize> {
        self.positions.get(node).copied()
    }

    #[inline]
    pub fn node(&self, index: usize) -> Option<&N> {
        self.nodes.get(index)
    }

    #[inline]
    pub fn contains(&self, node: &N) -> bool {
        self.positions.contains_key(node)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Identifiers in index order
    pub fn nodes(&self) -> &[N] {
        &self.nodes
    }
}

/// Maximum flow query over a set of capacitated edges
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlowProblem<N> {
    /// Nodes declared independently of any edge
    #[serde(default)]
    pub nodes: Vec<N>,
    pub edges: Vec<EdgeSpec<N>>,
    pub source: N,
    pub sink: N,
}

impl<N: Ord + Clone + Debug> FlowProblem<N> {
    /// Unvalidated problem; the engine copes with whatever reaches it
    pub fn new<E, I>(edges: I, source: N, sink: N) -> Self
    where
        E: Into<EdgeSpec<N>>,
        I: IntoIterator<Item = E>,
    {
        Self {
            nodes: Vec::new(),
            edges: edges.into_iter().map(Into::into).collect(),
            source,
            sink,
        }
    }

    /// Add nodes that exist without incident edges
    pub fn with_nodes<I: IntoIterator<Item = N>>(mut self, nodes: I) -> Self {
        self.nodes.extend(nodes);
        self
    }

    /// Validating builder used by authoring surfaces
    pub fn builder(source: N, sink: N) -> FlowProblemBuilder<N> {
        FlowProblemBuilder {
            nodes: Vec::new(),
            edges: Vec::new(),
            source,
            sink,
        }
    }

    /// Index over declared nodes and every edge endpoint
    pub fn node_index(&self) -> NodeIndex<N> {
        let endpoints = self
            .edges
            .iter()
            .flat_map(|edge| [edge.from.clone(), edge.to.clone()]);
        NodeIndex::from_nodes(self.nodes.iter().cloned().chain(endpoints))
    }

    pub fn contains_node(&self, node: &N) -> bool {
        self.nodes.contains(node)
            || self
                .edges
                .iter()
                .any(|edge| &edge.from == node || &edge.to == node)
    }

    /// Unit fitted to the largest declared capacity
    pub fn capacity_scale(&self) -> CapacityScale {
        CapacityScale::fitted(self.edges.iter().map(|edge| edge.capacity))
    }

    /// Sum duplicate `(from, to)` declarations, ordered by pair
    ///
    /// Declarations are accepted or dropped exactly as the engine does in
    /// [`aggregate_capacities`].
    pub fn aggregated_edges(&self) -> Result<Vec<EdgeSpec<N>>, FlowError> {
        let scale = self.capacity_scale();
        let totals = aggregate_capacities(&self.edges, scale)?;
        Ok(totals
            .into_iter()
            .map(|((from, to), capacity)| EdgeSpec::new(from, to, scale.to_f64(capacity)))
            .collect())
    }

    /// Check that both terminals are present
    pub fn check_endpoints(&self) -> Result<(), FlowError> {
        if !self.contains_node(&self.source) {
            return Err(FlowError::invalid_node(Endpoint::Source, &self.source));
        }
        if !self.contains_node(&self.sink) {
            return Err(FlowError::invalid_node(Endpoint::Sink, &self.sink));
        }
        Ok(())
    }
}

/// Per-pair capacity totals in units of `scale`
///
/// Negative and non-finite declarations are skipped with a warning. A positive
/// capacity that rounds to zero units is a [`FlowError::MalformedEdge`].
pub fn aggregate_capacities<N: Ord + Clone + Debug>(
    edges: &[EdgeSpec<N>],
    scale: CapacityScale,
) -> Result<BTreeMap<(N, N), FixedCapacity>, FlowError> {
    let mut totals: BTreeMap<(N, N), FixedCapacity> = BTreeMap::new();
    for edge in edges {
        if !edge.capacity.is_finite() || edge.capacity < 0.0 {
            warn!(
                "Ignoring capacity {} on edge {:?} -> {:?}",
                edge.capacity, edge.from, edge.to
            );
            continue;
        }
        let units = scale.quantize(edge.capacity);
        if edge.capacity > 0.0 && !units.is_positive() {
            return Err(FlowError::MalformedEdge {
                from: format!("{:?}", edge.from),
                to: format!("{:?}", edge.to),
                capacity: edge.capacity,
                reason: format!(
                    "capacity is below the resolution {:e} set by the largest capacity",
                    scale.unit()
                ),
            });
        }
        *totals.entry((edge.from.clone(), edge.to.clone())).or_default() += units;
    }
    Ok(totals)
}

/// Builder rejecting malformed declarations before they reach the engine
#[derive(Debug, Clone)]
pub struct FlowProblemBuilder<N> {
    nodes: Vec<N>,
    edges: Vec<EdgeSpec<N>>,
    source: N,
    sink: N,
}

impl<N: Ord + Clone + Debug> FlowProblemBuilder<N> {
    pub fn node(mut self, node: N) -> Self {
        self.nodes.push(node);
        self
    }

    /// Declare an edge; capacity must be finite and strictly positive
    pub fn edge(mut self, from: N, to: N, capacity: f64) -> Result<Self, FlowError> {
        if !capacity.is_finite() || capacity <= 0.0 {
            return Err(FlowError::MalformedEdge {
                from: format!("{:?}", from),
                to: format!("{:?}", to),
                capacity,
                reason: "capacity must be a positive number".to_string(),
            });
        }
        self.edges.push(EdgeSpec::new(from, to, capacity));
        Ok(self)
    }

    pub fn build(self) -> Result<FlowProblem<N>, FlowError> {
        let problem = FlowProblem {
            nodes: self.nodes,
            edges: self.edges,
            source: self.source,
            sink: self.sink,
        };
        problem.check_endpoints()?;
        Ok(problem)
    }
}
