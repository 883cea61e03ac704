//! Ford-Fulkerson Maximum Flow Implementation
//!
//! This module implements the Ford-Fulkerson method with depth-first search
//! for augmenting-path discovery over a dense residual network.
//!
//! # Algorithm
//!
//! 1. Aggregate every declared edge into an N×N capacity matrix
//! 2. Search for a source-sink path with positive residual capacity,
//!    exploring neighbours in ascending node index
//! 3. Push the path's bottleneck along it, updating the antisymmetric flow
//!    matrix in both directions
//! 4. Stop when the sink is unreachable in the residual graph
//!
//! Node indices follow the identifiers' natural order, so for identical input
//! the same sequence of augmenting paths is found and the per-edge flow
//! decomposition is reproducible.
//!
//! # Numeric Model
//!
//! All residual arithmetic runs on [`FixedCapacity`] units of a decimal
//! [`CapacityScale`] fitted to the largest declared capacity. The computation
//! is exact in that representation and every augmentation raises the total by
//! at least one unit, which bounds the loop by the total capacity.
//!
//! # Complexity
//!
//! - **Time**: O(|f*| · V²) with the dense matrix scan per search step
//! - **Space**: O(V²) for capacity and flow matrices
//!
//! Copyright (c) 2026 Tributary contributors

use std::collections::BTreeMap;
use std::fmt::Debug;

use log::{debug, info, warn};
use rayon::prelude::*;
use serde::{Serialize, Deserialize};

use crate::algorithm::graph::min_cut::MinCut;
use crate::algorithm::traits::{
    Algorithm, AlgorithmComplexity, AlgorithmParameter, Endpoint, FlowError,
    ParameterConstraints, ParameterType,
};
use crate::config::SolverConfig;
use crate::data_structures::capacity::{approx_eq, CapacityScale, FixedCapacity};
use crate::data_structures::graph::{aggregate_capacities, EdgeSpec, FlowProblem, NodeIndex};
use crate::execution::history::ExecutionHistory;

/// Dense residual network over node indices
///
/// `flow[i][j] == -flow[j][i]` holds after every operation and the residual
/// capacity `capacity[i][j] - flow[i][j]` never drops below zero.
#[derive(Debug, Clone, PartialEq)]
pub struct FlowNetwork {
    /// Number of vertices in network
    node_count: usize,
    /// Aggregated capacity of all declared edges per ordered pair
    capacity: Vec<Vec<FixedCapacity>>,
    /// Net flow per ordered pair
    flow: Vec<Vec<FixedCapacity>>,
    /// Real value of the matrix units
    scale: CapacityScale,
}

impl FlowNetwork {
    /// Create an empty network with the given vertex count
    pub fn new(node_count: usize) -> Self {
        Self::with_scale(node_count, CapacityScale::DEFAULT)
    }

    pub fn with_scale(node_count: usize, scale: CapacityScale) -> Self {
        Self {
            node_count,
            capacity: vec![vec![FixedCapacity::ZERO; node_count]; node_count],
            flow: vec![vec![FixedCapacity::ZERO; node_count]; node_count],
            scale,
        }
    }

    /// Build the capacity matrix of a problem over its node index
    ///
    /// Capacities are quantized to a unit fitted to the largest of them.
    pub fn from_edges<N: Ord + Clone + Debug>(
        index: &NodeIndex<N>,
        edges: &[EdgeSpec<N>],
    ) -> Result<Self, FlowError> {
        let scale = CapacityScale::fitted(edges.iter().map(|edge| edge.capacity));
        let mut network = Self::with_scale(index.len(), scale);
        for ((from, to), capacity) in aggregate_capacities(edges, scale)? {
            // endpoints come from the same problem, so both are indexed
            if let (Some(from), Some(to)) = (index.index_of(&from), index.index_of(&to)) {
                network.add_capacity(from, to, capacity);
            }
        }
        Ok(network)
    }

    /// Add capacity to an ordered pair; negative amounts are dropped
    pub fn add_capacity(&mut self, from: usize, to: usize, amount: FixedCapacity) {
        if amount.is_negative() {
            warn!(
                "Ignoring negative capacity {} on edge {} -> {}",
                self.scale.to_f64(amount),
                from,
                to
            );
            return;
        }
        self.capacity[from][to] += amount;
    }

    #[inline]
    pub fn node_count(&self) -> usize {
        self.node_count
    }

    #[inline]
    pub fn scale(&self) -> CapacityScale {
        self.scale
    }

    #[inline]
    pub fn capacity(&self, from: usize, to: usize) -> FixedCapacity {
        self.capacity[from][to]
    }

    #[inline]
    pub fn flow(&self, from: usize, to: usize) -> FixedCapacity {
        self.flow[from][to]
    }

    /// Remaining pushable capacity on an ordered pair
    #[inline]
    pub fn residual(&self, from: usize, to: usize) -> FixedCapacity {
        self.capacity[from][to] - self.flow[from][to]
    }

    /// Number of ordered pairs with positive capacity
    pub fn edge_count(&self) -> usize {
        self.capacity
            .iter()
            .map(|row| row.iter().filter(|c| c.is_positive()).count())
            .sum()
    }

    /// Push `amount` along consecutive vertices of `path`
    pub fn augment(&mut self, path: &[usize], amount: FixedCapacity) {
        for pair in path.windows(2) {
            let (u, v) = (pair[0], pair[1]);
            self.flow[u][v] += amount;
            self.flow[v][u] -= amount;
        }
    }

    /// Depth-first search for an augmenting path from `source` to `sink`
    pub fn find_augmenting_path(&self, source: usize, sink: usize) -> Option<AugmentingPath> {
        if source == sink || source >= self.node_count || sink >= self.node_count {
            return None;
        }

        let mut search = DepthFirstSearch::new(self, sink);
        let bottleneck = search.descend(source);
        if !bottleneck.is_positive() {
            return None;
        }

        let vertices = search.path_to_sink(source)?;
        Some(AugmentingPath { vertices, bottleneck })
    }
}

/// Source-to-sink path with positive residual capacity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AugmentingPath {
    /// Vertex indices from source to sink
    pub vertices: Vec<usize>,
    /// Minimum residual capacity along the path
    pub bottleneck: FixedCapacity,
}

/// Per-search state: visited set and predecessor map
struct DepthFirstSearch<'a> {
    network: &'a FlowNetwork,
    sink: usize,
    visited: Vec<bool>,
    parent: Vec<Option<usize>>,
}

impl<'a> DepthFirstSearch<'a> {
    fn new(network: &'a FlowNetwork, sink: usize) -> Self {
        Self {
            network,
            sink,
            visited: vec![false; network.node_count()],
            parent: vec![None; network.node_count()],
        }
    }

    /// Returns the bottleneck of the path found below `u`, or zero
    fn descend(&mut self, u: usize) -> FixedCapacity {
        if u == self.sink {
            return FixedCapacity::UNBOUNDED;
        }
        self.visited[u] = true;

        for v in 0..self.network.node_count() {
            let residual = self.network.residual(u, v);
            if residual.is_positive() && !self.visited[v] {
                self.parent[v] = Some(u);
                let bottleneck = self.descend(v);
                if bottleneck.is_positive() {
                    return bottleneck.min(residual);
                }
            }
        }

        FixedCapacity::ZERO
    }

    fn path_to_sink(&self, source: usize) -> Option<Vec<usize>> {
        let mut vertices = vec![self.sink];
        let mut current = self.sink;
        while current != source {
            current = self.parent[current]?;
            vertices.push(current);
        }
        vertices.reverse();
        Some(vertices)
    }
}

/// Realized flow on one declared edge
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EdgeFlow {
    /// Aggregated capacity of all declarations of the pair
    pub capacity: f64,
    /// Net flow, reported as zero when non-positive
    pub flow: f64,
    /// Flow equals capacity within tolerance
    pub saturated: bool,
}

/// Maximum flow result with per-edge flows and certificate
#[derive(Debug, Clone, PartialEq)]
pub struct MaxFlowResult<N> {
    /// Maximum flow value
    pub max_flow: f64,
    /// Realized flow per declared pair with positive capacity
    pub edges: BTreeMap<(N, N), EdgeFlow>,
    /// Minimum cut certifying optimality
    pub min_cut: MinCut<N>,
    /// Augmenting paths in the order they were applied
    pub history: ExecutionHistory<N>,
    /// Number of augmentations performed
    pub augmentations: usize,
}

impl<N: Ord + Clone> MaxFlowResult<N> {
    fn degenerate() -> Self {
        Self {
            max_flow: 0.0,
            edges: BTreeMap::new(),
            min_cut: MinCut::default(),
            history: ExecutionHistory::new(),
            augmentations: 0,
        }
    }

    /// Reported flow on `from -> to`, if that pair was declared
    pub fn flow(&self, from: &N, to: &N) -> Option<f64> {
        self.edges
            .get(&(from.clone(), to.clone()))
            .map(|edge| edge.flow)
    }

    pub fn is_saturated(&self, from: &N, to: &N) -> bool {
        self.edges
            .get(&(from.clone(), to.clone()))
            .map_or(false, |edge| edge.saturated)
    }

    /// Mapping from declared pair to realized flow
    pub fn edge_flows(&self) -> BTreeMap<(N, N), f64> {
        self.edges
            .iter()
            .map(|(pair, edge)| (pair.clone(), edge.flow))
            .collect()
    }

    pub fn saturated_edges(&self) -> Vec<(N, N)> {
        self.edges
            .iter()
            .filter(|(_, edge)| edge.saturated)
            .map(|(pair, _)| pair.clone())
            .collect()
    }
}

/// Ford-Fulkerson solver with DFS augmentation
#[derive(Debug, Clone, Default)]
pub struct MaxFlowSolver {
    config: SolverConfig,
}

impl MaxFlowSolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: SolverConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Compute the maximum flow of a single problem
    pub fn solve<N>(&self, problem: &FlowProblem<N>) -> Result<MaxFlowResult<N>, FlowError>
    where
        N: Ord + Clone + Debug,
    {
        self.config.validate()?;
        problem.check_endpoints()?;

        if problem.source == problem.sink {
            info!("Source and sink are both {:?}; max flow is 0", problem.source);
            return Ok(MaxFlowResult::degenerate());
        }

        let index = problem.node_index();
        let mut network = FlowNetwork::from_edges(&index, &problem.edges)?;
        let scale = network.scale();
        let source = index
            .index_of(&problem.source)
            .ok_or_else(|| FlowError::invalid_node(Endpoint::Source, &problem.source))?;
        let sink = index
            .index_of(&problem.sink)
            .ok_or_else(|| FlowError::invalid_node(Endpoint::Sink, &problem.sink))?;

        let limit = self
            .config
            .augmentation_limit(network.node_count(), network.edge_count());
        let mut history = ExecutionHistory::new();
        let mut total = FixedCapacity::ZERO;
        let mut augmentations = 0usize;

        while let Some(path) = network.find_augmenting_path(source, sink) {
            if let Some(limit) = limit {
                if augmentations >= limit {
                    return Err(FlowError::ResourceExhausted(format!(
                        "augmentation limit of {} reached with flow {}",
                        limit,
                        scale.to_f64(total)
                    )));
                }
            }

            network.augment(&path.vertices, path.bottleneck);
            total += path.bottleneck;
            augmentations += 1;
            debug!(
                "Augmentation {}: pushed {} along {:?}, total {}",
                augmentations,
                scale.to_f64(path.bottleneck),
                path.vertices,
                scale.to_f64(total)
            );

            if self.config.record_history {
                let nodes = path
                    .vertices
                    .iter()
                    .filter_map(|&i| index.node(i).cloned())
                    .collect();
                history.record(nodes, scale.to_f64(path.bottleneck), scale.to_f64(total));
            }
        }

        let edges = self.realized_flows(&network, &index);
        let min_cut = MinCut::from_network(&network, &index, source);
        let max_flow = scale.to_f64(total);
        info!(
            "Max flow {:?} -> {:?}: {} after {} augmentations",
            problem.source, problem.sink, max_flow, augmentations
        );

        Ok(MaxFlowResult {
            max_flow,
            edges,
            min_cut,
            history,
            augmentations,
        })
    }

    /// Solve independent problems in parallel, preserving input order
    pub fn solve_batch<N>(
        &self,
        problems: &[FlowProblem<N>],
    ) -> Vec<Result<MaxFlowResult<N>, FlowError>>
    where
        N: Ord + Clone + Debug + Send + Sync,
    {
        problems
            .par_iter()
            .map(|problem| self.solve(problem))
            .collect()
    }

    fn realized_flows<N: Ord + Clone>(
        &self,
        network: &FlowNetwork,
        index: &NodeIndex<N>,
    ) -> BTreeMap<(N, N), EdgeFlow> {
        let scale = network.scale();
        let mut edges = BTreeMap::new();
        for (from, from_node) in index.nodes().iter().enumerate() {
            for (to, to_node) in index.nodes().iter().enumerate() {
                let capacity = network.capacity(from, to);
                if !capacity.is_positive() {
                    continue;
                }
                let capacity = scale.to_f64(capacity);
                let flow = scale.to_f64(network.flow(from, to).clamp_non_negative());
                edges.insert(
                    (from_node.clone(), to_node.clone()),
                    EdgeFlow {
                        capacity,
                        flow,
                        saturated: approx_eq(flow, capacity, self.config.epsilon),
                    },
                );
            }
        }
        edges
    }
}

impl Algorithm for MaxFlowSolver {
    fn name(&self) -> &'static str {
        "Ford-Fulkerson"
    }

    fn category(&self) -> &'static str {
        "max_flow"
    }

    fn description(&self) -> String {
        "Ford-Fulkerson maximum flow with depth-first augmenting paths explored in \
         ascending node order over a dense residual network."
            .to_string()
    }

    fn complexity(&self) -> AlgorithmComplexity {
        AlgorithmComplexity {
            time_complexity: "O(|f*| · V²)".to_string(),
            space_complexity: "O(V²)".to_string(),
        }
    }

    fn parameters(&self) -> Vec<AlgorithmParameter> {
        vec![
            AlgorithmParameter {
                name: "epsilon".to_string(),
                value: self.config.epsilon.to_string(),
                value_type: ParameterType::Float,
                constraints: Some(ParameterConstraints { min: Some(0.0), max: None }),
            },
            AlgorithmParameter {
                name: "augmentation_limit_factor".to_string(),
                value: self
                    .get_parameter("augmentation_limit_factor")
                    .unwrap_or_default(),
                value_type: ParameterType::OptionalInteger,
                constraints: Some(ParameterConstraints { min: Some(1.0), max: None }),
            },
            AlgorithmParameter {
                name: "record_history".to_string(),
                value: self.config.record_history.to_string(),
                value_type: ParameterType::Boolean,
                constraints: None,
            },
        ]
    }

    fn set_parameter(&mut self, name: &str, value: &str) -> Result<(), FlowError> {
        let mut config = self.config.clone();
        match name {
            "epsilon" => {
                config.epsilon = value
                    .parse::<f64>()
                    .map_err(|_| FlowError::invalid_parameter(name, "epsilon must be a number"))?;
            }
            "augmentation_limit_factor" => {
                config.augmentation_limit_factor = match value {
                    "none" => None,
                    _ => Some(value.parse::<usize>().map_err(|_| {
                        FlowError::invalid_parameter(name, "expected a positive integer or none")
                    })?),
                };
            }
            "record_history" => {
                config.record_history = value
                    .parse::<bool>()
                    .map_err(|_| FlowError::invalid_parameter(name, "expected true or false"))?;
            }
            _ => return Err(FlowError::invalid_parameter(name, "unknown parameter")),
        }
        config.validate()?;
        self.config = config;
        Ok(())
    }

    fn get_parameter(&self, name: &str) -> Option<String> {
        match name {
            "epsilon" => Some(self.config.epsilon.to_string()),
            "augmentation_limit_factor" => Some(
                self.config
                    .augmentation_limit_factor
                    .map_or_else(|| "none".to_string(), |factor| factor.to_string()),
            ),
            "record_history" => Some(self.config.record_history.to_string()),
            _ => None,
        }
    }
}

/// Maximum flow value and per-edge flow mapping for a list of edges
pub fn compute_max_flow<N, E, I>(
    edges: I,
    source: N,
    sink: N,
) -> Result<(f64, BTreeMap<(N, N), f64>), FlowError>
where
    N: Ord + Clone + Debug,
    E: Into<EdgeSpec<N>>,
    I: IntoIterator<Item = E>,
{
    let problem = FlowProblem::new(edges, source, sink);
    let solver = MaxFlowSolver::with_config(SolverConfig::default().with_history(false));
    let result = solver.solve(&problem)?;
    Ok((result.max_flow, result.edge_flows()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn init_logger() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn clrs_edges() -> Vec<(char, char, f64)> {
        vec![
            ('A', 'B', 16.0),
            ('A', 'C', 13.0),
            ('B', 'D', 12.0),
            ('C', 'B', 10.0),
            ('B', 'C', 4.0),
            ('C', 'E', 14.0),
            ('D', 'F', 20.0),
            ('E', 'D', 7.0),
            ('E', 'F', 4.0),
            ('C', 'D', 9.0),
        ]
    }

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() <= expected.abs() * 1e-12,
            "{} differs from {}",
            actual,
            expected
        );
    }

    fn assert_antisymmetric(network: &FlowNetwork) {
        for u in 0..network.node_count() {
            for v in 0..network.node_count() {
                assert_eq!(network.flow(u, v), -network.flow(v, u));
                assert!(!network.residual(u, v).is_negative());
            }
        }
    }

    #[test]
    fn test_flow_network_creation() {
        let mut network = FlowNetwork::new(4);
        network.add_capacity(0, 1, FixedCapacity::from_units(10));
        network.add_capacity(1, 2, FixedCapacity::from_units(5));
        network.add_capacity(1, 2, FixedCapacity::from_units(3));
        network.add_capacity(2, 3, FixedCapacity::from_units(8));

        assert_eq!(network.node_count(), 4);
        assert_eq!(network.edge_count(), 3);
        assert_eq!(network.capacity(1, 2), FixedCapacity::from_units(8));
        assert_eq!(network.residual(0, 1), FixedCapacity::from_units(10));
        assert_eq!(network.residual(1, 0), FixedCapacity::ZERO);
    }

    #[test]
    fn test_negative_capacity_is_dropped() {
        let mut network = FlowNetwork::new(2);
        network.add_capacity(0, 1, FixedCapacity::from_units(-4));
        assert_eq!(network.capacity(0, 1), FixedCapacity::ZERO);
        assert_eq!(network.find_augmenting_path(0, 1), None);
    }

    #[test]
    fn test_augment_keeps_antisymmetry() {
        let mut network = FlowNetwork::new(3);
        network.add_capacity(0, 1, FixedCapacity::from_units(5));
        network.add_capacity(1, 2, FixedCapacity::from_units(3));

        let path = network.find_augmenting_path(0, 2).unwrap();
        assert_eq!(path.vertices, vec![0, 1, 2]);
        assert_eq!(path.bottleneck, FixedCapacity::from_units(3));

        network.augment(&path.vertices, path.bottleneck);
        assert_antisymmetric(&network);
        assert_eq!(network.residual(1, 0), FixedCapacity::from_units(3));
        assert_eq!(network.find_augmenting_path(0, 2), None);
    }

    #[test]
    fn test_clrs_network() {
        init_logger();
        let (max_flow, flows) = compute_max_flow(clrs_edges(), 'A', 'F').unwrap();
        assert_eq!(max_flow, 23.0);
        assert_eq!(flows.len(), 10);

        let into_sink: f64 = flows
            .iter()
            .filter(|((_, to), _)| *to == 'F')
            .map(|(_, flow)| flow)
            .sum();
        assert_eq!(into_sink, 23.0);
    }

    #[test]
    fn test_clrs_first_path_follows_index_order() {
        let problem = FlowProblem::new(clrs_edges(), 'A', 'F');
        let result = MaxFlowSolver::new().solve(&problem).unwrap();

        let first = &result.history.steps()[0];
        assert_eq!(first.path, vec!['A', 'B', 'C', 'D', 'F']);
        assert_eq!(first.bottleneck, 4.0);
        assert_eq!(result.history.len(), result.augmentations);
        assert_eq!(result.history.total_flow(), 23.0);
        assert_eq!(result.min_cut.capacity, 23.0);
        assert!(result.min_cut.separates(&'A', &'F'));
    }

    #[test]
    fn test_single_edge() {
        let (max_flow, flows) = compute_max_flow(vec![("A", "B", 5.0)], "A", "B").unwrap();
        assert_eq!(max_flow, 5.0);
        assert_eq!(flows.get(&("A", "B")), Some(&5.0));
    }

    #[test]
    fn test_undeclared_sink_is_invalid() {
        let result = compute_max_flow(vec![("A", "B", 10.0)], "A", "C");
        assert!(matches!(
            result,
            Err(FlowError::InvalidNode { endpoint: Endpoint::Sink, .. })
        ));

        let result = compute_max_flow(vec![("A", "B", 10.0)], "Z", "B");
        assert!(matches!(
            result,
            Err(FlowError::InvalidNode { endpoint: Endpoint::Source, .. })
        ));
    }

    #[test]
    fn test_declared_unreachable_sink() {
        let problem = FlowProblem::new(vec![("A", "B", 10.0)], "A", "C").with_nodes(vec!["C"]);
        let result = MaxFlowSolver::new().solve(&problem).unwrap();
        assert_eq!(result.max_flow, 0.0);
        assert_eq!(result.flow(&"A", &"B"), Some(0.0));
        assert_eq!(result.min_cut.capacity, 0.0);
        assert_eq!(result.min_cut.source_side, vec!["A", "B"]);
        assert!(result.history.is_empty());
    }

    #[test]
    fn test_parallel_edges_aggregate() {
        let (max_flow, flows) =
            compute_max_flow(vec![("A", "B", 3.0), ("A", "B", 4.0)], "A", "B").unwrap();
        assert_eq!(max_flow, 7.0);
        assert_eq!(flows.len(), 1);
        assert_eq!(flows.get(&("A", "B")), Some(&7.0));
    }

    #[test]
    fn test_source_equals_sink() {
        let (max_flow, flows) = compute_max_flow(clrs_edges(), 'A', 'A').unwrap();
        assert_eq!(max_flow, 0.0);
        assert!(flows.is_empty());
    }

    #[test]
    fn test_zero_capacity_edge_carries_nothing() {
        let problem = FlowProblem::new(
            vec![("s", "a", 0.0), ("a", "t", 5.0), ("s", "t", 2.0)],
            "s",
            "t",
        );
        let result = MaxFlowSolver::new().solve(&problem).unwrap();
        assert_eq!(result.max_flow, 2.0);
        assert_eq!(result.flow(&"s", &"a"), None);
        assert_eq!(result.flow(&"a", &"t"), Some(0.0));
        assert!(result.is_saturated(&"s", &"t"));
        assert!(!result.is_saturated(&"a", &"t"));
    }

    #[test]
    fn test_cancelled_reverse_flow_is_reported_as_zero() {
        // first DFS path uses a->b, second pushes back across it
        let edges = vec![
            ("s", "a", 1.0),
            ("s", "b", 1.0),
            ("a", "b", 1.0),
            ("a", "t", 1.0),
            ("b", "t", 1.0),
        ];
        let result = MaxFlowSolver::new()
            .solve(&FlowProblem::new(edges, "s", "t"))
            .unwrap();
        assert_eq!(result.max_flow, 2.0);
        assert_eq!(result.history.steps()[0].path, vec!["s", "a", "b", "t"]);
        assert_eq!(result.history.steps()[1].path, vec!["s", "b", "a", "t"]);
        assert_eq!(result.flow(&"a", &"b"), Some(0.0));
        assert_eq!(result.saturated_edges().len(), 4);
    }

    #[test]
    fn test_fractional_capacities_are_exact() {
        let edges = vec![(0, 1, 0.1), (0, 1, 0.2), (1, 2, 0.3), (0, 2, 0.7)];
        let (max_flow, flows) = compute_max_flow(edges, 0, 2).unwrap();
        assert_eq!(max_flow, 1.0);
        assert_eq!(flows.get(&(0, 1)), Some(&0.3));
    }

    #[test]
    fn test_self_loop_is_ignored() {
        let (max_flow, flows) =
            compute_max_flow(vec![(1, 1, 4.0), (1, 2, 2.0)], 1, 2).unwrap();
        assert_eq!(max_flow, 2.0);
        assert_eq!(flows.get(&(1, 1)), Some(&0.0));
    }

    #[test]
    fn test_non_finite_capacity_does_not_crash() {
        let edges = vec![
            ("s", "t", f64::NAN),
            ("s", "t", f64::INFINITY),
            ("s", "m", 1.0),
            ("m", "t", 1.0),
        ];
        let (max_flow, _) = compute_max_flow(edges, "s", "t").unwrap();
        assert_eq!(max_flow, 1.0);
    }

    #[test]
    fn test_tiny_capacity_keeps_its_edge() {
        let (max_flow, flows) = compute_max_flow(vec![("A", "B", 1e-10)], "A", "B").unwrap();
        assert_close(max_flow, 1e-10);
        assert_close(flows[&("A", "B")], 1e-10);
    }

    #[test]
    fn test_huge_capacities_aggregate() {
        let (max_flow, _) = compute_max_flow(vec![("A", "B", 1e30)], "A", "B").unwrap();
        assert_close(max_flow, 1e30);

        let edges = vec![("A", "B", 1e29), ("A", "B", 1e29)];
        let (max_flow, flows) = compute_max_flow(edges, "A", "B").unwrap();
        assert_close(max_flow, 2e29);
        assert_close(flows[&("A", "B")], 2e29);
    }

    #[test]
    fn test_capacity_below_resolution_is_rejected() {
        let edges = vec![("A", "B", 1e30), ("B", "C", 1e-10)];
        let result = compute_max_flow(edges, "A", "C");
        assert!(matches!(
            result,
            Err(FlowError::MalformedEdge { ref to, .. }) if to == "\"C\""
        ));
    }

    #[test]
    fn test_saturation_is_relative_to_small_capacities() {
        let problem = FlowProblem::new(vec![("s", "a", 2e-12), ("a", "t", 1e-12)], "s", "t");
        let result = MaxFlowSolver::new().solve(&problem).unwrap();
        assert_close(result.max_flow, 1e-12);
        assert!(result.is_saturated(&"a", &"t"));
        assert!(!result.is_saturated(&"s", &"a"));
    }

    #[test]
    fn test_negative_declaration_is_dropped_before_aggregation() {
        let problem = FlowProblem::new(vec![("A", "B", -3.0), ("A", "B", 5.0)], "A", "B");
        let result = MaxFlowSolver::new().solve(&problem).unwrap();
        assert_eq!(result.max_flow, 5.0);
        assert_eq!(result.edges[&("A", "B")].capacity, 5.0);
        assert_eq!(problem.aggregated_edges(), Ok(vec![EdgeSpec::new("A", "B", 5.0)]));
    }

    #[test]
    fn test_determinism() {
        let solver = MaxFlowSolver::new();
        let problem = FlowProblem::new(clrs_edges(), 'A', 'F');
        let first = solver.solve(&problem).unwrap();
        let second = solver.solve(&problem).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_augmentation_limit_allows_regular_runs() {
        let config = SolverConfig::default().with_augmentation_limit(1);
        let solver = MaxFlowSolver::with_config(config);
        let parallel_paths: Vec<(u32, u32, f64)> = (1..=5)
            .flat_map(|m| vec![(0, m, 1.0), (m, 6, 1.0)])
            .collect();
        // 7 nodes and 10 edges allow 70 augmentations; 5 are needed
        let result = solver.solve(&FlowProblem::new(parallel_paths, 0, 6)).unwrap();
        assert_eq!(result.max_flow, 5.0);
        assert_eq!(result.augmentations, 5);
    }

    #[test]
    fn test_parameters() {
        let mut solver = MaxFlowSolver::new();
        assert_eq!(solver.name(), "Ford-Fulkerson");
        assert_eq!(solver.category(), "max_flow");
        assert_eq!(solver.parameters().len(), 3);

        assert!(solver.set_parameter("epsilon", "1e-6").is_ok());
        assert_eq!(solver.get_parameter("epsilon"), Some("0.000001".to_string()));
        assert!(solver.set_parameter("record_history", "false").is_ok());
        assert_eq!(solver.get_parameter("augmentation_limit_factor"), Some("none".to_string()));
        assert!(solver.set_parameter("augmentation_limit_factor", "3").is_ok());
        assert_eq!(solver.config().augmentation_limit_factor, Some(3));
        assert!(solver.set_parameter("augmentation_limit_factor", "none").is_ok());
        assert_eq!(solver.config().augmentation_limit_factor, None);

        assert!(solver.set_parameter("epsilon", "-1").is_err());
        assert!(solver.set_parameter("augmentation_limit_factor", "0").is_err());
        assert!(solver.set_parameter("record_history", "yes").is_err());
        assert!(solver.set_parameter("unknown", "1").is_err());
        assert_eq!(solver.get_parameter("unknown"), None);
        assert_eq!(solver.config().epsilon, 1e-6);
    }

    #[test]
    fn test_history_can_be_disabled() {
        let solver = MaxFlowSolver::with_config(SolverConfig::default().with_history(false));
        let result = solver.solve(&FlowProblem::new(clrs_edges(), 'A', 'F')).unwrap();
        assert!(result.history.is_empty());
        assert!(result.augmentations > 0);
    }

    #[test]
    fn test_batch_matches_sequential() {
        let problems = vec![
            FlowProblem::new(clrs_edges(), 'A', 'F'),
            FlowProblem::new(clrs_edges(), 'A', 'D'),
            FlowProblem::new(clrs_edges(), 'A', 'Z'),
            FlowProblem::new(clrs_edges(), 'C', 'C'),
        ];
        let solver = MaxFlowSolver::new();
        let batch = solver.solve_batch(&problems);
        assert_eq!(batch.len(), problems.len());
        for (problem, result) in problems.iter().zip(batch) {
            assert_eq!(result, solver.solve(problem));
        }
    }
}
