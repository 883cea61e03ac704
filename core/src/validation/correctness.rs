//! Correctness verification for maximum flow results
//!
//! A flow result certifies itself: the reported per-edge flows must respect
//! capacities, balance at every intermediate node, deliver the reported value
//! from source to sink, and the attached cut must have exactly that capacity
//! with every forward cut edge saturated and every backward cut edge idle.
//! The validator checks all of these against the original problem.
//!
//! Copyright (c) 2026 Tributary contributors

use std::collections::{BTreeMap, BTreeSet};
use std::fmt::Debug;

use log::debug;
use thiserror::Error;

use crate::algorithm::graph::max_flow::MaxFlowResult;
use crate::algorithm::traits::FlowError;
use crate::config::DEFAULT_EPSILON;
use crate::data_structures::capacity::approx_eq;
use crate::data_structures::graph::FlowProblem;

/// Property of a maximum flow that a result failed to satisfy
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CertificateViolation {
    #[error("Problem cannot be aggregated: {0}")]
    InvalidProblem(#[from] FlowError),

    #[error("Edge {from} -> {to} is not declared in the problem")]
    UnknownEdge { from: String, to: String },

    #[error("Edge {from} -> {to} reports capacity {reported}, declared {declared}")]
    CapacityMismatch {
        from: String,
        to: String,
        reported: f64,
        declared: f64,
    },

    #[error("Edge {from} -> {to} carries {flow}, outside [0, {capacity}]")]
    CapacityViolated {
        from: String,
        to: String,
        flow: f64,
        capacity: f64,
    },

    #[error("Node {node} receives {inflow} but emits {outflow}")]
    ConservationViolated { node: String, inflow: f64, outflow: f64 },

    #[error("Net {terminal} flow {actual} differs from max flow {expected}")]
    TerminalImbalance {
        terminal: &'static str,
        expected: f64,
        actual: f64,
    },

    #[error("Cut capacity {cut_capacity} differs from max flow {max_flow}")]
    CutMismatch { max_flow: f64, cut_capacity: f64 },

    #[error("Cut edge {from} -> {to} is not saturated")]
    CutEdgeUnsaturated { from: String, to: String },

    #[error("Edge {from} -> {to} carries flow back across the cut")]
    CutBackflow { from: String, to: String },
}

/// Checks conservation, capacity and optimality certificates
#[derive(Debug, Clone)]
pub struct CorrectnessValidator {
    epsilon: f64,
}

impl Default for CorrectnessValidator {
    fn default() -> Self {
        Self::new(DEFAULT_EPSILON)
    }
}

impl CorrectnessValidator {
    pub fn new(epsilon: f64) -> Self {
        Self { epsilon }
    }

    /// First violated property, if any
    pub fn verify<N>(
        &self,
        problem: &FlowProblem<N>,
        result: &MaxFlowResult<N>,
    ) -> Result<(), CertificateViolation>
    where
        N: Ord + Clone + Debug,
    {
        match self.violations(problem, result).into_iter().next() {
            Some(violation) => Err(violation),
            None => Ok(()),
        }
    }

    /// Every violated property
    pub fn violations<N>(
        &self,
        problem: &FlowProblem<N>,
        result: &MaxFlowResult<N>,
    ) -> Vec<CertificateViolation>
    where
        N: Ord + Clone + Debug,
    {
        let aggregated = match problem.aggregated_edges() {
            Ok(edges) => edges,
            Err(error) => return vec![error.into()],
        };
        let declared: BTreeMap<(N, N), f64> = aggregated
            .into_iter()
            .filter(|edge| edge.capacity > 0.0)
            .map(|edge| ((edge.from, edge.to), edge.capacity))
            .collect();

        let mut violations = Vec::new();

        self.check_edges(&declared, result, &mut violations);
        if problem.source != problem.sink {
            self.check_balance(problem, result, &mut violations);
            self.check_cut(result, &mut violations);
        }

        debug!("Validated flow of {} with {} violations", result.max_flow, violations.len());
        violations
    }

    fn check_edges<N: Ord + Clone + Debug>(
        &self,
        declared: &BTreeMap<(N, N), f64>,
        result: &MaxFlowResult<N>,
        violations: &mut Vec<CertificateViolation>,
    ) {
        for ((from, to), edge) in &result.edges {
            let capacity = match declared.get(&(from.clone(), to.clone())) {
                Some(&capacity) => capacity,
                None => {
                    violations.push(CertificateViolation::UnknownEdge {
                        from: label(from),
                        to: label(to),
                    });
                    continue;
                }
            };
            if !approx_eq(edge.capacity, capacity, self.epsilon) {
                violations.push(CertificateViolation::CapacityMismatch {
                    from: label(from),
                    to: label(to),
                    reported: edge.capacity,
                    declared: capacity,
                });
            }
            let exceeds = edge.flow > capacity && !approx_eq(edge.flow, capacity, self.epsilon);
            if edge.flow < 0.0 || exceeds {
                violations.push(CertificateViolation::CapacityViolated {
                    from: label(from),
                    to: label(to),
                    flow: edge.flow,
                    capacity,
                });
            }
        }
    }

    fn check_balance<N: Ord + Clone + Debug>(
        &self,
        problem: &FlowProblem<N>,
        result: &MaxFlowResult<N>,
        violations: &mut Vec<CertificateViolation>,
    ) {
        let mut inflow: BTreeMap<&N, f64> = BTreeMap::new();
        let mut outflow: BTreeMap<&N, f64> = BTreeMap::new();
        for ((from, to), edge) in &result.edges {
            *outflow.entry(from).or_default() += edge.flow;
            *inflow.entry(to).or_default() += edge.flow;
        }

        let nodes: BTreeSet<&N> = inflow.keys().chain(outflow.keys()).copied().collect();
        for node in nodes {
            if *node == problem.source || *node == problem.sink {
                continue;
            }
            let node_in = inflow.get(node).copied().unwrap_or_default();
            let node_out = outflow.get(node).copied().unwrap_or_default();
            if !approx_eq(node_in, node_out, self.epsilon) {
                violations.push(CertificateViolation::ConservationViolated {
                    node: label(node),
                    inflow: node_in,
                    outflow: node_out,
                });
            }
        }

        let net = |node: &N| {
            outflow.get(node).copied().unwrap_or_default()
                - inflow.get(node).copied().unwrap_or_default()
        };
        let source_net = net(&problem.source);
        if !approx_eq(source_net, result.max_flow, self.epsilon) {
            violations.push(CertificateViolation::TerminalImbalance {
                terminal: "source",
                expected: result.max_flow,
                actual: source_net,
            });
        }
        let sink_net = -net(&problem.sink);
        if !approx_eq(sink_net, result.max_flow, self.epsilon) {
            violations.push(CertificateViolation::TerminalImbalance {
                terminal: "sink",
                expected: result.max_flow,
                actual: sink_net,
            });
        }
    }

    fn check_cut<N: Ord + Clone + Debug>(
        &self,
        result: &MaxFlowResult<N>,
        violations: &mut Vec<CertificateViolation>,
    ) {
        let cut = &result.min_cut;
        if !approx_eq(cut.capacity, result.max_flow, self.epsilon) {
            violations.push(CertificateViolation::CutMismatch {
                max_flow: result.max_flow,
                cut_capacity: cut.capacity,
            });
        }

        for ((from, to), edge) in &result.edges {
            let from_source_side = cut.is_on_source_side(from);
            let to_source_side = cut.is_on_source_side(to);
            if from_source_side && !to_source_side && !edge.saturated {
                violations.push(CertificateViolation::CutEdgeUnsaturated {
                    from: label(from),
                    to: label(to),
                });
            }
            if !from_source_side && to_source_side && !approx_eq(edge.flow, 0.0, self.epsilon) {
                violations.push(CertificateViolation::CutBackflow {
                    from: label(from),
                    to: label(to),
                });
            }
        }
    }
}

fn label<N: Debug>(node: &N) -> String {
    format!("{:?}", node)
}
