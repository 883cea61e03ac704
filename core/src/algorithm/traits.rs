//! Core algorithm trait definitions for Tributary
//!
//! This module establishes the shared vocabulary of the flow algorithms:
//! the error taxonomy reported to callers, the string-typed parameter
//! interface used to configure solvers, and the [`Algorithm`] trait that
//! every solver implements.
//!
//! # Key Design Principles
//! - Failures are reported synchronously through [`FlowError`]
//! - Parameters round-trip through their string form
//! - Solvers hold configuration only, never per-invocation state

use std::fmt;
use serde::{Serialize, Deserialize};

/// Terminal of a flow query
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub enum Endpoint {
    Source,
    Sink,
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Endpoint::Source => write!(f, "source"),
            Endpoint::Sink => write!(f, "sink"),
        }
    }
}

/// Error types for flow computations and problem construction
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FlowError {
    #[error("Invalid node: {endpoint} {node} is not a declared node")]
    InvalidNode { endpoint: Endpoint, node: String },

    #[error("Malformed edge {from} -> {to} with capacity {capacity}: {reason}")]
    MalformedEdge {
        from: String,
        to: String,
        capacity: f64,
        reason: String,
    },

    #[error("Invalid parameter: {name} - {reason}")]
    InvalidParameter { name: String, reason: String },

    #[error("Resource exhausted: {0}")]
    ResourceExhausted(String),
}

impl FlowError {
    pub(crate) fn invalid_node<N: fmt::Debug>(endpoint: Endpoint, node: &N) -> Self {
        FlowError::InvalidNode {
            endpoint,
            node: format!("{:?}", node),
        }
    }

    pub(crate) fn invalid_parameter(name: &str, reason: impl Into<String>) -> Self {
        FlowError::InvalidParameter {
            name: name.to_string(),
            reason: reason.into(),
        }
    }
}

/// Algorithm parameter with strongly typed values
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlgorithmParameter {
    pub name: String,
    pub value: String,
    pub value_type: ParameterType,
    pub constraints: Option<ParameterConstraints>,
}

/// Parameter type enumeration for type-safe parameter handling
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ParameterType {
    Integer,
    Float,
    Boolean,
    /// Integer parameter that may also be the literal `none`
    OptionalInteger,
}

/// Parameter constraints for validating algorithm parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParameterConstraints {
    pub min: Option<f64>,
    pub max: Option<f64>,
}

/// Algorithm complexity information
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlgorithmComplexity {
    pub time_complexity: String,
    pub space_complexity: String,
}

/// Main algorithm trait
///
/// # Invariants
/// - State isolation between runs
/// - Deterministic behavior for given inputs
pub trait Algorithm: fmt::Debug + Send + Sync {
    /// Returns the algorithm's descriptive name
    fn name(&self) -> &'static str;

    /// Returns the algorithm's category (e.g., max_flow)
    fn category(&self) -> &'static str;

    /// Returns the algorithm's description
    fn description(&self) -> String;

    /// Returns the algorithm's asymptotic complexity in Big-O notation
    fn complexity(&self) -> AlgorithmComplexity;

    /// Returns supported parameters with type information
    fn parameters(&self) -> Vec<AlgorithmParameter>;

    /// Sets algorithm parameter with type validation
    fn set_parameter(&mut self, name: &str, value: &str) -> Result<(), FlowError>;

    /// Gets algorithm parameter value
    fn get_parameter(&self, name: &str) -> Option<String>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_node_names_endpoint() {
        let err = FlowError::invalid_node(Endpoint::Sink, &"C");
        assert_eq!(
            err,
            FlowError::InvalidNode {
                endpoint: Endpoint::Sink,
                node: "\"C\"".to_string(),
            }
        );
        assert_eq!(err.to_string(), "Invalid node: sink \"C\" is not a declared node");
    }

    #[test]
    fn test_invalid_parameter_message() {
        let err = FlowError::invalid_parameter("epsilon", "must be positive");
        assert_eq!(err.to_string(), "Invalid parameter: epsilon - must be positive");
    }

    #[test]
    fn test_endpoint_display() {
        assert_eq!(Endpoint::Source.to_string(), "source");
        assert_eq!(Endpoint::Sink.to_string(), "sink");
    }
}
