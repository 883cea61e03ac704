//! Tributary: Ford-Fulkerson maximum flow engine
//!
//! Computes the maximum flow between a source and a sink of a capacitated
//! directed graph by repeated depth-first augmentation over a dense residual
//! network. Results carry the realized flow of every declared edge, the
//! augmenting paths that produced it, and a minimum cut certifying that no
//! further augmentation is possible.
//!
//! ```
//! use tributary_core::compute_max_flow;
//!
//! let edges = vec![("s", "a", 3.0), ("a", "t", 2.0), ("s", "t", 1.0)];
//! let (max_flow, flows) = compute_max_flow(edges, "s", "t").unwrap();
//! assert_eq!(max_flow, 3.0);
//! assert_eq!(flows[&("a", "t")], 2.0);
//! ```

pub mod algorithm;
pub mod config;
pub mod data_structures;
pub mod execution;
pub mod io;
pub mod validation;

pub use crate::algorithm::graph::{
    compute_max_flow, EdgeFlow, FlowNetwork, MaxFlowResult, MaxFlowSolver, MinCut,
};
pub use crate::algorithm::traits::{Algorithm, Endpoint, FlowError};
pub use crate::config::SolverConfig;
pub use crate::data_structures::{CapacityScale, EdgeSpec, FixedCapacity, FlowProblem, NodeIndex};
pub use crate::execution::ExecutionHistory;
pub use crate::io::{DocumentError, GraphDocument, Position};
pub use crate::validation::{CertificateViolation, CorrectnessValidator};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
