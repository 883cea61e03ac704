//! Problem representation and numeric primitives

pub mod capacity;
pub mod graph;

pub use self::capacity::{approx_eq, CapacityScale, FixedCapacity};
pub use self::graph::{aggregate_capacities, EdgeSpec, FlowProblem, FlowProblemBuilder, NodeIndex};
