//! Network flow algorithms over capacitated directed graphs

pub mod max_flow;
pub mod min_cut;

pub use self::max_flow::{
    compute_max_flow, AugmentingPath, EdgeFlow, FlowNetwork, MaxFlowResult, MaxFlowSolver,
};
pub use self::min_cut::MinCut;
