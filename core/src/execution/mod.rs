//! Execution tracing

pub mod history;

pub use self::history::{AugmentationStep, ExecutionHistory};
