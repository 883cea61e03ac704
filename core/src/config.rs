//! Solver configuration
//!
//! Copyright (c) 2026 Tributary contributors

use serde::{Serialize, Deserialize};

use crate::algorithm::traits::FlowError;

/// Default tolerance for saturation checks
pub const DEFAULT_EPSILON: f64 = 1e-9;

/// Configuration shared by the flow solvers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    /// Relative tolerance used when reporting saturated edges
    pub epsilon: f64,

    /// Bound augmentations to `factor * nodes * edges` when set
    pub augmentation_limit_factor: Option<usize>,

    /// Record every augmenting path in the result history
    pub record_history: bool,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            epsilon: DEFAULT_EPSILON,
            augmentation_limit_factor: None,
            record_history: true,
        }
    }
}

impl SolverConfig {
    pub fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = epsilon;
        self
    }

    pub fn with_augmentation_limit(mut self, factor: usize) -> Self {
        self.augmentation_limit_factor = Some(factor);
        self
    }

    pub fn with_history(mut self, record: bool) -> Self {
        self.record_history = record;
        self
    }

    /// Reject settings the solver cannot honor
    pub fn validate(&self) -> Result<(), FlowError> {
        if !self.epsilon.is_finite() || self.epsilon < 0.0 {
            return Err(FlowError::invalid_parameter(
                "epsilon",
                "must be a finite non-negative number",
            ));
        }
        if self.augmentation_limit_factor == Some(0) {
            return Err(FlowError::invalid_parameter(
                "augmentation_limit_factor",
                "must be positive or none",
            ));
        }
        Ok(())
    }

    /// Maximum number of augmentations for a network of the given shape
    pub fn augmentation_limit(&self, node_count: usize, edge_count: usize) -> Option<usize> {
        self.augmentation_limit_factor.map(|factor| {
            factor
                .saturating_mul(node_count.max(1))
                .saturating_mul(edge_count.max(1))
        })
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SolverConfig::default();
        assert_eq!(config.epsilon, 1e-9);
        assert_eq!(config.augmentation_limit_factor, None);
        assert!(config.record_history);
        assert!(config.validate().is_ok());
        assert_eq!(config.augmentation_limit(6, 10), None);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = SolverConfig::from_json(r#"{"augmentation_limit_factor": 4}"#).unwrap();
        assert_eq!(config.augmentation_limit_factor, Some(4));
        assert_eq!(config.epsilon, DEFAULT_EPSILON);
        assert_eq!(config.augmentation_limit(3, 5), Some(60));
    }

    #[test]
    fn test_validation_rejects_bad_values() {
        assert!(SolverConfig::default().with_epsilon(-1.0).validate().is_err());
        assert!(SolverConfig::default().with_epsilon(f64::NAN).validate().is_err());
        assert!(SolverConfig::default().with_augmentation_limit(0).validate().is_err());
        assert!(SolverConfig::default().with_augmentation_limit(2).validate().is_ok());
    }

    #[test]
    fn test_limit_on_empty_shape() {
        let config = SolverConfig::default().with_augmentation_limit(3);
        assert_eq!(config.augmentation_limit(0, 0), Some(3));
    }
}
