//! Execution history for augmenting-path tracing
//!
//! Presentation layers step through a computation one augmentation at a time.
//! The history keeps, for each augmentation, the path that was found, its
//! bottleneck and the running total after applying it.
//!
//! Copyright (c) 2026 Tributary contributors

use serde::{Serialize, Deserialize};

/// One augmentation of the Ford-Fulkerson loop
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AugmentationStep<N> {
    /// 1-based position in the augmentation sequence
    pub iteration: usize,

    /// Nodes from source to sink
    pub path: Vec<N>,

    /// Amount pushed along the path
    pub bottleneck: f64,

    /// Total flow after this step
    pub total: f64,
}

/// Ordered record of augmentations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutionHistory<N> {
    steps: Vec<AugmentationStep<N>>,
}

impl<N> Default for ExecutionHistory<N> {
    fn default() -> Self {
        Self { steps: Vec::new() }
    }
}

impl<N> ExecutionHistory<N> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an augmentation; iterations are numbered consecutively
    pub fn record(&mut self, path: Vec<N>, bottleneck: f64, total: f64) {
        let iteration = self.steps.len() + 1;
        self.steps.push(AugmentationStep {
            iteration,
            path,
            bottleneck,
            total,
        });
    }

    pub fn steps(&self) -> &[AugmentationStep<N>] {
        &self.steps
    }

    pub fn iter(&self) -> std::slice::Iter<'_, AugmentationStep<N>> {
        self.steps.iter()
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn last(&self) -> Option<&AugmentationStep<N>> {
        self.steps.last()
    }

    /// Running total after the last recorded step
    pub fn total_flow(&self) -> f64 {
        self.steps.last().map_or(0.0, |step| step.total)
    }

    pub fn bottlenecks(&self) -> impl Iterator<Item = f64> + '_ {
        self.steps.iter().map(|step| step.bottleneck)
    }
}

impl<'a, N> IntoIterator for &'a ExecutionHistory<N> {
    type Item = &'a AugmentationStep<N>;
    type IntoIter = std::slice::Iter<'a, AugmentationStep<N>>;

    fn into_iter(self) -> Self::IntoIter {
        self.steps.iter()
    }
}
