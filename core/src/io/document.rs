//! Graph document persistence
//!
//! Authoring surfaces save graphs as JSON documents of the form
//!
//! ```json
//! {
//!   "nodes": { "A": { "x": 120.0, "y": 80.0 }, "B": { "x": 300.0, "y": 80.0 } },
//!   "edges": [["A", "B", 5.0]],
//!   "source": "A",
//!   "destination": "B"
//! }
//! ```
//!
//! Layout coordinates are carried through untouched; only the edges and the
//! two terminals feed the engine. Conversion to a [`FlowProblem`] applies the
//! authoring-surface checks the engine itself does not repeat.
//!
//! Documents written with the Spanish keys `nodos`, `aristas`, `origen` and
//! `destino` load as well. Saving always uses the English keys.
//!
//! Copyright (c) 2026 Tributary contributors

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use log::debug;
use serde::{Serialize, Deserialize};
use thiserror::Error;

use crate::algorithm::graph::max_flow::{MaxFlowResult, MaxFlowSolver};
use crate::algorithm::traits::{Endpoint, FlowError};
use crate::data_structures::graph::FlowProblem;

/// 2D layout position of a node
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    #[inline]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Errors raised while loading, saving or validating a document
#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("No {0} selected")]
    MissingEndpoint(Endpoint),

    #[error("Node {node} referenced by {context} does not exist")]
    UnknownNode { node: String, context: String },

    #[error("Source and destination are both {0}")]
    DegenerateQuery(String),

    #[error(transparent)]
    Flow(#[from] FlowError),
}

/// Serialized graph: layout, edges and terminals
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphDocument {
    #[serde(default, alias = "nodos")]
    pub nodes: BTreeMap<String, Position>,
    #[serde(default, alias = "aristas")]
    pub edges: Vec<(String, String, f64)>,
    #[serde(default, alias = "origen")]
    pub source: Option<String>,
    #[serde(default, alias = "destino")]
    pub destination: Option<String>,
}

impl GraphDocument {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_node(mut self, id: impl Into<String>, position: Position) -> Self {
        self.nodes.insert(id.into(), position);
        self
    }

    pub fn with_edge(
        mut self,
        from: impl Into<String>,
        to: impl Into<String>,
        capacity: f64,
    ) -> Self {
        self.edges.push((from.into(), to.into(), capacity));
        self
    }

    pub fn with_terminals(
        mut self,
        source: impl Into<String>,
        destination: impl Into<String>,
    ) -> Self {
        self.source = Some(source.into());
        self.destination = Some(destination.into());
        self
    }

    pub fn from_json(json: &str) -> Result<Self, DocumentError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String, DocumentError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, DocumentError> {
        let path = path.as_ref();
        let document = Self::from_json(&fs::read_to_string(path)?)?;
        debug!(
            "Loaded {} nodes and {} edges from {}",
            document.nodes.len(),
            document.edges.len(),
            path.display()
        );
        Ok(document)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), DocumentError> {
        let path = path.as_ref();
        fs::write(path, self.to_json()?)?;
        debug!("Saved graph document to {}", path.display());
        Ok(())
    }

    /// Validate the document and convert it into an engine problem
    pub fn to_problem(&self) -> Result<FlowProblem<String>, DocumentError> {
        let source = self
            .source
            .clone()
            .ok_or(DocumentError::MissingEndpoint(Endpoint::Source))?;
        let sink = self
            .destination
            .clone()
            .ok_or(DocumentError::MissingEndpoint(Endpoint::Sink))?;

        if !self.nodes.is_empty() {
            self.require_node(&source, "source")?;
            self.require_node(&sink, "destination")?;
            for (from, to, _) in &self.edges {
                let context = format!("edge {} -> {}", from, to);
                self.require_node(from, &context)?;
                self.require_node(to, &context)?;
            }
        }
        if source == sink {
            return Err(DocumentError::DegenerateQuery(source));
        }

        let mut builder = FlowProblem::builder(source, sink);
        for id in self.nodes.keys() {
            builder = builder.node(id.clone());
        }
        for (from, to, capacity) in &self.edges {
            builder = builder.edge(from.clone(), to.clone(), *capacity)?;
        }
        Ok(builder.build()?)
    }

    /// Validate and solve in one step
    pub fn solve(&self, solver: &MaxFlowSolver) -> Result<MaxFlowResult<String>, DocumentError> {
        let problem = self.to_problem()?;
        Ok(solver.solve(&problem)?)
    }

    fn require_node(&self, node: &str, context: &str) -> Result<(), DocumentError> {
        if self.nodes.contains_key(node) {
            Ok(())
        } else {
            Err(DocumentError::UnknownNode {
                node: node.to_string(),
                context: context.to_string(),
            })
        }
    }
}
