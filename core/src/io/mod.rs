//! Persistence formats consumed by authoring surfaces

pub mod document;

pub use self::document::{DocumentError, GraphDocument, Position};
