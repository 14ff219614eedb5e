//! Error types for the frame editor

use thiserror::Error;

use crate::types::{ElementId, NodeId};

/// Rejected form input. The action that produced it applies nothing.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FormError {
    #[error("Invalid value for {field}: '{value}' is not a number")]
    InvalidNumber { field: &'static str, value: String },

    #[error("Invalid local_z vector format. Expected \"x,y,z\" (got '{0}')")]
    InvalidVector(String),

    #[error("Please enter a valid positive number for the deformation scale")]
    InvalidScale(String),
}

/// Main error type for editor operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EditorError {
    #[error("Node '{0}' not found in model")]
    NodeNotFound(NodeId),

    #[error("Element '{0}' not found in model")]
    ElementNotFound(ElementId),

    #[error("Cannot create element: need exactly 2 selected nodes (have {0})")]
    SelectionIncomplete(usize),

    #[error("Element endpoints must be two different nodes (both are '{0}')")]
    DegenerateElement(NodeId),

    #[error("No nodes to calculate. Please add nodes first.")]
    EmptyModel,

    #[error("Deformation preview is unavailable while a solver result is loaded")]
    PreviewUnavailable,

    #[error(transparent)]
    Form(#[from] FormError),
}

/// Result type for editor operations
pub type EditorResult<T> = Result<T, EditorError>;
