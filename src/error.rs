//! # Error Types
//!
//! This module defines error types used throughout the signboard library.

use std::fmt;

use thiserror::Error;

/// Input field that failed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    ShopName,
    BusinessType,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Field::ShopName => write!(f, "shop name"),
            Field::BusinessType => write!(f, "business type"),
        }
    }
}

/// Operations that may only have one request outstanding at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Generate,
    Export,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::Generate => write!(f, "generate"),
            Operation::Export => write!(f, "export"),
        }
    }
}

/// Main error type for signboard operations
#[derive(Debug, Error)]
pub enum SignboardError {
    /// Required user input is missing
    #[error("Validation error: {message}")]
    Validation { field: Field, message: String },

    /// The design service failed or answered with a non-success status
    #[error("Collaborator error: {0}")]
    Collaborator(String),

    /// Rasterization or image encoding failed
    #[error("Export error: {0}")]
    Export(String),

    /// An operation of the same kind is still in flight
    #[error("A {0} request is already in progress")]
    Busy(Operation),

    /// A design the renderer refuses: oversized, or with clashing ids
    #[error("Invalid design: {0}")]
    InvalidDesign(String),

    /// The session holds no design
    #[error("No design has been generated yet")]
    NoDesign,

    /// Font loading error
    #[error("Font error: {0}")]
    Font(String),

    /// Invalid configuration value
    #[error("Config error: {0}")]
    Config(String),

    /// I/O error wrapper
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl SignboardError {
    pub(crate) fn validation(field: Field) -> Self {
        let message = match field {
            Field::ShopName => "Please enter a shop name",
            Field::BusinessType => "Please select a business type",
        };
        SignboardError::Validation {
            field,
            message: message.to_string(),
        }
    }
}
