//! Error types for rejected input and failed lookups
//!
//! None of these are fatal: a rejected command leaves the world untouched and
//! is reported through the diagnostic log.

use thiserror::Error;

use crate::body::BodyId;

/// Input rejected at the boundary before any state changes
#[derive(Debug, Clone, Error, PartialEq)]
pub enum InputError {
    #[error("{field} is not a number: {value:?}")]
    NotANumber { field: &'static str, value: String },
    #[error("{field} must be finite")]
    NonFinite { field: &'static str },
    #[error("mass must be positive, got {0:e}")]
    NonPositiveMass(f64),
    #[error("radius must be positive, got {0}")]
    NonPositiveRadius(f64),
    #[error("time step must be a positive number of seconds, got {0}")]
    InvalidTimeStep(f64),
    #[error("{field} is out of range: {value}")]
    OutOfRange { field: &'static str, value: f64 },
    #[error("unknown preset {0:?}")]
    UnknownPreset(String),
}

/// Failures of world queries
#[derive(Debug, Clone, Error, PartialEq)]
pub enum WorldError {
    #[error("no anchor: the world has no bodies")]
    NoAnchor,
    #[error("no body with id {0}")]
    UnknownBody(BodyId),
    #[error(transparent)]
    Input(#[from] InputError),
}
