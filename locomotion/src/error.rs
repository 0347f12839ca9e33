//! Construction-time errors.
//!
//! Steady-state tick operations are total and never produce these; they only surface
//! when a character is built from an unsupported shape or invalid settings.

use thiserror::Error;

/// The supplied collider is not a shape the locomotion core can describe.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("no shape description for collider type: {shape}")]
pub struct UnsupportedShapeError {
    pub shape: String,
}

/// A settings value that would make the simulation undefined.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("invalid locomotion setting `{field}` = {value}: {reason}")]
pub struct InvalidConfigurationError {
    pub field: &'static str,
    pub value: f32,
    pub reason: &'static str,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum LocomotionError {
    #[error(transparent)]
    UnsupportedShape(#[from] UnsupportedShapeError),

    #[error(transparent)]
    InvalidConfiguration(#[from] InvalidConfigurationError),
}
