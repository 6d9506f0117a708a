//! Fluid state errors.

use pf_core::PfError;
use thiserror::Error;

/// Result type for fluid state operations.
pub type FluidStateResult<T> = Result<T, FluidStateError>;

/// Errors that can occur when reading or populating a fluid state.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FluidStateError {
    /// Accessor not provided by the concrete fluid state.
    ///
    /// Signals a structural mismatch between what a solver asks for and what
    /// the fluid model can answer. Callers propagate it, never retry it.
    #[error("Not implemented: {what}")]
    NotImplemented { what: &'static str },

    /// Phase or component index outside the declared capability range.
    #[error("Index out of range for {what} (index={index}, len={len})")]
    IndexOutOfRange {
        what: &'static str,
        index: usize,
        len: usize,
    },

    /// Non-physical values (negative density, NaN fraction, etc.).
    #[error("Non-physical value for {what}")]
    NonPhysical { what: &'static str },

    /// A mixture relation does not hold within tolerance.
    #[error("Inconsistent {what}: expected {expected}, got {actual}")]
    Inconsistent {
        what: &'static str,
        expected: f64,
        actual: f64,
    },
}

impl FluidStateError {
    /// True for the unimplemented-accessor failure.
    pub fn is_not_implemented(&self) -> bool {
        matches!(self, FluidStateError::NotImplemented { .. })
    }
}

impl From<FluidStateError> for PfError {
    fn from(err: FluidStateError) -> Self {
        match err {
            FluidStateError::NotImplemented { what } => PfError::NotImplemented { what },
            FluidStateError::IndexOutOfRange { what, index, len } => {
                PfError::IndexOob { what, index, len }
            }
            FluidStateError::NonPhysical { what } => PfError::InvalidArg { what },
            FluidStateError::Inconsistent { what, .. } => PfError::Invariant { what },
        }
    }
}
