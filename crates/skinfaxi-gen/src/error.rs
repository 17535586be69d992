//! Error types for the generator crate.

use skinfaxi_ir::IrError;
use thiserror::Error;

use crate::CircuitKind;

/// Errors that can occur while generating benchmark circuits.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum GenError {
    /// The requested shape cannot be generated for this qubit count.
    #[error("'{kind}' circuit infeasible for {num_qubits} qubits: {reason}")]
    Infeasible {
        /// The requested circuit kind.
        kind: CircuitKind,
        /// The requested qubit count.
        num_qubits: u32,
        /// Why the shape is infeasible.
        reason: String,
    },

    /// Circuit kind string not recognized.
    #[error("Unknown circuit kind: '{0}'")]
    UnknownKind(String),

    /// Secret string contains characters other than '0' and '1'.
    #[error("Secret string must contain only '0' and '1', got '{0}'")]
    InvalidSecret(String),

    /// Underlying IR error.
    #[error(transparent)]
    Ir(#[from] IrError),
}

/// Result type for generator operations.
pub type GenResult<T> = Result<T, GenError>;
