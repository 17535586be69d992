//! Error types for the routing crate.

use skinfaxi_ir::IrError;
use thiserror::Error;

/// Errors that can occur during placement and routing.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum RouteError {
    /// Circuit needs more qubits than the device provides.
    #[error("Circuit needs {required} qubits but the device has {available}")]
    DeviceTooSmall {
        /// Qubits required by the circuit.
        required: u32,
        /// Qubits available on the device.
        available: u32,
    },

    /// No path between two physical qubits exists on the device.
    #[error("No path between physical qubits {from} and {to}")]
    NoPath {
        /// Source physical qubit.
        from: u32,
        /// Destination physical qubit.
        to: u32,
    },

    /// Underlying IR error while rebuilding the circuit.
    #[error(transparent)]
    Ir(#[from] IrError),
}

/// Result type for routing operations.
pub type RouteResult<T> = Result<T, RouteError>;
