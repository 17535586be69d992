//! Error types for the HAL crate.

use thiserror::Error;

/// Errors that can occur in HAL operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum HalError {
    /// Requested device name is not in the catalog.
    #[error("Unknown device: '{0}'")]
    UnknownDevice(String),

    /// Circuit exceeds the device qubit count.
    #[error(
        "Circuit needs {circuit_qubits} qubits but device '{device}' has {device_qubits}"
    )]
    CircuitTooLarge {
        /// Name of the target device.
        device: String,
        /// Qubits available on the device.
        device_qubits: u32,
        /// Qubits required by the circuit.
        circuit_qubits: u32,
    },

    /// Invalid circuit.
    #[error("Invalid circuit: {0}")]
    InvalidCircuit(String),

    /// Invalid number of shots.
    #[error("Invalid shots: {0}")]
    InvalidShots(String),

    /// Job not found.
    #[error("Job not found: {0}")]
    JobNotFound(String),

    /// Job execution failed.
    #[error("Job failed: {0}")]
    JobFailed(String),

    /// Job was cancelled.
    #[error("Job cancelled")]
    JobCancelled,

    /// Timeout waiting for job.
    #[error("Timeout waiting for job {0}")]
    Timeout(String),

    /// Recorded counts do not add up to the requested shot count.
    #[error("Counts sum to {got} but {expected} shots were requested")]
    ShotCountMismatch {
        /// Requested shot count.
        expected: u64,
        /// Sum of the recorded counts.
        got: u64,
    },

    /// Bitstring cannot be interpreted as a basis-state index.
    #[error("Malformed bitstring: '{0}'")]
    MalformedBitstring(String),

    /// No counts recorded where some were required.
    #[error("No counts recorded")]
    EmptyCounts,

    /// Unsupported feature.
    #[error("Unsupported feature: {0}")]
    Unsupported(String),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for HAL operations.
pub type HalResult<T> = Result<T, HalError>;
