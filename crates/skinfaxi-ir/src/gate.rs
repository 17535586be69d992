//! Quantum gate types.
//!
//! Gates carry concrete `f64` angles. The generators in `skinfaxi-gen`
//! always produce bound circuits, so there is no symbolic parameter layer:
//! what reaches a backend is directly executable.

use serde::{Deserialize, Serialize};

/// A quantum gate with known semantics and concrete parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Gate {
    // Single-qubit Pauli gates
    /// Identity gate.
    I,
    /// Pauli-X gate.
    X,
    /// Pauli-Y gate.
    Y,
    /// Pauli-Z gate.
    Z,

    // Single-qubit Clifford gates
    /// Hadamard gate.
    H,
    /// S gate (sqrt(Z)).
    S,
    /// S-dagger gate.
    Sdg,
    /// T gate (fourth root of Z).
    T,
    /// T-dagger gate.
    Tdg,
    /// sqrt(X) gate.
    SX,
    /// sqrt(X)-dagger gate.
    SXdg,

    // Single-qubit rotation gates
    /// Rotation around X axis.
    Rx(f64),
    /// Rotation around Y axis.
    Ry(f64),
    /// Rotation around Z axis.
    Rz(f64),
    /// Phase gate.
    P(f64),
    /// Universal single-qubit gate U(θ, φ, λ).
    U(f64, f64, f64),

    // Two-qubit gates
    /// Controlled-X (CNOT) gate.
    CX,
    /// Controlled-Y gate.
    CY,
    /// Controlled-Z gate.
    CZ,
    /// Controlled-Hadamard gate.
    CH,
    /// SWAP gate.
    Swap,
    /// iSWAP gate.
    ISwap,
    /// Controlled rotation around X.
    CRx(f64),
    /// Controlled rotation around Y.
    CRy(f64),
    /// Controlled rotation around Z.
    CRz(f64),
    /// Controlled phase gate.
    CP(f64),

    // Three-qubit gates
    /// Toffoli gate (CCX).
    CCX,
    /// Fredkin gate (CSWAP).
    CSwap,
}

impl Gate {
    /// Get the name of this gate (OpenQASM 3 convention).
    #[inline]
    pub fn name(&self) -> &'static str {
        match self {
            Gate::I => "id",
            Gate::X => "x",
            Gate::Y => "y",
            Gate::Z => "z",
            Gate::H => "h",
            Gate::S => "s",
            Gate::Sdg => "sdg",
            Gate::T => "t",
            Gate::Tdg => "tdg",
            Gate::SX => "sx",
            Gate::SXdg => "sxdg",
            Gate::Rx(_) => "rx",
            Gate::Ry(_) => "ry",
            Gate::Rz(_) => "rz",
            Gate::P(_) => "p",
            Gate::U(_, _, _) => "u",
            Gate::CX => "cx",
            Gate::CY => "cy",
            Gate::CZ => "cz",
            Gate::CH => "ch",
            Gate::Swap => "swap",
            Gate::ISwap => "iswap",
            Gate::CRx(_) => "crx",
            Gate::CRy(_) => "cry",
            Gate::CRz(_) => "crz",
            Gate::CP(_) => "cp",
            Gate::CCX => "ccx",
            Gate::CSwap => "cswap",
        }
    }

    /// Get the number of qubits this gate operates on.
    #[inline]
    pub fn num_qubits(&self) -> u32 {
        match self {
            Gate::I
            | Gate::X
            | Gate::Y
            | Gate::Z
            | Gate::H
            | Gate::S
            | Gate::Sdg
            | Gate::T
            | Gate::Tdg
            | Gate::SX
            | Gate::SXdg
            | Gate::Rx(_)
            | Gate::Ry(_)
            | Gate::Rz(_)
            | Gate::P(_)
            | Gate::U(_, _, _) => 1,

            Gate::CX
            | Gate::CY
            | Gate::CZ
            | Gate::CH
            | Gate::Swap
            | Gate::ISwap
            | Gate::CRx(_)
            | Gate::CRy(_)
            | Gate::CRz(_)
            | Gate::CP(_) => 2,

            Gate::CCX | Gate::CSwap => 3,
        }
    }

    /// Check if this is a two-qubit gate.
    #[inline]
    pub fn is_two_qubit(&self) -> bool {
        self.num_qubits() == 2
    }

    /// Get the inverse of this gate, if it is expressible as a single gate.
    ///
    /// Self-inverse gates return themselves; parameterized gates negate
    /// their angles. `ISwap` has no single-gate inverse here and returns
    /// `None`.
    pub fn inverse(&self) -> Option<Gate> {
        match *self {
            Gate::I
            | Gate::X
            | Gate::Y
            | Gate::Z
            | Gate::H
            | Gate::CX
            | Gate::CY
            | Gate::CZ
            | Gate::CH
            | Gate::Swap
            | Gate::CCX
            | Gate::CSwap => Some(*self),

            Gate::S => Some(Gate::Sdg),
            Gate::Sdg => Some(Gate::S),
            Gate::T => Some(Gate::Tdg),
            Gate::Tdg => Some(Gate::T),
            Gate::SX => Some(Gate::SXdg),
            Gate::SXdg => Some(Gate::SX),

            Gate::Rx(theta) => Some(Gate::Rx(-theta)),
            Gate::Ry(theta) => Some(Gate::Ry(-theta)),
            Gate::Rz(theta) => Some(Gate::Rz(-theta)),
            Gate::P(theta) => Some(Gate::P(-theta)),
            Gate::U(theta, phi, lambda) => Some(Gate::U(-theta, -lambda, -phi)),
            Gate::CRx(theta) => Some(Gate::CRx(-theta)),
            Gate::CRy(theta) => Some(Gate::CRy(-theta)),
            Gate::CRz(theta) => Some(Gate::CRz(-theta)),
            Gate::CP(theta) => Some(Gate::CP(-theta)),

            Gate::ISwap => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    #[test]
    fn test_gate_properties() {
        assert_eq!(Gate::H.num_qubits(), 1);
        assert_eq!(Gate::CX.num_qubits(), 2);
        assert_eq!(Gate::CCX.num_qubits(), 3);
        assert_eq!(Gate::H.name(), "h");
        assert_eq!(Gate::CP(PI).name(), "cp");
        assert!(Gate::CZ.is_two_qubit());
        assert!(!Gate::X.is_two_qubit());
    }

    #[test]
    fn test_gate_inverse() {
        assert_eq!(Gate::X.inverse(), Some(Gate::X));
        assert_eq!(Gate::S.inverse(), Some(Gate::Sdg));
        assert_eq!(Gate::SXdg.inverse(), Some(Gate::SX));
        assert_eq!(Gate::Rz(PI / 3.0).inverse(), Some(Gate::Rz(-PI / 3.0)));
        assert_eq!(
            Gate::U(1.0, 2.0, 3.0).inverse(),
            Some(Gate::U(-1.0, -3.0, -2.0))
        );
        assert_eq!(Gate::ISwap.inverse(), None);
    }
}
