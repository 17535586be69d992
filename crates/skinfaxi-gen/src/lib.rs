//! Parameterized benchmark-circuit generators.
//!
//! This crate produces the circuit families used for backend
//! characterization and experiment sweeps. Every generator returns a bound
//! [`Circuit`] with no classical bits — measurement instrumentation is the
//! execution layer's job — and is deterministic for a fixed seed.
//!
//! # Example
//!
//! ```rust
//! use skinfaxi_gen::{generate, CircuitKind};
//!
//! let circuit = generate(CircuitKind::Qft, 5, 0, 0).unwrap();
//! assert_eq!(circuit.num_qubits(), 5);
//! assert_eq!(circuit.num_clbits(), 0);
//! ```
//!
//! Infeasible shapes — a supremacy grid that cannot be made near-square, an
//! odd-width adder or Grover instance — are reported as
//! [`GenError::Infeasible`] rather than silently adjusted.

pub mod adder;
pub mod error;
pub mod grid;
pub mod hwea;
pub mod oracle;
pub mod qft;
pub mod random;
pub mod util;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use skinfaxi_ir::Circuit;
use tracing::debug;

pub use error::{GenError, GenResult};

/// The benchmark-circuit families this crate can generate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CircuitKind {
    /// Supremacy-style random circuit on a 1×n grid.
    SupremacyLinear,
    /// Supremacy-style random circuit on a near-square grid.
    Supremacy,
    /// Sycamore-style random circuit (fSim-flavored couplers).
    Sycamore,
    /// Hardware-efficient ansatz.
    Hwea,
    /// Bernstein-Vazirani with an all-ones hidden string.
    BernsteinVazirani,
    /// Exact quantum Fourier transform.
    Qft,
    /// Approximate quantum Fourier transform.
    Aqft,
    /// Cuccaro ripple-carry adder.
    Adder,
    /// Single-iteration Grover search.
    Grover,
    /// Layered random circuit folded with its inverse.
    Random,
}

impl fmt::Display for CircuitKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CircuitKind::SupremacyLinear => "supremacy_linear",
            CircuitKind::Supremacy => "supremacy",
            CircuitKind::Sycamore => "sycamore",
            CircuitKind::Hwea => "hwea",
            CircuitKind::BernsteinVazirani => "bv",
            CircuitKind::Qft => "qft",
            CircuitKind::Aqft => "aqft",
            CircuitKind::Adder => "adder",
            CircuitKind::Grover => "grover",
            CircuitKind::Random => "random",
        };
        write!(f, "{name}")
    }
}

impl FromStr for CircuitKind {
    type Err = GenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "supremacy_linear" => Ok(CircuitKind::SupremacyLinear),
            "supremacy" => Ok(CircuitKind::Supremacy),
            "sycamore" => Ok(CircuitKind::Sycamore),
            "hwea" => Ok(CircuitKind::Hwea),
            "bv" => Ok(CircuitKind::BernsteinVazirani),
            "qft" => Ok(CircuitKind::Qft),
            "aqft" => Ok(CircuitKind::Aqft),
            "adder" => Ok(CircuitKind::Adder),
            "grover" => Ok(CircuitKind::Grover),
            "random" => Ok(CircuitKind::Random),
            other => Err(GenError::UnknownKind(other.to_string())),
        }
    }
}

/// Generate a benchmark circuit of the given kind and size.
///
/// `depth` controls the layer count of the random families and is ignored
/// by the structured ones (QFT/AQFT, Bernstein-Vazirani, adder, Grover).
/// The returned circuit always has exactly `num_qubits` qubits and no
/// classical bits.
pub fn generate(
    kind: CircuitKind,
    num_qubits: u32,
    depth: u32,
    seed: u64,
) -> GenResult<Circuit> {
    let infeasible = |reason: &str| GenError::Infeasible {
        kind,
        num_qubits,
        reason: reason.to_string(),
    };

    if num_qubits == 0 {
        return Err(infeasible("at least one qubit is required"));
    }

    debug!(%kind, num_qubits, depth, seed, "generating circuit");

    let (rows, cols) = util::factor_int(num_qubits);
    let circuit = match kind {
        CircuitKind::SupremacyLinear => grid::supremacy(1, num_qubits, depth, seed)?,
        CircuitKind::Supremacy => {
            if cols - rows > 2 {
                return Err(infeasible("grid cannot be made near-square"));
            }
            grid::supremacy(rows, cols, depth, seed)?
        }
        CircuitKind::Sycamore => grid::sycamore(rows, cols, depth, seed)?,
        CircuitKind::Hwea => hwea::hwea(num_qubits, depth, seed)?,
        CircuitKind::BernsteinVazirani => {
            if num_qubits < 2 {
                return Err(infeasible("needs one data qubit plus the ancilla"));
            }
            oracle::bernstein_vazirani(&util::secret_string(num_qubits))?
        }
        CircuitKind::Qft => qft::qft(num_qubits, 0)?,
        CircuitKind::Aqft => qft::qft(num_qubits, qft::aqft_degree(num_qubits))?,
        CircuitKind::Adder => {
            if num_qubits % 2 != 0 || num_qubits <= 2 {
                return Err(infeasible("needs an even qubit count above 2"));
            }
            adder::ripple_carry((num_qubits - 2) / 2)?
        }
        CircuitKind::Grover => {
            if num_qubits % 2 != 0 {
                return Err(infeasible("needs an even qubit count"));
            }
            oracle::grover(num_qubits)?
        }
        CircuitKind::Random => random::random(num_qubits, depth, 0.5, true, seed)?,
    };

    debug_assert_eq!(circuit.num_qubits() as u32, num_qubits);
    Ok(circuit)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_size_exact() {
        let cases = [
            (CircuitKind::SupremacyLinear, 5),
            (CircuitKind::Supremacy, 6),
            (CircuitKind::Sycamore, 6),
            (CircuitKind::Hwea, 4),
            (CircuitKind::BernsteinVazirani, 5),
            (CircuitKind::Qft, 5),
            (CircuitKind::Aqft, 8),
            (CircuitKind::Adder, 6),
            (CircuitKind::Grover, 6),
            (CircuitKind::Random, 5),
        ];
        for (kind, n) in cases {
            let circuit = generate(kind, n, 8, 42).unwrap();
            assert_eq!(circuit.num_qubits() as u32, n, "kind {kind}");
            assert_eq!(circuit.num_clbits(), 0, "kind {kind}");
        }
    }

    #[test]
    fn test_generate_infeasible_shapes() {
        // 7 factors as 1x7 — too skewed for a near-square grid.
        assert!(matches!(
            generate(CircuitKind::Supremacy, 7, 8, 0),
            Err(GenError::Infeasible { .. })
        ));
        assert!(matches!(
            generate(CircuitKind::Adder, 5, 0, 0),
            Err(GenError::Infeasible { .. })
        ));
        assert!(matches!(
            generate(CircuitKind::Adder, 2, 0, 0),
            Err(GenError::Infeasible { .. })
        ));
        assert!(matches!(
            generate(CircuitKind::Grover, 5, 0, 0),
            Err(GenError::Infeasible { .. })
        ));
        assert!(matches!(
            generate(CircuitKind::Qft, 0, 0, 0),
            Err(GenError::Infeasible { .. })
        ));
    }

    #[test]
    fn test_kind_round_trip() {
        for kind in [
            CircuitKind::SupremacyLinear,
            CircuitKind::Supremacy,
            CircuitKind::Sycamore,
            CircuitKind::Hwea,
            CircuitKind::BernsteinVazirani,
            CircuitKind::Qft,
            CircuitKind::Aqft,
            CircuitKind::Adder,
            CircuitKind::Grover,
            CircuitKind::Random,
        ] {
            let parsed: CircuitKind = kind.to_string().parse().unwrap();
            assert_eq!(parsed, kind);
        }
    }

    #[test]
    fn test_unknown_kind() {
        let err = "warp_drive".parse::<CircuitKind>().unwrap_err();
        assert!(matches!(err, GenError::UnknownKind(_)));
    }
}
