//! Quantum Fourier transform circuits.

use std::f64::consts::PI;

use skinfaxi_ir::{Circuit, QubitId};

use crate::error::GenResult;

/// Generate a QFT circuit without terminal swaps.
///
/// `approximation_degree` omits the smallest-angle controlled rotations:
/// a rotation between qubits at distance `k` is kept only while
/// `k <= num_qubits - 1 - approximation_degree`. Degree 0 is the exact
/// transform. Output order is bit-reversed since no swap network is
/// appended; callers that care about order account for it downstream.
pub fn qft(num_qubits: u32, approximation_degree: u32) -> GenResult<Circuit> {
    let name = if approximation_degree == 0 {
        "qft".to_string()
    } else {
        format!("aqft_{approximation_degree}")
    };
    let mut circuit = Circuit::with_size(name, num_qubits, 0);
    let cutoff = num_qubits.saturating_sub(1 + approximation_degree);

    for i in 0..num_qubits {
        circuit.h(QubitId(i))?;
        for j in (i + 1)..num_qubits {
            let k = j - i;
            if k > cutoff {
                break;
            }
            let angle = PI / 2f64.powi(k as i32);
            circuit.cp(angle, QubitId(j), QubitId(i))?;
        }
    }

    Ok(circuit)
}

/// The approximation degree used for the `aqft` benchmark kind:
/// `num_qubits - (log2(num_qubits) + 2)`, clamped at zero.
pub fn aqft_degree(num_qubits: u32) -> u32 {
    let kept = (f64::from(num_qubits).log2() + 2.0) as u32;
    num_qubits.saturating_sub(kept)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_qft_shape() {
        let circuit = qft(4, 0).unwrap();
        assert_eq!(circuit.num_qubits(), 4);
        assert_eq!(circuit.num_clbits(), 0);
        // 4 Hadamards + 3 + 2 + 1 controlled phases.
        assert_eq!(circuit.num_ops(), 10);
    }

    #[test]
    fn test_qft_has_no_swaps() {
        let circuit = qft(5, 0).unwrap();
        assert!(
            circuit
                .dag()
                .topological_ops()
                .all(|(_, inst)| inst.name() != "swap")
        );
    }

    #[test]
    fn test_approximation_drops_rotations() {
        let exact = qft(6, 0).unwrap();
        let approx = qft(6, 3).unwrap();
        assert!(approx.num_ops() < exact.num_ops());
        // Hadamards survive approximation.
        let h_count = approx
            .dag()
            .topological_ops()
            .filter(|(_, inst)| inst.name() == "h")
            .count();
        assert_eq!(h_count, 6);
    }

    #[test]
    fn test_aqft_degree() {
        // log2(8) + 2 = 5 rotations kept per qubit.
        assert_eq!(aqft_degree(8), 3);
        // Small sizes clamp to the exact transform.
        assert_eq!(aqft_degree(4), 0);
    }
}
