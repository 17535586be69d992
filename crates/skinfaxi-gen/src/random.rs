//! Layered random circuits with a known solution state.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::f64::consts::PI;

use skinfaxi_ir::{Circuit, Gate, QubitId};

use crate::error::{GenError, GenResult};

/// Generate a layered random circuit.
///
/// Each layer places random CX pairs on disjoint qubits up to the given
/// `density` (fraction of the maximum ⌊n/2⌋ pairs, at least one), then a
/// random single-qubit gate from {I, Rz(θ), SX, X} on every qubit.
///
/// With `inverse` set the circuit is composed with its own inverse and a
/// uniformly random solution state is written with X gates, so the ideal
/// output distribution is a single known basis state — useful as a
/// fidelity witness on noisy backends. The layer count is halved to keep
/// the composed depth comparable.
pub fn random(
    num_qubits: u32,
    depth: u32,
    density: f64,
    inverse: bool,
    seed: u64,
) -> GenResult<Circuit> {
    if num_qubits >= 64 {
        return Err(GenError::Infeasible {
            kind: crate::CircuitKind::Random,
            num_qubits,
            reason: "solution state sampling supports at most 63 qubits".into(),
        });
    }

    let mut circuit = Circuit::with_size("random", num_qubits, 0);
    let mut rng = SmallRng::seed_from_u64(seed);

    let max_pairs = num_qubits / 2;
    let pairs_per_layer = ((density * f64::from(max_pairs)) as u32).max(1);
    let layers = if inverse { depth / 4 } else { depth / 2 };

    for _ in 0..layers {
        let mut candidates: Vec<u32> = (0..num_qubits).collect();
        let mut placed = 0;
        while candidates.len() >= 2 && placed < pairs_per_layer {
            let q1 = candidates.remove(rng.gen_range(0..candidates.len()));
            let q2 = candidates.remove(rng.gen_range(0..candidates.len()));
            circuit.cx(QubitId(q1), QubitId(q2))?;
            placed += 1;
        }

        for q in 0..num_qubits {
            let gate = match rng.gen_range(0..4) {
                0 => Gate::I,
                1 => Gate::Rz(rng.gen_range(0.0..2.0 * PI)),
                2 => Gate::SX,
                _ => Gate::X,
            };
            circuit.gate(gate, [QubitId(q)])?;
        }
    }

    if inverse {
        let inverted = circuit.inverse()?;
        circuit.extend(&inverted)?;

        let solution: u64 = rng.gen_range(0..(1u64 << num_qubits));
        for q in 0..num_qubits {
            if solution >> q & 1 == 1 {
                circuit.x(QubitId(q))?;
            }
        }
    }

    Ok(circuit)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_shape() {
        let circuit = random(6, 8, 0.5, false, 11).unwrap();
        assert_eq!(circuit.num_qubits(), 6);
        // 4 layers of (1 CX + 6 single-qubit gates) at density 0.5 on 6 qubits.
        assert!(circuit.num_ops() > 0);
    }

    #[test]
    fn test_random_deterministic() {
        let a = random(5, 8, 0.5, true, 77).unwrap();
        let b = random(5, 8, 0.5, true, 77).unwrap();
        assert_eq!(a.num_ops(), b.num_ops());
        let names_a: Vec<_> = a.dag().topological_ops().map(|(_, i)| i.name()).collect();
        let names_b: Vec<_> = b.dag().topological_ops().map(|(_, i)| i.name()).collect();
        assert_eq!(names_a, names_b);
    }

    #[test]
    fn test_random_inverse_doubles_body() {
        let forward = random(4, 8, 0.5, false, 3).unwrap();
        let folded = random(4, 16, 0.5, true, 3).unwrap();
        // Same layer count (16/4 == 8/2), so the folded circuit has twice
        // the body ops plus at most num_qubits solution X gates.
        assert!(folded.num_ops() >= 2 * forward.num_ops());
        assert!(folded.num_ops() <= 2 * forward.num_ops() + 4);
    }

    #[test]
    fn test_random_rejects_oversized() {
        assert!(matches!(
            random(64, 4, 0.5, true, 0),
            Err(GenError::Infeasible { .. })
        ));
    }
}
