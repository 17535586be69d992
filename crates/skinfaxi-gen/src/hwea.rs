//! Hardware-efficient ansatz circuits.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::f64::consts::PI;

use skinfaxi_ir::{Circuit, QubitId};

use crate::error::GenResult;

/// Generate a hardware-efficient ansatz.
///
/// An initial Ry/Rz rotation layer, then `depth` blocks of a linear CX
/// entangler followed by another rotation layer. Rotation angles are drawn
/// uniformly from [0, 2π) with the given seed, so the circuit is bound and
/// directly executable.
pub fn hwea(num_qubits: u32, depth: u32, seed: u64) -> GenResult<Circuit> {
    let mut circuit = Circuit::with_size("hwea", num_qubits, 0);
    let mut rng = SmallRng::seed_from_u64(seed);

    let rotation_layer =
        |circuit: &mut Circuit, rng: &mut SmallRng| -> GenResult<()> {
            for q in 0..num_qubits {
                circuit.ry(rng.gen_range(0.0..2.0 * PI), QubitId(q))?;
                circuit.rz(rng.gen_range(0.0..2.0 * PI), QubitId(q))?;
            }
            Ok(())
        };

    rotation_layer(&mut circuit, &mut rng)?;
    for _ in 0..depth {
        for q in 0..num_qubits.saturating_sub(1) {
            circuit.cx(QubitId(q), QubitId(q + 1))?;
        }
        rotation_layer(&mut circuit, &mut rng)?;
    }

    Ok(circuit)
}
