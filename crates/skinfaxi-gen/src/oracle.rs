//! Oracle-based benchmark circuits: Bernstein-Vazirani and Grover.

use skinfaxi_ir::{Circuit, QubitId};

use crate::error::{GenError, GenResult};

/// Generate a Bernstein-Vazirani circuit for the given hidden string.
///
/// Uses `secret.len() + 1` qubits: the last qubit is the phase ancilla.
/// Qubit `i` corresponds to the secret bit at position
/// `secret.len() - 1 - i` (little-endian), so the ideal measured data
/// register reads back as `secret`. No barriers are inserted.
pub fn bernstein_vazirani(secret: &str) -> GenResult<Circuit> {
    if !secret.bytes().all(|b| b == b'0' || b == b'1') {
        return Err(GenError::InvalidSecret(secret.to_string()));
    }

    let data = secret.len() as u32;
    let num_qubits = data + 1;
    let ancilla = QubitId(data);
    let mut circuit = Circuit::with_size("bv", num_qubits, 0);

    circuit.x(ancilla)?;
    for q in 0..num_qubits {
        circuit.h(QubitId(q))?;
    }

    let bits = secret.as_bytes();
    for i in 0..data {
        if bits[(data - 1 - i) as usize] == b'1' {
            circuit.cx(QubitId(i), ancilla)?;
        }
    }

    for q in 0..data {
        circuit.h(QubitId(q))?;
    }

    Ok(circuit)
}

/// Generate a single-iteration Grover search circuit.
///
/// `width` must be even: the first half are search qubits, the second half
/// serve as work qubits for the multi-controlled phase. The oracle marks
/// the all-ones state; one oracle + diffusion round is applied.
pub fn grover(width: u32) -> GenResult<Circuit> {
    let k = width / 2;
    let mut circuit = Circuit::with_size("grover", width, 0);
    let data: Vec<QubitId> = (0..k).map(QubitId).collect();
    let work: Vec<QubitId> = (k..width).map(QubitId).collect();

    for &q in &data {
        circuit.h(q)?;
    }

    // Oracle: phase-flip the all-ones state.
    controlled_z_all(&mut circuit, &data, &work)?;

    // Diffusion: reflect about the uniform superposition.
    for &q in &data {
        circuit.h(q)?;
        circuit.x(q)?;
    }
    controlled_z_all(&mut circuit, &data, &work)?;
    for &q in &data {
        circuit.x(q)?;
        circuit.h(q)?;
    }

    Ok(circuit)
}

/// Apply a Z conditioned on every qubit in `controls` being |1⟩.
///
/// For one or two controls this is a plain Z / CZ. Otherwise the
/// conjunction is accumulated into the work register with a Toffoli
/// ladder, phased, and uncomputed. Needs `controls.len() - 1` work qubits.
fn controlled_z_all(
    circuit: &mut Circuit,
    controls: &[QubitId],
    work: &[QubitId],
) -> GenResult<()> {
    match controls {
        [] => {}
        [only] => {
            circuit.z(*only)?;
        }
        [a, b] => {
            circuit.cz(*a, *b)?;
        }
        _ => {
            let k = controls.len();
            debug_assert!(work.len() >= k - 1);

            circuit.ccx(controls[0], controls[1], work[0])?;
            for i in 2..k {
                circuit.ccx(controls[i], work[i - 2], work[i - 1])?;
            }
            circuit.z(work[k - 2])?;
            for i in (2..k).rev() {
                circuit.ccx(controls[i], work[i - 2], work[i - 1])?;
            }
            circuit.ccx(controls[0], controls[1], work[0])?;
        }
    }
    Ok(())
}
