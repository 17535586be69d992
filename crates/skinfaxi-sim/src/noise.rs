//! Stochastic noise sampling for device emulation.
//!
//! Noise is applied trajectory-style: after each gate every operand takes
//! a depolarizing kick (a uniformly random Pauli) at the profile's error
//! rate, and sampled readout bits flip at the readout error rate. Each
//! shot is an independent trajectory, so the emulated backend re-simulates
//! per shot.

use rand::Rng;

use skinfaxi_hal::NoiseProfile;
use skinfaxi_ir::Gate;

use crate::statevector::Statevector;

/// Apply a depolarizing kick to one qubit with probability `p`.
pub fn depolarizing_kick(sv: &mut Statevector, qubit: usize, p: f64, rng: &mut impl Rng) {
    if p <= 0.0 || rng.r#gen::<f64>() >= p {
        return;
    }
    let pauli = match rng.gen_range(0..3) {
        0 => Gate::X,
        1 => Gate::Y,
        _ => Gate::Z,
    };
    sv.apply_gate(&pauli, &[qubit]);
}

/// Apply post-gate noise to every operand of a gate.
///
/// Single-qubit operands use the single-qubit error rate; operands of
/// multi-qubit gates use the two-qubit rate.
pub fn gate_noise(
    sv: &mut Statevector,
    qubits: &[usize],
    profile: &NoiseProfile,
    rng: &mut impl Rng,
) {
    let p = if qubits.len() == 1 {
        profile.single_qubit_error
    } else {
        profile.two_qubit_error
    };
    for &q in qubits {
        depolarizing_kick(sv, q, p, rng);
    }
}

/// Flip each of the `num_bits` low bits of `outcome` with probability `p`.
pub fn readout_flips(outcome: usize, num_bits: usize, p: f64, rng: &mut impl Rng) -> usize {
    if p <= 0.0 {
        return outcome;
    }
    let mut noisy = outcome;
    for bit in 0..num_bits {
        if rng.r#gen::<f64>() < p {
            noisy ^= 1 << bit;
        }
    }
    noisy
}
