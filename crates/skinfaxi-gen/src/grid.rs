//! Supremacy-style random grid circuits.
//!
//! Qubits sit on a `rows x cols` grid (row-major indexing). Each layer
//! activates one of four coupler patterns — staggered horizontal or
//! vertical neighbor pairs — and fills the idle qubits with random
//! single-qubit gates, never repeating the same gate twice in a row on
//! one qubit.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::f64::consts::PI;

use skinfaxi_ir::{Circuit, Gate, QubitId};

use crate::error::GenResult;

/// Two-qubit layer flavor for grid circuits.
#[derive(Debug, Clone, Copy)]
enum Coupler {
    /// Controlled-Z, as in superconducting supremacy experiments.
    Cz,
    /// iSWAP followed by a controlled phase (an fSim-style interaction).
    Fsim,
}

/// Generate a supremacy-style grid circuit (CZ couplers).
pub fn supremacy(rows: u32, cols: u32, depth: u32, seed: u64) -> GenResult<Circuit> {
    let single_qubit_pool = [Gate::T, Gate::SX, Gate::Ry(PI / 2.0)];
    grid_circuit(
        format!("supremacy_{rows}x{cols}"),
        rows,
        cols,
        depth,
        seed,
        Coupler::Cz,
        &single_qubit_pool,
    )
}

/// Generate a sycamore-style grid circuit (fSim-flavored couplers).
pub fn sycamore(rows: u32, cols: u32, depth: u32, seed: u64) -> GenResult<Circuit> {
    let single_qubit_pool = [Gate::SX, Gate::Ry(PI / 2.0), Gate::U(PI / 2.0, -PI / 4.0, PI / 4.0)];
    grid_circuit(
        format!("sycamore_{rows}x{cols}"),
        rows,
        cols,
        depth,
        seed,
        Coupler::Fsim,
        &single_qubit_pool,
    )
}

fn grid_circuit(
    name: String,
    rows: u32,
    cols: u32,
    depth: u32,
    seed: u64,
    coupler: Coupler,
    pool: &[Gate],
) -> GenResult<Circuit> {
    let num_qubits = rows * cols;
    let mut circuit = Circuit::with_size(name, num_qubits, 0);
    let mut rng = SmallRng::seed_from_u64(seed);

    for q in 0..num_qubits {
        circuit.h(QubitId(q))?;
    }

    // Last single-qubit gate choice per qubit, to avoid immediate repeats.
    let mut last_choice: Vec<Option<usize>> = vec![None; num_qubits as usize];

    for layer in 0..depth {
        let pairs = pattern_pairs(rows, cols, layer % 4);
        let mut active = vec![false; num_qubits as usize];

        for &(a, b) in &pairs {
            active[a as usize] = true;
            active[b as usize] = true;
            match coupler {
                Coupler::Cz => {
                    circuit.cz(QubitId(a), QubitId(b))?;
                }
                Coupler::Fsim => {
                    circuit.iswap(QubitId(a), QubitId(b))?;
                    circuit.cp(-PI / 6.0, QubitId(a), QubitId(b))?;
                }
            }
        }

        for q in 0..num_qubits {
            if active[q as usize] {
                last_choice[q as usize] = None;
                continue;
            }
            let mut choice = rng.gen_range(0..pool.len());
            if last_choice[q as usize] == Some(choice) {
                choice = (choice + 1) % pool.len();
            }
            last_choice[q as usize] = Some(choice);
            circuit.gate(pool[choice], [QubitId(q)])?;
        }
    }

    Ok(circuit)
}

/// Neighbor pairs for one of the four staggered grid patterns.
///
/// Patterns 0 and 1 pair horizontal neighbors at even/odd column offsets;
/// patterns 2 and 3 pair vertical neighbors at even/odd row offsets.
fn pattern_pairs(rows: u32, cols: u32, pattern: u32) -> Vec<(u32, u32)> {
    let index = |r: u32, c: u32| r * cols + c;
    let mut pairs = vec![];

    match pattern {
        0 | 1 => {
            let offset = pattern;
            for r in 0..rows {
                let mut c = offset;
                while c + 1 < cols {
                    pairs.push((index(r, c), index(r, c + 1)));
                    c += 2;
                }
            }
        }
        _ => {
            let offset = pattern - 2;
            for c in 0..cols {
                let mut r = offset;
                while r + 1 < rows {
                    pairs.push((index(r, c), index(r + 1, c)));
                    r += 2;
                }
            }
        }
    }

    pairs
}
