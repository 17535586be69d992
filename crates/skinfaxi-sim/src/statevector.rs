//! Statevector simulation engine.

use ndarray::Array1;
use num_complex::Complex64;
use rand::Rng;
use std::f64::consts::{FRAC_1_SQRT_2, PI};

use skinfaxi_ir::{Gate, Instruction, InstructionKind};

type Mat2 = [[Complex64; 2]; 2];

const ZERO: Complex64 = Complex64::new(0.0, 0.0);
const ONE: Complex64 = Complex64::new(1.0, 0.0);
const IM: Complex64 = Complex64::new(0.0, 1.0);

/// A statevector representing a quantum state.
pub struct Statevector {
    /// The state amplitudes (2^n complex numbers).
    amplitudes: Vec<Complex64>,
    /// Number of qubits.
    num_qubits: usize,
}

impl Statevector {
    /// Create a new statevector initialized to |0...0⟩.
    pub fn new(num_qubits: usize) -> Self {
        let size = 1usize << num_qubits;
        let mut amplitudes = vec![ZERO; size];
        amplitudes[0] = ONE;
        Self {
            amplitudes,
            num_qubits,
        }
    }

    /// Get the number of qubits.
    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    /// Get the amplitude of a basis state.
    pub fn amplitude(&self, state: usize) -> Complex64 {
        self.amplitudes[state]
    }

    /// Apply an instruction to the statevector.
    ///
    /// Measurements and barriers leave the state untouched; sampling is
    /// the caller's responsibility.
    pub fn apply(&mut self, instruction: &Instruction) {
        match &instruction.kind {
            InstructionKind::Gate(gate) => {
                let qubits: Vec<usize> =
                    instruction.qubits.iter().map(|q| q.0 as usize).collect();
                self.apply_gate(gate, &qubits);
            }
            InstructionKind::Reset => {
                self.reset(instruction.qubits[0].0 as usize);
            }
            InstructionKind::Measure | InstructionKind::Barrier => {}
        }
    }

    /// Apply a gate to specific qubits.
    pub fn apply_gate(&mut self, gate: &Gate, qubits: &[usize]) {
        if let Some(m) = single_qubit_matrix(gate) {
            self.apply_1q(qubits[0], &m);
            return;
        }

        match *gate {
            Gate::CX => self.apply_ctrl_1q(qubits[0], qubits[1], &mat_x()),
            Gate::CY => self.apply_ctrl_1q(qubits[0], qubits[1], &mat_y()),
            Gate::CZ => self.apply_ctrl_1q(qubits[0], qubits[1], &mat_z()),
            Gate::CH => self.apply_ctrl_1q(qubits[0], qubits[1], &mat_h()),
            Gate::CRx(theta) => self.apply_ctrl_1q(qubits[0], qubits[1], &mat_rx(theta)),
            Gate::CRy(theta) => self.apply_ctrl_1q(qubits[0], qubits[1], &mat_ry(theta)),
            Gate::CRz(theta) => self.apply_ctrl_1q(qubits[0], qubits[1], &mat_rz(theta)),
            Gate::CP(theta) => self.apply_ctrl_1q(qubits[0], qubits[1], &mat_phase(theta)),
            Gate::Swap => self.apply_swap(qubits[0], qubits[1]),
            Gate::ISwap => self.apply_iswap(qubits[0], qubits[1]),
            Gate::CCX => self.apply_ccx(qubits[0], qubits[1], qubits[2]),
            Gate::CSwap => self.apply_cswap(qubits[0], qubits[1], qubits[2]),
            _ => unreachable!("single-qubit gates handled above"),
        }
    }

    /// Apply a 2x2 matrix to one qubit.
    fn apply_1q(&mut self, qubit: usize, m: &Mat2) {
        let mask = 1usize << qubit;
        for i in 0..self.amplitudes.len() {
            if i & mask == 0 {
                let j = i | mask;
                let a = self.amplitudes[i];
                let b = self.amplitudes[j];
                self.amplitudes[i] = m[0][0] * a + m[0][1] * b;
                self.amplitudes[j] = m[1][0] * a + m[1][1] * b;
            }
        }
    }

    /// Apply a 2x2 matrix to `target`, conditioned on `control` being |1⟩.
    fn apply_ctrl_1q(&mut self, control: usize, target: usize, m: &Mat2) {
        let ctrl_mask = 1usize << control;
        let tgt_mask = 1usize << target;
        for i in 0..self.amplitudes.len() {
            if (i & ctrl_mask != 0) && (i & tgt_mask == 0) {
                let j = i | tgt_mask;
                let a = self.amplitudes[i];
                let b = self.amplitudes[j];
                self.amplitudes[i] = m[0][0] * a + m[0][1] * b;
                self.amplitudes[j] = m[1][0] * a + m[1][1] * b;
            }
        }
    }

    fn apply_swap(&mut self, q1: usize, q2: usize) {
        let mask1 = 1usize << q1;
        let mask2 = 1usize << q2;
        for i in 0..self.amplitudes.len() {
            if (i & mask1 != 0) && (i & mask2 == 0) {
                let j = (i & !mask1) | mask2;
                self.amplitudes.swap(i, j);
            }
        }
    }

    fn apply_iswap(&mut self, q1: usize, q2: usize) {
        let mask1 = 1usize << q1;
        let mask2 = 1usize << q2;
        for i in 0..self.amplitudes.len() {
            if (i & mask1 != 0) && (i & mask2 == 0) {
                let j = (i & !mask1) | mask2;
                let tmp = self.amplitudes[i];
                self.amplitudes[i] = IM * self.amplitudes[j];
                self.amplitudes[j] = IM * tmp;
            }
        }
    }

    fn apply_ccx(&mut self, c1: usize, c2: usize, target: usize) {
        let c1_mask = 1usize << c1;
        let c2_mask = 1usize << c2;
        let tgt_mask = 1usize << target;
        for i in 0..self.amplitudes.len() {
            if (i & c1_mask != 0) && (i & c2_mask != 0) && (i & tgt_mask == 0) {
                let j = i | tgt_mask;
                self.amplitudes.swap(i, j);
            }
        }
    }

    fn apply_cswap(&mut self, control: usize, t1: usize, t2: usize) {
        let ctrl_mask = 1usize << control;
        let t1_mask = 1usize << t1;
        let t2_mask = 1usize << t2;
        for i in 0..self.amplitudes.len() {
            if (i & ctrl_mask != 0) && (i & t1_mask != 0) && (i & t2_mask == 0) {
                let j = (i & !t1_mask) | t2_mask;
                self.amplitudes.swap(i, j);
            }
        }
    }

    /// Project a qubit to |0⟩ and renormalize.
    fn reset(&mut self, qubit: usize) {
        let mask = 1usize << qubit;
        let mut norm_sq = 0.0;
        for i in 0..self.amplitudes.len() {
            if i & mask != 0 {
                let j = i & !mask;
                let val = self.amplitudes[i];
                self.amplitudes[j] += val;
                self.amplitudes[i] = ZERO;
            }
            norm_sq += self.amplitudes[i].norm_sqr();
        }
        let norm = norm_sq.sqrt();
        if norm > 0.0 {
            for amp in &mut self.amplitudes {
                *amp /= norm;
            }
        }
    }

    /// Get the probability of each basis state.
    pub fn probabilities(&self) -> Array1<f64> {
        self.amplitudes.iter().map(Complex64::norm_sqr).collect()
    }

    /// Sample a measurement outcome using the given random source.
    pub fn sample(&self, rng: &mut impl Rng) -> usize {
        let r: f64 = rng.r#gen();
        let mut cumulative = 0.0;
        for (i, amp) in self.amplitudes.iter().enumerate() {
            cumulative += amp.norm_sqr();
            if r < cumulative {
                return i;
            }
        }
        // Fallback for rounding at the top of the CDF.
        self.amplitudes.len() - 1
    }

    /// Render a measurement outcome as a bitstring, highest qubit first.
    ///
    /// Bit `i` of the outcome corresponds to qubit `i`, so the string
    /// parses back to the outcome with `usize::from_str_radix(s, 2)`.
    pub fn outcome_to_bitstring(&self, outcome: usize) -> String {
        format!("{:0width$b}", outcome, width = self.num_qubits)
    }
}

/// The 2x2 matrix of a single-qubit gate, if `gate` is one.
fn single_qubit_matrix(gate: &Gate) -> Option<Mat2> {
    let m = match *gate {
        Gate::I => mat_i(),
        Gate::X => mat_x(),
        Gate::Y => mat_y(),
        Gate::Z => mat_z(),
        Gate::H => mat_h(),
        Gate::S => mat_phase(PI / 2.0),
        Gate::Sdg => mat_phase(-PI / 2.0),
        Gate::T => mat_phase(PI / 4.0),
        Gate::Tdg => mat_phase(-PI / 4.0),
        Gate::SX => mat_rx(PI / 2.0),
        Gate::SXdg => mat_rx(-PI / 2.0),
        Gate::Rx(theta) => mat_rx(theta),
        Gate::Ry(theta) => mat_ry(theta),
        Gate::Rz(theta) => mat_rz(theta),
        Gate::P(theta) => mat_phase(theta),
        Gate::U(theta, phi, lambda) => mat_u(theta, phi, lambda),
        _ => return None,
    };
    Some(m)
}

fn mat_i() -> Mat2 {
    [[ONE, ZERO], [ZERO, ONE]]
}

fn mat_x() -> Mat2 {
    [[ZERO, ONE], [ONE, ZERO]]
}

fn mat_y() -> Mat2 {
    [[ZERO, -IM], [IM, ZERO]]
}

fn mat_z() -> Mat2 {
    [[ONE, ZERO], [ZERO, -ONE]]
}

fn mat_h() -> Mat2 {
    let v = Complex64::new(FRAC_1_SQRT_2, 0.0);
    [[v, v], [v, -v]]
}

fn mat_phase(theta: f64) -> Mat2 {
    [[ONE, ZERO], [ZERO, Complex64::from_polar(1.0, theta)]]
}

fn mat_rx(theta: f64) -> Mat2 {
    let c = Complex64::new((theta / 2.0).cos(), 0.0);
    let s = Complex64::new(0.0, -(theta / 2.0).sin());
    [[c, s], [s, c]]
}

fn mat_ry(theta: f64) -> Mat2 {
    let c = Complex64::new((theta / 2.0).cos(), 0.0);
    let s = Complex64::new((theta / 2.0).sin(), 0.0);
    [[c, -s], [s, c]]
}

fn mat_rz(theta: f64) -> Mat2 {
    [
        [Complex64::from_polar(1.0, -theta / 2.0), ZERO],
        [ZERO, Complex64::from_polar(1.0, theta / 2.0)],
    ]
}

fn mat_u(theta: f64, phi: f64, lambda: f64) -> Mat2 {
    let c = (theta / 2.0).cos();
    let s = (theta / 2.0).sin();
    [
        [
            Complex64::new(c, 0.0),
            -Complex64::from_polar(s, lambda),
        ],
        [
            Complex64::from_polar(s, phi),
            Complex64::from_polar(c, phi + lambda),
        ],
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    fn approx_eq(a: Complex64, b: Complex64) -> bool {
        (a - b).norm() < 1e-10
    }

    #[test]
    fn test_initial_state() {
        let sv = Statevector::new(2);
        assert!(approx_eq(sv.amplitude(0), ONE));
        assert!(approx_eq(sv.amplitude(1), ZERO));
        assert!(approx_eq(sv.amplitude(2), ZERO));
        assert!(approx_eq(sv.amplitude(3), ZERO));
    }

    #[test]
    fn test_hadamard() {
        let mut sv = Statevector::new(1);
        sv.apply_gate(&Gate::H, &[0]);

        let v = Complex64::new(FRAC_1_SQRT_2, 0.0);
        assert!(approx_eq(sv.amplitude(0), v));
        assert!(approx_eq(sv.amplitude(1), v));
    }

    #[test]
    fn test_bell_state() {
        let mut sv = Statevector::new(2);
        sv.apply_gate(&Gate::H, &[0]);
        sv.apply_gate(&Gate::CX, &[0, 1]);

        let v = Complex64::new(FRAC_1_SQRT_2, 0.0);
        assert!(approx_eq(sv.amplitude(0), v));
        assert!(approx_eq(sv.amplitude(1), ZERO));
        assert!(approx_eq(sv.amplitude(2), ZERO));
        assert!(approx_eq(sv.amplitude(3), v));
    }

    #[test]
    fn test_x_gate() {
        let mut sv = Statevector::new(1);
        sv.apply_gate(&Gate::X, &[0]);

        assert!(approx_eq(sv.amplitude(0), ZERO));
        assert!(approx_eq(sv.amplitude(1), ONE));
    }

    #[test]
    fn test_sx_squares_to_x() {
        let mut sv = Statevector::new(1);
        sv.apply_gate(&Gate::SX, &[0]);
        sv.apply_gate(&Gate::SX, &[0]);

        // Up to global phase, |0⟩ maps to |1⟩.
        assert!(sv.amplitude(0).norm() < 1e-10);
        assert!((sv.amplitude(1).norm() - 1.0).abs() < 1e-10);
    }

    #[test]
    fn test_controlled_phase_symmetry() {
        // CP is diagonal; |11⟩ picks up the phase regardless of operand order.
        let theta = PI / 3.0;
        let mut sv = Statevector::new(2);
        sv.apply_gate(&Gate::X, &[0]);
        sv.apply_gate(&Gate::X, &[1]);
        sv.apply_gate(&Gate::CP(theta), &[0, 1]);

        assert!(approx_eq(sv.amplitude(3), Complex64::from_polar(1.0, theta)));
    }

    #[test]
    fn test_swap() {
        let mut sv = Statevector::new(2);
        sv.apply_gate(&Gate::X, &[0]);
        sv.apply_gate(&Gate::Swap, &[0, 1]);

        assert!(approx_eq(sv.amplitude(0b10), ONE));
    }

    #[test]
    fn test_ccx() {
        let mut sv = Statevector::new(3);
        sv.apply_gate(&Gate::X, &[0]);
        sv.apply_gate(&Gate::X, &[1]);
        sv.apply_gate(&Gate::CCX, &[0, 1, 2]);

        assert!(approx_eq(sv.amplitude(0b111), ONE));
    }

    #[test]
    fn test_probabilities_sum_to_one() {
        let mut sv = Statevector::new(3);
        sv.apply_gate(&Gate::H, &[0]);
        sv.apply_gate(&Gate::CX, &[0, 1]);
        sv.apply_gate(&Gate::Ry(0.7), &[2]);

        assert!((sv.probabilities().sum() - 1.0).abs() < 1e-10);
    }

    #[test]
    fn test_sample_deterministic() {
        // |1⟩ state should always sample to 1.
        let mut sv = Statevector::new(1);
        sv.apply_gate(&Gate::X, &[0]);

        let mut rng = SmallRng::seed_from_u64(17);
        for _ in 0..100 {
            assert_eq!(sv.sample(&mut rng), 1);
        }
    }

    #[test]
    fn test_outcome_to_bitstring() {
        let sv = Statevector::new(4);
        // Qubit 1 and qubit 2 set: index 6, rendered highest qubit first.
        assert_eq!(sv.outcome_to_bitstring(0b0110), "0110");
        assert_eq!(
            usize::from_str_radix(&sv.outcome_to_bitstring(11), 2).unwrap(),
            11
        );
    }

    #[test]
    fn test_reset() {
        let mut sv = Statevector::new(1);
        sv.apply_gate(&Gate::X, &[0]);
        sv.apply(&skinfaxi_ir::Instruction::reset(skinfaxi_ir::QubitId(0)));

        assert!((sv.amplitude(0).norm() - 1.0).abs() < 1e-10);
    }
}
