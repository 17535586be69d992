//! Two-qubit interaction skeletons.
//!
//! Cut-finding and placement tools work on the interaction structure of a
//! circuit, not its full gate content. The functions here rebuild a circuit
//! keeping only its two-qubit gates: single-qubit gates, barriers,
//! measurements, and resets are dropped.

use crate::circuit::Circuit;
use crate::error::IrResult;

/// Extract the two-qubit skeleton of a circuit.
///
/// The result has the same qubits as the input, no classical bits, and
/// only the two-qubit gate instructions in their original order.
pub fn two_qubit_skeleton(circuit: &Circuit) -> IrResult<Circuit> {
    truncated_skeleton(circuit, None)
}

/// Extract the two-qubit skeleton, keeping only the first `max_gates` gates.
///
/// With `max_gates = None` every two-qubit gate is kept.
pub fn truncated_skeleton(circuit: &Circuit, max_gates: Option<usize>) -> IrResult<Circuit> {
    let mut kept = Circuit::new(format!("{}_skeleton", circuit.name()));
    for _ in circuit.qubits() {
        kept.add_qubit();
    }

    let mut added = 0usize;
    for (_, inst) in circuit.dag().topological_ops() {
        if max_gates.is_some_and(|max| added >= max) {
            break;
        }
        if inst.is_two_qubit_gate() {
            let gate = *inst.as_gate().expect("two-qubit predicate implies gate");
            kept.gate(gate, inst.qubits.iter().copied())?;
            added += 1;
        }
    }

    Ok(kept)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::qubit::QubitId;

    fn sample_circuit() -> Circuit {
        let mut circuit = Circuit::with_size("sample", 3, 0);
        circuit.h(QubitId(0)).unwrap();
        circuit.cx(QubitId(0), QubitId(1)).unwrap();
        circuit.barrier_all().unwrap();
        circuit.t(QubitId(2)).unwrap();
        circuit.cz(QubitId(1), QubitId(2)).unwrap();
        circuit.swap(QubitId(0), QubitId(2)).unwrap();
        circuit
    }

    #[test]
    fn test_two_qubit_skeleton() {
        let skeleton = two_qubit_skeleton(&sample_circuit()).unwrap();
        assert_eq!(skeleton.num_qubits(), 3);
        assert_eq!(skeleton.num_clbits(), 0);

        let names: Vec<_> = skeleton
            .dag()
            .topological_ops()
            .map(|(_, i)| i.name())
            .collect();
        assert_eq!(names, vec!["cx", "cz", "swap"]);
    }

    #[test]
    fn test_truncated_skeleton() {
        let skeleton = truncated_skeleton(&sample_circuit(), Some(2)).unwrap();
        assert_eq!(skeleton.num_ops(), 2);

        let names: Vec<_> = skeleton
            .dag()
            .topological_ops()
            .map(|(_, i)| i.name())
            .collect();
        assert_eq!(names, vec!["cx", "cz"]);
    }

    #[test]
    fn test_skeleton_of_single_qubit_circuit_is_empty() {
        let mut circuit = Circuit::with_size("oneq", 2, 0);
        circuit.h(QubitId(0)).unwrap();
        circuit.t(QubitId(1)).unwrap();

        let skeleton = two_qubit_skeleton(&circuit).unwrap();
        assert_eq!(skeleton.num_ops(), 0);
    }
}
