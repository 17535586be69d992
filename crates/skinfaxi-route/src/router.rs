//! SWAP-insertion routing.
//!
//! The router rewrites a circuit into the coordinates of a target device:
//! logical qubits start at a trivial placement, and whenever a two-qubit
//! gate lands on a non-adjacent pair, SWAPs are inserted along the
//! shortest path until the operands meet. The rewritten circuit addresses
//! physical positions on fresh `q`/`c` registers sized to the device, so
//! it can be handed to an emulated backend as-is.
//!
//! Measurements are carried through the mapping: a measure of logical
//! qubit `l` into clbit `c` becomes a measure of `l`'s physical position
//! at that point into the same `c`, so the readout register is unchanged
//! by routing.

use tracing::debug;

use skinfaxi_hal::Topology;
use skinfaxi_ir::{Circuit, InstructionKind, QubitId};

use crate::coupling::CouplingMap;
use crate::error::{RouteError, RouteResult};
use crate::layout::Layout;

/// A circuit rewritten onto a device topology.
#[derive(Debug)]
pub struct RoutedCircuit {
    /// The rewritten circuit, addressing physical positions. It has as
    /// many qubits as the device.
    pub circuit: Circuit,
    /// Where each logical qubit ended up.
    pub final_layout: Layout,
    /// Number of SWAP gates inserted.
    pub swaps_inserted: usize,
}

/// Route a circuit onto a device topology.
///
/// Uses a trivial initial placement and greedy shortest-path SWAP
/// insertion. The result is not optimal but is correct and cheap.
pub fn route(circuit: &Circuit, target: &Topology) -> RouteResult<RoutedCircuit> {
    let coupling = CouplingMap::from_topology(target);

    if circuit.num_qubits() as u32 > coupling.num_qubits() {
        return Err(RouteError::DeviceTooSmall {
            required: circuit.num_qubits() as u32,
            available: coupling.num_qubits(),
        });
    }

    // Total placement over the whole device; positions beyond the
    // circuit's qubits hold idle placeholders so SWAP paths may cross
    // them freely.
    let mut layout = Layout::trivial(coupling.num_qubits());

    let mut routed = Circuit::new(format!("{}_routed", circuit.name()));
    routed.add_qreg("q", coupling.num_qubits());
    routed.add_creg("c", circuit.num_clbits() as u32);

    let mut swaps_inserted = 0usize;

    for (_, inst) in circuit.dag().topological_ops() {
        if inst.is_two_qubit_gate() {
            let p0 = position(&layout, inst.qubits[0]);
            let mut p1 = position(&layout, inst.qubits[1]);

            if !coupling.is_connected(p0, p1) {
                let path = coupling
                    .shortest_path(p0, p1)
                    .ok_or(RouteError::NoPath { from: p0, to: p1 })?;

                // Walk the first operand up to the neighbor of the target.
                for window in path.windows(2).take(path.len() - 2) {
                    let (a, b) = (window[0], window[1]);
                    routed.swap(QubitId(a), QubitId(b))?;
                    layout.swap(a, b);
                    swaps_inserted += 1;
                }
                p1 = position(&layout, inst.qubits[1]);
            }

            let p0 = position(&layout, inst.qubits[0]);
            debug_assert!(coupling.is_connected(p0, p1));
            let gate = *inst.as_gate().expect("two-qubit predicate implies gate");
            routed.gate(gate, [QubitId(p0), QubitId(p1)])?;
            continue;
        }

        match &inst.kind {
            InstructionKind::Gate(gate) => {
                // Single- and three-qubit gates pass through mapped; the
                // coupling map only constrains two-qubit interactions.
                let mapped: Vec<QubitId> = inst
                    .qubits
                    .iter()
                    .map(|&q| QubitId(position(&layout, q)))
                    .collect();
                routed.gate(*gate, mapped)?;
            }
            InstructionKind::Measure => {
                for (&q, &c) in inst.qubits.iter().zip(&inst.clbits) {
                    routed.measure(QubitId(position(&layout, q)), c)?;
                }
            }
            InstructionKind::Reset => {
                routed.reset(QubitId(position(&layout, inst.qubits[0])))?;
            }
            InstructionKind::Barrier => {
                let mapped: Vec<QubitId> = inst
                    .qubits
                    .iter()
                    .map(|&q| QubitId(position(&layout, q)))
                    .collect();
                routed.barrier(mapped)?;
            }
        }
    }

    debug!(
        swaps_inserted,
        device_qubits = coupling.num_qubits(),
        "routing complete"
    );

    Ok(RoutedCircuit {
        circuit: routed,
        final_layout: layout,
        swaps_inserted,
    })
}

/// Physical position of a logical qubit under a total layout.
fn position(layout: &Layout, logical: QubitId) -> u32 {
    layout
        .get_physical(logical)
        .expect("layout is total over the device")
}

#[cfg(test)]
mod tests {
    use super::*;
    use skinfaxi_ir::ClbitId;

    fn all_two_qubit_gates_adjacent(circuit: &Circuit, topology: &Topology) -> bool {
        circuit
            .dag()
            .topological_ops()
            .filter(|(_, inst)| inst.is_two_qubit_gate())
            .all(|(_, inst)| topology.contains_edge(inst.qubits[0].0, inst.qubits[1].0))
    }

    #[test]
    fn test_route_adjacent_needs_no_swaps() {
        let mut circuit = Circuit::with_size("near", 2, 0);
        circuit.h(QubitId(0)).unwrap();
        circuit.cx(QubitId(0), QubitId(1)).unwrap();

        let target = Topology::linear(5);
        let routed = route(&circuit, &target).unwrap();

        assert_eq!(routed.swaps_inserted, 0);
        assert_eq!(routed.circuit.num_qubits(), 5);
        assert!(all_two_qubit_gates_adjacent(&routed.circuit, &target));
    }

    #[test]
    fn test_route_inserts_swaps() {
        let mut circuit = Circuit::with_size("far", 3, 0);
        circuit.cx(QubitId(0), QubitId(2)).unwrap();

        let target = Topology::linear(3);
        let routed = route(&circuit, &target).unwrap();

        assert!(routed.swaps_inserted > 0);
        assert!(all_two_qubit_gates_adjacent(&routed.circuit, &target));
    }

    #[test]
    fn test_route_updates_layout() {
        let mut circuit = Circuit::with_size("far", 3, 0);
        circuit.cx(QubitId(0), QubitId(2)).unwrap();

        let routed = route(&circuit, &Topology::linear(3)).unwrap();
        // Logical 0 walked one step toward logical 2.
        assert_eq!(routed.final_layout.get_physical(QubitId(0)), Some(1));
        assert_eq!(routed.final_layout.get_physical(QubitId(1)), Some(0));
    }

    #[test]
    fn test_route_carries_measurements() {
        let mut circuit = Circuit::with_size("meas", 3, 3);
        circuit.cx(QubitId(0), QubitId(2)).unwrap();
        circuit.measure(QubitId(0), ClbitId(0)).unwrap();
        circuit.measure(QubitId(2), ClbitId(2)).unwrap();

        let routed = route(&circuit, &Topology::linear(3)).unwrap();

        // The measure of logical 0 follows it to its new position.
        let measures: Vec<_> = routed
            .circuit
            .dag()
            .topological_ops()
            .filter(|(_, inst)| inst.is_measure())
            .map(|(_, inst)| (inst.qubits[0].0, inst.clbits[0].0))
            .collect();
        assert_eq!(measures.len(), 2);
        let expected_q0 = routed.final_layout.get_physical(QubitId(0)).unwrap();
        assert!(measures.contains(&(expected_q0, 0)));
    }

    #[test]
    fn test_route_device_too_small() {
        let circuit = Circuit::with_size("wide", 6, 0);
        let err = route(&circuit, &Topology::linear(3)).unwrap_err();
        assert!(matches!(err, RouteError::DeviceTooSmall { .. }));
    }

    #[test]
    fn test_route_disconnected_device() {
        let mut circuit = Circuit::with_size("split", 4, 0);
        circuit.cx(QubitId(0), QubitId(3)).unwrap();

        let target = Topology::from_edges(4, [(0, 1), (2, 3)]);
        let err = route(&circuit, &target).unwrap_err();
        assert!(matches!(err, RouteError::NoPath { .. }));
    }

    #[test]
    fn test_routed_register_names() {
        let mut circuit = Circuit::with_size("plain", 2, 1);
        circuit.h(QubitId(0)).unwrap();
        circuit.measure(QubitId(0), ClbitId(0)).unwrap();

        let routed = route(&circuit, &Topology::linear(2)).unwrap();
        assert_eq!(routed.circuit.qubits()[0].register.as_deref(), Some("q"));
        assert_eq!(routed.circuit.clbits()[0].register.as_deref(), Some("c"));
    }
}
