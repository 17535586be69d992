//! High-level circuit builder API.

use crate::dag::CircuitDag;
use crate::error::{IrError, IrResult};
use crate::gate::Gate;
use crate::instruction::{Instruction, InstructionKind};
use crate::qubit::{Clbit, ClbitId, Qubit, QubitId};

/// A quantum circuit.
///
/// This provides a high-level API for building quantum circuits,
/// with convenient methods for common gates and operations.
#[derive(Debug, Clone)]
pub struct Circuit {
    /// Name of the circuit.
    name: String,
    /// Qubits in the circuit.
    qubits: Vec<Qubit>,
    /// Classical bits in the circuit.
    clbits: Vec<Clbit>,
    /// The underlying DAG representation.
    dag: CircuitDag,
    /// Counter for generating qubit IDs.
    next_qubit_id: u32,
    /// Counter for generating classical bit IDs.
    next_clbit_id: u32,
}

impl Circuit {
    /// Create a new empty circuit.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            qubits: vec![],
            clbits: vec![],
            dag: CircuitDag::new(),
            next_qubit_id: 0,
            next_clbit_id: 0,
        }
    }

    /// Create a circuit with a given number of qubits and classical bits.
    pub fn with_size(name: impl Into<String>, num_qubits: u32, num_clbits: u32) -> Self {
        let mut circuit = Self::new(name);
        for _ in 0..num_qubits {
            circuit.add_qubit();
        }
        for _ in 0..num_clbits {
            circuit.add_clbit();
        }
        circuit
    }

    /// Add a single qubit to the circuit.
    pub fn add_qubit(&mut self) -> QubitId {
        let id = QubitId(self.next_qubit_id);
        self.next_qubit_id += 1;
        self.qubits.push(Qubit::new(id));
        self.dag.add_qubit(id);
        id
    }

    /// Add a quantum register with multiple qubits.
    pub fn add_qreg(&mut self, name: impl Into<String>, size: u32) -> Vec<QubitId> {
        let name = name.into();
        let mut ids = vec![];
        for i in 0..size {
            let id = QubitId(self.next_qubit_id);
            self.next_qubit_id += 1;
            self.qubits.push(Qubit::with_register(id, &name, i));
            self.dag.add_qubit(id);
            ids.push(id);
        }
        ids
    }

    /// Add a single classical bit to the circuit.
    pub fn add_clbit(&mut self) -> ClbitId {
        let id = ClbitId(self.next_clbit_id);
        self.next_clbit_id += 1;
        self.clbits.push(Clbit::new(id));
        self.dag.add_clbit(id);
        id
    }

    /// Add a classical register with multiple bits.
    pub fn add_creg(&mut self, name: impl Into<String>, size: u32) -> Vec<ClbitId> {
        let name = name.into();
        let mut ids = vec![];
        for i in 0..size {
            let id = ClbitId(self.next_clbit_id);
            self.next_clbit_id += 1;
            self.clbits.push(Clbit::with_register(id, &name, i));
            self.dag.add_clbit(id);
            ids.push(id);
        }
        ids
    }

    // =========================================================================
    // Single-qubit gates
    // =========================================================================

    /// Apply identity gate.
    pub fn id(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.dag.apply(Instruction::single_qubit_gate(Gate::I, qubit))?;
        Ok(self)
    }

    /// Apply Hadamard gate.
    pub fn h(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.dag.apply(Instruction::single_qubit_gate(Gate::H, qubit))?;
        Ok(self)
    }

    /// Apply Pauli-X gate.
    pub fn x(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.dag.apply(Instruction::single_qubit_gate(Gate::X, qubit))?;
        Ok(self)
    }

    /// Apply Pauli-Y gate.
    pub fn y(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.dag.apply(Instruction::single_qubit_gate(Gate::Y, qubit))?;
        Ok(self)
    }

    /// Apply Pauli-Z gate.
    pub fn z(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.dag.apply(Instruction::single_qubit_gate(Gate::Z, qubit))?;
        Ok(self)
    }

    /// Apply S gate.
    pub fn s(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.dag.apply(Instruction::single_qubit_gate(Gate::S, qubit))?;
        Ok(self)
    }

    /// Apply S-dagger gate.
    pub fn sdg(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.dag
            .apply(Instruction::single_qubit_gate(Gate::Sdg, qubit))?;
        Ok(self)
    }

    /// Apply T gate.
    pub fn t(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.dag.apply(Instruction::single_qubit_gate(Gate::T, qubit))?;
        Ok(self)
    }

    /// Apply T-dagger gate.
    pub fn tdg(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.dag
            .apply(Instruction::single_qubit_gate(Gate::Tdg, qubit))?;
        Ok(self)
    }

    /// Apply sqrt(X) gate.
    pub fn sx(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.dag.apply(Instruction::single_qubit_gate(Gate::SX, qubit))?;
        Ok(self)
    }

    /// Apply sqrt(X)-dagger gate.
    pub fn sxdg(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.dag
            .apply(Instruction::single_qubit_gate(Gate::SXdg, qubit))?;
        Ok(self)
    }

    /// Apply Rx rotation gate.
    pub fn rx(&mut self, theta: f64, qubit: QubitId) -> IrResult<&mut Self> {
        self.dag
            .apply(Instruction::single_qubit_gate(Gate::Rx(theta), qubit))?;
        Ok(self)
    }

    /// Apply Ry rotation gate.
    pub fn ry(&mut self, theta: f64, qubit: QubitId) -> IrResult<&mut Self> {
        self.dag
            .apply(Instruction::single_qubit_gate(Gate::Ry(theta), qubit))?;
        Ok(self)
    }

    /// Apply Rz rotation gate.
    pub fn rz(&mut self, theta: f64, qubit: QubitId) -> IrResult<&mut Self> {
        self.dag
            .apply(Instruction::single_qubit_gate(Gate::Rz(theta), qubit))?;
        Ok(self)
    }

    /// Apply phase gate.
    pub fn p(&mut self, theta: f64, qubit: QubitId) -> IrResult<&mut Self> {
        self.dag
            .apply(Instruction::single_qubit_gate(Gate::P(theta), qubit))?;
        Ok(self)
    }

    /// Apply universal U gate.
    pub fn u(&mut self, theta: f64, phi: f64, lambda: f64, qubit: QubitId) -> IrResult<&mut Self> {
        self.dag.apply(Instruction::single_qubit_gate(
            Gate::U(theta, phi, lambda),
            qubit,
        ))?;
        Ok(self)
    }

    // =========================================================================
    // Two-qubit gates
    // =========================================================================

    /// Apply CNOT (CX) gate.
    pub fn cx(&mut self, control: QubitId, target: QubitId) -> IrResult<&mut Self> {
        self.dag
            .apply(Instruction::two_qubit_gate(Gate::CX, control, target))?;
        Ok(self)
    }

    /// Apply CY gate.
    pub fn cy(&mut self, control: QubitId, target: QubitId) -> IrResult<&mut Self> {
        self.dag
            .apply(Instruction::two_qubit_gate(Gate::CY, control, target))?;
        Ok(self)
    }

    /// Apply CZ gate.
    pub fn cz(&mut self, control: QubitId, target: QubitId) -> IrResult<&mut Self> {
        self.dag
            .apply(Instruction::two_qubit_gate(Gate::CZ, control, target))?;
        Ok(self)
    }

    /// Apply controlled-Hadamard gate.
    pub fn ch(&mut self, control: QubitId, target: QubitId) -> IrResult<&mut Self> {
        self.dag
            .apply(Instruction::two_qubit_gate(Gate::CH, control, target))?;
        Ok(self)
    }

    /// Apply SWAP gate.
    pub fn swap(&mut self, q1: QubitId, q2: QubitId) -> IrResult<&mut Self> {
        self.dag
            .apply(Instruction::two_qubit_gate(Gate::Swap, q1, q2))?;
        Ok(self)
    }

    /// Apply iSWAP gate.
    pub fn iswap(&mut self, q1: QubitId, q2: QubitId) -> IrResult<&mut Self> {
        self.dag
            .apply(Instruction::two_qubit_gate(Gate::ISwap, q1, q2))?;
        Ok(self)
    }

    /// Apply controlled-Rx gate.
    pub fn crx(&mut self, theta: f64, control: QubitId, target: QubitId) -> IrResult<&mut Self> {
        self.dag
            .apply(Instruction::two_qubit_gate(Gate::CRx(theta), control, target))?;
        Ok(self)
    }

    /// Apply controlled-Ry gate.
    pub fn cry(&mut self, theta: f64, control: QubitId, target: QubitId) -> IrResult<&mut Self> {
        self.dag
            .apply(Instruction::two_qubit_gate(Gate::CRy(theta), control, target))?;
        Ok(self)
    }

    /// Apply controlled-Rz gate.
    pub fn crz(&mut self, theta: f64, control: QubitId, target: QubitId) -> IrResult<&mut Self> {
        self.dag
            .apply(Instruction::two_qubit_gate(Gate::CRz(theta), control, target))?;
        Ok(self)
    }

    /// Apply controlled-phase gate.
    pub fn cp(&mut self, theta: f64, control: QubitId, target: QubitId) -> IrResult<&mut Self> {
        self.dag
            .apply(Instruction::two_qubit_gate(Gate::CP(theta), control, target))?;
        Ok(self)
    }

    // =========================================================================
    // Three-qubit gates
    // =========================================================================

    /// Apply Toffoli (CCX) gate.
    pub fn ccx(&mut self, c1: QubitId, c2: QubitId, target: QubitId) -> IrResult<&mut Self> {
        self.dag
            .apply(Instruction::gate(Gate::CCX, [c1, c2, target]))?;
        Ok(self)
    }

    /// Apply Fredkin (CSWAP) gate.
    pub fn cswap(&mut self, control: QubitId, t1: QubitId, t2: QubitId) -> IrResult<&mut Self> {
        self.dag
            .apply(Instruction::gate(Gate::CSwap, [control, t1, t2]))?;
        Ok(self)
    }

    // =========================================================================
    // Other operations
    // =========================================================================

    /// Apply an arbitrary gate instruction.
    pub fn gate(
        &mut self,
        gate: Gate,
        qubits: impl IntoIterator<Item = QubitId>,
    ) -> IrResult<&mut Self> {
        self.dag.apply(Instruction::gate(gate, qubits))?;
        Ok(self)
    }

    /// Measure a qubit to a classical bit.
    pub fn measure(&mut self, qubit: QubitId, clbit: ClbitId) -> IrResult<&mut Self> {
        self.dag.apply(Instruction::measure(qubit, clbit))?;
        Ok(self)
    }

    /// Measure all qubits to corresponding classical bits.
    ///
    /// Classical bits are added as needed so every qubit has one.
    pub fn measure_all(&mut self) -> IrResult<&mut Self> {
        while self.clbits.len() < self.qubits.len() {
            self.add_clbit();
        }

        let pairs: Vec<_> = self
            .qubits
            .iter()
            .map(|q| q.id)
            .zip(self.clbits.iter().map(|c| c.id))
            .collect();
        for (qubit, clbit) in pairs {
            self.dag.apply(Instruction::measure(qubit, clbit))?;
        }
        Ok(self)
    }

    /// Reset a qubit to |0⟩.
    pub fn reset(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.dag.apply(Instruction::reset(qubit))?;
        Ok(self)
    }

    /// Apply a barrier to specified qubits.
    pub fn barrier(&mut self, qubits: impl IntoIterator<Item = QubitId>) -> IrResult<&mut Self> {
        self.dag.apply(Instruction::barrier(qubits))?;
        Ok(self)
    }

    /// Apply a barrier to all qubits.
    pub fn barrier_all(&mut self) -> IrResult<&mut Self> {
        let qubits: Vec<_> = self.qubits.iter().map(|q| q.id).collect();
        self.dag.apply(Instruction::barrier(qubits))?;
        Ok(self)
    }

    // =========================================================================
    // Circuit algebra
    // =========================================================================

    /// Append all operations of another circuit to this one.
    ///
    /// The other circuit must only reference qubits and classical bits
    /// that exist in this circuit.
    pub fn extend(&mut self, other: &Circuit) -> IrResult<&mut Self> {
        let ops: Vec<_> = other
            .dag
            .topological_ops()
            .map(|(_, inst)| inst.clone())
            .collect();
        for inst in ops {
            self.dag.apply(inst)?;
        }
        Ok(self)
    }

    /// Build the inverse of this circuit.
    ///
    /// Operations are emitted in reverse topological order with each gate
    /// replaced by its inverse. Barriers are kept in place; measurements
    /// and resets are not invertible and produce [`IrError::NonInvertible`].
    pub fn inverse(&self) -> IrResult<Circuit> {
        let mut inverted = Circuit::new(format!("{}_dg", self.name));
        inverted.qubits = self.qubits.clone();
        inverted.clbits = self.clbits.clone();
        inverted.next_qubit_id = self.next_qubit_id;
        inverted.next_clbit_id = self.next_clbit_id;
        for q in &self.qubits {
            inverted.dag.add_qubit(q.id);
        }
        for c in &self.clbits {
            inverted.dag.add_clbit(c.id);
        }

        let ops: Vec<_> = self
            .dag
            .topological_ops()
            .map(|(_, inst)| inst.clone())
            .collect();
        for inst in ops.into_iter().rev() {
            match &inst.kind {
                InstructionKind::Gate(gate) => {
                    let inv = gate
                        .inverse()
                        .ok_or_else(|| IrError::NonInvertible(gate.name().to_string()))?;
                    inverted
                        .dag
                        .apply(Instruction::gate(inv, inst.qubits.clone()))?;
                }
                InstructionKind::Barrier => {
                    inverted.dag.apply(inst)?;
                }
                InstructionKind::Measure | InstructionKind::Reset => {
                    return Err(IrError::NonInvertible(inst.name().to_string()));
                }
            }
        }

        Ok(inverted)
    }

    /// Build a copy of this circuit with terminal measurement applied.
    ///
    /// The copy carries one fresh classical bit per qubit; all original
    /// operations are kept, followed by a full barrier and a measurement
    /// of every qubit into its classical bit. Intended for circuits built
    /// without classical bits, before handing them to a sampled backend.
    pub fn with_terminal_measurements(&self) -> IrResult<Circuit> {
        let mut measured = Circuit::new(self.name.clone());
        measured.qubits = self.qubits.clone();
        measured.next_qubit_id = self.next_qubit_id;
        for q in &self.qubits {
            measured.dag.add_qubit(q.id);
        }
        measured.add_creg("c", self.qubits.len() as u32);

        let ops: Vec<_> = self
            .dag
            .topological_ops()
            .map(|(_, inst)| inst.clone())
            .collect();
        for inst in ops {
            measured.dag.apply(inst)?;
        }

        measured.barrier_all()?;
        let pairs: Vec<_> = measured
            .qubits
            .iter()
            .map(|q| q.id)
            .zip(measured.clbits.iter().map(|c| c.id))
            .collect();
        for (qubit, clbit) in pairs {
            measured.dag.apply(Instruction::measure(qubit, clbit))?;
        }

        Ok(measured)
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Get the circuit name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the number of qubits.
    pub fn num_qubits(&self) -> usize {
        self.qubits.len()
    }

    /// Get the number of classical bits.
    pub fn num_clbits(&self) -> usize {
        self.clbits.len()
    }

    /// Get the circuit depth.
    pub fn depth(&self) -> usize {
        self.dag.depth()
    }

    /// Get the number of operations.
    pub fn num_ops(&self) -> usize {
        self.dag.num_ops()
    }

    /// Get a reference to the underlying DAG.
    pub fn dag(&self) -> &CircuitDag {
        &self.dag
    }

    /// Get the qubits in the circuit.
    pub fn qubits(&self) -> &[Qubit] {
        &self.qubits
    }

    /// Get the classical bits in the circuit.
    pub fn clbits(&self) -> &[Clbit] {
        &self.clbits
    }

    // =========================================================================
    // Pre-built circuits
    // =========================================================================

    /// Create a Bell state circuit with measurements.
    pub fn bell() -> IrResult<Self> {
        let mut circuit = Self::with_size("bell", 2, 2);
        circuit
            .h(QubitId(0))?
            .cx(QubitId(0), QubitId(1))?
            .measure(QubitId(0), ClbitId(0))?
            .measure(QubitId(1), ClbitId(1))?;
        Ok(circuit)
    }

    /// Create a GHZ state circuit with measurements.
    pub fn ghz(n: u32) -> IrResult<Self> {
        if n == 0 {
            return Ok(Self::new("ghz_0"));
        }

        let mut circuit = Self::with_size("ghz", n, n);
        circuit.h(QubitId(0))?;
        for i in 0..n - 1 {
            circuit.cx(QubitId(i), QubitId(i + 1))?;
        }
        for i in 0..n {
            circuit.measure(QubitId(i), ClbitId(i))?;
        }
        Ok(circuit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    #[test]
    fn test_new_circuit() {
        let circuit = Circuit::new("test");
        assert_eq!(circuit.name(), "test");
        assert_eq!(circuit.num_qubits(), 0);
        assert_eq!(circuit.num_clbits(), 0);
    }

    #[test]
    fn test_circuit_with_size() {
        let circuit = Circuit::with_size("test", 3, 2);
        assert_eq!(circuit.num_qubits(), 3);
        assert_eq!(circuit.num_clbits(), 2);
    }

    #[test]
    fn test_add_registers() {
        let mut circuit = Circuit::new("test");
        let qreg = circuit.add_qreg("q", 4);
        let creg = circuit.add_creg("c", 4);

        assert_eq!(qreg.len(), 4);
        assert_eq!(creg.len(), 4);
        assert_eq!(circuit.num_qubits(), 4);
        assert_eq!(circuit.qubits()[2].register.as_deref(), Some("q"));
    }

    #[test]
    fn test_bell_state() {
        let circuit = Circuit::bell().unwrap();
        assert_eq!(circuit.num_qubits(), 2);
        assert_eq!(circuit.num_clbits(), 2);
        assert_eq!(circuit.depth(), 3); // H, CX, parallel measures
    }

    #[test]
    fn test_fluent_api() {
        let mut circuit = Circuit::with_size("test", 2, 2);
        circuit
            .h(QubitId(0))
            .unwrap()
            .cx(QubitId(0), QubitId(1))
            .unwrap()
            .measure(QubitId(0), ClbitId(0))
            .unwrap()
            .measure(QubitId(1), ClbitId(1))
            .unwrap();

        assert_eq!(circuit.depth(), 3);
    }

    #[test]
    fn test_measure_all_adds_clbits() {
        let mut circuit = Circuit::with_size("test", 3, 0);
        circuit.h(QubitId(0)).unwrap();
        circuit.measure_all().unwrap();
        assert_eq!(circuit.num_clbits(), 3);
    }

    #[test]
    fn test_inverse_reverses_and_inverts() {
        let mut circuit = Circuit::with_size("test", 1, 0);
        circuit.s(QubitId(0)).unwrap().t(QubitId(0)).unwrap();

        let inv = circuit.inverse().unwrap();
        let names: Vec<_> = inv.dag().topological_ops().map(|(_, i)| i.name()).collect();
        assert_eq!(names, vec!["tdg", "sdg"]);
    }

    #[test]
    fn test_inverse_rejects_measurement() {
        let circuit = Circuit::bell().unwrap();
        assert!(matches!(
            circuit.inverse(),
            Err(IrError::NonInvertible(_))
        ));
    }

    #[test]
    fn test_extend_appends_ops() {
        let mut a = Circuit::with_size("a", 2, 0);
        a.h(QubitId(0)).unwrap();

        let mut b = Circuit::with_size("b", 2, 0);
        b.cx(QubitId(0), QubitId(1)).unwrap();

        a.extend(&b).unwrap();
        assert_eq!(a.num_ops(), 2);
    }

    #[test]
    fn test_with_terminal_measurements() {
        let mut circuit = Circuit::with_size("test", 2, 0);
        circuit.h(QubitId(0)).unwrap();
        circuit.rx(PI / 2.0, QubitId(1)).unwrap();

        let measured = circuit.with_terminal_measurements().unwrap();
        assert_eq!(measured.num_qubits(), 2);
        assert_eq!(measured.num_clbits(), 2);

        let names: Vec<_> = measured
            .dag()
            .topological_ops()
            .map(|(_, i)| i.name())
            .collect();
        // The single-qubit layer may come out in either order; the barrier
        // and both measures are ordered after it.
        assert_eq!(names.len(), 5);
        assert!(names[..2].contains(&"h") && names[..2].contains(&"rx"));
        assert_eq!(&names[2..], &["barrier", "measure", "measure"]);
        // Original circuit is untouched.
        assert_eq!(circuit.num_clbits(), 0);
    }
}
