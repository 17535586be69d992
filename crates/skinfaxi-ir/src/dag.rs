//! DAG-based circuit representation.
//!
//! Each wire (quantum or classical) starts at an input node; operation
//! nodes are chained along the wires they touch. Any topological order of
//! the operation nodes is a valid execution order for the circuit.

use petgraph::graph::{DiGraph, NodeIndex as PetNodeIndex};
use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};

use crate::error::{IrError, IrResult};
use crate::instruction::{Instruction, InstructionKind};
use crate::qubit::{ClbitId, QubitId};

/// Node index type for the circuit DAG.
pub type NodeIndex = PetNodeIndex<u32>;

/// Identifier for a wire in the DAG.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WireId {
    /// A quantum wire.
    Qubit(QubitId),
    /// A classical wire.
    Clbit(ClbitId),
}

impl From<QubitId> for WireId {
    fn from(q: QubitId) -> Self {
        WireId::Qubit(q)
    }
}

impl From<ClbitId> for WireId {
    fn from(c: ClbitId) -> Self {
        WireId::Clbit(c)
    }
}

/// A node in the circuit DAG.
#[derive(Debug, Clone, PartialEq)]
pub enum DagNode {
    /// Input node for a wire.
    In(WireId),
    /// Operation node containing an instruction.
    Op(Instruction),
}

impl DagNode {
    /// Check if this is an operation node.
    #[inline]
    pub fn is_op(&self) -> bool {
        matches!(self, DagNode::Op(_))
    }

    /// Get the instruction if this is an operation node.
    #[inline]
    pub fn instruction(&self) -> Option<&Instruction> {
        match self {
            DagNode::Op(inst) => Some(inst),
            DagNode::In(_) => None,
        }
    }
}

/// DAG-based circuit representation.
///
/// Nodes are wire inputs or operations; edges carry the wire they belong
/// to. A per-wire tail index gives O(1) appends in [`apply`](Self::apply).
#[derive(Debug, Clone, Default)]
pub struct CircuitDag {
    /// The underlying graph.
    graph: DiGraph<DagNode, WireId, u32>,
    /// Map from qubit to its input node.
    qubit_inputs: FxHashMap<QubitId, NodeIndex>,
    /// Map from classical bit to its input node.
    clbit_inputs: FxHashMap<ClbitId, NodeIndex>,
    /// Last node on each wire (the input node while the wire is empty).
    wire_tail: FxHashMap<WireId, NodeIndex>,
}

impl CircuitDag {
    /// Create a new empty circuit DAG.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a qubit to the circuit. Adding an existing qubit is a no-op.
    pub fn add_qubit(&mut self, qubit: QubitId) {
        if self.qubit_inputs.contains_key(&qubit) {
            return;
        }
        let wire = WireId::Qubit(qubit);
        let in_node = self.graph.add_node(DagNode::In(wire));
        self.qubit_inputs.insert(qubit, in_node);
        self.wire_tail.insert(wire, in_node);
    }

    /// Add a classical bit to the circuit. Adding an existing bit is a no-op.
    pub fn add_clbit(&mut self, clbit: ClbitId) {
        if self.clbit_inputs.contains_key(&clbit) {
            return;
        }
        let wire = WireId::Clbit(clbit);
        let in_node = self.graph.add_node(DagNode::In(wire));
        self.clbit_inputs.insert(clbit, in_node);
        self.wire_tail.insert(wire, in_node);
    }

    /// Append an instruction to the circuit.
    ///
    /// Validates gate arity, operand existence, and duplicate qubits
    /// before touching the graph.
    pub fn apply(&mut self, instruction: Instruction) -> IrResult<NodeIndex> {
        let gate_name = match &instruction.kind {
            InstructionKind::Gate(gate) => Some(gate.name().to_string()),
            _ => None,
        };

        if let InstructionKind::Gate(gate) = &instruction.kind {
            let expected = gate.num_qubits();
            let got = instruction.qubits.len() as u32;
            if expected != got {
                return Err(IrError::QubitCountMismatch {
                    gate_name: gate.name().to_string(),
                    expected,
                    got,
                });
            }
        }

        for &qubit in &instruction.qubits {
            if !self.qubit_inputs.contains_key(&qubit) {
                return Err(IrError::QubitNotFound {
                    qubit,
                    gate_name: gate_name.clone(),
                });
            }
        }
        for &clbit in &instruction.clbits {
            if !self.clbit_inputs.contains_key(&clbit) {
                return Err(IrError::ClbitNotFound {
                    clbit,
                    gate_name: gate_name.clone(),
                });
            }
        }

        let mut seen = FxHashSet::default();
        for &qubit in &instruction.qubits {
            if !seen.insert(qubit) {
                return Err(IrError::DuplicateQubit {
                    qubit,
                    gate_name: gate_name.clone(),
                });
            }
        }

        let wires: Vec<WireId> = instruction
            .qubits
            .iter()
            .map(|&q| WireId::Qubit(q))
            .chain(instruction.clbits.iter().map(|&c| WireId::Clbit(c)))
            .collect();

        let op_node = self.graph.add_node(DagNode::Op(instruction));
        for wire in wires {
            let tail = self.wire_tail[&wire];
            self.graph.add_edge(tail, op_node, wire);
            self.wire_tail.insert(wire, op_node);
        }

        Ok(op_node)
    }

    /// Iterate over operations in topological order.
    pub fn topological_ops(&self) -> impl Iterator<Item = (NodeIndex, &Instruction)> {
        let sorted: Vec<_> = petgraph::algo::toposort(&self.graph, None)
            .expect("circuit DAG is acyclic by construction")
            .into_iter()
            .filter_map(|idx| match &self.graph[idx] {
                DagNode::Op(inst) => Some((idx, inst)),
                DagNode::In(_) => None,
            })
            .collect();
        sorted.into_iter()
    }

    /// Get an instruction by node index.
    #[inline]
    pub fn get_instruction(&self, node: NodeIndex) -> Option<&Instruction> {
        self.graph.node_weight(node).and_then(|n| n.instruction())
    }

    /// Get the number of qubits.
    #[inline]
    pub fn num_qubits(&self) -> usize {
        self.qubit_inputs.len()
    }

    /// Get the number of classical bits.
    #[inline]
    pub fn num_clbits(&self) -> usize {
        self.clbit_inputs.len()
    }

    /// Get the number of operations.
    #[inline]
    pub fn num_ops(&self) -> usize {
        self.graph
            .node_count()
            .saturating_sub(self.qubit_inputs.len() + self.clbit_inputs.len())
    }

    /// Get the qubits of the circuit, in id order.
    pub fn qubits(&self) -> Vec<QubitId> {
        let mut ids: Vec<_> = self.qubit_inputs.keys().copied().collect();
        ids.sort();
        ids
    }

    /// Get the classical bits of the circuit, in id order.
    pub fn clbits(&self) -> Vec<ClbitId> {
        let mut ids: Vec<_> = self.clbit_inputs.keys().copied().collect();
        ids.sort();
        ids
    }

    /// Calculate the circuit depth (longest chain of operations).
    pub fn depth(&self) -> usize {
        let mut depths: FxHashMap<NodeIndex, usize> =
            FxHashMap::with_capacity_and_hasher(self.graph.node_count(), Default::default());
        let mut max_depth = 0usize;

        for node in petgraph::algo::toposort(&self.graph, None)
            .expect("circuit DAG is acyclic by construction")
        {
            let pred_max = self
                .graph
                .neighbors_directed(node, petgraph::Direction::Incoming)
                .map(|p| depths.get(&p).copied().unwrap_or(0))
                .max()
                .unwrap_or(0);

            let depth = if self.graph[node].is_op() {
                pred_max + 1
            } else {
                pred_max
            };
            max_depth = max_depth.max(depth);
            depths.insert(node, depth);
        }

        max_depth
    }
}
