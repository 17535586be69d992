//! Skinfaxi Circuit Intermediate Representation
//!
//! This crate provides the core data structures for representing quantum
//! circuits in Skinfaxi. Everything else in the workspace — the benchmark
//! generators, the execution backends, the routing adapter — speaks this IR.
//!
//! # Overview
//!
//! The circuit IR uses a DAG (Directed Acyclic Graph) representation
//! internally, which makes dependency-respecting traversal and rebuilding
//! cheap. The high-level [`Circuit`] API provides a convenient builder
//! pattern for constructing circuits.
//!
//! # Core Components
//!
//! - **Qubits and Classical Bits**: [`QubitId`], [`ClbitId`] for addressing
//!   quantum and classical registers
//! - **Gates**: [`Gate`] with concrete `f64` angles
//! - **Instructions**: [`Instruction`] combining gates with their operands
//! - **DAG**: [`CircuitDag`] for the internal graph representation
//! - **Circuit**: [`Circuit`] high-level builder API
//! - **Skeletons**: [`two_qubit_skeleton`] / [`truncated_skeleton`] for
//!   interaction-structure extraction
//!
//! # Example: Building a Bell State
//!
//! ```rust
//! use skinfaxi_ir::{Circuit, QubitId};
//!
//! // Create a new circuit with 2 qubits and 2 classical bits
//! let mut circuit = Circuit::with_size("bell_state", 2, 2);
//!
//! // Build the Bell state: |00⟩ → (|00⟩ + |11⟩)/√2
//! circuit.h(QubitId(0)).unwrap();
//! circuit.cx(QubitId(0), QubitId(1)).unwrap();
//!
//! // Add measurement
//! circuit.measure_all().unwrap();
//!
//! assert_eq!(circuit.num_qubits(), 2);
//! assert!(circuit.depth() >= 2);
//! ```

pub mod circuit;
pub mod dag;
pub mod error;
pub mod gate;
pub mod instruction;
pub mod qubit;
pub mod skeleton;

pub use circuit::Circuit;
pub use dag::{CircuitDag, DagNode, NodeIndex, WireId};
pub use error::{IrError, IrResult};
pub use gate::Gate;
pub use instruction::{Instruction, InstructionKind};
pub use qubit::{Clbit, ClbitId, Qubit, QubitId};
pub use skeleton::{truncated_skeleton, two_qubit_skeleton};
