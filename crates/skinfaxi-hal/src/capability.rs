//! Backend capability introspection.
//!
//! This module defines the types that describe what an execution target can
//! do: qubit count, supported gates, connectivity topology, and noise
//! averages. The dispatch layer uses them to enforce circuit/device
//! compatibility; the routing adapter uses the topology; the emulated
//! backend samples noise from the profile.
//!
//! All edges in [`Topology`] are bidirectional: if `(a, b)` is present,
//! both `a → b` and `b → a` are valid two-qubit interactions.

use serde::{Deserialize, Serialize};
use skinfaxi_ir::Circuit;

use crate::error::{HalError, HalResult};

/// Hardware capabilities of an execution target.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Capabilities {
    /// Name of the backend or device.
    pub name: String,
    /// Number of qubits available.
    pub num_qubits: u32,
    /// Supported gate set (OpenQASM 3 naming convention).
    pub gate_set: GateSet,
    /// Qubit connectivity topology. All edges are bidirectional.
    pub topology: Topology,
    /// Maximum number of shots per job.
    pub max_shots: u32,
    /// Whether this is a simulator (`true`) vs an emulation of real
    /// hardware noise characteristics (`false`).
    pub is_simulator: bool,
    /// Device-wide noise averages. `None` for ideal targets.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub noise_profile: Option<NoiseProfile>,
}

impl Capabilities {
    /// Create capabilities for an ideal simulator.
    pub fn simulator(num_qubits: u32) -> Self {
        Self {
            name: "simulator".into(),
            num_qubits,
            gate_set: GateSet::universal(),
            topology: Topology::full(num_qubits),
            max_shots: 1_000_000,
            is_simulator: true,
            noise_profile: None,
        }
    }

    /// Create capabilities for a noisy emulated device.
    pub fn emulated(
        name: impl Into<String>,
        topology: Topology,
        noise_profile: NoiseProfile,
    ) -> Self {
        Self {
            name: name.into(),
            num_qubits: topology.num_qubits,
            gate_set: GateSet::universal(),
            topology,
            max_shots: 100_000,
            is_simulator: false,
            noise_profile: Some(noise_profile),
        }
    }

    /// Check that a circuit fits on this target.
    ///
    /// A circuit with more qubits than the device is a fatal mismatch.
    pub fn check_fits(&self, circuit: &Circuit) -> HalResult<()> {
        if circuit.num_qubits() > self.num_qubits as usize {
            return Err(HalError::CircuitTooLarge {
                device: self.name.clone(),
                device_qubits: self.num_qubits,
                circuit_qubits: circuit.num_qubits() as u32,
            });
        }
        Ok(())
    }

    /// Boolean form of [`check_fits`](Self::check_fits).
    pub fn fits(&self, circuit: &Circuit) -> bool {
        self.check_fits(circuit).is_ok()
    }
}

/// Supported gate operations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GateSet {
    /// List of gate names in the set.
    gates: Vec<String>,
}

impl GateSet {
    /// Create a new gate set.
    pub fn new(gates: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            gates: gates.into_iter().map(Into::into).collect(),
        }
    }

    /// Check if a gate is in the set.
    pub fn contains(&self, gate: &str) -> bool {
        self.gates.iter().any(|g| g == gate)
    }

    /// Get the gate names.
    pub fn gates(&self) -> &[String] {
        &self.gates
    }

    /// Every gate the IR can express, plus measure/reset/barrier.
    pub fn universal() -> Self {
        Self::new([
            "id", "x", "y", "z", "h", "s", "sdg", "t", "tdg", "sx", "sxdg", "rx", "ry", "rz", "p",
            "u", "cx", "cy", "cz", "ch", "swap", "iswap", "crx", "cry", "crz", "cp", "ccx",
            "cswap", "measure", "reset", "barrier",
        ])
    }
}

/// Qubit connectivity topology.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Topology {
    /// Number of physical qubits.
    pub num_qubits: u32,
    /// Connected qubit pairs (bidirectional, deduplicated).
    edges: Vec<(u32, u32)>,
}

impl Topology {
    /// Create a topology from an explicit edge list.
    ///
    /// Duplicate edges (including reversed pairs) are dropped.
    pub fn from_edges(num_qubits: u32, edges: impl IntoIterator<Item = (u32, u32)>) -> Self {
        let mut topology = Self {
            num_qubits,
            edges: vec![],
        };
        for (a, b) in edges {
            topology.add_edge(a, b);
        }
        topology
    }

    /// Create a fully connected topology.
    pub fn full(n: u32) -> Self {
        let mut topology = Self {
            num_qubits: n,
            edges: vec![],
        };
        for i in 0..n {
            for j in (i + 1)..n {
                topology.add_edge(i, j);
            }
        }
        topology
    }

    /// Create a linear chain topology (0-1-2-...).
    pub fn linear(n: u32) -> Self {
        let mut topology = Self {
            num_qubits: n,
            edges: vec![],
        };
        for i in 0..n.saturating_sub(1) {
            topology.add_edge(i, i + 1);
        }
        topology
    }

    /// Create a rows × cols grid topology (row-major indexing).
    pub fn grid(rows: u32, cols: u32) -> Self {
        let mut topology = Self {
            num_qubits: rows * cols,
            edges: vec![],
        };
        let index = |r: u32, c: u32| r * cols + c;
        for r in 0..rows {
            for c in 0..cols {
                if c + 1 < cols {
                    topology.add_edge(index(r, c), index(r, c + 1));
                }
                if r + 1 < rows {
                    topology.add_edge(index(r, c), index(r + 1, c));
                }
            }
        }
        topology
    }

    fn add_edge(&mut self, a: u32, b: u32) {
        if self
            .edges
            .iter()
            .any(|&(x, y)| (x == a && y == b) || (x == b && y == a))
        {
            return;
        }
        self.edges.push((a, b));
    }

    /// Check whether two qubits are directly connected.
    pub fn contains_edge(&self, a: u32, b: u32) -> bool {
        self.edges
            .iter()
            .any(|&(x, y)| (x == a && y == b) || (x == b && y == a))
    }

    /// Get the coupling edges.
    pub fn edges(&self) -> &[(u32, u32)] {
        &self.edges
    }

    /// Get the neighbors of a qubit.
    pub fn neighbors(&self, qubit: u32) -> Vec<u32> {
        let mut out = vec![];
        for &(a, b) in &self.edges {
            if a == qubit {
                out.push(b);
            } else if b == qubit {
                out.push(a);
            }
        }
        out
    }
}

/// Device-wide noise averages.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NoiseProfile {
    /// Average single-qubit gate error probability.
    pub single_qubit_error: f64,
    /// Average two-qubit gate error probability.
    pub two_qubit_error: f64,
    /// Average readout misclassification probability.
    pub readout_error: f64,
}

impl NoiseProfile {
    /// Create a profile with the given error rates.
    pub fn new(single_qubit_error: f64, two_qubit_error: f64, readout_error: f64) -> Self {
        Self {
            single_qubit_error,
            two_qubit_error,
            readout_error,
        }
    }
}
