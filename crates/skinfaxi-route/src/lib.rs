//! Skinfaxi placement and routing adapter.
//!
//! Execution targets that emulate hardware have restricted connectivity;
//! circuits built against abstract qubits usually do not respect it. This
//! crate maps a circuit onto a device [`Topology`](skinfaxi_hal::Topology):
//! trivial initial placement, then greedy shortest-path SWAP insertion,
//! rebuilding the circuit on fresh registers sized to the device.
//!
//! The interface is deliberately narrow — one [`route`] call in, one
//! [`RoutedCircuit`] out — so callers treat routing as a black-box
//! transform between circuit representations.
//!
//! # Example
//!
//! ```rust
//! use skinfaxi_hal::Topology;
//! use skinfaxi_ir::{Circuit, QubitId};
//! use skinfaxi_route::route;
//!
//! let mut circuit = Circuit::with_size("far", 3, 0);
//! circuit.cx(QubitId(0), QubitId(2)).unwrap();
//!
//! let routed = route(&circuit, &Topology::linear(3)).unwrap();
//! assert!(routed.swaps_inserted > 0);
//! ```

pub mod coupling;
pub mod error;
pub mod layout;
pub mod router;

pub use coupling::CouplingMap;
pub use error::{RouteError, RouteResult};
pub use layout::Layout;
pub use router::{RoutedCircuit, route};
