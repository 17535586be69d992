//! Skinfaxi — benchmark-circuit experimentation harness.
//!
//! Skinfaxi generates parameterized benchmark circuits, dispatches them to
//! simulators or noisy device emulations, and normalizes every result
//! format into probability vectors. This crate is the front door: it holds
//! the dispatch cascade, run options, and the append-only result store,
//! and re-exports the workspace's building blocks.
//!
//! # The three execution paths
//!
//! | Target | Output |
//! |--------|--------|
//! | `statevector` | exact distribution, no sampling |
//! | `noiseless` | shot-sampled counts from an ideal simulator |
//! | a device name (e.g. `vigo`), optionally `routed:`-prefixed | shot-sampled counts under the device's noise model |
//!
//! # Example
//!
//! ```ignore
//! use skinfaxi::{CircuitKind, EvalOutput, ExecutionTarget, RunOptions, evaluate, generate};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let circuit = generate(CircuitKind::Qft, 4, 0, 7)?;
//!
//! let target: ExecutionTarget = "routed:vigo".parse().unwrap();
//! let options = RunOptions::new().with_shots(4096).with_seed(7);
//!
//! match evaluate(&circuit, &target, &options).await? {
//!     EvalOutput::Probabilities(p) => assert!((p.sum() - 1.0).abs() < 1e-9),
//!     EvalOutput::Memory(_) => unreachable!("memory was not requested"),
//! }
//! # Ok(())
//! # }
//! ```

pub mod cache;
pub mod dispatch;
pub mod error;
pub mod target;

pub use cache::{ResultStore, StoreError};
pub use dispatch::{EvalOutput, evaluate};
pub use error::{DispatchError, DispatchResult};
pub use target::{ExecutionTarget, RunOptions, default_shots};

// The workspace building blocks, re-exported for one-import consumers.
pub use skinfaxi_gen::{CircuitKind, GenError, generate};
pub use skinfaxi_hal::{
    Backend, Capabilities, Counts, ExecutionResult, HalError, NoiseProfile, Topology, catalog,
    counts_to_vector,
};
pub use skinfaxi_ir::{Circuit, ClbitId, Gate, QubitId};
pub use skinfaxi_route::{RoutedCircuit, route};
pub use skinfaxi_sim::{EmulatedBackend, SamplingBackend, ideal_probabilities};
