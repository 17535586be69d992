//! Skinfaxi simulator backends.
//!
//! One statevector engine, three execution modes:
//!
//! - [`ideal_probabilities`] evolves a circuit once and returns the exact
//!   outcome distribution — no sampling noise at all.
//! - [`SamplingBackend`] is noiseless but shot-sampled: the statevector is
//!   evolved once and outcomes are drawn from it.
//! - [`EmulatedBackend`] replays a device's noise averages as stochastic
//!   trajectories: a depolarizing kick after every gate, readout flips at
//!   sampling time, one fresh simulation per shot.
//!
//! The two sampled modes implement the full [`Backend`](skinfaxi_hal::Backend)
//! job lifecycle with an in-memory job table and can record raw per-shot
//! memory in addition to aggregated counts.
//!
//! # Example
//!
//! ```ignore
//! use skinfaxi_hal::Backend;
//! use skinfaxi_ir::Circuit;
//! use skinfaxi_sim::SamplingBackend;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let backend = SamplingBackend::new();
//! let circuit = Circuit::bell()?;
//! let job_id = backend.submit(&circuit, 1024).await?;
//! let result = backend.wait(&job_id).await?;
//! assert_eq!(result.counts.total(), 1024);
//! # Ok(())
//! # }
//! ```

pub mod backend;
pub mod noise;
pub mod statevector;

pub use backend::{EmulatedBackend, SamplingBackend, ideal_probabilities};
pub use statevector::Statevector;
