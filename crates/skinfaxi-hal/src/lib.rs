//! Skinfaxi Backend Abstraction Layer
//!
//! This crate provides a unified interface over circuit execution targets:
//! the ideal and sampling simulators and the noisy emulated devices in
//! `skinfaxi-sim` all implement the same [`Backend`] lifecycle.
//!
//! # Overview
//!
//! - A common [`Backend`] trait for job submission and management
//! - [`Capabilities`] describing qubit counts, topologies, and noise
//! - A process-global [`device catalog`](device::catalog) of emulated
//!   devices (the known-device name table)
//! - Unified result handling via [`ExecutionResult`], [`Counts`], and
//!   [`counts_to_vector`] probability-vector normalization
//!
//! # Example: Compatibility Enforcement
//!
//! ```rust
//! use skinfaxi_hal::device;
//! use skinfaxi_ir::Circuit;
//!
//! let vigo = device::catalog().get("vigo").unwrap();
//! let too_big = Circuit::with_size("wide", 9, 0);
//!
//! // A 9-qubit circuit can never run on a 5-qubit device.
//! assert!(vigo.check_fits(&too_big).is_err());
//! ```

pub mod backend;
pub mod capability;
pub mod device;
pub mod error;
pub mod job;
pub mod result;

pub use backend::{Backend, ValidationResult};
pub use capability::{Capabilities, GateSet, NoiseProfile, Topology};
pub use device::{DeviceCatalog, catalog};
pub use error::{HalError, HalResult};
pub use job::{Job, JobId, JobStatus};
pub use result::{Counts, ExecutionResult, counts_to_vector};
