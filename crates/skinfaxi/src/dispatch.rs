//! Backend dispatch and result normalization.
//!
//! [`evaluate`] is the single entry point: pick an execution path, enforce
//! circuit/device compatibility, instrument measurement where missing, run,
//! and fold whatever the backend reports — exact amplitudes, shot counts,
//! or raw memory — into one output representation.
//!
//! The dispatch is a plain conditional cascade. There is no retry, backoff,
//! or partial-failure handling: every mismatch is a typed error.

use ndarray::Array1;
use tracing::{debug, instrument};

use skinfaxi_hal::{Backend, HalError, catalog};
use skinfaxi_ir::Circuit;
use skinfaxi_route::route;
use skinfaxi_sim::{EmulatedBackend, SamplingBackend, ideal_probabilities};

use crate::error::{DispatchError, DispatchResult};
use crate::target::{ExecutionTarget, RunOptions, default_shots};

/// Normalized output of a dispatch run.
#[derive(Debug, Clone)]
pub enum EvalOutput {
    /// Probability vector over basis states, indexed by the integer
    /// encoding of the readout register. Sums to 1.
    Probabilities(Array1<f64>),
    /// Raw per-shot bitstrings, one entry per shot.
    Memory(Vec<String>),
}

impl EvalOutput {
    /// Extract the probability vector, if this is one.
    pub fn into_probabilities(self) -> Option<Array1<f64>> {
        match self {
            EvalOutput::Probabilities(p) => Some(p),
            EvalOutput::Memory(_) => None,
        }
    }

    /// Extract the per-shot memory, if this is one.
    pub fn into_memory(self) -> Option<Vec<String>> {
        match self {
            EvalOutput::Memory(m) => Some(m),
            EvalOutput::Probabilities(_) => None,
        }
    }
}

/// Execute a circuit on the selected target and normalize the result.
///
/// - `Statevector`: evolve once, return the exact distribution. The
///   `memory` option does not apply here and is ignored.
/// - `NoiselessSampling`: auto-apply `measure_all` if the circuit has no
///   classical bits, then sample on the noiseless backend.
/// - `Emulated`: resolve the device in the catalog, optionally route onto
///   its topology, reject circuits larger than the device, instrument
///   measurement where missing, then run the noisy emulation.
///
/// Sampled paths return `Memory` when `options.memory` is set (exactly
/// `shots` entries) and a normalized `Probabilities` vector otherwise.
#[instrument(skip(circuit, options), fields(circuit = circuit.name()))]
pub async fn evaluate(
    circuit: &Circuit,
    target: &ExecutionTarget,
    options: &RunOptions,
) -> DispatchResult<EvalOutput> {
    match target {
        ExecutionTarget::Statevector => {
            debug!("dispatching to ideal statevector");
            Ok(EvalOutput::Probabilities(ideal_probabilities(circuit)?))
        }

        ExecutionTarget::NoiselessSampling => {
            debug!("dispatching to noiseless sampling");
            let prepared = if circuit.num_clbits() == 0 {
                let mut measured = circuit.clone();
                measured.measure_all()?;
                measured
            } else {
                circuit.clone()
            };

            let mut backend = SamplingBackend::new().with_memory(options.memory);
            if let Some(seed) = options.seed {
                backend = backend.with_seed(seed);
            }
            run_sampled(&backend, &prepared, options).await
        }

        ExecutionTarget::Emulated { device, routed } => {
            debug!(device, routed, "dispatching to emulated device");
            let capabilities = catalog()
                .get(device)
                .ok_or_else(|| HalError::UnknownDevice(device.clone()))?;

            // Instrument before routing so the readout register keeps its
            // logical order; the router carries measures through the map.
            let mut prepared = if circuit.num_clbits() == 0 {
                circuit.with_terminal_measurements()?
            } else {
                circuit.clone()
            };

            if *routed {
                let routed_circuit = route(&prepared, &capabilities.topology)?;
                debug!(
                    swaps = routed_circuit.swaps_inserted,
                    "routing adapter applied"
                );
                prepared = routed_circuit.circuit;
            }

            capabilities.check_fits(&prepared)?;

            let mut backend =
                EmulatedBackend::new(capabilities.clone()).with_memory(options.memory);
            if let Some(seed) = options.seed {
                backend = backend.with_seed(seed);
            }
            run_sampled(&backend, &prepared, options).await
        }
    }
}

/// Submit, wait, and normalize on a sampled backend.
async fn run_sampled(
    backend: &impl Backend,
    circuit: &Circuit,
    options: &RunOptions,
) -> DispatchResult<EvalOutput> {
    let shots = options.shots.unwrap_or_else(|| {
        default_shots(circuit.num_qubits()).min(backend.capabilities().max_shots)
    });

    let job_id = backend.submit(circuit, shots).await?;
    let result = backend.wait(&job_id).await?;

    if options.memory {
        let memory = result.memory.ok_or_else(|| {
            HalError::Unsupported(format!("backend '{}' did not record memory", backend.name()))
        })?;
        if memory.len() != shots as usize {
            return Err(DispatchError::Hal(HalError::ShotCountMismatch {
                expected: u64::from(shots),
                got: memory.len() as u64,
            }));
        }
        return Ok(EvalOutput::Memory(memory));
    }

    let num_bits = if circuit.num_clbits() > 0 {
        circuit.num_clbits()
    } else {
        circuit.num_qubits()
    };
    let probabilities = result.probabilities(num_bits as u32)?;
    Ok(EvalOutput::Probabilities(probabilities))
}
