//! Simulator backend implementations.
//!
//! Three execution modes share the statevector engine:
//!
//! - [`ideal_probabilities`] — evolve once, return the exact distribution
//! - [`SamplingBackend`] — noiseless, but outcomes are shot-sampled
//! - [`EmulatedBackend`] — per-shot noisy trajectories from a device's
//!   [`NoiseProfile`]

use std::sync::{Arc, Mutex};
use std::time::Instant;

use async_trait::async_trait;
use ndarray::Array1;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use rustc_hash::FxHashMap;
use tracing::{debug, instrument};
use uuid::Uuid;

use skinfaxi_hal::{
    Backend, Capabilities, Counts, ExecutionResult, HalError, HalResult, Job, JobId, JobStatus,
    NoiseProfile, ValidationResult, catalog,
};
use skinfaxi_ir::{Circuit, Instruction, InstructionKind};

use crate::noise;
use crate::statevector::Statevector;

/// Hard ceiling for exact statevector evolution (1 GiB of amplitudes).
const MAX_STATEVECTOR_QUBITS: usize = 26;

/// Evolve a circuit once and return its exact outcome distribution.
///
/// Measurements and barriers are ignored; the returned vector has
/// `2^num_qubits` entries and sums to 1.
pub fn ideal_probabilities(circuit: &Circuit) -> HalResult<Array1<f64>> {
    if circuit.num_qubits() > MAX_STATEVECTOR_QUBITS {
        return Err(HalError::CircuitTooLarge {
            device: "statevector".into(),
            device_qubits: MAX_STATEVECTOR_QUBITS as u32,
            circuit_qubits: circuit.num_qubits() as u32,
        });
    }

    let mut sv = Statevector::new(circuit.num_qubits());
    for (_, inst) in circuit.dag().topological_ops() {
        sv.apply(inst);
    }
    Ok(sv.probabilities())
}

/// Qubit → classical-bit pairs from the circuit's measure instructions.
///
/// A circuit without classical bits falls back to the identity map over
/// all qubits. A circuit that has classical bits but no measurements
/// keeps an empty map: its register reads all zeros.
fn measure_map(circuit: &Circuit) -> Vec<(usize, usize)> {
    let mut map = vec![];
    for (_, inst) in circuit.dag().topological_ops() {
        if inst.is_measure() {
            for (q, c) in inst.qubits.iter().zip(&inst.clbits) {
                map.push((q.0 as usize, c.0 as usize));
            }
        }
    }
    if map.is_empty() && circuit.num_clbits() == 0 {
        (0..circuit.num_qubits()).map(|q| (q, q)).collect()
    } else {
        map
    }
}

/// Width of the readout register.
fn readout_bits(circuit: &Circuit) -> usize {
    if circuit.num_clbits() > 0 {
        circuit.num_clbits()
    } else {
        circuit.num_qubits()
    }
}

/// Render a sampled outcome over the classical register, highest bit first.
fn outcome_bitstring(outcome: usize, map: &[(usize, usize)], num_bits: usize) -> String {
    let mut bits = vec![b'0'; num_bits];
    for &(q, c) in map {
        bits[num_bits - 1 - c] = if outcome >> q & 1 == 1 { b'1' } else { b'0' };
    }
    String::from_utf8(bits).expect("bitstring is ascii")
}

fn seeded_rng(seed: Option<u64>) -> SmallRng {
    match seed {
        Some(s) => SmallRng::seed_from_u64(s),
        None => SmallRng::from_entropy(),
    }
}

fn check_shots(shots: u32, capabilities: &Capabilities) -> HalResult<()> {
    if shots == 0 {
        return Err(HalError::InvalidShots("shot count must be positive".into()));
    }
    if shots > capabilities.max_shots {
        return Err(HalError::InvalidShots(format!(
            "{shots} exceeds the backend maximum of {}",
            capabilities.max_shots
        )));
    }
    Ok(())
}

/// Job data for the in-memory job table.
struct SimJob {
    job: Job,
    result: Option<ExecutionResult>,
}

type JobTable = Arc<Mutex<FxHashMap<String, SimJob>>>;

fn store_completed(jobs: &JobTable, job_id: &JobId, backend: &str, shots: u32, result: ExecutionResult) {
    let job = Job::new(job_id.clone(), shots)
        .with_backend(backend)
        .with_status(JobStatus::Completed);
    let mut jobs = jobs.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
    jobs.insert(
        job_id.0.clone(),
        SimJob {
            job,
            result: Some(result),
        },
    );
}

fn lookup_status(jobs: &JobTable, job_id: &JobId) -> HalResult<JobStatus> {
    let jobs = jobs.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
    jobs.get(&job_id.0)
        .map(|j| j.job.status.clone())
        .ok_or_else(|| HalError::JobNotFound(job_id.0.clone()))
}

fn lookup_result(jobs: &JobTable, job_id: &JobId) -> HalResult<ExecutionResult> {
    let jobs = jobs.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
    jobs.get(&job_id.0)
        .and_then(|j| j.result.clone())
        .ok_or_else(|| HalError::JobNotFound(job_id.0.clone()))
}

fn cancel_job(jobs: &JobTable, job_id: &JobId) -> HalResult<()> {
    let mut jobs = jobs.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
    if let Some(sim_job) = jobs.get_mut(&job_id.0) {
        if !sim_job.job.status.is_terminal() {
            sim_job.job = sim_job.job.clone().with_status(JobStatus::Cancelled);
        }
        Ok(())
    } else {
        Err(HalError::JobNotFound(job_id.0.clone()))
    }
}

/// Noiseless sampling backend.
///
/// The circuit is deterministic, so the statevector is evolved once and
/// `shots` outcomes are sampled from it.
pub struct SamplingBackend {
    capabilities: Capabilities,
    jobs: JobTable,
    memory: bool,
    seed: Option<u64>,
}

impl SamplingBackend {
    /// Create a sampling backend with the default 20-qubit limit.
    pub fn new() -> Self {
        Self::with_max_qubits(20)
    }

    /// Create a sampling backend with a custom qubit limit.
    pub fn with_max_qubits(max_qubits: u32) -> Self {
        let mut capabilities = Capabilities::simulator(max_qubits);
        capabilities.name = "sampling".into();
        Self {
            capabilities,
            jobs: Arc::new(Mutex::new(FxHashMap::default())),
            memory: false,
            seed: None,
        }
    }

    /// Record raw per-shot bitstrings alongside the counts.
    #[must_use]
    pub fn with_memory(mut self, memory: bool) -> Self {
        self.memory = memory;
        self
    }

    /// Use a fixed sampling seed for reproducible results.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    #[instrument(skip(self, circuit))]
    fn run(&self, circuit: &Circuit, shots: u32) -> ExecutionResult {
        let start = Instant::now();
        debug!(
            num_qubits = circuit.num_qubits(),
            shots, "sampling circuit"
        );

        let mut sv = Statevector::new(circuit.num_qubits());
        for (_, inst) in circuit.dag().topological_ops() {
            sv.apply(inst);
        }

        let map = measure_map(circuit);
        let num_bits = readout_bits(circuit);
        let mut rng = seeded_rng(self.seed);

        let mut counts = Counts::new();
        let mut memory = self.memory.then(|| Vec::with_capacity(shots as usize));
        for _ in 0..shots {
            let outcome = sv.sample(&mut rng);
            let bits = outcome_bitstring(outcome, &map, num_bits);
            if let Some(memory) = &mut memory {
                memory.push(bits.clone());
            }
            counts.insert(bits, 1);
        }

        let mut result = ExecutionResult::new(counts, shots)
            .with_execution_time(start.elapsed().as_millis() as u64);
        if let Some(memory) = memory {
            result = result.with_memory(memory);
        }
        result
    }
}

impl Default for SamplingBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Backend for SamplingBackend {
    fn name(&self) -> &str {
        &self.capabilities.name
    }

    fn capabilities(&self) -> &Capabilities {
        &self.capabilities
    }

    async fn validate(&self, circuit: &Circuit) -> HalResult<ValidationResult> {
        match self.capabilities.check_fits(circuit) {
            Ok(()) => Ok(ValidationResult::Valid),
            Err(err) => Ok(ValidationResult::Invalid {
                reasons: vec![err.to_string()],
            }),
        }
    }

    #[instrument(skip(self, circuit))]
    async fn submit(&self, circuit: &Circuit, shots: u32) -> HalResult<JobId> {
        self.capabilities.check_fits(circuit)?;
        check_shots(shots, &self.capabilities)?;

        let job_id = JobId::new(Uuid::new_v4().to_string());
        let result = self.run(circuit, shots);
        store_completed(&self.jobs, &job_id, self.name(), shots, result);
        debug!(%job_id, "sampling job completed");
        Ok(job_id)
    }

    async fn status(&self, job_id: &JobId) -> HalResult<JobStatus> {
        lookup_status(&self.jobs, job_id)
    }

    async fn result(&self, job_id: &JobId) -> HalResult<ExecutionResult> {
        lookup_result(&self.jobs, job_id)
    }

    async fn cancel(&self, job_id: &JobId) -> HalResult<()> {
        cancel_job(&self.jobs, job_id)
    }
}

/// Noisy emulation of a hardware device.
///
/// Each shot is an independent noise trajectory: after every gate each
/// operand takes a depolarizing kick at the device's error rate, and
/// readout bits flip at the readout error rate.
pub struct EmulatedBackend {
    capabilities: Capabilities,
    jobs: JobTable,
    memory: bool,
    seed: Option<u64>,
}

impl EmulatedBackend {
    /// Create an emulated backend from a device capability description.
    pub fn new(device: Capabilities) -> Self {
        Self {
            capabilities: device,
            jobs: Arc::new(Mutex::new(FxHashMap::default())),
            memory: false,
            seed: None,
        }
    }

    /// Create an emulated backend from the global device catalog.
    pub fn from_catalog(name: &str) -> HalResult<Self> {
        let device = catalog()
            .get(name)
            .cloned()
            .ok_or_else(|| HalError::UnknownDevice(name.to_string()))?;
        Ok(Self::new(device))
    }

    /// Record raw per-shot bitstrings alongside the counts.
    #[must_use]
    pub fn with_memory(mut self, memory: bool) -> Self {
        self.memory = memory;
        self
    }

    /// Use a fixed noise/sampling seed for reproducible results.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    #[instrument(skip(self, circuit))]
    fn run(&self, circuit: &Circuit, shots: u32) -> ExecutionResult {
        let start = Instant::now();
        let num_qubits = circuit.num_qubits();
        let profile = self
            .capabilities
            .noise_profile
            .unwrap_or(NoiseProfile::new(0.0, 0.0, 0.0));
        debug!(
            device = %self.capabilities.name,
            num_qubits, shots, "emulating circuit"
        );

        let instructions: Vec<Instruction> = circuit
            .dag()
            .topological_ops()
            .map(|(_, inst)| inst.clone())
            .collect();
        let map = measure_map(circuit);
        let num_bits = readout_bits(circuit);
        let mut rng = seeded_rng(self.seed);

        let mut counts = Counts::new();
        let mut memory = self.memory.then(|| Vec::with_capacity(shots as usize));
        for _ in 0..shots {
            let mut sv = Statevector::new(num_qubits);
            for inst in &instructions {
                match &inst.kind {
                    InstructionKind::Gate(gate) => {
                        let qubits: Vec<usize> =
                            inst.qubits.iter().map(|q| q.0 as usize).collect();
                        sv.apply_gate(gate, &qubits);
                        noise::gate_noise(&mut sv, &qubits, &profile, &mut rng);
                    }
                    InstructionKind::Reset => sv.apply(inst),
                    InstructionKind::Measure | InstructionKind::Barrier => {}
                }
            }

            let outcome = sv.sample(&mut rng);
            let noisy = noise::readout_flips(outcome, num_qubits, profile.readout_error, &mut rng);
            let bits = outcome_bitstring(noisy, &map, num_bits);
            if let Some(memory) = &mut memory {
                memory.push(bits.clone());
            }
            counts.insert(bits, 1);
        }

        let mut result = ExecutionResult::new(counts, shots)
            .with_execution_time(start.elapsed().as_millis() as u64);
        if let Some(memory) = memory {
            result = result.with_memory(memory);
        }
        result
    }
}

#[async_trait]
impl Backend for EmulatedBackend {
    fn name(&self) -> &str {
        &self.capabilities.name
    }

    fn capabilities(&self) -> &Capabilities {
        &self.capabilities
    }

    async fn validate(&self, circuit: &Circuit) -> HalResult<ValidationResult> {
        if let Err(err) = self.capabilities.check_fits(circuit) {
            return Ok(ValidationResult::Invalid {
                reasons: vec![err.to_string()],
            });
        }

        let disconnected = circuit
            .dag()
            .topological_ops()
            .filter(|(_, inst)| inst.is_two_qubit_gate())
            .filter(|(_, inst)| {
                let q0 = inst.qubits[0].0;
                let q1 = inst.qubits[1].0;
                !self.capabilities.topology.contains_edge(q0, q1)
            })
            .count();

        if disconnected > 0 {
            return Ok(ValidationResult::RequiresRouting {
                details: format!("{disconnected} two-qubit gates act on non-adjacent pairs"),
            });
        }
        Ok(ValidationResult::Valid)
    }

    #[instrument(skip(self, circuit))]
    async fn submit(&self, circuit: &Circuit, shots: u32) -> HalResult<JobId> {
        self.capabilities.check_fits(circuit)?;
        check_shots(shots, &self.capabilities)?;

        let job_id = JobId::new(Uuid::new_v4().to_string());
        let result = self.run(circuit, shots);
        store_completed(&self.jobs, &job_id, self.name(), shots, result);
        debug!(%job_id, "emulation job completed");
        Ok(job_id)
    }

    async fn status(&self, job_id: &JobId) -> HalResult<JobStatus> {
        lookup_status(&self.jobs, job_id)
    }

    async fn result(&self, job_id: &JobId) -> HalResult<ExecutionResult> {
        lookup_result(&self.jobs, job_id)
    }

    async fn cancel(&self, job_id: &JobId) -> HalResult<()> {
        cancel_job(&self.jobs, job_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use skinfaxi_ir::QubitId;

    #[test]
    fn test_ideal_probabilities_bell() {
        let mut circuit = Circuit::with_size("bell", 2, 0);
        circuit.h(QubitId(0)).unwrap();
        circuit.cx(QubitId(0), QubitId(1)).unwrap();

        let probs = ideal_probabilities(&circuit).unwrap();
        assert_eq!(probs.len(), 4);
        assert!((probs[0] - 0.5).abs() < 1e-10);
        assert!((probs[3] - 0.5).abs() < 1e-10);
        assert!((probs.sum() - 1.0).abs() < 1e-10);
    }

    #[tokio::test]
    async fn test_sampling_bell_state() {
        let backend = SamplingBackend::new().with_seed(42);

        let circuit = Circuit::bell().unwrap();
        let job_id = backend.submit(&circuit, 1000).await.unwrap();

        let status = backend.status(&job_id).await.unwrap();
        assert!(status.is_success());

        let result = backend.result(&job_id).await.unwrap();
        assert_eq!(result.shots, 1000);

        // Bell state should produce only 00 and 11.
        let counts = &result.counts;
        assert_eq!(counts.get("00") + counts.get("11"), 1000);
        assert_eq!(counts.get("01") + counts.get("10"), 0);
    }

    #[tokio::test]
    async fn test_sampling_ghz_state() {
        let backend = SamplingBackend::new().with_seed(1);

        let circuit = Circuit::ghz(3).unwrap();
        let result = backend
            .wait(&backend.submit(&circuit, 500).await.unwrap())
            .await
            .unwrap();

        let counts = &result.counts;
        assert_eq!(counts.get("000") + counts.get("111"), 500);
    }

    #[tokio::test]
    async fn test_sampling_memory() {
        let backend = SamplingBackend::new().with_seed(7).with_memory(true);

        let circuit = Circuit::bell().unwrap();
        let job_id = backend.submit(&circuit, 64).await.unwrap();
        let result = backend.result(&job_id).await.unwrap();

        let memory = result.memory.as_ref().expect("memory requested");
        assert_eq!(memory.len(), 64);
        assert!(memory.iter().all(|m| m == "00" || m == "11"));
    }

    #[tokio::test]
    async fn test_sampling_seed_reproducible() {
        let circuit = Circuit::ghz(3).unwrap();
        let a = SamplingBackend::new().with_seed(9);
        let b = SamplingBackend::new().with_seed(9);

        let ra = a.result(&a.submit(&circuit, 200).await.unwrap()).await.unwrap();
        let rb = b.result(&b.submit(&circuit, 200).await.unwrap()).await.unwrap();
        assert_eq!(ra.counts.get("000"), rb.counts.get("000"));
    }

    #[tokio::test]
    async fn test_sampling_too_many_qubits() {
        let backend = SamplingBackend::with_max_qubits(5);
        let circuit = Circuit::with_size("wide", 10, 0);

        let result = backend.submit(&circuit, 100).await;
        assert!(matches!(result, Err(HalError::CircuitTooLarge { .. })));
    }

    #[tokio::test]
    async fn test_sampling_rejects_zero_shots() {
        let backend = SamplingBackend::new();
        let circuit = Circuit::bell().unwrap();
        assert!(matches!(
            backend.submit(&circuit, 0).await,
            Err(HalError::InvalidShots(_))
        ));
    }

    #[tokio::test]
    async fn test_unmeasured_circuit_samples_all_qubits() {
        let backend = SamplingBackend::new().with_seed(3);
        let mut circuit = Circuit::with_size("plus", 2, 0);
        circuit.x(QubitId(1)).unwrap();

        let result = backend
            .result(&backend.submit(&circuit, 10).await.unwrap())
            .await
            .unwrap();
        // Deterministic |10⟩ state (qubit 1 set), highest qubit first.
        assert_eq!(result.counts.get("10"), 10);
    }

    #[tokio::test]
    async fn test_emulated_counts_sum_to_shots() {
        let backend = EmulatedBackend::from_catalog("vigo").unwrap().with_seed(5);

        let mut circuit = Circuit::with_size("chain", 3, 0);
        circuit.h(QubitId(0)).unwrap();
        circuit.cx(QubitId(0), QubitId(1)).unwrap();
        circuit.cx(QubitId(1), QubitId(2)).unwrap();
        let measured = circuit.with_terminal_measurements().unwrap();

        let result = backend
            .result(&backend.submit(&measured, 256).await.unwrap())
            .await
            .unwrap();
        assert_eq!(result.counts.total(), 256);
        result.check_shot_total().unwrap();
    }

    #[tokio::test]
    async fn test_emulated_noise_perturbs_distribution() {
        // A deep noisy circuit should leak some weight off the ideal
        // outcomes. Use a device with strong readout error.
        let backend = EmulatedBackend::from_catalog("tenerife").unwrap().with_seed(11);

        let circuit = Circuit::ghz(3).unwrap();
        let result = backend
            .result(&backend.submit(&circuit, 512).await.unwrap())
            .await
            .unwrap();

        let off_ideal = 512 - result.counts.get("000") - result.counts.get("111");
        assert!(off_ideal > 0, "7% readout error must show up in 512 shots");
    }

    #[tokio::test]
    async fn test_emulated_validate_requires_routing() {
        let backend = EmulatedBackend::from_catalog("vigo").unwrap();

        let mut disconnected = Circuit::with_size("far", 5, 0);
        disconnected.cx(QubitId(0), QubitId(4)).unwrap();
        let validation = backend.validate(&disconnected).await.unwrap();
        assert!(matches!(
            validation,
            ValidationResult::RequiresRouting { .. }
        ));

        let mut adjacent = Circuit::with_size("near", 2, 0);
        adjacent.cx(QubitId(0), QubitId(1)).unwrap();
        assert!(backend.validate(&adjacent).await.unwrap().is_valid());
    }

    #[tokio::test]
    async fn test_emulated_unknown_device() {
        assert!(matches!(
            EmulatedBackend::from_catalog("yorktown"),
            Err(HalError::UnknownDevice(_))
        ));
    }

    #[tokio::test]
    async fn test_cancel_completed_job_is_noop() {
        let backend = SamplingBackend::new();
        let circuit = Circuit::bell().unwrap();
        let job_id = backend.submit(&circuit, 8).await.unwrap();

        backend.cancel(&job_id).await.unwrap();
        assert!(backend.status(&job_id).await.unwrap().is_success());
    }
}
