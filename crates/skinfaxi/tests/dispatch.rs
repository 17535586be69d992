//! End-to-end dispatch tests across the three execution paths.

use skinfaxi::{
    CircuitKind, EvalOutput, ExecutionTarget, RunOptions, evaluate, generate, DispatchError,
    HalError,
};
use skinfaxi_ir::{Circuit, QubitId};

fn bell_unmeasured() -> Circuit {
    let mut circuit = Circuit::with_size("bell_plain", 2, 0);
    circuit.h(QubitId(0)).unwrap();
    circuit.cx(QubitId(0), QubitId(1)).unwrap();
    circuit
}

#[tokio::test]
async fn statevector_returns_exact_distribution() {
    let output = evaluate(
        &bell_unmeasured(),
        &ExecutionTarget::Statevector,
        &RunOptions::new(),
    )
    .await
    .unwrap();

    let probs = output.into_probabilities().unwrap();
    assert_eq!(probs.len(), 4);
    assert!((probs[0] - 0.5).abs() < 1e-10);
    assert!((probs[3] - 0.5).abs() < 1e-10);
    assert!((probs.sum() - 1.0).abs() < 1e-10);
}

#[tokio::test]
async fn noiseless_sampling_auto_measures() {
    let options = RunOptions::new().with_shots(512).with_seed(42);
    let output = evaluate(
        &bell_unmeasured(),
        &ExecutionTarget::NoiselessSampling,
        &options,
    )
    .await
    .unwrap();

    let probs = output.into_probabilities().unwrap();
    assert_eq!(probs.len(), 4);
    // Only the Bell outcomes carry weight, and the vector is normalized.
    assert_eq!(probs[1], 0.0);
    assert_eq!(probs[2], 0.0);
    assert!((probs.sum() - 1.0).abs() < 1e-12);
    assert!(probs[0] > 0.3 && probs[3] > 0.3);
}

#[tokio::test]
async fn memory_returns_one_entry_per_shot() {
    let options = RunOptions::new().with_shots(128).with_memory(true).with_seed(3);
    let output = evaluate(
        &bell_unmeasured(),
        &ExecutionTarget::NoiselessSampling,
        &options,
    )
    .await
    .unwrap();

    let memory = output.into_memory().unwrap();
    assert_eq!(memory.len(), 128);
    assert!(memory.iter().all(|m| m == "00" || m == "11"));
}

#[tokio::test]
async fn emulated_device_runs_generated_circuit() {
    let circuit = generate(CircuitKind::BernsteinVazirani, 4, 0, 0).unwrap();
    let options = RunOptions::new().with_shots(256).with_seed(9);

    let output = evaluate(&circuit, &ExecutionTarget::emulated("vigo"), &options)
        .await
        .unwrap();

    let probs = output.into_probabilities().unwrap();
    assert_eq!(probs.len(), 16);
    assert!((probs.sum() - 1.0).abs() < 1e-12);
}

#[tokio::test]
async fn unknown_device_is_fatal() {
    let err = evaluate(
        &bell_unmeasured(),
        &ExecutionTarget::emulated("yorktown"),
        &RunOptions::new(),
    )
    .await
    .unwrap_err();

    assert!(matches!(
        err,
        DispatchError::Hal(HalError::UnknownDevice(name)) if name == "yorktown"
    ));
}

#[tokio::test]
async fn oversized_circuit_is_rejected() {
    let circuit = Circuit::with_size("wide", 9, 0);
    let err = evaluate(
        &circuit,
        &ExecutionTarget::emulated("vigo"),
        &RunOptions::new().with_shots(16),
    )
    .await
    .unwrap_err();

    assert!(matches!(
        err,
        DispatchError::Hal(HalError::CircuitTooLarge { .. })
    ));
}

#[tokio::test]
async fn routed_execution_keeps_readout_register() {
    // cx(0, 2) is non-adjacent on vigo, so routing must insert SWAPs; the
    // readout register stays three bits wide regardless of the device's
    // five qubits.
    let mut circuit = Circuit::with_size("far", 3, 0);
    circuit.h(QubitId(0)).unwrap();
    circuit.cx(QubitId(0), QubitId(2)).unwrap();

    let options = RunOptions::new().with_shots(256).with_seed(1);
    let output = evaluate(&circuit, &ExecutionTarget::routed("vigo"), &options)
        .await
        .unwrap();

    let probs = output.into_probabilities().unwrap();
    assert_eq!(probs.len(), 8);
    assert!((probs.sum() - 1.0).abs() < 1e-12);
}

#[tokio::test]
async fn routed_and_plain_agree_on_a_noiseless_invariant() {
    // On a device with zero noise the routed circuit must reproduce the
    // plain distribution exactly; with noise it stays close for a tiny
    // circuit. Compare the dominant outcome instead of the full vector.
    let mut circuit = Circuit::with_size("chain", 3, 0);
    circuit.x(QubitId(0)).unwrap();
    circuit.cx(QubitId(0), QubitId(2)).unwrap();

    let options = RunOptions::new().with_shots(512).with_seed(21);
    let output = evaluate(&circuit, &ExecutionTarget::routed("vigo"), &options)
        .await
        .unwrap();
    let probs = output.into_probabilities().unwrap();

    // Ideal outcome is |101⟩ (qubits 0 and 2 set) = index 5.
    let dominant = probs
        .iter()
        .enumerate()
        .max_by(|a, b| a.1.total_cmp(b.1))
        .map(|(i, _)| i)
        .unwrap();
    assert_eq!(dominant, 5);
}

#[tokio::test]
async fn target_strings_reach_the_right_path() {
    let target: ExecutionTarget = "statevector".parse().unwrap();
    let output = evaluate(&bell_unmeasured(), &target, &RunOptions::new())
        .await
        .unwrap();
    assert!(matches!(output, EvalOutput::Probabilities(_)));

    let target: ExecutionTarget = "routed:tenerife".parse().unwrap();
    assert_eq!(target, ExecutionTarget::routed("tenerife"));
}
