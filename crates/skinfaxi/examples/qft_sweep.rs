//! Generate a QFT benchmark and run it on all three execution paths.
//!
//! ```sh
//! RUST_LOG=debug cargo run --example qft_sweep
//! ```

use anyhow::Result;
use tracing_subscriber::EnvFilter;

use skinfaxi::{
    CircuitKind, EvalOutput, ExecutionTarget, ResultStore, RunOptions, evaluate, generate,
};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let circuit = generate(CircuitKind::Qft, 4, 0, 7)?;
    println!(
        "generated '{}' ({} qubits, depth {})",
        circuit.name(),
        circuit.num_qubits(),
        circuit.depth()
    );

    let store = ResultStore::open(std::env::temp_dir().join("qft_sweep.jsonl"));
    let options = RunOptions::new().with_shots(4096).with_seed(7);

    for target_str in ["statevector", "noiseless", "vigo", "routed:vigo"] {
        let target: ExecutionTarget = target_str.parse().unwrap();
        match evaluate(&circuit, &target, &options).await? {
            EvalOutput::Probabilities(probs) => {
                let peak = probs
                    .iter()
                    .enumerate()
                    .max_by(|a, b| a.1.total_cmp(b.1))
                    .map(|(i, p)| (i, *p))
                    .unwrap();
                println!(
                    "{target_str:>14}: {} states, peak p[{}] = {:.4}",
                    probs.len(),
                    peak.0,
                    peak.1
                );
                store.append(&format!("qft4/{target_str}"), &probs.to_vec())?;
            }
            EvalOutput::Memory(_) => unreachable!("memory was not requested"),
        }
    }

    println!("results appended to {}", store.path().display());
    Ok(())
}
