//! Execution targets and run options.

use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// Where a circuit should be executed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExecutionTarget {
    /// Ideal statevector: exact outcome distribution, no sampling.
    Statevector,
    /// Noiseless simulator with shot sampling.
    NoiselessSampling,
    /// Noisy emulation of a cataloged device.
    Emulated {
        /// Device name in the catalog.
        device: String,
        /// Run the routing adapter before execution.
        routed: bool,
    },
}

impl ExecutionTarget {
    /// Target a cataloged device without routing.
    pub fn emulated(device: impl Into<String>) -> Self {
        ExecutionTarget::Emulated {
            device: device.into(),
            routed: false,
        }
    }

    /// Target a cataloged device with pre-execution routing.
    pub fn routed(device: impl Into<String>) -> Self {
        ExecutionTarget::Emulated {
            device: device.into(),
            routed: true,
        }
    }
}

impl fmt::Display for ExecutionTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExecutionTarget::Statevector => write!(f, "statevector"),
            ExecutionTarget::NoiselessSampling => write!(f, "noiseless"),
            ExecutionTarget::Emulated { device, routed } => {
                if *routed {
                    write!(f, "routed:{device}")
                } else {
                    write!(f, "{device}")
                }
            }
        }
    }
}

impl FromStr for ExecutionTarget {
    type Err = Infallible;

    /// Parse a target string.
    ///
    /// `"statevector"` and `"noiseless"` name the simulator paths; a
    /// `routed:` prefix requests the routing adapter; anything else is
    /// taken as a device name, validated against the catalog at dispatch
    /// time.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "statevector" => ExecutionTarget::Statevector,
            "noiseless" | "noiseless_sampling" => ExecutionTarget::NoiselessSampling,
            other => match other.strip_prefix("routed:") {
                Some(device) => ExecutionTarget::routed(device),
                None => ExecutionTarget::emulated(other),
            },
        })
    }
}

/// Options for a dispatch run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RunOptions {
    /// Shot count; defaults to `max(1024, 2^num_qubits)`, clamped to the
    /// backend's shot ceiling.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shots: Option<u32>,
    /// Return raw per-shot bitstrings instead of a probability vector.
    #[serde(default)]
    pub memory: bool,
    /// Sampling/noise seed for reproducible runs.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl RunOptions {
    /// Create default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set an explicit shot count.
    #[must_use]
    pub fn with_shots(mut self, shots: u32) -> Self {
        self.shots = Some(shots);
        self
    }

    /// Request raw per-shot memory.
    #[must_use]
    pub fn with_memory(mut self, memory: bool) -> Self {
        self.memory = memory;
        self
    }

    /// Fix the sampling seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

/// Default shot count for a circuit: `max(1024, 2^num_qubits)`.
///
/// Saturates at 2^30 — circuits anywhere near that size never reach a
/// sampled backend anyway.
pub fn default_shots(num_qubits: usize) -> u32 {
    let scaled = 1u64 << num_qubits.min(30);
    scaled.max(1024).min(u64::from(u32::MAX)) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_targets() {
        assert_eq!(
            "statevector".parse::<ExecutionTarget>().unwrap(),
            ExecutionTarget::Statevector
        );
        assert_eq!(
            "noiseless".parse::<ExecutionTarget>().unwrap(),
            ExecutionTarget::NoiselessSampling
        );
        assert_eq!(
            "vigo".parse::<ExecutionTarget>().unwrap(),
            ExecutionTarget::emulated("vigo")
        );
        assert_eq!(
            "routed:tokyo".parse::<ExecutionTarget>().unwrap(),
            ExecutionTarget::routed("tokyo")
        );
    }

    #[test]
    fn test_display_round_trip() {
        for target in [
            ExecutionTarget::Statevector,
            ExecutionTarget::NoiselessSampling,
            ExecutionTarget::emulated("melbourne"),
            ExecutionTarget::routed("tenerife"),
        ] {
            let parsed: ExecutionTarget = target.to_string().parse().unwrap();
            assert_eq!(parsed, target);
        }
    }

    #[test]
    fn test_default_shots() {
        assert_eq!(default_shots(0), 1024);
        assert_eq!(default_shots(5), 1024);
        assert_eq!(default_shots(10), 1024);
        assert_eq!(default_shots(11), 2048);
        assert_eq!(default_shots(20), 1 << 20);
    }

    #[test]
    fn test_run_options_builder() {
        let options = RunOptions::new().with_shots(2048).with_memory(true).with_seed(7);
        assert_eq!(options.shots, Some(2048));
        assert!(options.memory);
        assert_eq!(options.seed, Some(7));
    }
}
