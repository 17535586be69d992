//! Execution results and probability-vector normalization.
//!
//! Backends report heterogeneous formats: shot-count maps, raw per-shot
//! memory, exact amplitudes. Everything converges here on one
//! representation — a probability vector of length 2^n indexed by the
//! integer encoding of the measured bitstring.
//!
//! Bit convention: bit `i` of a basis-state index corresponds to qubit
//! `i`; bitstrings are rendered highest-qubit-first, so
//! `usize::from_str_radix(bits, 2)` recovers the index.

use ndarray::Array1;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::error::{HalError, HalResult};

/// Vectors above this size (2^30 entries) are refused outright.
const MAX_VECTOR_BITS: u32 = 30;

/// Measurement counts: bitstring → number of shots.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Counts(FxHashMap<String, u64>);

impl Counts {
    /// Create an empty counts map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `count` additional observations of a bitstring.
    pub fn insert(&mut self, bitstring: impl Into<String>, count: u64) {
        *self.0.entry(bitstring.into()).or_insert(0) += count;
    }

    /// Get the count for a bitstring (zero if never observed).
    pub fn get(&self, bitstring: &str) -> u64 {
        self.0.get(bitstring).copied().unwrap_or(0)
    }

    /// Total number of recorded shots.
    pub fn total(&self) -> u64 {
        self.0.values().sum()
    }

    /// Number of distinct outcomes.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check if no outcome was recorded.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over (bitstring, count) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.0.iter().map(|(k, &v)| (k.as_str(), v))
    }

    /// The most frequently observed outcome, if any.
    pub fn most_frequent(&self) -> Option<(&str, u64)> {
        self.0
            .iter()
            .max_by(|a, b| a.1.cmp(b.1).then_with(|| b.0.cmp(a.0)))
            .map(|(k, &v)| (k.as_str(), v))
    }
}

impl FromIterator<(String, u64)> for Counts {
    fn from_iter<T: IntoIterator<Item = (String, u64)>>(iter: T) -> Self {
        let mut counts = Counts::new();
        for (bits, count) in iter {
            counts.insert(bits, count);
        }
        counts
    }
}

/// Convert a counts map into a fixed-length vector indexed by basis state.
///
/// The vector has `2^num_bits` entries. With `normalize` set, entries are
/// divided by the total count so the vector sums to 1; otherwise raw
/// counts are kept. Every bitstring must be exactly `num_bits` binary
/// digits.
pub fn counts_to_vector(
    counts: &Counts,
    num_bits: u32,
    normalize: bool,
) -> HalResult<Array1<f64>> {
    if num_bits > MAX_VECTOR_BITS {
        return Err(HalError::Unsupported(format!(
            "probability vector over {num_bits} bits exceeds the {MAX_VECTOR_BITS}-bit limit"
        )));
    }
    if normalize && counts.is_empty() {
        return Err(HalError::EmptyCounts);
    }

    let mut vector = Array1::zeros(1usize << num_bits);
    for (bits, count) in counts.iter() {
        if bits.len() != num_bits as usize {
            return Err(HalError::MalformedBitstring(bits.to_string()));
        }
        let index = usize::from_str_radix(bits, 2)
            .map_err(|_| HalError::MalformedBitstring(bits.to_string()))?;
        vector[index] += count as f64;
    }

    if normalize {
        let total = counts.total() as f64;
        vector.mapv_inplace(|v| v / total);
    }

    Ok(vector)
}

/// Result of executing a circuit on a backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutionResult {
    /// Measurement counts.
    pub counts: Counts,
    /// Number of shots requested.
    pub shots: u32,
    /// Raw per-shot bitstrings, when memory was requested.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub memory: Option<Vec<String>>,
    /// Wall-clock execution time in milliseconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub execution_time_ms: Option<u64>,
}

impl ExecutionResult {
    /// Create a new execution result.
    pub fn new(counts: Counts, shots: u32) -> Self {
        Self {
            counts,
            shots,
            memory: None,
            execution_time_ms: None,
        }
    }

    /// Attach per-shot memory.
    #[must_use]
    pub fn with_memory(mut self, memory: Vec<String>) -> Self {
        self.memory = Some(memory);
        self
    }

    /// Attach the execution time.
    #[must_use]
    pub fn with_execution_time(mut self, millis: u64) -> Self {
        self.execution_time_ms = Some(millis);
        self
    }

    /// Verify that the recorded counts add up to the requested shots.
    pub fn check_shot_total(&self) -> HalResult<()> {
        let got = self.counts.total();
        if got != u64::from(self.shots) {
            return Err(HalError::ShotCountMismatch {
                expected: u64::from(self.shots),
                got,
            });
        }
        Ok(())
    }

    /// Normalize the counts into a probability vector over `num_bits` bits.
    ///
    /// Enforces the shot-total invariant first, so a backend that dropped
    /// or duplicated shots cannot silently skew the distribution.
    pub fn probabilities(&self, num_bits: u32) -> HalResult<Array1<f64>> {
        self.check_shot_total()?;
        counts_to_vector(&self.counts, num_bits, true)
    }
}
