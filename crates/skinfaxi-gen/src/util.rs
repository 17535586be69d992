//! Small experiment utilities shared by generators and sweep drivers.

/// Factor `n` into the most square pair `(rows, cols)` with `rows <= cols`.
///
/// Starts at ⌈√n⌉ and walks down to the nearest exact divisor, so the
/// result is the grid shape closest to square. `n` must be at least 1.
pub fn factor_int(n: u32) -> (u32, u32) {
    assert!(n >= 1, "factor_int requires n >= 1");
    let mut val = (f64::from(n)).sqrt().ceil() as u32;
    loop {
        let co_val = n / val;
        if val * co_val == n {
            return (val.min(co_val), val.max(co_val));
        }
        val -= 1;
    }
}

/// The all-ones hidden string for a Bernstein-Vazirani instance on
/// `num_qubits` qubits (one qubit is the phase ancilla).
pub fn secret_string(num_qubits: u32) -> String {
    "1".repeat(num_qubits.saturating_sub(1) as usize)
}

/// Take the contiguous block of `jobs` assigned to worker `rank` out of
/// `num_workers`.
///
/// Workers with `rank < len % num_workers` receive one extra job, so the
/// blocks cover the whole slice without overlap.
///
/// # Panics
///
/// Panics if `num_workers` is zero or `rank >= num_workers`.
pub fn partition<T: Clone>(jobs: &[T], rank: usize, num_workers: usize) -> Vec<T> {
    assert!(num_workers > 0, "partition requires at least one worker");
    assert!(rank < num_workers, "rank {rank} out of {num_workers} workers");

    let count = jobs.len() / num_workers;
    let remainder = jobs.len() % num_workers;

    let (start, stop) = if rank < remainder {
        let start = rank * (count + 1);
        (start, start + count + 1)
    } else {
        let start = rank * count + remainder;
        (start, start + count)
    };

    jobs[start..stop].to_vec()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_factor_int() {
        assert_eq!(factor_int(1), (1, 1));
        assert_eq!(factor_int(4), (2, 2));
        assert_eq!(factor_int(6), (2, 3));
        assert_eq!(factor_int(12), (3, 4));
        assert_eq!(factor_int(7), (1, 7));
    }

    #[test]
    fn test_secret_string() {
        assert_eq!(secret_string(4), "111");
        assert_eq!(secret_string(2), "1");
        assert_eq!(secret_string(1), "");
    }

    #[test]
    fn test_partition_even() {
        let jobs: Vec<u32> = (0..9).collect();
        assert_eq!(partition(&jobs, 0, 3), vec![0, 1, 2]);
        assert_eq!(partition(&jobs, 1, 3), vec![3, 4, 5]);
        assert_eq!(partition(&jobs, 2, 3), vec![6, 7, 8]);
    }

    #[test]
    fn test_partition_with_remainder() {
        let jobs: Vec<u32> = (0..10).collect();
        assert_eq!(partition(&jobs, 0, 3), vec![0, 1, 2, 3]);
        assert_eq!(partition(&jobs, 1, 3), vec![4, 5, 6]);
        assert_eq!(partition(&jobs, 2, 3), vec![7, 8, 9]);
    }

    proptest! {
        #[test]
        fn factor_product_is_input(n in 1u32..500) {
            let (rows, cols) = factor_int(n);
            prop_assert_eq!(rows * cols, n);
            prop_assert!(rows <= cols);
        }

        #[test]
        fn partition_blocks_cover_all(len in 0usize..50, workers in 1usize..8) {
            let jobs: Vec<usize> = (0..len).collect();
            let mut gathered = vec![];
            for rank in 0..workers {
                gathered.extend(partition(&jobs, rank, workers));
            }
            prop_assert_eq!(gathered, jobs);
        }
    }
}
