//! Logical-to-physical qubit layout.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use skinfaxi_ir::QubitId;

/// A bijective mapping between logical qubits and physical positions.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Layout {
    logical_to_physical: FxHashMap<QubitId, u32>,
    physical_to_logical: FxHashMap<u32, QubitId>,
}

impl Layout {
    /// Create a new empty layout.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a trivial layout (logical qubit i → physical qubit i).
    pub fn trivial(num_qubits: u32) -> Self {
        let mut layout = Self::new();
        for i in 0..num_qubits {
            layout.add(QubitId(i), i);
        }
        layout
    }

    /// Add a mapping from logical to physical qubit, displacing any
    /// conflicting entries so both directions stay consistent.
    pub fn add(&mut self, logical: QubitId, physical: u32) {
        if let Some(&old_logical) = self.physical_to_logical.get(&physical) {
            if old_logical != logical {
                self.logical_to_physical.remove(&old_logical);
            }
        }
        if let Some(&old_physical) = self.logical_to_physical.get(&logical) {
            if old_physical != physical {
                self.physical_to_logical.remove(&old_physical);
            }
        }
        self.logical_to_physical.insert(logical, physical);
        self.physical_to_logical.insert(physical, logical);
    }

    /// Get the physical position of a logical qubit.
    pub fn get_physical(&self, logical: QubitId) -> Option<u32> {
        self.logical_to_physical.get(&logical).copied()
    }

    /// Get the logical qubit at a physical position.
    pub fn get_logical(&self, physical: u32) -> Option<QubitId> {
        self.physical_to_logical.get(&physical).copied()
    }

    /// Exchange the occupants of two physical positions.
    pub fn swap(&mut self, p1: u32, p2: u32) {
        let l1 = self.physical_to_logical.get(&p1).copied();
        let l2 = self.physical_to_logical.get(&p2).copied();

        if let Some(l1) = l1 {
            self.logical_to_physical.insert(l1, p2);
            self.physical_to_logical.insert(p2, l1);
        } else {
            self.physical_to_logical.remove(&p2);
        }

        if let Some(l2) = l2 {
            self.logical_to_physical.insert(l2, p1);
            self.physical_to_logical.insert(p1, l2);
        } else {
            self.physical_to_logical.remove(&p1);
        }
    }

    /// Number of mapped qubits.
    pub fn len(&self) -> usize {
        self.logical_to_physical.len()
    }

    /// Check if the layout is empty.
    pub fn is_empty(&self) -> bool {
        self.logical_to_physical.is_empty()
    }

    /// Iterate over (logical, physical) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (QubitId, u32)> + '_ {
        self.logical_to_physical.iter().map(|(&l, &p)| (l, p))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trivial_layout() {
        let layout = Layout::trivial(5);
        assert_eq!(layout.get_physical(QubitId(0)), Some(0));
        assert_eq!(layout.get_physical(QubitId(4)), Some(4));
        assert_eq!(layout.get_logical(2), Some(QubitId(2)));
        assert_eq!(layout.len(), 5);
    }

    #[test]
    fn test_swap() {
        let mut layout = Layout::trivial(3);
        layout.swap(0, 2);

        assert_eq!(layout.get_physical(QubitId(0)), Some(2));
        assert_eq!(layout.get_physical(QubitId(2)), Some(0));
        assert_eq!(layout.get_logical(0), Some(QubitId(2)));
        assert_eq!(layout.get_logical(2), Some(QubitId(0)));
        assert_eq!(layout.get_physical(QubitId(1)), Some(1));
    }

    #[test]
    fn test_add_displaces_conflicts() {
        let mut layout = Layout::trivial(2);
        layout.add(QubitId(0), 1);

        assert_eq!(layout.get_physical(QubitId(0)), Some(1));
        // Logical 1 lost its position to logical 0.
        assert_eq!(layout.get_physical(QubitId(1)), None);
        assert_eq!(layout.get_logical(0), None);
    }
}
