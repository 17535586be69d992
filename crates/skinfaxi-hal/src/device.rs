//! Emulated-device presets and the process-global catalog.
//!
//! Each preset describes a retired superconducting processor family:
//! qubit count, coupling topology, and device-wide noise averages. The
//! emulated backend in `skinfaxi-sim` turns a preset into a noisy
//! execution target; the dispatch layer resolves device names through
//! [`catalog`].

use rustc_hash::FxHashMap;
use std::sync::OnceLock;
use tracing::debug;

use crate::capability::{Capabilities, NoiseProfile, Topology};

/// 20-qubit device on a 4×5 lattice with diagonal couplers.
pub fn tokyo() -> Capabilities {
    let mut edges: Vec<(u32, u32)> = Topology::grid(4, 5).edges().to_vec();
    edges.extend([(1, 7), (3, 9), (5, 11), (7, 13), (11, 17), (13, 19)]);
    Capabilities::emulated(
        "tokyo",
        Topology::from_edges(20, edges),
        NoiseProfile::new(1.0e-3, 1.0e-2, 2.0e-2),
    )
}

/// 5-qubit device on a T-shaped coupling map.
pub fn vigo() -> Capabilities {
    Capabilities::emulated(
        "vigo",
        Topology::from_edges(5, [(0, 1), (1, 2), (1, 3), (3, 4)]),
        NoiseProfile::new(5.0e-4, 8.0e-3, 2.0e-2),
    )
}

/// 14-qubit device: two seven-qubit rows with vertical rungs.
pub fn melbourne() -> Capabilities {
    let edges = [
        // Top row, left to right.
        (0, 1),
        (1, 2),
        (2, 3),
        (3, 4),
        (4, 5),
        (5, 6),
        // Bottom row, right to left.
        (7, 8),
        (8, 9),
        (9, 10),
        (10, 11),
        (11, 12),
        (12, 13),
        // Rungs.
        (1, 13),
        (2, 12),
        (3, 11),
        (4, 10),
        (5, 9),
        (6, 8),
    ];
    Capabilities::emulated(
        "melbourne",
        Topology::from_edges(14, edges),
        NoiseProfile::new(1.5e-3, 2.0e-2, 4.0e-2),
    )
}

/// 20-qubit device on a plain 4×5 lattice.
pub fn poughkeepsie() -> Capabilities {
    Capabilities::emulated(
        "poughkeepsie",
        Topology::grid(4, 5),
        NoiseProfile::new(1.0e-3, 1.5e-2, 3.0e-2),
    )
}

/// 16-qubit device on a 2×8 ladder.
pub fn rueschlikon() -> Capabilities {
    Capabilities::emulated(
        "rueschlikon",
        Topology::grid(2, 8),
        NoiseProfile::new(2.0e-3, 3.0e-2, 5.0e-2),
    )
}

/// 5-qubit device on a bowtie coupling map.
pub fn tenerife() -> Capabilities {
    Capabilities::emulated(
        "tenerife",
        Topology::from_edges(5, [(0, 1), (0, 2), (1, 2), (2, 3), (2, 4), (3, 4)]),
        NoiseProfile::new(2.5e-3, 4.0e-2, 7.0e-2),
    )
}

/// Catalog of emulated devices, keyed by name.
#[derive(Debug, Clone, Default)]
pub struct DeviceCatalog {
    devices: FxHashMap<String, Capabilities>,
}

impl DeviceCatalog {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a catalog with every built-in device preset.
    pub fn builtin() -> Self {
        let mut catalog = Self::new();
        for device in [
            tokyo(),
            vigo(),
            melbourne(),
            poughkeepsie(),
            rueschlikon(),
            tenerife(),
        ] {
            catalog.register(device);
        }
        catalog
    }

    /// Register a device, keyed by its capability name.
    pub fn register(&mut self, capabilities: Capabilities) {
        debug!(device = %capabilities.name, "registering device");
        self.devices
            .insert(capabilities.name.clone(), capabilities);
    }

    /// Look up a device by name.
    pub fn get(&self, name: &str) -> Option<&Capabilities> {
        self.devices.get(name)
    }

    /// Check if a device name is known.
    pub fn contains(&self, name: &str) -> bool {
        self.devices.contains_key(name)
    }

    /// All registered device names, sorted.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<_> = self.devices.keys().cloned().collect();
        names.sort();
        names
    }
}

/// The process-global device catalog with the built-in presets.
pub fn catalog() -> &'static DeviceCatalog {
    static CATALOG: OnceLock<DeviceCatalog> = OnceLock::new();
    CATALOG.get_or_init(DeviceCatalog::builtin)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_catalog() {
        let catalog = DeviceCatalog::builtin();
        assert_eq!(
            catalog.names(),
            vec![
                "melbourne",
                "poughkeepsie",
                "rueschlikon",
                "tenerife",
                "tokyo",
                "vigo"
            ]
        );
        assert!(catalog.contains("vigo"));
        assert!(!catalog.contains("yorktown"));
    }

    #[test]
    fn test_device_sizes() {
        let catalog = DeviceCatalog::builtin();
        assert_eq!(catalog.get("tokyo").unwrap().num_qubits, 20);
        assert_eq!(catalog.get("vigo").unwrap().num_qubits, 5);
        assert_eq!(catalog.get("melbourne").unwrap().num_qubits, 14);
        assert_eq!(catalog.get("poughkeepsie").unwrap().num_qubits, 20);
        assert_eq!(catalog.get("rueschlikon").unwrap().num_qubits, 16);
        assert_eq!(catalog.get("tenerife").unwrap().num_qubits, 5);
    }

    #[test]
    fn test_devices_carry_noise() {
        for name in DeviceCatalog::builtin().names() {
            let device = catalog().get(&name).unwrap();
            assert!(!device.is_simulator, "{name} must emulate hardware");
            let noise = device.noise_profile.expect("emulated device has noise");
            assert!(noise.two_qubit_error > noise.single_qubit_error);
        }
    }

    #[test]
    fn test_global_catalog_is_shared() {
        assert!(std::ptr::eq(catalog(), catalog()));
    }
}
