//! Structural checks on a finished registry.
//!
//! The generator does not model device semantics; these checks only look at
//! graph shape and report what the simulator is likely to trip over.

use crate::device::DeviceKind;
use crate::error::Result;
use crate::registry::Registry;
use std::collections::HashSet;

/// Summary of a registry's shape
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StructureReport {
    pub devices: usize,
    pub edges: usize,
    /// Registered devices that appear in no edge
    pub isolated: Vec<String>,
    /// Edges listed more than once
    pub duplicate_edges: usize,
    pub requesters: usize,
    pub memories: usize,
}

/// Validate a registry and summarize its structure.
///
/// Dangling edge endpoints are an error; isolated devices, duplicate edges
/// and missing hosts or memories are logged as warnings.
pub fn validate_structure(registry: &Registry) -> Result<StructureReport> {
    registry.validate()?;

    let mut connected: HashSet<&str> = HashSet::new();
    let mut seen = HashSet::new();
    let mut duplicate_edges = 0;
    for edge in registry.edges() {
        connected.insert(&edge.src);
        connected.insert(&edge.dst);
        if !seen.insert((&edge.src, &edge.dst)) {
            duplicate_edges += 1;
        }
    }

    let isolated: Vec<String> = registry
        .devices()
        .iter()
        .filter(|d| !connected.contains(d.name()))
        .map(|d| d.name().to_string())
        .collect();

    let report = StructureReport {
        devices: registry.device_count(),
        edges: registry.edges().len(),
        isolated,
        duplicate_edges,
        requesters: registry.count_kind(DeviceKind::Requester),
        memories: registry.count_kind(DeviceKind::MemoryInterface),
    };

    log::info!(
        "Structure: {} devices, {} edges ({} requesters, {} memories)",
        report.devices,
        report.edges,
        report.requesters,
        report.memories
    );
    if !report.isolated.is_empty() {
        log::warn!("Devices with no connections: {}", report.isolated.join(", "));
    }
    if report.duplicate_edges > 0 {
        log::warn!("{} duplicate edge(s) present", report.duplicate_edges);
    }
    if report.requesters == 0 || report.memories == 0 {
        log::warn!("Configuration has no requesters or no memories; the simulator will issue no traffic");
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device::Device;
    use crate::registry::ReferencePolicy;

    #[test]
    fn test_report_counts() {
        let mut registry = Registry::default();
        registry
            .add_devices([Device::requester("H"), Device::memory("M"), Device::switch("Spare")])
            .unwrap();
        registry.connect("H", "M").unwrap();
        registry.connect("H", "M").unwrap();

        let report = validate_structure(&registry).unwrap();
        assert_eq!(report.devices, 3);
        assert_eq!(report.edges, 2);
        assert_eq!(report.duplicate_edges, 1);
        assert_eq!(report.isolated, vec!["Spare".to_string()]);
        assert_eq!(report.requesters, 1);
        assert_eq!(report.memories, 1);
    }

    #[test]
    fn test_dangling_edge_is_error() {
        let mut registry = Registry::default().with_reference_policy(ReferencePolicy::Lenient);
        registry.add_device(Device::requester("H")).unwrap();
        registry.connect("H", "Nowhere").unwrap();
        assert!(validate_structure(&registry).is_err());
    }
}
