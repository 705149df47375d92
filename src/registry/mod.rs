//! # Device Graph Registry
//!
//! The registry is the in-memory graph being assembled before serialization:
//! the set of devices (unique by name, kept in registration order), an
//! ordered list of directed connections, and the global simulation scalars.
//!
//! ## Ordering
//!
//! Both orders are observable in the rendered document:
//!
//! - Devices appear in the `[devices]` table and as sections in the order
//!   they were first registered.
//! - Edges appear in the `edges` array in the order `connect` was called.
//!   Duplicate edges are kept.
//!
//! ## Policies
//!
//! Registering a name twice is rejected by default (`DuplicatePolicy::Reject`).
//! With `DuplicatePolicy::Replace` the newer device takes the older one's slot,
//! keeping its original position.
//!
//! Connecting an unregistered device fails immediately by default
//! (`ReferencePolicy::Eager`). With `ReferencePolicy::Lenient` the edge is
//! recorded and the dangling reference is reported by `validate` or
//! `render_checked` instead.

pub mod settings;

pub use settings::{GlobalOverrides, GlobalSettings};

use crate::device::{Device, DeviceKind};
use crate::document;
use crate::error::{ConfigError, Result};
use log::debug;
use std::collections::HashMap;
use std::fmt;

/// What to do when a device name is registered twice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DuplicatePolicy {
    #[default]
    Reject,
    Replace,
}

/// When to check that both endpoints of a connection are registered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReferencePolicy {
    #[default]
    Eager,
    Lenient,
}

/// A directed connection between two devices, by name
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Edge {
    pub src: String,
    pub dst: String,
}

impl Edge {
    pub fn new(src: impl Into<String>, dst: impl Into<String>) -> Self {
        Self {
            src: src.into(),
            dst: dst.into(),
        }
    }
}

/// Devices, connections and global settings of one generated configuration
#[derive(Debug, Clone)]
pub struct Registry {
    settings: GlobalSettings,
    devices: Vec<Device>,
    index: HashMap<String, usize>,
    edges: Vec<Edge>,
    duplicates: DuplicatePolicy,
    references: ReferencePolicy,
}

impl Registry {
    pub fn new(settings: GlobalSettings) -> Self {
        Self {
            settings,
            devices: Vec::new(),
            index: HashMap::new(),
            edges: Vec::new(),
            duplicates: DuplicatePolicy::default(),
            references: ReferencePolicy::default(),
        }
    }

    pub fn with_duplicate_policy(mut self, policy: DuplicatePolicy) -> Self {
        self.duplicates = policy;
        self
    }

    pub fn with_reference_policy(mut self, policy: ReferencePolicy) -> Self {
        self.references = policy;
        self
    }

    pub fn settings(&self) -> &GlobalSettings {
        &self.settings
    }

    pub fn settings_mut(&mut self) -> &mut GlobalSettings {
        &mut self.settings
    }

    /// Register a single device
    pub fn add_device(&mut self, device: Device) -> Result<()> {
        check_name(device.name())?;
        match self.index.get(device.name()) {
            Some(&slot) => match self.duplicates {
                DuplicatePolicy::Reject => Err(ConfigError::DuplicateName(device.name().to_string())),
                DuplicatePolicy::Replace => {
                    debug!("Replacing device '{}' at position {}", device.name(), slot);
                    self.devices[slot] = device;
                    Ok(())
                }
            },
            None => {
                self.index.insert(device.name().to_string(), self.devices.len());
                self.devices.push(device);
                Ok(())
            }
        }
    }

    /// Register devices in iteration order. Stops at the first failure;
    /// devices before it stay registered.
    pub fn add_devices<I>(&mut self, devices: I) -> Result<()>
    where
        I: IntoIterator<Item = Device>,
    {
        for device in devices {
            self.add_device(device)?;
        }
        Ok(())
    }

    /// Append a directed edge `src -> dst`. Duplicates are kept.
    pub fn connect(&mut self, src: &str, dst: &str) -> Result<()> {
        if self.references == ReferencePolicy::Eager {
            self.check_registered(src)?;
            self.check_registered(dst)?;
        }
        self.edges.push(Edge::new(src, dst));
        Ok(())
    }

    fn check_registered(&self, name: &str) -> Result<()> {
        if self.index.contains_key(name) {
            Ok(())
        } else {
            Err(ConfigError::UnknownReference { name: name.to_string() })
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn device(&self, name: &str) -> Option<&Device> {
        self.index.get(name).map(|&slot| &self.devices[slot])
    }

    pub fn device_mut(&mut self, name: &str) -> Option<&mut Device> {
        match self.index.get(name) {
            Some(&slot) => Some(&mut self.devices[slot]),
            None => None,
        }
    }

    /// Devices in registration order
    pub fn devices(&self) -> &[Device] {
        &self.devices
    }

    /// Edges in connection order
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn device_count(&self) -> usize {
        self.devices.len()
    }

    pub fn count_kind(&self, kind: DeviceKind) -> usize {
        self.devices.iter().filter(|d| d.kind() == kind).count()
    }

    /// Check that every edge endpoint is registered
    pub fn validate(&self) -> Result<()> {
        for edge in &self.edges {
            self.check_registered(&edge.src)?;
            self.check_registered(&edge.dst)?;
        }
        Ok(())
    }

    /// Render the full document
    pub fn render(&self) -> String {
        document::render(self)
    }

    /// Validate, then render
    pub fn render_checked(&self) -> Result<String> {
        self.validate()?;
        Ok(self.render())
    }
}

/// Names must survive a render/parse round trip: no quotes, brackets, `=`
/// or line breaks, no surrounding whitespace, and not the `devices` table
fn check_name(name: &str) -> Result<()> {
    let bad = name.is_empty()
        || name == "devices"
        || name.trim() != name
        || name.contains(['"', '[', ']', '=', '\n', '\r']);
    if bad {
        Err(ConfigError::invalid(format!("'{}' cannot be used as a device name", name.escape_debug())))
    } else {
        Ok(())
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new(GlobalSettings::default())
    }
}

impl fmt::Display for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registration_order() {
        let mut registry = Registry::default();
        registry
            .add_devices([Device::requester("Host"), Device::memory("Mem"), Device::switch("Switch")])
            .unwrap();

        let names: Vec<&str> = registry.devices().iter().map(|d| d.name()).collect();
        assert_eq!(names, vec!["Host", "Mem", "Switch"]);
        assert_eq!(registry.count_kind(DeviceKind::Switch), 1);
    }

    #[test]
    fn test_duplicate_rejected_by_default() {
        let mut registry = Registry::default();
        registry.add_device(Device::switch("S")).unwrap();
        let err = registry.add_device(Device::switch("S")).unwrap_err();
        assert_eq!(err, ConfigError::DuplicateName("S".to_string()));
        assert_eq!(registry.device_count(), 1);
    }

    #[test]
    fn test_duplicate_replace_keeps_slot() {
        let mut registry = Registry::default().with_duplicate_policy(DuplicatePolicy::Replace);
        registry.add_device(Device::switch("S")).unwrap();
        registry.add_device(Device::memory("M")).unwrap();
        registry.add_device(Device::switch("S").with("delay", 7).unwrap()).unwrap();

        assert_eq!(registry.device_count(), 2);
        assert_eq!(registry.devices()[0].name(), "S");
        assert_eq!(registry.device("S").unwrap().get_int("delay").unwrap(), 7);
        assert!(registry.render().contains("[S]\ndelay = 7\n"));
    }

    #[test]
    fn test_connect_keeps_duplicates_in_order() {
        let mut registry = Registry::default();
        registry.add_devices([Device::switch("A"), Device::switch("B")]).unwrap();
        registry.connect("A", "B").unwrap();
        registry.connect("B", "A").unwrap();
        registry.connect("A", "B").unwrap();

        assert_eq!(
            registry.edges(),
            &[Edge::new("A", "B"), Edge::new("B", "A"), Edge::new("A", "B")]
        );
    }

    #[test]
    fn test_eager_reference_check() {
        let mut registry = Registry::default();
        registry.add_device(Device::switch("A")).unwrap();
        let err = registry.connect("A", "Ghost").unwrap_err();
        assert_eq!(err, ConfigError::UnknownReference { name: "Ghost".to_string() });
        assert!(registry.edges().is_empty());
    }

    #[test]
    fn test_lenient_reference_check_at_render() {
        let mut registry = Registry::default().with_reference_policy(ReferencePolicy::Lenient);
        registry.add_device(Device::switch("A")).unwrap();
        registry.connect("A", "Ghost").unwrap();

        assert_eq!(registry.edges().len(), 1);
        assert!(registry.render_checked().is_err());

        registry.add_device(Device::switch("Ghost")).unwrap();
        assert!(registry.render_checked().is_ok());
    }

    #[test]
    fn test_device_mut() {
        let mut registry = Registry::default();
        registry.add_device(Device::duplex_bus("Bus")).unwrap();
        registry.device_mut("Bus").unwrap().set("frame_size", 64).unwrap();
        assert_eq!(registry.device("Bus").unwrap().get_int("frame_size").unwrap(), 64);
        assert!(registry.device_mut("Nope").is_none());
    }

    #[test]
    fn test_renamed_device_collides_on_registration() {
        let mut registry = Registry::default();
        registry.add_devices([Device::switch("A"), Device::switch("B")]).unwrap();

        let err = registry.add_device(Device::switch("A").renamed("B")).unwrap_err();
        assert_eq!(err, ConfigError::DuplicateName("B".to_string()));

        // Editing through device_mut leaves names and the index in step
        registry.device_mut("A").unwrap().set("delay", 3).unwrap();
        registry.connect("A", "B").unwrap();
        assert!(registry.validate().is_ok());
        let names: Vec<&str> = registry.devices().iter().map(|d| d.name()).collect();
        assert_eq!(names, vec!["A", "B"]);
    }

    #[test]
    fn test_unrepresentable_names_rejected() {
        let mut registry = Registry::default();
        for name in ["", "devices", "Bad\"Name", "Bus]", "[Bus", "a=b", "Two\nLines", " Padded"] {
            let err = registry.add_device(Device::switch(name)).unwrap_err();
            assert!(matches!(err, ConfigError::InvalidParameter(_)), "{:?}", name);
        }
        assert_eq!(registry.device_count(), 0);
        assert!(registry.add_device(Device::switch("Bus-0-1")).is_ok());
    }
}
