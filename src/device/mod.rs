//! Device model.
//!
//! A device is a named, typed node of the topology graph. Besides its
//! `typename` and `name`, everything about a device lives in its parameter
//! store, so generators can attach arbitrary parameters to any variant
//! (e.g. `hot_req_ratio` on a requester) without the type knowing about them.

pub mod types;

pub use types::{DeviceKind, EvictionPolicy, DEFAULT_DRAM_CONFIG, GIB};

use crate::error::{ConfigError, Result};
use crate::params::{ParamMap, ParamStore, ParamValue};

/// Attribute names that are not parameters and cannot be set through the store
pub const RESERVED_NAMES: [&str; 3] = ["typename", "name", "params"];

/// A named device with its parameter store
#[derive(Debug, Clone, PartialEq)]
pub struct Device {
    kind: DeviceKind,
    name: String,
    params: ParamStore,
}

impl Device {
    /// Create a device pre-populated with the variant's defaults
    pub fn new(kind: DeviceKind, name: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.into(),
            params: kind.default_params(),
        }
    }

    pub fn requester(name: impl Into<String>) -> Self {
        Self::new(DeviceKind::Requester, name)
    }

    pub fn duplex_bus(name: impl Into<String>) -> Self {
        Self::new(DeviceKind::DuplexBus, name)
    }

    pub fn memory(name: impl Into<String>) -> Self {
        Self::new(DeviceKind::MemoryInterface, name)
    }

    pub fn snoop(name: impl Into<String>) -> Self {
        Self::new(DeviceKind::SnoopFilter, name)
    }

    pub fn switch(name: impl Into<String>) -> Self {
        Self::new(DeviceKind::Switch, name)
    }

    pub fn kind(&self) -> DeviceKind {
        self.kind
    }

    pub fn typename(&self) -> &'static str {
        self.kind.typename()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The same device under a new name. Consumes the device, so a device
    /// borrowed from a registry cannot be renamed behind its index.
    pub fn renamed(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn params(&self) -> &ParamStore {
        &self.params
    }

    /// Assign a parameter. Unknown keys are accepted; reserved attribute
    /// names are rejected.
    pub fn set(&mut self, key: &str, value: impl Into<ParamValue>) -> Result<&mut Self> {
        if RESERVED_NAMES.contains(&key) {
            return Err(ConfigError::ReservedName(key.to_string()));
        }
        self.params.set(key, value);
        Ok(self)
    }

    /// Builder-style `set`
    pub fn with(mut self, key: &str, value: impl Into<ParamValue>) -> Result<Self> {
        self.set(key, value)?;
        Ok(self)
    }

    /// Apply every override in the map, in key order
    pub fn apply(&mut self, overrides: &ParamMap) -> Result<&mut Self> {
        for (key, value) in overrides {
            self.set(key, value.clone())?;
        }
        Ok(self)
    }

    pub fn get(&self, key: &str) -> Result<&ParamValue> {
        self.params.get(key).ok_or_else(|| ConfigError::KeyNotFound {
            device: self.name.clone(),
            key: key.to_string(),
        })
    }

    pub fn get_int(&self, key: &str) -> Result<i64> {
        let value = self.get(key)?;
        value.as_int().ok_or_else(|| self.mismatch(key, "integer", value))
    }

    pub fn get_float(&self, key: &str) -> Result<f64> {
        let value = self.get(key)?;
        value.as_float().ok_or_else(|| self.mismatch(key, "float", value))
    }

    pub fn get_str(&self, key: &str) -> Result<&str> {
        let value = self.get(key)?;
        value.as_str().ok_or_else(|| self.mismatch(key, "string", value))
    }

    pub fn get_bool(&self, key: &str) -> Result<bool> {
        let value = self.get(key)?;
        value.as_bool().ok_or_else(|| self.mismatch(key, "bool", value))
    }

    fn mismatch(&self, key: &str, expected: &str, found: &ParamValue) -> ConfigError {
        ConfigError::invalid(format!(
            "{}.{} is a {}, expected {}",
            self.name,
            key,
            found.type_name(),
            expected
        ))
    }

    /// Render the device section: `[name]` followed by its parameters
    pub fn render(&self) -> String {
        format!("[{}]\n{}", self.name, self.params.render())
    }
}
