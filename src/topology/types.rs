//! Topology kinds and generation parameters.

use crate::error::{ConfigError, Result};
use crate::params::{ParamMap, ParamValue};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Shape used to wire the edge switches together
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TopologyKind {
    /// switch[i] -> switch[i+1]
    #[serde(rename = "chain")]
    Chain,
    /// Chain closed into a loop
    #[serde(rename = "ring")]
    Ring,
    /// Binary fan-in tree built bottom-up from the edge switches
    #[serde(rename = "tree")]
    Tree,
    /// Every edge switch attached to one zero-delay core switch
    #[serde(rename = "spineleaf", alias = "spine-leaf")]
    SpineLeaf,
    /// Direct link for every ordered pair of edge switches
    #[serde(rename = "full", alias = "full-mesh")]
    FullMesh,
}

impl TopologyKind {
    pub const ALL: [TopologyKind; 5] = [
        TopologyKind::Chain,
        TopologyKind::Ring,
        TopologyKind::Tree,
        TopologyKind::SpineLeaf,
        TopologyKind::FullMesh,
    ];

    /// Name used on the command line and in output paths
    pub fn name(&self) -> &'static str {
        match self {
            Self::Chain => "chain",
            Self::Ring => "ring",
            Self::Tree => "tree",
            Self::SpineLeaf => "spineleaf",
            Self::FullMesh => "full",
        }
    }

    /// Smallest endpoint count for which the shape is not degenerate
    pub fn min_endpoints(&self) -> usize {
        match self {
            Self::Chain | Self::Tree | Self::SpineLeaf => 1,
            Self::Ring | Self::FullMesh => 2,
        }
    }

    /// Delay multiplier used in normalized-bandwidth mode so that differing
    /// hop counts yield comparable end-to-end bandwidth
    pub fn normalization_multiplier(&self, endpoints: usize) -> u64 {
        let n = endpoints as u64;
        match self {
            Self::Chain | Self::Tree => 1,
            Self::Ring => 2,
            Self::SpineLeaf => n.div_ceil(2),
            Self::FullMesh => n,
        }
    }
}

impl fmt::Display for TopologyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for TopologyKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "chain" => Ok(Self::Chain),
            "ring" => Ok(Self::Ring),
            "tree" => Ok(Self::Tree),
            "spineleaf" | "spine-leaf" => Ok(Self::SpineLeaf),
            "full" | "full-mesh" => Ok(Self::FullMesh),
            other => Err(ConfigError::invalid(format!(
                "unsupported topology '{}' (expected chain, ring, tree, spineleaf or full)",
                other
            ))),
        }
    }
}

fn default_bus_width() -> i64 {
    256
}

fn default_base_delay() -> u64 {
    1
}

/// Host parameters applied by the topology generator unless overridden
pub fn default_host_params() -> ParamMap {
    let mut params = ParamMap::new();
    params.insert("q_capacity".to_string(), ParamValue::Int(24));
    params.insert("interleave_param".to_string(), ParamValue::Int(10000));
    params
}

/// Inputs of one topology generation run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopologySpec {
    pub kind: TopologyKind,
    /// Number of host/memory endpoint pairs
    pub endpoints: usize,
    /// Target switch port bandwidth in MB/s; derives the per-hop delay
    #[serde(default, alias = "bw")]
    pub bandwidth_mbps: Option<f64>,
    /// Realize every switch-to-switch link as switch -> bus -> switch
    #[serde(default, alias = "bus")]
    pub use_bus: bool,
    /// Scale the delay by the topology's hop-count multiplier
    #[serde(default, alias = "norm")]
    pub normalize: bool,
    #[serde(default = "default_bus_width")]
    pub bus_width: i64,
    /// Switch delay used when no bandwidth target is given
    #[serde(default = "default_base_delay")]
    pub base_delay: u64,
    /// Applied to every host before `host_params`
    #[serde(skip, default = "default_host_params")]
    pub host_defaults: ParamMap,
    /// Host overrides, layered over `host_defaults`
    #[serde(default)]
    pub host_params: ParamMap,
    #[serde(default)]
    pub mem_params: ParamMap,
}

impl TopologySpec {
    pub fn new(kind: TopologyKind, endpoints: usize) -> Self {
        Self {
            kind,
            endpoints,
            bandwidth_mbps: None,
            use_bus: false,
            normalize: false,
            bus_width: default_bus_width(),
            base_delay: default_base_delay(),
            host_defaults: default_host_params(),
            host_params: ParamMap::new(),
            mem_params: ParamMap::new(),
        }
    }

    pub fn with_bandwidth(mut self, bandwidth_mbps: f64) -> Self {
        self.bandwidth_mbps = Some(bandwidth_mbps);
        self
    }

    pub fn with_bus(mut self, use_bus: bool) -> Self {
        self.use_bus = use_bus;
        self
    }

    pub fn with_normalize(mut self, normalize: bool) -> Self {
        self.normalize = normalize;
        self
    }

    /// Reject inputs that would produce a degenerate or invalid graph
    pub fn validate(&self) -> Result<()> {
        if self.endpoints < self.kind.min_endpoints() {
            return Err(ConfigError::invalid(format!(
                "{} topology requires at least {} endpoint(s), got {}",
                self.kind,
                self.kind.min_endpoints(),
                self.endpoints
            )));
        }
        if let Some(bw) = self.bandwidth_mbps {
            if !bw.is_finite() || bw <= 0.0 {
                return Err(ConfigError::invalid(format!("bandwidth must be positive, got {}", bw)));
            }
        }
        if self.use_bus && self.bus_width <= 0 {
            return Err(ConfigError::invalid(format!("bus width must be positive, got {}", self.bus_width)));
        }
        Ok(())
    }
}
