//! Snoop filter victim-selection study.
//!
//! Hosts run a hot/cold (or streaming) access pattern over a 1 MiB footprint
//! behind a snoop filter sized to twice the hot region, so the eviction
//! policy decides how often hot lines are invalidated.

use crate::device::{Device, EvictionPolicy};
use crate::error::{ConfigError, Result};
use crate::registry::{GlobalSettings, Registry};
use serde::{Deserialize, Serialize};

/// Bytes touched by all hosts together
pub const FOOTPRINT: i64 = 1024 * 1024;
pub const LINE_SIZE: i64 = 64;
pub const ASSOC: i64 = 8;
/// Fraction of requests that target the hot region
pub const HOT_REQ_RATIO: f64 = 0.9;

/// Parameters of one victim-selection run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VictimSpec {
    pub policy: EvictionPolicy,
    /// Maximum invalidations per burst
    #[serde(default)]
    pub burst_inv: i64,
    #[serde(default = "default_hosts")]
    pub hosts: usize,
    /// Hot/cold access pattern instead of streaming
    #[serde(default)]
    pub hot_cold: bool,
}

fn default_hosts() -> usize {
    1
}

impl VictimSpec {
    pub fn new(policy: EvictionPolicy) -> Self {
        Self {
            policy,
            burst_inv: 0,
            hosts: default_hosts(),
            hot_cold: false,
        }
    }
}

/// Per-host cache size: the hot region rounded up to a whole set, doubled,
/// capped at the footprint
pub fn cache_size() -> i64 {
    let hot_region_ratio = 1.0 - HOT_REQ_RATIO;
    let raw_hot = (FOOTPRINT as f64 * hot_region_ratio) as i64;
    let align = LINE_SIZE * ASSOC;
    let hot_footprint = align.max((raw_hot + align - 1) / align * align);
    FOOTPRINT.min(hot_footprint * 2)
}

/// Build the victim study registry
pub fn victim(settings: GlobalSettings, spec: &VictimSpec) -> Result<Registry> {
    if spec.hosts == 0 {
        return Err(ConfigError::invalid("victim study needs at least one host"));
    }
    if spec.burst_inv < 0 {
        return Err(ConfigError::invalid(format!("burst invalidations cannot be negative, got {}", spec.burst_inv)));
    }

    let hot_region_ratio = 1.0 - HOT_REQ_RATIO;
    let cache_size = cache_size();
    let host_count = i64::try_from(spec.hosts)
        .map_err(|_| ConfigError::invalid(format!("host count {} out of range", spec.hosts)))?;

    let mut registry = Registry::new(settings);

    let mut snoop = Device::snoop("Snoop");
    snoop
        .set("eviction", spec.policy.as_str())?
        .set("line_num", host_count * cache_size / LINE_SIZE)?
        .set("max_burst_inv", spec.burst_inv)?
        .set("ranges", vec![[0, FOOTPRINT as u64]])?;
    registry.add_device(snoop)?;

    let pattern = if spec.hot_cold { "hotcold" } else { "stream" };
    let mut hosts = Vec::with_capacity(spec.hosts);
    for i in 0..spec.hosts {
        let mut host = Device::requester(format!("Host-{}", i));
        host.set("q_capacity", 64)?
            .set("coherent", true)?
            .set("cache_capacity", cache_size)?
            .set("interleave_type", pattern)?
            .set("hot_req_ratio", HOT_REQ_RATIO)?
            .set("hot_region_ratio", hot_region_ratio)?
            .set("issue_delay", 2)?
            .set("interleave_param", 30000)?;
        hosts.push(host);
    }
    let host_names: Vec<String> = hosts.iter().map(|h| h.name().to_string()).collect();
    registry.add_devices(hosts)?;

    let mem = Device::memory("Mem-0")
        .with("wr_ratio", 0.0)?
        .with("capacity", FOOTPRINT)?;
    registry.add_device(mem)?;

    let switch = Device::switch(super::ORACLE_SWITCH).with("delay", 0)?;
    let bus = Device::duplex_bus("OracleBus")
        .with("delay_per_T", 0)?
        .with("width", 256)?
        .with("frame_size", 32)?;
    registry.add_devices([switch, bus])?;

    for host in &host_names {
        registry.connect(host, super::ORACLE_SWITCH)?;
    }
    registry.connect(super::ORACLE_SWITCH, "OracleBus")?;
    registry.connect("OracleBus", "Snoop")?;
    registry.connect("Snoop", "Mem-0")?;
    Ok(registry)
}
