//! Trace-driven workloads.

use super::register_bus_path;
use crate::device::Device;
use crate::error::{ConfigError, Result};
use crate::params::{ParamMap, ParamValue};
use crate::registry::{GlobalSettings, Registry};
use crate::topology::{self, TopologyKind, TopologySpec};
use std::fmt;
use std::str::FromStr;

/// Endpoints in the trace-driven topology workloads
pub const TRACE_ENDPOINTS: usize = 8;

/// Memories behind the oracle switch in the bus workloads
const MEM_COUNT: usize = 4;

/// Workload shape replaying a memory trace
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TraceWorkload {
    /// Single host over a full duplex bus
    FullBus,
    /// Single host over a half duplex bus with zero turnaround
    HalfBus,
    /// Trace-driven hosts on a bus-linked topology
    Topology(TopologyKind),
}

impl fmt::Display for TraceWorkload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FullBus => f.write_str("fullbus"),
            Self::HalfBus => f.write_str("halfbus"),
            Self::Topology(kind) => write!(f, "{}", kind),
        }
    }
}

impl FromStr for TraceWorkload {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "fullbus" => Ok(Self::FullBus),
            "halfbus" => Ok(Self::HalfBus),
            other => other.parse::<TopologyKind>().map(Self::Topology),
        }
    }
}

/// Location of a named trace relative to the simulator's working directory
pub fn trace_file_path(trace: &str) -> String {
    format!("./traces/{}.trace", trace)
}

fn trace_host_params(trace_file: &str, q_capacity: i64) -> ParamMap {
    let mut params = ParamMap::new();
    params.insert("q_capacity".to_string(), ParamValue::Int(q_capacity));
    params.insert("interleave_type".to_string(), ParamValue::from("trace"));
    params.insert("trace_file".to_string(), ParamValue::from(trace_file));
    params.insert("block_size".to_string(), ParamValue::Int(64));
    params
}

/// Build the registry replaying `trace` under `workload`
pub fn trace(settings: GlobalSettings, workload: TraceWorkload, trace: &str) -> Result<Registry> {
    if trace.is_empty() {
        return Err(ConfigError::invalid("trace name cannot be empty"));
    }
    let trace_file = trace_file_path(trace);

    match workload {
        TraceWorkload::FullBus | TraceWorkload::HalfBus => {
            let host = Device::requester("Host")
                .with("interleave_type", "trace")?
                .with("trace_file", trace_file.as_str())?
                .with("block_size", 64)?;

            let mut mems = Vec::with_capacity(MEM_COUNT);
            for i in 0..MEM_COUNT {
                mems.push(Device::memory(format!("Mem-{}", i)).with("capacity", 1i64 << 62)?);
            }

            let mut bus = Device::duplex_bus("Bus");
            if workload == TraceWorkload::FullBus {
                bus.set("is_full", true)?;
            } else {
                bus.set("is_full", false)?.set("half_rev_time", 0)?;
            }
            bus.set("width", 64)?.set("frame_size", 32)?;

            let mut registry = Registry::new(settings);
            register_bus_path(&mut registry, host, mems, bus)?;
            Ok(registry)
        }
        TraceWorkload::Topology(kind) => {
            let mut spec = TopologySpec::new(kind, TRACE_ENDPOINTS).with_bus(true);
            spec.host_defaults = ParamMap::new();
            spec.host_params = trace_host_params(&trace_file, 4);
            topology::generate(&spec, settings)
        }
    }
}
