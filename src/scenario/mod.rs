//! Ready-made experiment configurations.
//!
//! Each builder returns a populated registry for one of the standard studies:
//! a minimal coherent path, a duplex-bus write-ratio sweep, trace-driven
//! workloads, and snoop-filter victim selection.

pub mod bus_sweep;
pub mod sample;
pub mod trace;
pub mod victim;

pub use bus_sweep::{bus_sweep, bus_sweep_log_name};
pub use sample::sample;
pub use trace::{trace, trace_file_path, TraceWorkload};
pub use victim::{victim, VictimSpec};

use crate::device::Device;
use crate::error::Result;
use crate::registry::Registry;

/// Name of the zero-delay switch that gathers all requests in bus studies
pub const ORACLE_SWITCH: &str = "OracleSwitch";

/// `host -> bus -> OracleSwitch -> mem_i` path shared by the bus studies
fn register_bus_path(registry: &mut Registry, host: Device, mems: Vec<Device>, bus: Device) -> Result<()> {
    let host_name = host.name().to_string();
    let bus_name = bus.name().to_string();
    let mem_names: Vec<String> = mems.iter().map(|m| m.name().to_string()).collect();

    registry.add_device(host)?;
    registry.add_devices(mems)?;
    registry.add_device(bus)?;
    registry.add_device(Device::switch(ORACLE_SWITCH).with("delay", 0)?)?;

    registry.connect(&host_name, &bus_name)?;
    registry.connect(&bus_name, ORACLE_SWITCH)?;
    for mem in &mem_names {
        registry.connect(ORACLE_SWITCH, mem)?;
    }
    Ok(())
}
