//! Minimal coherent path: one host through a bus and snoop filter to memory.

use crate::device::{Device, DeviceKind};
use crate::error::Result;
use crate::registry::{GlobalSettings, Registry};

/// `Requester -> DuplexBus -> Snoop -> DRAMsim3Interface`, all with defaults.
/// Devices are named after their type tags.
pub fn sample(settings: GlobalSettings) -> Result<Registry> {
    let req = Device::new(DeviceKind::Requester, DeviceKind::Requester.typename());
    let mem = Device::new(DeviceKind::MemoryInterface, DeviceKind::MemoryInterface.typename());
    let bus = Device::new(DeviceKind::DuplexBus, DeviceKind::DuplexBus.typename());
    let snp = Device::new(DeviceKind::SnoopFilter, DeviceKind::SnoopFilter.typename());
    let (req_name, mem_name, bus_name, snp_name) = (
        req.name().to_string(),
        mem.name().to_string(),
        bus.name().to_string(),
        snp.name().to_string(),
    );

    let mut registry = Registry::new(settings);
    registry.add_devices([req, mem, bus, snp])?;
    registry.connect(&req_name, &bus_name)?;
    registry.connect(&bus_name, &snp_name)?;
    registry.connect(&snp_name, &mem_name)?;
    Ok(registry)
}
