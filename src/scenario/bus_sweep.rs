//! Duplex bus study: write ratio and frame size sweep.

use super::register_bus_path;
use crate::device::Device;
use crate::error::{ConfigError, Result};
use crate::params::format_float;
use crate::registry::{GlobalSettings, Registry};

/// Memories behind the oracle switch
const MEM_COUNT: usize = 4;

/// Simulator log path for a sweep point: `output/<outputdir>/<ratio>.csv`
pub fn bus_sweep_log_name(outputdir: &str, wr_ratio: f64) -> String {
    format!("output/{}/{}.csv", outputdir, format_float(wr_ratio))
}

/// One host streaming through a 64-bit bus to four memories.
///
/// A positive `frame_size` gives a full duplex bus with that frame size. Zero
/// or less switches to half duplex with a 20-tick turnaround and 64-byte
/// frames.
pub fn bus_sweep(settings: GlobalSettings, wr_ratio: f64, frame_size: i64) -> Result<Registry> {
    if !(0.0..=1.0).contains(&wr_ratio) {
        return Err(ConfigError::invalid(format!("write ratio must be within [0, 1], got {}", wr_ratio)));
    }

    let host = Device::requester("Host")
        .with("interleave_param", 20000)?
        .with("block_size", 64)?;

    let mut mems = Vec::with_capacity(MEM_COUNT);
    for i in 0..MEM_COUNT {
        mems.push(Device::memory(format!("Mem-{}", i)).with("wr_ratio", wr_ratio)?);
    }

    let mut bus = Device::duplex_bus("Bus");
    bus.set("width", 64)?.set("frame_size", frame_size)?;
    if frame_size <= 0 {
        bus.set("is_full", false)?
            .set("half_rev_time", 20)?
            .set("frame_size", 64)?;
    }

    let mut registry = Registry::new(settings);
    register_bus_path(&mut registry, host, mems, bus)?;
    Ok(registry)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::Edge;
    use crate::scenario::ORACLE_SWITCH;

    #[test]
    fn test_full_duplex_point() {
        let registry = bus_sweep(GlobalSettings::default(), 0.5, 128).unwrap();
        let bus = registry.device("Bus").unwrap();
        assert!(bus.get_bool("is_full").unwrap());
        assert_eq!(bus.get_int("frame_size").unwrap(), 128);
        assert_eq!(bus.get_int("width").unwrap(), 64);
        assert_eq!(registry.device("Mem-3").unwrap().get_float("wr_ratio").unwrap(), 0.5);

        assert_eq!(registry.edges()[0], Edge::new("Host", "Bus"));
        assert_eq!(registry.edges()[1], Edge::new("Bus", ORACLE_SWITCH));
        assert_eq!(registry.edges().len(), 2 + 4);
    }

    #[test]
    fn test_half_duplex_point() {
        let registry = bus_sweep(GlobalSettings::default(), 0.0, 0).unwrap();
        let bus = registry.device("Bus").unwrap();
        assert!(!bus.get_bool("is_full").unwrap());
        assert_eq!(bus.get_int("half_rev_time").unwrap(), 20);
        assert_eq!(bus.get_int("frame_size").unwrap(), 64);
    }

    #[test]
    fn test_ratio_out_of_range() {
        assert!(bus_sweep(GlobalSettings::default(), 1.5, 64).is_err());
    }

    #[test]
    fn test_log_name() {
        assert_eq!(bus_sweep_log_name("fig11", 0.0), "output/fig11/0.0.csv");
        assert_eq!(bus_sweep_log_name("fig11", 0.25), "output/fig11/0.25.csv");
        assert_eq!(bus_sweep_log_name("fig11", 0.00001), "output/fig11/1e-05.csv");
    }
}
