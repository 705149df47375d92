//! Topology generation.
//!
//! Every topology starts from the same endpoints: `N` hosts, `N` memories and
//! `N` edge switches wired `Host-i -> Switch-i -> Mem-i`. The edge switches are
//! then linked according to the topology kind, optionally through a fresh
//! `DuplexBus` on every switch-to-switch link.

use super::bandwidth::switch_delay;
use super::types::{TopologyKind, TopologySpec};
use crate::device::Device;
use crate::error::{ConfigError, Result};
use crate::registry::{GlobalSettings, Registry};
use log::{debug, info};

/// Name of the zero-delay spine switch in spine-leaf topologies
pub const CORE_SWITCH: &str = "Core";

/// Simulator log path for a topology run: `output/<outputdir>/<kind>.csv`
pub fn default_log_name(outputdir: &str, kind: TopologyKind) -> String {
    format!("output/{}/{}.csv", outputdir, kind)
}

/// Build a fully populated registry for `spec`
pub fn generate(spec: &TopologySpec, settings: GlobalSettings) -> Result<Registry> {
    spec.validate()?;
    let delay = switch_delay(spec)?;
    info!(
        "Generating {} topology: {} endpoints, switch delay {}, bus links: {}",
        spec.kind, spec.endpoints, delay, spec.use_bus
    );

    let mut builder = TopologyBuilder {
        registry: Registry::new(settings),
        spec,
        delay,
        switches: Vec::with_capacity(spec.endpoints),
    };
    builder.add_endpoints()?;
    match spec.kind {
        TopologyKind::Chain => builder.wire_chain()?,
        TopologyKind::Ring => builder.wire_ring()?,
        TopologyKind::Tree => builder.wire_tree()?,
        TopologyKind::SpineLeaf => builder.wire_spine_leaf()?,
        TopologyKind::FullMesh => builder.wire_full_mesh()?,
    }

    let registry = builder.registry;
    info!(
        "Generated {} devices and {} edges",
        registry.device_count(),
        registry.edges().len()
    );
    Ok(registry)
}

struct TopologyBuilder<'a> {
    registry: Registry,
    spec: &'a TopologySpec,
    delay: u64,
    /// Switch names in creation order; tree parents are appended
    switches: Vec<String>,
}

impl TopologyBuilder<'_> {
    fn new_switch(&self, name: String, delay: u64) -> Result<Device> {
        let delay = i64::try_from(delay)
            .map_err(|_| ConfigError::invalid(format!("switch delay {} out of range", delay)))?;
        Device::switch(name).with("delay", delay)
    }

    fn add_endpoints(&mut self) -> Result<()> {
        let n = self.spec.endpoints;

        let mut hosts = Vec::with_capacity(n);
        let mut mems = Vec::with_capacity(n);
        for i in 0..n {
            let mut host = Device::requester(format!("Host-{}", i));
            host.apply(&self.spec.host_defaults)?;
            host.apply(&self.spec.host_params)?;
            let mut mem = Device::memory(format!("Mem-{}", i));
            mem.apply(&self.spec.mem_params)?;
            hosts.push(host);
            mems.push(mem);
        }
        self.registry.add_devices(hosts)?;
        self.registry.add_devices(mems)?;

        for i in 0..n {
            let name = format!("Switch-{}", i);
            let switch = self.new_switch(name.clone(), self.delay)?;
            self.registry.add_device(switch)?;
            self.switches.push(name);
        }

        for i in 0..n {
            self.registry.connect(&format!("Host-{}", i), &self.switches[i])?;
            self.registry.connect(&self.switches[i], &format!("Mem-{}", i))?;
        }
        Ok(())
    }

    /// Connect `from -> to`, or `from -> bus -> to` when bus links are enabled
    fn link(&mut self, from: &str, to: &str, bus_name: String) -> Result<()> {
        if self.spec.use_bus {
            debug!("Linking {} -> {} -> {}", from, bus_name, to);
            let bus = Device::duplex_bus(bus_name.clone()).with("width", self.spec.bus_width)?;
            self.registry.add_device(bus)?;
            self.registry.connect(from, &bus_name)?;
            self.registry.connect(&bus_name, to)
        } else {
            debug!("Linking {} -> {}", from, to);
            self.registry.connect(from, to)
        }
    }

    fn wire_chain(&mut self) -> Result<()> {
        let n = self.spec.endpoints;
        for i in 0..n.saturating_sub(1) {
            let (from, to) = (self.switches[i].clone(), self.switches[i + 1].clone());
            self.link(&from, &to, format!("Bus-{}", i))?;
        }
        Ok(())
    }

    fn wire_ring(&mut self) -> Result<()> {
        let n = self.spec.endpoints;
        for i in 0..n {
            let (from, to) = (self.switches[i].clone(), self.switches[(i + 1) % n].clone());
            self.link(&from, &to, format!("Bus-{}", i))?;
        }
        Ok(())
    }

    /// Pair the two oldest unconsumed switches into a new parent until fewer
    /// than two remain. Parents join the frontier, so the result is a
    /// left-leaning fan-in tree, not a height-balanced one.
    fn wire_tree(&mut self) -> Result<()> {
        let mut switch_num = self.spec.endpoints;
        let mut cur = 0;
        while cur + 1 < switch_num {
            let parent = format!("Switch-{}", switch_num);
            let switch = self.new_switch(parent.clone(), self.delay)?;
            self.registry.add_device(switch)?;
            self.switches.push(parent.clone());

            let (left, right) = (self.switches[cur].clone(), self.switches[cur + 1].clone());
            self.link(&left, &parent, format!("Bus-{}", cur))?;
            self.link(&right, &parent, format!("Bus-{}", cur + 1))?;

            cur += 2;
            switch_num += 1;
        }
        Ok(())
    }

    fn wire_spine_leaf(&mut self) -> Result<()> {
        let core = self.new_switch(CORE_SWITCH.to_string(), 0)?;
        self.registry.add_device(core)?;
        for i in 0..self.spec.endpoints {
            let from = self.switches[i].clone();
            self.link(&from, CORE_SWITCH, format!("Bus-{}", i))?;
        }
        Ok(())
    }

    fn wire_full_mesh(&mut self) -> Result<()> {
        let n = self.spec.endpoints;
        for i in 0..n {
            for j in 0..n {
                if i != j {
                    let (from, to) = (self.switches[i].clone(), self.switches[j].clone());
                    self.link(&from, &to, format!("Bus-{}-{}", i, j))?;
                }
            }
        }
        Ok(())
    }
}
