//! Device variants and their default parameter sets.
//!
//! Each variant is a tag plus a canned default map. The tag string is what
//! the simulator dispatches on, so it must match the simulator's class names
//! exactly (`DRAMsim3Interface`, `Snoop`) rather than our variant names.

use crate::params::ParamStore;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Default DRAMsim3 timing configuration shipped with the simulator
pub const DEFAULT_DRAM_CONFIG: &str = "DRAMsim3/configs/DDR4_8Gb_x8_3200.ini";

/// 1 GiB, the default memory capacity and snoop range
pub const GIB: i64 = 1 << 30;

/// Closed set of device variants understood by the simulator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DeviceKind {
    /// Host issuing memory requests
    Requester,
    /// Full or half duplex bus between two devices
    DuplexBus,
    /// DRAMsim3-backed memory controller
    MemoryInterface,
    /// Snoop filter tracking cached lines for coherent hosts
    SnoopFilter,
    /// Packet switch with a fixed per-hop delay
    Switch,
}

impl DeviceKind {
    pub const ALL: [DeviceKind; 5] = [
        DeviceKind::Requester,
        DeviceKind::DuplexBus,
        DeviceKind::MemoryInterface,
        DeviceKind::SnoopFilter,
        DeviceKind::Switch,
    ];

    /// Tag emitted in the `[devices]` table
    pub fn typename(&self) -> &'static str {
        match self {
            Self::Requester => "Requester",
            Self::DuplexBus => "DuplexBus",
            Self::MemoryInterface => "DRAMsim3Interface",
            Self::SnoopFilter => "Snoop",
            Self::Switch => "Switch",
        }
    }

    /// Look up a variant by its emitted tag
    pub fn from_typename(typename: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.typename() == typename)
    }

    /// Fresh parameter store holding this variant's defaults, in declaration order
    pub fn default_params(&self) -> ParamStore {
        let mut params = ParamStore::new();
        match self {
            Self::Requester => {
                params.set("q_capacity", 32);
                params.set("cache_capacity", 8192);
                params.set("cache_delay", 12);
                params.set("issue_delay", 0);
                params.set("coherent", false);
                params.set("burst_size", 1);
                params.set("block_size", 64);
                params.set("interleave_type", "stream");
                params.set("interleave_param", 5);
                params.set("trace_file", "");
            }
            Self::DuplexBus => {
                params.set("is_full", true);
                params.set("half_rev_time", 100);
                params.set("delay_per_T", 1);
                params.set("width", 32);
                params.set("framing_time", 20);
                params.set("frame_size", 256);
            }
            Self::MemoryInterface => {
                params.set("tick_per_clock", 1);
                params.set("process_time", 40);
                params.set("start", 0);
                params.set("capacity", GIB);
                params.set("wr_ratio", 0.5);
                params.set("config_file", DEFAULT_DRAM_CONFIG);
                params.set("output_dir", "output");
            }
            Self::SnoopFilter => {
                params.set("line_num", 1024);
                params.set("assoc", 8);
                params.set("max_burst_inv", 8);
                params.set("ranges", vec![[0, GIB as u64]]);
                params.set("eviction", EvictionPolicy::Lru.as_str());
            }
            Self::Switch => {
                params.set("delay", 1);
            }
        }
        params
    }
}

impl fmt::Display for DeviceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.typename())
    }
}

/// Victim selection policy of a snoop filter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum EvictionPolicy {
    Fifo,
    Lifo,
    Lfi,
    Lru,
    Mru,
}

impl EvictionPolicy {
    pub const ALL: [EvictionPolicy; 5] = [
        EvictionPolicy::Fifo,
        EvictionPolicy::Lifo,
        EvictionPolicy::Lfi,
        EvictionPolicy::Lru,
        EvictionPolicy::Mru,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Fifo => "FIFO",
            Self::Lifo => "LIFO",
            Self::Lfi => "LFI",
            Self::Lru => "LRU",
            Self::Mru => "MRU",
        }
    }
}

impl fmt::Display for EvictionPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EvictionPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|policy| policy.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("Unknown eviction policy '{}' (expected FIFO, LIFO, LFI, LRU or MRU)", s))
    }
}
