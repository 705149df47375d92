//! Topology generators.
//!
//! Instantiate host/memory endpoints and wire their edge switches into one of
//! five shapes (chain, ring, tree, spine-leaf, full mesh), deriving the
//! per-hop switch delay from a target bandwidth.

pub mod bandwidth;
pub mod generator;
pub mod types;

pub use bandwidth::{delay_for_bandwidth, strict_ceil, switch_delay, HEADER_BYTES, MAX_DELAY};
pub use generator::{default_log_name, generate, CORE_SWITCH};
pub use types::{default_host_params, TopologyKind, TopologySpec};
