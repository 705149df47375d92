//! Bandwidth-to-delay conversion.
//!
//! A switch forwards one header-sized unit per delay period, so
//! `BW(MB/s) = HEADER_BYTES * 1e9 / (delay(ns) * 1024^2)`, which gives
//! `delay(ns) = HEADER_BYTES * 1e9 / (BW * 1024^2)`, rounded up.

use super::types::TopologySpec;
use crate::error::{ConfigError, Result};

/// Bytes moved per switch hop
pub const HEADER_BYTES: f64 = 4.0;

const BYTES_PER_MB: f64 = 1024.0 * 1024.0;

/// Largest delay the simulator config can carry (integer parameters are i64)
pub const MAX_DELAY: u64 = i64::MAX as u64;

/// Ceiling that leaves integral values untouched: `floor(x) + 1` when `x`
/// has a fractional part, else `x`. `None` when the result does not fit in
/// a delay.
pub fn strict_ceil(x: f64) -> Option<u64> {
    if !x.is_finite() || x < 0.0 {
        return None;
    }
    let whole = x.trunc();
    // MAX_DELAY rounds up to 2^63 as f64, so anything at or above it is out of range
    if whole >= MAX_DELAY as f64 {
        return None;
    }
    let ceil = whole as u64;
    Some(if x > whole { ceil + 1 } else { ceil })
}

/// Per-hop delay in simulation ticks for a target port bandwidth in MB/s
pub fn delay_for_bandwidth(bandwidth_mbps: f64) -> Result<u64> {
    if !bandwidth_mbps.is_finite() || bandwidth_mbps <= 0.0 {
        return Err(ConfigError::invalid(format!(
            "bandwidth must be positive, got {}",
            bandwidth_mbps
        )));
    }
    strict_ceil(HEADER_BYTES * 1e9 / (bandwidth_mbps * BYTES_PER_MB)).ok_or_else(|| {
        ConfigError::invalid(format!("bandwidth {} MB/s gives an out of range delay", bandwidth_mbps))
    })
}

/// Delay assigned to every topology switch: derived from the bandwidth
/// target (or the base delay), times the normalization multiplier if enabled
pub fn switch_delay(spec: &TopologySpec) -> Result<u64> {
    let delay = match spec.bandwidth_mbps {
        Some(bw) => delay_for_bandwidth(bw)?,
        None => spec.base_delay,
    };
    let delay = if spec.normalize {
        let multiplier = spec.kind.normalization_multiplier(spec.endpoints);
        delay.checked_mul(multiplier).ok_or_else(|| {
            ConfigError::invalid(format!("switch delay {} x {} overflows", delay, multiplier))
        })?
    } else {
        delay
    };
    if delay > MAX_DELAY {
        return Err(ConfigError::invalid(format!("switch delay {} out of range", delay)));
    }
    Ok(delay)
}
