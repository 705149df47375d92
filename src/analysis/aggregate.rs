//! Parsing of the simulator's standard-error statistics.
//!
//! Each requester prints a stats block; the `Aggregate:` section at its end
//! carries the figures post-processing relies on:
//!
//! ```text
//! Host-0 stats:
//!  * Issued packets: 1000
//!  * Evict count: 12
//!  * Aggregate:
//!    - Bandwidth (GB/s): 9.87
//!    - Average latency (ns): 154.2
//!    - Average wait for evict (ns): 3.1
//! ```

use serde::Serialize;
use std::sync::LazyLock;

use regex::Regex;

/// Compiled regex patterns for stats parsing
pub struct StatPatterns {
    /// Match: "* Aggregate:"
    pub aggregate: Regex,
    /// Match: "Bandwidth (GB/s): <float>"
    pub bandwidth: Regex,
    /// Match: "Average latency (ns): <float>" (or ps)
    pub latency: Regex,
    /// Match: "Evict count: <float>"
    pub evict_count: Regex,
    /// Match: "Average wait for evict (ns): <float>" (or ps)
    pub evict_wait: Regex,
}

impl StatPatterns {
    pub fn new() -> Self {
        Self {
            aggregate: Regex::new(r"Aggregate:").expect("Invalid aggregate regex"),
            bandwidth: Regex::new(r"Bandwidth \(GB/s\):\s*([0-9.+\-eE]+|nan|inf)")
                .expect("Invalid bandwidth regex"),
            latency: Regex::new(r"Average latency \((ns|ps)\):\s*([0-9.+\-eE]+|nan|inf)")
                .expect("Invalid latency regex"),
            evict_count: Regex::new(r"Evict count:\s*([0-9.+\-eE]+)").expect("Invalid evict_count regex"),
            evict_wait: Regex::new(r"Average wait for evict \((ns|ps)\):\s*([0-9.+\-eE]+|nan|inf)")
                .expect("Invalid evict_wait regex"),
        }
    }
}

impl Default for StatPatterns {
    fn default() -> Self {
        Self::new()
    }
}

/// Global patterns instance
pub static PATTERNS: LazyLock<StatPatterns> = LazyLock::new(StatPatterns::new);

/// Aggregate figures of one requester's stats block
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct AggregateStats {
    /// Requester name from the "<name> stats:" header, if present
    pub requester: Option<String>,
    pub bandwidth_gbps: Option<f64>,
    pub avg_latency: Option<f64>,
    pub evict_count: Option<f64>,
    pub avg_evict_wait: Option<f64>,
    /// Time unit of the latency figures as printed ("ns" or "ps")
    pub time_unit: Option<String>,
}

fn parse_number(s: &str) -> Option<f64> {
    s.parse::<f64>().ok()
}

/// Parse every stats block's aggregate section, in output order
pub fn parse_aggregates(text: &str) -> Vec<AggregateStats> {
    let mut results = Vec::new();
    let mut current = AggregateStats::default();
    let mut in_aggregate = false;

    for line in text.lines() {
        let trimmed = line.trim();

        if let Some(name) = trimmed.strip_suffix(" stats:") {
            if in_aggregate {
                results.push(std::mem::take(&mut current));
                in_aggregate = false;
            }
            current = AggregateStats {
                requester: Some(name.to_string()),
                ..Default::default()
            };
            continue;
        }

        if let Some(caps) = PATTERNS.evict_count.captures(trimmed) {
            current.evict_count = caps.get(1).and_then(|m| parse_number(m.as_str()));
            continue;
        }

        if PATTERNS.aggregate.is_match(trimmed) {
            if in_aggregate {
                let requester = current.requester.clone();
                results.push(std::mem::replace(
                    &mut current,
                    AggregateStats {
                        requester,
                        ..Default::default()
                    },
                ));
            }
            in_aggregate = true;
            continue;
        }

        if !in_aggregate {
            continue;
        }

        if let Some(caps) = PATTERNS.bandwidth.captures(trimmed) {
            current.bandwidth_gbps = caps.get(1).and_then(|m| parse_number(m.as_str()));
        } else if let Some(caps) = PATTERNS.latency.captures(trimmed) {
            current.time_unit = caps.get(1).map(|m| m.as_str().to_string());
            current.avg_latency = caps.get(2).and_then(|m| parse_number(m.as_str()));
        } else if let Some(caps) = PATTERNS.evict_wait.captures(trimmed) {
            current.avg_evict_wait = caps.get(2).and_then(|m| parse_number(m.as_str()));
        }
    }

    if in_aggregate {
        results.push(current);
    }
    results
}

/// First aggregate section in the output, if any
pub fn parse_aggregate(text: &str) -> Option<AggregateStats> {
    parse_aggregates(text).into_iter().next()
}
