//! Boundary with the simulator's outputs.
//!
//! The simulator writes a per-request CSV trace to `log_name` and human
//! readable statistics to standard error. Downstream tooling matches both
//! literally, so the vocabulary here must not drift.

pub mod aggregate;

pub use aggregate::{parse_aggregate, parse_aggregates, AggregateStats};

/// Per-request CSV columns that post-processing reads by name
pub const CSV_FIELDS: [&str; 7] = [
    "switch_time",
    "send",
    "arrive",
    "switch_queuing",
    "dram_queuing",
    "total_time",
    "type",
];

/// Check that a CSV header line carries every required column.
/// Returns the missing column names on failure.
pub fn check_csv_header(header: &str) -> Result<(), Vec<String>> {
    let columns: Vec<&str> = header.trim().split(',').map(str::trim).collect();
    let missing: Vec<String> = CSV_FIELDS
        .iter()
        .filter(|field| !columns.contains(field))
        .map(|field| field.to_string())
        .collect();
    if missing.is_empty() {
        Ok(())
    } else {
        Err(missing)
    }
}
