//! Shared utilities: atomic output, parameter assignment parsing, structural checks.

pub mod options;
pub mod output;
pub mod validation;

pub use options::{merge_params, parse_param_assignment};
pub use output::{emit_document, write_atomically};
pub use validation::{validate_structure, StructureReport};
