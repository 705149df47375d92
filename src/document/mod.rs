//! Structured-text document consumed by the simulator.
//!
//! The layout is fixed: four global scalars, the `edges` array, the
//! `[devices]` name-to-type table, then one section per device. Rendering is
//! deterministic for a given registry state. `parse_document` reads a rendered
//! document back, which is how the CLI inspects existing configs.

pub mod parse;
pub mod render;

pub use parse::{parse_document, ParsedDocument, ParsedSection};
pub use render::render;
