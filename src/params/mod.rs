//! Parameter store backing every device.
//!
//! A device's configuration is an ordered list of `key = value` pairs. The
//! order is observable in the rendered document, so the store preserves
//! first-insertion order and overwrites in place.

pub mod store;
pub mod value;

pub use store::ParamStore;
pub use value::{format_float, ParamMap, ParamValue};
